//! Spinning loading ring primitive
//!
//! A fixed-length arc rotated by `phase`, drawn with iced's Canvas. The
//! caller advances `phase` from its frame clock.

use iced::widget::Canvas;
use iced::widget::canvas::{Frame, Geometry, Path, Program, Stroke};
use iced::{Color, Element, Point, Radians, Renderer, Theme, mouse};

/// Fraction of the circle covered by the arc
const ARC_FRACTION: f32 = 0.3;

/// Turns per second
const SPIN_RATE: f64 = 1.2;

#[derive(Debug, Clone, Copy)]
pub struct LoadingRing {
    /// Rotation in turns (0.0 - 1.0)
    pub phase: f32,
    pub stroke_width: f32,
    pub background_color: Color,
    pub arc_color: Color,
}

impl Default for LoadingRing {
    fn default() -> Self {
        Self {
            phase: 0.0,
            stroke_width: 4.0,
            background_color: Color::from_rgba(1.0, 1.0, 1.0, 0.15),
            arc_color: crate::ui::theme::ACCENT_PINK,
        }
    }
}

impl LoadingRing {
    /// Ring at the rotation for wall-clock `seconds`
    pub fn at(seconds: f64) -> Self {
        Self {
            phase: (seconds * SPIN_RATE).fract() as f32,
            ..Default::default()
        }
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }
}

impl<Message> Program<Message> for LoadingRing {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: iced::Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius = (bounds.width.min(bounds.height) / 2.0) - (self.stroke_width / 2.0) - 1.0;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default()
                .with_width(self.stroke_width)
                .with_color(self.background_color),
        );

        let start_angle = -std::f32::consts::FRAC_PI_2 + self.phase * std::f32::consts::TAU;
        let sweep_angle = ARC_FRACTION * std::f32::consts::TAU;
        let arc = Path::new(|builder| {
            builder.arc(iced::widget::canvas::path::Arc {
                center,
                radius,
                start_angle: Radians(start_angle),
                end_angle: Radians(start_angle + sweep_angle),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_width(self.stroke_width)
                .with_color(self.arc_color),
        );

        vec![frame.into_geometry()]
    }
}

pub fn view<'a, Message: 'a>(ring: LoadingRing, size: f32) -> Element<'a, Message> {
    Canvas::new(ring).width(size).height(size).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_wraps() {
        assert_eq!(LoadingRing::at(0.0).phase, 0.0);
        let phase = LoadingRing::at(10.0 / SPIN_RATE + 0.25 / SPIN_RATE).phase;
        assert!((phase - 0.25).abs() < 1e-4);
    }
}
