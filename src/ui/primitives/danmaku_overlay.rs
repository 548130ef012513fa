//! Danmaku overlay primitive
//!
//! Draws the scheduler's showing comments with a one-pixel drop outline.
//! Positions are computed by `DanmakuScheduler`; this only paints them.

use iced::widget::Canvas;
use iced::widget::canvas::{Frame, Geometry, Program, Text};
use iced::{Element, Length, Point, Renderer, Theme, mouse};

use crate::danmaku::DanmakuScheduler;

/// Outline offset relative to the glyph position
const OUTLINE_OFFSET: f32 = 1.0;

/// Top padding inside each lane
const LANE_PADDING: f32 = 5.0;

/// Canvas program over one frame of scheduled comments
#[derive(Debug, Clone, Copy)]
pub struct DanmakuOverlay<'a> {
    scheduler: &'a DanmakuScheduler,
    opacity: f32,
}

impl<'a> DanmakuOverlay<'a> {
    pub fn new(scheduler: &'a DanmakuScheduler) -> Self {
        Self {
            scheduler,
            opacity: 1.0,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

impl<Message> Program<Message> for DanmakuOverlay<'_> {
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
        let size = iced::Pixels(self.scheduler.config().font_size);

        for (comment, placement) in self.scheduler.visible() {
            let y = placement.y + LANE_PADDING;

            // Outline first, text on top
            frame.fill_text(Text {
                content: comment.text.clone(),
                position: Point::new(placement.x + OUTLINE_OFFSET, y + OUTLINE_OFFSET),
                color: comment.border_color.to_color(self.opacity),
                size,
                align_x: iced::alignment::Horizontal::Left.into(),
                align_y: iced::alignment::Vertical::Top,
                ..Text::default()
            });
            frame.fill_text(Text {
                content: comment.text.clone(),
                position: Point::new(placement.x, y),
                color: comment.color.to_color(self.opacity),
                size,
                align_x: iced::alignment::Horizontal::Left.into(),
                align_y: iced::alignment::Vertical::Top,
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

/// Full-size overlay element
pub fn view<'a, Message: 'a>(overlay: DanmakuOverlay<'a>) -> Element<'a, Message> {
    Canvas::new(overlay)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
