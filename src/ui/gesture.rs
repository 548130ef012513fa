//! Hold-to-speed button gesture
//!
//! Holding the speed button plays at the boost rate until release. A quick
//! press, release, press, release (each step under `CHECK_TIME`) locks the
//! boost on; the next press unlocks it.
//!
//! ```text
//! Idle --press--> Pressed --quick release--> FastRelease --quick press--> FastPress
//!                    |                            |                           |
//!                slow release                slow press -> Pressed      quick release
//!                    v                                                        v
//!                  Idle <------------------- slow release ---------------- Locked
//! ```

/// Maximum gap between steps of a double press, in microseconds
pub const CHECK_TIME: i64 = 200_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedGesture {
    #[default]
    Idle,
    /// Held since `at`
    Pressed { at: i64 },
    /// Released quickly at `at`
    FastRelease { at: i64 },
    /// Pressed again quickly at `at`
    FastPress { at: i64 },
    /// Boost locked on by a double press
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureInput {
    Press,
    Release,
}

/// Speed the gesture asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedChange {
    Boost,
    Normal,
}

impl SpeedGesture {
    /// Apply an input at `now` (µs), returning the new state and any speed change
    pub fn transition(self, input: GestureInput, now: i64) -> (Self, Option<SpeedChange>) {
        use GestureInput::{Press, Release};

        match (self, input) {
            (Self::Idle | Self::Locked, Press) => (Self::Pressed { at: now }, Some(SpeedChange::Boost)),
            (Self::Pressed { at }, Release) => {
                if now - at < CHECK_TIME {
                    (Self::FastRelease { at: now }, Some(SpeedChange::Normal))
                } else {
                    (Self::Idle, Some(SpeedChange::Normal))
                }
            }
            (Self::FastRelease { at }, Press) => {
                if now - at < CHECK_TIME {
                    (Self::FastPress { at: now }, Some(SpeedChange::Boost))
                } else {
                    (Self::Pressed { at: now }, Some(SpeedChange::Boost))
                }
            }
            (Self::FastPress { at }, Release) => {
                if now - at < CHECK_TIME {
                    tracing::debug!("Speed boost locked");
                    (Self::Locked, Some(SpeedChange::Boost))
                } else {
                    (Self::Idle, Some(SpeedChange::Normal))
                }
            }
            // Key repeat, or a release without a matching press
            (state, _) => (state, None),
        }
    }

    /// Boost currently applied
    pub fn is_boosted(self) -> bool {
        matches!(
            self,
            Self::Pressed { .. } | Self::FastPress { .. } | Self::Locked
        )
    }
}
