//! Video view stack and fullscreen transitions
//!
//! Fullscreen is a separate `VideoView` pushed on top of the windowed one.
//! Entering hands over the OSD state and the event subscription; exiting
//! hands them back to the view named by the `FullscreenToken`.

use tracing::{debug, error, info};

use super::video_view::{EventStream, VideoView, ViewEffect, ViewId};
use crate::player::{PlayerEvent, SubscriptionId};

/// Proof that fullscreen is active, naming the view to return to
#[derive(Debug, PartialEq, Eq)]
pub struct FullscreenToken {
    origin: ViewId,
}

impl FullscreenToken {
    pub fn origin(&self) -> ViewId {
        self.origin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenError {
    /// The active view has fullscreen disabled
    NotAllowed,
    /// Entering while fullscreen, or exiting while windowed
    AlreadyInState,
    /// The view to return to was removed; state transfer skipped
    MissingOrigin,
    NoActiveView,
}

impl std::fmt::Display for FullscreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FullscreenError::NotAllowed => write!(f, "Fullscreen not allowed for this view"),
            FullscreenError::AlreadyInState => write!(f, "Already in the requested mode"),
            FullscreenError::MissingOrigin => write!(f, "Fullscreen origin view is gone"),
            FullscreenError::NoActiveView => write!(f, "No active video view"),
        }
    }
}

impl std::error::Error for FullscreenError {}

/// Stack of video views, topmost is active
#[derive(Debug, Default)]
pub struct ViewStack {
    views: Vec<VideoView>,
    fullscreen: Option<FullscreenToken>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a windowed view and subscribe it
    pub fn push(&mut self, mut view: VideoView) -> Option<EventStream> {
        let stream = view.subscribe();
        self.views.push(view);
        stream
    }

    /// Remove a view, releasing its subscription first
    pub fn remove(&mut self, id: ViewId) -> Option<VideoView> {
        let index = self.views.iter().position(|view| view.id() == id)?;
        let mut view = self.views.remove(index);
        view.unsubscribe();
        debug!("Removed {}", id);
        Some(view)
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn active(&self) -> Option<&VideoView> {
        self.views.last()
    }

    pub fn active_mut(&mut self) -> Option<&mut VideoView> {
        self.views.last_mut()
    }

    pub fn get(&self, id: ViewId) -> Option<&VideoView> {
        self.views.iter().find(|view| view.id() == id)
    }

    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut VideoView> {
        self.views.iter_mut()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_some()
    }

    pub fn fullscreen_token(&self) -> Option<&FullscreenToken> {
        self.fullscreen.as_ref()
    }

    /// Deliver an event to the view holding subscription `id`
    ///
    /// Events for released subscriptions are dropped.
    pub fn dispatch(&mut self, id: SubscriptionId, event: PlayerEvent) -> Option<ViewEffect> {
        match self
            .views
            .iter_mut()
            .find(|view| view.subscription_id() == Some(id))
        {
            Some(view) => view.handle_event(event),
            None => {
                debug!("Dropping {:?} for stale subscription {}", event, id);
                None
            }
        }
    }

    /// Cover the active view with a fullscreen view carrying its state
    pub fn enter_fullscreen(&mut self) -> Result<Option<EventStream>, FullscreenError> {
        if self.fullscreen.is_some() {
            return Err(FullscreenError::AlreadyInState);
        }
        let origin = self.views.last_mut().ok_or(FullscreenError::NoActiveView)?;
        if !origin.allows_fullscreen() {
            return Err(FullscreenError::NotAllowed);
        }

        let origin_id = origin.id();
        let snapshot = origin.snapshot();
        origin.unsubscribe();

        let mut view = origin.spawn_fullscreen();
        view.apply_snapshot(snapshot);
        view.refresh_icons();
        let stream = view.subscribe();

        info!("Entering fullscreen {} over {}", view.id(), origin_id);
        self.fullscreen = Some(FullscreenToken { origin: origin_id });
        self.views.push(view);
        Ok(stream)
    }

    /// Tear down the fullscreen view, handing its state back to the origin
    pub fn exit_fullscreen(&mut self) -> Result<Option<EventStream>, FullscreenError> {
        let token = self
            .fullscreen
            .take()
            .ok_or(FullscreenError::AlreadyInState)?;
        let mut fullscreen = self.views.pop().ok_or(FullscreenError::NoActiveView)?;

        let snapshot = fullscreen.snapshot();
        fullscreen.unsubscribe();

        let Some(origin) = self
            .views
            .iter_mut()
            .find(|view| view.id() == token.origin)
        else {
            error!(
                "Fullscreen origin {} missing, skipping state transfer",
                token.origin
            );
            return Err(FullscreenError::MissingOrigin);
        };

        origin.apply_snapshot(snapshot);
        let stream = origin.subscribe();
        origin.refresh_icons();
        origin.reset_danmaku();
        origin.send_frame_size();
        info!("Left fullscreen {}, back to {}", fullscreen.id(), token.origin);

        drop(fullscreen);
        Ok(stream)
    }
}
