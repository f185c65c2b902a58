//! Display hook.
//!
//! The loop hands its view of the world to an `Overlay` every cycle. Drawing
//! is someone else's job; a failed render is logged and otherwise ignored.

use handcue_core::{Point, SessionState, Zone, ZoneId};

/// Everything a display needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct OverlayView<'a> {
    pub state: SessionState,
    pub zones: &'a [Zone],
    pub hovered: Option<&'a ZoneId>,
    pub pointer: Option<Point>,
}

#[derive(Debug, thiserror::Error)]
#[error("overlay render failed: {0}")]
pub struct OverlayError(pub String);

pub trait Overlay {
    fn render(&mut self, view: &OverlayView<'_>) -> Result<(), OverlayError>;
}

/// Reports state and hover changes as tracing events.
#[derive(Debug, Default)]
pub struct TraceOverlay {
    last_state: Option<SessionState>,
    last_hovered: Option<ZoneId>,
}

impl Overlay for TraceOverlay {
    fn render(&mut self, view: &OverlayView<'_>) -> Result<(), OverlayError> {
        if self.last_state != Some(view.state) {
            tracing::info!(state = %view.state, zones = view.zones.len(), "mode");
            self.last_state = Some(view.state);
        }
        if self.last_hovered.as_ref() != view.hovered {
            match view.hovered {
                Some(zone) => tracing::debug!(%zone, pointer = ?view.pointer, "hovering"),
                None => tracing::debug!("hover cleared"),
            }
            self.last_hovered = view.hovered.cloned();
        }
        Ok(())
    }
}

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOverlay;

impl Overlay for NullOverlay {
    fn render(&mut self, _view: &OverlayView<'_>) -> Result<(), OverlayError> {
        Ok(())
    }
}
