//! Core types for handcue.
//!
//! This crate holds what both ends of a session agree on: the zones a user
//! can select, the session state, and the messages on the wire. It does no I/O.

mod message;
mod zone;

pub use message::{Intent, RoundDetails, ServerDirective, ServerMessage};
pub use zone::{LayoutError, Point, Rect, Zone, ZoneId, ZoneLayout, zone_at};

use std::fmt;

/// How local gestures are currently interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// A closed fist requests a roll.
    #[default]
    AwaitingTrigger,
    /// An intent is in flight; gestures are ignored.
    AwaitingServerResponse,
    /// Hovering over a zone selects it.
    AwaitingChoice,
}

impl SessionState {
    /// Label for logs and overlays.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingTrigger => "awaiting-trigger",
            Self::AwaitingServerResponse => "awaiting-server-response",
            Self::AwaitingChoice => "awaiting-choice",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
