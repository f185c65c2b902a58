//! Hand-gesture controller.
//!
//! Two execution contexts share one [`SharedSession`]:
//!
//! - the gesture thread ([`GestureLoop`]) samples hand poses, interprets them
//!   for the current session state and pushes confirmed intents onto the
//!   [`intent_queue`];
//! - the network task ([`NetworkSession`]) drains that queue to the server and
//!   applies the server's directives back onto the session.
//!
//! The queue is the only channel from gestures to the network; the session
//! state is the only thing both sides write.

pub mod config;
pub mod cooldown;
pub mod frames;
pub mod gesture;
pub mod hover;
pub mod network;
pub mod overlay;
pub mod pose;
pub mod queue;
pub mod session;

pub use config::{Cli, Config, ConfigError};
pub use frames::{Frame, FrameError, FrameSource, NdjsonFrames};
pub use gesture::{GestureInterpreter, GestureLoop};
pub use network::{NetworkSession, SessionError, SessionOutcome};
pub use overlay::{NullOverlay, Overlay, OverlayView, TraceOverlay};
pub use pose::HandPose;
pub use queue::{IntentReceiver, IntentSender, Outbound, StopHandle, intent_queue};
pub use session::SharedSession;
