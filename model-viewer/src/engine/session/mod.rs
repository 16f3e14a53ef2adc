//! Viewer session lifecycle.
//!
//! Owns lazy construction, the model load handshake, the render loop
//! request chain, debounced resizing and teardown. Everything outside the
//! session is reached through the capability traits in `host`.

/// Quiescence-based trigger used for resize coalescing.
pub mod debounce;

/// Capability traits the session is driven through.
pub mod host;

/// The session resource and its state machine.
pub mod viewer_session;

pub use host::{FrameRequest, LoadOutcome, LoadTicket, ResizeSubscription, ViewerHost};
pub use viewer_session::{SessionPhase, ViewerSession, ViewerStatus};
