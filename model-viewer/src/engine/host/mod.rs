//! Bevy implementations of the session capabilities.
//!
//! The frame clock and resize listener registry are plain resources; the
//! surface is the viewer camera entity and the scene graph is a root
//! entity holding the lights and the loaded model.

/// Animation-frame style request chain driven by the `Update` schedule.
pub mod frame_clock;

/// Registry of active container resize subscriptions.
pub mod resize_listeners;

/// Entities owned by the mounted viewer.
pub mod viewer_entities;

/// `SystemParam` implementing every capability trait on top of the ECS.
pub mod bevy_host;

pub use bevy_host::BevyViewerHost;
pub use frame_clock::FrameClock;
pub use resize_listeners::ResizeListeners;
pub use viewer_entities::{OverlayCamera, ViewerCamera, ViewerEntities, ViewerModel, ViewerRoot};
