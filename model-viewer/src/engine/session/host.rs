//! Capabilities the viewer session needs from whatever hosts it.
//!
//! The session never reaches for globals; a frame scheduler, the container
//! bounds, the rendering surface and the scene graph are all handed in on
//! every call. Bevy provides one implementation (`engine::host`), tests
//! provide a recording one.

use crate::engine::camera::PerspectiveCamera;
use crate::engine::core::settings::LightingRig;
use crate::engine::error::ViewerError;
use crate::engine::loading::bounds::ModelBounds;
use bevy::color::Color;
use bevy::math::{UVec2, Vec3};
use std::time::Duration;

/// Handle for one requested render-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Handle for a registered container resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeSubscription(pub u64);

/// Identifies one model load; outcomes carrying any other ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(pub u64);

/// Result of a model load as delivered back to the session.
pub type LoadOutcome = (LoadTicket, Result<ModelBounds, ViewerError>);

/// Schedules and cancels per-frame callbacks.
pub trait Clock {
    fn now(&self) -> Duration;
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// The rectangular region the viewer occupies.
pub trait ViewportSource {
    /// Current container bounds in physical pixels, `None` when nothing is mounted.
    fn container_size(&self) -> Option<UVec2>;
    fn subscribe_resize(&mut self) -> ResizeSubscription;
    fn unsubscribe_resize(&mut self, subscription: ResizeSubscription);
}

/// Owns the pixels the viewer draws into.
pub trait Surface {
    fn attach_surface(&mut self, size: UVec2, clear_colour: Color);
    fn resize_surface(&mut self, size: UVec2);
    fn present(&mut self, camera: &PerspectiveCamera);
    fn detach_surface(&mut self);
}

/// Scene graph construction and the single model it holds.
pub trait SceneGraph {
    fn build_scene(&mut self, lighting: &LightingRig);
    /// Starts an asynchronous load; the outcome comes back tagged with `ticket`.
    fn load_model(&mut self, path: &str, ticket: LoadTicket);
    /// Moves the loaded model by `offset` and makes it visible.
    fn place_model(&mut self, offset: Vec3);
    fn clear_scene(&mut self);
}

pub trait ViewerHost: Clock + ViewportSource + Surface + SceneGraph {}

impl<T: Clock + ViewportSource + Surface + SceneGraph> ViewerHost for T {}
