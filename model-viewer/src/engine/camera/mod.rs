//! Viewer camera model and orbit navigation.
//!
//! The camera here is plain data; the Bevy host copies it onto the camera
//! entity whenever a frame is presented.

/// Damped orbit/zoom controls around a fixed target.
pub mod orbit_controls;

/// Perspective camera parameters tracked by the session.
pub mod perspective;

pub use orbit_controls::OrbitControls;
pub use perspective::PerspectiveCamera;
