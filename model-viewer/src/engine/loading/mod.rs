//! Model loading pipeline.
//!
//! The glTF is fetched through the asset server, its scene instanced
//! hidden under the viewer root, measured once the instance is ready, and
//! the outcome handed back to the session.

/// World-space bounds accumulated from mesh AABBs.
pub mod bounds;

/// Load tracking resource and the systems that advance it.
pub mod model_loader;
