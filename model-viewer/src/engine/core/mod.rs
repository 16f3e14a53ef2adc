//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, viewer state
//! mirroring and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the viewer, overlay, host bridge and page
/// shell plugins plus platform-specific configuration.
pub mod app_setup;

/// Viewer state machine mirrored from the session, and lifecycle commands.
pub mod app_state;

/// Viewer configuration resource with defaults from the `constants` crate.
pub mod settings;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
