//! Page-level glue living next to the viewer canvas.

/// Smooth scrolling for same-page `#section` links.
pub mod anchor_navigation;

pub use anchor_navigation::AnchorNavigationPlugin;
