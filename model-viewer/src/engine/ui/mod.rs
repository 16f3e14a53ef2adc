/// Play/pause buttons, loading veil and controls hint drawn over the viewer.
pub mod overlay;

use bevy::prelude::*;
use overlay::{handle_overlay_buttons, reflect_viewer_status, spawn_overlay};

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_overlay).add_systems(
            Update,
            (handle_overlay_buttons, reflect_viewer_status).chain(),
        );
    }
}
