use crate::engine::session::ViewerSession;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::ViewerCommand;

/// Pixel-unit wheel deltas are scaled down to roughly match line units.
const PIXEL_SCROLL_SCALE: f32 = 0.05;

/// Left drag orbits, the wheel dollies. Right drag would pan, which is disabled.
pub fn forward_pointer_input(
    mut session: ResMut<ViewerSession>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let drag: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();

    let mut scroll = 0.0;
    for event in scroll_events.read() {
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * PIXEL_SCROLL_SCALE,
        };
    }

    if drag == Vec2::ZERO && scroll == 0.0 {
        return;
    }
    let Some(controls) = session.controls_mut() else {
        return;
    };

    if mouse_button.pressed(MouseButton::Left) && drag != Vec2::ZERO {
        let viewport_height = windows.single().map(|window| window.height()).unwrap_or(0.0);
        controls.rotate(drag, viewport_height);
    }
    controls.zoom(scroll);
}

/// Native-only shortcut: Space toggles play/pause.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_viewer_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut requests: EventWriter<ViewerCommand>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        requests.write(ViewerCommand::Toggle);
    }
}
