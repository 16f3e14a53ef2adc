//! Frame-driven systems that connect the session to Bevy.
//!
//! Each `Update` plays the part of one display refresh: commands are
//! applied, load outcomes delivered, resize timers polled and, if a frame
//! was requested, one render-loop iteration runs.

/// Session lifecycle: commands, load delivery, resize, render loop, teardown.
pub mod lifecycle;

/// Pointer input forwarded to the orbit controls.
pub mod input;

/// Status and fps notifications pushed to the host page.
pub mod notifications;

use bevy::prelude::*;

use crate::engine::core::app_state::{ViewerCommand, ViewerState, sync_viewer_state};
use crate::engine::host::{FrameClock, ResizeListeners, ViewerEntities};
use crate::engine::loading::model_loader::{
    ModelLoadTracker, measure_model_bounds, on_model_instance_ready, poll_model_asset,
};
use crate::engine::session::ViewerSession;

use input::forward_pointer_input;
use lifecycle::{
    apply_viewer_commands, deliver_model_load, dispose_on_exit, drive_render_loop,
    forward_resize_events, poll_viewer_timers,
};
use notifications::{fps_notification_system, viewer_status_notification_system};

#[cfg(not(target_arch = "wasm32"))]
use input::handle_viewer_shortcuts;

/// Registers the viewer session, its Bevy capabilities and the per-frame systems.
pub struct ViewerSessionPlugin;

impl Plugin for ViewerSessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<ViewerState>()
            .init_resource::<ViewerSession>()
            .init_resource::<FrameClock>()
            .init_resource::<ResizeListeners>()
            .init_resource::<ViewerEntities>()
            .init_resource::<ModelLoadTracker>()
            .add_event::<ViewerCommand>()
            .add_observer(on_model_instance_ready)
            .add_systems(
                Update,
                (
                    apply_viewer_commands,
                    poll_model_asset,
                    measure_model_bounds,
                    deliver_model_load,
                    forward_resize_events,
                    poll_viewer_timers,
                    forward_pointer_input.run_if(in_state(ViewerState::Ready)),
                    drive_render_loop,
                    sync_viewer_state,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    viewer_status_notification_system,
                    fps_notification_system.run_if(in_state(ViewerState::Ready)),
                )
                    .after(sync_viewer_state),
            )
            .add_systems(Last, dispose_on_exit);

        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(Update, handle_viewer_shortcuts.before(apply_viewer_commands));
        }
    }
}
