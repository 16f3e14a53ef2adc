use crate::engine::session::{ViewerSession, ViewerStatus};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::interaction::FPS_NOTIFICATION_INTERVAL;

/// Push the session status to the host page whenever it changes.
pub fn viewer_status_notification_system(
    session: Res<ViewerSession>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_status: Local<Option<ViewerStatus>>,
) {
    let status = session.status();
    if *last_status == Some(status) {
        return;
    }
    match serde_json::to_value(status) {
        Ok(params) => rpc_interface.send_notification("viewer_state_changed", params),
        Err(error) => error!("Failed to serialise viewer status: {}", error),
    }
    *last_status = Some(status);
}

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    if current_time - *last_send_time >= FPS_NOTIFICATION_INTERVAL {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                rpc_interface.send_notification(
                    "fps_update",
                    serde_json::json!({
                        "fps": value as f32
                    }),
                );
                *last_send_time = current_time;
            }
        }
    }
}
