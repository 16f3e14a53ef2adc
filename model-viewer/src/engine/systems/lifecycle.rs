use crate::engine::core::app_state::ViewerCommand;
use crate::engine::host::BevyViewerHost;
use crate::engine::session::ViewerSession;
use bevy::prelude::*;
use bevy::window::WindowResized;

pub fn apply_viewer_commands(
    mut requests: EventReader<ViewerCommand>,
    mut session: ResMut<ViewerSession>,
    mut host: BevyViewerHost,
) {
    for request in requests.read() {
        match request {
            ViewerCommand::Activate => {
                session.activate(&mut host);
            }
            ViewerCommand::Toggle => session.toggle(&mut host),
            ViewerCommand::Dispose => session.dispose(&mut host),
            ViewerCommand::Configure(settings) => {
                if let Err(error) = session.configure(settings.clone()) {
                    warn!("Viewer configuration rejected: {}", error);
                }
            }
        }
    }
}

pub fn deliver_model_load(mut session: ResMut<ViewerSession>, mut host: BevyViewerHost) {
    if let Some((ticket, result)) = host.take_load_outcome() {
        session.complete_load(ticket, result, &mut host);
    }
}

/// Window resizes stand in for container resizes; only forwarded while subscribed.
pub fn forward_resize_events(
    mut resized: EventReader<WindowResized>,
    mut session: ResMut<ViewerSession>,
    mut host: BevyViewerHost,
) {
    if resized.read().count() == 0 || !host.has_resize_listeners() {
        return;
    }
    session.notify_resize(&mut host);
}

pub fn poll_viewer_timers(mut session: ResMut<ViewerSession>, mut host: BevyViewerHost) {
    session.poll_timers(&mut host);
}

pub fn drive_render_loop(mut session: ResMut<ViewerSession>, mut host: BevyViewerHost) {
    if let Some(request) = host.take_due_frame() {
        session.run_frame(request, &mut host);
    }
}

pub fn dispose_on_exit(
    mut exits: EventReader<AppExit>,
    mut session: ResMut<ViewerSession>,
    mut host: BevyViewerHost,
) {
    if exits.read().count() > 0 {
        session.dispose(&mut host);
    }
}
