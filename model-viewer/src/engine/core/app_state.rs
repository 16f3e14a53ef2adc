use crate::engine::core::settings::ViewerSettings;
use crate::engine::session::{SessionPhase, ViewerSession};
use bevy::prelude::*;

/// Mirror of the session phase so systems can be gated with `in_state`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum ViewerState {
    #[default]
    Idle,
    Loading,
    Ready,
}

impl From<SessionPhase> for ViewerState {
    fn from(phase: SessionPhase) -> Self {
        match phase {
            SessionPhase::Idle => Self::Idle,
            SessionPhase::Loading => Self::Loading,
            SessionPhase::Ready => Self::Ready,
        }
    }
}

/// Lifecycle requests from the overlay, keyboard shortcuts or the host page.
#[derive(Event, Debug, Clone)]
pub enum ViewerCommand {
    Activate,
    Toggle,
    /// Unmount: release everything the session owns.
    Dispose,
    Configure(ViewerSettings),
}

pub fn sync_viewer_state(
    session: Res<ViewerSession>,
    state: Res<State<ViewerState>>,
    mut next_state: ResMut<NextState<ViewerState>>,
) {
    let target = ViewerState::from(session.phase());
    if *state.get() != target {
        info!("→ Viewer state {:?} -> {:?}", state.get(), target);
        next_state.set(target);
    }
}
