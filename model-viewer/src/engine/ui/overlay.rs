use crate::engine::core::app_state::ViewerCommand;
use crate::engine::host::OverlayCamera;
use crate::engine::session::{ViewerSession, ViewerStatus};
use bevy::prelude::*;
use bevy::ui::IsDefaultUiCamera;

const BUTTON_IDLE: Color = Color::srgba(1.0, 1.0, 1.0, 0.85);
const BUTTON_HOVERED: Color = Color::srgba(1.0, 1.0, 1.0, 1.0);
const BUTTON_PRESSED: Color = Color::srgba(0.8, 0.8, 0.8, 1.0);
const BUTTON_TEXT: Color = Color::srgb(0.05, 0.05, 0.05);
const LOADING_VEIL: Color = Color::srgba(0.0, 0.0, 0.0, 0.8);

/// Which piece of the overlay a node is; visibility follows the session status.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayElement {
    PlayButton,
    PauseButton,
    LoadingVeil,
    ControlsHint,
}

impl OverlayElement {
    pub fn visible_for(self, status: &ViewerStatus) -> bool {
        match self {
            Self::PlayButton => !status.playing,
            Self::PauseButton => status.playing,
            Self::LoadingVeil => status.loading,
            Self::ControlsHint => status.playing && status.initialized,
        }
    }

    fn display_for(self, status: &ViewerStatus) -> Display {
        if self.visible_for(status) {
            Display::Flex
        } else {
            Display::None
        }
    }
}

/// Marker for the overlay buttons that toggle playback.
#[derive(Component)]
pub struct ToggleButton;

pub fn spawn_overlay(mut commands: Commands, session: Res<ViewerSession>) {
    let status = session.status();

    // Renders after the viewer camera and clears the window itself while
    // no viewer camera exists.
    commands.spawn((
        Name::new("overlay_camera"),
        Camera2d,
        Camera {
            order: 1,
            ..default()
        },
        IsDefaultUiCamera,
        OverlayCamera,
    ));

    commands
        .spawn((
            Name::new("ViewerOverlay"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    OverlayElement::PlayButton,
                    ToggleButton,
                    Button,
                    Name::new("PlayButton"),
                    BackgroundColor(BUTTON_IDLE),
                    BorderRadius::MAX,
                    Node {
                        width: Val::Px(96.0),
                        height: Val::Px(96.0),
                        position_type: PositionType::Absolute,
                        left: Val::Percent(50.0),
                        top: Val::Percent(50.0),
                        margin: UiRect {
                            left: Val::Px(-48.0),
                            top: Val::Px(-48.0),
                            ..default()
                        },
                        display: OverlayElement::PlayButton.display_for(&status),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Play"),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(BUTTON_TEXT),
                    ));
                });

            overlay
                .spawn((
                    OverlayElement::PauseButton,
                    ToggleButton,
                    Button,
                    Name::new("PauseButton"),
                    BackgroundColor(BUTTON_IDLE),
                    BorderRadius::MAX,
                    Node {
                        width: Val::Px(64.0),
                        height: Val::Px(64.0),
                        position_type: PositionType::Absolute,
                        right: Val::Px(16.0),
                        top: Val::Px(16.0),
                        display: OverlayElement::PauseButton.display_for(&status),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Pause"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(BUTTON_TEXT),
                    ));
                });

            overlay
                .spawn((
                    OverlayElement::LoadingVeil,
                    Name::new("LoadingVeil"),
                    BackgroundColor(LOADING_VEIL),
                    ZIndex(1),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        position_type: PositionType::Absolute,
                        display: OverlayElement::LoadingVeil.display_for(&status),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                ))
                .with_children(|veil| {
                    veil.spawn((
                        Text::new("Loading 3D Model..."),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });

            overlay
                .spawn((
                    OverlayElement::ControlsHint,
                    Name::new("ControlsHint"),
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
                    BorderRadius::all(Val::Px(6.0)),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(16.0),
                        bottom: Val::Px(16.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                        display: OverlayElement::ControlsHint.display_for(&status),
                        ..default()
                    },
                ))
                .with_children(|hint| {
                    hint.spawn((
                        Text::new("Use mouse to rotate, zoom, and pan"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

pub fn handle_overlay_buttons(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<ToggleButton>),
    >,
    mut viewer_commands: EventWriter<ViewerCommand>,
) {
    for (interaction, mut background) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                viewer_commands.write(ViewerCommand::Toggle);
                *background = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *background = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *background = BackgroundColor(BUTTON_IDLE),
        }
    }
}

pub fn reflect_viewer_status(
    session: Res<ViewerSession>,
    mut elements: Query<(&OverlayElement, &mut Node)>,
) {
    if !session.is_changed() {
        return;
    }

    let status = session.status();
    for (element, mut node) in &mut elements {
        let display = element.display_for(&status);
        if node.display != display {
            node.display = display;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::session::SessionPhase;

    fn status(state: SessionPhase, playing: bool) -> ViewerStatus {
        ViewerStatus {
            state,
            initialized: state == SessionPhase::Ready,
            loading: state == SessionPhase::Loading,
            playing,
        }
    }

    #[test]
    fn loading_veil_mostly_hides_the_scene() {
        assert_eq!(LOADING_VEIL.alpha(), 0.8);
        assert_eq!(LOADING_VEIL.to_srgba().red, 0.0);
    }

    #[test]
    fn idle_shows_only_play() {
        let idle = status(SessionPhase::Idle, false);
        assert!(OverlayElement::PlayButton.visible_for(&idle));
        assert!(!OverlayElement::PauseButton.visible_for(&idle));
        assert!(!OverlayElement::LoadingVeil.visible_for(&idle));
        assert!(!OverlayElement::ControlsHint.visible_for(&idle));
    }

    #[test]
    fn loading_while_playing_hides_hint() {
        let loading = status(SessionPhase::Loading, true);
        assert!(OverlayElement::PauseButton.visible_for(&loading));
        assert!(OverlayElement::LoadingVeil.visible_for(&loading));
        assert!(!OverlayElement::ControlsHint.visible_for(&loading));
    }

    #[test]
    fn hint_needs_playing_and_initialized() {
        assert!(OverlayElement::ControlsHint.visible_for(&status(SessionPhase::Ready, true)));
        assert!(!OverlayElement::ControlsHint.visible_for(&status(SessionPhase::Ready, false)));
        assert!(OverlayElement::PlayButton.visible_for(&status(SessionPhase::Ready, false)));
    }
}
