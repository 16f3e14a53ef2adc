use crate::engine::core::window_config::create_window_config;
use crate::engine::systems::ViewerSessionPlugin;
use crate::engine::ui::OverlayPlugin;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::shell::AnchorNavigationPlugin;
use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

const LOG_FILTER: &str = "wgpu=error,naga=warn,bevy_render=info,model_viewer=debug";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(ViewerSessionPlugin)
        .add_plugins(OverlayPlugin)
        .add_plugins(WebRpcPlugin)
        .add_plugins(AnchorNavigationPlugin);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
