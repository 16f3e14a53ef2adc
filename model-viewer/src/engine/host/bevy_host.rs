use crate::engine::camera::PerspectiveCamera;
use crate::engine::core::settings::LightingRig;
use crate::engine::host::{
    FrameClock, OverlayCamera, ResizeListeners, ViewerCamera, ViewerEntities, ViewerRoot,
};
use crate::engine::loading::model_loader::ModelLoadTracker;
use crate::engine::session::host::{Clock, SceneGraph, Surface, ViewportSource};
use crate::engine::session::{FrameRequest, LoadOutcome, LoadTicket, ResizeSubscription};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::time::Duration;

/// Everything the session touches, borrowed for the duration of one system.
///
/// On web builds the primary window is the `#viewer` canvas sized to its
/// parent, so the window bounds are the container bounds.
#[derive(SystemParam)]
pub struct BevyViewerHost<'w, 's> {
    commands: Commands<'w, 's>,
    time: Res<'w, Time>,
    asset_server: Res<'w, AssetServer>,
    frames: ResMut<'w, FrameClock>,
    listeners: ResMut<'w, ResizeListeners>,
    entities: ResMut<'w, ViewerEntities>,
    loads: ResMut<'w, ModelLoadTracker>,
    windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    cameras: Query<'w, 's, (&'static mut Transform, &'static mut Projection), With<ViewerCamera>>,
    overlay_cameras: Query<'w, 's, &'static mut Camera, With<OverlayCamera>>,
}

impl BevyViewerHost<'_, '_> {
    pub fn take_due_frame(&mut self) -> Option<FrameRequest> {
        self.frames.take_due()
    }

    pub fn take_load_outcome(&mut self) -> Option<LoadOutcome> {
        self.loads.take_outcome()
    }

    pub fn has_resize_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// The overlay clears the window itself only while no viewer camera draws first.
    fn set_overlay_clear(&mut self, clear_color: ClearColorConfig) {
        for mut camera in &mut self.overlay_cameras {
            camera.clear_color = clear_color.clone();
        }
    }
}

impl Clock for BevyViewerHost<'_, '_> {
    fn now(&self) -> Duration {
        self.time.elapsed()
    }

    fn request_frame(&mut self) -> FrameRequest {
        self.frames.request()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.frames.cancel(request);
    }
}

impl ViewportSource for BevyViewerHost<'_, '_> {
    fn container_size(&self) -> Option<UVec2> {
        let window = self.windows.single().ok()?;
        Some(UVec2::new(window.physical_width(), window.physical_height()))
    }

    fn subscribe_resize(&mut self) -> ResizeSubscription {
        self.listeners.subscribe()
    }

    fn unsubscribe_resize(&mut self, subscription: ResizeSubscription) {
        self.listeners.unsubscribe(subscription);
    }
}

impl Surface for BevyViewerHost<'_, '_> {
    fn attach_surface(&mut self, size: UVec2, clear_colour: Color) {
        let surface = self
            .commands
            .spawn((
                Name::new("viewer_camera"),
                Camera3d::default(),
                Camera {
                    order: 0,
                    clear_color: ClearColorConfig::Custom(clear_colour),
                    ..default()
                },
                Projection::Perspective(PerspectiveProjection {
                    aspect_ratio: size.x as f32 / size.y.max(1) as f32,
                    ..default()
                }),
                Transform::default(),
                ViewerCamera,
            ))
            .id();
        self.entities.surface = Some(surface);
        self.entities.surface_size = size;
        self.set_overlay_clear(ClearColorConfig::None);
    }

    fn resize_surface(&mut self, size: UVec2) {
        self.entities.surface_size = size;
        if size.y == 0 {
            return;
        }
        for (_, mut projection) in &mut self.cameras {
            if let Projection::Perspective(perspective) = &mut *projection {
                perspective.aspect_ratio = size.x as f32 / size.y as f32;
            }
        }
    }

    fn present(&mut self, camera: &PerspectiveCamera) {
        for (mut transform, mut projection) in &mut self.cameras {
            *transform = camera.transform();
            *projection = Projection::Perspective(camera.projection());
        }
    }

    fn detach_surface(&mut self) {
        if let Some(surface) = self.entities.surface.take() {
            self.commands.entity(surface).try_despawn();
        }
        self.entities.surface_size = UVec2::ZERO;
        self.set_overlay_clear(ClearColorConfig::Default);
    }
}

impl SceneGraph for BevyViewerHost<'_, '_> {
    fn build_scene(&mut self, lighting: &LightingRig) {
        self.commands.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: lighting.ambient_brightness,
            ..default()
        });

        let root = self
            .commands
            .spawn((
                Name::new("viewer_root"),
                Transform::default(),
                Visibility::default(),
                ViewerRoot,
            ))
            .id();

        for position in &lighting.directional_positions {
            let direction = Vec3::from_array(*position).normalize_or_zero();
            if direction == Vec3::ZERO {
                warn!("Skipping directional light with zero position");
                continue;
            }
            self.commands.spawn((
                DirectionalLight {
                    illuminance: lighting.directional_illuminance,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_translation(direction).looking_at(Vec3::ZERO, Vec3::Y),
                ChildOf(root),
            ));
        }

        self.entities.root = Some(root);
        debug!("Viewer scene built with {} lights", lighting.light_count());
    }

    fn load_model(&mut self, path: &str, ticket: LoadTicket) {
        let handle = self.asset_server.load(path.to_string());
        self.loads.begin(ticket, path, handle);
    }

    fn place_model(&mut self, offset: Vec3) {
        let Some(model) = self.entities.model else {
            warn!("No model entity to place");
            return;
        };
        self.commands
            .entity(model)
            .insert((Transform::from_translation(offset), Visibility::Inherited));
    }

    fn clear_scene(&mut self) {
        self.loads.cancel();
        if let Some(root) = self.entities.root.take() {
            self.commands.entity(root).try_despawn();
        }
        if let Some(model) = self.entities.model.take() {
            self.commands.entity(model).try_despawn();
        }
        self.commands.insert_resource(AmbientLight::default());
    }
}
