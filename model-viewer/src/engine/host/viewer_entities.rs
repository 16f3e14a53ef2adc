use bevy::prelude::*;

/// Root of the viewer scene graph; lights and the model hang off it.
#[derive(Component)]
pub struct ViewerRoot;

/// Camera entity acting as the viewer's rendering surface.
#[derive(Component)]
pub struct ViewerCamera;

/// Scene instance spawned from the loaded glTF.
#[derive(Component)]
pub struct ViewerModel;

/// 2D camera the overlay UI renders through, drawn after the viewer camera.
#[derive(Component)]
pub struct OverlayCamera;

#[derive(Resource, Default)]
pub struct ViewerEntities {
    pub root: Option<Entity>,
    pub surface: Option<Entity>,
    pub surface_size: UVec2,
    pub model: Option<Entity>,
}
