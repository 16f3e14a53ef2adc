use crate::engine::core::settings::CameraSettings;
use bevy::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(settings: &CameraSettings, size: UVec2) -> Self {
        let mut camera = Self {
            fov_degrees: settings.fov_degrees,
            aspect: 1.0,
            near: settings.near,
            far: settings.far,
            position: Vec3::from_array(settings.position),
            target: Vec3::ZERO,
        };
        camera.set_viewport(size);
        camera
    }

    /// Update the aspect ratio from container bounds. A zero-height container keeps the previous ratio.
    pub fn set_viewport(&mut self, size: UVec2) {
        if size.y == 0 {
            return;
        }
        self.aspect = size.x as f32 / size.y as f32;
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.target, Vec3::Y)
    }

    pub fn projection(&self) -> PerspectiveProjection {
        PerspectiveProjection {
            fov: self.fov_degrees.to_radians(),
            aspect_ratio: self.aspect,
            near: self.near,
            far: self.far,
            ..default()
        }
    }
}
