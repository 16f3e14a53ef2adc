use crate::engine::camera::PerspectiveCamera;
use crate::engine::core::settings::OrbitSettings;
use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;

/// Position relative to the orbit target: `phi` is measured down from +Y,
/// `theta` around +Y starting at +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius < EPS {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let ring = self.radius * self.phi.sin();
        Vec3::new(
            ring * self.theta.sin(),
            self.radius * self.phi.cos(),
            ring * self.theta.cos(),
        )
    }
}

/// Orbit and dolly around a target with optional damping. Panning is not supported.
///
/// `enabled` only gates the input handlers (`rotate`, `zoom`); `update`
/// keeps bleeding off the remaining damped motion either way.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enabled: bool,
    settings: OrbitSettings,
    target: Vec3,
    spherical: Spherical,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn new(settings: OrbitSettings, camera: &PerspectiveCamera) -> Self {
        Self {
            enabled: true,
            settings,
            target: camera.target,
            spherical: Spherical::from_offset(camera.position - camera.target),
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
        }
    }

    #[cfg(test)]
    pub fn polar_angle(&self) -> f32 {
        self.spherical.phi
    }

    #[cfg(test)]
    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    /// Pointer drag in pixels; a drag across the full viewport height is one full turn.
    pub fn rotate(&mut self, drag: Vec2, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        let per_pixel = TAU / viewport_height * self.settings.rotate_speed;
        self.theta_delta -= drag.x * per_pixel;
        self.phi_delta -= drag.y * per_pixel;
    }

    /// Positive wheel values move the eye toward the target.
    pub fn zoom(&mut self, wheel: f32) {
        if !self.enabled || wheel == 0.0 {
            return;
        }
        let step = 0.95f32.powf(self.settings.zoom_speed);
        if wheel > 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    /// Apply pending motion to the camera. Returns whether the eye moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let factor = if self.settings.enable_damping {
            self.settings.damping_factor
        } else {
            1.0
        };
        let previous = camera.position;

        self.spherical.theta += self.theta_delta * factor;
        self.spherical.phi = (self.spherical.phi + self.phi_delta * factor)
            .min(self.settings.max_polar_angle)
            .max(self.settings.min_polar_angle)
            .clamp(EPS, PI - EPS);

        let max_distance = self.settings.max_distance.unwrap_or(f32::INFINITY);
        self.spherical.radius = (self.spherical.radius * self.scale)
            .min(max_distance)
            .max(self.settings.min_distance)
            .max(EPS);

        camera.position = self.target + self.spherical.to_offset();
        camera.target = self.target;

        if self.settings.enable_damping {
            self.theta_delta *= 1.0 - factor;
            self.phi_delta *= 1.0 - factor;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
        }
        self.scale = 1.0;

        camera.position.distance_squared(previous) > EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::settings::CameraSettings;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(&CameraSettings::default(), UVec2::new(800, 500))
    }

    #[test]
    fn first_update_keeps_start_position() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::default(), &camera);

        controls.update(&mut camera);

        assert!(camera.position.distance(Vec3::new(-8.0, 3.0, 4.0)) < 1e-4);
    }

    #[test]
    fn polar_angle_never_passes_horizon() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::default(), &camera);

        for _ in 0..200 {
            controls.rotate(Vec2::new(3.0, -400.0), 500.0);
            controls.update(&mut camera);
            assert!(controls.polar_angle() <= std::f32::consts::FRAC_PI_2 + 1e-5);
            assert!(camera.position.y >= -1e-3);
        }
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::default(), &camera);
        let start = camera.position;

        controls.rotate(Vec2::new(50.0, 0.0), 500.0);
        assert!(controls.update(&mut camera));
        let first_step = camera.position.distance(start);

        let mut frames = 0;
        while controls.update(&mut camera) {
            frames += 1;
            assert!(frames < 1_000, "damped motion never settled");
        }

        assert!(frames > 10);
        assert!(camera.position.distance(start) > first_step);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::default(), &camera);
        controls.enabled = false;
        let start = camera.position;

        controls.rotate(Vec2::new(120.0, 40.0), 500.0);
        controls.zoom(3.0);
        controls.update(&mut camera);

        assert!(camera.position.distance(start) < 1e-4);
    }

    #[test]
    fn zoom_moves_toward_and_away_from_target() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::default(), &camera);
        let start = controls.distance();

        controls.zoom(1.0);
        controls.update(&mut camera);
        assert!(controls.distance() < start);

        controls.zoom(-1.0);
        controls.zoom(-1.0);
        controls.update(&mut camera);
        assert!(controls.distance() > start);
    }

    #[test]
    fn distance_limits_apply() {
        let mut camera = camera();
        let settings = OrbitSettings {
            min_distance: 5.0,
            max_distance: Some(12.0),
            ..OrbitSettings::default()
        };
        let mut controls = OrbitControls::new(settings, &camera);

        for _ in 0..100 {
            controls.zoom(1.0);
            controls.update(&mut camera);
        }
        assert!((controls.distance() - 5.0).abs() < 1e-4);

        for _ in 0..100 {
            controls.zoom(-1.0);
            controls.update(&mut camera);
        }
        assert!((controls.distance() - 12.0).abs() < 1e-4);
    }
}
