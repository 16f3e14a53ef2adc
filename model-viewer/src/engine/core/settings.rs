use crate::engine::error::ViewerError;
use bevy::prelude::*;
use constants::interaction::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_POLAR_ANGLE, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
    RESIZE_DEBOUNCE_MS,
};
use constants::path::MODEL_ASSET_PATH;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, BACKGROUND_COLOUR, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR,
    CAMERA_START_POSITION, DIRECTIONAL_ILLUMINANCE, DIRECTIONAL_LIGHT_POSITIONS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime configuration for the viewer session.
///
/// Defaults come from the `constants` crate. The host page may replace
/// them through the `viewer_configure` RPC while the viewer is idle; any
/// field left out of the JSON keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub model_path: String,
    pub camera: CameraSettings,
    pub orbit: OrbitSettings,
    pub lighting: LightingRig,
    pub resize_debounce_ms: u64,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            model_path: MODEL_ASSET_PATH.to_string(),
            camera: CameraSettings::default(),
            orbit: OrbitSettings::default(),
            lighting: LightingRig::default(),
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

impl ViewerSettings {
    /// Parse a `viewer_configure` payload; absent fields keep their defaults.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ViewerError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: CAMERA_START_POSITION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    /// `None` leaves the dolly distance unbounded.
    pub max_distance: Option<f32>,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            min_polar_angle: 0.0,
            max_polar_angle: ORBIT_MAX_POLAR_ANGLE,
            min_distance: 0.0,
            max_distance: None,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
        }
    }
}

/// Background colour plus the ambient and directional lights added to every scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingRig {
    pub background: [f32; 3],
    pub ambient_brightness: f32,
    pub directional_illuminance: f32,
    pub directional_positions: Vec<[f32; 3]>,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self {
            background: BACKGROUND_COLOUR,
            ambient_brightness: AMBIENT_BRIGHTNESS,
            directional_illuminance: DIRECTIONAL_ILLUMINANCE,
            directional_positions: DIRECTIONAL_LIGHT_POSITIONS.to_vec(),
        }
    }
}

impl LightingRig {
    /// Ambient light plus one per directional entry.
    pub fn light_count(&self) -> usize {
        1 + self.directional_positions.len()
    }

    pub fn background_colour(&self) -> Color {
        let [r, g, b] = self.background;
        Color::linear_rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings =
            ViewerSettings::from_value(serde_json::json!({ "model_path": "models/other.glb" }))
                .unwrap();

        assert_eq!(settings.model_path, "models/other.glb");
        assert_eq!(settings.camera, CameraSettings::default());
        assert_eq!(settings.resize_debounce(), Duration::from_millis(100));
    }

    #[test]
    fn mistyped_field_is_rejected() {
        let result = ViewerSettings::from_value(serde_json::json!({ "resize_debounce_ms": "soon" }));
        assert!(matches!(result, Err(ViewerError::InvalidSettings(_))));
    }

    #[test]
    fn empty_object_keeps_defaults() {
        assert_eq!(
            ViewerSettings::from_value(serde_json::json!({})).unwrap(),
            ViewerSettings::default()
        );
    }

    #[test]
    fn default_rig_has_ambient_and_two_directional_lights() {
        assert_eq!(LightingRig::default().light_count(), 3);
    }
}
