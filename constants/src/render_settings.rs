/// Vertical field of view of the viewer camera (degrees)
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Initial eye position, looking at the origin
pub const CAMERA_START_POSITION: [f32; 3] = [-8.0, 3.0, 4.0];

/// Background clear colour (linear RGB)
pub const BACKGROUND_COLOUR: [f32; 3] = [0.0, 0.0, 0.0];

/// Ambient light brightness (cd/m^2)
pub const AMBIENT_BRIGHTNESS: f32 = 500.0;

/// Illuminance of each directional light (lux)
pub const DIRECTIONAL_ILLUMINANCE: f32 = 3_000.0;

/// Directions the two directional lights shine from, normalised at spawn
pub const DIRECTIONAL_LIGHT_POSITIONS: [[f32; 3]; 2] = [[1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
