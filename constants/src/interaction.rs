/// Fraction of the remaining orbit delta applied each frame
pub const ORBIT_DAMPING_FACTOR: f32 = 0.1;

/// Upper bound on the polar angle, measured from +Y (radians). Keeps the eye above the horizon.
pub const ORBIT_MAX_POLAR_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;

/// Quiescence period before a burst of resize events is applied (milliseconds)
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

/// Interval between fps notifications sent to the host page (seconds)
pub const FPS_NOTIFICATION_INTERVAL: f32 = 0.5;
