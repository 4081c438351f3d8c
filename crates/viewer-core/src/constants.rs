// Shared camera/pick tuning constants used by the frontend and tests.

// Camera calibration. Sensitivities are paired as (value at
// START_DISTANCE, value at MIN_DISTANCE); the curve between them is
// exponential so input stays usable across the whole zoom range.
pub const START_DISTANCE: f32 = 6.0;
pub const MIN_DISTANCE: f32 = 1.2;
pub const ORBIT_SENSITIVITY_COARSE: f32 = 0.01; // rad per pixel when zoomed out
pub const ORBIT_SENSITIVITY_FINE: f32 = 0.002; // rad per pixel at MIN_DISTANCE
pub const ZOOM_SENSITIVITY_COARSE: f32 = 0.45; // world units per wheel step
pub const ZOOM_SENSITIVITY_FINE: f32 = 0.06;

// Numerical guards
pub const POLE_EPSILON: f32 = 1e-3; // keeps phi off the look-at up-vector singularity
pub const SLAB_PARALLEL_EPSILON: f32 = 1e-3; // |dot(axis, dir)| below this counts as parallel
pub const HOMOGENEOUS_W_EPSILON: f32 = 1e-8;

// Scene layout (frontend)
pub const GLOBE_RADIUS: f32 = 1.0;
pub const VEHICLE_ORBIT_RADIUS: f32 = 1.6;
pub const VEHICLE_ORBIT_HEIGHT: f32 = 0.15; // above the equatorial plane
pub const VEHICLE_ANGULAR_SPEED: f32 = 0.35; // rad/sec around the globe
