//! Orbital camera: a camera parameterized by a target point, a distance
//! and two orbit angles instead of free-form position + orientation.
//!
//! Input sensitivity is distance-adaptive: drag and wheel deltas are
//! scaled by an exponential curve between a coarse value (zoomed out)
//! and a fine value (at minimum distance), so close-up inspection does
//! not overshoot.

use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};
use thiserror::Error;

use crate::constants::{
    MIN_DISTANCE, ORBIT_SENSITIVITY_COARSE, ORBIT_SENSITIVITY_FINE, POLE_EPSILON, START_DISTANCE,
    ZOOM_SENSITIVITY_COARSE, ZOOM_SENSITIVITY_FINE,
};

/// Invalid camera configuration, detected at construction time.
#[derive(Debug, Error, PartialEq)]
pub enum CameraError {
    #[error("minimum distance {min} exceeds starting distance {start}")]
    MinDistanceExceedsStart { min: f32, start: f32 },
    #[error("camera distances must be positive (start {start}, min {min})")]
    NonPositiveDistance { start: f32, min: f32 },
    #[error("sensitivity calibration values must be positive ({coarse} .. {fine})")]
    NonPositiveSensitivity { coarse: f32, fine: f32 },
}

/// World axis the orbit pole (and the look-at up vector) sits on.
///
/// Generic scenes orbit around +Y; geo-referenced scenes treat +Z as up
/// so latitude/longitude map onto the orbit angles directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpAxis {
    Y,
    #[default]
    Z,
}

impl UpAxis {
    #[inline]
    pub fn as_vec3(self) -> Vec3 {
        match self {
            UpAxis::Y => Vec3::Y,
            UpAxis::Z => Vec3::Z,
        }
    }
}

/// Exponential interpolation `a * b^distance` through two calibration
/// points. Samples outside the calibration range clamp to the nearer
/// endpoint; the curve never extrapolates.
#[derive(Debug, Clone, Copy)]
pub struct SensitivityCurve {
    a: f32,
    b: f32,
    d_lo: f32,
    d_hi: f32,
}

impl SensitivityCurve {
    /// Solve the curve through `(d0, s0)` and `(d1, s1)`.
    pub fn through(d0: f32, s0: f32, d1: f32, s1: f32) -> Result<Self, CameraError> {
        if s0 <= 0.0 || s1 <= 0.0 {
            return Err(CameraError::NonPositiveSensitivity {
                coarse: s0,
                fine: s1,
            });
        }
        let (a, b) = if (d1 - d0).abs() < f32::EPSILON {
            // Coincident calibration distances degenerate to a constant.
            (s0, 1.0)
        } else {
            let b = (s1 / s0).powf(1.0 / (d1 - d0));
            (s0 * b.powf(-d0), b)
        };
        Ok(Self {
            a,
            b,
            d_lo: d0.min(d1),
            d_hi: d0.max(d1),
        })
    }

    #[inline]
    pub fn sample(&self, distance: f32) -> f32 {
        let d = distance.clamp(self.d_lo, self.d_hi);
        self.a * self.b.powf(d)
    }
}

/// Construction parameters for [`OrbitalCamera`].
///
/// Sensitivity pairs are `(value at start_distance, value at
/// min_distance)`.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub target: Vec3,
    pub start_distance: f32,
    pub min_distance: f32,
    pub up: UpAxis,
    pub orbit_sensitivity: (f32, f32),
    pub zoom_sensitivity: (f32, f32),
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            start_distance: START_DISTANCE,
            min_distance: MIN_DISTANCE,
            up: UpAxis::default(),
            orbit_sensitivity: (ORBIT_SENSITIVITY_COARSE, ORBIT_SENSITIVITY_FINE),
            zoom_sensitivity: (ZOOM_SENSITIVITY_COARSE, ZOOM_SENSITIVITY_FINE),
        }
    }
}

/// Orbit/zoom camera state.
///
/// Invariants: `|position() - target| == distance` and
/// `phi` stays strictly inside `(0, PI)`.
#[derive(Debug, Clone)]
pub struct OrbitalCamera {
    target: Vec3,
    distance: f32,
    min_distance: f32,
    phi: f32,
    theta: f32,
    up: UpAxis,
    orbit_curve: SensitivityCurve,
    zoom_curve: SensitivityCurve,
}

impl OrbitalCamera {
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        if config.start_distance <= 0.0 || config.min_distance <= 0.0 {
            return Err(CameraError::NonPositiveDistance {
                start: config.start_distance,
                min: config.min_distance,
            });
        }
        if config.min_distance > config.start_distance {
            return Err(CameraError::MinDistanceExceedsStart {
                min: config.min_distance,
                start: config.start_distance,
            });
        }
        let orbit_curve = SensitivityCurve::through(
            config.start_distance,
            config.orbit_sensitivity.0,
            config.min_distance,
            config.orbit_sensitivity.1,
        )?;
        let zoom_curve = SensitivityCurve::through(
            config.start_distance,
            config.zoom_sensitivity.0,
            config.min_distance,
            config.zoom_sensitivity.1,
        )?;
        Ok(Self {
            target: config.target,
            distance: config.start_distance,
            min_distance: config.min_distance,
            phi: FRAC_PI_2,
            theta: FRAC_PI_2,
            up: config.up,
            orbit_curve,
            zoom_curve,
        })
    }

    /// Apply a drag delta in pixels. Screen-right drag decreases theta
    /// so the scene appears to follow the pointer; phi is clamped off
    /// the poles to keep the look-at up vector well defined.
    pub fn process_orbit(&mut self, delta_x: f32, delta_y: f32) {
        let s = self.orbit_curve.sample(self.distance);
        self.phi = (self.phi + s * delta_y).clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.theta -= s * delta_x;
    }

    /// Apply a wheel delta. Positive values zoom in; distance is
    /// clamped to the configured minimum and has no upper bound.
    pub fn process_zoom(&mut self, wheel_delta: f32) {
        let s = self.zoom_curve.sample(self.distance);
        self.distance = (self.distance - wheel_delta * s).max(self.min_distance);
    }

    /// Retarget the orbit center, e.g. to track a moving object.
    /// Angles and distance are preserved.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn up(&self) -> UpAxis {
        self.up
    }

    /// Current eye position from the spherical parameterization, with
    /// `phi` measured from the configured pole axis.
    pub fn position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let d = self.distance;
        let offset = match self.up {
            UpAxis::Z => Vec3::new(
                d * sin_phi * cos_theta,
                d * sin_phi * sin_theta,
                d * cos_phi,
            ),
            UpAxis::Y => Vec3::new(
                d * sin_phi * cos_theta,
                d * cos_phi,
                d * sin_phi * sin_theta,
            ),
        };
        self.target + offset
    }

    /// Right-handed look-at matrix for the current orbit state.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, self.up.as_vec3())
    }
}
