//! World-space pick rays built from clicked pixel coordinates.

use glam::{Mat4, Vec2, Vec3, Vec4};
use thiserror::Error;

use crate::constants::HOMOGENEOUS_W_EPSILON;

/// Pick failures. A degenerate projection aborts the current frame's
/// pick only; camera state is unaffected.
#[derive(Debug, Error, PartialEq)]
pub enum PickError {
    #[error("degenerate projection: inverse view-projection produced a near-zero homogeneous w")]
    DegenerateProjection,
}

/// A ray with unit direction, built fresh per pick query.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Evaluate the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

/// Map pixel coordinates to normalized device coordinates in [-1, 1].
#[inline]
pub fn ndc_from_pixels(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (2.0 * px / width.max(1.0)) - 1.0,
        1.0 - (2.0 * py / height.max(1.0)),
    )
}

/// Compute a world-space pick ray from NDC coordinates.
///
/// Clip convention: wgpu/glam 0..1 depth, so the near plane unprojects
/// from z = 0 and the far plane from z = 1. This must stay in sync with
/// how the frontend builds its projection (`Mat4::perspective_rh`).
/// The inverse view-projection is computed once and both clip points go
/// through a checked perspective divide.
pub fn screen_to_world_ray(ndc: Vec2, view: Mat4, projection: Mat4) -> Result<Ray, PickError> {
    let inv = (projection * view).inverse();
    let near = unproject(inv, ndc, 0.0)?;
    let far = unproject(inv, ndc, 1.0)?;
    let direction = far - near;
    if !direction.is_finite() || direction.length_squared() < f32::EPSILON {
        return Err(PickError::DegenerateProjection);
    }
    Ok(Ray::new(near, direction))
}

fn unproject(inv: Mat4, ndc: Vec2, clip_z: f32) -> Result<Vec3, PickError> {
    let p = inv * Vec4::new(ndc.x, ndc.y, clip_z, 1.0);
    if !p.w.is_finite() || p.w.abs() < HOMOGENEOUS_W_EPSILON {
        return Err(PickError::DegenerateProjection);
    }
    let v = p.truncate() / p.w;
    if !v.is_finite() {
        return Err(PickError::DegenerateProjection);
    }
    Ok(v)
}
