//! Pickable shapes and the analytic ray intersection tests.
//!
//! Both tests are pure predicates over `(ray, transform, params)`:
//! they never mutate the ray or the shape definition. The model matrix
//! convention (axis columns encode rotation and scale jointly) is
//! isolated in [`extract_world_axes_and_scale`] so it is derived and
//! tested in exactly one place.

use glam::{Mat3, Mat4, Vec3};

use crate::constants::SLAB_PARALLEL_EPSILON;
use crate::ray::Ray;

/// Rotation, scale, and translation read from a model matrix.
///
/// The first three columns of a column-major affine transform are the
/// local axes in world space with scale baked into their lengths; the
/// fourth column is the world position.
#[derive(Debug, Clone, Copy)]
pub struct WorldAxes {
    /// Unit local axis directions in world space.
    pub axes: [Vec3; 3],
    /// Per-axis scale magnitudes (the lengths of the axis columns).
    pub scale: Vec3,
    pub translation: Vec3,
}

pub fn extract_world_axes_and_scale(transform: Mat4) -> WorldAxes {
    let cols = [
        transform.x_axis.truncate(),
        transform.y_axis.truncate(),
        transform.z_axis.truncate(),
    ];
    let scale = Vec3::new(cols[0].length(), cols[1].length(), cols[2].length());
    WorldAxes {
        axes: [
            cols[0].normalize_or_zero(),
            cols[1].normalize_or_zero(),
            cols[2].normalize_or_zero(),
        ],
        scale,
        translation: transform.w_axis.truncate(),
    }
}

/// Slab-method test of `ray` against a box given by its local-space
/// corners under an arbitrary affine transform.
///
/// Returns the entry distance along the ray (0 when the origin is
/// inside), or `None` on a miss. Each axis test can only narrow or
/// reject the `[t_min, t_max]` interval, so axis order does not affect
/// the result; a grazing contact with `t_max == t_min` counts as a hit.
pub fn ray_box_entry(ray: &Ray, transform: Mat4, local_min: Vec3, local_max: Vec3) -> Option<f32> {
    let world = extract_world_axes_and_scale(transform);
    // Effective extents in world units; reproduces the transform's
    // scale without a full matrix decomposition.
    let scaled_min = local_min * world.scale;
    let scaled_max = local_max * world.scale;
    let delta = world.translation - ray.origin;

    let mut t_min = 0.0_f32;
    let mut t_max = f32::MAX;

    for i in 0..3 {
        let axis = world.axes[i];
        let e = axis.dot(delta);
        let f = axis.dot(ray.direction);
        let (lo, hi) = (scaled_min[i], scaled_max[i]);

        if f.abs() > SLAB_PARALLEL_EPSILON {
            // Intersections with the near/far plane of this slab.
            let mut t1 = (e + lo) / f;
            let mut t2 = (e + hi) / f;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_max = t_max.min(t2);
            t_min = t_min.max(t1);
            if t_max < t_min {
                return None;
            }
        } else if -e + lo > 0.0 || -e + hi < 0.0 {
            // Ray parallel to the slab with its origin outside it: it
            // can never enter.
            return None;
        }
    }
    Some(t_min)
}

/// Test of `ray` against an ellipsoid with the given local semi-axis
/// radii under an arbitrary affine transform.
///
/// The ray is mapped into the unit sphere's space through the inverse
/// of `T * R * S` (rotation from the normalized axis columns, scale
/// from the column lengths times the radii) and the quadratic is solved
/// in closed form. The affine map preserves the ray parameter, so the
/// returned `t` is a world-space distance. Roots behind the ray origin
/// are rejected.
pub fn ray_ellipsoid_entry(ray: &Ray, transform: Mat4, radii: Vec3) -> Option<f32> {
    let world = extract_world_axes_and_scale(transform);
    let rotation = Mat3::from_cols(world.axes[0], world.axes[1], world.axes[2]);
    let to_unit_sphere = (Mat4::from_translation(world.translation)
        * Mat4::from_mat3(rotation)
        * Mat4::from_scale(world.scale * radii))
    .inverse();

    let origin = to_unit_sphere.transform_point3(ray.origin);
    let direction = to_unit_sphere.transform_vector3(ray.direction);

    let a = direction.dot(direction);
    if a < f32::EPSILON {
        // Unreachable for a unit direction and non-degenerate radii,
        // but guards the division below.
        return None;
    }
    let b = 2.0 * direction.dot(origin);
    let c = origin.dot(origin) - 1.0;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    // Nearest non-negative root; an ellipsoid entirely behind the ray
    // origin is not a hit.
    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// Geometric definition of a pickable shape in its local space.
#[derive(Debug, Clone, Copy)]
pub enum ShapeKind {
    Box { min: Vec3, max: Vec3 },
    Ellipsoid { radii: Vec3 },
}

/// A shape the pick dispatcher can test.
///
/// The transform is recomputed every frame by the scene; the highlight
/// flag is mutated only by the dispatcher and read by the draw step.
#[derive(Debug, Clone)]
pub struct PickableShape {
    pub kind: ShapeKind,
    pub transform: Mat4,
    pub highlighted: bool,
}

impl PickableShape {
    pub fn new(kind: ShapeKind, transform: Mat4) -> Self {
        Self {
            kind,
            transform,
            highlighted: false,
        }
    }

    /// Entry distance of `ray` into this shape, if it hits.
    pub fn test_intersection(&self, ray: &Ray) -> Option<f32> {
        match self.kind {
            ShapeKind::Box { min, max } => ray_box_entry(ray, self.transform, min, max),
            ShapeKind::Ellipsoid { radii } => ray_ellipsoid_entry(ray, self.transform, radii),
        }
    }
}
