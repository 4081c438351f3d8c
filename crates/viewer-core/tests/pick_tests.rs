// Tests for the ray/shape intersection tests and the pick dispatcher.

use glam::{Mat4, Quat, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use viewer_core::{
    dispatch_pick, extract_world_axes_and_scale, pick_at, pick_frame, ray_box_entry,
    ray_ellipsoid_entry, FrameInput, PickableShape, Ray, ShapeKind,
};

fn unit_box() -> (Vec3, Vec3) {
    (Vec3::splat(-1.0), Vec3::splat(1.0))
}

fn ray_pz(origin: Vec3) -> Ray {
    Ray::new(origin, Vec3::Z)
}

// ---------------- transform decomposition ----------------

#[test]
fn world_axes_decompose_scale_rotation_translation() {
    let transform = Mat4::from_scale_rotation_translation(
        Vec3::new(2.0, 3.0, 0.5),
        Quat::from_rotation_z(FRAC_PI_2),
        Vec3::new(1.0, -2.0, 4.0),
    );
    let world = extract_world_axes_and_scale(transform);
    assert!(world.scale.abs_diff_eq(Vec3::new(2.0, 3.0, 0.5), 1e-5));
    assert!(world.translation.abs_diff_eq(Vec3::new(1.0, -2.0, 4.0), 1e-5));
    // Local +x rotated 90 degrees about z lands on world +y.
    assert!(world.axes[0].abs_diff_eq(Vec3::Y, 1e-5));
    for axis in world.axes {
        assert!((axis.length() - 1.0).abs() < 1e-5);
    }
}

// ---------------- box (slab method) ----------------

#[test]
fn box_center_hit_reports_entry_distance() {
    let (min, max) = unit_box();
    let t = ray_box_entry(&ray_pz(Vec3::new(0.0, 0.0, -5.0)), Mat4::IDENTITY, min, max);
    let t = t.expect("ray through the box center must hit");
    assert!((t - 4.0).abs() < 1e-5);
}

#[test]
fn box_miss_when_origin_is_outside_the_footprint() {
    let (min, max) = unit_box();
    let t = ray_box_entry(&ray_pz(Vec3::new(10.0, 10.0, -5.0)), Mat4::IDENTITY, min, max);
    assert!(t.is_none());
}

#[test]
fn box_miss_for_parallel_ray_outside_the_slab() {
    let (min, max) = unit_box();
    let ray = Ray::new(Vec3::new(0.0, -2.0, -2.0), Vec3::X);
    assert!(ray_box_entry(&ray, Mat4::IDENTITY, min, max).is_none());
}

#[test]
fn box_grazing_contact_counts_as_a_hit() {
    let (min, max) = unit_box();
    // Skims exactly along the y = 1 face.
    let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);
    assert!(ray_box_entry(&ray, Mat4::IDENTITY, min, max).is_some());
}

#[test]
fn box_behind_the_ray_origin_is_not_hit() {
    let (min, max) = unit_box();
    let t = ray_box_entry(&ray_pz(Vec3::new(0.0, 0.0, 5.0)), Mat4::IDENTITY, min, max);
    assert!(t.is_none());
}

#[test]
fn box_origin_inside_reports_zero_entry() {
    let (min, max) = unit_box();
    let t = ray_box_entry(&ray_pz(Vec3::ZERO), Mat4::IDENTITY, min, max);
    assert_eq!(t, Some(0.0));
}

#[test]
fn box_scale_widens_the_footprint() {
    let (min, max) = unit_box();
    let transform = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
    // x = 1.5 misses the unit box but sits inside the x-stretched one.
    assert!(ray_box_entry(&ray_pz(Vec3::new(1.5, 0.0, -5.0)), Mat4::IDENTITY, min, max).is_none());
    assert!(ray_box_entry(&ray_pz(Vec3::new(1.5, 0.0, -5.0)), transform, min, max).is_some());
    assert!(ray_box_entry(&ray_pz(Vec3::new(2.5, 0.0, -5.0)), transform, min, max).is_none());
}

#[test]
fn box_rotation_is_honored() {
    let (min, max) = unit_box();
    let rotated = Mat4::from_quat(Quat::from_rotation_z(FRAC_PI_4));
    // (1.2, 0) is outside the axis-aligned unit square but inside the
    // 45-degree-rotated one (whose corner reaches sqrt(2) along x).
    let ray = ray_pz(Vec3::new(1.2, 0.0, -5.0));
    assert!(ray_box_entry(&ray, Mat4::IDENTITY, min, max).is_none());
    assert!(ray_box_entry(&ray, rotated, min, max).is_some());
}

#[test]
fn box_translation_moves_the_footprint() {
    let (min, max) = unit_box();
    let moved = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
    assert!(ray_box_entry(&ray_pz(Vec3::new(5.0, 0.0, -5.0)), moved, min, max).is_some());
    assert!(ray_box_entry(&ray_pz(Vec3::new(0.0, 0.0, -5.0)), moved, min, max).is_none());
}

// ---------------- ellipsoid (quadric) ----------------

#[test]
fn unit_sphere_hit_through_the_center() {
    let t = ray_ellipsoid_entry(&ray_pz(Vec3::new(0.0, 0.0, -10.0)), Mat4::IDENTITY, Vec3::ONE);
    let t = t.expect("ray through the sphere center must hit");
    assert!((t - 9.0).abs() < 1e-4);
}

#[test]
fn small_offset_sphere_is_missed() {
    let transform = Mat4::from_translation(Vec3::new(5.0, 5.0, 5.0));
    let t = ray_ellipsoid_entry(
        &ray_pz(Vec3::new(0.0, 0.0, -10.0)),
        transform,
        Vec3::splat(0.5),
    );
    assert!(t.is_none());
}

#[test]
fn ellipsoid_behind_the_ray_origin_is_not_hit() {
    // Both quadratic roots are negative; a hit behind the origin does
    // not count.
    let transform = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
    let t = ray_ellipsoid_entry(&ray_pz(Vec3::ZERO), transform, Vec3::ONE);
    assert!(t.is_none());
}

#[test]
fn ray_starting_inside_reports_the_exit_root() {
    let t = ray_ellipsoid_entry(&ray_pz(Vec3::ZERO), Mat4::IDENTITY, Vec3::ONE);
    let t = t.expect("origin inside the sphere still hits the far wall");
    assert!((t - 1.0).abs() < 1e-4);
}

#[test]
fn ellipsoid_radii_stretch_the_surface() {
    let radii = Vec3::new(2.0, 1.0, 1.0);
    assert!(
        ray_ellipsoid_entry(&ray_pz(Vec3::new(1.5, 0.0, -10.0)), Mat4::IDENTITY, radii).is_some()
    );
    assert!(
        ray_ellipsoid_entry(&ray_pz(Vec3::new(2.5, 0.0, -10.0)), Mat4::IDENTITY, radii).is_none()
    );
}

#[test]
fn ellipsoid_matrix_scale_combines_with_radii() {
    // Unit radii under a (2, 1, 1) model scale behave like the
    // stretched ellipsoid above.
    let transform = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
    assert!(ray_ellipsoid_entry(&ray_pz(Vec3::new(1.5, 0.0, -10.0)), transform, Vec3::ONE).is_some());
    assert!(ray_ellipsoid_entry(&ray_pz(Vec3::new(2.5, 0.0, -10.0)), transform, Vec3::ONE).is_none());
}

#[test]
fn ellipsoid_rotation_is_honored() {
    // Long axis initially along x; rotating 90 degrees about z points
    // it along world y.
    let radii = Vec3::new(2.0, 0.5, 0.5);
    let transform = Mat4::from_rotation_translation(
        Quat::from_rotation_z(FRAC_PI_2),
        Vec3::new(0.0, 3.0, 0.0),
    );
    // 1.5 world units below the center: inside the rotated long axis,
    // far outside the unrotated short one.
    let ray = ray_pz(Vec3::new(0.0, 1.5, -10.0));
    assert!(ray_ellipsoid_entry(&ray, transform, radii).is_some());
    let unrotated = Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0));
    assert!(ray_ellipsoid_entry(&ray, unrotated, radii).is_none());
}

#[test]
fn tangent_ray_is_a_grazing_hit() {
    // Passes exactly through (1, 0, 0) on the unit sphere.
    let ray = ray_pz(Vec3::new(1.0, 0.0, -10.0));
    assert!(ray_ellipsoid_entry(&ray, Mat4::IDENTITY, Vec3::ONE).is_some());
}

// ---------------- dispatcher ----------------

fn sample_shapes() -> Vec<PickableShape> {
    vec![
        // On the +z axis: hit by a centered +z ray.
        PickableShape::new(
            ShapeKind::Ellipsoid { radii: Vec3::ONE },
            Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)),
        ),
        // Further along the same axis: also hit.
        PickableShape::new(
            ShapeKind::Box {
                min: Vec3::splat(-1.0),
                max: Vec3::splat(1.0),
            },
            Mat4::from_translation(Vec3::new(0.0, 0.0, 6.0)),
        ),
        // Far off to the side: never hit by that ray.
        PickableShape::new(
            ShapeKind::Ellipsoid { radii: Vec3::ONE },
            Mat4::from_translation(Vec3::new(50.0, 0.0, 0.0)),
        ),
    ]
}

#[test]
fn dispatch_sets_each_flag_independently() {
    let mut shapes = sample_shapes();
    shapes[2].highlighted = true; // stale highlight from a previous pick

    let hits = dispatch_pick(&ray_pz(Vec3::new(0.0, 0.0, -5.0)), &mut shapes);
    assert_eq!(hits.as_slice(), &[0, 1]);
    assert!(shapes[0].highlighted);
    assert!(shapes[1].highlighted);
    // Overlapping shapes both stay lit; the stale flag is cleared.
    assert!(!shapes[2].highlighted);
}

#[test]
fn entry_distances_order_overlapping_hits() {
    let shapes = sample_shapes();
    let ray = ray_pz(Vec3::new(0.0, 0.0, -5.0));
    let near = shapes[0].test_intersection(&ray).unwrap();
    let far = shapes[1].test_intersection(&ray).unwrap();
    assert!(near < far);
}

#[test]
fn degenerate_projection_leaves_flags_unchanged() {
    let mut shapes = sample_shapes();
    shapes[0].highlighted = true;
    shapes[2].highlighted = true;

    let result = pick_at(Vec2::ZERO, Mat4::IDENTITY, Mat4::ZERO, &mut shapes);
    assert!(result.is_err());
    assert!(shapes[0].highlighted);
    assert!(!shapes[1].highlighted);
    assert!(shapes[2].highlighted);
}

#[test]
fn inactive_pick_trigger_is_a_no_op() {
    let mut shapes = sample_shapes();
    shapes[1].highlighted = true;

    let input = FrameInput {
        pick_active: false,
        ..FrameInput::default()
    };
    let hits = pick_frame(&input, Mat4::IDENTITY, Mat4::IDENTITY, &mut shapes).unwrap();
    assert!(hits.is_empty());
    assert!(shapes[1].highlighted);
}

#[test]
fn pick_frame_resolves_a_centered_click() {
    // Camera at -z looking down +z through the sample shapes.
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 2.0), Vec3::Y);
    let proj = Mat4::perspective_rh(FRAC_PI_4, 1.0, 0.1, 100.0);
    let mut shapes = sample_shapes();

    let input = FrameInput {
        pick_active: true,
        pick_px: Vec2::new(320.0, 240.0),
        viewport: (640, 480),
        ..FrameInput::default()
    };
    let hits = pick_frame(&input, view, proj, &mut shapes).unwrap();
    assert_eq!(hits.as_slice(), &[0, 1]);
}
