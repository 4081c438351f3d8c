//! Scene contents: the globe, a few fixed markers, and a vehicle
//! circling the globe. Shape transforms are recomputed here every
//! frame; highlight flags belong to the pick dispatcher.

use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3, Vec4};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use viewer_core::{
    extract_world_axes_and_scale, PickableShape, ShapeKind, GLOBE_RADIUS, VEHICLE_ANGULAR_SPEED,
    VEHICLE_ORBIT_HEIGHT, VEHICLE_ORBIT_RADIUS,
};

pub struct Scene {
    pub shapes: Vec<PickableShape>,
    pub colors: Vec<Vec4>,
    labels: FnvHashMap<&'static str, usize>,
    vehicle_angle: f32,
}

impl Scene {
    pub fn new() -> Self {
        let mut scene = Self {
            shapes: Vec::new(),
            colors: Vec::new(),
            labels: FnvHashMap::default(),
            vehicle_angle: 0.0,
        };

        scene.add(
            "globe",
            ShapeKind::Ellipsoid {
                radii: Vec3::splat(GLOBE_RADIUS),
            },
            Mat4::IDENTITY,
            Vec4::new(0.25, 0.55, 0.85, 1.0),
        );
        scene.add(
            "depot",
            unit_box(),
            Mat4::from_scale_rotation_translation(
                Vec3::new(0.25, 0.25, 0.35),
                Quat::IDENTITY,
                Vec3::new(1.9, 0.4, 0.5),
            ),
            Vec4::new(0.9, 0.6, 0.25, 1.0),
        );
        scene.add(
            "buoy",
            ShapeKind::Ellipsoid {
                radii: Vec3::new(0.2, 0.2, 0.3),
            },
            Mat4::from_translation(Vec3::new(-1.4, 1.1, 0.3)),
            Vec4::new(0.7, 0.4, 0.9, 1.0),
        );
        // Rotated about the pole axis to exercise the oriented-box path.
        scene.add(
            "marker",
            unit_box(),
            Mat4::from_scale_rotation_translation(
                Vec3::splat(0.15),
                Quat::from_rotation_z(FRAC_PI_4),
                Vec3::new(0.0, -2.0, 0.8),
            ),
            Vec4::new(0.35, 0.85, 0.45, 1.0),
        );
        scene.add(
            "vehicle",
            unit_box(),
            Mat4::IDENTITY,
            Vec4::new(0.9, 0.3, 0.3, 1.0),
        );
        scene.advance(0.0); // place the vehicle before the first frame

        scene
    }

    fn add(&mut self, label: &'static str, kind: ShapeKind, transform: Mat4, color: Vec4) {
        let index = self.shapes.len();
        self.shapes.push(PickableShape::new(kind, transform));
        self.colors.push(color);
        self.labels.insert(label, index);
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// Advance the moving parts of the scene by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.vehicle_angle = (self.vehicle_angle + VEHICLE_ANGULAR_SPEED * dt) % TAU;
        let (sin, cos) = self.vehicle_angle.sin_cos();
        let position = Vec3::new(
            VEHICLE_ORBIT_RADIUS * cos,
            VEHICLE_ORBIT_RADIUS * sin,
            VEHICLE_ORBIT_HEIGHT,
        );
        // Nose along the direction of travel.
        let heading = Quat::from_rotation_z(self.vehicle_angle + FRAC_PI_2);
        if let Some(&vehicle) = self.labels.get("vehicle") {
            self.shapes[vehicle].transform = Mat4::from_scale_rotation_translation(
                Vec3::new(0.08, 0.18, 0.06),
                heading,
                position,
            );
        }
    }

    pub fn vehicle_position(&self) -> Vec3 {
        self.index_of("vehicle")
            .map(|i| self.shapes[i].transform.w_axis.truncate())
            .unwrap_or(Vec3::ZERO)
    }

    /// Billboard radius covering the shape's world-space extent.
    pub fn draw_scale(&self, index: usize) -> f32 {
        let shape = &self.shapes[index];
        let world = extract_world_axes_and_scale(shape.transform);
        match shape.kind {
            ShapeKind::Box { min, max } => {
                let half = (max - min) * 0.5 * world.scale;
                half.length()
            }
            ShapeKind::Ellipsoid { radii } => (radii * world.scale).max_element(),
        }
    }
}

fn unit_box() -> ShapeKind {
    ShapeKind::Box {
        min: Vec3::splat(-1.0),
        max: Vec3::splat(1.0),
    }
}
