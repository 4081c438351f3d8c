//! Per-frame input snapshot and the scene pick dispatcher.

use glam::{Mat4, Vec2};
use smallvec::SmallVec;

use crate::camera::OrbitalCamera;
use crate::ray::{ndc_from_pixels, screen_to_world_ray, PickError, Ray};
use crate::shapes::PickableShape;

/// One frame's worth of pointer input, accumulated by the host between
/// frames and consumed exactly once per render cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub delta_x: f32,
    pub delta_y: f32,
    pub wheel_delta: f32,
    pub pick_active: bool,
    /// Cursor position in pixels when `pick_active` is set.
    pub pick_px: Vec2,
    pub viewport: (u32, u32),
}

/// Indices of shapes hit by a pick, in scene order.
pub type PickHits = SmallVec<[usize; 8]>;

/// Apply one frame of orbit/zoom input to the camera.
pub fn advance_camera(camera: &mut OrbitalCamera, input: &FrameInput) {
    camera.process_orbit(input.delta_x, input.delta_y);
    camera.process_zoom(input.wheel_delta);
}

/// Test every shape against `ray` and set each highlight flag to the
/// test result. Flags are independent (last-write-wins per shape, no
/// nearest-hit priority); overlapping shapes may all highlight at once.
pub fn dispatch_pick(ray: &Ray, shapes: &mut [PickableShape]) -> PickHits {
    let mut hits = PickHits::new();
    for (index, shape) in shapes.iter_mut().enumerate() {
        let hit = shape.test_intersection(ray).is_some();
        shape.highlighted = hit;
        if hit {
            hits.push(index);
        }
    }
    hits
}

/// Build the pick ray for `ndc` and dispatch it over the shapes.
///
/// A degenerate projection aborts before any highlight flag is
/// touched, so a failed pick leaves the previous frame's state intact.
pub fn pick_at(
    ndc: Vec2,
    view: Mat4,
    projection: Mat4,
    shapes: &mut [PickableShape],
) -> Result<PickHits, PickError> {
    let ray = screen_to_world_ray(ndc, view, projection)?;
    let hits = dispatch_pick(&ray, shapes);
    if !hits.is_empty() {
        log::debug!("pick hit {} shape(s): {:?}", hits.len(), hits);
    }
    Ok(hits)
}

/// Per-frame pick entry point. A no-op unless the pick trigger was
/// active in this frame's input snapshot.
pub fn pick_frame(
    input: &FrameInput,
    view: Mat4,
    projection: Mat4,
    shapes: &mut [PickableShape],
) -> Result<PickHits, PickError> {
    if !input.pick_active {
        return Ok(PickHits::new());
    }
    let (width, height) = input.viewport;
    let ndc = ndc_from_pixels(
        input.pick_px.x,
        input.pick_px.y,
        width as f32,
        height as f32,
    );
    pick_at(ndc, view, projection, shapes)
}
