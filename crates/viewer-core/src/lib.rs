//! Geometry core for the orbital scene viewer.
//!
//! Everything in this crate is pure math over `glam` types and is
//! suitable for any frontend: the orbital camera model, screen-to-world
//! pick rays, and the analytic ray/shape intersection tests the pick
//! dispatcher runs each frame. No platform APIs are referenced here.

pub mod camera;
pub mod constants;
pub mod pick;
pub mod ray;
pub mod shapes;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::*;
pub use constants::*;
pub use pick::*;
pub use ray::*;
pub use shapes::*;
