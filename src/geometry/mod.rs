//! Geometry primitives shared by both layout engines.
//!
//! Points and vectors are `f32` to match the GPU-facing position buffers
//! handed to the renderer.

mod bounds;
mod vector;

pub use bounds::Bounds3;
pub use vector::{Vec2, Vec3};
