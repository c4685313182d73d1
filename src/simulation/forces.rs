//! Force kernels used by the simulation each tick.
//!
//! All kernels take positions and masses in slot order and add into a
//! caller-owned `forces` buffer, which is zeroed once at the start of a tick.

use crate::geometry::Vec3;
use crate::spatial::octree::MIN_DISTANCE;
use crate::spatial::{Body, Octree};

/// Repulsive force on a body at `a` due to a body at `b`.
///
/// Magnitude is `strength * mass_a * mass_b / d²`, directed from `b` to `a`.
/// Returns `None` when the bodies are closer than [`MIN_DISTANCE`].
#[inline]
pub fn repulsion(a: Vec3, b: Vec3, mass_a: f32, mass_b: f32, strength: f32) -> Option<Vec3> {
    let delta = a - b;
    let distance = delta.length();
    if distance < MIN_DISTANCE {
        return None;
    }
    let magnitude = strength * mass_a * mass_b / (distance * distance);
    Some(delta * (magnitude / distance))
}

/// Hooke spring force on the body at `a` from a spring attached to `b`.
///
/// Positive when stretched (pulls `a` toward `b`), negative when compressed
/// (pushes `a` away), zero at exactly `rest_length`.
#[inline]
pub fn spring(a: Vec3, b: Vec3, rest_length: f32, stiffness: f32) -> Option<Vec3> {
    let delta = b - a;
    let distance = delta.length();
    if distance < MIN_DISTANCE {
        return None;
    }
    let magnitude = stiffness * (distance - rest_length);
    Some(delta * (magnitude / distance))
}

/// Direct O(n²) repulsion over every unordered pair, equal and opposite.
pub fn apply_pairwise_repulsion(
    positions: &[Vec3],
    masses: &[f32],
    strength: f32,
    forces: &mut [Vec3],
) {
    let n = positions.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(f) = repulsion(positions[i], positions[j], masses[i], masses[j], strength) {
                forces[i] += f;
                forces[j] -= f;
            }
        }
    }
}

/// Barnes-Hut repulsion. The tree is fully built before any query runs.
pub fn apply_barnes_hut_repulsion(
    positions: &[Vec3],
    masses: &[f32],
    theta: f32,
    strength: f32,
    planar: bool,
    forces: &mut [Vec3],
) {
    let bodies: Vec<Body> = positions
        .iter()
        .zip(masses)
        .map(|(&position, &mass)| Body::new(position, mass))
        .collect();
    let tree = Octree::build(&bodies, planar);

    for (slot, body) in bodies.iter().enumerate() {
        forces[slot] += tree.calculate_force(body.position, theta, strength) * body.mass;
    }
}

/// Spring attraction along each `(source, target)` slot pair, in both directions.
pub fn apply_springs(
    positions: &[Vec3],
    springs: &[(usize, usize)],
    rest_length: f32,
    stiffness: f32,
    forces: &mut [Vec3],
) {
    for &(source, target) in springs {
        if let Some(f) = spring(positions[source], positions[target], rest_length, stiffness) {
            forces[source] += f;
            forces[target] -= f;
        }
    }
}

/// Pull every body toward the origin with force `-gravity * position`.
pub fn apply_center_gravity(positions: &[Vec3], gravity: f32, forces: &mut [Vec3]) {
    for (force, &position) in forces.iter_mut().zip(positions) {
        *force -= position * gravity;
    }
}
