//! Initial placement for nodes that enter the simulation without a position.
//!
//! Placement is deterministic in the node's index within the incoming list,
//! so distinct new nodes never start on top of each other.

use std::f32::consts::PI;

use super::config::Dimensions;
use crate::geometry::Vec3;

/// Golden angle in radians (~2.39996).
fn golden_angle() -> f32 {
    PI * (3.0 - 5.0_f32.sqrt())
}

/// Point `index` of `count` on a Fibonacci sphere of the given radius.
pub fn fibonacci_sphere(index: usize, count: usize, radius: f32) -> Vec3 {
    let n = count.max(1) as f32;
    let i = index as f32;

    let y = 1.0 - 2.0 * (i + 0.5) / n;
    let ring = (1.0 - y * y).max(0.0).sqrt();
    let theta = i * golden_angle();

    Vec3::new(theta.cos() * ring, y, theta.sin() * ring) * radius
}

/// Point `index` of `count` on a sunflower (Fermat) spiral filling a disc.
pub fn sunflower(index: usize, count: usize, radius: f32) -> Vec3 {
    let n = count.max(1) as f32;
    let i = index as f32;

    let r = radius * ((i + 0.5) / n).sqrt();
    let theta = i * golden_angle();

    Vec3::planar(r * theta.cos(), r * theta.sin())
}

/// Starting position for the `index`-th of `count` incoming nodes.
///
/// The radius is chosen so each node gets roughly `spacing²` of surface
/// (sphere in 3D, disc in 2D).
pub fn initial_position(index: usize, count: usize, dimensions: Dimensions, spacing: f32) -> Vec3 {
    let spacing = if spacing > 0.0 { spacing } else { 1.0 };
    let n = count.max(1) as f32;
    match dimensions {
        Dimensions::Three => {
            let radius = (spacing * (n / (4.0 * PI)).sqrt()).max(spacing);
            fibonacci_sphere(index, count, radius)
        }
        Dimensions::Two => {
            let radius = (spacing * (n / PI).sqrt()).max(spacing);
            sunflower(index, count, radius)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_angle() {
        assert!((golden_angle() - 2.399_963).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_points_lie_on_sphere() {
        for i in 0..20 {
            let p = fibonacci_sphere(i, 20, 50.0);
            assert!((p.length() - 50.0).abs() < 1e-3, "Point {i} off the sphere: {p:?}");
        }
    }

    #[test]
    fn test_placements_do_not_overlap() {
        for dimensions in [Dimensions::Two, Dimensions::Three] {
            let points: Vec<Vec3> = (0..100)
                .map(|i| initial_position(i, 100, dimensions, 30.0))
                .collect();
            for i in 0..points.len() {
                for j in (i + 1)..points.len() {
                    assert!(
                        points[i].distance(points[j]) > 1.0,
                        "{dimensions:?}: nodes {i} and {j} start too close"
                    );
                }
            }
        }
    }

    #[test]
    fn test_planar_placement_stays_flat() {
        for i in 0..10 {
            assert_eq!(initial_position(i, 10, Dimensions::Two, 30.0).z, 0.0);
        }
    }

    #[test]
    fn test_single_node_is_off_origin() {
        let p = initial_position(0, 1, Dimensions::Three, 30.0);
        assert!(p.length() > 1.0);
    }
}
