//! R-tree index over a published position snapshot, using the rstar crate.
//!
//! The host uses it to pick nodes under a pointer or controller ray hit:
//! - Nearest neighbor
//! - Nearest within a maximum distance
//! - Point-in-radius

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::geometry::Vec3;
use crate::graph::PositionMap;

/// A point in the spatial index with its node id.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePoint {
    pub id: String,
    pub position: [f32; 3],
}

impl NodePoint {
    pub fn new(id: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            position: position.to_array(),
        }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Spatial index over node positions.
///
/// Built from a snapshot; it does not track later simulation ticks.
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load the index from a position snapshot. Non-finite positions are skipped.
    pub fn from_positions(positions: &PositionMap) -> Self {
        let points: Vec<_> = positions
            .iter()
            .filter(|(_, p)| p.is_finite())
            .map(|(id, &p)| NodePoint::new(id.clone(), p))
            .collect();

        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Find the node nearest to a point.
    pub fn nearest(&self, point: Vec3) -> Option<&str> {
        self.tree
            .nearest_neighbor(&point.to_array())
            .map(|p| p.id.as_str())
    }

    /// Find the nearest node no farther than `max_distance`.
    pub fn nearest_within(&self, point: Vec3, max_distance: f32) -> Option<&str> {
        let query = point.to_array();
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&query)
            .filter(|p| p.distance_2(&query) <= max_distance_sq)
            .map(|p| p.id.as_str())
    }

    /// All nodes within `radius` of a point, in no particular order.
    pub fn in_radius(&self, point: Vec3, radius: f32) -> Vec<&str> {
        self.tree
            .locate_within_distance(point.to_array(), radius * radius)
            .map(|p| p.id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
