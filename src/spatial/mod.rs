//! Spatial data structures.
//!
//! - `octree`: Barnes-Hut octree (quadtree in planar mode) for O(n log n) repulsion
//! - `rtree`: R-tree index over published positions for picking queries

pub mod octree;
mod rtree;

pub use octree::{Body, Octree};
pub use rtree::SpatialIndex;
