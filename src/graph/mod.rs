//! Graph input records and layout outputs shared by both engines.
//!
//! The host owns the artifact graph snapshot (requirements, tasks, tests,
//! risks, documents) and hands it to an engine as node and edge lists. The
//! only thing that crosses back is a position map keyed by node id.

mod edge;
mod node;

use std::collections::BTreeMap;

use crate::geometry::{Vec2, Vec3};

pub use edge::EdgeInput;
pub use node::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, NodeInput};

/// Node id → 3D position, published by the force simulation once per tick.
pub type PositionMap = BTreeMap<String, Vec3>;

/// Node id → 2D position, produced by the layered layout.
pub type LayoutPositions = BTreeMap<String, Vec2>;
