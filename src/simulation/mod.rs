//! Force-directed simulation for the 3D/VR graph view.
//!
//! - `config`: options, defaults and clamping
//! - `forces`: repulsion, spring, and gravity kernels
//! - `placement`: deterministic starting positions for new nodes
//! - `engine`: the `ForceSimulation` itself

pub mod config;
mod engine;
pub mod forces;
mod placement;

pub use config::{
    DEFAULT_BARNES_HUT_THRESHOLD, DEFAULT_TIME_STEP, Dimensions, ForceConfig, MAX_TIME_STEP,
};
pub use engine::{DEFAULT_REHEAT, DRAG_ALPHA_FLOOR, ForceSimulation, PositionUpdate, SimNode};
