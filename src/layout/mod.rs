//! Static layout algorithms.
//!
//! These compute final positions in one call, as opposed to the iterative
//! force simulation. The host animates nodes toward the returned targets.

pub mod hierarchical;

pub use hierarchical::{Direction, HierarchicalConfig, HierarchicalLayout};
