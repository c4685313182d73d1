//! Artifact Graph Layout - WASM Module
//!
//! Layout engines for the requirements/engineering artifact graph viewer.
//! Compiled to WebAssembly and exposed to the rendering layer through
//! wasm-bindgen. The engines never call back into rendering or I/O; the host
//! supplies node/edge snapshots and reads position maps back.
//!
//! # Architecture
//!
//! - `geometry`: Vector and bounding-box primitives
//! - `graph`: Node/edge input records and position map types
//! - `spatial`: Barnes-Hut octree and R-tree picking index
//! - `simulation`: Force-directed simulation driven once per animation frame
//! - `layout`: Sugiyama-style layered layout, computed in one call

use js_sys::Float32Array;
use log::LevelFilter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod simulation;
pub mod spatial;

use error::LayoutError;
use geometry::Vec3;
use graph::{EdgeInput, NodeInput};
use layout::{HierarchicalConfig, HierarchicalLayout};
use simulation::{ForceConfig, ForceSimulation, PositionUpdate};
use spatial::SpatialIndex;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Info);
}

/// Change log verbosity (`"off"`, `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logging::parse_level(level)
        .ok_or_else(|| LayoutError::invalid("log level", format!("unknown level {level:?}")))?;
    logging::set_level(filter);
    Ok(())
}

/// Node count above which the simulation switches to Barnes-Hut by default.
#[wasm_bindgen(js_name = defaultBarnesHutThreshold)]
pub fn default_barnes_hut_threshold() -> usize {
    ForceSimulation::default_barnes_hut_threshold()
}

/// Compute a layered (Sugiyama) layout in one call.
///
/// Takes `[{id, width?, height?}]`, `[{source, target}]` and an optional
/// config object. Returns `{ [id]: {x, y} }`.
#[wasm_bindgen(js_name = computeHierarchicalLayout)]
pub fn compute_hierarchical_layout(
    nodes: JsValue,
    edges: JsValue,
    config: JsValue,
) -> Result<JsValue, JsValue> {
    let nodes: Vec<NodeInput> = decode(nodes, "node list")?;
    let edges: Vec<EdgeInput> = decode(edges, "edge list")?;
    let config: HierarchicalConfig = decode(config, "hierarchical config")?;

    let positions = HierarchicalLayout::new(config).calculate_layout(&nodes, &edges);
    Ok(encode(&positions)?)
}

/// Decode a host value; `undefined` and `null` yield the type's default.
fn decode<T>(value: JsValue, what: &'static str) -> error::Result<T>
where
    T: DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| LayoutError::invalid(what, e))
}

/// Encode maps as plain objects so the host can index them by id.
fn encode<T: Serialize + ?Sized>(value: &T) -> error::Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(LayoutError::encode)
}

/// Force-directed simulation handle.
///
/// This struct wraps the internal ForceSimulation and provides the public
/// API exposed to JavaScript. Call `tick()` once per animation frame and read
/// positions back with `getPositions()` or `positionsBuffer()`.
#[wasm_bindgen]
pub struct ForceSimulationWasm {
    sim: ForceSimulation,
    /// Picking index over the last published positions, rebuilt on demand.
    picking: Option<SpatialIndex>,
}

#[wasm_bindgen]
impl ForceSimulationWasm {
    /// Create a simulation. `config` may be omitted or partial.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ForceSimulationWasm, JsValue> {
        let config: ForceConfig = decode(config, "force config")?;
        Ok(Self {
            sim: ForceSimulation::new(config),
            picking: None,
        })
    }

    /// Replace the configuration; omitted options take their defaults.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: ForceConfig = decode(config, "force config")?;
        self.sim.set_config(config);
        self.picking = None;
        Ok(())
    }

    // =========================================================================
    // Graph Snapshot
    // =========================================================================

    /// Merge `[{id, x?, y?, z?, size?, mass?}]` into the live node set.
    #[wasm_bindgen(js_name = setNodes)]
    pub fn set_nodes(&mut self, nodes: JsValue) -> Result<(), JsValue> {
        let nodes: Vec<NodeInput> = decode(nodes, "node list")?;
        self.sim.set_nodes(&nodes);
        self.picking = None;
        Ok(())
    }

    /// Replace the edge list `[{source, target}]`.
    #[wasm_bindgen(js_name = setEdges)]
    pub fn set_edges(&mut self, edges: JsValue) -> Result<(), JsValue> {
        let edges: Vec<EdgeInput> = decode(edges, "edge list")?;
        self.sim.set_edges(&edges);
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn start(&mut self) {
        self.sim.start();
    }

    pub fn stop(&mut self) {
        self.sim.stop();
    }

    pub fn restart(&mut self) {
        self.sim.restart();
    }

    pub fn reheat(&mut self, amount: f32) {
        self.sim.reheat(amount);
    }

    /// Advance one step. Returns whether the simulation is still active.
    pub fn tick(&mut self) -> bool {
        self.picking = None;
        self.sim.tick()
    }

    /// Advance one step of `dt` seconds (clamped to 0.05).
    #[wasm_bindgen(js_name = tickWithDelta)]
    pub fn tick_with_delta(&mut self, dt: f32) -> bool {
        self.picking = None;
        self.sim.tick_with_delta(dt)
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    #[wasm_bindgen(js_name = pinNode)]
    pub fn pin_node(&mut self, id: &str, x: f32, y: f32, z: Option<f32>) -> bool {
        self.picking = None;
        self.sim.pin_node(id, point(x, y, z))
    }

    #[wasm_bindgen(js_name = unpinNode)]
    pub fn unpin_node(&mut self, id: &str) -> bool {
        self.sim.unpin_node(id)
    }

    #[wasm_bindgen(js_name = onDragStart)]
    pub fn on_drag_start(&mut self, id: &str, x: f32, y: f32, z: Option<f32>) -> bool {
        self.picking = None;
        self.sim.on_drag_start(id, point(x, y, z))
    }

    #[wasm_bindgen(js_name = onDrag)]
    pub fn on_drag(&mut self, id: &str, x: f32, y: f32, z: Option<f32>) -> bool {
        self.picking = None;
        self.sim.on_drag(id, point(x, y, z))
    }

    #[wasm_bindgen(js_name = onDragEnd)]
    pub fn on_drag_end(&mut self, id: &str) -> bool {
        self.sim.on_drag_end(id)
    }

    /// Override some of `{x, y, z}` for one node and reheat.
    #[wasm_bindgen(js_name = updateNode)]
    pub fn update_node(&mut self, id: &str, position: JsValue) -> Result<bool, JsValue> {
        let update: PositionUpdate = decode(position, "position update")?;
        self.picking = None;
        Ok(self.sim.update_node(id, update))
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    #[wasm_bindgen(js_name = getAlpha)]
    pub fn alpha(&self) -> f32 {
        self.sim.alpha()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    /// Ticks since the last restart. Informational only.
    pub fn iteration(&self) -> f64 {
        self.sim.iteration() as f64
    }

    #[wasm_bindgen(js_name = isBarnesHutActive)]
    pub fn is_barnes_hut_active(&self) -> bool {
        self.sim.is_barnes_hut_active()
    }

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.sim.node_count()
    }

    /// Number of edges whose endpoints both exist.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> usize {
        self.sim.active_edge_count()
    }

    /// Kinematic state of one node, or `undefined` for an unknown id.
    #[wasm_bindgen(js_name = getNode)]
    pub fn get_node(&self, id: &str) -> Result<JsValue, JsValue> {
        match self.sim.node(id) {
            Some(node) => Ok(encode(node)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Get the bounding box of all nodes.
    ///
    /// Returns [min_x, min_y, min_z, max_x, max_y, max_z], or None if empty.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f32>> {
        self.sim.bounds().map(|b| {
            let mut out = b.min.to_array().to_vec();
            out.extend_from_slice(&b.max.to_array());
            out
        })
    }

    // =========================================================================
    // Position Output
    // =========================================================================

    /// Copy of the current positions as `{ [id]: {x, y, z} }`.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Result<JsValue, JsValue> {
        Ok(encode(&self.sim.positions())?)
    }

    /// Positions as [x0, y0, z0, x1, y1, z1, ...] in `nodeIds()` order.
    #[wasm_bindgen(js_name = positionsBuffer)]
    pub fn positions_buffer(&self) -> Float32Array {
        Float32Array::from(self.sim.positions_buffer().as_slice())
    }

    /// Node ids in buffer order.
    #[wasm_bindgen(js_name = nodeIds)]
    pub fn node_ids(&self) -> Vec<String> {
        self.sim.node_ids()
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the node nearest to a point, or None if there are no nodes.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&mut self, x: f32, y: f32, z: Option<f32>) -> Option<String> {
        self.picking_index().nearest(point(x, y, z)).map(str::to_string)
    }

    /// Find the nearest node within `max_distance` of a point.
    #[wasm_bindgen(js_name = findNearestNodeWithin)]
    pub fn find_nearest_node_within(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        max_distance: f32,
    ) -> Option<String> {
        self.picking_index()
            .nearest_within(Vec3::new(x, y, z), max_distance)
            .map(str::to_string)
    }

    /// Ids of all nodes within `radius` of a point.
    #[wasm_bindgen(js_name = findNodesInRadius)]
    pub fn find_nodes_in_radius(&mut self, x: f32, y: f32, z: f32, radius: f32) -> Vec<String> {
        self.picking_index()
            .in_radius(Vec3::new(x, y, z), radius)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl ForceSimulationWasm {
    fn picking_index(&mut self) -> &SpatialIndex {
        let sim = &self.sim;
        self.picking
            .get_or_insert_with(|| SpatialIndex::from_positions(&sim.positions()))
    }
}

fn point(x: f32, y: f32, z: Option<f32>) -> Vec3 {
    Vec3::new(x, y, z.unwrap_or(0.0))
}
