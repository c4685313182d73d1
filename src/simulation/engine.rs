//! ForceSimulation - the force-directed layout engine for the 3D/VR view.
//!
//! Node records live in an arena (petgraph's `StableGraph`) with a stable
//! index per node and an id → index table. Stable indices survive removals,
//! so merging a new node list into live state is an explicit walk over the
//! arena rather than a rebuild.
//!
//! The host drives the simulation with one `tick()` per animation frame and
//! reads back a copied position map after each completed tick.

use log::{debug, trace};
use petgraph::Directed;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences, NodeIndexable};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::config::{DEFAULT_BARNES_HUT_THRESHOLD, ForceConfig, MAX_TIME_STEP};
use super::{forces, placement};
use crate::geometry::{Bounds3, Vec3};
use crate::graph::{EdgeInput, NodeInput, PositionMap};

/// Alpha added by `reheat` calls issued on behalf of the host (drag start,
/// direct position updates).
pub const DEFAULT_REHEAT: f32 = 0.3;

/// Alpha kept as a floor while a node is being dragged.
pub const DRAG_ALPHA_FLOOR: f32 = 0.1;

/// Kinematic record for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimNode {
    pub id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Net force from the most recent tick.
    pub force: Vec3,
    pub mass: f32,
    /// Fixed position; while set, integration leaves the node alone.
    pub pin: Option<Vec3>,
    /// Host metadata, replaced on every `set_nodes`.
    pub size: Option<f32>,
}

impl SimNode {
    fn new(input: &NodeInput, position: Vec3) -> Self {
        Self {
            id: input.id.clone(),
            position,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            mass: input.mass_or_default(),
            pin: None,
            size: input.size,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }
}

/// Partial position override; missing components are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PositionUpdate {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub z: Option<f32>,
}

impl PositionUpdate {
    fn apply(self, mut position: Vec3) -> Vec3 {
        if let Some(x) = self.x.filter(|v| v.is_finite()) {
            position.x = x;
        }
        if let Some(y) = self.y.filter(|v| v.is_finite()) {
            position.y = y;
        }
        if let Some(z) = self.z.filter(|v| v.is_finite()) {
            position.z = z;
        }
        position
    }
}

impl From<Vec3> for PositionUpdate {
    fn from(p: Vec3) -> Self {
        Self {
            x: Some(p.x),
            y: Some(p.y),
            z: Some(p.z),
        }
    }
}

/// The force-directed simulation.
///
/// This struct manages:
/// - Node kinematic state (position, velocity, mass, pin) in a stable arena
/// - The raw edge list and its resolution against the current node set
/// - The cooling schedule (`alpha`, `running`, `iteration`)
pub struct ForceSimulation {
    config: ForceConfig,

    /// Arena of node records; graph edges are the currently resolvable springs.
    graph: StableGraph<SimNode, (), Directed>,

    /// Map from node id to arena index.
    index: HashMap<String, NodeIndex>,

    /// Edges as supplied, including ones that do not resolve yet.
    edges: Vec<EdgeInput>,

    alpha: f32,
    running: bool,
    iteration: u64,

    /// Average displacement of free nodes during the last tick.
    last_movement: f32,

    /// Barnes-Hut state seen by the previous tick, for change logging.
    barnes_hut_was_active: bool,
}

impl ForceSimulation {
    /// Create an empty, stopped simulation.
    pub fn new(config: ForceConfig) -> Self {
        let config = config.sanitized();
        Self {
            alpha: config.alpha,
            config,
            graph: StableGraph::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            running: false,
            iteration: 0,
            last_movement: 0.0,
            barnes_hut_was_active: false,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ForceConfig::default())
    }

    /// Barnes-Hut threshold used when the configuration does not override it.
    pub const fn default_barnes_hut_threshold() -> usize {
        DEFAULT_BARNES_HUT_THRESHOLD
    }

    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    /// Replace the configuration. Temperature and node state are kept.
    pub fn set_config(&mut self, config: ForceConfig) {
        self.config = config.sanitized();
        if self.config.dimensions.is_planar() {
            for node in self.graph.node_weights_mut() {
                node.position.z = 0.0;
                node.velocity.z = 0.0;
                if let Some(pin) = node.pin.as_mut() {
                    pin.z = 0.0;
                }
            }
        }
    }

    // =========================================================================
    // Graph Snapshot
    // =========================================================================

    /// Merge a new node list into the live state.
    ///
    /// Known ids keep their position, velocity, mass and pin; only metadata
    /// is replaced. New ids get their supplied position or a deterministic
    /// initial placement. Ids missing from `nodes` are dropped. Alpha is not
    /// touched.
    pub fn set_nodes(&mut self, nodes: &[NodeInput]) {
        let incoming: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

        let removed: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&ix| !incoming.contains(self.graph[ix].id.as_str()))
            .collect();
        for ix in &removed {
            if let Some(node) = self.graph.remove_node(*ix) {
                self.index.remove(&node.id);
            }
        }

        let planar = self.config.dimensions.is_planar();
        let mut added = 0usize;
        let mut kept = 0usize;
        let mut seen: HashSet<&str> = HashSet::with_capacity(nodes.len());

        for (i, input) in nodes.iter().enumerate() {
            // First occurrence of a duplicated id wins
            if !seen.insert(input.id.as_str()) {
                continue;
            }

            if let Some(&ix) = self.index.get(&input.id) {
                self.graph[ix].size = input.size;
                kept += 1;
                continue;
            }

            let mut position = input.position().unwrap_or_else(|| {
                placement::initial_position(
                    i,
                    nodes.len(),
                    self.config.dimensions,
                    self.config.ideal_edge_length,
                )
            });
            if planar {
                position.z = 0.0;
            }

            let ix = self.graph.add_node(SimNode::new(input, position));
            self.index.insert(input.id.clone(), ix);
            added += 1;
        }

        self.resolve_edges();
        debug!(
            "set_nodes: {added} added, {kept} kept, {} removed ({} total)",
            removed.len(),
            self.graph.node_count()
        );
    }

    /// Replace the edge list used for attraction.
    ///
    /// Edges naming unknown ids are kept but stay inert until both endpoints
    /// exist.
    pub fn set_edges(&mut self, edges: &[EdgeInput]) {
        self.edges = edges.to_vec();
        self.resolve_edges();
        debug!(
            "set_edges: {} supplied, {} active",
            self.edges.len(),
            self.graph.edge_count()
        );
    }

    /// Rebuild graph edges from the raw edge list against the current node set.
    fn resolve_edges(&mut self) {
        self.graph.clear_edges();
        for edge in &self.edges {
            if edge.is_self_loop() {
                continue;
            }
            if let (Some(&source), Some(&target)) =
                (self.index.get(&edge.source), self.index.get(&edge.target))
            {
                self.graph.add_edge(source, target, ());
            }
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Resume ticking without touching alpha.
    pub fn start(&mut self) {
        self.running = true;
        debug!("simulation started at alpha {:.4}", self.alpha);
    }

    /// Halt integration. Node state is kept.
    pub fn stop(&mut self) {
        self.running = false;
        debug!("simulation stopped after {} iterations", self.iteration);
    }

    /// Full temperature, iteration counter reset, running.
    pub fn restart(&mut self) {
        self.alpha = 1.0;
        self.iteration = 0;
        self.running = true;
        debug!("simulation restarted");
    }

    /// Raise alpha by `amount` (capped at 1) so the layout can relax again.
    pub fn reheat(&mut self, amount: f32) {
        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self.alpha = (self.alpha + amount).min(1.0);
        if self.alpha >= self.config.min_alpha {
            self.running = true;
        }
        trace!("reheat by {amount:.3} to alpha {:.4}", self.alpha);
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Fix a node at `position`. Returns false for an unknown id.
    pub fn pin_node(&mut self, id: &str, position: Vec3) -> bool {
        let Some(&ix) = self.index.get(id) else {
            return false;
        };
        let mut position = position;
        if self.config.dimensions.is_planar() {
            position.z = 0.0;
        }
        let node = &mut self.graph[ix];
        node.pin = Some(position);
        node.position = position;
        node.velocity = Vec3::ZERO;
        true
    }

    /// Release a pinned node. Returns false for an unknown id.
    pub fn unpin_node(&mut self, id: &str) -> bool {
        let Some(&ix) = self.index.get(id) else {
            return false;
        };
        self.graph[ix].pin = None;
        true
    }

    /// Grab a node: pin it where the pointer is and re-energize the layout.
    pub fn on_drag_start(&mut self, id: &str, position: Vec3) -> bool {
        if !self.pin_node(id, position) {
            return false;
        }
        self.reheat(DEFAULT_REHEAT);
        true
    }

    /// Move a grabbed node, keeping the layout warm while it moves.
    pub fn on_drag(&mut self, id: &str, position: Vec3) -> bool {
        if !self.pin_node(id, position) {
            return false;
        }
        if self.alpha < DRAG_ALPHA_FLOOR {
            self.reheat(DRAG_ALPHA_FLOOR - self.alpha);
        }
        true
    }

    /// Release a grabbed node back to the simulation.
    pub fn on_drag_end(&mut self, id: &str) -> bool {
        self.unpin_node(id)
    }

    /// Override some position components directly and reheat.
    ///
    /// A pinned node's pin moves with it.
    pub fn update_node(&mut self, id: &str, update: PositionUpdate) -> bool {
        let Some(&ix) = self.index.get(id) else {
            return false;
        };
        let planar = self.config.dimensions.is_planar();
        let node = &mut self.graph[ix];
        let mut position = update.apply(node.position);
        if planar {
            position.z = 0.0;
        }
        node.position = position;
        node.velocity = Vec3::ZERO;
        if node.pin.is_some() {
            node.pin = Some(position);
        }
        self.reheat(DEFAULT_REHEAT);
        true
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// True when Barnes-Hut is enabled and the node count exceeds the threshold.
    pub fn is_barnes_hut_active(&self) -> bool {
        self.config.use_barnes_hut && self.graph.node_count() > self.config.barnes_hut_threshold
    }

    /// Advance one step with the configured time step.
    pub fn tick(&mut self) -> bool {
        self.tick_with_delta(self.config.time_step)
    }

    /// Advance one step of `dt` seconds (clamped to [`MAX_TIME_STEP`]).
    ///
    /// Returns whether the simulation is still active. A stopped or empty
    /// simulation returns false without stepping.
    pub fn tick_with_delta(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        if self.graph.node_count() == 0 {
            self.running = false;
            return false;
        }

        let dt = if dt.is_finite() && dt > 0.0 {
            dt.min(MAX_TIME_STEP)
        } else {
            self.config.time_step
        };

        let slots: Vec<NodeIndex> = self.graph.node_indices().collect();
        let mut slot_of = vec![usize::MAX; self.graph.node_bound()];
        for (slot, ix) in slots.iter().enumerate() {
            slot_of[ix.index()] = slot;
        }
        let positions: Vec<Vec3> = slots.iter().map(|&ix| self.graph[ix].position).collect();
        let masses: Vec<f32> = slots.iter().map(|&ix| self.graph[ix].mass).collect();
        let mut accumulated = vec![Vec3::ZERO; slots.len()];

        let config = &self.config;
        let planar = config.dimensions.is_planar();

        let barnes_hut = self.is_barnes_hut_active();
        if barnes_hut != self.barnes_hut_was_active {
            debug!(
                "Barnes-Hut {} at {} nodes",
                if barnes_hut { "enabled" } else { "disabled" },
                slots.len()
            );
            self.barnes_hut_was_active = barnes_hut;
        }
        if barnes_hut {
            forces::apply_barnes_hut_repulsion(
                &positions,
                &masses,
                config.barnes_hut_theta,
                config.repulsion_strength,
                planar,
                &mut accumulated,
            );
        } else {
            forces::apply_pairwise_repulsion(
                &positions,
                &masses,
                config.repulsion_strength,
                &mut accumulated,
            );
        }

        let springs: Vec<(usize, usize)> = self
            .graph
            .edge_references()
            .map(|e| (slot_of[e.source().index()], slot_of[e.target().index()]))
            .collect();
        forces::apply_springs(
            &positions,
            &springs,
            config.ideal_edge_length,
            config.attraction_strength,
            &mut accumulated,
        );
        forces::apply_center_gravity(&positions, config.center_gravity, &mut accumulated);

        let alpha = self.alpha;
        let damping = config.damping;
        let speed_cap = config.max_velocity * alpha;
        let mut total_movement = 0.0f32;
        let mut free_nodes = 0usize;

        for (slot, &ix) in slots.iter().enumerate() {
            let node = &mut self.graph[ix];
            node.force = accumulated[slot];

            if let Some(pin) = node.pin {
                node.position = pin;
                node.velocity = Vec3::ZERO;
                continue;
            }

            let mut velocity = node.velocity + node.force * (alpha / node.mass * dt);
            velocity *= damping;
            velocity = velocity.clamp_length(speed_cap);
            if planar {
                velocity.z = 0.0;
            }

            let step = velocity * dt;
            node.velocity = velocity;
            node.position += step;
            total_movement += step.length();
            free_nodes += 1;
        }

        self.alpha = match self.config.alpha_decay {
            Some(decay) => (alpha - decay).clamp(0.0, 1.0),
            None => (alpha * self.config.cooling_rate).clamp(0.0, 1.0),
        };
        self.iteration += 1;
        self.last_movement = if free_nodes > 0 {
            total_movement / free_nodes as f32
        } else {
            0.0
        };
        trace!(
            "tick {}: alpha {:.4}, mean movement {:.4}",
            self.iteration, self.alpha, self.last_movement
        );

        if self.alpha < self.config.min_alpha {
            self.running = false;
            debug!("simulation cooled after {} iterations", self.iteration);
            return false;
        }

        if self.config.adaptive_cooling && self.last_movement < self.config.movement_threshold {
            self.running = false;
            debug!(
                "simulation converged after {} iterations (mean movement {:.5})",
                self.iteration, self.last_movement
            );
            return false;
        }

        true
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Average displacement of free nodes during the last tick.
    pub fn last_movement(&self) -> f32 {
        self.last_movement
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges whose endpoints both exist.
    pub fn active_edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, id: &str) -> Option<&SimNode> {
        self.index.get(id).map(|&ix| &self.graph[ix])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SimNode> {
        self.graph.node_weights()
    }

    /// Node ids in slot order (the order of `positions_buffer`).
    pub fn node_ids(&self) -> Vec<String> {
        self.graph.node_weights().map(|n| n.id.clone()).collect()
    }

    /// Copy of the current positions, keyed by node id.
    pub fn positions(&self) -> PositionMap {
        self.graph
            .node_weights()
            .map(|n| (n.id.clone(), n.position))
            .collect()
    }

    /// Interleaved `[x0, y0, z0, x1, y1, z1, ...]` in `node_ids` order.
    pub fn positions_buffer(&self) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(self.graph.node_count() * 3);
        for node in self.graph.node_weights() {
            buffer.extend_from_slice(&node.position.to_array());
        }
        buffer
    }

    pub fn bounds(&self) -> Option<Bounds3> {
        Bounds3::from_points(self.graph.node_weights().map(|n| n.position))
    }
}

impl Default for ForceSimulation {
    fn default() -> Self {
        Self::with_defaults()
    }
}
