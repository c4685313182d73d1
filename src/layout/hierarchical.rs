//! Sugiyama-style layered layout for DAG-shaped artifact graphs.
//!
//! Requirements trace down to tasks, tests and documents, so the structured
//! views of the viewer want a top-down (or left-right) ranking rather than a
//! force layout. The pipeline has three phases, each usable on its own:
//!
//! 1. **Layer assignment:** longest-path ranking from the root set, so every
//!    edge of an acyclic graph points to a strictly later layer.
//! 2. **Crossing minimization:** barycenter reordering with alternating
//!    forward and backward sweeps until the order stops changing.
//! 3. **Coordinate assignment:** nodes are packed along the cross axis of
//!    their layer, centered on zero, with layers `levelSeparation` apart.
//!
//! The whole computation is a pure function of its inputs.

use log::{Level, debug, log_enabled};
use petgraph::Direction::{Incoming, Outgoing};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Deserialize;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::geometry::Vec2;
use crate::graph::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, EdgeInput, LayoutPositions, NodeInput};
use crate::simulation::config::clamp;

/// Sweep cap for crossing minimization.
pub const MAX_CROSSING_ITERATIONS: usize = 10;

/// Flow direction of the layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Direction {
    /// Top to bottom: layers grow along +y.
    #[default]
    TB,
    /// Bottom to top: layers grow along -y.
    BT,
    /// Left to right: layers grow along +x.
    LR,
    /// Right to left: layers grow along -x.
    RL,
}

impl Direction {
    /// True when layers are stacked along y, so nodes in a layer spread along x.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::TB | Direction::BT)
    }

    fn place(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Direction::TB => Vec2::new(cross, main),
            Direction::BT => Vec2::new(cross, -main),
            Direction::LR => Vec2::new(main, cross),
            Direction::RL => Vec2::new(-main, cross),
        }
    }
}

/// Configuration for the layered layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HierarchicalConfig {
    pub direction: Direction,
    /// Distance between consecutive layers along the main axis.
    pub level_separation: f32,
    /// Gap between neighbouring nodes within a layer.
    pub node_separation: f32,
    /// Accepted for host compatibility; placement does not read it.
    pub tree_spacing: f32,
}

impl Default for HierarchicalConfig {
    fn default() -> Self {
        Self {
            direction: Direction::TB,
            level_separation: 100.0,
            node_separation: 50.0,
            tree_spacing: 200.0,
        }
    }
}

impl HierarchicalConfig {
    /// Copy with negative or non-finite spacings replaced.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            direction: self.direction,
            level_separation: clamp(
                "levelSeparation",
                self.level_separation,
                0.0,
                f32::MAX,
                d.level_separation,
            ),
            node_separation: clamp(
                "nodeSeparation",
                self.node_separation,
                0.0,
                f32::MAX,
                d.node_separation,
            ),
            tree_spacing: clamp("treeSpacing", self.tree_spacing, 0.0, f32::MAX, d.tree_spacing),
        }
    }
}

/// The layered layout engine.
pub struct HierarchicalLayout {
    config: HierarchicalConfig,
}

impl HierarchicalLayout {
    pub fn new(config: HierarchicalConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(HierarchicalConfig::default())
    }

    pub fn config(&self) -> &HierarchicalConfig {
        &self.config
    }

    /// Run all three phases and return a position per node id.
    ///
    /// Edges naming unknown ids are ignored. An empty node list yields an
    /// empty map.
    pub fn calculate_layout(&self, nodes: &[NodeInput], edges: &[EdgeInput]) -> LayoutPositions {
        if nodes.is_empty() {
            return LayoutPositions::new();
        }

        let layer_of = assign_layers(nodes, edges);
        let layers = group_layers(nodes, &layer_of);
        let ordered = minimize_crossings(&layers, edges);

        if log_enabled!(Level::Debug) {
            debug!(
                "hierarchical layout: {} nodes in {} layers, crossings {} -> {}",
                layer_of.len(),
                ordered.len(),
                count_crossings(&layers, edges),
                count_crossings(&ordered, edges)
            );
        }

        assign_coordinates(&ordered, nodes, &self.config)
    }
}

impl Default for HierarchicalLayout {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Convenience wrapper around [`HierarchicalLayout::calculate_layout`].
pub fn calculate_layout(
    nodes: &[NodeInput],
    edges: &[EdgeInput],
    config: &HierarchicalConfig,
) -> LayoutPositions {
    HierarchicalLayout::new(config.clone()).calculate_layout(nodes, edges)
}

// =============================================================================
// Phase 1: layer assignment
// =============================================================================

/// Longest-path layer index per node id.
///
/// Roots are the nodes without incoming edges; a graph with none (every node
/// on a cycle) falls back to the nodes of minimum in-degree. A depth-first
/// walk from the roots marks back edges, which are left out of the ranking,
/// so only the target of a back edge can sit on a shallower layer than its
/// source. Nodes not reachable from a root stay on layer 0.
pub fn assign_layers(nodes: &[NodeInput], edges: &[EdgeInput]) -> HashMap<String, usize> {
    let mut graph: DiGraph<&str, ()> = DiGraph::with_capacity(nodes.len(), edges.len());
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if !index.contains_key(node.id.as_str()) {
            index.insert(node.id.as_str(), graph.add_node(node.id.as_str()));
        }
    }
    for edge in edges {
        if edge.is_self_loop() {
            continue;
        }
        if let (Some(&source), Some(&target)) =
            (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
        {
            graph.add_edge(source, target, ());
        }
    }

    let in_degree: Vec<usize> = graph
        .node_indices()
        .map(|ix| graph.neighbors_directed(ix, Incoming).count())
        .collect();
    let min_in_degree = in_degree.iter().copied().min().unwrap_or(0);
    let roots: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|ix| in_degree[ix.index()] == min_in_degree)
        .collect();
    let back_edge = find_back_edges(&graph, &roots);

    let mut layer: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut queue = VecDeque::new();
    for &root in &roots {
        layer[root.index()] = Some(0);
        queue.push_back(root);
    }

    // Without back edges the reachable subgraph is acyclic, so promotion ends.
    while let Some(ix) = queue.pop_front() {
        let Some(current) = layer[ix.index()] else {
            continue;
        };
        for edge in graph.edges_directed(ix, Outgoing) {
            if back_edge[edge.id().index()] {
                continue;
            }
            let next = edge.target();
            let promote = match layer[next.index()] {
                None => true,
                Some(existing) => current + 1 > existing,
            };
            if promote {
                layer[next.index()] = Some(current + 1);
                queue.push_back(next);
            }
        }
    }

    graph
        .node_indices()
        .map(|ix| (graph[ix].to_string(), layer[ix.index()].unwrap_or(0)))
        .collect()
}

/// Mark the edges that close a cycle during a depth-first walk from `roots`.
///
/// Outgoing edges are followed in insertion order, so the result is stable
/// for a given input.
fn find_back_edges(graph: &DiGraph<&str, ()>, roots: &[NodeIndex]) -> Vec<bool> {
    let outgoing = |ix: NodeIndex| -> Vec<(EdgeIndex, NodeIndex)> {
        let mut edges: Vec<_> = graph
            .edges_directed(ix, Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        edges.sort_by_key(|(id, _)| id.index());
        edges
    };

    let mut back_edge = vec![false; graph.edge_count()];
    let mut visited = vec![false; graph.node_count()];
    let mut on_path = vec![false; graph.node_count()];

    for &root in roots {
        if visited[root.index()] {
            continue;
        }
        visited[root.index()] = true;
        on_path[root.index()] = true;
        let mut stack = vec![(root, outgoing(root), 0usize)];

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            let step = top.1.get(top.2).copied();
            top.2 += 1;

            match step {
                Some((edge, target)) => {
                    if on_path[target.index()] {
                        back_edge[edge.index()] = true;
                    } else if !visited[target.index()] {
                        visited[target.index()] = true;
                        on_path[target.index()] = true;
                        stack.push((target, outgoing(target), 0));
                    }
                }
                None => {
                    on_path[node.index()] = false;
                    stack.pop();
                }
            }
        }
    }

    back_edge
}

/// Bucket node ids by layer, keeping input order within each layer.
pub fn group_layers(nodes: &[NodeInput], layer_of: &HashMap<String, usize>) -> Vec<Vec<String>> {
    let depth = layer_of.values().copied().max().map_or(0, |max| max + 1);
    let mut layers = vec![Vec::new(); depth];
    let mut seen = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !seen.insert(node.id.as_str()) {
            continue;
        }
        if let Some(&layer) = layer_of.get(&node.id) {
            layers[layer].push(node.id.clone());
        }
    }
    layers
}

// =============================================================================
// Phase 2: crossing minimization
// =============================================================================

/// Reorder each layer by the barycenter of its neighbours in the adjacent layer.
///
/// A forward sweep orders layers `1..` by their predecessors, a backward
/// sweep orders layers `..n-1` by their successors. Nodes without a
/// neighbour in the reference layer get barycenter 0. Sweeps repeat until a
/// full pass changes nothing or [`MAX_CROSSING_ITERATIONS`] is reached.
pub fn minimize_crossings(layers: &[Vec<String>], edges: &[EdgeInput]) -> Vec<Vec<String>> {
    let mut predecessors: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges.iter().filter(|e| !e.is_self_loop()) {
        predecessors
            .entry(edge.target.as_str())
            .or_default()
            .push(edge.source.as_str());
        successors
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut ordered = layers.to_vec();
    if ordered.len() < 2 {
        return ordered;
    }

    for iteration in 0..MAX_CROSSING_ITERATIONS {
        let mut changed = false;

        for i in 1..ordered.len() {
            let (before, after) = ordered.split_at_mut(i);
            changed |= reorder_by_barycenter(&mut after[0], &before[i - 1], &predecessors);
        }

        for i in (0..ordered.len() - 1).rev() {
            let (head, tail) = ordered.split_at_mut(i + 1);
            changed |= reorder_by_barycenter(&mut head[i], &tail[0], &successors);
        }

        if !changed {
            debug!("crossing minimization settled after {} sweeps", iteration + 1);
            break;
        }
    }

    ordered
}

/// Stable-sort `layer` by barycenter against `reference`. Returns whether
/// the order changed.
fn reorder_by_barycenter(
    layer: &mut Vec<String>,
    reference: &[String],
    neighbors: &HashMap<&str, Vec<&str>>,
) -> bool {
    let position: HashMap<&str, usize> = reference
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let barycenters: Vec<f32> = layer
        .iter()
        .map(|id| {
            let Some(adjacent) = neighbors.get(id.as_str()) else {
                return 0.0;
            };
            let (sum, count) = adjacent
                .iter()
                .filter_map(|n| position.get(n))
                .fold((0usize, 0usize), |(sum, count), &p| (sum + p, count + 1));
            if count == 0 {
                0.0
            } else {
                sum as f32 / count as f32
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..layer.len()).collect();
    order.sort_by(|&a, &b| barycenters[a].total_cmp(&barycenters[b]));

    if order.iter().enumerate().all(|(i, &o)| i == o) {
        return false;
    }
    *layer = order.iter().map(|&o| layer[o].clone()).collect();
    true
}

/// Number of edge crossings between adjacent layers.
///
/// Edges spanning more than one layer, or within a layer, are not counted.
pub fn count_crossings(layers: &[Vec<String>], edges: &[EdgeInput]) -> usize {
    let mut crossings = 0;
    for pair in layers.windows(2) {
        let upper: HashMap<&str, usize> =
            pair[0].iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
        let lower: HashMap<&str, usize> =
            pair[1].iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();

        let segments: Vec<(usize, usize)> = edges
            .iter()
            .filter_map(|e| {
                let (s, t) = (e.source.as_str(), e.target.as_str());
                match (upper.get(s), lower.get(t), upper.get(t), lower.get(s)) {
                    (Some(&u), Some(&l), _, _) => Some((u, l)),
                    (_, _, Some(&u), Some(&l)) => Some((u, l)),
                    _ => None,
                }
            })
            .collect();

        for (i, &(u1, l1)) in segments.iter().enumerate() {
            for &(u2, l2) in &segments[i + 1..] {
                if (u1 < u2 && l1 > l2) || (u1 > u2 && l1 < l2) {
                    crossings += 1;
                }
            }
        }
    }
    crossings
}

// =============================================================================
// Phase 3: coordinate assignment
// =============================================================================

/// Place ordered layers on the plane.
///
/// Each node occupies its cross-axis size (width for `TB`/`BT`, height for
/// `LR`/`RL`) plus `node_separation`, and each layer is centered on zero.
pub fn assign_coordinates(
    layers: &[Vec<String>],
    nodes: &[NodeInput],
    config: &HierarchicalConfig,
) -> LayoutPositions {
    let mut by_id: HashMap<&str, &NodeInput> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        by_id.entry(node.id.as_str()).or_insert(node);
    }
    let vertical = config.direction.is_vertical();
    let cross_size = |id: &str| match by_id.get(id) {
        Some(node) if vertical => node.width_or_default(),
        Some(node) => node.height_or_default(),
        None if vertical => DEFAULT_NODE_WIDTH,
        None => DEFAULT_NODE_HEIGHT,
    };

    let mut positions = LayoutPositions::new();
    for (depth, layer) in layers.iter().enumerate() {
        if layer.is_empty() {
            continue;
        }
        let main = depth as f32 * config.level_separation;

        let sizes: Vec<f32> = layer.iter().map(|id| cross_size(id.as_str())).collect();
        let extent = sizes.iter().sum::<f32>() + config.node_separation * (layer.len() - 1) as f32;

        let mut cursor = -extent / 2.0;
        for (id, size) in layer.iter().zip(&sizes) {
            let cross = cursor + size / 2.0;
            positions.insert(id.clone(), config.direction.place(main, cross));
            cursor += size + config.node_separation;
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(ids: &[&str]) -> Vec<NodeInput> {
        ids.iter().map(|id| NodeInput::new(*id)).collect()
    }

    fn edges(pairs: &[(&str, &str)]) -> Vec<EdgeInput> {
        pairs.iter().map(|&(s, t)| EdgeInput::new(s, t)).collect()
    }

    fn layers(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|id| id.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_no_edges_single_layer() {
        let layer_of = assign_layers(&nodes(&["a", "b", "c"]), &[]);
        assert!(layer_of.values().all(|&l| l == 0));
        assert_eq!(layer_of.len(), 3);
    }

    #[test]
    fn test_chain_layers() {
        let layer_of = assign_layers(&nodes(&["A", "B", "C"]), &edges(&[("A", "B"), ("B", "C")]));
        assert_eq!(layer_of["A"], 0);
        assert_eq!(layer_of["B"], 1);
        assert_eq!(layer_of["C"], 2);
    }

    #[test]
    fn test_diamond_uses_longest_path() {
        let layer_of = assign_layers(
            &nodes(&["A", "B", "C", "D"]),
            &edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]),
        );
        assert_eq!(layer_of["D"], 2);

        // Shortcut edge must not pull D back to layer 1
        let layer_of = assign_layers(
            &nodes(&["A", "B", "C", "D"]),
            &edges(&[("A", "D"), ("A", "B"), ("B", "C"), ("C", "D")]),
        );
        assert_eq!(layer_of["D"], 3, "Longest path wins, not shortest");
    }

    #[test]
    fn test_acyclic_edges_point_forward() {
        let n = nodes(&["r", "a", "b", "c", "d", "e", "f"]);
        let e = edges(&[
            ("r", "a"),
            ("r", "b"),
            ("a", "c"),
            ("b", "c"),
            ("c", "d"),
            ("a", "e"),
            ("e", "f"),
            ("d", "f"),
        ]);
        let layer_of = assign_layers(&n, &e);
        for edge in &e {
            assert!(
                layer_of[&edge.target] > layer_of[&edge.source],
                "{} -> {} should point to a later layer",
                edge.source,
                edge.target
            );
        }
    }

    #[test]
    fn test_cycle_breaks_at_back_edge() {
        let n = nodes(&["a", "b", "c"]);
        let e = edges(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let layer_of = assign_layers(&n, &e);
        assert_eq!(layer_of["a"], 0);
        assert_eq!(layer_of["b"], 1);
        assert_eq!(layer_of["c"], 2);

        let grouped = group_layers(&n, &layer_of);
        assert_eq!(grouped, layers(&[&["a"], &["b"], &["c"]]), "No empty layers");
    }

    #[test]
    fn test_cycle_below_root_keeps_forward_edges() {
        let layer_of = assign_layers(
            &nodes(&["r", "x", "y", "z"]),
            &edges(&[("r", "x"), ("x", "y"), ("y", "z"), ("z", "x")]),
        );
        assert_eq!(layer_of["r"], 0);
        assert_eq!(layer_of["x"], 1);
        assert_eq!(layer_of["y"], 2);
        assert_eq!(layer_of["z"], 3, "Only z -> x points backwards");
    }

    #[test]
    fn test_disconnected_cycle_stays_on_first_layer() {
        let layer_of = assign_layers(
            &nodes(&["root", "child", "p", "q"]),
            &edges(&[("root", "child"), ("p", "q"), ("q", "p")]),
        );
        assert_eq!(layer_of["root"], 0);
        assert_eq!(layer_of["child"], 1);
        assert_eq!(layer_of["p"], 0, "Unreachable from a root");
        assert_eq!(layer_of["q"], 0, "Unreachable from a root");
    }

    #[test]
    fn test_unknown_ids_and_self_loops_ignored() {
        let layer_of = assign_layers(
            &nodes(&["a", "b"]),
            &edges(&[("a", "b"), ("ghost", "a"), ("b", "b"), ("b", "nowhere")]),
        );
        assert_eq!(layer_of["a"], 0);
        assert_eq!(layer_of["b"], 1);
        assert!(!layer_of.contains_key("ghost"));
    }

    #[test]
    fn test_group_layers_keeps_input_order() {
        let n = nodes(&["x", "root", "y"]);
        let layer_of = assign_layers(&n, &edges(&[("root", "y"), ("root", "x")]));
        let grouped = group_layers(&n, &layer_of);
        assert_eq!(grouped, layers(&[&["root"], &["x", "y"]]));
    }

    #[test]
    fn test_minimize_crossings_removes_simple_crossing() {
        let input = layers(&[&["a", "b"], &["c", "d"]]);
        let e = edges(&[("a", "d"), ("b", "c")]);
        assert_eq!(count_crossings(&input, &e), 1);

        let ordered = minimize_crossings(&input, &e);
        assert_eq!(ordered, layers(&[&["a", "b"], &["d", "c"]]));
        assert_eq!(count_crossings(&ordered, &e), 0);
    }

    #[test]
    fn test_minimize_crossings_is_fixpoint() {
        let input = layers(&[&["a", "b", "c"], &["d", "e", "f"], &["g", "h"]]);
        let e = edges(&[
            ("a", "f"),
            ("b", "e"),
            ("c", "d"),
            ("d", "h"),
            ("f", "g"),
        ]);

        let once = minimize_crossings(&input, &e);
        let twice = minimize_crossings(&once, &e);
        assert_eq!(once, twice, "A settled order must not change again");
        assert!(count_crossings(&once, &e) <= count_crossings(&input, &e));
    }

    #[test]
    fn test_nodes_without_neighbors_sort_first() {
        let input = layers(&[&["a", "b"], &["c", "lonely"]]);
        let ordered = minimize_crossings(&input, &edges(&[("b", "c")]));
        assert_eq!(ordered[1], vec!["lonely".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_coordinates_centered_on_zero() {
        let n = vec![
            NodeInput::new("a").sized(100.0, 40.0),
            NodeInput::new("b").sized(100.0, 40.0),
            NodeInput::new("c"),
        ];
        let config = HierarchicalConfig::default();
        let positions = assign_coordinates(&layers(&[&["a", "b"], &["c"]]), &n, &config);

        // (100 + 50) / 2 either side of zero
        assert_eq!(positions["a"], Vec2::new(-75.0, 0.0));
        assert_eq!(positions["b"], Vec2::new(75.0, 0.0));
        assert_eq!(positions["c"], Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_uneven_widths_straddle_zero() {
        let n = vec![
            NodeInput::new("wide").sized(200.0, 10.0),
            NodeInput::new("narrow").sized(20.0, 10.0),
        ];
        let config = HierarchicalConfig {
            node_separation: 10.0,
            ..Default::default()
        };
        let positions = assign_coordinates(&layers(&[&["wide", "narrow"]]), &n, &config);

        // Extent 230: wide spans [-115, 85], narrow spans [95, 115]
        let left = positions["wide"].x - 100.0;
        let right = positions["narrow"].x + 10.0;
        assert!((left + 115.0).abs() < 1e-4);
        assert!((right - 115.0).abs() < 1e-4);
    }

    #[test]
    fn test_directions() {
        let n = nodes(&["a", "b"]);
        let e = edges(&[("a", "b")]);
        let at = |direction| {
            let config = HierarchicalConfig {
                direction,
                ..Default::default()
            };
            calculate_layout(&n, &e, &config)["b"]
        };

        assert_eq!(at(Direction::TB), Vec2::new(0.0, 100.0));
        assert_eq!(at(Direction::BT), Vec2::new(0.0, -100.0));
        assert_eq!(at(Direction::LR), Vec2::new(100.0, 0.0));
        assert_eq!(at(Direction::RL), Vec2::new(-100.0, 0.0));
    }

    #[test]
    fn test_horizontal_uses_height() {
        let n = vec![
            NodeInput::new("r"),
            NodeInput::new("a").sized(500.0, 20.0),
            NodeInput::new("b").sized(500.0, 20.0),
        ];
        let config = HierarchicalConfig {
            direction: Direction::LR,
            node_separation: 10.0,
            ..Default::default()
        };
        let positions = calculate_layout(&n, &edges(&[("r", "a"), ("r", "b")]), &config);
        assert_eq!((positions["b"].y - positions["a"].y).abs(), 30.0);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let n = nodes(&["req", "t1", "t2", "t3", "test1", "test2", "doc"]);
        let e = edges(&[
            ("req", "t1"),
            ("req", "t2"),
            ("req", "t3"),
            ("t3", "test1"),
            ("t1", "test2"),
            ("t2", "test1"),
            ("doc", "t2"),
        ]);
        let layout = HierarchicalLayout::with_defaults();
        let first = layout.calculate_layout(&n, &e);
        for _ in 0..5 {
            assert_eq!(layout.calculate_layout(&n, &e), first);
        }
        assert_eq!(first.len(), n.len());
    }

    #[test]
    fn test_empty_input() {
        assert!(HierarchicalLayout::with_defaults().calculate_layout(&[], &[]).is_empty());
        assert_eq!(count_crossings(&[], &[]), 0);
        assert!(minimize_crossings(&[], &[]).is_empty());
    }

    #[test]
    fn test_config_deserialize_and_sanitize() {
        let config: HierarchicalConfig =
            serde_json::from_str(r#"{"direction": "LR", "levelSeparation": -5}"#).unwrap();
        assert_eq!(config.direction, Direction::LR);
        assert_eq!(config.node_separation, 50.0);

        let layout = HierarchicalLayout::new(config);
        assert_eq!(layout.config().level_separation, 0.0);
    }
}
