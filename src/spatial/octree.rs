//! Barnes-Hut octree for approximate n-body repulsion.
//!
//! Space is recursively split into 8 octants (4 quadrants in planar mode).
//! Every tree node stores the total mass and center of mass of the bodies in
//! its subtree, so a distant cluster can be evaluated as a single point mass.
//!
//! The tree is rebuilt from scratch every simulation tick: construction is
//! O(n log n) and force queries are O(log n) per body for well-spread points.
//! Once built, the tree is only read, so queries may run from any number of
//! readers.

use crate::geometry::{Bounds3, Vec3};

/// Deepest level a body may be pushed to. Bodies that still collide at this
/// depth are merged into a single aggregate resident.
pub const MAX_DEPTH: u32 = 32;

/// Separation below which two bodies exert no force on each other.
pub const MIN_DISTANCE: f32 = 1e-3;

/// Minimum padding added around the enclosing box of the bodies.
const BOUNDS_MARGIN: f32 = 1.0;

const ROOT: usize = 0;

/// A point mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub mass: f32,
}

impl Body {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self { position, mass }
    }
}

#[derive(Debug)]
struct OctreeNode {
    bounds: Bounds3,
    center_of_mass: Vec3,
    total_mass: f32,
    /// Indices into `Octree::nodes`.
    children: [Option<usize>; 8],
    /// Resident body (leaves only).
    body: Option<Body>,
    depth: u32,
}

impl OctreeNode {
    fn new(bounds: Bounds3, depth: u32) -> Self {
        Self {
            bounds,
            center_of_mass: bounds.center(),
            total_mass: 0.0,
            children: [None; 8],
            body: None,
            depth,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Fold a body into the running mass-weighted average.
    fn accumulate(&mut self, position: Vec3, mass: f32) {
        let total = self.total_mass + mass;
        if self.total_mass <= 0.0 {
            self.center_of_mass = position;
        } else {
            self.center_of_mass = (self.center_of_mass * self.total_mass + position * mass) / total;
        }
        self.total_mass = total;
    }
}

/// Barnes-Hut spatial partition over a set of point masses.
#[derive(Debug)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    planar: bool,
}

impl Octree {
    /// Create an empty tree covering `bounds`.
    ///
    /// With `planar` set the tree splits only along x and y (a quadtree).
    pub fn new(bounds: Bounds3, planar: bool) -> Self {
        Self {
            nodes: vec![OctreeNode::new(bounds, 0)],
            planar,
        }
    }

    /// Build a tree over `bodies`, sized to their enclosing cube plus a margin.
    pub fn build(bodies: &[Body], planar: bool) -> Self {
        let bounds = Bounds3::from_points(bodies.iter().map(|b| b.position))
            .map(|b| {
                let margin = (b.size() * 0.01).max(BOUNDS_MARGIN);
                b.cubed(planar).expanded(margin)
            })
            .unwrap_or_else(|| Bounds3::new(Vec3::ZERO, Vec3::ZERO));

        let mut tree = Self::new(bounds, planar);
        for body in bodies {
            tree.insert(body.position, body.mass);
        }
        tree
    }

    /// Insert a body, subdividing occupied leaves as needed.
    ///
    /// Every node on the insertion path has its aggregate mass and center of
    /// mass updated. Non-finite positions and non-positive masses are ignored.
    pub fn insert(&mut self, position: Vec3, mass: f32) {
        if !position.is_finite() || !(mass > 0.0) {
            return;
        }

        let mut current = ROOT;
        loop {
            self.nodes[current].accumulate(position, mass);

            if self.nodes[current].is_leaf() {
                let Some(existing) = self.nodes[current].body else {
                    self.nodes[current].body = Some(Body::new(position, mass));
                    return;
                };

                if self.nodes[current].depth >= MAX_DEPTH {
                    let node = &mut self.nodes[current];
                    node.body = Some(Body::new(node.center_of_mass, node.total_mass));
                    return;
                }

                // Subdivide: push the resident down before placing the new body.
                self.nodes[current].body = None;
                let child = self.child_for(current, existing.position);
                self.nodes[child].accumulate(existing.position, existing.mass);
                self.nodes[child].body = Some(existing);
            }

            current = self.child_for(current, position);
        }
    }

    /// Child of `parent` containing `position`, created on demand.
    fn child_for(&mut self, parent: usize, position: Vec3) -> usize {
        let octant = self.nodes[parent].bounds.octant(position, self.planar);
        if let Some(child) = self.nodes[parent].children[octant] {
            return child;
        }

        let bounds = self.nodes[parent].bounds.child(octant, self.planar);
        let depth = self.nodes[parent].depth + 1;
        let index = self.nodes.len();
        self.nodes.push(OctreeNode::new(bounds, depth));
        self.nodes[parent].children[octant] = Some(index);
        index
    }

    /// Repulsive field at `query` due to every body in the tree.
    ///
    /// A node is treated as a single point mass when it is a leaf or when
    /// `region_size / distance < theta`; otherwise its children are visited.
    /// Each accepted node contributes `strength * total_mass / distance²`
    /// directed away from its center of mass. Contributions closer than
    /// [`MIN_DISTANCE`] are dropped, which also excludes the query body itself.
    ///
    /// The result is per unit mass of the query body.
    pub fn calculate_force(&self, query: Vec3, theta: f32, strength: f32) -> Vec3 {
        let mut force = Vec3::ZERO;
        let mut stack = vec![ROOT];

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if node.total_mass <= 0.0 {
                continue;
            }

            let delta = query - node.center_of_mass;
            let distance = delta.length();

            if node.is_leaf() || node.bounds.size() / distance < theta {
                if distance < MIN_DISTANCE {
                    continue;
                }
                let magnitude = strength * node.total_mass / (distance * distance);
                force += delta * (magnitude / distance);
            } else {
                stack.extend(node.children.iter().flatten().copied());
            }
        }

        force
    }

    pub fn bounds(&self) -> Bounds3 {
        self.nodes[ROOT].bounds
    }

    pub fn total_mass(&self) -> f32 {
        self.nodes[ROOT].total_mass
    }

    pub fn center_of_mass(&self) -> Vec3 {
        self.nodes[ROOT].center_of_mass
    }

    /// Number of tree nodes (internal and leaf).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves currently holding a body.
    pub fn occupied_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.body.is_some()).count()
    }

    pub fn is_planar(&self) -> bool {
        self.planar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct_force(bodies: &[Body], query: Vec3, strength: f32) -> Vec3 {
        let mut force = Vec3::ZERO;
        for body in bodies {
            let delta = query - body.position;
            let distance = delta.length();
            if distance < MIN_DISTANCE {
                continue;
            }
            force += delta * (strength * body.mass / (distance * distance * distance));
        }
        force
    }

    fn sample_bodies() -> Vec<Body> {
        vec![
            Body::new(Vec3::new(0.0, 0.0, 0.0), 1.0),
            Body::new(Vec3::new(10.0, 0.0, 0.0), 2.0),
            Body::new(Vec3::new(0.0, 10.0, 5.0), 1.0),
            Body::new(Vec3::new(-7.0, 3.0, -2.0), 3.0),
            Body::new(Vec3::new(4.0, -8.0, 1.0), 1.5),
        ]
    }

    #[test]
    fn test_aggregate_mass_and_center() {
        let bodies = sample_bodies();
        let tree = Octree::build(&bodies, false);

        let total: f32 = bodies.iter().map(|b| b.mass).sum();
        let weighted = bodies
            .iter()
            .fold(Vec3::ZERO, |acc, b| acc + b.position * b.mass)
            / total;

        assert!((tree.total_mass() - total).abs() < 1e-4);
        assert!(
            tree.center_of_mass().distance(weighted) < 1e-3,
            "Root center of mass {:?} should match weighted mean {:?}",
            tree.center_of_mass(),
            weighted
        );
    }

    #[test]
    fn test_each_body_gets_own_leaf() {
        let bodies = sample_bodies();
        let tree = Octree::build(&bodies, false);

        assert_eq!(tree.occupied_leaves(), bodies.len());
        assert!(tree.node_count() > bodies.len(), "Tree should have subdivided");
        for body in &bodies {
            assert!(tree.bounds().contains(body.position));
        }
    }

    #[test]
    fn test_theta_zero_matches_direct_sum() {
        let bodies = sample_bodies();
        let tree = Octree::build(&bodies, false);
        let query = Vec3::new(2.0, 2.0, 2.0);

        let approx = tree.calculate_force(query, 0.0, 100.0);
        let exact = direct_force(&bodies, query, 100.0);

        assert!(
            approx.distance(exact) < 1e-3 * exact.length().max(1.0),
            "theta = 0 should be exact: {approx:?} vs {exact:?}"
        );
    }

    #[test]
    fn test_far_cluster_is_approximated_closely() {
        let mut bodies = Vec::new();
        for i in 0..20 {
            let t = i as f32;
            bodies.push(Body::new(Vec3::new(100.0 + t.sin(), t.cos(), (t * 0.5).sin()), 1.0));
        }
        let tree = Octree::build(&bodies, false);
        let query = Vec3::new(-200.0, 0.0, 0.0);

        let approx = tree.calculate_force(query, 0.9, 1000.0);
        let exact = direct_force(&bodies, query, 1000.0);

        let relative_error = approx.distance(exact) / exact.length();
        assert!(relative_error < 0.01, "Relative error too large: {relative_error}");
        assert!(approx.x < 0.0, "Force should push the query away from the cluster");
    }

    #[test]
    fn test_self_interaction_is_zero() {
        let tree = Octree::build(&[Body::new(Vec3::new(3.0, 4.0, 5.0), 1.0)], false);
        assert_eq!(tree.calculate_force(Vec3::new(3.0, 4.0, 5.0), 0.5, 100.0), Vec3::ZERO);
    }

    #[test]
    fn test_coincident_bodies_terminate() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let bodies = vec![Body::new(p, 1.0), Body::new(p, 1.0), Body::new(p, 1.0)];
        let tree = Octree::build(&bodies, false);

        assert!((tree.total_mass() - 3.0).abs() < 1e-6);
        assert_eq!(tree.occupied_leaves(), 1, "Coincident bodies merge into one leaf");
        assert!(tree.node_count() as u32 <= MAX_DEPTH + 1);
    }

    #[test]
    fn test_planar_tree_uses_quadrants() {
        let bodies: Vec<Body> = (0..16)
            .map(|i| Body::new(Vec3::new((i % 4) as f32 * 5.0, (i / 4) as f32 * 5.0, 0.0), 1.0))
            .collect();
        let tree = Octree::build(&bodies, true);

        assert!(tree.is_planar());
        for node in &tree.nodes {
            assert!(
                node.children[4..].iter().all(Option::is_none),
                "Planar tree should never populate z octants"
            );
        }
        assert_eq!(tree.occupied_leaves(), 16);
    }

    #[test]
    fn test_invalid_bodies_ignored() {
        let mut tree = Octree::new(
            Bounds3::new(Vec3::new(-10.0, -10.0, -10.0), Vec3::new(10.0, 10.0, 10.0)),
            false,
        );
        tree.insert(Vec3::new(f32::NAN, 0.0, 0.0), 1.0);
        tree.insert(Vec3::new(1.0, 0.0, 0.0), 0.0);
        tree.insert(Vec3::new(1.0, 0.0, 0.0), -1.0);

        assert_eq!(tree.total_mass(), 0.0);
        assert_eq!(tree.calculate_force(Vec3::ZERO, 0.5, 100.0), Vec3::ZERO);
    }

    #[test]
    fn test_empty_tree() {
        let tree = Octree::build(&[], false);
        assert_eq!(tree.total_mass(), 0.0);
        assert_eq!(tree.calculate_force(Vec3::new(1.0, 2.0, 3.0), 0.8, 100.0), Vec3::ZERO);
    }
}
