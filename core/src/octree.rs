//! The spatial octree. Rebuilt from scratch every integrator step
//! into an arena (`Vec<Node>`, child pointers as indices) rather than a
//! pointer-linked tree — the representation the teacher crate
//! (`barnes_hut::Tree`) already uses, here adapted to incremental
//! per-body insertion instead of bulk octant partitioning, since the
//! θ-criterion force walk needs mass/center-of-mass aggregates that are
//! exact at every node, not just at the leaves.

use glam::DVec3;
use rayon::prelude::*;

use crate::body::Body;
use crate::constants::{EPS_MIN, FORCE_CUTOFF};

#[derive(Debug, Clone, Copy)]
pub(crate) enum NodeKind {
    Empty,
    /// Index into the body slice the tree was built from.
    Leaf(usize),
    /// Child node indices by octant id, `(qx<<2)|(qy<<1)|qz`.
    Internal([Option<usize>; 8]),
}

/// One octree node. A leaf holds exactly one body; an internal node
/// holds up to eight children. `m_total`/`mr_total` are exact sums over
/// the node's subtree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    /// Cubic side length of this node's spatial extent.
    pub size: f64,
    pub m_total: f64,
    pub mr_total: DVec3,
    /// Relative position of the most recently inserted body within this
    /// node's cube, in `[0, 1)^3`. Transient bookkeeping used only while
    /// `Tree::insert` is walking down to place a body; stale immediately
    /// afterward.
    pub(crate) origin_relative: DVec3,
}

impl Node {
    fn empty() -> Self {
        Self {
            kind: NodeKind::Empty,
            size: 0.0,
            m_total: 0.0,
            mr_total: DVec3::ZERO,
            origin_relative: DVec3::ZERO,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.kind, NodeKind::Internal(_))
    }

    pub fn center_of_mass(&self) -> DVec3 {
        self.mr_total / self.m_total
    }
}

/// A root cube: center and nominal side length. Expanded when a body
/// leaves the unit cube, so the tree always covers every body.
#[derive(Debug, Clone, Copy)]
pub struct RootCube {
    pub center: DVec3,
    pub size: f64,
}

impl RootCube {
    /// Nominal unit cube centered at `(0.5, 0.5, 0.5)`.
    pub fn nominal() -> Self {
        Self {
            center: crate::constants::domain_center(),
            size: crate::constants::ROOT_SIZE_NOMINAL,
        }
    }

    /// Centers the root at `(0.5, 0.5, 0.5)` and sizes it to
    /// `max(1.0, 2 * max_i |r_i - center|_inf * (1 + eps))`, so the cube
    /// always contains every body even if one has drifted outside the
    /// nominal unit cube. Returns the fitted cube and whether expansion
    /// beyond nominal actually occurred (used to emit a non-fatal warning).
    pub fn fit(bodies: &[Body]) -> (Self, bool) {
        let center = crate::constants::domain_center();
        let mut max_extent = 0.0_f64;
        for b in bodies {
            let d = (b.r - center).abs();
            max_extent = max_extent.max(d.x).max(d.y).max(d.z);
        }
        let size = (2.0 * max_extent * (1.0 + 1e-12)).max(crate::constants::ROOT_SIZE_NOMINAL);
        let expanded = size > crate::constants::ROOT_SIZE_NOMINAL;
        (Self { center, size }, expanded)
    }
}

/// One per-axis halving step of the octant-selection transform: for each axis, if the local coordinate is `>= 0.5` the bit is 1 and
/// the coordinate is shifted into `[0, 0.5)`; either way the coordinate
/// is then doubled to renormalize into the child's local frame. Applying
/// this the same number of times from the same starting point always
/// produces the same result regardless of which octants were actually
/// visited along the way, which is what lets us recompute a body's
/// local position at any depth from scratch instead of threading it
/// through the recursion.
fn octant_step(v: DVec3) -> (u8, DVec3) {
    let mut bit = [0u8; 3];
    let mut next = v;
    for (axis, b) in bit.iter_mut().enumerate() {
        if next[axis] >= 0.5 {
            *b = 1;
            next[axis] -= 0.5;
        }
        next[axis] *= 2.0;
    }
    let octant = (bit[0] << 2) | (bit[1] << 1) | bit[2];
    (octant, next)
}

/// The octree built over one step's worth of bodies. Read-only once
/// constructed; a fresh `Tree` is built every integrator step.
#[derive(Debug)]
pub struct Tree<'a> {
    bodies: &'a [Body],
    root: RootCube,
    nodes: Vec<Node>,
}

impl<'a> Tree<'a> {
    /// Builds the tree by inserting each body in turn.
    pub fn build(bodies: &'a [Body], root: RootCube) -> Self {
        let mut tree = Self {
            bodies,
            root,
            nodes: vec![Node::empty()],
        };
        for i in 0..bodies.len() {
            tree.insert(0, 0, i);
        }
        tree
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn root_cube(&self) -> RootCube {
        self.root
    }

    fn cube_size_at(&self, depth: u32) -> f64 {
        self.root.size / 2f64.powi(depth as i32)
    }

    /// Body `idx`'s position relative to the current node's cube, in
    /// `[0, 1)^3`, recomputed fresh by replaying `depth` octant-selection
    /// steps from the root (see `octant_step`).
    fn local_rel(&self, idx: usize, depth: u32) -> DVec3 {
        let r = self.bodies[idx].r;
        let mut v = (r - (self.root.center - DVec3::splat(self.root.size / 2.0))) / self.root.size;
        for _ in 0..depth {
            let (_, next) = octant_step(v);
            v = next;
        }
        v
    }

    /// Inserts body `body_idx` into the subtree rooted at `node_idx`,
    /// which sits at `depth` halvings below the root.
    fn insert(&mut self, node_idx: usize, depth: u32, body_idx: usize) {
        let size = self.cube_size_at(depth);
        let was_empty = matches!(self.nodes[node_idx].kind, NodeKind::Empty);

        if !was_empty && size <= EPS_MIN {
            // Size floor: discard the insertion rather than subdivide
            // further. This only ever bites when two bodies sit at (or
            // extremely near) the same point.
            return;
        }

        self.nodes[node_idx].size = size;
        self.nodes[node_idx].origin_relative = self.local_rel(body_idx, depth);

        match self.nodes[node_idx].kind {
            NodeKind::Empty => {
                self.nodes[node_idx].kind = NodeKind::Leaf(body_idx);
            }
            NodeKind::Leaf(existing) => {
                self.nodes[node_idx].kind = NodeKind::Internal([None; 8]);
                self.insert_into_child(node_idx, depth, existing);
                self.insert_into_child(node_idx, depth, body_idx);
            }
            NodeKind::Internal(_) => {
                self.insert_into_child(node_idx, depth, body_idx);
            }
        }

        let b = &self.bodies[body_idx];
        self.nodes[node_idx].m_total += b.m;
        self.nodes[node_idx].mr_total += b.m * b.r;
    }

    fn insert_into_child(&mut self, parent_idx: usize, parent_depth: u32, body_idx: usize) {
        let v = self.local_rel(body_idx, parent_depth);
        let (octant, _) = octant_step(v);

        let existing_child = match self.nodes[parent_idx].kind {
            NodeKind::Internal(children) => children[octant as usize],
            _ => unreachable!("insert_into_child called on a non-internal node"),
        };

        let child_idx = existing_child.unwrap_or_else(|| {
            let idx = self.nodes.len();
            self.nodes.push(Node::empty());
            if let NodeKind::Internal(children) = &mut self.nodes[parent_idx].kind {
                children[octant as usize] = Some(idx);
            }
            idx
        });

        self.insert(child_idx, parent_depth + 1, body_idx);
    }

    /// Gathers the nodes relevant to computing the force on `r_b`: leaves,
    /// and internal nodes whose `size < theta * distance` so they can be
    /// treated as a single point mass under the opening-angle criterion.
    /// Mirrors the teacher crate's `Tree::leaves`, generalized from a
    /// fixed `max_bodies_per_node` cutoff to the theta test proper.
    fn relevant_nodes(&self, r_b: DVec3, theta: f64) -> Vec<usize> {
        let mut result = Vec::new();
        let mut stack = vec![0usize];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            match node.kind {
                NodeKind::Empty => {}
                NodeKind::Leaf(_) => result.push(idx),
                NodeKind::Internal(children) => {
                    let dist = (node.center_of_mass() - r_b).length();
                    if node.size < theta * dist {
                        result.push(idx);
                    } else {
                        for c in children.into_iter().flatten() {
                            stack.push(c);
                        }
                    }
                }
            }
        }
        result
    }

    /// Net gravitational force on body `body_idx` from the whole tree,
    /// under the opening-angle criterion. Bodies may be anywhere in
    /// `bodies`, including not at all (e.g. a hypothetical probe position) as long
    /// as `r_b`/`m_b` are supplied directly; `force_on` is the body-index
    /// convenience wrapper used by the integrator.
    pub fn force_on_point(&self, r_b: DVec3, m_b: f64, theta: f64, g: f64) -> DVec3 {
        self.relevant_nodes(r_b, theta)
            .par_iter()
            .map(|&idx| {
                let node = &self.nodes[idx];
                let (m_src, r_src) = match node.kind {
                    NodeKind::Leaf(b) => (self.bodies[b].m, self.bodies[b].r),
                    NodeKind::Internal(_) => (node.m_total, node.center_of_mass()),
                    NodeKind::Empty => unreachable!("empty nodes are never collected"),
                };
                gravitational_force(g, m_src, r_src, m_b, r_b)
            })
            .reduce(|| DVec3::ZERO, |a, b| a + b)
    }

    pub fn force_on(&self, body_idx: usize, theta: f64, g: f64) -> DVec3 {
        let b = &self.bodies[body_idx];
        self.force_on_point(b.r, b.m, theta, g)
    }
}

/// Force node1 (mass `m1` at `r1`) exerts on node2 (mass `m2` at `r2`).
/// Separations below `FORCE_CUTOFF` return zero rather than diverging.
pub fn gravitational_force(g: f64, m1: f64, r1: DVec3, m2: f64, r2: DVec3) -> DVec3 {
    let d = r1 - r2;
    let dist = d.length();
    if dist < FORCE_CUTOFF {
        return DVec3::ZERO;
    }
    g * m1 * m2 * d / (dist * dist * dist)
}
