//! Hierarchical placement graph.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Parents own
//! their child lists; children keep an optional parent handle for upward
//! walks, so there is no ownership cycle. Every rotation in the graph is
//! about the vertical (Y) axis, which keeps world-space composition simple.

mod compose;

use std::collections::{HashMap, HashSet};

use bevy::math::{DQuat, DVec3};

use crate::types::SimulationError;

pub use compose::{SceneConfig, compose};

/// Handle to a node in a [`PlacementGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Visual sub-parts attached to a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decoration {
    Rings,
    Label,
    Glow,
}

/// What a node represents; checked explicitly during the picking walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// The scene root, i.e. the Sun's reference frame.
    Root,
    /// A celestial body, tagged with its registry name.
    Body(String),
    /// Invisible node whose rotation revolves a satellite.
    Pivot,
    Decoration(Decoration),
}

/// Pickable geometry, expressed in the node's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { radius: f64 },
    /// Flat ring in the local XZ plane.
    Annulus { inner: f64, outer: f64 },
    /// Camera-facing rectangle centered on the node.
    Billboard { width: f64, height: f64 },
}

/// Mutable transform state of a node. The only part of the graph the
/// kinematics engine touches.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    /// Position relative to the parent node.
    pub position: DVec3,
    /// Accumulated rotation about the vertical axis, in radians.
    pub rotation_y: f64,
    /// Elapsed simulated time of the last tick that advanced the rotation.
    pub last_tick: f64,
}

impl Placement {
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlacementNode {
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub placement: Placement,
    pub shape: Option<Shape>,
    pub visible: bool,
}

impl PlacementNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Registry name if this node is tagged as a body.
    pub fn body_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Body(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// A flat ring tracing a body's orbit around the star, or around the host
/// planet for a satellite.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitRing {
    /// Body whose orbit this ring traces.
    pub body: String,
    /// Center-line radius in display units.
    pub radius: f64,
    pub half_width: f64,
    pub visible: bool,
}

/// Arena of placement nodes plus the lookup tables built during composition.
#[derive(Clone, Debug)]
pub struct PlacementGraph {
    nodes: Vec<PlacementNode>,
    bodies: HashMap<String, NodeId>,
    orbit_rings: Vec<OrbitRing>,
}

impl Default for PlacementGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementGraph {
    /// An empty graph holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![PlacementNode {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
                placement: Placement::default(),
                shape: None,
                visible: true,
            }],
            bodies: HashMap::new(),
            orbit_rings: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &PlacementNode {
        &self.nodes[id.0]
    }

    /// Mutable access to a node's transform. Structure stays read-only.
    pub fn placement_mut(&mut self, id: NodeId) -> &mut Placement {
        &mut self.nodes[id.0].placement
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &PlacementNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Node tagged with body `name`.
    pub fn body_node(&self, name: &str) -> Result<NodeId, SimulationError> {
        self.bodies
            .get(name)
            .copied()
            .ok_or_else(|| SimulationError::NotFound(name.to_string()))
    }

    /// The pivot a satellite hangs from, if `name` is a satellite.
    pub fn pivot_of(&self, name: &str) -> Result<Option<NodeId>, SimulationError> {
        let node = self.body_node(name)?;
        Ok(self
            .parent(node)
            .filter(|&p| self.node(p).kind == NodeKind::Pivot))
    }

    /// Ancestors of `id`, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.parent(id),
        }
    }

    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// `id` and everything below it, depth first.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Every node reachable from a registered body, each listed once.
    pub fn body_subtrees(&self) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut roots: Vec<NodeId> = self.bodies.values().copied().collect();
        roots.sort();
        roots
            .into_iter()
            .flat_map(|root| self.subtree(root))
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Sum of Y rotations from the root down to and including `id`.
    pub fn world_rotation_y(&self, id: NodeId) -> f64 {
        self.node(id).placement.rotation_y
            + self
                .ancestors(id)
                .map(|a| self.node(a).placement.rotation_y)
                .sum::<f64>()
    }

    /// Position of `id` in the root frame.
    pub fn world_position(&self, id: NodeId) -> DVec3 {
        let node = self.node(id);
        match node.parent {
            None => node.placement.position,
            Some(parent) => {
                let rotation = DQuat::from_rotation_y(self.world_rotation_y(parent));
                self.world_position(parent) + rotation * node.placement.position
            }
        }
    }

    /// Whether `id` and all its ancestors are visible.
    pub fn is_effectively_visible(&self, id: NodeId) -> bool {
        self.node(id).visible && self.ancestors(id).all(|a| self.node(a).visible)
    }

    pub fn orbit_rings(&self) -> &[OrbitRing] {
        &self.orbit_rings
    }

    /// World-space center of an orbit ring: the satellite's pivot, else the origin.
    pub fn orbit_center(&self, ring: &OrbitRing) -> DVec3 {
        match self.pivot_of(&ring.body) {
            Ok(Some(pivot)) => self.world_position(pivot),
            _ => DVec3::ZERO,
        }
    }

    pub fn set_orbits_visible(&mut self, visible: bool) {
        for ring in &mut self.orbit_rings {
            ring.visible = visible;
        }
    }

    /// Show or hide every label node. Hidden labels are neither drawn nor
    /// pickable.
    pub fn set_labels_visible(&mut self, visible: bool) {
        for node in &mut self.nodes {
            if node.kind == NodeKind::Decoration(Decoration::Label) {
                node.visible = visible;
            }
        }
    }

    fn add_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        placement: Placement,
        shape: Option<Shape>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let NodeKind::Body(name) = &kind {
            self.bodies.insert(name.clone(), id);
        }
        self.nodes.push(PlacementNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            placement,
            shape,
            visible: true,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn add_orbit_ring(&mut self, ring: OrbitRing) {
        self.orbit_rings.push(ring);
    }
}

/// Iterator over a node's ancestors.
pub struct Ancestors<'a> {
    graph: &'a PlacementGraph,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.graph.parent(current);
        Some(current)
    }
}
