//! Arena-allocated landmark tree.
//!
//! Nodes are addressed by opaque `NodeId` indices, so parent/child links are
//! plain indices rather than shared references. Structural identity is the
//! id; comparing positions is an explicit geometric query on the tree.

use crate::geom::{Offset, Point};

pub mod assemble;

/// Opaque index of a node inside a `PartTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Returns the arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Node {
    position: Point,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    offset: Option<Offset>,
}

/// Rooted tree of landmark nodes with integer parent-relative offsets.
#[derive(Clone, Debug)]
pub struct PartTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl PartTree {
    pub(crate) fn with_positions(positions: &[Point], root: usize) -> Self {
        debug_assert!(root < positions.len());
        let nodes = positions
            .iter()
            .map(|&position| Node {
                position,
                parent: None,
                children: Vec::new(),
                offset: None,
            })
            .collect();
        Self {
            nodes,
            root: NodeId(root as u32),
        }
    }

    pub(crate) fn attach(&mut self, child: NodeId, parent: NodeId) {
        debug_assert!(self.nodes[child.index()].parent.is_none());
        debug_assert_ne!(child, parent);
        let offset = self.nodes[child.index()].position - self.nodes[parent.index()].position;
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[child.index()].offset = Some(offset);
        self.nodes[parent.index()].children.push(child);
    }

    /// Returns the root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the tree holds no nodes. Never the case for trees
    /// produced by the assembler.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all node ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    /// Returns the fixed raster position of a node.
    pub fn position(&self, id: NodeId) -> Point {
        self.nodes[id.index()].position
    }

    /// Returns the parent of a node, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Returns the children of a node in attachment order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Returns the offset of a node relative to its parent, or `None` for
    /// the root.
    pub fn offset(&self, id: NodeId) -> Option<Offset> {
        self.nodes[id.index()].offset
    }

    /// Post-order traversal (children before parents) using an explicit
    /// stack, so arbitrarily deep trees never exhaust the call stack.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, usize)> = vec![(self.root, 0)];
        while let Some((id, next_child)) = stack.pop() {
            let children = self.children(id);
            if next_child < children.len() {
                stack.push((id, next_child + 1));
                stack.push((children[next_child], 0));
            } else {
                order.push(id);
            }
        }
        order
    }
}
