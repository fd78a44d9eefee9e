// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes.

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use glam::Vec3;
use tracing::trace;

use crate::octant::{Octant, Octants};
use crate::octree::GeometryId;
use crate::shape::Shape;
use crate::types::Aabb;

/// A node of the octree.
///
/// A node either has no children, in which case it is a leaf and holds the
/// handles of the geometry stored in it, or exactly eight children indexed by
/// [`Octant`]. Children are created together the first time an insertion
/// passes through a node above the maximum depth.
#[derive(Clone, Debug)]
pub struct OctreeNode {
    bounds: Aabb,
    depth: usize,
    children: Option<Box<[Self; 8]>>,
    items: Vec<GeometryId>,
}

impl OctreeNode {
    pub(crate) fn new(bounds: Aabb, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            children: None,
            items: Vec::new(),
        }
    }

    /// Bounds of this node.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Depth of this node. The root is at depth `0`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The eight children, if the node has been split.
    pub fn children(&self) -> Option<&[Self; 8]> {
        self.children.as_deref()
    }

    /// The child in `octant`, if the node has been split.
    pub fn child(&self, octant: Octant) -> Option<&Self> {
        self.children().map(|c| &c[octant.index()])
    }

    /// Handles of the geometry stored directly in this node.
    pub fn items(&self) -> &[GeometryId] {
        &self.items
    }

    /// Whether the node's box contains the point.
    pub fn contains(&self, p: Vec3) -> bool {
        self.bounds.contains_point(p)
    }

    /// The deepest existing node on the path to `p`, or `None` if `p` is outside.
    ///
    /// The result is a leaf: either one holding geometry at the maximum depth,
    /// or an unsplit node that would receive `p` if it were inserted.
    pub fn query_node(&self, p: Vec3) -> Option<&Self> {
        if !self.contains(p) {
            return None;
        }
        match self.children() {
            Some(children) => {
                let o = Octant::containing(self.bounds.center(), p);
                children[o.index()].query_node(p)
            }
            None => Some(self),
        }
    }

    /// Every leaf reached by `shape`, pruning subtrees it does not overlap.
    pub fn query_nodes<S: Shape + ?Sized>(&self, shape: &S) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_nodes(shape, &mut out);
        out
    }

    /// Number of leaves below and including this node.
    pub fn leaf_count(&self) -> usize {
        match self.children() {
            Some(children) => children.iter().map(Self::leaf_count).sum(),
            None => 1,
        }
    }

    /// Number of levels below this node along its deepest path.
    pub fn height(&self) -> usize {
        self.children()
            .map_or(0, |c| 1 + c.iter().map(Self::height).max().unwrap_or(0))
    }

    /// Number of nodes below and including this node.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |c| c.iter().map(Self::node_count).sum())
    }

    /// Store `id` in every leaf that `shape` reaches. Returns false if the shape
    /// misses this node entirely, in which case nothing changes.
    pub(crate) fn insert<S: Shape + ?Sized>(
        &mut self,
        id: GeometryId,
        shape: &S,
        max_depth: usize,
    ) -> bool {
        if !shape.intersects_box(&self.bounds) {
            return false;
        }
        self.insert_accepted(id, shape, max_depth);
        true
    }

    fn insert_accepted<S: Shape + ?Sized>(&mut self, id: GeometryId, shape: &S, max_depth: usize) {
        if self.depth >= max_depth {
            self.items.push(id);
            return;
        }
        let octants = self.route(shape);
        let children = self.split();
        for o in octants.octants() {
            children[o.index()].insert_accepted(id, shape, max_depth);
        }
    }

    /// Children of this node that an accepted `shape` descends into.
    ///
    /// Never empty: if rounding makes every child reject a shape this node
    /// accepted, the children overlapping its bounding box are used instead.
    fn route<S: Shape + ?Sized>(&self, shape: &S) -> Octants {
        let octants = shape.octants(&self.bounds);
        if !octants.is_empty() {
            return octants;
        }
        let bbox = shape.bounding_box();
        trace!(depth = self.depth, "routing by bounding box");
        Octants::from_fn(|o| self.bounds.octant(o).overlaps(&bbox))
    }

    /// Add the handles stored anywhere in this subtree to `out`.
    pub(crate) fn collect_ids(&self, out: &mut BTreeSet<GeometryId>) {
        out.extend(self.items.iter().copied());
        if let Some(children) = self.children() {
            for child in children {
                child.collect_ids(out);
            }
        }
    }

    fn collect_nodes<'a, S: Shape + ?Sized>(&'a self, shape: &S, out: &mut Vec<&'a Self>) {
        if shape.intersects_box(&self.bounds) {
            self.collect_accepted(shape, out);
        }
    }

    fn collect_accepted<'a, S: Shape + ?Sized>(&'a self, shape: &S, out: &mut Vec<&'a Self>) {
        match self.children() {
            Some(children) => {
                for o in self.route(shape).octants() {
                    children[o.index()].collect_accepted(shape, out);
                }
            }
            None => out.push(self),
        }
    }

    fn split(&mut self) -> &mut [Self; 8] {
        let bounds = self.bounds;
        let depth = self.depth + 1;
        &mut **self.children.get_or_insert_with(|| {
            trace!(depth, "splitting node");
            Box::new(Octant::ALL.map(|o| Self::new(bounds.octant(o), depth)))
        })
    }
}
