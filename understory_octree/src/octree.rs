// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Octree` API and generic implementation over the stored geometry.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt::Debug;

use glam::Vec3;
use tracing::{debug, trace, warn};

use crate::error::OctreeError;
use crate::node::OctreeNode;
use crate::options::OctreeOptions;
use crate::shape::{Geometry, Shape};
use crate::triangle::Triangle;
use crate::types::Aabb;

/// Handle for stored geometry.
///
/// Handles are issued in insertion order and stay valid until [`OctreeGeneric::clear`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryId(u32);

impl GeometryId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Only called with indices of stored entries, which `insert` keeps within `u32`."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// Position of the geometry in insertion order.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// An octree over geometry of type `G`.
///
/// Geometry is owned by the tree and referenced from leaves by [`GeometryId`].
/// Geometry that spans several leaves is stored once and referenced from each.
pub struct OctreeGeneric<G: Shape> {
    root: OctreeNode,
    entries: Vec<G>,
    options: OctreeOptions,
}

impl<G: Shape> Default for OctreeGeneric<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Shape> OctreeGeneric<G> {
    /// Create an empty tree whose root is the degenerate box at the origin.
    pub fn new() -> Self {
        Self {
            root: OctreeNode::new(Aabb::ZERO, 0),
            entries: Vec::new(),
            options: OctreeOptions::default(),
        }
    }

    /// Create an empty tree with the given root corners, in any order.
    pub fn with_bounds(a: Vec3, b: Vec3) -> Result<Self, OctreeError> {
        // Check before normalizing: `Vec3::min`/`max` drop NaN lanes.
        if !a.is_finite() || !b.is_finite() {
            return Err(OctreeError::InvalidBounds { min: a, max: b });
        }
        let bounds = Aabb::new(a, b);
        Ok(Self {
            root: OctreeNode::new(bounds, 0),
            ..Self::new()
        })
    }

    /// Replace the maximum depth, rebuilding any stored geometry.
    pub fn with_max_depth(self, max_depth: usize) -> Result<Self, OctreeError> {
        let options = self.options.with_max_depth(max_depth);
        self.with_options(options)
    }

    /// Replace all options, rebuilding any stored geometry.
    pub fn with_options(mut self, options: OctreeOptions) -> Result<Self, OctreeError> {
        self.set_options(options)?;
        Ok(self)
    }

    /// Replace all options in place.
    ///
    /// The tree is rebuilt under the new maximum depth if it holds geometry.
    /// On error nothing changes.
    pub fn set_options(&mut self, options: OctreeOptions) -> Result<(), OctreeError> {
        options.validate()?;
        let rebuild = options.max_depth != self.options.max_depth && !self.entries.is_empty();
        self.options = options;
        if rebuild {
            self.rebuild(*self.root.bounds());
        }
        Ok(())
    }

    /// Current options.
    pub fn options(&self) -> &OctreeOptions {
        &self.options
    }

    /// Maximum node depth.
    pub fn max_depth(&self) -> usize {
        self.options.max_depth
    }

    /// The root node, for inspection.
    pub fn root(&self) -> &OctreeNode {
        &self.root
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Depth of the deepest existing node. A tree that never split has depth `0`.
    pub fn depth(&self) -> usize {
        self.root.height()
    }

    /// The leaf that contains `p`, or `None` if `p` is outside the root.
    pub fn query_point_node(&self, p: Vec3) -> Option<&OctreeNode> {
        self.root.query_node(p)
    }

    /// Every leaf reached by `shape`.
    pub fn query_nodes<S: Shape + ?Sized>(&self, shape: &S) -> Vec<&OctreeNode> {
        self.root.query_nodes(shape)
    }

    /// Current root bounds.
    pub fn bounds(&self) -> Aabb {
        *self.root.bounds()
    }

    /// Number of stored geometries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no geometry is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reserve space for at least `n` more geometries.
    pub fn reserve(&mut self, n: usize) {
        self.entries.reserve(n);
    }

    /// The stored geometry for a handle.
    pub fn get(&self, id: GeometryId) -> Option<&G> {
        self.entries.get(id.index())
    }

    /// Drop all geometry and children. The root keeps its bounds.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.root = OctreeNode::new(self.bounds(), 0);
    }

    /// Insert geometry, growing the root first if it does not fit.
    ///
    /// Growth rebuilds the tree: every stored geometry is re-inserted under a
    /// root enlarged to cover the new geometry. Its cost is proportional to
    /// the amount of stored geometry, so pre-size the root with
    /// [`OctreeGeneric::with_bounds`] when the extent is known.
    ///
    /// Handles are 32-bit: once `u32::MAX + 1` geometries are stored, further
    /// inserts fail with [`OctreeError::CapacityExceeded`].
    pub fn insert(&mut self, geometry: impl Into<G>) -> Result<GeometryId, OctreeError> {
        let geometry = geometry.into();
        if !geometry.is_finite() {
            warn!("rejecting geometry with non-finite coordinates");
            return Err(OctreeError::NonFiniteGeometry);
        }
        let Ok(index) = u32::try_from(self.entries.len()) else {
            warn!(len = self.entries.len(), "geometry handles exhausted");
            return Err(OctreeError::CapacityExceeded);
        };
        let id = GeometryId(index);
        let fits = geometry.is_within(self.root.bounds(), self.options.containment);
        self.entries.push(geometry);
        if fits {
            let stored = self
                .root
                .insert(id, &self.entries[id.index()], self.options.max_depth);
            debug_assert!(stored, "geometry within the root must reach a leaf");
        } else {
            self.grow(id);
        }
        trace!(id = id.index(), "inserted geometry");
        Ok(id)
    }

    /// Insert every geometry from `iter`, stopping at the first error.
    pub fn extend<I>(&mut self, iter: I) -> Result<Vec<GeometryId>, OctreeError>
    where
        I: IntoIterator,
        I::Item: Into<G>,
    {
        iter.into_iter().map(|g| self.insert(g)).collect()
    }

    /// Geometry stored in the leaf that contains `p`.
    ///
    /// Empty if `p` is outside the root or its leaf holds nothing.
    pub fn query_point(&self, p: Vec3) -> impl Iterator<Item = (GeometryId, &G)> + '_ {
        let ids = self
            .query_point_node(p)
            .map(OctreeNode::items)
            .unwrap_or_default();
        let mut out = Vec::with_capacity(ids.len());
        for &id in ids {
            out.push((id, &self.entries[id.index()]));
        }
        out.into_iter()
    }

    /// Distinct geometry from every leaf the triangle overlaps.
    pub fn query_triangle<'a>(
        &'a self,
        t: &Triangle,
    ) -> impl Iterator<Item = (GeometryId, &'a G)> + use<'a, G> {
        self.query_shape(t)
    }

    /// Distinct geometry from every leaf the box overlaps.
    pub fn query_box<'a>(
        &'a self,
        aabb: &Aabb,
    ) -> impl Iterator<Item = (GeometryId, &'a G)> + use<'a, G> {
        self.query_shape(aabb)
    }

    /// Distinct geometry from every leaf reached by `shape`, in handle order.
    ///
    /// The iterator borrows the tree only, not `shape`.
    pub fn query_shape<'a, S: Shape + ?Sized>(
        &'a self,
        shape: &S,
    ) -> impl Iterator<Item = (GeometryId, &'a G)> + use<'a, G, S> {
        let mut ids = BTreeSet::new();
        for leaf in self.root.query_nodes(shape) {
            ids.extend(leaf.items().iter().copied());
        }
        self.resolve(ids)
    }

    /// Every distinct geometry reachable from the root, in handle order.
    pub fn all(&self) -> impl Iterator<Item = (GeometryId, &G)> + '_ {
        let mut ids = BTreeSet::new();
        self.root.collect_ids(&mut ids);
        self.resolve(ids)
    }

    fn resolve(&self, ids: BTreeSet<GeometryId>) -> impl Iterator<Item = (GeometryId, &G)> + '_ {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(g) = self.entries.get(id.index()) {
                out.push((id, g));
            }
        }
        out.into_iter()
    }

    /// Enlarge the root to cover `new` and re-insert everything.
    fn grow(&mut self, new: GeometryId) {
        let old = self.bounds();
        let bounds = old.union(&self.entries[new.index()].bounding_box());
        debug!(?old, ?bounds, stored = self.entries.len() - 1, "growing octree root");
        self.rebuild(bounds);
    }

    /// Reset the tree to a single root with `bounds` and re-insert every stored
    /// geometry: those reachable from the current root plus any not yet placed.
    fn rebuild(&mut self, bounds: Aabb) {
        let mut ids = BTreeSet::new();
        self.root.collect_ids(&mut ids);
        // Only the geometry being inserted can be missing from the tree.
        if let Some(last) = self.entries.len().checked_sub(1) {
            ids.insert(GeometryId::new(last));
        }
        self.root = OctreeNode::new(bounds, 0);
        for id in ids {
            let stored = self
                .root
                .insert(id, &self.entries[id.index()], self.options.max_depth);
            debug_assert!(stored, "rebuilt root must cover stored geometry");
        }
    }
}

impl<G: Shape> Debug for OctreeGeneric<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Octree")
            .field("bounds", self.root.bounds())
            .field("options", &self.options)
            .field("len", &self.entries.len())
            .field("nodes", &self.root.node_count())
            .finish_non_exhaustive()
    }
}

/// Default octree storing points and triangles.
pub type Octree = OctreeGeneric<Geometry>;
