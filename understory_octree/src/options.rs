// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree configuration.

use crate::error::OctreeError;
use crate::shape::Containment;

/// Default subdivision depth.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Largest accepted subdivision depth.
///
/// Each level multiplies the number of nodes along a path by eight, and the
/// recursion depth of every operation equals the maximum depth.
pub const MAX_DEPTH_LIMIT: usize = 16;

/// Options controlling how an [`Octree`](crate::Octree) subdivides and grows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OctreeOptions {
    /// Depth at which nodes stop splitting and store geometry. The root is depth `0`.
    pub max_depth: usize,
    /// Test used to decide whether inserted geometry requires growing the root.
    pub containment: Containment,
}

impl Default for OctreeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            containment: Containment::Strict,
        }
    }
}

impl OctreeOptions {
    /// Set the maximum depth.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the containment test.
    pub const fn with_containment(mut self, containment: Containment) -> Self {
        self.containment = containment;
        self
    }

    /// Check the options against the supported limits.
    pub fn validate(&self) -> Result<(), OctreeError> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(OctreeError::InvalidMaxDepth(self.max_depth));
        }
        Ok(())
    }
}
