// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by [`Octree`](crate::Octree) operations.

use glam::Vec3;

/// Errors returned by [`Octree`](crate::Octree) construction and insertion.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OctreeError {
    /// A bounding box corner has a non-finite coordinate.
    #[error("invalid bounds: min {min} / max {max} must be finite")]
    InvalidBounds {
        /// Requested minimum corner.
        min: Vec3,
        /// Requested maximum corner.
        max: Vec3,
    },
    /// Inserted geometry has a non-finite coordinate.
    #[error("geometry with non-finite coordinates cannot be indexed")]
    NonFiniteGeometry,
    /// The requested maximum depth is above [`MAX_DEPTH_LIMIT`](crate::MAX_DEPTH_LIMIT).
    #[error("max depth {0} exceeds the supported limit of {limit}", limit = crate::MAX_DEPTH_LIMIT)]
    InvalidMaxDepth(usize),
    /// Every 32-bit geometry handle is in use.
    #[error("geometry capacity exceeded: at most 2^32 geometries can be stored")]
    CapacityExceeded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_problem() {
        let e = OctreeError::InvalidBounds {
            min: Vec3::new(f32::NAN, 0.0, 0.0),
            max: Vec3::ONE,
        };
        assert!(e.to_string().starts_with("invalid bounds"));
        assert_eq!(
            OctreeError::InvalidMaxDepth(40).to_string(),
            "max depth 40 exceeds the supported limit of 16"
        );
        assert!(OctreeError::CapacityExceeded.to_string().contains("2^32"));
    }
}
