// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle primitive with a cached face normal.

use core::hash::{Hash, Hasher};

use glam::Vec3;

use crate::types::Aabb;

/// A triangle given by three vertices in order.
///
/// The face normal is `normalize((a - b) × (b - c))`, computed once at construction.
/// For degenerate triangles (collinear or coincident vertices) the normal is zero.
///
/// Equality and hashing look at the vertices only, in order. `-0.0` and `0.0`
/// compare and hash the same.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub a: Vec3,
    /// Second vertex.
    pub b: Vec3,
    /// Third vertex.
    pub c: Vec3,
    normal: Vec3,
}

impl Triangle {
    /// Create a triangle and compute its face normal.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (a - b).cross(b - c).normalize_or_zero();
        Self { a, b, c, normal }
    }

    /// Unit face normal, or zero for a degenerate triangle.
    pub const fn normal(&self) -> Vec3 {
        self.normal
    }

    /// The vertices as an array.
    pub const fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Smallest AABB enclosing the three vertices.
    pub fn bounding_box(&self) -> Aabb {
        Aabb {
            min: self.a.min(self.b).min(self.c),
            max: self.a.max(self.b).max(self.c),
        }
    }

    /// Whether all vertices have finite coordinates.
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }

    /// Whether the vertices are collinear or coincident.
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b && self.c == other.c
    }
}

// Vertices are assumed NaN-free, as everywhere in this crate.
impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in self.vertices() {
            // Adding zero folds -0.0 into 0.0 so hashing agrees with `==`.
            for c in (v + Vec3::ZERO).to_array() {
                c.to_bits().hash(state);
            }
        }
    }
}
