// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Separating-axis tests for boxes against planes and triangles.
//!
//! The triangle test is the 13-axis test from Akenine-Möller's "Fast 3D
//! Triangle-Box Overlap Testing", in the arrangement given by Ericson's
//! *Real-Time Collision Detection*. Boxes are described by center and half
//! extent; the triangle is moved into box-local coordinates first. Axes are
//! tried in a fixed order and the first separating one ends the test:
//!
//! 1. the nine cross products `e_i × f_j` of box face normals and triangle edges,
//! 2. the three box face normals,
//! 3. the triangle face normal.
//!
//! An axis that degenerates to the zero vector (zero-length edge, collinear
//! vertices) projects everything onto `0` and never separates.

use glam::Vec3;

use crate::triangle::Triangle;
use crate::types::Aabb;

/// An infinite plane `dot(normal, x) = d`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    /// Plane normal. Need not be unit length.
    pub normal: Vec3,
    /// Plane offset along `normal`.
    pub d: f32,
}

impl Plane {
    /// Create a plane from a normal and offset.
    pub const fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// The plane with the given normal passing through `point`.
    pub fn through(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            d: normal.dot(point),
        }
    }

    /// The supporting plane of a triangle.
    pub fn from_triangle(t: &Triangle) -> Self {
        Self::through(t.normal(), t.a)
    }
}

/// Whether a box overlaps an infinite plane.
///
/// The box projects onto the plane normal as `[-r, r]` around the center's
/// signed distance `s`; they overlap iff `|s| <= r`.
pub fn box_intersects_plane(center: Vec3, half_extent: Vec3, normal: Vec3, d: f32) -> bool {
    let radius = half_extent.dot(normal.abs());
    let s = normal.dot(center) - d;
    -radius <= s && s <= radius
}

/// Whether a box overlaps the triangle `a, b, c`.
pub fn box_intersects_triangle(center: Vec3, half_extent: Vec3, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let v = [a - center, b - center, c - center];
    let edges = [v[1] - v[0], v[2] - v[1], v[0] - v[2]];

    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        for edge in edges {
            if separates(v, axis.cross(edge), half_extent) {
                return false;
            }
        }
    }

    for axis in 0..3 {
        let lo = v[0][axis].min(v[1][axis]).min(v[2][axis]);
        let hi = v[0][axis].max(v[1][axis]).max(v[2][axis]);
        if hi < -half_extent[axis] || lo > half_extent[axis] {
            return false;
        }
    }

    // Box center is the local origin.
    let normal = edges[0].cross(edges[1]);
    box_intersects_plane(Vec3::ZERO, half_extent, normal, normal.dot(v[0]))
}

/// [`box_intersects_plane`] for an [`Aabb`] and [`Plane`].
pub fn aabb_intersects_plane(aabb: &Aabb, plane: &Plane) -> bool {
    box_intersects_plane(aabb.center(), aabb.half_extent(), plane.normal, plane.d)
}

/// [`box_intersects_triangle`] for an [`Aabb`] and [`Triangle`].
pub fn aabb_intersects_triangle(aabb: &Aabb, t: &Triangle) -> bool {
    box_intersects_triangle(aabb.center(), aabb.half_extent(), t.a, t.b, t.c)
}

fn separates(v: [Vec3; 3], axis: Vec3, half_extent: Vec3) -> bool {
    let p0 = v[0].dot(axis);
    let p1 = v[1].dot(axis);
    let p2 = v[2].dot(axis);
    let r = half_extent.dot(axis.abs());
    p0.min(p1).min(p2) > r || p0.max(p1).max(p2) < -r
}
