// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry capability trait used by the tree.

use glam::Vec3;

use crate::octant::{Octant, Octants};
use crate::sat;
use crate::triangle::Triangle;
use crate::types::Aabb;

/// How the index decides whether a shape already fits inside its root box.
///
/// The answer only matters for growth: a shape that does not fit makes the
/// index enlarge its bounds and rebuild before inserting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Containment {
    /// The whole bounding box of the shape must be inside.
    ///
    /// After any insertion the root encloses every stored shape.
    #[default]
    Strict,
    /// A triangle counts as inside if any one of its vertices is inside.
    ///
    /// Triangles that cross the root without a vertex in it, or that stick
    /// out of it, do not trigger growth; the parts outside the root are not
    /// reachable by queries. Other shapes behave as in [`Containment::Strict`].
    AnyVertex,
}

/// Geometry that can be stored in and queried against an octree.
///
/// Node logic is written once against this trait: insertion and queries
/// descend into the children reported by [`Shape::octants`] and stop at
/// nodes that [`Shape::intersects_box`] rejects.
pub trait Shape {
    /// Smallest AABB enclosing the shape.
    fn bounding_box(&self) -> Aabb;

    /// Whether the shape overlaps the box.
    fn intersects_box(&self, aabb: &Aabb) -> bool;

    /// Whether the shape fits inside `aabb` for growth purposes.
    fn is_within(&self, aabb: &Aabb, containment: Containment) -> bool {
        let _ = containment;
        aabb.contains_box(&self.bounding_box())
    }

    /// The children of a node with box `aabb` that the shape descends into.
    ///
    /// Defaults to every octant that [`Shape::intersects_box`] accepts, so a
    /// shape straddling a dividing plane reaches all the children it touches.
    fn octants(&self, aabb: &Aabb) -> Octants {
        Octants::from_fn(|o| self.intersects_box(&aabb.octant(o)))
    }

    /// Whether every coordinate of the shape is finite.
    fn is_finite(&self) -> bool {
        self.bounding_box().is_finite()
    }
}

/// Points descend into exactly one child, ties going to the low side.
impl Shape for Vec3 {
    fn bounding_box(&self) -> Aabb {
        Aabb::from_point(*self)
    }

    fn intersects_box(&self, aabb: &Aabb) -> bool {
        aabb.contains_point(*self)
    }

    fn octants(&self, aabb: &Aabb) -> Octants {
        Octants::from(Octant::containing(aabb.center(), *self))
    }

    fn is_finite(&self) -> bool {
        Vec3::is_finite(*self)
    }
}

/// Relative slack applied to boxes when routing triangles.
const ROUTING_SLACK: f32 = 16.0 * f32::EPSILON;

impl Shape for Triangle {
    fn bounding_box(&self) -> Aabb {
        Self::bounding_box(self)
    }

    /// Exact up to a few ulps of the largest coordinate involved.
    ///
    /// The slack keeps rounding in the box-local SAT from rejecting a triangle
    /// that lies on a face shared by two children, so it reaches both.
    fn intersects_box(&self, aabb: &Aabb) -> bool {
        let scale = aabb.max_abs().max(Self::bounding_box(self).max_abs());
        sat::aabb_intersects_triangle(&aabb.inflate(scale * ROUTING_SLACK), self)
    }

    fn is_within(&self, aabb: &Aabb, containment: Containment) -> bool {
        match containment {
            Containment::Strict => self.vertices().into_iter().all(|v| aabb.contains_point(v)),
            Containment::AnyVertex => self.vertices().into_iter().any(|v| aabb.contains_point(v)),
        }
    }

    fn is_finite(&self) -> bool {
        Self::is_finite(self)
    }
}

/// Boxes are query shapes for overlap queries.
impl Shape for Aabb {
    fn bounding_box(&self) -> Aabb {
        *self
    }

    fn intersects_box(&self, aabb: &Aabb) -> bool {
        self.overlaps(aabb)
    }
}

/// Stored geometry: either a point or a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    /// A single point.
    Point(Vec3),
    /// A triangle.
    Triangle(Triangle),
}

impl Geometry {
    /// The point, if this is one.
    pub fn as_point(&self) -> Option<Vec3> {
        match self {
            Self::Point(p) => Some(*p),
            Self::Triangle(_) => None,
        }
    }

    /// The triangle, if this is one.
    pub fn as_triangle(&self) -> Option<&Triangle> {
        match self {
            Self::Point(_) => None,
            Self::Triangle(t) => Some(t),
        }
    }
}

impl From<Vec3> for Geometry {
    fn from(p: Vec3) -> Self {
        Self::Point(p)
    }
}

impl From<Triangle> for Geometry {
    fn from(t: Triangle) -> Self {
        Self::Triangle(t)
    }
}

impl Shape for Geometry {
    fn bounding_box(&self) -> Aabb {
        match self {
            Self::Point(p) => p.bounding_box(),
            Self::Triangle(t) => Shape::bounding_box(t),
        }
    }

    fn intersects_box(&self, aabb: &Aabb) -> bool {
        match self {
            Self::Point(p) => p.intersects_box(aabb),
            Self::Triangle(t) => t.intersects_box(aabb),
        }
    }

    fn is_within(&self, aabb: &Aabb, containment: Containment) -> bool {
        match self {
            Self::Point(p) => p.is_within(aabb, containment),
            Self::Triangle(t) => t.is_within(aabb, containment),
        }
    }

    fn octants(&self, aabb: &Aabb) -> Octants {
        match self {
            Self::Point(p) => p.octants(aabb),
            Self::Triangle(t) => t.octants(aabb),
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            Self::Point(p) => Shape::is_finite(p),
            Self::Triangle(t) => Shape::is_finite(t),
        }
    }
}
