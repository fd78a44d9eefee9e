// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_octree --heading-base-level=0

//! Understory Octree: a 3D octree over points and triangles.
//!
//! Understory Octree is a building block for spatial lookups in 3D scenes.
//!
//! - Insert points and triangles. The root grows to cover geometry outside it.
//! - Query the geometry stored in the leaf containing a point.
//! - Query every distinct geometry in the leaves a triangle or box overlaps.
//! - Test triangles against boxes with a separating axis test ([`sat`]).
//!
//! Coordinates are [`glam::Vec3`]. Subdivision is lazy: a node only splits into
//! its eight children when an insertion passes through it, and stops at a fixed
//! maximum depth (5 by default). Geometry that straddles a dividing plane is
//! stored in every leaf it touches and reported once per query.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use understory_octree::{Octree, Triangle};
//!
//! let mut tree = Octree::with_bounds(Vec3::splat(-1.0), Vec3::splat(1.0))
//!     .unwrap()
//!     .with_max_depth(1)
//!     .unwrap();
//! let p = tree.insert(Vec3::splat(0.5)).unwrap();
//!
//! // The leaf holding the point is found from any position in it.
//! let hits: Vec<_> = tree.query_point(Vec3::new(0.25, 0.75, 0.5)).collect();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].0, p);
//!
//! // Other octants are empty.
//! assert_eq!(tree.query_point(Vec3::splat(-0.5)).count(), 0);
//!
//! // Inserting outside the root grows it.
//! tree.insert(Triangle::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::Y))
//!     .unwrap();
//! assert_eq!(tree.bounds().max, Vec3::new(3.0, 1.0, 1.0));
//! assert_eq!(tree.all().count(), 2);
//! ```
//!
//! ## Growth and containment
//!
//! Growing the root rebuilds the tree, re-inserting everything stored. Give the
//! tree bounds up front with [`Octree::with_bounds`] when the extent is known.
//! Whether a triangle "fits" is controlled by [`Containment`]: the default
//! [`Containment::Strict`] keeps every stored shape inside the root, while
//! [`Containment::AnyVertex`] only grows when no vertex lies inside.
//!
//! ### Float semantics
//!
//! Non-finite coordinates are rejected with [`OctreeError`]. Boundaries are
//! inclusive: a point on a dividing plane belongs to the lower child, and a
//! triangle touching a face of a box intersects it.
//!
//! ### Features
//!
//! - `std` (default): forwards `std` to `glam`, `thiserror`, and `tracing`.
//! - `libm`: `no_std` float math through `glam/libm`.
//! - `serde`: `Serialize`/`Deserialize` for geometry, handles, and options.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod error;
pub mod node;
pub mod octant;
pub mod octree;
pub mod options;
pub mod sat;
pub mod shape;
pub mod triangle;
pub mod types;

pub use error::OctreeError;
pub use node::OctreeNode;
pub use octant::{Octant, Octants};
pub use octree::{GeometryId, Octree, OctreeGeneric};
pub use options::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, OctreeOptions};
pub use shape::{Containment, Geometry, Shape};
pub use triangle::Triangle;
pub use types::Aabb;

pub use glam;
