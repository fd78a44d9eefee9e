// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Octree: insert points and triangles, grow, and query.
//!
//! Run with `RUST_LOG=trace` to see node splits and root growth.

use glam::Vec3;
use understory_octree::{Aabb, Octree, Triangle};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut tree = Octree::with_bounds(Vec3::splat(-1.0), Vec3::splat(1.0))
        .and_then(|t| t.with_max_depth(3))
        .expect("valid bounds and depth");

    let p = tree.insert(Vec3::new(0.5, 0.5, 0.5)).expect("finite point");
    let floor = tree
        .insert(Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ))
        .expect("finite triangle");
    println!("inserted point {p:?} and floor {floor:?}");

    // Query a point on the floor
    let hits: Vec<_> = tree.query_point(Vec3::new(-0.5, -0.5, 0.0)).collect();
    println!("hits at (-0.5,-0.5,0): {hits:?}");

    // Grow the root
    tree.insert(Vec3::new(4.0, 0.0, 0.0)).expect("finite point");
    println!("bounds after growth: {:?}", tree.bounds());

    let hits: Vec<_> = tree
        .query_box(&Aabb::new(Vec3::ZERO, Vec3::ONE))
        .map(|(id, _)| id)
        .collect();
    println!("ids overlapping [0,1]^3: {hits:?}");
    println!("{tree:?}");
}
