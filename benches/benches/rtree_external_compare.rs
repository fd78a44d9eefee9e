// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_octree::glam::Vec3;
use understory_octree::{Aabb, Octree};

use rstar::{AABB, RTree};

fn gen_grid_points(n: usize, cell: f32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                out.push(Vec3::new(x as f32, y as f32, z as f32) * cell);
            }
        }
    }
    out
}

fn to_rstar_points(v: &[Vec3]) -> Vec<[f32; 3]> {
    v.iter().map(|p| p.to_array()).collect()
}

fn bench_rtree_external_compare_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_points");
    for &n in &[16usize, 32] {
        let points = gen_grid_points(n, 10.0);
        let extent = (n - 1) as f32 * 10.0;
        let query = Aabb::new(Vec3::splat(40.0), Vec3::splat(120.0));
        group.throughput(Throughput::Elements((n * n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter_batched(
                || Octree::with_bounds(Vec3::ZERO, Vec3::splat(extent)).unwrap(),
                |mut tree| {
                    for p in points.iter().copied() {
                        let _ = tree.insert(p);
                    }
                    let hits: usize = tree.query_box(&query).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                RTree::<[f32; 3]>::new,
                |mut tree| {
                    for p in points.iter() {
                        tree.insert(p.to_array());
                    }
                    let aabb = AABB::from_corners(query.min.to_array(), query.max.to_array());
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&points),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    let aabb = AABB::from_corners(query.min.to_array(), query.max.to_array());
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_points);
criterion_main!(benches);
