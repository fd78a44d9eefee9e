// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_octree::glam::Vec3;
use understory_octree::{Aabb, Octree, Triangle};

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

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }
    fn next_vec3(&mut self, extent: f32) -> Vec3 {
        Vec3::new(self.next_f32(), self.next_f32(), self.next_f32()) * extent
    }
}

fn gen_random_triangles(count: usize, extent: f32, size: f32) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let a = rng.next_vec3(extent - size);
        let b = a + rng.next_vec3(size);
        let c = a + rng.next_vec3(size);
        out.push(Triangle::new(a, b, c));
    }
    out
}

fn bench_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("points");
    for &n in &[8usize, 16, 32] {
        let points = gen_grid_points(n, 10.0);
        let extent = (n - 1) as f32 * 10.0;
        group.throughput(Throughput::Elements((n * n * n) as u64));

        group.bench_function(format!("presized_insert_query_n{}", n), |b| {
            b.iter_batched(
                || Octree::with_bounds(Vec3::ZERO, Vec3::splat(extent)).unwrap(),
                |mut tree| {
                    for p in points.iter().copied() {
                        let _ = tree.insert(p);
                    }
                    let hits: usize = tree.query_point(Vec3::splat(extent * 0.5)).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        // Every insertion outside the root triggers a rebuild.
        group.bench_function(format!("growing_insert_n{}", n), |b| {
            b.iter_batched(
                Octree::new,
                |mut tree| {
                    for p in points.iter().copied() {
                        let _ = tree.insert(p);
                    }
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangles");
    let triangles = gen_random_triangles(4096, 1000.0, 12.0);
    let probe = Triangle::new(
        Vec3::new(400.0, 400.0, 400.0),
        Vec3::new(600.0, 400.0, 500.0),
        Vec3::new(400.0, 600.0, 600.0),
    );
    group.throughput(Throughput::Elements(triangles.len() as u64));

    for &depth in &[3usize, 5, 7] {
        group.bench_function(format!("insert_query_triangle_depth{}", depth), |b| {
            b.iter_batched(
                || {
                    Octree::with_bounds(Vec3::ZERO, Vec3::splat(1000.0))
                        .unwrap()
                        .with_max_depth(depth)
                        .unwrap()
                },
                |mut tree| {
                    for t in triangles.iter().copied() {
                        let _ = tree.insert(t);
                    }
                    let hits: usize = tree.query_triangle(&probe).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }

    let mut tree = Octree::with_bounds(Vec3::ZERO, Vec3::splat(1000.0)).unwrap();
    for t in triangles.iter().copied() {
        let _ = tree.insert(t);
    }
    group.bench_function("query_box", |b| {
        let query = Aabb::new(Vec3::splat(300.0), Vec3::splat(500.0));
        b.iter(|| black_box(tree.query_box(&query).count()));
    });
    group.bench_function("query_point", |b| {
        b.iter(|| black_box(tree.query_point(Vec3::splat(512.0)).count()));
    });
    group.finish();
}

criterion_group!(benches, bench_points, bench_triangles);
criterion_main!(benches);
