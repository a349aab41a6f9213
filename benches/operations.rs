//! Benchmarks of the main `BiMap` operations on maps of shuffled pairs.

#![allow(missing_docs)]

use std::hint::black_box;

use bitreap::BiMap;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// utility for constructing a map of `n` pairs `i -> n - i` inserted in
/// shuffled order
fn build_map(n: u32) -> BiMap<u32, u32> {
	let mut keys: Vec<u32> = (0..n).collect();
	keys.shuffle(&mut StdRng::seed_from_u64(n.into()));
	keys.into_iter().map(|key| (key, n - key)).collect()
}

fn bench_insert(c: &mut Criterion) {
	let mut group = c.benchmark_group("insert");
	for size in [1_000, 10_000, 100_000] {
		group.bench_with_input(
			BenchmarkId::from_parameter(size),
			&size,
			|b, &size| b.iter(|| build_map(black_box(size))),
		);
	}
	group.finish();
}

fn bench_lookup(c: &mut Criterion) {
	let map = build_map(10_000);
	c.bench_function("at_left", |b| {
		b.iter(|| {
			for key in (0..10_000).step_by(7) {
				black_box(map.at_left(&key).ok());
			}
		})
	});
	c.bench_function("at_right", |b| {
		b.iter(|| {
			for key in (1..=10_000).step_by(7) {
				black_box(map.at_right(&key).ok());
			}
		})
	});
	c.bench_function("lower_bound_left", |b| {
		b.iter(|| black_box(map.lower_bound_left(black_box(&5_000))))
	});
}

fn bench_iter(c: &mut Criterion) {
	let map = build_map(10_000);
	c.bench_function("iter", |b| b.iter(|| map.iter().count()));
	c.bench_function("iter_right", |b| b.iter(|| map.iter_right().count()));
	c.bench_function("prev_from_end", |b| {
		b.iter(|| map.prev(black_box(map.end_right())))
	});
}

fn bench_erase(c: &mut Criterion) {
	let map = build_map(10_000);
	c.bench_function("erase_left_key", |b| {
		b.iter(|| {
			let mut map = map.clone();
			for key in (0..10_000).step_by(3) {
				map.erase_left_key(&key);
			}
			map
		})
	});
	c.bench_function("erase_right_range", |b| {
		b.iter(|| {
			let mut map = map.clone();
			let first = map.lower_bound_right(&2_500);
			let last = map.lower_bound_right(&7_500);
			map.erase_right_range(first, last);
			map
		})
	});
}

criterion_group!(benches, bench_insert, bench_lookup, bench_iter, bench_erase);
criterion_main!(benches);
