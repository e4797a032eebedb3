//! Benchmark comparison between `ArrayContainer`, `BTreeSet<u16>` and a
//! sorted `Vec<u16>`, plus the two merge kernels against each other

use core::hint::black_box;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use smol_container::{
    ArrayContainer, Strategy,
    kernel::{Scalar, Wide},
};
use std::collections::BTreeSet;

// Up to the usual array/bitmap switch-over point of 4096 values and past it
const SIZES: &[usize] = &[16, 128, 1024, 4096, 16384];

fn values(size: usize, step: usize) -> Vec<u16> {
    (0..size)
        .map(|i| (i * step % 65536) as u16)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let input = values(size, 3);

        group.bench_with_input(BenchmarkId::new("ArrayContainer", size), &input, |b, input| {
            b.iter(|| {
                let container: ArrayContainer = input.iter().copied().collect();
                black_box(container);
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &input, |b, input| {
            b.iter(|| {
                let set: BTreeSet<u16> = input.iter().copied().collect();
                black_box(set);
            });
        });
    }

    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains");

    for &size in SIZES {
        group.throughput(Throughput::Elements(256));
        let input = values(size, 3);
        let container: ArrayContainer = input.iter().copied().collect();
        let set: BTreeSet<u16> = input.iter().copied().collect();
        let probes: Vec<u16> = (0..256u16).map(|i| i.wrapping_mul(251)).collect();

        group.bench_with_input(BenchmarkId::new("ArrayContainer", size), &probes, |b, probes| {
            b.iter(|| probes.iter().filter(|&&p| container.contains(p)).count());
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &probes, |b, probes| {
            b.iter(|| probes.iter().filter(|&&p| set.contains(&p)).count());
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &probes, |b, probes| {
            b.iter(|| probes.iter().filter(|p| input.binary_search(p).is_ok()).count());
        });
    }

    group.finish();
}

fn bench_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("union");

    for &size in SIZES {
        group.throughput(Throughput::Elements(2 * size as u64));
        let (a, b) = (values(size, 3), values(size, 5));
        let (ca, cb): (ArrayContainer, ArrayContainer) =
            (a.iter().copied().collect(), b.iter().copied().collect());
        let (sa, sb): (BTreeSet<u16>, BTreeSet<u16>) =
            (a.iter().copied().collect(), b.iter().copied().collect());
        let mut out = ArrayContainer::with_capacity(2 * size);

        group.bench_function(BenchmarkId::new("Scalar", size), |bench| {
            bench.iter(|| {
                ca.union_into_with::<Scalar>(&cb, &mut out).unwrap();
                black_box(out.len());
            });
        });

        group.bench_function(BenchmarkId::new("Wide", size), |bench| {
            bench.iter(|| {
                ca.union_into_with::<Wide>(&cb, &mut out).unwrap();
                black_box(out.len());
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", size), |bench| {
            bench.iter(|| black_box(sa.union(&sb).count()));
        });
    }

    group.finish();
}

fn bench_intersection(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersection");

    for &size in SIZES {
        group.throughput(Throughput::Elements(2 * size as u64));
        let (a, b) = (values(size, 3), values(size, 5));
        let (ca, cb): (ArrayContainer, ArrayContainer) =
            (a.iter().copied().collect(), b.iter().copied().collect());
        let (sa, sb): (BTreeSet<u16>, BTreeSet<u16>) =
            (a.iter().copied().collect(), b.iter().copied().collect());
        let mut out = ArrayContainer::with_capacity(size);

        group.bench_function(BenchmarkId::new("Scalar", size), |bench| {
            bench.iter(|| {
                ca.intersection_into_with::<Scalar>(&cb, &mut out, Strategy::Balanced)
                    .unwrap();
                black_box(out.len());
            });
        });

        group.bench_function(BenchmarkId::new("Wide", size), |bench| {
            bench.iter(|| {
                ca.intersection_into_with::<Wide>(&cb, &mut out, Strategy::Balanced)
                    .unwrap();
                black_box(out.len());
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", size), |bench| {
            bench.iter(|| black_box(sa.intersection(&sb).count()));
        });
    }

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let input = values(size, 3);
        let container: ArrayContainer = input.iter().copied().collect();
        let set: BTreeSet<u16> = input.iter().copied().collect();

        group.bench_with_input(
            BenchmarkId::new("ArrayContainer", size),
            &container,
            |b, container| {
                b.iter(|| black_box(container.iter().map(u32::from).sum::<u32>()));
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &set, |b, set| {
            b.iter(|| black_box(set.iter().copied().map(u32::from).sum::<u32>()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_contains,
    bench_union,
    bench_intersection,
    bench_iteration,
);
criterion_main!(benches);
