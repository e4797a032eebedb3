use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use smol_container::{ArrayContainer, Strategy};
use std::hint::black_box;

fn spread(len: usize, step: usize) -> ArrayContainer {
    (0..len).map(|i| (i * step) as u16).collect()
}

fn bench_point_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_operations");

    // Ascending inserts take the append path
    group.bench_function("add_ascending", |b| {
        b.iter(|| {
            let mut container = ArrayContainer::new();
            for v in 0..4096u16 {
                container.add(black_box(v));
            }
            black_box(container);
        });
    });

    // Descending inserts shift the whole array every time
    group.bench_function("add_descending", |b| {
        b.iter(|| {
            let mut container = ArrayContainer::new();
            for v in (0..4096u16).rev() {
                container.add(black_box(v));
            }
            black_box(container);
        });
    });

    let container = spread(4096, 16);
    group.bench_function("contains", |b| {
        let mut i = 0u16;
        b.iter(|| {
            black_box(container.contains(black_box(i)));
            i = i.wrapping_add(7);
        });
    });

    group.bench_function("add_remove", |b| {
        let mut container = spread(4096, 16);
        let mut i = 0u16;
        b.iter(|| {
            container.add(black_box(i | 1));
            container.remove(black_box(i | 1));
            i = i.wrapping_add(13);
        });
    });

    group.finish();
}

fn bench_set_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_algebra");

    for &len in &[64usize, 1024, 4096] {
        let a = spread(len, 3);
        let b = spread(len, 5);
        let mut out = ArrayContainer::with_capacity(2 * len);

        group.bench_with_input(BenchmarkId::new("union_into", len), &len, |bench, _| {
            bench.iter(|| {
                a.union_into(black_box(&b), &mut out).unwrap();
                black_box(out.len());
            });
        });

        group.bench_with_input(BenchmarkId::new("intersection_into", len), &len, |bench, _| {
            bench.iter(|| {
                a.intersection_into(black_box(&b), &mut out).unwrap();
                black_box(out.len());
            });
        });

        group.bench_with_input(BenchmarkId::new("intersection_with", len), &len, |bench, _| {
            bench.iter(|| {
                let mut copy = a.clone();
                copy.intersection_with(black_box(&b));
                black_box(copy);
            });
        });

        group.bench_with_input(BenchmarkId::new("intersection_len", len), &len, |bench, _| {
            bench.iter(|| black_box(a.intersection_len(black_box(&b))));
        });
    }

    group.finish();
}

fn bench_skewed_intersection(c: &mut Criterion) {
    let mut group = c.benchmark_group("skewed_intersection");

    let large = spread(16_384, 4);
    for &small_len in &[4usize, 64, 256] {
        let small = spread(small_len, 97);
        let mut out = ArrayContainer::with_capacity(small_len);

        for strategy in [Strategy::Skewed, Strategy::Balanced] {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), small_len),
                &small_len,
                |bench, _| {
                    bench.iter(|| {
                        small
                            .intersection_into_using(black_box(&large), &mut out, strategy)
                            .unwrap();
                        black_box(out.len());
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    let container = spread(4096, 11);
    let mut buffer = vec![0u32; container.len()];

    group.bench_function("write_absolute", |b| {
        b.iter(|| black_box(container.write_absolute(&mut buffer, black_box(3 << 16))));
    });

    group.bench_function("iter_absolute_sum", |b| {
        b.iter(|| black_box(container.iter_absolute(3 << 16).map(u64::from).sum::<u64>()));
    });

    group.bench_function("number_of_runs", |b| {
        b.iter(|| black_box(container.number_of_runs()));
    });

    group.bench_function("clone", |b| {
        b.iter(|| black_box(container.clone()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_point_operations,
    bench_set_algebra,
    bench_skewed_intersection,
    bench_conversion,
);

criterion_main!(benches);
