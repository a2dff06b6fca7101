use chain_collections::Vector;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn bench_push_from_empty(c: &mut Criterion) {
    c.bench_function("vector::push_100k_from_empty", |b| {
        b.iter(|| {
            let mut v = Vector::new();
            for i in 0..100_000u64 {
                v.push_back(i).unwrap();
            }
            black_box(v)
        })
    });
}

fn bench_push_presized(c: &mut Criterion) {
    c.bench_function("vector::push_100k_presized", |b| {
        b.iter(|| {
            let mut v = Vector::with_capacity(100_000);
            for i in 0..100_000u64 {
                v.push_back(i).unwrap();
            }
            black_box(v)
        })
    });
}

fn bench_pop_to_empty(c: &mut Criterion) {
    c.bench_function("vector::pop_100k_with_shrink", |b| {
        b.iter_batched(
            || {
                let mut v = Vector::new();
                for i in 0..100_000u64 {
                    v.push_back(i).unwrap();
                }
                v
            },
            |mut v| {
                while let Some(x) = v.pop_back() {
                    black_box(x);
                }
                black_box(v)
            },
            BatchSize::SmallInput,
        )
    });
}

// Alternating push/pop at the grow boundary must not reallocate every call.
fn bench_boundary_thrash(c: &mut Criterion) {
    c.bench_function("vector::push_pop_at_boundary_100k", |b| {
        b.iter_batched(
            || {
                let mut v = Vector::new();
                for i in 0..1024u64 {
                    v.push_back(i).unwrap();
                }
                v
            },
            |mut v| {
                for i in 0..100_000u64 {
                    v.push_back(i).unwrap();
                    black_box(v.pop_back());
                }
                black_box(v)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_push_from_empty,
    bench_push_presized,
    bench_pop_to_empty,
    bench_boundary_thrash
);
criterion_main!(benches);
