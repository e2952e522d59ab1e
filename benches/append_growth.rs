use criterion::{Criterion, black_box, criterion_group, criterion_main};

use indexbuf_rs::{Config, GrowthStrategy, IndexBuf};

fn bench(c: &mut Criterion) {
    for strategy in [GrowthStrategy::Realloc, GrowthStrategy::CopyOnGrow] {
        c.bench_function(&format!("IndexBuf::append_one() x10000 {strategy}"), |b| {
            b.iter(|| {
                let mut buf = IndexBuf::with_config(Config::new(strategy, None).unwrap());
                for v in 0..10_000 {
                    buf.append_one(black_box(v)).unwrap();
                }
                black_box(buf)
            });
        });
    }

    let chunk: Vec<usize> = (0..64).collect();
    c.bench_function("IndexBuf::append_many() 64 x 1000", |b| {
        b.iter(|| {
            let mut buf = IndexBuf::new();
            for _ in 0..1000 {
                buf.append_many(black_box(&chunk)).unwrap();
            }
            black_box(buf)
        });
    });
}

criterion_group!(
name = append_growth;
config = Criterion::default().sample_size(200);
targets = bench
);
criterion_main!(append_growth);
