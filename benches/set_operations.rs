use criterion::{Criterion, black_box, criterion_group, criterion_main};

use indexbuf_rs::IndexBuf;

fn bench(c: &mut Criterion) {
    c.bench_function("IndexBuf::set_insert() 256 values, half duplicates", |b| {
        b.iter(|| {
            let mut buf = IndexBuf::new();
            for v in 0..256 {
                buf.set_insert(black_box(v % 128)).unwrap();
            }
            black_box(buf)
        });
    });

    let base: IndexBuf = (0..256).collect::<Vec<usize>>().into();
    c.bench_function("IndexBuf::move_to_front()/move_to_end() 256 values", |b| {
        b.iter(|| {
            let mut buf = base.clone();
            for v in (0..256).step_by(7) {
                buf.move_to_front(black_box(v));
                buf.move_to_end(black_box(255 - v));
            }
            black_box(buf)
        });
    });

    c.bench_function("IndexBuf::remove_first_match() drain 256 values", |b| {
        b.iter(|| {
            let mut buf = base.clone();
            for v in 0..256 {
                black_box(buf.remove_first_match(black_box(v)));
            }
            black_box(buf)
        });
    });
}

criterion_group!(
name = set_operations;
config = Criterion::default().sample_size(500);
targets = bench
);
criterion_main!(set_operations);
