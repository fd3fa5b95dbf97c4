use criterion::{criterion_group, criterion_main, Criterion};
use riftline::buffer::Buffer;
use std::hint::black_box;

fn buffer_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_operations");

    group.bench_function("write_1k_chars", |b| {
        b.iter_batched(
            Buffer::new,
            |mut buf| {
                for _ in 0..1000 {
                    buf.write("x");
                }
                buf
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("move_across_line", |b| {
        let mut buf = Buffer::new();
        buf.write(&"word ".repeat(200));
        b.iter(|| {
            buf.set_cursor(0);
            black_box(buf.move_cursor(1000));
            black_box(buf.move_cursor(-1000));
        })
    });

    group.bench_function("snapshot_round_trip", |b| {
        let mut buf = Buffer::new();
        buf.write(&"word ".repeat(200));
        b.iter(|| {
            let snap = buf.copy();
            let mut other = Buffer::new();
            other.restore(black_box(&snap));
            other
        })
    });

    group.finish();
}

criterion_group!(benches, buffer_operations);
criterion_main!(benches);
