use criterion::{criterion_group, criterion_main, Criterion};
use riftline::term::ansi;
use std::hint::black_box;

fn wrapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("display_wrapping");

    let plain = "word ".repeat(100);
    let attributed = "\x1b[7mword\x1b[0m ".repeat(100);

    group.bench_function("split_plain", |b| {
        b.iter(|| black_box(ansi::split_lines(black_box(&plain), 80, 4)))
    });

    group.bench_function("split_attributed", |b| {
        b.iter(|| black_box(ansi::split_lines(black_box(&attributed), 80, 4)))
    });

    group.bench_function("display_width", |b| {
        b.iter(|| black_box(ansi::display_width(black_box(&attributed))))
    });

    group.bench_function("strip", |b| {
        b.iter(|| black_box(ansi::strip(black_box(&attributed))))
    });

    group.finish();
}

criterion_group!(benches, wrapping);
criterion_main!(benches);
