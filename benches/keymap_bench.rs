use criterion::{criterion_group, criterion_main, Criterion};
use riftline::keymap::defaults;
use std::hint::black_box;

fn keymap_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_lookup");

    let emacs = defaults::emacs();
    let vicmd = defaults::vi_cmd();

    group.bench_function("single_key", |b| {
        let keys = ['\x01'];
        b.iter(|| black_box(emacs.lookup(black_box(&keys))))
    });

    group.bench_function("escape_sequence", |b| {
        let keys: Vec<char> = "\x1b[A".chars().collect();
        b.iter(|| black_box(emacs.lookup(black_box(&keys))))
    });

    group.bench_function("ambiguous_prefix", |b| {
        let keys = ['g'];
        b.iter(|| black_box(vicmd.lookup(black_box(&keys))))
    });

    group.bench_function("build_default_maps", |b| {
        b.iter(|| {
            defaults::default_keymaps(riftline::term::Attributes::default(), true)
        })
    });

    group.finish();
}

criterion_group!(benches, keymap_lookup);
criterion_main!(benches);
