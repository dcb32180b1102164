use chunkwise_engine::codec::{parse_tagged, to_tagged};
use criterion::{Criterion, criterion_group, criterion_main};
mod common;

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.sample_size(10);

    let clean = common::generate_tagged_sentence(200);
    group.bench_function("parse_clean", |b| {
        b.iter(|| {
            let seq = parse_tagged(std::hint::black_box(&clean));
            std::hint::black_box(seq);
        });
    });

    let noisy = common::generate_noisy_sentence(200);
    group.bench_function("parse_noisy", |b| {
        b.iter(|| {
            let seq = parse_tagged(std::hint::black_box(&noisy));
            std::hint::black_box(seq);
        });
    });

    let seq = parse_tagged(&clean);
    group.bench_function("serialize", |b| {
        b.iter(|| {
            let tagged = to_tagged(std::hint::black_box(&seq));
            std::hint::black_box(tagged);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
