use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kestrel_parser::{estree::to_estree, parse, Options};

const SAMPLE: &str = include_str!("sample.js");

// Every copy gets its own block so the declarations do not clash
fn source(copies: usize) -> String {
    (0..copies).map(|_| format!("{{\n{}\n}}\n", SAMPLE)).collect()
}

pub fn bench(c: &mut Criterion) {
    let source = source(64);
    let program = parse(&source, Options::default()).unwrap();

    let mut group = c.benchmark_group("sample");
    group.sample_size(20);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("parse", |b| {
        b.iter(|| parse(black_box(&source), Options::default()))
    });
    group.bench_function("estree", |b| {
        b.iter(|| to_estree(black_box(&program), &source, Options::RANGES | Options::LOC))
    });
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
