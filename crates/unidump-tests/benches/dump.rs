use std::io;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use unidump_decoder::{DumpConfig, unidump};

fn mixed_text(len: usize) -> Vec<u8> {
    "Grüße, 世界! 🙸 tab\there\n"
        .as_bytes()
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn garbage(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 151 % 256) as u8).collect()
}

fn bench_dump_utf8(c: &mut Criterion) {
    let config = DumpConfig::default();
    let mut group = c.benchmark_group("dump_utf8");

    for (name, input) in [("mixed", mixed_text(64 * 1024)), ("garbage", garbage(64 * 1024))] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| unidump(&input[..], &config, &mut io::sink()).unwrap());
        });
    }

    group.finish();
}

fn bench_dump_latin1(c: &mut Criterion) {
    let config = DumpConfig::from_options(16, "latin-1", None).unwrap();
    let input = garbage(64 * 1024);

    let mut group = c.benchmark_group("dump_latin1");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("garbage", |b| {
        b.iter(|| unidump(&input[..], &config, &mut io::sink()).unwrap());
    });
    group.finish();
}

fn bench_row_width(c: &mut Criterion) {
    let input = mixed_text(16 * 1024);
    let mut group = c.benchmark_group("dump_row_width");

    for width in [1usize, 16, 64] {
        let config = DumpConfig::from_options(width, "utf-8", None).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(width), &input, |b, input| {
            b.iter(|| unidump(&input[..], &config, &mut io::sink()).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dump_utf8, bench_dump_latin1, bench_row_width);
criterion_main!(benches);
