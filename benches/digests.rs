//! Benchmarks for the digest algorithms.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use digestlab::throughput::reference_buffer;
use digestlab::{checksum, hash, Algorithm, CrcTable, Registry};

const SIZES: [usize; 4] = [64, 1024, 16384, 1_000_000];

fn bench_checksums(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksums");

    for size in SIZES {
        let data = reference_buffer(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("simple-sum", size), &data, |b, data| {
            b.iter(|| checksum::simple_sum(black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("weighted-sum", size), &data, |b, data| {
            b.iter(|| checksum::weighted_sum(black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("xor", size), &data, |b, data| {
            b.iter(|| checksum::xor_checksum(black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("fletcher-16", size), &data, |b, data| {
            b.iter(|| checksum::fletcher16(black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("adler-32", size), &data, |b, data| {
            b.iter(|| checksum::adler32(black_box(data)));
        });
    }

    group.finish();
}

fn bench_hashes(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashes");

    for size in SIZES {
        let data = reference_buffer(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("rolling-hash", size), &data, |b, data| {
            b.iter(|| hash::rolling_hash(black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("pearson", size), &data, |b, data| {
            b.iter(|| hash::pearson_hash(black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("prime-hash", size), &data, |b, data| {
            b.iter(|| hash::prime_hash(black_box(data)));
        });
    }

    group.finish();
}

fn bench_crc(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc");

    group.bench_function("table", |b| b.iter(|| CrcTable::new(black_box(0xEDB8_8320))));

    let table = CrcTable::ieee();
    for size in SIZES {
        let data = reference_buffer(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("crc-32", size), &data, |b, data| {
            b.iter(|| table.checksum(black_box(data)));
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let registry = Registry::standard();
    let data = reference_buffer(1024);

    group.throughput(Throughput::Bytes(data.len() as u64));
    for algorithm in Algorithm::ALL {
        let descriptor = registry.get(algorithm.name()).unwrap();
        group.bench_with_input(BenchmarkId::new("registry", algorithm), &data, |b, data| {
            b.iter(|| descriptor.compute(black_box(data)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_checksums, bench_hashes, bench_crc, bench_dispatch);
criterion_main!(benches);
