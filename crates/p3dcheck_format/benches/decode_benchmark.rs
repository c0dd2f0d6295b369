//! Benchmark for container decoding and codec throughput.
//!
//! Run with: cargo bench --package p3dcheck_format --bench decode_benchmark

// `criterion_group!` expands to an undocumented public item it offers no way
// to document, so the lint must be allowed for this target.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use p3dcheck_format::{codec, decode_model, Cursor};

fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_fixed64(buf: &mut Vec<u8>, s: &str) {
    let mut field = [0u8; 64];
    field[..s.len()].copy_from_slice(s.as_bytes());
    buf.extend_from_slice(&field);
}

/// Editable-variant stream: one LOD, no geometry, `n` property tags.
fn synthetic_mlod(n: usize) -> Vec<u8> {
    let mut buf = b"MLOD".to_vec();
    put_u32(&mut buf, 257);
    put_u32(&mut buf, 1);
    buf.extend_from_slice(b"P3DM");
    put_u32(&mut buf, 0x1c);
    put_u32(&mut buf, 0x100);
    put_u32(&mut buf, 0);
    put_u32(&mut buf, 0);
    put_u32(&mut buf, 0);
    put_u32(&mut buf, 0);
    buf.extend_from_slice(b"TAGG");
    for i in 0..n {
        buf.push(1);
        buf.extend_from_slice(b"#Property#\0");
        put_u32(&mut buf, 128);
        put_fixed64(&mut buf, &format!("property{i}"));
        put_fixed64(&mut buf, "1");
    }
    buf.push(1);
    buf.extend_from_slice(b"#EndOfFile#\0");
    put_u32(&mut buf, 0);
    buf.extend_from_slice(&1.0f32.to_le_bytes());
    buf
}

/// All-literal LZSS stream expanding to `groups * 8` bytes.
fn literal_stream(groups: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(groups * 9 + 4);
    for _ in 0..groups {
        buf.push(0xFF);
        buf.extend_from_slice(&[0x41; 8]);
    }
    buf.extend_from_slice(&[0; 4]);
    buf
}

/// All-back-reference LZSS stream expanding to `refs * 18` bytes.
fn backref_stream(refs: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut left = refs;
    while left > 0 {
        buf.push(0x00);
        for _ in 0..left.min(8) {
            buf.push(0x00);
            buf.push(0x0F);
        }
        left = left.saturating_sub(8);
    }
    buf.extend_from_slice(&[0; 4]);
    buf
}

fn benchmark_mlod_decode(c: &mut Criterion) {
    let buf = synthetic_mlod(32);

    let mut group = c.benchmark_group("mlod_decode");
    group.throughput(Throughput::Bytes(buf.len() as u64));
    group.bench_function("32_properties", |b| {
        b.iter(|| black_box(decode_model("bench.p3d", black_box(&buf)).unwrap()));
    });
    group.finish();
}

fn benchmark_lzss_literals(c: &mut Criterion) {
    let buf = literal_stream(1024);
    let expected = 1024 * 8;

    let mut group = c.benchmark_group("lzss");
    group.throughput(Throughput::Bytes(expected as u64));
    group.bench_function("literal_stream", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(&buf);
            black_box(codec::decompress_lzss(&mut cursor, expected).unwrap())
        });
    });
    group.finish();
}

fn benchmark_lzss_backrefs(c: &mut Criterion) {
    let refs = 1024;
    let buf = backref_stream(refs);
    let expected = refs * 18;

    let mut group = c.benchmark_group("lzss_expansion");
    group.throughput(Throughput::Bytes(expected as u64));
    group.bench_function("backref_stream", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(&buf);
            black_box(codec::decompress_lzss(&mut cursor, expected).unwrap())
        });
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = benchmark_mlod_decode,
              benchmark_lzss_literals,
              benchmark_lzss_backrefs
}

criterion_main!(benches);
