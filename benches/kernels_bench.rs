// In benches/kernels_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array3;

use stripcodec::kernels::{bitorder, delta, floatpred, lzw, packbits, packints, xor_delta};
use stripcodec::{SampleArray, SampleType};

const BENCH_DATA_SIZE: usize = 65536; // 64 KB

const HAMMER_STRIP: &[u8] = b"\x80\x1c\xcc'\x91\x01\xa0\xc2m6\x99NB\x03\xc9\xbe\x0b\x07\x84\xc2\xcd\xa68|\"\x14 3\xc3\xa0\xd1c\x94\x02\x02";

/// Generates a slowly varying byte ramp, the typical input of a predictor.
fn generate_ramp_bytes(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i / 7) as u8).collect()
}

/// Generates a PackBits stream mixing literal and replicate runs.
fn generate_packbits_stream(size: usize) -> Vec<u8> {
    let pattern = b"\xfe\xaa\x02\x80\x00\x2a\xfd\xaa\x03\x80\x00\x2a\x22\xf7\xaa";
    let mut data = Vec::with_capacity(size);
    while data.len() + pattern.len() <= size {
        data.extend_from_slice(pattern);
    }
    data
}

fn bench_byte_kernels(c: &mut Criterion) {
    let ramp = generate_ramp_bytes(BENCH_DATA_SIZE);
    let packbits_stream = generate_packbits_stream(BENCH_DATA_SIZE);
    let mut delta_encoded = Vec::new();
    delta::encode(&ramp, &mut delta_encoded).unwrap();
    let mut output_buf = Vec::with_capacity(BENCH_DATA_SIZE * 4);

    let mut group = c.benchmark_group("Byte Kernels");
    group.throughput(criterion::Throughput::Bytes(BENCH_DATA_SIZE as u64));

    group.bench_function("BitOrder", |b| {
        b.iter(|| bitorder::decode(black_box(&ramp), &mut output_buf))
    });
    group.bench_function("Delta Encode", |b| {
        b.iter(|| delta::encode(black_box(&ramp), &mut output_buf))
    });
    group.bench_function("Delta Decode", |b| {
        b.iter(|| delta::decode(black_box(&delta_encoded), &mut output_buf))
    });
    group.bench_function("XOR Decode", |b| {
        b.iter(|| xor_delta::decode(black_box(&delta_encoded), &mut output_buf))
    });
    group.bench_function("PackBits Decode", |b| {
        b.iter(|| packbits::decode(black_box(&packbits_stream), &mut output_buf))
    });
    group.bench_function("PackInts Decode (4 bit)", |b| {
        b.iter(|| black_box(packints::decode(black_box(&ramp), SampleType::UInt8, 4, 0)))
    });
    group.bench_function("PackInts Decode (1 bit, runlen 12)", |b| {
        b.iter(|| black_box(packints::decode(black_box(&ramp), SampleType::UInt8, 1, 12)))
    });
    group.finish();

    c.bench_function("LZW Decode (fixture)", |b| {
        b.iter(|| lzw::decode(black_box(HAMMER_STRIP), &mut output_buf))
    });
}

fn bench_array_kernels(c: &mut Criterion) {
    let samples = Array3::<f32>::from_shape_fn((64, 256, 1), |(r, x, _)| (r * 256 + x) as f32 * 0.25);
    let samples = SampleArray::from(samples.into_dyn());

    let mut group = c.benchmark_group("Array Kernels");
    group.throughput(criterion::Throughput::Bytes((samples.len() * 4) as u64));
    group.bench_function("Delta Encode f32 (axis -2)", |b| {
        b.iter(|| black_box(delta::encode_array(black_box(&samples), -2)))
    });
    group.bench_function("FloatPred Decode f32", |b| {
        b.iter(|| black_box(floatpred::decode_array(black_box(&samples), -2)))
    });
    group.finish();
}

criterion_group!(benches, bench_byte_kernels, bench_array_kernels);
criterion_main!(benches);
