//! WAH compression benchmarks across word sizes.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxiidx_core::{Bitmap, BitmapCodec, WordSize};
use oxiidx_wah::{Wah, WahConfig};
use std::hint::black_box;

/// Generate test bitmaps for benchmarking
mod test_data {
    use oxiidx_core::Bitmap;

    /// Alternating runs of ones and zeros, `run` bits each.
    pub fn runs(bits: usize, run: usize) -> Bitmap {
        (0..bits).map(|i| (i / run) % 2 == 0).collect()
    }

    /// Pseudo-random bits (LCG, reproducible).
    pub fn random(bits: usize) -> Bitmap {
        let mut seed: u64 = 0x0F1E_2D3C_4B5A_6978;
        (0..bits)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                (seed >> 33) & 1 == 1
            })
            .collect()
    }
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("wah_compress");
    let inputs: [(&str, Bitmap); 2] = [
        ("runs", test_data::runs(1 << 20, 4096)),
        ("random", test_data::random(1 << 20)),
    ];
    for word_size in WordSize::ALL {
        let codec = Wah::new(WahConfig::new(word_size));
        for (name, bitmap) in &inputs {
            group.throughput(Throughput::Bytes(bitmap.as_bytes().len() as u64));
            group.bench_with_input(
                BenchmarkId::new(*name, word_size.bits()),
                bitmap,
                |b, bitmap| b.iter(|| codec.compress(black_box(bitmap))),
            );
        }
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let bitmap = test_data::runs(1 << 20, 4096);
    let codec = Wah::new(WahConfig::W32);
    let encoded = codec.compress(&bitmap).expect("compression failed");
    c.bench_function("wah_decompress_runs", |b| {
        b.iter(|| codec.decompress(black_box(&encoded), bitmap.len()))
    });
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
