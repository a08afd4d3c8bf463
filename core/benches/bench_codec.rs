// Embed / extract throughput at each depth on a 512x512 RGB cover.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stegcrypt_core::bitplane::{embed_with_depth, extract};
use stegcrypt_core::complexity::measure_complexity;
use stegcrypt_core::headers::BitDepth;
use stegcrypt_core::pixels::PixelBuffer;

fn cover() -> PixelBuffer {
    let (w, h) = (512u32, 512u32);
    let data = (0..w as usize * h as usize * 3)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 7) as u8)
        .collect();
    PixelBuffer::new(w, h, 3, data).expect("cover geometry")
}

fn bench_embed_extract(c: &mut Criterion) {
    let cover = cover();
    let payload = vec![0xA5u8; 16 * 1024];

    let mut group = c.benchmark_group("bitplane");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    for depth in BitDepth::ALL {
        group.bench_with_input(BenchmarkId::new("embed", depth.bits()), &depth, |b, &d| {
            b.iter(|| embed_with_depth(black_box(&cover), black_box(&payload), d).expect("fits"))
        });

        let (stego, _) = embed_with_depth(&cover, &payload, depth).expect("fits");
        group.bench_with_input(BenchmarkId::new("extract", depth.bits()), &stego, |b, s| {
            b.iter(|| extract(black_box(s)).expect("payload"))
        });
    }
    group.finish();
}

fn bench_complexity(c: &mut Criterion) {
    let cover = cover();
    c.bench_function("complexity/512x512", |b| b.iter(|| measure_complexity(black_box(&cover))));
}

criterion_group!(benches, bench_embed_extract, bench_complexity);
criterion_main!(benches);
