use criterion::{criterion_group, criterion_main, Criterion};
use gifstego_core::{lzw, PixelIndex};

pub fn lzw_encoding(c: &mut Criterion) {
    c.bench_function("LZW Encoding", |b| {
        let mut rng = fastrand::Rng::with_seed(42);
        let pixels: Vec<PixelIndex> = (0..256 * 256).map(|_| rng.u16(0..256)).collect();

        b.iter(|| lzw::encode(8, &pixels).expect("Cannot encode pixels"))
    });
}

criterion_group!(benches, lzw_encoding);
criterion_main!(benches);
