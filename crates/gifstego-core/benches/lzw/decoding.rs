use criterion::{criterion_group, criterion_main, Criterion};
use gifstego_core::{bit_plane, lzw, PixelIndex};

pub fn lzw_decoding(c: &mut Criterion) {
    c.bench_function("LZW Decoding", |b| {
        let mut rng = fastrand::Rng::with_seed(42);
        let pixels: Vec<PixelIndex> = (0..256 * 256).map(|_| rng.u16(0..256)).collect();
        let compressed = lzw::encode(8, &pixels).expect("Cannot encode pixels");

        b.iter(|| lzw::decode(8, &compressed, pixels.len()).expect("Cannot decode pixels"))
    });
}

pub fn lsb_extraction(c: &mut Criterion) {
    c.bench_function("LSB Extraction", |b| {
        let mut pixels: Vec<PixelIndex> = (0..256 * 256).map(|i| (i % 256) as PixelIndex).collect();
        bit_plane::embed(&mut pixels, &[0xAB; 4096]).expect("Payload does not fit");

        b.iter(|| bit_plane::extract(&pixels))
    });
}

criterion_group!(benches, lzw_decoding, lsb_extraction);
criterion_main!(benches);
