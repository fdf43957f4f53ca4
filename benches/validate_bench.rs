use anvilcheck::{render, validate, RegionCoords, HEADER_SIZE, SECTOR_SIZE};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// Every slot populated with a one-sector zlib chunk.
fn full_region() -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&[7u8; 16 * 1024]).unwrap();
    let body = enc.finish().unwrap();

    let mut data = vec![0u8; HEADER_SIZE + 1024 * SECTOR_SIZE];
    for i in 0..1024usize {
        let sector = 2 + i;
        let word = ((sector as u32) << 8) | 1;
        data[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());

        let at = sector * SECTOR_SIZE;
        data[at..at + 4].copy_from_slice(&(body.len() as u32 + 1).to_be_bytes());
        data[at + 4] = 2;
        data[at + 5..at + 5 + body.len()].copy_from_slice(&body);
    }
    data
}

fn bench_validate(c: &mut Criterion) {
    let data = full_region();
    c.bench_function("validate_full_region", |b| {
        b.iter(|| validate(black_box(&data), RegionCoords::default()))
    });
}

fn bench_render(c: &mut Criterion) {
    let data = full_region();
    let report = validate(&data, RegionCoords::default());
    c.bench_function("render_full_region", |b| b.iter(|| render(black_box(&report)).unwrap()));
}

criterion_group!(benches, bench_validate, bench_render);
criterion_main!(benches);
