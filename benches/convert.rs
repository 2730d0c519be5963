use criterion::{criterion_group, criterion_main, Criterion};
use std::path::Path;

fn fixture_bytes(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read(path).unwrap()
}

fn bench_convert_simple(c: &mut Criterion) {
    let raw = fixture_bytes("simple.eml");
    c.bench_function("convert_simple", |b| {
        b.iter(|| emlmsg::convert_bytes(&raw).unwrap())
    });
}

fn bench_convert_multipart(c: &mut Criterion) {
    let raw = fixture_bytes("nameless.eml");
    c.bench_function("convert_multipart", |b| {
        b.iter(|| emlmsg::convert_bytes(&raw).unwrap())
    });
}

fn bench_encode_container(c: &mut Criterion) {
    let model = emlmsg::convert_bytes(&fixture_bytes("inline_image.eml")).unwrap();
    c.bench_function("encode_container", |b| {
        b.iter(|| emlmsg::container::writer::encode(&model).unwrap())
    });
}

criterion_group!(
    benches,
    bench_convert_simple,
    bench_convert_multipart,
    bench_encode_container
);
criterion_main!(benches);
