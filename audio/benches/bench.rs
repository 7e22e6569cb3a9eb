use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

use mostek_audio::frame::interleave;

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();

    let mut planar = [0.0_f32; 256];
    for sample in planar.iter_mut() {
        *sample = rng.gen_range(-1.5..1.5);
    }
    let mut frame = [0_i16; 512];

    c.bench_function("interleave mono block to stereo frame", |b| {
        b.iter(|| {
            interleave(black_box(&planar), 256, 256, 1, black_box(&mut frame), 2);
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
