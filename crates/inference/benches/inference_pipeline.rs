use criterion::{Criterion, black_box, criterion_group, criterion_main};
use inference::{heatmap, postprocessing};

/// Resized 224x224 RGB buffer with a gradient pattern
fn create_resized_pixels() -> Vec<u8> {
    let mut pixels = vec![0u8; 224 * 224 * 3];
    for (i, px) in pixels.chunks_exact_mut(3).enumerate() {
        let x = i % 224;
        let y = i / 224;
        px[0] = x as u8;
        px[1] = y as u8;
        px[2] = ((x + y) % 256) as u8;
    }
    pixels
}

fn benchmark_postprocessing(c: &mut Criterion) {
    let scores = [0.12f32, 0.31, 0.57];

    c.bench_function("classify_scores", |b| {
        b.iter(|| postprocessing::classify(black_box(&scores)).unwrap())
    });
}

fn benchmark_heatmap(c: &mut Criterion) {
    let mut group = c.benchmark_group("heatmap");
    let pixels = create_resized_pixels();
    let scores = [0.12f32, 0.31, 0.57];

    group.bench_function("stretch_column", |b| {
        let intensities = heatmap::score_intensities(&scores);
        b.iter(|| heatmap::stretch_column(black_box(&intensities), 224, 224).unwrap())
    });

    group.bench_function("render_data_url", |b| {
        b.iter(|| {
            heatmap::render_data_url(black_box(&pixels), 224, 224, black_box(&scores)).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_postprocessing, benchmark_heatmap);
criterion_main!(benches);
