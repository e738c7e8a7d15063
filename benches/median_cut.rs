#[path = "../util/mod.rs"]
mod util;

use criterion::{
    Bencher, BenchmarkId, Criterion, SamplingMode, criterion_group, criterion_main,
    measurement::WallTime,
};
use mediancut::{MaxDepth, MedianCut};
use palette::Srgb;
use std::time::Duration;
use util::benchmark_images;

// Running time is dominated by the sort at each depth, so it grows with the depth.
const DEPTHS: [MaxDepth; 2] = [MaxDepth::DEFAULT, MaxDepth::from_u8_clamped(8)];

fn bench(
    c: &mut Criterion,
    group: &str,
    mut f: impl FnMut(&mut Bencher<'_, WallTime>, &(MedianCut, &[Srgb<u8>])),
) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));

    for depth in DEPTHS {
        let options = MedianCut::new().max_depth(depth);
        for (path, pixels) in benchmark_images() {
            group.bench_with_input(
                BenchmarkId::new(format!("depth_{depth}"), path),
                &(options, pixels.as_slice()),
                &mut f,
            );
        }
    }
}

fn median_cut_palette_single(c: &mut Criterion) {
    bench(c, "median_cut_palette_single", |b, (options, pixels)| {
        b.iter(|| options.palette(pixels))
    });
}

fn median_cut_palette_in_place_single(c: &mut Criterion) {
    bench(c, "median_cut_palette_in_place_single", |b, (options, pixels)| {
        b.iter_batched_ref(
            || pixels.to_vec(),
            |pixels| options.palette_in_place(pixels),
            criterion::BatchSize::LargeInput,
        )
    });
}

fn median_cut_palette_par(c: &mut Criterion) {
    bench(c, "median_cut_palette_par", |b, (options, pixels)| {
        b.iter(|| options.palette_par(pixels))
    });
}

criterion_group!(
    benches,
    median_cut_palette_single,
    median_cut_palette_in_place_single,
    median_cut_palette_par,
);
criterion_main!(benches);
