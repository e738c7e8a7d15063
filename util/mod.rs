#![allow(dead_code)]

use palette::Srgb;
use rand::{Rng as _, SeedableRng as _};
use rand_xoshiro::Xoroshiro128PlusPlus;
use std::sync::OnceLock;

/// Image resolutions to benchmark, largest first.
const RESOLUTIONS: [(u32, u32); 3] = [(1920, 1280), (640, 427), (256, 171)];

/// Uniformly random pixels: every bucket has wide ranges in all channels.
fn noise(width: u32, height: u32) -> Vec<Srgb<u8>> {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(u64::from(width) * u64::from(height));
    (0..width * height)
        .map(|_| Srgb::new(rng.random(), rng.random(), rng.random()))
        .collect()
}

/// A smooth two-axis gradient with a little noise, closer to a photograph.
fn gradient(width: u32, height: u32) -> Vec<Srgb<u8>> {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(u64::from(width) ^ u64::from(height));
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            #[allow(clippy::cast_possible_truncation)]
            let (r, g) = ((x * 255 / width) as u8, (y * 255 / height) as u8);
            let b = r / 2 + g / 2;
            let jitter = rng.random_range(0..8);
            pixels.push(Srgb::new(
                r.saturating_add(jitter),
                g.saturating_add(jitter),
                b,
            ));
        }
    }
    pixels
}

static BENCHMARK_IMAGES: OnceLock<Vec<(String, Vec<Srgb<u8>>)>> = OnceLock::new();

pub fn benchmark_images() -> &'static [(String, Vec<Srgb<u8>>)] {
    BENCHMARK_IMAGES.get_or_init(|| {
        RESOLUTIONS
            .into_iter()
            .flat_map(|(width, height)| {
                [
                    (format!("noise/{width}x{height}"), noise(width, height)),
                    (format!("gradient/{width}x{height}"), gradient(width, height)),
                ]
            })
            .collect()
    })
}
