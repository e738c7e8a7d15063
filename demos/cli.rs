use clap::Parser;
use image::{RgbImage, imageops::FilterType};
use mediancut::{MaxDepth, MedianCut, SmallInput, pixels};
use palette::Srgb;
use std::{error::Error, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The largest side length of each swatch in the output image.
const SWATCH_SIZE: u32 = 100;

/// Palettes up to this size are drawn as a single row.
const ROW_LEN: u32 = 16;

/// Larger palettes are wrapped into a square grid no wider than this, where possible.
const MAX_WIDTH: u32 = 4096;

#[derive(Parser)]
pub struct Options {
    /// The palette will have 2^depth colors.
    #[arg(short, long, default_value_t = MaxDepth::DEFAULT)]
    depth: MaxDepth,

    /// How to handle images with fewer pixels than the palette size.
    #[arg(long, default_value_t = SmallInput::Reject)]
    small_input: SmallInput,

    /// Resize the image to this width before quantizing (0 keeps the original size).
    #[arg(short, long, default_value_t = 500)]
    width: u32,

    /// Number of threads to use (0 uses all cores, 1 runs single-threaded).
    #[arg(short, long, default_value_t = 0)]
    threads: u8,

    #[arg(long)]
    verbose: bool,

    input: PathBuf,

    /// Write the palette as a grid of swatches to this image instead of printing it.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let Options {
        depth,
        small_input,
        width,
        threads,
        verbose,
        input,
        output,
    } = Options::parse();

    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    macro_rules! log {
        ($name: literal, $val: expr) => {{
            let time = std::time::Instant::now();
            let value = $val;
            info!("{} took {}ms", $name, time.elapsed().as_millis());
            value
        }};
    }

    let image = log!("read image", image::open(input)?);

    let image = if width == 0 || width == image.width() {
        image
    } else {
        let height = u64::from(width) * u64::from(image.height()) / u64::from(image.width());
        let height = u32::try_from(height)?.max(1);
        log!(
            "resize",
            image.resize_exact(width, height, FilterType::Triangle)
        )
    };

    let mut pixels = log!("convert", pixels::from_dynamic_image(&image));

    let options = MedianCut::new().max_depth(depth).small_input(small_input);

    let palette = if threads == 1 {
        log!("quantization", options.palette_in_place(&mut pixels)?)
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.into())
            .build()?;
        log!(
            "quantization",
            pool.install(|| options.palette_in_place_par(&mut pixels))?
        )
    };

    if let Some(output) = output {
        log!("write image", swatches(&palette).save(output)?);
    } else {
        print_palette(&palette);
    }

    Ok(())
}

/// Returns the number of columns and the side length of each swatch.
fn swatch_grid(len: u32) -> (u32, u32) {
    let columns = if len <= ROW_LEN {
        len.max(1)
    } else {
        let sqrt = len.isqrt();
        if sqrt * sqrt < len { sqrt + 1 } else { sqrt }
    };
    let size = (MAX_WIDTH / columns).clamp(1, SWATCH_SIZE);
    (columns, size)
}

/// Render the palette as square swatches in left-to-right, top-to-bottom order.
///
/// Cells past the end of the palette are left black.
fn swatches(palette: &[Srgb<u8>]) -> RgbImage {
    let len = u32::try_from(palette.len()).unwrap_or(u32::MAX);
    let (columns, size) = swatch_grid(len);
    let rows = len.div_ceil(columns).max(1);
    RgbImage::from_fn(columns * size, rows * size, |x, y| {
        let i = (y / size) as usize * columns as usize + (x / size) as usize;
        image::Rgb(palette.get(i).map_or([0; 3], |color| color.into_components().into()))
    })
}

fn print_palette(palette: &[Srgb<u8>]) {
    println!(
        "{}",
        palette
            .iter()
            .map(|color| format!("{color:X}"))
            .collect::<Vec<_>>()
            .join(" ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_palettes_are_one_row() {
        assert_eq!(swatch_grid(1), (1, SWATCH_SIZE));
        assert_eq!(swatch_grid(8), (8, SWATCH_SIZE));
        assert_eq!(swatch_grid(16), (16, SWATCH_SIZE));

        let palette = [Srgb::new(1, 2, 3), Srgb::new(4, 5, 6)];
        let image = swatches(&palette);
        assert_eq!(image.dimensions(), (2 * SWATCH_SIZE, SWATCH_SIZE));
        assert_eq!(image.get_pixel(SWATCH_SIZE, 0).0, [4, 5, 6]);
    }

    #[test]
    fn large_palettes_wrap() {
        assert_eq!(swatch_grid(1 << 16), (256, 16));
        assert_eq!(swatch_grid(17), (5, SWATCH_SIZE));
        assert_eq!(swatch_grid(1 << 30), (1 << 15, 1));

        let palette = vec![Srgb::new(7, 7, 7); 1 << 16];
        let image = swatches(&palette);
        assert_eq!(image.dimensions(), (MAX_WIDTH, MAX_WIDTH));
        assert_eq!(image.get_pixel(MAX_WIDTH - 1, MAX_WIDTH - 1).0, [7, 7, 7]);

        let palette = vec![Srgb::new(7, 7, 7); 17];
        let image = swatches(&palette);
        assert_eq!(image.dimensions(), (5 * SWATCH_SIZE, 4 * SWATCH_SIZE));
        assert_eq!(image.get_pixel(SWATCH_SIZE, 3 * SWATCH_SIZE).0, [7, 7, 7]);
        assert_eq!(image.get_pixel(2 * SWATCH_SIZE, 3 * SWATCH_SIZE).0, [0, 0, 0]);
    }
}
