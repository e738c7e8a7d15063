//! Median cut color quantization.
//!
//! `mediancut` reduces the colors of an image to a small representative palette by recursively
//! splitting the set of pixel colors along its widest channel at the median. After a fixed number
//! of splits, each group of pixels is collapsed into its average color.
//!
//! The input is a flat slice of pixels with three `u8` components, like
//! [`Srgb<u8>`](palette::Srgb). Decoding an image into such a slice is left to the caller,
//! although the [`pixels`] module provides a few helpers for raw byte buffers (and `image` crate
//! types if the `image` feature is enabled).
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), mediancut::QuantizeError> {
//! use mediancut::{MaxDepth, median_cut::quantize};
//! use palette::Srgb;
//!
//! let pixels = [
//!     Srgb::new(0, 0, 0),
//!     Srgb::new(0, 0, 0),
//!     Srgb::new(255, 255, 255),
//!     Srgb::new(255, 255, 255),
//! ];
//!
//! let palette = quantize(&pixels, MaxDepth::try_from_u8(1).unwrap())?;
//! assert_eq!(palette, [Srgb::new(0, 0, 0), Srgb::new(255, 255, 255)]);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `threads` (default): adds parallel versions of the quantization functions using `rayon`.
//! - `image`: adds conversions from `image` crate types in the [`pixels`] module.

#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_slice,
    missing_docs,
    rustdoc::all
)]
#![allow(clippy::module_name_repetitions)]

mod traits;
mod types;

pub mod median_cut;
pub mod pixels;

pub use median_cut::{MedianCut, Partition, SmallInput, SmallInputFromStrError};
pub use traits::*;
pub use types::*;

#[cfg(feature = "image")]
pub use image;
pub use palette;

/// The maximum supported number of pixels is `u32::MAX`.
///
/// This keeps channel sums within a `u64` when averaging a bucket.
pub const MAX_PIXELS: u32 = u32::MAX;

#[cfg(test)]
pub(crate) mod tests {
    use palette::Srgb;
    use rand::{Rng as _, SeedableRng as _};
    use rand_xoshiro::Xoroshiro128PlusPlus;

    /// Generate `len` pseudo-random colors from a fixed seed.
    pub fn test_data(len: usize) -> Vec<Srgb<u8>> {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(42);
        (0..len)
            .map(|_| Srgb::new(rng.random(), rng.random(), rng.random()))
            .collect()
    }

    pub fn test_data_1024() -> Vec<Srgb<u8>> {
        test_data(1024)
    }

    /// Returns the colors sorted into a canonical order for multiset comparisons.
    pub fn sorted(colors: &[Srgb<u8>]) -> Vec<Srgb<u8>> {
        let mut colors = colors.to_vec();
        colors.sort_unstable_by_key(|color| color.into_components());
        colors
    }
}
