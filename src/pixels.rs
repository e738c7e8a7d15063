//! Conversions from decoded image buffers into pixel slices.
//!
//! Image decoders and canvases usually hand out interleaved channel bytes. These functions turn
//! such buffers into pixels ready for [`median_cut`](crate::median_cut).

use crate::{PixelBufferError, PixelComponents};
use palette::{Srgb, cast};

/// Reinterpret interleaved RGB bytes as a slice of pixels without copying.
///
/// # Errors
///
/// Returns an error if the length of `bytes` is not a multiple of 3.
///
/// # Examples
///
/// ```
/// # use mediancut::pixels::from_rgb_bytes;
/// # use palette::Srgb;
/// let pixels = from_rgb_bytes(&[1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(pixels, [Srgb::new(1, 2, 3), Srgb::new(4, 5, 6)]);
/// ```
pub fn from_rgb_bytes(bytes: &[u8]) -> Result<&[Srgb<u8>], PixelBufferError> {
    bytemuck::try_cast_slice::<u8, [u8; 3]>(bytes)
        .map(cast::from_array_slice)
        .map_err(|_| PixelBufferError { len: bytes.len(), stride: 3 })
}

/// Convert interleaved RGBA bytes into pixels, dropping the alpha channel.
///
/// # Errors
///
/// Returns an error if the length of `bytes` is not a multiple of 4.
///
/// # Examples
///
/// ```
/// # use mediancut::pixels::from_rgba_bytes;
/// # use palette::Srgb;
/// let pixels = from_rgba_bytes::<Srgb<u8>>(&[1, 2, 3, 255, 4, 5, 6, 0]).unwrap();
/// assert_eq!(pixels, [Srgb::new(1, 2, 3), Srgb::new(4, 5, 6)]);
/// ```
pub fn from_rgba_bytes<Color: PixelComponents>(
    bytes: &[u8],
) -> Result<Vec<Color>, PixelBufferError> {
    let rgba = bytemuck::try_cast_slice::<u8, [u8; 4]>(bytes)
        .map_err(|_| PixelBufferError { len: bytes.len(), stride: 4 })?;

    Ok(rgba
        .iter()
        .map(|&[r, g, b, _]| Color::from_channels([r, g, b]))
        .collect())
}

#[cfg(feature = "image")]
mod image_conversions {
    use super::from_rgb_bytes;
    use image::{DynamicImage, RgbImage};
    use palette::Srgb;

    /// Borrow the pixels of an [`RgbImage`] in row-major order.
    #[must_use]
    pub fn from_rgb_image(image: &RgbImage) -> &[Srgb<u8>] {
        // The buffer of an `RgbImage` always holds a whole number of pixels.
        from_rgb_bytes(image.as_raw()).unwrap_or_default()
    }

    /// Convert any [`DynamicImage`] into 8-bit RGB pixels in row-major order.
    ///
    /// Alpha is dropped and other bit depths are converted by the `image` crate.
    #[must_use]
    pub fn from_dynamic_image(image: &DynamicImage) -> Vec<Srgb<u8>> {
        match image {
            DynamicImage::ImageRgb8(image) => from_rgb_image(image).to_vec(),
            image => from_rgb_image(&image.to_rgb8()).to_vec(),
        }
    }
}

#[cfg(feature = "image")]
pub use image_conversions::*;
