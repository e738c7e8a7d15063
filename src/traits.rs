use palette::cast::{self, ArrayCast};

/// Pixel types made of three `u8` channels in red, green, blue order.
///
/// Quantization in `mediancut` works on the raw channel values of a pixel, so any type that can
/// be cast to and from `[u8; 3]` via [`ArrayCast`] is accepted, like
/// [`Srgb<u8>`](palette::Srgb) or [`LinSrgb<u8>`](palette::LinSrgb).
pub trait PixelComponents: ArrayCast<Array = [u8; 3]> + Copy + Send + Sync + 'static {
    /// Returns the channels of the pixel.
    #[inline]
    fn channels(&self) -> [u8; 3] {
        *cast::into_array_ref(self)
    }

    /// Create a pixel from its channels.
    #[inline]
    fn from_channels(channels: [u8; 3]) -> Self {
        cast::from_array(channels)
    }
}

impl<Color> PixelComponents for Color where
    Color: ArrayCast<Array = [u8; 3]> + Copy + Send + Sync + 'static
{
}
