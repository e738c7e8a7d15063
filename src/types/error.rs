use crate::MAX_PIXELS;
use core::{error::Error, fmt};

/// The error returned when a bucket of pixels has fewer samples than required.
///
/// This is returned for empty inputs, and for inputs that cannot fill every bucket of the split
/// tree under [`SmallInput::Reject`](crate::SmallInput::Reject).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyBucketError {
    /// The number of provided pixels.
    len: usize,
    /// The minimum number of pixels required.
    required: usize,
}

impl EmptyBucketError {
    #[inline]
    pub(crate) const fn new(len: usize, required: usize) -> Self {
        Self { len, required }
    }

    /// Returns the number of provided pixels.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the provided input was empty.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the minimum number of pixels that was required.
    #[must_use]
    #[inline]
    pub const fn required(&self) -> usize {
        self.required
    }
}

impl fmt::Display for EmptyBucketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { len, required } = *self;
        if len == 0 {
            f.write_str("got an empty bucket of pixels")
        } else {
            write!(
                f,
                "got {len} pixels but at least {required} are needed to fill every bucket",
            )
        }
    }
}

impl Error for EmptyBucketError {}

/// The error returned when quantization fails. No partial palette is ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizeError {
    /// A bucket (or the whole input) had too few pixels.
    EmptyBucket(EmptyBucketError),
    /// The input had more than [`MAX_PIXELS`] pixels.
    TooManyPixels {
        /// The number of provided pixels.
        len: usize,
    },
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBucket(err) => fmt::Display::fmt(err, f),
            Self::TooManyPixels { len } => write!(
                f,
                "got an input with length {len} which is above the maximum {MAX_PIXELS}",
            ),
        }
    }
}

impl Error for QuantizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyBucket(err) => Some(err),
            Self::TooManyPixels { .. } => None,
        }
    }
}

impl From<EmptyBucketError> for QuantizeError {
    #[inline]
    fn from(err: EmptyBucketError) -> Self {
        Self::EmptyBucket(err)
    }
}

/// The error returned when a raw byte buffer does not hold a whole number of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBufferError {
    /// The length of the byte buffer.
    pub(crate) len: usize,
    /// The number of bytes per pixel.
    pub(crate) stride: usize,
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { len, stride } = *self;
        write!(
            f,
            "buffer length of {len} is not a multiple of the pixel stride of {stride} bytes",
        )
    }
}

impl Error for PixelBufferError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bucket_messages() {
        let err = EmptyBucketError::new(0, 8);
        assert!(err.is_empty());
        assert_eq!(err.to_string(), "got an empty bucket of pixels");

        let err = EmptyBucketError::new(3, 8);
        assert_eq!(
            err.to_string(),
            "got 3 pixels but at least 8 are needed to fill every bucket",
        );
    }

    #[test]
    fn quantize_error_source() {
        let inner = EmptyBucketError::new(0, 1);
        let err = QuantizeError::from(inner);
        assert_eq!(err.to_string(), inner.to_string());
        assert!(err.source().is_some());
        assert!(QuantizeError::TooManyPixels { len: 0 }.source().is_none());
    }
}
