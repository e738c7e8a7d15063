use crate::{EmptyBucketError, PixelComponents};
use core::ops::{Deref, DerefMut};
use ref_cast::{RefCastCustom, ref_cast_custom};

/// A non-empty slice of pixels, one partition of the input at some depth of the split tree.
#[derive(Debug, PartialEq, Eq, Hash, RefCastCustom)]
#[repr(transparent)]
pub struct Bucket<T>([T]);

impl<T> Bucket<T> {
    /// Create a new [`Bucket`] without checking that it is non-empty.
    #[inline]
    pub(crate) const fn new_unchecked(slice: &[T]) -> &Bucket<T> {
        #[ref_cast_custom]
        #[inline]
        const fn cast<T>(slice: &[T]) -> &Bucket<T>;

        debug_assert!(!slice.is_empty());
        cast(slice)
    }

    /// Create a new [`Bucket`].
    ///
    /// # Errors
    ///
    /// Returns an error if `slice` is empty.
    #[inline]
    pub const fn new(slice: &[T]) -> Result<&Self, EmptyBucketError> {
        if slice.is_empty() {
            Err(EmptyBucketError::new(0, 1))
        } else {
            Ok(Self::new_unchecked(slice))
        }
    }

    /// Create a new mutable [`Bucket`] without checking that it is non-empty.
    #[inline]
    pub(crate) const fn new_unchecked_mut(slice: &mut [T]) -> &mut Bucket<T> {
        #[ref_cast_custom]
        #[inline]
        const fn cast_mut<T>(slice: &mut [T]) -> &mut Bucket<T>;

        debug_assert!(!slice.is_empty());
        cast_mut(slice)
    }

    /// Create a new mutable [`Bucket`].
    ///
    /// # Errors
    ///
    /// Returns an error if `slice` is empty.
    #[inline]
    pub const fn new_mut(slice: &mut [T]) -> Result<&mut Self, EmptyBucketError> {
        if slice.is_empty() {
            Err(EmptyBucketError::new(0, 1))
        } else {
            Ok(Self::new_unchecked_mut(slice))
        }
    }

    /// Convert a [`Bucket`] to a regular slice.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Convert a mutable [`Bucket`] to a regular mutable slice.
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<Color: PixelComponents> Bucket<Color> {
    /// Returns the channel-wise mean of the pixels, rounding halves up.
    ///
    /// The rounding is exact: each channel is `(sum + len / 2) / len` in integer arithmetic.
    #[must_use]
    pub fn mean(&self) -> Color {
        let mut sums = [0u64; 3];
        for color in self.as_slice() {
            for (sum, c) in sums.iter_mut().zip(color.channels()) {
                *sum += u64::from(c);
            }
        }

        let n = self.len() as u64;
        #[allow(clippy::cast_possible_truncation)]
        let mean = sums.map(|sum| ((sum + n / 2) / n) as u8);
        Color::from_channels(mean)
    }
}

impl<T> Deref for Bucket<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for Bucket<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Bucket<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<'a, T> TryFrom<&'a [T]> for &'a Bucket<T> {
    type Error = EmptyBucketError;

    #[inline]
    fn try_from(slice: &'a [T]) -> Result<Self, Self::Error> {
        Bucket::new(slice)
    }
}

impl<'a, T> TryFrom<&'a mut [T]> for &'a mut Bucket<T> {
    type Error = EmptyBucketError;

    #[inline]
    fn try_from(slice: &'a mut [T]) -> Result<Self, Self::Error> {
        Bucket::new_mut(slice)
    }
}

impl<'a, T> IntoIterator for &'a Bucket<T> {
    type Item = &'a T;

    type IntoIter = <&'a [T] as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;

    #[test]
    fn empty_slice_rejected() {
        let empty: &[Srgb<u8>] = &[];
        assert_eq!(Bucket::new(empty), Err(EmptyBucketError::new(0, 1)));
        assert_eq!(<&Bucket<_>>::try_from(empty), Err(EmptyBucketError::new(0, 1)));

        let empty: &mut [Srgb<u8>] = &mut [];
        assert_eq!(Bucket::new_mut(empty), Err(EmptyBucketError::new(0, 1)));
        assert_eq!(<&mut Bucket<_>>::try_from(empty), Err(EmptyBucketError::new(0, 1)));
    }

    #[test]
    fn non_empty_slice_accepted() {
        let mut colors = [Srgb::new(3, 2, 1), Srgb::new(1, 2, 3)];

        let bucket = <&Bucket<_>>::try_from(&colors[..]).unwrap();
        assert_eq!(bucket.as_slice(), colors);

        let bucket = <&mut Bucket<_>>::try_from(&mut colors[..]).unwrap();
        bucket.reverse();
        assert_eq!(colors, [Srgb::new(1, 2, 3), Srgb::new(3, 2, 1)]);

        let bucket = Bucket::new_mut(&mut colors).unwrap();
        bucket.as_mut_slice()[0] = Srgb::new(9, 9, 9);
        assert_eq!(bucket.len(), 2);
        assert_eq!(colors[0], Srgb::new(9, 9, 9));
    }

    #[test]
    fn mean_rounds_exactly() {
        let colors = [Srgb::new(0, 0, 0), Srgb::new(0, 0, 1), Srgb::new(0, 0, 2)];
        assert_eq!(Bucket::new(&colors).unwrap().mean(), Srgb::new(0, 0, 1));
    }

    #[test]
    fn mean_rounds_half_up() {
        let colors = [Srgb::new(0, 10, 254), Srgb::new(1, 11, 255)];
        assert_eq!(Bucket::new(&colors).unwrap().mean(), Srgb::new(1, 11, 255));

        let colors = [Srgb::new(0, 0, 0), Srgb::new(0, 0, 0), Srgb::new(1, 2, 2)];
        assert_eq!(Bucket::new(&colors).unwrap().mean(), Srgb::new(0, 1, 1));
    }

    #[test]
    fn single_pixel_mean() {
        let colors = [Srgb::new(12, 34, 56)];
        assert_eq!(Bucket::new(&colors).unwrap().mean(), colors[0]);
    }
}
