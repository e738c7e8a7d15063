//! Color quantization by median cut.
//!
//! The input pixels start out as a single bucket. At each depth, every bucket is sorted by the
//! channel with the largest range (`max - min`) and split in half at the median. Once
//! [`MaxDepth`] is reached, each bucket is replaced by the mean of its pixels. The result is a
//! palette of `2^depth` colors, ordered by a left-to-right, depth-first traversal of the split tree.
//!
//! Ties between channel ranges go to red, then green, then blue. Sorting is stable, so pixels with
//! the same value in the split channel keep their input order, and the same input always yields
//! the same palette. The split index is `len / 2`, so the right half gets the extra pixel of an
//! odd-length bucket. Means are rounded half up.
//!
//! Inputs with fewer than `2^depth` pixels cannot fill every bucket. See [`SmallInput`] for how
//! such inputs are handled.
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), mediancut::QuantizeError> {
//! use mediancut::{MaxDepth, MedianCut, SmallInput};
//! use palette::Srgb;
//!
//! let pixels = vec![Srgb::new(10, 20, 30), Srgb::new(200, 100, 0), Srgb::new(0, 255, 0)];
//!
//! let palette = MedianCut::new()
//!     .max_depth(MaxDepth::try_from_u8(2).unwrap())
//!     .small_input(SmallInput::Truncate)
//!     .palette(&pixels)?;
//!
//! assert_eq!(palette.len(), 3);
//! # Ok(())
//! # }
//! ```

use crate::{
    Bucket, ChannelRanges, EmptyBucketError, MAX_PIXELS, MaxDepth, PixelComponents, QuantizeError,
};
use core::{error::Error, fmt, iter, ops::Range, str::FromStr};
use tracing::{debug, trace};

/// How to handle inputs with fewer pixels than the palette size.
///
/// Splitting a bucket with `len >= 2^k` pixels gives halves with at least `2^(k - 1)` pixels each,
/// so an input with at least `2^depth` pixels never produces an empty bucket. With fewer pixels,
/// some bucket ends up holding a single pixel before the max depth is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SmallInput {
    /// Return an [`EmptyBucketError`] before doing any work.
    #[default]
    Reject,
    /// Reuse a single-pixel bucket for both of its children.
    ///
    /// The palette still has exactly `2^depth` colors, with that pixel's color repeated.
    Duplicate,
    /// Stop splitting a single-pixel bucket.
    ///
    /// The palette has fewer than `2^depth` colors.
    Truncate,
}

impl fmt::Display for SmallInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reject => "reject",
            Self::Duplicate => "duplicate",
            Self::Truncate => "truncate",
        })
    }
}

/// The error returned when parsing an unknown [`SmallInput`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmallInputFromStrError(());

impl fmt::Display for SmallInputFromStrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected one of {}, {}, or {}",
            SmallInput::Reject,
            SmallInput::Duplicate,
            SmallInput::Truncate,
        )
    }
}

impl Error for SmallInputFromStrError {}

impl FromStr for SmallInput {
    type Err = SmallInputFromStrError;

    /// Parses the lowercase names printed by [`Display`](fmt::Display).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "reject" => Ok(Self::Reject),
            "duplicate" => Ok(Self::Duplicate),
            "truncate" => Ok(Self::Truncate),
            _ => Err(SmallInputFromStrError(())),
        }
    }
}

/// The options for median cut quantization.
///
/// This struct has a builder API. See the docs for each of the following functions for more details:
/// - [`max_depth`](`Self::max_depth`)
/// - [`small_input`](`Self::small_input`)
///
/// The quantization functions take `&self`, so one [`MedianCut`] can be reused for many inputs.
///
/// # Examples
///
/// ```
/// # use mediancut::{MaxDepth, MedianCut, SmallInput};
/// MedianCut::new()
///     .max_depth(MaxDepth::from_u8_clamped(4))
///     .small_input(SmallInput::Duplicate);
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MedianCut {
    /// The number of times to split the input.
    max_depth: MaxDepth,
    /// The policy for inputs smaller than the palette size.
    small_input: SmallInput,
}

impl MedianCut {
    /// Buckets smaller than this are split on the current thread by the parallel functions.
    #[cfg(feature = "threads")]
    pub const PAR_THRESHOLD: usize = 4096;

    /// Create a new [`MedianCut`] with default options.
    #[inline]
    pub const fn new() -> Self {
        Self {
            max_depth: MaxDepth::DEFAULT,
            small_input: SmallInput::Reject,
        }
    }

    /// Sets the max depth of the split tree. The palette will have `2^max_depth` colors.
    ///
    /// The default max depth is [`MaxDepth::DEFAULT`] (8 colors).
    #[inline]
    pub const fn max_depth(self, max_depth: MaxDepth) -> Self {
        Self { max_depth, ..self }
    }

    /// Sets the policy for inputs with fewer pixels than the palette size.
    ///
    /// The default is [`SmallInput::Reject`].
    #[inline]
    pub const fn small_input(self, small_input: SmallInput) -> Self {
        Self { small_input, ..self }
    }

    /// Returns the current max depth.
    #[inline]
    pub const fn get_max_depth(&self) -> MaxDepth {
        self.max_depth
    }

    /// Returns the current small input policy.
    #[inline]
    pub const fn get_small_input(&self) -> SmallInput {
        self.small_input
    }

    /// Returns the minimum number of pixels accepted by these options.
    #[must_use]
    #[inline]
    pub const fn min_pixels(&self) -> usize {
        match self.small_input {
            SmallInput::Reject => self.max_depth.palette_size(),
            SmallInput::Duplicate | SmallInput::Truncate => 1,
        }
    }

    /// Validate the input length before doing any work.
    fn check(&self, len: usize) -> Result<(), QuantizeError> {
        #[cfg_attr(target_pointer_width = "32", allow(clippy::absurd_extreme_comparisons))]
        let too_long = len > MAX_PIXELS as usize;
        if too_long {
            return Err(QuantizeError::TooManyPixels { len });
        }

        let required = self.min_pixels();
        if len < required {
            return Err(EmptyBucketError::new(len, required).into());
        }

        debug!(
            len,
            max_depth = %self.max_depth,
            small_input = %self.small_input,
            palette_size = self.max_depth.palette_size(),
            "median cut"
        );

        Ok(())
    }

    /// Compute the palette for a slice of pixels.
    ///
    /// The input is copied before sorting. Use [`palette_in_place`](Self::palette_in_place) to
    /// avoid the copy.
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels` is empty, has fewer than [`min_pixels`](Self::min_pixels),
    /// or is longer than [`MAX_PIXELS`].
    pub fn palette<Color: PixelComponents>(
        &self,
        pixels: &[Color],
    ) -> Result<Vec<Color>, QuantizeError> {
        Ok(self.partition(pixels)?.palette())
    }

    /// Compute the palette for a slice of pixels, reordering the slice in the process.
    ///
    /// # Errors
    ///
    /// See [`palette`](Self::palette).
    pub fn palette_in_place<Color: PixelComponents>(
        &self,
        pixels: &mut [Color],
    ) -> Result<Vec<Color>, QuantizeError> {
        self.check(pixels.len())?;
        let leaves = self.leaves(pixels);
        Ok(means(pixels, &leaves))
    }

    /// Split a copy of the input into its leaf buckets without averaging them.
    ///
    /// # Errors
    ///
    /// See [`palette`](Self::palette).
    pub fn partition<Color: PixelComponents>(
        &self,
        pixels: &[Color],
    ) -> Result<Partition<Color>, QuantizeError> {
        self.check(pixels.len())?;
        let mut pixels = pixels.to_vec();
        let leaves = self.leaves(&mut pixels);
        Ok(Partition { pixels, leaves })
    }

    /// Split an owned buffer into its leaf buckets without averaging them.
    ///
    /// # Errors
    ///
    /// See [`palette`](Self::palette).
    pub fn partition_vec<Color: PixelComponents>(
        &self,
        mut pixels: Vec<Color>,
    ) -> Result<Partition<Color>, QuantizeError> {
        self.check(pixels.len())?;
        let leaves = self.leaves(&mut pixels);
        Ok(Partition { pixels, leaves })
    }

    /// Returns the leaf ranges of the split tree in left-to-right order.
    ///
    /// Traverses with an explicit stack, so the call stack does not grow with the depth.
    fn leaves<Color: PixelComponents>(&self, pixels: &mut [Color]) -> Vec<Range<usize>> {
        let mut leaves = Vec::with_capacity(self.max_depth.palette_size().min(pixels.len()));
        split_tree(pixels, 0, 0, *self, &mut leaves);
        leaves
    }
}

/// Split `pixels` into leaf buckets, pushing their ranges (shifted by `offset`) onto `leaves`.
///
/// `pixels` must be non-empty and is the bucket at `depth`.
fn split_tree<Color: PixelComponents>(
    pixels: &mut [Color],
    offset: usize,
    depth: u8,
    options: MedianCut,
    leaves: &mut Vec<Range<usize>>,
) {
    let MedianCut { max_depth, small_input } = options;
    let max_depth = max_depth.as_u8();

    // Right children are pushed first so the left subtree is finished first.
    let mut stack = Vec::with_capacity(usize::from(max_depth - depth) + 1);
    stack.push((0..pixels.len(), depth));

    while let Some((range, depth)) = stack.pop() {
        let leaf = (range.start + offset)..(range.end + offset);

        if depth == max_depth {
            leaves.push(leaf);
            continue;
        }

        let bucket = Bucket::new_unchecked_mut(&mut pixels[range.clone()]);

        if bucket.len() == 1 {
            match small_input {
                SmallInput::Truncate => leaves.push(leaf),
                // `Reject` never gets here, since `check` requires `2^depth` pixels.
                SmallInput::Reject | SmallInput::Duplicate => {
                    leaves.extend(iter::repeat_n(leaf, 1 << (max_depth - depth)));
                }
            }
            continue;
        }

        let mid = range.start + sort_widest(bucket, depth);
        stack.push((mid..range.end, depth + 1));
        stack.push((range.start..mid, depth + 1));
    }
}

/// Sort a bucket of at least two pixels by its widest channel and return the split index.
fn sort_widest<Color: PixelComponents>(bucket: &mut Bucket<Color>, depth: u8) -> usize {
    let channel = ChannelRanges::of(bucket).widest();
    trace!(depth, len = bucket.len(), %channel, "split");
    bucket.sort_by_key(|color| channel.of(color));
    bucket.len() / 2
}

/// Collapse each leaf range of `pixels` into its mean color.
fn means<Color: PixelComponents>(pixels: &[Color], leaves: &[Range<usize>]) -> Vec<Color> {
    leaves
        .iter()
        .map(|range| Bucket::new_unchecked(&pixels[range.clone()]).mean())
        .collect()
}

/// The leaf buckets of a median cut, stored as ranges into the sorted pixel buffer.
///
/// Created by [`MedianCut::partition`] or [`MedianCut::partition_vec`]
/// (and their parallel versions).
///
/// Every input pixel is in exactly one leaf bucket, except under [`SmallInput::Duplicate`] where a
/// single-pixel bucket may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<Color> {
    /// The input pixels, reordered by the splits.
    pixels: Vec<Color>,
    /// The range of each leaf bucket in `pixels`, left to right.
    leaves: Vec<Range<usize>>,
}

impl<Color> Partition<Color> {
    /// Returns the number of leaf buckets.
    #[must_use]
    #[inline]
    pub fn num_buckets(&self) -> usize {
        self.leaves.len()
    }

    /// Returns an iterator over the leaf buckets in palette order.
    #[inline]
    pub fn buckets(&self) -> impl ExactSizeIterator<Item = &Bucket<Color>> + '_ {
        self.leaves
            .iter()
            .map(|range| Bucket::new_unchecked(&self.pixels[range.clone()]))
    }

    /// Returns the ranges of the leaf buckets into [`pixels`](Self::pixels).
    #[inline]
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.leaves
    }

    /// Returns the pixels, reordered so that each leaf bucket is contiguous.
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Consume a [`Partition`] and return the reordered pixels.
    #[must_use]
    #[inline]
    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }
}

impl<Color: PixelComponents> Partition<Color> {
    /// Compute the palette: the mean color of each leaf bucket.
    #[must_use]
    pub fn palette(&self) -> Vec<Color> {
        means(&self.pixels, &self.leaves)
    }
}

/// Quantize `pixels` into `2^max_depth` colors using the default [`MedianCut`] options.
///
/// # Errors
///
/// Returns an error if `pixels` has fewer than `2^max_depth` pixels
/// or more than [`MAX_PIXELS`] pixels.
pub fn quantize<Color: PixelComponents>(
    pixels: &[Color],
    max_depth: MaxDepth,
) -> Result<Vec<Color>, QuantizeError> {
    MedianCut::new().max_depth(max_depth).palette(pixels)
}

#[cfg(feature = "threads")]
mod parallel {
    use super::{MedianCut, Partition, split_tree};
    use crate::{Bucket, ChannelRanges, MaxDepth, PixelComponents, QuantizeError};
    use core::ops::Range;
    use rayon::prelude::*;
    use tracing::trace;

    impl MedianCut {
        /// Compute the palette for a slice of pixels in parallel.
        ///
        /// The output is identical to [`palette`](Self::palette).
        ///
        /// # Errors
        ///
        /// See [`palette`](Self::palette).
        pub fn palette_par<Color: PixelComponents>(
            &self,
            pixels: &[Color],
        ) -> Result<Vec<Color>, QuantizeError> {
            Ok(self.partition_par(pixels)?.palette_par())
        }

        /// Compute the palette for a slice of pixels in parallel, reordering the slice.
        ///
        /// # Errors
        ///
        /// See [`palette`](Self::palette).
        pub fn palette_in_place_par<Color: PixelComponents>(
            &self,
            pixels: &mut [Color],
        ) -> Result<Vec<Color>, QuantizeError> {
            self.check(pixels.len())?;
            let leaves = self.leaves_par(pixels);
            Ok(means_par(pixels, &leaves))
        }

        /// Split a copy of the input into its leaf buckets in parallel.
        ///
        /// # Errors
        ///
        /// See [`palette`](Self::palette).
        pub fn partition_par<Color: PixelComponents>(
            &self,
            pixels: &[Color],
        ) -> Result<Partition<Color>, QuantizeError> {
            self.check(pixels.len())?;
            let mut pixels = pixels.to_vec();
            let leaves = self.leaves_par(&mut pixels);
            Ok(Partition { pixels, leaves })
        }

        /// Split an owned buffer into its leaf buckets in parallel.
        ///
        /// # Errors
        ///
        /// See [`palette`](Self::palette).
        pub fn partition_vec_par<Color: PixelComponents>(
            &self,
            mut pixels: Vec<Color>,
        ) -> Result<Partition<Color>, QuantizeError> {
            self.check(pixels.len())?;
            let leaves = self.leaves_par(&mut pixels);
            Ok(Partition { pixels, leaves })
        }

        fn leaves_par<Color: PixelComponents>(&self, pixels: &mut [Color]) -> Vec<Range<usize>> {
            split_tree_par(Bucket::new_unchecked_mut(pixels), 0, 0, *self)
        }
    }

    /// Split the two halves of each bucket with `rayon::join`.
    ///
    /// Recursion depth is bounded by [`MaxDepth::MAX`].
    fn split_tree_par<Color: PixelComponents>(
        bucket: &mut Bucket<Color>,
        offset: usize,
        depth: u8,
        options: MedianCut,
    ) -> Vec<Range<usize>> {
        let max_depth = options.get_max_depth().as_u8();

        if depth == max_depth || bucket.len() < MedianCut::PAR_THRESHOLD {
            let mut leaves = Vec::with_capacity(bucket.len().min(1 << (max_depth - depth)));
            split_tree(bucket, offset, depth, options, &mut leaves);
            return leaves;
        }

        let mid = sort_widest_par(bucket, depth);
        let (left, right) = bucket.split_at_mut(mid);
        let (left, right) = (
            Bucket::new_unchecked_mut(left),
            Bucket::new_unchecked_mut(right),
        );

        let (mut leaves, right) = rayon::join(
            || split_tree_par(left, offset, depth + 1, options),
            || split_tree_par(right, offset + mid, depth + 1, options),
        );

        leaves.extend(right);
        leaves
    }

    /// [`sort_widest`](super::sort_widest) with a parallel (still stable) sort.
    fn sort_widest_par<Color: PixelComponents>(bucket: &mut Bucket<Color>, depth: u8) -> usize {
        let channel = ChannelRanges::of(bucket).widest();
        trace!(depth, len = bucket.len(), %channel, "split");
        bucket.par_sort_by_key(|color| channel.of(color));
        bucket.len() / 2
    }

    fn means_par<Color: PixelComponents>(
        pixels: &[Color],
        leaves: &[Range<usize>],
    ) -> Vec<Color> {
        leaves
            .par_iter()
            .map(|range| Bucket::new_unchecked(&pixels[range.clone()]).mean())
            .collect()
    }

    impl<Color: PixelComponents> Partition<Color> {
        /// Compute the palette in parallel.
        #[must_use]
        pub fn palette_par(&self) -> Vec<Color> {
            means_par(&self.pixels, &self.leaves)
        }
    }

    /// Parallel version of [`quantize`](super::quantize).
    ///
    /// # Errors
    ///
    /// See [`quantize`](super::quantize).
    pub fn quantize_par<Color: PixelComponents>(
        pixels: &[Color],
        max_depth: MaxDepth,
    ) -> Result<Vec<Color>, QuantizeError> {
        MedianCut::new().max_depth(max_depth).palette_par(pixels)
    }
}

#[cfg(feature = "threads")]
pub use parallel::quantize_par;
