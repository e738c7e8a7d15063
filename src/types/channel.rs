use crate::{Bucket, PixelComponents};
use core::fmt;

/// One of the three channels of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// The first channel.
    Red = 0,
    /// The second channel.
    Green = 1,
    /// The third channel.
    Blue = 2,
}

impl Channel {
    /// All channels in tie-breaking order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Returns the index of this channel into a `[u8; 3]`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns this channel's value in the given pixel.
    #[inline]
    pub fn of<Color: PixelComponents>(self, color: &Color) -> u8 {
        color.channels()[self.index()]
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "r",
            Self::Green => "g",
            Self::Blue => "b",
        })
    }
}

/// The per-channel minimum and maximum of a [`Bucket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRanges {
    /// The minimum of each channel.
    min: [u8; 3],
    /// The maximum of each channel.
    max: [u8; 3],
}

impl ChannelRanges {
    /// Compute the channel ranges of a bucket in a single pass.
    #[must_use]
    pub fn of<Color: PixelComponents>(bucket: &Bucket<Color>) -> Self {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        for color in bucket {
            let color = color.channels();
            for ((min, max), c) in min.iter_mut().zip(&mut max).zip(color) {
                *min = (*min).min(c);
                *max = (*max).max(c);
            }
        }
        Self { min, max }
    }

    /// Returns the minimum value of a channel.
    #[inline]
    pub const fn min(&self, channel: Channel) -> u8 {
        self.min[channel.index()]
    }

    /// Returns the maximum value of a channel.
    #[inline]
    pub const fn max(&self, channel: Channel) -> u8 {
        self.max[channel.index()]
    }

    /// Returns `max - min` for a channel.
    #[inline]
    pub const fn range(&self, channel: Channel) -> u8 {
        self.max(channel) - self.min(channel)
    }

    /// Returns the channel with the largest range.
    ///
    /// Ties go to the earliest channel in [`Channel::ALL`]: red, then green, then blue.
    #[must_use]
    pub fn widest(&self) -> Channel {
        let mut widest = Channel::Red;
        for channel in [Channel::Green, Channel::Blue] {
            if self.range(channel) > self.range(widest) {
                widest = channel;
            }
        }
        widest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;

    fn widest(colors: &[Srgb<u8>]) -> Channel {
        ChannelRanges::of(Bucket::new(colors).unwrap()).widest()
    }

    #[test]
    fn ranges() {
        let colors = [Srgb::new(10, 200, 5), Srgb::new(20, 100, 5), Srgb::new(15, 150, 7)];
        let ranges = ChannelRanges::of(Bucket::new(&colors).unwrap());
        assert_eq!(ranges.range(Channel::Red), 10);
        assert_eq!(ranges.range(Channel::Green), 100);
        assert_eq!(ranges.range(Channel::Blue), 2);
        assert_eq!(ranges.min(Channel::Green), 100);
        assert_eq!(ranges.max(Channel::Red), 20);
        assert_eq!(ranges.widest(), Channel::Green);
    }

    #[test]
    fn ties_prefer_red_then_green() {
        let black_white = [Srgb::new(0, 0, 0), Srgb::new(255, 255, 255)];
        assert_eq!(widest(&black_white), Channel::Red);

        let green_blue = [Srgb::new(0, 0, 0), Srgb::new(1, 9, 9)];
        assert_eq!(widest(&green_blue), Channel::Green);

        let blue = [Srgb::new(0, 0, 0), Srgb::new(1, 2, 3)];
        assert_eq!(widest(&blue), Channel::Blue);
    }

    #[test]
    fn single_pixel_has_zero_range() {
        let colors = [Srgb::new(7, 8, 9)];
        let ranges = ChannelRanges::of(Bucket::new(&colors).unwrap());
        for channel in Channel::ALL {
            assert_eq!(ranges.range(channel), 0);
            assert_eq!(channel.of(&colors[0]), ranges.min(channel));
        }
        assert_eq!(ranges.widest(), Channel::Red);
    }
}
