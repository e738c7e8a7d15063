use core::{error::Error, fmt, num::ParseIntError, str::FromStr};

/// The error returned when a value cannot be converted into a [`MaxDepth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaxDepthError {
    /// The value was negative or above [`MaxDepth::MAX`].
    OutOfRange,
    /// The string was not an integer.
    Parse(ParseIntError),
}

impl fmt::Display for MaxDepthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => write!(
                f,
                "max depth must be in the range {}..={}",
                MaxDepth::MIN.as_u8(),
                MaxDepth::MAX.as_u8(),
            ),
            Self::Parse(err) => write!(f, "max depth must be an integer: {err}"),
        }
    }
}

impl Error for MaxDepthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OutOfRange => None,
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<ParseIntError> for MaxDepthError {
    #[inline]
    fn from(err: ParseIntError) -> Self {
        Self::Parse(err)
    }
}

/// The number of times the input is split in half, which determines the palette size.
///
/// A median cut with a max depth of `d` produces `2^d` colors. This is a simple new type
/// wrapper around `u8` with the invariant that it must be in the range `0..=31` specified by
/// [`MaxDepth::MIN`] and [`MaxDepth::MAX`]. The [`Default`] is [`MaxDepth::DEFAULT`], which is `3`.
///
/// # Examples
///
/// ```
/// # use mediancut::{MaxDepth, MaxDepthError};
/// # fn main() -> Result<(), MaxDepthError> {
/// let depth: MaxDepth = 4u8.try_into()?;
/// assert_eq!(depth.palette_size(), 16);
/// assert_eq!(MaxDepth::try_from(-1i32), Err(MaxDepthError::OutOfRange));
/// assert_eq!(MaxDepth::from_u8_clamped(200), MaxDepth::MAX);
/// assert_eq!("3".parse::<MaxDepth>()?, MaxDepth::DEFAULT);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MaxDepth(u8);

impl MaxDepth {
    /// The smallest max depth, which is `0` (a single color).
    pub const MIN: Self = Self(0);

    /// The largest max depth, which is `31`.
    ///
    /// `2^31` colors is the largest palette that fits in [`MAX_PIXELS`](crate::MAX_PIXELS).
    pub const MAX: Self = Self(31);

    /// The default max depth, which is `3` (8 colors).
    pub const DEFAULT: Self = Self(3);

    /// Returns a [`MaxDepth`] as a `u8`.
    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Returns a [`MaxDepth`] as a `usize`.
    #[inline]
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Returns the number of colors produced at this depth, `2^depth`.
    #[inline]
    pub const fn palette_size(&self) -> usize {
        1 << self.0
    }

    /// Create a [`MaxDepth`] from a `u8`, returning `None` if the provided `value`
    /// is greater than [`MaxDepth::MAX`].
    #[must_use]
    #[inline]
    pub const fn try_from_u8(value: u8) -> Option<Self> {
        if value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a [`MaxDepth`] from a `u8`, clamping the provided `value` to
    /// a maximum of [`MaxDepth::MAX`].
    #[must_use]
    #[inline]
    pub const fn from_u8_clamped(value: u8) -> Self {
        if let Some(depth) = Self::try_from_u8(value) {
            depth
        } else {
            Self::MAX
        }
    }
}

impl Default for MaxDepth {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for MaxDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<MaxDepth> for u8 {
    #[inline]
    fn from(depth: MaxDepth) -> Self {
        depth.as_u8()
    }
}

impl From<MaxDepth> for usize {
    #[inline]
    fn from(depth: MaxDepth) -> Self {
        depth.as_usize()
    }
}

impl TryFrom<u8> for MaxDepth {
    type Error = MaxDepthError;

    #[inline]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from_u8(value).ok_or(MaxDepthError::OutOfRange)
    }
}

impl TryFrom<i32> for MaxDepth {
    type Error = MaxDepthError;

    #[inline]
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::try_from_u8)
            .ok_or(MaxDepthError::OutOfRange)
    }
}

impl TryFrom<usize> for MaxDepth {
    type Error = MaxDepthError;

    #[inline]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::try_from_u8)
            .ok_or(MaxDepthError::OutOfRange)
    }
}

impl FromStr for MaxDepth {
    type Err = MaxDepthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>()?.try_into()
    }
}

impl TryFrom<i64> for MaxDepth {
    type Error = MaxDepthError;

    #[inline]
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::try_from_u8)
            .ok_or(MaxDepthError::OutOfRange)
    }
}

impl PartialEq<u8> for MaxDepth {
    #[inline]
    fn eq(&self, other: &u8) -> bool {
        self.as_u8() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_sizes() {
        assert_eq!(MaxDepth::MIN.palette_size(), 1);
        assert_eq!(MaxDepth::DEFAULT.palette_size(), 8);
        assert_eq!(MaxDepth::MAX.palette_size(), 1 << 31);
        assert!(MaxDepth::MAX.palette_size() <= crate::MAX_PIXELS as usize);
        assert_eq!(MaxDepth::default(), MaxDepth::DEFAULT);
    }

    #[test]
    fn out_of_range() {
        assert_eq!(MaxDepth::try_from(32u8), Err(MaxDepthError::OutOfRange));
        assert_eq!(MaxDepth::try_from(-3i32), Err(MaxDepthError::OutOfRange));
        assert_eq!(MaxDepth::try_from(1000usize), Err(MaxDepthError::OutOfRange));
        assert_eq!(MaxDepth::try_from(17i32).map(u8::from), Ok(17));
        assert_eq!(MaxDepth::try_from(31i32), Ok(MaxDepth::MAX));
        assert_eq!(MaxDepth::from_u8_clamped(32), MaxDepth::MAX);
    }

    #[test]
    fn parse() {
        assert_eq!("0".parse::<MaxDepth>(), Ok(MaxDepth::MIN));
        assert_eq!(" 5 ".parse::<MaxDepth>().map(u8::from), Ok(5));
        assert_eq!("-1".parse::<MaxDepth>(), Err(MaxDepthError::OutOfRange));
        assert_eq!("32".parse::<MaxDepth>(), Err(MaxDepthError::OutOfRange));
        assert!(matches!("2.5".parse::<MaxDepth>(), Err(MaxDepthError::Parse(_))));
        assert!(matches!("three".parse::<MaxDepth>(), Err(MaxDepthError::Parse(_))));
    }
}
