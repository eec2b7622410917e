use std::ops::RangeInclusive;

use super::error::BitsError;

/// Unsigned integers the bit helpers can slice.
pub trait UnsignedBits: Copy {
    const BITS: u32;

    fn widen(self) -> u64;
}

macro_rules! impl_unsigned_bits {
    ($($ty:ty),*) => {
        $(
            impl UnsignedBits for $ty {
                const BITS: u32 = <$ty>::BITS;

                fn widen(self) -> u64 {
                    u64::from(self)
                }
            }
        )*
    };
}

impl_unsigned_bits!(u8, u16, u32, u64);

/// Extract the inclusive bit range `range` (bit 0 is the least significant)
/// from `value`, right-aligned.
///
/// # Examples
/// ```
/// use lightwire_core::bits::extract_bits;
///
/// assert_eq!(extract_bits(0b1100_0000u8, 6..=7).unwrap(), 0b11);
/// assert_eq!(extract_bits(0x0600u16, 9..=15).unwrap(), 3);
/// ```
///
/// # Errors
/// Returns `BitsError::RangeOutOfWidth` when the upper bound is not a bit of
/// `T`, and `BitsError::EmptyRange` when `low > high`.
pub fn extract_bits<T: UnsignedBits>(value: T, range: RangeInclusive<u32>) -> Result<u64, BitsError> {
    let (low, high) = (*range.start(), *range.end());
    if low > high {
        return Err(BitsError::EmptyRange { low, high });
    }
    if high >= T::BITS {
        return Err(BitsError::RangeOutOfWidth {
            low,
            high,
            width: T::BITS,
        });
    }
    let width = high - low + 1;
    let mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
    Ok((value.widen() >> low) & mask)
}

/// Single-bit form of [`extract_bits`].
///
/// # Errors
/// Returns `BitsError::RangeOutOfWidth` when `position` is not a bit of `T`.
pub fn bit_at<T: UnsignedBits>(value: T, position: u32) -> Result<bool, BitsError> {
    extract_bits(value, position..=position).map(|bit| bit == 1)
}

/// A bit group inside a single status byte, kept as table data.
///
/// Construction is `const` and rejects groups that do not fit in a byte at
/// compile time, so extraction itself cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    low: u8,
    width: u8,
}

impl BitField {
    pub const fn new(low: u8, width: u8) -> Self {
        assert!(width > 0 && low + width <= 8, "bit field outside a byte");
        Self { low, width }
    }

    pub const fn flag(position: u8) -> Self {
        Self::new(position, 1)
    }

    pub const fn low(self) -> u8 {
        self.low
    }

    pub const fn high(self) -> u8 {
        self.low + self.width - 1
    }

    pub const fn width(self) -> u8 {
        self.width
    }

    pub fn extract(self, byte: u8) -> u8 {
        let mask = ((1u16 << self.width) - 1) as u8;
        (byte >> self.low) & mask
    }

    pub fn is_set(self, byte: u8) -> bool {
        self.extract(byte) != 0
    }

    pub fn insert(self, byte: u8, value: u8) -> u8 {
        let mask = (((1u16 << self.width) - 1) as u8) << self.low;
        (byte & !mask) | ((value << self.low) & mask)
    }
}
