use serde::{Deserialize, Serialize};

use super::error::BitsError;
use super::field::UnsignedBits;

/// Byte order of a multi-byte wire field.
///
/// Art-Net mixes both inside one frame, so order is chosen per field rather
/// than per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

impl ByteOrder {
    pub fn flipped(self) -> Self {
        match self {
            ByteOrder::Big => ByteOrder::Little,
            ByteOrder::Little => ByteOrder::Big,
        }
    }
}

/// Byte width of the integer type `T`, whatever value it holds.
pub fn natural_width<T: UnsignedBits>() -> usize {
    T::BITS as usize / 8
}

/// Encode `value` into exactly `len` bytes (the width of `T` when `None`).
///
/// # Examples
/// ```
/// use lightwire_core::bits::{ByteOrder, uint_to_bytes};
///
/// assert_eq!(uint_to_bytes(0x5000u16, Some(2), ByteOrder::Little).unwrap(), vec![0x00, 0x50]);
/// assert_eq!(uint_to_bytes(14u64, Some(2), ByteOrder::Big).unwrap(), vec![0x00, 0x0E]);
/// assert_eq!(uint_to_bytes(1u16, None, ByteOrder::Big).unwrap(), vec![0x00, 0x01]);
/// ```
///
/// # Errors
/// Returns `BitsError::WidthTooLarge` for `len > 8` and
/// `BitsError::ValueTooWide` when `value` would be truncated.
pub fn uint_to_bytes<T: UnsignedBits>(
    value: T,
    len: Option<usize>,
    order: ByteOrder,
) -> Result<Vec<u8>, BitsError> {
    let len = len.unwrap_or_else(natural_width::<T>);
    let value = value.widen();
    if len > 8 {
        return Err(BitsError::WidthTooLarge { len });
    }
    if len < 8 && value >> (len * 8) != 0 {
        return Err(BitsError::ValueTooWide { value, len });
    }
    let le = value.to_le_bytes();
    let mut out = le[..len].to_vec();
    if order == ByteOrder::Big {
        out.reverse();
    }
    Ok(out)
}

/// Decode up to eight bytes as an unsigned integer.
///
/// # Errors
/// Returns `BitsError::WidthTooLarge` when `bytes` is longer than eight.
pub fn uint_from_bytes(bytes: &[u8], order: ByteOrder) -> Result<u64, BitsError> {
    if bytes.len() > 8 {
        return Err(BitsError::WidthTooLarge { len: bytes.len() });
    }
    let fold = |acc: u64, byte: &u8| (acc << 8) | u64::from(*byte);
    Ok(match order {
        ByteOrder::Big => bytes.iter().fold(0, fold),
        ByteOrder::Little => bytes.iter().rev().fold(0, fold),
    })
}

#[cfg(test)]
mod tests {
    use super::{ByteOrder, natural_width, uint_from_bytes, uint_to_bytes};
    use crate::bits::BitsError;

    #[test]
    fn natural_width_follows_the_type() {
        assert_eq!(natural_width::<u8>(), 1);
        assert_eq!(natural_width::<u16>(), 2);
        assert_eq!(natural_width::<u32>(), 4);
        assert_eq!(natural_width::<u64>(), 8);
    }

    #[test]
    fn default_width_keeps_leading_zero_bytes() {
        assert_eq!(uint_to_bytes(1u16, None, ByteOrder::Little).unwrap(), vec![1, 0]);
        assert_eq!(uint_to_bytes(1u16, None, ByteOrder::Big).unwrap(), vec![0, 1]);
        assert_eq!(uint_to_bytes(0u32, None, ByteOrder::Big).unwrap(), vec![0; 4]);
        assert_eq!(uint_to_bytes(0xABu8, None, ByteOrder::Big).unwrap(), vec![0xAB]);
    }

    #[test]
    fn pads_to_requested_width() {
        assert_eq!(
            uint_to_bytes(1u32, Some(4), ByteOrder::Big).unwrap(),
            vec![0, 0, 0, 1]
        );
        assert_eq!(
            uint_to_bytes(1u32, Some(4), ByteOrder::Little).unwrap(),
            vec![1, 0, 0, 0]
        );
    }

    #[test]
    fn flipped_order_reverses_output() {
        let big = uint_to_bytes(0x1234u16, Some(2), ByteOrder::Big).unwrap();
        let mut little = uint_to_bytes(0x1234u16, Some(2), ByteOrder::Big.flipped()).unwrap();
        little.reverse();
        assert_eq!(big, little);
    }

    #[test]
    fn rejects_truncation_and_oversized_width() {
        assert_eq!(
            uint_to_bytes(0x1_0000u32, Some(2), ByteOrder::Big).unwrap_err(),
            BitsError::ValueTooWide {
                value: 0x1_0000,
                len: 2
            }
        );
        assert!(matches!(
            uint_to_bytes(1u64, Some(9), ByteOrder::Big),
            Err(BitsError::WidthTooLarge { len: 9 })
        ));
    }

    #[test]
    fn reads_both_orders() {
        assert_eq!(uint_from_bytes(&[0x00, 0x21], ByteOrder::Little).unwrap(), 0x2100);
        assert_eq!(uint_from_bytes(&[0x00, 0x21], ByteOrder::Big).unwrap(), 0x0021);
        assert_eq!(uint_from_bytes(&[], ByteOrder::Big).unwrap(), 0);
        assert!(uint_from_bytes(&[0; 9], ByteOrder::Big).is_err());
    }
}
