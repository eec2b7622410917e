use thiserror::Error;

/// Errors returned by the bit/byte primitives.
///
/// These are precondition violations: the caller asked for something the
/// integer or the text cannot represent.
///
/// # Examples
/// ```
/// use lightwire_core::bits::{BitsError, extract_bits};
///
/// let err = extract_bits(0xFFu8, 4..=8).unwrap_err();
/// assert!(matches!(err, BitsError::RangeOutOfWidth { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitsError {
    #[error("bit range {low}..={high} exceeds a {width}-bit integer")]
    RangeOutOfWidth { low: u32, high: u32, width: u32 },
    #[error("empty bit range {low}..={high}")]
    EmptyRange { low: u32, high: u32 },
    #[error("byte width {len} is not supported (max 8)")]
    WidthTooLarge { len: usize },
    #[error("value {value:#x} does not fit in {len} bytes")]
    ValueTooWide { value: u64, len: usize },
    #[error("radix {radix} outside 2..=36")]
    InvalidRadix { radix: u32 },
    #[error("invalid digit in {text:?} for radix {radix}")]
    InvalidDigits { text: String, radix: u32 },
    #[error("hex string has odd length {len}")]
    OddHexLength { len: usize },
    #[error("expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),
}
