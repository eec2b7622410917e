use thiserror::Error;
use tracing::debug;

use crate::bits::BitsError;

/// Errors returned by Art-Net parsing and encoding.
///
/// A payload that simply is not Art-Net (wrong signature) or carries a
/// different opcode is not an error: parsers return `Ok(None)` for it.
///
/// # Examples
/// ```
/// use lightwire_core::protocols::artnet::ArtNetError;
///
/// let err = ArtNetError::OddLength { length: 3 };
/// assert!(err.to_string().contains("even"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtNetError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("payload too long: at most {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
    #[error("invalid data length: {length}")]
    InvalidLength { length: usize },
    #[error("data length {length} must be even")]
    OddLength { length: usize },
    #[error("port address {value:#06x} exceeds 15 bits")]
    InvalidPortAddress { value: u16 },
    #[error("start code must be non-zero")]
    ZeroStartCode,
    #[error("year {year} cannot be expressed relative to 1900")]
    YearOutOfRange { year: i32 },
    #[error("unsupported opcode: {value:#06x}")]
    UnsupportedOpCode { value: u16 },
    #[error(transparent)]
    Bits(#[from] BitsError),
}

/// Collapse a parser result into the `Option` boundary, logging why a frame
/// was rejected.
pub(crate) fn discard_rejected<T>(
    result: Result<Option<T>, ArtNetError>,
    message: &'static str,
) -> Option<T> {
    match result {
        Ok(value) => {
            if value.is_none() {
                debug!(message, "payload is not the expected Art-Net message");
            }
            value
        }
        Err(err) => {
            debug!(message, error = %err, "rejected Art-Net payload");
            None
        }
    }
}
