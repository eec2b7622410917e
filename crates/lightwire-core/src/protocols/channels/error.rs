use thiserror::Error;

use crate::bits::BitsError;

/// Errors returned when building or reading channel blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("channel range {start}..={end} is empty")]
    EmptyRange { start: u16, end: u16 },
    #[error("channel range {start}..={end} is outside 1..=512")]
    RangeOutOfBounds { start: u16, end: u16 },
    #[error("block spans {count} channels, at most 127 allowed")]
    TooManyChannels { count: usize },
    #[error("range holds {expected} channels but {actual} values were given")]
    ValueCountMismatch { expected: usize, actual: usize },
    #[error("block truncated: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error(transparent)]
    Bits(#[from] BitsError),
}
