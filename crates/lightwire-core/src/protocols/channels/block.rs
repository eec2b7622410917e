use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ChannelError;
use super::layout;
use crate::bits::{uint_from_bytes, uint_to_bytes};

/// A run of consecutive DMX channel values with its 2-byte header.
///
/// The header packs `count << 9 ^ (start - 1)` and is sent low byte first,
/// followed by one byte per channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBlock {
    start: u16,
    values: Vec<u8>,
    bytes: Vec<u8>,
}

impl ChannelBlock {
    /// # Examples
    /// ```
    /// use lightwire_core::protocols::channels::ChannelBlock;
    ///
    /// let block = ChannelBlock::new(1..=3, &[10, 20, 30])?;
    /// assert_eq!(block.as_bytes(), &[0x00, 0x06, 10, 20, 30]);
    /// # Ok::<(), lightwire_core::protocols::channels::ChannelError>(())
    /// ```
    ///
    /// # Errors
    /// Fails when the range is empty or leaves `1..=512`, spans more than
    /// 127 channels, or `values` does not have one entry per channel.
    pub fn new(range: RangeInclusive<u16>, values: &[u8]) -> Result<Self, ChannelError> {
        let (start, end) = (*range.start(), *range.end());
        if start > end {
            return Err(ChannelError::EmptyRange { start, end });
        }
        if start < layout::FIRST_CHANNEL || end > layout::LAST_CHANNEL {
            return Err(ChannelError::RangeOutOfBounds { start, end });
        }
        let count = usize::from(end - start) + 1;
        if count > layout::MAX_BLOCK_CHANNELS {
            return Err(ChannelError::TooManyChannels { count });
        }
        if values.len() != count {
            return Err(ChannelError::ValueCountMismatch {
                expected: count,
                actual: values.len(),
            });
        }

        let header = header_for(start, count as u16);
        let mut bytes = uint_to_bytes(header, Some(layout::HEADER_LEN), layout::HEADER_ORDER)?;
        bytes.extend_from_slice(values);

        Ok(Self {
            start,
            values: values.to_vec(),
            bytes,
        })
    }

    /// Cover `values`, beginning at channel `start`, with as few blocks as
    /// the 127-channel limit allows.
    ///
    /// A full 512-channel universe becomes five blocks.
    pub fn split(start: u16, values: &[u8]) -> Result<Vec<ChannelBlock>, ChannelError> {
        let mut blocks = Vec::with_capacity(values.len().div_ceil(layout::MAX_BLOCK_CHANNELS));
        let mut channel = start;
        for chunk in values.chunks(layout::MAX_BLOCK_CHANNELS) {
            let last = u32::from(channel) + chunk.len() as u32 - 1;
            let end = u16::try_from(last).map_err(|_| ChannelError::RangeOutOfBounds {
                start: channel,
                end: u16::MAX,
            })?;
            blocks.push(ChannelBlock::new(channel..=end, chunk)?);
            channel = end.saturating_add(1);
        }
        Ok(blocks)
    }

    /// Read one block from the front of `bytes`, returning it with the
    /// number of bytes consumed.
    pub fn parse(bytes: &[u8]) -> Result<(ChannelBlock, usize), ChannelError> {
        let Some(header_bytes) = bytes.get(..layout::HEADER_LEN) else {
            return Err(ChannelError::Truncated {
                needed: layout::HEADER_LEN,
                actual: bytes.len(),
            });
        };
        let header = uint_from_bytes(header_bytes, layout::HEADER_ORDER)? as u16;
        let count = usize::from(header >> layout::COUNT_SHIFT);
        let start = (header & layout::START_MASK) + 1;
        let needed = layout::HEADER_LEN + count;
        let Some(values) = bytes.get(layout::HEADER_LEN..needed) else {
            return Err(ChannelError::Truncated {
                needed,
                actual: bytes.len(),
            });
        };
        if count == 0 {
            return Err(ChannelError::EmptyRange {
                start,
                end: start - 1,
            });
        }
        let end = start + count as u16 - 1;
        Ok((ChannelBlock::new(start..=end, values)?, needed))
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.start + self.values.len() as u16 - 1
    }

    pub fn channels(&self) -> RangeInclusive<u16> {
        self.start..=self.end()
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn header(&self) -> u16 {
        header_for(self.start, self.values.len() as u16)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for ChannelBlock {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

fn header_for(start: u16, count: u16) -> u16 {
    // start - 1 fits in bits 0..=8 and count in 9..=15, so XOR packs them.
    (count << layout::COUNT_SHIFT) ^ (start - 1)
}

/// Build a block, or `None` when the range or values are invalid.
pub fn build_channel_block(range: RangeInclusive<u16>, values: &[u8]) -> Option<ChannelBlock> {
    match ChannelBlock::new(range, values) {
        Ok(block) => Some(block),
        Err(err) => {
            debug!(error = %err, "rejected channel block");
            None
        }
    }
}

/// Split a concatenation of blocks (one transport write) back into blocks.
pub fn parse_channel_blocks(mut bytes: &[u8]) -> Result<Vec<ChannelBlock>, ChannelError> {
    let mut blocks = Vec::new();
    while !bytes.is_empty() {
        let (block, used) = ChannelBlock::parse(bytes)?;
        blocks.push(block);
        bytes = &bytes[used..];
    }
    Ok(blocks)
}
