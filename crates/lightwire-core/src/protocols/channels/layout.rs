use crate::bits::ByteOrder;

pub const FIRST_CHANNEL: u16 = 1;
pub const LAST_CHANNEL: u16 = 512;
pub const MAX_BLOCK_CHANNELS: usize = 127;

pub const HEADER_LEN: usize = 2;
pub const HEADER_ORDER: ByteOrder = ByteOrder::Little;
/// Channel count sits above the 9 bits of `start - 1`.
pub const COUNT_SHIFT: u32 = 9;
pub const START_MASK: u16 = (1 << COUNT_SHIFT) - 1;

/// Largest single write the fixture's characteristic accepts.
pub const DEFAULT_MTU: usize = 247;

pub const MAX_BLOCK_LEN: usize = HEADER_LEN + MAX_BLOCK_CHANNELS;
