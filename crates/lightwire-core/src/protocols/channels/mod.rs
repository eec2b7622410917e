//! DMX channel blocks for the BLE fixture link.
//!
//! A block is a 2-byte header (channel count and first channel) followed by
//! the channel levels. Blocks are concatenated greedily into writes no
//! larger than the characteristic's MTU.

pub mod block;
pub mod error;
pub mod layout;
pub mod packer;

pub use block::{ChannelBlock, build_channel_block, parse_channel_blocks};
pub use error::ChannelError;
pub use layout::DEFAULT_MTU;
pub use packer::{OversizedBlock, TransferPlan, pack_for_transfer, plan_transfer};
