//! Art-Net frame codec.
//!
//! Every message is described by `Field` entries in [`layout`]; the
//! [`reader`] and [`writer`] consume the same tables so offsets and byte
//! order are declared once. OpCodes travel low byte first while the protocol
//! version and most length fields are big endian.
//!
//! Parsers follow one shape: `parse_*` returns `Ok(None)` when the payload is
//! not the requested message (foreign signature or different opcode) and an
//! error when it is that message but malformed. The `decode_*` forms collapse
//! both cases into `None` and log the reason at `debug`.

pub mod dmx;
pub mod error;
pub mod layout;
pub mod nzs;
pub mod opcode;
pub mod packet;
pub mod poll;
pub mod poll_reply;
pub mod reader;
pub mod status;
pub mod sync;
pub mod time_sync;
pub mod writer;

pub use dmx::{ArtDmx, decode_art_dmx, encode_art_dmx, parse_art_dmx};
pub use error::ArtNetError;
pub use nzs::{ArtNzs, decode_art_nzs, encode_art_nzs, parse_art_nzs};
pub use opcode::OpCode;
pub use packet::{ArtNetPacket, decode_packet, parse_packet};
pub use poll::{
    ArtPoll, DiagnosticsPriority, PollFlags, decode_art_poll, encode_art_poll,
    encode_art_poll_with, parse_art_poll,
};
pub use poll_reply::{ArtPollReply, decode_art_poll_reply, parse_art_poll_reply};
pub use status::{
    BootMode, GoodInput, GoodOutput, IndicatorState, MergeMode, Port, PortAddressAuthority,
    PortAddressStyle, PortType, Status1, Status2, Style,
};
pub use sync::{ArtSync, decode_art_sync, encode_art_sync, parse_art_sync};
pub use time_sync::{
    ArtTimeSync, TimeSyncMode, decode_art_time_sync, encode_art_time_sync, parse_art_time_sync,
};
