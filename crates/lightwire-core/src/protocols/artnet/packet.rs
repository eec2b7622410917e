use serde::{Deserialize, Serialize};

use super::dmx::{ArtDmx, parse_art_dmx};
use super::error::{ArtNetError, discard_rejected};
use super::layout;
use super::nzs::{ArtNzs, parse_art_nzs};
use super::opcode::OpCode;
use super::poll::{ArtPoll, parse_art_poll};
use super::poll_reply::{ArtPollReply, parse_art_poll_reply};
use super::reader::ArtNetReader;
use super::sync::{ArtSync, parse_art_sync};
use super::time_sync::{ArtTimeSync, parse_art_time_sync};

/// Any Art-Net message this crate can decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ArtNetPacket {
    Poll(ArtPoll),
    PollReply(Box<ArtPollReply>),
    Dmx(ArtDmx),
    Nzs(ArtNzs),
    Sync(ArtSync),
    TimeSync(ArtTimeSync),
}

impl ArtNetPacket {
    pub fn op_code(&self) -> OpCode {
        match self {
            ArtNetPacket::Poll(_) => OpCode::Poll,
            ArtNetPacket::PollReply(_) => OpCode::PollReply,
            ArtNetPacket::Dmx(_) => OpCode::Dmx,
            ArtNetPacket::Nzs(_) => OpCode::Nzs,
            ArtNetPacket::Sync(_) => OpCode::Sync,
            ArtNetPacket::TimeSync(_) => OpCode::TimeSync,
        }
    }
}

/// Dispatch on the opcode and decode the matching message.
///
/// Returns `Ok(None)` for payloads without the Art-Net signature, however
/// short, and `ArtNetError::UnsupportedOpCode` for Art-Net frames of any
/// other kind.
pub fn parse_packet(payload: &[u8]) -> Result<Option<ArtNetPacket>, ArtNetError> {
    if payload.get(layout::ID.range()) != Some(layout::ARTNET_ID.as_slice()) {
        return Ok(None);
    }
    let reader = ArtNetReader::new(payload);
    reader.require_len(layout::MIN_LEN)?;
    let value = reader.read_opcode()?;
    let Some(op) = OpCode::from_value(value) else {
        return Err(ArtNetError::UnsupportedOpCode { value });
    };

    let packet = match op {
        OpCode::Poll => parse_art_poll(payload)?.map(ArtNetPacket::Poll),
        OpCode::PollReply => {
            parse_art_poll_reply(payload)?.map(|reply| ArtNetPacket::PollReply(Box::new(reply)))
        }
        OpCode::Dmx => parse_art_dmx(payload)?.map(ArtNetPacket::Dmx),
        OpCode::Nzs => parse_art_nzs(payload)?.map(ArtNetPacket::Nzs),
        OpCode::Sync => parse_art_sync(payload)?.map(ArtNetPacket::Sync),
        OpCode::TimeSync => parse_art_time_sync(payload)?.map(ArtNetPacket::TimeSync),
    };
    Ok(packet)
}

pub fn decode_packet(payload: &[u8]) -> Option<ArtNetPacket> {
    discard_rejected(parse_packet(payload), "Art-Net packet")
}
