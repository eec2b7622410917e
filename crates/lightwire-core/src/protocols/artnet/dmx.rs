use serde::{Deserialize, Serialize};

use super::error::{ArtNetError, discard_rejected};
use super::layout::{self, dmx as field};
use super::opcode::OpCode;
use super::reader::ArtNetReader;
use super::writer::ArtNetWriter;
use crate::protocols::common::reader::optional_nonzero_u8;

/// One universe of DMX levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtDmx {
    pub protocol_version: u16,
    /// Zero means sequencing is disabled.
    pub sequence: u8,
    pub physical: u8,
    /// 15-bit port address: net (7 bits), sub-net (4 bits), universe (4 bits).
    pub port_address: u16,
    /// Length as declared in the frame.
    pub length: u16,
    pub data: Vec<u8>,
}

impl ArtDmx {
    pub fn new(sequence: u8, physical: u8, port_address: u16, data: Vec<u8>) -> Self {
        Self {
            protocol_version: layout::PROTOCOL_VERSION,
            sequence,
            physical,
            port_address,
            length: declared_length(&data),
            data,
        }
    }

    pub fn tracked_sequence(&self) -> Option<u8> {
        optional_nonzero_u8(self.sequence)
    }

    pub fn net(&self) -> u8 {
        ((self.port_address >> 8) & 0x7F) as u8
    }

    pub fn sub_net(&self) -> u8 {
        ((self.port_address >> 4) & 0x0F) as u8
    }

    pub fn universe(&self) -> u8 {
        (self.port_address & 0x0F) as u8
    }

    /// # Errors
    /// Returns `ArtNetError::InvalidLength` unless `1..=512` data bytes are
    /// present, and `ArtNetError::InvalidPortAddress` above 15 bits.
    pub fn encode(&self) -> Result<Vec<u8>, ArtNetError> {
        if self.data.is_empty() || self.data.len() > layout::DMX_MAX_SLOTS {
            return Err(ArtNetError::InvalidLength {
                length: self.data.len(),
            });
        }
        if self.port_address > field::MAX_PORT_ADDRESS {
            return Err(ArtNetError::InvalidPortAddress {
                value: self.port_address,
            });
        }
        let mut writer = ArtNetWriter::new(OpCode::Dmx, field::DATA_OFFSET);
        writer.put_u8(field::SEQUENCE, self.sequence);
        writer.put_u8(field::PHYSICAL, self.physical);
        writer.put_u16(field::PORT_ADDRESS, self.port_address);
        writer.put_uint(field::LENGTH, self.data.len() as u64)?;
        writer.append(&self.data);
        Ok(writer.finish())
    }
}

/// Declared length for a record built in memory; saturates rather than
/// wrapping so an oversized buffer can never look short. Encoding checks the
/// real data length.
pub(crate) fn declared_length(data: &[u8]) -> u16 {
    u16::try_from(data.len()).unwrap_or(u16::MAX)
}

/// Parse an ArtDmx frame.
///
/// The lighting data runs from offset 18 to the end of the buffer (at most
/// 512 bytes); a frame cut short after the header yields empty data rather
/// than an error.
pub fn parse_art_dmx(payload: &[u8]) -> Result<Option<ArtDmx>, ArtNetError> {
    let reader = ArtNetReader::new(payload);
    if !reader.matches(OpCode::Dmx)? {
        return Ok(None);
    }
    reader.require_len(field::DATA_OFFSET)?;

    let tail = reader.read_tail(field::DATA_OFFSET);
    let data = &tail[..tail.len().min(layout::DMX_MAX_SLOTS)];

    Ok(Some(ArtDmx {
        protocol_version: reader.read_u16(layout::PROT_VER)?,
        sequence: reader.read_u8(field::SEQUENCE)?,
        physical: reader.read_u8(field::PHYSICAL)?,
        port_address: reader.read_u16(field::PORT_ADDRESS)?,
        length: reader.read_u16(field::LENGTH)?,
        data: data.to_vec(),
    }))
}

pub fn decode_art_dmx(payload: &[u8]) -> Option<ArtDmx> {
    discard_rejected(parse_art_dmx(payload), "ArtDmx")
}

/// Encode an ArtDmx frame for `port_address`.
///
/// # Errors
/// See [`ArtDmx::encode`].
pub fn encode_art_dmx(
    sequence: u8,
    physical: u8,
    port_address: u16,
    data: &[u8],
) -> Result<Vec<u8>, ArtNetError> {
    ArtDmx::new(sequence, physical, port_address, data.to_vec()).encode()
}
