use serde::{Deserialize, Serialize};

use super::error::{ArtNetError, discard_rejected};
use super::layout::sync as field;
use super::opcode::OpCode;
use super::reader::ArtNetReader;
use super::writer::ArtNetWriter;

/// Tells receivers to output the DMX they have buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtSync {
    pub aux1: u8,
    pub aux2: u8,
}

impl ArtSync {
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ArtNetWriter::new(OpCode::Sync, field::LEN);
        writer.put_u8(field::AUX1, self.aux1);
        writer.put_u8(field::AUX2, self.aux2);
        writer.finish()
    }
}

pub fn encode_art_sync() -> Vec<u8> {
    ArtSync::default().encode()
}

pub fn parse_art_sync(payload: &[u8]) -> Result<Option<ArtSync>, ArtNetError> {
    let reader = ArtNetReader::new(payload);
    if !reader.matches(OpCode::Sync)? {
        return Ok(None);
    }
    reader.require_len(field::LEN)?;
    Ok(Some(ArtSync {
        aux1: reader.read_u8(field::AUX1)?,
        aux2: reader.read_u8(field::AUX2)?,
    }))
}

pub fn decode_art_sync(payload: &[u8]) -> Option<ArtSync> {
    discard_rejected(parse_art_sync(payload), "ArtSync")
}

#[cfg(test)]
mod tests {
    use super::{ArtSync, decode_art_sync, encode_art_sync};

    #[test]
    fn sync_is_fourteen_bytes_with_zero_aux() {
        let frame = encode_art_sync();
        assert_eq!(frame.len(), 14);
        assert_eq!(&frame[8..], &[0x00, 0x52, 0x00, 0x0E, 0x00, 0x00]);
    }

    #[test]
    fn aux_bytes_survive_decode() {
        let sync = ArtSync { aux1: 7, aux2: 9 };
        assert_eq!(decode_art_sync(&sync.encode()), Some(sync));
    }
}
