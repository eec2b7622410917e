use serde::{Deserialize, Serialize};

use super::error::{ArtNetError, discard_rejected};
use super::dmx::declared_length;
use super::layout::{self, nzs as field};
use super::opcode::OpCode;
use super::reader::ArtNetReader;
use super::writer::ArtNetWriter;

/// DMX data carried with a non-zero start code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtNzs {
    pub sequence: u8,
    pub start_code: u8,
    /// Low byte of the port address.
    pub sub_uni: u8,
    /// Top 7 bits of the port address.
    pub net: u8,
    pub length: u16,
    pub data: Vec<u8>,
}

impl ArtNzs {
    pub fn new(sequence: u8, net: u8, sub_uni: u8, data: Vec<u8>) -> Self {
        Self {
            sequence,
            start_code: field::DEFAULT_START_CODE,
            sub_uni,
            net,
            length: declared_length(&data),
            data,
        }
    }

    pub fn port_address(&self) -> u16 {
        (u16::from(self.net & 0x7F) << 8) | u16::from(self.sub_uni)
    }

    /// # Errors
    /// `ArtNetError::OddLength` for an odd number of data bytes,
    /// `ArtNetError::InvalidLength` outside `2..=512`, and
    /// `ArtNetError::ZeroStartCode` when the start code is zero.
    pub fn encode(&self) -> Result<Vec<u8>, ArtNetError> {
        let length = self.data.len();
        if length % 2 != 0 {
            return Err(ArtNetError::OddLength { length });
        }
        if !(field::MIN_DATA_LEN..=layout::DMX_MAX_SLOTS).contains(&length) {
            return Err(ArtNetError::InvalidLength { length });
        }
        if self.start_code == 0 {
            return Err(ArtNetError::ZeroStartCode);
        }

        let mut writer = ArtNetWriter::new(OpCode::Nzs, field::DATA_OFFSET);
        writer.put_u8(field::SEQUENCE, self.sequence);
        writer.put_u8(field::START_CODE, self.start_code);
        writer.put_u8(field::SUB_UNI, self.sub_uni);
        writer.put_u8(field::NET, self.net);
        writer.put_uint(field::LENGTH, length as u64)?;
        writer.append(&self.data);
        Ok(writer.finish())
    }
}

/// Encode an ArtNzs frame with the default start code.
///
/// # Errors
/// See [`ArtNzs::encode`].
pub fn encode_art_nzs(
    sequence: u8,
    net: u8,
    sub_uni: u8,
    data: &[u8],
) -> Result<Vec<u8>, ArtNetError> {
    ArtNzs::new(sequence, net, sub_uni, data.to_vec()).encode()
}

pub fn parse_art_nzs(payload: &[u8]) -> Result<Option<ArtNzs>, ArtNetError> {
    let reader = ArtNetReader::new(payload);
    if !reader.matches(OpCode::Nzs)? {
        return Ok(None);
    }
    reader.require_len(field::DATA_OFFSET)?;

    let tail = reader.read_tail(field::DATA_OFFSET);
    let data = &tail[..tail.len().min(layout::DMX_MAX_SLOTS)];

    Ok(Some(ArtNzs {
        sequence: reader.read_u8(field::SEQUENCE)?,
        start_code: reader.read_u8(field::START_CODE)?,
        sub_uni: reader.read_u8(field::SUB_UNI)?,
        net: reader.read_u8(field::NET)?,
        length: reader.read_u16(field::LENGTH)?,
        data: data.to_vec(),
    }))
}

pub fn decode_art_nzs(payload: &[u8]) -> Option<ArtNzs> {
    discard_rejected(parse_art_nzs(payload), "ArtNzs")
}

#[cfg(test)]
mod tests {
    use super::{ArtNzs, decode_art_nzs, encode_art_nzs};
    use crate::protocols::artnet::error::ArtNetError;
    use crate::protocols::artnet::layout::nzs as field;

    #[test]
    fn header_layout() {
        let frame = encode_art_nzs(3, 0x01, 0x23, &[0xAA, 0xBB]).unwrap();
        assert_eq!(&frame[8..10], &[0x00, 0x51]);
        assert_eq!(frame[field::SEQUENCE.offset], 3);
        assert_eq!(frame[field::START_CODE.offset], field::DEFAULT_START_CODE);
        assert_eq!(frame[field::SUB_UNI.offset], 0x23);
        assert_eq!(frame[field::NET.offset], 0x01);
        assert_eq!(&frame[16..18], &[0x00, 0x02]);
        assert_eq!(&frame[18..], &[0xAA, 0xBB]);
    }

    #[test]
    fn odd_length_is_rejected() {
        assert_eq!(
            encode_art_nzs(0, 0, 0, &[1, 2, 3]),
            Err(ArtNetError::OddLength { length: 3 })
        );
    }

    #[test]
    fn length_bounds() {
        assert_eq!(
            encode_art_nzs(0, 0, 0, &[]),
            Err(ArtNetError::InvalidLength { length: 0 })
        );
        assert_eq!(
            encode_art_nzs(0, 0, 0, &[0; 514]),
            Err(ArtNetError::InvalidLength { length: 514 })
        );
        assert!(encode_art_nzs(0, 0, 0, &[0; 512]).is_ok());
    }

    #[test]
    fn custom_start_code_round_trips() {
        let mut nzs = ArtNzs::new(9, 0x02, 0x10, vec![1, 2, 3, 4]);
        nzs.start_code = 0xCC;
        let decoded = decode_art_nzs(&nzs.encode().unwrap()).unwrap();
        assert_eq!(decoded, nzs);
        assert_eq!(decoded.port_address(), 0x0210);
    }

    #[test]
    fn oversized_data_saturates_declared_length() {
        let nzs = ArtNzs::new(0, 0, 0, vec![0; 65_538]);
        assert_eq!(nzs.length, u16::MAX);
        assert_eq!(nzs.encode(), Err(ArtNetError::InvalidLength { length: 65_538 }));
    }

    #[test]
    fn zero_start_code_is_rejected() {
        let mut nzs = ArtNzs::new(0, 0, 0, vec![1, 2]);
        nzs.start_code = 0;
        assert_eq!(nzs.encode(), Err(ArtNetError::ZeroStartCode));
    }
}
