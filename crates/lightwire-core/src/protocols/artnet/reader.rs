use std::net::Ipv4Addr;

use super::error::ArtNetError;
use super::layout::{self, Field};
use super::opcode::OpCode;
use crate::bits::{BitsError, ascii_string, uint_from_bytes};

pub struct ArtNetReader<'a> {
    payload: &'a [u8],
}

impl<'a> ArtNetReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ArtNetError> {
        if self.payload.len() < needed {
            return Err(ArtNetError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn require_max_len(&self, max: usize) -> Result<(), ArtNetError> {
        if self.payload.len() > max {
            return Err(ArtNetError::TooLong {
                max,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], ArtNetError> {
        self.payload
            .get(range.clone())
            .ok_or(ArtNetError::TooShort {
                needed: range.end,
                actual: self.payload.len(),
            })
    }

    pub fn read_field(&self, field: Field) -> Result<&'a [u8], ArtNetError> {
        self.read_slice(field.range())
    }

    pub fn read_u8(&self, field: Field) -> Result<u8, ArtNetError> {
        self.payload
            .get(field.offset)
            .copied()
            .ok_or(ArtNetError::TooShort {
                needed: field.offset + 1,
                actual: self.payload.len(),
            })
    }

    /// Read a multi-byte integer in the field's own byte order.
    pub fn read_uint(&self, field: Field) -> Result<u64, ArtNetError> {
        let bytes = self.read_field(field)?;
        Ok(uint_from_bytes(bytes, field.order)?)
    }

    pub fn read_u16(&self, field: Field) -> Result<u16, ArtNetError> {
        debug_assert_eq!(field.len, 2);
        Ok(self.read_uint(field)? as u16)
    }

    pub fn read_ascii(&self, field: Field) -> Result<String, ArtNetError> {
        Ok(ascii_string(self.read_field(field)?))
    }

    pub fn read_ipv4(&self, field: Field) -> Result<Ipv4Addr, ArtNetError> {
        self.read_array::<4>(field).map(Ipv4Addr::from)
    }

    pub fn read_array<const N: usize>(&self, field: Field) -> Result<[u8; N], ArtNetError> {
        let bytes = self.read_field(field)?;
        let array = <[u8; N]>::try_from(bytes).map_err(|_| BitsError::WrongLength {
            expected: N,
            actual: bytes.len(),
        })?;
        Ok(array)
    }

    /// Trailing variable-length section from `offset` to the end of the
    /// buffer. A buffer that stops at or before `offset` yields an empty
    /// slice instead of an error.
    pub fn read_tail(&self, offset: usize) -> &'a [u8] {
        self.payload.get(offset..).unwrap_or_default()
    }

    pub fn read_signature(&self) -> Result<&'a [u8], ArtNetError> {
        self.read_field(layout::ID)
    }

    pub fn read_opcode(&self) -> Result<u16, ArtNetError> {
        self.read_u16(layout::OP_CODE)
    }

    /// Check the signature and opcode. Buffers too short to carry an opcode
    /// are an error; a foreign signature or a different opcode is not.
    pub fn matches(&self, expected: OpCode) -> Result<bool, ArtNetError> {
        self.require_len(layout::MIN_LEN)?;
        if self.read_signature()? != layout::ARTNET_ID {
            return Ok(false);
        }
        Ok(self.read_opcode()? == expected.value())
    }
}

#[cfg(test)]
mod tests {
    use super::ArtNetReader;
    use crate::protocols::artnet::error::ArtNetError;
    use crate::protocols::artnet::layout::{self, Field};
    use crate::protocols::artnet::opcode::OpCode;

    #[test]
    fn reads_fields_in_their_own_order() {
        let payload = [0x00, 0x21, 0x00, 0x0E];
        let reader = ArtNetReader::new(&payload);
        let little = Field::new(0, 2, crate::bits::ByteOrder::Little);
        let big = Field::new(2, 2, crate::bits::ByteOrder::Big);
        assert_eq!(reader.read_u16(little).unwrap(), 0x2100);
        assert_eq!(reader.read_u16(big).unwrap(), 14);
        assert_eq!(reader.read_uint(little).unwrap(), 0x2100);
    }

    #[test]
    fn tail_is_clamped() {
        let payload = [1u8, 2, 3];
        let reader = ArtNetReader::new(&payload);
        assert_eq!(reader.read_tail(1), &[2, 3]);
        assert!(reader.read_tail(3).is_empty());
        assert!(reader.read_tail(10).is_empty());
    }

    #[test]
    fn matches_needs_opcode_bytes() {
        let payload = layout::ARTNET_ID.to_vec();
        let reader = ArtNetReader::new(&payload);
        let err = reader.matches(OpCode::Dmx).unwrap_err();
        assert_eq!(
            err,
            ArtNetError::TooShort {
                needed: 10,
                actual: 8
            }
        );
    }

    #[test]
    fn matches_rejects_foreign_signature() {
        let mut payload = b"Art-Ned\0".to_vec();
        payload.extend_from_slice(&OpCode::Dmx.value().to_le_bytes());
        let reader = ArtNetReader::new(&payload);
        assert!(!reader.matches(OpCode::Dmx).unwrap());
    }
}
