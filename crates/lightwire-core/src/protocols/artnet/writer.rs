use super::error::ArtNetError;
use super::layout::{self, Field};
use super::opcode::OpCode;
use crate::bits::{ByteOrder, uint_to_bytes};

/// Builds outbound frames from the same `Field` entries the reader uses.
///
/// Fixed-size sections are preallocated and zeroed; variable-length data is
/// appended at the end.
pub struct ArtNetWriter {
    buf: Vec<u8>,
}

impl ArtNetWriter {
    /// Start a frame of `fixed_len` bytes with signature, opcode and
    /// protocol version already in place.
    pub fn new(opcode: OpCode, fixed_len: usize) -> Self {
        let mut writer = Self {
            buf: vec![0u8; fixed_len.max(layout::PREAMBLE_LEN)],
        };
        writer.buf[layout::ID.range()].copy_from_slice(layout::ARTNET_ID);
        writer.put_u16(layout::OP_CODE, opcode.value());
        writer.put_u16(layout::PROT_VER, layout::PROTOCOL_VERSION);
        writer
    }

    pub fn put_u8(&mut self, field: Field, value: u8) {
        self.buf[field.offset] = value;
    }

    pub fn put_u16(&mut self, field: Field, value: u16) {
        debug_assert_eq!(field.len, 2);
        let bytes = match field.order {
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
        };
        self.buf[field.range()].copy_from_slice(&bytes);
    }

    /// Write an integer of any width up to eight bytes in the field's order.
    pub fn put_uint(&mut self, field: Field, value: u64) -> Result<(), ArtNetError> {
        let bytes = uint_to_bytes(value, Some(field.len), field.order)?;
        self.buf[field.range()].copy_from_slice(&bytes);
        Ok(())
    }

    pub fn put_bytes(&mut self, field: Field, bytes: &[u8]) {
        let len = bytes.len().min(field.len);
        self.buf[field.offset..field.offset + len].copy_from_slice(&bytes[..len]);
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::ArtNetWriter;
    use crate::bits::ByteOrder;
    use crate::protocols::artnet::layout::{self, Field};
    use crate::protocols::artnet::opcode::OpCode;

    #[test]
    fn preamble_mixes_byte_orders() {
        let frame = ArtNetWriter::new(OpCode::Dmx, 0).finish();
        assert_eq!(frame.len(), layout::PREAMBLE_LEN);
        assert_eq!(&frame[..8], layout::ARTNET_ID);
        assert_eq!(&frame[8..10], &[0x00, 0x50]);
        assert_eq!(&frame[10..12], &[0x00, 0x0E]);
    }

    #[test]
    fn put_uint_rejects_values_wider_than_field() {
        let mut writer = ArtNetWriter::new(OpCode::Sync, 16);
        let field = Field::new(12, 2, ByteOrder::Little);
        assert!(writer.put_uint(field, 0x1_0000).is_err());
        writer.put_uint(field, 0x0102).unwrap();
        assert_eq!(&writer.finish()[12..14], &[0x02, 0x01]);
    }

    #[test]
    fn put_bytes_truncates_to_field() {
        let mut writer = ArtNetWriter::new(OpCode::Poll, 16);
        writer.put_bytes(Field::bytes(12, 2), &[1, 2, 3]);
        let frame = writer.finish();
        assert_eq!(&frame[12..], &[1, 2, 0, 0]);
    }
}
