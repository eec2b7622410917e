//! Bit and byte primitives shared by the protocol codecs.
//!
//! Nothing here knows about Art-Net or DMX: these helpers slice bit groups
//! out of integers, turn integers into fixed-width byte runs in a chosen
//! order, and render byte runs as hex, text or dotted addresses.

pub mod bytes;
pub mod error;
pub mod field;
pub mod net;
pub mod text;

pub use bytes::{ByteOrder, natural_width, uint_from_bytes, uint_to_bytes};
pub use error::BitsError;
pub use field::{BitField, UnsignedBits, bit_at, extract_bits};
pub use net::{broadcast_address, broadcast_address_str};
pub use text::{
    ascii_string, format_radix, hex_string, ipv4_string, mac_string, parse_hex, parse_radix,
};
