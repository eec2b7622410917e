use std::fmt::Write;
use std::net::Ipv4Addr;

use super::error::BitsError;

const RADIX_RANGE: std::ops::RangeInclusive<u32> = 2..=36;

/// Uppercase hex, two digits per byte.
///
/// # Examples
/// ```
/// use lightwire_core::bits::hex_string;
///
/// assert_eq!(hex_string(&[0x00, 0x06, 0x0A]), "00060A");
/// ```
pub fn hex_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Writing into a String cannot fail.
        let _ = write!(out, "{byte:02X}");
    }
    out
}

/// Parse a hex string (either case, optional whitespace between bytes).
///
/// # Errors
/// Returns `BitsError::OddHexLength` or `BitsError::InvalidDigits`.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, BitsError> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(BitsError::OddHexLength { len: digits.len() });
    }
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| BitsError::InvalidDigits {
                    text: text.to_string(),
                    radix: 16,
                })
        })
        .collect()
}

/// Text from a NUL-padded fixed-width field; zero bytes are dropped.
pub fn ascii_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|byte| **byte != 0)
        .map(|byte| char::from(*byte))
        .collect()
}

/// Dotted-decimal rendering of a 4-byte address.
///
/// # Errors
/// Returns `BitsError::WrongLength` unless `bytes` holds exactly four bytes.
pub fn ipv4_string(bytes: &[u8]) -> Result<String, BitsError> {
    let octets: [u8; 4] = bytes.try_into().map_err(|_| BitsError::WrongLength {
        expected: 4,
        actual: bytes.len(),
    })?;
    Ok(Ipv4Addr::from(octets).to_string())
}

/// Colon-separated uppercase MAC address.
pub fn mac_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Render `value` in `radix` (2..=36), lowercase digits unless `uppercase`.
///
/// # Examples
/// ```
/// use lightwire_core::bits::format_radix;
///
/// assert_eq!(format_radix(255, 16, true).unwrap(), "FF");
/// assert_eq!(format_radix(5, 2, false).unwrap(), "101");
/// ```
///
/// # Errors
/// Returns `BitsError::InvalidRadix` outside 2..=36.
pub fn format_radix(value: u64, radix: u32, uppercase: bool) -> Result<String, BitsError> {
    if !RADIX_RANGE.contains(&radix) {
        return Err(BitsError::InvalidRadix { radix });
    }
    if value == 0 {
        return Ok("0".to_string());
    }
    let mut digits = Vec::new();
    let mut rest = value;
    while rest > 0 {
        let digit = (rest % u64::from(radix)) as u32;
        // `digit < radix <= 36`, so `from_digit` always succeeds.
        let ch = char::from_digit(digit, radix).unwrap_or('?');
        digits.push(if uppercase { ch.to_ascii_uppercase() } else { ch });
        rest /= u64::from(radix);
    }
    Ok(digits.iter().rev().collect())
}

/// Parse `text` in `radix` (2..=36).
///
/// # Errors
/// Returns `BitsError::InvalidRadix` or `BitsError::InvalidDigits`.
pub fn parse_radix(text: &str, radix: u32) -> Result<u64, BitsError> {
    if !RADIX_RANGE.contains(&radix) {
        return Err(BitsError::InvalidRadix { radix });
    }
    u64::from_str_radix(text, radix).map_err(|_| BitsError::InvalidDigits {
        text: text.to_string(),
        radix,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        ascii_string, format_radix, hex_string, ipv4_string, mac_string, parse_hex, parse_radix,
    };
    use crate::bits::BitsError;

    #[test]
    fn hex_round_trips_uppercase() {
        let bytes = [0xDE, 0xAD, 0x00, 0x0F];
        let text = hex_string(&bytes);
        assert_eq!(text, "DEAD000F");
        assert_eq!(parse_hex(&text).unwrap(), bytes);
        assert_eq!(parse_hex("de ad").unwrap(), vec![0xDE, 0xAD]);
    }

    #[test]
    fn parse_hex_rejects_bad_input() {
        assert_eq!(parse_hex("ABC").unwrap_err(), BitsError::OddHexLength { len: 3 });
        assert!(matches!(
            parse_hex("ZZ"),
            Err(BitsError::InvalidDigits { radix: 16, .. })
        ));
    }

    #[test]
    fn ascii_drops_nul_padding() {
        assert_eq!(ascii_string(b"Art-Net\0"), "Art-Net");
        assert_eq!(ascii_string(b"\0node\0\0"), "node");
    }

    #[test]
    fn ipv4_requires_four_bytes() {
        assert_eq!(ipv4_string(&[192, 168, 1, 20]).unwrap(), "192.168.1.20");
        assert!(matches!(
            ipv4_string(&[1, 2, 3]),
            Err(BitsError::WrongLength {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn mac_is_colon_separated() {
        assert_eq!(
            mac_string(&[0x00, 0x1A, 0x2B, 0x3C, 0x4D, 0x5E]),
            "00:1A:2B:3C:4D:5E"
        );
    }

    #[test]
    fn radix_bounds_are_enforced() {
        assert_eq!(format_radix(35, 36, false).unwrap(), "z");
        assert_eq!(parse_radix("ff", 16).unwrap(), 255);
        assert_eq!(
            format_radix(1, 37, true).unwrap_err(),
            BitsError::InvalidRadix { radix: 37 }
        );
        assert!(parse_radix("1", 1).is_err());
        assert!(parse_radix("12", 2).is_err());
    }
}
