use std::net::Ipv4Addr;

use super::error::BitsError;

/// Byte-wise `address | !mask`.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use lightwire_core::bits::broadcast_address;
///
/// let broadcast = broadcast_address(
///     Ipv4Addr::new(192, 168, 2, 5),
///     Ipv4Addr::new(255, 255, 255, 0),
/// );
/// assert_eq!(broadcast, Ipv4Addr::new(192, 168, 2, 255));
/// ```
pub fn broadcast_address(address: Ipv4Addr, mask: Ipv4Addr) -> Ipv4Addr {
    let mut octets = address.octets();
    for (octet, mask) in octets.iter_mut().zip(mask.octets()) {
        *octet |= !mask;
    }
    Ipv4Addr::from(octets)
}

/// String form of [`broadcast_address`] for dotted-decimal input.
///
/// # Errors
/// Returns `BitsError::InvalidAddress` when either input does not parse.
pub fn broadcast_address_str(address: &str, mask: &str) -> Result<Ipv4Addr, BitsError> {
    let parse = |text: &str| {
        text.trim()
            .parse::<Ipv4Addr>()
            .map_err(|_| BitsError::InvalidAddress(text.to_string()))
    };
    Ok(broadcast_address(parse(address)?, parse(mask)?))
}
