use std::net::{IpAddr, SocketAddr};

use etherparse::{NetSlice, SlicedPacket, TransportSlice};
use pcap_parser::Linktype;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UdpError {
    #[error("packet slice error: {0}")]
    Slice(String),
    #[error("missing network layer in packet")]
    MissingNetworkLayer,
}

/// UDP datagram lifted out of a link-layer frame.
#[derive(Debug)]
pub struct UdpDatagram<'a> {
    pub src: SocketAddr,
    pub dst: SocketAddr,
    pub payload: &'a [u8],
}

/// Slice a captured frame down to its UDP payload.
///
/// Returns `Ok(None)` for non-UDP traffic and for link types without an IP
/// layer we can slice.
pub fn parse_udp_datagram(
    linktype: Linktype,
    data: &[u8],
) -> Result<Option<UdpDatagram<'_>>, UdpError> {
    let sliced = match linktype {
        Linktype::ETHERNET => SlicedPacket::from_ethernet(data).map_err(slice_error)?,
        Linktype::RAW | Linktype::IPV4 => SlicedPacket::from_ip(data).map_err(slice_error)?,
        Linktype::LINUX_SLL => SlicedPacket::from_linux_sll(data).map_err(slice_error)?,
        _ => return Ok(None),
    };

    let net = sliced.net.ok_or(UdpError::MissingNetworkLayer)?;
    let Some(TransportSlice::Udp(udp)) = sliced.transport else {
        return Ok(None);
    };

    let (src_ip, dst_ip) = match net {
        NetSlice::Ipv4(ref ipv4) => (
            IpAddr::V4(ipv4.header().source_addr()),
            IpAddr::V4(ipv4.header().destination_addr()),
        ),
        NetSlice::Ipv6(ref ipv6) => (
            IpAddr::V6(ipv6.header().source_addr()),
            IpAddr::V6(ipv6.header().destination_addr()),
        ),
    };

    Ok(Some(UdpDatagram {
        src: SocketAddr::new(src_ip, udp.source_port()),
        dst: SocketAddr::new(dst_ip, udp.destination_port()),
        payload: udp.payload(),
    }))
}

fn slice_error(err: impl std::fmt::Display) -> UdpError {
    UdpError::Slice(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{UdpError, parse_udp_datagram};
    use etherparse::PacketBuilder;
    use pcap_parser::Linktype;

    #[test]
    fn ethernet_udp_payload() {
        let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
            .ipv4([192, 168, 0, 1], [192, 168, 0, 255], 64)
            .udp(6454, 6454);
        let payload = [1, 2, 3, 4];
        let mut packet = Vec::<u8>::with_capacity(builder.size(payload.len()));
        builder.write(&mut packet, &payload).unwrap();

        let datagram = parse_udp_datagram(Linktype::ETHERNET, &packet)
            .unwrap()
            .unwrap();
        assert_eq!(datagram.src.to_string(), "192.168.0.1:6454");
        assert_eq!(datagram.dst.to_string(), "192.168.0.255:6454");
        assert_eq!(datagram.payload, payload);
    }

    #[test]
    fn raw_ip_udp_payload() {
        let builder = PacketBuilder::ipv4([10, 0, 0, 1], [10, 0, 0, 2], 64).udp(1000, 6454);
        let payload = [9u8; 3];
        let mut packet = Vec::<u8>::with_capacity(builder.size(payload.len()));
        builder.write(&mut packet, &payload).unwrap();

        let datagram = parse_udp_datagram(Linktype::RAW, &packet).unwrap().unwrap();
        assert_eq!(datagram.dst.port(), 6454);
        assert_eq!(datagram.payload, payload);
    }

    #[test]
    fn tcp_is_skipped() {
        let builder = PacketBuilder::ethernet2([1, 1, 1, 1, 1, 1], [2, 2, 2, 2, 2, 2])
            .ipv4([10, 0, 0, 1], [10, 0, 0, 2], 64)
            .tcp(1000, 1001, 0, 0);
        let payload = [0u8; 4];
        let mut packet = Vec::<u8>::with_capacity(builder.size(payload.len()));
        builder.write(&mut packet, &payload).unwrap();

        assert!(parse_udp_datagram(Linktype::ETHERNET, &packet).unwrap().is_none());
    }

    #[test]
    fn empty_frame_is_a_slice_error() {
        let result = parse_udp_datagram(Linktype::ETHERNET, &[]);
        assert!(matches!(result, Err(UdpError::Slice(_))));
    }

    #[test]
    fn unknown_linktype_is_skipped() {
        assert!(parse_udp_datagram(Linktype::NULL, &[0; 32]).unwrap().is_none());
    }
}
