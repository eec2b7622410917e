use std::fs::File;
use std::path::Path;

use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{Block, Linktype, PcapBlockOwned, PcapError, create_reader};
use tracing::trace;

use super::{PacketEvent, PacketSource, SourceError};

const READER_BUFFER_SIZE: usize = 65536;

/// Legacy PCAP or PCAPNG file, detected from the magic bytes.
pub struct PcapFileSource {
    reader: Box<dyn PcapReaderIterator>,
    /// Legacy captures carry one link type; PCAPNG one per interface.
    linktypes: Vec<Linktype>,
}

impl PcapFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let reader = create_reader(READER_BUFFER_SIZE, file).map_err(|e| SourceError::Pcap {
            context: "reader init",
            message: e.to_string(),
        })?;
        Ok(Self {
            reader,
            linktypes: Vec::new(),
        })
    }
}

/// Interfaces the capture never described fall back to Ethernet.
fn interface_linktype(linktypes: &[Linktype], if_id: u32) -> Linktype {
    linktypes
        .get(if_id as usize)
        .copied()
        .unwrap_or(Linktype::ETHERNET)
}

impl PacketSource for PcapFileSource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        loop {
            match self.reader.next() {
                Ok((offset, block)) => {
                    let event = match block {
                        PcapBlockOwned::LegacyHeader(header) => {
                            self.linktypes = vec![header.network];
                            None
                        }
                        PcapBlockOwned::Legacy(packet) => Some(PacketEvent {
                            ts: Some(packet.ts_sec as f64 + packet.ts_usec as f64 * 1e-6),
                            linktype: interface_linktype(&self.linktypes, 0),
                            data: packet.data.to_vec(),
                        }),
                        PcapBlockOwned::NG(Block::InterfaceDescription(intf)) => {
                            self.linktypes.push(intf.linktype);
                            None
                        }
                        PcapBlockOwned::NG(Block::EnhancedPacket(packet)) => {
                            let caplen = (packet.caplen as usize).min(packet.data.len());
                            Some(PacketEvent {
                                ts: Some(pcapng_ts_to_seconds(packet.ts_high, packet.ts_low)),
                                linktype: interface_linktype(&self.linktypes, packet.if_id),
                                data: packet.data[..caplen].to_vec(),
                            })
                        }
                        _ => None,
                    };
                    self.reader.consume(offset);
                    if event.is_some() {
                        return Ok(event);
                    }
                }
                Err(PcapError::Eof) => return Ok(None),
                Err(PcapError::Incomplete(_)) => {
                    trace!("refilling capture buffer");
                    self.reader.refill().map_err(|e| SourceError::Pcap {
                        context: "reader refill",
                        message: e.to_string(),
                    })?;
                }
                Err(e) => {
                    return Err(SourceError::Pcap {
                        context: "reader next",
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}

/// PCAPNG timestamps default to microsecond resolution.
fn pcapng_ts_to_seconds(ts_high: u32, ts_low: u32) -> f64 {
    let ts = (u64::from(ts_high) << 32) | u64::from(ts_low);
    ts as f64 * 1e-6
}

#[cfg(test)]
mod tests {
    use pcap_parser::Linktype;

    use super::{interface_linktype, pcapng_ts_to_seconds};

    #[test]
    fn unknown_interface_defaults_to_ethernet() {
        let linktypes = [Linktype::LINUX_SLL];
        assert_eq!(interface_linktype(&linktypes, 0), Linktype::LINUX_SLL);
        assert_eq!(interface_linktype(&linktypes, 3), Linktype::ETHERNET);
        assert_eq!(interface_linktype(&[], 0), Linktype::ETHERNET);
    }

    #[test]
    fn pcapng_ts_to_seconds_converts_microseconds() {
        let seconds = pcapng_ts_to_seconds(0, 1_500_000);
        assert!((seconds - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn pcapng_ts_uses_high_word() {
        let seconds = pcapng_ts_to_seconds(1, 0);
        assert!((seconds - 4294.967296).abs() < 1e-9);
    }
}
