//! Packet sources feeding capture decoding.
//!
//! A source yields raw link-layer frames with their capture timestamp and
//! link type; it knows nothing about UDP or Art-Net.

mod pcap;

pub use pcap::PcapFileSource;

use pcap_parser::Linktype;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct PacketEvent {
    /// Seconds since the Unix epoch, when the capture records one.
    pub ts: Option<f64>,
    pub linktype: Linktype,
    pub data: Vec<u8>,
}

pub trait PacketSource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PCAP parse error ({context}): {message}")]
    Pcap {
        context: &'static str,
        message: String,
    },
}

/// In-memory source, mostly for tests and piping decoded frames around.
#[derive(Debug, Default)]
pub struct VecSource {
    events: std::collections::VecDeque<PacketEvent>,
}

impl VecSource {
    pub fn new(events: impl IntoIterator<Item = PacketEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl PacketSource for VecSource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        Ok(self.events.pop_front())
    }
}
