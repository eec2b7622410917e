//! Lightwire core: Art-Net codec and BLE channel-block packing.
//!
//! The crate is layered bottom-up:
//! - [`bits`]: bit ranges, fixed-width integers, hex/ASCII text, broadcast
//!   addresses. No protocol knowledge.
//! - [`protocols::artnet`]: Art-Net frames, decoded and encoded from a single
//!   per-field layout table (`layout` / `reader` / `writer`).
//! - [`protocols::channels`]: headered DMX channel blocks and greedy MTU
//!   packing for the fixture's BLE characteristic.
//! - [`source`] and [`capture`]: offline decoding of Art-Net traffic found in
//!   PCAP/PCAPNG files.
//!
//! Codec functions are pure and perform no I/O; file access stays in
//! `source`.
//!
//! # Examples
//! ```
//! use lightwire_core::protocols::artnet::{decode_art_dmx, encode_art_dmx};
//! use lightwire_core::protocols::channels::{ChannelBlock, pack_for_transfer, DEFAULT_MTU};
//!
//! let frame = encode_art_dmx(1, 0, 0x0001, &[255, 128, 0])?;
//! let dmx = decode_art_dmx(&frame).expect("valid frame");
//!
//! let blocks = ChannelBlock::split(1, &dmx.data)?;
//! let writes = pack_for_transfer(&blocks, DEFAULT_MTU);
//! assert_eq!(writes, vec![vec![0x00, 0x06, 255, 128, 0]]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::Serialize;

pub mod bits;
pub mod capture;
pub mod protocols;
pub mod source;

pub use capture::{CaptureError, decode_pcap_file, decode_source};
pub use protocols::artnet::{ArtNetError, ArtNetPacket, OpCode};
pub use protocols::channels::{ChannelBlock, ChannelError, TransferPlan};
pub use source::{PacketEvent, PacketSource, PcapFileSource, SourceError, VecSource};

/// Current capture report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Art-Net traffic decoded from one capture file.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    pub input: InputInfo,
    pub summary: CaptureSummary,
    /// Decoded Art-Net messages in capture order.
    pub frames: Vec<DecodedFrame>,
    pub malformed: MalformedSummary,
}

impl CaptureReport {
    /// Empty report for `input_path`, ready to be filled.
    ///
    /// # Examples
    /// ```
    /// use lightwire_core::CaptureReport;
    ///
    /// let report = CaptureReport::new("capture.pcapng", 123);
    /// assert_eq!(report.report_version, lightwire_core::REPORT_VERSION);
    /// assert!(report.frames.is_empty());
    /// ```
    pub fn new(input_path: &str, input_bytes: u64) -> Self {
        Self {
            report_version: REPORT_VERSION,
            tool: ToolInfo {
                name: "lightwire".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            input: InputInfo {
                path: input_path.to_string(),
                bytes: input_bytes,
            },
            summary: CaptureSummary::default(),
            frames: Vec::new(),
            malformed: MalformedSummary::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CaptureSummary {
    pub packets_total: u64,
    pub udp_packets: u64,
    /// Decoded, unsupported and malformed Art-Net payloads.
    pub artnet_packets: u64,
    /// Art-Net frames whose opcode is not decoded here (ArtAddress, ArtRdm, ...).
    pub unsupported_packets: u64,
    /// Per-opcode totals, ordered by opcode value.
    pub op_codes: Vec<OpCodeCount>,
    /// RFC3339 timestamp of the earliest packet (if known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    /// RFC3339 timestamp of the latest packet (if known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpCodeCount {
    pub op: OpCode,
    pub count: u64,
}

/// One Art-Net message and where it was seen.
#[derive(Debug, Clone, Serialize)]
pub struct DecodedFrame {
    /// Zero-based packet index within the capture.
    pub index: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    pub src: String,
    pub dst: String,
    pub packet: ArtNetPacket,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MalformedSummary {
    pub count: u64,
    /// At most three examples, formatted as `ip:port @ ts: reason`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}
