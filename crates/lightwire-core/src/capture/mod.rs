//! Decode the Art-Net traffic in a packet capture.

use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, info};

use crate::protocols::artnet::{ArtNetError, OpCode, parse_packet};
use crate::source::{PacketEvent, PacketSource, PcapFileSource, SourceError};
use crate::{CaptureReport, DecodedFrame, OpCodeCount};

pub mod udp;

use udp::parse_udp_datagram;

/// Malformed frames are sampled, not all kept.
pub const MAX_MALFORMED_EXAMPLES: usize = 3;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

pub fn decode_pcap_file(path: &Path) -> Result<CaptureReport, CaptureError> {
    let source = PcapFileSource::open(path)?;
    decode_source(path, source)
}

/// Walk every packet of `source`, decoding UDP payloads as Art-Net.
///
/// Payloads without the Art-Net signature are ignored. Art-Net frames with an
/// opcode this crate does not model are only counted. Art-Net payloads that
/// fail to decode are counted as malformed and the first few are kept as
/// examples.
pub fn decode_source<S: PacketSource>(
    path: &Path,
    mut source: S,
) -> Result<CaptureReport, CaptureError> {
    let mut report = CaptureReport::new(&path.display().to_string(), input_len(path)?);
    let mut first_ts = None;
    let mut last_ts = None;
    let mut counts: Vec<OpCodeCount> = Vec::new();

    while let Some(PacketEvent { ts, linktype, data }) = source.next_packet()? {
        let index = report.summary.packets_total;
        report.summary.packets_total += 1;
        update_ts_bounds(&mut first_ts, &mut last_ts, ts);

        let datagram = match parse_udp_datagram(linktype, &data) {
            Ok(Some(datagram)) => datagram,
            Ok(None) => continue,
            Err(err) => {
                debug!(index, error = %err, "skipping undecodable frame");
                continue;
            }
        };
        report.summary.udp_packets += 1;

        let timestamp = ts_to_rfc3339(ts);
        match parse_packet(datagram.payload) {
            Ok(Some(packet)) => {
                count_opcode(&mut counts, packet.op_code());
                report.frames.push(DecodedFrame {
                    index,
                    ts: timestamp,
                    src: datagram.src.to_string(),
                    dst: datagram.dst.to_string(),
                    packet,
                });
            }
            Ok(None) => {}
            Err(ArtNetError::UnsupportedOpCode { value }) => {
                debug!(index, op = value, "unmodelled Art-Net opcode");
                report.summary.unsupported_packets += 1;
            }
            Err(err) => {
                report.malformed.count += 1;
                if report.malformed.examples.len() < MAX_MALFORMED_EXAMPLES {
                    let at = timestamp.as_deref().unwrap_or("unknown time");
                    report
                        .malformed
                        .examples
                        .push(format!("{} @ {at}: {err}", datagram.src));
                }
            }
        }
    }

    counts.sort_by_key(|entry| entry.op.value());
    report.summary.artnet_packets = report.frames.len() as u64
        + report.summary.unsupported_packets
        + report.malformed.count;
    report.summary.op_codes = counts;
    report.summary.time_start = ts_to_rfc3339(first_ts);
    report.summary.time_end = ts_to_rfc3339(last_ts);
    info!(
        packets = report.summary.packets_total,
        artnet = report.summary.artnet_packets,
        malformed = report.malformed.count,
        "capture decoded"
    );
    Ok(report)
}

fn input_len(path: &Path) -> Result<u64, CaptureError> {
    Ok(path.metadata()?.len())
}

fn count_opcode(counts: &mut Vec<OpCodeCount>, op: OpCode) {
    match counts.iter_mut().find(|entry| entry.op == op) {
        Some(entry) => entry.count += 1,
        None => counts.push(OpCodeCount { op, count: 1 }),
    }
}

fn update_ts_bounds(first: &mut Option<f64>, last: &mut Option<f64>, ts: Option<f64>) {
    let Some(ts) = ts else {
        return;
    };
    if first.is_none_or(|existing| ts < existing) {
        *first = Some(ts);
    }
    if last.is_none_or(|existing| ts > existing) {
        *last = Some(ts);
    }
}

fn ts_to_rfc3339(ts: Option<f64>) -> Option<String> {
    let ts = ts?;
    let nanos = (ts * 1_000_000_000.0).round() as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}
