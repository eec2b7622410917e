use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::error::{ArtNetError, discard_rejected};
use super::layout::{self, poll_reply as field};
use super::opcode::OpCode;
use super::reader::ArtNetReader;
use super::status::{GoodInput, GoodOutput, Port, Status1, Status2, Style};
use crate::bits::{ascii_string, mac_string};

/// Node description broadcast in answer to an ArtPoll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtPollReply {
    pub id: String,
    pub op_code: u16,
    pub ip_address: Ipv4Addr,
    pub port_number: u16,
    pub firmware_version: u16,
    pub net_switch: u8,
    pub sub_switch: u8,
    pub oem: u16,
    pub ubea_version: u8,
    pub status1: Status1,
    pub esta_manufacturer: u16,
    pub short_name: String,
    pub long_name: String,
    pub node_report: String,
    pub num_ports: u16,
    /// Ports whose type code decoded; may be shorter than `num_ports`.
    pub port_types: Vec<Port>,
    /// Port type bytes as received.
    pub raw_port_types: [u8; 4],
    pub good_input: Vec<GoodInput>,
    pub good_output: Vec<GoodOutput>,
    pub sw_in: [u8; 4],
    pub sw_out: [u8; 4],
    pub sw_video: u8,
    pub sw_macro: u8,
    pub sw_remote: u8,
    pub style: Option<Style>,
    pub mac: String,
    pub bind_ip: Ipv4Addr,
    pub bind_index: u8,
    pub status2: Status2,
    pub filler: String,
}

impl ArtPollReply {
    /// Port addresses `(net << 8) | (sub << 4) | sw` for all four output
    /// switch bytes, as received and regardless of `num_ports`.
    pub fn output_port_addresses(&self) -> [u16; 4] {
        self.port_addresses(&self.sw_out)
    }

    pub fn input_port_addresses(&self) -> [u16; 4] {
        self.port_addresses(&self.sw_in)
    }

    /// Port type bytes that did not decode to a known protocol.
    pub fn unknown_port_types(&self) -> usize {
        self.raw_port_types.len() - self.port_types.len()
    }

    fn port_addresses(&self, switches: &[u8; 4]) -> [u16; 4] {
        let net = u16::from(self.net_switch) << 8;
        let sub = u16::from(self.sub_switch) << 4;
        (*switches).map(|sw| net | sub | u16::from(sw))
    }
}

/// Parse an ArtPollReply.
///
/// Returns `Ok(None)` when the payload is not an ArtPollReply. Payloads
/// longer than 239 bytes or too short to reach the filler are errors.
pub fn parse_art_poll_reply(payload: &[u8]) -> Result<Option<ArtPollReply>, ArtNetError> {
    let reader = ArtNetReader::new(payload);
    reader.require_max_len(field::MAX_LEN)?;
    if !reader.matches(OpCode::PollReply)? {
        return Ok(None);
    }
    reader.require_len(field::MIN_LEN)?;

    let raw_port_types = reader.read_array::<4>(field::PORT_TYPES)?;
    let good_input = reader.read_array::<4>(field::GOOD_INPUT)?;
    let good_output = reader.read_array::<4>(field::GOOD_OUTPUT)?;

    Ok(Some(ArtPollReply {
        id: reader.read_ascii(layout::ID)?,
        op_code: reader.read_opcode()?,
        ip_address: reader.read_ipv4(field::IP_ADDRESS)?,
        port_number: reader.read_u16(field::PORT_NUMBER)?,
        firmware_version: reader.read_u16(field::VERS_INFO)?,
        net_switch: reader.read_u8(field::NET_SWITCH)?,
        sub_switch: reader.read_u8(field::SUB_SWITCH)?,
        oem: reader.read_u16(field::OEM)?,
        ubea_version: reader.read_u8(field::UBEA_VERSION)?,
        status1: Status1::from(reader.read_u8(field::STATUS1)?),
        esta_manufacturer: reader.read_u16(field::ESTA_MAN)?,
        short_name: reader.read_ascii(field::SHORT_NAME)?,
        long_name: reader.read_ascii(field::LONG_NAME)?,
        node_report: reader.read_ascii(field::NODE_REPORT)?,
        num_ports: reader.read_u16(field::NUM_PORTS)?,
        port_types: raw_port_types.iter().copied().filter_map(Port::decode).collect(),
        raw_port_types,
        good_input: good_input.iter().copied().map(GoodInput::from).collect(),
        good_output: good_output.iter().copied().map(GoodOutput::from).collect(),
        sw_in: reader.read_array::<4>(field::SW_IN)?,
        sw_out: reader.read_array::<4>(field::SW_OUT)?,
        sw_video: reader.read_u8(field::SW_VIDEO)?,
        sw_macro: reader.read_u8(field::SW_MACRO)?,
        sw_remote: reader.read_u8(field::SW_REMOTE)?,
        style: Style::from_code(reader.read_u8(field::STYLE)?),
        mac: mac_string(reader.read_field(field::MAC)?),
        bind_ip: reader.read_ipv4(field::BIND_IP)?,
        bind_index: reader.read_u8(field::BIND_INDEX)?,
        status2: Status2::from(reader.read_u8(field::STATUS2)?),
        filler: ascii_string(reader.read_tail(field::FILLER_OFFSET)),
    }))
}

/// Decode an ArtPollReply, discarding malformed or foreign payloads.
pub fn decode_art_poll_reply(payload: &[u8]) -> Option<ArtPollReply> {
    discard_rejected(parse_art_poll_reply(payload), "ArtPollReply")
}
