//! Bit-packed ArtPollReply sub-records.
//!
//! Each type is decoded from a single byte through the bit tables in
//! `layout`, and can be packed back into that byte.

use serde::{Deserialize, Serialize};

use super::layout::{good_input, good_output, port, status1, status2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    Unknown,
    Locate,
    Mute,
    Normal,
}

impl IndicatorState {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0b01 => IndicatorState::Locate,
            0b10 => IndicatorState::Mute,
            0b11 => IndicatorState::Normal,
            _ => IndicatorState::Unknown,
        }
    }

    fn bits(self) -> u8 {
        match self {
            IndicatorState::Unknown => 0b00,
            IndicatorState::Locate => 0b01,
            IndicatorState::Mute => 0b10,
            IndicatorState::Normal => 0b11,
        }
    }
}

/// Who last set the node's port addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortAddressAuthority {
    Unknown,
    FrontPanel,
    Network,
    Illegal,
}

impl PortAddressAuthority {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0b01 => PortAddressAuthority::FrontPanel,
            0b10 => PortAddressAuthority::Network,
            0b11 => PortAddressAuthority::Illegal,
            _ => PortAddressAuthority::Unknown,
        }
    }

    fn bits(self) -> u8 {
        match self {
            PortAddressAuthority::Unknown => 0b00,
            PortAddressAuthority::FrontPanel => 0b01,
            PortAddressAuthority::Network => 0b10,
            PortAddressAuthority::Illegal => 0b11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootMode {
    Normal,
    FactoryStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status1 {
    pub indicator: IndicatorState,
    pub port_address_authority: PortAddressAuthority,
    pub boot_mode: BootMode,
    pub rdm_capable: bool,
    pub ubea_present: bool,
}

impl From<u8> for Status1 {
    fn from(byte: u8) -> Self {
        Self {
            indicator: IndicatorState::from_bits(status1::INDICATOR.extract(byte)),
            port_address_authority: PortAddressAuthority::from_bits(
                status1::PORT_ADDRESS_AUTHORITY.extract(byte),
            ),
            boot_mode: if status1::BOOT_MODE.is_set(byte) {
                BootMode::FactoryStart
            } else {
                BootMode::Normal
            },
            rdm_capable: status1::RDM_CAPABLE.is_set(byte),
            ubea_present: status1::UBEA_PRESENT.is_set(byte),
        }
    }
}

impl From<Status1> for u8 {
    fn from(status: Status1) -> Self {
        let mut byte = status1::INDICATOR.insert(0, status.indicator.bits());
        byte = status1::PORT_ADDRESS_AUTHORITY.insert(byte, status.port_address_authority.bits());
        byte = status1::BOOT_MODE.insert(byte, u8::from(status.boot_mode == BootMode::FactoryStart));
        byte = status1::RDM_CAPABLE.insert(byte, u8::from(status.rdm_capable));
        status1::UBEA_PRESENT.insert(byte, u8::from(status.ubea_present))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortAddressStyle {
    /// 8-bit port addresses (Art-Net II).
    Legacy,
    /// 15-bit port addresses.
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status2 {
    pub port_address_style: PortAddressStyle,
    pub dhcp_capable: bool,
    pub dhcp_configured: bool,
    pub web_configuration: bool,
}

impl From<u8> for Status2 {
    fn from(byte: u8) -> Self {
        Self {
            port_address_style: if status2::PORT_ADDRESS_15_BIT.is_set(byte) {
                PortAddressStyle::Extended
            } else {
                PortAddressStyle::Legacy
            },
            dhcp_capable: status2::DHCP_CAPABLE.is_set(byte),
            dhcp_configured: status2::DHCP_CONFIGURED.is_set(byte),
            web_configuration: status2::WEB_CONFIGURATION.is_set(byte),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortType {
    Dmx512,
    Midi,
    Avab,
    ColortranCmx,
    Adb625,
    ArtNet,
}

impl PortType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PortType::Dmx512),
            1 => Some(PortType::Midi),
            2 => Some(PortType::Avab),
            3 => Some(PortType::ColortranCmx),
            4 => Some(PortType::Adb625),
            5 => Some(PortType::ArtNet),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub output_implemented: bool,
    pub input_implemented: bool,
    pub port_type: PortType,
}

impl Port {
    /// `None` when the 6-bit type code is not a known protocol.
    pub fn decode(byte: u8) -> Option<Self> {
        Some(Self {
            output_implemented: port::OUTPUT.is_set(byte),
            input_implemented: port::INPUT.is_set(byte),
            port_type: PortType::from_code(port::TYPE.extract(byte))?,
        })
    }

    pub fn encode(self) -> u8 {
        let byte = port::OUTPUT.insert(0, u8::from(self.output_implemented));
        let byte = port::INPUT.insert(byte, u8::from(self.input_implemented));
        port::TYPE.insert(byte, self.port_type.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodInput {
    pub data_received: bool,
    pub test_packets: bool,
    pub sip_packets: bool,
    pub text_packets: bool,
    pub input_disabled: bool,
    pub receive_errors: bool,
}

impl From<u8> for GoodInput {
    fn from(byte: u8) -> Self {
        Self {
            data_received: good_input::DATA_RECEIVED.is_set(byte),
            test_packets: good_input::TEST_PACKETS.is_set(byte),
            sip_packets: good_input::SIP_PACKETS.is_set(byte),
            text_packets: good_input::TEXT_PACKETS.is_set(byte),
            input_disabled: good_input::INPUT_DISABLED.is_set(byte),
            receive_errors: good_input::RECEIVE_ERRORS.is_set(byte),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Highest takes precedence.
    Htp,
    /// Latest takes precedence.
    Ltp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodOutput {
    pub data_transmitted: bool,
    pub test_packets: bool,
    pub sip_packets: bool,
    pub text_packets: bool,
    pub merging: bool,
    pub short_circuit: bool,
    pub merge_mode: MergeMode,
}

impl From<u8> for GoodOutput {
    fn from(byte: u8) -> Self {
        Self {
            data_transmitted: good_output::DATA_TRANSMITTED.is_set(byte),
            test_packets: good_output::TEST_PACKETS.is_set(byte),
            sip_packets: good_output::SIP_PACKETS.is_set(byte),
            text_packets: good_output::TEXT_PACKETS.is_set(byte),
            merging: good_output::MERGING.is_set(byte),
            short_circuit: good_output::SHORT_CIRCUIT.is_set(byte),
            merge_mode: if good_output::MERGE_LTP.is_set(byte) {
                MergeMode::Ltp
            } else {
                MergeMode::Htp
            },
        }
    }
}

/// Node style reported at offset 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Node,
    Controller,
    Media,
    Route,
    Backup,
    Config,
    Visual,
}

impl Style {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Style::Node),
            0x01 => Some(Style::Controller),
            0x02 => Some(Style::Media),
            0x03 => Some(Style::Route),
            0x04 => Some(Style::Backup),
            0x05 => Some(Style::Config),
            0x06 => Some(Style::Visual),
            _ => None,
        }
    }
}
