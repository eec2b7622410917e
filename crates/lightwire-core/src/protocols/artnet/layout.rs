//! Art-Net wire layout: the single source of truth for offsets, widths and
//! per-field byte order. Readers and writers only address bytes through the
//! entries defined here.

use std::ops::Range;

use crate::bits::{BitField, ByteOrder};

/// One fixed-position wire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub offset: usize,
    pub len: usize,
    pub order: ByteOrder,
}

impl Field {
    pub const fn new(offset: usize, len: usize, order: ByteOrder) -> Self {
        Self { offset, len, order }
    }

    pub const fn byte(offset: usize) -> Self {
        Self::new(offset, 1, ByteOrder::Big)
    }

    pub const fn bytes(offset: usize, len: usize) -> Self {
        Self::new(offset, len, ByteOrder::Big)
    }

    pub const fn end(self) -> usize {
        self.offset + self.len
    }

    pub const fn range(self) -> Range<usize> {
        self.offset..self.end()
    }
}

pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";
pub const ARTNET_PORT: u16 = 6454;
pub const PROTOCOL_VERSION: u16 = 14;

pub const ID: Field = Field::bytes(0, 8);
/// Low byte first.
pub const OP_CODE: Field = Field::new(8, 2, ByteOrder::Little);
/// High byte first.
pub const PROT_VER: Field = Field::new(10, 2, ByteOrder::Big);

/// Shortest buffer any decoder can look at: signature plus opcode.
pub const MIN_LEN: usize = OP_CODE.end();
pub const PREAMBLE_LEN: usize = PROT_VER.end();

pub const DMX_MAX_SLOTS: usize = 512;

pub mod poll {
    use super::Field;

    pub const FLAGS: Field = Field::byte(12);
    pub const DIAG_PRIORITY: Field = Field::byte(13);
    pub const LEN: usize = 14;
}

pub mod poll_reply {
    use super::Field;
    use crate::bits::ByteOrder;

    pub const MAX_LEN: usize = 239;

    pub const IP_ADDRESS: Field = Field::bytes(10, 4);
    pub const PORT_NUMBER: Field = Field::new(14, 2, ByteOrder::Little);
    pub const VERS_INFO: Field = Field::new(16, 2, ByteOrder::Big);
    pub const NET_SWITCH: Field = Field::byte(18);
    pub const SUB_SWITCH: Field = Field::byte(19);
    pub const OEM: Field = Field::new(20, 2, ByteOrder::Big);
    pub const UBEA_VERSION: Field = Field::byte(22);
    pub const STATUS1: Field = Field::byte(23);
    pub const ESTA_MAN: Field = Field::new(24, 2, ByteOrder::Little);
    pub const SHORT_NAME: Field = Field::bytes(26, 18);
    pub const LONG_NAME: Field = Field::bytes(44, 64);
    pub const NODE_REPORT: Field = Field::bytes(108, 64);
    pub const NUM_PORTS: Field = Field::new(172, 2, ByteOrder::Big);
    pub const PORT_TYPES: Field = Field::bytes(174, 4);
    pub const GOOD_INPUT: Field = Field::bytes(178, 4);
    pub const GOOD_OUTPUT: Field = Field::bytes(182, 4);
    pub const SW_IN: Field = Field::bytes(186, 4);
    pub const SW_OUT: Field = Field::bytes(190, 4);
    pub const SW_VIDEO: Field = Field::byte(194);
    pub const SW_MACRO: Field = Field::byte(195);
    pub const SW_REMOTE: Field = Field::byte(196);
    pub const STYLE: Field = Field::byte(200);
    pub const MAC: Field = Field::bytes(201, 6);
    pub const BIND_IP: Field = Field::bytes(207, 4);
    pub const BIND_INDEX: Field = Field::byte(211);
    pub const STATUS2: Field = Field::byte(212);
    pub const FILLER_OFFSET: usize = 213;

    /// Everything before the trailing filler must be present.
    pub const MIN_LEN: usize = FILLER_OFFSET;
}

pub mod dmx {
    use super::Field;
    use crate::bits::ByteOrder;

    pub const SEQUENCE: Field = Field::byte(12);
    pub const PHYSICAL: Field = Field::byte(13);
    /// SubUni then Net: low byte first.
    pub const PORT_ADDRESS: Field = Field::new(14, 2, ByteOrder::Little);
    pub const LENGTH: Field = Field::new(16, 2, ByteOrder::Big);
    pub const DATA_OFFSET: usize = 18;
    pub const MAX_PORT_ADDRESS: u16 = 0x7FFF;
}

pub mod nzs {
    use super::Field;
    use crate::bits::ByteOrder;

    pub const SEQUENCE: Field = Field::byte(12);
    pub const START_CODE: Field = Field::byte(13);
    pub const SUB_UNI: Field = Field::byte(14);
    pub const NET: Field = Field::byte(15);
    pub const LENGTH: Field = Field::new(16, 2, ByteOrder::Big);
    pub const DATA_OFFSET: usize = 18;
    pub const MIN_DATA_LEN: usize = 2;
    /// Manufacturer-specific alternate start code used when none is given.
    pub const DEFAULT_START_CODE: u8 = 0x91;
}

pub mod sync {
    use super::Field;

    pub const AUX1: Field = Field::byte(12);
    pub const AUX2: Field = Field::byte(13);
    pub const LEN: usize = 14;
}

pub mod time_sync {
    use super::Field;
    use crate::bits::ByteOrder;

    pub const FILLER: Field = Field::new(12, 2, ByteOrder::Big);
    pub const PROG: Field = Field::byte(14);
    pub const SECONDS: Field = Field::byte(15);
    pub const MINUTES: Field = Field::byte(16);
    pub const HOURS: Field = Field::byte(17);
    pub const MONTH_DAY: Field = Field::byte(18);
    pub const MONTH: Field = Field::byte(19);
    /// Years since 1900.
    pub const YEAR: Field = Field::new(20, 2, ByteOrder::Big);
    pub const WEEKDAY: Field = Field::byte(22);
    pub const DST: Field = Field::byte(23);
    pub const LEN: usize = 24;
    pub const YEAR_BASE: i32 = 1900;
}

pub mod status1 {
    use super::BitField;

    pub const INDICATOR: BitField = BitField::new(6, 2);
    pub const PORT_ADDRESS_AUTHORITY: BitField = BitField::new(4, 2);
    pub const BOOT_MODE: BitField = BitField::flag(2);
    pub const RDM_CAPABLE: BitField = BitField::flag(1);
    pub const UBEA_PRESENT: BitField = BitField::flag(0);

    pub const FIELDS: [BitField; 5] = [
        INDICATOR,
        PORT_ADDRESS_AUTHORITY,
        BOOT_MODE,
        RDM_CAPABLE,
        UBEA_PRESENT,
    ];
}

pub mod status2 {
    use super::BitField;

    pub const PORT_ADDRESS_15_BIT: BitField = BitField::flag(3);
    pub const DHCP_CAPABLE: BitField = BitField::flag(2);
    pub const DHCP_CONFIGURED: BitField = BitField::flag(1);
    pub const WEB_CONFIGURATION: BitField = BitField::flag(0);

    pub const FIELDS: [BitField; 4] = [
        PORT_ADDRESS_15_BIT,
        DHCP_CAPABLE,
        DHCP_CONFIGURED,
        WEB_CONFIGURATION,
    ];
}

pub mod port {
    use super::BitField;

    pub const OUTPUT: BitField = BitField::flag(7);
    pub const INPUT: BitField = BitField::flag(6);
    pub const TYPE: BitField = BitField::new(0, 6);

    pub const FIELDS: [BitField; 3] = [OUTPUT, INPUT, TYPE];
}

pub mod good_input {
    use super::BitField;

    pub const DATA_RECEIVED: BitField = BitField::flag(7);
    pub const TEST_PACKETS: BitField = BitField::flag(6);
    pub const SIP_PACKETS: BitField = BitField::flag(5);
    pub const TEXT_PACKETS: BitField = BitField::flag(4);
    pub const INPUT_DISABLED: BitField = BitField::flag(3);
    pub const RECEIVE_ERRORS: BitField = BitField::flag(2);

    pub const FIELDS: [BitField; 6] = [
        DATA_RECEIVED,
        TEST_PACKETS,
        SIP_PACKETS,
        TEXT_PACKETS,
        INPUT_DISABLED,
        RECEIVE_ERRORS,
    ];
}

pub mod good_output {
    use super::BitField;

    pub const DATA_TRANSMITTED: BitField = BitField::flag(7);
    pub const TEST_PACKETS: BitField = BitField::flag(6);
    pub const SIP_PACKETS: BitField = BitField::flag(5);
    pub const TEXT_PACKETS: BitField = BitField::flag(4);
    pub const MERGING: BitField = BitField::flag(3);
    pub const SHORT_CIRCUIT: BitField = BitField::flag(2);
    pub const MERGE_LTP: BitField = BitField::flag(1);

    pub const FIELDS: [BitField; 7] = [
        DATA_TRANSMITTED,
        TEST_PACKETS,
        SIP_PACKETS,
        TEXT_PACKETS,
        MERGING,
        SHORT_CIRCUIT,
        MERGE_LTP,
    ];
}
