use serde::{Deserialize, Serialize};

use super::error::{ArtNetError, discard_rejected};
use super::layout::poll as field;
use super::opcode::OpCode;
use super::reader::ArtNetReader;
use super::writer::ArtNetWriter;

/// TalkToMe bits of an ArtPoll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollFlags(pub u8);

impl PollFlags {
    pub const REPLY_ON_CHANGE: PollFlags = PollFlags(0x02);
    pub const DIAGNOSTICS: PollFlags = PollFlags(0x04);
    pub const UNICAST_DIAGNOSTICS: PollFlags = PollFlags(0x08);
    pub const DISABLE_VLC: PollFlags = PollFlags(0x10);
    pub const TARGETED: PollFlags = PollFlags(0x20);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: PollFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for PollFlags {
    type Output = PollFlags;

    fn bitor(self, rhs: PollFlags) -> PollFlags {
        PollFlags(self.0 | rhs.0)
    }
}

/// Lowest diagnostics priority a controller wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticsPriority(pub u8);

impl DiagnosticsPriority {
    pub const LOW: DiagnosticsPriority = DiagnosticsPriority(0x10);
    pub const MEDIUM: DiagnosticsPriority = DiagnosticsPriority(0x40);
    pub const HIGH: DiagnosticsPriority = DiagnosticsPriority(0x80);
    pub const CRITICAL: DiagnosticsPriority = DiagnosticsPriority(0xE0);
    pub const VOLATILE: DiagnosticsPriority = DiagnosticsPriority(0xF0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtPoll {
    pub flags: PollFlags,
    pub priority: DiagnosticsPriority,
}

impl ArtPoll {
    /// Discovery poll asking for diagnostics (broadcast and unicast) at the
    /// highest priority.
    pub const fn standard() -> Self {
        Self {
            flags: PollFlags(PollFlags::DIAGNOSTICS.0 | PollFlags::UNICAST_DIAGNOSTICS.0),
            priority: DiagnosticsPriority::VOLATILE,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ArtNetWriter::new(OpCode::Poll, field::LEN);
        writer.put_u8(field::FLAGS, self.flags.bits());
        writer.put_u8(field::DIAG_PRIORITY, self.priority.0);
        writer.finish()
    }
}

impl Default for ArtPoll {
    fn default() -> Self {
        Self::standard()
    }
}

/// The 14-byte discovery poll sent to the broadcast address.
///
/// # Examples
/// ```
/// use lightwire_core::protocols::artnet::encode_art_poll;
///
/// let frame = encode_art_poll();
/// assert_eq!(frame.len(), 14);
/// assert_eq!(&frame[8..10], &[0x00, 0x20]);
/// ```
pub fn encode_art_poll() -> Vec<u8> {
    ArtPoll::standard().encode()
}

pub fn encode_art_poll_with(poll: &ArtPoll) -> Vec<u8> {
    poll.encode()
}

pub fn parse_art_poll(payload: &[u8]) -> Result<Option<ArtPoll>, ArtNetError> {
    let reader = ArtNetReader::new(payload);
    if !reader.matches(OpCode::Poll)? {
        return Ok(None);
    }
    reader.require_len(field::LEN)?;

    Ok(Some(ArtPoll {
        flags: PollFlags(reader.read_u8(field::FLAGS)?),
        priority: DiagnosticsPriority(reader.read_u8(field::DIAG_PRIORITY)?),
    }))
}

pub fn decode_art_poll(payload: &[u8]) -> Option<ArtPoll> {
    discard_rejected(parse_art_poll(payload), "ArtPoll")
}

#[cfg(test)]
mod tests {
    use super::{
        ArtPoll, DiagnosticsPriority, PollFlags, decode_art_poll, encode_art_poll,
        encode_art_poll_with, parse_art_poll,
    };
    use crate::protocols::artnet::error::ArtNetError;

    #[test]
    fn standard_poll_bytes() {
        assert_eq!(
            encode_art_poll(),
            vec![
                b'A', b'r', b't', b'-', b'N', b'e', b't', 0x00, 0x00, 0x20, 0x00, 0x0E, 0x0C,
                0xF0,
            ]
        );
    }

    #[test]
    fn custom_flags_are_written_verbatim() {
        let frame = encode_art_poll_with(&ArtPoll {
            flags: PollFlags::REPLY_ON_CHANGE | PollFlags::TARGETED,
            priority: DiagnosticsPriority::LOW,
        });
        assert_eq!(frame[12], 0x22);
        assert_eq!(frame[13], 0x10);
    }

    #[test]
    fn flags_contains() {
        let flags = ArtPoll::standard().flags;
        assert!(flags.contains(PollFlags::DIAGNOSTICS));
        assert!(flags.contains(PollFlags::UNICAST_DIAGNOSTICS));
        assert!(!flags.contains(PollFlags::TARGETED));
    }

    #[test]
    fn decodes_own_output() {
        assert_eq!(decode_art_poll(&encode_art_poll()), Some(ArtPoll::standard()));
    }

    #[test]
    fn other_opcode_is_not_a_poll() {
        let mut frame = encode_art_poll();
        frame[9] = 0x52;
        assert_eq!(parse_art_poll(&frame), Ok(None));
    }

    #[test]
    fn short_poll_is_rejected() {
        let frame = encode_art_poll();
        assert!(matches!(
            parse_art_poll(&frame[..12]),
            Err(ArtNetError::TooShort { needed: 14, actual: 12 })
        ));
    }
}
