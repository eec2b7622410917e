use serde::{Deserialize, Serialize};

/// Art-Net message kinds understood by this crate.
///
/// ArtNzs uses the Art-Net value 0x5100; ArtSync keeps 0x5200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum OpCode {
    Poll = 0x2000,
    PollReply = 0x2100,
    Dmx = 0x5000,
    Nzs = 0x5100,
    Sync = 0x5200,
    TimeSync = 0x9800,
}

impl OpCode {
    pub const ALL: [OpCode; 6] = [
        OpCode::Poll,
        OpCode::PollReply,
        OpCode::Dmx,
        OpCode::Nzs,
        OpCode::Sync,
        OpCode::TimeSync,
    ];

    pub const fn value(self) -> u16 {
        self as u16
    }

    pub fn from_value(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.value() == value)
    }

    pub fn name(self) -> &'static str {
        match self {
            OpCode::Poll => "ArtPoll",
            OpCode::PollReply => "ArtPollReply",
            OpCode::Dmx => "ArtDmx",
            OpCode::Nzs => "ArtNzs",
            OpCode::Sync => "ArtSync",
            OpCode::TimeSync => "ArtTimeSync",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OpCode;

    #[test]
    fn values_are_unique() {
        for (idx, op) in OpCode::ALL.iter().enumerate() {
            for other in &OpCode::ALL[idx + 1..] {
                assert_ne!(op.value(), other.value(), "{op:?} and {other:?} collide");
            }
        }
    }

    #[test]
    fn from_value_round_trips() {
        assert_eq!(OpCode::from_value(0x2100), Some(OpCode::PollReply));
        assert_eq!(OpCode::from_value(0x5100), Some(OpCode::Nzs));
        assert_eq!(OpCode::from_value(0x5200), Some(OpCode::Sync));
        assert_eq!(OpCode::from_value(0xF000), None);
    }
}
