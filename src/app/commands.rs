//! Serial command protocol.
//!
//! One ASCII byte per command, one ASCII byte per acknowledgment.  No
//! framing, no length prefix, no checksum.
//!
//! | In  | Command   | Ack |
//! |-----|-----------|-----|
//! | `o` | `Off`     | `O` |
//! | `m` | `Monitor` | `M` |
//! | `p` | `Panic`   | `P` |
//!
//! Any other inbound byte is ignored (unless the panic lock is held, in
//! which case the controller answers `P`).

use serde::Serialize;

/// Commands the remote side can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    /// Go idle and release the panic lock.
    Off,
    /// Arm (or re-arm) monitoring.
    Monitor,
    /// Force the panic alarm.
    Panic,
}

impl Command {
    /// Decode an inbound byte.  Unrecognised bytes yield `None`.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'o' => Some(Self::Off),
            b'm' => Some(Self::Monitor),
            b'p' => Some(Self::Panic),
            _ => None,
        }
    }

    /// The acknowledgment sent once this command has been applied.
    pub fn ack(self) -> Ack {
        match self {
            Self::Off => Ack::Off,
            Self::Monitor => Ack::Monitor,
            Self::Panic => Ack::Panic,
        }
    }
}

/// Outbound acknowledgment bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ack {
    Off,
    Monitor,
    /// Panic entered, panic lock engaged, or command refused while locked.
    Panic,
}

impl Ack {
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Off => b'O',
            Self::Monitor => b'M',
            Self::Panic => b'P',
        }
    }
}
