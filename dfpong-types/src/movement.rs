//! Movement intent and its encoding on the characteristic.
use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Movement intent sampled from the input.
///
/// The handshake sentinel is not representable here, so it can never come from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromRepr, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Movement {
    #[default]
    None = 0,
    Up = 1,
    Down = 2,
}

/// Value carried by the movement characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromRepr, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MovementValue {
    #[default]
    None = 0,
    Up = 1,
    Down = 2,
    Handshake = 3,
}

impl MovementValue {
    /// The byte written to the characteristic
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    pub const fn is_handshake(self) -> bool {
        matches!(self, MovementValue::Handshake)
    }
}

impl From<Movement> for MovementValue {
    fn from(movement: Movement) -> Self {
        match movement {
            Movement::None => MovementValue::None,
            Movement::Up => MovementValue::Up,
            Movement::Down => MovementValue::Down,
        }
    }
}

impl TryFrom<u8> for MovementValue {
    type Error = u8;

    /// Unknown codes are handed back so the caller can log and ignore them
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        MovementValue::from_repr(value).ok_or(value)
    }
}

impl From<MovementValue> for u8 {
    fn from(value: MovementValue) -> Self {
        value.as_byte()
    }
}
