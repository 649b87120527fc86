//! Per-unit service identity.
//!
//! Every unit flashed with a device number in `1..=25` advertises its own service, so a host can bind to one
//! controller while many are powered on in the same room. The mapping is fixed: the last byte of both the
//! service and the characteristic identifier is `13 + device_number`.
//!
//! | device | suffix |
//! |--------|--------|
//! | 1      | `0e`   |
//! | 2      | `0f`   |
//! | 25     | `26`   |
use core::fmt::{self, Write};

use uuid::Uuid;

use crate::protocol::{
    CHARACTERISTIC_UUID_TEMPLATE, MAX_DEVICE_NUMBER, MIN_DEVICE_NUMBER, SERVICE_UUID_TEMPLATE, SUFFIX_BASE,
};

/// Length of a hyphenated 128-bit identifier
pub const UUID_STR_LEN: usize = 36;

/// Fixed-size storage for a hyphenated, lowercase identifier
pub type UuidString = heapless::String<UUID_STR_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdentityError {
    /// The device number is outside `1..=25`
    OutOfRange(u8),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::OutOfRange(n) => write!(
                f,
                "device number {} is outside {}..={}",
                n, MIN_DEVICE_NUMBER, MAX_DEVICE_NUMBER
            ),
        }
    }
}

/// Device number assigned to a unit at flash time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceNumber(u8);

impl DeviceNumber {
    /// Validate a device number.
    ///
    /// Usable in const context, so a `const` built from an invalid number fails the build.
    pub const fn new(number: u8) -> Result<Self, IdentityError> {
        if number < MIN_DEVICE_NUMBER || number > MAX_DEVICE_NUMBER {
            Err(IdentityError::OutOfRange(number))
        } else {
            Ok(Self(number))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Last byte shared by the service and characteristic identifiers
    pub const fn suffix(self) -> u8 {
        SUFFIX_BASE + self.0
    }
}

impl TryFrom<u8> for DeviceNumber {
    type Error = IdentityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DeviceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Service and characteristic identifiers of one unit.
///
/// The rendered strings live inside this value, so whoever owns the identity owns the text that the
/// wireless stack and the diagnostic log read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    device: DeviceNumber,
    service: Uuid,
    characteristic: Uuid,
    service_str: UuidString,
    characteristic_str: UuidString,
}

impl ServiceIdentity {
    pub fn device(&self) -> DeviceNumber {
        self.device
    }

    pub fn service(&self) -> Uuid {
        self.service
    }

    pub fn characteristic(&self) -> Uuid {
        self.characteristic
    }

    /// Service identifier, e.g. `19b10010-e8f2-537e-4f6c-d104768a120e`
    pub fn service_str(&self) -> &str {
        self.service_str.as_str()
    }

    /// Characteristic identifier, e.g. `19b10011-e8f2-537e-4f6c-d104768a120e`
    pub fn characteristic_str(&self) -> &str {
        self.characteristic_str.as_str()
    }
}

/// Derive the identifiers of a unit from its device number
pub fn generate_identity(device: DeviceNumber) -> ServiceIdentity {
    let service = with_suffix(SERVICE_UUID_TEMPLATE, device);
    let characteristic = with_suffix(CHARACTERISTIC_UUID_TEMPLATE, device);
    ServiceIdentity {
        device,
        service,
        characteristic,
        service_str: render(service),
        characteristic_str: render(characteristic),
    }
}

const fn with_suffix(template: [u8; 16], device: DeviceNumber) -> Uuid {
    let mut bytes = template;
    bytes[15] = device.suffix();
    Uuid::from_bytes(bytes)
}

fn render(uuid: Uuid) -> UuidString {
    let mut s = UuidString::new();
    // 36 bytes always fit
    let _ = write!(s, "{}", uuid.hyphenated());
    s
}
