//! Wireless link of the controller.
//!
//! The radio itself is reached through [`Radio`], which a board support crate implements on top of its
//! BLE stack. Everything above that port, the service setup, the handshake and the notification pacing,
//! lives in [`link::LinkController`].
use core::fmt;

use dfpong_types::{ServiceIdentity, Uuid};
use embassy_time::Duration;

pub mod led;
pub mod link;
pub mod session;

pub use led::StatusLed;
pub use link::LinkController;
pub use session::{NotificationState, Session};

/// Events delivered by the radio while it's polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioEvent {
    /// A central connected
    Connected { address: [u8; 6] },
    /// The central disconnected
    Disconnected { address: [u8; 6] },
    /// The central wrote a value to a characteristic
    Written { characteristic: Uuid, value: u8 },
}

/// Properties of the movement characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CharacteristicProps {
    pub read: bool,
    pub write: bool,
    pub notify: bool,
}

impl CharacteristicProps {
    /// Readable, writable by the host for the handshake acknowledgment, and notifying
    pub const MOVEMENT: Self = Self {
        read: true,
        write: true,
        notify: true,
    };
}

/// GAP parameters applied before the service is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapConfig<'a> {
    /// Local name in the advertising data
    pub local_name: &'a str,
    /// Service identifier in the advertising data
    pub advertised_service: Uuid,
    /// Manufacturer specific data in the advertising data
    pub manufacturer_data: &'a [u8],
    pub advertising_interval: Duration,
    pub connection_interval_min: Duration,
    pub connection_interval_max: Duration,
    /// The controller never pairs or bonds
    pub pairable: bool,
}

/// Port to the BLE stack of the board.
///
/// All methods are synchronous. The link controller calls [`Radio::poll`] once per main loop tick, the
/// implementation delivers whatever happened since the last call.
pub trait Radio {
    type Error: fmt::Debug;

    /// Start the BLE stack
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Drop any connection left over from before a reset
    fn disconnect(&mut self);

    /// Stop advertising, a no-op when not advertising
    fn stop_advertising(&mut self);

    /// Apply the GAP parameters
    fn configure(&mut self, gap: &GapConfig<'_>) -> Result<(), Self::Error>;

    /// Add the movement service with its single characteristic
    fn register_service(&mut self, identity: &ServiceIdentity, props: CharacteristicProps) -> Result<(), Self::Error>;

    /// Write the characteristic value, notifying the central when it's subscribed
    fn write_value(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Start advertising
    fn advertise(&mut self) -> Result<(), Self::Error>;

    /// Run the event pump once, every pending event is handed to `on_event`
    fn poll<F: FnMut(RadioEvent)>(&mut self, on_event: F);

    /// Whether a central is connected
    fn is_connected(&self) -> bool;

    /// Whether the connected central enabled notifications on the movement characteristic
    fn is_subscribed(&self) -> bool;
}

/// Errors which stop the link from starting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The BLE stack didn't start after all attempts
    RadioInit { attempts: u8 },
    /// GAP parameters were rejected
    Configure,
    /// The movement service could not be added
    RegisterService,
    /// Advertising could not be started
    Advertise,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::RadioInit { attempts } => write!(f, "BLE stack failed to start after {} attempts", attempts),
            LinkError::Configure => write!(f, "GAP parameters were rejected"),
            LinkError::RegisterService => write!(f, "movement service could not be registered"),
            LinkError::Advertise => write!(f, "advertising could not be started"),
        }
    }
}

impl core::error::Error for LinkError {}
