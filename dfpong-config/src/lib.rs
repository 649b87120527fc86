//! Parsing and validation of `controller.toml`.
//!
//! The firmware crate reads this file from its build script, so every value here ends up as a compile-time
//! constant and an invalid file fails the build instead of shipping a unit that cannot be told apart.

use serde_derive::Deserialize;
use serde_inline_default::serde_inline_default;

pub mod error;
pub mod loader;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Highest device number that can be assigned to a unit
pub const MAX_DEVICE_NUMBER: u8 = 25;

/// Longest local name that still fits into the advertising packet next to the service identifier
pub const MAX_DEVICE_NAME_LEN: usize = 29;

/// Identity of the unit
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Local name used in advertising
    #[serde_inline_default("DFPONG".to_string())]
    pub name: String,
    /// Device number in `1..=25`, selects the service identifier
    #[serde_inline_default(1)]
    pub number: u8,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "DFPONG".to_string(),
            number: 1,
        }
    }
}

/// Timing of the wireless link and the status LED, all values in milliseconds
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LinkConstantsConfig {
    /// Minimum spacing between two notifications
    #[serde_inline_default(20)]
    pub min_notification_interval_ms: u32,
    /// LED toggle interval while the link is not ready
    #[serde_inline_default(500)]
    pub led_blink_interval_ms: u32,
    /// How many times the wireless stack is started before giving up
    #[serde_inline_default(3)]
    pub init_attempts: u8,
    /// Pause between two start attempts
    #[serde_inline_default(500)]
    pub init_retry_delay_ms: u32,
    /// LED toggle interval once the wireless stack failed to start
    #[serde_inline_default(100)]
    pub fatal_blink_interval_ms: u32,
    /// Pause after resetting the stack and after writing the initial value
    #[serde_inline_default(100)]
    pub settle_delay_ms: u32,
    /// Lower bound of the requested connection interval
    #[serde_inline_default(15)]
    pub connection_interval_min_ms: u32,
    /// Upper bound of the requested connection interval
    #[serde_inline_default(30)]
    pub connection_interval_max_ms: u32,
    /// Advertising interval
    #[serde_inline_default(100)]
    pub advertising_interval_ms: u32,
}

/// This separate Default impl is needed when `[link]` section is not set in controller.toml
impl Default for LinkConstantsConfig {
    fn default() -> Self {
        Self {
            min_notification_interval_ms: 20,
            led_blink_interval_ms: 500,
            init_attempts: 3,
            init_retry_delay_ms: 500,
            fatal_blink_interval_ms: 100,
            settle_delay_ms: 100,
            connection_interval_min_ms: 15,
            connection_interval_max_ms: 30,
            advertising_interval_ms: 100,
        }
    }
}

/// Buzzer half-period per movement, in milliseconds
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BuzzerConstantsConfig {
    #[serde_inline_default(5)]
    pub up_toggle_interval_ms: u32,
    #[serde_inline_default(15)]
    pub down_toggle_interval_ms: u32,
}

impl Default for BuzzerConstantsConfig {
    fn default() -> Self {
        Self {
            up_toggle_interval_ms: 5,
            down_toggle_interval_ms: 15,
        }
    }
}

/// Content of `controller.toml`
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ControllerTomlConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub link: LinkConstantsConfig,
    #[serde(default)]
    pub buzzer: BuzzerConstantsConfig,
}
