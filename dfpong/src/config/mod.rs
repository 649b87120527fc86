//! Runtime configuration of the controller.
//!
//! Defaults come from `controller.toml`, which the build script turns into constants. Every field can still be
//! overridden when constructing the controller by hand, e.g. in tests.
use dfpong_types::DeviceNumber;
use embassy_time::Duration;

use crate::{
    ADVERTISING_INTERVAL_MS, BUZZER_DOWN_TOGGLE_INTERVAL_MS, BUZZER_UP_TOGGLE_INTERVAL_MS, CONNECTION_INTERVAL_MAX_MS,
    CONNECTION_INTERVAL_MIN_MS, DEVICE_NAME, DEVICE_NUMBER, FATAL_BLINK_INTERVAL_MS, INIT_ATTEMPTS,
    INIT_RETRY_DELAY_MS, LED_BLINK_INTERVAL_MS, MIN_NOTIFICATION_INTERVAL_MS, SETTLE_DELAY_MS,
};

/// Device number from `controller.toml`, validated at compile time
const BUILD_DEVICE_NUMBER: DeviceNumber = match DeviceNumber::new(DEVICE_NUMBER) {
    Ok(number) => number,
    Err(_) => panic!("device number in controller.toml must be in 1..=25"),
};

/// Configuration of the whole controller
#[derive(Clone, Copy, Debug)]
pub struct ControllerConfig {
    /// Local name used in advertising
    pub device_name: &'static str,
    /// Selects the service identity of this unit
    pub device_number: DeviceNumber,
    pub link: LinkConfig,
    pub buzzer: BuzzerConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            device_name: DEVICE_NAME,
            device_number: BUILD_DEVICE_NUMBER,
            link: LinkConfig::default(),
            buzzer: BuzzerConfig::default(),
        }
    }
}

/// Timing of the wireless link and the status LED, all values in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Minimum spacing between two notifications
    pub min_notification_interval_ms: u32,
    /// LED toggle interval while the link is not ready
    pub led_blink_interval_ms: u32,
    /// Number of attempts to start the wireless stack
    pub init_attempts: u8,
    /// Pause after every failed start attempt
    pub init_retry_delay_ms: u32,
    /// LED toggle interval after the wireless stack failed to start
    pub fatal_blink_interval_ms: u32,
    /// Pause after resetting the stack and after writing the initial value
    pub settle_delay_ms: u32,
    pub connection_interval_min_ms: u32,
    pub connection_interval_max_ms: u32,
    pub advertising_interval_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            min_notification_interval_ms: MIN_NOTIFICATION_INTERVAL_MS,
            led_blink_interval_ms: LED_BLINK_INTERVAL_MS,
            init_attempts: INIT_ATTEMPTS,
            init_retry_delay_ms: INIT_RETRY_DELAY_MS,
            fatal_blink_interval_ms: FATAL_BLINK_INTERVAL_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            connection_interval_min_ms: CONNECTION_INTERVAL_MIN_MS,
            connection_interval_max_ms: CONNECTION_INTERVAL_MAX_MS,
            advertising_interval_ms: ADVERTISING_INTERVAL_MS,
        }
    }
}

impl LinkConfig {
    pub fn advertising_interval(&self) -> Duration {
        Duration::from_millis(self.advertising_interval_ms as u64)
    }

    pub fn connection_interval_min(&self) -> Duration {
        Duration::from_millis(self.connection_interval_min_ms as u64)
    }

    pub fn connection_interval_max(&self) -> Duration {
        Duration::from_millis(self.connection_interval_max_ms as u64)
    }
}

/// Buzzer half-period per movement, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuzzerConfig {
    pub up_toggle_interval_ms: u32,
    pub down_toggle_interval_ms: u32,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            up_toggle_interval_ms: BUZZER_UP_TOGGLE_INTERVAL_MS,
            down_toggle_interval_ms: BUZZER_DOWN_TOGGLE_INTERVAL_MS,
        }
    }
}
