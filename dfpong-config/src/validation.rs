//! Validation for controller configuration
//!
//! Sections are checked in file order, the first error is returned.

use crate::error::{ConfigError, ConfigResult};
use crate::{ControllerTomlConfig, MAX_DEVICE_NAME_LEN, MAX_DEVICE_NUMBER};

/// Validates the entire controller configuration
pub fn validate_config(config: &ControllerTomlConfig) -> ConfigResult<()> {
    validate_device_section(config)?;
    validate_link_section(config)?;
    validate_buzzer_section(config)?;
    Ok(())
}

/// Validates the [device] section
fn validate_device_section(config: &ControllerTomlConfig) -> ConfigResult<()> {
    let device = &config.device;

    if device.number == 0 || device.number > MAX_DEVICE_NUMBER {
        return Err(ConfigError::InvalidValue {
            field: "device.number".to_string(),
            value: device.number.to_string(),
            expected: format!("1 to {}", MAX_DEVICE_NUMBER),
        });
    }

    if device.name.is_empty() || device.name.len() > MAX_DEVICE_NAME_LEN {
        return Err(ConfigError::InvalidValue {
            field: "device.name".to_string(),
            value: device.name.clone(),
            expected: format!("1 to {} bytes", MAX_DEVICE_NAME_LEN),
        });
    }

    if !device.name.is_ascii() {
        return Err(ConfigError::Validation {
            field: "device.name".to_string(),
            message: "Local name must be ASCII".to_string(),
        });
    }

    Ok(())
}

/// Validates the [link] section
fn validate_link_section(config: &ControllerTomlConfig) -> ConfigResult<()> {
    let link = &config.link;

    if link.init_attempts == 0 {
        return Err(ConfigError::InvalidValue {
            field: "link.init_attempts".to_string(),
            value: "0".to_string(),
            expected: "at least 1".to_string(),
        });
    }

    if link.connection_interval_min_ms > link.connection_interval_max_ms {
        return Err(ConfigError::Validation {
            field: "link.connection_interval_min_ms/connection_interval_max_ms".to_string(),
            message: format!(
                "Connection interval window is inverted: {} > {}",
                link.connection_interval_min_ms, link.connection_interval_max_ms
            ),
        });
    }

    for (field, value) in [
        ("link.led_blink_interval_ms", link.led_blink_interval_ms),
        ("link.fatal_blink_interval_ms", link.fatal_blink_interval_ms),
        ("link.advertising_interval_ms", link.advertising_interval_ms),
    ] {
        if value == 0 {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                value: "0".to_string(),
                expected: "a non-zero interval".to_string(),
            });
        }
    }

    Ok(())
}

/// Validates the [buzzer] section
fn validate_buzzer_section(config: &ControllerTomlConfig) -> ConfigResult<()> {
    let buzzer = &config.buzzer;

    if buzzer.up_toggle_interval_ms == buzzer.down_toggle_interval_ms {
        return Err(ConfigError::Validation {
            field: "buzzer".to_string(),
            message: "UP and DOWN tones must differ to be told apart".to_string(),
        });
    }

    Ok(())
}
