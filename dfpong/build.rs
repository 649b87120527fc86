use std::path::Path;
use std::{env, fs};

use const_gen::*;
use dfpong_config::{ConfigLoader, ControllerTomlConfig};

fn main() {
    // Ensure build.rs is re-run when files change
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CONTROLLER_TOML_PATH");

    // Read controller.toml if it's present, an invalid file fails the build
    let config = if let Ok(toml_path) = env::var("CONTROLLER_TOML_PATH") {
        println!("cargo:rerun-if-changed={toml_path}");
        ConfigLoader::load(&toml_path)
    } else {
        ConfigLoader::load_str("")
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => panic!("Invalid CONTROLLER_TOML_PATH file: {e}\n"),
    };

    let constants = get_constants_str(config);

    // Write to constants.rs file
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("constants.rs");
    fs::write(&dest_path, constants).expect("Failed to write constants.rs file");
}

fn get_constants_str(config: ControllerTomlConfig) -> String {
    let ControllerTomlConfig { device, link, buzzer } = config;
    let constant_strs = vec![
        // Device
        const_declaration!(pub(crate) DEVICE_NAME = device.name),
        const_declaration!(pub(crate) DEVICE_NUMBER = device.number),
        // Link
        const_declaration!(pub(crate) MIN_NOTIFICATION_INTERVAL_MS = link.min_notification_interval_ms),
        const_declaration!(pub(crate) LED_BLINK_INTERVAL_MS = link.led_blink_interval_ms),
        const_declaration!(pub(crate) INIT_ATTEMPTS = link.init_attempts),
        const_declaration!(pub(crate) INIT_RETRY_DELAY_MS = link.init_retry_delay_ms),
        const_declaration!(pub(crate) FATAL_BLINK_INTERVAL_MS = link.fatal_blink_interval_ms),
        const_declaration!(pub(crate) SETTLE_DELAY_MS = link.settle_delay_ms),
        const_declaration!(pub(crate) CONNECTION_INTERVAL_MIN_MS = link.connection_interval_min_ms),
        const_declaration!(pub(crate) CONNECTION_INTERVAL_MAX_MS = link.connection_interval_max_ms),
        const_declaration!(pub(crate) ADVERTISING_INTERVAL_MS = link.advertising_interval_ms),
        // Buzzer
        const_declaration!(pub(crate) BUZZER_UP_TOGGLE_INTERVAL_MS = buzzer.up_toggle_interval_ms),
        const_declaration!(pub(crate) BUZZER_DOWN_TOGGLE_INTERVAL_MS = buzzer.down_toggle_interval_ms),
    ];

    constant_strs
        .into_iter()
        .map(|s| "#[allow(clippy::redundant_static_lifetimes)]\n".to_owned() + s.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
