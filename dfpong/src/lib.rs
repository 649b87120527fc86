#![doc = include_str!("../../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod ble;
pub mod buzzer;
pub mod clock;
pub mod config;
pub mod controller;
pub mod driver;
pub mod state;

pub use ble::{LinkController, LinkError, Radio, RadioEvent};
pub use buzzer::Buzzer;
pub use clock::{Clock, EmbassyClock};
pub use config::{BuzzerConfig, ControllerConfig, LinkConfig};
pub use controller::{Controller, MovementInput, run};
pub use dfpong_types::{DeviceNumber, Movement, MovementValue, ServiceIdentity, generate_identity};
pub use state::LinkState;

// Include the generated constants
include!(concat!(env!("OUT_DIR"), "/constants.rs"));
