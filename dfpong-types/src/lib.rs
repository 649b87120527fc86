//! # DFPong Types
//!
//! Type definitions shared between the controller firmware and anything that talks to it.
//!
//! ## Modules
//!
//! - [`movement`] - Movement intent sampled from the input and the byte carried by the characteristic
//! - [`identity`] - Device numbers and the per-unit service/characteristic identifiers derived from them
//! - [`protocol`] - Advertising magic and handshake constants a host application filters on

#![cfg_attr(not(test), no_std)]

pub mod identity;
pub mod movement;
pub mod protocol;

pub use identity::{DeviceNumber, IdentityError, ServiceIdentity, UuidString, generate_identity};
pub use movement::{Movement, MovementValue};
pub use uuid::Uuid;
