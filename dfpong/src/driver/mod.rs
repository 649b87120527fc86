//! Thin wrappers over embedded-hal peripherals
pub mod gpio;
