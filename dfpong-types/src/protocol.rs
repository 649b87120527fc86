//! Constants that a host application relies on to find and bind a controller.

/// Protocol version advertised in the second byte of the manufacturer data
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Manufacturer specific advertising data: `0xDF` marks a DFPong controller, followed by the protocol version
pub const MANUFACTURER_DATA: [u8; 2] = [0xDF, PROTOCOL_VERSION];

/// Characteristic value used only by the handshake, never by the input
pub const HANDSHAKE_SENTINEL: u8 = 3;

/// Lowest device number that can be flashed onto a unit
pub const MIN_DEVICE_NUMBER: u8 = 1;

/// Highest device number that can be flashed onto a unit
pub const MAX_DEVICE_NUMBER: u8 = 25;

/// Offset added to the device number to form the last byte of the identifiers.
/// Device 1 maps to `0x0e`, device 25 to `0x26`.
pub const SUFFIX_BASE: u8 = 13;

/// Service identifier template, the last byte is replaced by the device suffix
pub const SERVICE_UUID_TEMPLATE: [u8; 16] = [
    0x19, 0xb1, 0x00, 0x10, 0xe8, 0xf2, 0x53, 0x7e, 0x4f, 0x6c, 0xd1, 0x04, 0x76, 0x8a, 0x12, 0x00,
];

/// Characteristic identifier template, the last byte is replaced by the device suffix
pub const CHARACTERISTIC_UUID_TEMPLATE: [u8; 16] = [
    0x19, 0xb1, 0x00, 0x11, 0xe8, 0xf2, 0x53, 0x7e, 0x4f, 0x6c, 0xd1, 0x04, 0x76, 0x8a, 0x12, 0x00,
];
