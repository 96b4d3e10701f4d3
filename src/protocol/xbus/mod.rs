//! Xsens Xbus protocol support: byte-wise frame decoding, message views,
//! and typed access to the `MTData2` data items.
//!
//! Frame layout:
//!
//! ```text
//! | 0xFA | bus id | mid | len (0xFF → ext len u16 BE) | payload … | checksum |
//! ```
//!
//! The 8-bit sum of every byte after the preamble, checksum included, is zero.
pub mod data;
pub mod message;
pub mod parser;

#[cfg(test)]
pub(crate) mod testing;

/// Start-of-frame marker.
pub const PREAMBLE: u8 = 0xFA;
/// Bus identifier used by a sensor talking to its master.
pub const MASTER_BUS_ID: u8 = 0xFF;
/// Length byte announcing a two-byte extended length.
pub const EXTENDED_LENGTH: u8 = 0xFF;
/// Length byte of a message without payload.
pub const NO_PAYLOAD: u8 = 0x00;
/// Largest payload a sensor sends in one frame. A longer extended length
/// can only come from a false preamble.
pub const MAX_PAYLOAD_LENGTH: u16 = 2048;
