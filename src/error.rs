//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (ring buffer saturation,
//! CAN identifier construction, lifecycle sequencing, frame publication).
//!
//! Protocol-level problems on the sensor link (bad checksum, oversized
//! frame) are not errors here: the decoder recovers locally and reports
//! them through [`ParseStatus`](crate::protocol::xbus::parser::ParseStatus)
//! and the diagnostics collaborator.
use thiserror_no_std::Error;

//==================================================================================RING_BUFFER
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failure to store a received byte.
pub enum RingBufferError {
    /// The buffer was full: the byte was dropped and the overflow flag latched.
    #[error("Ring buffer full, byte dropped")]
    Full,
}

//==================================================================================CAN_ID
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors that can occur while building a CAN identifier.
pub enum CanIdError {
    /// Raw value does not fit an 11-bit standard identifier.
    #[error("Standard identifier out of range: {raw:#X}")]
    StandardOutOfRange { raw: u32 },
    /// Raw value does not fit a 29-bit extended identifier.
    #[error("Extended identifier out of range: {raw:#X}")]
    ExtendedOutOfRange { raw: u32 },
}

//==================================================================================LIFECYCLE
#[derive(Error, Debug)]
/// Errors raised by `init`, `enable` and `disable`.
pub enum LifecycleError<E: core::fmt::Debug> {
    /// `enable`/`disable` called before `init`.
    #[error("Gateway not initialized")]
    NotInitialized,
    /// The serial driver rejected the port configuration.
    #[error("Serial configuration error: {0:?}")]
    Serial(E),
}

//==================================================================================PUBLISH
#[derive(Error, Debug)]
/// Errors reported by one gateway update cycle.
pub enum PublishError<E: core::fmt::Debug> {
    /// `update` called before `init`.
    #[error("Gateway not initialized")]
    NotInitialized,
    /// At least one frame was rejected by the CAN layer. The affected groups
    /// were still cleared; `error` is the first failure of the cycle.
    #[error("CAN bus send error on {failed} frame(s): {error:?}")]
    Send { failed: usize, error: E },
}

//==================================================================================BLOCKING_BUS
#[derive(Error, Debug)]
/// Errors raised by the [`BlockingCanBus`](crate::protocol::transport::traits::can_bus::BlockingCanBus) adapter.
pub enum BlockingBusError<E: core::fmt::Debug> {
    /// The driver's frame type could not represent the frame.
    #[error("Frame not representable by the CAN driver")]
    Frame,
    /// CAN driver refused or failed to send the frame.
    #[error("CAN driver error: {0:?}")]
    Bus(E),
}
