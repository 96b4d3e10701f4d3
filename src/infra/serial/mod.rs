//! UART boundary between the sensor link and the gateway.
//!
//! The board support code owns the UART registers and implements two
//! small traits: [`SerialRx`] for the receive interrupt and
//! [`SerialControl`] for the main-loop lifecycle (configure, enable,
//! disable). The interrupt handler itself is a one-liner around
//! [`on_rx_interrupt`]:
//!
//! ```rust,ignore
//! #[interrupt]
//! fn USART0_RX() {
//!     let _ = on_rx_interrupt(&mut ImuUartRx, &IMU_RX);
//! }
//! ```
use crate::error::RingBufferError;
use crate::infra::ring_buffer::RingBuffer;

//==================================================================================LINE_STATUS
/// Receive-error flags latched by the UART alongside a data byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineStatus(u8);

impl LineStatus {
    /// No error reported.
    pub const NONE: Self = Self(0);
    /// Stop bit not found where expected.
    pub const FRAMING_ERROR: Self = Self(1 << 0);
    /// A byte arrived before the previous one was read.
    pub const DATA_OVERRUN: Self = Self(1 << 1);

    const MASK: u8 = Self::FRAMING_ERROR.0 | Self::DATA_OVERRUN.0;

    /// Build from raw bits, discarding bits that carry no meaning here.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Combine two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every flag in `other` is also set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any framing or overrun error is flagged.
    pub const fn is_error(self) -> bool {
        self.0 != 0
    }
}

//==================================================================================TRAITS
/// Receive side of the sensor UART, used from the interrupt handler only.
pub trait SerialRx {
    /// Read the status register for the byte about to be read.
    fn read_status(&mut self) -> LineStatus;
    /// Read the data register. On most UARTs this clears the status latch.
    fn read_data(&mut self) -> u8;
}

/// Control side of the sensor UART, used from the main loop only.
pub trait SerialControl {
    type Error: core::fmt::Debug;
    /// Apply the line settings (8N1 at `baud_rate`). Leaves the receiver disabled.
    fn configure(&mut self, baud_rate: u32) -> Result<(), Self::Error>;
    /// Enable the receiver and its interrupt.
    fn enable(&mut self);
    /// Disable the receiver and its interrupt.
    fn disable(&mut self);
}

//==================================================================================ISR
/// Service one receive interrupt: latch the status, read the byte, queue both.
///
/// Status is read before data because reading the data register clears the
/// error condition on real hardware. No protocol work happens here; the
/// decoder runs later from the main loop.
pub fn on_rx_interrupt<R: SerialRx, const N: usize>(
    rx: &mut R,
    buffer: &RingBuffer<N>,
) -> Result<(), RingBufferError> {
    let status = rx.read_status();
    let data = rx.read_data();
    buffer.put_with_status(data, status)
}
