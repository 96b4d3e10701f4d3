//! Hardware-facing plumbing shared by the gateway: the interrupt-safe byte
//! queue, the UART interrupt boundary, and the clock/diagnostics
//! collaborators supplied by the board support code.
pub mod clock;
pub mod diagnostics;
pub mod ring_buffer;
pub mod serial;
