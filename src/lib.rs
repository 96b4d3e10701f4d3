//! `imu-can-gateway` library: turns the Xbus telemetry stream of an Xsens
//! inertial/GNSS sensor into fixed-identifier CAN frames, in a `no_std`
//! environment without heap allocation.
//!
//! Data flows one way: UART interrupt → [`infra::ring_buffer`] →
//! [`protocol::xbus`] decoder → [`telemetry`] extractors and ready state →
//! [`gateway`] publisher → CAN bus.
#![no_std]

#[cfg(test)]
extern crate std;

//==================================================================================
/// Runtime configuration (baud rate, decode budget, CAN identifiers).
pub mod config;
/// Error types shared across the crate.
pub mod error;
/// Gateway context: lifecycle sequencing and CAN publishing.
pub mod gateway;
/// Hardware-facing plumbing: interrupt-safe ring buffer, serial ISR boundary,
/// clock and diagnostics collaborators.
pub mod infra;
/// Wire protocols: Xbus sensor decoding and CAN transport.
pub mod protocol;
/// Telemetry groups, records, field extractors and the decoder sink.
pub mod telemetry;
//==================================================================================
