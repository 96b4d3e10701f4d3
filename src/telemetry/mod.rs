//! Telemetry model: what the gateway keeps between decoding and publishing.
//!
//! - [`group`]: the publishable groups, their constituent elements, the
//!   ready state and the fixed publish priority.
//! - [`record`]: last-value-wins snapshot of every group, split into
//!   CAN-sized sub-records.
//! - [`extract`]: per data item extractors writing into the record.
//! - [`sink`]: the decoder callback implementation tying them together.
pub mod extract;
pub mod group;
pub mod record;
pub mod sink;
