//! Wire protocols handled by the gateway: the Xbus stream coming from the
//! sensor and the CAN transport the telemetry is republished on.
pub mod transport;
pub mod xbus;
