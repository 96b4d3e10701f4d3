//! CAN transport layer: identifiers, in-memory frames, and the bus
//! abstraction the publisher sends through.
//!
//! Classic CAN only: at most eight payload bytes per frame. Telemetry groups
//! wider than eight bytes are split into several frames upstream, one per
//! sub-record, each with its own identifier.

pub mod can_frame;
pub mod can_id;
pub mod traits;

/// Maximum payload of a classic CAN frame (bytes).
pub const CAN_FRAME_DLC_MAX: usize = 8;
