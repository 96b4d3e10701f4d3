//! In-memory representation of a classic CAN data frame.
use embedded_can::Id;

use crate::protocol::transport::can_id::CanId;
use crate::protocol::transport::CAN_FRAME_DLC_MAX;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// CAN frame as handed to the bus.
pub struct CanFrame {
    /// 11-bit or 29-bit identifier.
    pub id: CanId,
    /// Payload buffer. Only the first `len` bytes are meaningful.
    pub data: [u8; CAN_FRAME_DLC_MAX],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
    /// Millisecond timestamp at which the frame was built.
    pub timestamp: u32,
}

impl CanFrame {
    /// Build a frame from a payload of at most eight bytes.
    pub fn with_payload(id: CanId, payload: &[u8], timestamp: u32) -> Option<Self> {
        if payload.len() > CAN_FRAME_DLC_MAX {
            return None;
        }
        let mut data = [0u8; CAN_FRAME_DLC_MAX];
        data[..payload.len()].copy_from_slice(payload);
        Some(Self {
            id,
            data,
            len: payload.len(),
            timestamp,
        })
    }

    /// Valid payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        Self::with_payload(CanId::from(id.into()), data, 0)
    }

    /// Remote frames are never produced by the gateway.
    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        self.id.is_extended()
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        self.id.as_id()
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
