//! Validated Xbus messages as handed to the message callback.
use crate::protocol::xbus::data::{DataId, DataItems};

//==================================================================================MESSAGE_ID
/// Xbus message identifier (`XMID_*`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageId {
    DeviceId,
    GotoMeasurementAck,
    GotoConfigAck,
    /// Measurement data as a list of data items.
    MtData2,
    WakeUp,
    Error,
    Other(u8),
}

impl From<u8> for MessageId {
    fn from(value: u8) -> Self {
        match value {
            0x01 => MessageId::DeviceId,
            0x11 => MessageId::GotoMeasurementAck,
            0x31 => MessageId::GotoConfigAck,
            0x36 => MessageId::MtData2,
            0x3E => MessageId::WakeUp,
            0x42 => MessageId::Error,
            other => MessageId::Other(other),
        }
    }
}

impl From<MessageId> for u8 {
    fn from(value: MessageId) -> Self {
        match value {
            MessageId::DeviceId => 0x01,
            MessageId::GotoMeasurementAck => 0x11,
            MessageId::GotoConfigAck => 0x31,
            MessageId::MtData2 => 0x36,
            MessageId::WakeUp => 0x3E,
            MessageId::Error => 0x42,
            MessageId::Other(other) => other,
        }
    }
}

//==================================================================================MESSAGE
/// A message whose length and checksum have been validated.
///
/// The payload borrows the decoder scratch buffer and is only valid for the
/// duration of the callback; copy out anything that must outlive it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XbusMessage<'a> {
    mid: MessageId,
    payload: &'a [u8],
}

impl<'a> XbusMessage<'a> {
    pub fn new(mid: MessageId, payload: &'a [u8]) -> Self {
        Self { mid, payload }
    }

    pub fn mid(&self) -> MessageId {
        self.mid
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Data items of an `MTData2` message. Empty for any other message type.
    pub fn data_items(&self) -> DataItems<'a> {
        match self.mid {
            MessageId::MtData2 => DataItems::new(self.payload),
            _ => DataItems::new(&[]),
        }
    }

    /// Data of the first item carrying `id`, if any.
    pub fn data_item(&self, id: DataId) -> Option<&'a [u8]> {
        self.data_items()
            .find(|item| item.id == id)
            .map(|item| item.data)
    }
}
