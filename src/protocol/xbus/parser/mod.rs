//! Byte-wise Xbus frame decoder.
//!
//! The parser is a small state machine fed one byte at a time from the main
//! loop. It owns no payload memory: on entry to a payload it asks the
//! [`XbusCallbacks`] implementer for a scratch buffer, and gives it back
//! once the message has been dispatched or rejected. Nothing is ever
//! written past the buffer it was given, whatever length the sensor
//! announces.
use crate::protocol::xbus::message::{MessageId, XbusMessage};
use crate::protocol::xbus::{EXTENDED_LENGTH, MAX_PAYLOAD_LENGTH, NO_PAYLOAD, PREAMBLE};

//==================================================================================Callbacks
/// Collaborator supplying payload storage and consuming validated messages.
///
/// `'s` is the lifetime of the scratch storage: the parser holds the buffer
/// returned by [`allocate`](Self::allocate) until it hands it back through
/// [`deallocate`](Self::deallocate), so a single static buffer can be lent
/// out and recovered for every message.
pub trait XbusCallbacks<'s> {
    /// Provide storage for a payload of `size` bytes.
    ///
    /// If `size` exceeds what is available, report it and return the
    /// largest buffer on hand (or `None`); the parser will drop the message.
    fn allocate(&mut self, size: usize) -> Option<&'s mut [u8]>;

    /// Take back a buffer obtained from [`allocate`](Self::allocate).
    fn deallocate(&mut self, buffer: &'s mut [u8]);

    /// Consume a validated message. The payload view is invalidated as soon
    /// as this returns.
    fn handle(&mut self, message: &XbusMessage<'_>);
}

//==================================================================================Enums and Structs
/// Why a complete frame was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RejectReason {
    /// Byte sum over the frame was not zero.
    Checksum,
    /// The payload did not fit the scratch buffer.
    Oversized,
    /// The extended length exceeds [`MAX_PAYLOAD_LENGTH`]; the header is
    /// dropped without reading a payload.
    Length,
}

/// Outcome of feeding one byte to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseStatus {
    /// Searching for a preamble; the byte was skipped.
    Idle,
    /// Byte consumed as part of a frame still being received.
    InProgress,
    /// Frame validated and handed to the message callback.
    Dispatched(MessageId),
    /// Frame complete but discarded; the parser is searching again.
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Preamble,
    BusId,
    MessageId,
    Length,
    ExtendedLengthMsb,
    ExtendedLengthLsb,
    Payload,
    Checksum,
}

/// Xbus decoder state. One instance per sensor link.
#[derive(Debug)]
pub struct XbusParser<'s> {
    state: ParserState,
    checksum: u8,
    mid: u8,
    length: u16,
    received: u16,
    buffer: Option<&'s mut [u8]>,
    oversized: bool,
}

impl Default for XbusParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> XbusParser<'s> {
    /// Create a parser waiting for a preamble.
    pub const fn new() -> Self {
        Self {
            state: ParserState::Preamble,
            checksum: 0,
            mid: 0,
            length: 0,
            received: 0,
            buffer: None,
            oversized: false,
        }
    }

    /// Whether the parser sits between frames.
    pub fn is_idle(&self) -> bool {
        self.state == ParserState::Preamble
    }

    /// Abandon any partially received frame and return its buffer.
    pub fn reset<C: XbusCallbacks<'s>>(&mut self, callbacks: &mut C) {
        self.release(callbacks);
        self.state = ParserState::Preamble;
    }

    //==================================================================================Process Functions
    /// Feed one byte received from the sensor.
    ///
    /// A validated frame is dispatched synchronously through
    /// [`XbusCallbacks::handle`] before this returns. A rejected frame is
    /// dropped whole; the next byte is examined as a potential preamble.
    pub fn parse_byte<C: XbusCallbacks<'s>>(&mut self, byte: u8, callbacks: &mut C) -> ParseStatus {
        match self.state {
            ParserState::Preamble => {
                if byte != PREAMBLE {
                    return ParseStatus::Idle;
                }
                self.checksum = 0;
                self.state = ParserState::BusId;
            }
            ParserState::BusId => {
                // A repeated preamble restarts the frame: the previous 0xFA was noise.
                if byte == PREAMBLE {
                    self.checksum = 0;
                    return ParseStatus::InProgress;
                }
                self.checksum = self.checksum.wrapping_add(byte);
                self.state = ParserState::MessageId;
            }
            ParserState::MessageId => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.mid = byte;
                self.state = ParserState::Length;
            }
            ParserState::Length => {
                self.checksum = self.checksum.wrapping_add(byte);
                if byte == NO_PAYLOAD {
                    self.length = 0;
                    self.state = ParserState::Checksum;
                } else if byte < EXTENDED_LENGTH {
                    self.length = byte as u16;
                    self.begin_payload(callbacks);
                } else {
                    self.state = ParserState::ExtendedLengthMsb;
                }
            }
            ParserState::ExtendedLengthMsb => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.length = (byte as u16) << 8;
                self.state = ParserState::ExtendedLengthLsb;
            }
            ParserState::ExtendedLengthLsb => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.length |= byte as u16;
                if self.length > MAX_PAYLOAD_LENGTH {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Xbus header dropped: length {} out of range", self.length);
                    self.state = ParserState::Preamble;
                    return ParseStatus::Rejected(RejectReason::Length);
                }
                if self.length == 0 {
                    self.state = ParserState::Checksum;
                } else {
                    self.begin_payload(callbacks);
                }
            }
            ParserState::Payload => {
                self.checksum = self.checksum.wrapping_add(byte);
                if !self.oversized {
                    if let Some(slot) = self
                        .buffer
                        .as_deref_mut()
                        .and_then(|buffer| buffer.get_mut(self.received as usize))
                    {
                        *slot = byte;
                    }
                }
                self.received += 1;
                if self.received == self.length {
                    self.state = ParserState::Checksum;
                }
            }
            ParserState::Checksum => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.state = ParserState::Preamble;
                return self.finish(callbacks);
            }
        }

        ParseStatus::InProgress
    }

    //==================================================================================Helpers
    fn begin_payload<C: XbusCallbacks<'s>>(&mut self, callbacks: &mut C) {
        let length = self.length as usize;
        self.received = 0;
        self.buffer = callbacks.allocate(length);
        self.oversized = self
            .buffer
            .as_deref()
            .map_or(true, |buffer| buffer.len() < length);
        self.state = ParserState::Payload;
    }

    fn finish<C: XbusCallbacks<'s>>(&mut self, callbacks: &mut C) -> ParseStatus {
        let mid = MessageId::from(self.mid);

        if self.length > 0 && self.oversized {
            #[cfg(feature = "defmt")]
            defmt::debug!("Xbus frame dropped: {} bytes do not fit scratch", self.length);
            self.release(callbacks);
            return ParseStatus::Rejected(RejectReason::Oversized);
        }

        if self.checksum != 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("Xbus frame dropped: checksum mismatch (mid {=u8:#X})", self.mid);
            self.release(callbacks);
            return ParseStatus::Rejected(RejectReason::Checksum);
        }

        let buffer = self.buffer.take();
        {
            let payload: &[u8] = match buffer.as_deref() {
                Some(buffer) => &buffer[..self.length as usize],
                None => &[],
            };
            callbacks.handle(&XbusMessage::new(mid, payload));
        }
        if let Some(buffer) = buffer {
            callbacks.deallocate(buffer);
        }

        ParseStatus::Dispatched(mid)
    }

    fn release<C: XbusCallbacks<'s>>(&mut self, callbacks: &mut C) {
        if let Some(buffer) = self.buffer.take() {
            callbacks.deallocate(buffer);
        }
        self.oversized = false;
    }
}
