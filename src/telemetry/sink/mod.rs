//! Decoder callback implementation: lends the scratch buffer to the Xbus
//! parser and feeds validated messages to the extractors.
use crate::config::AccelerationSource;
use crate::infra::clock::Clock;
use crate::infra::diagnostics::{DiagnosticCode, Diagnostics};
use crate::protocol::xbus::message::XbusMessage;
use crate::protocol::xbus::parser::XbusCallbacks;
use crate::telemetry::extract::{extract_message, ExtractContext, ExtractTarget};
use crate::telemetry::group::GroupReady;
use crate::telemetry::record::TelemetryRecord;

/// Owner of the telemetry record, ready state and scratch buffer.
///
/// The scratch buffer is `None` only while lent to the parser.
pub struct TelemetrySink<'s, C, D> {
    scratch: Option<&'s mut [u8]>,
    capacity: usize,
    clock: C,
    diagnostics: D,
    acceleration: AccelerationSource,
    record: TelemetryRecord,
    ready: GroupReady,
    last_message_ms: Option<u32>,
    messages: u32,
}

impl<'s, C: Clock, D: Diagnostics> TelemetrySink<'s, C, D> {
    pub fn new(scratch: &'s mut [u8], clock: C, diagnostics: D, acceleration: AccelerationSource) -> Self {
        Self {
            capacity: scratch.len(),
            scratch: Some(scratch),
            clock,
            diagnostics,
            acceleration,
            record: TelemetryRecord::default(),
            ready: GroupReady::new(),
            last_message_ms: None,
            messages: 0,
        }
    }

    /// Size of the scratch buffer, the largest payload that can be decoded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&self) -> &TelemetryRecord {
        &self.record
    }

    pub fn ready(&self) -> &GroupReady {
        &self.ready
    }

    pub fn ready_mut(&mut self) -> &mut GroupReady {
        &mut self.ready
    }

    /// Record and ready state together, for the publisher.
    pub fn split(&mut self) -> (&TelemetryRecord, &mut GroupReady) {
        (&self.record, &mut self.ready)
    }

    /// Receive time of the last dispatched message.
    pub fn last_message_ms(&self) -> Option<u32> {
        self.last_message_ms
    }

    /// Messages dispatched since construction (wrapping).
    pub fn message_count(&self) -> u32 {
        self.messages
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diagnostics
    }
}

impl<'s, C: Clock, D: Diagnostics> XbusCallbacks<'s> for TelemetrySink<'s, C, D> {
    fn allocate(&mut self, size: usize) -> Option<&'s mut [u8]> {
        if size > self.capacity {
            #[cfg(feature = "defmt")]
            defmt::warn!("xbus payload of {} bytes exceeds scratch of {}", size, self.capacity);
            self.diagnostics.set_error(DiagnosticCode::ScratchOverflow);
        }
        self.scratch.take()
    }

    fn deallocate(&mut self, buffer: &'s mut [u8]) {
        self.scratch = Some(buffer);
    }

    fn handle(&mut self, message: &XbusMessage<'_>) {
        let rx_time = self.clock.now_ms();
        if message.len() > self.capacity {
            self.diagnostics.set_error(DiagnosticCode::ScratchOverflow);
            return;
        }
        self.last_message_ms = Some(rx_time);
        self.messages = self.messages.wrapping_add(1);

        let ctx = ExtractContext {
            rx_time,
            acceleration: self.acceleration,
        };
        let mut target = ExtractTarget {
            record: &mut self.record,
            ready: &mut self.ready,
        };
        let _extracted = extract_message(message, &ctx, &mut target);

        #[cfg(feature = "defmt")]
        defmt::trace!("xbus {} extracted {} elements", message.mid(), _extracted);
    }
}
