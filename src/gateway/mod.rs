//! Gateway context: one object owning the decoder, the telemetry state and
//! the serial control handle, driven by the host main loop.
//!
//! ```text
//! Uninitialized --init--> Disabled --enable--> Enabled
//!                            ^  <----disable----  |
//!                            +-------init---------+
//! ```
//!
//! The interrupt side only ever touches the [`RingBuffer`], through
//! [`on_rx_interrupt`](crate::infra::serial::on_rx_interrupt).
pub mod publisher;

use crate::config::GatewayConfig;
use crate::error::{LifecycleError, PublishError};
use crate::infra::clock::Clock;
use crate::infra::diagnostics::{DiagnosticCode, Diagnostics};
use crate::infra::ring_buffer::{RingBuffer, DEFAULT_RX_BUFFER_SIZE};
use crate::infra::serial::SerialControl;
use crate::protocol::transport::traits::can_bus::CanBus;
use crate::protocol::xbus::parser::XbusParser;
use crate::telemetry::group::GroupReady;
use crate::telemetry::record::TelemetryRecord;
use crate::telemetry::sink::TelemetrySink;

use publisher::publish_ready;

//==================================================================================STATE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleState {
    /// Constructed, hardware untouched.
    Uninitialized,
    /// Configured, receiver off.
    Disabled,
    /// Receiver on, bytes flowing into the ring buffer.
    Enabled,
}

//==================================================================================GATEWAY
/// The gateway context.
///
/// `'r` borrows the ring buffer shared with the receive interrupt, `'s` the
/// decoder scratch buffer. Both are usually `'static`.
pub struct Gateway<'r, 's, S, C, D, const N: usize = DEFAULT_RX_BUFFER_SIZE> {
    config: GatewayConfig,
    rx: &'r RingBuffer<N>,
    parser: XbusParser<'s>,
    sink: TelemetrySink<'s, C, D>,
    serial: S,
    state: LifecycleState,
    enabled_at_ms: u32,
    messages_at_enable: u32,
}

impl<'r, 's, S, C, D, const N: usize> Gateway<'r, 's, S, C, D, N>
where
    S: SerialControl,
    C: Clock,
    D: Diagnostics,
{
    /// Assemble the context. Nothing is touched until [`init`](Self::init).
    pub fn new(
        config: GatewayConfig,
        rx: &'r RingBuffer<N>,
        scratch: &'s mut [u8],
        serial: S,
        clock: C,
        diagnostics: D,
    ) -> Self {
        Self {
            config,
            rx,
            parser: XbusParser::new(),
            sink: TelemetrySink::new(scratch, clock, diagnostics, config.acceleration),
            serial,
            state: LifecycleState::Uninitialized,
            enabled_at_ms: 0,
            messages_at_enable: 0,
        }
    }

    //==================================================================================Lifecycle
    /// Reset every stage and configure the serial port. The receiver is left
    /// disabled.
    ///
    /// On a configuration error the gateway stays uninitialized.
    pub fn init(&mut self) -> Result<(), LifecycleError<S::Error>> {
        if self.state == LifecycleState::Enabled {
            self.serial.disable();
        }
        self.state = LifecycleState::Uninitialized;

        self.rx.init();
        self.parser.reset(&mut self.sink);
        self.serial
            .configure(self.config.baud_rate)
            .map_err(LifecycleError::Serial)?;
        self.sink.ready_mut().clear_all();
        self.rx.flush();
        self.state = LifecycleState::Disabled;

        #[cfg(feature = "defmt")]
        defmt::info!("gateway initialized at {} baud", self.config.baud_rate);
        Ok(())
    }

    /// Start receiving. Stale bytes are flushed before the receiver is
    /// switched on.
    pub fn enable(&mut self) -> Result<(), LifecycleError<S::Error>> {
        if self.state == LifecycleState::Uninitialized {
            return Err(LifecycleError::NotInitialized);
        }

        self.rx.flush();
        self.parser.reset(&mut self.sink);
        self.serial.enable();
        self.enabled_at_ms = self.sink.clock().now_ms();
        self.messages_at_enable = self.sink.message_count();
        self.state = LifecycleState::Enabled;

        #[cfg(feature = "defmt")]
        defmt::info!("gateway enabled");
        Ok(())
    }

    /// Stop receiving. The receiver is switched off before the flush so the
    /// interrupt cannot refill the buffer behind it.
    pub fn disable(&mut self) -> Result<(), LifecycleError<S::Error>> {
        if self.state == LifecycleState::Uninitialized {
            return Err(LifecycleError::NotInitialized);
        }

        self.serial.disable();
        self.rx.flush();
        self.parser.reset(&mut self.sink);
        self.sink.ready_mut().clear_all();
        self.state = LifecycleState::Disabled;

        #[cfg(feature = "defmt")]
        defmt::info!("gateway disabled");
        Ok(())
    }

    //==================================================================================Cycle
    /// One main-loop cycle: report receive errors, decode at most
    /// `rx_budget` buffered bytes, then publish whatever became ready.
    ///
    /// Returns the number of frames sent.
    pub async fn update<B: CanBus>(&mut self, bus: &mut B) -> Result<usize, PublishError<B::Error>> {
        if self.state == LifecycleState::Uninitialized {
            return Err(PublishError::NotInitialized);
        }

        self.report_rx_errors();
        self.process_rx();

        if !self.sink.ready().any_ready() {
            return Ok(0);
        }
        let timestamp = self.sink.clock().now_ms();
        let (record, ready) = self.sink.split();
        publish_ready(bus, record, ready, &self.config.frame_ids, timestamp).await
    }

    /// Decode up to `rx_budget` bytes from the ring buffer. Returns the
    /// number of bytes consumed.
    pub fn process_rx(&mut self) -> usize {
        let mut consumed = 0;
        while consumed < self.config.rx_budget {
            let Some(byte) = self.rx.get() else {
                break;
            };
            self.parser.parse_byte(byte, &mut self.sink);
            consumed += 1;
        }
        consumed
    }

    /// Forward the interrupt side's error state to diagnostics. Overflow is
    /// sticky and reported every cycle until `init`; line errors are
    /// read-and-clear.
    fn report_rx_errors(&mut self) {
        if self.rx.is_overflowed() {
            #[cfg(feature = "defmt")]
            defmt::warn!("rx ring buffer overflowed");
            self.sink.diagnostics_mut().set_error(DiagnosticCode::RxOverflow);
        }
        if self.rx.take_line_status().is_error() {
            #[cfg(feature = "defmt")]
            defmt::warn!("uart line error");
            self.sink.diagnostics_mut().set_error(DiagnosticCode::RxLineError);
        }
    }

    /// Liveness check. While enabled, reports [`DiagnosticCode::RxTimeout`]
    /// and returns `false` when no message was decoded for `rx_timeout`
    /// (counted from `enable` until the first message).
    pub fn check_heartbeat(&mut self) -> bool {
        if self.state != LifecycleState::Enabled {
            return true;
        }

        let reference = match self.sink.last_message_ms() {
            Some(last) if self.sink.message_count() != self.messages_at_enable => last,
            _ => self.enabled_at_ms,
        };
        let elapsed = self.sink.clock().now_ms().wrapping_sub(reference);
        if u64::from(elapsed) < self.config.rx_timeout.as_millis() {
            return true;
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("no sensor message for {} ms", elapsed);
        self.sink.diagnostics_mut().set_error(DiagnosticCode::RxTimeout);
        false
    }

    //==================================================================================Accessors
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn record(&self) -> &TelemetryRecord {
        self.sink.record()
    }

    pub fn ready(&self) -> &GroupReady {
        self.sink.ready()
    }

    /// Messages dispatched by the decoder since construction (wrapping).
    pub fn message_count(&self) -> u32 {
        self.sink.message_count()
    }

    /// Receive time of the last dispatched message.
    pub fn last_message_ms(&self) -> Option<u32> {
        self.sink.last_message_ms()
    }

    /// Ring buffer shared with the receive interrupt.
    pub fn rx(&self) -> &'r RingBuffer<N> {
        self.rx
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn diagnostics(&self) -> &D {
        self.sink.diagnostics()
    }
}
