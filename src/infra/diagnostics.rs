//! Error reporting towards the node's heartbeat/diagnostics registry.

/// Conditions the gateway reports. None of them stops the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiagnosticCode {
    /// The receive ring buffer dropped at least one byte.
    RxOverflow,
    /// The UART flagged a framing or overrun error.
    RxLineError,
    /// A sensor message did not fit the decoder scratch buffer.
    ScratchOverflow,
    /// No sensor message was decoded within the configured timeout.
    RxTimeout,
}

/// Fire-and-forget sink for [`DiagnosticCode`]s.
pub trait Diagnostics {
    fn set_error(&mut self, code: DiagnosticCode);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn set_error(&mut self, code: DiagnosticCode) {
        (**self).set_error(code)
    }
}
