//! Millisecond time source used to timestamp decoded telemetry.

/// Monotonic millisecond counter. Wraps around after ~49 days; consumers
/// compare timestamps with `wrapping_sub`.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// [`Clock`] backed by the embassy time driver of the target.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
