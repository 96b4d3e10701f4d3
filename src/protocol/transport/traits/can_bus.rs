//! Minimal abstraction for the CAN transport the telemetry is published on.
//! Allows the gateway to plug into various implementations (embassy HAL
//! drivers, blocking `embedded-can` drivers, desktop SocketCAN, test doubles).
use crate::error::BlockingBusError;
use crate::protocol::transport::can_frame::CanFrame;
use futures_util::Future;

/// Contract to send CAN frames.
///
/// The gateway neither retries nor queues: a failed `send` is counted in the
/// cycle's result and the frame is dropped. Retry policy, if any, belongs to
/// the implementation.
pub trait CanBus {
    type Error: core::fmt::Debug;
    /// Emit a frame on the bus. Asynchronous to accommodate non-blocking drivers.
    fn send<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}

/// Adapter exposing an [`embedded_can::blocking::Can`] driver as a [`CanBus`].
///
/// The frame is converted into the driver's own frame type with
/// [`embedded_can::Frame::new`]; the future completes as soon as the driver
/// returns from `transmit`.
#[derive(Debug)]
pub struct BlockingCanBus<T> {
    driver: T,
}

impl<T> BlockingCanBus<T> {
    pub fn new(driver: T) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &T {
        &self.driver
    }

    pub fn into_inner(self) -> T {
        self.driver
    }
}

impl<T> CanBus for BlockingCanBus<T>
where
    T: embedded_can::blocking::Can,
    T::Error: core::fmt::Debug,
{
    type Error = BlockingBusError<T::Error>;

    fn send<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a {
        async move {
            let native = <T::Frame as embedded_can::Frame>::new(frame.id.as_id(), frame.payload())
                .ok_or(BlockingBusError::Frame)?;
            self.driver
                .transmit(&native)
                .map_err(BlockingBusError::Bus)
        }
    }
}

#[cfg(test)]
#[path = "can_bus_tests.rs"]
mod tests;
