/// Test doubles standing in for the UART, the CAN bus, the clock and the
/// diagnostics registry during integration tests.
use imu_can_gateway::{
    infra::{
        clock::Clock,
        diagnostics::{DiagnosticCode, Diagnostics},
        ring_buffer::RingBuffer,
        serial::{on_rx_interrupt, LineStatus, SerialControl, SerialRx},
    },
    protocol::transport::{can_frame::CanFrame, traits::can_bus::CanBus},
};
use std::cell::Cell;
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::mpsc;

//==================================================================================CAN
#[allow(dead_code)]
/// In-memory CAN bus: frames sent by the gateway arrive at a [`CanHost`].
pub struct MockCanBus {
    tx: mpsc::UnboundedSender<CanFrame>,
    /// Identifiers whose sends fail.
    pub reject: Vec<u32>,
}

#[allow(dead_code)]
/// Receiving end of a [`MockCanBus`].
pub struct CanHost {
    rx: mpsc::UnboundedReceiver<CanFrame>,
}

#[allow(dead_code)]
impl MockCanBus {
    /// Construct a connected bus/host pair.
    pub fn create_pair() -> (Self, CanHost) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, reject: Vec::new() }, CanHost { rx })
    }
}

#[allow(dead_code)]
impl CanHost {
    /// Every frame received so far, in send order.
    pub fn drain(&mut self) -> Vec<CanFrame> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            frames.push(frame);
        }
        frames
    }
}

impl CanBus for MockCanBus {
    type Error = ();

    fn send<'a>(&'a mut self, frame: &'a CanFrame) -> impl Future<Output = Result<(), Self::Error>> + 'a {
        async move {
            if self.reject.contains(&frame.id.as_raw()) {
                return Err(());
            }
            self.tx.send(frame.clone()).map_err(|_| ())
        }
    }
}

//==================================================================================SERIAL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum SerialEvent {
    Configure(u32),
    /// Bytes buffered at the moment the receiver was switched on.
    Enable { buffered: usize },
    /// Bytes buffered at the moment the receiver was switched off.
    Disable { buffered: usize },
}

/// Lifecycle side of the UART, logging every call.
pub struct MockSerial<'r, const N: usize> {
    rx: &'r RingBuffer<N>,
    pub events: Vec<SerialEvent>,
}

#[allow(dead_code)]
impl<'r, const N: usize> MockSerial<'r, N> {
    pub fn new(rx: &'r RingBuffer<N>) -> Self {
        Self {
            rx,
            events: Vec::new(),
        }
    }
}

impl<const N: usize> SerialControl for MockSerial<'_, N> {
    type Error = ();

    fn configure(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        self.events.push(SerialEvent::Configure(baud_rate));
        Ok(())
    }

    fn enable(&mut self) {
        self.events.push(SerialEvent::Enable {
            buffered: self.rx.len(),
        });
    }

    fn disable(&mut self) {
        self.events.push(SerialEvent::Disable {
            buffered: self.rx.len(),
        });
    }
}

/// Receive registers of the UART, scripted byte by byte.
#[derive(Default)]
pub struct ScriptedUart {
    pending: VecDeque<(LineStatus, u8)>,
}

#[allow(dead_code)]
impl ScriptedUart {
    pub fn push(&mut self, bytes: &[u8]) {
        self.pending
            .extend(bytes.iter().map(|b| (LineStatus::NONE, *b)));
    }

    pub fn push_with_status(&mut self, byte: u8, status: LineStatus) {
        self.pending.push_back((status, byte));
    }

    /// Raise one receive interrupt per scripted byte.
    pub fn deliver<const N: usize>(&mut self, buffer: &RingBuffer<N>) -> usize {
        let mut rejected = 0;
        while !self.pending.is_empty() {
            if on_rx_interrupt(self, buffer).is_err() {
                rejected += 1;
            }
        }
        rejected
    }
}

impl SerialRx for ScriptedUart {
    fn read_status(&mut self) -> LineStatus {
        self.pending
            .front()
            .map_or(LineStatus::NONE, |(status, _)| *status)
    }

    fn read_data(&mut self) -> u8 {
        self.pending.pop_front().map_or(0, |(_, byte)| byte)
    }
}

//==================================================================================CLOCK_AND_DIAGNOSTICS
/// Clock advanced by hand.
#[derive(Default)]
pub struct MockClock(pub Cell<u32>);

#[allow(dead_code)]
impl MockClock {
    pub fn set(&self, now_ms: u32) {
        self.0.set(now_ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

/// Diagnostics registry keeping every reported code.
#[derive(Default, Debug)]
pub struct RecordingDiagnostics {
    pub codes: Vec<DiagnosticCode>,
}

impl Diagnostics for RecordingDiagnostics {
    fn set_error(&mut self, code: DiagnosticCode) {
        self.codes.push(code);
    }
}

//==================================================================================XBUS
#[allow(dead_code)]
/// Complete Xbus frame from the sensor with a valid checksum.
pub fn xbus_frame(mid: u8, payload: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0xFA, 0xFF, mid];
    if payload.len() < 0xFF {
        bytes.push(payload.len() as u8);
    } else {
        bytes.push(0xFF);
        bytes.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    }
    bytes.extend_from_slice(payload);
    let sum = bytes[1..].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    bytes.push(0u8.wrapping_sub(sum));
    bytes
}

#[allow(dead_code)]
/// One `MTData2` data item.
pub fn data_item(id: u16, data: &[u8]) -> Vec<u8> {
    let mut bytes = id.to_be_bytes().to_vec();
    bytes.push(data.len() as u8);
    bytes.extend_from_slice(data);
    bytes
}

#[allow(dead_code)]
/// Big-endian floats, as the sensor sends them.
pub fn be_floats(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

#[allow(dead_code)]
/// Decode the little-endian floats of a CAN payload.
pub fn le_floats(payload: &[u8]) -> Vec<f32> {
    payload
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
