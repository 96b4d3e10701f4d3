//! # Quickstart (host)
//!
//! Runs the whole gateway on a desktop: a thread plays the sensor and its
//! UART receive interrupt, the tokio main loop decodes and publishes, and
//! the CAN "driver" prints every frame.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use std::thread;
use std::time::Duration as StdDuration;

use embedded_can::{ErrorKind, Frame};
use static_cell::StaticCell;

// ============================================================================
// imu-can-gateway imports
// ============================================================================

use imu_can_gateway::{
    config::{GatewayConfig, XBUS_SCRATCH_SIZE},
    gateway::Gateway,
    infra::{
        clock::EmbassyClock,
        diagnostics::{DiagnosticCode, Diagnostics},
        ring_buffer::RingBuffer,
        serial::{on_rx_interrupt, LineStatus, SerialControl, SerialRx},
    },
    protocol::transport::{can_frame::CanFrame, traits::can_bus::BlockingCanBus},
};

static IMU_RX: RingBuffer = RingBuffer::new();
static SCRATCH: StaticCell<[u8; XBUS_SCRATCH_SIZE]> = StaticCell::new();

// ============================================================================
// Board glue
// ============================================================================

/// UART control side. A real board writes the baud-rate and enable registers.
struct HostUart;

impl SerialControl for HostUart {
    type Error = core::convert::Infallible;

    fn configure(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        println!("uart: {baud_rate} baud");
        Ok(())
    }

    fn enable(&mut self) {
        println!("uart: rx on");
    }

    fn disable(&mut self) {
        println!("uart: rx off");
    }
}

/// Receive data register holding a single byte.
struct RxRegister(u8);

impl SerialRx for RxRegister {
    fn read_status(&mut self) -> LineStatus {
        LineStatus::NONE
    }

    fn read_data(&mut self) -> u8 {
        self.0
    }
}

/// Blocking CAN driver printing frames instead of transmitting them.
struct StdoutCan;

impl embedded_can::blocking::Can for StdoutCan {
    type Frame = CanFrame;
    type Error = ErrorKind;

    fn transmit(&mut self, frame: &Self::Frame) -> Result<(), Self::Error> {
        println!("can: {:#05X} [{}] {:02X?}", frame.id.as_raw(), frame.dlc(), frame.data());
        Ok(())
    }

    fn receive(&mut self) -> Result<Self::Frame, Self::Error> {
        Err(ErrorKind::Other)
    }
}

struct PrintDiagnostics;

impl Diagnostics for PrintDiagnostics {
    fn set_error(&mut self, code: DiagnosticCode) {
        println!("diagnostic: {code:?}");
    }
}

// ============================================================================
// Simulated sensor
// ============================================================================

fn mtdata2(items: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let mut payload = Vec::new();
    for (id, data) in items {
        payload.extend_from_slice(&id.to_be_bytes());
        payload.push(data.len() as u8);
        payload.extend_from_slice(data);
    }
    let mut frame = vec![0xFA, 0xFF, 0x36, payload.len() as u8];
    frame.extend_from_slice(&payload);
    let sum = frame[1..].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    frame.push(0u8.wrapping_sub(sum));
    frame
}

fn be(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn sensor_thread() {
    for sample in 0..5u32 {
        let angle = sample as f32 * 0.1;
        let frame = mtdata2(&[
            (0x1060, (sample * 100).to_be_bytes().to_vec()),
            (0x2010, be(&[angle.cos(), 0.0, 0.0, angle.sin()])),
            (0x8020, be(&[0.01, -0.02, 0.1])),
            (0x4030, be(&[0.0, 0.1, 0.0])),
        ]);
        for byte in frame {
            // One interrupt per received byte.
            let _ = on_rx_interrupt(&mut RxRegister(byte), &IMU_RX);
        }
        thread::sleep(StdDuration::from_millis(100));
    }
}

// ============================================================================
// Main loop
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let scratch = SCRATCH.init([0; XBUS_SCRATCH_SIZE]);
    let mut diagnostics = PrintDiagnostics;
    let mut gateway = Gateway::new(
        GatewayConfig::new(),
        &IMU_RX,
        scratch,
        HostUart,
        EmbassyClock,
        &mut diagnostics,
    );
    let mut can = BlockingCanBus::new(StdoutCan);

    gateway.init().expect("serial configuration");
    gateway.enable().expect("initialized");

    let sensor = thread::spawn(sensor_thread);
    while !sensor.is_finished() || !IMU_RX.is_empty() {
        match gateway.update(&mut can).await {
            Ok(0) => {}
            Ok(sent) => println!("cycle: {sent} frame(s)"),
            Err(e) => println!("cycle: {e}"),
        }
        gateway.check_heartbeat();
        tokio::time::sleep(StdDuration::from_millis(10)).await;
    }

    gateway.disable().expect("initialized");
    println!("messages decoded: {}", gateway.message_count());
}
