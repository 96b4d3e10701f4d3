//! The receive interrupt simulated by a second thread pushing into a
//! `static` ring buffer while the main loop decodes and publishes.
mod helpers;

use helpers::{
    be_floats, data_item, xbus_frame, MockCanBus, MockClock, MockSerial, RecordingDiagnostics,
    ScriptedUart,
};
use imu_can_gateway::{
    config::{GatewayConfig, XBUS_SCRATCH_SIZE},
    gateway::Gateway,
    infra::ring_buffer::RingBuffer,
};
use std::thread;
use std::time::Duration;

static IMU_RX: RingBuffer = RingBuffer::new();

const MESSAGES: u32 = 50;

#[tokio::test]
async fn test_concurrent_producer_and_main_loop() {
    let mut scratch = [0u8; XBUS_SCRATCH_SIZE];
    let clock = MockClock::default();
    let mut diagnostics = RecordingDiagnostics::default();
    let mut gateway = Gateway::new(
        GatewayConfig::new().with_rx_budget(32),
        &IMU_RX,
        &mut scratch,
        MockSerial::new(&IMU_RX),
        &clock,
        &mut diagnostics,
    );
    gateway.init().expect("init");
    gateway.enable().expect("enable");
    let (mut bus, mut host) = MockCanBus::create_pair();

    let producer = thread::spawn(|| {
        let mut uart = ScriptedUart::default();
        for i in 0..MESSAGES {
            let q = [i as f32, 0.0, 0.0, 1.0];
            let bytes = xbus_frame(0x36, &data_item(0x2010, &be_floats(&q)));
            for byte in bytes {
                // Real hardware would overrun here; the test paces itself instead.
                while IMU_RX.len() == IMU_RX.capacity() {
                    thread::sleep(Duration::from_micros(50));
                }
                uart.push(&[byte]);
                assert_eq!(uart.deliver(&IMU_RX), 0);
            }
        }
    });

    let mut frames = Vec::new();
    while gateway.message_count() < MESSAGES {
        gateway.update(&mut bus).await.expect("publish");
        frames.extend(host.drain());
        tokio::task::yield_now().await;
    }
    producer.join().expect("producer thread");
    gateway.update(&mut bus).await.expect("publish");
    frames.extend(host.drain());

    assert!(!IMU_RX.is_overflowed());
    assert!(frames.len() >= 2);
    assert_eq!(frames.len() % 2, 0);
    let last_q1 = f32::from_le_bytes(frames[frames.len() - 2].payload()[..4].try_into().unwrap());
    assert_eq!(last_q1, (MESSAGES - 1) as f32);
    drop(gateway);
    assert!(diagnostics.codes.is_empty());
}
