//! Gateway configuration.
//!
//! Everything here is `const`-constructible so a configuration can live in
//! a `static` next to the ring buffer it is paired with.
use embassy_time::Duration;

use crate::protocol::transport::can_id::CanId;
use crate::telemetry::record::FrameKind;

//==================================================================================CONSTANTS
/// Sensor link speed.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
/// Bytes decoded per `update()` cycle.
pub const DEFAULT_RX_BUDGET: usize = 128;
/// Size of the decoder scratch buffer: the largest Xbus payload accepted.
pub const XBUS_SCRATCH_SIZE: usize = 512;
/// Silence after which the link is reported dead.
pub const DEFAULT_RX_TIMEOUT: Duration = Duration::from_millis(500);

//==================================================================================ACCELERATION
/// Xbus item feeding the acceleration group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelerationSource {
    /// `FreeAcceleration` (0x4030): gravity removed.
    #[default]
    Free,
    /// `Acceleration` (0x4020): calibrated, gravity included.
    Calibrated,
}

//==================================================================================FRAME_IDS
/// CAN identifier of every telemetry frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameIds([CanId; FrameKind::COUNT]);

const fn std_id(raw: u16) -> CanId {
    match CanId::standard(raw) {
        Some(id) => id,
        None => panic!("standard CAN identifier out of range"),
    }
}

impl FrameIds {
    /// Default identifier plan: one `0x2N0` block per group.
    pub const DEFAULT: Self = Self([
        std_id(0x200), // SampleTime
        std_id(0x201), // UtcTime1
        std_id(0x202), // UtcTime2
        std_id(0x210), // OrientQuat1
        std_id(0x211), // OrientQuat2
        std_id(0x220), // RateOfTurn1
        std_id(0x221), // RateOfTurn2
        std_id(0x230), // Accel1
        std_id(0x231), // Accel2
        std_id(0x240), // Magf1
        std_id(0x241), // Magf2
        std_id(0x250), // PosLlh1
        std_id(0x251), // PosLlh2
        std_id(0x260), // VelNed1
        std_id(0x261), // VelNed2
        std_id(0x270), // GnssPos1
        std_id(0x271), // GnssPos2
        std_id(0x272), // GnssPos3
        std_id(0x280), // GnssVel1
        std_id(0x281), // GnssVel2
        std_id(0x290), // GnssHeading1
        std_id(0x291), // GnssHeading2
        std_id(0x2A0), // GnssDop1
        std_id(0x2A1), // GnssDop2
    ]);

    pub const fn get(&self, kind: FrameKind) -> CanId {
        self.0[kind.index()]
    }

    pub fn set(&mut self, kind: FrameKind, id: CanId) {
        self.0[kind.index()] = id;
    }
}

impl Default for FrameIds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//==================================================================================GATEWAY_CONFIG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Applied to the serial port by `init()`.
    pub baud_rate: u32,
    /// Maximum bytes decoded per `update()`, never below 1.
    pub rx_budget: usize,
    pub acceleration: AccelerationSource,
    /// Liveness threshold for `check_heartbeat()`.
    pub rx_timeout: Duration,
    pub frame_ids: FrameIds,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayConfig {
    pub const fn new() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            rx_budget: DEFAULT_RX_BUDGET,
            acceleration: AccelerationSource::Free,
            rx_timeout: DEFAULT_RX_TIMEOUT,
            frame_ids: FrameIds::DEFAULT,
        }
    }

    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Clamped to at least one byte per cycle.
    pub const fn with_rx_budget(mut self, rx_budget: usize) -> Self {
        self.rx_budget = if rx_budget == 0 { 1 } else { rx_budget };
        self
    }

    pub const fn with_acceleration(mut self, acceleration: AccelerationSource) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub const fn with_rx_timeout(mut self, rx_timeout: Duration) -> Self {
        self.rx_timeout = rx_timeout;
        self
    }

    pub fn with_frame_id(mut self, kind: FrameKind, id: CanId) -> Self {
        self.frame_ids.set(kind, id);
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
