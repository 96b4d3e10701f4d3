//! Current, not-yet-published telemetry snapshot.
//!
//! Each group is a set of sub-records, each sub-record exactly one CAN
//! frame payload (at most eight bytes). Fields are serialized little-endian
//! in declared order, matching the frame layouts consumed on the vehicle
//! bus. Extractors overwrite fields in place: last value wins.
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::CanId;
use crate::protocol::transport::CAN_FRAME_DLC_MAX;

//==================================================================================FRAME_KIND
/// Every CAN frame the gateway can emit, one per sub-record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    SampleTime,
    UtcTime1,
    UtcTime2,
    OrientQuat1,
    OrientQuat2,
    RateOfTurn1,
    RateOfTurn2,
    Accel1,
    Accel2,
    Magf1,
    Magf2,
    PosLlh1,
    PosLlh2,
    VelNed1,
    VelNed2,
    GnssPos1,
    GnssPos2,
    GnssPos3,
    GnssVel1,
    GnssVel2,
    GnssHeading1,
    GnssHeading2,
    GnssDop1,
    GnssDop2,
}

impl FrameKind {
    pub const COUNT: usize = 24;

    /// Dense index, for per-frame lookup tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

//==================================================================================PAYLOAD
/// One serialized sub-record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramePayload {
    data: [u8; CAN_FRAME_DLC_MAX],
    len: usize,
}

impl FramePayload {
    pub const fn new() -> Self {
        Self {
            data: [0; CAN_FRAME_DLC_MAX],
            len: 0,
        }
    }

    /// Number of valid bytes (the frame's DLC).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Immutable view over the populated bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Wrap the payload in a CAN frame. Never fails: a payload is at most
    /// [`CAN_FRAME_DLC_MAX`] bytes by construction.
    pub fn to_frame(&self, id: CanId, timestamp: u32) -> CanFrame {
        CanFrame {
            id,
            data: self.data,
            len: self.len,
            timestamp,
        }
    }

    fn put(&mut self, bytes: &[u8]) {
        let end = self.len + bytes.len();
        debug_assert!(end <= CAN_FRAME_DLC_MAX, "sub-record wider than a CAN frame");
        if let Some(dst) = self.data.get_mut(self.len..end) {
            dst.copy_from_slice(bytes);
            self.len = end;
        }
    }

    fn put_u8(&mut self, value: u8) -> &mut Self {
        self.put(&[value]);
        self
    }

    fn put_u16(&mut self, value: u16) -> &mut Self {
        self.put(&value.to_le_bytes());
        self
    }

    fn put_u32(&mut self, value: u32) -> &mut Self {
        self.put(&value.to_le_bytes());
        self
    }

    fn put_i32(&mut self, value: i32) -> &mut Self {
        self.put(&value.to_le_bytes());
        self
    }

    fn put_f32(&mut self, value: f32) -> &mut Self {
        self.put(&value.to_le_bytes());
        self
    }
}

//==================================================================================SUB_RECORDS
/// Sensor sample counter with the gateway receive time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleTime {
    pub rx_time: u32,
    /// `SampleTimeFine` ticks (10 kHz).
    pub sample_time: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UtcTime1 {
    pub rx_time: u32,
    pub flags: u8,
    pub year: u16,
    pub month: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UtcTime2 {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosec: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientQuat1 {
    pub q1: f32,
    pub q2: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientQuat2 {
    pub q3: f32,
    pub q4: f32,
}

/// First two axes of a 3-axis vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxesXy {
    pub x: f32,
    pub y: f32,
}

/// Third axis of a 3-axis vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisZ {
    pub z: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PosLlh1 {
    pub latitude: f32,
    pub longitude: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PosLlh2 {
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelNed1 {
    pub north: f32,
    pub east: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelNed2 {
    pub down: f32,
}

//==================================================================================GROUP_RECORDS
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeRecord {
    pub sample_time: SampleTime,
    pub utc_time1: UtcTime1,
    pub utc_time2: UtcTime2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationRecord {
    pub quat1: OrientQuat1,
    pub quat2: OrientQuat2,
}

/// Rate of turn (rad/s), acceleration (m/s²) or magnetic field (a.u.).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3Record {
    pub xy: AxesXy,
    pub z: AxisZ,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionRecord {
    pub llh1: PosLlh1,
    pub llh2: PosLlh2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityRecord {
    pub ned1: VelNed1,
    pub ned2: VelNed2,
}

/// Receiver position: 1e-7 deg, mm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GnssPositionRecord {
    pub lat: i32,
    pub lon: i32,
    pub height: i32,
    pub height_msl: i32,
    pub h_acc: u32,
    pub v_acc: u32,
}

/// Receiver velocity: mm/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GnssVelocityRecord {
    pub north: i32,
    pub east: i32,
    pub down: i32,
    pub ground_speed: i32,
}

/// Receiver headings: 1e-5 deg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GnssHeadingRecord {
    pub motion: i32,
    pub vehicle: i32,
    pub motion_acc: u32,
    pub speed_acc: u32,
}

/// Dilutions of precision, ×0.01.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GnssDopRecord {
    pub gdop: u16,
    pub pdop: u16,
    pub tdop: u16,
    pub vdop: u16,
    pub hdop: u16,
    pub ndop: u16,
    pub edop: u16,
}

//==================================================================================TELEMETRY_RECORD
/// Snapshot of every group. Allocated once, mutated in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetryRecord {
    pub time: TimeRecord,
    pub orientation: OrientationRecord,
    pub rate_of_turn: Vector3Record,
    pub acceleration: Vector3Record,
    pub magnetic_field: Vector3Record,
    pub position: PositionRecord,
    pub velocity: VelocityRecord,
    pub gnss_position: GnssPositionRecord,
    pub gnss_velocity: GnssVelocityRecord,
    pub gnss_heading: GnssHeadingRecord,
    pub gnss_dop: GnssDopRecord,
}

impl TelemetryRecord {
    /// Serialize the sub-record carried by frame `kind`.
    pub fn encode(&self, kind: FrameKind) -> FramePayload {
        let mut p = FramePayload::new();
        match kind {
            FrameKind::SampleTime => {
                let s = &self.time.sample_time;
                p.put_u32(s.rx_time).put_u32(s.sample_time);
            }
            FrameKind::UtcTime1 => {
                let u = &self.time.utc_time1;
                p.put_u32(u.rx_time)
                    .put_u8(u.flags)
                    .put_u16(u.year)
                    .put_u8(u.month);
            }
            FrameKind::UtcTime2 => {
                let u = &self.time.utc_time2;
                p.put_u8(u.day)
                    .put_u8(u.hour)
                    .put_u8(u.minute)
                    .put_u8(u.second)
                    .put_u32(u.nanosec);
            }
            FrameKind::OrientQuat1 => {
                let q = &self.orientation.quat1;
                p.put_f32(q.q1).put_f32(q.q2);
            }
            FrameKind::OrientQuat2 => {
                let q = &self.orientation.quat2;
                p.put_f32(q.q3).put_f32(q.q4);
            }
            FrameKind::RateOfTurn1 => encode_xy(&mut p, &self.rate_of_turn),
            FrameKind::RateOfTurn2 => encode_z(&mut p, &self.rate_of_turn),
            FrameKind::Accel1 => encode_xy(&mut p, &self.acceleration),
            FrameKind::Accel2 => encode_z(&mut p, &self.acceleration),
            FrameKind::Magf1 => encode_xy(&mut p, &self.magnetic_field),
            FrameKind::Magf2 => encode_z(&mut p, &self.magnetic_field),
            FrameKind::PosLlh1 => {
                let llh = &self.position.llh1;
                p.put_f32(llh.latitude).put_f32(llh.longitude);
            }
            FrameKind::PosLlh2 => {
                p.put_f32(self.position.llh2.height);
            }
            FrameKind::VelNed1 => {
                let ned = &self.velocity.ned1;
                p.put_f32(ned.north).put_f32(ned.east);
            }
            FrameKind::VelNed2 => {
                p.put_f32(self.velocity.ned2.down);
            }
            FrameKind::GnssPos1 => {
                p.put_i32(self.gnss_position.lat).put_i32(self.gnss_position.lon);
            }
            FrameKind::GnssPos2 => {
                p.put_i32(self.gnss_position.height)
                    .put_i32(self.gnss_position.height_msl);
            }
            FrameKind::GnssPos3 => {
                p.put_u32(self.gnss_position.h_acc)
                    .put_u32(self.gnss_position.v_acc);
            }
            FrameKind::GnssVel1 => {
                p.put_i32(self.gnss_velocity.north)
                    .put_i32(self.gnss_velocity.east);
            }
            FrameKind::GnssVel2 => {
                p.put_i32(self.gnss_velocity.down)
                    .put_i32(self.gnss_velocity.ground_speed);
            }
            FrameKind::GnssHeading1 => {
                p.put_i32(self.gnss_heading.motion)
                    .put_i32(self.gnss_heading.vehicle);
            }
            FrameKind::GnssHeading2 => {
                p.put_u32(self.gnss_heading.motion_acc)
                    .put_u32(self.gnss_heading.speed_acc);
            }
            FrameKind::GnssDop1 => {
                let d = &self.gnss_dop;
                p.put_u16(d.gdop)
                    .put_u16(d.pdop)
                    .put_u16(d.tdop)
                    .put_u16(d.vdop);
            }
            FrameKind::GnssDop2 => {
                let d = &self.gnss_dop;
                p.put_u16(d.hdop).put_u16(d.ndop).put_u16(d.edop);
            }
        }
        p
    }
}

fn encode_xy(p: &mut FramePayload, vector: &Vector3Record) {
    p.put_f32(vector.xy.x).put_f32(vector.xy.y);
}

fn encode_z(p: &mut FramePayload, vector: &Vector3Record) {
    p.put_f32(vector.z.z);
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
