//! Sub-record serialization.
use super::*;
use crate::telemetry::group::PUBLISH_PRIORITY;

#[test]
/// Quaternion frames carry two little-endian f32 each.
fn test_orientation_frames() {
    let mut record = TelemetryRecord::default();
    record.orientation.quat1 = OrientQuat1 { q1: 0.0, q2: 0.0 };
    record.orientation.quat2 = OrientQuat2 { q3: 0.0, q4: 1.0 };

    assert_eq!(record.encode(FrameKind::OrientQuat1).as_slice(), &[0u8; 8]);
    assert_eq!(
        record.encode(FrameKind::OrientQuat2).as_slice(),
        &[0, 0, 0, 0, 0x00, 0x00, 0x80, 0x3F]
    );
}

#[test]
/// The z frame of a 3-axis vector is four bytes long.
fn test_vector_z_frame_is_short() {
    let mut record = TelemetryRecord::default();
    record.rate_of_turn.xy = AxesXy { x: 1.0, y: -1.0 };
    record.rate_of_turn.z = AxisZ { z: 2.0 };

    let xy = record.encode(FrameKind::RateOfTurn1);
    assert_eq!(xy.len(), 8);
    assert_eq!(&xy.as_slice()[..4], &1.0f32.to_le_bytes());
    assert_eq!(&xy.as_slice()[4..], &(-1.0f32).to_le_bytes());

    let z = record.encode(FrameKind::RateOfTurn2);
    assert_eq!(z.as_slice(), &2.0f32.to_le_bytes());
}

#[test]
/// Mixed-width time fields are packed without padding.
fn test_utc_time_layout() {
    let mut record = TelemetryRecord::default();
    record.time.utc_time1 = UtcTime1 {
        rx_time: 0x0403_0201,
        flags: 0x07,
        year: 2024,
        month: 5,
    };
    record.time.utc_time2 = UtcTime2 {
        day: 17,
        hour: 12,
        minute: 30,
        second: 59,
        nanosec: 500_000_000,
    };

    assert_eq!(
        record.encode(FrameKind::UtcTime1).as_slice(),
        &[0x01, 0x02, 0x03, 0x04, 0x07, 0xE8, 0x07, 5]
    );
    let second = record.encode(FrameKind::UtcTime2);
    assert_eq!(&second.as_slice()[..4], &[17, 12, 30, 59]);
    assert_eq!(&second.as_slice()[4..], &500_000_000u32.to_le_bytes());
}

#[test]
/// DOP values are u16; the second frame carries three of them.
fn test_gnss_dop_layout() {
    let mut record = TelemetryRecord::default();
    record.gnss_dop = GnssDopRecord {
        gdop: 1,
        pdop: 2,
        tdop: 3,
        vdop: 4,
        hdop: 5,
        ndop: 6,
        edop: 7,
    };
    assert_eq!(
        record.encode(FrameKind::GnssDop1).as_slice(),
        &[1, 0, 2, 0, 3, 0, 4, 0]
    );
    assert_eq!(
        record.encode(FrameKind::GnssDop2).as_slice(),
        &[5, 0, 6, 0, 7, 0]
    );
}

#[test]
/// Every frame a group publishes fits a classic CAN frame and is non-empty.
fn test_every_frame_fits() {
    let record = TelemetryRecord::default();
    let mut seen = 0;
    for group in PUBLISH_PRIORITY {
        for kind in group.frames() {
            let payload = record.encode(*kind);
            assert!(!payload.is_empty(), "{kind:?} empty");
            assert!(payload.len() <= 8, "{kind:?} too wide");
            seen += 1;
        }
    }
    assert_eq!(seen, FrameKind::COUNT);
}

#[test]
/// Every encoded sub-record becomes a frame carrying exactly its bytes.
fn test_payload_to_frame() {
    let mut record = TelemetryRecord::default();
    record.gnss_position.h_acc = 1500;
    record.velocity.ned2.down = -0.5;
    let id = CanId::standard(0x123).unwrap();

    for group in PUBLISH_PRIORITY {
        for kind in group.frames() {
            let payload = record.encode(*kind);
            let frame = payload.to_frame(id, 77);
            assert_eq!(frame.id, id);
            assert_eq!(frame.timestamp, 77);
            assert_eq!(frame.len, payload.len(), "{kind:?} dlc");
            assert_eq!(frame.payload(), payload.as_slice());
        }
    }
}
