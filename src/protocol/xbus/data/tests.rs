//! Data item iteration and element layouts.
use super::*;
use crate::protocol::xbus::testing::{floats, item};
use std::vec::Vec;

#[test]
/// Items are yielded in payload order with their exact data slice.
fn test_iterate_items() {
    let mut payload = item(0x1060, &[0, 0, 0x12, 0x34]);
    payload.extend(item(0x2010, &floats(&[0.0, 0.0, 0.0, 1.0])));

    let items: Vec<_> = DataItems::new(&payload).collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, DataId::SAMPLE_TIME_FINE);
    assert_eq!(items[0].data, &[0, 0, 0x12, 0x34]);
    assert_eq!(items[1].id, DataId::QUATERNION);
    assert_eq!(items[1].data.len(), 16);
}

#[test]
/// A trailing item whose size overruns the payload stops the iteration.
fn test_truncated_item_ends_iteration() {
    let mut payload = item(0x1060, &[1, 2, 3, 4]);
    payload.extend_from_slice(&[0x20, 0x10, 16, 0x3F, 0x80]);

    let items: Vec<_> = DataItems::new(&payload).collect();
    assert_eq!(items.len(), 1);

    // Header cut in half.
    let items: Vec<_> = DataItems::new(&[0x20]).collect();
    assert!(items.is_empty());
}

#[test]
/// Big-endian reads and out-of-bounds behavior.
fn test_byte_reader() {
    let data = [0x3F, 0x80, 0x00, 0x00, 0x12, 0x34, 0xFF];
    let mut reader = ByteReader::new(&data);
    assert_eq!(reader.read_f32(), Some(1.0));
    assert_eq!(reader.read_u16(), Some(0x1234));
    assert_eq!(reader.remaining(), 1);
    assert_eq!(reader.read_u32(), None);
    // A failed read does not consume anything.
    assert_eq!(reader.read_u8(), Some(0xFF));
    assert_eq!(reader.read_u8(), None);
}

#[test]
/// UTC time field order: nanosec, year, month, day, hour, minute, second, flags.
fn test_parse_utc_time() {
    let data = [
        0x00, 0x0F, 0x42, 0x40, // 1_000_000 ns
        0x07, 0xE8, // 2024
        6, 15, 12, 30, 45, 0x07,
    ];
    let utc = UtcTime::parse(&data).expect("complete element");
    assert_eq!(
        utc,
        UtcTime {
            nanosec: 1_000_000,
            year: 2024,
            month: 6,
            day: 15,
            hour: 12,
            minute: 30,
            second: 45,
            flags: 0x07,
        }
    );
    assert!(UtcTime::parse(&data[..11]).is_none());
}

#[test]
/// PVT record: spot-check fields at both ends of the 94-byte layout.
fn test_parse_gnss_pvt() {
    let mut data = [0u8; GnssPvt::SIZE];
    data[0..4].copy_from_slice(&123_456u32.to_be_bytes());
    data[20] = 3; // fix type
    data[22] = 11; // satellites
    data[24..28].copy_from_slice(&(-1_234_567i32).to_be_bytes()); // lon
    data[28..32].copy_from_slice(&515_000_000i32.to_be_bytes()); // lat
    data[48..52].copy_from_slice(&(-250i32).to_be_bytes()); // vel north
    data[92..94].copy_from_slice(&150u16.to_be_bytes()); // edop

    let pvt = GnssPvt::parse(&data).expect("complete element");
    assert_eq!(pvt.itow, 123_456);
    assert_eq!(pvt.fix_type, 3);
    assert_eq!(pvt.num_sv, 11);
    assert_eq!(pvt.lon, -1_234_567);
    assert_eq!(pvt.lat, 515_000_000);
    assert_eq!(pvt.vel_n, -250);
    assert_eq!(pvt.edop, 150);

    assert!(GnssPvt::parse(&data[..GnssPvt::SIZE - 1]).is_none());
}
