//! Field extractors: copy decoded data items into the telemetry record.
//!
//! One extractor per element, looked up by data identifier in a static
//! table. An extractor returns `false` (and writes nothing) when its item is
//! shorter than the element layout. On success it marks every group the
//! element feeds, which raises a group's ready flag once its last missing
//! constituent arrives.
use crate::config::AccelerationSource;
use crate::protocol::xbus::data::{ByteReader, DataId, DataItem, GnssPvt, UtcTime};
use crate::protocol::xbus::message::XbusMessage;
use crate::telemetry::group::{Element, Group, GroupReady};
use crate::telemetry::record::TelemetryRecord;

/// Per-message inputs shared by every extractor run for that message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractContext {
    /// Receive timestamp (ms), read once before any extractor runs.
    pub rx_time: u32,
    /// Which acceleration item feeds the acceleration group.
    pub acceleration: AccelerationSource,
}

/// Mutable targets of an extraction.
pub struct ExtractTarget<'a> {
    pub record: &'a mut TelemetryRecord,
    pub ready: &'a mut GroupReady,
}

impl ExtractTarget<'_> {
    fn mark(&mut self, element: Element, groups: &[Group]) {
        for group in groups {
            self.ready.mark_written(*group, element);
        }
    }
}

type Extractor = fn(&[u8], &ExtractContext, &mut ExtractTarget<'_>) -> bool;

//==================================================================================DISPATCH
const EXTRACTORS: &[(DataId, Extractor)] = &[
    (DataId::SAMPLE_TIME_FINE, extract_sample_time_fine),
    (DataId::UTC_TIME, extract_utc_time),
    (DataId::QUATERNION, extract_quaternion),
    (DataId::RATE_OF_TURN, extract_rate_of_turn),
    (DataId::FREE_ACCELERATION, extract_free_acceleration),
    (DataId::ACCELERATION, extract_calibrated_acceleration),
    (DataId::MAGNETIC_FIELD, extract_magnetic_field),
    (DataId::LAT_LON, extract_lat_lon),
    (DataId::ALTITUDE_ELLIPSOID, extract_altitude_ellipsoid),
    (DataId::VELOCITY_XYZ, extract_velocity),
    (DataId::GNSS_PVT_DATA, extract_gnss_pvt),
];

/// Run the matching extractor for one data item. Unknown identifiers are
/// ignored and report `false`.
pub fn extract_item(item: &DataItem<'_>, ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    EXTRACTORS
        .iter()
        .find(|(id, _)| *id == item.id)
        .is_some_and(|(_, extractor)| extractor(item.data, ctx, target))
}

/// Extract every recognised item of `message`, returning how many elements
/// were written. Messages other than `MTData2` yield nothing.
pub fn extract_message(
    message: &XbusMessage<'_>,
    ctx: &ExtractContext,
    target: &mut ExtractTarget<'_>,
) -> usize {
    message
        .data_items()
        .filter(|item| extract_item(item, ctx, target))
        .count()
}

//==================================================================================TIME
fn extract_sample_time_fine(data: &[u8], ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    let Some(ticks) = ByteReader::new(data).read_u32() else {
        return false;
    };
    let sample = &mut target.record.time.sample_time;
    sample.rx_time = ctx.rx_time;
    sample.sample_time = ticks;
    target.mark(Element::SampleTimeFine, &[Group::Time]);
    true
}

fn extract_utc_time(data: &[u8], ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    let Some(utc) = UtcTime::parse(data) else {
        return false;
    };
    let time = &mut target.record.time;
    time.utc_time1.rx_time = ctx.rx_time;
    time.utc_time1.flags = utc.flags;
    time.utc_time1.year = utc.year;
    time.utc_time1.month = utc.month;
    time.utc_time2.day = utc.day;
    time.utc_time2.hour = utc.hour;
    time.utc_time2.minute = utc.minute;
    time.utc_time2.second = utc.second;
    time.utc_time2.nanosec = utc.nanosec;
    target.mark(Element::UtcTime, &[Group::Time]);
    true
}

//==================================================================================INERTIAL
fn extract_quaternion(data: &[u8], _ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    let Some([q1, q2, q3, q4]) = ByteReader::new(data).read_f32s::<4>() else {
        return false;
    };
    let orientation = &mut target.record.orientation;
    orientation.quat1.q1 = q1;
    orientation.quat1.q2 = q2;
    orientation.quat2.q3 = q3;
    orientation.quat2.q4 = q4;
    target.mark(Element::Quaternion, &[Group::Orientation]);
    true
}

fn extract_rate_of_turn(data: &[u8], _ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    let Some([x, y, z]) = ByteReader::new(data).read_f32s::<3>() else {
        return false;
    };
    let gyro = &mut target.record.rate_of_turn;
    gyro.xy.x = x;
    gyro.xy.y = y;
    gyro.z.z = z;
    target.mark(Element::RateOfTurn, &[Group::RateOfTurn]);
    true
}

fn extract_free_acceleration(data: &[u8], ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    ctx.acceleration == AccelerationSource::Free && extract_acceleration(data, target)
}

fn extract_calibrated_acceleration(
    data: &[u8],
    ctx: &ExtractContext,
    target: &mut ExtractTarget<'_>,
) -> bool {
    ctx.acceleration == AccelerationSource::Calibrated && extract_acceleration(data, target)
}

fn extract_acceleration(data: &[u8], target: &mut ExtractTarget<'_>) -> bool {
    let Some([x, y, z]) = ByteReader::new(data).read_f32s::<3>() else {
        return false;
    };
    let accel = &mut target.record.acceleration;
    accel.xy.x = x;
    accel.xy.y = y;
    accel.z.z = z;
    target.mark(Element::Acceleration, &[Group::Acceleration]);
    true
}

fn extract_magnetic_field(data: &[u8], _ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    let Some([x, y, z]) = ByteReader::new(data).read_f32s::<3>() else {
        return false;
    };
    let magf = &mut target.record.magnetic_field;
    magf.xy.x = x;
    magf.xy.y = y;
    magf.z.z = z;
    target.mark(Element::MagneticField, &[Group::MagneticField]);
    true
}

//==================================================================================POSITION
fn extract_lat_lon(data: &[u8], _ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    let Some([latitude, longitude]) = ByteReader::new(data).read_f32s::<2>() else {
        return false;
    };
    let llh = &mut target.record.position.llh1;
    llh.latitude = latitude;
    llh.longitude = longitude;
    target.mark(Element::LatLon, &[Group::Position]);
    true
}

fn extract_altitude_ellipsoid(data: &[u8], _ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    let Some(height) = ByteReader::new(data).read_f32() else {
        return false;
    };
    target.record.position.llh2.height = height;
    target.mark(Element::AltitudeEllipsoid, &[Group::Height]);
    true
}

fn extract_velocity(data: &[u8], _ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    let Some([north, east, down]) = ByteReader::new(data).read_f32s::<3>() else {
        return false;
    };
    let velocity = &mut target.record.velocity;
    velocity.ned1.north = north;
    velocity.ned1.east = east;
    velocity.ned2.down = down;
    target.mark(Element::Velocity, &[Group::Velocity]);
    true
}

//==================================================================================GNSS
fn extract_gnss_pvt(data: &[u8], _ctx: &ExtractContext, target: &mut ExtractTarget<'_>) -> bool {
    let Some(pvt) = GnssPvt::parse(data) else {
        return false;
    };
    let record = &mut *target.record;

    let position = &mut record.gnss_position;
    position.lat = pvt.lat;
    position.lon = pvt.lon;
    position.height = pvt.height;
    position.height_msl = pvt.height_msl;
    position.h_acc = pvt.h_acc;
    position.v_acc = pvt.v_acc;

    let velocity = &mut record.gnss_velocity;
    velocity.north = pvt.vel_n;
    velocity.east = pvt.vel_e;
    velocity.down = pvt.vel_d;
    velocity.ground_speed = pvt.ground_speed;

    let heading = &mut record.gnss_heading;
    heading.motion = pvt.head_motion;
    heading.vehicle = pvt.head_vehicle;
    heading.motion_acc = pvt.head_acc;
    heading.speed_acc = pvt.speed_acc;

    let dop = &mut record.gnss_dop;
    dop.gdop = pvt.gdop;
    dop.pdop = pvt.pdop;
    dop.tdop = pvt.tdop;
    dop.vdop = pvt.vdop;
    dop.hdop = pvt.hdop;
    dop.ndop = pvt.ndop;
    dop.edop = pvt.edop;

    target.mark(
        Element::GnssPvt,
        &[
            Group::GnssPosition,
            Group::GnssVelocity,
            Group::GnssHeading,
            Group::GnssDop,
        ],
    );
    true
}
