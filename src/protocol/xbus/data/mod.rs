//! `MTData2` data items: identifiers, a big-endian reader, and the typed
//! elements the gateway extracts.
//!
//! Each item in an `MTData2` payload is `| id: u16 BE | size: u8 | data … |`.
//! Multi-byte values inside `data` are big-endian.

//==================================================================================DATA_ID
/// Xbus data identifier (`XDI_*`). The low nibble encodes precision and
/// coordinate frame; the gateway matches identifiers exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataId(pub u16);

impl DataId {
    pub const UTC_TIME: Self = Self(0x1010);
    pub const PACKET_COUNTER: Self = Self(0x1020);
    pub const SAMPLE_TIME_FINE: Self = Self(0x1060);
    pub const QUATERNION: Self = Self(0x2010);
    pub const ACCELERATION: Self = Self(0x4020);
    pub const FREE_ACCELERATION: Self = Self(0x4030);
    pub const ALTITUDE_ELLIPSOID: Self = Self(0x5020);
    pub const LAT_LON: Self = Self(0x5040);
    pub const GNSS_PVT_DATA: Self = Self(0x7010);
    pub const RATE_OF_TURN: Self = Self(0x8020);
    pub const MAGNETIC_FIELD: Self = Self(0xC020);
    pub const VELOCITY_XYZ: Self = Self(0xD010);
    pub const STATUS_WORD: Self = Self(0xE020);
}

//==================================================================================READER
/// Cursor over a big-endian byte slice. Every read is bounds-checked and
/// returns `None` past the end instead of panicking.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Take the next `len` bytes.
    pub fn read_slice(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.cursor.checked_add(len)?;
        let slice = self.buffer.get(self.cursor..end)?;
        self.cursor = end;
        Some(slice)
    }

    fn read_array<const K: usize>(&mut self) -> Option<[u8; K]> {
        let mut bytes = [0u8; K];
        bytes.copy_from_slice(self.read_slice(K)?);
        Some(bytes)
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        self.read_array::<1>().map(|b| b[0])
    }

    pub fn read_u16(&mut self) -> Option<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        self.read_array().map(i32::from_be_bytes)
    }

    pub fn read_f32(&mut self) -> Option<f32> {
        self.read_array().map(f32::from_be_bytes)
    }

    /// Read `K` consecutive single-precision floats.
    pub fn read_f32s<const K: usize>(&mut self) -> Option<[f32; K]> {
        let mut values = [0.0f32; K];
        for value in values.iter_mut() {
            *value = self.read_f32()?;
        }
        Some(values)
    }
}

//==================================================================================ITEMS
/// One data item borrowed from an `MTData2` payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataItem<'a> {
    pub id: DataId,
    pub data: &'a [u8],
}

/// Iterator over the data items of an `MTData2` payload. A truncated
/// trailing item (header or body) ends the iteration.
#[derive(Debug, Clone)]
pub struct DataItems<'a> {
    reader: ByteReader<'a>,
}

impl<'a> DataItems<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            reader: ByteReader::new(payload),
        }
    }
}

impl<'a> Iterator for DataItems<'a> {
    type Item = DataItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.reader.read_u16()?;
        let size = self.reader.read_u8()?;
        let data = self.reader.read_slice(size as usize)?;
        Some(DataItem {
            id: DataId(id),
            data,
        })
    }
}

//==================================================================================ELEMENTS
/// `XDI_UtcTime` element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UtcTime {
    pub nanosec: u32,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Validity flags reported by the sensor.
    pub flags: u8,
}

impl UtcTime {
    /// Encoded size on the wire.
    pub const SIZE: usize = 12;

    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut reader = ByteReader::new(data);
        Some(Self {
            nanosec: reader.read_u32()?,
            year: reader.read_u16()?,
            month: reader.read_u8()?,
            day: reader.read_u8()?,
            hour: reader.read_u8()?,
            minute: reader.read_u8()?,
            second: reader.read_u8()?,
            flags: reader.read_u8()?,
        })
    }
}

/// `XDI_GnssPvtData` element: the receiver's navigation solution, laid out
/// like a u-blox `NAV-PVT` message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GnssPvt {
    /// GPS time of week (ms).
    pub itow: u32,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub valid: u8,
    pub time_acc: u32,
    pub nano: i32,
    pub fix_type: u8,
    pub flags: u8,
    pub num_sv: u8,
    /// Longitude (1e-7 deg).
    pub lon: i32,
    /// Latitude (1e-7 deg).
    pub lat: i32,
    /// Height above ellipsoid (mm).
    pub height: i32,
    /// Height above mean sea level (mm).
    pub height_msl: i32,
    pub h_acc: u32,
    pub v_acc: u32,
    /// NED velocity (mm/s).
    pub vel_n: i32,
    pub vel_e: i32,
    pub vel_d: i32,
    /// Ground speed (mm/s).
    pub ground_speed: i32,
    /// Heading of motion (1e-5 deg).
    pub head_motion: i32,
    pub speed_acc: u32,
    pub head_acc: u32,
    /// Heading of vehicle (1e-5 deg).
    pub head_vehicle: i32,
    /// Dilutions of precision (×0.01).
    pub gdop: u16,
    pub pdop: u16,
    pub tdop: u16,
    pub vdop: u16,
    pub hdop: u16,
    pub ndop: u16,
    pub edop: u16,
}

impl GnssPvt {
    /// Encoded size on the wire.
    pub const SIZE: usize = 94;

    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut reader = ByteReader::new(data);
        let itow = reader.read_u32()?;
        let year = reader.read_u16()?;
        let month = reader.read_u8()?;
        let day = reader.read_u8()?;
        let hour = reader.read_u8()?;
        let minute = reader.read_u8()?;
        let second = reader.read_u8()?;
        let valid = reader.read_u8()?;
        let time_acc = reader.read_u32()?;
        let nano = reader.read_i32()?;
        let fix_type = reader.read_u8()?;
        let flags = reader.read_u8()?;
        let num_sv = reader.read_u8()?;
        let _reserved = reader.read_u8()?;
        Some(Self {
            itow,
            year,
            month,
            day,
            hour,
            minute,
            second,
            valid,
            time_acc,
            nano,
            fix_type,
            flags,
            num_sv,
            lon: reader.read_i32()?,
            lat: reader.read_i32()?,
            height: reader.read_i32()?,
            height_msl: reader.read_i32()?,
            h_acc: reader.read_u32()?,
            v_acc: reader.read_u32()?,
            vel_n: reader.read_i32()?,
            vel_e: reader.read_i32()?,
            vel_d: reader.read_i32()?,
            ground_speed: reader.read_i32()?,
            head_motion: reader.read_i32()?,
            speed_acc: reader.read_u32()?,
            head_acc: reader.read_u32()?,
            head_vehicle: reader.read_i32()?,
            gdop: reader.read_u16()?,
            pdop: reader.read_u16()?,
            tdop: reader.read_u16()?,
            vdop: reader.read_u16()?,
            hdop: reader.read_u16()?,
            ndop: reader.read_u16()?,
            edop: reader.read_u16()?,
        })
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
