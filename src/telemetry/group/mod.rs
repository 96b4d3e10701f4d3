//! Telemetry groups and their ready state.
//!
//! A group is published as one unit once every element feeding it has been
//! decoded at least once since the group was last cleared. Readiness is an
//! enum-indexed flag array; publish order is the explicit
//! [`PUBLISH_PRIORITY`] list and never depends on enum discriminants.
use crate::telemetry::record::FrameKind;

//==================================================================================ELEMENT
/// Decoded data items that feed telemetry groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    SampleTimeFine,
    UtcTime,
    Quaternion,
    RateOfTurn,
    Acceleration,
    MagneticField,
    LatLon,
    AltitudeEllipsoid,
    Velocity,
    GnssPvt,
}

impl Element {
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of [`Element`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElementSet(u16);

impl ElementSet {
    pub const EMPTY: Self = Self(0);

    pub const fn of(elements: &[Element]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < elements.len() {
            bits |= elements[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, element: Element) -> bool {
        self.0 & element.bit() != 0
    }

    pub const fn is_superset(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    const fn with(self, element: Element) -> Self {
        Self(self.0 | element.bit())
    }
}

//==================================================================================GROUP
/// Publishable telemetry groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Group {
    Time,
    Orientation,
    RateOfTurn,
    Acceleration,
    MagneticField,
    Position,
    Height,
    Velocity,
    GnssPosition,
    GnssVelocity,
    GnssHeading,
    GnssDop,
}

/// Publish order, highest priority first. Every group appears exactly once.
pub const PUBLISH_PRIORITY: [Group; Group::COUNT] = [
    Group::Time,
    Group::Orientation,
    Group::RateOfTurn,
    Group::Acceleration,
    Group::MagneticField,
    Group::Position,
    Group::Height,
    Group::Velocity,
    Group::GnssPosition,
    Group::GnssVelocity,
    Group::GnssHeading,
    Group::GnssDop,
];

impl Group {
    pub const COUNT: usize = 12;

    const fn index(self) -> usize {
        self as usize
    }

    /// Elements that must all be written before the group is ready.
    pub const fn constituents(self) -> ElementSet {
        match self {
            Group::Time => ElementSet::of(&[Element::SampleTimeFine, Element::UtcTime]),
            Group::Orientation => ElementSet::of(&[Element::Quaternion]),
            Group::RateOfTurn => ElementSet::of(&[Element::RateOfTurn]),
            Group::Acceleration => ElementSet::of(&[Element::Acceleration]),
            Group::MagneticField => ElementSet::of(&[Element::MagneticField]),
            Group::Position => ElementSet::of(&[Element::LatLon]),
            Group::Height => ElementSet::of(&[Element::AltitudeEllipsoid]),
            Group::Velocity => ElementSet::of(&[Element::Velocity]),
            Group::GnssPosition
            | Group::GnssVelocity
            | Group::GnssHeading
            | Group::GnssDop => ElementSet::of(&[Element::GnssPvt]),
        }
    }

    /// CAN frames (sub-records) the group is published as, in send order.
    pub const fn frames(self) -> &'static [FrameKind] {
        match self {
            Group::Time => &[
                FrameKind::SampleTime,
                FrameKind::UtcTime1,
                FrameKind::UtcTime2,
            ],
            Group::Orientation => &[FrameKind::OrientQuat1, FrameKind::OrientQuat2],
            Group::RateOfTurn => &[FrameKind::RateOfTurn1, FrameKind::RateOfTurn2],
            Group::Acceleration => &[FrameKind::Accel1, FrameKind::Accel2],
            Group::MagneticField => &[FrameKind::Magf1, FrameKind::Magf2],
            Group::Position => &[FrameKind::PosLlh1],
            Group::Height => &[FrameKind::PosLlh2],
            Group::Velocity => &[FrameKind::VelNed1, FrameKind::VelNed2],
            Group::GnssPosition => &[
                FrameKind::GnssPos1,
                FrameKind::GnssPos2,
                FrameKind::GnssPos3,
            ],
            Group::GnssVelocity => &[FrameKind::GnssVel1, FrameKind::GnssVel2],
            Group::GnssHeading => &[FrameKind::GnssHeading1, FrameKind::GnssHeading2],
            Group::GnssDop => &[FrameKind::GnssDop1, FrameKind::GnssDop2],
        }
    }
}

//==================================================================================READY
/// Ready flags plus the elements written towards each group since its last clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupReady {
    ready: [bool; Group::COUNT],
    written: [ElementSet; Group::COUNT],
}

impl Default for GroupReady {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupReady {
    /// Nothing written, nothing ready.
    pub const fn new() -> Self {
        Self {
            ready: [false; Group::COUNT],
            written: [ElementSet::EMPTY; Group::COUNT],
        }
    }

    /// Record that `element` was just written into `group`'s record.
    ///
    /// Raises the group's flag once all its constituents are covered and
    /// returns the resulting readiness. Elements that do not feed `group`
    /// are ignored.
    pub fn mark_written(&mut self, group: Group, element: Element) -> bool {
        let required = group.constituents();
        if !required.contains(element) {
            return self.ready[group.index()];
        }

        let written = self.written[group.index()].with(element);
        self.written[group.index()] = written;
        if written.is_superset(required) {
            self.ready[group.index()] = true;
        }
        self.ready[group.index()]
    }

    pub fn is_ready(&self, group: Group) -> bool {
        self.ready[group.index()]
    }

    pub fn any_ready(&self) -> bool {
        self.ready.iter().any(|ready| *ready)
    }

    /// Elements written towards `group` since its last clear.
    pub fn written(&self, group: Group) -> ElementSet {
        self.written[group.index()]
    }

    /// Clear one group: its flag and its written elements.
    pub fn clear(&mut self, group: Group) {
        self.ready[group.index()] = false;
        self.written[group.index()] = ElementSet::EMPTY;
    }

    pub fn clear_all(&mut self) {
        *self = Self::new();
    }

    /// Ready groups in publish order.
    pub fn ready_groups(&self) -> impl Iterator<Item = Group> + '_ {
        PUBLISH_PRIORITY
            .iter()
            .copied()
            .filter(move |group| self.is_ready(*group))
    }
}
