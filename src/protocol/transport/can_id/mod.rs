//! CAN identifiers used for the telemetry frames: 11-bit standard or
//! 29-bit extended, both carried as a raw `u32` on the wire side.
use embedded_can::{ExtendedId, Id, StandardId};

use crate::error::CanIdError;

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Validated CAN identifier wrapping [`embedded_can::Id`].
pub struct CanId(Id);

impl CanId {
    /// 11-bit identifier, `None` above `0x7FF`. Usable in `const` context.
    pub const fn standard(raw: u16) -> Option<Self> {
        match StandardId::new(raw) {
            Some(id) => Some(Self(Id::Standard(id))),
            None => None,
        }
    }

    /// 29-bit identifier, `None` above `0x1FFF_FFFF`. Usable in `const` context.
    pub const fn extended(raw: u32) -> Option<Self> {
        match ExtendedId::new(raw) {
            Some(id) => Some(Self(Id::Extended(id))),
            None => None,
        }
    }

    /// Checked constructor from a raw standard identifier.
    pub fn try_standard(raw: u32) -> Result<Self, CanIdError> {
        u16::try_from(raw)
            .ok()
            .and_then(Self::standard)
            .ok_or(CanIdError::StandardOutOfRange { raw })
    }

    /// Checked constructor from a raw extended identifier.
    pub fn try_extended(raw: u32) -> Result<Self, CanIdError> {
        Self::extended(raw).ok_or(CanIdError::ExtendedOutOfRange { raw })
    }

    /// Raw identifier bits (11 or 29 significant bits).
    pub fn as_raw(&self) -> u32 {
        match self.0 {
            Id::Standard(id) => id.as_raw() as u32,
            Id::Extended(id) => id.as_raw(),
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self.0, Id::Extended(_))
    }

    /// Identifier in `embedded-can` form, for handing to a HAL driver.
    pub fn as_id(&self) -> Id {
        self.0
    }
}

impl From<StandardId> for CanId {
    fn from(id: StandardId) -> Self {
        Self(Id::Standard(id))
    }
}

impl From<ExtendedId> for CanId {
    fn from(id: ExtendedId) -> Self {
        Self(Id::Extended(id))
    }
}

impl From<Id> for CanId {
    fn from(id: Id) -> Self {
        Self(id)
    }
}

impl From<CanId> for Id {
    fn from(id: CanId) -> Self {
        id.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CanId {
    fn format(&self, f: defmt::Formatter) {
        if self.is_extended() {
            defmt::write!(f, "CanId(ext {=u32:#X})", self.as_raw())
        } else {
            defmt::write!(f, "CanId(std {=u32:#X})", self.as_raw())
        }
    }
}
