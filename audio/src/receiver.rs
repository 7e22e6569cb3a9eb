//! Stable identifiers of named engine controls.

use crc::{Crc, CRC_32_ISO_HDLC};

const NAME_CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Identifier of a named control receiver inside the audio engine.
///
/// Identifiers are derived from human-readable names once during
/// startup, so hot paths address receivers without any string handling.
/// The hash is deterministic, two runs of the same build resolve a name
/// to the same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiverId(u32);

impl ReceiverId {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(NAME_CRC.checksum(name.as_bytes()))
    }

    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}
