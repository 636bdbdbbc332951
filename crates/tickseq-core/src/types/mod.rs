//! # Core Type Definitions
//!
//! Small value types shared by the sequencer, the classifier and the save
//! block:
//! - Map identifiers (`MapLocation`)
//! - The persisted save-warp bit-field (`SaveWarpFlags`)
//! - Error types (`TickseqError`)
//!
//! All types use integer arithmetic only and derive `Ord` where they can be
//! used as keys.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::primitives::LIST_END;

// =============================================================================
// MAP LOCATION
// =============================================================================

/// A map identified by its group and its number inside the group.
///
/// Location lists store maps packed as `(group << 8) + num`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct MapLocation {
    pub group: u8,
    pub num: u8,
}

impl MapLocation {
    #[must_use]
    pub const fn new(group: u8, num: u8) -> Self {
        Self { group, num }
    }

    /// Packed 16-bit id used by location lists.
    #[must_use]
    pub const fn packed(self) -> u16 {
        ((self.group as u16) << 8) + self.num as u16
    }

    /// Inverse of [`MapLocation::packed`].
    #[must_use]
    pub const fn from_packed(id: u16) -> Self {
        Self {
            group: (id >> 8) as u8,
            num: (id & 0xFF) as u8,
        }
    }

    /// The one location that cannot be stored in a list: it packs to the
    /// end-of-list sentinel.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.packed() == LIST_END
    }
}

impl std::fmt::Display for MapLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} ({:#06x})", self.group, self.num, self.packed())
    }
}

// =============================================================================
// SAVE WARP FLAGS
// =============================================================================

/// Special save-warp bit-field persisted in the save block.
///
/// Bits 0..=2 are owned by the location classifier and fully recomputed
/// before every save. [`SaveWarpFlags::CHAMPION`] is written independently.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct SaveWarpFlags(pub u8);

impl SaveWarpFlags {
    /// Saved inside a Pokémon Center (or League / link room).
    pub const POKECENTER: u8 = 1 << 0;
    /// Saved in the Battle Tower lobby.
    pub const LOBBY: u8 = 1 << 1;
    /// Backed by an empty list, never set.
    pub const UNKNOWN: u8 = 1 << 2;
    /// Set after entering the Hall of Fame.
    pub const CHAMPION: u8 = 1 << 7;

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    pub fn insert(&mut self, mask: u8) {
        self.0 |= mask;
    }

    pub fn remove(&mut self, mask: u8) {
        self.0 &= !mask;
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in tickseq.
///
/// Ticking a sequence and classifying a location never fail. Errors only come
/// out of validating static data, bounded runs, the save format, and the app
/// layer.
#[derive(Debug, Error)]
pub enum TickseqError {
    /// A terminated location list has no end-of-list sentinel.
    #[error("Location list '{0}' has no end-of-list sentinel")]
    UnterminatedList(String),

    /// A location list contains a map that packs to the sentinel value.
    #[error("Location list '{0}' contains the sentinel as a location")]
    SentinelLocation(String),

    /// Two classifier lists claim the same flag bit.
    #[error("Flag bit {0} is assigned to more than one list")]
    DuplicateFlagBit(u8),

    /// A classifier list targets a bit outside `0..7`.
    #[error("Flag bit {0} is not available to location lists")]
    InvalidFlagBit(u8),

    /// A phase table is malformed.
    #[error("Invalid phase table: {0}")]
    InvalidTable(String),

    /// A bounded run ended before the target phase was reached.
    #[error("Tick budget exhausted after {0} ticks")]
    TickBudgetExhausted(u64),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// The configuration file is invalid.
    #[error("Config error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_is_group_high_byte() {
        let loc = MapLocation::new(0x0B, 0x05);
        assert_eq!(loc.packed(), 0x0B05);
        assert_eq!(MapLocation::from_packed(0x0B05), loc);
    }

    #[test]
    fn only_ff_ff_is_sentinel() {
        assert!(MapLocation::new(0xFF, 0xFF).is_sentinel());
        assert!(!MapLocation::new(0xFF, 0xFE).is_sentinel());
    }

    #[test]
    fn flags_insert_remove() {
        let mut flags = SaveWarpFlags::empty();
        flags.insert(SaveWarpFlags::POKECENTER | SaveWarpFlags::CHAMPION);
        assert!(flags.contains(SaveWarpFlags::POKECENTER));
        assert!(flags.contains(SaveWarpFlags::CHAMPION));

        flags.remove(SaveWarpFlags::POKECENTER);
        assert!(!flags.contains(SaveWarpFlags::POKECENTER));
        assert_eq!(flags.bits(), SaveWarpFlags::CHAMPION);
    }

    #[test]
    fn location_display() {
        assert_eq!(format!("{}", MapLocation::new(2, 3)), "2.3 (0x0203)");
    }
}
