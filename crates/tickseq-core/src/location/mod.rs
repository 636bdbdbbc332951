//! # Save Location Classifier
//!
//! Decides which special save-warp flags apply to the map the player saves
//! on. Each flag is backed by a [`LocationList`]: a packed id list ending in
//! the [`LIST_END`] sentinel. Before a save, [`derive_flags`] rescans every
//! list and rewrites each list's bit from scratch: set on a match, cleared
//! otherwise.
//!
//! The champion bit is not list-driven; see [`set_champion_save_warp`].

pub mod maps;

use serde::{Deserialize, Serialize};

use crate::primitives::LIST_END;
use crate::{MapLocation, SaveWarpFlags, TickseqError};

// =============================================================================
// LOCATION LIST
// =============================================================================

/// A named, immutable list of packed map ids terminated by [`LIST_END`].
///
/// Construction guarantees the sentinel is present, so scans always stop.
/// Decoding goes through [`LocationList::from_terminated`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLocationList")]
pub struct LocationList {
    name: String,
    /// Packed ids, sentinel included as the last element.
    ids: Vec<u16>,
}

impl LocationList {
    /// Build from locations; the sentinel is appended.
    pub fn new(
        name: impl Into<String>,
        locations: impl IntoIterator<Item = MapLocation>,
    ) -> Result<Self, TickseqError> {
        let name = name.into();
        let mut ids = Vec::new();
        for loc in locations {
            if loc.is_sentinel() {
                return Err(TickseqError::SentinelLocation(name));
            }
            ids.push(loc.packed());
        }
        ids.push(LIST_END);
        Ok(Self { name, ids })
    }

    /// Build from a raw sentinel-terminated id table.
    ///
    /// Ids after the first sentinel are ignored.
    pub fn from_terminated(name: impl Into<String>, raw: &[u16]) -> Result<Self, TickseqError> {
        let name = name.into();
        let Some(end) = raw.iter().position(|&id| id == LIST_END) else {
            return Err(TickseqError::UnterminatedList(name));
        };
        Ok(Self {
            name,
            ids: raw[..=end].to_vec(),
        })
    }

    /// A list holding only the sentinel.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ids: vec![LIST_END],
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of locations before the sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len().saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = MapLocation> + '_ {
        self.ids
            .iter()
            .take_while(|&&id| id != LIST_END)
            .map(|&id| MapLocation::from_packed(id))
    }

    /// Linear scan up to the sentinel.
    #[must_use]
    pub fn contains(&self, location: MapLocation) -> bool {
        let target = location.packed();
        for &id in &self.ids {
            if id == LIST_END {
                return false;
            }
            if id == target {
                return true;
            }
        }
        false
    }
}

#[derive(Deserialize)]
struct RawLocationList {
    name: String,
    ids: Vec<u16>,
}

impl TryFrom<RawLocationList> for LocationList {
    type Error = TickseqError;

    fn try_from(raw: RawLocationList) -> Result<Self, Self::Error> {
        Self::from_terminated(raw.name, &raw.ids)
    }
}

/// True iff `location` appears in `list` before the sentinel.
#[must_use]
pub fn classify(location: MapLocation, list: &LocationList) -> bool {
    list.contains(location)
}

// =============================================================================
// FLAGS DELTA
// =============================================================================

/// Bits to set and bits to clear in a [`SaveWarpFlags`] value.
///
/// `set` and `clear` never overlap; together they cover every bit owned by
/// the classifier set that produced the delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FlagsDelta {
    pub set: u8,
    pub clear: u8,
}

impl FlagsDelta {
    #[must_use]
    pub fn apply(self, flags: SaveWarpFlags) -> SaveWarpFlags {
        SaveWarpFlags((flags.bits() & !self.clear) | self.set)
    }

    /// Every bit this delta writes.
    #[must_use]
    pub fn managed(self) -> u8 {
        self.set | self.clear
    }
}

// =============================================================================
// CLASSIFIER SET
// =============================================================================

/// A list and the flag bit it drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierEntry {
    pub list: LocationList,
    /// Bit index in `0..7`; bit 7 is the champion bit.
    pub bit: u8,
}

impl ClassifierEntry {
    #[must_use]
    pub fn mask(&self) -> u8 {
        1u8.checked_shl(u32::from(self.bit)).unwrap_or(0)
    }
}

/// The lists recomputed before every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClassifierSet")]
pub struct ClassifierSet {
    entries: Vec<ClassifierEntry>,
}

#[derive(Deserialize)]
struct RawClassifierSet {
    entries: Vec<ClassifierEntry>,
}

impl TryFrom<RawClassifierSet> for ClassifierSet {
    type Error = TickseqError;

    fn try_from(raw: RawClassifierSet) -> Result<Self, Self::Error> {
        Self::new(raw.entries)
    }
}

impl ClassifierSet {
    /// Each entry must own a distinct bit below the champion bit.
    pub fn new(entries: Vec<ClassifierEntry>) -> Result<Self, TickseqError> {
        let mut claimed = 0u8;
        for entry in &entries {
            if entry.bit >= 8 || entry.mask() == SaveWarpFlags::CHAMPION {
                return Err(TickseqError::InvalidFlagBit(entry.bit));
            }
            if claimed & entry.mask() != 0 {
                return Err(TickseqError::DuplicateFlagBit(entry.bit));
            }
            claimed |= entry.mask();
        }
        Ok(Self { entries })
    }

    /// Pokémon Center (bit 0), Battle Tower reload (bit 1), and the unused
    /// empty list (bit 2).
    pub fn save_warp_defaults() -> Result<Self, TickseqError> {
        Self::new(vec![
            ClassifierEntry {
                list: LocationList::new("pokecenter", maps::POKECENTER_MAPS)?,
                bit: 0,
            },
            ClassifierEntry {
                list: LocationList::new("reload", maps::RELOAD_MAPS)?,
                bit: 1,
            },
            ClassifierEntry {
                list: LocationList::empty("unknown"),
                bit: 2,
            },
        ])
    }

    #[must_use]
    pub fn entries(&self) -> &[ClassifierEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassifierEntry> {
        self.entries.iter().find(|e| e.list.name() == name)
    }

    /// Membership of `location` in every list, in list order.
    pub fn memberships(&self, location: MapLocation) -> Vec<(&str, bool)> {
        self.entries
            .iter()
            .map(|e| (e.list.name(), classify(location, &e.list)))
            .collect()
    }
}

/// Recompute every list-driven bit for `location`.
#[must_use]
pub fn derive_flags(location: MapLocation, set: &ClassifierSet) -> FlagsDelta {
    set.entries
        .iter()
        .fold(FlagsDelta::default(), |mut delta, entry| {
            if classify(location, &entry.list) {
                delta.set |= entry.mask();
            } else {
                delta.clear |= entry.mask();
            }
            delta
        })
}

/// Mark that the player entered the Hall of Fame.
pub fn set_champion_save_warp(flags: &mut SaveWarpFlags) {
    flags.insert(SaveWarpFlags::CHAMPION);
}

// =============================================================================
// TESTS
// =============================================================================
