//! # Save Block Format
//!
//! Format: Header (5 bytes) + postcard-serialized [`SaveBlock`].
//! - 4 bytes: Magic ("TSAV")
//! - 1 byte: Version
//!
//! Decoding at boot never fails: blank storage yields [`SaveStatus::Empty`],
//! anything that does not decode yields [`SaveStatus::Corrupt`], and both
//! fall back to [`SaveBlock::default`].

use serde::{Deserialize, Serialize};

use crate::display::SoundMode;
use crate::intro::{BootLoader, BootSave};
use crate::location::{ClassifierSet, FlagsDelta, derive_flags, set_champion_save_warp};
use crate::{MapLocation, SaveWarpFlags, TickseqError, primitives};

/// Maximum accepted save size. A save block is a few bytes; anything larger
/// is not ours.
pub const MAX_SAVE_SIZE: usize = 4096;

const HEADER_SIZE: usize = 5;

// =============================================================================
// SAVE BLOCK
// =============================================================================

/// Persisted player state touched by the intro and the save-warp classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SaveBlock {
    /// Map the player saved on.
    pub location: MapLocation,
    pub special_save_warp_flags: SaveWarpFlags,
    pub sound: SoundMode,
    /// Number of times this block was written.
    pub save_count: u32,
}

impl SaveBlock {
    /// Recompute the list-driven save-warp bits for the current location.
    pub fn update_save_warp_flags(&mut self, set: &ClassifierSet) -> FlagsDelta {
        let delta = derive_flags(self.location, set);
        self.special_save_warp_flags = delta.apply(self.special_save_warp_flags);
        delta
    }

    /// Set the champion bit; list-driven bits are left alone.
    pub fn set_champion_save_warp(&mut self) {
        set_champion_save_warp(&mut self.special_save_warp_flags);
    }

    /// Move to `location` and refresh the save-warp bits, as done before a
    /// save.
    pub fn prepare_save(&mut self, location: MapLocation, set: &ClassifierSet) -> FlagsDelta {
        self.location = location;
        self.save_count = self.save_count.saturating_add(1);
        self.update_save_warp_flags(set)
    }
}

// =============================================================================
// HEADER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl SaveHeader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    pub fn validate(&self) -> Result<(), TickseqError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(TickseqError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(TickseqError::DeserializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TickseqError> {
        if bytes.len() < HEADER_SIZE {
            return Err(TickseqError::DeserializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for SaveHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

pub fn save_to_bytes(block: &SaveBlock) -> Result<Vec<u8>, TickseqError> {
    let payload =
        postcard::to_stdvec(block).map_err(|e| TickseqError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_SIZE + payload.len());
    result.extend_from_slice(&SaveHeader::new().to_bytes());
    result.extend_from_slice(&payload);
    Ok(result)
}

/// Strict decode: every problem is an error.
pub fn save_from_bytes(bytes: &[u8]) -> Result<SaveBlock, TickseqError> {
    if bytes.len() > MAX_SAVE_SIZE {
        return Err(TickseqError::DeserializationError(format!(
            "Save size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_SAVE_SIZE
        )));
    }

    let header = SaveHeader::from_bytes(bytes)?;
    header.validate()?;

    postcard::from_bytes(&bytes[HEADER_SIZE..]).map_err(|e| {
        TickseqError::DeserializationError(format!("Failed to decode save block: {}", e))
    })
}

// =============================================================================
// BOOT LOADING
// =============================================================================

/// Outcome of loading the save at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveStatus {
    Ok,
    /// Nothing written yet (no bytes, or erased flash).
    Empty,
    Corrupt,
}

/// Lenient decode used at boot: never fails, falls back to defaults.
#[must_use]
pub fn load_save(bytes: &[u8]) -> (SaveBlock, SaveStatus) {
    if bytes.iter().all(|&b| b == 0xFF) {
        return (SaveBlock::default(), SaveStatus::Empty);
    }
    match save_from_bytes(bytes) {
        Ok(block) => (block, SaveStatus::Ok),
        Err(e) => {
            tracing::debug!(error = %e, "save block rejected");
            (SaveBlock::default(), SaveStatus::Corrupt)
        }
    }
}

/// Save storage read by the boot hook.
#[derive(Debug, Clone, Default)]
pub struct SaveSlot {
    raw: Option<Vec<u8>>,
    block: SaveBlock,
    status: Option<SaveStatus>,
}

impl SaveSlot {
    /// `raw` is `None` when no save exists at all.
    #[must_use]
    pub fn new(raw: Option<Vec<u8>>) -> Self {
        Self {
            raw,
            block: SaveBlock::default(),
            status: None,
        }
    }

    /// The loaded (or default) block.
    #[must_use]
    pub fn block(&self) -> &SaveBlock {
        &self.block
    }

    #[must_use]
    pub fn into_block(self) -> SaveBlock {
        self.block
    }

    /// `None` until the boot hook ran.
    #[must_use]
    pub fn status(&self) -> Option<SaveStatus> {
        self.status
    }
}

impl BootLoader for SaveSlot {
    fn load_game_save(&mut self) -> BootSave {
        let (block, status) = load_save(self.raw.as_deref().unwrap_or_default());
        let loaded = BootSave {
            status,
            sound: block.sound,
        };
        self.block = block;
        self.status = Some(status);
        loaded
    }
}

// =============================================================================
// TESTS
// =============================================================================
