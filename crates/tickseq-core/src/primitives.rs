//! # Primitives
//!
//! Fixed constants compiled into the binary.
//!
//! 1. **Checkpoints**: progress values with a special action in the two intro
//!    sequences.
//! 2. **Fade model**: coefficient range and step of the palette fade.
//! 3. **Lists**: the end-of-list sentinel.
//! 4. **Save format**: magic bytes and version.

// =============================================================================
// COPYRIGHT SCREEN CHECKPOINTS
// =============================================================================

/// One-time setup: video reset, graphics load, fade-in.
pub const COPYRIGHT_SETUP: u32 = 0;

/// Display control is re-written every tick until the fade-in finishes.
pub const COPYRIGHT_REASSERT: u32 = 1;

/// Fade-out to black begins.
pub const COPYRIGHT_FADE_OUT: u32 = 140;

/// Wait for the fade-out, then hand off to the flag scene.
pub const COPYRIGHT_HAND_OFF: u32 = 141;

// =============================================================================
// FLAG SCENE CHECKPOINTS
// =============================================================================

/// Graphics load and fade-in from black.
pub const SCENE_SETUP: u32 = 0;

/// Fade-out to black begins.
pub const SCENE_FADE_OUT: u32 = 220;

/// First fade-out step; always advances.
pub const SCENE_FADE_STEP: u32 = 221;

/// Hand off to the title screen and re-arm the link serial handler.
pub const SCENE_HAND_OFF: u32 = 255;

// =============================================================================
// FADE MODEL
// =============================================================================

/// Fully faded to the blend color.
pub const FADE_MAX_COEFF: u8 = 16;

/// Coefficient change per fade update.
pub const FADE_STEP: u8 = 2;

// =============================================================================
// LOCATION LISTS
// =============================================================================

/// End-of-list sentinel for packed location lists.
pub const LIST_END: u16 = 0xFFFF;

// =============================================================================
// SAVE FORMAT
// =============================================================================

/// Magic bytes for the save block header.
pub const MAGIC_BYTES: &[u8; 4] = b"TSAV";

/// Current save block format version.
pub const FORMAT_VERSION: u8 = 1;
