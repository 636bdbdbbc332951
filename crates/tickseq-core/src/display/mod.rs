//! # Display Collaborator
//!
//! Everything the intro does to video hardware goes through [`Display`].
//! Register programming, asset decompression and palette blending belong to
//! the implementor; the sequencer only decides *when* each call happens.
//!
//! [`HeadlessDisplay`] is an in-memory implementation that records every call
//! and models the palette fade with an integer coefficient.

mod fade;
mod headless;

pub use fade::PaletteFade;
pub use headless::{DisplayEvent, HeadlessDisplay};

use serde::{Deserialize, Serialize};

// =============================================================================
// COLORS
// =============================================================================

/// A 15-bit BGR color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Rgb555(pub u16);

impl Rgb555 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0x7FFF);
}

// =============================================================================
// FADE REQUEST
// =============================================================================

/// Parameters of a whole-palette fade toward or away from a blend color.
///
/// `start` and `target` are blend coefficients in `0..=16`: 0 shows the
/// palette unchanged, 16 shows only `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FadeRequest {
    /// Extra updates to wait between coefficient steps.
    pub delay: u8,
    pub start: u8,
    pub target: u8,
    pub color: Rgb555,
}

impl FadeRequest {
    /// Fade in from a solid `color` to the loaded palette.
    #[must_use]
    pub const fn fade_in_from(color: Rgb555) -> Self {
        Self {
            delay: 0,
            start: crate::primitives::FADE_MAX_COEFF,
            target: 0,
            color,
        }
    }

    /// Fade out from the loaded palette to a solid `color`.
    #[must_use]
    pub const fn fade_out_to(color: Rgb555) -> Self {
        Self {
            delay: 0,
            start: 0,
            target: crate::primitives::FADE_MAX_COEFF,
            color,
        }
    }
}

// =============================================================================
// SCENE ASSETS
// =============================================================================

/// Compressed graphics sets the intro loads by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneAsset {
    /// Copyright notice tiles, tilemap and palette.
    Copyright,
    /// Full-screen flag card shown after the copyright notice.
    FlagCard,
}

/// Where an asset's parts land in video memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLayout {
    /// Byte offset of the tileset from the start of VRAM.
    pub tiles_offset: u32,
    /// Byte offset of the tilemap from the start of VRAM.
    pub tilemap_offset: u32,
    /// Background palette slot.
    pub palette_slot: u8,
}

impl SceneAsset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            SceneAsset::Copyright => "intro/copyright",
            SceneAsset::FlagCard => "intro/flag_card",
        }
    }

    /// Both intro assets share one layout: tiles at 0, map in screen block 7.
    #[must_use]
    pub const fn layout(&self) -> AssetLayout {
        AssetLayout {
            tiles_offset: 0,
            tilemap_offset: 0x3800,
            palette_slot: 0,
        }
    }
}

// =============================================================================
// REGISTER VALUES
// =============================================================================

/// Display control: video mode and enabled layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayControl {
    pub mode: u8,
    pub obj_1d_mapping: bool,
    pub bg0: bool,
}

impl DisplayControl {
    /// Mode 0, 1D sprite mapping, background 0 only.
    pub const INTRO: Self = Self {
        mode: 0,
        obj_1d_mapping: true,
        bg0: true,
    };

    /// Forced blank.
    pub const OFF: Self = Self {
        mode: 0,
        obj_1d_mapping: false,
        bg0: false,
    };
}

/// Background 0 control register contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    pub priority: u8,
    pub char_base: u8,
    pub screen_base: u8,
    /// 16-color (4bpp) tiles when true.
    pub four_bpp: bool,
    /// 256x256 text background.
    pub size: u8,
}

impl BackgroundConfig {
    pub const COPYRIGHT: Self = Self {
        priority: 0,
        char_base: 0,
        screen_base: 7,
        four_bpp: true,
        size: 0,
    };
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Work installed on the vertical-blank interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VBlankHandler {
    /// Copy OAM, process sprite copy requests, transfer the palette buffer.
    Intro,
}

/// Work installed on the serial interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SerialHandler {
    /// Link cable handling.
    Link,
}

// =============================================================================
// SOUND
// =============================================================================

/// Speaker output mode stored in the save block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SoundMode {
    #[default]
    Mono,
    Stereo,
}

// =============================================================================
// DISPLAY TRAIT
// =============================================================================

/// Video, sound and interrupt collaborator driven by the sequencer.
pub trait Display {
    /// Clear VRAM, OAM and palettes; reset blending, scrolling, tasks and
    /// sprites.
    fn reset_video(&mut self);

    /// Decompress `asset` into video memory at its [`AssetLayout`].
    fn load_graphics(&mut self, asset: SceneAsset);

    /// Program the background 0 control register.
    fn set_background(&mut self, config: BackgroundConfig);

    /// Write the display control register (video mode and enabled layers).
    fn write_display_control(&mut self, control: DisplayControl);

    /// Start a palette fade. Replaces any fade in progress.
    fn begin_fade(&mut self, request: FadeRequest);

    /// Run one fade step. Returns true while the fade is still in progress.
    fn update_fade(&mut self) -> bool;

    /// Install the vertical-blank interrupt work, or clear it with `None`.
    fn set_vblank_handler(&mut self, handler: Option<VBlankHandler>);

    /// Install the serial interrupt work, or clear it with `None`.
    fn set_serial_handler(&mut self, handler: Option<SerialHandler>);

    /// Switch cry and music output to `mode`.
    fn set_sound_mode(&mut self, mode: SoundMode);
}
