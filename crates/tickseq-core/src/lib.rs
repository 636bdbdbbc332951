//! # tickseq-core
//!
//! Frame-tick sequencing for an intro cinematic, and the save-location
//! classifier - THE LOGIC.
//!
//! ## Components
//!
//! - `sequencer`: phase tables of progress checkpoints, advanced once per tick
//! - `intro`: the copyright screen and flag scene tables, and the director
//!   that hands off between them
//! - `location`: sentinel-terminated map lists and the save-warp flags they
//!   drive
//! - `formats`: the save block byte format
//! - `display`: the video collaborator interface and a headless recorder
//!
//! ## Architectural Constraints
//!
//! - Single-threaded and tick-driven: one call per frame, no blocking
//! - No global state: every phase activation owns its `SequenceState`
//! - No file or network I/O; hardware sits behind the `Display` trait

// =============================================================================
// MODULES
// =============================================================================

pub mod display;
pub mod formats;
pub mod intro;
pub mod location;
pub mod primitives;
pub mod sequencer;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{MapLocation, SaveWarpFlags, TickseqError};

// =============================================================================
// RE-EXPORTS: Sequencer & Intro
// =============================================================================

pub use display::SoundMode;
pub use intro::{
    BootLoader, BootSave, CopyrightEntry, IntroDirector, Phase, TickOutcome, Transition,
};
pub use sequencer::{ContinuationSignal, PhaseTable, SequenceState};

// =============================================================================
// RE-EXPORTS: Classifier & Formats
// =============================================================================

pub use formats::{SaveBlock, SaveSlot, SaveStatus, load_save, save_from_bytes, save_to_bytes};
pub use location::{
    ClassifierEntry, ClassifierSet, FlagsDelta, LocationList, classify, derive_flags,
    set_champion_save_warp,
};
