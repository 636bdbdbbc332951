//! # Intro Cinematic
//!
//! Two phase tables run back to back:
//!
//! | Phase | Checkpoints | Hands off to |
//! |-------|-------------|--------------|
//! | Copyright screen | 0 setup, 1 display re-write, 140 fade-out, 141 wait | Flag scene |
//! | Flag scene | 0 load + fade-in, 220 fade-out, 221 fade step, 255 hand-off | Title screen |
//!
//! Every other progress value steps the running fade and only advances once
//! the fade has finished. [`IntroDirector`] owns the active phase and swaps
//! phases on hand-off.

mod director;

pub use director::{BootLoader, BootSave, IntroDirector, TickOutcome, Transition};

use serde::{Deserialize, Serialize};

use crate::TickseqError;
use crate::display::{
    BackgroundConfig, DisplayControl, FadeRequest, Rgb555, SceneAsset, SerialHandler,
    VBlankHandler,
};
use crate::primitives::{
    COPYRIGHT_FADE_OUT, COPYRIGHT_HAND_OFF, COPYRIGHT_REASSERT, COPYRIGHT_SETUP, SCENE_FADE_OUT,
    SCENE_FADE_STEP, SCENE_HAND_OFF, SCENE_SETUP,
};
use crate::sequencer::{Checkpoint, DefaultStep, Effect, PhaseTable, Then};

// =============================================================================
// PHASES
// =============================================================================

/// How the copyright screen was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyrightEntry {
    /// Cold boot: the save is loaded once the screen finishes.
    AfterBootup,
    /// Looped back from the title screen: nothing to load.
    AfterTitleScreen,
}

/// Top-level program phases reachable from the intro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    CopyrightScreen(CopyrightEntry),
    FlagScene,
    /// Owned by the title screen code; terminal for the intro.
    TitleScreen,
}

impl Phase {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::CopyrightScreen(_) => "copyright",
            Phase::FlagScene => "flag-scene",
            Phase::TitleScreen => "title-screen",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// PHASE TABLES
// =============================================================================

/// Copyright notice: reset, fade in from white, hold, fade out to black.
pub fn copyright_table() -> Result<PhaseTable<Phase>, TickseqError> {
    PhaseTable::new(
        vec![
            // Checkpoint 0 also runs checkpoint 1's body, hence the second
            // display control write.
            Checkpoint::new(COPYRIGHT_SETUP, Then::StepFade).with_effects([
                Effect::SetVBlankHandler(None),
                Effect::ResetVideo,
                Effect::LoadGraphics(SceneAsset::Copyright),
                Effect::BeginFade(FadeRequest::fade_in_from(Rgb555::WHITE)),
                Effect::SetBackground(BackgroundConfig::COPYRIGHT),
                Effect::SetVBlankHandler(Some(VBlankHandler::Intro)),
                Effect::WriteDisplayControl(DisplayControl::INTRO),
                Effect::SetSerialHandler(None),
                Effect::WriteDisplayControl(DisplayControl::INTRO),
            ]),
            Checkpoint::new(COPYRIGHT_REASSERT, Then::FallThrough)
                .with_effect(Effect::WriteDisplayControl(DisplayControl::INTRO)),
            Checkpoint::new(COPYRIGHT_FADE_OUT, Then::Advance)
                .with_effect(Effect::BeginFade(FadeRequest::fade_out_to(Rgb555::BLACK))),
            Checkpoint::new(
                COPYRIGHT_HAND_OFF,
                Then::AwaitFadeThenHandOff(Phase::FlagScene),
            ),
        ],
        DefaultStep::AwaitFade,
    )
}

/// Flag card: load, fade in from black, hold, fade out, hand off to the
/// title screen with the link serial handler re-armed.
pub fn flag_scene_table() -> Result<PhaseTable<Phase>, TickseqError> {
    PhaseTable::new(
        vec![
            Checkpoint::new(SCENE_SETUP, Then::StepFade).with_effects([
                Effect::LoadGraphics(SceneAsset::FlagCard),
                Effect::BeginFade(FadeRequest::fade_in_from(Rgb555::BLACK)),
            ]),
            Checkpoint::new(SCENE_FADE_OUT, Then::Advance)
                .with_effect(Effect::BeginFade(FadeRequest::fade_out_to(Rgb555::BLACK))),
            Checkpoint::new(SCENE_FADE_STEP, Then::StepFade),
            Checkpoint::new(SCENE_HAND_OFF, Then::HandOff(Phase::TitleScreen))
                .with_effect(Effect::SetSerialHandler(Some(SerialHandler::Link))),
        ],
        DefaultStep::AwaitFade,
    )
}

/// Both intro tables, built once per director.
#[derive(Debug, Clone)]
pub struct IntroTables {
    pub copyright: PhaseTable<Phase>,
    pub flag_scene: PhaseTable<Phase>,
}

impl IntroTables {
    pub fn new() -> Result<Self, TickseqError> {
        Ok(Self {
            copyright: copyright_table()?,
            flag_scene: flag_scene_table()?,
        })
    }

    /// Table driving `phase`, or `None` for phases outside the intro.
    #[must_use]
    pub fn for_phase(&self, phase: Phase) -> Option<&PhaseTable<Phase>> {
        match phase {
            Phase::CopyrightScreen(_) => Some(&self.copyright),
            Phase::FlagScene => Some(&self.flag_scene),
            Phase::TitleScreen => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_build() {
        let tables = IntroTables::new().expect("intro tables");
        assert_eq!(tables.copyright.checkpoints().len(), 4);
        assert_eq!(tables.flag_scene.checkpoints().len(), 4);
    }

    #[test]
    fn title_screen_has_no_table() {
        let tables = IntroTables::new().expect("intro tables");
        assert!(tables.for_phase(Phase::TitleScreen).is_none());
        assert!(tables.for_phase(Phase::FlagScene).is_some());
    }

    #[test]
    fn copyright_hands_off_to_flag_scene() {
        let table = copyright_table().expect("table");
        let last = table.checkpoint(COPYRIGHT_HAND_OFF).expect("hand-off");
        assert_eq!(last.then, Then::AwaitFadeThenHandOff(Phase::FlagScene));
    }

    #[test]
    fn phase_names() {
        assert_eq!(
            Phase::CopyrightScreen(CopyrightEntry::AfterBootup).to_string(),
            "copyright"
        );
        assert_eq!(Phase::TitleScreen.to_string(), "title-screen");
    }
}
