//! # Intro Director
//!
//! Outer driver for the intro phases. One [`IntroDirector::tick`] per frame
//! advances the active phase; on hand-off the director swaps in the next
//! phase with a fresh [`SequenceState`].

use serde::{Deserialize, Serialize};

use super::{CopyrightEntry, IntroTables, Phase};
use crate::TickseqError;
use crate::display::{Display, SoundMode};
use crate::formats::SaveStatus;
use crate::sequencer::{ContinuationSignal, SequenceState};

/// What the boot hook read back from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootSave {
    pub status: SaveStatus,
    /// Sound mode of the loaded block, or the default when it was unusable.
    pub sound: SoundMode,
}

/// Work run once when the copyright screen finishes after a cold boot.
pub trait BootLoader {
    /// Load the save from storage, falling back to defaults when it is empty
    /// or corrupt.
    fn load_game_save(&mut self) -> BootSave;
}

impl<B: BootLoader + ?Sized> BootLoader for &mut B {
    fn load_game_save(&mut self) -> BootSave {
        (**self).load_game_save()
    }
}

/// A recorded phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Director tick on which the hand-off fired (1-based).
    pub tick: u64,
    pub from: Phase,
    pub to: Phase,
}

/// Result of one director tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The phase ran; `progress` is its counter after the tick.
    Running { phase: Phase, progress: u32 },
    /// The active phase handed off on this tick.
    HandedOff(Transition),
    /// The active phase is outside the intro; nothing ran.
    Idle,
}

pub struct IntroDirector<D, B> {
    tables: IntroTables,
    phase: Phase,
    state: SequenceState,
    display: D,
    boot: B,
    ticks: u64,
    transitions: Vec<Transition>,
    boot_status: Option<SaveStatus>,
}

impl<D: Display, B: BootLoader> IntroDirector<D, B> {
    /// Start at the copyright screen.
    pub fn new(entry: CopyrightEntry, display: D, boot: B) -> Result<Self, TickseqError> {
        Ok(Self {
            tables: IntroTables::new()?,
            phase: Phase::CopyrightScreen(entry),
            state: SequenceState::new(),
            display,
            boot,
            ticks: 0,
            transitions: Vec::new(),
            boot_status: None,
        })
    }

    /// Run one frame of the active phase.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(table) = self.tables.for_phase(self.phase) else {
            return TickOutcome::Idle;
        };

        self.ticks = self.ticks.saturating_add(1);
        tracing::trace!(
            tick = self.ticks,
            phase = %self.phase,
            progress = self.state.progress(),
            "tick"
        );

        match table.advance(&mut self.state, &mut self.display) {
            ContinuationSignal::Continue => TickOutcome::Running {
                phase: self.phase,
                progress: self.state.progress(),
            },
            ContinuationSignal::PhaseComplete(next) => TickOutcome::HandedOff(self.hand_off(next)),
            ContinuationSignal::Exhausted => TickOutcome::Idle,
        }
    }

    /// Tick until `target` is the active phase.
    ///
    /// Returns the director's total tick count. Fails when `max_ticks` ticks
    /// ran without reaching `target`, or when the director went idle first.
    pub fn run_until(&mut self, target: Phase, max_ticks: u64) -> Result<u64, TickseqError> {
        let mut ran = 0u64;
        while self.phase != target {
            if ran >= max_ticks {
                return Err(TickseqError::TickBudgetExhausted(ran));
            }
            if self.tick() == TickOutcome::Idle {
                return Err(TickseqError::TickBudgetExhausted(ran));
            }
            ran = ran.saturating_add(1);
        }
        Ok(self.ticks)
    }

    fn hand_off(&mut self, next: Phase) -> Transition {
        let from = self.phase;

        if from == Phase::CopyrightScreen(CopyrightEntry::AfterBootup) {
            let BootSave { status, sound } = self.boot.load_game_save();
            match status {
                SaveStatus::Ok => tracing::info!("save loaded"),
                SaveStatus::Empty | SaveStatus::Corrupt => {
                    tracing::warn!(?status, "save unusable, using defaults");
                }
            }
            self.display.set_sound_mode(sound);
            tracing::debug!(?sound, "sound mode applied");
            self.boot_status = Some(status);
        }

        self.phase = next;
        self.state = SequenceState::new();

        let transition = Transition {
            tick: self.ticks,
            from,
            to: next,
        };
        tracing::info!(tick = transition.tick, from = %from, to = %next, "phase hand-off");
        self.transitions.push(transition);
        transition
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Progress of the active phase.
    #[must_use]
    pub fn state(&self) -> &SequenceState {
        &self.state
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Status returned by the boot hook, if it ran.
    #[must_use]
    pub fn boot_status(&self) -> Option<SaveStatus> {
        self.boot_status
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    #[must_use]
    pub fn boot(&self) -> &B {
        &self.boot
    }

    /// Release the collaborators.
    pub fn into_parts(self) -> (D, B) {
        (self.display, self.boot)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayEvent, HeadlessDisplay};

    #[derive(Default)]
    struct CountingBoot {
        calls: usize,
        sound: SoundMode,
    }

    impl BootLoader for CountingBoot {
        fn load_game_save(&mut self) -> BootSave {
            self.calls += 1;
            BootSave {
                status: SaveStatus::Ok,
                sound: self.sound,
            }
        }
    }

    fn director(entry: CopyrightEntry) -> IntroDirector<HeadlessDisplay, CountingBoot> {
        IntroDirector::new(entry, HeadlessDisplay::new(), CountingBoot::default())
            .expect("director")
    }

    #[test]
    fn stereo_save_switches_sound_mode_at_boot() {
        let boot = CountingBoot {
            calls: 0,
            sound: SoundMode::Stereo,
        };
        let mut d = IntroDirector::new(CopyrightEntry::AfterBootup, HeadlessDisplay::new(), boot)
            .expect("director");

        d.run_until(Phase::FlagScene, 10_000).expect("flag scene");

        assert_eq!(d.display().sound_mode(), Some(SoundMode::Stereo));
        assert_eq!(d.display().count(|e| matches!(e, DisplayEvent::SoundMode(_))), 1);
    }

    #[test]
    fn sound_mode_untouched_after_title_screen() {
        let mut d = director(CopyrightEntry::AfterTitleScreen);
        d.run_until(Phase::TitleScreen, 10_000).expect("title screen");
        assert_eq!(d.display().sound_mode(), None);
    }

    #[test]
    fn starts_on_copyright_screen() {
        let d = director(CopyrightEntry::AfterBootup);
        assert_eq!(d.phase(), Phase::CopyrightScreen(CopyrightEntry::AfterBootup));
        assert_eq!(d.state().progress(), 0);
        assert_eq!(d.ticks(), 0);
    }

    #[test]
    fn reaches_title_screen_with_two_transitions() {
        let mut d = director(CopyrightEntry::AfterBootup);
        d.run_until(Phase::TitleScreen, 10_000).expect("title screen");

        let phases: Vec<_> = d.transitions().iter().map(|t| (t.from, t.to)).collect();
        assert_eq!(
            phases,
            vec![
                (
                    Phase::CopyrightScreen(CopyrightEntry::AfterBootup),
                    Phase::FlagScene
                ),
                (Phase::FlagScene, Phase::TitleScreen),
            ]
        );
    }

    #[test]
    fn boot_hook_runs_once_after_bootup() {
        let mut d = director(CopyrightEntry::AfterBootup);
        d.run_until(Phase::TitleScreen, 10_000).expect("title screen");
        for _ in 0..300 {
            assert_eq!(d.tick(), TickOutcome::Idle);
        }
        assert_eq!(d.boot().calls, 1);
        assert_eq!(d.boot_status(), Some(SaveStatus::Ok));
    }

    #[test]
    fn boot_hook_skipped_after_title_screen() {
        let mut d = director(CopyrightEntry::AfterTitleScreen);
        d.run_until(Phase::TitleScreen, 10_000).expect("title screen");
        assert_eq!(d.boot().calls, 0);
        assert_eq!(d.boot_status(), None);
    }

    #[test]
    fn tick_budget_is_enforced() {
        let mut d = director(CopyrightEntry::AfterTitleScreen);
        let result = d.run_until(Phase::TitleScreen, 10);
        assert!(matches!(result, Err(TickseqError::TickBudgetExhausted(10))));
        assert_eq!(d.ticks(), 10);
    }

    #[test]
    fn state_resets_on_hand_off() {
        let mut d = director(CopyrightEntry::AfterTitleScreen);
        d.run_until(Phase::FlagScene, 10_000).expect("flag scene");
        assert_eq!(d.state().progress(), 0);
        assert!(!d.state().is_complete());
    }
}
