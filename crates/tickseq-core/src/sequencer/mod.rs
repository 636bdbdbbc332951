//! # Staged Sequencer
//!
//! A phase is a [`PhaseTable`]: an ordered list of checkpoints, each a
//! progress value with a list of [`Effect`]s and a continuation ([`Then`]),
//! plus one default step for every other progress value. A
//! [`SequenceState`] holds the progress counter of one activation.
//!
//! [`PhaseTable::advance`] is called once per tick. It is total: every
//! progress value dispatches to either its checkpoint or the default step,
//! progress only ever moves up by one, and the hand-off fires once. After the
//! hand-off every call returns [`ContinuationSignal::Exhausted`] and does
//! nothing.
//!
//! ## Example
//!
//! ```
//! use tickseq_core::display::{Display, FadeRequest, HeadlessDisplay, Rgb555};
//! use tickseq_core::sequencer::{
//!     Checkpoint, ContinuationSignal, DefaultStep, Effect, PhaseTable, SequenceState, Then,
//! };
//!
//! let table = PhaseTable::new(
//!     vec![
//!         Checkpoint::new(0, Then::Advance)
//!             .with_effect(Effect::BeginFade(FadeRequest::fade_in_from(Rgb555::BLACK))),
//!         Checkpoint::new(3, Then::HandOff("next")),
//!     ],
//!     DefaultStep::StepFade,
//! )?;
//!
//! let mut state = SequenceState::new();
//! let mut display = HeadlessDisplay::new();
//! for _ in 0..3 {
//!     assert_eq!(table.advance(&mut state, &mut display), ContinuationSignal::Continue);
//! }
//! assert_eq!(
//!     table.advance(&mut state, &mut display),
//!     ContinuationSignal::PhaseComplete("next")
//! );
//! # Ok::<(), tickseq_core::TickseqError>(())
//! ```

mod state;

pub use state::SequenceState;

use serde::{Deserialize, Serialize};

use crate::TickseqError;
use crate::display::{
    BackgroundConfig, Display, DisplayControl, FadeRequest, SceneAsset, SerialHandler,
    VBlankHandler,
};

// =============================================================================
// EFFECTS
// =============================================================================

/// One side effect on the display collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    ResetVideo,
    LoadGraphics(SceneAsset),
    SetBackground(BackgroundConfig),
    WriteDisplayControl(DisplayControl),
    BeginFade(FadeRequest),
    SetVBlankHandler(Option<VBlankHandler>),
    SetSerialHandler(Option<SerialHandler>),
}

impl Effect {
    pub fn apply<D: Display + ?Sized>(&self, display: &mut D) {
        match *self {
            Effect::ResetVideo => display.reset_video(),
            Effect::LoadGraphics(asset) => display.load_graphics(asset),
            Effect::SetBackground(config) => display.set_background(config),
            Effect::WriteDisplayControl(control) => display.write_display_control(control),
            Effect::BeginFade(request) => display.begin_fade(request),
            Effect::SetVBlankHandler(handler) => display.set_vblank_handler(handler),
            Effect::SetSerialHandler(handler) => display.set_serial_handler(handler),
        }
    }
}

// =============================================================================
// CONTINUATIONS
// =============================================================================

/// What a checkpoint does after its effects ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Then<P> {
    /// Increment progress.
    Advance,
    /// Run the table's default step for this tick.
    FallThrough,
    /// One fade step, result ignored, then increment progress.
    StepFade,
    /// Step the fade; stay while it runs, hand off on the tick it finishes.
    AwaitFadeThenHandOff(P),
    /// Hand off immediately.
    HandOff(P),
}

impl<P> Then<P> {
    fn hands_off(&self) -> bool {
        matches!(self, Then::AwaitFadeThenHandOff(_) | Then::HandOff(_))
    }
}

/// Behavior for progress values without a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultStep {
    /// Step the fade; stay while it runs, otherwise increment progress.
    AwaitFade,
    /// Step the fade and always increment progress.
    StepFade,
}

/// Result of one [`PhaseTable::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContinuationSignal<P> {
    /// The phase is still running.
    Continue,
    /// The hand-off fired on this tick; switch to `P`.
    PhaseComplete(P),
    /// The hand-off already fired on an earlier tick; nothing ran.
    Exhausted,
}

impl<P> ContinuationSignal<P> {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, ContinuationSignal::PhaseComplete(_))
    }
}

// =============================================================================
// CHECKPOINT & TABLE
// =============================================================================

/// A progress value with a special action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint<P> {
    pub at: u32,
    pub effects: Vec<Effect>,
    pub then: Then<P>,
}

impl<P> Checkpoint<P> {
    /// A checkpoint at `at` with no effects.
    #[must_use]
    pub fn new(at: u32, then: Then<P>) -> Self {
        Self {
            at,
            effects: Vec::new(),
            then,
        }
    }

    /// Append one effect, run after those already added.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Checkpoints sorted by progress value plus the default step.
///
/// Decoding goes through [`PhaseTable::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RawPhaseTable<P>",
    bound(deserialize = "P: Deserialize<'de> + Copy")
)]
pub struct PhaseTable<P> {
    checkpoints: Vec<Checkpoint<P>>,
    default: DefaultStep,
}

#[derive(Deserialize)]
struct RawPhaseTable<P> {
    checkpoints: Vec<Checkpoint<P>>,
    default: DefaultStep,
}

impl<P: Copy> TryFrom<RawPhaseTable<P>> for PhaseTable<P> {
    type Error = TickseqError;

    fn try_from(raw: RawPhaseTable<P>) -> Result<Self, Self::Error> {
        Self::new(raw.checkpoints, raw.default)
    }
}

impl<P: Copy> PhaseTable<P> {
    /// Build a table.
    ///
    /// Checkpoints must be strictly ascending by `at`, and at least one of
    /// them must hand off.
    pub fn new(checkpoints: Vec<Checkpoint<P>>, default: DefaultStep) -> Result<Self, TickseqError> {
        if let Some(pair) = checkpoints.windows(2).find(|w| w[0].at >= w[1].at) {
            return Err(TickseqError::InvalidTable(format!(
                "checkpoint {} is not after {}",
                pair[1].at, pair[0].at
            )));
        }
        if !checkpoints.iter().any(|cp| cp.then.hands_off()) {
            return Err(TickseqError::InvalidTable(
                "no checkpoint hands off".to_string(),
            ));
        }
        Ok(Self {
            checkpoints,
            default,
        })
    }

    #[must_use]
    pub fn checkpoints(&self) -> &[Checkpoint<P>] {
        &self.checkpoints
    }

    #[must_use]
    pub fn default_step(&self) -> DefaultStep {
        self.default
    }

    /// The checkpoint registered at `progress`, if any.
    #[must_use]
    pub fn checkpoint(&self, progress: u32) -> Option<&Checkpoint<P>> {
        self.checkpoints
            .binary_search_by_key(&progress, |cp| cp.at)
            .ok()
            .map(|i| &self.checkpoints[i])
    }

    /// Run one tick of this phase.
    pub fn advance<D: Display + ?Sized>(
        &self,
        state: &mut SequenceState,
        display: &mut D,
    ) -> ContinuationSignal<P> {
        if state.is_complete() {
            return ContinuationSignal::Exhausted;
        }
        state.record_tick();

        let Some(checkpoint) = self.checkpoint(state.progress()) else {
            return self.run_default(state, display);
        };

        tracing::debug!(progress = checkpoint.at, "checkpoint");
        for effect in &checkpoint.effects {
            effect.apply(display);
        }

        match checkpoint.then {
            Then::Advance => {
                state.bump();
                ContinuationSignal::Continue
            }
            Then::FallThrough => self.run_default(state, display),
            Then::StepFade => {
                display.update_fade();
                state.bump();
                ContinuationSignal::Continue
            }
            Then::AwaitFadeThenHandOff(next) => {
                if display.update_fade() {
                    ContinuationSignal::Continue
                } else {
                    state.complete();
                    ContinuationSignal::PhaseComplete(next)
                }
            }
            Then::HandOff(next) => {
                state.complete();
                ContinuationSignal::PhaseComplete(next)
            }
        }
    }

    fn run_default<D: Display + ?Sized>(
        &self,
        state: &mut SequenceState,
        display: &mut D,
    ) -> ContinuationSignal<P> {
        let still_fading = display.update_fade();
        match self.default {
            DefaultStep::AwaitFade if still_fading => {}
            DefaultStep::AwaitFade | DefaultStep::StepFade => state.bump(),
        }
        ContinuationSignal::Continue
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayEvent, HeadlessDisplay, Rgb555};

    fn fade_then_hand_off(default: DefaultStep) -> PhaseTable<u8> {
        PhaseTable::new(
            vec![
                Checkpoint::new(0, Then::StepFade)
                    .with_effect(Effect::BeginFade(FadeRequest::fade_in_from(Rgb555::BLACK))),
                Checkpoint::new(5, Then::HandOff(7)),
            ],
            default,
        )
        .expect("valid table")
    }

    #[test]
    fn rejects_unsorted_checkpoints() {
        let result = PhaseTable::new(
            vec![
                Checkpoint::new(4, Then::Advance),
                Checkpoint::new(2, Then::HandOff(())),
            ],
            DefaultStep::AwaitFade,
        );
        assert!(matches!(result, Err(TickseqError::InvalidTable(_))));
    }

    #[test]
    fn rejects_duplicate_checkpoints() {
        let result = PhaseTable::new(
            vec![
                Checkpoint::new(2, Then::Advance),
                Checkpoint::new(2, Then::HandOff(())),
            ],
            DefaultStep::AwaitFade,
        );
        assert!(matches!(result, Err(TickseqError::InvalidTable(_))));
    }

    #[test]
    fn rejects_table_without_hand_off() {
        let result: Result<PhaseTable<()>, _> =
            PhaseTable::new(vec![Checkpoint::new(0, Then::Advance)], DefaultStep::AwaitFade);
        assert!(matches!(result, Err(TickseqError::InvalidTable(_))));
    }

    #[test]
    fn await_fade_holds_progress_while_fading() {
        let table = fade_then_hand_off(DefaultStep::AwaitFade);
        let mut state = SequenceState::new();
        let mut display = HeadlessDisplay::new();

        table.advance(&mut state, &mut display);
        assert_eq!(state.progress(), 1);

        // Fade-in has 7 steps left; 6 of them report "still active".
        for _ in 0..6 {
            table.advance(&mut state, &mut display);
            assert_eq!(state.progress(), 1);
        }
        table.advance(&mut state, &mut display);
        assert_eq!(state.progress(), 2);
    }

    #[test]
    fn step_fade_default_always_advances() {
        let table = fade_then_hand_off(DefaultStep::StepFade);
        let mut state = SequenceState::new();
        let mut display = HeadlessDisplay::new();

        for expected in 1..=5 {
            table.advance(&mut state, &mut display);
            assert_eq!(state.progress(), expected);
        }
    }

    #[test]
    fn hand_off_fires_once_then_exhausted() {
        let table = fade_then_hand_off(DefaultStep::StepFade);
        let mut state = SequenceState::new();
        let mut display = HeadlessDisplay::new();

        let signals: Vec<_> = (0..20)
            .map(|_| table.advance(&mut state, &mut display))
            .collect();

        assert_eq!(signals.iter().filter(|s| s.is_complete()).count(), 1);
        assert_eq!(signals[5], ContinuationSignal::PhaseComplete(7));
        assert!(signals[6..]
            .iter()
            .all(|s| *s == ContinuationSignal::Exhausted));
        assert_eq!(state.progress(), 5);
        assert_eq!(state.ticks(), 6);
    }

    #[test]
    fn exhausted_phase_touches_nothing() {
        let table = fade_then_hand_off(DefaultStep::StepFade);
        let mut state = SequenceState::new();
        let mut display = HeadlessDisplay::new();
        while !table.advance(&mut state, &mut display).is_complete() {}

        let before = display.events().len();
        table.advance(&mut state, &mut display);
        assert_eq!(display.events().len(), before);
    }

    #[test]
    fn fall_through_runs_effects_then_default() {
        let table = PhaseTable::new(
            vec![
                Checkpoint::new(0, Then::FallThrough)
                    .with_effect(Effect::WriteDisplayControl(DisplayControl::INTRO)),
                Checkpoint::new(1, Then::HandOff(())),
            ],
            DefaultStep::AwaitFade,
        )
        .expect("valid table");
        let mut state = SequenceState::new();
        let mut display = HeadlessDisplay::new();

        table.advance(&mut state, &mut display);
        assert_eq!(
            display.events(),
            &[
                DisplayEvent::DisplayControl(DisplayControl::INTRO),
                DisplayEvent::FadeStep {
                    coeff: 0,
                    active: false
                },
            ]
        );
        assert_eq!(state.progress(), 1);
    }

    #[derive(Serialize)]
    struct LooseTable {
        checkpoints: Vec<Checkpoint<u8>>,
        default: DefaultStep,
    }

    fn encode_loose(checkpoints: Vec<Checkpoint<u8>>) -> Vec<u8> {
        postcard::to_stdvec(&LooseTable {
            checkpoints,
            default: DefaultStep::AwaitFade,
        })
        .expect("encode")
    }

    #[test]
    fn decoding_empty_table_fails() {
        let bytes = encode_loose(Vec::new());
        let result = postcard::from_bytes::<PhaseTable<u8>>(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn decoding_unsorted_table_fails() {
        let bytes = encode_loose(vec![
            Checkpoint::new(4, Then::Advance),
            Checkpoint::new(2, Then::HandOff(1)),
        ]);
        assert!(postcard::from_bytes::<PhaseTable<u8>>(&bytes).is_err());
    }

    #[test]
    fn decoded_table_matches_original() {
        let table = fade_then_hand_off(DefaultStep::AwaitFade);
        let bytes = postcard::to_stdvec(&table).expect("encode");
        let decoded = postcard::from_bytes::<PhaseTable<u8>>(&bytes).expect("decode");
        assert_eq!(decoded, table);
    }
}
