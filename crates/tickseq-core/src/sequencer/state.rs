use serde::{Deserialize, Serialize};

/// Progress of one phase activation.
///
/// Progress starts at 0 and only ever moves up by one. A new activation gets
/// a new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SequenceState {
    progress: u32,
    ticks: u64,
    completed: bool,
}

impl SequenceState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume an activation at `progress`.
    #[must_use]
    pub fn starting_at(progress: u32) -> Self {
        Self {
            progress,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Ticks that ran before (and including) the hand-off.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True once the hand-off fired.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub(crate) fn bump(&mut self) {
        self.progress = self.progress.saturating_add(1);
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub(crate) fn complete(&mut self) {
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_fresh() {
        let state = SequenceState::new();
        assert_eq!(state.progress(), 0);
        assert_eq!(state.ticks(), 0);
        assert!(!state.is_complete());
    }

    #[test]
    fn bump_saturates() {
        let mut state = SequenceState {
            progress: u32::MAX,
            ticks: 0,
            completed: false,
        };
        state.bump();
        assert_eq!(state.progress(), u32::MAX);
    }
}
