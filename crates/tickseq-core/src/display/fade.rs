//! Integer model of a whole-palette fade.

use serde::{Deserialize, Serialize};

use super::{FadeRequest, Rgb555};
use crate::primitives::{FADE_MAX_COEFF, FADE_STEP};

/// Blend coefficient moving from `start` to `target` by [`FADE_STEP`] every
/// `delay + 1` updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaletteFade {
    coeff: u8,
    target: u8,
    delay: u8,
    wait: u8,
    color: Rgb555,
    active: bool,
}

impl PaletteFade {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `request` from its `start` coefficient, replacing any running fade.
    pub fn begin(&mut self, request: FadeRequest) {
        let start = request.start.min(FADE_MAX_COEFF);
        let target = request.target.min(FADE_MAX_COEFF);
        *self = Self {
            coeff: start,
            target,
            delay: request.delay,
            wait: 0,
            color: request.color,
            active: start != target,
        };
    }

    /// Advance one update. Returns true while the fade is still in progress.
    pub fn update(&mut self) -> bool {
        if !self.active {
            return false;
        }

        if self.wait < self.delay {
            self.wait = self.wait.saturating_add(1);
            return true;
        }
        self.wait = 0;

        self.coeff = if self.coeff < self.target {
            self.coeff.saturating_add(FADE_STEP).min(self.target)
        } else {
            self.coeff.saturating_sub(FADE_STEP).max(self.target)
        };
        self.active = self.coeff != self.target;
        self.active
    }

    #[must_use]
    pub fn coefficient(&self) -> u8 {
        self.coeff
    }

    #[must_use]
    pub fn color(&self) -> Rgb555 {
        self.color
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updates_until_done(fade: &mut PaletteFade) -> usize {
        let mut n = 1;
        while fade.update() {
            n += 1;
        }
        n
    }

    #[test]
    fn idle_fade_reports_done() {
        let mut fade = PaletteFade::new();
        assert!(!fade.update());
    }

    #[test]
    fn full_fade_takes_range_over_step_updates() {
        let mut fade = PaletteFade::new();
        fade.begin(FadeRequest::fade_in_from(Rgb555::WHITE));
        assert!(fade.is_active());
        assert_eq!(updates_until_done(&mut fade), usize::from(FADE_MAX_COEFF / FADE_STEP));
        assert_eq!(fade.coefficient(), 0);
    }

    #[test]
    fn delay_stretches_fade() {
        let mut fade = PaletteFade::new();
        let mut request = FadeRequest::fade_out_to(Rgb555::BLACK);
        request.delay = 1;
        fade.begin(request);
        assert_eq!(
            updates_until_done(&mut fade),
            2 * usize::from(FADE_MAX_COEFF / FADE_STEP)
        );
        assert_eq!(fade.coefficient(), FADE_MAX_COEFF);
    }

    #[test]
    fn equal_endpoints_never_activate() {
        let mut fade = PaletteFade::new();
        fade.begin(FadeRequest {
            delay: 0,
            start: 4,
            target: 4,
            color: Rgb555::BLACK,
        });
        assert!(!fade.is_active());
        assert!(!fade.update());
    }
}
