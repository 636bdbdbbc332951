//! # Headless Display
//!
//! Records every [`Display`] call so a run can be inspected afterwards. Used
//! by the CLI and by tests.

use serde::{Deserialize, Serialize};

use super::{
    BackgroundConfig, Display, DisplayControl, FadeRequest, PaletteFade, SceneAsset,
    SerialHandler, SoundMode, VBlankHandler,
};

/// One recorded call on a [`HeadlessDisplay`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayEvent {
    ResetVideo,
    LoadGraphics(SceneAsset),
    SetBackground(BackgroundConfig),
    DisplayControl(DisplayControl),
    BeginFade(FadeRequest),
    /// Coefficient after the step and whether the fade is still running.
    FadeStep { coeff: u8, active: bool },
    VBlankHandler(Option<VBlankHandler>),
    SerialHandler(Option<SerialHandler>),
    SoundMode(SoundMode),
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessDisplay {
    events: Vec<DisplayEvent>,
    fade: PaletteFade,
    control: Option<DisplayControl>,
    vblank: Option<VBlankHandler>,
    serial: Option<SerialHandler>,
    sound: Option<SoundMode>,
}

impl HeadlessDisplay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[DisplayEvent] {
        &self.events
    }

    /// Drain the event log.
    pub fn take_events(&mut self) -> Vec<DisplayEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&DisplayEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    #[must_use]
    pub fn fade(&self) -> &PaletteFade {
        &self.fade
    }

    #[must_use]
    pub fn display_control(&self) -> Option<DisplayControl> {
        self.control
    }

    #[must_use]
    pub fn vblank_handler(&self) -> Option<VBlankHandler> {
        self.vblank
    }

    #[must_use]
    pub fn serial_handler(&self) -> Option<SerialHandler> {
        self.serial
    }

    /// Last mode set, `None` if never set.
    #[must_use]
    pub fn sound_mode(&self) -> Option<SoundMode> {
        self.sound
    }
}

impl Display for HeadlessDisplay {
    fn reset_video(&mut self) {
        self.fade = PaletteFade::new();
        self.control = Some(DisplayControl::OFF);
        self.events.push(DisplayEvent::ResetVideo);
    }

    fn load_graphics(&mut self, asset: SceneAsset) {
        self.events.push(DisplayEvent::LoadGraphics(asset));
    }

    fn set_background(&mut self, config: BackgroundConfig) {
        self.events.push(DisplayEvent::SetBackground(config));
    }

    fn write_display_control(&mut self, control: DisplayControl) {
        self.control = Some(control);
        self.events.push(DisplayEvent::DisplayControl(control));
    }

    fn begin_fade(&mut self, request: FadeRequest) {
        self.fade.begin(request);
        self.events.push(DisplayEvent::BeginFade(request));
    }

    fn update_fade(&mut self) -> bool {
        let active = self.fade.update();
        self.events.push(DisplayEvent::FadeStep {
            coeff: self.fade.coefficient(),
            active,
        });
        active
    }

    fn set_vblank_handler(&mut self, handler: Option<VBlankHandler>) {
        self.vblank = handler;
        self.events.push(DisplayEvent::VBlankHandler(handler));
    }

    fn set_serial_handler(&mut self, handler: Option<SerialHandler>) {
        self.serial = handler;
        self.events.push(DisplayEvent::SerialHandler(handler));
    }

    fn set_sound_mode(&mut self, mode: SoundMode) {
        self.sound = Some(mode);
        self.events.push(DisplayEvent::SoundMode(mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Rgb555;

    #[test]
    fn records_calls_in_order() {
        let mut display = HeadlessDisplay::new();
        display.reset_video();
        display.load_graphics(SceneAsset::Copyright);
        display.write_display_control(DisplayControl::INTRO);

        assert_eq!(
            display.events(),
            &[
                DisplayEvent::ResetVideo,
                DisplayEvent::LoadGraphics(SceneAsset::Copyright),
                DisplayEvent::DisplayControl(DisplayControl::INTRO),
            ]
        );
        assert_eq!(display.display_control(), Some(DisplayControl::INTRO));
    }

    #[test]
    fn update_fade_records_step() {
        let mut display = HeadlessDisplay::new();
        display.begin_fade(FadeRequest::fade_in_from(Rgb555::BLACK));
        assert!(display.update_fade());
        assert_eq!(
            display.events().last(),
            Some(&DisplayEvent::FadeStep {
                coeff: 14,
                active: true
            })
        );
    }

    #[test]
    fn take_events_drains() {
        let mut display = HeadlessDisplay::new();
        display.set_serial_handler(Some(SerialHandler::Link));
        assert_eq!(display.take_events().len(), 1);
        assert!(display.events().is_empty());
        assert_eq!(display.serial_handler(), Some(SerialHandler::Link));
    }
}
