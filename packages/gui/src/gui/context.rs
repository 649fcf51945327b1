//! State lent to widgets by whoever drives the GUI.

use crate::{
    settings::GuiSettings,
    session::SessionState,
    sound::{SoundSink, UiSound},
};
use graphics::{
    FontMetrics,
    FontId,
};
use std::{
    cell::{RefCell, Ref, RefMut},
    time::Duration,
};


/// State maintained by the host between GUI events that is the same for
/// every widget in the tree.
#[derive(Copy, Clone)]
pub struct GuiGlobalContext<'c> {
    /// Time since some fixed epoch. Monotonically increasing. Drives hover
    /// delays and marquee text.
    pub time: Duration,
    /// Text measurement, the same the draw surface uses.
    pub fonts: &'c dyn FontMetrics,
    /// Font widgets draw their text in.
    pub font: FontId,
    /// Used to play interface sounds.
    pub sound: &'c dyn SoundSink,
    /// Current GUI settings.
    pub settings: &'c RefCell<GuiSettings>,
    /// Account-session flags shared between screens.
    pub session: &'c RefCell<SessionState>,
    /// Queue of side effects to be executed by the host once the current
    /// event has been dispatched.
    pub effects: &'c RefCell<GuiEffectQueue>,
}

impl<'c> GuiGlobalContext<'c> {
    pub fn play_sound(&self, sound: UiSound) {
        self.sound.play(sound);
    }

    pub fn settings(&self) -> Ref<'c, GuiSettings> {
        self.settings.borrow()
    }

    pub fn session(&self) -> Ref<'c, SessionState> {
        self.session.borrow()
    }

    pub fn session_mut(&self) -> RefMut<'c, SessionState> {
        self.session.borrow_mut()
    }

    /// Seconds since the epoch, for animations.
    pub fn time_secs(&self) -> f64 {
        self.time.as_secs_f64()
    }

    pub fn close_screen(&self) {
        self.effects.borrow_mut().push(GuiEffect::CloseScreen);
    }

    /// Ask the host to persist the current settings.
    pub fn save_settings(&self) {
        self.effects.borrow_mut().push(GuiEffect::SaveSettings);
    }

    /// Hand an application-defined command to the host.
    pub fn send_command<S: Into<String>>(&self, command: S) {
        self.effects.borrow_mut().push(GuiEffect::Command(command.into()));
    }
}


/// Side effect requested by a widget, executed by the host after dispatch
/// returns so that widgets never reach outside the tree themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuiEffect {
    CloseScreen,
    SaveSettings,
    Command(String),
}

#[derive(Debug, Clone, Default)]
pub struct GuiEffectQueue(Vec<GuiEffect>);

impl GuiEffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: GuiEffect) {
        trace!(?effect, "gui effect queued");
        self.0.push(effect);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take all queued effects, in the order they were queued.
    pub fn drain(&mut self) -> Vec<GuiEffect> {
        std::mem::take(&mut self.0)
    }
}


/// Owns everything a `GuiGlobalContext` borrows, for hosts and tests that
/// don't have anything better.
pub struct GuiHostState<F, S> {
    pub fonts: F,
    pub sound: S,
    pub settings: RefCell<GuiSettings>,
    pub session: RefCell<SessionState>,
    pub effects: RefCell<GuiEffectQueue>,
}

impl<F: FontMetrics, S: SoundSink> GuiHostState<F, S> {
    pub fn new(fonts: F, sound: S, settings: GuiSettings) -> Self {
        GuiHostState {
            fonts,
            sound,
            settings: RefCell::new(settings),
            session: RefCell::new(SessionState::default()),
            effects: RefCell::new(GuiEffectQueue::new()),
        }
    }

    pub fn context(&self, time: Duration) -> GuiGlobalContext {
        GuiGlobalContext {
            time,
            fonts: &self.fonts,
            font: FontId::DEFAULT,
            sound: &self.sound,
            settings: &self.settings,
            session: &self.session,
            effects: &self.effects,
        }
    }
}


#[test]
fn test_effects_drain_in_order() {
    use crate::sound::NullSound;
    use graphics::FixedWidthFont;

    let host = GuiHostState::new(FixedWidthFont::default(), NullSound, GuiSettings::default());
    let ctx = host.context(Duration::ZERO);
    ctx.send_command("refresh");
    ctx.close_screen();
    assert_eq!(host.effects.borrow_mut().drain(), vec![
        GuiEffect::Command("refresh".to_owned()),
        GuiEffect::CloseScreen,
    ]);
    assert!(host.effects.borrow().is_empty());
}
