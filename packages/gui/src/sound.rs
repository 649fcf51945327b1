//! Boundary to whatever plays interface sounds.

use std::cell::RefCell;


/// Interface sound cues.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UiSound {
    /// A button or checkbox was activated.
    ButtonClick,
}

/// Something which can play interface sounds. Playing is fire and forget.
pub trait SoundSink {
    fn play(&self, sound: UiSound);
}

/// Plays nothing.
#[derive(Debug, Copy, Clone, Default)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn play(&self, _sound: UiSound) {}
}

/// Plays nothing but remembers what it was asked to play.
#[derive(Debug, Default)]
pub struct RecordingSound(RefCell<Vec<UiSound>>);

impl RecordingSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<UiSound> {
        self.0.borrow().clone()
    }

    pub fn count(&self, sound: UiSound) -> usize {
        self.0.borrow().iter().filter(|&&s| s == sound).count()
    }
}

impl SoundSink for RecordingSound {
    fn play(&self, sound: UiSound) {
        trace!(?sound, "play sound");
        self.0.borrow_mut().push(sound);
    }
}
