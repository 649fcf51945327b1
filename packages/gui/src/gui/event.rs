//! Types which may exist transiently to convey GUI events.
//!
//! Positions are always in logical GUI pixels, already divided by the GUI
//! scale by whoever feeds events in.

use crate::gui::focus::{
    FocusNavigation,
    ScreenDirection,
};
use vek::*;


pub use winit::{
    event::MouseButton,
    keyboard::{
        KeyCode,
        ModifiersState,
    },
};


/// Amount of scrolling.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ScrolledAmount {
    Pixels(Vec2<f32>),
    Lines(Vec2<f32>),
}

impl ScrolledAmount {
    /// Convert to pixels, using the given line-to-pixel conversion if is
    /// `Lines`.
    pub fn to_pixels(self, line_size: impl Into<Extent2<f32>>) -> Vec2<f32> {
        match self {
            ScrolledAmount::Pixels(v) => v,
            ScrolledAmount::Lines(l) => l * Vec2::from(line_size.into()),
        }
    }
}


/// A key press.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    /// Platform scan code, for hosts which have one. Zero otherwise.
    pub scan_code: u32,
    pub modifiers: ModifiersState,
}

impl KeyEvent {
    /// A press with no modifiers held.
    pub fn new(key: KeyCode) -> Self {
        KeyEvent {
            key,
            scan_code: 0,
            modifiers: ModifiersState::empty(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifiersState) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn shift(&self) -> bool {
        self.modifiers.shift_key()
    }

    /// Whether this key activates a focused button.
    pub fn is_activate(&self) -> bool {
        matches!(self.key, KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space)
    }

    /// The focus movement this key asks for, if any.
    pub fn focus_navigation(&self) -> Option<FocusNavigation> {
        Some(match self.key {
            KeyCode::Tab => FocusNavigation::Tab { forward: !self.shift() },
            KeyCode::ArrowUp => FocusNavigation::Arrow(ScreenDirection::Up),
            KeyCode::ArrowDown => FocusNavigation::Arrow(ScreenDirection::Down),
            KeyCode::ArrowLeft => FocusNavigation::Arrow(ScreenDirection::Left),
            KeyCode::ArrowRight => FocusNavigation::Arrow(ScreenDirection::Right),
            _ => return None,
        })
    }
}


#[test]
fn test_key_navigation_mapping() {
    assert_eq!(
        KeyEvent::new(KeyCode::Tab).focus_navigation(),
        Some(FocusNavigation::Tab { forward: true }),
    );
    assert_eq!(
        KeyEvent::new(KeyCode::Tab).with_modifiers(ModifiersState::SHIFT).focus_navigation(),
        Some(FocusNavigation::Tab { forward: false }),
    );
    assert_eq!(
        KeyEvent::new(KeyCode::ArrowLeft).focus_navigation(),
        Some(FocusNavigation::Arrow(ScreenDirection::Left)),
    );
    assert_eq!(KeyEvent::new(KeyCode::KeyA).focus_navigation(), None);
}

#[test]
fn test_scrolled_lines_to_pixels() {
    let amount = ScrolledAmount::Lines(Vec2::new(0.0, 2.0));
    assert_eq!(amount.to_pixels([10.0, 10.0]), Vec2::new(0.0, 20.0));
    let amount = ScrolledAmount::Pixels(Vec2::new(0.0, -3.0));
    assert_eq!(amount.to_pixels([10.0, 10.0]), Vec2::new(0.0, -3.0));
}
