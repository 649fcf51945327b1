//! Concrete widgets.

pub mod button;
pub mod sprite_icon_button;
pub mod checkbox;
pub mod label;
pub mod edit_box;
pub mod slider;

pub use self::{
    button::Button,
    sprite_icon_button::SpriteIconButton,
    checkbox::Checkbox,
    label::Label,
    edit_box::EditBox,
    slider::Slider,
};

use crate::gui::context::GuiGlobalContext;
use graphics::hex_color;
use vek::*;


/// Called when a button is pressed.
pub type PressHandler = Box<dyn FnMut(&GuiGlobalContext)>;

/// Called with a widget's new value when the user changes it.
pub type ChangeHandler<T> = Box<dyn FnMut(&GuiGlobalContext, T)>;

/// Label color, by whether the widget is active.
pub fn text_color(active: bool, alpha: f32) -> Rgba<f32> {
    let mut color = if active {
        hex_color(0xFFFFFFFF)
    } else {
        hex_color(0xA0A0A0FF)
    };
    color.a *= alpha;
    color
}
