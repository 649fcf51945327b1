//! Horizontal slider over `0.0..=1.0`.

use crate::gui::{
    context::GuiGlobalContext,
    event::{
        MouseButton,
        KeyCode,
        KeyEvent,
    },
    narration::NarrationOutput,
    widget::{
        Widget,
        WidgetBase,
    },
    sprites,
    widgets::{
        ChangeHandler,
        button::Button,
    },
};
use graphics::{
    DrawSurface,
    ScreenRect,
};
use vek::*;


pub const HANDLE_WIDTH: i32 = 8;

/// Value change per arrow key press.
pub const DEFAULT_STEP: f64 = 0.05;


/// Maps a slider value to the text drawn on it.
pub type SliderMessage = Box<dyn Fn(f64) -> String>;

pub struct Slider {
    base: WidgetBase,
    value: f64,
    step: f64,
    message: SliderMessage,
    on_change: Option<ChangeHandler<f64>>,
}

impl Slider {
    pub fn new<F>(rect: ScreenRect, value: f64, message: F) -> Self
    where
        F: Fn(f64) -> String + 'static,
    {
        let value = clamp_value(value);
        Slider {
            base: WidgetBase::new(rect, message(value)),
            value,
            step: DEFAULT_STEP,
            message: Box::new(message),
            on_change: None,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&GuiGlobalContext, f64) + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set without running the change handler.
    pub fn set_value(&mut self, value: f64) {
        self.value = clamp_value(value);
        self.base.message = (self.message)(self.value);
    }

    fn change(&mut self, ctx: &GuiGlobalContext, value: f64) {
        let old = self.value;
        self.set_value(value);
        if self.value != old {
            if let Some(ref mut on_change) = self.on_change {
                on_change(ctx, self.value);
            }
        }
    }

    fn value_at(&self, x: f32) -> f64 {
        let rect = self.base.rect;
        let track = (rect.w - HANDLE_WIDTH).max(1) as f64;
        (x as f64 - (rect.x + HANDLE_WIDTH / 2) as f64) / track
    }

    fn handle_rect(&self) -> ScreenRect {
        let rect = self.base.rect;
        let x = rect.x + (self.value * (rect.w - HANDLE_WIDTH) as f64) as i32;
        ScreenRect::new(x, rect.y, HANDLE_WIDTH, rect.h)
    }
}

fn clamp_value(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl Widget for Slider {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        mouse: Vec2<f32>,
        _delta: f32,
    ) {
        if !self.base.begin_render(ctx, surface, mouse) {
            return;
        }
        let tint = Rgba::new(1.0, 1.0, 1.0, self.base.alpha);
        surface.blit_sprite_tinted(&sprites::sprite(sprites::SLIDER), self.base.rect, 0, tint);
        let handle = if self.base.hovered || self.base.focused {
            sprites::SLIDER_HANDLE_HIGHLIGHTED
        } else {
            sprites::SLIDER_HANDLE
        };
        surface.blit_sprite_tinted(&sprites::sprite(handle), self.handle_rect(), 0, tint);
        let text_rect = self.base.rect.inflate(-2);
        Button::render_label(&self.base, ctx, surface, &self.base.message, text_rect);
    }

    fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        if button == MouseButton::Left && self.base.hit(pos) {
            let value = self.value_at(pos.x);
            self.change(ctx, value);
            true
        } else {
            false
        }
    }

    fn mouse_dragged(
        &mut self,
        ctx: &GuiGlobalContext,
        pos: Vec2<f32>,
        button: MouseButton,
        _delta: Vec2<f32>,
    ) -> bool {
        if button == MouseButton::Left && self.base.accepts_input() {
            let value = self.value_at(pos.x);
            self.change(ctx, value);
            true
        } else {
            false
        }
    }

    fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        if !self.base.accepts_input() || !self.base.focused {
            return false;
        }
        let step = match key.key {
            KeyCode::ArrowLeft => -self.step,
            KeyCode::ArrowRight => self.step,
            _ => return false,
        };
        let value = self.value + step;
        self.change(ctx, value);
        true
    }

    fn update_narration(&self, out: &mut NarrationOutput) {
        self.base.narrate_title(out, "Slider");
        self.base.narrate_usage(
            out,
            "Use left and right arrow keys to change value",
            "Left click and drag to change value",
        );
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::gui::testing::TestHost;

    fn volume() -> Slider {
        Slider::new(ScreenRect::new(0, 0, 108, 20), 0.5, |v| format!("Volume: {}%", (v * 100.0).round()))
    }

    #[test]
    fn test_click_and_drag_set_value() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut slider = volume();
        assert_eq!(slider.base().message, "Volume: 50%");
        assert!(slider.mouse_clicked(&ctx, Vec2::new(4.0, 10.0), MouseButton::Left));
        assert_eq!(slider.value(), 0.0);
        assert!(slider.mouse_dragged(&ctx, Vec2::new(500.0, 10.0), MouseButton::Left, Vec2::new(496.0, 0.0)));
        assert_eq!(slider.value(), 1.0);
        assert_eq!(slider.base().message, "Volume: 100%");
    }

    #[test]
    fn test_arrows_step_when_focused() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut slider = volume().with_step(0.25);
        assert!(!slider.key_pressed(&ctx, KeyEvent::new(KeyCode::ArrowLeft)));
        slider.set_focused(true);
        assert!(slider.key_pressed(&ctx, KeyEvent::new(KeyCode::ArrowLeft)));
        assert_eq!(slider.value(), 0.25);
        assert!(!slider.key_pressed(&ctx, KeyEvent::new(KeyCode::ArrowUp)));
        for _ in 0..10 {
            slider.key_pressed(&ctx, KeyEvent::new(KeyCode::ArrowRight));
        }
        assert_eq!(slider.value(), 1.0);
    }
}
