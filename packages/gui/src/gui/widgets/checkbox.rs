//! Two-state checkbox with a label to its right.

use crate::{
    sound::UiSound,
    gui::{
        context::GuiGlobalContext,
        event::{
            MouseButton,
            KeyEvent,
        },
        narration::{
            NarratedElementType,
            NarrationOutput,
        },
        widget::{
            Widget,
            WidgetBase,
        },
        sprites,
        widgets::{
            ChangeHandler,
            text_color,
        },
    },
};
use graphics::{
    DrawSurface,
    ScreenRect,
};
use vek::*;


pub const BOX_SIZE: i32 = 20;

pub struct Checkbox {
    base: WidgetBase,
    checked: bool,
    on_change: Option<ChangeHandler<bool>>,
}

impl Checkbox {
    pub fn new<S: Into<String>>(message: S, pos: Vec2<i32>, width: i32, checked: bool) -> Self {
        Checkbox {
            base: WidgetBase::new(ScreenRect::new(pos.x, pos.y, width.max(BOX_SIZE), BOX_SIZE), message),
            checked,
            on_change: None,
        }
    }

    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&GuiGlobalContext, bool) + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set without running the change handler.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    fn toggle(&mut self, ctx: &GuiGlobalContext) {
        self.checked = !self.checked;
        ctx.play_sound(UiSound::ButtonClick);
        if let Some(ref mut on_change) = self.on_change {
            on_change(ctx, self.checked);
        }
    }
}

impl Widget for Checkbox {
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
        let rect = self.base.rect;
        let sprite = if self.checked {
            sprites::CHECKBOX_SELECTED
        } else {
            sprites::CHECKBOX
        };
        let box_rect = ScreenRect::new(rect.x, rect.y, BOX_SIZE, BOX_SIZE);
        let tint = if self.base.active {
            Rgba::new(1.0, 1.0, 1.0, self.base.alpha)
        } else {
            Rgba::new(0.6, 0.6, 0.6, self.base.alpha)
        };
        surface.blit_sprite_tinted(&sprites::sprite(sprite), box_rect, 0, tint);
        if self.base.hovered || self.base.focused {
            surface.outline(box_rect, text_color(true, self.base.alpha));
        }
        let y = rect.y + (BOX_SIZE - ctx.fonts.line_height(ctx.font)) / 2 + 1;
        let color = text_color(self.base.active, self.base.alpha);
        surface.draw_text(ctx.font, &self.base.message, [rect.x + BOX_SIZE + 4, y], color, true);
    }

    fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        if button == MouseButton::Left && self.base.hit(pos) {
            self.toggle(ctx);
            true
        } else {
            false
        }
    }

    fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        if self.base.accepts_input() && self.base.focused && key.is_activate() {
            self.toggle(ctx);
            true
        } else {
            false
        }
    }

    fn update_narration(&self, out: &mut NarrationOutput) {
        self.base.narrate_title(out, "Checkbox");
        out.add(NarratedElementType::Title, if self.checked { "Checked" } else { "Not checked" });
        self.base.narrate_usage(out, "Press Enter to toggle", "Left click to toggle");
    }
}


#[test]
fn test_toggle_reports_change() {
    use crate::gui::testing::TestHost;
    use std::{cell::RefCell, rc::Rc};

    let host = TestHost::new();
    let ctx = host.ctx();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let mut checkbox = Checkbox::new("Show hints", Vec2::new(0, 0), 120, false)
        .on_change(move |_, checked| s.borrow_mut().push(checked));
    assert!(checkbox.mouse_clicked(&ctx, Vec2::new(60.0, 10.0), MouseButton::Left));
    checkbox.set_focused(true);
    assert!(checkbox.key_pressed(&ctx, KeyEvent::new(crate::gui::event::KeyCode::Enter)));
    assert_eq!(*seen.borrow(), vec![true, false]);
    assert!(!checkbox.is_checked());
    assert_eq!(host.host.sound.count(UiSound::ButtonClick), 2);
}
