//! Push button.

use crate::{
    session::SessionState,
    sound::UiSound,
    gui::{
        context::GuiGlobalContext,
        event::{
            MouseButton,
            KeyEvent,
        },
        narration::NarrationOutput,
        widget::{
            Widget,
            WidgetBase,
        },
        sprites,
        widgets::{
            PressHandler,
            text_color,
        },
    },
};
use graphics::{
    DrawSurface,
    ScreenRect,
    hex_color,
};
use vek::*;


pub const DEFAULT_WIDTH: i32 = 150;
pub const DEFAULT_HEIGHT: i32 = 20;

const BADGE_SIZE: i32 = 4;


/// Nine-slice button with a text label. Activated by a left click, or by
/// Enter or Space while focused.
pub struct Button {
    base: WidgetBase,
    on_press: PressHandler,
    badge: Option<Box<dyn Fn(&SessionState) -> bool>>,
}

impl Button {
    pub fn new<S, F>(message: S, rect: ScreenRect, on_press: F) -> Self
    where
        S: Into<String>,
        F: FnMut(&GuiGlobalContext) + 'static,
    {
        Button {
            base: WidgetBase::new(rect, message),
            on_press: Box::new(on_press),
            badge: None,
        }
    }

    /// Button of the default size at the origin, for layouts to place.
    pub fn sized_default<S, F>(message: S, on_press: F) -> Self
    where
        S: Into<String>,
        F: FnMut(&GuiGlobalContext) + 'static,
    {
        Self::new(message, ScreenRect::new(0, 0, DEFAULT_WIDTH, DEFAULT_HEIGHT), on_press)
    }

    pub fn with_tooltip<S: Into<String>>(mut self, tooltip: S) -> Self {
        self.base.tooltip = Some(tooltip.into());
        self
    }

    /// Draw a small badge in the top right corner while `show` holds for the
    /// session.
    pub fn with_attention_badge<F>(mut self, show: F) -> Self
    where
        F: Fn(&SessionState) -> bool + 'static,
    {
        self.badge = Some(Box::new(show));
        self
    }

    pub fn badge_rect(&self) -> ScreenRect {
        let rect = self.base.rect;
        ScreenRect::new(rect.right() - BADGE_SIZE - 2, rect.y + 2, BADGE_SIZE, BADGE_SIZE)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.base.active = active;
        self
    }

    pub fn message(&self) -> &str {
        &self.base.message
    }

    pub fn set_message<S: Into<String>>(&mut self, message: S) {
        self.base.message = message.into();
    }

    /// Play the click sound and run the handler.
    pub fn press(&mut self, ctx: &GuiGlobalContext) {
        trace!(message=%self.base.message, "button pressed");
        ctx.play_sound(UiSound::ButtonClick);
        (self.on_press)(ctx);
    }

    /// The background sprite for the button's state.
    pub(crate) fn background_sprite(base: &WidgetBase) -> &'static str {
        if !base.active {
            sprites::BUTTON_DISABLED
        } else if base.hovered || base.focused {
            sprites::BUTTON_HIGHLIGHTED
        } else {
            sprites::BUTTON
        }
    }

    pub(crate) fn render_background(base: &WidgetBase, surface: &mut DrawSurface) {
        let tint = Rgba::new(1.0, 1.0, 1.0, base.alpha);
        surface.blit_sprite_tinted(&sprites::sprite(Self::background_sprite(base)), base.rect, 0, tint);
    }

    /// Draw `text` within `rect`, scrolling it if it doesn't fit and the
    /// settings allow, cutting it off otherwise.
    pub(crate) fn render_label(
        base: &WidgetBase,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        text: &str,
        rect: ScreenRect,
    ) {
        let color = text_color(base.active, base.alpha);
        if ctx.settings().marquee_text {
            surface.draw_scrolling_text(ctx.font, text, rect, color, ctx.time_secs());
        } else {
            let text = ctx.fonts.truncate_to_width(ctx.font, text, rect.w);
            let y = (rect.top() + rect.bottom() - ctx.fonts.line_height(ctx.font)) / 2 + 1;
            surface.draw_centered_text(ctx.font, &text, rect.center().x, y, color);
        }
    }
}

impl Widget for Button {
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
        Self::render_background(&self.base, surface);
        let text_rect = self.base.rect.inflate(-2);
        Self::render_label(&self.base, ctx, surface, &self.base.message, text_rect);
        if self.badge.as_ref().map_or(false, |show| show(&ctx.session())) {
            surface.fill(self.badge_rect(), hex_color(0xFFE040FF));
        }
    }

    fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        if button == MouseButton::Left && self.base.hit(pos) {
            self.press(ctx);
            true
        } else {
            false
        }
    }

    fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        if self.base.accepts_input() && self.base.focused && key.is_activate() {
            self.press(ctx);
            true
        } else {
            false
        }
    }

    fn update_narration(&self, out: &mut NarrationOutput) {
        self.base.narrate_title(out, "Button");
        self.base.narrate_usage(out, "Press Enter to activate", "Left click to activate");
    }
}
