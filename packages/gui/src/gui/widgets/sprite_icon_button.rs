//! Button showing an icon, with or without its label beside it.

use crate::gui::{
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
    widgets::button::Button,
};
use graphics::{
    DrawSurface,
    ScreenRect,
    SpriteId,
};
use vek::*;


pub struct SpriteIconButton {
    button: Button,
    icon: SpriteId,
    icon_size: Extent2<i32>,
    show_label: bool,
}

impl SpriteIconButton {
    /// Icon-only button. The label is still narrated.
    pub fn icon_only<S, F>(message: S, rect: ScreenRect, icon: SpriteId, icon_size: Extent2<i32>, on_press: F) -> Self
    where
        S: Into<String>,
        F: FnMut(&GuiGlobalContext) + 'static,
    {
        SpriteIconButton {
            button: Button::new(message, rect, on_press),
            icon,
            icon_size,
            show_label: false,
        }
    }

    /// Icon followed by the label, centered together.
    pub fn with_label<S, F>(message: S, rect: ScreenRect, icon: SpriteId, icon_size: Extent2<i32>, on_press: F) -> Self
    where
        S: Into<String>,
        F: FnMut(&GuiGlobalContext) + 'static,
    {
        SpriteIconButton {
            show_label: true,
            ..Self::icon_only(message, rect, icon, icon_size, on_press)
        }
    }

    pub fn with_tooltip<S: Into<String>>(mut self, tooltip: S) -> Self {
        self.button = self.button.with_tooltip(tooltip);
        self
    }

    pub fn icon(&self) -> &SpriteId {
        &self.icon
    }

    pub fn set_icon(&mut self, icon: SpriteId) {
        self.icon = icon;
    }

    pub fn press(&mut self, ctx: &GuiGlobalContext) {
        self.button.press(ctx);
    }
}

impl Widget for SpriteIconButton {
    fn base(&self) -> &WidgetBase {
        self.button.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.button.base_mut()
    }

    fn render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        mouse: Vec2<f32>,
        _delta: f32,
    ) {
        let base = self.button.base_mut();
        if !base.begin_render(ctx, surface, mouse) {
            return;
        }
        let base = self.button.base();
        Button::render_background(base, surface);
        let rect = base.rect;
        let tint = Rgba::new(1.0, 1.0, 1.0, base.alpha);
        if self.show_label {
            let text_w = ctx.fonts.width(ctx.font, &base.message);
            let gap = 2;
            let group_w = (self.icon_size.w + gap + text_w).min(rect.w - 4);
            let x = rect.center().x - group_w / 2;
            let y = rect.center().y - self.icon_size.h / 2;
            surface.blit_sprite_tinted(&self.icon, ScreenRect::from_pos_size([x, y], self.icon_size), 0, tint);
            let text_x = x + self.icon_size.w + gap;
            let text_rect = ScreenRect::new(text_x, rect.y, (rect.right() - 2 - text_x).max(0), rect.h);
            Button::render_label(base, ctx, surface, &base.message, text_rect);
        } else {
            let icon_rect = ScreenRect::from_pos_size(
                rect.center() - Vec2::new(self.icon_size.w / 2, self.icon_size.h / 2),
                self.icon_size,
            );
            surface.blit_sprite_tinted(&self.icon, icon_rect, 0, tint);
        }
    }

    fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        self.button.mouse_clicked(ctx, pos, button)
    }

    fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        self.button.key_pressed(ctx, key)
    }

    fn update_narration(&self, out: &mut NarrationOutput) {
        self.button.update_narration(out);
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::gui::{
        sprites,
        testing::TestHost,
    };

    #[test]
    fn test_icon_only_draws_no_text() {
        let mut host = TestHost::new();
        let mut button = SpriteIconButton::icon_only(
            "Settings",
            ScreenRect::new(0, 0, 20, 20),
            sprites::sprite(sprites::CHECKBOX),
            Extent2::new(16, 16),
            |_| (),
        );
        host.render(&mut button, Vec2::zero());
        assert!(host.backend.texts().is_empty());
        let mut out = NarrationOutput::new();
        button.set_focused(true);
        button.update_narration(&mut out);
        assert_eq!(out.render()[0], "Button: Settings");

        let ctx = host.ctx();
        assert!(button.mouse_clicked(&ctx, Vec2::new(5.0, 5.0), MouseButton::Left));
    }
}
