//! Single-line text input.

use crate::gui::{
    context::GuiGlobalContext,
    event::{
        MouseButton,
        KeyCode,
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
    widgets::ChangeHandler,
};
use graphics::{
    DrawSurface,
    ScreenRect,
    hex_color,
};
use vek::*;


pub const DEFAULT_MAX_LENGTH: usize = 32;

/// Inset of the text from the edge of the box.
const TEXT_INSET: i32 = 4;


pub struct EditBox {
    base: WidgetBase,
    value: String,
    // in chars, not bytes
    cursor: usize,
    max_length: usize,
    filter: Box<dyn Fn(char) -> bool>,
    hint: Option<String>,
    on_change: Option<ChangeHandler<String>>,
}

impl EditBox {
    /// `message` is what the box is for. It's narrated, not drawn.
    pub fn new<S: Into<String>>(message: S, rect: ScreenRect) -> Self {
        EditBox {
            base: WidgetBase::new(rect, message),
            value: String::new(),
            cursor: 0,
            max_length: DEFAULT_MAX_LENGTH,
            filter: Box::new(|_| true),
            hint: None,
            on_change: None,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self.truncate();
        self
    }

    /// Only accept typed characters `filter` accepts.
    pub fn with_filter<F: Fn(char) -> bool + 'static>(mut self, filter: F) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Greyed out text shown while the box is empty.
    pub fn with_hint<S: Into<String>>(mut self, hint: S) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&GuiGlobalContext, String) + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value without running the change handler. The cursor
    /// moves to the end.
    pub fn set_value<S: Into<String>>(&mut self, value: S) {
        self.value = value.into();
        self.truncate();
        self.cursor = self.char_len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn truncate(&mut self) {
        if self.char_len() > self.max_length {
            self.value = self.value.chars().take(self.max_length).collect();
        }
        self.cursor = self.cursor.min(self.char_len());
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn changed(&mut self, ctx: &GuiGlobalContext) {
        if let Some(ref mut on_change) = self.on_change {
            on_change(ctx, self.value.clone());
        }
    }

    /// Whether keyboard input should go to this box.
    fn editing(&self) -> bool {
        self.base.accepts_input() && self.base.focused
    }

    fn insert(&mut self, ctx: &GuiGlobalContext, c: char) -> bool {
        if self.char_len() >= self.max_length {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        self.changed(ctx);
        true
    }

    fn delete(&mut self, ctx: &GuiGlobalContext, forward: bool) -> bool {
        let index = if forward {
            self.cursor
        } else if self.cursor > 0 {
            self.cursor - 1
        } else {
            return false;
        };
        if index >= self.char_len() {
            return false;
        }
        let at = self.byte_index(index);
        self.value.remove(at);
        self.cursor = index;
        self.changed(ctx);
        true
    }

    /// Char index nearest to a GUI-space x coordinate.
    fn cursor_at(&self, ctx: &GuiGlobalContext, x: f32) -> usize {
        let mut edge = (self.base.rect.x + TEXT_INSET) as f32;
        for (i, c) in self.value.chars().enumerate() {
            let w = ctx.fonts.char_width(ctx.font, c) as f32;
            if x < edge + w / 2.0 {
                return i;
            }
            edge += w;
        }
        self.char_len()
    }
}

impl Widget for EditBox {
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
        let sprite = if self.base.focused {
            sprites::TEXT_FIELD_HIGHLIGHTED
        } else {
            sprites::TEXT_FIELD
        };
        surface.blit_sprite(&sprites::sprite(sprite), rect);

        let inner = rect.inflate(-TEXT_INSET);
        let y = (rect.top() + rect.bottom() - ctx.fonts.line_height(ctx.font)) / 2;
        if self.value.is_empty() {
            if let Some(ref hint) = self.hint {
                if !self.base.focused {
                    surface.draw_text(ctx.font, hint, [inner.x, y], hex_color(0x707070FF), false);
                }
            }
        }

        // scroll the text so the cursor stays in view
        let before_cursor: String = self.value.chars().take(self.cursor).collect();
        let cursor_x = ctx.fonts.width(ctx.font, &before_cursor);
        let shift = (cursor_x - inner.w + 1).max(0);
        let color = if self.base.active {
            hex_color(0xE0E0E0FF)
        } else {
            hex_color(0x707070FF)
        };
        surface.enable_scissor(inner);
        surface.draw_text(ctx.font, &self.value, [inner.x - shift, y], color, true);
        let blink = (ctx.time.as_millis() / 300) % 2 == 0;
        if self.editing() && blink {
            let caret = ScreenRect::new(inner.x - shift + cursor_x, y - 1, 1, ctx.fonts.line_height(ctx.font) + 1);
            surface.fill(caret, hex_color(0xD0D0D0FF));
        }
        surface.disable_scissor();
    }

    fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        if button == MouseButton::Left && self.base.hit(pos) {
            self.cursor = self.cursor_at(ctx, pos.x);
            true
        } else {
            false
        }
    }

    fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        if !self.editing() {
            return false;
        }
        match key.key {
            KeyCode::Backspace => {
                self.delete(ctx, false);
                true
            }
            KeyCode::Delete => {
                self.delete(ctx, true);
                true
            }
            KeyCode::ArrowLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::ArrowRight => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                true
            }
            _ => false,
        }
    }

    fn char_typed(&mut self, ctx: &GuiGlobalContext, c: char) -> bool {
        if !self.editing() || c.is_control() || !(self.filter)(c) {
            return false;
        }
        self.insert(ctx, c)
    }

    fn update_narration(&self, out: &mut NarrationOutput) {
        self.base.narrate_title(out, "Edit box");
        if !self.value.is_empty() {
            out.add(NarratedElementType::Hint, self.value.clone());
        }
        self.base.narrate_usage(out, "Type to enter text", "Left click to edit");
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::gui::testing::TestHost;

    fn typed(edit: &mut EditBox, ctx: &GuiGlobalContext, s: &str) {
        for c in s.chars() {
            edit.char_typed(ctx, c);
        }
    }

    #[test]
    fn test_typing_needs_focus() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut edit = EditBox::new("World name", ScreenRect::new(0, 0, 200, 20));
        assert!(!edit.char_typed(&ctx, 'a'));
        edit.set_focused(true);
        typed(&mut edit, &ctx, "héllo");
        assert_eq!(edit.value(), "héllo");
        assert_eq!(edit.cursor(), 5);
    }

    #[test]
    fn test_cursor_editing() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut edit = EditBox::new("Seed", ScreenRect::new(0, 0, 200, 20));
        edit.set_focused(true);
        typed(&mut edit, &ctx, "ac");
        edit.key_pressed(&ctx, KeyEvent::new(KeyCode::ArrowLeft));
        typed(&mut edit, &ctx, "b");
        assert_eq!(edit.value(), "abc");
        edit.key_pressed(&ctx, KeyEvent::new(KeyCode::Home));
        edit.key_pressed(&ctx, KeyEvent::new(KeyCode::Delete));
        assert_eq!(edit.value(), "bc");
        edit.key_pressed(&ctx, KeyEvent::new(KeyCode::End));
        edit.key_pressed(&ctx, KeyEvent::new(KeyCode::Backspace));
        assert_eq!(edit.value(), "b");
        // navigation keys it doesn't use pass through
        assert!(!edit.key_pressed(&ctx, KeyEvent::new(KeyCode::ArrowDown)));
    }

    #[test]
    fn test_max_length_and_filter() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut edit = EditBox::new("Port", ScreenRect::new(0, 0, 200, 20))
            .with_max_length(5)
            .with_filter(|c| c.is_ascii_digit());
        edit.set_focused(true);
        typed(&mut edit, &ctx, "25a56\n57");
        assert_eq!(edit.value(), "25565");
        edit.set_value("1234567");
        assert_eq!(edit.value(), "12345");
    }

    #[test]
    fn test_click_places_cursor() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut edit = EditBox::new("Name", ScreenRect::new(0, 0, 200, 20));
        edit.set_value("abcd");
        // text starts at x 4 and chars are 6 wide
        assert!(edit.mouse_clicked(&ctx, Vec2::new(17.0, 10.0), MouseButton::Left));
        assert_eq!(edit.cursor(), 2);
        assert!(edit.mouse_clicked(&ctx, Vec2::new(150.0, 10.0), MouseButton::Left));
        assert_eq!(edit.cursor(), 4);
    }
}
