//! Static text.

use crate::gui::{
    context::GuiGlobalContext,
    layout::Align,
    narration::{
        NarratedElementType,
        NarrationOutput,
    },
    widget::{
        Widget,
        WidgetBase,
    },
};
use graphics::{
    DrawSurface,
    ScreenRect,
    hex_color,
};
use vek::*;


/// Text which can't be focused or clicked. Wraps to its width if it's
/// multi-line.
pub struct Label {
    base: WidgetBase,
    color: Rgba<f32>,
    align: Align,
    shadow: bool,
    wrap: bool,
}

impl Label {
    pub fn new<S: Into<String>>(text: S, rect: ScreenRect) -> Self {
        Label {
            base: WidgetBase::new(rect, text),
            color: hex_color(0xFFFFFFFF),
            align: Align::Center,
            shadow: true,
            wrap: false,
        }
    }

    pub fn with_color(mut self, color: Rgba<f32>) -> Self {
        self.color = color;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }

    pub fn without_shadow(mut self) -> Self {
        self.shadow = false;
        self
    }

    pub fn text(&self) -> &str {
        &self.base.message
    }

    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.base.message = text.into();
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn is_focusable(&self) -> bool {
        false
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
        let mut color = self.color;
        color.a *= self.base.alpha;
        let line_height = ctx.fonts.line_height(ctx.font);
        let lines = if self.wrap {
            ctx.fonts.split_lines(ctx.font, &self.base.message, rect.w)
        } else {
            vec![self.base.message.clone()]
        };
        for (i, line) in lines.iter().enumerate() {
            let w = ctx.fonts.width(ctx.font, line);
            let x = rect.x + self.align.offset(rect.w, w);
            let y = rect.y + i as i32 * line_height;
            surface.draw_text(ctx.font, line, [x, y], color, self.shadow);
        }
    }

    fn update_narration(&self, out: &mut NarrationOutput) {
        out.add(NarratedElementType::Title, self.base.title().to_owned());
    }
}


#[test]
fn test_label_takes_no_focus() {
    use crate::gui::focus::FocusNavigation;

    let label = Label::new("Realms", ScreenRect::new(0, 0, 100, 9));
    assert!(label.next_focus_path(FocusNavigation::Tab { forward: true }).is_none());
}
