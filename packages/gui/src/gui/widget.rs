//! The widget trait, and the state every widget carries.
//!
//! Widgets are positioned in absolute GUI-space coordinates, the same space
//! input events arrive in. A widget's `hovered` flag is derived afresh every
//! time it renders; `focused` is only ever changed through the focus
//! protocol in `focus`.

use crate::gui::{
    context::GuiGlobalContext,
    event::{
        MouseButton,
        KeyEvent,
        ScrolledAmount,
    },
    focus::{
        FocusPath,
        FocusNavigation,
    },
    narration::{
        NarratedElementType,
        NarrationPriority,
        NarrationOutput,
    },
};
use graphics::{
    DrawSurface,
    ScreenRect,
    tooltip::{
        TooltipBlock,
        DeferredTooltip,
        DefaultTooltipPositioner,
        BelowOrAboveWidgetTooltipPositioner,
    },
};
use std::{
    any::Any,
    time::Duration,
};
use vek::*;


/// Width tooltip text is wrapped to.
pub const TOOLTIP_WRAP_WIDTH: i32 = 170;


/// Upcast to `Any`, so hosts can get concrete widgets back out of a tree.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An interactive or purely visual rectangular piece of UI.
///
/// Every input method returns whether the event was consumed. An event a
/// widget doesn't care about, or can't receive because it's inactive or
/// invisible or not under the cursor, is not consumed and has no effect.
pub trait Widget: AsAny {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    fn bounds(&self) -> ScreenRect {
        self.base().rect
    }

    fn set_position(&mut self, pos: Vec2<i32>) {
        let base = self.base_mut();
        base.rect.x = pos.x;
        base.rect.y = pos.y;
    }

    fn set_size(&mut self, size: Extent2<i32>) {
        let base = self.base_mut();
        base.rect = ScreenRect::from_pos_size(base.rect.pos(), size);
    }

    fn is_active(&self) -> bool {
        self.base().active
    }

    fn is_visible(&self) -> bool {
        self.base().visible
    }

    fn is_hovered(&self) -> bool {
        self.base().hovered
    }

    fn is_focused(&self) -> bool {
        self.base().focused
    }

    /// Only to be called by the focus protocol.
    fn set_focused(&mut self, focused: bool) {
        self.base_mut().focused = focused;
    }

    /// Whether keyboard navigation may land on this widget at all.
    fn is_focusable(&self) -> bool {
        true
    }

    /// Draw the widget. `mouse` is the cursor position, which is also what
    /// hover is derived from, and `delta` is seconds since the last frame.
    fn render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        mouse: Vec2<f32>,
        delta: f32,
    );

    fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        let _ = (ctx, pos, button);
        false
    }

    fn mouse_released(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        let _ = (ctx, pos, button);
        false
    }

    fn mouse_dragged(
        &mut self,
        ctx: &GuiGlobalContext,
        pos: Vec2<f32>,
        button: MouseButton,
        delta: Vec2<f32>,
    ) -> bool {
        let _ = (ctx, pos, button, delta);
        false
    }

    fn mouse_scrolled(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, amount: ScrolledAmount) -> bool {
        let _ = (ctx, pos, amount);
        false
    }

    fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        let _ = (ctx, key);
        false
    }

    fn char_typed(&mut self, ctx: &GuiGlobalContext, c: char) -> bool {
        let _ = (ctx, c);
        false
    }

    /// Path to whatever should receive focus next under this widget, or
    /// `None` if focus should move on past it.
    ///
    /// A leaf offers itself if it's active, visible, focusable, and not
    /// already focused.
    fn next_focus_path(&self, nav: FocusNavigation) -> Option<FocusPath> {
        let _ = nav;
        let base = self.base();
        if base.accepts_input() && self.is_focusable() && !base.focused {
            Some(FocusPath::Leaf)
        } else {
            None
        }
    }

    /// Path to whatever currently holds focus under this widget.
    fn current_focus_path(&self) -> Option<FocusPath> {
        if self.is_focused() {
            Some(FocusPath::Leaf)
        } else {
            None
        }
    }

    /// Child widget at `index`, for widgets which have them.
    fn child_mut(&mut self, index: usize) -> Option<&mut dyn Widget> {
        let _ = index;
        None
    }

    /// Record which child holds focus. Only to be called by the focus
    /// protocol.
    fn set_focused_child(&mut self, index: Option<usize>) {
        let _ = index;
    }

    fn narration_priority(&self) -> NarrationPriority {
        let base = self.base();
        if base.focused {
            NarrationPriority::Focused
        } else if base.hovered {
            NarrationPriority::Hovered
        } else {
            NarrationPriority::None
        }
    }

    /// Describe the widget's current state.
    fn update_narration(&self, out: &mut NarrationOutput) {
        self.base().narrate_title(out, "");
    }
}


/// State shared by every widget.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    pub rect: ScreenRect,
    /// Receives input. Inactive visible widgets draw in a disabled style.
    pub active: bool,
    /// Renders and receives input.
    pub visible: bool,
    /// Whether the cursor was over the widget when it last rendered.
    pub hovered: bool,
    pub focused: bool,
    pub alpha: f32,
    /// The widget's label, such as a button's caption.
    pub message: String,
    pub tooltip: Option<String>,
    /// Fixed text to narrate instead of `message`.
    pub narration_label: Option<String>,
    // when the widget last became hovered or focused
    attention_since: Option<Duration>,
}

impl WidgetBase {
    pub fn new<S: Into<String>>(rect: ScreenRect, message: S) -> Self {
        WidgetBase {
            rect,
            active: true,
            visible: true,
            hovered: false,
            focused: false,
            alpha: 1.0,
            message: message.into(),
            tooltip: None,
            narration_label: None,
            attention_since: None,
        }
    }

    pub fn with_tooltip<S: Into<String>>(mut self, tooltip: S) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_narration_label<S: Into<String>>(mut self, label: S) -> Self {
        self.narration_label = Some(label.into());
        self
    }

    /// Active and visible.
    pub fn accepts_input(&self) -> bool {
        self.active && self.visible
    }

    /// Whether a pointer event at `pos` is one this widget may consume.
    pub fn hit(&self, pos: Vec2<f32>) -> bool {
        self.accepts_input() && self.rect.contains_f(pos)
    }

    /// Recompute `hovered`. A widget clipped away by the current scissor is
    /// not hovered even if the cursor lies within its bounds.
    pub fn update_hover(&mut self, surface: &DrawSurface, mouse: Vec2<f32>) {
        self.hovered = self.visible
            && self.rect.contains_f(mouse)
            && surface.scissor_contains(surface.to_screen(mouse));
    }

    /// Start-of-render bookkeeping shared by all widgets: derive hover and
    /// park the tooltip if it's due. Returns whether the widget should draw
    /// anything.
    pub fn begin_render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        mouse: Vec2<f32>,
    ) -> bool {
        self.update_hover(surface, mouse);
        if !self.visible {
            self.attention_since = None;
            return false;
        }
        self.update_tooltip(ctx, surface, mouse);
        true
    }

    fn update_tooltip(&mut self, ctx: &GuiGlobalContext, surface: &mut DrawSurface, mouse: Vec2<f32>) {
        if !(self.hovered || self.focused) {
            self.attention_since = None;
            return;
        }
        let since = *self.attention_since.get_or_insert(ctx.time);
        let text = match self.tooltip {
            Some(ref text) => text,
            None => return,
        };
        let delay = Duration::from_millis(ctx.settings().tooltip_delay_ms);
        if ctx.time.saturating_sub(since) < delay {
            return;
        }
        let blocks = TooltipBlock::wrapped(ctx.fonts, ctx.font, text, TOOLTIP_WRAP_WIDTH);
        let tooltip = if self.hovered {
            DeferredTooltip {
                font: ctx.font,
                blocks,
                cursor: mouse.map(|n| n.round() as i32),
                positioner: Box::new(DefaultTooltipPositioner),
            }
        } else {
            DeferredTooltip {
                font: ctx.font,
                blocks,
                cursor: self.rect.pos(),
                positioner: Box::new(BelowOrAboveWidgetTooltipPositioner { widget: self.rect }),
            }
        };
        surface.set_deferred_tooltip(tooltip);
    }

    /// The text narrated as the widget's title.
    pub fn title(&self) -> &str {
        self.narration_label.as_deref().unwrap_or(&self.message)
    }

    /// Add a title fragment such as "Button: Play". An empty `kind` narrates
    /// the title alone.
    pub fn narrate_title(&self, out: &mut NarrationOutput, kind: &str) {
        let title = self.title();
        if kind.is_empty() {
            out.add(NarratedElementType::Title, title);
        } else {
            out.add(NarratedElementType::Title, format!("{}: {}", kind, title));
        }
        if self.focused {
            if let Some(ref tooltip) = self.tooltip {
                out.add(NarratedElementType::Hint, tooltip.clone());
            }
        }
    }

    /// Add the usage hint appropriate to how the widget is being attended
    /// to.
    pub fn narrate_usage(&self, out: &mut NarrationOutput, focused_hint: &str, hovered_hint: &str) {
        if !self.active {
            return;
        }
        if self.focused {
            out.add(NarratedElementType::Usage, focused_hint);
        } else if self.hovered {
            out.add(NarratedElementType::Usage, hovered_hint);
        }
    }
}


#[test]
fn test_hit_requires_active_and_visible() {
    let mut base = WidgetBase::new(ScreenRect::new(10, 10, 20, 20), "x");
    assert!(base.hit(Vec2::new(15.0, 15.0)));
    assert!(!base.hit(Vec2::new(30.0, 15.0)));
    base.active = false;
    assert!(!base.hit(Vec2::new(15.0, 15.0)));
    base.active = true;
    base.visible = false;
    assert!(!base.hit(Vec2::new(15.0, 15.0)));
}

#[test]
fn test_title_prefers_narration_label() {
    let base = WidgetBase::new(ScreenRect::EMPTY, "Play");
    assert_eq!(base.title(), "Play");
    let base = base.with_narration_label("Play Selected World");
    assert_eq!(base.title(), "Play Selected World");
}
