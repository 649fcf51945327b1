//! Root of a widget tree.

use crate::gui::{
    context::GuiGlobalContext,
    container::ContainerWidget,
    event::{
        MouseButton,
        KeyCode,
        KeyEvent,
        ScrolledAmount,
    },
    focus::{
        FocusNavigation,
        change_focus,
        clear_focus,
    },
    narration::{
        NarratedElementType,
        NarrationOutput,
    },
    widget::Widget,
};
use graphics::{
    DrawSurface,
    ScreenRect,
};
use vek::*;


/// Re-positions a screen's widgets for a new screen size.
pub type LayoutFn = Box<dyn FnMut(&mut ContainerWidget, Extent2<i32>)>;

/// A full-screen widget tree: the root container plus the keyboard handling
/// and narration that only make sense at the top.
pub struct Screen {
    title: String,
    size: Extent2<i32>,
    root: ContainerWidget,
    layout: Option<LayoutFn>,
}

impl Screen {
    pub fn new<S: Into<String>>(title: S, size: Extent2<i32>) -> Self {
        Screen {
            title: title.into(),
            size,
            root: ContainerWidget::new(ScreenRect::from_pos_size(Vec2::zero(), size)),
            layout: None,
        }
    }

    /// Install a layout function and run it now. It runs again whenever the
    /// screen is resized.
    pub fn with_layout<F>(mut self, layout: F) -> Self
    where
        F: FnMut(&mut ContainerWidget, Extent2<i32>) + 'static,
    {
        self.layout = Some(Box::new(layout));
        self.relayout();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> Extent2<i32> {
        self.size
    }

    pub fn root(&self) -> &ContainerWidget {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut ContainerWidget {
        &mut self.root
    }

    pub fn add_child<W: Widget>(&mut self, child: W) -> usize {
        self.root.add_child(child)
    }

    pub fn resize(&mut self, size: Extent2<i32>) {
        if size == self.size {
            return;
        }
        debug!(title=%self.title, ?size, "screen resized");
        self.size = size;
        self.root.set_size(size);
        self.relayout();
    }

    pub fn relayout(&mut self) {
        if let Some(ref mut layout) = self.layout {
            layout(&mut self.root, self.size);
        }
    }

    pub fn render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        mouse: Vec2<f32>,
        delta: f32,
    ) {
        self.root.render(ctx, surface, mouse, delta);
        surface.render_deferred_tooltip();
    }

    pub fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        self.root.mouse_clicked(ctx, pos, button)
    }

    pub fn mouse_released(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        self.root.mouse_released(ctx, pos, button)
    }

    pub fn mouse_dragged(
        &mut self,
        ctx: &GuiGlobalContext,
        pos: Vec2<f32>,
        button: MouseButton,
        delta: Vec2<f32>,
    ) -> bool {
        self.root.mouse_dragged(ctx, pos, button, delta)
    }

    pub fn mouse_scrolled(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, amount: ScrolledAmount) -> bool {
        self.root.mouse_scrolled(ctx, pos, amount)
    }

    pub fn char_typed(&mut self, ctx: &GuiGlobalContext, c: char) -> bool {
        self.root.char_typed(ctx, c)
    }

    /// The focused widget gets first refusal. After that, Escape closes the
    /// screen and navigation keys move focus.
    pub fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        if self.root.key_pressed(ctx, key) {
            return true;
        }
        if key.key == KeyCode::Escape {
            debug!(title=%self.title, "escape pressed, closing screen");
            ctx.close_screen();
            return true;
        }
        match key.focus_navigation() {
            Some(nav) => self.navigate(nav),
            None => false,
        }
    }

    /// Move focus. Tab wraps around past either end; arrows stop there.
    pub fn navigate(&mut self, nav: FocusNavigation) -> bool {
        let mut path = self.root.next_focus_path(nav);
        if path.is_none() {
            if let FocusNavigation::Tab { .. } = nav {
                clear_focus(&mut self.root);
                path = self.root.next_focus_path(nav);
            }
        }
        match path {
            Some(path) => {
                trace!(?nav, ?path, "focus moved");
                change_focus(&mut self.root, &path);
                true
            }
            None => false,
        }
    }

    /// What a screen reader should say right now: the screen title, then
    /// whichever widget is focused or hovered and where it sits.
    pub fn narrate(&self) -> Vec<String> {
        let mut out = NarrationOutput::new();
        out.add(NarratedElementType::Title, self.title.clone());
        if let Some((index, child)) = self.root.narrated_child() {
            child.update_narration(&mut out);
            let stops = self.root.children()
                .enumerate()
                .filter(|&(_, c)| c.is_visible() && c.is_focusable())
                .map(|(i, _)| i)
                .collect::<Vec<_>>();
            if stops.len() > 1 {
                if let Some(n) = stops.iter().position(|&i| i == index) {
                    out.add(
                        NarratedElementType::Position,
                        format!("Screen element {} out of {}", n + 1, stops.len()),
                    );
                }
            }
        }
        out.render()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::gui::{
        context::GuiEffect,
        focus::FocusPath,
        testing::{TestHost, TrackedLeaf},
    };

    fn screen() -> Screen {
        let mut screen = Screen::new("Test", Extent2::new(320, 240));
        for i in 0..3 {
            screen.add_child(TrackedLeaf::new(ScreenRect::new(10, 10 + 30 * i, 100, 20)));
        }
        screen
    }

    #[test]
    fn test_tab_wraps_and_arrows_stop() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut screen = screen();
        let tab = KeyEvent::new(KeyCode::Tab);
        let mut order = Vec::new();
        for _ in 0..4 {
            assert!(screen.key_pressed(&ctx, tab));
            order.push(screen.root().focused_index().unwrap());
        }
        assert_eq!(order, vec![0, 1, 2, 0]);

        assert!(!screen.key_pressed(&ctx, KeyEvent::new(KeyCode::ArrowUp)));
        assert!(screen.key_pressed(&ctx, KeyEvent::new(KeyCode::ArrowDown)));
        assert_eq!(screen.root().current_focus_path(), Some(FocusPath::entry(1)));
    }

    #[test]
    fn test_escape_closes() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut screen = screen();
        assert!(screen.key_pressed(&ctx, KeyEvent::new(KeyCode::Escape)));
        assert_eq!(host.host.effects.borrow_mut().drain(), vec![GuiEffect::CloseScreen]);
        assert!(!screen.key_pressed(&ctx, KeyEvent::new(KeyCode::KeyQ)));
    }

    #[test]
    fn test_narration_includes_position() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut screen = screen();
        assert_eq!(screen.narrate(), vec!["Test"]);
        screen.key_pressed(&ctx, KeyEvent::new(KeyCode::Tab));
        screen.key_pressed(&ctx, KeyEvent::new(KeyCode::Tab));
        assert_eq!(screen.narrate(), vec![
            "Test",
            "tracked leaf",
            "Screen element 2 out of 3",
        ]);
    }

    #[test]
    fn test_resize_runs_layout() {
        let mut screen = screen().with_layout(|root, size| {
            let x = size.w - 110;
            for i in 0..root.len() {
                if let Some(child) = root.child_mut(i) {
                    let y = child.bounds().y;
                    child.set_position(Vec2::new(x, y));
                }
            }
        });
        assert_eq!(screen.root().child(0).unwrap().bounds().x, 210);
        screen.resize(Extent2::new(400, 300));
        assert_eq!(screen.root().child(2).unwrap().bounds().x, 290);
        assert_eq!(screen.root().bounds().size(), Extent2::new(400, 300));
    }
}
