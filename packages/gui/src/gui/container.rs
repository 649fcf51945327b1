//! Widgets which own and route to child widgets.

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
        ScreenDirection,
        clear_focus,
    },
    narration::{
        NarrationPriority,
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
};
use vek::*;


/// Ordered set of child widgets, at most one of which holds focus.
///
/// Children are owned exclusively. The focused child is tracked by index,
/// which is cleared or shifted whenever children are removed or inserted.
pub struct ContainerWidget {
    base: WidgetBase,
    children: Vec<Box<dyn Widget>>,
    focused: Option<usize>,
    dragging: bool,
}

impl ContainerWidget {
    pub fn new(rect: ScreenRect) -> Self {
        ContainerWidget {
            base: WidgetBase::new(rect, ""),
            children: Vec::new(),
            focused: None,
            dragging: false,
        }
    }

    /// Append a child. Returns its index.
    pub fn add_child<W: Widget>(&mut self, child: W) -> usize {
        self.add_boxed(Box::new(child))
    }

    pub fn add_boxed(&mut self, child: Box<dyn Widget>) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Insert a child at `index`, shifting later children along.
    ///
    /// Panics if `index > len`.
    pub fn insert_child(&mut self, index: usize, child: Box<dyn Widget>) {
        self.children.insert(index, child);
        if let Some(ref mut focused) = self.focused {
            if *focused >= index {
                *focused += 1;
            }
        }
    }

    /// Remove and return the child at `index`, with its focus cleared.
    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn Widget>> {
        if index >= self.children.len() {
            return None;
        }
        let mut child = self.children.remove(index);
        match self.focused {
            Some(i) if i == index => {
                clear_focus(child.as_mut());
                self.focused = None;
                self.dragging = false;
            }
            Some(i) if i > index => self.focused = Some(i - 1),
            _ => (),
        }
        Some(child)
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
        self.focused = None;
        self.dragging = false;
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> impl Iterator<Item=&dyn Widget> + '_ {
        self.children.iter().map(|child| child.as_ref())
    }

    pub fn child(&self, index: usize) -> Option<&dyn Widget> {
        self.children.get(index).map(|child| child.as_ref())
    }

    /// Child at `index` as its concrete type.
    pub fn child_as<W: Widget>(&self, index: usize) -> Option<&W> {
        let child: &dyn Widget = self.children.get(index)?.as_ref();
        child.as_any().downcast_ref()
    }

    pub fn child_as_mut<W: Widget>(&mut self, index: usize) -> Option<&mut W> {
        let child: &mut dyn Widget = self.children.get_mut(index)?.as_mut();
        child.as_any_mut().downcast_mut()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The child narration should describe: the focused child if it holds
    /// focus, otherwise the first hovered one.
    pub fn narrated_child(&self) -> Option<(usize, &dyn Widget)> {
        let mut best: Option<(usize, &dyn Widget)> = None;
        for (i, child) in self.children.iter().enumerate() {
            let priority = child.narration_priority();
            if priority == NarrationPriority::None {
                continue;
            }
            if best.map(|(_, b)| priority > b.narration_priority()).unwrap_or(true) {
                best = Some((i, child.as_ref()));
            }
            if priority.is_terminal() {
                break;
            }
        }
        best
    }

    /// Make child `index` the focused child after it consumed a click.
    fn focus_clicked(&mut self, index: usize) {
        if let Some(old) = self.focused {
            if old != index {
                clear_focus(self.children[old].as_mut());
            }
        }
        self.focused = Some(index);
        let child = self.children[index].as_mut();
        if child.current_focus_path().is_none() && child.is_focusable() {
            child.set_focused(true);
            // a container only holds focus through one of its children
            if child.current_focus_path().is_none() {
                child.set_focused(false);
            }
        }
    }

    fn focused_child_path(&self, nav: FocusNavigation) -> Option<FocusPath> {
        let i = self.focused?;
        self.children[i].next_focus_path(nav).map(|path| FocusPath::child(i, path))
    }

    fn first_path<I>(&self, indices: I, nav: FocusNavigation) -> Option<FocusPath>
    where
        I: IntoIterator<Item=usize>,
    {
        indices.into_iter()
            .find_map(|i| self.children[i]
                .next_focus_path(nav)
                .map(|path| FocusPath::child(i, path)))
    }

    fn tab_path(&self, forward: bool, nav: FocusNavigation) -> Option<FocusPath> {
        let n = self.children.len();
        match (self.focused, forward) {
            (Some(i), true) => self.first_path(i + 1..n, nav),
            (Some(i), false) => self.first_path((0..i).rev(), nav),
            (None, true) => self.first_path(0..n, nav),
            (None, false) => self.first_path((0..n).rev(), nav),
        }
    }

    fn arrow_path(&self, dir: ScreenDirection, nav: FocusNavigation) -> Option<FocusPath> {
        let n = self.children.len();
        let from = match self.focused {
            Some(i) => self.children[i].bounds(),
            None => return if dir.is_positive() {
                self.first_path(0..n, nav)
            } else {
                self.first_path((0..n).rev(), nav)
            },
        };
        let origin = rect_center(from);
        let mut candidates = Vec::new();
        for (i, child) in self.children.iter().enumerate() {
            if Some(i) == self.focused {
                continue;
            }
            let center = rect_center(child.bounds());
            let d = center - origin;
            let (along, across) = match dir {
                ScreenDirection::Up => (-d.y, d.x),
                ScreenDirection::Down => (d.y, d.x),
                ScreenDirection::Left => (-d.x, d.y),
                ScreenDirection::Right => (d.x, d.y),
            };
            if along <= 0 {
                continue;
            }
            // vertical moves go to the next row before anything else,
            // horizontal moves go to whatever is closest on that side
            let key = if dir.is_vertical() {
                (along as i64, across.abs() as i64)
            } else {
                ((along as i64).pow(2) + (across as i64).pow(2), across.abs() as i64)
            };
            candidates.push((key, i));
        }
        candidates.sort();
        self.first_path(candidates.into_iter().map(|(_, i)| i), nav)
    }
}

// doubled so that centers stay integral
fn rect_center(rect: ScreenRect) -> Vec2<i32> {
    Vec2::new(rect.left() + rect.right(), rect.top() + rect.bottom())
}

impl Widget for ContainerWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn set_position(&mut self, pos: Vec2<i32>) {
        let delta = pos - self.base.rect.pos();
        self.base.rect.x = pos.x;
        self.base.rect.y = pos.y;
        for child in &mut self.children {
            let child_pos = child.bounds().pos() + delta;
            child.set_position(child_pos);
        }
    }

    fn render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        mouse: Vec2<f32>,
        delta: f32,
    ) {
        if !self.base.begin_render(ctx, surface, mouse) {
            return;
        }
        for child in &mut self.children {
            child.render(ctx, surface, mouse, delta);
        }
    }

    fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        if !self.base.accepts_input() {
            return false;
        }
        for i in 0..self.children.len() {
            if self.children[i].mouse_clicked(ctx, pos, button) {
                trace!(index = i, "click consumed by child");
                self.focus_clicked(i);
                if button == MouseButton::Left {
                    self.dragging = true;
                }
                return true;
            }
        }
        false
    }

    fn mouse_released(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        if button == MouseButton::Left {
            self.dragging = false;
        }
        match self.focused {
            Some(i) => self.children[i].mouse_released(ctx, pos, button),
            None => false,
        }
    }

    fn mouse_dragged(
        &mut self,
        ctx: &GuiGlobalContext,
        pos: Vec2<f32>,
        button: MouseButton,
        delta: Vec2<f32>,
    ) -> bool {
        if !self.base.accepts_input() || !self.dragging {
            return false;
        }
        match self.focused {
            Some(i) => self.children[i].mouse_dragged(ctx, pos, button, delta),
            None => false,
        }
    }

    fn mouse_scrolled(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, amount: ScrolledAmount) -> bool {
        if !self.base.accepts_input() {
            return false;
        }
        self.children.iter_mut()
            .filter(|child| child.bounds().contains_f(pos))
            .any(|child| child.mouse_scrolled(ctx, pos, amount))
    }

    fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        if !self.base.accepts_input() {
            return false;
        }
        match self.focused {
            Some(i) => self.children[i].key_pressed(ctx, key),
            None => false,
        }
    }

    fn char_typed(&mut self, ctx: &GuiGlobalContext, c: char) -> bool {
        if !self.base.accepts_input() {
            return false;
        }
        match self.focused {
            Some(i) => self.children[i].char_typed(ctx, c),
            None => false,
        }
    }

    fn next_focus_path(&self, nav: FocusNavigation) -> Option<FocusPath> {
        if !self.base.accepts_input() {
            return None;
        }
        if let Some(path) = self.focused_child_path(nav) {
            return Some(path);
        }
        match nav {
            FocusNavigation::Tab { forward } => self.tab_path(forward, nav),
            FocusNavigation::Arrow(dir) => self.arrow_path(dir, nav),
        }
    }

    fn current_focus_path(&self) -> Option<FocusPath> {
        let i = self.focused?;
        self.children[i].current_focus_path().map(|path| FocusPath::child(i, path))
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut dyn Widget> {
        let child: &mut dyn Widget = self.children.get_mut(index)?.as_mut();
        Some(child)
    }

    fn set_focused_child(&mut self, index: Option<usize>) {
        if let (Some(old), Some(new)) = (self.focused, index) {
            if old != new {
                clear_focus(self.children[old].as_mut());
            }
        }
        self.focused = index.filter(|&i| i < self.children.len());
    }

    fn narration_priority(&self) -> NarrationPriority {
        self.children.iter()
            .map(|child| child.narration_priority())
            .max()
            .unwrap_or(NarrationPriority::None)
    }

    fn update_narration(&self, out: &mut NarrationOutput) {
        if let Some((_, child)) = self.narrated_child() {
            child.update_narration(out);
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::gui::{
        focus::{apply_focus, change_focus},
        testing::{TestHost, TrackedLeaf},
    };

    fn column(n: usize) -> ContainerWidget {
        let mut container = ContainerWidget::new(ScreenRect::new(0, 0, 100, 30 * n as i32));
        for i in 0..n {
            container.add_child(TrackedLeaf::new(ScreenRect::new(0, 30 * i as i32, 100, 20)));
        }
        container
    }

    fn down() -> FocusNavigation {
        FocusNavigation::Arrow(ScreenDirection::Down)
    }

    #[test]
    fn test_click_moves_focus() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut c = column(2);
        assert!(c.mouse_clicked(&ctx, Vec2::new(10.0, 35.0), MouseButton::Left));
        assert_eq!(c.focused_index(), Some(1));
        assert!(c.child(1).unwrap().is_focused());
        assert!(c.is_dragging());

        assert!(c.mouse_clicked(&ctx, Vec2::new(10.0, 5.0), MouseButton::Left));
        assert_eq!(c.focused_index(), Some(0));
        assert!(c.child(0).unwrap().is_focused());
        assert!(!c.child(1).unwrap().is_focused());

        // between children
        assert!(!c.mouse_clicked(&ctx, Vec2::new(10.0, 25.0), MouseButton::Left));
        assert_eq!(c.focused_index(), Some(0));
    }

    #[test]
    fn test_click_on_unfocusable_nested_leaf() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut inner = ContainerWidget::new(ScreenRect::new(0, 100, 100, 20));
        inner.add_child(TrackedLeaf::new(ScreenRect::new(0, 100, 100, 20)).unfocusable());
        let mut outer = column(1);
        outer.add_child(inner);

        assert!(outer.mouse_clicked(&ctx, Vec2::new(10.0, 105.0), MouseButton::Left));
        assert_eq!(outer.child_as::<ContainerWidget>(1).unwrap().child_as::<TrackedLeaf>(0).unwrap().clicks.get(), 1);
        assert!(!outer.child(1).unwrap().is_focused());
        assert_eq!(outer.current_focus_path(), None);

        // focus moves on cleanly afterwards
        change_focus(&mut outer, &FocusPath::entry(0));
        assert_eq!(outer.current_focus_path(), Some(FocusPath::entry(0)));
        assert!(!outer.child(1).unwrap().is_focused());
    }

    #[test]
    fn test_inactive_container_consumes_nothing() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut c = column(1);
        c.base_mut().active = false;
        assert!(!c.mouse_clicked(&ctx, Vec2::new(10.0, 5.0), MouseButton::Left));
        assert_eq!(c.child_as::<TrackedLeaf>(0).unwrap().clicks.get(), 0);
        assert!(c.next_focus_path(down()).is_none());
    }

    #[test]
    fn test_focus_path_leaf_gets_one_call_each_way() {
        let mut inner = column(2);
        inner.set_position(Vec2::new(0, 100));
        let calls = inner.child_as::<TrackedLeaf>(1).unwrap().focus_calls.clone();
        let mut outer = column(1);
        outer.add_child(inner);

        let path = FocusPath::child(1, FocusPath::child(1, FocusPath::Leaf));
        apply_focus(&mut outer, &path, true);
        assert_eq!(outer.current_focus_path(), Some(path.clone()));
        apply_focus(&mut outer, &path, false);
        assert_eq!(*calls.borrow(), vec![true, false]);
        assert_eq!(outer.focused_index(), None);
        assert_eq!(outer.child_as::<ContainerWidget>(1).unwrap().focused_index(), None);
        assert_eq!(outer.current_focus_path(), None);
    }

    #[test]
    fn test_tab_skips_inactive_and_ends() {
        let mut c = column(2);
        c.add_child(TrackedLeaf::new(ScreenRect::new(0, 60, 100, 20)).inactive());
        c.add_child(TrackedLeaf::new(ScreenRect::new(0, 90, 100, 20)));
        let tab = FocusNavigation::Tab { forward: true };

        let mut visited = Vec::new();
        while let Some(path) = c.next_focus_path(tab) {
            visited.push(path.first_index().unwrap());
            change_focus(&mut c, &path);
        }
        assert_eq!(visited, vec![0, 1, 3]);

        let back = FocusNavigation::Tab { forward: false };
        let path = c.next_focus_path(back).unwrap();
        assert_eq!(path, FocusPath::entry(1));
    }

    #[test]
    fn test_arrow_navigation_is_geometric() {
        // two columns of two
        let mut c = ContainerWidget::new(ScreenRect::new(0, 0, 200, 60));
        c.add_child(TrackedLeaf::new(ScreenRect::new(0, 0, 90, 20)));
        c.add_child(TrackedLeaf::new(ScreenRect::new(100, 0, 90, 20)));
        c.add_child(TrackedLeaf::new(ScreenRect::new(0, 30, 90, 20)).inactive());
        c.add_child(TrackedLeaf::new(ScreenRect::new(100, 30, 90, 20)));

        // nothing focused, down starts at the first child
        assert_eq!(c.next_focus_path(down()), Some(FocusPath::entry(0)));
        change_focus(&mut c, &FocusPath::entry(0));

        let right = FocusNavigation::Arrow(ScreenDirection::Right);
        assert_eq!(c.next_focus_path(right), Some(FocusPath::entry(1)));
        // straight below is inactive, so down goes diagonally
        assert_eq!(c.next_focus_path(down()), Some(FocusPath::entry(3)));
        let up = FocusNavigation::Arrow(ScreenDirection::Up);
        assert_eq!(c.next_focus_path(up), None);
    }

    #[test]
    fn test_remove_child_adjusts_focus() {
        let mut c = column(3);
        change_focus(&mut c, &FocusPath::entry(2));
        c.remove_child(0);
        assert_eq!(c.focused_index(), Some(1));
        assert!(c.child(1).unwrap().is_focused());

        let removed = c.remove_child(1).unwrap();
        assert!(!removed.is_focused());
        assert_eq!(c.focused_index(), None);
        assert!(c.remove_child(5).is_none());
    }

    #[test]
    fn test_set_position_moves_children() {
        let mut c = column(2);
        c.set_position(Vec2::new(10, 50));
        assert_eq!(c.child(1).unwrap().bounds(), ScreenRect::new(10, 80, 100, 20));
    }
}
