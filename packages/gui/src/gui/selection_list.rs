//! Virtualized scrolling list of selectable entries.
//!
//! Row geometry is never stored. Row `i` spans
//!
//! ```text
//! top    = y + padding - floor(scroll) + i * row_height + header_height
//! bottom = top + row_height
//! ```
//!
//! and everything else (culling, hit testing, keeping the selection in view)
//! is derived from that formula, so per-frame cost depends only on how many
//! rows fit in the viewport.

use crate::gui::{
    context::GuiGlobalContext,
    event::{
        MouseButton,
        KeyCode,
        KeyEvent,
        ScrolledAmount,
    },
    focus::{
        FocusPath,
        FocusNavigation,
        ScreenDirection,
    },
    narration::{
        NarratedElementType,
        NarrationPriority,
        NarrationOutput,
    },
    widget::{
        Widget,
        WidgetBase,
    },
    sprites,
};
use graphics::{
    DrawSurface,
    ScreenRect,
    hex_color,
};
use std::ops::Range;
use vek::*;


pub const DEFAULT_PADDING: i32 = 4;
pub const DEFAULT_ROW_WIDTH: i32 = 220;
pub const SCROLLBAR_WIDTH: i32 = 6;
pub const MIN_THUMB_HEIGHT: i32 = 32;


/// Something shown as one row of a `SelectionList`.
pub trait ListEntry: 'static {
    /// Draw the entry into `row`.
    fn render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        index: usize,
        row: ScreenRect,
        mouse: Vec2<f32>,
        hovered: bool,
        selected: bool,
        delta: f32,
    );

    /// What a screen reader says about the entry.
    fn narration(&self) -> String;

    /// A click landed on the entry. The list has already selected it.
    /// Returns whether the entry did anything further with it.
    fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        let _ = (ctx, pos, button);
        false
    }

    /// A key the list itself didn't want, while this entry is focused.
    fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        let _ = (ctx, key);
        false
    }
}


/// Vertical list of entries with a single optional selection.
pub struct SelectionList<E> {
    base: WidgetBase,
    entries: Vec<E>,
    row_height: i32,
    header_height: i32,
    header: Option<String>,
    padding: i32,
    row_width: i32,
    empty_message: String,
    scroll: f64,
    selected: Option<usize>,
    focused: Option<usize>,
    hovered: Option<usize>,
    dragging_scrollbar: bool,
    rendered: Vec<usize>,
}

impl<E: ListEntry> SelectionList<E> {
    /// List filling `rect`.
    ///
    /// Panics if `row_height` is not positive.
    pub fn new(rect: ScreenRect, row_height: i32) -> Self {
        assert!(row_height > 0, "selection list row height must be positive");
        SelectionList {
            base: WidgetBase::new(rect, ""),
            entries: Vec::new(),
            row_height,
            header_height: 0,
            header: None,
            padding: DEFAULT_PADDING,
            row_width: DEFAULT_ROW_WIDTH,
            empty_message: "Nothing here yet".to_owned(),
            scroll: 0.0,
            selected: None,
            focused: None,
            hovered: None,
            dragging_scrollbar: false,
            rendered: Vec::new(),
        }
    }

    /// Reserve a header band above the first row, with optional centered
    /// text.
    pub fn with_header(mut self, height: i32, text: Option<String>) -> Self {
        self.header_height = height.max(0);
        self.header = text;
        self.clamp_scroll();
        self
    }

    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self.clamp_scroll();
        self
    }

    pub fn with_row_width(mut self, row_width: i32) -> Self {
        self.row_width = row_width;
        self
    }

    /// Text shown when there are no entries.
    pub fn with_empty_message<S: Into<String>>(mut self, message: S) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn with_narration_label<S: Into<String>>(mut self, label: S) -> Self {
        self.base.narration_label = Some(label.into());
        self
    }

    // ==== entries ====

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&E> {
        self.entries.get(index)
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut E> {
        self.entries.get_mut(index)
    }

    /// Append an entry. Returns its index.
    pub fn add_entry(&mut self, entry: E) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Insert an entry above all others without moving what's on screen:
    /// the scroll grows by one row to compensate.
    pub fn add_entry_to_top(&mut self, entry: E) {
        self.entries.insert(0, entry);
        self.selected = self.selected.map(|i| i + 1);
        self.focused = self.focused.map(|i| i + 1);
        self.hovered = None;
        self.set_scroll_amount(self.scroll + self.row_height as f64);
    }

    /// Remove the entry at `index`. Selection and focus on it move to the
    /// entry that takes its place, or the one above if it was last. Those on
    /// later entries follow them.
    pub fn remove_entry(&mut self, index: usize) -> Option<E> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        let len = self.entries.len();
        let fix = |slot: Option<usize>| match slot {
            Some(_) if len == 0 => None,
            Some(i) if i == index => Some(index.min(len - 1)),
            Some(i) if i > index => Some(i - 1),
            other => other,
        };
        let had_focus = self.focused.is_some();
        self.selected = fix(self.selected);
        self.focused = fix(self.focused);
        self.keep_list_focus(had_focus);
        self.hovered = None;
        self.clamp_scroll();
        Some(entry)
    }

    /// Replace every entry. Selection and entry focus are cleared and the
    /// scroll is clamped to the new content. A focused list stays focused.
    pub fn replace_entries<I: IntoIterator<Item=E>>(&mut self, entries: I) {
        self.entries.clear();
        self.entries.extend(entries);
        self.selected = None;
        let had_focus = self.focused.take().is_some();
        self.keep_list_focus(had_focus);
        self.hovered = None;
        self.clamp_scroll();
        debug!(entries = self.entries.len(), "list entries replaced");
    }

    pub fn clear_entries(&mut self) {
        self.entries.clear();
        self.selected = None;
        let had_focus = self.focused.take().is_some();
        self.keep_list_focus(had_focus);
        self.hovered = None;
        self.scroll = 0.0;
    }

    // entry focus that goes away falls back to the list itself so the
    // owning container's focus path stays intact
    fn keep_list_focus(&mut self, had_focus: bool) {
        if had_focus && self.focused.is_none() {
            self.base.focused = true;
        }
    }

    // ==== selection ====

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&E> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    /// Select an entry, or nothing. Out of range indices select nothing.
    pub fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.entries.len());
    }

    /// The entry holding keyboard focus.
    pub fn focused_entry(&self) -> Option<usize> {
        self.focused
    }

    // ==== geometry ====

    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    fn rows_origin(&self) -> i32 {
        self.base.rect.y + self.padding - self.scroll.floor() as i32 + self.header_height
    }

    pub fn row_top(&self, index: usize) -> i32 {
        self.rows_origin() + index as i32 * self.row_height
    }

    pub fn row_bottom(&self, index: usize) -> i32 {
        self.row_top(index) + self.row_height
    }

    pub fn row_left(&self) -> i32 {
        self.base.rect.x + (self.base.rect.w - self.row_width) / 2
    }

    pub fn row_rect(&self, index: usize) -> ScreenRect {
        ScreenRect::new(self.row_left(), self.row_top(index), self.row_width, self.row_height)
    }

    pub fn content_height(&self) -> i32 {
        self.entries.len() as i32 * self.row_height + self.header_height
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_height() - (self.base.rect.h - self.padding)).max(0) as f64
    }

    /// Rows whose `[top, bottom)` overlaps the viewport's `[top, bottom)`.
    pub fn visible_rows(&self) -> Range<usize> {
        let n = self.entries.len() as i64;
        let rh = self.row_height as i64;
        let d = (self.base.rect.y - self.rows_origin()) as i64;
        let first = d.div_euclid(rh).clamp(0, n);
        let end = (-(-(d + self.base.rect.h as i64)).div_euclid(rh)).clamp(first, n);
        first as usize..end as usize
    }

    /// Rows drawn by the most recent render.
    pub fn rendered_rows(&self) -> &[usize] {
        &self.rendered
    }

    /// Index of the entry under `pos`, if any. Points outside the viewport,
    /// outside the horizontal row band, on the scrollbar, or past the last
    /// row have no entry.
    pub fn entry_at_position(&self, pos: Vec2<f32>) -> Option<usize> {
        if !self.base.rect.contains_f(pos) {
            return None;
        }
        let left = self.row_left() as f32;
        if pos.x < left || pos.x >= left + self.row_width as f32 {
            return None;
        }
        if self.scrollbar_visible() && pos.x >= self.scrollbar_x() as f32 {
            return None;
        }
        let rel = pos.y - self.rows_origin() as f32;
        if rel < 0.0 {
            return None;
        }
        let index = (rel / self.row_height as f32).floor() as usize;
        if index < self.entries.len() {
            Some(index)
        } else {
            None
        }
    }

    // ==== scrolling ====

    pub fn scroll_amount(&self) -> f64 {
        self.scroll
    }

    /// Scroll to `amount`, saturating at either end.
    pub fn set_scroll_amount(&mut self, amount: f64) {
        let amount = if amount.is_nan() { 0.0 } else { amount };
        self.scroll = amount.clamp(0.0, self.max_scroll());
    }

    fn clamp_scroll(&mut self) {
        self.set_scroll_amount(self.scroll);
    }

    /// Scroll just enough that the row at `index` and one row of margin
    /// either side of it are in view.
    pub fn ensure_visible(&mut self, index: usize) {
        let above = self.row_top(index) - self.base.rect.y - self.padding - self.row_height;
        if above < 0 {
            self.set_scroll_amount(self.scroll + above as f64);
        }
        let below = self.base.rect.bottom() - self.row_bottom(index) - self.row_height;
        if below < 0 {
            self.set_scroll_amount(self.scroll - below as f64);
        }
    }

    pub fn scrollbar_visible(&self) -> bool {
        self.max_scroll() > 0.0
    }

    fn scrollbar_x(&self) -> i32 {
        self.base.rect.right() - SCROLLBAR_WIDTH
    }

    pub fn thumb_height(&self) -> i32 {
        let h = self.base.rect.h;
        let content = self.content_height().max(1);
        ((h as i64 * h as i64 / content as i64) as i32)
            .max(MIN_THUMB_HEIGHT)
            .min(h)
    }

    pub fn thumb_rect(&self) -> ScreenRect {
        let thumb = self.thumb_height();
        let track = (self.base.rect.h - thumb).max(0);
        let max = self.max_scroll();
        let offset = if max > 0.0 {
            (self.scroll * track as f64 / max) as i32
        } else {
            0
        };
        ScreenRect::new(self.scrollbar_x(), self.base.rect.y + offset, SCROLLBAR_WIDTH, thumb)
    }

    /// Scroll distance per pixel of thumb drag.
    fn drag_factor(&self) -> f64 {
        let track = (self.base.rect.h - self.thumb_height()).max(1);
        (self.max_scroll() / track as f64).max(1.0)
    }

    fn page_rows(&self) -> usize {
        ((self.base.rect.h - self.padding - self.header_height) / self.row_height - 1).max(1) as usize
    }

    fn move_focus_to(&mut self, index: usize) {
        if index < self.entries.len() {
            self.set_focused_child(Some(index));
        }
    }

    fn render_contents(
        &mut self,
        ctx: &GuiGlobalContext,
        s: &mut DrawSurface,
        mouse: Vec2<f32>,
        delta: f32,
    ) {
        let rect = self.base.rect;
        s.blit_sprite(&sprites::sprite(sprites::MENU_BACKGROUND), rect);
        if let Some(ref header) = self.header {
            let line_height = ctx.fonts.line_height(ctx.font);
            let y = self.rows_origin() - self.header_height + (self.header_height - line_height) / 2;
            s.draw_centered_text(ctx.font, header, rect.center().x, y, hex_color(0xFFFFFFFF));
        }
        if self.entries.is_empty() {
            let y = rect.y + self.padding + self.header_height + 4;
            s.draw_centered_text(ctx.font, &self.empty_message, rect.center().x, y, hex_color(0xA0A0A0FF));
            return;
        }
        let focused = self.is_focused();
        for i in self.visible_rows() {
            let row = self.row_rect(i);
            let selected = self.selected == Some(i);
            if selected {
                let border = if focused { 0xFFFFFFFF } else { 0x808080FF };
                s.fill(row.inflate(1), hex_color(border));
                s.fill(row, hex_color(0x000000FF));
            }
            let hovered = self.hovered == Some(i);
            self.entries[i].render(ctx, s, i, row, mouse, hovered, selected, delta);
            self.rendered.push(i);
        }
    }

    fn render_scrollbar(&self, s: &mut DrawSurface) {
        if !self.scrollbar_visible() {
            return;
        }
        let track = ScreenRect::new(self.scrollbar_x(), self.base.rect.y, SCROLLBAR_WIDTH, self.base.rect.h);
        s.blit_sprite(&sprites::sprite(sprites::SCROLLER_BACKGROUND), track);
        s.blit_sprite(&sprites::sprite(sprites::SCROLLER), self.thumb_rect());
    }
}

impl<E: ListEntry> Widget for SelectionList<E> {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn set_size(&mut self, size: Extent2<i32>) {
        self.base.rect = ScreenRect::from_pos_size(self.base.rect.pos(), size);
        self.clamp_scroll();
    }

    fn is_focused(&self) -> bool {
        self.base.focused || self.focused.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.base.focused = focused;
        if !focused {
            self.focused = None;
        }
    }

    fn render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        mouse: Vec2<f32>,
        delta: f32,
    ) {
        self.rendered.clear();
        if !self.base.begin_render(ctx, surface, mouse) {
            self.hovered = None;
            return;
        }
        self.clamp_scroll();
        self.hovered = if self.base.hovered {
            self.entry_at_position(mouse)
        } else {
            None
        };
        surface.enable_scissor(self.base.rect);
        surface.managed_batch(|s| self.render_contents(ctx, s, mouse, delta));
        surface.disable_scissor();
        self.render_scrollbar(surface);
    }

    fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        if !self.base.hit(pos) {
            return false;
        }
        if button == MouseButton::Left
            && self.scrollbar_visible()
            && pos.x >= self.scrollbar_x() as f32
        {
            let thumb = self.thumb_rect();
            let page = (self.base.rect.h - self.row_height) as f64;
            if pos.y < thumb.top() as f32 {
                self.set_scroll_amount(self.scroll - page);
            } else if pos.y >= thumb.bottom() as f32 {
                self.set_scroll_amount(self.scroll + page);
            }
            self.dragging_scrollbar = true;
            return true;
        }
        match self.entry_at_position(pos) {
            Some(i) => {
                trace!(index = i, "list entry clicked");
                self.selected = Some(i);
                self.focused = Some(i);
                self.entries[i].mouse_clicked(ctx, pos, button);
                true
            }
            None => false,
        }
    }

    fn mouse_released(&mut self, _ctx: &GuiGlobalContext, _pos: Vec2<f32>, button: MouseButton) -> bool {
        if button == MouseButton::Left && self.dragging_scrollbar {
            self.dragging_scrollbar = false;
            true
        } else {
            false
        }
    }

    fn mouse_dragged(
        &mut self,
        _ctx: &GuiGlobalContext,
        _pos: Vec2<f32>,
        button: MouseButton,
        delta: Vec2<f32>,
    ) -> bool {
        if button != MouseButton::Left || !self.dragging_scrollbar || !self.base.accepts_input() {
            return false;
        }
        self.set_scroll_amount(self.scroll + delta.y as f64 * self.drag_factor());
        true
    }

    fn mouse_scrolled(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, amount: ScrolledAmount) -> bool {
        if !self.base.hit(pos) || !self.scrollbar_visible() {
            return false;
        }
        let line = self.row_height as f32 / 2.0;
        let pixels = amount.to_pixels([line, line]);
        let sensitivity = ctx.settings().scroll_sensitivity as f64;
        self.set_scroll_amount(self.scroll - pixels.y as f64 * sensitivity);
        true
    }

    fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        if !self.base.accepts_input() || self.entries.is_empty() {
            return false;
        }
        let last = self.entries.len() - 1;
        let current = self.focused.or(self.selected);
        match key.key {
            KeyCode::PageUp => {
                let to = current.map(|i| i.saturating_sub(self.page_rows())).unwrap_or(0);
                self.move_focus_to(to);
                true
            }
            KeyCode::PageDown => {
                let to = current.map(|i| (i + self.page_rows()).min(last)).unwrap_or(0);
                self.move_focus_to(to);
                true
            }
            KeyCode::Home => {
                self.move_focus_to(0);
                true
            }
            KeyCode::End => {
                self.move_focus_to(last);
                true
            }
            _ => match self.focused {
                Some(i) => self.entries[i].key_pressed(ctx, key),
                None => false,
            },
        }
    }

    fn next_focus_path(&self, nav: FocusNavigation) -> Option<FocusPath> {
        if !self.base.accepts_input() || self.entries.is_empty() {
            return None;
        }
        let n = self.entries.len();
        let forward = match nav {
            FocusNavigation::Tab { forward } => {
                // tab passes through the list as a single stop
                if self.is_focused() {
                    return None;
                }
                let i = self.selected.unwrap_or(if forward { 0 } else { n - 1 });
                return Some(FocusPath::entry(i));
            }
            FocusNavigation::Arrow(ScreenDirection::Down) => true,
            FocusNavigation::Arrow(ScreenDirection::Up) => false,
            FocusNavigation::Arrow(_) => return None,
        };
        let current = self.focused.or(if self.base.focused { self.selected } else { None });
        let next = match current {
            Some(i) if forward => i + 1,
            Some(i) => i.checked_sub(1)?,
            None if forward => 0,
            None => n - 1,
        };
        if next < n {
            Some(FocusPath::entry(next))
        } else {
            None
        }
    }

    fn current_focus_path(&self) -> Option<FocusPath> {
        match self.focused {
            Some(i) => Some(FocusPath::entry(i)),
            None if self.base.focused => Some(FocusPath::Leaf),
            None => None,
        }
    }

    fn set_focused_child(&mut self, index: Option<usize>) {
        match index.filter(|&i| i < self.entries.len()) {
            Some(i) => {
                self.focused = Some(i);
                self.selected = Some(i);
                self.ensure_visible(i);
            }
            None => {
                self.focused = None;
                self.base.focused = false;
            }
        }
    }

    fn narration_priority(&self) -> NarrationPriority {
        if self.is_focused() {
            NarrationPriority::Focused
        } else if self.hovered.is_some() {
            NarrationPriority::Hovered
        } else {
            NarrationPriority::None
        }
    }

    fn update_narration(&self, out: &mut NarrationOutput) {
        let n = self.entries.len();
        if n == 0 {
            out.add(NarratedElementType::Title, self.empty_message.clone());
            return;
        }
        if let Some(i) = self.focused.or(self.hovered) {
            let entry = self.entries[i].narration();
            if self.selected == Some(i) {
                out.add(NarratedElementType::Title, format!("Selected: {}", entry));
            } else {
                out.add(NarratedElementType::Title, entry);
            }
            out.add(NarratedElementType::Position, format!("List row {} out of {}", i + 1, n));
        } else if let Some(ref label) = self.base.narration_label {
            out.add(NarratedElementType::Title, label.clone());
        }
        if self.focused.is_some() {
            out.add(NarratedElementType::Usage, "Use up and down arrows to move between rows");
        } else if self.hovered.is_some() {
            out.add(NarratedElementType::Usage, "Left click to select");
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::gui::{
        focus::{change_focus, clear_focus},
        testing::TestHost,
    };

    struct Row(String);

    impl ListEntry for Row {
        fn render(
            &mut self,
            ctx: &GuiGlobalContext,
            surface: &mut DrawSurface,
            _index: usize,
            row: ScreenRect,
            _mouse: Vec2<f32>,
            _hovered: bool,
            _selected: bool,
            _delta: f32,
        ) {
            surface.draw_text(ctx.font, &self.0, row.pos() + 2, hex_color(0xFFFFFFFF), false);
        }

        fn narration(&self) -> String {
            self.0.clone()
        }
    }

    fn rows(n: usize) -> SelectionList<Row> {
        let mut list = SelectionList::new(ScreenRect::new(0, 0, 300, 100), 20).with_padding(0);
        list.replace_entries((0..n).map(|i| Row(format!("row {}", i))));
        list
    }

    #[test]
    fn test_scenario_fifty_rows() {
        let mut list = rows(50);
        assert_eq!(list.max_scroll(), 900.0);
        assert_eq!(list.visible_rows(), 0..5);
        list.set_scroll_amount(10000.0);
        assert_eq!(list.scroll_amount(), 900.0);
        assert_eq!(list.visible_rows(), 45..50);
        list.set_scroll_amount(-10000.0);
        assert_eq!(list.scroll_amount(), 0.0);
    }

    #[test]
    fn test_render_culls_and_clips() {
        let mut host = TestHost::new();
        let mut list = rows(50);
        list.set_scroll_amount(10.0);
        host.render(&mut list, Vec2::new(-1.0, -1.0));
        // row 0 straddles the top, row 5 straddles the bottom
        assert_eq!(list.rendered_rows(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(host.backend.texts(), (0..6).map(|i| format!("row {}", i)).collect::<Vec<_>>());
        let clip = Some(ScreenRect::new(0, 0, 300, 100));
        for (scissor, item) in host.backend.items() {
            if let graphics::backend::DrawItem::Text(_) = item {
                assert_eq!(scissor, clip);
            }
        }
    }

    #[test]
    fn test_empty_list_shows_message() {
        let mut host = TestHost::new();
        let mut list = rows(0).with_empty_message("No servers");
        host.render(&mut list, Vec2::zero());
        assert_eq!(host.backend.texts(), vec!["No servers".to_owned()]);
        let ctx = host.ctx();
        assert!(!list.mouse_scrolled(&ctx, Vec2::new(10.0, 10.0), ScrolledAmount::Lines(Vec2::new(0.0, -1.0))));
        assert!(!list.key_pressed(&ctx, KeyEvent::new(KeyCode::End)));
    }

    #[test]
    fn test_hit_testing() {
        let mut list = rows(50);
        list.set_scroll_amount(30.0);
        // row band is centered: 40..260
        assert_eq!(list.entry_at_position(Vec2::new(100.0, 0.0)), Some(1));
        assert_eq!(list.entry_at_position(Vec2::new(100.0, 9.0)), Some(1));
        assert_eq!(list.entry_at_position(Vec2::new(100.0, 10.0)), Some(2));
        assert_eq!(list.entry_at_position(Vec2::new(30.0, 50.0)), None);
        assert_eq!(list.entry_at_position(Vec2::new(100.0, 100.0)), None);
        assert_eq!(list.entry_at_position(Vec2::new(297.0, 50.0)), None);

        let short = rows(2);
        assert_eq!(short.entry_at_position(Vec2::new(100.0, 50.0)), None);
    }

    #[test]
    fn test_add_entry_to_top_keeps_view() {
        let mut list = rows(50);
        list.set_scroll_amount(100.0);
        list.set_selected(Some(7));
        let before = list.row_top(7);
        list.add_entry_to_top(Row("new".to_owned()));
        assert_eq!(list.scroll_amount(), 120.0);
        assert_eq!(list.selected(), Some(8));
        assert_eq!(list.row_top(8), before);
    }

    #[test]
    fn test_remove_entry_keeps_state_consistent() {
        let mut list = rows(10);
        list.set_focused_child(Some(9));
        assert_eq!(list.scroll_amount(), 100.0);
        list.remove_entry(3);
        assert_eq!(list.selected(), Some(8));
        assert_eq!(list.focused_entry(), Some(8));
        assert_eq!(list.scroll_amount(), 80.0);
        // removing the last row hands focus to the one above
        list.remove_entry(8);
        assert_eq!(list.selected(), Some(7));
        assert_eq!(list.focused_entry(), Some(7));
        list.clear_entries();
        assert_eq!(list.scroll_amount(), 0.0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_removing_focused_entry_keeps_focus_path() {
        let mut list = rows(3);
        change_focus(&mut list, &FocusPath::entry(1));
        list.remove_entry(1);
        assert_eq!(list.focused_entry(), Some(1));
        assert_eq!(list.current_focus_path(), Some(FocusPath::entry(1)));

        list.remove_entry(1);
        list.remove_entry(0);
        assert!(list.is_empty());
        assert_eq!(list.focused_entry(), None);
        assert_eq!(list.current_focus_path(), Some(FocusPath::Leaf));
        assert!(list.is_focused());

        let mut list = rows(3);
        change_focus(&mut list, &FocusPath::entry(2));
        list.replace_entries((0..5).map(|i| Row(format!("new {}", i))));
        assert_eq!(list.current_focus_path(), Some(FocusPath::Leaf));

        // an unfocused list doesn't gain focus from edits
        let mut list = rows(3);
        list.remove_entry(0);
        list.clear_entries();
        assert_eq!(list.current_focus_path(), None);
    }

    #[test]
    fn test_focus_scrolls_with_margin() {
        let mut list = rows(50);
        change_focus(&mut list, &FocusPath::entry(10));
        assert_eq!(list.selected(), Some(10));
        // row 10 plus one row below fits in the viewport
        assert_eq!(list.scroll_amount(), 140.0);
        assert_eq!(list.row_bottom(11), 100);

        change_focus(&mut list, &FocusPath::entry(5));
        assert_eq!(list.scroll_amount(), 80.0);
        assert_eq!(list.row_top(4), 0);

        clear_focus(&mut list);
        assert_eq!(list.focused_entry(), None);
        assert_eq!(list.selected(), Some(5));
    }

    #[test]
    fn test_arrow_navigation_walks_rows() {
        let mut list = rows(3);
        let down = FocusNavigation::Arrow(ScreenDirection::Down);
        let up = FocusNavigation::Arrow(ScreenDirection::Up);
        assert_eq!(list.next_focus_path(down), Some(FocusPath::entry(0)));
        change_focus(&mut list, &FocusPath::entry(2));
        assert_eq!(list.next_focus_path(down), None);
        assert_eq!(list.next_focus_path(up), Some(FocusPath::entry(1)));
        assert_eq!(list.next_focus_path(FocusNavigation::Tab { forward: true }), None);
    }

    #[test]
    fn test_keys_and_wheel() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut list = rows(50);
        assert!(list.key_pressed(&ctx, KeyEvent::new(KeyCode::End)));
        assert_eq!(list.focused_entry(), Some(49));
        assert_eq!(list.scroll_amount(), 900.0);
        assert!(list.key_pressed(&ctx, KeyEvent::new(KeyCode::PageUp)));
        assert_eq!(list.focused_entry(), Some(45));
        assert!(list.key_pressed(&ctx, KeyEvent::new(KeyCode::Home)));
        assert_eq!(list.scroll_amount(), 0.0);

        // one notch down is half a row
        assert!(list.mouse_scrolled(&ctx, Vec2::new(100.0, 50.0), ScrolledAmount::Lines(Vec2::new(0.0, -1.0))));
        assert_eq!(list.scroll_amount(), 10.0);
        assert!(!list.mouse_scrolled(&ctx, Vec2::new(100.0, 150.0), ScrolledAmount::Lines(Vec2::new(0.0, -1.0))));
    }

    #[test]
    fn test_scrollbar_drag() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut list = rows(50);
        // 100 * 100 / 1000 is below the minimum
        assert_eq!(list.thumb_height(), 32);
        assert_eq!(list.thumb_rect(), ScreenRect::new(294, 0, 6, 32));
        assert!(list.mouse_clicked(&ctx, Vec2::new(296.0, 10.0), MouseButton::Left));
        assert!(list.mouse_dragged(&ctx, Vec2::new(296.0, 44.0), MouseButton::Left, Vec2::new(0.0, 34.0)));
        // 900 / (100 - 32) per pixel
        assert!((list.scroll_amount() - 34.0 * 900.0 / 68.0).abs() < 1e-9);
        assert!(list.mouse_released(&ctx, Vec2::new(296.0, 44.0), MouseButton::Left));
        assert!(!list.mouse_dragged(&ctx, Vec2::new(296.0, 60.0), MouseButton::Left, Vec2::new(0.0, 16.0)));
    }

    #[test]
    fn test_click_selects_and_narrates() {
        let host = TestHost::new();
        let ctx = host.ctx();
        let mut list = rows(5);
        assert!(list.mouse_clicked(&ctx, Vec2::new(100.0, 45.0), MouseButton::Left));
        assert_eq!(list.selected(), Some(2));
        assert_eq!(list.current_focus_path(), Some(FocusPath::entry(2)));
        let mut out = NarrationOutput::new();
        list.update_narration(&mut out);
        assert_eq!(out.render(), vec![
            "Selected: row 2",
            "List row 3 out of 5",
            "Use up and down arrows to move between rows",
        ]);
    }
}
