//! Property tests for selection list scrolling and row culling.

use gui::{
    settings::GuiSettings,
    sound::NullSound,
    gui::{
        GuiGlobalContext,
        GuiHostState,
        ListEntry,
        SelectionList,
        sprites::register_placeholder_sprites,
        widget::Widget,
    },
};
use graphics::{
    DrawSurface,
    FixedWidthFont,
    RecordingBackend,
    ScreenRect,
    SpriteAtlas,
    TextureId,
    hex_color,
};
use proptest::prelude::*;
use std::time::Duration;
use vek::*;


struct Row(usize);

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
        surface.draw_text(ctx.font, &format!("row {}", self.0), row.pos(), hex_color(0xFFFFFFFF), false);
    }

    fn narration(&self) -> String {
        format!("row {}", self.0)
    }
}

fn list(n: usize, row_height: i32, viewport_h: i32, padding: i32) -> SelectionList<Row> {
    let mut list = SelectionList::new(ScreenRect::new(0, 10, 300, viewport_h), row_height)
        .with_padding(padding);
    list.replace_entries((0..n).map(Row));
    list
}

fn render(list: &mut SelectionList<Row>) {
    let mut atlas = SpriteAtlas::new();
    register_placeholder_sprites(&mut atlas, TextureId(0));
    let host = GuiHostState::new(FixedWidthFont::default(), NullSound, GuiSettings::default());
    let mut backend = RecordingBackend::new();
    let ctx = host.context(Duration::ZERO);
    let mut surface = DrawSurface::new(&mut backend, &atlas, &host.fonts, Extent2::new(320, 480));
    list.render(&ctx, &mut surface, Vec2::new(-1.0, -1.0), 0.0);
    surface.finish();
}

fn list_strategy() -> impl Strategy<Value = (usize, i32, i32, i32)> {
    (0usize..=200, 1i32..=40, 20i32..=200, 0i32..=8)
}

proptest! {
    #[test]
    fn scroll_always_clamped(
        (n, rh, h, pad) in list_strategy(),
        amount in prop_oneof![any::<f64>(), -5000.0f64..5000.0],
    ) {
        let mut list = list(n, rh, h, pad);
        list.set_scroll_amount(amount);
        let scroll = list.scroll_amount();
        prop_assert!(scroll >= 0.0);
        prop_assert!(scroll <= list.max_scroll());
    }

    #[test]
    fn visible_rows_match_overlap(
        (n, rh, h, pad) in list_strategy(),
        amount in -100.0f64..10000.0,
    ) {
        let mut list = list(n, rh, h, pad);
        list.set_scroll_amount(amount);
        let top = 10;
        let bottom = 10 + h;
        let expected = (0..n)
            .filter(|&i| list.row_top(i) < bottom && list.row_bottom(i) > top)
            .collect::<Vec<_>>();
        prop_assert_eq!(list.visible_rows().collect::<Vec<_>>(), expected.clone());

        render(&mut list);
        prop_assert_eq!(list.rendered_rows().to_vec(), expected);
    }

    #[test]
    fn visible_rows_hit_test_to_themselves(
        (n, rh, h, pad) in list_strategy(),
        amount in 0.0f64..10000.0,
    ) {
        let mut list = list(n, rh, h, pad);
        list.set_scroll_amount(amount);
        let x = list.row_left() as f32 + 1.5;
        for i in list.visible_rows() {
            // first pixel of the row that's inside the viewport
            let y = list.row_top(i).max(10) as f32 + 0.5;
            prop_assert_eq!(list.entry_at_position(Vec2::new(x, y)), Some(i));

            // middle and last pixel rows, where they're on screen
            let middle = list.row_top(i) + rh / 2;
            let last = list.row_bottom(i) - 1;
            for py in [middle, last] {
                if py >= 10 && py < 10 + h {
                    prop_assert_eq!(list.entry_at_position(Vec2::new(x, py as f32 + 0.5)), Some(i));
                }
            }
        }
        prop_assert_eq!(list.entry_at_position(Vec2::new(x, 9.5)), None);
        prop_assert_eq!(list.entry_at_position(Vec2::new(x, (10 + h) as f32 + 0.5)), None);
    }
}

#[test]
fn fifty_rows_scroll_to_end() {
    let mut list = list(50, 20, 100, 0);
    assert_eq!(list.visible_rows(), 0..5);
    list.set_scroll_amount(10000.0);
    assert_eq!(list.scroll_amount(), 900.0);
    assert_eq!(list.visible_rows(), 45..50);
    render(&mut list);
    assert_eq!(list.rendered_rows(), &[45, 46, 47, 48, 49]);
}
