//! Tooltips: sizing, positioning, and drawing.
//!
//! Widgets don't draw their tooltips directly, because a tooltip must end up
//! above everything else on screen. Instead they park one in the surface's
//! deferred tooltip slot during the frame, and `DrawSurface::finish` draws
//! whatever is parked there last.

use crate::{
    rect::ScreenRect,
    sprite::SpriteId,
    font::{
        FontId,
        FontMetrics,
    },
    surface::DrawSurface,
    util_hex_color::hex_color,
};
use vek::*;


/// Z offset tooltips are drawn at.
pub const TOOLTIP_Z: i32 = 400;

/// Padding between the tooltip content and the edge of its background.
pub const TOOLTIP_PADDING: i32 = 3;

/// Minimum distance kept between a tooltip and the edge of the screen.
pub const SCREEN_MARGIN: i32 = 4;


/// One vertical piece of a tooltip.
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipBlock {
    /// A single line of text.
    Text(String),
    /// A sprite drawn at a fixed size.
    Image {
        sprite: SpriteId,
        size: Extent2<i32>,
    },
}

impl TooltipBlock {
    /// Word-wrap `text` into one text block per line.
    pub fn wrapped(fonts: &dyn FontMetrics, font: FontId, text: &str, max_width: i32) -> Vec<TooltipBlock> {
        fonts.split_lines(font, text, max_width)
            .into_iter()
            .map(TooltipBlock::Text)
            .collect()
    }

    fn width(&self, fonts: &dyn FontMetrics, font: FontId) -> i32 {
        match self {
            &TooltipBlock::Text(ref text) => fonts.width(font, text),
            &TooltipBlock::Image { size, .. } => size.w,
        }
    }

    fn height(&self, fonts: &dyn FontMetrics, font: FontId) -> i32 {
        match self {
            &TooltipBlock::Text(_) => fonts.line_height(font) + 1,
            &TooltipBlock::Image { size, .. } => size.h + 2,
        }
    }
}

/// Content size of a list of blocks, excluding padding. A gap of two pixels
/// separates the first block from the rest.
pub fn tooltip_size(fonts: &dyn FontMetrics, font: FontId, blocks: &[TooltipBlock]) -> Extent2<i32> {
    let w = blocks.iter().map(|b| b.width(fonts, font)).max().unwrap_or(0);
    let mut h = blocks.iter().map(|b| b.height(fonts, font)).sum::<i32>();
    if blocks.len() > 1 {
        h += 2;
    }
    Extent2::new(w, h)
}


/// Strategy for choosing where a tooltip of a given size goes.
///
/// Whatever position is returned is clamped into the screen afterwards.
pub trait TooltipPositioner {
    fn position(&self, screen: Extent2<i32>, cursor: Vec2<i32>, size: Extent2<i32>) -> Vec2<i32>;
}

/// Up and to the right of the cursor, flipping to the left of the cursor if
/// that would run off the right edge.
#[derive(Debug, Copy, Clone, Default)]
pub struct DefaultTooltipPositioner;

impl TooltipPositioner for DefaultTooltipPositioner {
    fn position(&self, screen: Extent2<i32>, cursor: Vec2<i32>, size: Extent2<i32>) -> Vec2<i32> {
        let mut pos = cursor + Vec2::new(12, -12);
        if pos.x + size.w > screen.w {
            pos.x = (pos.x - 24 - size.w).max(SCREEN_MARGIN);
        }
        if pos.y + size.h + TOOLTIP_PADDING > screen.h {
            pos.y = screen.h - size.h - TOOLTIP_PADDING;
        }
        pos
    }
}

/// Just below a widget, or just above it if there's no room below. Used
/// when the tooltip belongs to keyboard focus rather than the cursor.
#[derive(Debug, Copy, Clone)]
pub struct BelowOrAboveWidgetTooltipPositioner {
    pub widget: ScreenRect,
}

impl TooltipPositioner for BelowOrAboveWidgetTooltipPositioner {
    fn position(&self, screen: Extent2<i32>, _cursor: Vec2<i32>, size: Extent2<i32>) -> Vec2<i32> {
        let mut pos = Vec2::new(
            self.widget.left() + TOOLTIP_PADDING,
            self.widget.bottom() + TOOLTIP_PADDING + 1,
        );
        if pos.y + size.h + TOOLTIP_PADDING > screen.h {
            pos.y = self.widget.top() - size.h - TOOLTIP_PADDING - 1;
        }
        if pos.x + size.w > screen.w {
            pos.x = (self.widget.right() - size.w - TOOLTIP_PADDING).max(SCREEN_MARGIN);
        }
        pos
    }
}

/// Clamp a tooltip's content position so the whole tooltip stays on screen.
/// A tooltip too large for the screen is pinned to the top-left margin.
pub fn clamp_to_screen(pos: Vec2<i32>, size: Extent2<i32>, screen: Extent2<i32>) -> Vec2<i32> {
    Vec2::new(
        pos.x.min(screen.w - size.w - SCREEN_MARGIN).max(SCREEN_MARGIN),
        pos.y.min(screen.h - size.h - SCREEN_MARGIN).max(SCREEN_MARGIN),
    )
}


/// A tooltip parked on a surface to be drawn at the end of the frame.
pub struct DeferredTooltip {
    pub font: FontId,
    pub blocks: Vec<TooltipBlock>,
    pub cursor: Vec2<i32>,
    pub positioner: Box<dyn TooltipPositioner>,
}

impl<'r> DrawSurface<'r> {
    /// Park a tooltip to be drawn on top of everything else when the frame
    /// finishes. Replaces any tooltip parked earlier in the frame.
    pub fn set_deferred_tooltip(&mut self, tooltip: DeferredTooltip) {
        if self.deferred_tooltip.is_some() {
            trace!("replacing deferred tooltip");
        }
        self.deferred_tooltip = Some(tooltip);
    }

    pub fn has_deferred_tooltip(&self) -> bool {
        self.deferred_tooltip.is_some()
    }

    /// Draw the parked tooltip now, if there is one, and empty the slot.
    pub fn render_deferred_tooltip(&mut self) {
        if let Some(tooltip) = self.deferred_tooltip.take() {
            self.render_tooltip(tooltip.font, &tooltip.blocks, tooltip.cursor, &*tooltip.positioner);
        }
    }

    /// Draw a tooltip now. Returns the screen region its background covers,
    /// or the empty rect if there was nothing to draw.
    ///
    /// Background and border go down first, then all text blocks, then all
    /// image blocks, each top to bottom.
    pub fn render_tooltip(
        &mut self,
        font: FontId,
        blocks: &[TooltipBlock],
        cursor: Vec2<i32>,
        positioner: &dyn TooltipPositioner,
    ) -> ScreenRect {
        if blocks.is_empty() {
            return ScreenRect::EMPTY;
        }
        let fonts = self.fonts;
        let size = tooltip_size(fonts, font, blocks);
        let screen = self.size;
        let pos = positioner.position(screen, cursor, size);
        let pos = clamp_to_screen(pos, size, screen);
        let background = ScreenRect::from_pos_size(pos, size).inflate(TOOLTIP_PADDING);

        self.push_pose();
        self.translate_z(TOOLTIP_Z);
        self.managed_batch(|s| {
            s.fill(background, hex_color(0x100010F0));
            let frame = background.inflate(-1);
            let border_top = hex_color(0x5000FF50);
            let border_bottom = hex_color(0x28007F50);
            s.fill(ScreenRect::new(frame.x, frame.y, frame.w, 1), border_top);
            s.fill(ScreenRect::new(frame.x, frame.bottom() - 1, frame.w, 1), border_bottom);
            let sides = [
                ScreenRect::new(frame.x, frame.y + 1, 1, frame.h - 2),
                ScreenRect::new(frame.right() - 1, frame.y + 1, 1, frame.h - 2),
            ];
            for side in sides {
                s.fill_gradient(side, 0, border_top, border_bottom);
            }

            let mut y = pos.y;
            for (i, block) in blocks.iter().enumerate() {
                if let &TooltipBlock::Text(ref text) = block {
                    s.draw_text(font, text, [pos.x, y], Rgba::white(), true);
                }
                y += block.height(fonts, font) + if i == 0 { 2 } else { 0 };
            }

            let mut y = pos.y;
            for (i, block) in blocks.iter().enumerate() {
                if let &TooltipBlock::Image { ref sprite, size } = block {
                    s.blit_sprite(sprite, ScreenRect::from_pos_size([pos.x, y + 1], size));
                }
                y += block.height(fonts, font) + if i == 0 { 2 } else { 0 };
            }
        });
        self.pop_pose();
        background
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        backend::{
            RecordingBackend,
            DrawItem,
            RenderState,
            BackendCall,
        },
        font::FixedWidthFont,
        sprite::{
            SpriteAtlas,
            SpriteRegion,
            SpriteScaling,
            TextureId,
        },
    };

    #[test]
    fn test_default_positioner_offsets_and_flips() {
        let screen = Extent2::new(400, 300);
        let size = Extent2::new(50, 10);
        let p = DefaultTooltipPositioner;
        assert_eq!(p.position(screen, Vec2::new(100, 100), size), Vec2::new(112, 88));
        assert_eq!(p.position(screen, Vec2::new(380, 100), size), Vec2::new(318, 88));
    }

    #[test]
    fn test_below_or_above_widget() {
        let screen = Extent2::new(400, 300);
        let size = Extent2::new(50, 20);
        let below = BelowOrAboveWidgetTooltipPositioner {
            widget: ScreenRect::new(10, 100, 100, 20),
        };
        assert_eq!(below.position(screen, Vec2::zero(), size), Vec2::new(13, 124));
        let above = BelowOrAboveWidgetTooltipPositioner {
            widget: ScreenRect::new(10, 280, 100, 20),
        };
        assert_eq!(above.position(screen, Vec2::zero(), size), Vec2::new(13, 256));
    }

    #[test]
    fn test_clamp_keeps_tooltip_on_screen() {
        let screen = Extent2::new(100, 100);
        assert_eq!(clamp_to_screen(Vec2::new(-20, 90), Extent2::new(30, 30), screen), Vec2::new(4, 66));
        assert_eq!(clamp_to_screen(Vec2::new(50, 50), Extent2::new(500, 10), screen), Vec2::new(4, 50));
    }

    #[test]
    fn test_tooltip_draws_background_then_text_then_images() {
        let mut atlas = SpriteAtlas::new();
        atlas.insert(SpriteId::new("icon"), SpriteRegion {
            texture: TextureId(7),
            uv_min: Vec2::zero(),
            uv_max: Vec2::one(),
            scaling: SpriteScaling::Stretch,
        });
        let font = FixedWidthFont::uniform(6, 9);
        let mut backend = RecordingBackend::new();
        let background = {
            let mut surface = DrawSurface::new(&mut backend, &atlas, &font, Extent2::new(400, 300));
            let blocks = vec![
                TooltipBlock::Image { sprite: SpriteId::new("icon"), size: Extent2::new(8, 8) },
                TooltipBlock::Text("first".to_owned()),
                TooltipBlock::Text("second".to_owned()),
            ];
            let bg = surface.render_tooltip(FontId::DEFAULT, &blocks, Vec2::new(50, 50), &DefaultTooltipPositioner);
            surface.finish();
            bg
        };
        // content 36x(10+10+10+2), cursor offset (12,-12), padding 3
        assert_eq!(background, ScreenRect::new(59, 35, 42, 38));

        let states: Vec<RenderState> = backend.calls
            .iter()
            .filter_map(|call| match call {
                &BackendCall::DrawBatch(ref batch) => Some(batch.key.state),
                _ => None,
            })
            .collect();
        assert_eq!(states, vec![
            RenderState::Solid,
            RenderState::Text(FontId::DEFAULT),
            RenderState::Textured(TextureId(7)),
        ]);
        assert_eq!(backend.texts(), vec!["first", "second"]);
        for (_, item) in backend.items() {
            match item {
                DrawItem::Quad(q) => assert_eq!(q.z, TOOLTIP_Z),
                DrawItem::Text(t) => assert_eq!(t.z, TOOLTIP_Z),
            }
        }
    }

    #[test]
    fn test_deferred_tooltip_drawn_last() {
        let atlas = SpriteAtlas::new();
        let font = FixedWidthFont::uniform(6, 9);
        let mut backend = RecordingBackend::new();
        {
            let mut surface = DrawSurface::new(&mut backend, &atlas, &font, Extent2::new(400, 300));
            surface.set_deferred_tooltip(DeferredTooltip {
                font: FontId::DEFAULT,
                blocks: vec![TooltipBlock::Text("tip".to_owned())],
                cursor: Vec2::new(10, 10),
                positioner: Box::new(DefaultTooltipPositioner),
            });
            surface.draw_text(FontId::DEFAULT, "body", [0, 0], Rgba::white(), false);
            surface.finish();
        }
        assert_eq!(backend.texts(), vec!["body", "tip"]);
    }
}
