//! The immediate-mode drawing surface widgets render through.
//!
//! A `DrawSurface` lives for one frame. Every draw call is transformed by the
//! current pose, tagged with the current scissor, and appended to a pending
//! batch. Consecutive draws with the same render state and scissor share a
//! batch; anything else flushes the pending batch to the backend first.
//! Outside of `managed_batch` every call is flushed immediately, so batching
//! only ever changes how many submissions the backend sees, never what gets
//! drawn.

use crate::{
    rect::ScreenRect,
    scissor::ScissorStack,
    modifier::PoseStack,
    sprite::{
        SpriteId,
        SpriteResolver,
    },
    scaling::sprite_quads,
    font::{
        FontId,
        FontMetrics,
    },
    backend::{
        RenderBackend,
        RenderState,
        BatchKey,
        Batch,
        DrawItem,
        Quad,
        TextRun,
    },
    tooltip::DeferredTooltip,
};
use std::f64::consts::PI;
use vek::*;


/// Counters for one frame's worth of drawing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DrawStats {
    /// Batches submitted to the backend.
    pub draw_calls: u32,
    /// Quads submitted, after culling.
    pub quads: u32,
    /// Text runs submitted.
    pub texts: u32,
    /// Times the backend's scissor was changed.
    pub scissor_changes: u32,
}


/// Per-frame drawing context.
pub struct DrawSurface<'r> {
    pub(crate) backend: &'r mut dyn RenderBackend,
    pub(crate) sprites: &'r dyn SpriteResolver,
    pub(crate) fonts: &'r dyn FontMetrics,
    pub(crate) size: Extent2<i32>,
    scissor: ScissorStack,
    // what the backend was last told
    applied_scissor: Option<ScreenRect>,
    pose: PoseStack,
    pending: Option<Batch>,
    managed_depth: u32,
    stats: DrawStats,
    pub(crate) deferred_tooltip: Option<DeferredTooltip>,
}

impl<'r> DrawSurface<'r> {
    /// Begin a frame on a GUI-space viewport of the given size. The backend
    /// is assumed to start the frame unclipped.
    pub fn new(
        backend: &'r mut dyn RenderBackend,
        sprites: &'r dyn SpriteResolver,
        fonts: &'r dyn FontMetrics,
        size: Extent2<i32>,
    ) -> Self {
        DrawSurface {
            backend,
            sprites,
            fonts,
            size,
            scissor: ScissorStack::new(),
            applied_scissor: None,
            pose: PoseStack::new(),
            pending: None,
            managed_depth: 0,
            stats: DrawStats::default(),
            deferred_tooltip: None,
        }
    }

    /// GUI-space size of the viewport.
    pub fn size(&self) -> Extent2<i32> {
        self.size
    }

    pub fn fonts(&self) -> &'r dyn FontMetrics {
        self.fonts
    }

    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    /// Finish the frame: render the deferred tooltip if any, flush, and
    /// leave the backend unclipped.
    pub fn finish(mut self) -> DrawStats {
        self.render_deferred_tooltip();
        self.flush();
        if !self.scissor.is_empty() {
            warn!(depth = self.scissor.depth(), "frame finished with unbalanced scissor stack");
        }
        if self.pose.depth() != 0 {
            warn!(depth = self.pose.depth(), "frame finished with unbalanced pose stack");
        }
        if self.applied_scissor.is_some() {
            self.backend.set_scissor(None);
            self.applied_scissor = None;
            self.stats.scissor_changes += 1;
        }
        trace!(stats = ?self.stats, "frame finished");
        self.stats
    }

    // ==== batching ====

    /// Submit the pending batch, if any.
    pub fn flush(&mut self) {
        let batch = match self.pending.take() {
            Some(batch) => batch,
            None => return,
        };
        if batch.key.scissor != self.applied_scissor {
            self.backend.set_scissor(batch.key.scissor);
            self.applied_scissor = batch.key.scissor;
            self.stats.scissor_changes += 1;
        }
        self.backend.draw_batch(&batch);
        self.stats.draw_calls += 1;
    }

    /// Run `f` with per-call flushing suppressed, so that runs of compatible
    /// draws within it coalesce. Flushes before and after.
    pub fn managed_batch<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        self.flush();
        self.managed_depth += 1;
        let t = f(self);
        self.managed_depth -= 1;
        self.flush();
        t
    }

    fn submit(&mut self, state: RenderState, item: DrawItem) {
        let key = BatchKey {
            state,
            scissor: self.scissor.current(),
        };
        if self.pending.as_ref().map(|b| b.key != key).unwrap_or(false) {
            self.flush();
        }
        match item {
            DrawItem::Quad(_) => self.stats.quads += 1,
            DrawItem::Text(_) => self.stats.texts += 1,
        }
        match self.pending {
            Some(ref mut batch) => batch.items.push(item),
            None => self.pending = Some(Batch {
                key,
                items: vec![item],
            }),
        }
        if self.managed_depth == 0 {
            self.flush();
        }
    }

    /// Transform a local rectangle to screen space, or `None` if it can't
    /// possibly be visible.
    fn visible_rect(&self, rect: ScreenRect) -> Option<ScreenRect> {
        let rect = self.pose.current().transform.apply_rect(&rect);
        if rect.is_empty() {
            return None;
        }
        match self.scissor.current() {
            Some(clip) if !clip.overlaps(&rect) => None,
            _ => Some(rect),
        }
    }

    // ==== pose ====

    pub fn push_pose(&mut self) {
        self.pose.push();
    }

    /// Panics if there is no matching `push_pose`.
    pub fn pop_pose(&mut self) {
        self.pose.pop();
    }

    /// Translate everything drawn until the matching `pop_pose`.
    pub fn translate<V: Into<Vec2<f32>>>(&mut self, v: V) {
        self.pose.translate(v);
    }

    /// Offset the z of everything drawn until the matching `pop_pose`.
    pub fn translate_z(&mut self, dz: i32) {
        self.pose.translate_z(dz);
    }

    /// Map a point from local space to screen space.
    pub fn to_screen(&self, pos: Vec2<f32>) -> Vec2<f32> {
        self.pose.current().transform.apply(pos)
    }

    // ==== scissor ====

    /// Narrow clipping to `rect` (in local space) until the matching
    /// `disable_scissor`. Returns the screen-space region actually in effect.
    pub fn enable_scissor(&mut self, rect: ScreenRect) -> ScreenRect {
        let rect = self.pose.current().transform.apply_rect(&rect);
        self.scissor.push(rect)
    }

    /// Restore the clipping in effect before the matching `enable_scissor`.
    ///
    /// Panics if there is none.
    pub fn disable_scissor(&mut self) {
        self.scissor.pop();
    }

    /// Whether a screen-space position survives the current clip.
    pub fn scissor_contains(&self, pos: Vec2<f32>) -> bool {
        self.scissor.contains(pos)
    }

    pub fn current_scissor(&self) -> Option<ScreenRect> {
        self.scissor.current()
    }

    // ==== fills ====

    pub fn fill(&mut self, rect: ScreenRect, color: Rgba<f32>) {
        self.fill_z(rect, 0, color);
    }

    pub fn fill_z(&mut self, rect: ScreenRect, z: i32, color: Rgba<f32>) {
        self.fill_gradient(rect, z, color, color);
    }

    /// Fill with a vertical gradient from `top` to `bottom`.
    pub fn fill_gradient(&mut self, rect: ScreenRect, z: i32, top: Rgba<f32>, bottom: Rgba<f32>) {
        let rect = match self.visible_rect(rect) {
            Some(rect) => rect,
            None => return,
        };
        let z = self.pose.current().z + z;
        self.submit(RenderState::Solid, DrawItem::Quad(Quad {
            rect,
            uv_min: Vec2::zero(),
            uv_max: Vec2::zero(),
            color_top: top,
            color_bottom: bottom,
            z,
        }));
    }

    /// One pixel border just inside `rect`.
    pub fn outline(&mut self, rect: ScreenRect, color: Rgba<f32>) {
        if rect.is_empty() {
            return;
        }
        self.fill(ScreenRect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill(ScreenRect::new(rect.x, rect.bottom() - 1, rect.w, 1), color);
        self.fill(ScreenRect::new(rect.x, rect.y + 1, 1, rect.h - 2), color);
        self.fill(ScreenRect::new(rect.right() - 1, rect.y + 1, 1, rect.h - 2), color);
    }

    // ==== sprites ====

    pub fn blit_sprite(&mut self, id: &SpriteId, rect: ScreenRect) {
        self.blit_sprite_tinted(id, rect, 0, Rgba::white());
    }

    pub fn blit_sprite_z(&mut self, id: &SpriteId, rect: ScreenRect, z: i32) {
        self.blit_sprite_tinted(id, rect, z, Rgba::white());
    }

    /// Draw a sprite over `rect` according to its scaling mode, multiplied by
    /// `tint`.
    ///
    /// Panics if the sprite is not known to the resolver. Sprite ids are
    /// compiled into the widgets that use them, so a missing one is a bug
    /// rather than a runtime condition.
    pub fn blit_sprite_tinted(&mut self, id: &SpriteId, rect: ScreenRect, z: i32, tint: Rgba<f32>) {
        let region = match self.sprites.resolve(id) {
            Some(region) => region,
            None => panic!("unknown sprite {}", id),
        };
        let z = self.pose.current().z + z;
        for quad in sprite_quads(&region, rect) {
            let dest = match self.visible_rect(quad.dest) {
                Some(dest) => dest,
                None => continue,
            };
            self.submit(RenderState::Textured(region.texture), DrawItem::Quad(Quad {
                rect: dest,
                uv_min: quad.uv_min,
                uv_max: quad.uv_max,
                color_top: tint,
                color_bottom: tint,
                z,
            }));
        }
    }

    // ==== text ====

    /// Draw a single line of text with its top-left at `pos`. Returns the
    /// width of the text.
    pub fn draw_text<V: Into<Vec2<i32>>>(
        &mut self,
        font: FontId,
        text: &str,
        pos: V,
        color: Rgba<f32>,
        shadow: bool,
    ) -> i32 {
        let width = self.fonts.width(font, text);
        if text.is_empty() {
            return width;
        }
        let pos = pos.into();
        let screen = self.pose.current().transform.apply(pos.map(|n| n as f32));
        let z = self.pose.current().z;
        self.submit(RenderState::Text(font), DrawItem::Text(TextRun {
            pos: screen.map(|n| n.round() as i32),
            text: text.to_owned(),
            color,
            shadow,
            z,
        }));
        width
    }

    /// Draw a shadowed line of text horizontally centered on `center_x`.
    pub fn draw_centered_text(
        &mut self,
        font: FontId,
        text: &str,
        center_x: i32,
        y: i32,
        color: Rgba<f32>,
    ) -> i32 {
        let width = self.fonts.width(font, text);
        self.draw_text(font, text, [center_x - width / 2, y], color, true)
    }

    /// Word-wrap `text` to `max_width` and draw it line by line. Returns the
    /// total height drawn.
    pub fn draw_wrapped_text<V: Into<Vec2<i32>>>(
        &mut self,
        font: FontId,
        text: &str,
        pos: V,
        max_width: i32,
        color: Rgba<f32>,
        shadow: bool,
    ) -> i32 {
        let pos = pos.into();
        let line_height = self.fonts.line_height(font);
        let lines = self.fonts.split_lines(font, text, max_width);
        for (i, line) in lines.iter().enumerate() {
            self.draw_text(font, line, [pos.x, pos.y + i as i32 * line_height], color, shadow);
        }
        lines.len() as i32 * line_height
    }

    /// Draw a line of text inside `rect`, vertically centered.
    ///
    /// Text that fits is horizontally centered. Text that doesn't is clipped
    /// to `rect` and scrolls back and forth over time, pausing at each end,
    /// with `time` being seconds since some fixed epoch.
    pub fn draw_scrolling_text(
        &mut self,
        font: FontId,
        text: &str,
        rect: ScreenRect,
        color: Rgba<f32>,
        time: f64,
    ) {
        let width = self.fonts.width(font, text);
        let line_height = self.fonts.line_height(font);
        let y = (rect.top() + rect.bottom() - line_height) / 2 + 1;
        if width > rect.w {
            let overflow = width - rect.w;
            let period = (overflow as f64 * 0.5).max(3.0);
            let phase = (PI / 2.0 * (2.0 * PI * time / period).cos()).sin() / 2.0 + 0.5;
            let offset = phase * overflow as f64;
            self.enable_scissor(rect);
            self.draw_text(font, text, [rect.left() - offset as i32, y], color, true);
            self.disable_scissor();
        } else {
            self.draw_centered_text(font, text, (rect.left() + rect.right()) / 2, y, color);
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        backend::{
            RecordingBackend,
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

    fn atlas() -> SpriteAtlas {
        let mut atlas = SpriteAtlas::new();
        for (i, name) in ["a", "b"].iter().enumerate() {
            atlas.insert(SpriteId::new(name), SpriteRegion {
                texture: TextureId(i as u32),
                uv_min: Vec2::zero(),
                uv_max: Vec2::one(),
                scaling: SpriteScaling::Stretch,
            });
        }
        atlas
    }

    fn draw_mixed(surface: &mut DrawSurface) {
        let a = SpriteId::new("a");
        let b = SpriteId::new("b");
        surface.blit_sprite(&a, ScreenRect::new(0, 0, 10, 10));
        surface.blit_sprite(&a, ScreenRect::new(10, 0, 10, 10));
        surface.blit_sprite(&b, ScreenRect::new(20, 0, 10, 10));
        surface.fill(ScreenRect::new(0, 20, 5, 5), Rgba::red());
        surface.fill(ScreenRect::new(5, 20, 5, 5), Rgba::red());
    }

    #[test]
    fn test_managed_batch_coalesces_same_key() {
        let atlas = atlas();
        let font = FixedWidthFont::default();

        let mut unbatched = RecordingBackend::new();
        let stats = {
            let mut surface = DrawSurface::new(&mut unbatched, &atlas, &font, Extent2::new(100, 100));
            draw_mixed(&mut surface);
            surface.finish()
        };
        assert_eq!(stats.draw_calls, 5);

        let mut batched = RecordingBackend::new();
        let stats = {
            let mut surface = DrawSurface::new(&mut batched, &atlas, &font, Extent2::new(100, 100));
            surface.managed_batch(|s| draw_mixed(s));
            surface.finish()
        };
        assert_eq!(stats.draw_calls, 3);
        assert_eq!(stats.quads, 5);

        // same output either way
        assert_eq!(batched.items(), unbatched.items());
    }

    #[test]
    fn test_scissor_applied_before_draw() {
        let atlas = atlas();
        let font = FixedWidthFont::default();
        let mut backend = RecordingBackend::new();
        {
            let mut surface = DrawSurface::new(&mut backend, &atlas, &font, Extent2::new(200, 200));
            surface.enable_scissor(ScreenRect::new(0, 0, 100, 100));
            let effective = surface.enable_scissor(ScreenRect::new(50, 50, 200, 200));
            assert_eq!(effective, ScreenRect::new(50, 50, 50, 50));
            surface.fill(ScreenRect::new(60, 60, 10, 10), Rgba::white());
            // entirely outside the clip
            surface.fill(ScreenRect::new(0, 0, 10, 10), Rgba::white());
            surface.disable_scissor();
            surface.disable_scissor();
            surface.fill(ScreenRect::new(0, 0, 10, 10), Rgba::white());
            surface.finish();
        }
        let calls = &backend.calls;
        assert_eq!(calls[0], BackendCall::SetScissor(Some(ScreenRect::new(50, 50, 50, 50))));
        assert!(matches!(calls[1], BackendCall::DrawBatch(_)));
        assert_eq!(calls[2], BackendCall::SetScissor(None));
        assert!(matches!(calls[3], BackendCall::DrawBatch(_)));
        assert_eq!(calls.len(), 4);
    }

    #[test]
    fn test_pose_translates_draws_and_scissor() {
        let atlas = atlas();
        let font = FixedWidthFont::default();
        let mut backend = RecordingBackend::new();
        {
            let mut surface = DrawSurface::new(&mut backend, &atlas, &font, Extent2::new(200, 200));
            surface.push_pose();
            surface.translate([10.0, 20.0]);
            surface.translate_z(50);
            assert_eq!(surface.enable_scissor(ScreenRect::new(0, 0, 30, 30)), ScreenRect::new(10, 20, 30, 30));
            surface.fill_z(ScreenRect::new(1, 1, 5, 5), 2, Rgba::white());
            surface.draw_text(FontId::DEFAULT, "hi", [3, 4], Rgba::white(), false);
            surface.disable_scissor();
            surface.pop_pose();
            surface.finish();
        }
        let quads = backend.quads();
        assert_eq!(quads[0].rect, ScreenRect::new(11, 21, 5, 5));
        assert_eq!(quads[0].z, 52);
        match &backend.items()[1].1 {
            DrawItem::Text(run) => assert_eq!(run.pos, Vec2::new(13, 24)),
            item => panic!("expected text, got {:?}", item),
        }
    }

    #[test]
    fn test_draw_text_returns_width() {
        let atlas = atlas();
        let font = FixedWidthFont::uniform(6, 9);
        let mut backend = RecordingBackend::new();
        let mut surface = DrawSurface::new(&mut backend, &atlas, &font, Extent2::new(200, 200));
        assert_eq!(surface.draw_text(FontId::DEFAULT, "abcd", [0, 0], Rgba::white(), true), 24);
        assert_eq!(surface.draw_text(FontId::DEFAULT, "", [0, 0], Rgba::white(), true), 0);
        assert_eq!(surface.draw_wrapped_text(FontId::DEFAULT, "aa bb", [0, 0], 12, Rgba::white(), false), 18);
        let stats = surface.finish();
        assert_eq!(stats.texts, 3);
    }

    #[test]
    fn test_scrolling_text_clips_when_overflowing() {
        let atlas = atlas();
        let font = FixedWidthFont::uniform(6, 9);
        let mut backend = RecordingBackend::new();
        {
            let mut surface = DrawSurface::new(&mut backend, &atlas, &font, Extent2::new(200, 200));
            surface.draw_scrolling_text(FontId::DEFAULT, "short", ScreenRect::new(0, 0, 100, 20), Rgba::white(), 0.0);
            surface.draw_scrolling_text(
                FontId::DEFAULT,
                "a considerably longer line",
                ScreenRect::new(0, 30, 40, 20),
                Rgba::white(),
                1.0,
            );
            surface.finish();
        }
        let items = backend.items();
        assert_eq!(items[0].0, None);
        match &items[0].1 {
            DrawItem::Text(run) => assert_eq!(run.pos.x, 50 - 15),
            item => panic!("expected text, got {:?}", item),
        }
        assert_eq!(items[1].0, Some(ScreenRect::new(0, 30, 40, 20)));
    }

    #[test]
    #[should_panic(expected = "unknown sprite")]
    fn test_unknown_sprite_panics() {
        let atlas = atlas();
        let font = FixedWidthFont::default();
        let mut backend = RecordingBackend::new();
        let mut surface = DrawSurface::new(&mut backend, &atlas, &font, Extent2::new(200, 200));
        surface.blit_sprite(&SpriteId::new("nope"), ScreenRect::new(0, 0, 1, 1));
    }
}
