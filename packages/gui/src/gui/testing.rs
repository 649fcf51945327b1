//! Headless fixtures for widget tests.

use crate::{
    settings::GuiSettings,
    sound::RecordingSound,
    gui::{
        context::{GuiHostState, GuiGlobalContext},
        sprites::register_placeholder_sprites,
        widget::{Widget, WidgetBase},
        event::MouseButton,
    },
};
use graphics::{
    DrawSurface,
    FixedWidthFont,
    RecordingBackend,
    ScreenRect,
    SpriteAtlas,
    TextureId,
    surface::DrawStats,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};
use vek::*;


pub const SCREEN_SIZE: Extent2<i32> = Extent2 { w: 320, h: 240 };

pub struct TestHost {
    pub host: GuiHostState<FixedWidthFont, RecordingSound>,
    pub atlas: SpriteAtlas,
    pub backend: RecordingBackend,
    pub time: Duration,
}

impl TestHost {
    pub fn new() -> Self {
        let mut atlas = SpriteAtlas::new();
        register_placeholder_sprites(&mut atlas, TextureId(0));
        TestHost {
            host: GuiHostState::new(
                FixedWidthFont::default(),
                RecordingSound::new(),
                GuiSettings::default(),
            ),
            atlas,
            backend: RecordingBackend::new(),
            time: Duration::ZERO,
        }
    }

    pub fn ctx(&self) -> GuiGlobalContext<'_> {
        self.host.context(self.time)
    }

    /// Render one frame with the cursor at `mouse`, recording into a freshly
    /// cleared backend.
    pub fn render(&mut self, widget: &mut dyn Widget, mouse: Vec2<f32>) -> DrawStats {
        self.render_with(|ctx, surface| widget.render(ctx, surface, mouse, 0.0))
    }

    /// Render one frame of whatever `f` draws.
    pub fn render_with<F>(&mut self, f: F) -> DrawStats
    where
        F: FnOnce(&GuiGlobalContext, &mut DrawSurface),
    {
        self.backend.clear();
        let ctx = self.host.context(self.time);
        let mut surface = DrawSurface::new(
            &mut self.backend,
            &self.atlas,
            &self.host.fonts,
            SCREEN_SIZE,
        );
        f(&ctx, &mut surface);
        surface.finish()
    }
}


/// Leaf widget which records what happens to it.
pub struct TrackedLeaf {
    base: WidgetBase,
    pub focus_calls: Rc<RefCell<Vec<bool>>>,
    pub clicks: Rc<Cell<u32>>,
    focusable: bool,
}

impl TrackedLeaf {
    pub fn new(rect: ScreenRect) -> Self {
        TrackedLeaf {
            base: WidgetBase::new(rect, "tracked leaf"),
            focus_calls: Rc::new(RefCell::new(Vec::new())),
            clicks: Rc::new(Cell::new(0)),
            focusable: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.base.active = false;
        self
    }

    /// Consumes clicks but never takes focus.
    pub fn unfocusable(mut self) -> Self {
        self.focusable = false;
        self
    }
}

impl Widget for TrackedLeaf {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn is_focusable(&self) -> bool {
        self.focusable
    }

    fn set_focused(&mut self, focused: bool) {
        self.focus_calls.borrow_mut().push(focused);
        self.base.focused = focused;
    }

    fn render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        mouse: Vec2<f32>,
        _delta: f32,
    ) {
        if self.base.begin_render(ctx, surface, mouse) {
            surface.fill(self.base.rect, Rgba::white());
        }
    }

    fn mouse_clicked(&mut self, _ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        if button == MouseButton::Left && self.base.hit(pos) {
            self.clicks.set(self.clicks.get() + 1);
            true
        } else {
            false
        }
    }
}
