//! Modal screen shown while a long-running task works.

use crate::{
    task::TaskHandle,
    gui::{
        context::GuiGlobalContext,
        event::{
            MouseButton,
            KeyCode,
            KeyEvent,
        },
        layout::{
            LinearLayout,
            FrameLayout,
        },
        screen::Screen,
        widget::Widget,
        widgets::{
            Button,
            Label,
        },
    },
};
use graphics::{
    DrawSurface,
    ScreenRect,
};
use vek::*;


const TITLE: usize = 0;
const STATUS: usize = 1;
const CANCEL: usize = 2;

/// Shows a task's title and latest status with a button to cancel it.
///
/// Cancelling only asks the task to stop. The screen stays up until the
/// task's completion arrives and the host closes it.
pub struct TaskScreen {
    screen: Screen,
    handle: TaskHandle,
}

impl TaskScreen {
    pub fn new(handle: TaskHandle, size: Extent2<i32>) -> Self {
        let title = handle.title().to_owned();
        let abort = handle.abort_handle();
        let mut screen = Screen::new(title.clone(), size);
        screen.add_child(Label::new(title, ScreenRect::new(0, 0, 300, 9)));
        screen.add_child(Label::new("", ScreenRect::new(0, 0, 300, 9)));
        screen.add_child(Button::sized_default("Cancel", move |_| {
            debug!("task cancelled by user");
            abort.abort();
        }));
        let screen = screen.with_layout(|root, size| {
            let sizes = root.children().map(|c| c.bounds().size()).collect::<Vec<_>>();
            let column = LinearLayout::vertical(12).arrange(Vec2::zero(), &sizes);
            let column = FrameLayout::default()
                .arrange_group(ScreenRect::from_pos_size(Vec2::zero(), size), column);
            column.apply_to(root, 0);
        });
        TaskScreen { screen, handle }
    }

    pub fn handle(&self) -> &TaskHandle {
        &self.handle
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn status_text(&self) -> Option<&str> {
        self.screen.root().child_as::<Label>(STATUS).map(|label| label.text())
    }

    pub fn resize(&mut self, size: Extent2<i32>) {
        self.screen.resize(size);
    }

    pub fn render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        mouse: Vec2<f32>,
        delta: f32,
    ) {
        let status = if self.handle.is_aborted() {
            "Cancelling...".to_owned()
        } else {
            self.handle.status()
        };
        if let Some(label) = self.screen.root_mut().child_as_mut::<Label>(STATUS) {
            label.set_text(status);
        }
        if let Some(cancel) = self.screen.root_mut().child_as_mut::<Button>(CANCEL) {
            cancel.base_mut().active = !self.handle.is_aborted();
        }
        self.screen.render(ctx, surface, mouse, delta);
    }

    pub fn mouse_clicked(&mut self, ctx: &GuiGlobalContext, pos: Vec2<f32>, button: MouseButton) -> bool {
        self.screen.mouse_clicked(ctx, pos, button)
    }

    /// Escape cancels rather than closing outright.
    pub fn key_pressed(&mut self, ctx: &GuiGlobalContext, key: KeyEvent) -> bool {
        if key.key == KeyCode::Escape {
            self.handle.abort();
            return true;
        }
        self.screen.key_pressed(ctx, key)
    }

    pub fn narrate(&self) -> Vec<String> {
        let mut lines = self.screen.narrate();
        if let Some(title) = self.screen.root().child_as::<Label>(TITLE) {
            if lines.first().map(|l| l != title.text()).unwrap_or(true) {
                lines.insert(0, title.text().to_owned());
            }
        }
        if let Some(status) = self.status_text() {
            if !status.is_empty() {
                lines.push(status.to_owned());
            }
        }
        lines
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        task::{GuiTaskQueue, LongRunningTask, TaskContext},
        gui::testing::TestHost,
    };
    use std::{
        thread,
        time::{Duration, Instant},
    };

    struct Download;

    impl LongRunningTask for Download {
        fn title(&self) -> String {
            "Downloading world".to_owned()
        }

        fn run(&mut self, ctx: &TaskContext) -> anyhow::Result<()> {
            ctx.set_status("Waiting");
            loop {
                ctx.checkpoint()?;
                thread::sleep(Duration::from_millis(1));
            }
        }
    }

    #[test]
    fn test_cancel_button_aborts() {
        let mut host = TestHost::new();
        let queue = GuiTaskQueue::<Option<bool>>::new();
        let handle = queue.spawner().start_long_running(Download, |state, result| {
            *state = Some(result.err().map(|e| e.is_aborted()).unwrap_or(false));
        });
        let mut screen = TaskScreen::new(handle, Extent2::new(320, 240));

        let deadline = Instant::now() + Duration::from_secs(10);
        while screen.handle().status() != "Waiting" {
            assert!(Instant::now() < deadline, "task never reported status");
            thread::sleep(Duration::from_millis(1));
        }
        host.render_with(|ctx, surface| screen.render(ctx, surface, Vec2::zero(), 0.0));
        assert_eq!(screen.status_text(), Some("Waiting"));

        let cancel = screen.screen().root().child(CANCEL).unwrap().bounds();
        let ctx = host.ctx();
        assert!(screen.mouse_clicked(&ctx, cancel.center().map(|n| n as f32), MouseButton::Left));
        assert!(screen.handle().is_aborted());

        let mut state = None;
        while state.is_none() {
            assert!(Instant::now() < deadline, "task never finished");
            queue.run_pending(&mut state);
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(state, Some(true));
    }
}
