
#[macro_use]
extern crate tracing;

use gui::{
    logging::init_logging,
    session::SessionState,
    settings::{
        GuiSettings,
        SETTINGS_FILE_NAME,
    },
    sound::NullSound,
    task::{
        GuiTaskQueue,
        LoadState,
        TaskSpawner,
    },
    gui::{
        GuiEffect,
        GuiGlobalContext,
        GuiHostState,
        ContainerWidget,
        Screen,
        SelectionList,
        ListEntry,
        MouseButton,
        KeyCode,
        KeyEvent,
        ScrolledAmount,
        layout::{
            HeaderAndFooterLayout,
            LinearLayout,
        },
        sprites::register_placeholder_sprites,
        widgets::{
            Button,
            Label,
            text_color,
        },
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
    surface::DrawStats,
};
use std::{
    env::args,
    path::PathBuf,
    thread,
    time::Duration,
};
use anyhow::{
    Context,
    Result,
    ensure,
};
use vek::*;


const CLI_INTRO: &'static str = r#"Headless GUI demo.

Builds the hosted-server list screen, feeds it a scripted sequence of input
and logs what each frame would have drawn."#;

const CLI_HELP: &'static str = r#"
Examples:

    [this command]
    Run the scripted session.

    [this command] --settings=gui_settings.json --log=demo.log
    Run with explicit settings and also log to a file.

Env var examples:
    RUST_LOG=gui=trace
    Changes logging levels"#;

const SCREEN_SIZE: Extent2<i32> = Extent2 { w: 427, h: 240 };
const ROW_HEIGHT: i32 = 36;
const FRAME: Duration = Duration::from_millis(50);

// root children
const TITLE: usize = 0;
const LIST: usize = 1;


/// One row of the server list.
struct ServerEntry {
    name: String,
    motd: String,
    players: u32,
}

impl ListEntry for ServerEntry {
    fn render(
        &mut self,
        ctx: &GuiGlobalContext,
        surface: &mut DrawSurface,
        _index: usize,
        row: ScreenRect,
        _mouse: Vec2<f32>,
        hovered: bool,
        _selected: bool,
        _delta: f32,
    ) {
        let name_color = if hovered { hex_color(0xFFFFA0FF) } else { hex_color(0xFFFFFFFF) };
        surface.draw_text(ctx.font, &self.name, row.pos() + Vec2::new(2, 2), name_color, true);
        let line = ctx.fonts.line_height(ctx.font);
        surface.draw_text(
            ctx.font,
            &self.motd,
            row.pos() + Vec2::new(2, 3 + line),
            text_color(false, 1.0),
            false,
        );
        let players = format!("{} online", self.players);
        let w = ctx.fonts.width(ctx.font, &players);
        surface.draw_text(
            ctx.font,
            &players,
            Vec2::new(row.right() - w - 2, row.y + 2),
            hex_color(0x808080FF),
            false,
        );
    }

    fn narration(&self) -> String {
        format!("{}, {}, {} online", self.name, self.motd, self.players)
    }
}


/// Everything the demo's task completions are allowed to touch.
struct DemoState {
    screen: Screen,
    /// Number of servers in the list once loaded.
    servers: LoadState<usize>,
    /// Invite count from the last fetch, for the main loop to hand to the
    /// session.
    invites: Option<u32>,
    refreshes: u32,
    closed: bool,
}

impl DemoState {
    fn list_mut(&mut self) -> &mut SelectionList<ServerEntry> {
        match self.screen.root_mut().child_as_mut(LIST) {
            Some(list) => list,
            None => panic!("server list screen lost its list"),
        }
    }

    fn set_status(&mut self, status: &str) {
        if let Some(title) = self.screen.root_mut().child_as_mut::<Label>(TITLE) {
            title.set_text(status);
        }
    }
}


fn build_screen(size: Extent2<i32>) -> Screen {
    let mut screen = Screen::new("Hosted Servers", size);
    screen.add_child(Label::new("Hosted Servers", ScreenRect::new(0, 0, 200, 12)));
    screen.add_child(
        SelectionList::<ServerEntry>::new(ScreenRect::new(0, 0, size.w, size.h - 66), ROW_HEIGHT)
            .with_row_width(260)
            .with_empty_message("Loading servers...")
            .with_narration_label("Servers"),
    );
    screen.add_child(
        Button::new("Join", ScreenRect::new(0, 0, 100, 20), |ctx| ctx.send_command("join"))
            .with_tooltip("Connect to the selected server"),
    );
    screen.add_child(Button::new("Refresh", ScreenRect::new(0, 0, 100, 20), |ctx| ctx.send_command("refresh")));
    screen.add_child(Button::new("Back", ScreenRect::new(0, 0, 100, 20), |ctx| ctx.close_screen()));
    screen.add_child(
        Button::new("Invites", ScreenRect::new(0, 0, 100, 20), |ctx| ctx.session_mut().set_pending_invites(0))
            .with_attention_badge(SessionState::needs_attention),
    );
    screen.with_layout(layout_screen)
}

fn layout_screen(root: &mut ContainerWidget, size: Extent2<i32>) {
    let sizes = |root: &ContainerWidget, range: std::ops::Range<usize>| range
        .filter_map(|i| root.child(i).map(|c| c.bounds().size()))
        .collect::<Vec<_>>();

    let header = sizes(root, TITLE..LIST);
    let footer = sizes(root, LIST + 1..root.len());
    let footer_layout = LinearLayout::horizontal(8);
    let footer_size = footer_layout.size(&footer);

    let mut frame = HeaderAndFooterLayout::new(size);
    frame.footer_height = 36;
    let list_size = Extent2::new(size.w, (size.h - frame.header_height - frame.footer_height).max(0));
    let arranged = frame.arrange(header[0], list_size, footer_size);

    if let Some(title) = root.child_mut(TITLE) {
        title.set_position(arranged.header.pos());
    }
    if let Some(list) = root.child_mut(LIST) {
        list.set_position(arranged.content.pos());
        list.set_size(arranged.content.size());
    }
    footer_layout
        .arrange(arranged.footer.pos(), &footer)
        .apply_to(root, LIST + 1);
}


/// Pretend to ask the hosting service for the server list and the number
/// of invites waiting.
fn fetch_servers(spawner: &TaskSpawner<DemoState>, refresh: u32) {
    spawner.spawn("fetch servers", move || {
        thread::sleep(Duration::from_millis(30));
        ensure!(refresh < 3, "hosting service rate limited the refresh");
        let servers = (0..12 + refresh * 3)
            .map(|i| ServerEntry {
                name: format!("Server {}", i + 1),
                motd: format!("A world hosted since day {}", i * 7 + 1),
                players: (i * 5 + refresh) % 11,
            })
            .collect::<Vec<_>>();
        Ok((servers, 2 - refresh.min(2)))
    }, |state, result| {
        let result = result.map(|(servers, invites)| {
            let n = servers.len();
            state.list_mut().replace_entries(servers);
            state.invites = Some(invites);
            n
        });
        state.servers = LoadState::from_result(result);
        if let Some(&n) = state.servers.loaded() {
            info!(n, "server list loaded");
            state.set_status("Hosted Servers");
        } else if let Some(e) = state.servers.failure() {
            warn!(%e, "server list failed to load");
            state.set_status("Couldn't load servers");
        }
    });
}


/// Scripted input, one step per frame.
#[derive(Debug, Copy, Clone)]
enum Step {
    Idle,
    Move(Vec2<f32>),
    Click(Vec2<f32>),
    Scroll(f32),
    Key(KeyCode),
}

fn script(list_area: ScreenRect) -> Vec<Step> {
    let row = |i: i32| Vec2::new(
        list_area.center().x as f32,
        (list_area.y + i * ROW_HEIGHT + ROW_HEIGHT / 2) as f32 + 4.0,
    );
    vec![
        Step::Idle,
        Step::Idle,
        Step::Move(row(0)),
        Step::Click(row(1)),
        Step::Scroll(-3.0),
        Step::Scroll(-3.0),
        Step::Key(KeyCode::Tab),
        Step::Key(KeyCode::ArrowDown),
        Step::Key(KeyCode::ArrowDown),
        Step::Key(KeyCode::End),
        Step::Key(KeyCode::Tab),
        Step::Key(KeyCode::Enter),
        Step::Key(KeyCode::Tab),
        Step::Key(KeyCode::Enter),
        Step::Idle,
        Step::Idle,
        Step::Key(KeyCode::Tab),
        Step::Key(KeyCode::Enter),
        Step::Idle,
        Step::Key(KeyCode::Escape),
    ]
}


fn main() {
    println!("{}", CLI_INTRO);
    let args = args().collect::<Vec<_>>();
    if args.get(1).map(String::as_str) == Some("--help") {
        println!("{}", CLI_HELP);
        return;
    }
    let log_file = args.iter()
        .filter_map(|arg| arg.strip_prefix("--log="))
        .next()
        .map(PathBuf::from);
    if let Err(e) = init_logging(log_file.as_deref()) {
        eprintln!("unable to initialize logging: {:#}", e);
    }
    let settings_path = args.iter()
        .filter_map(|arg| arg.strip_prefix("--settings="))
        .next()
        .unwrap_or(SETTINGS_FILE_NAME)
        .to_owned();
    if let Err(e) = run(PathBuf::from(settings_path)) {
        error!("{:?}", e);
    }
}

fn run(settings_path: PathBuf) -> Result<()> {
    let settings = GuiSettings::read(&settings_path);
    let mut atlas = SpriteAtlas::new();
    register_placeholder_sprites(&mut atlas, TextureId(0));
    let host = GuiHostState::new(FixedWidthFont::default(), NullSound, settings);
    let mut backend = RecordingBackend::new();

    let tasks = GuiTaskQueue::new();
    let spawner = tasks.spawner();
    let mut state = DemoState {
        screen: build_screen(SCREEN_SIZE),
        servers: LoadState::Loading,
        invites: None,
        refreshes: 0,
        closed: false,
    };
    fetch_servers(&spawner, state.refreshes);

    let list_area = state.screen.root().child(LIST)
        .map(|list| list.bounds())
        .context("server list screen has no list")?;
    let mut mouse = Vec2::new(-1.0, -1.0);
    let mut time = Duration::ZERO;
    let mut totals = DrawStats::default();

    for (frame, step) in script(list_area).into_iter().enumerate() {
        if state.closed {
            break;
        }
        // give the fetch thread a chance so the script sees a loaded list
        thread::sleep(FRAME);
        time += FRAME;
        tasks.run_pending(&mut state);
        if let Some(n) = state.invites.take() {
            host.session.borrow_mut().set_pending_invites(n);
        }

        let ctx = host.context(time);
        let consumed = match step {
            Step::Idle => false,
            Step::Move(pos) => {
                mouse = pos;
                false
            }
            Step::Click(pos) => {
                mouse = pos;
                let consumed = state.screen.mouse_clicked(&ctx, pos, MouseButton::Left);
                state.screen.mouse_released(&ctx, pos, MouseButton::Left);
                consumed
            }
            Step::Scroll(lines) => state.screen
                .mouse_scrolled(&ctx, mouse, ScrolledAmount::Lines(Vec2::new(0.0, lines))),
            Step::Key(key) => state.screen.key_pressed(&ctx, KeyEvent::new(key)),
        };

        backend.clear();
        let stats = {
            let mut surface = DrawSurface::new(&mut backend, &atlas, &host.fonts, SCREEN_SIZE);
            state.screen.render(&ctx, &mut surface, mouse, FRAME.as_secs_f32());
            surface.finish()
        };
        totals.draw_calls += stats.draw_calls;
        totals.quads += stats.quads;
        totals.texts += stats.texts;
        totals.scissor_changes += stats.scissor_changes;
        debug!(frame, ?step, consumed, ?stats, "frame");
        if host.settings.borrow().narrator.narrates_widgets() {
            info!(frame, narration = %state.screen.narrate().join(". "), "narrator");
        }

        let effects = host.effects.borrow_mut().drain();
        for effect in effects {
            match effect {
                GuiEffect::CloseScreen => {
                    info!("screen closed");
                    state.closed = true;
                }
                GuiEffect::SaveSettings => {
                    if let Err(e) = host.settings.borrow().write(&settings_path) {
                        warn!(%e, "unable to save settings");
                    }
                }
                GuiEffect::Command(command) => match command.as_str() {
                    "refresh" => {
                        state.refreshes += 1;
                        state.servers = LoadState::Loading;
                        state.set_status("Refreshing...");
                        state.list_mut().clear_entries();
                        fetch_servers(&spawner, state.refreshes);
                    }
                    "join" => {
                        let list = state.list_mut();
                        match list.selected_entry() {
                            Some(entry) => info!(server = %entry.name, "joining server"),
                            None => info!("join pressed with nothing selected"),
                        }
                    }
                    _ => warn!(%command, "unknown command"),
                },
            }
        }
    }

    info!(?totals, "demo finished");
    Ok(())
}
