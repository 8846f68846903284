//! Terminal tile collector (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no widget toolkit), ticking the session on a fixed 16ms step.

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tile_collector::adapter::{
    current_timestamp_ms, AnalyticsRecord, AppConfig, Analytics, AudioSink, BellAudio,
};
use tile_collector::core::{GameSnapshot, Session};
use tile_collector::input::{handle_key_event, handle_mouse_event, InputIntent};
use tile_collector::term::{
    next_cursor, FrameBuffer, GameView, HudView, RenderThrottle, TerminalRenderer, Viewport,
};
use tile_collector::types::{CoreEvent, GameAction, GameStatus, TileId, TICK_MS};

/// Redraw an unchanged frame at least this often.
const HEARTBEAT_MS: u64 = 500;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config)?;

    let seed = config.seed_or_time();
    tracing::info!(seed, level = config.level.number(), "starting");

    let analytics = match Analytics::start_from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!(error = %e, "analytics disabled");
            None
        }
    };

    let mut app = App {
        session: Session::new(config.level, seed),
        audio: BellAudio::new(io::stdout(), config.music),
        analytics,
        cursor: None,
        snap: GameSnapshot::default(),
    };
    app.track(AnalyticsRecord::page_view(current_timestamp_ms()));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(a) = app.analytics.take() {
        a.shutdown();
    }
    result
}

/// Log to `COLLECTOR_LOG_PATH` when set; stdout belongs to the renderer.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

struct App {
    session: Session,
    audio: BellAudio<io::Stdout>,
    analytics: Option<Analytics>,
    cursor: Option<TileId>,
    snap: GameSnapshot,
}

impl App {
    fn track(&self, record: AnalyticsRecord) {
        if let Some(a) = &self.analytics {
            a.track(record);
        }
    }

    fn hud(&self) -> HudView {
        HudView {
            music: self.audio.music_on(),
            analytics: self.analytics.is_some(),
            cursor: self.cursor,
        }
    }

    /// Returns `false` when the player asked to quit.
    fn handle(&mut self, intent: InputIntent, view: &GameView, viewport: Viewport) -> bool {
        match intent {
            InputIntent::Quit => return false,
            InputIntent::Game(action) => {
                if self.session.apply_action(action) && action != GameAction::GrantReward {
                    self.cursor = None;
                }
            }
            InputIntent::Share => {
                let context = match self.session.status() {
                    GameStatus::Lost => "game_over",
                    GameStatus::Won => "level_complete",
                    GameStatus::Playing => "in_game",
                };
                self.track(AnalyticsRecord::share_click(
                    "terminal",
                    context,
                    current_timestamp_ms(),
                ));
                self.session.grant_reward();
            }
            InputIntent::ToggleMusic => {
                let on = !self.audio.music_on();
                self.audio.set_music(on);
                self.track(AnalyticsRecord::music_toggle(on, current_timestamp_ms()));
            }
            InputIntent::NextTile | InputIntent::PrevTile => {
                self.cursor = next_cursor(
                    &self.snap,
                    self.cursor,
                    intent == InputIntent::NextTile,
                );
            }
            InputIntent::Confirm => {
                if let Some(id) = self.cursor.take() {
                    self.session.select_tile(id);
                }
            }
            InputIntent::Pick { column, row } => {
                if let Some(id) = view.tile_at(&self.snap, viewport, column, row) {
                    self.session.select_tile(id);
                    self.cursor = None;
                }
            }
        }
        true
    }

    /// Forward queued session events to audio and analytics.
    fn dispatch_events(&mut self) {
        for ev in self.session.take_events() {
            match ev {
                CoreEvent::Cue(cue) => self.audio.play(cue),
                _ => tracing::debug!(event = ?ev, "session event"),
            }
            if let Some(a) = &self.analytics {
                a.track_event(&ev);
            }
        }
    }
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let view = GameView::default();
    let mut throttle = RenderThrottle::new(HEARTBEAT_MS);
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        app.dispatch_events();

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        app.session.snapshot_into(&mut app.snap);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, app.snap.fingerprint()) {
            view.render_into(&app.snap, Some(&app.hud()), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let intent = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key),
                Event::Mouse(mouse) => handle_mouse_event(mouse),
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                    None
                }
                _ => None,
            };
            if let Some(intent) = intent {
                if !app.handle(intent, &view, viewport) {
                    return Ok(());
                }
                throttle.invalidate();
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.session.tick(TICK_MS);
        }
    }
}
