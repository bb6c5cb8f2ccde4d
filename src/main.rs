mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::filter::EnvFilter;

use platformer::assets::{AssetCatalog, PRELOADABLES};
use platformer::compose;
use platformer::compute::{fire_bullet, toggle_pause, update};
use platformer::config::GameConfig;
use platformer::entities::{GameSession, GameStatus};
use platformer::input::{Action, FrameInput, KeyBindings};
use platformer::level;

/// Longest frame step fed to physics, so a stalled terminal cannot tunnel
/// actors through terrain.
const MAX_DELTA: f32 = 0.1;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 4;

#[derive(Debug, Parser)]
#[command(name = "platformer", about = "Side-scrolling terminal platformer")]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Level grid file replacing the built-in level
    #[arg(long)]
    level: Option<PathBuf>,
    /// Minimum milliseconds between shots (0 = unlimited)
    #[arg(long)]
    fire_rate: Option<u64>,
    /// Where to write logs; the terminal itself is busy drawing the game
    #[arg(long, default_value = "platformer.log")]
    log_file: PathBuf,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn held_input(bindings: &KeyBindings, key_frame: &HashMap<KeyCode, u64>, frame: u64) -> FrameInput {
    let mut input = FrameInput::default();
    for (code, _) in key_frame.iter() {
        if is_held(key_frame, code, frame) {
            for action in bindings.actions_for(code) {
                input.set(action);
            }
        }
    }
    input
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Everything `setup` needs that outlives a single session.
struct Game {
    config: GameConfig,
    assets: AssetCatalog,
    bindings: KeyBindings,
    grid: String,
}

impl Game {
    fn new_session(&self, again: bool) -> anyhow::Result<GameSession> {
        let (cols, rows) = terminal::size()?;
        let scale = self.config.scale;
        // Last row is reserved for the controls hint.
        let canvas_w = cols as f32 * scale.px_per_col;
        let canvas_h = rows.saturating_sub(1) as f32 * scale.px_per_row;
        let session = level::setup(&self.config, &self.assets, &self.grid, canvas_w, canvas_h, again)?;
        Ok(session)
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> anyhow::Result<MenuResult> {
    display::draw_title(out)?;

    // Block until the user makes a choice
    loop {
        let Ok(ev) = rx.recv() else {
            // Input thread is gone; nothing left to wait for.
            return Ok(MenuResult::Quit);
        };
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = ev {
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Restart,
}

/// Runs one session until the player quits or asks for a restart.
fn game_loop<W: Write>(
    out: &mut W,
    game: &Game,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<LoopExit> {
    let frame_len = Duration::from_millis(game.config.frame_ms.max(1));
    let clock = Instant::now();
    let mut last_tick = Instant::now();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    out.execute(terminal::Clear(terminal::ClearType::All))?;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let now = clock.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if session.status == GameStatus::GameOver =>
                        {
                            return Ok(LoopExit::Restart);
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => toggle_pause(session),
                        _ if game.bindings.matches(Action::Shoot, &code) => {
                            fire_bullet(session, now);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let delta = last_tick.elapsed().as_secs_f32().min(MAX_DELTA);
        last_tick = Instant::now();

        let input = held_input(&game.bindings, &key_frame, frame);
        for event in update(session, input, delta, now) {
            tracing::trace!(?event, "frame event");
        }

        let composed = compose::draw(session, &game.assets, game.config.scale)?;
        let (_, height) = terminal::size()?;
        display::render(out, &composed, session, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let mut config = GameConfig::load_or_default(cli.config.as_deref())?;
    if let Some(level) = cli.level {
        config.level_path = Some(level);
    }
    if let Some(rate) = cli.fire_rate {
        config.fire_rate_ms = rate;
    }

    let game = Game {
        assets: AssetCatalog::preload(PRELOADABLES, config.asset_dir.as_deref(), config.sky_seed)?,
        bindings: KeyBindings::from_config(&config.keys)?,
        grid: level::load_grid(&config)?,
        config,
    };
    tracing::info!(fire_rate_ms = game.config.fire_rate_ms, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ghostty / kitty-protocol terminals report key releases; others fall
    // back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(error = %err, "exiting with error");
    }
    result
}

fn run<W: Write>(out: &mut W, game: &Game, rx: &mpsc::Receiver<Event>) -> anyhow::Result<()> {
    if let MenuResult::Quit = show_menu(out, rx)? {
        return Ok(());
    }

    let mut again = false;
    loop {
        let mut session = game.new_session(again)?;
        match game_loop(out, game, &mut session, rx)? {
            LoopExit::Quit => {
                tracing::info!(score = session.score(), "quit");
                return Ok(());
            }
            LoopExit::Restart => again = true,
        }
    }
}
