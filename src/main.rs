mod display;

use std::collections::HashMap;
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
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use space_invaders::config::GameConfig;
use space_invaders::input::{FrameInput, MenuEvent};
use space_invaders::menu::Menu;
use space_invaders::session::{FrameOutcome, GameSession};
use space_invaders::store::{FileScoreStore, MemoryScoreStore, ScoreStore};

type Session = GameSession<StdRng, Box<dyn ScoreStore>>;

const FRAME: Duration = Duration::from_micros(16_667); // 60 steps per second

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser)]
#[command(name = "space_invaders")]
#[command(about = "Defend the planet from a descending alien formation")]
struct Args {
    /// TOML file overriding the default game parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for enemy fire and bonus timing (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Where to keep the high score (default: ~/.space_invaders_score)
    #[arg(long)]
    score_file: Option<PathBuf>,
    /// Keep the high score in memory only
    #[arg(long)]
    no_save: bool,
    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

// ── Menus ─────────────────────────────────────────────────────────────────────

/// Block until the menu yields a choice. `None` means quit immediately.
fn run_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut menu: Menu,
    high_score: u32,
    clear: bool,
) -> std::io::Result<Option<usize>> {
    display::render_menu(out, &menu, high_score, clear)?;
    while let Ok(ev) = rx.recv() {
        let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) = ev else {
            continue;
        };
        if is_quit(code, modifiers) {
            return Ok(None);
        }
        let menu_event = match code {
            KeyCode::Up | KeyCode::Char('w') => MenuEvent::Up,
            KeyCode::Down | KeyCode::Char('s') => MenuEvent::Down,
            KeyCode::Enter | KeyCode::Char(' ') => MenuEvent::Confirm,
            KeyCode::Esc => MenuEvent::Cancel,
            _ => continue,
        };
        if let Some(choice) = menu.select(menu_event) {
            return Ok(Some(choice));
        }
        display::render_menu(out, &menu, high_score, clear)?;
    }
    Ok(None)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Exit {
    Quit,
    MainMenu,
}

/// Runs fixed steps until the player quits or goes back to the main menu.
///
/// Held keys (movement) are tracked in `key_frame` like a key-state table;
/// fire and pause only count on the frame their press event arrives.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<Exit> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut input = FrameInput::default();
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    if is_quit(code, modifiers) {
                        return Ok(Exit::Quit);
                    }
                    match code {
                        KeyCode::Char(' ') => input.fire = true,
                        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => input.pause = true,
                        _ => {}
                    }
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        input.left = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]
            .iter()
            .any(|k| is_held(&key_frame, k, frame));
        input.right = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]
            .iter()
            .any(|k| is_held(&key_frame, k, frame));

        match session.update(&input) {
            FrameOutcome::Paused => {
                display::render(out, &session.snapshot())?;
                match run_menu(out, rx, Menu::pause(), session.high_score(), false)? {
                    Some(Menu::RESUME) => key_frame.clear(),
                    Some(Menu::BACK_TO_MENU) => return Ok(Exit::MainMenu),
                    _ => return Ok(Exit::Quit),
                }
            }
            FrameOutcome::GameOver { final_score, .. } => {
                display::render(out, &session.snapshot())?;
                match run_menu(out, rx, Menu::game_over(final_score), session.high_score(), false)? {
                    Some(Menu::PLAY_AGAIN) => {
                        session.reset();
                        key_frame.clear();
                    }
                    Some(Menu::MAIN_MENU) => return Ok(Exit::MainMenu),
                    _ => return Ok(Exit::Quit),
                }
            }
            FrameOutcome::Running | FrameOutcome::LevelUp { .. } => {
                display::render(out, &session.snapshot())?;
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn run<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    loop {
        match run_menu(out, rx, Menu::main(), session.high_score(), true)? {
            Some(Menu::START) => {
                session.reset();
                if let Exit::Quit = game_loop(out, session, rx)? {
                    return Ok(());
                }
            }
            _ => return Ok(()),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store: Box<dyn ScoreStore> = if args.no_save {
        Box::new(MemoryScoreStore::default())
    } else {
        let path = args.score_file.unwrap_or_else(FileScoreStore::default_path);
        Box::new(FileScoreStore::new(path))
    };
    let mut session =
        GameSession::new(config, rng, store).context("invalid game configuration")?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events where the terminal supports them; others fall
    // back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the game loop never waits
    // on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &mut session, &rx);

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(high_score = session.high_score(), "exiting");
    result.map_err(Into::into)
}
