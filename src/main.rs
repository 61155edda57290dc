mod display;

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;
use rand::thread_rng;

use viper_shooter::config::GameConfig;
use viper_shooter::driver::Game;
use viper_shooter::error::GameError;
use viper_shooter::surface::{InputState, Key};

use display::{SpriteSheet, TerminalSurface};

/// How often startup re-checks image readiness.
const READY_POLL: Duration = Duration::from_millis(10);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈128 ms at
/// the default cadence) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Log file; the terminal itself belongs to the game screen.
const LOG_FILE_ENV: &str = "VIPER_LOG_FILE";

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Collapse the raw key map into the core's logical key state.
fn input_state(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputState {
    let bindings: [(Key, &[KeyCode]); 5] = [
        (Key::Up, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
        (Key::Down, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        (Key::Left, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        (Key::Right, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        (Key::Fire, &[KeyCode::Char('z'), KeyCode::Char('Z'), KeyCode::Char(' ')]),
    ];
    let mut input = InputState::new();
    for (key, codes) in bindings {
        if any_held(key_frame, codes, frame) {
            input.press(key);
        }
    }
    input
}

fn init_logging() {
    let path = env::var(LOG_FILE_ENV).unwrap_or_else(|_| "viper_shooter.log".to_string());
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(&path) {
        Ok(file) => builder.target(env_logger::Target::Pipe(Box::new(file))),
        Err(_) => builder.target(env_logger::Target::Pipe(Box::new(std::io::sink()))),
    };
    builder.init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the keys that are still
/// "fresh" become the held set handed to the core, so fire and movement keys
/// can be held together.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    surface: &mut TerminalSurface,
    rx: &mpsc::Receiver<Event>,
    frame_interval: Duration,
) -> Result<(), GameError> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_secs_f64() * 1000.0;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    game.start(now_ms());

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let (cols, rows) = terminal::size()?;
        surface.resize(cols, rows);

        let input = input_state(&key_frame, frame);
        game.frame(surface, &input, now_ms());
        surface.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_interval {
            thread::sleep(frame_interval - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging();
    let config = GameConfig::load()?;

    let mut sprites = SpriteSheet::new();
    let mut game = Game::new(&config, &mut sprites, &mut thread_rng());
    game.wait_until_ready(&mut sprites, READY_POLL)?;
    info!("starting on a {}x{} field", config.field.width, config.field.height);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
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

    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(config.field.bounds(), cols, rows);
    let result = game_loop(&mut out, &mut game, &mut surface, &rx, config.frame_interval());

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
