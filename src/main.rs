use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use asteroids_reloaded::config::Options;
use asteroids_reloaded::context::SimContext;
use asteroids_reloaded::display::TerminalSurface;
use asteroids_reloaded::driver::{run_frame, FrameClock, FRAME};
use asteroids_reloaded::error::GameError;
use asteroids_reloaded::input::{CellScale, InputEvent, InputMapper, Key};
use asteroids_reloaded::persistence::FileStore;
use asteroids_reloaded::scenes::Game;
use asteroids_reloaded::session::Session;
use asteroids_reloaded::surface::{center_text, Color};

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the renderer, so logs go to a file.  Without one
/// the game runs unlogged.
fn init_logging(path: &Path) {
    let Ok(file) = File::create(path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input is drained without blocking at the top of every frame; held keys
/// that stop repeating are released by the mapper.  While paused only the
/// pause keys and Q are live.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut ctx: SimContext,
    store: FileStore,
) -> Result<(), GameError> {
    let (columns, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(ctx.width, ctx.height, columns, rows);
    let mut mapper = InputMapper::new(CellScale::new(ctx.width, ctx.height, columns, rows));

    let session = Session::new(Box::new(store), ctx.center());
    let mut game = Game::new(&mut ctx, session);
    let mut clock = FrameClock::new();
    let epoch = Instant::now();

    loop {
        let frame_start = Instant::now();
        let now = epoch.elapsed().as_secs_f64() * 1000.0;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(c, r) = ev {
                surface.resize(c, r);
                mapper.scale = CellScale::new(ctx.width, ctx.height, c, r);
                continue;
            }
            for input in mapper.translate(&ev, clock.frame_count()) {
                match input {
                    InputEvent::Quit | InputEvent::KeyDown(Key::Q) => return Ok(()),
                    InputEvent::KeyDown(Key::Esc | Key::P) if clock.is_paused() => {
                        clock.resume(now);
                        info!("resumed");
                    }
                    _ if clock.is_paused() => {}
                    InputEvent::KeyDown(key) => {
                        game.key_down(key, &mut ctx);
                    }
                    InputEvent::KeyUp(key) => {
                        game.key_up(key, &mut ctx);
                    }
                    InputEvent::Touch(touch) => {
                        game.touch(&touch, &mut ctx);
                    }
                }
            }
        }
        if ctx.quit_requested() {
            return Ok(());
        }

        if clock.is_paused() {
            // keys pressed while paused must register as fresh presses
            mapper.tracker.drain();
            center_text(&mut surface, ctx.message("paused"), ctx.height * 0.5, 18.0, Color::WHITE);
            surface.present(out)?;
            thread::sleep(FRAME);
            continue;
        }

        for input in mapper.expire(clock.frame_count()) {
            if let InputEvent::KeyUp(key) = input {
                game.key_up(key, &mut ctx);
            }
        }

        run_frame(&mut game, &mut ctx, &mut surface, &mut clock, now);
        surface.present(out)?;

        if clock.is_paused() {
            for input in mapper.release_all() {
                if let InputEvent::KeyUp(key) = input {
                    game.key_up(key, &mut ctx);
                }
            }
        }

        thread::sleep(clock.next_delay(frame_start.elapsed()));
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let options = Options::parse();
    init_logging(&options.log_file);

    let store = options.score_store();
    let ctx = options.into_context()?;
    info!(width = ctx.width, height = ctx.height, mode = ?ctx.render_mode, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, ctx, store);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting");
    result
}
