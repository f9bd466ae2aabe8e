//! Terminal falling-block game (default binary).
//!
//! `tilefall` plays in the terminal; `tilefall replay` runs a seeded headless
//! game and prints a JSON-lines transcript to stdout.
//!
//! Input is read by a blocking crossterm thread and forwarded over a tokio
//! channel; the loop selects between input and the automatic drop deadline.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

use tilefall::config::{parse_args, AppConfig, Command};
use tilefall::game::Game;
use tilefall::input::{handle_key_event, should_quit};
use tilefall::logging::{self, LogTarget};
use tilefall::replay;
use tilefall::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};

const INPUT_POLL: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Replay { config, steps } => {
            let target = match config.log_file.as_deref() {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Stderr,
            };
            logging::init(target)?;
            let stdout = io::stdout();
            replay::run(&config, steps, stdout.lock())?;
            Ok(())
        }
        Command::Play(config) => {
            let target = match config.log_file.as_deref() {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Off,
            };
            logging::init(target)?;

            let mut term = TerminalRenderer::new();
            term.enter()?;

            let result = play(&mut term, &config).await;

            // Always try to restore terminal state.
            let _ = term.exit();
            result
        }
    }
}

/// Forward terminal events from a blocking reader thread until `stop` is set
/// or the receiver goes away.
fn spawn_input_reader(
    tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!("input poll failed: {e}");
                    break;
                }
            }
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("input read failed: {e}");
                    break;
                }
            }
        }
    })
}

async fn play(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut game = Game::new(config)?;
    game.start();
    info!(
        seed = config.seed,
        width = config.board.width,
        height = config.board.height,
        "game started"
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let stop = Arc::new(AtomicBool::new(false));
    let reader = spawn_input_reader(tx, Arc::clone(&stop));

    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut deadline = Instant::now() + game.drop_delay();

    let result = loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), &game.hud(), Viewport::new(w, h), &mut fb);
        if let Err(e) = term.draw(&fb) {
            break Err(e);
        }

        tokio::select! {
            ev = rx.recv() => {
                let Some(ev) = ev else {
                    break Ok(());
                };
                match ev {
                    Event::Key(key) => {
                        if should_quit(key) {
                            break Ok(());
                        }
                        if let Some(action) = handle_key_event(key) {
                            if game.apply(action) {
                                deadline = Instant::now() + game.drop_delay();
                            }
                        }
                    }
                    Event::Resize(_, _) => term.invalidate(),
                    _ => {}
                }
            }
            _ = sleep_until(deadline) => {
                game.tick();
                deadline = Instant::now() + game.drop_delay();
            }
        }
    };

    stop.store(true, Ordering::Relaxed);
    drop(rx);
    let _ = reader.await;
    info!(
        score = game.score().score(),
        lines = game.score().lines(),
        "game exited"
    );
    result
}
