//! Terminal runner (default binary).
//!
//! Fixed 16ms frames: render the snapshot, wait for at most one key event
//! until the frame ends, apply it, then feed the elapsed time to the engine.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::core::{Engine, GameConfig, GameSnapshot};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

const CONFIG_VAR: &str = "BLOCKFALL_CONFIG";

fn main() -> Result<()> {
    logging::init_from_env()?;
    let config = load_config()?;
    let engine = Engine::new(config).context("invalid game configuration")?;
    info!("starting {}x{} game", engine.board().rows(), engine.board().cols());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn load_config() -> Result<GameConfig> {
    match std::env::var(CONFIG_VAR) {
        Ok(path) => GameConfig::load(&path).with_context(|| format!("loading {path}")),
        Err(_) => Ok(GameConfig::from_env()),
    }
}

fn run(term: &mut TerminalRenderer, mut engine: Engine) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(TICK_MS as u64);
    let mut last = Instant::now();

    loop {
        engine.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit at score {}", engine.score());
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        engine.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last).as_millis().min(u32::MAX as u128) as u32;
        if elapsed > 0 {
            engine.advance(elapsed);
            last = now;
        }
    }
}
