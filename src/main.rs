//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `blockfall::term`. One loop
//! owns the session: it polls input until the next frame is due, forwards commands with the
//! current monotonic timestamp, ticks the engine and draws.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::{parse_args, USAGE};
use blockfall::core::{GameSnapshot, KeyValueStore, Session};
use blockfall::file_store::JsonFileStore;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::record_form::{FormOutcome, RecordForm};
use blockfall::term::{FrameBuffer, GameView, RecordView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;
    if config.show_help {
        println!("{}", USAGE);
        return Ok(());
    }

    let store = JsonFileStore::open_or_empty(&config.store_path);
    let mut session = Session::new(config.seed_or_clock(), store);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run<S: KeyValueStore>(term: &mut TerminalRenderer, session: &mut Session<S>) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut form: Option<RecordForm> = None;

    let frame = Duration::from_millis(TICK_MS as u64);
    let mut next_frame = Instant::now();

    loop {
        session.tick(now_ms());
        if session.is_record_pending() && form.is_none() {
            form = Some(RecordForm::new());
        }

        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let record = session.record();
        let record_view = RecordView {
            holder: record.name.as_deref(),
            country: record.country.as_deref(),
            form: form.as_ref().map(RecordForm::view),
        };
        view.render_into_with_record(&snap, &record_view, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next frame is due.
        next_frame += frame;
        let now = Instant::now();
        if next_frame < now {
            // Fell behind (e.g. suspended); resync instead of bursting.
            next_frame = now + frame;
        }

        while event::poll(next_frame.saturating_duration_since(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(entry) = form.as_mut() {
                        match entry.handle_key(key) {
                            FormOutcome::Editing => {}
                            FormOutcome::Submit => {
                                session.submit_record_holder(entry.name(), entry.country());
                                form = None;
                            }
                            FormOutcome::Skip => {
                                session.submit_record_holder("", "");
                                form = None;
                            }
                            FormOutcome::Quit => {
                                session.submit_record_holder("", "");
                                return Ok(());
                            }
                        }
                        continue;
                    }

                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key, session.state()) {
                        session.apply_action(action, now_ms());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
    }
}
