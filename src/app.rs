//! The refresh loop.
//!
//! Two states: Sizing (geometry unknown or stale: clear, requery,
//! reallocate the canvas) and Running (steady 200 ms ticks). A resize
//! event only sets a dirty flag; reallocation happens at the top of the
//! next tick, never mid-frame. Terminal raw mode is restored by an RAII
//! guard on every exit path, including errors.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};

use crate::canvas::Canvas;
use crate::config::Config;
use crate::encoder::encode;
use crate::error::GraphError;
use crate::history::HistoryRing;
use crate::raster::{rasterize, stamp_scale_labels};
use crate::sampler::Sampler;
use crate::scale::ScaleState;

/// Fixed refresh cadence.
const TICK: Duration = Duration::from_millis(200);

/// Scoped raw-mode acquisition.
///
/// Dropping the guard restores cooked mode, shows the cursor and clears
/// the screen no matter which path exited the loop.
struct TerminalGuard;

impl TerminalGuard {
    fn acquire() -> Result<Self, GraphError> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0), Show);
        let _ = terminal::disable_raw_mode();
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// One monitoring session: sampler, history, scale and canvas, owned
/// together so nothing outlives the loop that drives them.
pub struct App {
    config: Config,
    sampler: Sampler,
    ring: HistoryRing,
    scale: ScaleState,
    status_line: String,
}

impl App {
    /// Build a session for the configured device.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let sampler = Sampler::new(config.device.clone());
        let status_line = config.device.status_line();
        Self {
            config,
            sampler,
            ring: HistoryRing::new(),
            scale: ScaleState::new(),
            status_line,
        }
    }

    /// Run until a quit key or a fatal error.
    pub fn run(&mut self) -> Result<(), GraphError> {
        // Baseline read: validates the counter format up front and arms
        // the delta computation without plotting a spurious point.
        self.sampler.sample()?;

        let _guard = TerminalGuard::acquire()?;
        let mut stdout = io::stdout();

        // Initial Sizing pass; resize events re-run the same steps at
        // the top of a later tick.
        execute!(stdout, Clear(ClearType::All))?;
        let (cols, rows) = terminal::size()?;
        let mut canvas = Canvas::new(cols, rows);
        let mut resized = false;

        loop {
            if resized {
                execute!(stdout, Clear(ClearType::All))?;
                let (cols, rows) = terminal::size()?;
                canvas = Canvas::new(cols, rows);
                resized = false;
            }

            // Drain pending events without blocking; the tick sleep below
            // is the only suspension point.
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press && is_quit_key(&key) => {
                        return Ok(());
                    }
                    Event::Resize(_, _) => resized = true,
                    _ => {}
                }
            }

            stamp_scale_labels(&self.scale, &mut canvas);
            let overflow = rasterize(&self.ring, &self.scale, &mut canvas);
            self.scale.apply(overflow);

            self.ring.push(self.sampler.sample()?);

            let frame = encode(&canvas, self.config.background, self.config.blend);
            execute!(stdout, MoveTo(0, 0))?;
            stdout.write_all(frame.as_bytes())?;
            stdout.write_all(b"\r\n")?;
            stdout.write_all(self.status_line.as_bytes())?;
            stdout.flush()?;

            std::thread::sleep(TICK);
        }
    }
}
