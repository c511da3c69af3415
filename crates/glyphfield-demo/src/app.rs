#![forbid(unsafe_code)]

//! The terminal event loop.
//!
//! Input is drained between frames; frames are paced at the configured rate
//! against a monotonic clock started with the loop. A terminal resize
//! immediately resizes the glyph buffer and repaints the current grid into
//! it (like a canvas backing-store resize), while the engine rebuilds the
//! grid once resizing settles.

use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

use glyphfield_core::event::Event;
use glyphfield_core::geometry::Viewport;
use glyphfield_engine::{Engine, EngineStats};
use glyphfield_render::buffer::GlyphBuffer;

use crate::cli::Opts;
use crate::input::{Action, map_event};
use crate::presenter::Presenter;
use crate::session::{SessionOptions, TerminalSession};

/// Engine, buffer, and presenter for one terminal.
///
/// Separate from the session so the loop body can be driven without a tty.
#[derive(Debug)]
pub struct Host<W: Write> {
    engine: Engine,
    buffer: GlyphBuffer,
    presenter: Presenter<W>,
    width: u16,
    height: u16,
}

impl<W: Write> Host<W> {
    /// Build the engine for a `width × height` terminal.
    pub fn new(opts: &Opts, width: u16, height: u16, out: W) -> io::Result<Self> {
        let viewport = Viewport::new(u32::from(width), u32::from(height));
        let engine = Engine::new(opts.engine_config(), viewport).map_err(io::Error::other)?;
        Ok(Self {
            engine,
            buffer: GlyphBuffer::new(width, height, 1),
            presenter: Presenter::new(out),
            width,
            height,
        })
    }

    /// The engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The glyph buffer mirrored to the terminal.
    pub fn buffer(&self) -> &GlyphBuffer {
        &self.buffer
    }

    /// Apply one input action at `now`. Returns `false` on quit.
    pub fn apply(&mut self, action: Action, now: Duration) -> bool {
        match action {
            Action::Quit => {
                self.engine.stop();
                false
            }
            Action::Pointer(pointer) => {
                self.engine.handle_event(Event::Pointer(pointer), now);
                true
            }
            Action::Resize(viewport) => {
                self.width = viewport.width.min(u32::from(u16::MAX)) as u16;
                self.height = viewport.height.min(u32::from(u16::MAX)) as u16;
                self.buffer.resize(self.width, self.height);
                self.presenter.invalidate();
                self.engine.full_draw(&mut self.buffer);
                self.engine.handle_resize(viewport, now);
                true
            }
        }
    }

    /// Run one frame and present it. Returns whether the loop continues.
    pub fn frame(&mut self, now: Duration) -> io::Result<bool> {
        let outcome = self.engine.frame(&mut self.buffer, now);
        self.presenter.present(&mut self.buffer, self.width, self.height)?;
        Ok(outcome.keep_running)
    }

    /// Consume the host, returning the writer.
    pub fn into_writer(self) -> W {
        self.presenter.into_inner()
    }
}

/// Run the field until quit, `--exit-after-ms`, or a signal.
pub fn run(opts: &Opts) -> io::Result<EngineStats> {
    let session = TerminalSession::new(SessionOptions {
        mouse_capture: opts.mouse,
        focus_events: true,
    })?;
    let (width, height) = session.size()?;
    let mut host = Host::new(opts, width, height, BufWriter::new(io::stdout()))?;

    let interval = opts.frame_interval();
    let exit_after = (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms));
    let clock = Instant::now();
    let mut next_frame = Duration::ZERO;

    loop {
        let now = clock.elapsed();
        if now < next_frame {
            if session.poll_event(next_frame - now)?
                && let Some(action) = map_event(session.read_event()?)
            {
                host.apply(action, clock.elapsed());
            }
            continue;
        }

        if exit_after.is_some_and(|limit| now >= limit) {
            host.engine.stop();
        }
        if !host.frame(now)? {
            break;
        }
        next_frame = (next_frame + interval).max(now);
    }

    let stats = host.engine().stats();
    tracing::info!(
        frames = stats.frames,
        scramble_frames = stats.scramble_frames,
        cells_drawn = stats.cells_drawn,
        rebuilds = stats.rebuilds,
        "session finished"
    );
    drop(host);
    drop(session);
    Ok(stats)
}
