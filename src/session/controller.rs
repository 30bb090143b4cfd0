use crate::config::ChartConfig;
use crate::feed::PoseFeed;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::SeaResult;
use crate::render::cpu::ChartRenderer;
use crate::render::registry::PatchRegistry;
use crate::scene::environment::Environment;
use crate::session::window::{Key, Window, WindowEvent};
use std::time::Duration;

/// Upper bound on input events handled within one tick.
const MAX_EVENTS_PER_TICK: usize = 64;

/// Lifecycle of a [`Session`]. States only ever advance, in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    /// Renderer not yet prepared.
    Opening,
    /// Ticking.
    Running,
    /// Liveness lost; the surface is about to be released.
    Closing,
    /// Terminal.
    Closed,
}

/// Options controlling the session loop.
#[derive(Clone, Debug)]
pub struct SessionOpts {
    /// Number given to the first captured frame.
    pub first_frame: FrameIndex,
    /// Per-tick yield handed to [`Window::poll_event`].
    pub tick_quantum: Duration,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            first_frame: FrameIndex(0),
            tick_quantum: Duration::from_millis(1),
        }
    }
}

impl SessionOpts {
    /// Options derived from the display settings.
    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self {
            tick_quantum: cfg.display.tick_quantum(),
            ..Self::default()
        }
    }
}

/// Counters collected while a session runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Completed ticks.
    pub ticks: u64,
    /// Ticks whose read returned a pose set.
    pub updates: u64,
    /// Ticks whose read reported no update.
    pub skipped: u64,
    /// Frame files written.
    pub frames_written: u64,
}

/// Single-threaded display loop driving feed, registry and renderer.
///
/// Every tick yields once (inside [`Window::poll_event`]), then reads the feed. A read with a
/// value is reconciled and repainted; a read without one leaves the surface untouched. Either
/// way exactly one numbered frame is captured, so frame numbers stay gapless.
///
/// Errors from repaint or capture end the session: they propagate out of [`Session::step`] with
/// no retry.
pub struct Session<F, W> {
    state: SessionState,
    live: bool,
    feed: F,
    window: W,
    environment: Option<Environment>,
    registry: PatchRegistry,
    renderer: ChartRenderer,
    next_frame: FrameIndex,
    opts: SessionOpts,
    stats: SessionStats,
}

impl<F: PoseFeed, W: Window> Session<F, W> {
    /// Create a session in [`SessionState::Opening`].
    pub fn new(
        cfg: &ChartConfig,
        environment: Environment,
        feed: F,
        window: W,
        opts: SessionOpts,
    ) -> SeaResult<Self> {
        let renderer = ChartRenderer::new(cfg)?;
        Ok(Self {
            state: SessionState::Opening,
            live: true,
            feed,
            window,
            environment: Some(environment),
            registry: PatchRegistry::new(cfg.display.identity),
            renderer,
            next_frame: opts.first_frame,
            opts,
            stats: SessionStats::default(),
        })
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Return `true` while the surface is open and no close was requested.
    pub fn is_live(&self) -> bool {
        self.live && self.window.is_open()
    }

    /// Number the next captured frame will get.
    pub fn next_frame(&self) -> FrameIndex {
        self.next_frame
    }

    /// Counters so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Slot registry.
    pub fn registry(&self) -> &PatchRegistry {
        &self.registry
    }

    /// Renderer.
    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    /// Pose feed.
    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Drawing surface.
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Advance by one step: open, one tick, or one shutdown transition.
    pub fn step(&mut self) -> SeaResult<SessionState> {
        match self.state {
            SessionState::Opening => self.open()?,
            SessionState::Running => self.tick()?,
            SessionState::Closing => {
                self.window.close();
                self.state = SessionState::Closed;
                tracing::info!(
                    ticks = self.stats.ticks,
                    frames = self.stats.frames_written,
                    "session closed"
                );
            }
            SessionState::Closed => {}
        }
        Ok(self.state)
    }

    /// Step until [`SessionState::Closed`].
    #[tracing::instrument(skip_all)]
    pub fn run(&mut self) -> SeaResult<SessionStats> {
        while self.step()? != SessionState::Closed {}
        Ok(self.stats)
    }

    fn open(&mut self) -> SeaResult<()> {
        if let Some(env) = self.environment.take() {
            self.renderer.load_environment(&env)?;
        }
        if self.is_live() {
            self.window.present(&self.renderer.frame())?;
        }
        self.state = SessionState::Running;
        tracing::info!(first_frame = self.next_frame.0, "session running");
        Ok(())
    }

    fn tick(&mut self) -> SeaResult<()> {
        self.live = self.is_live();
        if !self.live {
            self.state = SessionState::Closing;
            return Ok(());
        }

        self.pump_events();

        match self.feed.read() {
            Some(poses) => {
                self.registry.reconcile(&poses);
                self.renderer.repaint(&self.registry)?;
                if self.is_live() {
                    self.window.present(&self.renderer.frame())?;
                }
                self.stats.updates += 1;
            }
            None => {
                tracing::trace!(frame = self.next_frame.0, "no pose update");
                self.stats.skipped += 1;
            }
        }

        self.renderer.capture_frame(self.next_frame)?;
        self.next_frame = self.next_frame.next();
        self.stats.frames_written += 1;
        self.stats.ticks += 1;
        Ok(())
    }

    fn pump_events(&mut self) {
        let mut timeout = self.opts.tick_quantum;
        for _ in 0..MAX_EVENTS_PER_TICK {
            let Some(ev) = self.window.poll_event(timeout) else {
                break;
            };
            match ev {
                WindowEvent::Key(Key::Escape) | WindowEvent::CloseRequested => {
                    tracing::info!(event = ?ev, "close requested");
                    self.live = false;
                    self.window.close();
                }
                WindowEvent::Key(Key::Other) => {}
            }
            timeout = Duration::ZERO;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
