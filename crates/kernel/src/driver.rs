use crate::session::Session;
use gridshot_common::{Player, Viewport};
use gridshot_input::{Effect, InputEvent, InputHandler, InputQueue};
use gridshot_render::{Canvas, DrawList, SceneRenderer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Errors from a fullscreen request.
#[derive(Debug, thiserror::Error)]
pub enum FullscreenError {
    #[error("fullscreen is not supported here")]
    Unsupported,
    #[error("fullscreen request rejected: {0}")]
    Rejected(String),
}

/// Errors from presenting a frame.
#[derive(Debug, thiserror::Error)]
pub enum PresentError {
    /// The surface must be reconfigured; the next frame will be presented.
    #[error("surface lost or outdated")]
    SurfaceLost,
    #[error("surface error: {0}")]
    Surface(String),
}

/// A finished frame handed to the presenter.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub commands: &'a DrawList,
    pub player: &'a Player,
    /// Zero-based count of frames rendered before this one.
    pub index: u64,
}

/// The drawing surface as seen by the driver: something that can be sized,
/// shown a frame, and asked to go fullscreen.
pub trait Presenter {
    fn resize(&mut self, viewport: Viewport);
    fn present(&mut self, frame: &Frame<'_>) -> Result<(), PresentError>;
    fn toggle_fullscreen(&mut self) -> Result<(), FullscreenError>;
}

/// Cloneable stop switch for a running driver. Checked once per tick.
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    stopped: Arc<AtomicBool>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Result of one driver tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frames rendered this tick: one, plus one per resize handled.
    Rendered { passes: u32 },
    Stopped,
}

/// Drains queued input into the session and renders a frame per tick.
pub struct FrameDriver {
    session: Session,
    handler: InputHandler,
    queue: InputQueue,
    renderer: SceneRenderer,
    control: RunControl,
    frame: DrawList,
    frames: u64,
}

impl FrameDriver {
    /// One-time setup: size the surface to the session viewport and render
    /// the first frame.
    pub fn start<P: Presenter + ?Sized>(
        session: Session,
        renderer: SceneRenderer,
        presenter: &mut P,
    ) -> Self {
        let viewport = session.viewport();
        tracing::info!(
            "session started: spawn ({}, {}), {} blocks, surface {}x{}",
            session.player().pos.x,
            session.player().pos.y,
            session.map().blocks.len(),
            viewport.width,
            viewport.height
        );

        let mut driver = Self {
            session,
            handler: InputHandler::default(),
            queue: InputQueue::new(),
            renderer,
            control: RunControl::new(),
            frame: DrawList::new(viewport),
            frames: 0,
        };
        presenter.resize(viewport);
        driver.render_pass(presenter);
        driver
    }

    pub fn with_input_handler(mut self, handler: InputHandler) -> Self {
        self.handler = handler;
        self
    }

    /// A handle that stops this driver when triggered.
    pub fn control(&self) -> RunControl {
        self.control.clone()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Total frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Queue an event for the next tick.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply all queued input in order, then render one frame.
    pub fn tick<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> TickOutcome {
        if self.control.is_stopped() {
            return TickOutcome::Stopped;
        }

        let mut passes = 0;
        let mut queue = std::mem::take(&mut self.queue);
        for event in queue.drain() {
            let (player, viewport) = self.session.input_targets();
            match self.handler.apply(&event, player, viewport) {
                Some(Effect::ToggleFullscreen) => {
                    if let Err(e) = presenter.toggle_fullscreen() {
                        tracing::warn!("fullscreen toggle failed: {e}");
                    }
                }
                Some(Effect::Resized(viewport)) => {
                    presenter.resize(viewport);
                    if self.render_pass(presenter) {
                        passes += 1;
                    }
                }
                None => {}
            }
        }
        self.queue = queue;

        if self.render_pass(presenter) {
            passes += 1;
        }
        TickOutcome::Rendered { passes }
    }

    /// Tick until stopped. `pump` runs before each tick with the number of
    /// frames rendered so far and may queue input or stop the run.
    /// Returns the total frame count.
    pub fn run<P, F>(&mut self, presenter: &mut P, mut pump: F) -> u64
    where
        P: Presenter + ?Sized,
        F: FnMut(u64, &mut InputQueue, &RunControl),
    {
        loop {
            pump(self.frames, &mut self.queue, &self.control);
            if self.tick(presenter) == TickOutcome::Stopped {
                break;
            }
        }
        tracing::info!("run stopped after {} frames", self.frames);
        self.frames
    }

    /// Clear, paint and present one frame. Returns false when there was no
    /// surface area to draw on.
    fn render_pass<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> bool {
        let viewport = self.session.viewport();
        if viewport.is_empty() {
            return false;
        }

        self.frame.reset(viewport);
        self.frame.clear();
        self.renderer.paint(&mut self.frame, &self.session.scene());

        let frame = Frame {
            commands: &self.frame,
            player: self.session.player(),
            index: self.frames,
        };
        match presenter.present(&frame) {
            Ok(()) => {}
            Err(PresentError::SurfaceLost) => tracing::debug!("surface lost, frame dropped"),
            Err(e) => tracing::error!("present failed: {e}"),
        }
        self.frames += 1;
        true
    }
}
