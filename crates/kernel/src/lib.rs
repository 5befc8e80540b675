//! Session kernel: owns the player, map and surface size, and drives frames.
//!
//! # Invariants
//! - All state lives in one `Session` threaded through the driver; there is
//!   no global state.
//! - Input is queued and drained once per tick, in order, before rendering.
//! - Every tick renders at least one full frame unless the run was stopped
//!   or the surface has no area.
//! - A resize renders an extra frame immediately, before the regular one.

pub mod driver;
pub mod session;

pub use driver::{
    Frame, FrameDriver, FullscreenError, PresentError, Presenter, RunControl, TickOutcome,
};
pub use session::Session;
