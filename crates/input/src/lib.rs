//! Input handling: raw window events queued and applied to the player.
//!
//! # Invariants
//! - Events are applied strictly in the order they were pushed.
//! - The handler is the only writer of `Player`; it never renders.
//! - Digit keys `1`..`5` select weapons; no other key changes the weapon.

pub mod event;
pub mod handler;
pub mod queue;

pub use event::{InputEvent, Key};
pub use handler::{Effect, InputHandler, pointer_angle};
pub use queue::InputQueue;
