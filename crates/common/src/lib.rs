//! Shared types and math for the gridshot demo.
//!
//! # Invariants
//! - A `Weapon` always holds a slot in `1..=5`.
//! - Angles are in degrees; `find_angle` output is rounded to two decimals.

pub mod angle;
pub mod types;

pub use angle::{LOOK_ANGLE_EXPONENT, Rounding, adjust, find_angle};
pub use types::{InvalidWeapon, Player, Position, Viewport, Weapon};
