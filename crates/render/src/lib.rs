//! Rendering: paints the map and player onto a 2D canvas.
//!
//! # Invariants
//! - Every frame is redrawn from scratch: clear, background, blocks, player
//!   body, weapon line. Later draws occlude earlier ones.
//! - The renderer reads player and map state; it never mutates them.
//! - The player is always drawn at the surface center and the map is offset
//!   around them.
//!
//! Backends consume a [`DrawList`]; the wgpu backend tessellates it, tests and
//! the CLI inspect it directly.

mod canvas;
mod color;
mod renderer;
mod scene;

pub use canvas::{Canvas, DrawCommand, DrawList, Rect};
pub use color::Color;
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{Scene, SceneRenderer, SceneStyle, project_block, weapon_color, weapon_tip};

pub fn crate_info() -> &'static str {
    "gridshot-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
