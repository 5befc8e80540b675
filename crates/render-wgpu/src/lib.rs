//! wgpu render backend for gridshot.
//!
//! Turns a recorded [`gridshot_render::DrawList`] into colored triangles in
//! pixel space and draws them in a single pass.
//!
//! # Invariants
//! - The backend never sees player or map state, only draw commands.
//! - Commands are drawn in list order, so later commands occlude earlier ones.

mod gpu;
mod shaders;
mod tessellate;

pub use gpu::WgpuRenderer;
pub use tessellate::{Vertex, tessellate};
