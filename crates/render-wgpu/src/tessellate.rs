use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use gridshot_render::{Color, DrawCommand, DrawList, Rect};

/// A pixel-space vertex with a flat color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Convert a draw list into a triangle list.
///
/// `Clear` produces no geometry; the render pass clears instead.
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut verts = Vec::with_capacity(list.len() * 6);
    for cmd in list.commands() {
        match *cmd {
            DrawCommand::Clear => {}
            DrawCommand::FillRect { rect, color } => push_rect(&mut verts, rect, color),
            DrawCommand::StrokeLine {
                from,
                to,
                width,
                color,
            } => push_line(&mut verts, from, to, width, color),
        }
    }
    verts
}

fn push_quad(verts: &mut Vec<Vertex>, corners: [Vec2; 4], color: Color) {
    let color = color.to_array();
    for i in [0, 1, 2, 2, 3, 0] {
        verts.push(Vertex {
            position: corners[i].to_array(),
            color,
        });
    }
}

fn push_rect(verts: &mut Vec<Vertex>, rect: Rect, color: Color) {
    let min = rect.origin;
    let max = rect.max();
    push_quad(
        verts,
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ],
        color,
    );
}

/// Butt-capped line: a quad `width` wide along the segment.
fn push_line(verts: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: Color) {
    let Some(dir) = (to - from).try_normalize() else {
        return;
    };
    let offset = dir.perp() * (width / 2.0);
    push_quad(
        verts,
        [from + offset, to + offset, to - offset, from - offset],
        color,
    );
}
