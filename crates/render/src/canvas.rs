use crate::color::Color;
use glam::Vec2;
use gridshot_common::Viewport;
use std::fmt::Write;

/// Axis-aligned rectangle; `origin` is the top-left corner in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// A `size` x `size` square centered on `center`.
    pub fn centered_square(center: Vec2, size: f32) -> Self {
        Self {
            origin: center - Vec2::splat(size / 2.0),
            size: Vec2::splat(size),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }
}

/// A 2D drawing context. Y grows downward, units are pixels.
pub trait Canvas {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Erase the whole surface to transparent black.
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// A straight line with butt caps.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    fn center(&self) -> Vec2 {
        Vec2::new(self.width() / 2.0, self.height() / 2.0)
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
}

/// A canvas that records commands instead of rasterizing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    /// Forget all commands and adopt a (possibly new) surface size.
    pub fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.commands.clear();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Human-readable listing, one command per line.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "frame {}x{}, {} commands",
            self.viewport.width,
            self.viewport.height,
            self.commands.len()
        );
        for cmd in &self.commands {
            let _ = match cmd {
                DrawCommand::Clear => writeln!(out, "  clear"),
                DrawCommand::FillRect { rect, color } => writeln!(
                    out,
                    "  fill_rect x={:.1} y={:.1} w={:.1} h={:.1} {}",
                    rect.origin.x,
                    rect.origin.y,
                    rect.size.x,
                    rect.size.y,
                    color.to_hex()
                ),
                DrawCommand::StrokeLine {
                    from,
                    to,
                    width,
                    color,
                } => writeln!(
                    out,
                    "  stroke_line ({:.1}, {:.1}) -> ({:.1}, {:.1}) width={:.1} {}",
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    width,
                    color.to_hex()
                ),
            };
        }
        out
    }
}

impl Canvas for DrawList {
    fn width(&self) -> f32 {
        self.viewport.width as f32
    }

    fn height(&self) -> f32 {
        self.viewport.height as f32
    }

    fn clear(&mut self) {
        // Nothing drawn before a full clear can show through.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut list = DrawList::new(Viewport::new(100, 50));
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
        list.stroke_line(Vec2::ZERO, Vec2::ONE, 2.0, Color::BLUE);
        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands()[0], DrawCommand::FillRect { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::StrokeLine { .. }));
        assert_eq!(list.center(), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn clear_discards_previous_commands() {
        let mut list = DrawList::new(Viewport::new(10, 10));
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        list.clear();
        assert_eq!(list.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn reset_changes_viewport() {
        let mut list = DrawList::new(Viewport::new(10, 10));
        list.clear();
        list.reset(Viewport::new(20, 30));
        assert!(list.is_empty());
        assert_eq!(list.width(), 20.0);
        assert_eq!(list.height(), 30.0);
    }

    #[test]
    fn centered_square() {
        let r = Rect::centered_square(Vec2::new(400.0, 300.0), 40.0);
        assert_eq!(r.origin, Vec2::new(380.0, 280.0));
        assert_eq!(r.max(), Vec2::new(420.0, 320.0));
    }

    #[test]
    fn describe_lists_commands() {
        let mut list = DrawList::new(Viewport::new(800, 600));
        list.clear();
        list.fill_rect(Rect::new(0.0, 0.0, 800.0, 600.0), Color::GRAY);
        let text = list.describe();
        assert!(text.starts_with("frame 800x600, 2 commands"));
        assert!(text.contains("  clear"));
        assert!(text.contains("fill_rect x=0.0 y=0.0 w=800.0 h=600.0 #808080ff"));
    }
}
