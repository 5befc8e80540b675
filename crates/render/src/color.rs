/// RGBA color with sRGB-encoded components in `0.0..=1.0`, as in CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgb8(0, 0, 0);
    pub const GRAY: Color = Color::rgb8(128, 128, 128);
    pub const RED: Color = Color::rgb8(255, 0, 0);
    pub const GREEN: Color = Color::rgb8(0, 255, 0);
    pub const MAGENTA: Color = Color::rgb8(255, 0, 255);
    pub const BLUE: Color = Color::rgb8(0, 0, 255);
    pub const CYAN: Color = Color::rgb8(0, 255, 255);
    pub const WHITE: Color = Color::rgb8(255, 255, 255);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a)
        )
    }
}
