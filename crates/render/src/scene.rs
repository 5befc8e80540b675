use crate::canvas::{Canvas, Rect};
use crate::color::Color;
use glam::Vec2;
use gridshot_common::{Player, Position, Weapon};
use gridshot_map::MapData;

/// Everything a frame is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub player: &'a Player,
    pub map: &'a MapData,
}

/// Sizes and colors used when painting a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    /// Pixel size of one map tile.
    pub tile_size: f32,
    /// Side of the player's square body.
    pub body_size: f32,
    pub weapon_length: f32,
    pub weapon_width: f32,
    pub background: Color,
    pub block: Color,
    pub body: Color,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            tile_size: 40.0,
            body_size: 40.0,
            weapon_length: 34.0,
            weapon_width: 5.0,
            background: Color::GRAY,
            block: Color::BLACK,
            body: Color::RED,
        }
    }
}

/// Top-left pixel of `block` on a surface centered on `player`.
pub fn project_block(center: Vec2, player: Position, block: Position, tile_size: f32) -> Vec2 {
    // Subtract in tile space at full precision; only the pixel offset is narrowed.
    let offset = ((player.as_dvec2() - block.as_dvec2()) * f64::from(tile_size)).as_vec2();
    center - offset - Vec2::splat(tile_size / 2.0)
}

/// End point of the weapon line. The line is drawn at `look_angle - 180`
/// degrees from the center.
pub fn weapon_tip(center: Vec2, look_angle: f64, length: f32) -> Vec2 {
    let rad = (look_angle - 180.0).to_radians();
    center + Vec2::new(rad.cos() as f32, rad.sin() as f32) * length
}

pub fn weapon_color(weapon: Weapon) -> Color {
    match weapon.slot() {
        1 => Color::GREEN,
        2 => Color::MAGENTA,
        3 => Color::BLUE,
        4 => Color::CYAN,
        _ => Color::WHITE,
    }
}

/// Paints scenes onto any [`Canvas`].
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    style: SceneStyle,
}

impl SceneRenderer {
    pub fn new(style: SceneStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    /// Draw background, map blocks, player body and weapon, in that order.
    /// Does not clear first.
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C, scene: &Scene<'_>) {
        self.draw_background(canvas);
        self.draw_blocks(canvas, scene);
        self.draw_player_body(canvas);
        self.draw_player_weapon(canvas, scene.player);
    }

    fn draw_background<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let rect = Rect::new(0.0, 0.0, canvas.width(), canvas.height());
        canvas.fill_rect(rect, self.style.background);
    }

    fn draw_blocks<C: Canvas + ?Sized>(&self, canvas: &mut C, scene: &Scene<'_>) {
        let center = canvas.center();
        let size = self.style.tile_size;
        for block in &scene.map.blocks {
            let origin = project_block(center, scene.player.pos, *block, size);
            canvas.fill_rect(Rect::new(origin.x, origin.y, size, size), self.style.block);
        }
    }

    fn draw_player_body<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let rect = Rect::centered_square(canvas.center(), self.style.body_size);
        canvas.fill_rect(rect, self.style.body);
    }

    fn draw_player_weapon<C: Canvas + ?Sized>(&self, canvas: &mut C, player: &Player) {
        let center = canvas.center();
        let tip = weapon_tip(center, player.look_angle, self.style.weapon_length);
        canvas.stroke_line(
            center,
            tip,
            self.style.weapon_width,
            weapon_color(player.weapon),
        );
    }
}
