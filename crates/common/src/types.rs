use glam::{DVec2, Vec2};
use serde::{Deserialize, Serialize};

/// A point on the tile grid. Units are tiles, not pixels. Stored at full
/// double precision, as authored in map files.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Returned when a weapon slot outside `1..=5` is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("weapon slot {0} is out of range 1..=5")]
pub struct InvalidWeapon(pub u8);

/// Selected weapon slot. Construction is checked, so the slot is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weapon(u8);

impl Weapon {
    pub const MIN_SLOT: u8 = 1;
    pub const MAX_SLOT: u8 = 5;

    pub fn new(slot: u8) -> Option<Self> {
        (Self::MIN_SLOT..=Self::MAX_SLOT)
            .contains(&slot)
            .then_some(Self(slot))
    }

    pub fn slot(self) -> u8 {
        self.0
    }

    /// All weapons in slot order.
    pub fn all() -> impl Iterator<Item = Weapon> {
        (Self::MIN_SLOT..=Self::MAX_SLOT).map(Self)
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Self(Self::MIN_SLOT)
    }
}

impl TryFrom<u8> for Weapon {
    type Error = InvalidWeapon;

    fn try_from(slot: u8) -> Result<Self, Self::Error> {
        Self::new(slot).ok_or(InvalidWeapon(slot))
    }
}

impl From<Weapon> for u8 {
    fn from(weapon: Weapon) -> Self {
        weapon.0
    }
}

/// The single player of a session.
///
/// The player never moves; input only changes the look angle and the weapon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    /// Degrees. Not range-checked.
    pub look_angle: f64,
    pub weapon: Weapon,
}

impl Player {
    /// A freshly spawned player: facing 0 degrees with weapon 1.
    pub fn spawn_at(pos: Position) -> Self {
        Self {
            pos,
            look_angle: 0.0,
            weapon: Weapon::default(),
        }
    }
}

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_slots_are_checked() {
        assert!(Weapon::new(0).is_none());
        assert!(Weapon::new(6).is_none());
        for slot in 1..=5 {
            assert_eq!(Weapon::new(slot).map(Weapon::slot), Some(slot));
        }
        assert_eq!(Weapon::try_from(9), Err(InvalidWeapon(9)));
    }

    #[test]
    fn weapon_all_is_ordered() {
        let slots: Vec<u8> = Weapon::all().map(Weapon::slot).collect();
        assert_eq!(slots, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn weapon_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Weapon>("3").is_ok());
        assert!(serde_json::from_str::<Weapon>("7").is_err());
    }

    #[test]
    fn spawned_player_defaults() {
        let p = Player::spawn_at(Position::new(5.0, 5.0));
        assert_eq!(p.pos, Position::new(5.0, 5.0));
        assert_eq!(p.look_angle, 0.0);
        assert_eq!(p.weapon.slot(), 1);
    }

    #[test]
    fn position_keeps_double_precision() {
        // 2^24 + 1 has no exact f32 representation.
        let p: Position = serde_json::from_str(r#"{"x": 16777217, "y": 0.1}"#).unwrap();
        assert_eq!(p.x, 16_777_217.0);
        assert_eq!(p.y, 0.1);
        assert_eq!(p.as_dvec2(), DVec2::new(16_777_217.0, 0.1));
    }

    #[test]
    fn viewport_center() {
        let v = Viewport::new(800, 600);
        assert_eq!(v.center(), Vec2::new(400.0, 300.0));
        assert!(!v.is_empty());
        assert!(Viewport::new(0, 10).is_empty());
    }
}
