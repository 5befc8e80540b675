use crate::event::{InputEvent, Key};
use gridshot_common::{Player, Viewport, Weapon, find_angle};

/// Side effects an event asks of the frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Enter or leave fullscreen on the surface's host window.
    ToggleFullscreen,
    /// The surface now has this size and must be redrawn right away.
    Resized(Viewport),
}

/// Applies input events to the player and the stored viewport size.
#[derive(Debug, Clone)]
pub struct InputHandler {
    fullscreen_key: Key,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self {
            fullscreen_key: Key::Char('f'),
        }
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fullscreen_key(mut self, key: Key) -> Self {
        self.fullscreen_key = key;
        self
    }

    pub fn fullscreen_key(&self) -> Key {
        self.fullscreen_key
    }

    /// Apply one event. Returns the effect the caller must carry out, if any.
    pub fn apply(
        &self,
        event: &InputEvent,
        player: &mut Player,
        viewport: &mut Viewport,
    ) -> Option<Effect> {
        match *event {
            InputEvent::KeyDown(key) => self.on_key(key, player),
            InputEvent::PointerMoved { x, y } => {
                player.look_angle = pointer_angle(*viewport, x, y);
                None
            }
            InputEvent::Resized { width, height } => {
                *viewport = Viewport::new(width, height);
                tracing::debug!("viewport resized to {width}x{height}");
                Some(Effect::Resized(*viewport))
            }
        }
    }

    fn on_key(&self, key: Key, player: &mut Player) -> Option<Effect> {
        if key == self.fullscreen_key {
            return Some(Effect::ToggleFullscreen);
        }
        if let Some(weapon) = key.digit().and_then(Weapon::new) {
            if player.weapon != weapon {
                tracing::debug!("weapon {} -> {}", player.weapon.slot(), weapon.slot());
            }
            player.weapon = weapon;
        }
        None
    }
}

/// Look angle for a pointer at surface-local `(x, y)`: the direction from the
/// surface center to the pointer, in degrees.
pub fn pointer_angle(viewport: Viewport, x: f64, y: f64) -> f64 {
    let dx = x - f64::from(viewport.width) / 2.0;
    let dy = y - f64::from(viewport.height) / 2.0;
    find_angle(0.0, 0.0, dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridshot_common::Position;

    fn setup() -> (InputHandler, Player, Viewport) {
        (
            InputHandler::new(),
            Player::spawn_at(Position::new(5.0, 5.0)),
            Viewport::new(800, 600),
        )
    }

    #[test]
    fn digit_keys_select_weapons_in_order() {
        let (handler, mut player, mut viewport) = setup();
        for slot in 1..=5u8 {
            let c = char::from(b'0' + slot);
            let effect = handler.apply(
                &InputEvent::KeyDown(Key::Char(c)),
                &mut player,
                &mut viewport,
            );
            assert_eq!(effect, None);
            assert_eq!(player.weapon.slot(), slot);
        }
    }

    #[test]
    fn other_keys_leave_weapon_alone() {
        let (handler, mut player, mut viewport) = setup();
        handler.apply(
            &InputEvent::KeyDown(Key::Char('3')),
            &mut player,
            &mut viewport,
        );
        for key in [
            Key::Char('0'),
            Key::Char('6'),
            Key::Char('9'),
            Key::Char('x'),
            Key::Other,
        ] {
            handler.apply(&InputEvent::KeyDown(key), &mut player, &mut viewport);
            assert_eq!(player.weapon.slot(), 3, "key {key:?}");
        }
    }

    #[test]
    fn fullscreen_key_requests_toggle() {
        let (handler, mut player, mut viewport) = setup();
        let before = player;
        let effect = handler.apply(
            &InputEvent::KeyDown(Key::Char('f')),
            &mut player,
            &mut viewport,
        );
        assert_eq!(effect, Some(Effect::ToggleFullscreen));
        assert_eq!(player, before);
    }

    #[test]
    fn custom_fullscreen_key() {
        let (_, mut player, mut viewport) = setup();
        let handler = InputHandler::new().with_fullscreen_key(Key::Char('g'));
        assert_eq!(
            handler.apply(&InputEvent::KeyDown(Key::Char('f')), &mut player, &mut viewport),
            None
        );
        assert_eq!(
            handler.apply(&InputEvent::KeyDown(Key::Char('g')), &mut player, &mut viewport),
            Some(Effect::ToggleFullscreen)
        );
    }

    #[test]
    fn pointer_straight_up_is_minus_ninety() {
        let (handler, mut player, mut viewport) = setup();
        handler.apply(
            &InputEvent::PointerMoved { x: 400.0, y: 0.0 },
            &mut player,
            &mut viewport,
        );
        assert_eq!(player.look_angle, -90.0);
    }

    #[test]
    fn pointer_angles_around_center() {
        let v = Viewport::new(800, 600);
        assert_eq!(pointer_angle(v, 800.0, 300.0), 0.0);
        assert_eq!(pointer_angle(v, 400.0, 600.0), 90.0);
        assert_eq!(pointer_angle(v, 0.0, 300.0), 180.0);
        assert_eq!(pointer_angle(v, 700.0, 600.0), 45.0);
    }

    #[test]
    fn pointer_uses_current_viewport() {
        let (handler, mut player, mut viewport) = setup();
        handler.apply(
            &InputEvent::Resized {
                width: 200,
                height: 200,
            },
            &mut player,
            &mut viewport,
        );
        handler.apply(
            &InputEvent::PointerMoved { x: 100.0, y: 0.0 },
            &mut player,
            &mut viewport,
        );
        assert_eq!(player.look_angle, -90.0);
    }

    #[test]
    fn resize_updates_viewport() {
        let (handler, mut player, mut viewport) = setup();
        let effect = handler.apply(
            &InputEvent::Resized {
                width: 1024,
                height: 768,
            },
            &mut player,
            &mut viewport,
        );
        assert_eq!(viewport, Viewport::new(1024, 768));
        assert_eq!(effect, Some(Effect::Resized(Viewport::new(1024, 768))));
    }
}
