use gridshot_common::{Player, Viewport};
use gridshot_map::MapData;
use gridshot_render::Scene;

/// The state of one running demo: a player spawned on a static map, viewed
/// through a surface of a given size.
#[derive(Debug, Clone)]
pub struct Session {
    player: Player,
    map: MapData,
    viewport: Viewport,
}

impl Session {
    /// Spawn the player at the map's first spawn point.
    pub fn new(map: MapData, viewport: Viewport) -> Self {
        let player = Player::spawn_at(map.spawn_point());
        Self {
            player,
            map,
            viewport,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn map(&self) -> &MapData {
        &self.map
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            player: &self.player,
            map: &self.map,
        }
    }

    /// Mutable access for the input handler.
    pub(crate) fn input_targets(&mut self) -> (&mut Player, &mut Viewport) {
        (&mut self.player, &mut self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridshot_common::Position;

    #[test]
    fn player_spawns_at_first_spawn_point() {
        let map = MapData {
            spawn: vec![Position::new(3.0, 4.0), Position::new(9.0, 9.0)],
            blocks: Vec::new(),
        };
        let session = Session::new(map, Viewport::new(640, 480));
        assert_eq!(session.player().pos, Position::new(3.0, 4.0));
        assert_eq!(session.player().weapon.slot(), 1);
        assert_eq!(session.player().look_angle, 0.0);
        assert_eq!(session.viewport(), Viewport::new(640, 480));
    }

    #[test]
    fn scene_borrows_session_state() {
        let session = Session::new(MapData::builtin(), Viewport::new(10, 10));
        let scene = session.scene();
        assert_eq!(scene.map.blocks.len(), session.map().blocks.len());
        assert_eq!(scene.player, session.player());
    }
}
