use crate::canvas::{Canvas, DrawList};
use crate::scene::{Scene, SceneRenderer};
use gridshot_common::Viewport;

/// Produces one full frame from scene state and the surface size.
///
/// Renderers read the scene; they never mutate player or map state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from scratch.
    fn render(&self, scene: &Scene<'_>, viewport: Viewport) -> Self::Output;
}

impl Renderer for SceneRenderer {
    type Output = DrawList;

    fn render(&self, scene: &Scene<'_>, viewport: Viewport) -> DrawList {
        let mut list = DrawList::new(viewport);
        list.clear();
        self.paint(&mut list, scene);
        list
    }
}

/// Text dump of a frame, for the CLI, logging and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    scene_renderer: SceneRenderer,
}

impl DebugTextRenderer {
    pub fn new(scene_renderer: SceneRenderer) -> Self {
        Self { scene_renderer }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene<'_>, viewport: Viewport) -> String {
        let player = scene.player;
        let mut out = format!(
            "=== Frame (weapon={}, look={:.2}) ===\n",
            player.weapon.slot(),
            player.look_angle
        );
        out.push_str(&format!(
            "Player: tile=({:.2}, {:.2})\n",
            player.pos.x, player.pos.y
        ));
        out.push_str(&format!("Blocks: {}\n", scene.map.blocks.len()));
        out.push_str(&self.scene_renderer.render(scene, viewport).describe());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use gridshot_common::{Player, Position};
    use gridshot_map::MapData;

    #[test]
    fn scene_renderer_starts_with_clear() {
        let map = MapData {
            spawn: vec![Position::new(1.0, 1.0)],
            blocks: vec![Position::new(0.0, 0.0)],
        };
        let player = Player::spawn_at(map.spawn_point());
        let list = SceneRenderer::default().render(
            &Scene {
                player: &player,
                map: &map,
            },
            Viewport::new(320, 240),
        );
        assert_eq!(list.commands()[0], DrawCommand::Clear);
        assert_eq!(list.len(), 5);
        assert_eq!(list.viewport(), Viewport::new(320, 240));
    }

    #[test]
    fn debug_text_renderer_output() {
        let map = MapData::builtin();
        let mut player = Player::spawn_at(map.spawn_point());
        player.look_angle = -90.0;
        let text = DebugTextRenderer::default().render(
            &Scene {
                player: &player,
                map: &map,
            },
            Viewport::new(800, 600),
        );

        assert!(text.contains("weapon=1"));
        assert!(text.contains("look=-90.00"));
        assert!(text.contains(&format!("Blocks: {}", map.blocks.len())));
        assert!(text.contains("frame 800x600"));
        assert!(text.contains("stroke_line (400.0, 300.0)"));
    }
}
