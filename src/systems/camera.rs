use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::resources::camera2d::{Camera2DRes, LevelBounds};
use crate::resources::gameconfig::GameConfig;

/// Keep the player horizontally centered without showing past the level edges.
pub fn update_camera(
    players: Query<(&MapPosition, &BoxCollider), With<Player>>,
    bounds: Res<LevelBounds>,
    config: Res<GameConfig>,
    mut camera: ResMut<Camera2DRes>,
) {
    let Ok((position, collider)) = players.single() else {
        return;
    };
    let focus = collider.center_x(position.pos);
    let offset = bounds.scroll_offset(focus, config.window_width as f32);
    if offset != camera.offset_x() {
        camera.set_offset_x(offset);
    }
}
