//! Player domain: debug-only controller readout.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::player::{MotionState, Player, WallState};

/// F3 dumps the controller state to the log.
pub(crate) fn log_controller_state(
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<(&Transform, &MotionState, &WallState, &LinearVelocity), With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    for (transform, motion, wall, velocity) in &query {
        info!(
            "pos=({:.2},{:.2}) vel=({:.2},{:.2}) grounded={} walled={} coyote={:.3} buffer={:.3} sliding={} wall_jumping={}",
            transform.translation.x,
            transform.translation.y,
            velocity.x,
            velocity.y,
            motion.on_ground,
            motion.on_wall,
            motion.coyote_timer,
            motion.jump_buffer_timer,
            wall.is_sliding,
            wall.is_jumping,
        );
    }
}
