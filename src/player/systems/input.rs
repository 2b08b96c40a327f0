//! Player domain: input sampling.

use bevy::prelude::*;

use crate::player::{Lifecycle, MotionState, Player};

/// Raw input snapshot for the current frame.
#[derive(Resource, Debug, Default)]
pub struct PlayerInput {
    pub horizontal: f32,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
}

pub(crate) fn sample_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    input.horizontal = x;
    input.jump_just_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.jump_just_released =
        keyboard.just_released(KeyCode::Space) || keyboard.just_released(KeyCode::KeyK);
}

/// Copy the sampled axis onto the controller. Dead players keep their last
/// value; integration stops separately via the controllable flag.
pub(crate) fn apply_input(
    input: Res<PlayerInput>,
    mut query: Query<(&mut MotionState, &Lifecycle), With<Player>>,
) {
    for (mut motion, lifecycle) in &mut query {
        if lifecycle.alive {
            motion.horizontal = input.horizontal;
        }
    }
}
