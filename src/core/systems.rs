//! Core domain: camera setup and boot flow.

use bevy::prelude::*;

use crate::core::state::GameState;

pub(crate) fn setup_camera(mut commands: Commands) {
    // World units are meters; zoom in so the level fills the window.
    commands.spawn((Camera2d, Transform::from_scale(Vec3::splat(1.0 / 48.0))));
}

pub(crate) fn advance_from_boot(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Playing);
}
