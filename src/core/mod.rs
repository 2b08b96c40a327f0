//! Core domain: app states, camera, and lifecycle events.

mod events;
mod state;
mod systems;

pub use events::{LevelCompletedEvent, PlayerDiedEvent};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{advance_from_boot, setup_camera};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_message::<PlayerDiedEvent>()
            .add_message::<LevelCompletedEvent>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, advance_from_boot.run_if(in_state(GameState::Boot)));
    }
}
