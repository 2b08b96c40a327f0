//! Level domain: scene registry, geometry and trigger spawning, moving
//! platforms, and scene advancement.

mod components;
mod data;
mod platforms;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{CarriedBy, CarryZone, LevelEntity, MovingPlatform, TriggerKind, TriggerRegion};
pub use data::{LevelDef, PlatformDef, SceneConfig, SceneRegistry, Slab};

use bevy::prelude::*;

use crate::core::GameState;
use crate::level::platforms::{carry_riders, drive_platforms, track_platform_riders};
use crate::level::spawn::spawn_current_scene;
use crate::level::systems::handle_scene_advance;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneRegistry>()
            .init_resource::<SceneConfig>()
            .add_systems(OnEnter(GameState::Playing), spawn_current_scene)
            .add_systems(
                Update,
                (
                    drive_platforms,
                    track_platform_riders,
                    carry_riders,
                    handle_scene_advance,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
