//! Player domain: the character controller, its animation machine, and
//! trigger-driven lifecycle transitions.
//!
//! Two clocks drive the controller: the variable-rate `Update` pass
//! (input sampling, grace-window timers, wall machine, animation
//! evaluation) and the fixed-rate `FixedUpdate` pass (horizontal velocity
//! integration, kill-plane check), so movement stays deterministic across
//! frame rates.

pub(crate) mod animation;
mod components;
mod systems;
mod triggers;
pub(crate) mod tuning;

#[cfg(feature = "dev-tools")]
mod dev;

#[cfg(test)]
mod tests;

pub use animation::{
    AnimationController, AnimationStateChanged, ClipDef, ClipLibrary, PlayerAnimation,
};
pub use components::{Facing, GameLayer, Lifecycle, MotionState, Player, SensorRig, Trail, WallState};
pub use systems::input::PlayerInput;
pub use tuning::PlayerTuning;

use bevy::prelude::*;

use crate::core::GameState;
use crate::player::animation::{
    advance_animation_frames, apply_entry_actions, evaluate_animation_state, sync_facing_to_sprite,
};
use crate::player::systems::{
    apply_fall_death, apply_horizontal_movement, apply_input, handle_wall_jump_end,
    refresh_sensors, sample_input, update_facing, update_jump, update_wall_machine,
};
use crate::player::triggers::handle_trigger_overlaps;
use crate::player::tuning::{apply_gravity_config, load_tuning};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .init_resource::<PlayerTuning>()
            .init_resource::<ClipLibrary>()
            .add_message::<AnimationStateChanged>()
            .add_systems(Startup, (load_tuning, apply_gravity_config).chain())
            .add_systems(
                Update,
                (
                    refresh_sensors,
                    sample_input,
                    apply_input,
                    handle_wall_jump_end,
                    handle_trigger_overlaps,
                    update_jump,
                    update_wall_machine,
                    update_facing,
                    evaluate_animation_state,
                    apply_entry_actions,
                    advance_animation_frames,
                    sync_facing_to_sprite,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                FixedUpdate,
                (refresh_sensors, apply_horizontal_movement, apply_fall_death)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            Update,
            dev::log_controller_state.run_if(in_state(GameState::Playing)),
        );
    }
}
