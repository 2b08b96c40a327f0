//! Player domain: buffered jump, coyote time, and the variable-height hop.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::player::systems::input::PlayerInput;
use crate::player::tuning::PlayerTuning;
use crate::player::{Lifecycle, MotionState, Player};

/// Re-arm or decay the two grace windows. Being grounded re-arms coyote
/// time every frame; a press edge re-arms the jump buffer.
pub(crate) fn tick_jump_timers(
    motion: &mut MotionState,
    jump_pressed: bool,
    dt: f32,
    tuning: &PlayerTuning,
) {
    if motion.on_ground {
        motion.coyote_timer = tuning.coyote_time;
    } else {
        motion.coyote_timer -= dt;
    }

    if jump_pressed {
        motion.jump_buffer_timer = tuning.jump_buffer_time;
    } else {
        motion.jump_buffer_timer -= dt;
    }
}

/// Fire a jump when both grace windows are open. Consumes the buffer; the
/// coyote window is left untouched and only re-arms on ground contact.
pub(crate) fn try_buffered_jump(
    motion: &mut MotionState,
    velocity: &mut Vec2,
    tuning: &PlayerTuning,
) -> bool {
    if motion.coyote_timer > 0.0 && motion.jump_buffer_timer > 0.0 {
        velocity.y = tuning.jumping_power;
        motion.jump_buffer_timer = 0.0;
        return true;
    }
    false
}

/// Releasing mid-ascent shortens the jump and closes the coyote window so
/// the same airtime cannot re-trigger a full jump.
pub(crate) fn try_hop(
    motion: &mut MotionState,
    jump_released: bool,
    velocity: &mut Vec2,
    tuning: &PlayerTuning,
) -> bool {
    if tuning.should_hop && jump_released && velocity.y > 0.0 {
        velocity.y *= tuning.hop_ratio;
        motion.coyote_timer = 0.0;
        return true;
    }
    false
}

pub(crate) fn update_jump(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<PlayerTuning>,
    mut query: Query<(&mut MotionState, &Lifecycle, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut motion, lifecycle, mut velocity) in &mut query {
        if !lifecycle.alive {
            continue;
        }

        tick_jump_timers(&mut motion, input.jump_just_pressed, dt, &tuning);

        if try_buffered_jump(&mut motion, &mut velocity.0, &tuning) {
            debug!("jump fired, coyote left at {:.3}", motion.coyote_timer);
        }

        try_hop(&mut motion, input.jump_just_released, &mut velocity.0, &tuning);
    }
}
