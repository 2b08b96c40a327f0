//! Player domain: wall-slide and wall-jump machine.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::callbacks::{CallbackScheduler, DeferredAction, DeferredFired};
use crate::player::systems::input::PlayerInput;
use crate::player::tuning::PlayerTuning;
use crate::player::{Lifecycle, MotionState, Player, SensorRig, WallState};

/// Slide entry requires wall contact, being airborne, and input held.
/// While sliding, descent is clamped to the slide speed.
pub(crate) fn update_slide_state(
    wall: &mut WallState,
    motion: &MotionState,
    velocity: &mut Vec2,
    tuning: &PlayerTuning,
) {
    if motion.on_wall && !motion.on_ground && motion.horizontal != 0.0 {
        wall.is_sliding = true;
        velocity.y = velocity.y.max(-tuning.wall_slide_speed);
    } else {
        wall.is_sliding = false;
    }
}

/// Re-arm the jump window while sliding (cancelling any pending lock
/// release), decay it otherwise, then launch on a press edge while the
/// window is open. Returns true when a wall jump fired.
pub(crate) fn update_jump_window(
    entity: Entity,
    wall: &mut WallState,
    motion: &mut MotionState,
    velocity: &mut Vec2,
    jump_pressed: bool,
    dt: f32,
    scheduler: &mut CallbackScheduler,
    tuning: &PlayerTuning,
) -> bool {
    if wall.is_sliding {
        wall.is_jumping = false;
        wall.direction = -motion.facing.sign();
        wall.counter = tuning.wall_jump_window;
        if let Some(handle) = wall.end_handle.take() {
            scheduler.cancel(handle);
        }
    } else {
        wall.counter -= dt;
    }

    if jump_pressed && wall.counter > 0.0 {
        wall.is_jumping = true;
        *velocity = Vec2::new(
            wall.direction * tuning.wall_jump_x_power,
            tuning.wall_jump_y_power,
        );
        wall.counter = 0.0;

        if motion.facing.sign() != wall.direction {
            motion.facing = motion.facing.opposite();
        }

        if let Some(handle) = wall.end_handle.take() {
            scheduler.cancel(handle);
        }
        wall.end_handle = Some(scheduler.schedule(
            DeferredAction::EndWallJump(entity),
            tuning.wall_jump_duration,
        ));
        return true;
    }
    false
}

pub(crate) fn update_wall_machine(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<PlayerTuning>,
    mut scheduler: ResMut<CallbackScheduler>,
    mut query: Query<
        (
            Entity,
            &SensorRig,
            &mut MotionState,
            &mut WallState,
            &Lifecycle,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, rig, mut motion, mut wall, lifecycle, mut velocity) in &mut query {
        // No wall probe configured means no wall mechanics at all.
        if !lifecycle.alive || rig.wall_offset.is_none() {
            continue;
        }

        // Slide update first, then the jump trigger, in this order every
        // frame.
        update_slide_state(&mut wall, &motion, &mut velocity.0, &tuning);
        let jumped = update_jump_window(
            entity,
            &mut wall,
            &mut motion,
            &mut velocity.0,
            input.jump_just_pressed,
            dt,
            &mut scheduler,
            &tuning,
        );
        if jumped {
            debug!("wall jump fired, direction={}", wall.direction);
        }
    }
}

/// Facing follows input except while wall-jump control is suspended.
pub(crate) fn update_facing(
    mut query: Query<(&mut MotionState, &WallState, &Lifecycle), With<Player>>,
) {
    for (mut motion, wall, lifecycle) in &mut query {
        if !lifecycle.alive || wall.is_jumping {
            continue;
        }
        let facing_sign = motion.facing.sign();
        if (facing_sign > 0.0 && motion.horizontal < 0.0)
            || (facing_sign < 0.0 && motion.horizontal > 0.0)
        {
            motion.facing = motion.facing.opposite();
        }
    }
}

/// Clears the wall-jump lock when its delay elapses. Harmless if the lock
/// was already cleared by a fresh slide.
pub(crate) fn handle_wall_jump_end(
    mut fired: MessageReader<DeferredFired>,
    mut query: Query<&mut WallState>,
) {
    for message in fired.read() {
        let DeferredAction::EndWallJump(entity) = message.action else {
            continue;
        };
        if let Ok(mut wall) = query.get_mut(entity) {
            wall.is_jumping = false;
            wall.end_handle = None;
        }
    }
}
