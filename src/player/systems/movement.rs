//! Player domain: fixed-step horizontal integration and fall-death.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::player::tuning::PlayerTuning;
use crate::player::{MotionState, Player, WallState};

/// Velocity decay per fixed tick while the controller rejects input.
pub(crate) const UNCONTROLLABLE_DAMPING: f32 = 0.9;

/// Below this speed, with no input held, the player snaps to a standstill.
const SNAP_TO_REST_SPEED: f32 = 0.5;

pub(crate) fn is_zeroish(v: f32) -> bool {
    v.abs() < 1e-3
}

/// One fixed-step update of the horizontal velocity: zero it on a
/// direction reversal, then step exponentially toward the input target.
pub(crate) fn integrate_horizontal(
    vx: f32,
    horizontal: f32,
    on_ground: bool,
    tuning: &PlayerTuning,
) -> f32 {
    let mut vx = vx;

    // turning around?
    if !is_zeroish(horizontal) && vx.signum() != horizontal.signum() {
        vx = 0.0;
    }

    let deceleration = if on_ground {
        tuning.ground_deceleration
    } else {
        tuning.air_deceleration
    };
    let rate = if horizontal.abs() > 0.0 {
        tuning.acceleration
    } else {
        deceleration
    };

    vx += (horizontal * tuning.speed - vx) * rate;
    if is_zeroish(horizontal) && vx.abs() < SNAP_TO_REST_SPEED {
        vx = 0.0;
    }
    vx
}

pub(crate) fn apply_horizontal_movement(
    tuning: Res<PlayerTuning>,
    mut query: Query<(&RigidBody, &MotionState, &WallState, &mut LinearVelocity), With<Player>>,
) {
    for (body, motion, wall, mut velocity) in &mut query {
        if matches!(body, RigidBody::Static) {
            continue;
        }

        if !motion.controllable {
            velocity.0 *= UNCONTROLLABLE_DAMPING;
            continue;
        }

        // Horizontal control is suspended for the wall-jump window.
        if wall.is_jumping {
            continue;
        }

        velocity.x = integrate_horizontal(velocity.x, motion.horizontal, motion.on_ground, &tuning);
    }
}

/// Falling below the kill plane freezes the body. The freeze is one-way:
/// every integration site skips static bodies from then on.
pub(crate) fn apply_fall_death(
    mut commands: Commands,
    tuning: Res<PlayerTuning>,
    query: Query<(Entity, &Transform, &RigidBody), With<Player>>,
) {
    for (entity, transform, body) in &query {
        if matches!(body, RigidBody::Static) {
            continue;
        }
        if transform.translation.y < tuning.dead_below_y {
            info!("Player fell below y={}, freezing body", tuning.dead_below_y);
            commands.entity(entity).insert(RigidBody::Static);
        }
    }
}
