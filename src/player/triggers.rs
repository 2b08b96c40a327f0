//! Player domain: trigger-region overlap handling (goal, hazard, coin).

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::audio::{PlaySoundFx, SoundCue};
use crate::level::{TriggerKind, TriggerRegion};
use crate::player::animation::{AnimationController, AnimationStateChanged, PlayerAnimation};
use crate::player::{Lifecycle, MotionState, Player};

/// Resolve player-versus-trigger overlaps. Goal and hazard regions force a
/// lifecycle transition exactly once per life; coins are collected
/// immediately with no delay.
pub(crate) fn handle_trigger_overlaps(
    mut collision_start_events: MessageReader<CollisionStart>,
    trigger_query: Query<&TriggerRegion>,
    mut player_query: Query<
        (Entity, &mut MotionState, &mut Lifecycle, &mut AnimationController),
        With<Player>,
    >,
    mut changed: MessageWriter<AnimationStateChanged>,
    mut fx: MessageWriter<PlaySoundFx>,
    mut commands: Commands,
) {
    let Ok((player_entity, mut motion, mut lifecycle, mut controller)) = player_query.single_mut()
    else {
        // Consume events while no player exists.
        for _ in collision_start_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let (trigger_entity, other) = if trigger_query.get(event.collider1).is_ok() {
            (event.collider1, event.collider2)
        } else if trigger_query.get(event.collider2).is_ok() {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        if other != player_entity {
            continue;
        }

        let Ok(region) = trigger_query.get(trigger_entity) else {
            continue;
        };

        match region.kind {
            TriggerKind::Coin => {
                let total = lifecycle.collect_coin();
                info!("collected coins: {}", total);
                fx.write(PlaySoundFx(SoundCue::Coin));
                commands.entity(trigger_entity).despawn();
            }
            TriggerKind::Goal => {
                force_lifecycle_state(
                    player_entity,
                    &mut motion,
                    &mut lifecycle,
                    &mut controller,
                    PlayerAnimation::Success,
                    &mut changed,
                );
            }
            TriggerKind::Hazard => {
                force_lifecycle_state(
                    player_entity,
                    &mut motion,
                    &mut lifecycle,
                    &mut controller,
                    PlayerAnimation::Dead,
                    &mut changed,
                );
            }
        }
    }
}

/// Force Dead or Success from a trigger, bypassing the per-frame ladder.
/// Re-entry is a no-op once the player is no longer alive.
fn force_lifecycle_state(
    entity: Entity,
    motion: &mut MotionState,
    lifecycle: &mut Lifecycle,
    controller: &mut AnimationController,
    state: PlayerAnimation,
    changed: &mut MessageWriter<AnimationStateChanged>,
) {
    if !lifecycle.alive {
        return;
    }
    lifecycle.alive = false;
    motion.controllable = false;

    let from = controller.state;
    if controller.set_state(state) {
        changed.write(AnimationStateChanged {
            entity,
            from,
            to: state,
        });
    }
}
