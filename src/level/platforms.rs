//! Level domain: moving platforms and the carried-by relation.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::level::components::{CarriedBy, CarryZone, MovingPlatform};
use crate::player::Player;

/// Velocity of a platform `t` seconds into its cycle. Cosine drive, so the
/// platform eases out at both ends of the travel segment.
pub(crate) fn platform_velocity(travel: Vec2, period: f32, t: f32) -> Vec2 {
    let omega = TAU / period.max(f32::EPSILON);
    travel * 0.5 * omega * (omega * t).cos()
}

pub(crate) fn drive_platforms(
    time: Res<Time>,
    mut query: Query<(&mut MovingPlatform, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();
    for (mut platform, mut velocity) in &mut query {
        platform.elapsed += dt;
        velocity.0 = platform_velocity(platform.travel, platform.period, platform.elapsed);
    }
}

/// Track the rider zone: entering attaches the carried-by relation and
/// kills the player's momentum; leaving detaches it.
pub(crate) fn track_platform_riders(
    mut collision_start_events: MessageReader<CollisionStart>,
    mut collision_end_events: MessageReader<CollisionEnd>,
    zone_query: Query<&CarryZone>,
    mut player_query: Query<(Entity, &mut LinearVelocity), With<Player>>,
    mut commands: Commands,
) {
    let Ok((player_entity, mut player_velocity)) = player_query.single_mut() else {
        for _ in collision_start_events.read() {}
        for _ in collision_end_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let (zone_entity, other) = if zone_query.get(event.collider1).is_ok() {
            (event.collider1, event.collider2)
        } else if zone_query.get(event.collider2).is_ok() {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        if other != player_entity {
            continue;
        }

        if let Ok(zone) = zone_query.get(zone_entity) {
            player_velocity.0 = Vec2::ZERO;
            commands.entity(player_entity).insert(CarriedBy {
                platform: zone.platform,
            });
        }
    }

    for event in collision_end_events.read() {
        let zone_hit =
            zone_query.get(event.collider1).is_ok() || zone_query.get(event.collider2).is_ok();
        let involves_player = event.collider1 == player_entity || event.collider2 == player_entity;
        if zone_hit && involves_player {
            commands.entity(player_entity).remove::<CarriedBy>();
        }
    }
}

/// Carried players follow their platform's motion without any
/// reparenting; the relation is looked up fresh every frame.
pub(crate) fn carry_riders(
    time: Res<Time>,
    platform_query: Query<&LinearVelocity, (With<MovingPlatform>, Without<Player>)>,
    mut rider_query: Query<(&CarriedBy, &mut Transform), With<Player>>,
) {
    let dt = time.delta_secs();
    for (carried, mut transform) in &mut rider_query {
        let Ok(platform_velocity) = platform_query.get(carried.platform) else {
            continue;
        };
        transform.translation += (platform_velocity.0 * dt).extend(0.0);
    }
}
