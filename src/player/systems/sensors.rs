//! Player domain: grounded and walled overlap probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::player::{GameLayer, MotionState, Player, SensorRig};

/// Refresh the grounded / walled contact flags from circle overlaps at the
/// rig's probe points. The wall probe mirrors with the current facing; a
/// rig without one reports no wall contact at all.
pub(crate) fn refresh_sensors(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &SensorRig, &mut MotionState), With<Player>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Wall);

    for (transform, rig, mut motion) in &mut query {
        let origin = transform.translation.truncate();
        let probe = Collider::circle(rig.radius);
        let facing_sign = motion.facing.sign();

        motion.on_ground = !spatial_query
            .shape_intersections(&probe, origin + rig.ground_offset, 0.0, &ground_filter)
            .is_empty();

        motion.on_wall = match rig.wall_offset {
            Some(offset) => {
                let point = origin + Vec2::new(offset.x * facing_sign, offset.y);
                !spatial_query
                    .shape_intersections(&probe, point, 0.0, &wall_filter)
                    .is_empty()
            }
            None => false,
        };
    }
}
