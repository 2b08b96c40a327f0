//! Level domain: markers, trigger regions, and platform components.

use bevy::prelude::*;

/// Everything spawned for the current scene, torn down on a scene change.
#[derive(Component, Debug)]
pub struct LevelEntity;

/// What touching a trigger region does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// Finishes the level.
    Goal,
    /// Kills the player.
    Hazard,
    /// Collected and removed immediately.
    Coin,
}

/// A non-solid overlap region producing a gameplay event.
#[derive(Component, Debug)]
pub struct TriggerRegion {
    pub kind: TriggerKind,
}

/// A kinematic platform patrolling along `travel` from its spawn point.
#[derive(Component, Debug)]
pub struct MovingPlatform {
    pub travel: Vec2,
    pub period: f32,
    pub elapsed: f32,
}

/// Non-owning relation: which platform currently carries the player. The
/// platform is referenced, never parented.
#[derive(Component, Debug)]
pub struct CarriedBy {
    pub platform: Entity,
}

/// Marker for a platform's rider-detection zone.
#[derive(Component, Debug)]
pub struct CarryZone {
    pub platform: Entity,
}
