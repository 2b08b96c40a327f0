//! Core domain: lifecycle events emitted by the player controller.

use bevy::ecs::message::Message;

/// Fired once when the player dies (hazard contact or falling out of the
/// level).
#[derive(Debug)]
pub struct PlayerDiedEvent;

impl Message for PlayerDiedEvent {}

/// Fired once when the player reaches the level goal.
#[derive(Debug)]
pub struct LevelCompletedEvent;

impl Message for LevelCompletedEvent {}
