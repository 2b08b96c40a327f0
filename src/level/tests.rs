//! Level domain: tests for scene routing and platform motion.

use bevy::prelude::Vec2;

use super::data::{SceneConfig, SceneRegistry, advance_target};
use super::platforms::platform_velocity;
use crate::player::PlayerAnimation;

#[test]
fn registry_contains_builtin_scenes() {
    let registry = SceneRegistry::default();
    assert!(registry.contains("hillside"));
    assert!(registry.contains("summit"));

    // The default config only points at registered scenes.
    let config = SceneConfig::default();
    assert!(registry.contains(&config.current));
    if let Some(success) = &config.success_scene {
        assert!(registry.contains(success));
    }
}

#[test]
fn advance_target_routes_by_outcome() {
    let config = SceneConfig {
        current: "hillside".to_string(),
        failure_scene: None,
        success_scene: Some("summit".to_string()),
    };

    // No failure scene configured: a death reloads the current scene.
    assert_eq!(advance_target(PlayerAnimation::Dead, &config), "hillside");
    assert_eq!(advance_target(PlayerAnimation::Success, &config), "summit");
    // Anything else (stale or mid-air state) also reloads.
    assert_eq!(advance_target(PlayerAnimation::JumpDown, &config), "hillside");

    let config = SceneConfig {
        failure_scene: Some("gauntlet".to_string()),
        ..config
    };
    assert_eq!(advance_target(PlayerAnimation::Dead, &config), "gauntlet");
}

#[test]
fn platform_velocity_eases_at_turnarounds() {
    let travel = Vec2::new(0.0, 3.0);
    let period = 4.0;

    // Full speed upward at the start of the cycle.
    assert!(platform_velocity(travel, period, 0.0).y > 0.0);
    // Near-zero at the quarter-period turnaround.
    assert!(platform_velocity(travel, period, 1.0).y.abs() < 1e-5);
    // Reversed on the way back.
    assert!(platform_velocity(travel, period, 2.0).y < 0.0);
}
