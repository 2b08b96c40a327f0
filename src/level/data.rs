//! Level domain: built-in scene definitions and the scene registry.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::player::PlayerAnimation;

/// Axis-aligned slab of geometry; `pos` is the center.
#[derive(Debug, Clone, Copy)]
pub struct Slab {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Slab {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlatformDef {
    pub pos: Vec2,
    pub size: Vec2,
    pub travel: Vec2,
    pub period: f32,
}

/// Static description of one scene.
#[derive(Debug, Clone)]
pub struct LevelDef {
    pub id: String,
    pub player_spawn: Vec2,
    pub ground: Vec<Slab>,
    pub walls: Vec<Slab>,
    pub coins: Vec<Vec2>,
    pub hazards: Vec<Slab>,
    pub goals: Vec<Slab>,
    pub platforms: Vec<PlatformDef>,
}

/// All known scenes by id.
#[derive(Resource, Debug)]
pub struct SceneRegistry {
    levels: HashMap<String, LevelDef>,
}

impl SceneRegistry {
    pub fn get(&self, id: &str) -> Option<&LevelDef> {
        self.levels.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.levels.contains_key(id)
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        let mut levels = HashMap::new();
        for level in [hillside(), summit()] {
            levels.insert(level.id.clone(), level);
        }
        Self { levels }
    }
}

fn hillside() -> LevelDef {
    LevelDef {
        id: "hillside".to_string(),
        player_spawn: Vec2::new(-12.0, 0.0),
        ground: vec![
            // Left floor, a gap over the kill plane, then the right floor.
            Slab::new(-10.0, -2.0, 16.0, 1.0),
            Slab::new(8.0, -2.0, 12.0, 1.0),
            // A step for coyote-time hops.
            Slab::new(-4.0, -0.5, 2.0, 0.5),
        ],
        walls: vec![
            // Facing pair for wall-jump climbs up to the goal ledge.
            Slab::new(14.5, 2.0, 1.0, 8.0),
            Slab::new(18.5, 2.5, 1.0, 9.0),
        ],
        coins: vec![
            Vec2::new(-6.0, -1.0),
            Vec2::new(0.0, 1.5),
            Vec2::new(10.0, -1.0),
            Vec2::new(16.5, 4.0),
        ],
        hazards: vec![Slab::new(5.0, -1.3, 2.0, 0.4)],
        goals: vec![Slab::new(16.5, 6.8, 1.2, 1.6)],
        platforms: vec![PlatformDef {
            pos: Vec2::new(0.0, -1.0),
            size: Vec2::new(2.4, 0.4),
            travel: Vec2::new(0.0, 3.0),
            period: 4.0,
        }],
    }
}

fn summit() -> LevelDef {
    LevelDef {
        id: "summit".to_string(),
        player_spawn: Vec2::new(-10.0, 0.0),
        ground: vec![
            Slab::new(-8.0, -2.0, 12.0, 1.0),
            Slab::new(6.0, -1.0, 6.0, 1.0),
        ],
        walls: vec![Slab::new(11.5, 3.0, 1.0, 9.0)],
        coins: vec![Vec2::new(-4.0, -1.0), Vec2::new(6.0, 0.5)],
        hazards: vec![Slab::new(0.5, -2.3, 5.0, 0.4)],
        goals: vec![Slab::new(10.0, 0.5, 1.2, 1.6)],
        platforms: vec![PlatformDef {
            pos: Vec2::new(0.5, -0.5),
            size: Vec2::new(2.0, 0.4),
            travel: Vec2::new(3.0, 0.0),
            period: 5.0,
        }],
    }
}

/// Which scene is loaded and where lifecycle transitions lead.
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    pub current: String,
    /// Scene for a failed run; unset means reload the current scene.
    pub failure_scene: Option<String>,
    pub success_scene: Option<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            current: "hillside".to_string(),
            failure_scene: None,
            success_scene: Some("summit".to_string()),
        }
    }
}

/// Pick where a finished life leads: the failure target after a death,
/// the success target after a completed level, the current scene again
/// otherwise.
pub(crate) fn advance_target(last_state: PlayerAnimation, config: &SceneConfig) -> String {
    let target = match last_state {
        PlayerAnimation::Dead => config.failure_scene.clone(),
        PlayerAnimation::Success => config.success_scene.clone(),
        _ => None,
    };
    target.unwrap_or_else(|| config.current.clone())
}
