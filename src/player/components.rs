//! Player domain: controller components and physics layers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::callbacks::CallbackHandle;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Surfaces the player can stand on
    Ground,
    /// Surfaces the player can slide down and jump off
    Wall,
    /// Player character
    Player,
    /// Trigger regions (coins, hazards, goals) - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Horizontal facing of the player sprite, as a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Sampled input, contact flags, and the jump grace-window countdowns.
/// The countdowns may go negative; only their sign is ever tested.
#[derive(Component, Debug)]
pub struct MotionState {
    pub horizontal: f32,
    pub facing: Facing,
    /// When false, integration applies a fixed damping and nothing else.
    pub controllable: bool,
    pub on_ground: bool,
    pub on_wall: bool,
    pub coyote_timer: f32,
    pub jump_buffer_timer: f32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            horizontal: 0.0,
            facing: Facing::Right,
            controllable: true,
            on_ground: false,
            on_wall: false,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
        }
    }
}

/// Wall-slide / wall-jump machine. Sliding and jumping are mutually
/// exclusive: re-entering the slide clears the jump lock.
#[derive(Component, Debug, Default)]
pub struct WallState {
    pub is_sliding: bool,
    pub is_jumping: bool,
    /// Launch direction of the next wall jump (away from the wall).
    pub direction: f32,
    /// Grace window after leaving the slide during which a wall jump is
    /// still accepted.
    pub counter: f32,
    pub end_handle: Option<CallbackHandle>,
}

/// Alive flag and coin tally. Coins only ever go up within one life.
#[derive(Component, Debug)]
pub struct Lifecycle {
    pub alive: bool,
    coins: u32,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            alive: true,
            coins: 0,
        }
    }
}

impl Lifecycle {
    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// Record one picked-up coin and return the new total.
    pub fn collect_coin(&mut self) -> u32 {
        self.coins += 1;
        self.coins
    }
}

/// Overlap-probe offsets relative to the player origin. A rig without a
/// wall probe disables the whole wall machine.
#[derive(Component, Debug, Clone)]
pub struct SensorRig {
    pub ground_offset: Vec2,
    /// Probe toward the facing direction; x mirrors with facing.
    pub wall_offset: Option<Vec2>,
    pub radius: f32,
}

impl Default for SensorRig {
    fn default() -> Self {
        Self {
            ground_offset: Vec2::new(0.0, -0.5),
            wall_offset: Some(Vec2::new(0.35, 0.0)),
            radius: 0.2,
        }
    }
}

/// Marker for the decorative trail child removed on death.
#[derive(Component, Debug)]
pub struct Trail;
