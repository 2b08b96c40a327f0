//! Player domain: movement tuning constants with optional RON override.

use avian2d::prelude::*;
use bevy::prelude::*;
use ron::Options;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

pub(crate) const TUNING_PATH: &str = "assets/config/player.ron";

/// All tunable movement constants. Immutable for the lifetime of one
/// controller instance; shared read-only across players.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Maximum horizontal speed.
    pub speed: f32,
    /// Per-tick lerp fraction toward the target speed while input is held.
    pub acceleration: f32,
    pub ground_deceleration: f32,
    pub air_deceleration: f32,
    pub jumping_power: f32,
    pub wall_jump_x_power: f32,
    pub wall_jump_y_power: f32,
    /// Shorten the jump when the button is released mid-ascent?
    pub should_hop: bool,
    /// Ratio of hop vs full jump.
    pub hop_ratio: f32,
    /// How long before landing an early jump press is remembered.
    pub jump_buffer_time: f32,
    /// How long after leaving the ground a jump is still accepted.
    pub coyote_time: f32,
    pub wall_slide_speed: f32,
    /// How long after leaving a wall slide a wall jump is still accepted.
    pub wall_jump_window: f32,
    /// How long horizontal control stays suspended after a wall jump.
    pub wall_jump_duration: f32,
    /// The player dies when falling below this Y level.
    pub dead_below_y: f32,
    /// Wait before leaving the scene after death or success.
    pub scene_advance_delay: f32,
    pub gravity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 8.0,
            acceleration: 0.2,
            ground_deceleration: 0.5,
            air_deceleration: 0.5,
            jumping_power: 16.0,
            wall_jump_x_power: 8.0,
            wall_jump_y_power: 16.0,
            should_hop: true,
            hop_ratio: 0.5,
            jump_buffer_time: 0.1,
            coyote_time: 0.1,
            wall_slide_speed: 2.0,
            wall_jump_window: 0.1,
            wall_jump_duration: 0.4,
            dead_below_y: -5.0,
            scene_advance_delay: 2.0,
            gravity: 40.0,
        }
    }
}

/// Error type for tuning-file load failures.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

impl PlayerTuning {
    /// Parse a (possibly partial) tuning file; unlisted fields keep their
    /// defaults.
    pub(crate) fn from_ron_str(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron_options().from_str(contents)
    }

    pub(crate) fn load(path: &Path) -> Result<Self, TuningLoadError> {
        let file_name = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
            file: file_name.clone(),
            message: format!("IO error: {}", e),
        })?;
        Self::from_ron_str(&contents).map_err(|e| TuningLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })
    }
}

pub(crate) fn load_tuning(mut tuning: ResMut<PlayerTuning>) {
    let path = Path::new(TUNING_PATH);
    if !path.exists() {
        debug!("no tuning file at {}, using built-in defaults", TUNING_PATH);
        return;
    }
    match PlayerTuning::load(path) {
        Ok(loaded) => {
            info!("Loaded player tuning from {}", TUNING_PATH);
            *tuning = loaded;
        }
        Err(e) => warn!("{}, using built-in defaults", e),
    }
}

pub(crate) fn apply_gravity_config(tuning: Res<PlayerTuning>, mut gravity: ResMut<Gravity>) {
    gravity.0 = Vec2::NEG_Y * tuning.gravity;
}
