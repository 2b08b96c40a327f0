//! UI domain: HUD elements and outcome overlays.

mod banner;
mod hud;

pub use banner::OutcomeBanner;

use bevy::prelude::*;

use crate::core::GameState;
use crate::ui::banner::show_outcome_banner;
use crate::ui::hud::{spawn_coin_display, update_coin_display};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_coin_display).add_systems(
            Update,
            (update_coin_display, show_outcome_banner).run_if(in_state(GameState::Playing)),
        );
    }
}
