mod audio;
mod callbacks;
mod core;
mod level;
mod player;
mod ui;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Skylark".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((
            core::CorePlugin,
            callbacks::CallbacksPlugin,
            audio::AudioFxPlugin,
            player::PlayerPlugin,
            level::LevelPlugin,
            ui::UiPlugin,
        ))
        .run();
}
