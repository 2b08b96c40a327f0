//! Level domain: scene advancement and teardown.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::audio::SoundLibrary;
use crate::callbacks::{DeferredAction, DeferredFired};
use crate::level::components::LevelEntity;
use crate::level::data::{SceneConfig, SceneRegistry, advance_target};
use crate::level::spawn::spawn_scene;
use crate::player::{AnimationController, Player, PlayerAnimation};

/// Consume the deferred scene-advance callback: pick the target from the
/// last animation state, tear the current scene down, and build the next
/// one. The controller itself never touches scene loading.
pub(crate) fn handle_scene_advance(
    mut fired: MessageReader<DeferredFired>,
    registry: Res<SceneRegistry>,
    mut config: ResMut<SceneConfig>,
    animation_query: Query<&AnimationController, With<Player>>,
    level_query: Query<Entity, With<LevelEntity>>,
    player_query: Query<Entity, With<Player>>,
    library: Option<Res<SoundLibrary>>,
    mut commands: Commands,
) {
    for message in fired.read() {
        if !matches!(message.action, DeferredAction::AdvanceScene) {
            continue;
        }

        let last_state = animation_query
            .single()
            .map(|controller| controller.state)
            .unwrap_or(PlayerAnimation::Uninitialized);
        let target = advance_target(last_state, &config);

        let Some(level) = registry.get(&target) else {
            warn!(
                "scene '{}' is not registered, staying in '{}'",
                target, config.current
            );
            continue;
        };

        info!("Advancing from '{}' to '{}'", config.current, target);

        for entity in level_query.iter().chain(player_query.iter()) {
            commands.entity(entity).despawn();
        }

        config.current = target;
        spawn_scene(&mut commands, level, library.as_deref());
    }
}
