//! Level domain: scene construction.

use avian2d::prelude::*;
use bevy::audio::{AudioPlayer, PlaybackSettings, Volume};
use bevy::prelude::*;

use crate::audio::{MusicChannel, SoundLibrary};
use crate::level::components::{CarryZone, LevelEntity, MovingPlatform, TriggerKind, TriggerRegion};
use crate::level::data::{LevelDef, PlatformDef, SceneConfig, SceneRegistry, Slab};
use crate::player::{
    AnimationController, GameLayer, Lifecycle, MotionState, Player, SensorRig, Trail, WallState,
};

pub(crate) fn spawn_current_scene(
    mut commands: Commands,
    registry: Res<SceneRegistry>,
    config: Res<SceneConfig>,
    library: Option<Res<SoundLibrary>>,
) {
    let Some(level) = registry.get(&config.current) else {
        warn!("scene '{}' is not registered, nothing to spawn", config.current);
        return;
    };
    spawn_scene(&mut commands, level, library.as_deref());
}

pub(crate) fn spawn_scene(
    commands: &mut Commands,
    level: &LevelDef,
    library: Option<&SoundLibrary>,
) {
    info!("Spawning scene '{}'", level.id);

    for slab in &level.ground {
        spawn_solid_slab(commands, slab, GameLayer::Ground, Color::srgb(0.4, 0.5, 0.4));
    }
    for slab in &level.walls {
        spawn_solid_slab(commands, slab, GameLayer::Wall, Color::srgb(0.3, 0.3, 0.4));
    }

    for pos in &level.coins {
        commands.spawn((
            LevelEntity,
            TriggerRegion {
                kind: TriggerKind::Coin,
            },
            Sprite {
                color: Color::srgb(0.9, 0.75, 0.2),
                custom_size: Some(Vec2::splat(0.4)),
                ..default()
            },
            Transform::from_xyz(pos.x, pos.y, 0.0),
            Collider::circle(0.25),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ));
    }

    for slab in &level.hazards {
        spawn_trigger_slab(commands, slab, TriggerKind::Hazard, Color::srgb(0.8, 0.2, 0.2));
    }
    for slab in &level.goals {
        spawn_trigger_slab(commands, slab, TriggerKind::Goal, Color::srgb(0.2, 0.8, 0.3));
    }

    for def in &level.platforms {
        spawn_platform(commands, def);
    }

    if let Some(library) = library {
        if let Some(music) = library.music.clone() {
            commands.spawn((
                LevelEntity,
                MusicChannel,
                AudioPlayer::new(music),
                PlaybackSettings {
                    volume: Volume::Linear(0.5),
                    ..PlaybackSettings::LOOP
                },
            ));
        }
    }

    spawn_player(commands, level.player_spawn);
}

fn spawn_solid_slab(commands: &mut Commands, slab: &Slab, layer: GameLayer, color: Color) {
    commands.spawn((
        LevelEntity,
        Sprite {
            color,
            custom_size: Some(slab.size),
            ..default()
        },
        Transform::from_xyz(slab.pos.x, slab.pos.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(slab.size.x, slab.size.y),
        CollisionLayers::new(layer, [GameLayer::Player]),
    ));
}

fn spawn_trigger_slab(commands: &mut Commands, slab: &Slab, kind: TriggerKind, color: Color) {
    commands.spawn((
        LevelEntity,
        TriggerRegion { kind },
        Sprite {
            color,
            custom_size: Some(slab.size),
            ..default()
        },
        Transform::from_xyz(slab.pos.x, slab.pos.y, 0.0),
        Collider::rectangle(slab.size.x, slab.size.y),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    ));
}

fn spawn_platform(commands: &mut Commands, def: &PlatformDef) {
    let platform = commands
        .spawn((
            LevelEntity,
            MovingPlatform {
                travel: def.travel,
                period: def.period,
                elapsed: 0.0,
            },
            Sprite {
                color: Color::srgb(0.5, 0.4, 0.3),
                custom_size: Some(def.size),
                ..default()
            },
            Transform::from_xyz(def.pos.x, def.pos.y, 0.0),
            RigidBody::Kinematic,
            Collider::rectangle(def.size.x, def.size.y),
            LinearVelocity::default(),
            CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        ))
        .id();

    // Rider zone sits just above the deck and travels with the platform.
    let zone = commands
        .spawn((
            CarryZone { platform },
            Transform::from_xyz(0.0, def.size.y * 0.5 + 0.1, 0.0),
            Collider::rectangle(def.size.x * 0.9, 0.2),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ))
        .id();
    commands.entity(platform).add_child(zone);
}

pub(crate) fn spawn_player(commands: &mut Commands, position: Vec2) {
    commands
        .spawn((
            (
                Player,
                MotionState::default(),
                WallState::default(),
                Lifecycle::default(),
                AnimationController::default(),
                SensorRig::default(),
            ),
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(Vec2::new(0.7, 1.0)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 1.0),
            (
                RigidBody::Dynamic,
                Collider::rectangle(0.7, 1.0),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                Friction::new(0.0),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [GameLayer::Ground, GameLayer::Wall, GameLayer::Sensor],
                ),
            ),
        ))
        .with_children(|parent| {
            parent.spawn((
                Trail,
                Sprite {
                    color: Color::srgba(0.9, 0.9, 1.0, 0.4),
                    custom_size: Some(Vec2::splat(0.3)),
                    ..default()
                },
                Transform::from_xyz(0.0, -0.2, -0.1),
            ));
        });
}
