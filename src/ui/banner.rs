//! UI domain: end-of-life banner overlays.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::{LevelCompletedEvent, PlayerDiedEvent};
use crate::level::LevelEntity;

/// Marker for the outcome overlay. Tagged as a level entity so the next
/// scene clears it.
#[derive(Component)]
pub struct OutcomeBanner;

pub(crate) fn show_outcome_banner(
    mut died: MessageReader<PlayerDiedEvent>,
    mut completed: MessageReader<LevelCompletedEvent>,
    existing: Query<Entity, With<OutcomeBanner>>,
    mut commands: Commands,
) {
    let player_died = died.read().count() > 0;
    let level_completed = completed.read().count() > 0;

    let (label, color) = if player_died {
        ("YOU DIED", Color::srgb(0.8, 0.15, 0.15))
    } else if level_completed {
        ("LEVEL COMPLETE", Color::srgb(0.85, 0.75, 0.2))
    } else {
        return;
    };

    if !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            OutcomeBanner,
            LevelEntity,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            ZIndex(100),
        ))
        .with_child((
            Text::new(label),
            TextFont {
                font_size: 64.0,
                ..default()
            },
            TextColor(color),
        ));
}
