//! UI domain: coin tally HUD element.

use bevy::prelude::*;

use crate::player::{Lifecycle, Player};

/// Marker for the coin display UI container
#[derive(Component)]
pub struct CoinDisplayUI;

/// Marker for the coin amount text
#[derive(Component)]
pub struct CoinAmountText;

pub(crate) fn spawn_coin_display(mut commands: Commands) {
    commands
        .spawn((
            CoinDisplayUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(16.0),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            // Coin icon (gold square)
            parent.spawn((
                Node {
                    width: Val::Px(16.0),
                    height: Val::Px(16.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.9, 0.75, 0.2)),
            ));

            parent.spawn((
                CoinAmountText,
                Text::new("0"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.85, 0.5)),
            ));
        });
}

pub(crate) fn update_coin_display(
    player_query: Query<&Lifecycle, (With<Player>, Changed<Lifecycle>)>,
    mut text_query: Query<&mut Text, With<CoinAmountText>>,
) {
    let Ok(lifecycle) = player_query.single() else {
        return;
    };
    for mut text in &mut text_query {
        text.0 = lifecycle.coins().to_string();
    }
}
