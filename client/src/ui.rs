//! Score and elevation readouts.
//!
//! Text is only rewritten when the value it shows changes.

use bevy::prelude::*;

use crate::game::{GameSystems, LastTick};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud);
    app.add_systems(Update, update_hud.in_set(GameSystems::Sync));
}

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct ElevationText;

fn score_label(score: i32) -> String {
    format!("Score: {score}")
}

fn elevation_label(elevation: i32) -> String {
    format!("Elevation: {elevation}m")
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("Hud"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        },
        children![
            (ScoreText, Text::new(score_label(0))),
            (ElevationText, Text::new(elevation_label(0))),
        ],
    ));
}

fn update_hud(
    last: Res<LastTick>,
    mut shown_elevation: Local<Option<i32>>,
    mut score_text: Query<&mut Text, (With<ScoreText>, Without<ElevationText>)>,
    mut elevation_text: Query<&mut Text, (With<ElevationText>, Without<ScoreText>)>,
) {
    let Some(report) = &last.0 else {
        return;
    };

    if report.score_changed
        && let Ok(mut text) = score_text.single_mut()
    {
        text.0 = score_label(report.score);
    }

    if *shown_elevation != Some(report.elevation)
        && let Ok(mut text) = elevation_text.single_mut()
    {
        text.0 = elevation_label(report.elevation);
        *shown_elevation = Some(report.elevation);
    }
}
