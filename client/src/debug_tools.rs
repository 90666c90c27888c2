//! Perf overlay and tick logging for native dev builds.

use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use iyes_perf_ui::prelude::*;
use skyward_sim::PlatformEvent;

use crate::game::{GameSystems, LastTick};

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, log_tick.in_set(GameSystems::Sync));
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn((
        PerfUiRoot {
            position: PerfUiPosition::TopRight,
            ..default()
        },
        PerfUiEntryFPS::default(),
        PerfUiEntryFrameTime::default(),
        PerfUiEntryEntityCount::default(),
    ));
}

fn log_tick(last: Res<LastTick>) {
    let Some(report) = &last.0 else {
        return;
    };
    if report.jumped {
        debug!("jump at y={:.2}", report.player_translation.y);
    }
    if report.wrapped {
        debug!(
            "wrapped to x={:.2} z={:.2}",
            report.player_translation.x, report.player_translation.z
        );
    }
    for event in &report.platform_events {
        match event {
            PlatformEvent::Spawned { id, translation } => {
                debug!("platform {} up at y={}", id.0, translation.y)
            }
            PlatformEvent::Despawned { id } => debug!("platform {} gone", id.0),
        }
    }
}
