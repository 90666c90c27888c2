//! Owns the [`Simulation`] and drives one tick per frame.
//!
//! Everything that reads the simulation's output runs in [`GameSystems::Sync`], after the tick.

use std::path::Path;

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use nalgebra as na;
use skyward_sim::{CameraFrame, InitError, Simulation, TickReport, WorldSettings};

use crate::input::{GameAction, input_snapshot};

/// Optional path to a JSON `WorldSettings` file.
const SETTINGS_ENV: &str = "SKYWARD_SETTINGS";
/// Optional override for the platform layout seed, applied after the settings file.
const SEED_ENV: &str = "SKYWARD_SEED";

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSystems {
    Tick,
    Sync,
}

#[derive(Resource)]
pub struct Game(pub Simulation);

/// Output of the most recent tick. `None` until the first tick, or after a failed one.
#[derive(Resource, Default)]
pub struct LastTick(pub Option<TickReport>);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<LastTick>();
    app.configure_sets(
        Update,
        (GameSystems::Tick, GameSystems::Sync)
            .chain()
            .run_if(resource_exists::<Game>),
    );
    app.add_systems(Startup, init_simulation);
    app.add_systems(Update, tick.in_set(GameSystems::Tick));
}

pub fn init_simulation(mut commands: Commands, mut exit: MessageWriter<AppExit>) {
    match build_simulation() {
        Ok(sim) => commands.insert_resource(Game(sim)),
        Err(err) => {
            error!("failed to initialize the world: {err}");
            exit.write(AppExit::error());
        }
    }
}

fn build_simulation() -> Result<Simulation, InitError> {
    let mut settings = match std::env::var(SETTINGS_ENV) {
        Ok(path) => WorldSettings::load(Path::new(&path)),
        Err(_) => WorldSettings::default(),
    };
    if let Ok(raw) = std::env::var(SEED_ENV) {
        match raw.parse::<u64>() {
            Ok(seed) => settings.seed = seed,
            Err(_) => warn!("ignoring {SEED_ENV}={raw:?}: not a u64"),
        }
    }
    Simulation::new(settings)
}

fn tick(
    mut game: ResMut<Game>,
    mut last: ResMut<LastTick>,
    actions: Res<ActionState<GameAction>>,
    camera: Single<&Transform, With<Camera3d>>,
    time: Res<Time>,
) {
    let input = input_snapshot(&actions);
    let frame = camera_frame(*camera);
    match game.0.tick(input, &frame, time.elapsed_secs()) {
        Ok(report) => last.0 = Some(report),
        Err(err) => {
            error!("tick failed: {err}");
            last.0 = None;
        }
    }
}

pub fn camera_frame(camera: &Transform) -> CameraFrame {
    CameraFrame::new(to_vector(*camera.forward()), to_vector(*camera.up()))
}

#[inline]
pub fn to_vector(v: Vec3) -> na::Vector3<f32> {
    na::Vector3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_vec3(v: na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_quat(q: na::UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_frame_faces_down_negative_z() {
        let frame = camera_frame(&Transform::default());
        assert_eq!(frame, CameraFrame::default());
    }

    #[test]
    fn rotation_conversion_matches_bevy_yaw() {
        let yaw = 0.7_f32;
        let q = to_quat(na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), yaw));
        assert!(q.angle_between(Quat::from_rotation_y(yaw)) < 1e-5);
    }
}
