//! Third-person orbit camera.
//!
//! Dragging with the left mouse button orbits the camera around the player. The camera
//! follows the player with smoothing and snaps when the player wraps across the play area.
//! Its look direction is what the movement resolver treats as "forward".

use crate::{game::GameSystems, input::GameAction, player::PlayerVisual};
use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<CameraOrbit>();
    app.add_systems(Startup, add_camera);
    app.add_systems(Update, orbit_camera.before(GameSystems::Tick));
    app.add_systems(PostUpdate, follow_player);
}

const CAMERA_DECAY_RATE: f32 = 8.0;
/// Radians per pixel of mouse motion.
const ORBIT_SENSITIVITY: f32 = 0.005;
const MIN_PITCH: f32 = 0.05;
const MAX_PITCH: f32 = 1.4;

/// Spherical camera placement around the player.
///
/// `yaw = 0` puts the camera on +Z of the player; positive pitch raises it.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CameraOrbit {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for CameraOrbit {
    /// Up 6 and back 12 from the player.
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 6.0_f32.atan2(12.0),
            distance: Vec2::new(6.0, 12.0).length(),
        }
    }
}

impl CameraOrbit {
    pub fn offset(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        Vec3::new(
            horizontal * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            horizontal * self.yaw.cos(),
        )
    }

    /// Apply a mouse delta in pixels. Dragging right swings the camera to the left of the player.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw = (self.yaw - delta.x * ORBIT_SENSITIVITY).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
    }
}

fn add_camera(mut commands: Commands) {
    let offset = CameraOrbit::default().offset();
    commands.spawn((
        bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
        Camera3d::default(),
        Transform::from_translation(offset).looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: Color::srgba(0.55, 0.7, 0.9, 1.0),
            falloff: FogFalloff::Linear {
                start: 40.0,
                end: 120.0,
            },
            ..default()
        },
    ));
}

fn orbit_camera(actions: Res<ActionState<GameAction>>, mut orbit: ResMut<CameraOrbit>) {
    if !actions.pressed(&GameAction::OrbitDrag) {
        return;
    }
    let delta = actions.axis_pair(&GameAction::Orbit);
    if delta != Vec2::ZERO {
        orbit.rotate(delta);
    }
}

fn follow_player(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    player: Single<&Transform, (With<PlayerVisual>, Without<Camera3d>)>,
    orbit: Res<CameraOrbit>,
    time: Res<Time>,
) {
    let Ok(mut cam_tf) = camera_query.single_mut() else {
        return;
    };

    let focus = player.translation;
    let target = focus + orbit.offset();
    if cam_tf.translation.xz().distance(target.xz()) > orbit.distance {
        cam_tf.translation = target;
    } else {
        cam_tf
            .translation
            .smooth_nudge(&target, CAMERA_DECAY_RATE, time.delta_secs());
    }
    cam_tf.look_at(focus, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::game::camera_frame;

    fn camera_at(orbit: &CameraOrbit, focus: Vec3) -> Transform {
        Transform::from_translation(focus + orbit.offset()).looking_at(focus, Vec3::Y)
    }

    #[test]
    fn default_orbit_sits_up_and_behind() {
        let offset = CameraOrbit::default().offset();
        assert!(offset.abs_diff_eq(Vec3::new(0.0, 6.0, 12.0), 1e-4));
    }

    #[test]
    fn default_orbit_moves_forward_along_negative_z() {
        let tf = camera_at(&CameraOrbit::default(), Vec3::new(1.0, 3.0, -2.0));
        let forward = camera_frame(&tf).planar_forward();
        assert!((forward.x).abs() < 1e-5);
        assert!((forward.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn orbiting_a_quarter_turn_rotates_forward() {
        let orbit = CameraOrbit {
            yaw: FRAC_PI_2,
            ..CameraOrbit::default()
        };
        // Camera on +X of the player, looking toward -X.
        let frame = camera_frame(&camera_at(&orbit, Vec3::ZERO));
        let forward = frame.planar_forward();
        assert!((forward.x + 1.0).abs() < 1e-5, "{forward:?}");
        assert!(forward.z.abs() < 1e-5, "{forward:?}");
        // Strafing right then points toward -Z.
        let right = frame.right();
        assert!(right.x.abs() < 1e-5, "{right:?}");
        assert!(right.z < -0.5, "{right:?}");
    }

    #[test]
    fn rotate_clamps_pitch_and_wraps_yaw() {
        let mut orbit = CameraOrbit::default();
        orbit.rotate(Vec2::new(0.0, 10_000.0));
        assert_eq!(orbit.pitch, MAX_PITCH);
        orbit.rotate(Vec2::new(0.0, -10_000.0));
        assert_eq!(orbit.pitch, MIN_PITCH);

        orbit.rotate(Vec2::new(-100.0, 0.0));
        assert!((orbit.yaw - 0.5).abs() < 1e-5);
        orbit.rotate(Vec2::new(200.0, 0.0));
        assert!(orbit.yaw >= 0.0 && orbit.yaw < std::f32::consts::TAU);
        assert!((orbit.yaw - (std::f32::consts::TAU - 0.5)).abs() < 1e-4);
    }

    #[test]
    fn orbit_keeps_distance() {
        let orbit = CameraOrbit {
            yaw: 2.0,
            pitch: 0.9,
            ..CameraOrbit::default()
        };
        assert!((orbit.offset().length() - orbit.distance).abs() < 1e-4);
    }
}
