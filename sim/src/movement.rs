//! Camera-relative horizontal movement.
//!
//! Input axes are resolved against the camera's look direction flattened onto the XZ plane,
//! then written as the player's X/Z velocity. Vertical velocity always belongs to gravity and
//! jumps.

use std::f32::consts::FRAC_PI_2;

use nalgebra as na;
use rapier3d::prelude::{Vector, vector};

use crate::{
    constants::DIR_EPS,
    error::PhysicsError,
    input::InputState,
    rapier_world::{BodyHandle, PhysicsWorld},
};

/// Camera orientation as seen by the movement resolver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    /// World-space look direction (need not be normalized).
    pub look: Vector<f32>,
    /// Camera up vector.
    pub up: Vector<f32>,
}

impl Default for CameraFrame {
    /// Looking down -Z with +Y up.
    fn default() -> Self {
        Self {
            look: vector![0.0, 0.0, -1.0],
            up: vector![0.0, 1.0, 0.0],
        }
    }
}

impl CameraFrame {
    #[inline]
    pub fn new(look: Vector<f32>, up: Vector<f32>) -> Self {
        Self { look, up }
    }

    /// Look direction flattened onto the XZ plane and normalized.
    ///
    /// Zero when looking straight up or down.
    #[inline]
    pub fn planar_forward(&self) -> Vector<f32> {
        let flat = vector![self.look.x, 0.0, self.look.z];
        flat.try_normalize(DIR_EPS).unwrap_or_else(Vector::zeros)
    }

    /// `forward x up`.
    #[inline]
    pub fn right(&self) -> Vector<f32> {
        self.planar_forward().cross(&self.up)
    }
}

/// Camera-relative horizontal velocity for this tick's input.
///
/// Combines the forward/strafe axes along the camera's planar forward and right vectors,
/// normalizes the result and scales it to `speed_mps`. Returns zero when there is no input
/// (direct velocity model, nothing carries over). The returned Y is always zero.
pub fn desired_planar_velocity(camera: &CameraFrame, input: &InputState, speed_mps: f32) -> Vector<f32> {
    if !input.has_direction() {
        return Vector::zeros();
    }

    let direction = camera.planar_forward() * input.forward_axis() + camera.right() * input.right_axis();
    match direction.try_normalize(DIR_EPS) {
        Some(dir) => vector![dir.x * speed_mps, 0.0, dir.z * speed_mps],
        None => Vector::zeros(),
    }
}

/// Replace X/Z of `current` with the planar intent, keeping the vertical component.
#[inline]
pub fn merge_planar_velocity(current: Vector<f32>, planar: Vector<f32>) -> Vector<f32> {
    vector![planar.x, current.y, planar.z]
}

/// Write the movement intent onto the player body. Returns the velocity that was written.
///
/// The body's current Y velocity is read back and written unchanged, so gravity and jump
/// impulses are never overwritten.
pub fn apply_movement(
    world: &mut PhysicsWorld,
    body: BodyHandle,
    camera: &CameraFrame,
    input: &InputState,
    speed_mps: f32,
) -> Result<Vector<f32>, PhysicsError> {
    let planar = desired_planar_velocity(camera, input, speed_mps);
    let velocity = merge_planar_velocity(world.linear_velocity(body)?, planar);
    world.set_linear_velocity(body, velocity)?;
    Ok(velocity)
}

/// Yaw of the player visual: faces along the camera's look direction, corrected for the
/// model's authored orientation (a quarter turn).
#[inline]
pub fn visual_yaw(camera: &CameraFrame) -> f32 {
    camera.look.x.atan2(camera.look.z) - FRAC_PI_2
}

/// Yaw-only rotation for the player visual.
#[inline]
pub fn visual_rotation(camera: &CameraFrame) -> na::UnitQuaternion<f32> {
    na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), visual_yaw(camera))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const SPEED: f32 = 5.0;
    const EPS: f32 = 1.0e-5;

    fn input(forward: bool, back: bool, left: bool, right: bool) -> InputState {
        InputState {
            forward,
            back,
            left,
            right,
            jump: false,
        }
    }

    fn close(a: Vector<f32>, b: Vector<f32>) -> bool {
        (a - b).norm() < EPS
    }

    #[test]
    fn forward_follows_camera_not_world_axes() {
        let cam = CameraFrame::default();
        let v = desired_planar_velocity(&cam, &input(true, false, false, false), SPEED);
        assert!(close(v, vector![0.0, 0.0, -5.0]));

        // Camera turned to look down +X.
        let cam = CameraFrame::new(vector![1.0, 0.0, 0.0], vector![0.0, 1.0, 0.0]);
        let v = desired_planar_velocity(&cam, &input(true, false, false, false), SPEED);
        assert!(close(v, vector![5.0, 0.0, 0.0]));
    }

    #[test]
    fn right_is_forward_cross_up() {
        let cam = CameraFrame::default();
        assert!(close(cam.right(), vector![1.0, 0.0, 0.0]));
        let v = desired_planar_velocity(&cam, &input(false, false, false, true), SPEED);
        assert!(close(v, vector![5.0, 0.0, 0.0]));
        let v = desired_planar_velocity(&cam, &input(false, false, true, false), SPEED);
        assert!(close(v, vector![-5.0, 0.0, 0.0]));
    }

    #[test]
    fn pitched_camera_is_flattened() {
        // Looking down at 45 degrees still moves at full speed horizontally.
        let cam = CameraFrame::new(vector![0.0, -1.0, -1.0], vector![0.0, 1.0, 0.0]);
        let v = desired_planar_velocity(&cam, &input(true, false, false, false), SPEED);
        assert!(close(v, vector![0.0, 0.0, -5.0]));
    }

    #[test]
    fn diagonal_is_normalized() {
        let cam = CameraFrame::default();
        let v = desired_planar_velocity(&cam, &input(true, false, false, true), SPEED);
        assert!((v.norm() - SPEED).abs() < EPS);
        assert!(v.x > 0.0 && v.z < 0.0);
    }

    #[test]
    fn no_input_is_zero_velocity() {
        let cam = CameraFrame::default();
        let v = desired_planar_velocity(&cam, &InputState::default(), SPEED);
        assert_eq!(v, Vector::zeros());
        // Opposite keys cancel to zero too.
        let v = desired_planar_velocity(&cam, &input(true, true, true, true), SPEED);
        assert_eq!(v, Vector::zeros());
    }

    #[test]
    fn vertical_camera_gives_no_direction() {
        let cam = CameraFrame::new(vector![0.0, -1.0, 0.0], vector![0.0, 1.0, 0.0]);
        let v = desired_planar_velocity(&cam, &input(true, false, false, true), SPEED);
        assert_eq!(v, Vector::zeros());
    }

    #[test]
    fn merge_keeps_vertical() {
        let v = merge_planar_velocity(vector![9.0, -3.5, 9.0], vector![1.0, 0.0, 2.0]);
        assert_eq!(v, vector![1.0, -3.5, 2.0]);
    }

    #[test]
    fn visual_yaw_for_default_camera() {
        // Looking down -Z: atan2(0, -1) = PI.
        let yaw = visual_yaw(&CameraFrame::default());
        assert!((yaw - (std::f32::consts::PI - FRAC_PI_2)).abs() < EPS);
    }

    #[test]
    fn apply_movement_preserves_body_vertical_velocity() {
        use crate::rapier::{BodyKind, ColliderDef};

        let mut world = PhysicsWorld::init([0.0, -9.81, 0.0], 1.0 / 60.0).unwrap();
        let body = world.create_body(BodyKind::Dynamic, vector![0.0, 3.0, 0.0], true);
        world
            .attach_collider(body, &ColliderDef::cuboid([0.5, 0.5, 0.5]))
            .unwrap();
        world
            .set_linear_velocity(body, vector![7.0, 4.25, 7.0])
            .unwrap();

        let written = apply_movement(
            &mut world,
            body,
            &CameraFrame::default(),
            &InputState::default(),
            SPEED,
        )
        .unwrap();
        assert_eq!(written, vector![0.0, 4.25, 0.0]);
        assert_eq!(world.linear_velocity(body).unwrap(), vector![0.0, 4.25, 0.0]);
    }

    proptest! {
        #[test]
        fn speed_is_bounded_and_planar(
            lx in -1.0f32..1.0, ly in -1.0f32..1.0, lz in -1.0f32..1.0,
            f in any::<bool>(), b in any::<bool>(), l in any::<bool>(), r in any::<bool>(),
        ) {
            let cam = CameraFrame::new(vector![lx, ly, lz], vector![0.0, 1.0, 0.0]);
            let v = desired_planar_velocity(&cam, &input(f, b, l, r), SPEED);
            prop_assert_eq!(v.y, 0.0);
            prop_assert!(v.norm() <= SPEED + 1.0e-3);
        }

        #[test]
        fn merge_never_touches_y(cy in -100.0f32..100.0, px in -5.0f32..5.0, pz in -5.0f32..5.0) {
            let v = merge_planar_velocity(vector![0.0, cy, 0.0], vector![px, 0.0, pz]);
            prop_assert_eq!(v.y, cy);
        }
    }
}
