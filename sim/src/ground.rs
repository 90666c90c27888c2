//! Grounded detection and jump arbitration.
//!
//! Grounded is decided by five parallel downward rays: one from the body center and one
//! from each near-corner of the player's box footprint. Any hit means grounded.
//!
//! [`JumpState`] turns "grounded + jump held + elapsed time" into at most one impulse per
//! press, with a minimum interval between successful jumps.

use log::debug;
use rapier3d::prelude::{Vector, vector};

use crate::rapier_world::BodyHandle;

/// Scene-query seam for the detector. [`crate::PhysicsWorld`] is the production implementation.
pub trait RayCaster {
    /// Whether a ray from `origin` along `direction` hits anything other than `exclude`
    /// within `max_distance`.
    fn cast_ray(
        &self,
        origin: Vector<f32>,
        direction: Vector<f32>,
        max_distance: f32,
        exclude: Option<BodyHandle>,
    ) -> bool;
}

/// Horizontal (x, z) ray offsets: center first, then the four corners at `inset`.
#[inline]
pub fn probe_offsets(inset: f32) -> [(f32, f32); 5] {
    [
        (0.0, 0.0),
        (inset, inset),
        (-inset, inset),
        (inset, -inset),
        (-inset, -inset),
    ]
}

/// Returns true if any of the five downward rays from `position` hits within `ray_length`.
///
/// The player body is passed as `exclude` so the rays ignore it. Stops at the first hit.
pub fn is_grounded(
    caster: &impl RayCaster,
    position: Vector<f32>,
    inset: f32,
    ray_length: f32,
    exclude: Option<BodyHandle>,
) -> bool {
    let down = vector![0.0, -1.0, 0.0];
    probe_offsets(inset).iter().any(|&(dx, dz)| {
        let origin = vector![position.x + dx, position.y, position.z + dz];
        caster.cast_ray(origin, down, ray_length, exclude)
    })
}

/// Jump arbitration.
///
/// - Armed (`can_jump`): set whenever grounded with jump released.
/// - Spent: after a successful jump, until grounded with jump released again.
///
/// A jump succeeds only when armed, grounded, jump held and strictly more than `cooldown`
/// seconds have passed since the last successful jump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpState {
    pub can_jump: bool,
    pub last_jump_time: f32,
}

impl Default for JumpState {
    fn default() -> Self {
        Self {
            can_jump: false,
            last_jump_time: 0.0,
        }
    }
}

impl JumpState {
    /// Advance the state machine for one tick. Returns true if an impulse must be applied now.
    pub fn update(&mut self, grounded: bool, jump_held: bool, elapsed: f32, cooldown: f32) -> bool {
        if grounded && !jump_held {
            self.can_jump = true;
        }

        if jump_held && self.can_jump && grounded && elapsed - self.last_jump_time > cooldown {
            self.can_jump = false;
            self.last_jump_time = elapsed;
            debug!("jump at t={elapsed:.3}");
            return true;
        }

        false
    }
}
