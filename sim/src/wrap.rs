//! Toroidal horizontal play area.
//!
//! Leaving the square `[-limit, limit]` on X or Z teleports the player to the opposite edge.
//! Y is never touched, so upward progress is preserved.

use rapier3d::prelude::{Vector, vector};

use crate::{
    error::PhysicsError,
    rapier_world::{BodyHandle, PhysicsWorld},
};

/// Wrap a single coordinate. Values inside `[-limit, limit]` are returned unchanged.
#[inline]
pub fn wrap_axis(value: f32, limit: f32) -> f32 {
    if value > limit {
        -limit
    } else if value < -limit {
        limit
    } else {
        value
    }
}

/// Wrap X and Z independently. Returns `None` when neither axis needed adjusting.
#[inline]
pub fn wrap_position(position: Vector<f32>, limit: f32) -> Option<Vector<f32>> {
    let x = wrap_axis(position.x, limit);
    let z = wrap_axis(position.z, limit);
    if x == position.x && z == position.z {
        return None;
    }
    Some(vector![x, position.y, z])
}

/// Read the body's translation and, if it escaped the play area, write the wrapped
/// translation back with a single write. Returns whether a teleport happened.
pub fn apply_wrap(
    world: &mut PhysicsWorld,
    body: BodyHandle,
    limit: f32,
) -> Result<bool, PhysicsError> {
    let position = world.translation(body)?;
    match wrap_position(position, limit) {
        Some(wrapped) => {
            world.set_translation(body, wrapped)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
