use rapier3d::prelude::RigidBodyHandle;
use thiserror::Error;

/// Startup failures. Fatal: the frame loop must not start.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("gravity must be finite, got {0:?}")]
    InvalidGravity([f32; 3]),
    #[error("physics timestep must be finite and positive, got {0}")]
    InvalidTimestep(f32),
    #[error("invalid world setting `{name}`: {value}")]
    InvalidSettings { name: &'static str, value: f32 },
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Errors from physics adapter calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhysicsError {
    #[error("rigid body {0:?} is not in the physics world")]
    UnknownBody(RigidBodyHandle),
}
