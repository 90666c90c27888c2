pub mod constants;
pub mod error;
pub mod ground;
pub mod input;
pub mod movement;
pub mod platforms;
pub mod rapier;
pub mod rapier_world;
pub mod score;
pub mod settings;
pub mod simulation;
pub mod wrap;

pub use constants::{
    DEFAULT_SEED, GRAVITY_Y, JUMP_COOLDOWN_SECS, JUMP_IMPULSE, MOVE_SPEED_MPS, PLAYER_VISUAL_DROP,
    WRAP_LIMIT,
};
pub use error::{InitError, PhysicsError};
pub use ground::{JumpState, RayCaster, is_grounded};
pub use input::InputState;
pub use movement::{CameraFrame, apply_movement, visual_rotation, visual_yaw};
pub use platforms::{Platform, PlatformEvent, PlatformId, PlatformStream, StreamSettings};
pub use rapier::{BodyKind, ColliderDef, body_from_kind, collider_from_def};
pub use rapier_world::{BodyHandle, PhysicsWorld};
pub use score::{Score, round_elevation};
pub use settings::WorldSettings;
pub use simulation::{Simulation, TickReport, VisualPose};
pub use wrap::{apply_wrap, wrap_axis, wrap_position};
