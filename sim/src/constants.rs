//! Gameplay tuning constants.
//!
//! Units are meters, seconds and meters per second. [`crate::WorldSettings::default`]
//! is built from these values, so changing one here changes the default game.

/// Vertical gravity acceleration (m/s^2, negative is down).
pub const GRAVITY_Y: f32 = -9.81;

/// Where the player body is created at world init.
pub const PLAYER_SPAWN: [f32; 3] = [0.0, 3.0, 0.0];

/// Half-extent of the player's cube collider on every axis.
pub const PLAYER_HALF_EXTENT: f32 = 0.5;

pub const PLAYER_FRICTION: f32 = 1.0;
pub const PLAYER_RESTITUTION: f32 = 0.0;

/// The player visual is drawn this far below the body center (model origin is at its feet).
pub const PLAYER_VISUAL_DROP: f32 = 0.5;

/// Floor collider half-extents. The 15x15 floor matches the wrap area.
pub const FLOOR_HALF_EXTENTS: [f32; 3] = [7.5, 0.1, 7.5];

/// Platforms are placed with x, z uniformly in `[-PLATFORM_FOOTPRINT, PLATFORM_FOOTPRINT)`.
pub const PLATFORM_FOOTPRINT: f32 = 5.0;

/// Platform collider half-extents (full size 2 x 0.3 x 2).
pub const PLATFORM_HALF_EXTENTS: [f32; 3] = [1.0, 0.15, 1.0];

/// Vertical gap between consecutive platforms.
pub const PLATFORM_SPACING: f32 = 2.0;

/// Generate while the player is above `watermark - PLATFORM_LOOKAHEAD`.
pub const PLATFORM_LOOKAHEAD: f32 = 20.0;

/// The oldest platform is dropped once it is this far below the player.
pub const PLATFORM_CLEANUP_DISTANCE: f32 = 50.0;

/// Cleanup never takes the live platform count to or below this value.
pub const MIN_LIVE_PLATFORMS: usize = 20;

/// Number of platforms created at world init, at `PLATFORM_SPACING * (i + 1)`.
pub const INITIAL_PLATFORMS: usize = 10;

/// Horizontal offset of the four corner ground rays (just inside the 0.5 half-extent).
pub const GROUND_RAY_INSET: f32 = 0.49;

/// Length of each downward ground ray.
pub const GROUND_RAY_LENGTH: f32 = 1.2;

/// Upward impulse applied on a successful jump.
pub const JUMP_IMPULSE: f32 = 15.0;

/// Minimum elapsed time between two successful jumps (seconds).
pub const JUMP_COOLDOWN_SECS: f32 = 0.5;

/// Horizontal movement speed (m/s).
pub const MOVE_SPEED_MPS: f32 = 5.0;

/// Play area half-width; crossing it teleports the player to the opposite edge.
pub const WRAP_LIMIT: f32 = 7.5;

/// Default seed for platform placement.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Small planar length under which a direction is treated as zero.
pub const DIR_EPS: f32 = 1.0e-6;
