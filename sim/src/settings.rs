/*!
World configuration.

`WorldSettings` groups every tunable the simulation reads. The defaults come from
[`crate::constants`]; callers (the client, tests) can override individual fields
with struct update syntax or load a JSON file where missing fields keep their defaults.

Notes
- Vectors are stored as `[f32; 3]` so the struct serializes without extra features.
- Settings are validated once in [`crate::Simulation::new`] and never change afterwards.
*/

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{constants::*, error::InitError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// World gravity, fixed for the whole world lifetime.
    pub gravity: [f32; 3],
    /// Fixed internal timestep of one physics step (seconds).
    pub physics_dt: f32,

    pub player_spawn: [f32; 3],
    pub player_half_extent: f32,
    pub player_friction: f32,
    pub player_restitution: f32,

    pub floor_half_extents: [f32; 3],

    pub platform_footprint: f32,
    pub platform_half_extents: [f32; 3],
    pub platform_spacing: f32,
    pub platform_lookahead: f32,
    pub platform_cleanup_distance: f32,
    pub min_live_platforms: usize,
    pub initial_platforms: usize,

    pub ground_ray_inset: f32,
    pub ground_ray_length: f32,

    pub jump_impulse: f32,
    pub jump_cooldown_secs: f32,

    pub move_speed_mps: f32,
    pub wrap_limit: f32,

    /// Seed for platform placement.
    pub seed: u64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: [0.0, GRAVITY_Y, 0.0],
            physics_dt: 1.0 / 60.0,
            player_spawn: PLAYER_SPAWN,
            player_half_extent: PLAYER_HALF_EXTENT,
            player_friction: PLAYER_FRICTION,
            player_restitution: PLAYER_RESTITUTION,
            floor_half_extents: FLOOR_HALF_EXTENTS,
            platform_footprint: PLATFORM_FOOTPRINT,
            platform_half_extents: PLATFORM_HALF_EXTENTS,
            platform_spacing: PLATFORM_SPACING,
            platform_lookahead: PLATFORM_LOOKAHEAD,
            platform_cleanup_distance: PLATFORM_CLEANUP_DISTANCE,
            min_live_platforms: MIN_LIVE_PLATFORMS,
            initial_platforms: INITIAL_PLATFORMS,
            ground_ray_inset: GROUND_RAY_INSET,
            ground_ray_length: GROUND_RAY_LENGTH,
            jump_impulse: JUMP_IMPULSE,
            jump_cooldown_secs: JUMP_COOLDOWN_SECS,
            move_speed_mps: MOVE_SPEED_MPS,
            wrap_limit: WRAP_LIMIT,
            seed: DEFAULT_SEED,
        }
    }
}

impl WorldSettings {
    /// Same defaults with a different platform seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read settings from a JSON file, falling back to defaults if it cannot be read or parsed.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                warn!("cannot read settings {}: {err}; using defaults", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                info!("loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                warn!("invalid settings {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with.
    ///
    /// Extents, distances, speeds and the timestep must be finite and strictly positive.
    /// The cooldown and restitution may be zero.
    pub fn validate(&self) -> Result<(), InitError> {
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(InitError::InvalidGravity(self.gravity));
        }
        if !self.physics_dt.is_finite() || self.physics_dt <= 0.0 {
            return Err(InitError::InvalidTimestep(self.physics_dt));
        }

        let positive = [
            ("player_half_extent", self.player_half_extent),
            ("floor_half_extents.x", self.floor_half_extents[0]),
            ("floor_half_extents.y", self.floor_half_extents[1]),
            ("floor_half_extents.z", self.floor_half_extents[2]),
            ("platform_footprint", self.platform_footprint),
            ("platform_half_extents.x", self.platform_half_extents[0]),
            ("platform_half_extents.y", self.platform_half_extents[1]),
            ("platform_half_extents.z", self.platform_half_extents[2]),
            ("platform_spacing", self.platform_spacing),
            ("platform_lookahead", self.platform_lookahead),
            ("platform_cleanup_distance", self.platform_cleanup_distance),
            ("ground_ray_length", self.ground_ray_length),
            ("move_speed_mps", self.move_speed_mps),
            ("wrap_limit", self.wrap_limit),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(InitError::InvalidSettings { name, value });
            }
        }

        let non_negative = [
            ("player_friction", self.player_friction),
            ("player_restitution", self.player_restitution),
            ("ground_ray_inset", self.ground_ray_inset),
            ("jump_impulse", self.jump_impulse),
            ("jump_cooldown_secs", self.jump_cooldown_secs),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(InitError::InvalidSettings { name, value });
            }
        }

        if self.player_spawn.iter().any(|v| !v.is_finite()) {
            return Err(InitError::InvalidSettings {
                name: "player_spawn",
                value: f32::NAN,
            });
        }

        Ok(())
    }
}
