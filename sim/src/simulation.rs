//! One-frame orchestration of the jumper.
//!
//! [`Simulation`] owns the physics world, the player and floor handles, the platform stream,
//! the jump state and the score. [`Simulation::tick`] runs the fixed per-frame order:
//!
//! 1. movement intent → player X/Z velocity
//! 2. grounded rays + jump arbitration (may apply an upward impulse)
//! 3. platform generation ahead of the player
//! 4. cleanup of the oldest platform behind the player
//! 5. one physics step
//! 6. horizontal wrap
//! 7. visual pose + score
//!
//! Nothing here touches rendering; the returned [`TickReport`] carries everything the scene
//! and UI collaborators need.

use log::info;
use nalgebra as na;
use rapier3d::prelude::{Vector, vector};

use crate::{
    WorldSettings,
    constants::PLAYER_VISUAL_DROP,
    error::{InitError, PhysicsError},
    ground::{JumpState, is_grounded},
    input::InputState,
    movement::{CameraFrame, apply_movement, visual_rotation},
    platforms::{Platform, PlatformEvent, PlatformStream, StreamSettings},
    rapier::{BodyKind, ColliderDef},
    rapier_world::{BodyHandle, PhysicsWorld},
    score::{Score, round_elevation},
    wrap::apply_wrap,
};

/// Where the player visual should be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualPose {
    pub translation: Vector<f32>,
    pub rotation: na::UnitQuaternion<f32>,
}

/// Result of one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Player body translation after step and wrap.
    pub player_translation: Vector<f32>,
    pub player_visual: VisualPose,
    /// Rounded current elevation.
    pub elevation: i32,
    pub score: i32,
    /// True only on ticks where the score increased.
    pub score_changed: bool,
    pub grounded: bool,
    pub jumped: bool,
    pub wrapped: bool,
    pub platform_events: Vec<PlatformEvent>,
}

pub struct Simulation {
    settings: WorldSettings,
    world: PhysicsWorld,
    player: BodyHandle,
    floor: BodyHandle,
    platforms: PlatformStream,
    jump: JumpState,
    score: Score,
    ticks: u64,
}

impl Simulation {
    /// Build the world: physics, floor, player and the initial platforms.
    ///
    /// This is the only fallible startup step; a failure here is fatal for the game.
    pub fn new(settings: WorldSettings) -> Result<Self, InitError> {
        settings.validate()?;

        let mut world = PhysicsWorld::init(settings.gravity, settings.physics_dt)?;

        let floor = world.create_body(BodyKind::Fixed, Vector::zeros(), false);
        world.attach_collider(floor, &ColliderDef::cuboid(settings.floor_half_extents))?;

        let [px, py, pz] = settings.player_spawn;
        let player = world.create_body(BodyKind::Dynamic, vector![px, py, pz], true);
        let h = settings.player_half_extent;
        world.attach_collider(
            player,
            &ColliderDef::cuboid([h, h, h])
                .with_material(settings.player_friction, settings.player_restitution),
        )?;

        let mut platforms = PlatformStream::new(StreamSettings::from(&settings), settings.seed);
        platforms.seed_initial(&mut world, settings.initial_platforms)?;

        info!(
            "simulation ready: gravity={:?} seed={} platforms={} watermark={}",
            settings.gravity,
            settings.seed,
            platforms.len(),
            platforms.watermark()
        );

        Ok(Self {
            settings,
            world,
            player,
            floor,
            platforms,
            jump: JumpState::default(),
            score: Score::default(),
            ticks: 0,
        })
    }

    /// Advance one frame.
    ///
    /// `input` is this tick's snapshot of the input flags. `elapsed_secs` is monotonically
    /// increasing wall-clock time; it only drives the jump cooldown. Physics always advances by
    /// exactly one fixed step.
    pub fn tick(
        &mut self,
        input: InputState,
        camera: &CameraFrame,
        elapsed_secs: f32,
    ) -> Result<TickReport, PhysicsError> {
        let s = &self.settings;

        apply_movement(
            &mut self.world,
            self.player,
            camera,
            &input,
            s.move_speed_mps,
        )?;

        let position = self.world.translation(self.player)?;
        let grounded = is_grounded(
            &self.world,
            position,
            s.ground_ray_inset,
            s.ground_ray_length,
            Some(self.player),
        );
        let jumped = self
            .jump
            .update(grounded, input.jump, elapsed_secs, s.jump_cooldown_secs);
        if jumped {
            self.world
                .apply_impulse(self.player, vector![0.0, s.jump_impulse, 0.0])?;
        }

        let mut platform_events = Vec::new();
        let player_y = self.world.translation(self.player)?.y;
        if let Some(p) = self.platforms.generate(&mut self.world, player_y)? {
            platform_events.push(PlatformEvent::Spawned {
                id: p.id,
                translation: p.translation,
            });
        }
        if let Some(p) = self.platforms.cleanup(&mut self.world, player_y) {
            platform_events.push(PlatformEvent::Despawned { id: p.id });
        }

        self.world.step();

        let wrapped = apply_wrap(&mut self.world, self.player, s.wrap_limit)?;

        let translation = self.world.translation(self.player)?;
        let player_visual = VisualPose {
            translation: translation - vector![0.0, PLAYER_VISUAL_DROP, 0.0],
            rotation: visual_rotation(camera),
        };
        let score_changed = self.score.observe(translation.y);
        self.ticks += 1;

        Ok(TickReport {
            player_translation: translation,
            player_visual,
            elevation: round_elevation(translation.y),
            score: self.score.value(),
            score_changed,
            grounded,
            jumped,
            wrapped,
            platform_events,
        })
    }

    /// Live platforms, lowest first. Used by the scene to build visuals for the initial set.
    pub fn platforms(&self) -> impl ExactSizeIterator<Item = &Platform> {
        self.platforms.platforms()
    }

    pub fn platform_watermark(&self) -> f32 {
        self.platforms.watermark()
    }

    pub fn player_translation(&self) -> Result<Vector<f32>, PhysicsError> {
        self.world.translation(self.player)
    }

    #[inline]
    pub fn player(&self) -> BodyHandle {
        self.player
    }

    #[inline]
    pub fn floor(&self) -> BodyHandle {
        self.floor
    }

    #[inline]
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Direct world access, e.g. for spawning the player elsewhere.
    #[inline]
    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    #[inline]
    pub fn jump_state(&self) -> JumpState {
        self.jump
    }

    #[inline]
    pub fn score(&self) -> i32 {
        self.score.value()
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }
}
