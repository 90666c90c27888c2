//! Rapier-backed simulation world for the tower.
//!
//! `PhysicsWorld` owns every rigid body and collider in the game. Callers only ever hold
//! [`BodyHandle`]s; the player handle and each platform record reference bodies owned here.
//!
//! Design goals
//! - Fixed step: [`PhysicsWorld::step`] advances by one internal timestep no matter how long
//!   the rendered frame took.
//! - Fixed gravity: set once in [`PhysicsWorld::init`], never changed.
//! - Scene queries see the world as of the last `step` (the broad phase is rebuilt there),
//!   so bodies created or removed since then are not visible to [`PhysicsWorld::cast_ray`].

// Re-export Rapier so the client can name handles and vectors without depending on
// `rapier3d` directly.
pub use rapier3d;

use log::{info, warn};
use rapier3d::prelude::*;

use crate::{
    error::{InitError, PhysicsError},
    ground::RayCaster,
    rapier::{BodyKind, ColliderDef, body_from_kind, collider_from_def},
};

/// Opaque handle to a body owned by [`PhysicsWorld`].
pub type BodyHandle = RigidBodyHandle;

/// In-memory Rapier structures for a stepped, dynamic world.
pub struct PhysicsWorld {
    gravity: Vector<f32>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    steps: u64,
}

impl PhysicsWorld {
    /// One-time physics setup. No other world call is possible before this succeeds.
    ///
    /// Fails on non-finite gravity or a non-positive timestep.
    pub fn init(gravity: [f32; 3], dt: f32) -> Result<Self, InitError> {
        if gravity.iter().any(|g| !g.is_finite()) {
            return Err(InitError::InvalidGravity(gravity));
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(InitError::InvalidTimestep(dt));
        }

        info!("physics world init: gravity={gravity:?} dt={dt}");

        Ok(Self {
            gravity: vector![gravity[0], gravity[1], gravity[2]],
            integration_parameters: IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            steps: 0,
        })
    }

    pub fn create_body(
        &mut self,
        kind: BodyKind,
        position: Vector<f32>,
        lock_rotation: bool,
    ) -> BodyHandle {
        self.bodies
            .insert(body_from_kind(kind, position, lock_rotation))
    }

    pub fn attach_collider(
        &mut self,
        body: BodyHandle,
        def: &ColliderDef,
    ) -> Result<ColliderHandle, PhysicsError> {
        self.ensure_body(body)?;
        Ok(self
            .colliders
            .insert_with_parent(collider_from_def(def), body, &mut self.bodies))
    }

    pub fn linear_velocity(&self, body: BodyHandle) -> Result<Vector<f32>, PhysicsError> {
        let rb = self.body(body)?;
        let v = rb.linvel();
        Ok(vector![v.x, v.y, v.z])
    }

    pub fn set_linear_velocity(
        &mut self,
        body: BodyHandle,
        velocity: Vector<f32>,
    ) -> Result<(), PhysicsError> {
        self.body_mut(body)?.set_linvel(velocity, true);
        Ok(())
    }

    pub fn translation(&self, body: BodyHandle) -> Result<Vector<f32>, PhysicsError> {
        let rb = self.body(body)?;
        let t = rb.translation();
        Ok(vector![t.x, t.y, t.z])
    }

    /// Teleport a body. Velocity is left untouched.
    pub fn set_translation(
        &mut self,
        body: BodyHandle,
        translation: Vector<f32>,
    ) -> Result<(), PhysicsError> {
        self.body_mut(body)?.set_translation(translation, true);
        Ok(())
    }

    /// Instant change of momentum. Takes effect on the body's velocity immediately.
    pub fn apply_impulse(
        &mut self,
        body: BodyHandle,
        impulse: Vector<f32>,
    ) -> Result<(), PhysicsError> {
        self.body_mut(body)?.apply_impulse(impulse, true);
        Ok(())
    }

    /// Cast a solid ray and report whether anything (other than `exclude`) is hit within
    /// `max_distance`.
    pub fn cast_ray(
        &self,
        origin: Vector<f32>,
        direction: Vector<f32>,
        max_distance: f32,
        exclude: Option<BodyHandle>,
    ) -> bool {
        let filter = match exclude {
            Some(handle) => QueryFilter::default().exclude_rigid_body(handle),
            None => QueryFilter::default(),
        };
        let query_pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        );
        let ray = Ray::new(point![origin.x, origin.y, origin.z], direction);
        query_pipeline
            .cast_ray(&ray, max_distance.max(0.0), true)
            .is_some()
    }

    /// Remove a body together with its attached colliders.
    pub fn remove_body(&mut self, body: BodyHandle) -> Result<(), PhysicsError> {
        self.bodies
            .remove(
                body,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .map(|_| ())
            .ok_or_else(|| {
                warn!("remove_body: unknown body {body:?}");
                PhysicsError::UnknownBody(body)
            })
    }

    /// Advance the simulation by exactly one internal timestep.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.steps += 1;
    }

    #[inline]
    pub fn contains(&self, body: BodyHandle) -> bool {
        self.bodies.contains(body)
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Number of `step` calls since init.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[inline]
    pub fn gravity(&self) -> Vector<f32> {
        self.gravity
    }

    #[inline]
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    fn ensure_body(&self, body: BodyHandle) -> Result<(), PhysicsError> {
        if self.bodies.contains(body) {
            Ok(())
        } else {
            Err(PhysicsError::UnknownBody(body))
        }
    }

    fn body(&self, body: BodyHandle) -> Result<&RigidBody, PhysicsError> {
        self.bodies.get(body).ok_or(PhysicsError::UnknownBody(body))
    }

    fn body_mut(&mut self, body: BodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.bodies
            .get_mut(body)
            .ok_or(PhysicsError::UnknownBody(body))
    }
}

impl RayCaster for PhysicsWorld {
    #[inline]
    fn cast_ray(
        &self,
        origin: Vector<f32>,
        direction: Vector<f32>,
        max_distance: f32,
        exclude: Option<BodyHandle>,
    ) -> bool {
        PhysicsWorld::cast_ray(self, origin, direction, max_distance, exclude)
    }
}
