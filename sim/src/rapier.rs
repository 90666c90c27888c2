use rapier3d::prelude::*;

/// Motion type of a body created through [`crate::PhysicsWorld::create_body`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Never moves (floor, platforms).
    Fixed,
    /// Integrated by the solver (the player).
    Dynamic,
}

/// Collider attached to exactly one body.
///
/// Only cuboids are needed: the player, the floor and every platform are boxes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderDef {
    /// Cuboid half-extents (meters).
    pub half_extents: Vector<f32>,
    /// `None` keeps Rapier's default.
    pub friction: Option<f32>,
    /// `None` keeps Rapier's default.
    pub restitution: Option<f32>,
}

impl ColliderDef {
    #[inline]
    pub fn cuboid(half_extents: [f32; 3]) -> Self {
        Self {
            half_extents: vector![half_extents[0], half_extents[1], half_extents[2]],
            friction: None,
            restitution: None,
        }
    }

    #[inline]
    pub fn with_material(mut self, friction: f32, restitution: f32) -> Self {
        self.friction = Some(friction);
        self.restitution = Some(restitution);
        self
    }
}

/// Build a Rapier rigid body of the given kind at `position`.
///
/// `lock_rotation` only matters for dynamic bodies; it keeps the player upright.
pub fn body_from_kind(kind: BodyKind, position: Vector<f32>, lock_rotation: bool) -> RigidBody {
    let builder = match kind {
        BodyKind::Fixed => RigidBodyBuilder::fixed(),
        BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
    };
    let builder = builder.translation(position);
    if lock_rotation {
        builder.lock_rotations().build()
    } else {
        builder.build()
    }
}

/// Build a Rapier collider from a `ColliderDef`.
///
/// The collider is created with identity local transform; its pose comes from the parent body.
pub fn collider_from_def(def: &ColliderDef) -> Collider {
    let mut builder =
        ColliderBuilder::cuboid(def.half_extents.x, def.half_extents.y, def.half_extents.z);
    if let Some(friction) = def.friction {
        builder = builder.friction(friction);
    }
    if let Some(restitution) = def.restitution {
        builder = builder.restitution(restitution);
    }
    builder.build()
}
