//! Procedural platform stream.
//!
//! Platforms are spawned one per tick ahead of the player and trimmed one per tick behind
//! it, so the live set is a sliding window over an endless tower.
//!
//! # Model
//! - Each platform is a fixed body with a cuboid collider, placed at a random (x, z) inside a
//!   square footprint.
//! - The sequence is FIFO in spawn order. Spawn elevations only ever increase, so the
//!   sequence is strictly ascending in `spawn_y` and the head is always the lowest platform.
//! - The watermark is the highest spawn elevation so far.
//!
//! # Rules
//! - Generation: if `player_y > watermark - lookahead`, spawn at `watermark + spacing`.
//! - Cleanup: remove the head iff more than `min_live` platforms exist and
//!   `head.spawn_y < player_y - cleanup_distance`.
//!
//! Visual resources are not owned here. The scene side keys its per-platform visuals by
//! [`PlatformId`].

use std::collections::VecDeque;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use rapier3d::prelude::{Vector, vector};

use crate::{
    WorldSettings,
    error::PhysicsError,
    rapier::{BodyKind, ColliderDef},
    rapier_world::{BodyHandle, PhysicsWorld},
};

/// Stable identifier of a spawned platform, unique for the lifetime of a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformId(pub u64);

/// A live platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub id: PlatformId,
    pub body: BodyHandle,
    pub spawn_y: f32,
    /// Full world translation (x, spawn_y, z).
    pub translation: Vector<f32>,
}

/// Scene commands produced by the stream, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlatformEvent {
    Spawned {
        id: PlatformId,
        translation: Vector<f32>,
    },
    Despawned {
        id: PlatformId,
    },
}

/// Generation and cleanup parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamSettings {
    pub footprint: f32,
    pub half_extents: [f32; 3],
    pub spacing: f32,
    pub lookahead: f32,
    pub cleanup_distance: f32,
    pub min_live: usize,
}

impl From<&WorldSettings> for StreamSettings {
    fn from(s: &WorldSettings) -> Self {
        Self {
            footprint: s.platform_footprint,
            half_extents: s.platform_half_extents,
            spacing: s.platform_spacing,
            lookahead: s.platform_lookahead,
            cleanup_distance: s.platform_cleanup_distance,
            min_live: s.min_live_platforms,
        }
    }
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self::from(&WorldSettings::default())
    }
}

pub struct PlatformStream {
    settings: StreamSettings,
    platforms: VecDeque<Platform>,
    watermark: f32,
    next_id: u64,
    rng: Pcg32,
}

impl PlatformStream {
    pub fn new(settings: StreamSettings, seed: u64) -> Self {
        Self {
            settings,
            platforms: VecDeque::new(),
            watermark: 0.0,
            next_id: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create a platform at `elevation` with a random horizontal position.
    ///
    /// Elevations must be passed in increasing order; the generation rule guarantees this.
    pub fn spawn(
        &mut self,
        world: &mut PhysicsWorld,
        elevation: f32,
    ) -> Result<Platform, PhysicsError> {
        debug_assert!(
            self.platforms.back().is_none_or(|p| p.spawn_y < elevation),
            "platform elevations must ascend"
        );

        let f = self.settings.footprint;
        let x = self.rng.random_range(-f..f);
        let z = self.rng.random_range(-f..f);
        let translation = vector![x, elevation, z];

        let body = world.create_body(BodyKind::Fixed, translation, false);
        world.attach_collider(body, &ColliderDef::cuboid(self.settings.half_extents))?;

        let platform = Platform {
            id: PlatformId(self.next_id),
            body,
            spawn_y: elevation,
            translation,
        };
        self.next_id += 1;
        self.platforms.push_back(platform);
        self.watermark = self.watermark.max(elevation);

        debug!(
            "platform {} spawned at ({x:.2}, {elevation:.1}, {z:.2}), live={}",
            platform.id.0,
            self.platforms.len()
        );
        Ok(platform)
    }

    /// Spawn `count` platforms at `spacing * 1, spacing * 2, ...`.
    pub fn seed_initial(
        &mut self,
        world: &mut PhysicsWorld,
        count: usize,
    ) -> Result<Vec<Platform>, PhysicsError> {
        let spacing = self.settings.spacing;
        (1..=count)
            .map(|i| self.spawn(world, i as f32 * spacing))
            .collect()
    }

    /// Apply the generation rule once. At most one platform per call.
    pub fn generate(
        &mut self,
        world: &mut PhysicsWorld,
        player_y: f32,
    ) -> Result<Option<Platform>, PhysicsError> {
        if player_y > self.watermark - self.settings.lookahead {
            let next = self.watermark + self.settings.spacing;
            return self.spawn(world, next).map(Some);
        }
        Ok(None)
    }

    /// Apply the cleanup rule once. Only the oldest platform is considered.
    ///
    /// Once the head qualifies it is always dropped from the stream, even if its body is
    /// already missing from the world, so callers never lose track of a removal.
    pub fn cleanup(&mut self, world: &mut PhysicsWorld, player_y: f32) -> Option<Platform> {
        if self.platforms.len() <= self.settings.min_live {
            return None;
        }
        let head = *self.platforms.front()?;
        if head.spawn_y >= player_y - self.settings.cleanup_distance {
            return None;
        }

        self.platforms.pop_front();
        if world.remove_body(head.body).is_err() {
            debug!("platform {} had no body left to remove", head.id.0);
        }
        debug!(
            "platform {} removed (y={:.1}, player_y={player_y:.1}), live={}",
            head.id.0,
            head.spawn_y,
            self.platforms.len()
        );
        Some(head)
    }

    /// Live platforms, lowest first.
    pub fn platforms(&self) -> impl ExactSizeIterator<Item = &Platform> {
        self.platforms.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Highest spawn elevation so far (0 before the first spawn).
    #[inline]
    pub fn watermark(&self) -> f32 {
        self.watermark
    }

    #[inline]
    pub fn settings(&self) -> &StreamSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::init([0.0, -9.81, 0.0], 1.0 / 60.0).unwrap()
    }

    fn stream() -> PlatformStream {
        PlatformStream::new(StreamSettings::default(), 42)
    }

    fn elevations(stream: &PlatformStream) -> Vec<f32> {
        stream.platforms().map(|p| p.spawn_y).collect()
    }

    #[test]
    fn spawn_creates_fixed_body_inside_footprint() {
        let mut w = world();
        let mut s = stream();
        for i in 0..50 {
            let p = s.spawn(&mut w, i as f32 + 1.0).unwrap();
            assert!(p.translation.x >= -5.0 && p.translation.x < 5.0);
            assert!(p.translation.z >= -5.0 && p.translation.z < 5.0);
            assert_eq!(p.translation.y, p.spawn_y);
            assert_eq!(w.translation(p.body).unwrap(), p.translation);
        }
        assert_eq!(w.body_count(), 50);
        assert_eq!(w.collider_count(), 50);
        assert_eq!(s.watermark(), 50.0);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut w = world();
        let mut s = stream();
        let a = s.spawn(&mut w, 2.0).unwrap();
        let b = s.spawn(&mut w, 4.0).unwrap();
        assert!(a.id < b.id);
    }

    #[test]
    fn same_seed_same_layout() {
        let mut w1 = world();
        let mut w2 = world();
        let mut a = PlatformStream::new(StreamSettings::default(), 7);
        let mut b = PlatformStream::new(StreamSettings::default(), 7);
        let pa = a.seed_initial(&mut w1, 10).unwrap();
        let pb = b.seed_initial(&mut w2, 10).unwrap();
        let ta: Vec<_> = pa.iter().map(|p| p.translation).collect();
        let tb: Vec<_> = pb.iter().map(|p| p.translation).collect();
        assert_eq!(ta, tb);
    }

    #[test]
    fn initial_platforms_are_two_apart() {
        let mut w = world();
        let mut s = stream();
        s.seed_initial(&mut w, 10).unwrap();
        assert_eq!(
            elevations(&s),
            vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0]
        );
        assert_eq!(s.watermark(), 20.0);
    }

    #[test]
    fn no_generation_when_far_enough_ahead() {
        let mut w = world();
        let mut s = stream();
        s.seed_initial(&mut w, 10).unwrap();
        // 0 > 20 - 20 is false.
        assert_eq!(s.generate(&mut w, 0.0).unwrap(), None);
        assert_eq!(s.len(), 10);
    }

    #[test]
    fn generation_spawns_one_per_call_at_plus_spacing() {
        let mut w = world();
        let mut s = stream();
        s.seed_initial(&mut w, 10).unwrap();

        let mut spawned = Vec::new();
        while let Some(p) = s.generate(&mut w, 25.0).unwrap() {
            spawned.push(p.spawn_y);
        }
        assert_eq!(&spawned[..3], &[22.0, 24.0, 26.0]);
        // Stops once 25 <= watermark - 20.
        assert_eq!(s.watermark(), 46.0);
        assert_eq!(spawned.len(), 13);
    }

    #[test]
    fn cleanup_removes_oldest_when_far_below() {
        let mut w = world();
        let mut s = stream();
        for i in 0..25 {
            s.spawn(&mut w, i as f32 * 2.0).unwrap();
        }
        assert_eq!(s.platforms().next().unwrap().spawn_y, 0.0);

        let removed = s.cleanup(&mut w, 55.0).unwrap();
        assert_eq!(removed.spawn_y, 0.0);
        assert_eq!(s.len(), 24);
        assert!(!w.contains(removed.body));
        assert_eq!(w.body_count(), 24);
    }

    #[test]
    fn cleanup_removes_at_most_one_per_call() {
        let mut w = world();
        let mut s = stream();
        for i in 0..30 {
            s.spawn(&mut w, i as f32 * 2.0).unwrap();
        }
        assert!(s.cleanup(&mut w, 1000.0).is_some());
        assert_eq!(s.len(), 29);
    }

    #[test]
    fn cleanup_respects_live_floor() {
        let mut w = world();
        let mut s = stream();
        for i in 0..20 {
            s.spawn(&mut w, i as f32 * 2.0).unwrap();
        }
        // Head is far below, but only 20 platforms are live.
        assert_eq!(s.cleanup(&mut w, 1000.0), None);
        assert_eq!(s.len(), 20);

        s.spawn(&mut w, 40.0).unwrap();
        assert!(s.cleanup(&mut w, 1000.0).is_some());
        assert_eq!(s.len(), 20);
        assert_eq!(s.cleanup(&mut w, 1000.0), None);
    }

    #[test]
    fn cleanup_drops_head_whose_body_is_already_gone() {
        let mut w = world();
        let mut s = stream();
        for i in 0..25 {
            s.spawn(&mut w, i as f32 * 2.0).unwrap();
        }
        let head = *s.platforms().next().unwrap();
        w.remove_body(head.body).unwrap();

        let removed = s.cleanup(&mut w, 1000.0).unwrap();
        assert_eq!(removed.id, head.id);
        assert_eq!(s.len(), 24);
        assert_eq!(w.body_count(), 24);
    }

    #[test]
    fn cleanup_keeps_head_within_window() {
        let mut w = world();
        let mut s = stream();
        for i in 0..25 {
            s.spawn(&mut w, i as f32 * 2.0).unwrap();
        }
        // 0 < 50 - 50 is false.
        assert_eq!(s.cleanup(&mut w, 50.0), None);
    }

    proptest! {
        #[test]
        fn window_invariants_hold_while_climbing(
            climbs in prop::collection::vec(0.0f32..3.0, 1..300)
        ) {
            let mut w = world();
            let mut s = stream();
            s.seed_initial(&mut w, 10).unwrap();

            let mut y = 0.0f32;
            for dy in climbs {
                y += dy;
                let before = s.len();
                s.generate(&mut w, y).unwrap();
                if s.cleanup(&mut w, y).is_some() {
                    prop_assert!(s.len() >= 20);
                    prop_assert!(before >= 20);
                }

                let ys = elevations(&s);
                prop_assert!(ys.windows(2).all(|p| p[0] < p[1]));
                prop_assert_eq!(w.body_count(), s.len());
            }

            // Once generation has caught up, there is a platform at least 18 above the player.
            while s.generate(&mut w, y).unwrap().is_some() {}
            prop_assert!(s.platforms().any(|p| p.spawn_y >= y + 18.0));
        }
    }
}
