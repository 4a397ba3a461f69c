// Physics collaborator interfaces used by the character controller,
// plus the rapier2d implementation of them

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use log::warn;
use rapier2d::prelude::*;

use super::collision::LayerMask;
use super::world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};

/// Result of a ray cast. `distance` is 0 when nothing was hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub hit: bool,
    pub distance: f32,
}

impl RayHit {
    pub const MISS: RayHit = RayHit {
        hit: false,
        distance: 0.0,
    };

    pub fn at(distance: f32) -> Self {
        Self {
            hit: true,
            distance,
        }
    }
}

/// Overlap and ray queries against the level geometry
pub trait GeometryQueries {
    /// Whether a circle at `point` overlaps anything selected by `mask`
    fn is_overlapping(&self, point: Vec2, radius: f32, mask: LayerMask) -> bool;

    /// First hit along `direction` within `max_distance`
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> RayHit;
}

/// The character's rigid body and collider
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn set_linear_damping(&mut self, damping: f32);
    /// Multiplier on world gravity for this body; 1 is normal
    fn set_gravity_scale(&mut self, scale: f32);
    /// Resize the collider; `offset` is relative to the body origin
    fn set_collider(&mut self, size: Vec2, offset: Vec2);
}

/// Everything the character facade needs from physics
pub trait CharacterBackend: PhysicsBody + GeometryQueries {}

impl<T: PhysicsBody + GeometryQueries> CharacterBackend for T {}

/// Physics world shared between the character and whoever steps it
pub type SharedWorld = Rc<RefCell<PhysicsWorld>>;

/// Character body living in a rapier world
pub struct RapierCharacter {
    world: SharedWorld,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl RapierCharacter {
    /// Add a player body with a box collider of `size` at `position`
    pub fn spawn(world: SharedWorld, position: Vec2, size: Vec2) -> Self {
        let (body, collider) = {
            let mut physics = world.borrow_mut();
            let handles = physics.spawn_character(position, size);
            physics.update_query_pipeline();
            handles
        };

        Self {
            world,
            body,
            collider,
        }
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    fn query_filter(&self, mask: LayerMask) -> QueryFilter {
        QueryFilter::new()
            .groups(mask.to_query_groups())
            .exclude_rigid_body(self.body)
    }
}

impl GeometryQueries for RapierCharacter {
    fn is_overlapping(&self, point: Vec2, radius: f32, mask: LayerMask) -> bool {
        self.world
            .borrow()
            .overlaps_circle(point, radius, self.query_filter(mask))
    }

    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> RayHit {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            warn!("raycast with zero direction from {origin}");
            return RayHit::MISS;
        }

        self.world
            .borrow()
            .cast_ray(origin, dir, max_distance, self.query_filter(mask))
            .map_or(RayHit::MISS, RayHit::at)
    }
}

impl PhysicsBody for RapierCharacter {
    fn velocity(&self) -> Vec2 {
        self.world
            .borrow()
            .body(self.body)
            .map_or(Vec2::ZERO, |body| Vec2::new(body.linvel().x, body.linvel().y))
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        if let Some(body) = self.world.borrow_mut().body_mut(self.body) {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    fn position(&self) -> Vec2 {
        self.world
            .borrow()
            .body(self.body)
            .map_or(Vec2::ZERO, |body| {
                Vec2::new(body.translation().x, body.translation().y)
            })
    }

    fn set_position(&mut self, position: Vec2) {
        if let Some(body) = self.world.borrow_mut().body_mut(self.body) {
            body.set_translation(vector![position.x, position.y], true);
        }
    }

    fn set_linear_damping(&mut self, damping: f32) {
        if let Some(body) = self.world.borrow_mut().body_mut(self.body) {
            body.set_linear_damping(damping);
        }
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        if let Some(body) = self.world.borrow_mut().body_mut(self.body) {
            body.set_gravity_scale(scale, true);
        }
    }

    fn set_collider(&mut self, size: Vec2, offset: Vec2) {
        if let Some(collider) = self.world.borrow_mut().collider_mut(self.collider) {
            collider.set_shape(SharedShape::cuboid(size.x / 2.0, size.y / 2.0));
            collider.set_translation_wrt_parent(vector![offset.x, offset.y]);
        }
    }
}
