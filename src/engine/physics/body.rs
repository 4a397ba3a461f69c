// Blueprints for the two kinds of bodies a level contains: the character and
// static solids

use glam::Vec2;
use rapier2d::prelude::*;

use super::collision::CollisionGroups;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Friction on level geometry; the character itself has none so it slides
/// along walls instead of sticking to them
const SOLID_FRICTION: Real = 0.3;

/// Dynamic, rotation-locked body that never sleeps.
///
/// Velocity is rewritten every tick by the controller, so sleeping would only
/// delay the first response after standing still.
pub fn character_body(position: Vec2) -> RigidBody {
    RigidBodyBuilder::dynamic()
        .translation(vector![position.x, position.y])
        .locked_axes(LockedAxes::ROTATION_LOCKED)
        .can_sleep(false)
        .build()
}

/// Frictionless box matching the standing collider size
pub fn character_collider(size: Vec2) -> Collider {
    ColliderBuilder::cuboid(size.x / 2.0, size.y / 2.0)
        .collision_groups(CollisionGroups::Player.to_interaction_groups())
        .friction(0.0)
        .restitution(0.0)
        .build()
}

/// Axis-aligned block of level geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solid {
    pub center: Vec2,
    pub size: Vec2,
    pub group: CollisionGroups,
}

impl Solid {
    /// Ground block spanning two opposite corners
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        let (lo, hi) = (min.min(max), min.max(max));
        Self {
            center: (lo + hi) / 2.0,
            size: hi - lo,
            group: CollisionGroups::Ground,
        }
    }

    /// Same block, but invisible to ground probes
    pub fn decoration(mut self) -> Self {
        self.group = CollisionGroups::Decoration;
        self
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    pub fn body(&self) -> RigidBody {
        RigidBodyBuilder::fixed()
            .translation(vector![self.center.x, self.center.y])
            .build()
    }

    pub fn collider(&self) -> Collider {
        ColliderBuilder::cuboid(self.size.x / 2.0, self.size.y / 2.0)
            .collision_groups(self.group.to_interaction_groups())
            .friction(SOLID_FRICTION)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_character_body_is_upright_and_awake() {
        let body = character_body(Vec2::new(1.0, 2.0));
        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!(body.is_rotation_locked());
        assert!(!body.is_sleeping());
        assert_eq!(body.translation().x, 1.0);
        assert_eq!(body.translation().y, 2.0);
    }

    #[test]
    fn test_character_collider_slides_on_walls() {
        let collider = character_collider(Vec2::new(0.75, 1.5));
        assert_eq!(collider.friction(), 0.0);
        assert_eq!(
            collider.collision_groups(),
            CollisionGroups::Player.to_interaction_groups()
        );
        let cuboid = collider.shape().as_cuboid().expect("box collider");
        assert_abs_diff_eq!(cuboid.half_extents.x, 0.375);
        assert_abs_diff_eq!(cuboid.half_extents.y, 0.75);
    }

    #[test]
    fn test_solid_from_unordered_corners() {
        let solid = Solid::from_corners(Vec2::new(5.0, 2.5), Vec2::new(3.0, 0.0));
        assert_eq!(solid.center, Vec2::new(4.0, 1.25));
        assert_eq!(solid.size, Vec2::new(2.0, 2.5));
        assert_abs_diff_eq!(solid.top(), 2.5);
        assert_eq!(solid.body().body_type(), RigidBodyType::Fixed);
    }

    #[test]
    fn test_decoration_leaves_ground_group() {
        let solid = Solid::from_corners(Vec2::ZERO, Vec2::ONE).decoration();
        assert_eq!(solid.group, CollisionGroups::Decoration);
        assert_eq!(
            solid.collider().collision_groups(),
            CollisionGroups::Decoration.to_interaction_groups()
        );
    }
}
