// Physics system using rapier2d

pub mod backend;
pub mod body;
mod collision;
mod world;

pub use backend::{
    CharacterBackend, GeometryQueries, PhysicsBody, RapierCharacter, RayHit, SharedWorld,
};
pub use collision::{CollisionGroups, LayerMask};
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{vector, Real, Vector};

pub use body::{ColliderHandle, RigidBodyHandle, Solid};
