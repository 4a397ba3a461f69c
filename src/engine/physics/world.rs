use glam::Vec2;
use rapier2d::prelude::*;

use super::body::{character_body, character_collider, Solid};

pub use super::body::{ColliderHandle, RigidBodyHandle};

/// Nominal step length before any time scaling
const BASE_TIMESTEP: Real = 1.0 / 60.0;

/// Level gravity when none is given
const DEFAULT_GRAVITY: Real = -9.81;

/// Rapier state for one level: its solids, the character, and the query
/// pipeline the surface probes read from.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    // No joints are ever created, but the pipeline still wants both sets
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    queries: QueryPipeline,
    bodies: RigidBodySet,
    colliders: ColliderSet,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, DEFAULT_GRAVITY])
    }

    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let params = IntegrationParameters {
            dt: BASE_TIMESTEP,
            ..IntegrationParameters::default()
        };

        Self {
            gravity,
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            queries: QueryPipeline::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
        }
    }

    /// Advance by the current timestep; the query pipeline is refreshed as
    /// part of the step
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.queries),
            &(),
            &(),
        );
    }

    /// Make freshly added geometry visible to probes before the first step
    pub fn update_query_pipeline(&mut self) {
        self.queries.update(&self.bodies, &self.colliders);
    }

    /// Shrink or restore the step length, e.g. while the dash slows time
    pub fn set_timestep(&mut self, dt: Real) {
        self.params.dt = dt;
    }

    pub fn timestep(&self) -> Real {
        self.params.dt
    }

    /// Insert a static block of level geometry
    pub fn add_solid(&mut self, solid: Solid) -> ColliderHandle {
        let body = self.bodies.insert(solid.body());
        self.colliders
            .insert_with_parent(solid.collider(), body, &mut self.bodies)
    }

    /// Insert the character body with its box collider centred on `position`
    pub fn spawn_character(
        &mut self,
        position: Vec2,
        size: Vec2,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = self.bodies.insert(character_body(position));
        let collider =
            self.colliders
                .insert_with_parent(character_collider(size), body, &mut self.bodies);
        (body, collider)
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle)
    }

    /// Distance to the first solid hit along the normalized `direction`
    pub fn cast_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<f32> {
        let ray = Ray::new(point![origin.x, origin.y], vector![direction.x, direction.y]);
        self.queries
            .cast_ray(&self.bodies, &self.colliders, &ray, max_distance, true, filter)
            .map(|(_, distance)| distance)
    }

    /// Whether a circle of `radius` at `center` touches any collider
    pub fn overlaps_circle(&self, center: Vec2, radius: f32, filter: QueryFilter) -> bool {
        self.queries
            .intersection_with_shape(
                &self.bodies,
                &self.colliders,
                &Isometry::translation(center.x, center.y),
                &Ball::new(radius),
                filter,
            )
            .is_some()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::LayerMask;
    use approx::assert_abs_diff_eq;

    fn floor_only() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        world.add_solid(Solid::from_corners(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0)));
        world.update_query_pipeline();
        world
    }

    #[test]
    fn test_ray_down_lands_on_floor_top() {
        let world = floor_only();
        let distance =
            world.cast_ray(Vec2::new(0.0, 2.0), Vec2::NEG_Y, 10.0, QueryFilter::default());
        assert_abs_diff_eq!(distance.unwrap_or(f32::NAN), 2.0, epsilon = 1e-4);
        assert!(world
            .cast_ray(Vec2::new(0.0, 2.0), Vec2::NEG_Y, 1.5, QueryFilter::default())
            .is_none());
    }

    #[test]
    fn test_circle_overlap_at_floor_surface() {
        let world = floor_only();
        assert!(world.overlaps_circle(Vec2::new(0.0, 0.1), 0.2, QueryFilter::default()));
        assert!(!world.overlaps_circle(Vec2::new(0.0, 1.0), 0.2, QueryFilter::default()));
    }

    #[test]
    fn test_decoration_is_filtered_out_of_ground_queries() {
        let mut world = PhysicsWorld::new();
        let prop = Solid::from_corners(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 0.0)).decoration();
        world.add_solid(prop);
        world.update_query_pipeline();
        let ground_only = QueryFilter::new().groups(LayerMask::GROUND.to_query_groups());
        assert!(world.overlaps_circle(Vec2::new(0.0, -0.5), 0.1, QueryFilter::default()));
        assert!(!world.overlaps_circle(Vec2::new(0.0, -0.5), 0.1, ground_only));
    }

    #[test]
    fn test_spawned_character_falls_when_stepped() {
        let mut world = PhysicsWorld::new();
        let (body, _) = world.spawn_character(Vec2::new(0.0, 5.0), Vec2::new(0.75, 1.5));
        world.set_timestep(0.25 / 60.0);
        assert_abs_diff_eq!(world.timestep(), 0.25 / 60.0);
        world.step();
        let vy = world.body(body).map_or(0.0, |b| b.linvel().y);
        assert!(vy < 0.0);
    }
}
