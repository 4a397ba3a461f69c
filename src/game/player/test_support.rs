// Axis-aligned box world standing in for the physics backend in tests

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::engine::physics::{GeometryQueries, LayerMask, PhysicsBody, RayHit};

#[derive(Debug, Clone, Copy)]
struct Solid {
    min: Vec2,
    max: Vec2,
    layer: LayerMask,
}

impl Solid {
    fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }

    /// Slab test. Returns 0 when the origin is already inside.
    fn ray_entry(&self, origin: Vec2, dir: Vec2) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..2 {
            let (o, d, lo, hi) = (origin[axis], dir[axis], self.min[axis], self.max[axis]);
            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let (a, b) = ((lo - o) / d, (hi - o) / d);
            t_min = t_min.max(a.min(b));
            t_max = t_max.min(a.max(b));
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

/// Static boxes queried like level geometry
#[derive(Debug, Clone, Default)]
pub struct TestWorld {
    solids: Vec<Solid>,
}

impl TestWorld {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Floor along y = 0 and a wall from x = 2 to 4 whose top is at y = 3
    pub fn level() -> Self {
        let mut world = Self::empty();
        world.add_solid(Vec2::new(-50.0, -1.0), Vec2::new(50.0, 0.0), LayerMask::GROUND);
        world.add_solid(Vec2::new(2.0, -1.0), Vec2::new(4.0, 3.0), LayerMask::GROUND);
        world
    }

    pub fn add_solid(&mut self, min: Vec2, max: Vec2, layer: LayerMask) {
        self.solids.push(Solid { min, max, layer });
    }

    fn masked(&self, mask: LayerMask) -> impl Iterator<Item = &Solid> {
        self.solids
            .iter()
            .filter(move |solid| solid.layer.bits() & mask.bits() != 0)
    }
}

impl GeometryQueries for TestWorld {
    fn is_overlapping(&self, point: Vec2, radius: f32, mask: LayerMask) -> bool {
        self.masked(mask).any(|solid| solid.overlaps_circle(point, radius))
    }

    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> RayHit {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return RayHit::MISS;
        }
        self.masked(mask)
            .filter_map(|solid| solid.ray_entry(origin, dir))
            .filter(|&t| t <= max_distance)
            .min_by(f32::total_cmp)
            .map_or(RayHit::MISS, RayHit::at)
    }
}

/// Observable state of a [`TestBody`]
#[derive(Debug, Clone, Default)]
pub struct BodyState {
    pub velocity: Vec2,
    pub position: Vec2,
    pub damping: f32,
    pub gravity_scale: f32,
    pub collider_size: Vec2,
    pub collider_offset: Vec2,
}

/// Kinematic body in a [`TestWorld`]. Clones share the same state, so a test
/// can keep a handle after boxing one into the player.
#[derive(Debug, Clone)]
pub struct TestBody {
    world: Rc<RefCell<TestWorld>>,
    state: Rc<RefCell<BodyState>>,
}

impl TestBody {
    pub fn spawn(world: TestWorld, position: Vec2, size: Vec2) -> Self {
        Self {
            world: Rc::new(RefCell::new(world)),
            state: Rc::new(RefCell::new(BodyState {
                position,
                gravity_scale: 1.0,
                collider_size: size,
                ..BodyState::default()
            })),
        }
    }

    pub fn state(&self) -> BodyState {
        self.state.borrow().clone()
    }

    pub fn world_mut(&self) -> std::cell::RefMut<'_, TestWorld> {
        self.world.borrow_mut()
    }

    /// Move by the current velocity, ignoring collisions
    pub fn integrate(&self, dt: f32) {
        let mut state = self.state.borrow_mut();
        let velocity = state.velocity;
        state.position += velocity * dt;
    }
}

impl GeometryQueries for TestBody {
    fn is_overlapping(&self, point: Vec2, radius: f32, mask: LayerMask) -> bool {
        self.world.borrow().is_overlapping(point, radius, mask)
    }

    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> RayHit {
        self.world.borrow().raycast(origin, direction, max_distance, mask)
    }
}

impl PhysicsBody for TestBody {
    fn velocity(&self) -> Vec2 {
        self.state.borrow().velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.state.borrow_mut().velocity = velocity;
    }

    fn position(&self) -> Vec2 {
        self.state.borrow().position
    }

    fn set_position(&mut self, position: Vec2) {
        self.state.borrow_mut().position = position;
    }

    fn set_linear_damping(&mut self, damping: f32) {
        self.state.borrow_mut().damping = damping;
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.state.borrow_mut().gravity_scale = scale;
    }

    fn set_collider(&mut self, size: Vec2, offset: Vec2) {
        let mut state = self.state.borrow_mut();
        state.collider_size = size;
        state.collider_offset = offset;
    }
}
