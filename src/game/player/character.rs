// Character facade: the only path from the states to the physics body

use glam::Vec2;
use log::trace;

use crate::engine::physics::CharacterBackend;

use super::probe::{GeometryProbe, SurfaceChecks};

/// Owns the physics body and the pose-dependent probe.
///
/// Velocity writes go to the backend and to `current_velocity`, so states
/// reading the velocity later in the same frame see their own writes.
pub struct Character {
    backend: Box<dyn CharacterBackend>,
    probe: GeometryProbe,
    current_velocity: Vec2,
    /// 1 = right, -1 = left
    facing: i32,
    /// 0 or 180 degrees around the vertical axis
    rotation_y: f32,
    collider_size: Vec2,
    collider_offset: Vec2,
    gravity_scale: f32,
}

impl Character {
    pub fn new(
        backend: Box<dyn CharacterBackend>,
        probe: GeometryProbe,
        collider_size: Vec2,
    ) -> Self {
        let current_velocity = backend.velocity();
        Self {
            backend,
            probe,
            current_velocity,
            facing: 1,
            rotation_y: 0.0,
            collider_size,
            collider_offset: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }

    /// Pull the velocity the physics step produced
    pub fn refresh_velocity(&mut self) {
        self.current_velocity = self.backend.velocity();
    }

    pub fn current_velocity(&self) -> Vec2 {
        self.current_velocity
    }

    pub fn facing(&self) -> i32 {
        self.facing
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn position(&self) -> Vec2 {
        self.backend.position()
    }

    pub fn collider_size(&self) -> Vec2 {
        self.collider_size
    }

    pub fn collider_offset(&self) -> Vec2 {
        self.collider_offset
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn probe(&self) -> &GeometryProbe {
        &self.probe
    }

    // Velocity

    pub fn set_velocity_x(&mut self, x: f32) {
        self.write_velocity(Vec2::new(x, self.current_velocity.y));
    }

    pub fn set_velocity_y(&mut self, y: f32) {
        self.write_velocity(Vec2::new(self.current_velocity.x, y));
    }

    pub fn set_velocity_zero(&mut self) {
        self.write_velocity(Vec2::ZERO);
    }

    /// `speed` along `angle` (normalized here), mirrored horizontally by `direction`
    pub fn set_velocity_angle(&mut self, speed: f32, angle: Vec2, direction: i32) {
        let angle = angle.normalize_or_zero();
        self.write_velocity(Vec2::new(angle.x * speed * direction as f32, angle.y * speed));
    }

    /// `speed` along an already unit-length direction
    pub fn set_velocity_direction(&mut self, speed: f32, direction: Vec2) {
        self.write_velocity(direction * speed);
    }

    fn write_velocity(&mut self, velocity: Vec2) {
        self.backend.set_velocity(velocity);
        self.current_velocity = velocity;
    }

    // Pose

    pub fn set_position(&mut self, position: Vec2) {
        self.backend.set_position(position);
    }

    pub fn set_drag(&mut self, drag: f32) {
        self.backend.set_linear_damping(drag);
    }

    /// Skips the backend write when the scale is unchanged
    pub fn set_gravity_scale(&mut self, scale: f32) {
        if scale != self.gravity_scale {
            self.gravity_scale = scale;
            self.backend.set_gravity_scale(scale);
        }
    }

    /// Turn around when `x_input` points against the current facing
    pub fn check_if_should_flip(&mut self, x_input: i32) {
        if x_input != 0 && x_input != self.facing {
            self.flip();
        }
    }

    fn flip(&mut self) {
        self.facing = -self.facing;
        self.rotation_y = if self.facing > 0 { 0.0 } else { 180.0 };
        trace!("flipped to face {}", self.facing);
    }

    /// Resize the collider keeping its bottom edge where it is
    pub fn set_collider_height(&mut self, height: f32) {
        let delta = height - self.collider_size.y;
        self.collider_size.y = height;
        self.collider_offset.y += delta / 2.0;
        self.backend.set_collider(self.collider_size, self.collider_offset);
    }

    // Probes

    pub fn check_if_grounded(&self) -> bool {
        self.probe
            .is_grounded(self.backend.as_ref(), self.position(), self.facing)
    }

    pub fn check_if_touching_wall(&self) -> bool {
        self.probe
            .is_touching_wall(self.backend.as_ref(), self.position(), self.facing)
    }

    pub fn check_if_touching_wall_back(&self) -> bool {
        self.probe
            .is_touching_wall_back(self.backend.as_ref(), self.position(), self.facing)
    }

    pub fn check_if_touching_ledge(&self) -> bool {
        self.probe
            .is_touching_ledge(self.backend.as_ref(), self.position(), self.facing)
    }

    pub fn check_for_ceiling(&self) -> bool {
        self.probe
            .is_touching_ceiling(self.backend.as_ref(), self.position(), self.facing)
    }

    pub fn survey(&self) -> SurfaceChecks {
        self.probe
            .survey(self.backend.as_ref(), self.position(), self.facing)
    }

    pub fn determine_corner_position(&self) -> Vec2 {
        self.probe
            .corner_position(self.backend.as_ref(), self.position(), self.facing)
    }

    /// Whether `height` of free space sits above `corner`
    pub fn has_headroom(&self, corner: Vec2, height: f32) -> bool {
        self.probe
            .has_headroom(self.backend.as_ref(), corner, self.facing, height)
    }
}
