// Per-frame semantic input state consumed by the character states

use glam::Vec2;
use log::trace;

use super::action::{Action, InputEdge, InputEvent};
use crate::core::math::{discretize_axis, round_direction};

/// How long a buffered press stays live when nobody consumes it (seconds)
pub const DEFAULT_INPUT_HOLD_TIME: f32 = 0.2;

/// Analog magnitude an axis must exceed to count as a digital direction
pub const MOVE_DEADZONE: f32 = 0.5;

/// Button state with a buffered one-shot press
#[derive(Debug, Clone, Copy, Default)]
struct BufferedButton {
    pressed: bool,
    held: bool,
    released: bool,
    press_time: f32,
}

impl BufferedButton {
    fn press(&mut self, now: f32) {
        self.pressed = true;
        self.held = true;
        self.released = false;
        self.press_time = now;
    }

    fn release(&mut self) {
        self.held = false;
        self.released = true;
    }

    fn consume(&mut self) {
        self.pressed = false;
    }

    /// Drop a press that has outlived the hold window
    fn expire(&mut self, now: f32, hold_time: f32) -> bool {
        if self.pressed && now >= self.press_time + hold_time {
            self.pressed = false;
            true
        } else {
            false
        }
    }
}

/// Normalized, edge-aware input the character states read each tick.
///
/// Jump and dash presses are buffered: they stay set until consumed or until
/// `hold_time` has passed since the press edge, whichever comes first.
#[derive(Debug, Clone)]
pub struct InputSnapshot {
    raw_move: Vec2,
    norm_x: i32,
    norm_y: i32,
    jump: BufferedButton,
    dash: BufferedButton,
    grab_held: bool,
    raw_dash_direction: Vec2,
    dash_direction: Vec2,
    hold_time: f32,
    now: f32,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::with_hold_time(DEFAULT_INPUT_HOLD_TIME)
    }

    /// Create a snapshot with a custom buffered-press window
    pub fn with_hold_time(hold_time: f32) -> Self {
        Self {
            raw_move: Vec2::ZERO,
            norm_x: 0,
            norm_y: 0,
            jump: BufferedButton::default(),
            dash: BufferedButton::default(),
            grab_held: false,
            raw_dash_direction: Vec2::ZERO,
            dash_direction: Vec2::ZERO,
            hold_time,
            now: 0.0,
        }
    }

    /// Route a pre-polled event to the matching handler
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(value) => self.on_move(value),
            InputEvent::Button(Action::Jump, edge) => self.on_jump(edge),
            InputEvent::Button(Action::Grab, edge) => self.on_grab(edge),
            InputEvent::Button(Action::Dash, edge) => self.on_dash(edge, self.raw_dash_direction),
            InputEvent::DashAim(direction) => self.on_dash_aim(direction),
        }
    }

    pub fn on_move(&mut self, value: Vec2) {
        self.raw_move = value.clamp(Vec2::splat(-1.0), Vec2::ONE);
        self.norm_x = discretize_axis(self.raw_move.x, MOVE_DEADZONE);
        self.norm_y = discretize_axis(self.raw_move.y, MOVE_DEADZONE);
    }

    pub fn on_jump(&mut self, edge: InputEdge) {
        match edge {
            InputEdge::Pressed => self.jump.press(self.now),
            InputEdge::Released => self.jump.release(),
        }
    }

    pub fn on_grab(&mut self, edge: InputEdge) {
        self.grab_held = edge == InputEdge::Pressed;
    }

    pub fn on_dash(&mut self, edge: InputEdge, direction: Vec2) {
        self.on_dash_aim(direction);
        match edge {
            InputEdge::Pressed => self.dash.press(self.now),
            InputEdge::Released => self.dash.release(),
        }
    }

    /// Update the aim direction without a button edge
    pub fn on_dash_aim(&mut self, direction: Vec2) {
        self.raw_dash_direction = direction;
        self.dash_direction = round_direction(direction);
    }

    /// Clear the buffered jump once a jump has been granted
    pub fn consume_jump(&mut self) {
        self.jump.consume();
    }

    /// Clear the buffered dash once a dash has been granted
    pub fn consume_dash(&mut self) {
        self.dash.consume();
    }

    /// Advance the snapshot's notion of time and expire stale presses.
    /// Call once per frame before the states read input.
    pub fn tick(&mut self, now: f32) {
        self.now = now;
        if self.jump.expire(now, self.hold_time) {
            trace!("buffered jump expired at {now:.3}");
        }
        if self.dash.expire(now, self.hold_time) {
            trace!("buffered dash expired at {now:.3}");
        }
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        *self = Self {
            now: self.now,
            ..Self::with_hold_time(self.hold_time)
        };
    }

    pub fn raw_move(&self) -> Vec2 {
        self.raw_move
    }

    /// Horizontal intent in {-1, 0, 1}
    pub fn norm_x(&self) -> i32 {
        self.norm_x
    }

    /// Vertical intent in {-1, 0, 1}
    pub fn norm_y(&self) -> i32 {
        self.norm_y
    }

    pub fn jump_pressed(&self) -> bool {
        self.jump.pressed
    }

    /// Set on release, cleared by the next press
    pub fn jump_released(&self) -> bool {
        self.jump.released
    }

    pub fn grab_held(&self) -> bool {
        self.grab_held
    }

    pub fn dash_pressed(&self) -> bool {
        self.dash.pressed
    }

    pub fn dash_held(&self) -> bool {
        self.dash.held
    }

    pub fn dash_released(&self) -> bool {
        self.dash.released
    }

    /// Aim direction snapped to the 8-way grid
    pub fn dash_direction(&self) -> Vec2 {
        self.dash_direction
    }

    pub fn raw_dash_direction(&self) -> Vec2 {
        self.raw_dash_direction
    }

    pub fn hold_time(&self) -> f32 {
        self.hold_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_normalization() {
        let mut input = InputSnapshot::new();
        for raw in [-1.0, -0.75, -0.51, -0.5, -0.2, 0.0, 0.3, 0.5, 0.51, 1.0_f32] {
            input.on_move(Vec2::new(raw, raw));
            let expected = if raw.abs() <= 0.5 { 0 } else { raw.signum() as i32 };
            assert_eq!(input.norm_x(), expected, "x for {raw}");
            assert_eq!(input.norm_y(), expected, "y for {raw}");
        }
    }

    #[test]
    fn test_move_eight_directions() {
        let mut input = InputSnapshot::new();
        input.on_move(Vec2::new(0.7, -0.7));
        assert_eq!((input.norm_x(), input.norm_y()), (1, -1));
        input.on_move(Vec2::new(-0.9, 0.1));
        assert_eq!((input.norm_x(), input.norm_y()), (-1, 0));
    }

    #[test]
    fn test_jump_buffer_expires_after_hold_time() {
        let mut input = InputSnapshot::new();
        input.tick(1.0);
        input.on_jump(InputEdge::Pressed);

        input.tick(1.0 + DEFAULT_INPUT_HOLD_TIME * 0.5);
        assert!(input.jump_pressed());
        input.tick(1.19);
        assert!(input.jump_pressed());
        input.tick(1.0 + DEFAULT_INPUT_HOLD_TIME);
        assert!(!input.jump_pressed());
    }

    #[test]
    fn test_jump_buffer_expiry_independent_of_hold_duration() {
        for hold_time in [0.0, 0.05, 0.2, 1.5_f32] {
            let mut input = InputSnapshot::with_hold_time(hold_time);
            input.tick(2.0);
            input.on_jump(InputEdge::Pressed);
            let expiry = 2.0 + hold_time;
            if hold_time > 0.0 {
                input.tick(2.0 + hold_time * 0.5);
                assert!(input.jump_pressed(), "hold {hold_time}");
            }
            input.tick(expiry);
            assert!(!input.jump_pressed(), "hold {hold_time}");
        }
    }

    #[test]
    fn test_consume_jump_clears_immediately() {
        let mut input = InputSnapshot::new();
        input.on_jump(InputEdge::Pressed);
        assert!(input.jump_pressed());
        input.consume_jump();
        assert!(!input.jump_pressed());
    }

    #[test]
    fn test_jump_release_flag() {
        let mut input = InputSnapshot::new();
        input.on_jump(InputEdge::Pressed);
        assert!(!input.jump_released());
        input.on_jump(InputEdge::Released);
        assert!(input.jump_released());
        // Release does not cancel the buffered press
        assert!(input.jump_pressed());
        input.on_jump(InputEdge::Pressed);
        assert!(!input.jump_released());
    }

    #[test]
    fn test_grab_is_level_triggered() {
        let mut input = InputSnapshot::new();
        input.on_grab(InputEdge::Pressed);
        input.tick(10.0);
        assert!(input.grab_held());
        input.on_grab(InputEdge::Released);
        assert!(!input.grab_held());
    }

    #[test]
    fn test_dash_held_and_buffered() {
        let mut input = InputSnapshot::new();
        input.tick(0.0);
        input.on_dash(InputEdge::Pressed, Vec2::new(2.0, 2.0));
        assert!(input.dash_pressed());
        assert!(input.dash_held());
        assert_eq!(input.dash_direction(), Vec2::new(1.0, 1.0));

        input.tick(0.5);
        assert!(!input.dash_pressed());
        assert!(input.dash_held());

        input.on_dash(InputEdge::Released, Vec2::new(0.0, -3.0));
        assert!(!input.dash_held());
        assert!(input.dash_released());
        assert_eq!(input.dash_direction(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_apply_routes_events() {
        let mut input = InputSnapshot::new();
        input.apply(InputEvent::DashAim(Vec2::new(-1.0, 0.0)));
        input.apply(InputEvent::press(Action::Dash));
        input.apply(InputEvent::press(Action::Grab));
        input.apply(InputEvent::Move(Vec2::new(0.0, 1.0)));
        input.apply(InputEvent::press(Action::Jump));

        assert!(input.dash_pressed());
        assert_eq!(input.dash_direction(), Vec2::new(-1.0, 0.0));
        assert!(input.grab_held());
        assert_eq!(input.norm_y(), 1);
        assert!(input.jump_pressed());
    }

    #[test]
    fn test_reset_keeps_time_and_hold_window() {
        let mut input = InputSnapshot::with_hold_time(0.4);
        input.tick(3.0);
        input.on_jump(InputEdge::Pressed);
        input.on_grab(InputEdge::Pressed);
        input.reset();
        assert!(!input.jump_pressed());
        assert!(!input.grab_held());
        assert_eq!(input.hold_time(), 0.4);

        input.on_jump(InputEdge::Pressed);
        input.tick(3.39);
        assert!(input.jump_pressed());
    }
}
