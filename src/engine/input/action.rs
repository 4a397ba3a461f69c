// Semantic input actions and button edges

use glam::Vec2;

/// Buttons the character controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Grab,
    Dash,
}

/// Phase of a button event delivered by the device layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdge {
    Pressed,
    Released,
}

/// A single pre-polled input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Movement stick or keys, each axis in [-1, 1]
    Move(Vec2),
    /// Button press or release
    Button(Action, InputEdge),
    /// Dash aim direction (stick, or cursor minus player position)
    DashAim(Vec2),
}

impl InputEvent {
    /// Shorthand for a button press event
    pub fn press(action: Action) -> Self {
        Self::Button(action, InputEdge::Pressed)
    }

    /// Shorthand for a button release event
    pub fn release(action: Action) -> Self {
        Self::Button(action, InputEdge::Released)
    }
}
