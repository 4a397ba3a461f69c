// Player tuning data - every number the states read lives here

use glam::Vec2;

use crate::engine::physics::LayerMask;

use super::probe::ProbeAnchors;

/// Invalid tuning values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be within ({min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("crouch collider height {crouch} exceeds standing height {stand}")]
    CrouchTallerThanStand { crouch: f32, stand: f32 },

    #[error("ledge anchor ({ledge}) must be above wall anchor ({wall})")]
    LedgeBelowWall { ledge: f32, wall: f32 },

    #[error("amount_of_jumps must be at least 1")]
    NoJumps,
}

/// Tuning for the player controller
#[derive(Debug, Clone)]
pub struct PlayerData {
    // Move
    /// Horizontal speed while running and in the air (units/second)
    pub movement_velocity: f32,

    // Jump
    pub jump_velocity: f32,
    /// Jumps available before touching ground again
    pub amount_of_jumps: u8,

    // In air
    /// Grace period after walking off a ledge during which a jump still counts
    pub coyote_time: f32,
    /// Applied to upward velocity when jump is released early
    pub variable_jump_height_multiplier: f32,
    /// Gravity multiplier while falling in the air; rising uses normal gravity
    pub fall_gravity_scale: f32,

    // Land
    /// Longest time spent in the land state if no animation reports back
    pub land_duration: f32,

    // Wall
    pub wall_slide_velocity: f32,
    pub wall_climb_velocity: f32,

    // Wall jump
    pub wall_jump_velocity: f32,
    /// How long a wall jump ignores input
    pub wall_jump_time: f32,
    /// Launch direction for a wall jump facing right; normalized on use
    pub wall_jump_angle: Vec2,

    // Ledge climb
    /// Hanging position relative to the ledge corner
    pub start_offset: Vec2,
    /// Standing position relative to the ledge corner after climbing
    pub stop_offset: Vec2,

    // Dash
    pub dash_cooldown: f32,
    /// Longest the dash can be aimed before it fires (real time)
    pub max_hold_time: f32,
    /// Time scale while aiming
    pub hold_time_scale: f32,
    /// Length of the dash itself (real time)
    pub dash_time: f32,
    pub dash_velocity: f32,
    /// Linear damping applied during the dash
    pub drag: f32,
    /// Applied to upward velocity when the dash ends
    pub dash_end_y_multiplier: f32,
    pub dist_between_after_images: f32,

    // Crouch
    pub crouch_movement_velocity: f32,
    pub crouch_collider_height: f32,
    pub stand_collider_height: f32,

    // Collider
    pub collider_width: f32,

    // Checks
    pub ground_check_radius: f32,
    pub wall_check_distance: f32,
    /// Layers the probes treat as solid
    pub what_is_ground: LayerMask,
    /// Probe origins relative to the body, mirrored by facing
    pub anchors: ProbeAnchors,

    // Input
    /// How long a jump or dash press stays buffered
    pub input_hold_time: f32,
}

/// Default tuning used by the harness and the tests
pub const DEFAULT_PLAYER_DATA: PlayerData = PlayerData {
    movement_velocity: 10.0,

    jump_velocity: 15.0,
    amount_of_jumps: 1,

    coyote_time: 0.2,
    variable_jump_height_multiplier: 0.5,
    fall_gravity_scale: 1.5,

    land_duration: 0.1,

    wall_slide_velocity: 3.0,
    wall_climb_velocity: 3.0,

    wall_jump_velocity: 20.0,
    wall_jump_time: 0.4,
    wall_jump_angle: Vec2::new(1.0, 2.0),

    start_offset: Vec2::new(0.5, 1.0),
    stop_offset: Vec2::new(0.5, 0.875),

    dash_cooldown: 0.5,
    max_hold_time: 1.0,
    hold_time_scale: 0.25,
    dash_time: 0.2,
    dash_velocity: 30.0,
    drag: 10.0,
    dash_end_y_multiplier: 0.2,
    dist_between_after_images: 0.5,

    crouch_movement_velocity: 5.0,
    crouch_collider_height: 0.75,
    stand_collider_height: 1.5,

    collider_width: 0.75,

    ground_check_radius: 0.125,
    wall_check_distance: 0.5,
    what_is_ground: LayerMask::GROUND,
    anchors: ProbeAnchors {
        ground: Vec2::new(0.0, -0.75),
        wall: Vec2::new(0.375, 0.25),
        ledge: Vec2::new(0.375, 0.75),
        ceiling: Vec2::new(0.0, 0.75),
    },

    input_hold_time: 0.2,
};

impl Default for PlayerData {
    fn default() -> Self {
        DEFAULT_PLAYER_DATA
    }
}

impl PlayerData {
    /// Standing collider size
    pub fn stand_size(&self) -> Vec2 {
        Vec2::new(self.collider_width, self.stand_collider_height)
    }

    /// Check that every value is usable by the states
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("movement_velocity", self.movement_velocity),
            ("jump_velocity", self.jump_velocity),
            ("wall_jump_velocity", self.wall_jump_velocity),
            ("wall_jump_time", self.wall_jump_time),
            ("dash_time", self.dash_time),
            ("dash_velocity", self.dash_velocity),
            ("max_hold_time", self.max_hold_time),
            ("dist_between_after_images", self.dist_between_after_images),
            ("crouch_collider_height", self.crouch_collider_height),
            ("stand_collider_height", self.stand_collider_height),
            ("collider_width", self.collider_width),
            ("ground_check_radius", self.ground_check_radius),
            ("wall_check_distance", self.wall_check_distance),
            ("input_hold_time", self.input_hold_time),
            ("fall_gravity_scale", self.fall_gravity_scale),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.amount_of_jumps == 0 {
            return Err(ConfigError::NoJumps);
        }

        if self.wall_jump_angle.length_squared() == 0.0 {
            return Err(ConfigError::NonPositive {
                field: "wall_jump_angle",
                value: 0.0,
            });
        }

        let fractions = [
            ("hold_time_scale", self.hold_time_scale),
            (
                "variable_jump_height_multiplier",
                self.variable_jump_height_multiplier,
            ),
        ];
        for (field, value) in fractions {
            if value.is_nan() || value <= 0.0 || value > 1.0 {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        if self.crouch_collider_height > self.stand_collider_height {
            return Err(ConfigError::CrouchTallerThanStand {
                crouch: self.crouch_collider_height,
                stand: self.stand_collider_height,
            });
        }

        if self.anchors.ledge.y <= self.anchors.wall.y {
            return Err(ConfigError::LedgeBelowWall {
                ledge: self.anchors.ledge.y,
                wall: self.anchors.wall.y,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_is_valid() {
        assert_eq!(PlayerData::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_values() {
        let data = PlayerData::default();
        assert_eq!(data.movement_velocity, 10.0);
        assert_eq!(data.amount_of_jumps, 1);
        assert_eq!(data.input_hold_time, 0.2);
        assert_eq!(data.stand_size(), Vec2::new(0.75, 1.5));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let data = PlayerData {
            dash_velocity: 0.0,
            ..DEFAULT_PLAYER_DATA
        };
        assert_eq!(
            data.validate(),
            Err(ConfigError::NonPositive {
                field: "dash_velocity",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_zero_fall_gravity() {
        let data = PlayerData {
            fall_gravity_scale: 0.0,
            ..DEFAULT_PLAYER_DATA
        };
        assert_eq!(
            data.validate(),
            Err(ConfigError::NonPositive {
                field: "fall_gravity_scale",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_hold_scale_out_of_range() {
        let data = PlayerData {
            hold_time_scale: 1.5,
            ..DEFAULT_PLAYER_DATA
        };
        assert!(matches!(
            data.validate(),
            Err(ConfigError::OutOfRange {
                field: "hold_time_scale",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_tall_crouch() {
        let data = PlayerData {
            crouch_collider_height: 2.0,
            ..DEFAULT_PLAYER_DATA
        };
        assert!(matches!(
            data.validate(),
            Err(ConfigError::CrouchTallerThanStand { .. })
        ));
    }

    #[test]
    fn test_rejects_ledge_below_wall() {
        let mut data = PlayerData::default();
        data.anchors.ledge.y = data.anchors.wall.y;
        assert!(matches!(
            data.validate(),
            Err(ConfigError::LedgeBelowWall { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_jumps() {
        let data = PlayerData {
            amount_of_jumps: 0,
            ..DEFAULT_PLAYER_DATA
        };
        assert_eq!(data.validate(), Err(ConfigError::NoJumps));
    }
}
