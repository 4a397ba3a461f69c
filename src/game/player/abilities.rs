// Long-lived ability bookkeeping shared by all player states

use glam::Vec2;
use log::trace;

use super::data::PlayerData;

/// Multi-jump counter and the rising flag used for variable jump height
#[derive(Debug, Clone)]
pub struct JumpAbility {
    max_jumps: u8,
    jumps_left: u8,
    /// Set by a jump, cleared once upward velocity runs out
    pub is_jumping: bool,
}

impl JumpAbility {
    pub fn new(max_jumps: u8) -> Self {
        Self {
            max_jumps,
            jumps_left: max_jumps,
            is_jumping: false,
        }
    }

    pub fn can_jump(&self) -> bool {
        self.jumps_left > 0
    }

    pub fn jumps_left(&self) -> u8 {
        self.jumps_left
    }

    pub fn max_jumps(&self) -> u8 {
        self.max_jumps
    }

    pub fn reset(&mut self) {
        self.jumps_left = self.max_jumps;
    }

    pub fn decrease(&mut self) {
        debug_assert!(self.jumps_left > 0, "jump granted with no jumps left");
        self.jumps_left = self.jumps_left.saturating_sub(1);
    }
}

/// Grace window started at a moment in time
#[derive(Debug, Clone)]
pub struct CoyoteTimer {
    duration: f32,
    started_at: f32,
    active: bool,
}

impl CoyoteTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            started_at: 0.0,
            active: false,
        }
    }

    pub fn start(&mut self, now: f32) {
        self.started_at = now;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Active and past its duration
    pub fn expired(&self, now: f32) -> bool {
        self.active && now > self.started_at + self.duration
    }
}

/// Dash availability and cooldown
#[derive(Debug, Clone)]
pub struct DashAbility {
    can_dash: bool,
    last_dash_time: f32,
    cooldown: f32,
}

impl DashAbility {
    pub fn new(cooldown: f32) -> Self {
        Self {
            can_dash: true,
            last_dash_time: f32::NEG_INFINITY,
            cooldown,
        }
    }

    /// Available and off cooldown
    pub fn check_if_can_dash(&self, now: f32) -> bool {
        self.can_dash && now >= self.last_dash_time + self.cooldown
    }

    pub fn reset_can_dash(&mut self) {
        self.can_dash = true;
    }

    /// Spend the dash. It stays unavailable until the next reset.
    pub fn consume(&mut self) {
        debug_assert!(self.can_dash, "dash granted while unavailable");
        self.can_dash = false;
    }

    /// Start the cooldown from `now`
    pub fn complete(&mut self, now: f32) {
        self.last_dash_time = now;
    }

    pub fn last_dash_time(&self) -> f32 {
        self.last_dash_time
    }
}

/// Direction of the next wall jump
#[derive(Debug, Clone)]
pub struct WallJumpAbility {
    direction: i32,
}

impl Default for WallJumpAbility {
    fn default() -> Self {
        Self { direction: 1 }
    }
}

impl WallJumpAbility {
    /// Jump away from the wall when touching it, otherwise keep the facing
    pub fn determine_direction(&mut self, touching_wall: bool, facing: i32) {
        self.direction = if touching_wall { -facing } else { facing };
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }
}

/// Every ability timer, created once with the player
#[derive(Debug, Clone)]
pub struct AbilityTimers {
    pub jump: JumpAbility,
    pub coyote: CoyoteTimer,
    pub wall_jump_coyote: CoyoteTimer,
    pub dash: DashAbility,
    pub wall_jump: WallJumpAbility,
    /// Body position at which a climbable ledge was last seen
    pub ledge_position: Vec2,
}

impl AbilityTimers {
    pub fn new(data: &PlayerData) -> Self {
        Self {
            jump: JumpAbility::new(data.amount_of_jumps),
            coyote: CoyoteTimer::new(data.coyote_time),
            wall_jump_coyote: CoyoteTimer::new(data.coyote_time),
            dash: DashAbility::new(data.dash_cooldown),
            wall_jump: WallJumpAbility::default(),
            ledge_position: Vec2::ZERO,
        }
    }

    /// Close the coyote window once it runs out, spending the grace jump
    pub fn check_coyote_time(&mut self, now: f32) {
        if self.coyote.expired(now) {
            self.coyote.stop();
            if self.jump.can_jump() {
                self.jump.decrease();
            }
            trace!("coyote window closed at {now}");
        }
    }

    pub fn check_wall_jump_coyote_time(&mut self, now: f32) {
        if self.wall_jump_coyote.expired(now) {
            self.wall_jump_coyote.stop();
        }
    }
}
