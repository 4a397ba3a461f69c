// Falling or rising without an active ability

use crate::game::player::context::PlayerContext;
use crate::game::state_machine::{State, StateBase};

use super::StateId;

/// Airborne with air control, coyote windows and variable jump height
pub struct InAirState {
    base: StateBase,
    /// Wall contacts from the previous check, to notice when they are lost
    was_touching_wall: bool,
    was_touching_wall_back: bool,
}

impl InAirState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("inAir"),
            was_touching_wall: false,
            was_touching_wall_back: false,
        }
    }

    /// Heavier gravity on the way down, normal gravity while rising
    fn apply_gravity_scale(ctx: &mut PlayerContext) {
        let scale = if ctx.character.current_velocity().y < 0.0 {
            ctx.data.fall_gravity_scale
        } else {
            1.0
        };
        ctx.character.set_gravity_scale(scale);
    }

    /// Cut the jump short once the button is released while still rising
    fn check_jump_multiplier(ctx: &mut PlayerContext) {
        if !ctx.abilities.jump.is_jumping {
            return;
        }

        let vy = ctx.character.current_velocity().y;
        if ctx.input.jump_released() {
            ctx.character.set_velocity_y(vy * ctx.data.variable_jump_height_multiplier);
            ctx.abilities.jump.is_jumping = false;
        } else if vy <= 0.0 {
            ctx.abilities.jump.is_jumping = false;
        }
    }
}

impl State<StateId, PlayerContext> for InAirState {
    state_base!(StateId::InAir);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        let had_wall = self.was_touching_wall || self.was_touching_wall_back;

        ctx.refresh_checks();
        let checks = ctx.checks;
        self.was_touching_wall = checks.touching_wall;
        self.was_touching_wall_back = checks.touching_wall_back;

        if checks.ledge_detected() {
            ctx.abilities.ledge_position = ctx.character.position();
        }

        let lost_wall = had_wall && !checks.touching_wall && !checks.touching_wall_back;
        if lost_wall && !ctx.abilities.wall_jump_coyote.is_active() {
            ctx.abilities.wall_jump_coyote.start(ctx.clock.now());
        }
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        self.was_touching_wall = false;
        self.was_touching_wall_back = false;
        ctx.character.set_gravity_scale(1.0);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        let now = ctx.clock.now();
        ctx.abilities.check_coyote_time(now);
        ctx.abilities.check_wall_jump_coyote_time(now);
        Self::check_jump_multiplier(ctx);

        let checks = ctx.checks;
        let velocity = ctx.character.current_velocity();
        let x = ctx.input.norm_x();
        let facing = ctx.character.facing();
        let jump = ctx.input.jump_pressed();

        if checks.grounded && velocity.y < 0.01 {
            Some(StateId::Land)
        } else if checks.ledge_detected() && !checks.grounded {
            Some(StateId::LedgeClimb)
        } else if jump
            && (checks.touching_wall
                || checks.touching_wall_back
                || ctx.abilities.wall_jump_coyote.is_active())
        {
            ctx.abilities.wall_jump_coyote.stop();
            let touching_wall = ctx.character.check_if_touching_wall();
            ctx.abilities
                .wall_jump
                .determine_direction(touching_wall, facing);
            Some(StateId::WallJump)
        } else if jump && ctx.abilities.jump.can_jump() {
            Some(StateId::Jump)
        } else if checks.touching_wall && ctx.input.grab_held() && checks.touching_ledge {
            Some(StateId::WallGrab)
        } else if checks.touching_wall && x == facing && velocity.y <= 0.0 {
            Some(StateId::WallSlide)
        } else if ctx.input.dash_pressed() && ctx.abilities.dash.check_if_can_dash(now) {
            Some(StateId::Dash)
        } else {
            Self::apply_gravity_scale(ctx);
            ctx.character.check_if_should_flip(x);
            ctx.character.set_velocity_x(ctx.data.movement_velocity * x as f32);
            ctx.publish_velocity();
            None
        }
    }
}
