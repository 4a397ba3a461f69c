// Ability superstate policy plus the jump and wall jump abilities

use crate::game::player::context::PlayerContext;
use crate::game::state_machine::{State, StateBase};

use super::StateId;

/// Where a finished ability hands control back to
pub(super) fn exit_policy(ctx: &PlayerContext, is_ability_done: bool) -> Option<StateId> {
    if !is_ability_done {
        None
    } else if ctx.checks.grounded && ctx.character.current_velocity().y < 0.01 {
        Some(StateId::Idle)
    } else {
        Some(StateId::InAir)
    }
}

/// Single upward impulse, done as soon as it is applied
pub struct JumpState {
    base: StateBase,
    is_ability_done: bool,
}

impl JumpState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("inAir"),
            is_ability_done: false,
        }
    }
}

impl State<StateId, PlayerContext> for JumpState {
    state_base!(StateId::Jump);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        ctx.refresh_checks();
    }

    fn enter(&mut self, ctx: &mut PlayerContext) {
        self.is_ability_done = false;

        ctx.input.consume_jump();
        ctx.character.set_velocity_y(ctx.data.jump_velocity);
        ctx.abilities.jump.decrease();
        ctx.abilities.coyote.stop();
        ctx.abilities.jump.is_jumping = true;

        self.is_ability_done = true;
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        exit_policy(ctx, self.is_ability_done)
    }
}

/// Launch away from a wall; input is ignored for `wall_jump_time`
pub struct WallJumpState {
    base: StateBase,
    is_ability_done: bool,
}

impl WallJumpState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("inAir"),
            is_ability_done: false,
        }
    }
}

impl State<StateId, PlayerContext> for WallJumpState {
    state_base!(StateId::WallJump);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        ctx.refresh_checks();
    }

    fn enter(&mut self, ctx: &mut PlayerContext) {
        self.is_ability_done = false;

        let direction = ctx.abilities.wall_jump.direction();
        ctx.input.consume_jump();
        ctx.abilities.jump.reset();
        ctx.character.set_velocity_angle(
            ctx.data.wall_jump_velocity,
            ctx.data.wall_jump_angle,
            direction,
        );
        ctx.character.check_if_should_flip(direction);
        ctx.abilities.jump.decrease();
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if let Some(next) = exit_policy(ctx, self.is_ability_done) {
            return Some(next);
        }

        ctx.publish_velocity();
        if self.base.elapsed(ctx.clock.now()) >= ctx.data.wall_jump_time {
            self.is_ability_done = true;
        }
        None
    }
}
