// Grounded superstate policy and its leaves: idle, move, crouch, land

use crate::game::player::context::PlayerContext;
use crate::game::state_machine::{State, StateBase};

use super::StateId;

pub(super) fn do_checks(ctx: &mut PlayerContext) {
    ctx.refresh_checks();
    ctx.animator.set_bool("isTouchingCeiling", ctx.checks.touching_ceiling);
}

pub(super) fn enter(ctx: &mut PlayerContext) {
    ctx.abilities.jump.reset();
    ctx.abilities.dash.reset_can_dash();
}

/// Transitions shared by every grounded state, highest priority first
pub(super) fn logic(ctx: &mut PlayerContext) -> Option<StateId> {
    let now = ctx.clock.now();

    if ctx.input.jump_pressed() && ctx.abilities.jump.can_jump() {
        ctx.input.consume_jump();
        Some(StateId::Jump)
    } else if !ctx.checks.grounded {
        ctx.abilities.coyote.start(now);
        Some(StateId::InAir)
    } else if ctx.checks.touching_wall && ctx.input.grab_held() && ctx.checks.touching_ledge {
        Some(StateId::WallGrab)
    } else if ctx.input.dash_pressed()
        && ctx.abilities.dash.check_if_can_dash(now)
        && !ctx.checks.touching_ceiling
    {
        Some(StateId::Dash)
    } else {
        None
    }
}

/// Standing still
pub struct IdleState {
    base: StateBase,
}

impl IdleState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("idle"),
        }
    }
}

impl State<StateId, PlayerContext> for IdleState {
    state_base!(StateId::Idle);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        do_checks(ctx);
    }

    fn enter(&mut self, ctx: &mut PlayerContext) {
        enter(ctx);
        ctx.character.set_velocity_x(0.0);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if let Some(next) = logic(ctx) {
            return Some(next);
        }

        if ctx.input.norm_x() != 0 {
            Some(StateId::Move)
        } else if ctx.input.norm_y() == -1 {
            Some(StateId::CrouchIdle)
        } else {
            None
        }
    }
}

/// Running
pub struct MoveState {
    base: StateBase,
}

impl MoveState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("move"),
        }
    }
}

impl State<StateId, PlayerContext> for MoveState {
    state_base!(StateId::Move);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        do_checks(ctx);
    }

    fn enter(&mut self, ctx: &mut PlayerContext) {
        enter(ctx);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if let Some(next) = logic(ctx) {
            return Some(next);
        }

        let x = ctx.input.norm_x();
        ctx.character.check_if_should_flip(x);
        ctx.character.set_velocity_x(ctx.data.movement_velocity * x as f32);

        if x == 0 {
            Some(StateId::Idle)
        } else if ctx.input.norm_y() == -1 {
            Some(StateId::CrouchMove)
        } else {
            None
        }
    }
}

/// Crouching in place with the short collider
pub struct CrouchIdleState {
    base: StateBase,
}

impl CrouchIdleState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("crouchIdle"),
        }
    }
}

impl State<StateId, PlayerContext> for CrouchIdleState {
    state_base!(StateId::CrouchIdle);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        do_checks(ctx);
    }

    fn enter(&mut self, ctx: &mut PlayerContext) {
        enter(ctx);
        ctx.character.set_velocity_zero();
        ctx.character.set_collider_height(ctx.data.crouch_collider_height);
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        ctx.character.set_collider_height(ctx.data.stand_collider_height);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if let Some(next) = logic(ctx) {
            return Some(next);
        }

        if ctx.input.norm_x() != 0 {
            Some(StateId::CrouchMove)
        } else if ctx.input.norm_y() != -1 && !ctx.checks.touching_ceiling {
            Some(StateId::Idle)
        } else {
            None
        }
    }
}

/// Crouch walking
pub struct CrouchMoveState {
    base: StateBase,
}

impl CrouchMoveState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("crouchMove"),
        }
    }
}

impl State<StateId, PlayerContext> for CrouchMoveState {
    state_base!(StateId::CrouchMove);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        do_checks(ctx);
    }

    fn enter(&mut self, ctx: &mut PlayerContext) {
        enter(ctx);
        ctx.character.set_collider_height(ctx.data.crouch_collider_height);
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        ctx.character.set_collider_height(ctx.data.stand_collider_height);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if let Some(next) = logic(ctx) {
            return Some(next);
        }

        let facing = ctx.character.facing();
        ctx.character.set_velocity_x(ctx.data.crouch_movement_velocity * facing as f32);
        let x = ctx.input.norm_x();
        ctx.character.check_if_should_flip(x);

        if x == 0 {
            Some(StateId::CrouchIdle)
        } else if ctx.input.norm_y() != -1 && !ctx.checks.touching_ceiling {
            Some(StateId::Move)
        } else {
            None
        }
    }
}

/// Short recovery after touching down
pub struct LandState {
    base: StateBase,
}

impl LandState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("land"),
        }
    }
}

impl State<StateId, PlayerContext> for LandState {
    state_base!(StateId::Land);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        do_checks(ctx);
    }

    fn enter(&mut self, ctx: &mut PlayerContext) {
        enter(ctx);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if let Some(next) = logic(ctx) {
            return Some(next);
        }

        let landed_for = self.base.elapsed(ctx.clock.now());
        if ctx.input.norm_x() != 0 {
            Some(StateId::Move)
        } else if self.base.is_animation_finished() || landed_for >= ctx.data.land_duration {
            Some(StateId::Idle)
        } else {
            None
        }
    }
}
