// Touching-wall superstate policy and the slide, grab and climb leaves

use glam::Vec2;

use crate::game::player::context::PlayerContext;
use crate::game::state_machine::{State, StateBase};

use super::StateId;

pub(super) fn do_checks(ctx: &mut PlayerContext) {
    ctx.refresh_checks();
    if ctx.checks.ledge_detected() {
        ctx.abilities.ledge_position = ctx.character.position();
    }
}

/// Transitions shared by every wall state, highest priority first
pub(super) fn logic(ctx: &mut PlayerContext) -> Option<StateId> {
    let checks = ctx.checks;
    let grab = ctx.input.grab_held();
    let facing = ctx.character.facing();

    if ctx.input.jump_pressed() {
        ctx.abilities
            .wall_jump
            .determine_direction(checks.touching_wall, facing);
        Some(StateId::WallJump)
    } else if checks.grounded && !grab {
        Some(StateId::Idle)
    } else if !checks.touching_wall || (ctx.input.norm_x() != facing && !grab) {
        ctx.abilities.wall_jump_coyote.start(ctx.clock.now());
        Some(StateId::InAir)
    } else if checks.ledge_detected() {
        Some(StateId::LedgeClimb)
    } else {
        None
    }
}

/// Sliding down at a fixed speed
pub struct WallSlideState {
    base: StateBase,
}

impl WallSlideState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("wallSlide"),
        }
    }
}

impl State<StateId, PlayerContext> for WallSlideState {
    state_base!(StateId::WallSlide);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        do_checks(ctx);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if let Some(next) = logic(ctx) {
            return Some(next);
        }

        ctx.character.set_velocity_y(-ctx.data.wall_slide_velocity);

        if ctx.input.grab_held() && ctx.input.norm_y() == 0 {
            Some(StateId::WallGrab)
        } else {
            None
        }
    }
}

/// Holding still against the wall
pub struct WallGrabState {
    base: StateBase,
    holding_position: Vec2,
}

impl WallGrabState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("wallGrab"),
            holding_position: Vec2::ZERO,
        }
    }

    fn hold_position(&self, ctx: &mut PlayerContext) {
        ctx.character.set_position(self.holding_position);
        ctx.character.set_velocity_zero();
    }
}

impl State<StateId, PlayerContext> for WallGrabState {
    state_base!(StateId::WallGrab);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        do_checks(ctx);
    }

    fn enter(&mut self, ctx: &mut PlayerContext) {
        self.holding_position = ctx.character.position();
        ctx.character.set_gravity_scale(0.0);
        self.hold_position(ctx);
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        ctx.character.set_gravity_scale(1.0);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if let Some(next) = logic(ctx) {
            return Some(next);
        }

        self.hold_position(ctx);

        let y = ctx.input.norm_y();
        if y > 0 {
            Some(StateId::WallClimb)
        } else if y < 0 || !ctx.input.grab_held() {
            Some(StateId::WallSlide)
        } else {
            None
        }
    }
}

/// Climbing up at a fixed speed
pub struct WallClimbState {
    base: StateBase,
}

impl WallClimbState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("wallClimb"),
        }
    }
}

impl State<StateId, PlayerContext> for WallClimbState {
    state_base!(StateId::WallClimb);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        do_checks(ctx);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if let Some(next) = logic(ctx) {
            return Some(next);
        }

        ctx.character.set_velocity_y(ctx.data.wall_climb_velocity);

        if ctx.input.norm_y() != 1 {
            Some(StateId::WallGrab)
        } else {
            None
        }
    }
}
