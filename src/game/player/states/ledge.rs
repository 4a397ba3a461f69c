// Hanging from and climbing over a ledge

use glam::Vec2;
use log::debug;

use crate::game::player::context::PlayerContext;
use crate::game::state_machine::{State, StateBase};

use super::StateId;

/// Snaps to the ledge corner, hangs, and climbs when pushed toward the wall.
///
/// Hanging starts on the animation trigger; the climb ends on the animation
/// finish trigger, after which the body is placed on top of the ledge.
pub struct LedgeClimbState {
    base: StateBase,
    corner_position: Vec2,
    start_position: Vec2,
    stop_position: Vec2,
    is_hanging: bool,
    is_climbing: bool,
    /// Headroom above the corner was blocked when the climb started
    is_touching_ceiling: bool,
}

impl LedgeClimbState {
    pub fn new() -> Self {
        Self {
            base: StateBase::new("ledgeClimbState"),
            corner_position: Vec2::ZERO,
            start_position: Vec2::ZERO,
            stop_position: Vec2::ZERO,
            is_hanging: false,
            is_climbing: false,
            is_touching_ceiling: false,
        }
    }
}

impl State<StateId, PlayerContext> for LedgeClimbState {
    state_base!(StateId::LedgeClimb);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        ctx.refresh_checks();
    }

    fn enter(&mut self, ctx: &mut PlayerContext) {
        ctx.character.set_velocity_zero();
        ctx.character.set_position(ctx.abilities.ledge_position);

        let corner = ctx.character.determine_corner_position();
        let facing = ctx.character.facing() as f32;
        let (start, stop) = (ctx.data.start_offset, ctx.data.stop_offset);

        self.corner_position = corner;
        self.start_position = Vec2::new(corner.x - facing * start.x, corner.y - start.y);
        self.stop_position = Vec2::new(corner.x + facing * stop.x, corner.y + stop.y);
        self.is_touching_ceiling = false;

        ctx.character.set_position(self.start_position);
        debug!(
            "grabbed ledge at corner {corner}, hanging at {}",
            self.start_position
        );
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        self.is_hanging = false;

        if self.is_climbing {
            ctx.character.set_position(self.stop_position);
            self.is_climbing = false;
        }
        ctx.animator.set_bool("climbLedge", false);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if self.base.is_animation_finished() {
            return if self.is_touching_ceiling {
                Some(StateId::CrouchIdle)
            } else {
                Some(StateId::Idle)
            };
        }

        let x = ctx.input.norm_x();
        let y = ctx.input.norm_y();
        let facing = ctx.character.facing();

        ctx.character.set_velocity_zero();
        ctx.character.set_position(self.start_position);

        let next = if self.is_hanging && x == facing && !self.is_climbing {
            let height = ctx.data.stand_collider_height;
            self.is_touching_ceiling = !ctx.character.has_headroom(self.corner_position, height);
            self.is_climbing = true;
            ctx.animator.set_bool("climbLedge", true);
            None
        } else if self.is_hanging && y == -1 && !self.is_climbing {
            Some(StateId::InAir)
        } else if ctx.input.jump_pressed() && !self.is_climbing {
            ctx.abilities.wall_jump.determine_direction(true, facing);
            Some(StateId::WallJump)
        } else {
            None
        };

        ctx.animator.set_bool("isTouchingCeiling", self.is_touching_ceiling);
        next
    }

    fn animation_trigger(&mut self, _ctx: &mut PlayerContext) {
        self.is_hanging = true;
    }

    fn animation_finish_trigger(&mut self, ctx: &mut PlayerContext) {
        self.base.mark_animation_finished();
        ctx.animator.set_bool("climbLedge", false);
    }
}
