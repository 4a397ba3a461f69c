// Aimed dash: slow-motion aiming phase followed by a fixed-length burst

use glam::Vec2;
use log::debug;

use crate::core::math::signed_angle_deg;
use crate::game::player::context::PlayerContext;
use crate::game::player::effects::EffectSink;
use crate::game::state_machine::{State, StateBase};

use super::ability::exit_policy;
use super::StateId;

/// Indicator sprite points along +x +y at rest
const INDICATOR_ANGLE_OFFSET: f32 = 45.0;

pub struct DashState {
    base: StateBase,
    effects: Box<dyn EffectSink>,
    is_holding: bool,
    is_ability_done: bool,
    direction: Vec2,
    /// Unscaled time the current phase started
    phase_start: f32,
    last_after_image: Vec2,
}

impl DashState {
    pub fn new(effects: Box<dyn EffectSink>) -> Self {
        Self {
            base: StateBase::new("inAir"),
            effects,
            is_holding: false,
            is_ability_done: false,
            direction: Vec2::X,
            phase_start: 0.0,
            last_after_image: Vec2::ZERO,
        }
    }

    fn place_after_image(&mut self, ctx: &PlayerContext) {
        self.last_after_image = ctx.character.position();
        self.effects.spawn_at(self.last_after_image);
    }

    fn check_if_should_place_after_image(&mut self, ctx: &PlayerContext) {
        let travelled = ctx
            .character
            .position()
            .distance(self.last_after_image);
        if travelled >= ctx.data.dist_between_after_images {
            self.place_after_image(ctx);
        }
    }

    /// Steer while aiming; fire once the button is let go or aiming times out
    fn hold(&mut self, ctx: &mut PlayerContext) {
        let aim = ctx.input.dash_direction();
        if aim != Vec2::ZERO {
            self.direction = aim.normalize();
        }

        let angle = signed_angle_deg(Vec2::X, self.direction);
        ctx.animator.set_float("dashIndicatorAngle", angle - INDICATOR_ANGLE_OFFSET);

        let now = ctx.clock.unscaled_now();
        if !ctx.input.dash_held() || now >= self.phase_start + ctx.data.max_hold_time {
            self.is_holding = false;
            ctx.clock.reset_time_scale();
            self.phase_start = now;

            ctx.character.check_if_should_flip(self.direction.x.round() as i32);
            ctx.character.set_drag(ctx.data.drag);
            ctx.character.set_velocity_direction(ctx.data.dash_velocity, self.direction);
            ctx.animator.set_bool("dashAim", false);
            self.place_after_image(ctx);
            debug!("dash fired along {}", self.direction);
        }
    }

    fn dash(&mut self, ctx: &mut PlayerContext) {
        ctx.character.set_velocity_direction(ctx.data.dash_velocity, self.direction);
        self.check_if_should_place_after_image(ctx);

        if ctx.clock.unscaled_now() >= self.phase_start + ctx.data.dash_time {
            ctx.character.set_drag(0.0);
            self.is_ability_done = true;
            ctx.abilities.dash.complete(ctx.clock.now());
        }
    }
}

impl State<StateId, PlayerContext> for DashState {
    state_base!(StateId::Dash);

    fn do_checks(&mut self, ctx: &mut PlayerContext) {
        ctx.refresh_checks();
    }

    fn enter(&mut self, ctx: &mut PlayerContext) {
        self.is_ability_done = false;

        ctx.abilities.dash.consume();
        ctx.input.consume_dash();

        self.is_holding = true;
        self.direction = Vec2::new(ctx.character.facing() as f32, 0.0);

        ctx.clock.set_time_scale(ctx.data.hold_time_scale);
        self.phase_start = ctx.clock.unscaled_now();
        ctx.animator.set_bool("dashAim", true);
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        let vy = ctx.character.current_velocity().y;
        if vy > 0.0 {
            ctx.character.set_velocity_y(vy * ctx.data.dash_end_y_multiplier);
        }
        ctx.clock.reset_time_scale();
        ctx.character.set_drag(0.0);
        ctx.animator.set_bool("dashAim", false);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext) -> Option<StateId> {
        if let Some(next) = exit_policy(ctx, self.is_ability_done) {
            return Some(next);
        }

        ctx.publish_velocity();
        if self.is_holding {
            self.hold(ctx);
        } else {
            self.dash(ctx);
        }
        None
    }
}
