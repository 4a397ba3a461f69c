// Everything the player states read and write, handed to them by the machine

use crate::core::FrameClock;
use crate::engine::input::InputSnapshot;
use crate::engine::physics::CharacterBackend;
use crate::game::state_machine::StateContext;

use super::abilities::AbilityTimers;
use super::animation::AnimatorParameters;
use super::character::Character;
use super::data::PlayerData;
use super::probe::{GeometryProbe, SurfaceChecks};

/// Shared state of one player
pub struct PlayerContext {
    pub character: Character,
    pub input: InputSnapshot,
    pub abilities: AbilityTimers,
    /// Probe results from the current state's last `do_checks`
    pub checks: SurfaceChecks,
    pub clock: FrameClock,
    pub data: PlayerData,
    pub animator: AnimatorParameters,
}

impl PlayerContext {
    pub fn new(backend: Box<dyn CharacterBackend>, data: PlayerData) -> Self {
        let probe = GeometryProbe::new(
            data.anchors,
            data.ground_check_radius,
            data.wall_check_distance,
            data.what_is_ground,
        );
        Self {
            character: Character::new(backend, probe, data.stand_size()),
            input: InputSnapshot::with_hold_time(data.input_hold_time),
            abilities: AbilityTimers::new(&data),
            checks: SurfaceChecks::default(),
            clock: FrameClock::new(),
            data,
            animator: AnimatorParameters::new(),
        }
    }

    /// Re-run every probe into `checks`
    pub fn refresh_checks(&mut self) {
        self.checks = self.character.survey();
    }

    /// Publish the velocity floats the air animations blend on
    pub fn publish_velocity(&mut self) {
        let velocity = self.character.current_velocity();
        self.animator.set_float("yVelocity", velocity.y);
        self.animator.set_float("xVelocity", velocity.x.abs());
    }
}

impl StateContext for PlayerContext {
    fn now(&self) -> f32 {
        self.clock.now()
    }

    fn set_animation_flag(&mut self, name: &'static str, value: bool) {
        self.animator.set_bool(name, value);
    }
}
