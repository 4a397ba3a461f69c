// Player controller
//
// Owns the state machine and the context every state works on. Drive it with:
// - `handle_input` for each polled input event
// - `update(dt)` once per rendered frame
// - `fixed_update()` once per physics step, before stepping the world
// - `handle_animation_event` for callbacks coming back from the animator

pub mod abilities;
pub mod animation;
pub mod character;
pub mod context;
pub mod data;
pub mod effects;
pub mod probe;
pub mod states;

#[cfg(test)]
pub(crate) mod test_support;

use log::debug;

use crate::core::FrameClock;
use crate::engine::input::{InputEvent, InputSnapshot};
use crate::engine::physics::CharacterBackend;
use crate::game::state_machine::{StateMachine, StateMachineError};

pub use abilities::AbilityTimers;
pub use animation::{AnimationClip, AnimationEvent, AnimationPlayer, AnimatorParameters};
pub use character::Character;
pub use context::PlayerContext;
pub use data::{ConfigError, PlayerData, DEFAULT_PLAYER_DATA};
pub use effects::{EffectLog, EffectSink};
pub use probe::{GeometryProbe, ProbeAnchors, SurfaceChecks};
pub use states::StateId;

/// Player construction and update errors
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Invalid player data: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    StateMachine(#[from] StateMachineError),
}

/// A controllable platformer character
pub struct Player {
    machine: StateMachine<StateId, PlayerContext>,
    context: PlayerContext,
}

impl Player {
    /// Validate `data`, build every state and start in idle
    pub fn new(
        backend: Box<dyn CharacterBackend>,
        data: PlayerData,
        effects: Box<dyn EffectSink>,
    ) -> Result<Self, PlayerError> {
        data.validate()?;

        let mut context = PlayerContext::new(backend, data);
        let states = states::build_states(effects)?;
        let machine = StateMachine::initialize(states, StateId::Idle, &mut context)?;
        debug!("player spawned at {}", context.character.position());

        Ok(Self { machine, context })
    }

    /// Variable-rate step: advance clocks, expire input, run the current state
    pub fn update(&mut self, dt: f32) -> Result<(), PlayerError> {
        self.context.clock.advance(dt);
        let now = self.context.clock.now();
        self.context.input.tick(now);
        self.context.character.refresh_velocity();
        self.machine.logic_update(&mut self.context)?;
        Ok(())
    }

    /// Fixed-rate step
    pub fn fixed_update(&mut self) -> Result<(), PlayerError> {
        self.machine.physics_update(&mut self.context)?;
        Ok(())
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.context.input.apply(event);
    }

    pub fn input_mut(&mut self) -> &mut InputSnapshot {
        &mut self.context.input
    }

    pub fn animation_trigger(&mut self) -> Result<(), PlayerError> {
        self.machine.animation_trigger(&mut self.context)?;
        Ok(())
    }

    pub fn animation_finish_trigger(&mut self) -> Result<(), PlayerError> {
        self.machine.animation_finish_trigger(&mut self.context)?;
        Ok(())
    }

    /// Forward a keyframe event from the animation player
    pub fn handle_animation_event(&mut self, event: AnimationEvent) -> Result<(), PlayerError> {
        match event {
            AnimationEvent::Trigger => self.animation_trigger(),
            AnimationEvent::Finished => self.animation_finish_trigger(),
        }
    }

    pub fn state(&self) -> StateId {
        self.machine.current()
    }

    pub fn previous_state(&self) -> StateId {
        self.machine.previous()
    }

    pub fn transition_count(&self) -> u64 {
        self.machine.transition_count()
    }

    pub fn character(&self) -> &Character {
        &self.context.character
    }

    pub fn abilities(&self) -> &AbilityTimers {
        &self.context.abilities
    }

    pub fn animator(&self) -> &AnimatorParameters {
        &self.context.animator
    }

    pub fn clock(&self) -> &FrameClock {
        &self.context.clock
    }

    /// Time scale the physics step should run at
    pub fn time_scale(&self) -> f32 {
        self.context.clock.time_scale()
    }

    pub fn checks(&self) -> SurfaceChecks {
        self.context.checks
    }

    pub fn data(&self) -> &PlayerData {
        &self.context.data
    }
}
