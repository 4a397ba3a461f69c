// Generic finite state machine with enter/exit lifecycle hooks

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

/// State machine errors
#[derive(Debug, thiserror::Error)]
pub enum StateMachineError {
    #[error("No state registered for {0}")]
    UnregisteredState(String),

    #[error("State {0} registered twice")]
    DuplicateState(String),
}

/// Identifier used to address a registered state
pub trait StateKey: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> StateKey for T {}

/// What the machine needs from the shared context to run the base contract
pub trait StateContext {
    /// Current time on the clock state durations are measured against
    fn now(&self) -> f32;

    /// Raise or lower the animation flag owned by a state
    fn set_animation_flag(&mut self, name: &'static str, value: bool);
}

/// Bookkeeping shared by every state, maintained by the machine
#[derive(Debug, Clone)]
pub struct StateBase {
    anim_flag: &'static str,
    start_time: f32,
    is_animation_finished: bool,
    is_exiting_state: bool,
}

impl StateBase {
    pub fn new(anim_flag: &'static str) -> Self {
        Self {
            anim_flag,
            start_time: 0.0,
            is_animation_finished: false,
            is_exiting_state: false,
        }
    }

    pub fn anim_flag(&self) -> &'static str {
        self.anim_flag
    }

    /// Time the state was last entered
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    /// Seconds spent in the state as of `now`
    pub fn elapsed(&self, now: f32) -> f32 {
        now - self.start_time
    }

    pub fn is_animation_finished(&self) -> bool {
        self.is_animation_finished
    }

    pub fn mark_animation_finished(&mut self) {
        self.is_animation_finished = true;
    }

    /// True from the start of `exit` until the state is entered again
    pub fn is_exiting_state(&self) -> bool {
        self.is_exiting_state
    }

    fn on_enter<C: StateContext>(&mut self, ctx: &mut C) {
        ctx.set_animation_flag(self.anim_flag, true);
        self.start_time = ctx.now();
        self.is_animation_finished = false;
        self.is_exiting_state = false;
    }

    fn on_exit<C: StateContext>(&mut self, ctx: &mut C) {
        ctx.set_animation_flag(self.anim_flag, false);
        self.is_exiting_state = true;
    }
}

/// Lifecycle hooks of a single state.
///
/// States never change the current state themselves: `logic_update` returns
/// the key of the state to switch to and the machine performs the switch.
pub trait State<K, C> {
    fn key(&self) -> K;

    fn base(&self) -> &StateBase;

    fn base_mut(&mut self) -> &mut StateBase;

    /// Refresh cached probe results. Runs before `enter` and before every
    /// `logic_update`.
    fn do_checks(&mut self, _ctx: &mut C) {}

    fn enter(&mut self, _ctx: &mut C) {}

    fn exit(&mut self, _ctx: &mut C) {}

    /// Variable-rate step; returns the next state when a transition is due
    fn logic_update(&mut self, ctx: &mut C) -> Option<K>;

    /// Fixed-rate step
    fn physics_update(&mut self, ctx: &mut C) {
        self.do_checks(ctx);
    }

    /// Mid-animation keyframe callback
    fn animation_trigger(&mut self, _ctx: &mut C) {}

    /// End-of-animation keyframe callback
    fn animation_finish_trigger(&mut self, _ctx: &mut C) {
        self.base_mut().mark_animation_finished();
    }
}

/// Collection of states handed to [`StateMachine::initialize`]
pub struct StateSet<K, C> {
    states: HashMap<K, Box<dyn State<K, C>>>,
}

impl<K: StateKey, C> Default for StateSet<K, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey, C> StateSet<K, C> {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Register a state under its own key
    pub fn register(&mut self, state: Box<dyn State<K, C>>) -> Result<(), StateMachineError> {
        let key = state.key();
        if self.states.contains_key(&key) {
            return Err(StateMachineError::DuplicateState(format!("{key:?}")));
        }
        self.states.insert(key, state);
        Ok(())
    }

    /// Builder-style registration
    pub fn with(mut self, state: Box<dyn State<K, C>>) -> Result<Self, StateMachineError> {
        self.register(state)?;
        Ok(self)
    }

    pub fn contains(&self, key: K) -> bool {
        self.states.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Owns every state and exactly one current state
pub struct StateMachine<K: StateKey, C> {
    states: HashMap<K, Box<dyn State<K, C>>>,
    current: K,
    previous: K,
    transition_count: u64,
}

impl<K: StateKey, C: StateContext> StateMachine<K, C> {
    /// Take ownership of the states and enter `initial`
    pub fn initialize(
        set: StateSet<K, C>,
        initial: K,
        ctx: &mut C,
    ) -> Result<Self, StateMachineError> {
        let mut machine = Self {
            states: set.states,
            current: initial,
            previous: initial,
            transition_count: 0,
        };

        let state = machine.state_mut(initial)?;
        Self::enter_state(state.as_mut(), ctx);
        debug!("state machine initialized in {initial:?}");

        Ok(machine)
    }

    /// Current state key
    pub fn current(&self) -> K {
        self.current
    }

    /// State that was active before the last transition
    pub fn previous(&self) -> K {
        self.previous
    }

    /// Number of transitions performed since initialization
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    pub fn current_state(&self) -> &dyn State<K, C> {
        // The current key is only ever set to a registered state
        self.states[&self.current].as_ref()
    }

    /// Exit the current state, then enter `next`.
    ///
    /// An unregistered `next` is rejected before anything is exited.
    pub fn change_state(&mut self, next: K, ctx: &mut C) -> Result<(), StateMachineError> {
        if !self.states.contains_key(&next) {
            return Err(StateMachineError::UnregisteredState(format!("{next:?}")));
        }

        let current = self.current;
        let old = self.state_mut(current)?;
        old.base_mut().on_exit(ctx);
        old.exit(ctx);

        self.previous = current;
        self.current = next;
        self.transition_count += 1;
        debug!("state transition: {current:?} -> {next:?}");

        let new = self.state_mut(next)?;
        Self::enter_state(new.as_mut(), ctx);
        Ok(())
    }

    /// Variable-rate step: refresh checks, run logic, apply a requested transition
    pub fn logic_update(&mut self, ctx: &mut C) -> Result<(), StateMachineError> {
        let current = self.current;
        let state = self.state_mut(current)?;
        state.do_checks(ctx);
        match state.logic_update(ctx) {
            Some(next) => self.change_state(next, ctx),
            None => Ok(()),
        }
    }

    /// Fixed-rate step on the current state
    pub fn physics_update(&mut self, ctx: &mut C) -> Result<(), StateMachineError> {
        let current = self.current;
        self.state_mut(current)?.physics_update(ctx);
        Ok(())
    }

    pub fn animation_trigger(&mut self, ctx: &mut C) -> Result<(), StateMachineError> {
        let current = self.current;
        self.state_mut(current)?.animation_trigger(ctx);
        Ok(())
    }

    pub fn animation_finish_trigger(&mut self, ctx: &mut C) -> Result<(), StateMachineError> {
        let current = self.current;
        self.state_mut(current)?.animation_finish_trigger(ctx);
        Ok(())
    }

    fn state_mut(&mut self, key: K) -> Result<&mut Box<dyn State<K, C>>, StateMachineError> {
        self.states
            .get_mut(&key)
            .ok_or_else(|| StateMachineError::UnregisteredState(format!("{key:?}")))
    }

    fn enter_state(state: &mut dyn State<K, C>, ctx: &mut C) {
        state.do_checks(ctx);
        state.base_mut().on_enter(ctx);
        state.enter(ctx);
    }
}
