// Game logic: generic state machine and the player controller

pub mod player;
pub mod state_machine;

pub use state_machine::{State, StateBase, StateContext, StateMachine, StateMachineError, StateSet};
