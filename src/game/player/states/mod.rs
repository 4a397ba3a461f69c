// Player states
//
// Superstate behavior lives in plain policy functions (`grounded`,
// `ability`, `wall`) that each leaf state calls before its own logic.
// The first transition any layer returns wins.

use crate::game::state_machine::{StateMachineError, StateSet};

use super::context::PlayerContext;
use super::effects::EffectSink;

/// Implements the `State` accessors for a struct with a `base` field
macro_rules! state_base {
    ($key:expr) => {
        fn key(&self) -> StateId {
            $key
        }

        fn base(&self) -> &StateBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut StateBase {
            &mut self.base
        }
    };
}

mod ability;
mod air;
mod dash;
mod grounded;
mod ledge;
mod wall;

pub use ability::{JumpState, WallJumpState};
pub use air::InAirState;
pub use dash::DashState;
pub use grounded::{CrouchIdleState, CrouchMoveState, IdleState, LandState, MoveState};
pub use ledge::LedgeClimbState;
pub use wall::{WallClimbState, WallGrabState, WallSlideState};

/// Every player state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Idle,
    Move,
    CrouchIdle,
    CrouchMove,
    Land,
    Jump,
    InAir,
    WallSlide,
    WallGrab,
    WallClimb,
    WallJump,
    LedgeClimb,
    Dash,
}

impl StateId {
    pub const ALL: [StateId; 13] = [
        StateId::Idle,
        StateId::Move,
        StateId::CrouchIdle,
        StateId::CrouchMove,
        StateId::Land,
        StateId::Jump,
        StateId::InAir,
        StateId::WallSlide,
        StateId::WallGrab,
        StateId::WallClimb,
        StateId::WallJump,
        StateId::LedgeClimb,
        StateId::Dash,
    ];
}

/// Construct one instance of every state. `effects` receives dash after-images.
pub fn build_states(
    effects: Box<dyn EffectSink>,
) -> Result<StateSet<StateId, PlayerContext>, StateMachineError> {
    StateSet::new()
        .with(Box::new(IdleState::new()))?
        .with(Box::new(MoveState::new()))?
        .with(Box::new(CrouchIdleState::new()))?
        .with(Box::new(CrouchMoveState::new()))?
        .with(Box::new(LandState::new()))?
        .with(Box::new(JumpState::new()))?
        .with(Box::new(InAirState::new()))?
        .with(Box::new(WallSlideState::new()))?
        .with(Box::new(WallGrabState::new()))?
        .with(Box::new(WallClimbState::new()))?
        .with(Box::new(WallJumpState::new()))?
        .with(Box::new(LedgeClimbState::new()))?
        .with(Box::new(DashState::new(effects)))
}
