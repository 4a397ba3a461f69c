// Rusted Ledge - platformer character controller core
//
// `core` holds clocks and math helpers, `engine` the input/physics/loop
// plumbing, and `game` the state machine and the player built on it.

pub mod core;
pub mod engine;
pub mod game;
