// Core utilities shared by engine and game code

pub mod clock;
pub mod math;

pub use clock::FrameClock;
