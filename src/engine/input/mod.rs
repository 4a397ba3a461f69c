// Controller input as the character states see it.
//
// Device polling and key binding happen outside this crate; what arrives here
// are semantic events (move vector, dash aim, button edges). `InputSnapshot`
// folds them into deadzoned axes, held buttons and time-buffered presses:
//
// ```rust
// use rusted_ledge::engine::input::{Action, InputEvent, InputSnapshot};
//
// let mut input = InputSnapshot::new();
// input.apply(InputEvent::press(Action::Jump));
// input.tick(0.0);
// assert!(input.jump_pressed());
// ```

pub mod action;
pub mod snapshot;

pub use action::{Action, InputEdge, InputEvent};
pub use snapshot::InputSnapshot;
