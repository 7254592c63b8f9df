//! Input modes and the transition rules between them.

mod machine;
mod state;

pub use machine::ModeMachine;
pub use state::{InputKind, OffsetMode, PendingInput, State, TransitionContext, is_valid};
