//! tabmode_core - keyboard-driven modal command interpreter for tabbed applications.
//!
//! Key events flow one way: [`InputRouter`] consults the [`CommandTable`] for
//! shortcut matches or accumulates typed text, asks the [`ModeMachine`] for
//! validated transitions, and dispatches finished commands to the tab and
//! status-bar collaborators.

pub mod collab;
pub mod command;
pub mod error;
pub mod help;
pub mod mode;
pub mod router;
pub mod tab_index;

#[cfg(test)]
mod test_support;

pub use collab::{
    Collaborators, FileOpener, FindSettings, HistoryDirection, InputAction, ScrollDirection,
    StatusBar, TabCollaborator,
};
pub use command::{Command, CommandConfig, CommandRecord, CommandTable, PrefixMatch};
pub use error::{Result, TabmodeError};
pub use mode::{ModeMachine, OffsetMode, PendingInput, State, TransitionContext, is_valid};
pub use router::InputRouter;
pub use tab_index::resolve;
