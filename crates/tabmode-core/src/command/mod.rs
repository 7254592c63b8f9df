//! The command table: named commands, their shortcuts and their modes.
//!
//! Built once from a declarative list of records (a config file or the
//! built-in defaults) and read-only afterwards.

mod config;
mod defaults;
mod table;

pub use config::{CommandConfig, CommandRecord, DEFAULT_LEADER, MAX_COMMANDS};
pub use table::{Command, CommandTable, PrefixMatch};
