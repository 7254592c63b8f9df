use serde::Deserialize;
use std::path::Path;

use super::defaults::default_records;
use crate::error::{Result, TabmodeError};

const MAX_COMMANDS_FILE_BYTES: u64 = 1_048_576; // 1 MiB
pub const MAX_COMMANDS: usize = 256;
pub const DEFAULT_LEADER: &str = ":";

/// One command as written in a configuration file.
///
/// Field names are snake_case; the camelCase spellings (`shortCmd`,
/// `numberOfArguments`, ...) are accepted as aliases.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CommandRecord {
    /// Mode the command enters, e.g. `open_tab`. Unique per table.
    pub key: String,
    /// Name typed after the leader, e.g. `open-tab`.
    pub name: String,
    #[serde(default, alias = "shortCmd")]
    pub short_cmd: Option<String>,
    #[serde(default, alias = "longCmd")]
    pub long_cmd: Option<String>,
    #[serde(default, alias = "defaultValue")]
    pub default_value: String,
    /// -1 means unspecified; 0 means the command runs without Enter.
    #[serde(default = "unspecified_arity", alias = "numberOfArguments")]
    pub number_of_arguments: i32,
    #[serde(default)]
    pub help: String,
}

/// A whole command configuration file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
    /// Chord that opens the command prompt.
    #[serde(default = "default_leader")]
    pub leader: String,
    #[serde(default, alias = "command")]
    pub commands: Vec<CommandRecord>,
}

fn unspecified_arity() -> i32 {
    -1
}

fn default_leader() -> String {
    DEFAULT_LEADER.to_string()
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            leader: default_leader(),
            commands: default_records(),
        }
    }
}

impl CommandConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a configuration file. `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let size = std::fs::metadata(path)?.len();
        if size > MAX_COMMANDS_FILE_BYTES {
            return Err(TabmodeError::FileTooLarge {
                path: path.display().to_string(),
                size,
                max: MAX_COMMANDS_FILE_BYTES,
            });
        }
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        tracing::debug!(
            path = %path.display(),
            commands = config.commands.len(),
            "loaded command config"
        );
        Ok(config)
    }
}
