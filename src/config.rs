//! Locating and loading the command table.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{HostError, Result};
use tabmode_core::{CommandConfig, CommandTable};

const BUILT_IN: &str = "<built-in commands>";

/// `<config_dir>/tabmode/commands.toml`
pub fn default_commands_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "tabmode")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("commands.toml");
    Some(path)
}

/// Build the command table from `explicit`, the user's config file, or the
/// built-in defaults, in that order. Shortcut conflicts are returned as
/// warnings; everything else is an error.
pub fn load_table(explicit: Option<&Path>) -> Result<(CommandTable, Vec<String>)> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_commands_path().filter(|path| path.exists()),
    };
    let (config, origin) = match path {
        Some(path) => {
            let origin = path.display().to_string();
            let config = CommandConfig::load(&path).map_err(|source| HostError::Config {
                path: origin.clone(),
                source,
            })?;
            (config, origin)
        }
        None => (CommandConfig::default(), BUILT_IN.to_string()),
    };

    let table = CommandTable::from_config(&config).map_err(|source| HostError::Config {
        path: origin.clone(),
        source,
    })?;
    let warnings: Vec<String> = table
        .conflicts()
        .iter()
        .map(|conflict| format!("{origin}: {conflict}"))
        .collect();
    for warning in &warnings {
        warn!("{warning}");
    }
    Ok((table, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_explicit_file() {
        let file = write_config(
            r#"
leader = ";"

[[command]]
key = "open_tab"
name = "o"
short_cmd = "C-t"
"#,
        );
        let (table, warnings) = load_table(Some(file.path())).expect("table");
        assert_eq!(table.len(), 1);
        assert_eq!(table.leader().to_string(), ";");
        assert!(warnings.is_empty());
    }

    #[test]
    fn duplicate_key_names_the_file() {
        let file = write_config(
            r#"
[[command]]
key = "find"
name = "find"

[[command]]
key = "find"
name = "grep"
"#,
        );
        let err = load_table(Some(file.path())).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Duplicate command key 'find'"), "{message}");
        assert!(message.contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_table(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, HostError::Config { .. }));
    }

    #[test]
    fn conflicts_become_warnings() {
        let file = write_config(
            r#"
[[command]]
key = "scroll_down"
name = "down"
short_cmd = "g"

[[command]]
key = "move_right"
name = "next"
short_cmd = "g t"
"#,
        );
        let (_, warnings) = load_table(Some(file.path())).expect("table");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("shadows"), "{}", warnings[0]);
    }
}
