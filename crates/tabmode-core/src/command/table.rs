use std::collections::{HashMap, HashSet};
use tracing::info;

use super::config::{CommandConfig, CommandRecord, MAX_COMMANDS};
use crate::error::{Result, TabmodeError};
use crate::mode::State;
use tabmode_keys::{Key, KeyFormat, KeySequence, SequenceMatch};

/// A registered command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub key: String,
    pub name: String,
    /// Mode entered when the command fires.
    pub state: State,
    pub short: Option<KeySequence>,
    pub long: Option<KeySequence>,
    pub default_value: String,
    /// -1 when unspecified.
    pub arity: i32,
    pub help: String,
}

impl Command {
    /// Whether the command waits for Enter before acting.
    pub fn requires_confirmation(&self) -> bool {
        self.arity != 0
    }

    pub fn shortcuts(&self) -> impl Iterator<Item = &KeySequence> {
        self.short.iter().chain(self.long.iter())
    }
}

/// Outcome of looking up typed chords against every shortcut.
#[derive(Debug, PartialEq, Eq)]
pub enum PrefixMatch<'a> {
    NoMatch,
    /// The chords begin one or more shortcuts; more input is needed.
    PartialMatch(Vec<&'a Command>),
    ExactMatch(&'a Command),
}

/// Immutable registry of commands, indexed by typed name and by shortcut.
#[derive(Debug)]
pub struct CommandTable {
    commands: Vec<Command>,
    by_name: HashMap<String, usize>,
    by_state: HashMap<State, usize>,
    /// Every shortcut with its command index, sorted by sequence.
    shortcuts: Vec<(KeySequence, usize)>,
    leader: Key,
    conflicts: Vec<String>,
}

impl CommandTable {
    pub fn from_config(config: &CommandConfig) -> Result<Self> {
        let leader = config
            .leader
            .parse::<Key>()
            .map_err(|source| TabmodeError::InvalidShortcut {
                key: "leader".to_string(),
                spec: config.leader.clone(),
                source,
            })?;
        Self::build(&config.commands, leader)
    }

    /// Validate and index `records`.
    ///
    /// Fails on the first duplicate key, duplicate name, unknown mode key or
    /// unparsable shortcut.
    pub fn build(records: &[CommandRecord], leader: Key) -> Result<Self> {
        if records.len() > MAX_COMMANDS {
            return Err(TabmodeError::TooManyCommands {
                count: records.len(),
                max: MAX_COMMANDS,
            });
        }

        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut commands: Vec<Command> = Vec::with_capacity(records.len());
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut by_state: HashMap<State, usize> = HashMap::new();
        let mut shortcuts: Vec<(KeySequence, usize)> = Vec::new();

        for record in records {
            let key = record.key.trim().to_ascii_lowercase();
            if !seen_keys.insert(key.clone()) {
                return Err(TabmodeError::DuplicateCommandKey(record.key.clone()));
            }
            let state = State::from_config_key(&key)
                .ok_or_else(|| TabmodeError::UnknownCommandKey(record.key.clone()))?;

            let name = record.name.trim().to_string();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(TabmodeError::InvalidCommandName(record.name.clone()));
            }
            let index = commands.len();
            if by_name.insert(name.to_lowercase(), index).is_some() {
                return Err(TabmodeError::DuplicateCommandName(record.name.clone()));
            }
            by_state.insert(state, index);

            let short = parse_shortcut(&key, record.short_cmd.as_deref())?;
            let long = parse_shortcut(&key, record.long_cmd.as_deref())?;
            for sequence in short.iter().chain(long.iter()) {
                shortcuts.push((sequence.clone(), index));
            }

            commands.push(Command {
                key,
                name,
                state,
                short,
                long,
                default_value: record.default_value.clone(),
                arity: record.number_of_arguments,
                help: record.help.clone(),
            });
        }

        shortcuts.sort();
        let conflicts = find_conflicts(&commands, &shortcuts, leader);
        info!(
            commands = commands.len(),
            shortcuts = shortcuts.len(),
            leader = %leader,
            "command table built"
        );

        Ok(Self {
            commands,
            by_name,
            by_state,
            shortcuts,
            leader,
            conflicts,
        })
    }

    /// Match typed chords against every shortcut.
    ///
    /// Exact wins over partial. The sorted index puts the shortcuts that
    /// extend `typed` directly after it, so one binary search finds them all.
    pub fn lookup_by_prefix(&self, typed: &KeySequence) -> PrefixMatch<'_> {
        let start = self.shortcuts.partition_point(|(sequence, _)| sequence < typed);
        let mut partial: Vec<&Command> = Vec::new();
        for (sequence, index) in &self.shortcuts[start..] {
            match typed.matches(sequence) {
                SequenceMatch::Exact => return PrefixMatch::ExactMatch(&self.commands[*index]),
                SequenceMatch::Partial => {
                    let command = &self.commands[*index];
                    if !partial.iter().any(|seen| seen.key == command.key) {
                        partial.push(command);
                    }
                }
                SequenceMatch::No => break,
            }
        }
        if partial.is_empty() {
            PrefixMatch::NoMatch
        } else {
            PrefixMatch::PartialMatch(partial)
        }
    }

    /// Find the command whose name is exactly `text` (ignoring case and
    /// surrounding whitespace).
    pub fn resolve_typed_name(&self, text: &str) -> Result<&Command> {
        self.by_name
            .get(&text.trim().to_lowercase())
            .map(|&index| &self.commands[index])
            .ok_or_else(|| TabmodeError::UnknownCommand(text.trim().to_string()))
    }

    /// Commands whose name starts with `prefix`, in table order.
    pub fn complete(&self, prefix: &str) -> Vec<&Command> {
        let prefix = prefix.trim().to_lowercase();
        self.commands
            .iter()
            .filter(|command| command.name.to_lowercase().starts_with(&prefix))
            .collect()
    }

    pub fn requires_enter(&self, name: &str) -> Result<bool> {
        self.resolve_typed_name(name)
            .map(Command::requires_confirmation)
    }

    /// The text a user types after the leader to run `name`.
    pub fn typed_text_for(&self, name: &str) -> Option<&str> {
        self.resolve_typed_name(name)
            .ok()
            .map(|command| command.name.as_str())
    }

    pub fn command_for_state(&self, state: State) -> Option<&Command> {
        self.by_state.get(&state).map(|&index| &self.commands[index])
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn leader(&self) -> Key {
        self.leader
    }

    /// Shortcuts that can never fire, as human-readable warnings.
    pub fn conflicts(&self) -> &[String] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn parse_shortcut(key: &str, spec: Option<&str>) -> Result<Option<KeySequence>> {
    let Some(spec) = spec.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    KeySequence::parse(spec)
        .map(Some)
        .map_err(|source| TabmodeError::InvalidShortcut {
            key: key.to_string(),
            spec: spec.to_string(),
            source,
        })
}

fn find_conflicts(
    commands: &[Command],
    shortcuts: &[(KeySequence, usize)],
    leader: Key,
) -> Vec<String> {
    let mut conflicts = Vec::new();
    for pair in shortcuts.windows(2) {
        let (first, first_index) = &pair[0];
        let (second, second_index) = &pair[1];
        let verb = match first.matches(second) {
            SequenceMatch::Exact => "duplicates",
            SequenceMatch::Partial => "shadows",
            SequenceMatch::No => continue,
        };
        conflicts.push(format!(
            "'{}' ({}) {} '{}' ({})",
            first.to_string_with(KeyFormat::Short),
            commands[*first_index].name,
            verb,
            second.to_string_with(KeyFormat::Short),
            commands[*second_index].name
        ));
    }
    for (sequence, index) in shortcuts {
        if sequence.first() == leader {
            conflicts.push(format!(
                "'{}' ({}) starts with the leader '{}'",
                sequence, commands[*index].name, leader
            ));
        }
    }
    conflicts
}
