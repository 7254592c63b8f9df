//! Help text for the command table

use crate::command::{Command, CommandTable};
use tabmode_keys::KeyFormat;

/// One line per command: shortcuts, typed name and help text.
pub fn help_lines(table: &CommandTable) -> Vec<String> {
    let leader = table.leader().display(KeyFormat::Long);
    let mut lines = vec![
        format!("Commands (type {leader} then the name):"),
        String::new(),
    ];
    if table.is_empty() {
        lines.push("  (no commands)".to_string());
    }
    for command in table.commands() {
        lines.push(format!(
            "  {:<24} {}{:<14} {}",
            shortcut_label(command),
            leader,
            command.name,
            help_label(command)
        ));
    }
    lines.push(String::new());
    lines.push("Esc cancels input; Enter confirms".to_string());
    lines
}

fn shortcut_label(command: &Command) -> String {
    let labels: Vec<String> = command
        .shortcuts()
        .map(|sequence| sequence.to_string_with(KeyFormat::Long))
        .collect();
    if labels.is_empty() {
        "-".to_string()
    } else {
        labels.join(" / ")
    }
}

fn help_label(command: &Command) -> String {
    if command.default_value.is_empty() {
        command.help.clone()
    } else {
        format!("{} (default: {})", command.help, command.default_value)
    }
}
