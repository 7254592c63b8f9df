use super::config::CommandRecord;

/// (mode key, typed name, short shortcut, long shortcut, default value, arity, help)
type DefaultCommand = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    i32,
    &'static str,
);

const DEFAULT_COMMANDS: &[DefaultCommand] = &[
    ("open_tab", "open-tab", "o", "C-t", "about:blank", 1, "Open a URL or path in a new tab"),
    ("new_search", "new-search", "s", "C-k", "", 1, "Search in a new tab"),
    ("edit_search", "edit-search", "e", "", "", 1, "Edit the search of the current tab"),
    ("close_tab", "close-tab", "x", "C-w", "", -1, "Close the current tab or tab N"),
    ("refresh_tab", "reload", "r", "F5", "", -1, "Reload the current tab or tab N"),
    ("move_left", "tab-prev", "g T", "C-PageUp", "1", -1, "Switch to the tab N places left"),
    ("move_right", "tab-next", "g t", "C-PageDown", "1", -1, "Switch to the tab N places right"),
    ("move_tab", "move-tab", "g m", "", "", 1, "Move the current tab to N, or by +N / -N"),
    ("find", "find", "/", "C-f", "", 1, "Find text in the current tab"),
    ("find_up", "find-prev", "N", "", "", 0, "Repeat the last find backward"),
    ("find_down", "find-next", "n", "", "", 0, "Repeat the last find forward"),
    ("scroll_up", "scroll-up", "k", "Up", "", 0, "Scroll the current tab up"),
    ("scroll_down", "scroll-down", "j", "Down", "", 0, "Scroll the current tab down"),
    ("history_prev", "back", "H", "M-Left", "", 0, "Go back in the tab's history"),
    ("history_next", "forward", "L", "M-Right", "", 0, "Go forward in the tab's history"),
    ("open_file", "open-file", "C-o", "", "", 0, "Open a local file in a new tab"),
];

fn non_empty(spec: &str) -> Option<String> {
    (!spec.is_empty()).then(|| spec.to_string())
}

pub(crate) fn default_records() -> Vec<CommandRecord> {
    DEFAULT_COMMANDS
        .iter()
        .map(
            |&(key, name, short_cmd, long_cmd, default_value, arity, help)| CommandRecord {
                key: key.to_string(),
                name: name.to_string(),
                short_cmd: non_empty(short_cmd),
                long_cmd: non_empty(long_cmd),
                default_value: default_value.to_string(),
                number_of_arguments: arity,
                help: help.to_string(),
            },
        )
        .collect()
}
