//! Default keybindings
//!
//! `keymap.yaml` at the crate root is embedded at compile time; a user
//! keymap merges on top of it.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: embedded defaults, then the user's keymap.yaml
///
/// User bindings with `command: Unbound` remove matching default bindings.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let user_path = crate::config_paths::keymap_file();
    load_keymap_layers(user_path.as_deref())
}

/// Embedded defaults merged with the keymap at `user_path`, when it exists
pub fn load_keymap_layers(user_path: Option<&Path>) -> Vec<Keybinding> {
    let mut bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::debug!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    let Some(user_path) = user_path.filter(|p| p.exists()) else {
        return bindings;
    };
    match load_keymap_file(user_path) {
        Ok(user_bindings) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                user_path.display(),
                user_bindings.len()
            );
            bindings = merge_bindings(bindings, user_bindings);
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", user_path.display(), e);
        }
    }

    bindings
}

/// Merge user bindings into base bindings
///
/// - If user binding has same keystroke + conditions → replaces base
/// - If user binding command is `Unbound` → removes every base binding for that keystroke
/// - Otherwise → user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        let existing_idx = result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke && b.when == user_binding.when);

        match existing_idx {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded fallback mirroring `keymap.yaml`
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let shift = Modifiers::SHIFT;
    let none = Modifiers::NONE;

    let bind = |key: KeyCode, mods: Modifiers, command: Command| {
        Keybinding::new(Keystroke::new(key, mods), command).when_single(Condition::TableFocused)
    };

    vec![
        bind(KeyCode::Left, none, Command::CellLeft),
        bind(KeyCode::Right, none, Command::CellRight),
        bind(KeyCode::Up, none, Command::CellUp),
        bind(KeyCode::Down, none, Command::CellDown),
        bind(KeyCode::Tab, none, Command::NextCell),
        bind(KeyCode::Tab, shift, Command::PrevCell),
        bind(KeyCode::Enter, none, Command::CommitCell),
        bind(KeyCode::Escape, none, Command::CancelEdit)
            .when(vec![Condition::TableFocused, Condition::MenuClosed]),
        bind(KeyCode::Escape, none, Command::DismissMenu)
            .when(vec![Condition::TableFocused, Condition::MenuOpen]),
        bind(KeyCode::Backspace, none, Command::DeleteBackward),
        bind(KeyCode::Delete, none, Command::DeleteForward),
        bind(KeyCode::Home, none, Command::CaretHome),
        bind(KeyCode::End, none, Command::CaretEnd),
        bind(KeyCode::Char('c'), cmd, Command::CopySelection)
            .when(vec![Condition::TableFocused, Condition::HasCellSelection]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{KeyContext, Keymap};

    #[test]
    fn test_embedded_yaml_matches_fallback() {
        let embedded = parse_keymap_yaml(DEFAULT_KEYMAP_YAML).unwrap();
        let fallback = default_bindings();
        assert_eq!(embedded.len(), fallback.len());
        for binding in &fallback {
            assert!(embedded.contains(binding), "missing {:?}", binding);
        }
    }

    #[test]
    fn test_unbound_removes_all_for_keystroke() {
        let esc = Keystroke::key(KeyCode::Escape);
        let user = vec![Keybinding::new(esc, Command::Unbound)];
        let merged = merge_bindings(default_bindings(), user);
        assert!(merged.iter().all(|b| b.keystroke != esc));
        assert_eq!(merged.len(), default_bindings().len() - 2);
    }

    #[test]
    fn test_same_keystroke_and_when_replaces() {
        let tab = Keystroke::key(KeyCode::Tab);
        let user = vec![
            Keybinding::new(tab, Command::CellRight).when_single(Condition::TableFocused)
        ];
        let keymap = Keymap::with_bindings(merge_bindings(default_bindings(), user));
        assert_eq!(
            keymap.lookup(tab, &KeyContext::in_table()),
            Some(Command::CellRight)
        );
        assert_eq!(keymap.bindings().len(), default_bindings().len());
    }

    #[test]
    fn test_user_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keymap.yaml");
        std::fs::write(
            &path,
            "bindings:\n  - key: \"ctrl+j\"\n    command: CellDown\n    when: [\"table_focused\"]\n",
        )
        .unwrap();

        let bindings = load_keymap_layers(Some(&path));
        assert_eq!(bindings.len(), default_bindings().len() + 1);

        let missing = load_keymap_layers(Some(&dir.path().join("absent.yaml")));
        assert_eq!(missing.len(), default_bindings().len());
    }
}
