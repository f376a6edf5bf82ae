//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::context::{Condition, KeyContext};
use super::types::Keystroke;

/// The keymap stores all keybindings and handles lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Keystroke → indices into `bindings`
    /// Multiple bindings can share the same keystroke with different conditions
    single_lookup: HashMap<Keystroke, Vec<usize>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        let idx = self.bindings.len();
        self.single_lookup
            .entry(binding.keystroke)
            .or_default()
            .push(idx);
        self.bindings.push(binding);
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Command bound to a keystroke in the given context
    ///
    /// Bindings with conditions are checked before unconditional ones; within
    /// each group the first registered binding wins.
    pub fn lookup(&self, keystroke: Keystroke, context: &KeyContext) -> Option<Command> {
        let indices = self.single_lookup.get(&keystroke.normalized())?;

        let conditional = indices.iter().map(|&i| &self.bindings[i]).find(|b| {
            b.when
                .as_deref()
                .is_some_and(|conds| Condition::evaluate_all(conds, context))
        });
        let binding = conditional.or_else(|| {
            indices
                .iter()
                .map(|&i| &self.bindings[i])
                .find(|b| b.when.is_none())
        })?;

        (binding.command != Command::Unbound).then_some(binding.command)
    }

    /// First keystroke bound to `command`, for hints
    pub fn keystroke_for(&self, command: Command) -> Option<Keystroke> {
        self.bindings
            .iter()
            .find(|b| b.command == command)
            .map(|b| b.keystroke)
    }
}
