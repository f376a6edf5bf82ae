//! Context system for conditional keybindings
//!
//! Lets the same key mean different things depending on table state, such as
//! Escape closing the context menu when one is open.

use serde::Deserialize;

/// Context extracted from the application model for keybinding evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// Focus is inside a table cell
    pub table_focused: bool,
    /// The focused table has a drag selection covering more than one cell
    pub has_cell_selection: bool,
    /// The focused table's context menu is open
    pub menu_open: bool,
}

impl KeyContext {
    /// Context for a focused cell with no selection or menu
    pub fn in_table() -> Self {
        Self {
            table_focused: true,
            ..Self::default()
        }
    }
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    TableFocused,
    TableUnfocused,
    HasCellSelection,
    NoCellSelection,
    MenuOpen,
    MenuClosed,
}

impl Condition {
    /// Evaluate this condition against the current context
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::TableFocused => ctx.table_focused,
            Condition::TableUnfocused => !ctx.table_focused,
            Condition::HasCellSelection => ctx.has_cell_selection,
            Condition::NoCellSelection => !ctx.has_cell_selection,
            Condition::MenuOpen => ctx.menu_open,
            Condition::MenuClosed => !ctx.menu_open,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}
