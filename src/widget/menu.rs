//! Cell context menu

use serde::Deserialize;

use crate::table::{CellRef, RowRef, TableBlock, TableOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    InsertRowAbove,
    InsertRowBelow,
    DeleteRow,
    InsertColumnLeft,
    InsertColumnRight,
    DeleteColumn,
    CycleAlignment,
}

impl MenuAction {
    pub const ALL: [MenuAction; 7] = [
        MenuAction::InsertRowAbove,
        MenuAction::InsertRowBelow,
        MenuAction::DeleteRow,
        MenuAction::InsertColumnLeft,
        MenuAction::InsertColumnRight,
        MenuAction::DeleteColumn,
        MenuAction::CycleAlignment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::InsertRowAbove => "Insert row above",
            MenuAction::InsertRowBelow => "Insert row below",
            MenuAction::DeleteRow => "Delete row",
            MenuAction::InsertColumnLeft => "Insert column left",
            MenuAction::InsertColumnRight => "Insert column right",
            MenuAction::DeleteColumn => "Delete column",
            MenuAction::CycleAlignment => "Cycle alignment",
        }
    }

    pub fn is_row_action(self) -> bool {
        matches!(
            self,
            MenuAction::InsertRowAbove | MenuAction::InsertRowBelow | MenuAction::DeleteRow
        )
    }

    /// Whether the action does something for `cell` in `block`
    pub fn is_enabled(self, cell: CellRef, block: &TableBlock) -> bool {
        if self.is_row_action() && cell.row.is_header() {
            return false;
        }
        match self {
            MenuAction::DeleteRow => block.can_delete_row(cell.row),
            MenuAction::DeleteColumn => block.can_delete_column(cell.col),
            _ => true,
        }
    }

    /// Table op for this action at `cell`; `None` for header row actions
    pub fn to_op(self, cell: CellRef) -> Option<TableOp> {
        let row = cell.row.body();
        let col = cell.col;
        let op = match self {
            MenuAction::InsertRowAbove => TableOp::InsertRow { at: row? },
            MenuAction::InsertRowBelow => TableOp::InsertRow { at: row? + 1 },
            MenuAction::DeleteRow => TableOp::DeleteRow { row: row? },
            MenuAction::InsertColumnLeft => TableOp::InsertColumn { at: col },
            MenuAction::InsertColumnRight => TableOp::InsertColumn { at: col + 1 },
            MenuAction::DeleteColumn => TableOp::DeleteColumn { col },
            MenuAction::CycleAlignment => TableOp::CycleAlignment { col },
        };
        Some(op)
    }

    /// Cell to focus once the op has been committed
    ///
    /// Row actions land on the first cell of the inserted or adjacent row;
    /// column actions stay in the same row. The result is clamped to the
    /// block's bounds again when the new widget is mounted.
    pub fn focus_after(self, cell: CellRef) -> CellRef {
        let row = cell.row;
        match (self, row) {
            (MenuAction::InsertRowAbove, RowRef::Body(r)) => CellRef::body(r, 0),
            (MenuAction::InsertRowBelow, RowRef::Body(r)) => CellRef::body(r + 1, 0),
            (MenuAction::DeleteRow, RowRef::Body(r)) => CellRef::body(r, 0),
            (MenuAction::InsertColumnRight, _) => CellRef::new(row, cell.col + 1),
            _ => cell,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub action: MenuAction,
    pub enabled: bool,
}

/// Transient menu opened on one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub cell: CellRef,
    pub items: Vec<MenuItem>,
}

impl ContextMenu {
    pub fn new(cell: CellRef, block: &TableBlock) -> Self {
        let items = MenuAction::ALL
            .iter()
            .map(|&action| MenuItem {
                action,
                enabled: action.is_enabled(cell, block),
            })
            .collect();
        Self { cell, items }
    }

    pub fn is_enabled(&self, action: MenuAction) -> bool {
        self.items
            .iter()
            .any(|item| item.action == action && item.enabled)
    }

    /// One line per item, disabled items in parentheses
    pub fn render(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| {
                if item.enabled {
                    format!("  {}", item.action.label())
                } else {
                    format!("  ({})", item.action.label())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_tables;

    fn block(text: &str) -> TableBlock {
        parse_tables(text).remove(0)
    }

    #[test]
    fn test_header_disables_row_actions() {
        let b = block("| a | b |\n| --- | --- |\n| 1 | 2 |\n| 3 | 4 |");
        let menu = ContextMenu::new(CellRef::header(0), &b);
        assert!(!menu.is_enabled(MenuAction::InsertRowAbove));
        assert!(!menu.is_enabled(MenuAction::InsertRowBelow));
        assert!(!menu.is_enabled(MenuAction::DeleteRow));
        assert!(menu.is_enabled(MenuAction::InsertColumnLeft));
        assert!(menu.is_enabled(MenuAction::DeleteColumn));
        assert_eq!(menu.items.len(), 7);
    }

    #[test]
    fn test_noop_deletes_disabled() {
        let b = block("| a |\n| --- |\n| 1 |");
        let menu = ContextMenu::new(CellRef::body(0, 0), &b);
        assert!(!menu.is_enabled(MenuAction::DeleteRow));
        assert!(!menu.is_enabled(MenuAction::DeleteColumn));
        assert!(menu.is_enabled(MenuAction::InsertRowBelow));
        assert!(menu.render().contains(&"  (Delete row)".to_string()));
    }

    #[test]
    fn test_ops_and_focus_targets() {
        let cell = CellRef::body(1, 2);
        assert_eq!(
            MenuAction::InsertRowBelow.to_op(cell),
            Some(TableOp::InsertRow { at: 2 })
        );
        assert_eq!(
            MenuAction::InsertColumnRight.to_op(cell),
            Some(TableOp::InsertColumn { at: 3 })
        );
        assert_eq!(MenuAction::DeleteRow.to_op(CellRef::header(0)), None);

        assert_eq!(MenuAction::InsertRowAbove.focus_after(cell), CellRef::body(1, 0));
        assert_eq!(MenuAction::InsertRowBelow.focus_after(cell), CellRef::body(2, 0));
        assert_eq!(
            MenuAction::InsertColumnRight.focus_after(cell),
            CellRef::body(1, 3)
        );
        assert_eq!(MenuAction::DeleteColumn.focus_after(cell), cell);
    }
}
