//! Focus state - where keyboard input currently goes
//!
//! Exactly one of: the host text surface, one cell of one table widget, or
//! nowhere (a focus restore that found no target).

use crate::table::CellRef;
use crate::widget::WidgetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Host text surface with a char-offset caret
    Text { caret: usize },
    /// A table cell
    Cell { widget: WidgetId, cell: CellRef },
    #[default]
    None,
}

impl Focus {
    pub fn widget(&self) -> Option<WidgetId> {
        match self {
            Focus::Cell { widget, .. } => Some(*widget),
            _ => None,
        }
    }

    pub fn cell(&self) -> Option<CellRef> {
        match self {
            Focus::Cell { cell, .. } => Some(*cell),
            _ => None,
        }
    }

    pub fn is_in_table(&self) -> bool {
        matches!(self, Focus::Cell { .. })
    }

    /// Whether moving from `self` to `next` leaves `self`'s widget
    pub fn leaves_widget(&self, next: &Focus) -> bool {
        match self.widget() {
            Some(id) => next.widget() != Some(id),
            None => false,
        }
    }
}

/// Focus target to restore once a transaction's widget is mounted
///
/// Widgets are looked up by block origin offset, never by a held handle:
/// the widget that issued the transaction is replaced by the rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    /// Post-edit char offset of the block's header line
    pub origin: usize,
    pub cell: CellRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaves_widget() {
        let a = Focus::Cell {
            widget: WidgetId(1),
            cell: CellRef::header(0),
        };
        let a2 = Focus::Cell {
            widget: WidgetId(1),
            cell: CellRef::body(0, 1),
        };
        let b = Focus::Cell {
            widget: WidgetId(2),
            cell: CellRef::header(0),
        };
        assert!(!a.leaves_widget(&a2));
        assert!(a.leaves_widget(&b));
        assert!(a.leaves_widget(&Focus::Text { caret: 0 }));
        assert!(a.leaves_widget(&Focus::None));
        assert!(!Focus::Text { caret: 3 }.leaves_widget(&a));
    }
}
