//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::table::CellRef;
use crate::widget::{MenuAction, WidgetId};

/// Edits to the host text buffer made outside any table widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentMsg {
    /// Replace the char span `[from, to)`
    Replace { from: usize, to: usize, text: String },
    /// Insert at a char offset
    Insert { at: usize, text: String },
    /// Delete the char span `[from, to)`
    Delete { from: usize, to: usize },
}

/// Typing inside the focused cell; only ever touches the cell's draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellInput {
    InsertChar(char),
    /// Paste; line breaks collapse to spaces
    InsertText(String),
    DeleteBackward,
    DeleteForward,
    CaretLeft,
    CaretRight,
    CaretHome,
    CaretEnd,
}

/// Table widget events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMsg {
    // === Focus ===
    /// Click or programmatic focus on a cell
    FocusCell { widget: WidgetId, cell: CellRef },
    /// Focus moved to the host text surface
    FocusText { caret: usize },
    /// Focus left the editor entirely
    BlurAll,

    // === Editing ===
    /// Typing in the focused cell
    Input(CellInput),
    /// Enter: commit the widget's drafts
    Commit,
    /// Escape: revert the focused cell's draft
    CancelEdit,

    // === Context menu ===
    /// Right-click on a cell
    OpenContextMenu { widget: WidgetId, cell: CellRef },
    MenuSelect(MenuAction),
    DismissMenu,

    // === Drag selection ===
    /// Mouse-down on a cell
    SelectionStart { widget: WidgetId, cell: CellRef },
    /// Pointer entered a cell while dragging
    SelectionExtend { cell: CellRef },
    /// Mouse-up
    SelectionEnd,
    /// Copy the active selection as TSV
    CopySelection,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Document(DocumentMsg),
    Table(TableMsg),
}

impl From<TableMsg> for Msg {
    fn from(msg: TableMsg) -> Self {
        Msg::Table(msg)
    }
}

impl From<DocumentMsg> for Msg {
    fn from(msg: DocumentMsg) -> Self {
        Msg::Document(msg)
    }
}
