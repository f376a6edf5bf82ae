//! Table widget - the editable grid that stands in for a table's text span
//!
//! A widget is bound to one block snapshot. All interaction state lives
//! here: per-cell drafts, the drag selection and the context menu. Drafts are
//! never written to the buffer directly; the update layer folds them into a
//! transaction on commit, after which the decoration layer replaces the
//! widget.

mod cell;
mod menu;
mod render;
mod selection;

pub use cell::CellEditor;
pub use menu::{ContextMenu, MenuAction, MenuItem};
pub use render::{render_grid, CellView, GridView, MIN_COLUMN_WIDTH};
pub use selection::CellRange;

use std::collections::BTreeMap;

use crate::table::{to_tsv, CellRef, TableBlock, TableOp};

/// Unique identifier for a widget instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

#[derive(Debug, Clone)]
pub struct TableWidget {
    pub id: WidgetId,
    /// Snapshot this widget was built from
    pub block: TableBlock,
    drafts: BTreeMap<CellRef, CellEditor>,
    selection: Option<CellRange>,
    dragging: bool,
    menu: Option<ContextMenu>,
}

impl TableWidget {
    pub fn new(id: WidgetId, block: TableBlock) -> Self {
        Self {
            id,
            block,
            drafts: BTreeMap::new(),
            selection: None,
            dragging: false,
            menu: None,
        }
    }

    /// Take over drafts and selection from a widget for the same content
    /// at an older position
    pub fn adopt_state(&mut self, previous: TableWidget) {
        self.drafts = previous.drafts;
        self.selection = previous.selection;
    }

    // === Drafts ===

    /// Draft for `cell`, opened from the committed text on first focus
    pub fn open_editor(&mut self, cell: CellRef) -> &mut CellEditor {
        let committed = self.block.cell(cell);
        self.drafts
            .entry(cell)
            .or_insert_with(|| CellEditor::new(committed))
    }

    pub fn editor(&self, cell: CellRef) -> Option<&CellEditor> {
        self.drafts.get(&cell)
    }

    /// Undo typing in one cell without touching the buffer
    pub fn revert(&mut self, cell: CellRef) {
        if let Some(editor) = self.drafts.get_mut(&cell) {
            editor.revert();
        }
    }

    pub fn has_dirty_drafts(&self) -> bool {
        self.drafts.values().any(CellEditor::is_modified)
    }

    /// One `SetCell` per modified draft, in row-major order
    pub fn dirty_ops(&self) -> Vec<TableOp> {
        self.drafts
            .iter()
            .filter(|(_, editor)| editor.is_modified())
            .map(|(cell, editor)| TableOp::SetCell {
                cell: *cell,
                text: editor.text().to_string(),
            })
            .collect()
    }

    pub fn clear_drafts(&mut self) {
        self.drafts.clear();
    }

    /// Text shown in a cell: the draft when present, else the snapshot
    pub fn display_text(&self, cell: CellRef) -> &str {
        match self.drafts.get(&cell) {
            Some(editor) => editor.text(),
            None => self.block.cell(cell),
        }
    }

    // === Drag selection ===

    /// Mouse-down: anchor a new selection, replacing any previous one
    pub fn begin_selection(&mut self, cell: CellRef) {
        self.selection = Some(CellRange::single(cell));
        self.dragging = true;
    }

    /// Mouse-over while the button is held
    pub fn extend_selection(&mut self, cell: CellRef) {
        if !self.dragging {
            return;
        }
        if let Some(range) = self.selection.as_mut() {
            range.head = self.block.clamp(cell);
        }
    }

    pub fn end_selection(&mut self) {
        self.dragging = false;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.dragging = false;
    }

    pub fn selection(&self) -> Option<&CellRange> {
        self.selection.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether a selection spanning more than one cell exists
    pub fn selection_active(&self) -> bool {
        self.selection.is_some_and(|range| range.is_multi_cell())
    }

    /// Active selection as tab-separated text
    pub fn selection_tsv(&self) -> Option<String> {
        let range = self.selection.filter(CellRange::is_multi_cell)?;
        let rows: Vec<Vec<String>> = range
            .rows_of_cells()
            .into_iter()
            .map(|cells| {
                cells
                    .into_iter()
                    .map(|cell| self.display_text(cell).to_string())
                    .collect()
            })
            .collect();
        Some(to_tsv(&rows))
    }

    // === Context menu ===

    pub fn open_menu(&mut self, cell: CellRef) {
        self.menu = Some(ContextMenu::new(cell, &self.block));
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    pub fn menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    // === Rendering ===

    /// View model with drafts overlaid and `focus` marked
    pub fn grid(&self, focus: Option<CellRef>) -> GridView {
        let cols = self.block.column_count();
        let rows = self
            .block
            .row_refs()
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        let cell = CellRef::new(row, col);
                        let focused = focus == Some(cell);
                        CellView {
                            text: self.display_text(cell).to_string(),
                            focused,
                            selected: self.selection_active()
                                && self.selection.is_some_and(|r| r.contains(cell)),
                            caret: focused
                                .then(|| self.editor(cell).map(CellEditor::caret))
                                .flatten(),
                        }
                    })
                    .collect()
            })
            .collect();
        let aligns = (0..cols).map(|c| self.block.align(c)).collect();
        GridView::new(aligns, rows)
    }

    /// Grid lines followed by the open menu, if any
    pub fn render(&self, focus: Option<CellRef>) -> Vec<String> {
        let mut lines = render_grid(&self.grid(focus));
        if let Some(menu) = &self.menu {
            lines.extend(menu.render());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_tables;

    fn widget(text: &str) -> TableWidget {
        TableWidget::new(WidgetId(1), parse_tables(text).remove(0))
    }

    #[test]
    fn test_drafts_overlay_and_dirty_ops() {
        let mut w = widget("| A | B |\n|---|---|\n| 1 | 2 |");
        let editor = w.open_editor(CellRef::body(0, 1));
        editor.delete_backward();
        editor.insert_text("99");
        w.open_editor(CellRef::header(0));

        assert_eq!(w.display_text(CellRef::body(0, 1)), "99");
        assert_eq!(w.display_text(CellRef::body(0, 0)), "1");
        assert_eq!(
            w.dirty_ops(),
            vec![TableOp::SetCell {
                cell: CellRef::body(0, 1),
                text: "99".into(),
            }]
        );

        w.revert(CellRef::body(0, 1));
        assert!(!w.has_dirty_drafts());
    }

    #[test]
    fn test_reopening_keeps_draft() {
        let mut w = widget("| A |\n|---|\n| 1 |");
        w.open_editor(CellRef::body(0, 0)).insert_char('x');
        assert_eq!(w.open_editor(CellRef::body(0, 0)).text(), "1x");
    }

    #[test]
    fn test_drag_selection_to_tsv() {
        let mut w = widget("| A | B | C |\n|---|---|---|\n| 1 | 2 | 3 |\n| 4 | 5 | 6 |");
        w.begin_selection(CellRef::header(1));
        assert!(!w.selection_active());
        w.extend_selection(CellRef::body(0, 2));
        w.end_selection();
        w.extend_selection(CellRef::body(1, 2));

        assert!(w.selection_active());
        assert_eq!(w.selection_tsv().as_deref(), Some("B\tC\n2\t3"));
    }

    #[test]
    fn test_plain_click_clears_selection() {
        let mut w = widget("| A | B |\n|---|---|\n| 1 | 2 |");
        w.begin_selection(CellRef::header(0));
        w.extend_selection(CellRef::body(0, 1));
        w.end_selection();
        assert!(w.selection_active());

        w.begin_selection(CellRef::body(0, 0));
        w.end_selection();
        assert!(!w.selection_active());
        assert_eq!(w.selection_tsv(), None);
    }

    #[test]
    fn test_grid_marks_focus_and_selection() {
        let mut w = widget("| A | B |\n|:---:|---|\n| 1 | 2 |");
        w.begin_selection(CellRef::header(0));
        w.extend_selection(CellRef::body(0, 0));
        let grid = w.grid(Some(CellRef::body(0, 1)));
        assert_eq!(grid.rows.len(), 2);
        assert!(grid.rows[0][0].selected);
        assert!(!grid.rows[0][1].selected);
        assert!(grid.rows[1][1].focused);
        assert_eq!(grid.rows[1][1].caret, None);
        assert_eq!(grid.aligns[0], crate::table::Align::Center);
    }

    #[test]
    fn test_menu_lines_follow_grid() {
        let mut w = widget("| A |\n|---|\n| 1 |");
        w.open_menu(CellRef::body(0, 0));
        let lines = w.render(None);
        assert_eq!(lines.len(), 5 + 7);
        w.close_menu();
        assert!(w.menu().is_none());
    }
}
