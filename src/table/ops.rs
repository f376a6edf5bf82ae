//! Structural edits on a table block
//!
//! Ops mutate a freshly resolved block; the caller serializes the result and
//! replaces the block's span. `apply` reports whether anything changed so
//! no-op edits never produce a transaction.

use super::model::{Align, CellRef, RowRef, TableBlock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOp {
    /// Replace one cell's text
    SetCell { cell: CellRef, text: String },
    /// Insert a blank body row before index `at` (clamped to the row count)
    InsertRow { at: usize },
    /// Remove a body row; no-op when it is the only one
    DeleteRow { row: usize },
    /// Insert a blank column before index `at` (clamped to the column count)
    InsertColumn { at: usize },
    /// Remove a column; no-op when it is the only one
    DeleteColumn { col: usize },
    /// Append a blank body row
    AppendRow,
    SetAlignment { col: usize, align: Align },
    /// none → left → center → right → none
    CycleAlignment { col: usize },
}

impl TableBlock {
    /// Apply one op, returning whether the block changed
    pub fn apply(&mut self, op: &TableOp) -> bool {
        match op {
            TableOp::SetCell { cell, text } => self.set_cell(*cell, text),
            TableOp::InsertRow { at } => {
                self.insert_row(*at);
                true
            }
            TableOp::DeleteRow { row } => self.delete_row(*row),
            TableOp::InsertColumn { at } => {
                self.insert_column(*at);
                true
            }
            TableOp::DeleteColumn { col } => self.delete_column(*col),
            TableOp::AppendRow => {
                self.insert_row(self.rows.len());
                true
            }
            TableOp::SetAlignment { col, align } => self.set_alignment(*col, *align),
            TableOp::CycleAlignment { col } => {
                let next = self.align(*col).cycle();
                self.set_alignment(*col, next)
            }
        }
    }

    /// Apply ops in order, returning whether any of them changed the block
    pub fn apply_all<'a>(&mut self, ops: impl IntoIterator<Item = &'a TableOp>) -> bool {
        ops.into_iter()
            .fold(false, |changed, op| self.apply(op) | changed)
    }

    fn set_cell(&mut self, cell: CellRef, text: &str) -> bool {
        if cell.col >= self.column_count() {
            return false;
        }
        let text = text.trim();
        let cells = match cell.row {
            RowRef::Header => &mut self.headers,
            RowRef::Body(r) => match self.rows.get_mut(r) {
                Some(cells) => cells,
                None => return false,
            },
        };
        if cells.get(cell.col).map(String::as_str).unwrap_or("") == text {
            return false;
        }
        if cells.len() <= cell.col {
            cells.resize(cell.col + 1, String::new());
        }
        cells[cell.col] = text.to_string();
        true
    }

    fn insert_row(&mut self, at: usize) {
        let at = at.min(self.rows.len());
        let cols = self.column_count();
        self.rows.insert(at, vec![String::new(); cols]);
    }

    fn delete_row(&mut self, row: usize) -> bool {
        if self.rows.len() <= 1 || row >= self.rows.len() {
            return false;
        }
        self.rows.remove(row);
        true
    }

    fn insert_column(&mut self, at: usize) {
        self.normalize();
        let at = at.min(self.column_count());
        self.headers.insert(at, String::new());
        self.aligns.insert(at, Align::None);
        for row in &mut self.rows {
            row.insert(at, String::new());
        }
    }

    fn delete_column(&mut self, col: usize) -> bool {
        let cols = self.column_count();
        if cols <= 1 || col >= cols {
            return false;
        }
        self.normalize();
        self.headers.remove(col);
        self.aligns.remove(col);
        for row in &mut self.rows {
            row.remove(col);
        }
        true
    }

    fn set_alignment(&mut self, col: usize, align: Align) -> bool {
        if col >= self.column_count() || self.align(col) == align {
            return false;
        }
        if self.aligns.len() <= col {
            self.aligns.resize(col + 1, Align::None);
        }
        self.aligns[col] = align;
        true
    }

    /// Whether deleting `row` would change the block
    pub fn can_delete_row(&self, row: RowRef) -> bool {
        matches!(row, RowRef::Body(r) if r < self.rows.len()) && self.rows.len() > 1
    }

    /// Whether deleting `col` would change the block
    pub fn can_delete_column(&self, col: usize) -> bool {
        let cols = self.column_count();
        cols > 1 && col < cols
    }
}
