//! Rectangular drag selection across header and body cells

use crate::table::{CellRef, RowRef};

/// Row position in display order: header is 0, body row `r` is `r + 1`
fn display_row(row: RowRef) -> usize {
    match row {
        RowRef::Header => 0,
        RowRef::Body(r) => r + 1,
    }
}

fn row_ref(display: usize) -> RowRef {
    match display {
        0 => RowRef::Header,
        n => RowRef::Body(n - 1),
    }
}

/// Rectangle spanned by the drag anchor and the cell under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub anchor: CellRef,
    pub head: CellRef,
}

impl CellRange {
    pub fn single(cell: CellRef) -> Self {
        Self {
            anchor: cell,
            head: cell,
        }
    }

    fn rows(&self) -> (usize, usize) {
        let a = display_row(self.anchor.row);
        let b = display_row(self.head.row);
        (a.min(b), a.max(b))
    }

    fn cols(&self) -> (usize, usize) {
        (
            self.anchor.col.min(self.head.col),
            self.anchor.col.max(self.head.col),
        )
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        let (r0, r1) = self.rows();
        let (c0, c1) = self.cols();
        let r = display_row(cell.row);
        (r0..=r1).contains(&r) && (c0..=c1).contains(&cell.col)
    }

    pub fn cell_count(&self) -> usize {
        let (r0, r1) = self.rows();
        let (c0, c1) = self.cols();
        (r1 - r0 + 1) * (c1 - c0 + 1)
    }

    /// A selection only counts once it spans more than one cell
    pub fn is_multi_cell(&self) -> bool {
        self.cell_count() > 1
    }

    /// Cells row by row, top to bottom, left to right
    pub fn rows_of_cells(&self) -> Vec<Vec<CellRef>> {
        let (r0, r1) = self.rows();
        let (c0, c1) = self.cols();
        (r0..=r1)
            .map(|r| (c0..=c1).map(|c| CellRef::new(row_ref(r), c)).collect())
            .collect()
    }
}
