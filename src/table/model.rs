//! Table data model types

use serde::{Deserialize, Serialize};

/// Column alignment declared by the delimiter line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    None,
    Left,
    Right,
    Center,
}

impl Align {
    /// Alignment for a delimiter token given its colon flags
    pub fn from_colons(leading: bool, trailing: bool) -> Self {
        match (leading, trailing) {
            (true, true) => Align::Center,
            (true, false) => Align::Left,
            (false, true) => Align::Right,
            (false, false) => Align::None,
        }
    }

    /// Delimiter-line marker for this alignment
    pub fn marker(self) -> &'static str {
        match self {
            Align::None => "---",
            Align::Left => ":---",
            Align::Right => "---:",
            Align::Center => ":---:",
        }
    }

    /// Next alignment in the none → left → center → right cycle
    pub fn cycle(self) -> Self {
        match self {
            Align::None => Align::Left,
            Align::Left => Align::Center,
            Align::Center => Align::Right,
            Align::Right => Align::None,
        }
    }
}

/// Row coordinate inside a table: the header or a body row index
///
/// Ordering puts the header before every body row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowRef {
    Header,
    Body(usize),
}

impl RowRef {
    /// Body row index, `None` for the header
    pub fn body(self) -> Option<usize> {
        match self {
            RowRef::Header => None,
            RowRef::Body(row) => Some(row),
        }
    }

    pub fn is_header(self) -> bool {
        matches!(self, RowRef::Header)
    }
}

/// A cell coordinate inside a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: RowRef,
    pub col: usize,
}

impl CellRef {
    pub const fn new(row: RowRef, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn header(col: usize) -> Self {
        Self {
            row: RowRef::Header,
            col,
        }
    }

    pub const fn body(row: usize, col: usize) -> Self {
        Self {
            row: RowRef::Body(row),
            col,
        }
    }
}

/// One parsed pipe table and the buffer span it was parsed from
///
/// `from..to` covers the header line through the end of the last row line,
/// never including the trailing line separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableBlock {
    pub from: usize,
    pub to: usize,
    pub headers: Vec<String>,
    pub aligns: Vec<Align>,
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Build a detached block (span 0..0) from header and row texts
    pub fn new(headers: Vec<String>, aligns: Vec<Align>, rows: Vec<Vec<String>>) -> Self {
        Self {
            from: 0,
            to: 0,
            headers,
            aligns,
            rows,
        }
    }

    /// Effective column count: widest of headers, aligns and any row
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
            .max(self.aligns.len())
    }

    /// Number of body rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text, empty for cells past the end of a short row
    pub fn cell(&self, cell: CellRef) -> &str {
        let row = match cell.row {
            RowRef::Header => Some(&self.headers),
            RowRef::Body(r) => self.rows.get(r),
        };
        row.and_then(|cells| cells.get(cell.col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Alignment of a column, `None` past the declared alignments
    pub fn align(&self, col: usize) -> Align {
        self.aligns.get(col).copied().unwrap_or_default()
    }

    /// Whether a cell coordinate lies inside the table bounds
    pub fn contains(&self, cell: CellRef) -> bool {
        let row_ok = match cell.row {
            RowRef::Header => true,
            RowRef::Body(r) => r < self.rows.len(),
        };
        row_ok && cell.col < self.column_count()
    }

    /// Clamp a cell coordinate into the table bounds
    ///
    /// Body rows past the end land on the last row, or the header when there
    /// are no body rows.
    pub fn clamp(&self, cell: CellRef) -> CellRef {
        let col = cell.col.min(self.column_count().saturating_sub(1));
        let row = match cell.row {
            RowRef::Header => RowRef::Header,
            RowRef::Body(_) if self.rows.is_empty() => RowRef::Header,
            RowRef::Body(r) => RowRef::Body(r.min(self.rows.len() - 1)),
        };
        CellRef::new(row, col)
    }

    /// Rows in display order, header first
    pub fn row_refs(&self) -> impl Iterator<Item = RowRef> {
        std::iter::once(RowRef::Header).chain((0..self.rows.len()).map(RowRef::Body))
    }

    /// Copy with headers, aligns and every row padded to the column count
    pub fn normalized(&self) -> Self {
        let cols = self.column_count();
        let pad = |cells: &Vec<String>| {
            let mut cells = cells.clone();
            cells.resize(cols, String::new());
            cells
        };
        let mut aligns = self.aligns.clone();
        aligns.resize(cols, Align::None);
        Self {
            from: self.from,
            to: self.to,
            headers: pad(&self.headers),
            aligns,
            rows: self.rows.iter().map(pad).collect(),
        }
    }

    /// Pad in place to the column count
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Equality used to decide whether a rendered widget can be reused:
    /// same span and identical cell contents.
    pub fn same_snapshot(&self, other: &TableBlock) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.headers == other.headers
            && self.aligns == other.aligns
            && self.rows == other.rows
    }

    /// Structural equality ignoring the span
    pub fn same_content(&self, other: &TableBlock) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.headers == b.headers && a.aligns == b.aligns && a.rows == b.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn ragged() -> TableBlock {
        TableBlock::new(
            strings(&["a", "b", "c"]),
            vec![Align::Left],
            vec![strings(&["1", "2", "3", "4", "5"]), strings(&["x"])],
        )
    }

    #[test]
    fn test_column_count_takes_widest() {
        assert_eq!(ragged().column_count(), 5);

        let aligns_widest = TableBlock::new(strings(&["a"]), vec![Align::None; 4], vec![]);
        assert_eq!(aligns_widest.column_count(), 4);
    }

    #[test]
    fn test_cell_pads_missing_with_empty() {
        let block = ragged();
        assert_eq!(block.cell(CellRef::header(0)), "a");
        assert_eq!(block.cell(CellRef::header(4)), "");
        assert_eq!(block.cell(CellRef::body(0, 4)), "5");
        assert_eq!(block.cell(CellRef::body(1, 3)), "");
        assert_eq!(block.cell(CellRef::body(9, 0)), "");
    }

    #[test]
    fn test_normalized_pads_everything() {
        let block = ragged().normalized();
        assert_eq!(block.headers, strings(&["a", "b", "c", "", ""]));
        assert_eq!(block.aligns.len(), 5);
        assert_eq!(block.aligns[0], Align::Left);
        assert!(block.rows.iter().all(|r| r.len() == 5));
    }

    #[test]
    fn test_clamp_and_contains() {
        let block = ragged();
        assert!(block.contains(CellRef::body(1, 4)));
        assert!(!block.contains(CellRef::body(2, 0)));
        assert_eq!(block.clamp(CellRef::body(7, 9)), CellRef::body(1, 4));

        let empty = TableBlock::new(strings(&["a", "b"]), vec![], vec![]);
        assert_eq!(empty.clamp(CellRef::body(0, 1)), CellRef::header(1));
    }

    #[test]
    fn test_row_ref_ordering() {
        assert!(RowRef::Header < RowRef::Body(0));
        assert!(RowRef::Body(0) < RowRef::Body(1));
        let refs: Vec<_> = ragged().row_refs().collect();
        assert_eq!(refs, vec![RowRef::Header, RowRef::Body(0), RowRef::Body(1)]);
    }

    #[test]
    fn test_align_cycle_and_markers() {
        assert_eq!(Align::None.cycle(), Align::Left);
        assert_eq!(Align::Left.cycle(), Align::Center);
        assert_eq!(Align::Center.cycle(), Align::Right);
        assert_eq!(Align::Right.cycle(), Align::None);
        assert_eq!(Align::from_colons(true, true).marker(), ":---:");
        assert_eq!(Align::from_colons(false, true).marker(), "---:");
    }
}
