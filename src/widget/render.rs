//! Box-drawing rendering of a table widget

use unicode_width::UnicodeWidthStr;

use crate::table::Align;

/// Narrowest a column is drawn, matching the `---` delimiter marker
pub const MIN_COLUMN_WIDTH: usize = 3;

/// View state of one cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellView {
    /// Draft text when one exists, otherwise the committed text
    pub text: String,
    pub focused: bool,
    pub selected: bool,
    /// Caret char index while the cell has focus
    pub caret: Option<usize>,
}

/// Everything a front end needs to draw one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridView {
    /// Display width per column
    pub widths: Vec<usize>,
    pub aligns: Vec<Align>,
    /// Header row first
    pub rows: Vec<Vec<CellView>>,
}

impl GridView {
    pub fn new(aligns: Vec<Align>, rows: Vec<Vec<CellView>>) -> Self {
        let mut widths = vec![MIN_COLUMN_WIDTH; aligns.len()];
        for row in &rows {
            for (col, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(col) {
                    *width = (*width).max(cell.text.width());
                }
            }
        }
        Self {
            widths,
            aligns,
            rows,
        }
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let gap = width.saturating_sub(text.width());
    let (left, right) = match align {
        Align::Right => (gap, 0),
        Align::Center => (gap / 2, gap - gap / 2),
        Align::Left | Align::None => (0, gap),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push(mid);
        }
        line.push_str(&"─".repeat(width + 2));
    }
    line.push(right);
    line
}

fn row_line(grid: &GridView, row: &[CellView]) -> String {
    let mut line = String::from("│");
    for (col, width) in grid.widths.iter().enumerate() {
        let cell = row.get(col);
        let text = cell.map(|c| c.text.as_str()).unwrap_or("");
        let (open, close) = match cell {
            Some(c) if c.focused => ('[', ']'),
            Some(c) if c.selected => (' ', '*'),
            _ => (' ', ' '),
        };
        let align = grid.aligns.get(col).copied().unwrap_or_default();
        line.push(open);
        line.push_str(&pad(text, *width, align));
        line.push(close);
        line.push('│');
    }
    line
}

/// Draw the grid; the header is separated from the body by a rule
pub fn render_grid(grid: &GridView) -> Vec<String> {
    let mut lines = Vec::with_capacity(grid.rows.len() + 3);
    lines.push(border(&grid.widths, '┌', '┬', '┐'));
    for (i, row) in grid.rows.iter().enumerate() {
        lines.push(row_line(grid, row));
        if i == 0 {
            lines.push(border(&grid.widths, '├', '┼', '┤'));
        }
    }
    lines.push(border(&grid.widths, '└', '┴', '┘'));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str) -> CellView {
        CellView {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_basic_grid() {
        let grid = GridView::new(
            vec![Align::None, Align::Right],
            vec![vec![cell("A"), cell("Total")], vec![cell("apple"), cell("3")]],
        );
        assert_eq!(grid.widths, vec![5, 5]);
        assert_eq!(
            render_grid(&grid),
            vec![
                "┌───────┬───────┐",
                "│ A     │ Total │",
                "├───────┼───────┤",
                "│ apple │     3 │",
                "└───────┴───────┘",
            ]
        );
    }

    #[test]
    fn test_focus_and_selection_markers() {
        let mut focused = cell("x");
        focused.focused = true;
        let mut selected = cell("y");
        selected.selected = true;
        let grid = GridView::new(vec![Align::Center, Align::None], vec![vec![focused, selected]]);
        assert_eq!(render_grid(&grid)[1], "│[ x ]│ y  *│");
    }

    #[test]
    fn test_wide_characters_use_display_width() {
        let grid = GridView::new(vec![Align::None], vec![vec![cell("日本語")]]);
        assert_eq!(grid.widths, vec![6]);
        assert_eq!(render_grid(&grid)[1], "│ 日本語 │");
    }

    #[test]
    fn test_short_rows_render_empty_cells() {
        let grid = GridView::new(
            vec![Align::None, Align::None],
            vec![vec![cell("a"), cell("b")], vec![cell("1")]],
        );
        assert_eq!(render_grid(&grid)[3], "│ 1   │     │");
    }
}
