//! Canonical markdown output for table blocks

use super::model::{CellRef, TableBlock};

/// Collapse line breaks to spaces and escape pipes
pub fn escape_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            '|' => out.push_str("\\|"),
            _ => out.push(c),
        }
    }
    out
}

fn row_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        line.push_str(&escape_cell(cell));
        line.push_str(" |");
    }
    line
}

/// Serialize with `\n` line separators
pub fn serialize(block: &TableBlock) -> String {
    serialize_with(block, "\n")
}

/// Serialize joining lines with `separator`, no trailing separator
///
/// Every line is padded to the block's column count. `from`/`to` are ignored.
pub fn serialize_with(block: &TableBlock, separator: &str) -> String {
    let cols = block.column_count();
    let mut lines = Vec::with_capacity(block.rows.len() + 2);

    lines.push(row_line(
        (0..cols).map(|c| block.cell(CellRef::header(c))),
    ));
    lines.push(row_line((0..cols).map(|c| block.align(c).marker())));
    for r in 0..block.rows.len() {
        lines.push(row_line((0..cols).map(|c| block.cell(CellRef::body(r, c)))));
    }

    lines.join(separator)
}

/// Tab-separated rendering of a cell grid for the clipboard
///
/// Quotes only fields that need it; records end with `\n` and the final
/// terminator is dropped.
pub fn to_tsv(rows: &[Vec<String>]) -> String {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    for row in rows {
        if let Err(e) = writer.write_record(row) {
            tracing::warn!("Failed to encode TSV record: {}", e);
            return String::new();
        }
    }

    let bytes = match writer.into_inner() {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to flush TSV writer: {}", e);
            return String::new();
        }
    };
    let mut out = String::from_utf8_lossy(&bytes).into_owned();
    if out.ends_with('\n') {
        out.pop();
    }
    out
}
