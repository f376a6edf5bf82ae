//! Pipe-table detection
//!
//! Line-oriented scan. A table starts at a line holding an unescaped pipe
//! whose next line is a delimiter line; body rows follow until a blank line,
//! a line without a pipe, a fence line, or the end of the buffer. Lines inside
//! fenced code blocks are never considered.

use super::model::{Align, TableBlock};

/// A buffer line and the char offset of its first character
///
/// `text` excludes the line break and any trailing `\r`.
struct Line<'a> {
    start: usize,
    text: &'a str,
}

impl Line<'_> {
    fn end(&self) -> usize {
        self.start + self.text.chars().count()
    }
}

fn lines(text: &str) -> Vec<Line<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    for raw in text.split('\n') {
        let len = raw.chars().count();
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        out.push(Line { start, text });
        start += len + 1;
    }
    out
}

/// Opening fence marker: char and run length
///
/// Up to three spaces of indentation, then three or more backticks or tildes.
fn fence_marker(line: &str) -> Option<(char, usize)> {
    let indent = line.chars().take_while(|&c| c == ' ').count();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let marker = rest.chars().next().filter(|&c| c == '`' || c == '~')?;
    let run = rest.chars().take_while(|&c| c == marker).count();
    (run >= 3).then_some((marker, run))
}

fn closes_fence(line: &str, open: (char, usize)) -> bool {
    match fence_marker(line) {
        Some((marker, run)) if marker == open.0 && run >= open.1 => {
            let indent = line.chars().take_while(|&c| c == ' ').count();
            line[indent..]
                .trim_start_matches(marker)
                .trim()
                .is_empty()
        }
        _ => false,
    }
}

/// Whether the line holds a pipe not directly preceded by a backslash
fn has_unescaped_pipe(line: &str) -> bool {
    let mut prev = None;
    for c in line.chars() {
        if c == '|' && prev != Some('\\') {
            return true;
        }
        prev = Some(c);
    }
    false
}

/// Split a row line into trimmed cell texts
///
/// Outer pipes are stripped when present; a pipe directly after a backslash
/// is literal and never separates cells.
pub fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                current.push('|');
            }
            '|' => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    // A trailing unescaped pipe closes the last cell rather than opening one
    let ends_with_pipe = ends_with_unescaped_pipe(inner);
    if !ends_with_pipe || !current.trim().is_empty() {
        cells.push(current);
    }

    cells.iter().map(|c| c.trim().to_string()).collect()
}

fn ends_with_unescaped_pipe(text: &str) -> bool {
    text.strip_suffix('|')
        .is_some_and(|body| !body.ends_with('\\'))
}

fn delimiter_token(token: &str) -> Option<Align> {
    let leading = token.starts_with(':');
    let trailing = token.len() > 1 && token.ends_with(':');
    let dashes = &token[usize::from(leading)..token.len() - usize::from(trailing)];
    let valid = dashes.len() >= 3 && dashes.chars().all(|c| c == '-');
    valid.then(|| Align::from_colons(leading, trailing))
}

/// Parse a delimiter line into per-column alignments
///
/// Every token must be 3+ hyphens with optional colons at either end. The
/// line must contain at least one pipe, otherwise it is a thematic break.
fn parse_delimiter_row(line: &str) -> Option<Vec<Align>> {
    if !line.contains('|') {
        return None;
    }
    let tokens = split_row(line);
    if tokens.is_empty() {
        return None;
    }
    tokens.iter().map(|t| delimiter_token(t)).collect()
}

fn is_body_row(line: &str) -> bool {
    !line.trim().is_empty() && has_unescaped_pipe(line) && fence_marker(line).is_none()
}

/// Scan the whole buffer for tables, ascending by `from`, non-overlapping
pub fn parse_tables(text: &str) -> Vec<TableBlock> {
    let lines = lines(text);
    let mut blocks = Vec::new();
    let mut fence: Option<(char, usize)> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].text;

        if let Some(open) = fence {
            if closes_fence(line, open) {
                fence = None;
            }
            i += 1;
            continue;
        }
        if let Some(open) = fence_marker(line) {
            fence = Some(open);
            i += 1;
            continue;
        }

        if let Some((block, last)) = table_starting_at(&lines, i) {
            blocks.push(block);
            i = last + 1;
        } else {
            i += 1;
        }
    }

    blocks
}

/// Try to read a table whose header is line `i`; returns it with the index
/// of the last consumed line.
fn table_starting_at(lines: &[Line<'_>], i: usize) -> Option<(TableBlock, usize)> {
    let header = lines.get(i)?;
    let delimiter = lines.get(i + 1)?;
    if !has_unescaped_pipe(header.text) || fence_marker(header.text).is_some() {
        return None;
    }
    let mut aligns = parse_delimiter_row(delimiter.text)?;
    let headers = split_row(header.text);
    aligns.resize(headers.len(), Align::None);

    let mut rows = Vec::new();
    let mut last = i + 1;
    while let Some(line) = lines.get(last + 1) {
        if !is_body_row(line.text) {
            break;
        }
        rows.push(split_row(line.text));
        last += 1;
    }

    let block = TableBlock {
        from: header.start,
        to: lines[last].end(),
        headers,
        aligns,
        rows,
    };
    Some((block, last))
}

/// Re-resolve the table whose header line starts exactly at `from`
pub fn block_at(text: &str, from: usize) -> Option<TableBlock> {
    parse_tables(text).into_iter().find(|b| b.from == from)
}

/// Table whose span contains the char offset `pos` (inclusive of `to`)
pub fn block_containing(text: &str, pos: usize) -> Option<TableBlock> {
    parse_tables(text)
        .into_iter()
        .find(|b| b.from <= pos && pos <= b.to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simple_table() {
        let text = "| A | B |\n|---|---|\n| 1 | 2 |";
        let blocks = parse_tables(text);
        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.from, 0);
        assert_eq!(block.to, text.chars().count());
        assert_eq!(block.headers, strings(&["A", "B"]));
        assert_eq!(block.aligns, vec![Align::None, Align::None]);
        assert_eq!(block.rows, vec![strings(&["1", "2"])]);
    }

    #[test]
    fn test_span_excludes_trailing_newline() {
        let text = "intro\n\n| A |\n| --- |\n| 1 |\n\nafter";
        let block = &parse_tables(text)[0];
        assert_eq!(block.from, 7);
        let span: String = text.chars().skip(block.from).take(block.to - block.from).collect();
        assert_eq!(span, "| A |\n| --- |\n| 1 |");
    }

    #[test]
    fn test_crlf_lines_exclude_carriage_return() {
        let text = "| A | B |\r\n|:---|---:|\r\n| 1 | 2 |\r\nrest";
        let block = &parse_tables(text)[0];
        assert_eq!(block.aligns, vec![Align::Left, Align::Right]);
        assert_eq!(block.to, "| A | B |\r\n|:---|---:|\r\n| 1 | 2 |".chars().count());
        assert_eq!(block.rows, vec![strings(&["1", "2"])]);
    }

    #[test]
    fn test_alignments_from_colons() {
        let text = "a | b | c | d\n:--- | ---: | :---: | ---";
        let block = &parse_tables(text)[0];
        assert_eq!(
            block.aligns,
            vec![Align::Left, Align::Right, Align::Center, Align::None]
        );
        assert!(block.rows.is_empty());
    }

    #[test]
    fn test_align_count_reconciled_to_headers() {
        let short = &parse_tables("| a | b | c |\n| :-: |")[0];
        assert_eq!(short.aligns, vec![Align::Center, Align::None, Align::None]);

        let long = &parse_tables("| a |\n| --- | ---: | --- |")[0];
        assert_eq!(long.aligns, vec![Align::None]);
    }

    #[test]
    fn test_invalid_delimiter_is_not_a_table() {
        assert!(parse_tables("| a | b |\n| -- | -- |\n| 1 | 2 |").is_empty());
        assert!(parse_tables("| a | b |\n| --- | x |").is_empty());
        assert!(parse_tables("a | b\n---").is_empty());
        assert!(parse_tables("| a | b |").is_empty());
    }

    #[test]
    fn test_escaped_pipe_stays_in_cell() {
        let block = &parse_tables("| a \\| b | c |\n| --- | --- |\n| x\\|y | z |")[0];
        assert_eq!(block.headers, strings(&["a | b", "c"]));
        assert_eq!(block.rows[0], strings(&["x|y", "z"]));
    }

    #[test]
    fn test_header_with_only_escaped_pipe_is_not_a_table() {
        assert!(parse_tables("a \\| b\n| --- |").is_empty());
    }

    #[test]
    fn test_split_row_variants() {
        assert_eq!(split_row("| a | b |"), strings(&["a", "b"]));
        assert_eq!(split_row("a | b"), strings(&["a", "b"]));
        assert_eq!(split_row("| a | |"), strings(&["a", ""]));
        assert_eq!(split_row("|a|b\\|"), strings(&["a", "b|"]));
        assert_eq!(split_row("| a \\\\| b |"), strings(&["a \\| b"]));
    }

    #[test]
    fn test_body_stops_at_blank_and_non_pipe_lines() {
        let text = "| a |\n| --- |\n| 1 |\n| 2 |\n\n| 3 |\nplain";
        let blocks = parse_tables(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rows.len(), 2);

        let text = "| a |\n| --- |\n| 1 |\nplain\n| 2 |";
        assert_eq!(parse_tables(text)[0].rows.len(), 1);
    }

    #[test]
    fn test_fenced_pipes_are_ignored() {
        let text = "```\n| a | b |\n| --- | --- |\n```\n\n~~~~md\n| x |\n|---|\n~~~\n| y |\n|---|\n~~~~";
        assert!(parse_tables(text).is_empty());
    }

    #[test]
    fn test_table_after_fence_closes() {
        let text = "```rust\nlet x = a | b;\n```\n| h |\n| --- |\n| v |";
        let blocks = parse_tables(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].headers, strings(&["h"]));
    }

    #[test]
    fn test_multiple_tables_ascending_and_disjoint() {
        let text = "| a |\n| --- |\n| 1 |\n\n| b | c |\n| --- | --- |\n\n| d |\n|---|\n| 2 |";
        let blocks = parse_tables(text);
        assert_eq!(blocks.len(), 3);
        for pair in blocks.windows(2) {
            assert!(pair[0].from < pair[0].to);
            assert!(pair[0].to < pair[1].from);
        }
    }

    #[test]
    fn test_adjacent_table_consumes_following_pipe_lines() {
        // A second header directly below a table is swallowed as body rows
        let text = "| a |\n| --- |\n| b |\n| --- |";
        let blocks = parse_tables(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rows.len(), 2);
    }

    #[test]
    fn test_block_at_and_containing() {
        let text = "x\n| a |\n| --- |\n| 1 |";
        assert!(block_at(text, 0).is_none());
        let block = block_at(text, 2).unwrap();
        assert_eq!(block.headers, strings(&["a"]));
        assert_eq!(block_containing(text, 8).unwrap().from, 2);
        assert!(block_containing(text, 0).is_none());
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let text = "héllo\n| ä | ö |\n| --- | --- |\n| ü | ß |";
        let block = &parse_tables(text)[0];
        assert_eq!(block.from, 6);
        assert_eq!(block.to, text.chars().count());
        assert_eq!(block.rows[0], strings(&["ü", "ß"]));
    }
}
