//! Uncommitted cell text

/// Draft for one cell: the text being typed and the committed value it
/// started from. The caret is a char index into `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEditor {
    original: String,
    text: String,
    caret: usize,
}

impl CellEditor {
    /// Start editing with the caret after the last character
    pub fn new(value: &str) -> Self {
        Self {
            original: value.to_string(),
            text: value.to_string(),
            caret: value.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Whether the draft differs from the committed value
    pub fn is_modified(&self) -> bool {
        self.text != self.original
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Insert at the caret; line breaks become spaces since a cell is one line
    pub fn insert_char(&mut self, ch: char) {
        let ch = if ch == '\n' || ch == '\r' { ' ' } else { ch };
        let at = self.byte_at(self.caret);
        self.text.insert(at, ch);
        self.caret += 1;
    }

    /// Insert pasted text, collapsing CRLF, CR and LF to single spaces
    pub fn insert_text(&mut self, text: &str) {
        let flat = text.replace("\r\n", " ").replace(&['\r', '\n'][..], " ");
        let at = self.byte_at(self.caret);
        self.text.insert_str(at, &flat);
        self.caret += flat.chars().count();
    }

    pub fn delete_backward(&mut self) {
        if self.caret == 0 {
            return;
        }
        let at = self.byte_at(self.caret - 1);
        self.text.remove(at);
        self.caret -= 1;
    }

    pub fn delete_forward(&mut self) {
        if self.caret >= self.char_len() {
            return;
        }
        let at = self.byte_at(self.caret);
        self.text.remove(at);
    }

    pub fn caret_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn caret_right(&mut self) {
        self.caret = (self.caret + 1).min(self.char_len());
    }

    pub fn caret_home(&mut self) {
        self.caret = 0;
    }

    pub fn caret_end(&mut self) {
        self.caret = self.char_len();
    }

    /// Drop typed changes and put the caret back at the end
    pub fn revert(&mut self) {
        self.text = self.original.clone();
        self.caret = self.char_len();
    }
}
