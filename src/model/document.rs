//! Document model - the text buffer and file state
//!
//! The buffer is the single source of truth. Tables only ever reach it
//! through [`HostBuffer::replace_span`].

use ropey::Rope;
use std::fmt;
use std::path::PathBuf;

/// Result of a successful span replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentChange {
    /// Buffer revision after the transaction
    pub revision: u64,
    /// False when the replacement text equalled the replaced span
    pub text_changed: bool,
}

/// An applied replace-span transaction
///
/// Carries enough to map offsets from before the edit to after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub from: usize,
    /// End of the replaced span, in pre-edit offsets
    pub to: usize,
    /// Char length of the inserted text
    pub inserted: usize,
    pub change: DocumentChange,
}

impl Transaction {
    /// Map a pre-edit char offset into the post-edit buffer
    ///
    /// Offsets before the span are unchanged, offsets after it shift by the
    /// length delta, offsets inside it collapse to the end of the insertion.
    pub fn map_offset(&self, pos: usize) -> usize {
        if pos <= self.from {
            pos
        } else if pos >= self.to {
            pos - (self.to - self.from) + self.inserted
        } else {
            self.from + self.inserted
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// `to` lies past the end of the buffer
    OutOfBounds { to: usize, len: usize },
    /// `from` lies after `to`
    InvertedSpan { from: usize, to: usize },
}

impl fmt::Display for TransactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionError::OutOfBounds { to, len } => {
                write!(f, "span end {} is past the buffer end {}", to, len)
            }
            TransactionError::InvertedSpan { from, to } => {
                write!(f, "span start {} is after span end {}", from, to)
            }
        }
    }
}

impl std::error::Error for TransactionError {}

/// What the table subsystem needs from the editor that owns the text
pub trait HostBuffer {
    /// Full buffer contents
    fn text(&self) -> String;
    /// Length in chars
    fn len_chars(&self) -> usize;
    /// `"\r\n"` when the first line break is CRLF, otherwise `"\n"`
    fn line_separator(&self) -> &'static str;
    /// Monotonic revision, bumped whenever the text changes
    fn revision(&self) -> u64;
    /// Replace the char span `[from, to)` atomically
    fn replace_span(
        &mut self,
        from: usize,
        to: usize,
        text: &str,
    ) -> Result<Transaction, TransactionError>;
}

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for buffers built in memory)
    pub file_path: Option<PathBuf>,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
    /// Document revision counter (incremented on each text change)
    pub revision: u64,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            file_path: None,
            is_modified: false,
            revision: 0,
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        Ok(Self {
            buffer: Rope::from(content),
            file_path: Some(path),
            is_modified: false,
            revision: 0,
        })
    }

    /// Write the buffer back to its file path
    pub fn save(&mut self) -> Result<(), std::io::Error> {
        let Some(path) = &self.file_path else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "document has no file path",
            ));
        };
        std::fs::write(path, self.buffer.to_string())?;
        self.is_modified = false;
        Ok(())
    }

    /// Get display name for the document
    pub fn display_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Get a line's content without its line break
    pub fn get_line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.buffer.len_lines() {
            return None;
        }
        let line = self.buffer.line(line_idx).to_string();
        Some(line.trim_end_matches(&['\n', '\r'][..]).to_string())
    }

    /// Convert a char offset to (line, column)
    pub fn offset_to_cursor(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.buffer.len_chars());
        let line = self.buffer.char_to_line(offset);
        (line, offset - self.buffer.line_to_char(line))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl HostBuffer for Document {
    fn text(&self) -> String {
        self.buffer.to_string()
    }

    fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    fn line_separator(&self) -> &'static str {
        for (i, c) in self.buffer.chars().enumerate() {
            if c == '\n' {
                let crlf = i > 0 && self.buffer.char(i - 1) == '\r';
                return if crlf { "\r\n" } else { "\n" };
            }
        }
        "\n"
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn replace_span(
        &mut self,
        from: usize,
        to: usize,
        text: &str,
    ) -> Result<Transaction, TransactionError> {
        let len = self.buffer.len_chars();
        if from > to {
            return Err(TransactionError::InvertedSpan { from, to });
        }
        if to > len {
            return Err(TransactionError::OutOfBounds { to, len });
        }

        let inserted = text.chars().count();
        let unchanged = to - from == inserted && self.buffer.slice(from..to) == text;
        if !unchanged {
            self.buffer.remove(from..to);
            self.buffer.insert(from, text);
            self.revision += 1;
            self.is_modified = true;
        }

        Ok(Transaction {
            from,
            to,
            inserted,
            change: DocumentChange {
                revision: self.revision,
                text_changed: !unchanged,
            },
        })
    }
}
