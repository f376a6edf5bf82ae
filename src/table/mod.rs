//! Markdown pipe-table model
//!
//! Detects GitHub-Flavored-Markdown pipe tables inside a text buffer and
//! converts them to and from a structured form.
//!
//! ```text
//! buffer text ──parse_tables()──▶ Vec<TableBlock> ──TableOp──▶ TableBlock'
//!      ▲                                                           │
//!      └──────────── replace_span(from, to, serialize(..)) ◀───────┘
//! ```
//!
//! Blocks are snapshots: they carry the `[from, to)` character span they were
//! parsed from and go stale as soon as the buffer changes.

mod model;
mod ops;
mod parser;
mod serializer;

pub use model::{Align, CellRef, RowRef, TableBlock};
pub use ops::TableOp;
pub use parser::{block_at, block_containing, parse_tables, split_row};
pub use serializer::{escape_cell, serialize, serialize_with, to_tsv};
