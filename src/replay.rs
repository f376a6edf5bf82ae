//! Scripted interaction replay
//!
//! A replay script is a YAML list of host events (clicks, typing, keys,
//! menu picks, drags, raw text edits) fed through the same update paths a
//! front end would use. The script ends with an implicit blur so pending
//! drafts are committed.
//!
//! ```yaml
//! events:
//!   - focus: { table: 0, row: 0, col: 1 }
//!   - key: "backspace"
//!   - type: "99"
//!   - key: "enter"
//!   - menu: { table: 0, col: 0, action: insert_column_left }
//!   - drag: { from: { col: 0 }, to: { row: 1, col: 1 } }
//!   - key: "cmd+c"
//! ```
//!
//! A cell without `row` is the header cell.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::clipboard::{run_clipboard_writes, ClipboardSink};
use crate::keymap::{parse_key_string, KeymapError, Keystroke};
use crate::messages::{CellInput, DocumentMsg, Msg, TableMsg};
use crate::model::{AppModel, Focus};
use crate::table::{CellRef, RowRef};
use crate::update::{handle_key, update};
use crate::widget::{MenuAction, WidgetId};

/// A cell in the n-th table of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CellSpec {
    #[serde(default)]
    pub table: usize,
    /// Body row index; omitted for the header
    #[serde(default)]
    pub row: Option<usize>,
    pub col: usize,
}

impl CellSpec {
    pub fn cell(&self) -> CellRef {
        let row = match self.row {
            Some(r) => RowRef::Body(r),
            None => RowRef::Header,
        };
        CellRef::new(row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayEvent {
    /// Click on a cell
    Focus(CellSpec),
    /// Click into the surrounding text
    Text { caret: usize },
    /// Focus leaves the editor
    Blur,
    /// Type characters at the current focus
    Type(String),
    /// A single keystroke, e.g. `shift+tab`
    Key(String),
    /// Paste into the focused cell
    Paste(String),
    /// Right-click a cell and pick a menu item
    Menu {
        #[serde(default)]
        table: usize,
        #[serde(default)]
        row: Option<usize>,
        col: usize,
        action: MenuAction,
    },
    /// Mouse-down on `from`, drag to `to`, release
    Drag { from: CellSpec, to: CellSpec },
    /// Copy the active selection
    Copy,
    /// Replace a char span of the document directly
    Edit {
        from: usize,
        to: usize,
        #[serde(default)]
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplayScript {
    pub events: Vec<ReplayEvent>,
}

#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    /// Event refers to a table index the document doesn't have
    NoTable { event: usize, table: usize },
    Key { event: usize, error: KeymapError },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Io(e) => write!(f, "Failed to read replay script: {}", e),
            ReplayError::Parse(e) => write!(f, "Failed to parse replay script: {}", e),
            ReplayError::NoTable { event, table } => {
                write!(f, "Event {}: document has no table #{}", event, table)
            }
            ReplayError::Key { event, error } => write!(f, "Event {}: {}", event, error),
        }
    }
}

impl std::error::Error for ReplayError {}

impl ReplayScript {
    pub fn from_yaml(yaml: &str) -> Result<Self, ReplayError> {
        serde_yaml::from_str(yaml).map_err(ReplayError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let content = std::fs::read_to_string(path).map_err(ReplayError::Io)?;
        Self::from_yaml(&content)
    }
}

/// Counters reported after a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    pub keys_handled: usize,
    pub keys_declined: usize,
}

/// Run every event of `script` against `model`
pub fn run_script(
    model: &mut AppModel,
    script: &ReplayScript,
    clipboard: &mut impl ClipboardSink,
) -> Result<ReplayStats, ReplayError> {
    let mut stats = ReplayStats::default();

    for (index, event) in script.events.iter().enumerate() {
        tracing::debug!(index, ?event, "Replaying event");
        match event {
            ReplayEvent::Focus(target) => {
                let widget = widget_for(model, index, target.table)?;
                dispatch(model, clipboard, TableMsg::FocusCell {
                    widget,
                    cell: target.cell(),
                });
            }
            ReplayEvent::Text { caret } => {
                dispatch(model, clipboard, TableMsg::FocusText { caret: *caret });
            }
            ReplayEvent::Blur => dispatch(model, clipboard, TableMsg::BlurAll),
            ReplayEvent::Type(text) => {
                for ch in text.chars() {
                    type_char(model, clipboard, ch, &mut stats);
                }
            }
            ReplayEvent::Key(key) => {
                let keystroke = parse_key_string(key).map_err(|error| ReplayError::Key {
                    event: index,
                    error,
                })?;
                press(model, clipboard, keystroke, &mut stats);
            }
            ReplayEvent::Paste(text) => {
                dispatch(
                    model,
                    clipboard,
                    TableMsg::Input(CellInput::InsertText(text.clone())),
                );
            }
            ReplayEvent::Menu {
                table,
                row,
                col,
                action,
            } => {
                let widget = widget_for(model, index, *table)?;
                let target = CellSpec {
                    table: *table,
                    row: *row,
                    col: *col,
                };
                dispatch(model, clipboard, TableMsg::OpenContextMenu {
                    widget,
                    cell: target.cell(),
                });
                dispatch(model, clipboard, TableMsg::MenuSelect(*action));
            }
            ReplayEvent::Drag { from, to } => {
                let widget = widget_for(model, index, from.table)?;
                dispatch(model, clipboard, TableMsg::SelectionStart {
                    widget,
                    cell: from.cell(),
                });
                dispatch(model, clipboard, TableMsg::SelectionExtend { cell: to.cell() });
                dispatch(model, clipboard, TableMsg::SelectionEnd);
            }
            ReplayEvent::Copy => dispatch(model, clipboard, TableMsg::CopySelection),
            ReplayEvent::Edit { from, to, text } => {
                dispatch(model, clipboard, DocumentMsg::Replace {
                    from: *from,
                    to: *to,
                    text: text.clone(),
                });
            }
        }
        stats.events += 1;
    }

    dispatch(model, clipboard, TableMsg::BlurAll);
    Ok(stats)
}

fn widget_for(model: &AppModel, event: usize, table: usize) -> Result<WidgetId, ReplayError> {
    model
        .decorations
        .widgets()
        .get(table)
        .map(|w| w.id)
        .ok_or(ReplayError::NoTable { event, table })
}

fn dispatch(model: &mut AppModel, clipboard: &mut impl ClipboardSink, msg: impl Into<Msg>) {
    if let Some(cmd) = update(model, msg.into()) {
        run_clipboard_writes(clipboard, &cmd);
    }
}

fn press(
    model: &mut AppModel,
    clipboard: &mut impl ClipboardSink,
    keystroke: Keystroke,
    stats: &mut ReplayStats,
) -> bool {
    let outcome = handle_key(model, keystroke);
    if outcome.handled {
        stats.keys_handled += 1;
    } else {
        stats.keys_declined += 1;
    }
    if let Some(cmd) = outcome.cmd.as_ref() {
        run_clipboard_writes(clipboard, cmd);
    }
    outcome.handled
}

/// Typing goes to the focused cell, or to the text surface at the caret
fn type_char(
    model: &mut AppModel,
    clipboard: &mut impl ClipboardSink,
    ch: char,
    stats: &mut ReplayStats,
) {
    if model.focus.is_in_table() && press(model, clipboard, Keystroke::char(ch), stats) {
        return;
    }
    if let Focus::Text { caret } = model.focus {
        let inserted = update(
            model,
            Msg::Document(DocumentMsg::Insert {
                at: caret,
                text: ch.to_string(),
            }),
        );
        if inserted.is_some() {
            model.focus = Focus::Text { caret: caret + 1 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::model::HostBuffer;

    #[test]
    fn test_parse_script() {
        let script = ReplayScript::from_yaml(
            "events:\n  - focus: { row: 0, col: 1 }\n  - type: \"9\"\n  - key: \"enter\"\n  - menu: { col: 0, action: delete_column }\n  - blur\n",
        )
        .unwrap();
        assert_eq!(script.events.len(), 5);
        assert_eq!(
            script.events[0],
            ReplayEvent::Focus(CellSpec {
                table: 0,
                row: Some(0),
                col: 1
            })
        );
        assert!(matches!(
            script.events[3],
            ReplayEvent::Menu {
                row: None,
                action: MenuAction::DeleteColumn,
                ..
            }
        ));
        assert_eq!(script.events[4], ReplayEvent::Blur);
    }

    #[test]
    fn test_replay_edit_and_copy() {
        let mut model = AppModel::with_text("| A | B |\n|---|---|\n| 1 | 2 |");
        let script = ReplayScript::from_yaml(
            "events:\n  - focus: { row: 0, col: 1 }\n  - key: \"backspace\"\n  - type: \"99\"\n  - key: \"enter\"\n  - drag: { from: { col: 0 }, to: { row: 0, col: 1 } }\n  - key: \"cmd+c\"\n",
        )
        .unwrap();
        let mut clipboard = MemoryClipboard::default();
        let stats = run_script(&mut model, &script, &mut clipboard).unwrap();

        assert_eq!(stats.events, 6);
        assert_eq!(
            model.document.text(),
            "| A | B |\n| --- | --- |\n| 1 | 99 |\n|  |  |"
        );
        assert_eq!(clipboard.last(), Some("A\tB\n1\t99"));
    }

    #[test]
    fn test_typing_in_text_surface() {
        let mut model = AppModel::with_text("ac");
        let script = ReplayScript::from_yaml("events:\n  - text: { caret: 1 }\n  - type: \"b\"\n")
            .unwrap();
        run_script(&mut model, &script, &mut MemoryClipboard::default()).unwrap();
        assert_eq!(model.document.text(), "abc");
    }

    #[test]
    fn test_unknown_table_is_an_error() {
        let mut model = AppModel::with_text("no tables");
        let script = ReplayScript::from_yaml("events:\n  - focus: { col: 0 }\n").unwrap();
        let err = run_script(&mut model, &script, &mut MemoryClipboard::default()).unwrap_err();
        assert!(matches!(err, ReplayError::NoTable { event: 0, table: 0 }));
    }
}
