//! Key controller for focused table cells
//!
//! Every key press re-resolves the focused table from the buffer, looks the
//! keystroke up in the keymap and reports whether it was handled. A declined
//! key belongs to the host editor; when it was declined from inside a cell,
//! focus is first moved to the text surface at the table's edge.

use crate::commands::Cmd;
use crate::config::EdgePolicy;
use crate::keymap::{Command, Keystroke};
use crate::messages::{CellInput, TableMsg};
use crate::model::{AppModel, Focus, HostBuffer};
use crate::table::{block_at, CellRef, RowRef, TableBlock, TableOp};
use crate::widget::WidgetId;

use super::table::{commit_widget, focused_cell, set_focus, update_table};

/// Result of offering a keystroke to the table subsystem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// True suppresses the host's own handling of the key
    pub handled: bool,
    pub cmd: Option<Cmd>,
}

impl KeyOutcome {
    fn handled(cmd: Option<Cmd>) -> Self {
        Self { handled: true, cmd }
    }

    fn declined() -> Self {
        Self::default()
    }
}

/// Which side of the table focus leaves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Before,
    After,
}

/// Offer a keystroke to the focused table
pub fn handle_key(model: &mut AppModel, keystroke: Keystroke) -> KeyOutcome {
    let Some((widget, focused)) = focused_cell(model) else {
        return KeyOutcome::declined();
    };
    let Some(origin) = model.decorations.widget(widget).map(|w| w.block.from) else {
        return KeyOutcome::declined();
    };
    let Some(block) = block_at(&model.document.text(), origin) else {
        tracing::debug!(origin, "Focused table no longer in buffer, declining key");
        return KeyOutcome::declined();
    };
    let cell = block.clamp(focused);

    let context = model.key_context();
    let Some(command) = model.keymap.lookup(keystroke, &context) else {
        return match keystroke.key.typed_char(keystroke.mods) {
            Some(ch) => KeyOutcome::handled(update_table(
                model,
                TableMsg::Input(CellInput::InsertChar(ch)),
            )),
            None => KeyOutcome::declined(),
        };
    };

    run_command(model, command, widget, cell, &block)
}

fn run_command(
    model: &mut AppModel,
    command: Command,
    widget: WidgetId,
    cell: CellRef,
    block: &TableBlock,
) -> KeyOutcome {
    let cols = block.column_count();
    let rows = block.row_count();

    match command {
        Command::CellLeft => {
            if cell.col == 0 {
                return exit_table(model, block, Exit::Before);
            }
            move_to(model, widget, CellRef::new(cell.row, cell.col - 1))
        }
        Command::CellRight => {
            if cell.col + 1 >= cols {
                return exit_table(model, block, Exit::After);
            }
            move_to(model, widget, CellRef::new(cell.row, cell.col + 1))
        }
        Command::CellUp => match row_above(cell.row) {
            Some(row) => move_to(model, widget, CellRef::new(row, cell.col)),
            None => vertical_edge(model, block, Exit::Before),
        },
        Command::CellDown => match row_below(cell.row, rows) {
            Some(row) => move_to(model, widget, CellRef::new(row, cell.col)),
            None => vertical_edge(model, block, Exit::After),
        },

        Command::NextCell => {
            if cell.col + 1 < cols {
                return move_to(model, widget, CellRef::new(cell.row, cell.col + 1));
            }
            match row_below(cell.row, rows) {
                Some(row) => move_to(model, widget, CellRef::new(row, 0)),
                None => {
                    commit_widget(
                        model,
                        widget,
                        Some(TableOp::AppendRow),
                        Some(CellRef::body(rows, 0)),
                    );
                    KeyOutcome::handled(Some(Cmd::Redraw))
                }
            }
        }
        Command::PrevCell => {
            if cell.col > 0 {
                return move_to(model, widget, CellRef::new(cell.row, cell.col - 1));
            }
            match row_above(cell.row) {
                Some(row) => move_to(model, widget, CellRef::new(row, cols.saturating_sub(1))),
                None => exit_table(model, block, Exit::Before),
            }
        }

        Command::CommitCell => {
            match row_below(cell.row, rows) {
                Some(row) => {
                    commit_widget(model, widget, None, Some(CellRef::new(row, cell.col)));
                }
                None => {
                    commit_widget(
                        model,
                        widget,
                        Some(TableOp::AppendRow),
                        Some(CellRef::body(rows, cell.col)),
                    );
                }
            }
            KeyOutcome::handled(Some(Cmd::Redraw))
        }
        Command::CancelEdit => KeyOutcome::handled(update_table(model, TableMsg::CancelEdit)),
        Command::DismissMenu => KeyOutcome::handled(update_table(model, TableMsg::DismissMenu)),
        Command::CopySelection => match update_table(model, TableMsg::CopySelection) {
            Some(cmd) => KeyOutcome::handled(Some(cmd)),
            None => KeyOutcome::declined(),
        },

        Command::DeleteBackward
        | Command::DeleteForward
        | Command::CaretHome
        | Command::CaretEnd => match command.cell_input() {
            Some(input) => KeyOutcome::handled(update_table(model, TableMsg::Input(input))),
            None => KeyOutcome::declined(),
        },

        Command::Unbound => KeyOutcome::declined(),
    }
}

/// Header is the top row
fn row_above(row: RowRef) -> Option<RowRef> {
    match row {
        RowRef::Header => None,
        RowRef::Body(0) => Some(RowRef::Header),
        RowRef::Body(r) => Some(RowRef::Body(r - 1)),
    }
}

fn row_below(row: RowRef, rows: usize) -> Option<RowRef> {
    let next = match row {
        RowRef::Header => 0,
        RowRef::Body(r) => r + 1,
    };
    (next < rows).then_some(RowRef::Body(next))
}

fn move_to(model: &mut AppModel, widget: WidgetId, cell: CellRef) -> KeyOutcome {
    set_focus(model, Focus::Cell { widget, cell });
    KeyOutcome::handled(Some(Cmd::Redraw))
}

fn vertical_edge(model: &mut AppModel, block: &TableBlock, exit: Exit) -> KeyOutcome {
    match model.config.vertical_edge {
        EdgePolicy::Exit => exit_table(model, block, exit),
        EdgePolicy::Clamp => KeyOutcome::handled(None),
    }
}

/// Hand the caret to the text surface at the table's edge; the blur commits
fn exit_table(model: &mut AppModel, block: &TableBlock, exit: Exit) -> KeyOutcome {
    let caret = match exit {
        Exit::Before => block.from,
        Exit::After => block.to,
    };
    set_focus(model, Focus::Text { caret });
    KeyOutcome {
        handled: false,
        cmd: Some(Cmd::Redraw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{KeyCode, Modifiers};

    const TABLE: &str = "intro\n\n| A | B |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n\noutro";

    fn focused(text: &str, cell: CellRef) -> AppModel {
        let mut model = AppModel::with_text(text);
        let widget = model.decorations.widgets()[0].id;
        update_table(&mut model, TableMsg::FocusCell { widget, cell });
        model
    }

    fn press(model: &mut AppModel, key: KeyCode) -> KeyOutcome {
        handle_key(model, Keystroke::key(key))
    }

    #[test]
    fn test_declines_outside_table() {
        let mut model = AppModel::with_text(TABLE);
        let outcome = press(&mut model, KeyCode::Tab);
        assert!(!outcome.handled);
        assert_eq!(model.focus, Focus::Text { caret: 0 });
    }

    #[test]
    fn test_left_at_first_column_exits_before() {
        let mut model = focused(TABLE, CellRef::body(0, 1));
        assert!(press(&mut model, KeyCode::Left).handled);
        assert_eq!(model.focus.cell(), Some(CellRef::body(0, 0)));

        let outcome = press(&mut model, KeyCode::Left);
        assert!(!outcome.handled);
        assert_eq!(model.focus, Focus::Text { caret: 7 });
    }

    #[test]
    fn test_right_at_last_column_exits_after() {
        let mut model = focused(TABLE, CellRef::header(1));
        let to = model.decorations.widgets()[0].block.to;
        assert!(!press(&mut model, KeyCode::Right).handled);
        assert_eq!(model.focus, Focus::Text { caret: to });
    }

    #[test]
    fn test_vertical_moves_through_header() {
        let mut model = focused(TABLE, CellRef::body(0, 1));
        assert!(press(&mut model, KeyCode::Up).handled);
        assert_eq!(model.focus.cell(), Some(CellRef::header(1)));
        assert!(press(&mut model, KeyCode::Down).handled);
        assert!(press(&mut model, KeyCode::Down).handled);
        assert_eq!(model.focus.cell(), Some(CellRef::body(1, 1)));
    }

    #[test]
    fn test_vertical_edge_policy() {
        let mut model = focused(TABLE, CellRef::body(1, 0));
        model.config.vertical_edge = EdgePolicy::Clamp;
        assert!(press(&mut model, KeyCode::Down).handled);
        assert_eq!(model.focus.cell(), Some(CellRef::body(1, 0)));

        model.config.vertical_edge = EdgePolicy::Exit;
        assert!(!press(&mut model, KeyCode::Down).handled);
        assert!(!model.focus.is_in_table());
    }

    #[test]
    fn test_moves_inside_widget_do_not_commit() {
        let mut model = focused(TABLE, CellRef::body(0, 0));
        handle_key(&mut model, Keystroke::char('x'));
        press(&mut model, KeyCode::Right);
        assert_eq!(model.document.revision(), 0);
        assert_eq!(
            model.focused_widget().map(|w| w.display_text(CellRef::body(0, 0))),
            Some("1x")
        );
    }

    #[test]
    fn test_shift_tab_at_start_declines() {
        let mut model = focused(TABLE, CellRef::body(0, 0));
        let shift_tab = Keystroke::new(KeyCode::Tab, Modifiers::SHIFT);
        assert!(handle_key(&mut model, shift_tab).handled);
        assert_eq!(model.focus.cell(), Some(CellRef::header(1)));
        handle_key(&mut model, shift_tab);
        assert!(!handle_key(&mut model, shift_tab).handled);
        assert_eq!(model.focus, Focus::Text { caret: 7 });
    }

    #[test]
    fn test_copy_declines_without_selection() {
        let mut model = focused(TABLE, CellRef::body(0, 0));
        let copy = Keystroke::new(KeyCode::Char('c'), Modifiers::cmd());
        let outcome = handle_key(&mut model, copy);
        assert!(!outcome.handled);
        assert!(model.focus.is_in_table());
    }
}
