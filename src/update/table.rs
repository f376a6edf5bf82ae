//! Table widget update functions
//!
//! Handles TableMsg: focus changes, draft editing, the context menu, drag
//! selection and the commit procedure that turns drafts and structural ops
//! into one buffer transaction.

use crate::commands::Cmd;
use crate::messages::{CellInput, TableMsg};
use crate::model::{AppModel, Focus, FocusRequest, HostBuffer};
use crate::table::{block_at, serialize_with, CellRef, TableOp};
use crate::widget::{MenuAction, WidgetId};

/// Result of a commit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A transaction replaced the table's span
    Applied,
    /// Nothing changed, no transaction was issued
    Unchanged,
    /// The table could no longer be found in the buffer
    Abandoned,
}

/// Handle table widget messages
pub fn update_table(model: &mut AppModel, msg: TableMsg) -> Option<Cmd> {
    match msg {
        TableMsg::FocusCell { widget, cell } => focus_cell(model, widget, cell),
        TableMsg::FocusText { caret } => {
            let caret = caret.min(model.document.len_chars());
            set_focus(model, Focus::Text { caret });
            Some(Cmd::Redraw)
        }
        TableMsg::BlurAll => {
            set_focus(model, Focus::None);
            Some(Cmd::Redraw)
        }

        TableMsg::Input(input) => edit_cell(model, input),
        TableMsg::Commit => {
            let (widget, cell) = focused_cell(model)?;
            commit_widget(model, widget, None, Some(cell));
            Some(Cmd::Redraw)
        }
        TableMsg::CancelEdit => {
            let (_, cell) = focused_cell(model)?;
            model.focused_widget_mut()?.revert(cell);
            Some(Cmd::Redraw)
        }

        TableMsg::OpenContextMenu { widget, cell } => {
            focus_cell(model, widget, cell)?;
            let cell = model.focus.cell()?;
            model.focused_widget_mut()?.open_menu(cell);
            Some(Cmd::Redraw)
        }
        TableMsg::MenuSelect(action) => menu_select(model, action),
        TableMsg::DismissMenu => {
            model.focused_widget_mut()?.close_menu();
            Some(Cmd::Redraw)
        }

        TableMsg::SelectionStart { widget, cell } => {
            focus_cell(model, widget, cell)?;
            let cell = model.focus.cell()?;
            model.focused_widget_mut()?.begin_selection(cell);
            Some(Cmd::Redraw)
        }
        TableMsg::SelectionExtend { cell } => {
            model.focused_widget_mut()?.extend_selection(cell);
            Some(Cmd::Redraw)
        }
        TableMsg::SelectionEnd => {
            model.focused_widget_mut()?.end_selection();
            Some(Cmd::Redraw)
        }
        TableMsg::CopySelection => {
            let tsv = model.focused_widget()?.selection_tsv()?;
            Some(Cmd::WriteClipboard(tsv))
        }
    }
}

pub(crate) fn focused_cell(model: &AppModel) -> Option<(WidgetId, CellRef)> {
    match model.focus {
        Focus::Cell { widget, cell } => Some((widget, cell)),
        _ => None,
    }
}

fn focus_cell(model: &mut AppModel, widget: WidgetId, cell: CellRef) -> Option<Cmd> {
    let cell = model.decorations.widget(widget)?.block.clamp(cell);
    set_focus(model, Focus::Cell { widget, cell });
    Some(Cmd::Redraw)
}

/// Move focus, committing the previous widget when focus leaves it
///
/// Moving between cells of the same widget never commits. Any focus change
/// dismisses the previous widget's context menu.
pub(crate) fn set_focus(model: &mut AppModel, next: Focus) {
    let previous = model.focus;
    if let Some(widget) = model.focused_widget_mut() {
        widget.close_menu();
    }

    model.focus = next;
    if let Focus::Cell { widget, cell } = next {
        if let Some(widget) = model.decorations.widget_mut(widget) {
            widget.open_editor(cell);
        }
    }

    if previous.leaves_widget(&next) {
        if let Some(id) = previous.widget() {
            commit_widget(model, id, None, None);
            if let Some(widget) = model.decorations.widget_mut(id) {
                widget.clear_drafts();
            }
        }
    }
}

/// Fold a widget's dirty drafts and an optional structural op into one
/// transaction over the table's current span
///
/// The block is re-resolved from the buffer at the widget's origin first;
/// if it is gone the commit is abandoned without touching the buffer.
/// `focus_after` is restored once the replacement widget is mounted.
pub(crate) fn commit_widget(
    model: &mut AppModel,
    widget: WidgetId,
    structural: Option<TableOp>,
    focus_after: Option<CellRef>,
) -> CommitOutcome {
    let Some(origin) = model.decorations.widget(widget).map(|w| w.block.from) else {
        tracing::debug!(?widget, "Commit for unknown widget ignored");
        return CommitOutcome::Abandoned;
    };
    let mut ops = model
        .decorations
        .widget(widget)
        .map(|w| w.dirty_ops())
        .unwrap_or_default();
    ops.extend(structural);

    let Some(block) = block_at(&model.document.text(), origin) else {
        tracing::debug!(origin, "Table no longer at its origin, abandoning commit");
        return CommitOutcome::Abandoned;
    };

    let mut updated = block.clone();
    if !updated.apply_all(&ops) {
        if let Some(widget) = model.decorations.widget_mut(widget) {
            widget.clear_drafts();
        }
        if let Some(cell) = focus_after {
            let request = FocusRequest { origin, cell };
            model.focus = model
                .decorations
                .resolve_focus(&request)
                .unwrap_or(Focus::None);
            if let Focus::Cell { widget, cell } = model.focus {
                if let Some(widget) = model.decorations.widget_mut(widget) {
                    widget.open_editor(cell);
                }
            }
        }
        return CommitOutcome::Unchanged;
    }

    let text = serialize_with(&updated, model.document.line_separator());
    let request = focus_after.map(|cell| FocusRequest {
        origin: block.from,
        cell,
    });
    match model.dispatch_transaction(block.from, block.to, &text, request) {
        Ok(change) => {
            tracing::debug!(
                origin = block.from,
                ops = ops.len(),
                revision = change.revision,
                "Committed table edit"
            );
            CommitOutcome::Applied
        }
        Err(e) => {
            tracing::warn!("Failed to commit table edit: {}", e);
            CommitOutcome::Abandoned
        }
    }
}

fn edit_cell(model: &mut AppModel, input: CellInput) -> Option<Cmd> {
    let (_, cell) = focused_cell(model)?;
    let editor = model.focused_widget_mut()?.open_editor(cell);
    match input {
        CellInput::InsertChar(ch) => editor.insert_char(ch),
        CellInput::InsertText(text) => editor.insert_text(&text),
        CellInput::DeleteBackward => editor.delete_backward(),
        CellInput::DeleteForward => editor.delete_forward(),
        CellInput::CaretLeft => editor.caret_left(),
        CellInput::CaretRight => editor.caret_right(),
        CellInput::CaretHome => editor.caret_home(),
        CellInput::CaretEnd => editor.caret_end(),
    }
    Some(Cmd::Redraw)
}

fn menu_select(model: &mut AppModel, action: MenuAction) -> Option<Cmd> {
    let (widget, _) = focused_cell(model)?;
    let menu = model.focused_widget()?.menu()?.clone();
    if !menu.is_enabled(action) {
        tracing::debug!(?action, "Ignoring disabled menu item");
        return None;
    }
    model.focused_widget_mut()?.close_menu();

    let op = action.to_op(menu.cell)?;
    commit_widget(model, widget, Some(op), Some(action.focus_after(menu.cell)));
    Some(Cmd::Redraw)
}
