//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use gridmark::commands::Cmd;
use gridmark::config::{EdgePolicy, EditorConfig};
use gridmark::keymap::{default_bindings, KeyCode, Keymap, Keystroke, Modifiers};
use gridmark::messages::{Msg, TableMsg};
use gridmark::model::{AppModel, Document, HostBuffer};
use gridmark::table::CellRef;
use gridmark::update::{handle_key, update, KeyOutcome};
use gridmark::widget::{TableWidget, WidgetId};

/// Create a test model over `text` with default config and bindings
pub fn test_model(text: &str) -> AppModel {
    AppModel::with_text(text)
}

/// Create a test model with a vertical edge policy
pub fn test_model_with_edge(text: &str, vertical_edge: EdgePolicy) -> AppModel {
    let config = EditorConfig {
        vertical_edge,
        ..EditorConfig::default()
    };
    AppModel::new(
        Document::with_text(text),
        config,
        Keymap::with_bindings(default_bindings()),
    )
}

/// Current buffer contents
pub fn buffer(model: &AppModel) -> String {
    model.document.text()
}

/// Widget for the n-th table of the document
pub fn widget(model: &AppModel, table: usize) -> &TableWidget {
    &model.decorations.widgets()[table]
}

pub fn widget_id(model: &AppModel, table: usize) -> WidgetId {
    widget(model, table).id
}

/// Send a message through the main update function
pub fn send(model: &mut AppModel, msg: impl Into<Msg>) -> Option<Cmd> {
    update(model, msg.into())
}

/// Click a cell of the n-th table
pub fn click(model: &mut AppModel, table: usize, cell: CellRef) {
    let widget = widget_id(model, table);
    send(model, TableMsg::FocusCell { widget, cell });
}

pub fn press(model: &mut AppModel, key: KeyCode) -> KeyOutcome {
    handle_key(model, Keystroke::key(key))
}

pub fn press_with(model: &mut AppModel, key: KeyCode, mods: Modifiers) -> KeyOutcome {
    handle_key(model, Keystroke::new(key, mods))
}

/// Type characters through the key controller
pub fn type_text(model: &mut AppModel, text: &str) {
    for ch in text.chars() {
        handle_key(model, Keystroke::char(ch));
    }
}

/// Replace the focused cell's draft text
pub fn retype(model: &mut AppModel, text: &str) {
    let current = model
        .focus
        .cell()
        .and_then(|cell| model.focused_widget().map(|w| w.display_text(cell).chars().count()))
        .unwrap_or(0);
    press(model, KeyCode::End);
    for _ in 0..current {
        press(model, KeyCode::Backspace);
    }
    type_text(model, text);
}
