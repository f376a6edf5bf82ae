//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod document;
mod navigation;
mod table;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use document::update_document;
pub use navigation::{handle_key, KeyOutcome};
pub use table::{update_table, CommitOutcome};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Document(m) => document::update_document(model, m),
        Msg::Table(m) => table::update_table(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Logs each message and the focus transition it caused.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let before = model.focus;
    let result = update_inner(model, msg);
    if model.focus != before {
        debug!(target: "focus", ?before, after = ?model.focus, "focus changed");
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Table::FocusCell { .. }`
/// - `Document::Insert { at: 3, text: "x" }`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Document(m) => format!("Document::{:?}", m),
        Msg::Table(m) => format!("Table::{:?}", m),
    }
}
