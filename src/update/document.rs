//! Document update functions for edits made in the host text surface

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::AppModel;

/// Handle document messages
///
/// Each message is one replace-span transaction. Decorations are rebuilt
/// when the text changed, and focus is carried across the edit.
pub fn update_document(model: &mut AppModel, msg: DocumentMsg) -> Option<Cmd> {
    let (from, to, text) = match msg {
        DocumentMsg::Replace { from, to, text } => (from, to, text),
        DocumentMsg::Insert { at, text } => (at, at, text),
        DocumentMsg::Delete { from, to } => (from, to, String::new()),
    };

    match model.dispatch_transaction(from, to, &text, None) {
        Ok(change) if change.text_changed => Some(Cmd::Redraw),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Rejected document edit: {}", e);
            None
        }
    }
}
