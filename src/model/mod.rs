//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod document;
pub mod focus;

pub use document::{Document, DocumentChange, HostBuffer, Transaction, TransactionError};
pub use focus::{Focus, FocusRequest};

use crate::config::EditorConfig;
use crate::decoration::DecorationSet;
use crate::keymap::{default_bindings, KeyContext, Keymap};
use crate::widget::TableWidget;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Host text buffer, the single source of truth
    pub document: Document,
    /// Table span → widget registry, synced to the document revision
    pub decorations: DecorationSet,
    pub focus: Focus,
    pub config: EditorConfig,
    pub keymap: Keymap,
}

impl AppModel {
    pub fn new(document: Document, config: EditorConfig, keymap: Keymap) -> Self {
        let mut decorations = DecorationSet::new();
        decorations.sync(&document, None);
        Self {
            document,
            decorations,
            focus: Focus::Text { caret: 0 },
            config,
            keymap,
        }
    }

    /// Model over in-memory text with default config and bindings
    pub fn with_text(text: &str) -> Self {
        Self::new(
            Document::with_text(text),
            EditorConfig::default(),
            Keymap::with_bindings(default_bindings()),
        )
    }

    pub fn focused_widget(&self) -> Option<&TableWidget> {
        self.focus.widget().and_then(|id| self.decorations.widget(id))
    }

    pub fn focused_widget_mut(&mut self) -> Option<&mut TableWidget> {
        let id = self.focus.widget()?;
        self.decorations.widget_mut(id)
    }

    /// Key context for conditional bindings
    pub fn key_context(&self) -> KeyContext {
        match self.focused_widget() {
            Some(widget) => KeyContext {
                table_focused: true,
                has_cell_selection: widget.selection_active(),
                menu_open: widget.menu().is_some(),
            },
            None => KeyContext::default(),
        }
    }

    /// Issue one replace-span transaction and bring decorations and focus up
    /// to date
    ///
    /// `on_mounted` names the cell to focus once the widget for the new block
    /// exists; when the widget cannot be found focus becomes [`Focus::None`].
    /// Without a request, a text caret is mapped through the edit and focus
    /// in another table follows that table to its new offset.
    pub fn dispatch_transaction(
        &mut self,
        from: usize,
        to: usize,
        text: &str,
        on_mounted: Option<FocusRequest>,
    ) -> Result<DocumentChange, TransactionError> {
        let carried = match self.focus {
            Focus::Cell { widget, cell } => self
                .decorations
                .widget(widget)
                .map(|w| FocusRequest {
                    origin: w.block.from,
                    cell,
                }),
            _ => None,
        };

        let tx = self.document.replace_span(from, to, text)?;
        if tx.change.text_changed {
            self.decorations.sync(&self.document, Some(&tx));
        }

        if let Some(request) = on_mounted {
            self.focus = self.restore_focus(&request);
        } else {
            match self.focus {
                Focus::Text { caret } => {
                    self.focus = Focus::Text {
                        caret: tx.map_offset(caret),
                    }
                }
                Focus::Cell { .. } => {
                    self.focus = match carried {
                        Some(request) => self.restore_focus(&FocusRequest {
                            origin: tx.map_offset(request.origin),
                            cell: request.cell,
                        }),
                        None => Focus::None,
                    }
                }
                Focus::None => {}
            }
        }

        Ok(tx.change)
    }

    fn restore_focus(&mut self, request: &FocusRequest) -> Focus {
        match self.decorations.resolve_focus(request) {
            Some(focus) => {
                if let Focus::Cell { widget, cell } = focus {
                    if let Some(widget) = self.decorations.widget_mut(widget) {
                        widget.open_editor(cell);
                    }
                }
                focus
            }
            None => {
                tracing::debug!(
                    origin = request.origin,
                    "No table widget at restore offset, dropping focus"
                );
                Focus::None
            }
        }
    }

    /// Decorated view of the whole document
    pub fn render_view(&self) -> Vec<String> {
        self.decorations
            .render_view(&self.document.text(), &self.focus)
    }
}
