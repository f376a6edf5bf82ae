//! Decoration layer - maps table spans in the buffer to live widgets
//!
//! Rebuilt from a fresh parse whenever the buffer revision moves. A widget
//! survives a rebuild only when its block is unchanged in span and content,
//! so typing elsewhere in the document never resets a table's drafts,
//! selection or menu.

use std::collections::HashMap;

use crate::model::document::{HostBuffer, Transaction};
use crate::model::focus::{Focus, FocusRequest};
use crate::table::{parse_tables, TableBlock};
use crate::widget::{TableWidget, WidgetId};

/// Outcome of one rebuild
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildStats {
    pub kept: usize,
    pub created: usize,
    pub dropped: usize,
}

#[derive(Debug, Default)]
pub struct DecorationSet {
    /// Ascending by block origin
    widgets: Vec<TableWidget>,
    /// Block origin offset → widget
    by_origin: HashMap<usize, WidgetId>,
    synced_revision: Option<u64>,
    next_id: u64,
}

impl DecorationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change notification: rebuild if the buffer moved since the last sync
    ///
    /// `edit` is the transaction that produced the new revision, when known.
    /// Without it no widget state carries over to a moved table.
    pub fn sync(
        &mut self,
        buffer: &impl HostBuffer,
        edit: Option<&Transaction>,
    ) -> Option<RebuildStats> {
        let revision = buffer.revision();
        if self.synced_revision == Some(revision) {
            return None;
        }
        let stats = self.rebuild(parse_tables(&buffer.text()), edit);
        self.synced_revision = Some(revision);
        tracing::debug!(
            revision,
            kept = stats.kept,
            created = stats.created,
            dropped = stats.dropped,
            "Rebuilt table decorations"
        );
        Some(stats)
    }

    /// Replace the widget set with one widget per block
    ///
    /// A new widget inherits the drafts and selection of a dropped widget
    /// only when that widget's origin, mapped through `edit`, lands on the
    /// new block's origin and the content is unchanged (the table only moved).
    pub fn rebuild(
        &mut self,
        blocks: Vec<TableBlock>,
        edit: Option<&Transaction>,
    ) -> RebuildStats {
        let mut old: Vec<Option<TableWidget>> = self.widgets.drain(..).map(Some).collect();
        let mut stats = RebuildStats::default();
        let mut fresh = Vec::new();

        for block in blocks {
            let same = old
                .iter()
                .position(|w| w.as_ref().is_some_and(|w| w.block.same_snapshot(&block)));
            if let Some(widget) = same.and_then(|i| old[i].take()) {
                stats.kept += 1;
                self.widgets.push(widget);
                continue;
            }
            stats.created += 1;
            self.next_id += 1;
            fresh.push(self.widgets.len());
            self.widgets.push(TableWidget::new(WidgetId(self.next_id), block));
        }

        if let Some(tx) = edit {
            for idx in fresh {
                let block = &self.widgets[idx].block;
                let moved = old.iter().position(|w| {
                    w.as_ref().is_some_and(|w| {
                        tx.map_offset(w.block.from) == block.from && w.block.same_content(block)
                    })
                });
                if let Some(previous) = moved.and_then(|i| old[i].take()) {
                    self.widgets[idx].adopt_state(previous);
                }
            }
        }

        stats.dropped = old.len() - stats.kept;
        self.by_origin = self
            .widgets
            .iter()
            .map(|w| (w.block.from, w.id))
            .collect();
        stats
    }

    pub fn widgets(&self) -> &[TableWidget] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn widget(&self, id: WidgetId) -> Option<&TableWidget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut TableWidget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    /// Widget whose block starts at `origin`
    pub fn widget_at(&self, origin: usize) -> Option<&TableWidget> {
        self.by_origin.get(&origin).and_then(|id| self.widget(*id))
    }

    /// Mount-completion lookup: the cell to focus in the widget now at
    /// `request.origin`, clamped to that widget's bounds
    pub fn resolve_focus(&self, request: &FocusRequest) -> Option<Focus> {
        let widget = self.widget_at(request.origin)?;
        Some(Focus::Cell {
            widget: widget.id,
            cell: widget.block.clamp(request.cell),
        })
    }

    /// Text lines with every table span swapped for its widget's grid
    pub fn render_view(&self, text: &str, focus: &Focus) -> Vec<String> {
        let mut out = Vec::new();
        let mut widgets = self.widgets.iter().peekable();
        let mut start = 0;

        for raw in text.split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let line_start = start;
            start += raw.chars().count() + 1;

            while widgets.peek().is_some_and(|w| w.block.to < line_start) {
                widgets.next();
            }
            match widgets.peek() {
                Some(w) if w.block.from == line_start => {
                    let cell = match focus {
                        Focus::Cell { widget, cell } if *widget == w.id => Some(*cell),
                        _ => None,
                    };
                    out.extend(w.render(cell));
                }
                Some(w) if w.block.from < line_start && line_start <= w.block.to => {}
                _ => out.push(line.to_string()),
            }
        }
        out
    }
}
