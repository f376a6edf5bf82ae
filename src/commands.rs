//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

/// Side effects returned from `update`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the decorated view
    Redraw,
    /// Put text on the system clipboard
    WriteClipboard(String),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::WriteClipboard(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Clipboard payloads in execution order
    pub fn clipboard_writes(&self) -> Vec<&str> {
        match self {
            Cmd::WriteClipboard(text) => vec![text.as_str()],
            Cmd::Batch(cmds) => cmds.iter().flat_map(Cmd::clipboard_writes).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_redraw_and_clipboard() {
        let cmd = Cmd::batch(vec![
            Cmd::None,
            Cmd::Batch(vec![Cmd::WriteClipboard("a\tb".into()), Cmd::Redraw]),
        ]);
        assert!(cmd.needs_redraw());
        assert_eq!(cmd.clipboard_writes(), vec!["a\tb"]);
        assert!(!Cmd::WriteClipboard(String::new()).needs_redraw());
    }
}
