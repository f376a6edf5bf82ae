//! Command enum representing the table actions a key can trigger
//!
//! Navigation commands are contextual: whether they are handled depends on
//! the focused cell and the freshly resolved block, so the update layer
//! decides what each one does.

use std::str::FromStr;

use crate::messages::CellInput;

/// All table commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Cell navigation
    // ========================================================================
    /// Move one column left, declining at the row's first cell
    CellLeft,
    /// Move one column right, declining at the row's last cell
    CellRight,
    /// Move one row up; the header is the top row
    CellUp,
    /// Move one row down
    CellDown,
    /// Next cell in row-major order, appending a row at the very end
    NextCell,
    /// Previous cell in row-major order
    PrevCell,

    // ========================================================================
    // Editing
    // ========================================================================
    /// Commit drafts and move down one row, appending on the last row
    CommitCell,
    /// Revert the focused cell's draft
    CancelEdit,
    DeleteBackward,
    DeleteForward,
    CaretHome,
    CaretEnd,

    // ========================================================================
    // Menu & clipboard
    // ========================================================================
    DismissMenu,
    /// Copy the drag selection as tab-separated values
    CopySelection,

    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    /// Draft edit performed by this command, for the pure editing commands
    pub fn cell_input(self) -> Option<CellInput> {
        match self {
            Command::DeleteBackward => Some(CellInput::DeleteBackward),
            Command::DeleteForward => Some(CellInput::DeleteForward),
            Command::CaretHome => Some(CellInput::CaretHome),
            Command::CaretEnd => Some(CellInput::CaretEnd),
            _ => None,
        }
    }

    /// Get a display name for this command
    pub fn display_name(self) -> &'static str {
        use Command::*;

        match self {
            CellLeft => "Cell Left",
            CellRight => "Cell Right",
            CellUp => "Cell Up",
            CellDown => "Cell Down",
            NextCell => "Next Cell",
            PrevCell => "Previous Cell",
            CommitCell => "Commit Cell",
            CancelEdit => "Cancel Edit",
            DeleteBackward => "Delete Backward",
            DeleteForward => "Delete Forward",
            CaretHome => "Caret to Start",
            CaretEnd => "Caret to End",
            DismissMenu => "Dismiss Menu",
            CopySelection => "Copy Selection",
            Unbound => "Unbound",
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CellLeft" => Ok(Command::CellLeft),
            "CellRight" => Ok(Command::CellRight),
            "CellUp" => Ok(Command::CellUp),
            "CellDown" => Ok(Command::CellDown),
            "NextCell" => Ok(Command::NextCell),
            "PrevCell" => Ok(Command::PrevCell),
            "CommitCell" => Ok(Command::CommitCell),
            "CancelEdit" => Ok(Command::CancelEdit),
            "DeleteBackward" => Ok(Command::DeleteBackward),
            "DeleteForward" => Ok(Command::DeleteForward),
            "CaretHome" => Ok(Command::CaretHome),
            "CaretEnd" => Ok(Command::CaretEnd),
            "DismissMenu" => Ok(Command::DismissMenu),
            "CopySelection" => Ok(Command::CopySelection),
            "Unbound" => Ok(Command::Unbound),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Command::from_str("NextCell"), Ok(Command::NextCell));
        assert_eq!(Command::from_str("Unbound"), Ok(Command::Unbound));
        assert_eq!(Command::from_str("nextcell"), Err(()));
    }

    #[test]
    fn test_cell_input_only_for_edit_commands() {
        assert_eq!(
            Command::DeleteBackward.cell_input(),
            Some(CellInput::DeleteBackward)
        );
        assert_eq!(Command::CellLeft.cell_input(), None);
        assert_eq!(Command::CopySelection.cell_input(), None);
    }
}
