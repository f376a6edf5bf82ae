//! Configurable keyboard mapping for table navigation
//!
//! ```text
//! host key event → Keystroke → Keymap::lookup(KeyContext) → Command → update::navigation
//! ```
//!
//! Every default binding is conditional on `table_focused`, so keys pressed
//! while focus is in the surrounding text never match and fall through to
//! the host editor.

mod binding;
mod command;
mod config;
mod context;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, load_keymap_layers,
    merge_bindings,
};
pub use keymap::Keymap;
pub use types::{KeyCode, Keystroke, Modifiers};
