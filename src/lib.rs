//! gridmark - grid editing for markdown pipe tables
//!
//! The host text buffer is the single source of truth. Tables are parsed
//! out of it on every change, shown as editable grids, and every edit goes
//! back in as one replace-span transaction, following the Elm Architecture
//! pattern: `update(model, msg) -> Option<Cmd>`.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod decoration;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod replay;
pub mod table;
pub mod tracing;
pub mod update;
pub mod widget;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use table::TableBlock;
