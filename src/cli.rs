//! Command-line interface
//!
//! Supports:
//! - Printing a document with its tables rendered as grids
//! - Listing detected tables, optionally as JSON
//! - Canonical re-serialization of every table
//! - Replaying a scripted interaction against a document

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::clipboard::{MemoryClipboard, SystemClipboard};
use crate::config::EditorConfig;
use crate::keymap::{load_keymap_layers, Keymap};
use crate::model::{AppModel, Document, HostBuffer};
use crate::replay::{run_script, ReplayScript, ReplayStats};
use crate::table::{parse_tables, serialize_with};

/// Edit markdown pipe tables as grids
#[derive(Parser, Debug)]
#[command(name = "gridmark", version, about = "Edit markdown pipe tables as grids")]
pub struct CliArgs {
    /// Config file (defaults to ~/.config/gridmark/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keymap file merged over the defaults (defaults to ~/.config/gridmark/keymap.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub keymap: Option<PathBuf>,

    /// Log at debug level on stderr when RUST_LOG is unset
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where `replay` sends copied selections
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClipboardTarget {
    /// System clipboard, then the configured fallback
    #[default]
    System,
    /// Keep copies in memory and print them to stderr
    Memory,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print the document with every table rendered as a grid
    View { file: PathBuf },
    /// List the tables found in a document
    Tables {
        file: PathBuf,
        /// Print blocks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-serialize every table canonically
    Fmt {
        file: PathBuf,
        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Run a scripted interaction and print the resulting document
    Replay {
        file: PathBuf,
        events: PathBuf,
        /// Save the edited document back to `file`
        #[arg(long)]
        write: bool,
        /// Destination for copied selections
        #[arg(long, value_enum, default_value_t = ClipboardTarget::System)]
        clipboard: ClipboardTarget,
    },
}

impl CliArgs {
    fn load_config(&self) -> EditorConfig {
        match &self.config {
            Some(path) => EditorConfig::load_from(path),
            None => EditorConfig::load(),
        }
    }

    fn load_keymap(&self) -> Keymap {
        let user = self.keymap.clone().or_else(crate::config_paths::keymap_file);
        Keymap::with_bindings(load_keymap_layers(user.as_deref()))
    }

    fn open(&self, file: &Path) -> Result<AppModel> {
        let document = Document::from_file(file.to_path_buf())
            .with_context(|| format!("Failed to open {}", file.display()))?;
        Ok(AppModel::new(
            document,
            self.load_config(),
            self.load_keymap(),
        ))
    }

    /// Execute the selected subcommand, returning what goes to stdout
    pub fn run(&self) -> Result<String> {
        match &self.command {
            CliCommand::View { file } => {
                let model = self.open(file)?;
                Ok(model.render_view().join("\n"))
            }
            CliCommand::Tables { file, json } => {
                let text = read(file)?;
                list_tables(&text, *json)
            }
            CliCommand::Fmt { file, write } => {
                let mut document = Document::from_file(file.to_path_buf())
                    .with_context(|| format!("Failed to open {}", file.display()))?;
                let changed = format_tables(&mut document)?;
                if *write {
                    if changed > 0 {
                        document
                            .save()
                            .with_context(|| format!("Failed to write {}", file.display()))?;
                    }
                    Ok(format!("{}: {} table(s) reformatted", file.display(), changed))
                } else {
                    Ok(document.text())
                }
            }
            CliCommand::Replay {
                file,
                events,
                write,
                clipboard,
            } => {
                let mut model = self.open(file)?;
                let script = ReplayScript::load(events)
                    .with_context(|| format!("Failed to load {}", events.display()))?;
                let stats = replay(&mut model, &script, *clipboard)?;
                tracing::info!(
                    events = stats.events,
                    handled = stats.keys_handled,
                    declined = stats.keys_declined,
                    "Replay finished"
                );
                if *write && model.document.is_modified {
                    model
                        .document
                        .save()
                        .with_context(|| format!("Failed to write {}", file.display()))?;
                }
                Ok(model.document.text())
            }
        }
    }
}

fn replay(
    model: &mut AppModel,
    script: &ReplayScript,
    target: ClipboardTarget,
) -> Result<ReplayStats> {
    match target {
        ClipboardTarget::System => {
            let mut sink = SystemClipboard::from_config(&model.config);
            Ok(run_script(model, script, &mut sink)?)
        }
        ClipboardTarget::Memory => {
            let mut sink = MemoryClipboard::default();
            let stats = run_script(model, script, &mut sink)?;
            for text in &sink.writes {
                eprintln!("clipboard: {:?}", text);
            }
            Ok(stats)
        }
    }
}

fn read(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// One line per table, or the blocks as pretty JSON
pub fn list_tables(text: &str, json: bool) -> Result<String> {
    let blocks = parse_tables(text);
    if json {
        return serde_json::to_string_pretty(&blocks).context("Failed to encode tables");
    }
    Ok(blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            format!(
                "#{} [{}, {}) {} column(s), {} row(s): {}",
                i,
                block.from,
                block.to,
                block.column_count(),
                block.row_count(),
                block.headers.join(" | ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Replace every table with its canonical form, returning how many changed
///
/// Tables are rewritten last to first so earlier spans stay valid.
pub fn format_tables(document: &mut Document) -> Result<usize> {
    let blocks = parse_tables(&document.text());
    let sep = document.line_separator();
    let mut changed = 0;
    for block in blocks.iter().rev() {
        let tx = document.replace_span(block.from, block.to, &serialize_with(block, sep))?;
        if tx.change.text_changed {
            changed += 1;
        }
    }
    Ok(changed)
}
