//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `tui` (default) | Interactive board with form and drag-and-drop lists |
//! | `validate` | Check form input against the configured rules |
//! | `replay` | Apply a JSONL script of creates and moves, print the lists |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! projboard --verbose replay session.jsonl
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod logging;
mod output;
mod replay;
mod tui;
mod validate;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use replay::{apply as apply_script, ReplayError, ReplayReport};
