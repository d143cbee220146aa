//! Library side of the `medclassify` binary.
//!
//! Argument definitions, the `~/.medclassify/config.toml` loader, one
//! `execute_*` function per subcommand and the table/JSON/quiet formatter.
//! Kept as a library so command tests can call the commands directly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
