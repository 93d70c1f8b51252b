// src/cli.rs

//! Command-line arguments of the `shellout` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// shellout: build shell commands from templates with safely quoted values.
///
/// Templates use `{}` for every interpolation slot. Each value is quoted for
/// the resolved shell before it is substituted, so it always reaches the
/// command as a single word. Write `{{}}` for a literal `{}`.
///
/// Examples:
/// - `shellout exec 'ls -la {}' 'My Documents'`
/// - `shellout --verbose --cwd /tmp exec 'grep -rn {} .' 'a; b'`
/// - `shellout exec 'find {} -exec wc -l {{}} +' src`
/// - `shellout quote "it's" '$HOME'`
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Echo every command and mirror its output live.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Working directory for the command. Must exist.
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub action: Action,
}

/// What the binary should do.
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Fill a template with quoted values and run it.
    Exec {
        /// The command template, with `{}` marking each slot and `{{}}` a literal `{}`.
        template: String,

        /// One value per slot, in order.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Print each value quoted for the resolved shell.
    Quote {
        /// Values to quote.
        values: Vec<String>,
    },
    /// Show which interpreter commands run under.
    Shell,
}
