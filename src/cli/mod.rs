//! CLI module for fastfield
//!
//! The command-line surface over the same pipeline the build-script [`Builder`](crate::Builder) runs.
//!
//! ## Commands
//!
//! - `generate <SRC>` - Write accessor tables and bundles for a source tree
//! - `inspect <SRC>` - Print the selection and resolution trace of every pass
//! - `emit <SRC> --type <T>` - Print the generated source of one table
//!
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::model::AccessorKind;
use crate::version::FASTFIELD_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Carries a message already formatted for display and the exit code `run()` terminates with.
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic with its source context.
    pub fn diagnostic(error: impl miette::Diagnostic + Send + Sync + 'static) -> Self {
        Self::failure(format!("{:?}", miette::Report::new(error)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate field accessor tables for Rust structs
#[derive(Parser, Debug)]
#[command(name = "fastfield")]
#[command(version = FASTFIELD_VERSION)]
#[command(about = "Generate field accessor tables for Rust structs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write accessor tables and per-module bundles
    Generate {
        /// Crate source directory (containing lib.rs or main.rs) or a single .rs file
        #[arg(value_name = "SRC")]
        source: PathBuf,
        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "target/fastfield")]
        output: PathBuf,
        /// Stamp each artifact with its generation time
        #[arg(long)]
        timestamp: bool,
        /// Leave out the lint allowances on generated items
        #[arg(long)]
        no_lint_allows: bool,
    },

    /// Print the selection and resolution trace of each pass
    Inspect {
        #[arg(value_name = "SRC")]
        source: PathBuf,
        /// Only this type (qualified, or a unique simple name)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        type_name: Option<String>,
        /// Only this kind (getters or setters)
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<AccessorKind>,
    },

    /// Print the generated source of one table
    Emit {
        #[arg(value_name = "SRC")]
        source: PathBuf,
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        type_name: String,
        #[arg(short, long, value_parser = parse_kind, default_value = "getters")]
        kind: AccessorKind,
    },
}

fn parse_kind(spelling: &str) -> Result<AccessorKind, String> {
    AccessorKind::parse(spelling)
        .ok_or_else(|| format!("unknown accessor kind `{spelling}` (expected getters or setters)"))
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point. The only place `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            source,
            output,
            timestamp,
            no_lint_allows,
        } => commands::generate(&source, &output, timestamp, !no_lint_allows),
        Command::Inspect {
            source,
            type_name,
            kind,
        } => commands::inspect(&source, type_name.as_deref(), kind),
        Command::Emit {
            source,
            type_name,
            kind,
        } => commands::emit(&source, &type_name, kind),
    }
}

// ============================================================================
// Tests
// ============================================================================
