//! CLI module for the Lark compiler
//!
//! This module provides the command-line interface for the compiler front end.
//!
//! ## Usage
//!
//! - `lark <files...>` - Run the full pipeline on each file
//! - `lark --lex <file>` - Print the token stream (debug)
//! - `lark --parse <file>` - Print the syntax tree as an S-expression (debug)
//! - `lark --scopes <file>` - Print the scope tree (debug)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::errors::FatalError;

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
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
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
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<FatalError> for CliError {
    fn from(err: FatalError) -> Self {
        CliError::failure(render_fatal(err))
    }
}

/// Render a fatal error with its code and help through miette.
pub fn render_fatal(err: FatalError) -> String {
    let code = err.code();
    format!("{code}: {:?}", miette::Report::new(err))
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Lark language compiler front end
#[derive(Parser, Debug)]
#[command(name = "lark")]
#[command(version = VERSION)]
#[command(about = "Scan, parse and check Lark source files", long_about = None)]
pub struct Cli {
    /// Source files to compile (each one is checked independently)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with_all = ["files", "parse_file", "scopes_file"])]
    pub lex_file: Option<PathBuf>,

    /// Parse only and print the tree (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with_all = ["files", "scopes_file"])]
    pub parse_file: Option<PathBuf>,

    /// Parse and resolve, then print the scope tree (debug)
    #[arg(long = "scopes", value_name = "FILE", conflicts_with = "files")]
    pub scopes_file: Option<PathBuf>,

    /// Log pipeline progress (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run(cli: Cli) {
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

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file);
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file);
    }
    if let Some(file) = cli.scopes_file {
        return commands::scopes_file(&file);
    }

    if cli.files.is_empty() {
        return Err(FatalError::NoInputFile.into());
    }
    commands::compile_files(&cli.files)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_files() {
        let cli = Cli::try_parse_from(["lark", "a.lark", "b.lark"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("a.lark"), PathBuf::from("b.lark")]);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["lark", "--lex", "test.lark"]).unwrap();
        assert!(cli.lex_file.is_some());

        let cli = Cli::try_parse_from(["lark", "--parse", "test.lark"]).unwrap();
        assert!(cli.parse_file.is_some());

        let cli = Cli::try_parse_from(["lark", "--scopes", "test.lark", "-v"]).unwrap();
        assert!(cli.scopes_file.is_some());
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_debug_flags_conflict_with_files() {
        assert!(Cli::try_parse_from(["lark", "--parse", "a.lark", "b.lark"]).is_err());
        assert!(Cli::try_parse_from(["lark", "--lex", "a.lark", "--parse", "b.lark"]).is_err());
    }

    #[test]
    fn test_no_input_file_is_fatal() {
        let cli = Cli::try_parse_from(["lark"]).unwrap();
        let err = execute(cli).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.starts_with("F1001"), "{}", err.message);
    }

    #[test]
    fn test_missing_file_reports_cannot_open() {
        let cli = Cli::try_parse_from(["lark", "--parse", "/no/such/file.lark"]).unwrap();
        let err = execute(cli).unwrap_err();
        assert!(err.message.starts_with("F1002"), "{}", err.message);
    }
}
