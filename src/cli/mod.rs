//! CLI module for the cmm compiler
//!
//! `cmm [--tokens] [--ast] [--symbols] [--format plain|fancy] <FILE>` runs the frontend over one file, prints the
//! requested dumps to stdout and the diagnostics to stderr.
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

use clap::{Parser, ValueEnum};

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

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The cmm compiler frontend
#[derive(Parser, Debug)]
#[command(name = "cmm")]
#[command(version = VERSION)]
#[command(about = "Check a cmm source file and report its diagnostics", long_about = None)]
pub struct Cli {
    /// Source file to check
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the token stream
    #[arg(long)]
    pub tokens: bool,

    /// Print the AST (only when parsing succeeds)
    #[arg(long)]
    pub ast: bool,

    /// Print the symbol table (only when parsing succeeds)
    #[arg(long)]
    pub symbols: bool,

    /// Diagnostic style
    #[arg(long, value_enum, default_value_t = DiagnosticFormat::Plain)]
    pub format: DiagnosticFormat,
}

/// How diagnostics are written to stderr.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticFormat {
    /// `Line: <n>: error: <message>`, one per line
    Plain,
    /// Graphical report with the offending source line
    Fancy,
}

/// What to print besides diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    pub tokens: bool,
    pub ast: bool,
    pub symbols: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
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

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let dumps = DumpOptions {
        tokens: cli.tokens,
        ast: cli.ast,
        symbols: cli.symbols,
    };
    commands::check_file(&cli.file.to_string_lossy(), dumps, cli.format)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["cmm", "--tokens", "--symbols", "--format", "fancy", "prog.cmm"]).unwrap();
        assert!(cli.tokens);
        assert!(!cli.ast);
        assert!(cli.symbols);
        assert_eq!(cli.format, DiagnosticFormat::Fancy);
        assert_eq!(cli.file, PathBuf::from("prog.cmm"));
    }

    #[test]
    fn test_cli_defaults_to_plain() {
        let cli = Cli::try_parse_from(["cmm", "prog.cmm"]).unwrap();
        assert_eq!(cli.format, DiagnosticFormat::Plain);
    }

    #[test]
    fn test_cli_requires_file() {
        assert!(Cli::try_parse_from(["cmm", "--ast"]).is_err());
    }
}
