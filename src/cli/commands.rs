//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use crate::frontend::diagnostics::{self, CompileError};
use crate::frontend::{analyzer, dump, lexer, parser};

use super::{CliError, CliResult, DiagnosticFormat, DumpOptions, ExitCode};

/// Maximum source file size (16 MiB)
///
/// Files larger than this are rejected before reading.
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Read a source file with size validation.
///
/// ## Errors
/// Returns an error if:
/// - The file cannot be accessed or read
/// - The file exceeds `MAX_SOURCE_SIZE` (16 MiB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Check one file: lex, parse, analyze. Requested dumps go to stdout.
///
/// The token dump is printed even when the source has lexical errors; the AST and symbol dumps need a successful
/// parse.
///
/// ## Errors
/// Fails with exit code 1 and the rendered diagnostics if any stage reported an error.
pub fn check_file(file_path: &str, dumps: DumpOptions, format: DiagnosticFormat) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let report = check_and_dump(&source, dumps);
    print!("{}", report.stdout);

    if report.errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(render_errors(file_path, &source, &report.errors, format)))
    }
}

/// Output of one frontend run: the dump text and any diagnostics.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub stdout: String,
    pub errors: Vec<CompileError>,
}

/// Run the frontend stage by stage, collecting the requested dumps along the way.
pub fn check_and_dump(source: &str, dumps: DumpOptions) -> CheckReport {
    let mut report = CheckReport::default();

    let tokens = lexer::lex(source);
    if dumps.tokens {
        report.stdout.push_str(&dump::tokens(&tokens));
    }

    let unit = match parser::parse(&tokens) {
        Ok(unit) => unit,
        Err(errors) => {
            report.errors = errors;
            return report;
        }
    };

    if dumps.ast {
        report.stdout.push_str(&dump::ast(&unit.program));
    }
    if dumps.symbols {
        report.stdout.push_str(&dump::symbols(&unit.symbols));
    }

    if let Err(errors) = analyzer::check_calls(&unit.program, &unit.symbols) {
        report.errors = errors;
    }
    report
}

/// Render diagnostics for stderr, one per line in plain mode.
pub fn render_errors(file_path: &str, source: &str, errors: &[CompileError], format: DiagnosticFormat) -> String {
    let rendered: Vec<String> = match format {
        DiagnosticFormat::Plain => errors.iter().map(diagnostics::format_error).collect(),
        DiagnosticFormat::Fancy => errors
            .iter()
            .map(|err| diagnostics::render_fancy(file_path, source, err).trim_end().to_string())
            .collect(),
    };
    rendered.join("\n")
}
