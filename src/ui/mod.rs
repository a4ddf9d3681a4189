//! Report output for the command-line tool.
//!
//! The prompt content goes out first, before the remote call is made, so a
//! transport failure leaves nothing on stdout beyond the prompt.

use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};

use crate::models::BookClassification;

/// How the classification result is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `field=value` text form
    #[default]
    Plain,
    /// Pretty-printed JSON object
    Json,
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Write the user prompt content exactly as it will be sent.
pub fn report_prompt<W: Write>(out: &mut W, user_message: &str) -> io::Result<()> {
    writeln!(out, "{}", user_message)?;
    out.flush()
}

/// Write the classification result.
///
/// `styled` enables terminal emphasis for the plain format and has no effect
/// on JSON output.
pub fn report_result<W: Write>(
    out: &mut W,
    result: &BookClassification,
    format: OutputFormat,
    styled: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain if styled => writeln!(out, "{}", result.bold()),
        OutputFormat::Plain => writeln!(out, "{}", result),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result).map_err(io::Error::other)?;
            writeln!(out, "{}", json)
        }
    }?;
    out.flush()
}
