//! Output formatting utilities for CLI commands.

use serde::Serialize;
use std::io::Write;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Trait for types that can be formatted for output
pub trait FormattedOutput {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to stdout
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    write_output(ctx.format, value, std::io::stdout().lock())
}

/// Print formatted output to a writer
pub fn write_output<T, W>(format: OutputFormat, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
    W: Write,
{
    let output = match format {
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value.format_json()?,
    };

    writeln!(writer, "{output}")?;
    Ok(())
}

/// Left-aligned plain table.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(headers.to_vec())];
    lines.extend(rows.iter().map(|row| line(row.iter().map(String::as_str).collect())));
    lines.join("\n")
}
