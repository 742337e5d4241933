//! Row formatting for command output
//!
//! The Data API answers with a JSON array of objects. Table, CSV and TSV
//! output flatten it into columns: the `--select` fields when given, else
//! every key seen across the rows in first-seen order.

use crate::error::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde_json::Value;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Tsv,
}

/// Explicit choice, else table on a terminal and JSON when piped.
pub fn determine_format(requested: Option<OutputFormat>) -> OutputFormat {
    requested.unwrap_or_else(|| {
        if io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    })
}

/// Response body as a list of rows.
pub fn rows(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Columns for tabular output.
pub fn columns(rows: &[&Value], select: &[String]) -> Vec<String> {
    if !select.is_empty() {
        return select.to_vec();
    }

    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

pub fn render(value: &Value, format: OutputFormat, select: &[String]) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => {
            let (columns, cells) = tabulate(value, select);
            format_as_table(&columns, &cells)
        },
        OutputFormat::Csv => {
            let (columns, cells) = tabulate(value, select);
            format_delimited(&columns, &cells, ',', csv_escape)
        },
        OutputFormat::Tsv => {
            let (columns, cells) = tabulate(value, select);
            format_delimited(&columns, &cells, '\t', tsv_escape)
        },
    })
}

fn tabulate(value: &Value, select: &[String]) -> (Vec<String>, Vec<Vec<String>>) {
    let rows = rows(value);
    let columns = columns(&rows, select);
    let cells = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(c).map(cell_to_string).unwrap_or_default())
                .collect()
        })
        .collect();
    (columns, cells)
}

/// Render and write to `path`, or stdout when `None`.
pub fn write(
    value: &Value,
    format: OutputFormat,
    select: &[String],
    path: Option<&Path>,
) -> Result<()> {
    let formatted = render(value, format, select)?;

    match path {
        Some(path) => {
            std::fs::write(path, formatted)?;
            eprintln!(
                "{} {} rows written to {}",
                "✓".green(),
                rows(value).len(),
                path.display().to_string().cyan()
            );
        },
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(formatted.as_bytes())?;
            stdout.flush()?;
        },
    }

    Ok(())
}

fn format_as_table(columns: &[String], cells: &[Vec<String>]) -> String {
    use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

    if cells.is_empty() {
        return format!("{}\n", "No rows returned".yellow());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(columns);

    for row in cells {
        table.add_row(row);
    }

    format!("{}\n", table)
}

fn format_delimited(
    columns: &[String],
    cells: &[Vec<String>],
    separator: char,
    escape: fn(&str) -> String,
) -> String {
    let sep = separator.to_string();
    let mut output = String::new();

    let header: Vec<String> = columns.iter().map(|c| escape(c)).collect();
    output.push_str(&header.join(&sep));
    output.push('\n');

    for row in cells {
        let row: Vec<String> = row.iter().map(|v| escape(v)).collect();
        output.push_str(&row.join(&sep));
        output.push('\n');
    }

    output
}

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(cell_to_string)
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(_) => value.to_string(),
    }
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn tsv_escape(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}
