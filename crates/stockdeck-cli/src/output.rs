use std::io::{self, Write};

use serde_json::Value;
use stockdeck_core::Envelope;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// A rendered page: the JSON envelope plus its human-readable lines.
#[derive(Debug)]
pub struct PageOutput {
    pub envelope: Envelope<Value>,
    pub lines: Vec<String>,
}

pub fn render(page: &PageOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&page.envelope)?
            } else {
                serde_json::to_string(&page.envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => {
            for line in &page.lines {
                writeln!(out, "{line}")?;
            }
            for warning in &page.envelope.meta.warnings {
                eprintln!("warning: {warning}");
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Column alignment inside a [`TextTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Fixed-width text table sized to its widest cell per column.
#[derive(Debug, Clone)]
pub struct TextTable {
    headers: Vec<(&'static str, Align)>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(headers: &[(&'static str, Align)]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn lines(&self) -> Vec<String> {
        let widths = self
            .headers
            .iter()
            .enumerate()
            .map(|(index, (header, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect::<Vec<_>>();

        let header_cells = self
            .headers
            .iter()
            .map(|(header, _)| (*header).to_owned())
            .collect::<Vec<_>>();

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.format_row(&header_cells, &widths));
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            lines.push(self.format_row(row, &widths));
        }
        lines
    }

    fn format_row(&self, cells: &[String], widths: &[usize]) -> String {
        let formatted = self
            .headers
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(index, ((_, align), width))| {
                let cell = cells.get(index).map(String::as_str).unwrap_or("");
                let padding = width.saturating_sub(cell.chars().count());
                match align {
                    Align::Left => format!("{cell}{}", " ".repeat(padding)),
                    Align::Right => format!("{}{cell}", " ".repeat(padding)),
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        formatted.trim_end().to_owned()
    }
}
