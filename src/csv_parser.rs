//! Delimited-text loader producing a [`Table`](crate::table::Table).
//!
//! Each field becomes one [`Cell`]: numbers parse to [`Cell::Number`],
//! recognised null markers and infinities become [`Cell::Missing`],
//! everything else is [`Cell::Text`]. No per-column coercion is done, so
//! a column's type is whatever its first cell turns out to be.
//!
//! Quoted fields follow RFC 4180 (embedded delimiters, `""` escapes,
//! embedded newlines). A leading UTF-8 BOM is ignored.
//!
//! # Example
//!
//! ```
//! use u_tabular::csv_parser::CsvParser;
//! use u_tabular::table::{Cell, DataType, TableView};
//!
//! let csv = "location,gdp\nChad,1.6\nPeru,NA\n";
//! let table = CsvParser::new().parse_str(csv).unwrap();
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.column_type("gdp").unwrap(), Some(DataType::Numeric));
//! assert_eq!(table.column("gdp").unwrap()[1], Cell::Missing);
//! ```

use crate::error::TabularError;
use crate::table::{Cell, Table};

/// Standard null value markers recognized during parsing.
const DEFAULT_NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "na", "n/a", "null", "NULL", "None", "none", "NaN", "nan", "NAN", "#N/A",
];

/// Delimited-text parser configuration and entry point.
#[derive(Debug, Clone)]
pub struct CsvParser {
    delimiter: u8,
    has_header: bool,
    null_markers: Vec<String>,
}

impl CsvParser {
    /// Creates a parser with default settings (comma delimiter, header row, standard null markers).
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            null_markers: DEFAULT_NULL_MARKERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Sets the field delimiter (default: comma).
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }

    /// Sets whether the first row is a header (default: true).
    ///
    /// Without a header, columns are named `col_0`, `col_1`, ...
    pub fn has_header(mut self, header: bool) -> Self {
        self.has_header = header;
        self
    }

    /// Sets custom null markers (replaces defaults).
    pub fn null_markers(mut self, markers: Vec<String>) -> Self {
        self.null_markers = markers;
        self
    }

    /// Parses delimited text into a table.
    pub fn parse_str(&self, input: &str) -> Result<Table, TabularError> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let records = self.split_records(input);
        let Some(first) = records.first() else {
            return Ok(Table::new());
        };

        let (names, body) = if self.has_header {
            let names: Vec<String> = first.iter().map(|s| s.trim().to_string()).collect();
            (names, &records[1..])
        } else {
            let names = (0..first.len()).map(|i| format!("col_{i}")).collect();
            (names, &records[..])
        };

        let header_lines = usize::from(self.has_header);
        let mut rows = Vec::with_capacity(body.len());
        for (idx, record) in body.iter().enumerate() {
            if record.len() != names.len() {
                return Err(TabularError::CsvParse {
                    line: idx + 1 + header_lines,
                    message: format!("expected {} fields, got {}", names.len(), record.len()),
                });
            }
            rows.push(record.iter().map(|f| self.to_cell(f)).collect());
        }

        Table::from_rows(rows, names)
    }

    /// Reads and parses a delimited file from disk.
    pub fn parse_file(&self, path: impl AsRef<std::path::Path>) -> Result<Table, TabularError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    // ── Internal parsing ─────────────────────────────────────────

    /// Splits raw text into records of string fields. Leading blank lines
    /// and trailing blank records are dropped.
    fn split_records(&self, input: &str) -> Vec<Vec<String>> {
        let delim = self.delimiter as char;
        let mut records: Vec<Vec<String>> = Vec::new();
        let mut record: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if quoted {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => quoted = false,
                    _ => field.push(c),
                }
                continue;
            }
            match c {
                '"' if field.is_empty() => quoted = true,
                c if c == delim => record.push(std::mem::take(&mut field)),
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' | '\r' => {
                    record.push(std::mem::take(&mut field));
                    finish_record(&mut records, &mut record);
                }
                _ => field.push(c),
            }
        }

        if !field.is_empty() || !record.is_empty() {
            record.push(field);
            records.push(record);
        }
        while records.last().is_some_and(|r| r.iter().all(|f| f.is_empty())) {
            records.pop();
        }
        records
    }

    fn to_cell(&self, raw: &str) -> Cell {
        let trimmed = raw.trim();
        if self.null_markers.iter().any(|m| m == trimmed) {
            return Cell::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_infinite() => Cell::Missing,
            Ok(v) => Cell::Number(v),
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pushes `record` unless it is a blank line before any data.
fn finish_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>) {
    let blank = record.iter().all(|f| f.is_empty());
    if blank && records.is_empty() {
        record.clear();
    } else {
        records.push(std::mem::take(record));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
