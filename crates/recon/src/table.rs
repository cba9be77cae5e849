//! Delimited source loading with an alias-tolerant column index.

use std::collections::HashMap;

use crate::error::MusterError;
use crate::normalize::clean;

/// One loaded tabular source: cleaned rows plus a case-insensitive,
/// first-occurrence-wins column index. Rows may be ragged; a missing
/// trailing field reads as empty, never as an error.
#[derive(Debug, Clone)]
pub struct SourceTable {
    columns: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Parse delimited text. Every field, header included, goes through
    /// [`clean`]. Fails only when there is no header row to index.
    pub fn parse(source: &str, text: &str) -> Result<Self, MusterError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();
        let header = match records.next() {
            Some(Ok(rec)) => rec,
            Some(Err(e)) => return Err(MusterError::Io(format!("{source}: {e}"))),
            None => {
                return Err(MusterError::MissingHeader {
                    source: source.to_string(),
                })
            }
        };

        let mut columns = HashMap::new();
        for (i, field) in header.iter().enumerate() {
            let key = clean(field).to_lowercase();
            columns.entry(key).or_insert(i);
        }

        let mut rows = Vec::new();
        for record in records {
            let record = record.map_err(|e| MusterError::Io(format!("{source}: {e}")))?;
            rows.push(record.iter().map(clean).collect());
        }

        Ok(Self { columns, rows })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Zero-based position of a column, if the header carries it.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(&clean(name).to_lowercase()).copied()
    }

    /// First candidate column that exists and is in range for `row`;
    /// empty string when none match or the row is short.
    pub fn get<'a>(&self, row: &'a [String], candidates: &[&str]) -> &'a str {
        for name in candidates {
            if let Some(i) = self.column(name) {
                if let Some(value) = row.get(i) {
                    return value;
                }
            }
        }
        ""
    }
}
