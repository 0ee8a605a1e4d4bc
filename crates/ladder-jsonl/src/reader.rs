//! JSONL reading operations.
//!
//! This module provides async functionality for reading JSONL files line-by-line
//! with buffering and line number tracking for error reporting.

use crate::error::{Error, Result};
use crate::warning::Warning;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Async reader for JSONL (JSON Lines) data.
///
/// `JsonlReader` wraps an async reader and provides buffered reading of JSONL
/// formatted data. It tracks line numbers so that parse failures can point
/// at the offending line.
///
/// # Examples
///
/// ```no_run
/// use ladder_jsonl::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("positions.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// while let Some(value) = reader.next_record::<serde_json::Value>().await? {
///     println!("{value}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    reader: BufReader<R>,
    /// 1-based number of the last line read; 0 before any read.
    line_number: usize,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    /// Creates a new `JsonlReader` with a custom buffer capacity.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
        }
    }

    /// Returns the 1-based line number of the last line read (0 before any read).
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next raw line, without its trailing newline.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the underlying reader fails.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let read = self.reader.read_line(&mut buf).await?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let trimmed_len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed_len);
        Ok(Some(buf))
    }

    /// Reads and deserializes the next non-blank line.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRecord` when a line cannot be deserialized into
    /// `T`, or `Error::Io` on read failure.
    pub async fn next_record<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        while let Some(line) = self.read_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            return serde_json::from_str(&line)
                .map(Some)
                .map_err(|source| Error::InvalidRecord {
                    line_number: self.line_number,
                    source,
                });
        }
        Ok(None)
    }

    /// Reads the next record that deserializes cleanly, recording a warning
    /// for every line skipped along the way.
    ///
    /// Syntax errors become [`Warning::MalformedJson`]; well-formed JSON of the
    /// wrong shape becomes [`Warning::SkippedLine`].
    ///
    /// # Errors
    ///
    /// Only I/O failures are returned as errors.
    pub async fn next_record_resilient<T: DeserializeOwned>(
        &mut self,
        warnings: &mut Vec<Warning>,
    ) -> Result<Option<T>> {
        while let Some(line) = self.read_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => return Ok(Some(record)),
                Err(e) => {
                    let warning = match e.classify() {
                        Category::Data => Warning::SkippedLine {
                            line_number: self.line_number,
                            reason: e.to_string(),
                        },
                        Category::Syntax | Category::Eof | Category::Io => {
                            Warning::MalformedJson {
                                line_number: self.line_number,
                                error: e.to_string(),
                            }
                        }
                    };
                    tracing::debug!(warning = %warning, "Skipping JSONL line");
                    warnings.push(warning);
                }
            }
        }
        Ok(None)
    }
}

/// Reads every record of a JSONL file, skipping lines that fail to parse.
///
/// Returns the parsed records in file order together with one warning per
/// skipped line.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be opened or read.
///
/// # Examples
///
/// ```no_run
/// use ladder_jsonl::read_jsonl_resilient;
///
/// # async fn example() -> ladder_jsonl::Result<()> {
/// let (records, warnings) =
///     read_jsonl_resilient::<serde_json::Value, _>(".ladder/positions.jsonl").await?;
/// for warning in &warnings {
///     eprintln!("{warning}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref()).await?;
    let mut reader = JsonlReader::new(file);
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    while let Some(record) = reader.next_record_resilient(&mut warnings).await? {
        records.push(record);
    }

    tracing::debug!(
        path = %path.as_ref().display(),
        records = records.len(),
        warnings = warnings.len(),
        "Read JSONL file"
    );
    Ok((records, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Cursor;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[test]
    fn new_reader_starts_at_line_zero() {
        let reader = JsonlReader::new(Cursor::new(b""));
        assert_eq!(reader.line_number(), 0);
    }

    #[tokio::test]
    async fn read_line_strips_line_endings() {
        let mut reader = JsonlReader::new(Cursor::new(b"a\r\nb\n".to_vec()));
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("a"));
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("b"));
        assert_eq!(reader.read_line().await.unwrap(), None);
        assert_eq!(reader.line_number(), 2);
    }

    #[tokio::test]
    async fn next_record_skips_blank_lines() {
        let mut reader = JsonlReader::with_capacity(Cursor::new(b"\n  \n{\"id\":4}\n".to_vec()), 16);
        let row: Option<Row> = reader.next_record().await.unwrap();
        assert_eq!(row, Some(Row { id: 4 }));
        assert_eq!(reader.line_number(), 3);
    }

    #[tokio::test]
    async fn next_record_reports_line_of_bad_json() {
        let mut reader = JsonlReader::new(Cursor::new(b"{\"id\":1}\n{oops}\n".to_vec()));
        let _first: Option<Row> = reader.next_record().await.unwrap();
        let err = reader.next_record::<Row>().await.unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }

    #[tokio::test]
    async fn resilient_read_classifies_failures() {
        let data = b"{\"id\":1}\n{broken\n{\"id\":\"x\"}\n{\"id\":2}\n".to_vec();
        let mut reader = JsonlReader::new(Cursor::new(data));
        let mut warnings = Vec::new();
        let mut rows = Vec::new();
        while let Some(row) = reader
            .next_record_resilient::<Row>(&mut warnings)
            .await
            .unwrap()
        {
            rows.push(row);
        }

        assert_eq!(rows, vec![Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].kind(), "malformed_json");
        assert_eq!(warnings[0].line_number(), 2);
        assert_eq!(warnings[1].kind(), "skipped_line");
        assert_eq!(warnings[1].line_number(), 3);
    }
}
