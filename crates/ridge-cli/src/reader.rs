//! Delimited-Text Ingestion
//!
//! Reads comma separated captures into numeric rows or columns. The core
//! detector never parses text; this module is the boundary where tokens
//! become numbers and malformed input is reported with file context.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Read a delimited file as rows of numbers.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("failed to read {}", path.display()))?;

        let mut row = Vec::with_capacity(record.len());
        for field in record.iter() {
            let value: f64 = field.parse().with_context(|| {
                format!(
                    "{}: line {}: not a number: '{}'",
                    path.display(),
                    line + 1,
                    field
                )
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Read a delimited file as columns of numbers.
///
/// Columnwise transpose of [`read_rows`]; every row must have the same
/// width as the first.
pub fn read_columns(path: &Path) -> Result<Vec<Vec<f64>>> {
    let rows = read_rows(path)?;
    let width = match rows.first() {
        Some(first) => first.len(),
        None => return Ok(Vec::new()),
    };

    let mut columns = vec![Vec::with_capacity(rows.len()); width];
    for (line, row) in rows.iter().enumerate() {
        if row.len() != width {
            bail!(
                "{}: line {}: expected {} columns, got {}",
                path.display(),
                line + 1,
                width,
                row.len()
            );
        }
        for (column, &value) in columns.iter_mut().zip(row.iter()) {
            column.push(value);
        }
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_rows() {
        let file = write_temp("0,1.5,-2\n1,2.5,3\n");
        let rows = read_rows(file.path()).unwrap();

        assert_eq!(rows, vec![vec![0.0, 1.5, -2.0], vec![1.0, 2.5, 3.0]]);
    }

    #[test]
    fn test_read_columns_transposes() {
        let file = write_temp("0,10\n1,20\n2,30\n");
        let columns = read_columns(file.path()).unwrap();

        assert_eq!(columns, vec![vec![0.0, 1.0, 2.0], vec![10.0, 20.0, 30.0]]);
    }

    #[test]
    fn test_malformed_token_is_reported_with_context() {
        let file = write_temp("0,1\n2,oops\n");
        let err = read_rows(file.path()).unwrap_err();

        assert!(err.to_string().contains("line 2"), "got: {err}");
        assert!(err.to_string().contains("oops"), "got: {err}");
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let file = write_temp("0,1,2\n3,4\n");
        let err = read_columns(file.path()).unwrap_err();

        assert!(err.to_string().contains("expected 3 columns"), "got: {err}");
    }

    #[test]
    fn test_empty_file() {
        let file = write_temp("");
        assert!(read_rows(file.path()).unwrap().is_empty());
        assert!(read_columns(file.path()).unwrap().is_empty());
    }
}
