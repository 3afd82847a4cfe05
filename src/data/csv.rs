//! CSV loading for [`Table`].
//!
//! Delimited text with a required header row. Values must all parse as
//! numbers; anything else is a fatal parse error naming the offending cell.

use std::fs::File;
use std::path::Path;

use ndarray::Array2;

use super::{DataError, Table};

/// Read a CSV file into a [`Table`], preserving column and row order.
///
/// # Errors
///
/// - [`DataError::Io`] if the path is missing or unreadable
/// - [`DataError::Csv`] on malformed CSV structure
/// - [`DataError::Parse`] on a non-numeric cell
/// - [`DataError::Empty`] if the file has a header but no data rows
pub fn read_table(path: &Path) -> Result<Table, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_owned(),
        source,
    })?;

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|source| DataError::Csv {
            path: path.to_owned(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();
    let n_cols = columns.len();

    // Row-major scratch; transposed into column-major storage below.
    let mut cells: Vec<f32> = Vec::new();
    let mut n_rows = 0usize;

    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| DataError::Csv {
            path: path.to_owned(),
            source,
        })?;
        for (col_idx, field) in record.iter().enumerate() {
            let value = field.trim().parse::<f32>().map_err(|_| DataError::Parse {
                path: path.to_owned(),
                row: row_idx,
                column: columns[col_idx].clone(),
                value: field.to_string(),
            })?;
            cells.push(value);
        }
        n_rows += 1;
    }

    if n_rows == 0 {
        return Err(DataError::Empty {
            path: path.to_owned(),
        });
    }

    let mut values = Array2::<f32>::zeros((n_cols, n_rows));
    for row in 0..n_rows {
        for col in 0..n_cols {
            values[[col, row]] = cells[row * n_cols + col];
        }
    }

    Ok(Table::new(columns, values))
}

// =============================================================================
// Tests
// =============================================================================
