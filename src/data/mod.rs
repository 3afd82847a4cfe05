//! Tabular data containers and CSV loading.
//!
//! [`Table`] is the in-memory form of one input file: named columns over a
//! feature-major `f32` matrix. Tables are read once at startup and immutable
//! afterwards; row and column order are preserved exactly as stored.

use std::path::PathBuf;

use ndarray::Array2;

mod csv;

pub use csv::read_table;

// =============================================================================
// DataError
// =============================================================================

/// Errors produced while loading or validating tabular data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed CSV (ragged rows, bad encoding, ...).
    #[error("{path}: malformed CSV: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    /// A cell could not be parsed as a number.
    #[error("{path}: row {row}, column '{column}': invalid number '{value}'")]
    Parse {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// The file has a header but no data rows.
    #[error("{path}: empty table (no data rows)")]
    Empty { path: PathBuf },

    /// Two tables that must share a column schema do not.
    #[error("column schema mismatch at position {position}: expected '{expected}', found '{found}'")]
    SchemaMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    /// Two tables that must share a column schema have different widths.
    #[error("column count mismatch: {left} vs {right} columns")]
    ColumnCount { left: usize, right: usize },

    /// A label table must hold exactly one column.
    #[error("expected a single label column, found {n_cols}")]
    NotSingleColumn { n_cols: usize },

    /// A feature table and its label table must be row-aligned.
    #[error("row count mismatch: features have {features} rows, labels have {labels}")]
    RowMismatch { features: usize, labels: usize },
}

// =============================================================================
// Table
// =============================================================================

/// An immutable named-column table.
///
/// # Storage Layout
///
/// Values are stored **column-major** relative to the file: shape
/// `[n_cols, n_rows]`, so each column's values are contiguous in memory.
///
/// # Example
///
/// ```
/// use capboost::data::Table;
/// use ndarray::array;
///
/// let table = Table::new(
///     vec!["a".into(), "b".into()],
///     array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
/// );
/// assert_eq!(table.n_rows(), 3);
/// assert_eq!(table.column(1), &[4.0, 5.0, 6.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    values: Array2<f32>,
}

impl Table {
    /// Create a table from column names and a `[n_cols, n_rows]` matrix.
    ///
    /// # Panics
    ///
    /// Debug-asserts that the name count matches the matrix height.
    pub fn new(columns: Vec<String>, values: Array2<f32>) -> Self {
        debug_assert_eq!(
            columns.len(),
            values.nrows(),
            "one name per stored column"
        );
        Self { columns, values }
    }

    /// Number of observations (file rows).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.values.ncols()
    }

    /// Number of named columns.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.values.nrows()
    }

    /// Column names, in file order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// All values of one column, in row order.
    #[inline]
    pub fn column(&self, idx: usize) -> &[f32] {
        self.values
            .row(idx)
            .to_slice()
            .expect("column-major storage is contiguous")
    }

    /// Single cell access: column `col` of observation `row`.
    #[inline]
    pub fn value(&self, col: usize, row: usize) -> f32 {
        self.values[[col, row]]
    }

    /// Verify that `other` carries the same columns in the same order.
    ///
    /// Used to guarantee that a model trained on one table can be applied to
    /// another without silent column reordering.
    pub fn check_schema_matches(&self, other: &Table) -> Result<(), DataError> {
        if self.n_cols() != other.n_cols() {
            return Err(DataError::ColumnCount {
                left: self.n_cols(),
                right: other.n_cols(),
            });
        }
        for (position, (a, b)) in self.columns.iter().zip(other.columns.iter()).enumerate() {
            if a != b {
                return Err(DataError::SchemaMismatch {
                    position,
                    expected: a.clone(),
                    found: b.clone(),
                });
            }
        }
        Ok(())
    }

    /// Interpret this table as a label table: exactly one named column.
    ///
    /// Returns the column name and its values in row order.
    pub fn single_column(&self) -> Result<(&str, &[f32]), DataError> {
        if self.n_cols() != 1 {
            return Err(DataError::NotSingleColumn {
                n_cols: self.n_cols(),
            });
        }
        Ok((&self.columns[0], self.column(0)))
    }
}

// =============================================================================
// Tests
// =============================================================================
