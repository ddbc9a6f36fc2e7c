//! Row/column tabular data model.
//!
//! The [`Table`] stores its data column-major with one [`Cell`] vector per
//! named column. Rows are a derived view: `table.rows()[i][j]` always equals
//! `table.columns()[j][i]`, so there is nothing to resynchronise after a
//! mutation.
//!
//! # Cell Types
//!
//! | Variant | Column type | Use case |
//! |---------|-------------|----------|
//! | [`Number`](Cell::Number) | [`DataType::Numeric`] | Continuous/integer values |
//! | [`Text`](Cell::Text) | [`DataType::Text`] | Labels, categories, free text |
//! | [`Missing`](Cell::Missing) | none | Empty or NaN source cells |
//!
//! A column's type is the type of its first cell. Columns are assumed to be
//! homogeneous; statistics re-check every cell before computing anything.
//!
//! # Example
//!
//! ```
//! use u_tabular::table::{Cell, DataType, Table, TableView};
//!
//! let table = Table::from_rows(
//!     vec![
//!         vec![Cell::from("France"), Cell::from(82.5)],
//!         vec![Cell::from("Chad"), Cell::from(54.2)],
//!     ],
//!     vec!["location".into(), "life_expectancy".into()],
//! ).unwrap();
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.column_type("life_expectancy").unwrap(), Some(DataType::Numeric));
//! assert_eq!(table.row(1).unwrap()[0], Cell::from("Chad"));
//! ```

use std::fmt;

use crate::error::TabularError;

// ── Cell ──────────────────────────────────────────────────────────────

/// A single table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Numeric value. `NaN` is treated as missing by cleaning.
    Number(f64),
    /// Textual value.
    Text(String),
    /// Absent value.
    Missing,
}

impl Cell {
    /// Returns the type this cell contributes to its column, `None` if missing.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Number(_) => Some(DataType::Numeric),
            Self::Text(_) => Some(DataType::Text),
            Self::Missing => None,
        }
    }

    /// Returns `true` for [`Cell::Missing`] and for `NaN` numbers.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Number(v) => v.is_nan(),
            Self::Missing => true,
            Self::Text(_) => false,
        }
    }

    /// Returns the numeric value, or `None` for text and missing cells.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text value, or `None` for numbers and missing cells.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Missing => write!(f, "nan"),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// ── DataType ──────────────────────────────────────────────────────────

/// Value type inferred for a column from its first cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Numbers (stored as `f64`).
    Numeric,
    /// Strings.
    Text,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "Numeric"),
            Self::Text => write!(f, "Text"),
        }
    }
}

// ── Metadata ──────────────────────────────────────────────────────────

/// Pipeline history flags. Each flag is set once its transform has run and
/// is never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Missing values were removed by [`Table::clean`].
    pub clean: bool,
    /// Rows were filtered by [`Table::filter_by_value`].
    pub filtered: bool,
    /// Rows were sorted by [`Table::sort_by_column`].
    pub sorted: bool,
    /// Values were rounded by [`Table::round_numeric_columns`].
    pub rounded: bool,
}

// ── TableView ─────────────────────────────────────────────────────────

/// Read access to named columns and indexed rows.
///
/// Statistics in [`descriptive`](crate::descriptive),
/// [`correlation`](crate::correlation) and
/// [`hypothesis`](crate::hypothesis) are written against this trait
/// rather than against [`Table`] directly.
pub trait TableView {
    /// Column names in column order.
    fn column_names(&self) -> &[String];

    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Returns the cells of the column called `name`.
    fn column(&self, name: &str) -> Result<&[Cell], TabularError>;

    /// Returns the row at `index` in column order.
    fn row(&self, index: usize) -> Result<Vec<Cell>, TabularError>;

    /// Number of columns.
    fn column_count(&self) -> usize {
        self.column_names().len()
    }

    /// Type of the first cell of the column, `None` for an empty column or
    /// a missing first cell.
    fn column_type(&self, name: &str) -> Result<Option<DataType>, TabularError> {
        Ok(self.column(name)?.first().and_then(Cell::data_type))
    }
}

// ── Table ─────────────────────────────────────────────────────────────

/// Rectangular table of named, type-homogeneous columns.
///
/// All columns have the same number of rows. Transform methods live in
/// [`transform`](crate::transform); outlier removal in
/// [`outlier`](crate::outlier).
#[derive(Debug, Clone)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<Cell>>,
    row_count: usize,
    pub(crate) metadata: Metadata,
}

impl Table {
    /// Creates an empty table with no columns or rows.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            columns: Vec::new(),
            row_count: 0,
            metadata: Metadata::default(),
        }
    }

    /// Builds a table from rows. Every row must have one cell per name.
    ///
    /// ```
    /// use u_tabular::table::{Cell, Table};
    ///
    /// let t = Table::from_rows(vec![vec![Cell::from(1.0)]], vec!["x".into()]).unwrap();
    /// assert_eq!(t.columns()[0], vec![Cell::from(1.0)]);
    /// ```
    pub fn from_rows(rows: Vec<Vec<Cell>>, names: Vec<String>) -> Result<Self, TabularError> {
        let n_cols = names.len();
        let n_rows = rows.len();
        let mut columns: Vec<Vec<Cell>> = vec![Vec::with_capacity(n_rows); n_cols];
        for row in rows {
            if row.len() != n_cols {
                return Err(TabularError::DimensionMismatch {
                    expected: n_cols,
                    actual: row.len(),
                });
            }
            for (col, cell) in columns.iter_mut().zip(row) {
                col.push(cell);
            }
        }
        Ok(Self {
            names,
            columns,
            row_count: n_rows,
            metadata: Metadata::default(),
        })
    }

    /// Builds a table from column vectors of equal length.
    pub fn from_columns(columns: Vec<Vec<Cell>>, names: Vec<String>) -> Result<Self, TabularError> {
        if columns.len() != names.len() {
            return Err(TabularError::DimensionMismatch {
                expected: names.len(),
                actual: columns.len(),
            });
        }
        let mut table = Self::new();
        for (name, column) in names.into_iter().zip(columns) {
            table.add_column(name, column)?;
        }
        Ok(table)
    }

    /// Appends a named column.
    ///
    /// Returns an error if the column length doesn't match the existing
    /// row count (unless this is the first column).
    pub fn add_column(&mut self, name: String, column: Vec<Cell>) -> Result<(), TabularError> {
        if self.columns.is_empty() {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(TabularError::DimensionMismatch {
                expected: self.row_count,
                actual: column.len(),
            });
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Returns `true` if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the pipeline history flags.
    pub fn metadata(&self) -> Metadata {
        self.metadata
    }

    /// Returns all columns in column order.
    pub fn columns(&self) -> &[Vec<Cell>] {
        &self.columns
    }

    /// Returns the column at position `index`.
    pub fn column_at(&self, index: usize) -> Option<&[Cell]> {
        self.columns.get(index).map(|c| c.as_slice())
    }

    /// Materialises every row.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        (0..self.row_count).map(|i| self.row_unchecked(i)).collect()
    }

    /// Returns the position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Result<usize, TabularError> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| TabularError::UnknownColumn {
                name: name.to_string(),
                available: self.names.clone(),
            })
    }

    /// Returns the inferred type of every column.
    pub fn column_types(&self) -> Vec<Option<DataType>> {
        self.columns
            .iter()
            .map(|c| c.first().and_then(Cell::data_type))
            .collect()
    }

    /// Returns a summary of column names and types.
    pub fn schema(&self) -> Vec<(&str, Option<DataType>)> {
        self.names
            .iter()
            .map(|s| s.as_str())
            .zip(self.column_types())
            .collect()
    }

    /// Renames a column in place.
    pub fn rename_column(&mut self, old_name: &str, new_name: &str) -> Result<(), TabularError> {
        let index = self.column_index(old_name)?;
        self.names[index] = new_name.to_string();
        Ok(())
    }

    /// Removes the rows at `indices` and returns them.
    ///
    /// Duplicate indices remove their row once; the returned rows follow the
    /// first occurrence of each index. Remaining rows keep their relative
    /// order. Every index is checked before anything is removed.
    ///
    /// ```
    /// use u_tabular::table::{Cell, Table, TableView};
    ///
    /// let mut t = Table::from_columns(
    ///     vec![vec![Cell::from(1.0), Cell::from(2.0), Cell::from(3.0)]],
    ///     vec!["x".into()],
    /// ).unwrap();
    /// let removed = t.remove_rows(&[1, 1]).unwrap();
    /// assert_eq!(removed, vec![vec![Cell::from(2.0)]]);
    /// assert_eq!(t.row_count(), 2);
    /// ```
    pub fn remove_rows(&mut self, indices: &[usize]) -> Result<Vec<Vec<Cell>>, TabularError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.row_count) {
            return Err(TabularError::IndexOutOfRange {
                index: bad,
                max: self.row_count.saturating_sub(1),
            });
        }

        let mut marked = vec![false; self.row_count];
        let mut removed = Vec::new();
        for &i in indices {
            if !marked[i] {
                marked[i] = true;
                removed.push(self.row_unchecked(i));
            }
        }

        for column in &mut self.columns {
            *column = std::mem::take(column)
                .into_iter()
                .zip(marked.iter())
                .filter(|(_, &gone)| !gone)
                .map(|(cell, _)| cell)
                .collect();
        }
        self.row_count -= removed.len();
        tracing::debug!(removed = removed.len(), remaining = self.row_count, "removed rows");
        Ok(removed)
    }

    /// Reorders every column so that new row `i` is old row `order[i]`.
    /// `order` must be a permutation of `0..row_count`.
    pub(crate) fn reorder_rows(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.row_count);
        for column in &mut self.columns {
            let reordered: Vec<Cell> = order.iter().map(|&i| column[i].clone()).collect();
            *column = reordered;
        }
    }

    /// Replaces the cells of the column at `index`. Length must match.
    pub(crate) fn replace_column(&mut self, index: usize, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.row_count);
        self.columns[index] = cells;
    }

    fn row_unchecked(&self, index: usize) -> Vec<Cell> {
        self.columns.iter().map(|c| c[index].clone()).collect()
    }
}

impl TableView for Table {
    fn column_names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    fn row_count(&self) -> usize {
        self.row_count
    }

    fn column(&self, name: &str) -> Result<&[Cell], TabularError> {
        let index = self.column_index(name)?;
        Ok(&self.columns[index])
    }

    fn row(&self, index: usize) -> Result<Vec<Cell>, TabularError> {
        if index >= self.row_count {
            return Err(TabularError::IndexOutOfRange {
                index,
                max: self.row_count.saturating_sub(1),
            });
        }
        Ok(self.row_unchecked(index))
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

const RULE_WIDTH: usize = 100;

/// CSV-style rendering framed by separator rules, for diagnostics.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.names.join(", "))?;
        for i in 0..self.row_count {
            let line: Vec<String> = self.columns.iter().map(|c| c[i].to_string()).collect();
            writeln!(f, "{}", line.join(", "))?;
        }
        write!(f, "{rule}")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec![
                vec![Cell::from("a"), Cell::from(1.0), Cell::from(10.0)],
                vec![Cell::from("b"), Cell::from(2.0), Cell::from(20.0)],
                vec![Cell::from("c"), Cell::from(3.0), Cell::from(30.0)],
                vec![Cell::from("d"), Cell::from(4.0), Cell::from(40.0)],
            ],
            vec!["name".into(), "x".into(), "y".into()],
        )
        .expect("rectangular rows")
    }

    // ── Cell tests ───────────────────────────────────────────────

    #[test]
    fn cell_types() {
        assert_eq!(Cell::from(1.5).data_type(), Some(DataType::Numeric));
        assert_eq!(Cell::from("x").data_type(), Some(DataType::Text));
        assert_eq!(Cell::Missing.data_type(), None);
    }

    #[test]
    fn cell_missing_includes_nan() {
        assert!(Cell::Missing.is_missing());
        assert!(Cell::Number(f64::NAN).is_missing());
        assert!(!Cell::Number(0.0).is_missing());
        assert!(!Cell::from("nan").is_missing());
    }

    // ── Construction ─────────────────────────────────────────────

    #[test]
    fn rows_and_columns_agree() {
        let t = sample();
        let rows = t.rows();
        for (i, row) in rows.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                assert_eq!(&t.columns()[j][i], cell);
            }
        }
        assert_eq!(t.row_count(), 4);
        assert_eq!(t.column_count(), 3);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let result = Table::from_rows(
            vec![vec![Cell::from(1.0), Cell::from(2.0)], vec![Cell::from(3.0)]],
            vec!["a".into(), "b".into()],
        );
        assert!(matches!(result, Err(TabularError::DimensionMismatch { expected: 2, actual: 1 })));
    }

    #[test]
    fn from_columns_round_trip() {
        let t = sample();
        let rebuilt = Table::from_columns(t.columns().to_vec(), t.column_names().to_vec()).unwrap();
        assert_eq!(rebuilt.rows(), t.rows());
    }

    #[test]
    fn empty_rows_keep_column_names() {
        let t = Table::from_rows(Vec::new(), vec!["x".into()]).unwrap();
        assert_eq!(t.row_count(), 0);
        assert_eq!(t.column_count(), 1);
        assert_eq!(t.column_type("x").unwrap(), None);
    }

    // ── Lookup ───────────────────────────────────────────────────

    #[test]
    fn unknown_column_reports_names() {
        let t = sample();
        let err = t.column("z").unwrap_err();
        match err {
            TabularError::UnknownColumn { name, available } => {
                assert_eq!(name, "z");
                assert_eq!(available, vec!["name", "x", "y"]);
            }
            _ => panic!("expected UnknownColumn"),
        }
    }

    #[test]
    fn row_out_of_range() {
        let t = sample();
        assert_eq!(
            t.row(4).unwrap_err(),
            TabularError::IndexOutOfRange { index: 4, max: 3 }
        );
        assert_eq!(t.row(3).unwrap()[0], Cell::from("d"));
    }

    #[test]
    fn column_type_from_first_cell() {
        let t = sample();
        assert_eq!(t.column_type("name").unwrap(), Some(DataType::Text));
        assert_eq!(t.column_type("x").unwrap(), Some(DataType::Numeric));
        assert_eq!(
            t.schema(),
            vec![
                ("name", Some(DataType::Text)),
                ("x", Some(DataType::Numeric)),
                ("y", Some(DataType::Numeric)),
            ]
        );
    }

    #[test]
    fn rename_column() {
        let mut t = sample();
        t.rename_column("x", "gdp").unwrap();
        assert!(t.column("gdp").is_ok());
        assert!(t.column("x").is_err());
        assert!(t.rename_column("x", "again").is_err());
    }

    // ── Row removal ──────────────────────────────────────────────

    #[test]
    fn remove_rows_preserves_order() {
        let mut t = sample();
        let removed = t.remove_rows(&[2, 0]).unwrap();
        assert_eq!(removed[0][0], Cell::from("c"));
        assert_eq!(removed[1][0], Cell::from("a"));
        let names: Vec<&str> = t.column("name").unwrap().iter().filter_map(Cell::as_text).collect();
        assert_eq!(names, vec!["b", "d"]);
    }

    #[test]
    fn remove_rows_duplicate_indices() {
        let mut t = sample();
        let removed = t.remove_rows(&[2, 2]).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column("x").unwrap().len(), 3);
    }

    #[test]
    fn remove_rows_with_sentinel_like_values() {
        let mut t = Table::from_columns(
            vec![vec![Cell::Missing, Cell::Number(0.0), Cell::Missing]],
            vec!["v".into()],
        )
        .unwrap();
        t.remove_rows(&[1]).unwrap();
        assert_eq!(t.column("v").unwrap(), &[Cell::Missing, Cell::Missing]);
    }

    #[test]
    fn remove_rows_out_of_range_leaves_table_intact() {
        let mut t = sample();
        let err = t.remove_rows(&[0, 9]).unwrap_err();
        assert!(matches!(err, TabularError::IndexOutOfRange { index: 9, .. }));
        assert_eq!(t.row_count(), 4);
    }

    // ── Rendering ────────────────────────────────────────────────

    #[test]
    fn display_is_csv_like() {
        let t = Table::from_rows(
            vec![vec![Cell::from("a"), Cell::from(1.5)]],
            vec!["name".into(), "x".into()],
        )
        .unwrap();
        let text = t.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "-".repeat(100));
        assert_eq!(lines[1], "name, x");
        assert_eq!(lines[2], "a, 1.5");
        assert_eq!(lines[3], "-".repeat(100));
    }
}
