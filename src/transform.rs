//! In-place table transforms: cleaning, filtering, sorting and rounding,
//! plus column subsetting.
//!
//! Each transform resolves and validates all of its inputs before it
//! touches the table, so an error leaves the table unchanged. Successful
//! transforms set the matching [`Metadata`](crate::table::Metadata) flag.
//!
//! # Example
//!
//! ```
//! use u_tabular::table::{Cell, Table, TableView};
//! use u_tabular::transform::RoundingConfig;
//!
//! let mut t = Table::from_rows(
//!     vec![
//!         vec![Cell::from("a"), Cell::from(3.14159)],
//!         vec![Cell::from("b"), Cell::Missing],
//!         vec![Cell::from("c"), Cell::from(2.71828)],
//!     ],
//!     vec!["name".into(), "v".into()],
//! ).unwrap();
//!
//! assert_eq!(t.clean(&["v"]).unwrap(), vec![1]);
//! t.sort_by_column("v", false).unwrap();
//! t.round_numeric_columns(&RoundingConfig::default()).unwrap();
//! assert_eq!(t.column("v").unwrap(), &[Cell::from(2.72), Cell::from(3.14)]);
//! ```

use crate::descriptive::{describe_type, round_sig};
use crate::error::TabularError;
use crate::table::{Cell, DataType, Table, TableView};

// ── Configuration ─────────────────────────────────────────────────────

/// Configuration for [`Table::round_numeric_columns`].
#[derive(Debug, Clone)]
pub struct RoundingConfig {
    /// Significant figures to keep. Default: 3.
    pub significant_figures: u32,
    /// Columns to round. Default: `None` (all columns).
    pub columns: Option<Vec<String>>,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            significant_figures: 3,
            columns: None,
        }
    }
}

impl RoundingConfig {
    /// Sets the number of significant figures.
    pub fn significant_figures(mut self, figures: u32) -> Self {
        self.significant_figures = figures;
        self
    }

    /// Restricts rounding to the named columns.
    pub fn columns(mut self, names: &[&str]) -> Self {
        self.columns = Some(names.iter().map(|s| (*s).to_string()).collect());
        self
    }
}

// ── Transforms ────────────────────────────────────────────────────────

impl Table {
    /// Removes every row with a missing or `NaN` cell in any of `columns`.
    ///
    /// Returns the removed row indices, sorted and numbered as they were
    /// before removal.
    pub fn clean(&mut self, columns: &[&str]) -> Result<Vec<usize>, TabularError> {
        let positions = columns
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut dirty = vec![false; self.row_count()];
        for &p in &positions {
            for (i, cell) in self.columns()[p].iter().enumerate() {
                if cell.is_missing() {
                    dirty[i] = true;
                }
            }
        }
        let removed: Vec<usize> = dirty
            .iter()
            .enumerate()
            .filter(|(_, &d)| d)
            .map(|(i, _)| i)
            .collect();

        self.remove_rows(&removed)?;
        self.metadata.clean = true;
        tracing::debug!(rows = removed.len(), ?columns, "cleaned missing values");
        Ok(removed)
    }

    /// Keeps only the rows whose `column` cell equals `value` exactly.
    pub fn filter_by_value(
        &mut self,
        column: &str,
        value: impl Into<Cell>,
    ) -> Result<(), TabularError> {
        let value = value.into();
        let cells = self.column(column)?;
        let rejected: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != value)
            .map(|(i, _)| i)
            .collect();

        self.remove_rows(&rejected)?;
        self.metadata.filtered = true;
        tracing::debug!(column, %value, rejected = rejected.len(), "filtered rows");
        Ok(())
    }

    /// Stable sort of rows by a numeric column.
    ///
    /// Rows with equal keys keep their relative order in both directions.
    pub fn sort_by_column(&mut self, column: &str, descending: bool) -> Result<(), TabularError> {
        let found = self.column_type(column)?;
        if found != Some(DataType::Numeric) {
            return Err(TabularError::WrongColumnType {
                column: column.to_string(),
                found: describe_type(found),
            });
        }

        let keys: Vec<f64> = self
            .column(column)?
            .iter()
            .map(|c| c.as_number().unwrap_or(f64::NAN))
            .collect();
        let mut order: Vec<usize> = (0..keys.len()).collect();
        if descending {
            order.sort_by(|&a, &b| keys[b].total_cmp(&keys[a]));
        } else {
            order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
        }

        self.reorder_rows(&order);
        self.metadata.sorted = true;
        tracing::debug!(column, descending, "sorted rows");
        Ok(())
    }

    /// Rounds the numeric cells of the configured columns to a number of
    /// significant figures. Non-numeric columns are left as they are.
    ///
    /// Fails with [`TabularError::DirtyData`] unless [`Table::clean`] has
    /// run on this table.
    pub fn round_numeric_columns(&mut self, config: &RoundingConfig) -> Result<(), TabularError> {
        if !self.metadata.clean {
            return Err(TabularError::DirtyData);
        }

        let positions: Vec<usize> = match &config.columns {
            Some(names) => names
                .iter()
                .map(|n| self.column_index(n))
                .collect::<Result<_, _>>()?,
            None => (0..self.column_count()).collect(),
        };

        let figures = config.significant_figures;
        for p in positions {
            let column = &self.columns()[p];
            if column.first().and_then(Cell::data_type) != Some(DataType::Numeric) {
                continue;
            }
            let rounded = column
                .iter()
                .map(|c| match c {
                    Cell::Number(v) => Cell::Number(round_sig(*v, figures)),
                    other => other.clone(),
                })
                .collect();
            self.replace_column(p, rounded);
        }

        self.metadata.rounded = true;
        tracing::debug!(figures, "rounded numeric columns");
        Ok(())
    }

    /// Returns a new table holding only `columns`, in the given order.
    ///
    /// Fails with [`TabularError::InvalidSubset`] when `columns` is empty or
    /// longer than this table's column count.
    ///
    /// ```
    /// use u_tabular::table::{Cell, Table, TableView};
    ///
    /// let t = Table::from_rows(
    ///     vec![vec![Cell::from(1.0), Cell::from(2.0), Cell::from(3.0)]],
    ///     vec!["a".into(), "b".into(), "c".into()],
    /// ).unwrap();
    /// let s = t.subset(&["c", "a"]).unwrap();
    /// assert_eq!(s.column_names(), &["c", "a"]);
    /// assert_eq!(s.row(0).unwrap(), vec![Cell::from(3.0), Cell::from(1.0)]);
    /// ```
    pub fn subset(&self, columns: &[&str]) -> Result<Table, TabularError> {
        if columns.is_empty() || columns.len() > self.column_count() {
            return Err(TabularError::InvalidSubset {
                requested: columns.len(),
                available: self.column_count(),
            });
        }

        let mut subset = Table::new();
        for &name in columns {
            subset.add_column(name.to_string(), self.column(name)?.to_vec())?;
        }
        Ok(subset)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
