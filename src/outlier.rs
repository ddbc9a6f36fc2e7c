//! Tukey-fence outlier removal over a pair of numeric columns.
//!
//! Fences are computed independently per column from exclusive-method
//! quartiles: `low = Q1 − k·IQR`, `high = Q3 + k·IQR` with `k = 1.5` by
//! default. A value strictly above `high` or strictly below `low` is an
//! outlier; values on a fence are kept.
//!
//! The X column is scanned first. The Y scan then depends on
//! [`OutlierMode`]:
//!
//! - [`OutlierMode::Normal`] skips rows already flagged by X on the same
//!   side and records Y outliers by row index.
//! - [`OutlierMode::Boxplot`] records every Y outlier, overlap included,
//!   and stores the full row content instead of the index.
//!
//! Every flagged row is removed from the table and the bookkeeping is
//! returned as an [`OutlierReport`]; nothing is stored on the table.
//!
//! # Example
//!
//! ```
//! use u_tabular::outlier::{remove_outliers, OutlierConfig};
//! use u_tabular::table::{Cell, Table, TableView};
//!
//! let xs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 100.0];
//! let ys = [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0];
//! let mut table = Table::from_columns(
//!     vec![
//!         xs.iter().map(|&v| Cell::from(v)).collect(),
//!         ys.iter().map(|&v| Cell::from(v)).collect(),
//!     ],
//!     vec!["x".into(), "y".into()],
//! ).unwrap();
//!
//! let report = remove_outliers(&mut table, None, None, &OutlierConfig::default()).unwrap();
//! assert_eq!(report.high_x_indices, vec![7]);
//! assert_eq!(report.outliers, vec![vec![Cell::from(100.0), Cell::from(16.0)]]);
//! assert_eq!(table.row_count(), 7);
//! ```

use std::fmt;

use crate::correlation::resolve_pair;
use crate::descriptive::{numeric_values, quartile_cuts};
use crate::error::TabularError;
use crate::table::{Cell, Table, TableView};

// ── Configuration ─────────────────────────────────────────────────────

/// Bookkeeping mode for the Y-column scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlierMode {
    /// De-duplicate against X outliers; record Y outliers by index.
    #[default]
    Normal,
    /// Record every Y outlier as a full row copy.
    Boxplot,
}

/// Configuration for [`remove_outliers`].
#[derive(Debug, Clone)]
pub struct OutlierConfig {
    /// IQR multiplier for the fences. Default: 1.5.
    pub fence_multiplier: f64,
    /// Y-scan bookkeeping mode. Default: [`OutlierMode::Normal`].
    pub mode: OutlierMode,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            fence_multiplier: 1.5,
            mode: OutlierMode::Normal,
        }
    }
}

impl OutlierConfig {
    /// Sets the IQR multiplier.
    pub fn fence_multiplier(mut self, k: f64) -> Self {
        self.fence_multiplier = k;
        self
    }

    /// Sets the bookkeeping mode.
    pub fn mode(mut self, mode: OutlierMode) -> Self {
        self.mode = mode;
        self
    }
}

// ── Result ────────────────────────────────────────────────────────────

/// Lower and upper Tukey fences of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fences {
    /// `Q1 − k·IQR`.
    pub low: f64,
    /// `Q3 + k·IQR`.
    pub high: f64,
}

impl Fences {
    /// Computes the fences of `values`, or `None` with fewer than two values.
    pub fn from_values(values: &[f64], k: f64) -> Option<Self> {
        let [q1, _, q3] = quartile_cuts(values)?;
        let iqr = q3 - q1;
        Some(Self {
            low: q1 - k * iqr,
            high: q3 + k * iqr,
        })
    }

    /// Returns `true` if `v` lies strictly outside the fences.
    #[inline]
    pub fn excludes(&self, v: f64) -> bool {
        v > self.high || v < self.low
    }
}

/// Y-outlier records, whose shape depends on [`OutlierMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum YOutliers {
    /// Row indices (normal mode).
    Indices(Vec<usize>),
    /// Row copies (boxplot mode).
    Entries(Vec<Vec<Cell>>),
}

impl YOutliers {
    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            Self::Indices(v) => v.len(),
            Self::Entries(v) => v.len(),
        }
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn empty(mode: OutlierMode) -> Self {
        match mode {
            OutlierMode::Normal => Self::Indices(Vec::new()),
            OutlierMode::Boxplot => Self::Entries(Vec::new()),
        }
    }

    fn record(&mut self, index: usize, row: impl FnOnce() -> Vec<Cell>) {
        match self {
            Self::Indices(v) => v.push(index),
            Self::Entries(v) => v.push(row()),
        }
    }
}

/// Outcome of one [`remove_outliers`] call.
///
/// Indices refer to row positions before removal.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierReport {
    /// Predictor column name.
    pub x_column: String,
    /// Response column name.
    pub y_column: String,
    /// Column names of the table at call time, for locating cells in the
    /// stored rows.
    pub source_columns: Vec<String>,
    /// Mode the report was produced with.
    pub mode: OutlierMode,
    /// Fences of the X column.
    pub x_fences: Fences,
    /// Fences of the Y column.
    pub y_fences: Fences,
    /// Rows with X above the upper fence.
    pub high_x_indices: Vec<usize>,
    /// Rows with X below the lower fence.
    pub low_x_indices: Vec<usize>,
    /// Rows with Y above the upper fence.
    pub high_y: YOutliers,
    /// Rows with Y below the lower fence.
    pub low_y: YOutliers,
    /// Removed rows flagged on the high side.
    pub top_entries: Vec<Vec<Cell>>,
    /// Removed rows flagged on the low side.
    pub bottom_entries: Vec<Vec<Cell>>,
    /// `top_entries` followed by `bottom_entries`.
    pub outliers: Vec<Vec<Cell>>,
}

impl OutlierReport {
    /// `(x, y)` coordinates of the high-side entries.
    pub fn top_points(&self) -> Vec<(f64, f64)> {
        self.points(&self.top_entries)
    }

    /// `(x, y)` coordinates of the low-side entries.
    pub fn bottom_points(&self) -> Vec<(f64, f64)> {
        self.points(&self.bottom_entries)
    }

    fn points(&self, entries: &[Vec<Cell>]) -> Vec<(f64, f64)> {
        let position = |name: &str| self.source_columns.iter().position(|n| n == name);
        let (Some(xi), Some(yi)) = (position(&self.x_column), position(&self.y_column)) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|row| Some((row.get(xi)?.as_number()?, row.get(yi)?.as_number()?)))
            .collect()
    }

    /// Lists the `label_column` value of every outlier, grouped as low X,
    /// high X, low Y and high Y.
    ///
    /// `parent` must hold the rows in the order the outlier call saw them
    /// (typically the table a pair view was cut from). Boxplot-mode Y
    /// records carry their own rows, so their labels are read from the
    /// stored copy and `label_column` must be one of `source_columns`.
    pub fn describe<T: TableView + ?Sized>(
        &self,
        parent: &T,
        label_column: &str,
    ) -> Result<String, TabularError> {
        let labels = parent.column(label_column)?;
        let by_index = |indices: &[usize]| -> Result<Vec<String>, TabularError> {
            indices
                .iter()
                .map(|&i| {
                    labels.get(i).map(Cell::to_string).ok_or(TabularError::IndexOutOfRange {
                        index: i,
                        max: labels.len().saturating_sub(1),
                    })
                })
                .collect()
        };
        let y_labels = |records: &YOutliers| -> Result<Vec<String>, TabularError> {
            match records {
                YOutliers::Indices(indices) => by_index(indices),
                YOutliers::Entries(rows) => {
                    let pos = self
                        .source_columns
                        .iter()
                        .position(|n| n == label_column)
                        .ok_or_else(|| TabularError::UnknownColumn {
                            name: label_column.to_string(),
                            available: self.source_columns.clone(),
                        })?;
                    Ok(rows.iter().map(|r| r[pos].to_string()).collect())
                }
            }
        };

        let groups = [
            ("Low X outliers", by_index(&self.low_x_indices)?),
            ("High X outliers", by_index(&self.high_x_indices)?),
            ("Low Y outliers", y_labels(&self.low_y)?),
            ("High Y outliers", y_labels(&self.high_y)?),
        ];

        let mut out = String::from("Outliers:\n");
        for (title, names) in groups.iter().filter(|(_, n)| !n.is_empty()) {
            out.push_str(&format!("\n{title}:\n{}\n", names.join(", ")));
        }
        out.push_str(&"*".repeat(30));
        Ok(out)
    }
}

impl fmt::Display for OutlierReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} fences [{}, {}]: {} high, {} low",
            self.x_column,
            self.x_fences.low,
            self.x_fences.high,
            self.high_x_indices.len(),
            self.low_x_indices.len()
        )?;
        writeln!(
            f,
            "{} fences [{}, {}]: {} high, {} low",
            self.y_column,
            self.y_fences.low,
            self.y_fences.high,
            self.high_y.len(),
            self.low_y.len()
        )?;
        write!(f, "removed {} entries", self.outliers.len())
    }
}

// ── Engine ────────────────────────────────────────────────────────────

/// Removes bivariate outliers from `table` and returns the bookkeeping.
///
/// With no column names the first two columns are used. Both columns must
/// be numeric, complete, and hold at least two rows. The table is only
/// modified once every check has passed.
pub fn remove_outliers(
    table: &mut Table,
    x: Option<&str>,
    y: Option<&str>,
    config: &OutlierConfig,
) -> Result<OutlierReport, TabularError> {
    let (x, y) = resolve_pair(table, x, y, true)?;
    let xs = numeric_values(table, &x)?;
    let ys = numeric_values(table, &y)?;
    let insufficient = || TabularError::InsufficientData {
        min_required: 2,
        actual: xs.len(),
    };
    let k = config.fence_multiplier;
    let x_fences = Fences::from_values(&xs, k).ok_or_else(insufficient)?;
    let y_fences = Fences::from_values(&ys, k).ok_or_else(insufficient)?;

    let mut top: Vec<usize> = Vec::new();
    let mut bottom: Vec<usize> = Vec::new();
    let mut high_x_indices = Vec::new();
    let mut low_x_indices = Vec::new();

    for (i, &v) in xs.iter().enumerate() {
        if v > x_fences.high {
            top.push(i);
            high_x_indices.push(i);
        } else if v < x_fences.low {
            bottom.push(i);
            low_x_indices.push(i);
        }
    }

    let mut high_y = YOutliers::empty(config.mode);
    let mut low_y = YOutliers::empty(config.mode);
    let boxplot = config.mode == OutlierMode::Boxplot;
    let row_of = |i: usize| table.row(i).unwrap_or_default();

    for (i, &v) in ys.iter().enumerate() {
        if v > y_fences.high {
            if boxplot || !high_x_indices.contains(&i) {
                top.push(i);
                high_y.record(i, || row_of(i));
            }
        } else if v < y_fences.low && (boxplot || !low_x_indices.contains(&i)) {
            bottom.push(i);
            low_y.record(i, || row_of(i));
        }
    }

    let top_entries: Vec<Vec<Cell>> = top.iter().map(|&i| row_of(i)).collect();
    let bottom_entries: Vec<Vec<Cell>> = bottom.iter().map(|&i| row_of(i)).collect();
    let source_columns = table.column_names().to_vec();

    let flagged: Vec<usize> = bottom.iter().chain(&top).copied().collect();
    table.remove_rows(&flagged)?;

    let mut outliers = top_entries.clone();
    outliers.extend(bottom_entries.iter().cloned());
    tracing::debug!(
        %x,
        %y,
        mode = ?config.mode,
        removed = outliers.len(),
        "removed outliers"
    );

    Ok(OutlierReport {
        x_column: x,
        y_column: y,
        source_columns,
        mode: config.mode,
        x_fences,
        y_fences,
        high_x_indices,
        low_x_indices,
        high_y,
        low_y,
        top_entries,
        bottom_entries,
        outliers,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────
