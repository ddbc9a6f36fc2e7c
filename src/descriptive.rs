//! Descriptive statistics over numeric table columns.
//!
//! Every function takes any [`TableView`] and a column name, checks that
//! the column is numeric and complete, and then computes on plain `f64`
//! values.
//!
//! # Quartiles
//!
//! Quartile cut points use the *exclusive* method (Hyndman & Fan type 6,
//! the default of Python's `statistics.quantiles`): with `m = n + 1`, cut
//! `i` sits at rank `i·m/4` and is linearly interpolated between the two
//! neighbouring order statistics. Ranks outside `[1, n−1]` are clamped.
//!
//! ```
//! use u_tabular::descriptive::{quartile_value, Quartile};
//! use u_tabular::table::{Cell, Table};
//!
//! let cells = (1..=7).map(|v| Cell::from(v as f64)).collect();
//! let table = Table::from_columns(vec![cells], vec!["x".into()]).unwrap();
//!
//! assert_eq!(quartile_value(&table, "x", Quartile::Q1).unwrap(), 2.0);
//! assert_eq!(quartile_value(&table, "x", Quartile::Q2).unwrap(), 4.0);
//! assert_eq!(quartile_value(&table, "x", Quartile::Q3).unwrap(), 6.0);
//! ```

use statrs::statistics::Statistics;

use crate::error::TabularError;
use crate::table::{Cell, DataType, TableView};

// ── Column extraction ─────────────────────────────────────────────────

/// Returns the values of a numeric column as `f64`.
///
/// Fails with [`TabularError::WrongColumnType`] if the column's inferred
/// type is not numeric or any cell is text, and with
/// [`TabularError::MissingValues`] if any cell is missing or `NaN`.
pub fn numeric_values<T: TableView + ?Sized>(
    table: &T,
    column: &str,
) -> Result<Vec<f64>, TabularError> {
    let cells = table.column(column)?;
    if cells.is_empty() {
        return Err(TabularError::InsufficientData {
            min_required: 1,
            actual: 0,
        });
    }

    match cells[0].data_type() {
        Some(DataType::Numeric) => {}
        found => {
            return Err(TabularError::WrongColumnType {
                column: column.to_string(),
                found: describe_type(found),
            })
        }
    }

    let mut values = Vec::with_capacity(cells.len());
    let mut missing = 0;
    for cell in cells {
        match cell {
            Cell::Number(v) if !v.is_nan() => values.push(*v),
            Cell::Number(_) | Cell::Missing => missing += 1,
            Cell::Text(_) => {
                return Err(TabularError::WrongColumnType {
                    column: column.to_string(),
                    found: DataType::Text.to_string(),
                })
            }
        }
    }

    if missing > 0 {
        return Err(TabularError::MissingValues {
            column: column.to_string(),
            count: missing,
        });
    }
    Ok(values)
}

pub(crate) fn describe_type(t: Option<DataType>) -> String {
    t.map_or_else(|| "missing".to_string(), |t| t.to_string())
}

// ── Central tendency & spread ─────────────────────────────────────────

/// Arithmetic mean of a numeric column.
pub fn mean<T: TableView + ?Sized>(table: &T, column: &str) -> Result<f64, TabularError> {
    let values = numeric_values(table, column)?;
    Ok(values.iter().mean())
}

/// Sample standard deviation (n − 1 denominator) of a numeric column.
///
/// Requires at least two values.
pub fn stdev<T: TableView + ?Sized>(table: &T, column: &str) -> Result<f64, TabularError> {
    let values = numeric_values(table, column)?;
    if values.len() < 2 {
        return Err(TabularError::InsufficientData {
            min_required: 2,
            actual: values.len(),
        });
    }
    Ok(values.iter().std_dev())
}

// ── Quartiles ─────────────────────────────────────────────────────────

/// One of the three quartile cut points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quartile {
    /// Lower quartile.
    Q1,
    /// Median.
    Q2,
    /// Upper quartile.
    Q3,
}

impl Quartile {
    fn cut_index(self) -> usize {
        match self {
            Self::Q1 => 0,
            Self::Q2 => 1,
            Self::Q3 => 2,
        }
    }
}

/// Computes the three exclusive-method quartile cut points of `values`.
///
/// Returns `None` if fewer than two values are given.
pub fn quartile_cuts(values: &[f64]) -> Option<[f64; 3]> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let m = n + 1;
    let mut cuts = [0.0; 3];
    for (slot, i) in cuts.iter_mut().zip(1..=3usize) {
        let j = (i * m / 4).clamp(1, n - 1);
        // i·m − 4j is negative only when j was clamped up from 0.
        let delta = (i * m) as f64 - (4 * j) as f64;
        *slot = (sorted[j - 1] * (4.0 - delta) + sorted[j] * delta) / 4.0;
    }
    Some(cuts)
}

/// Returns the cut value bounding quartile `q` of a numeric column.
pub fn quartile_value<T: TableView + ?Sized>(
    table: &T,
    column: &str,
    q: Quartile,
) -> Result<f64, TabularError> {
    Ok(column_cuts(table, column)?[q.cut_index()])
}

/// Interquartile range `Q3 − Q1` of a numeric column.
pub fn quartile_range<T: TableView + ?Sized>(table: &T, column: &str) -> Result<f64, TabularError> {
    let [q1, _, q3] = column_cuts(table, column)?;
    Ok(q3 - q1)
}

/// Classifies `value` into quartile 1–4 of a numeric column.
///
/// Boundaries are half-open: `value < Q1` → 1, `< Q2` → 2, `< Q3` → 3,
/// otherwise 4.
pub fn find_quartile<T: TableView + ?Sized>(
    table: &T,
    column: &str,
    value: f64,
) -> Result<u8, TabularError> {
    let [q1, q2, q3] = column_cuts(table, column)?;
    Ok(if value < q1 {
        1
    } else if value < q2 {
        2
    } else if value < q3 {
        3
    } else {
        4
    })
}

fn column_cuts<T: TableView + ?Sized>(table: &T, column: &str) -> Result<[f64; 3], TabularError> {
    let values = numeric_values(table, column)?;
    quartile_cuts(&values).ok_or(TabularError::InsufficientData {
        min_required: 2,
        actual: values.len(),
    })
}

// ── Rounding ──────────────────────────────────────────────────────────

/// Rounds `value` to `figures` significant figures.
///
/// Zero, `NaN` and infinities are returned unchanged, as is everything
/// when `figures` is zero.
///
/// ```
/// use u_tabular::descriptive::round_sig;
///
/// assert_eq!(round_sig(0.306_07, 3), 0.306);
/// assert_eq!(round_sig(12_345.0, 3), 12_300.0);
/// assert_eq!(round_sig(-1.2345, 2), -1.2);
/// ```
pub fn round_sig(value: f64, figures: u32) -> f64 {
    // an f64 never carries more than 17 significant digits
    if value == 0.0 || !value.is_finite() || figures == 0 || figures >= 17 {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let shift = figures as i32 - 1 - magnitude;
    if shift >= 0 {
        let factor = 10f64.powi(shift);
        if factor.is_finite() {
            return (value * factor).round() / factor;
        }
        // 10^shift overflows for values near the subnormal range
        let (low, high) = (10f64.powi(shift / 2), 10f64.powi(shift - shift / 2));
        let rounded = (value * low * high).round() / high / low;
        if rounded.is_finite() {
            rounded
        } else {
            value
        }
    } else {
        let factor = 10f64.powi(-shift);
        (value / factor).round() * factor
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
