//! Least-squares regression and Pearson correlation between two numeric
//! columns.
//!
//! When no column names are given, a table with exactly two columns uses
//! them in order; any other shape requires explicit names.
//!
//! ```
//! use u_tabular::correlation::{pmcc, regression};
//! use u_tabular::table::{Cell, Table};
//!
//! let xs: Vec<Cell> = (0..5).map(|i| Cell::from(i as f64)).collect();
//! let ys: Vec<Cell> = (0..5).map(|i| Cell::from(2.0 * i as f64 + 1.0)).collect();
//! let table = Table::from_columns(vec![xs, ys], vec!["x".into(), "y".into()]).unwrap();
//!
//! let line = regression(&table, None, None).unwrap();
//! assert!((line.evaluate(10.0) - 21.0).abs() < 1e-10);
//! assert_eq!(line.equation(), "y=2x + 1 (3s.f)");
//! assert!((pmcc(&table, None, None).unwrap() - 1.0).abs() < 1e-12);
//! ```

use std::fmt;

use statrs::statistics::Statistics;

use crate::descriptive::{numeric_values, round_sig};
use crate::error::TabularError;
use crate::table::TableView;

// ── Column resolution ─────────────────────────────────────────────────

/// Resolves an optional (x, y) column pair.
///
/// Both names given → used as is. Neither given → the first two columns,
/// provided the table has exactly two (or, with `any_width`, at least two).
pub(crate) fn resolve_pair<T: TableView + ?Sized>(
    table: &T,
    x: Option<&str>,
    y: Option<&str>,
    any_width: bool,
) -> Result<(String, String), TabularError> {
    let names = table.column_names();
    match (x, y) {
        (Some(x), Some(y)) => Ok((x.to_string(), y.to_string())),
        (None, None) if names.len() == 2 || (any_width && names.len() > 2) => {
            Ok((names[0].clone(), names[1].clone()))
        }
        _ => Err(TabularError::ColumnsRequired {
            column_count: names.len(),
        }),
    }
}

/// Extracts two numeric columns of equal length with at least two rows.
pub(crate) fn paired_values<T: TableView + ?Sized>(
    table: &T,
    x: &str,
    y: &str,
) -> Result<(Vec<f64>, Vec<f64>), TabularError> {
    let xs = numeric_values(table, x)?;
    let ys = numeric_values(table, y)?;
    if xs.len() < 2 {
        return Err(TabularError::InsufficientData {
            min_required: 2,
            actual: xs.len(),
        });
    }
    Ok((xs, ys))
}

/// Sums of squares and cross-products about the means: (Sxx, Syy, Sxy).
fn moments(xs: &[f64], ys: &[f64]) -> (f64, f64, f64) {
    let mx = xs.iter().mean();
    let my = ys.iter().mean();
    xs.iter()
        .zip(ys)
        .fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (&x, &y)| {
            let (dx, dy) = (x - mx, y - my);
            (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
        })
}

// ── Regression ────────────────────────────────────────────────────────

/// Ordinary least-squares line `y = slope·x + intercept`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionLine {
    /// Name of the predictor column.
    pub x_column: String,
    /// Name of the response column.
    pub y_column: String,
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
}

impl RegressionLine {
    /// Evaluates the line at `x`.
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Returns the line as a standalone closure.
    pub fn evaluator(&self) -> impl Fn(f64) -> f64 {
        let (slope, intercept) = (self.slope, self.intercept);
        move |x| slope * x + intercept
    }

    /// Evaluates the line at every `x`, e.g. to draw a model series.
    pub fn fitted(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Equation with coefficients rounded to 3 significant figures,
    /// e.g. `y=2x + 1 (3s.f)`.
    pub fn equation(&self) -> String {
        let slope = round_sig(self.slope, 3);
        let intercept = round_sig(self.intercept, 3);
        if intercept < 0.0 {
            format!("y={slope}x - {} (3s.f)", -intercept)
        } else {
            format!("y={slope}x + {intercept} (3s.f)")
        }
    }
}

impl fmt::Display for RegressionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.equation())
    }
}

/// Fits a least-squares line of column `y` on column `x`.
///
/// Fails with [`TabularError::ZeroVariance`] if `x` is constant.
pub fn regression<T: TableView + ?Sized>(
    table: &T,
    x: Option<&str>,
    y: Option<&str>,
) -> Result<RegressionLine, TabularError> {
    let (x, y) = resolve_pair(table, x, y, false)?;
    let (xs, ys) = paired_values(table, &x, &y)?;

    let (sxx, _, sxy) = moments(&xs, &ys);
    if sxx == 0.0 {
        return Err(TabularError::ZeroVariance { column: x });
    }
    let slope = sxy / sxx;
    let intercept = ys.iter().mean() - slope * xs.iter().mean();
    tracing::debug!(%x, %y, slope, intercept, "fitted regression line");

    Ok(RegressionLine {
        x_column: x,
        y_column: y,
        slope,
        intercept,
    })
}

// ── Correlation ───────────────────────────────────────────────────────

/// Pearson product-moment correlation coefficient of two numeric columns.
///
/// Fails with [`TabularError::ZeroVariance`] if either column is constant.
pub fn pmcc<T: TableView + ?Sized>(
    table: &T,
    x: Option<&str>,
    y: Option<&str>,
) -> Result<f64, TabularError> {
    let (x, y) = resolve_pair(table, x, y, false)?;
    let (xs, ys) = paired_values(table, &x, &y)?;
    pearson(&xs, &ys, &x, &y)
}

pub(crate) fn pearson(xs: &[f64], ys: &[f64], x: &str, y: &str) -> Result<f64, TabularError> {
    let (sxx, syy, sxy) = moments(xs, ys);
    if sxx == 0.0 {
        return Err(TabularError::ZeroVariance { column: x.to_string() });
    }
    if syy == 0.0 {
        return Err(TabularError::ZeroVariance { column: y.to_string() });
    }
    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Cell, Table};

    fn xy(xs: &[f64], ys: &[f64]) -> Table {
        Table::from_columns(
            vec![
                xs.iter().map(|&v| Cell::from(v)).collect(),
                ys.iter().map(|&v| Cell::from(v)).collect(),
            ],
            vec!["x".into(), "y".into()],
        )
        .unwrap()
    }

    // ── Regression ───────────────────────────────────────────────

    #[test]
    fn recovers_noiseless_line() {
        let xs: Vec<f64> = (0..20).map(|i| i as f64 * 0.5).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let line = regression(&xy(&xs, &ys), None, None).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-10);
        assert!((line.intercept - 1.0).abs() < 1e-10);
        let f = line.evaluator();
        assert!((f(3.0) - 7.0).abs() < 1e-10);
        assert_eq!(line.fitted(&[0.0, 1.0]).len(), 2);
    }

    #[test]
    fn equation_rounds_and_signs() {
        let line = RegressionLine {
            x_column: "x".into(),
            y_column: "y".into(),
            slope: 0.123456,
            intercept: -45.678,
        };
        assert_eq!(line.equation(), "y=0.123x - 45.7 (3s.f)");
        assert_eq!(line.to_string(), line.equation());
    }

    #[test]
    fn constant_predictor_rejected() {
        let t = xy(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
        assert_eq!(
            regression(&t, None, None).unwrap_err(),
            TabularError::ZeroVariance { column: "x".into() }
        );
    }

    #[test]
    fn names_required_for_wider_tables() {
        let t = Table::from_rows(
            vec![vec![Cell::from(1.0), Cell::from(2.0), Cell::from(3.0)]],
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap();
        assert_eq!(
            regression(&t, None, None).unwrap_err(),
            TabularError::ColumnsRequired { column_count: 3 }
        );
        assert!(matches!(
            pmcc(&t, Some("a"), None),
            Err(TabularError::ColumnsRequired { .. })
        ));
    }

    #[test]
    fn text_column_rejected() {
        let t = Table::from_rows(
            vec![
                vec![Cell::from("a"), Cell::from(1.0)],
                vec![Cell::from("b"), Cell::from(2.0)],
            ],
            vec!["name".into(), "v".into()],
        )
        .unwrap();
        assert!(matches!(
            regression(&t, None, None),
            Err(TabularError::WrongColumnType { .. })
        ));
    }

    // ── Correlation ──────────────────────────────────────────────

    #[test]
    fn perfect_correlations() {
        let t = xy(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]);
        assert!((pmcc(&t, None, None).unwrap() - 1.0).abs() < 1e-12);
        let t = xy(&[1.0, 2.0, 3.0, 4.0], &[8.0, 6.0, 4.0, 2.0]);
        assert!((pmcc(&t, Some("x"), Some("y")).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn known_coefficient() {
        // r = 0.7745966692 for this textbook sample
        let t = xy(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]);
        assert!((pmcc(&t, None, None).unwrap() - 0.774_596_669_2).abs() < 1e-9);
    }
}
