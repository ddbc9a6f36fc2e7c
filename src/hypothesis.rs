//! Significance test for "no linear correlation" between two numeric
//! columns.
//!
//! The null hypothesis is `ρ = 0`. Two strategies are available:
//!
//! - **Exact mode** computes the p-value of the sample PMCC `r` from the
//!   Student-t distribution with `n − 2` degrees of freedom, using
//!   `t = r·√((n−2)/(1−r²))`. The null is rejected when `p ≤ α`.
//! - **Table mode** (default) looks up a one-sided critical value in a
//!   [`CriticalValueTable`] keyed by sample size and significance level,
//!   interpolating linearly between tabulated sample sizes. The null is
//!   rejected when `|r|` exceeds the critical value.
//!
//! # Example
//!
//! ```
//! use u_tabular::hypothesis::{hypothesis_test, HypothesisTestConfig, TestType};
//! use u_tabular::table::{Cell, Table};
//!
//! let xs: Vec<Cell> = (0..25).map(|i| Cell::from(i as f64)).collect();
//! let ys: Vec<Cell> = (0..25).map(|i| Cell::from((i * 7 % 11) as f64 + i as f64)).collect();
//! let table = Table::from_columns(vec![xs, ys], vec!["x".into(), "y".into()]).unwrap();
//!
//! let config = HypothesisTestConfig::default().test_type(TestType::Positive);
//! let report = hypothesis_test(&table, None, None, &config).unwrap();
//! let critical = report.critical_value().unwrap();
//! assert!(critical.interpolated);
//! assert_eq!(critical.value, 0.342);
//! assert!(report.reject_null);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::correlation::{paired_values, pearson, resolve_pair};
use crate::csv_parser::CsvParser;
use crate::descriptive::{numeric_values, round_sig};
use crate::error::TabularError;
use crate::table::TableView;

/// Significance levels tabulated in a [`CriticalValueTable`], in column order.
pub const SIGNIFICANCE_LEVELS: [f64; 5] = [0.1, 0.05, 0.025, 0.01, 0.005];

const EMBEDDED_CRITICAL_VALUES: &str = include_str!("../resources/pearson_critical_values.csv");

// ── Test direction ────────────────────────────────────────────────────

/// Alternative hypothesis requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestType {
    /// Any correlation (`ρ ≠ 0`).
    #[default]
    TwoTailed,
    /// Positive correlation only (`ρ > 0`).
    Positive,
    /// Negative correlation only (`ρ < 0`).
    Negative,
}

/// Sidedness of the test statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alternative {
    /// `ρ ≠ 0`.
    TwoSided,
    /// `ρ > 0`.
    Greater,
    /// `ρ < 0`.
    Less,
}

impl TestType {
    /// Maps the test type to its sidedness.
    pub fn alternative(self) -> Alternative {
        match self {
            Self::TwoTailed => Alternative::TwoSided,
            Self::Positive => Alternative::Greater,
            Self::Negative => Alternative::Less,
        }
    }
}

impl FromStr for TestType {
    type Err = TabularError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "two-tailed" => Ok(Self::TwoTailed),
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            other => Err(TabularError::InvalidHypothesisTestInput(format!(
                "unknown test type '{other}', expected two-tailed, positive or negative"
            ))),
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoSided => write!(f, "r ≠ 0"),
            Self::Greater => write!(f, "r > 0"),
            Self::Less => write!(f, "r < 0"),
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────

/// Configuration for [`hypothesis_test`].
#[derive(Debug, Clone)]
pub struct HypothesisTestConfig {
    /// Direction of the alternative hypothesis. Default: two-tailed.
    pub test_type: TestType,
    /// Use the critical-value table instead of an exact p-value. Default: true.
    pub use_value_table: bool,
    /// Significance level α. Default: 0.05.
    pub significance_level: f64,
}

impl Default for HypothesisTestConfig {
    fn default() -> Self {
        Self {
            test_type: TestType::TwoTailed,
            use_value_table: true,
            significance_level: 0.05,
        }
    }
}

impl HypothesisTestConfig {
    /// Sets the test direction.
    pub fn test_type(mut self, test_type: TestType) -> Self {
        self.test_type = test_type;
        self
    }

    /// Chooses table mode (`true`) or exact mode (`false`).
    pub fn use_value_table(mut self, yes: bool) -> Self {
        self.use_value_table = yes;
        self
    }

    /// Sets the significance level.
    pub fn significance_level(mut self, alpha: f64) -> Self {
        self.significance_level = alpha;
        self
    }
}

// ── Critical values ───────────────────────────────────────────────────

/// A critical PMCC value and whether it was interpolated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValue {
    /// Threshold for `|r|`.
    pub value: f64,
    /// `true` if `n` fell between two tabulated sample sizes.
    pub interpolated: bool,
}

/// One-sided critical values of the PMCC, keyed by sample size, with one
/// value per entry of [`SIGNIFICANCE_LEVELS`].
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalValueTable {
    rows: BTreeMap<usize, [f64; 5]>,
}

impl CriticalValueTable {
    /// Loads the table shipped with the crate (n = 4..=10, then every
    /// multiple of ten up to 100).
    pub fn embedded() -> Result<Self, TabularError> {
        Self::from_csv_str(EMBEDDED_CRITICAL_VALUES)
    }

    /// Parses a table from CSV text with a header naming each significance
    /// level (e.g. `0.05`) and an `n` column. Column order is free.
    pub fn from_csv_str(csv: &str) -> Result<Self, TabularError> {
        let table = CsvParser::new().parse_str(csv)?;

        let sizes = numeric_values(&table, "n")?;
        let mut levels = Vec::with_capacity(SIGNIFICANCE_LEVELS.len());
        for level in SIGNIFICANCE_LEVELS {
            let name = table
                .column_names()
                .iter()
                .find(|name| name.parse::<f64>().is_ok_and(|v| same_level(v, level)))
                .ok_or_else(|| TabularError::CsvParse {
                    line: 1,
                    message: format!("no column for significance level {level}"),
                })?;
            levels.push(numeric_values(&table, name)?);
        }

        let mut rows = BTreeMap::new();
        for (i, &n) in sizes.iter().enumerate() {
            if n < 0.0 || n.fract() != 0.0 {
                return Err(TabularError::CsvParse {
                    line: i + 2,
                    message: format!("sample size {n} is not a whole number"),
                });
            }
            let mut values = [0.0; 5];
            for (slot, column) in values.iter_mut().zip(&levels) {
                *slot = column[i];
            }
            rows.insert(n as usize, values);
        }
        Ok(Self { rows })
    }

    /// Tabulated sample sizes in ascending order.
    pub fn sample_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.keys().copied()
    }

    /// Returns the critical value for sample size `n` at `level`.
    ///
    /// An exact row is returned as tabulated, keeping every decimal (0.3061
    /// at n = 30, not 0.306). Otherwise the value is interpolated linearly
    /// between the nearest tabulated sizes below and above `n` and rounded
    /// to 3 significant figures. Since `r` is compared after rounding to 3
    /// significant figures, the decision matches either reading.
    ///
    /// ```
    /// use u_tabular::hypothesis::CriticalValueTable;
    ///
    /// let table = CriticalValueTable::embedded().unwrap();
    /// assert_eq!(table.lookup(30, 0.05).unwrap().value, 0.3061);
    /// assert_eq!(table.lookup(25, 0.05).unwrap().value, 0.342);
    /// assert!(table.lookup(101, 0.05).is_err());
    /// ```
    pub fn lookup(&self, n: usize, level: f64) -> Result<CriticalValue, TabularError> {
        let column = SIGNIFICANCE_LEVELS
            .iter()
            .position(|&l| same_level(l, level))
            .ok_or_else(|| {
                TabularError::InvalidHypothesisTestInput(format!(
                    "significance level {level} is not tabulated, use one of {SIGNIFICANCE_LEVELS:?}"
                ))
            })?;

        if let Some(row) = self.rows.get(&n) {
            return Ok(CriticalValue {
                value: row[column],
                interpolated: false,
            });
        }

        let below = self.rows.range(..n).next_back();
        let above = self.rows.range(n..).next();
        let (Some((&low_n, low)), Some((&high_n, high))) = (below, above) else {
            let (min, max) = (
                self.rows.keys().next().copied().unwrap_or(0),
                self.rows.keys().next_back().copied().unwrap_or(0),
            );
            return Err(TabularError::InvalidHypothesisTestInput(format!(
                "sample size {n} is outside the table range {min}..={max}"
            )));
        };

        let (low_c, high_c) = (low[column], high[column]);
        let value = low_c + (n - low_n) as f64 * (high_c - low_c) / (high_n - low_n) as f64;
        tracing::debug!(n, low_n, high_n, value, "interpolated critical value");
        Ok(CriticalValue {
            value: round_sig(value, 3),
            interpolated: true,
        })
    }
}

fn same_level(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

// ── Report ────────────────────────────────────────────────────────────

/// How the decision was reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestMethod {
    /// Exact p-value from the t distribution.
    Exact { p_value: f64 },
    /// Critical-value lookup.
    ValueTable { critical: CriticalValue },
}

/// Outcome of [`hypothesis_test`].
#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisTestReport {
    /// Predictor column name.
    pub x_column: String,
    /// Response column name.
    pub y_column: String,
    /// Sample size.
    pub n: usize,
    /// PMCC rounded to 3 significant figures.
    pub r: f64,
    /// Sidedness of the test.
    pub alternative: Alternative,
    /// Significance level α.
    pub significance_level: f64,
    /// Exact p-value or critical value.
    pub method: TestMethod,
    /// `true` if the null hypothesis of no correlation is rejected.
    pub reject_null: bool,
}

impl HypothesisTestReport {
    /// The p-value, in exact mode.
    pub fn p_value(&self) -> Option<f64> {
        match self.method {
            TestMethod::Exact { p_value } => Some(p_value),
            TestMethod::ValueTable { .. } => None,
        }
    }

    /// The critical value, in table mode.
    pub fn critical_value(&self) -> Option<CriticalValue> {
        match self.method {
            TestMethod::ValueTable { critical } => Some(critical),
            TestMethod::Exact { .. } => None,
        }
    }

    /// `(r, p)` in exact mode.
    pub fn r_and_p(&self) -> Option<(f64, f64)> {
        self.p_value().map(|p| (self.r, p))
    }
}

impl fmt::Display for HypothesisTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "*".repeat(27);
        writeln!(f, "{rule}")?;
        writeln!(f, "Hypothesis test of {} and {}:", self.x_column, self.y_column)?;
        writeln!(f, "N:{}", self.n)?;
        writeln!(f, "PMCC:{}", self.r)?;
        writeln!(f, "H0: r = 0")?;
        writeln!(f, "H1: {}", self.alternative)?;
        match self.method {
            TestMethod::Exact { p_value } => {
                writeln!(f, "P = {p_value}")?;
                if self.reject_null {
                    writeln!(f, "Reject H0")?;
                } else {
                    writeln!(f, "Accept H0")?;
                }
            }
            TestMethod::ValueTable { critical } => {
                let prefix = if critical.interpolated { "INTERPOLATED " } else { "" };
                writeln!(f, "{prefix}Critical value: {}", critical.value)?;
                if self.reject_null {
                    writeln!(f, "{} > {}", self.r.abs(), critical.value)?;
                    writeln!(f, "Reject H0. There is correlation")?;
                } else {
                    writeln!(f, "{} <= {}", self.r.abs(), critical.value)?;
                    writeln!(f, "Accept H0. No correlation")?;
                }
            }
        }
        write!(f, "{rule}")
    }
}

// ── Engine ────────────────────────────────────────────────────────────

/// Tests the hypothesis that two numeric columns have no linear
/// correlation.
///
/// Column names default to the two columns of a two-column table.
/// Table mode accepts only one-sided tests at a level in
/// [`SIGNIFICANCE_LEVELS`] and a sample size inside the embedded table;
/// anything else fails with [`TabularError::InvalidHypothesisTestInput`].
pub fn hypothesis_test<T: TableView + ?Sized>(
    table: &T,
    x: Option<&str>,
    y: Option<&str>,
    config: &HypothesisTestConfig,
) -> Result<HypothesisTestReport, TabularError> {
    let alpha = config.significance_level;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(TabularError::InvalidHypothesisTestInput(format!(
            "significance level {alpha} must lie in (0, 1)"
        )));
    }

    let alternative = config.test_type.alternative();
    let (x, y) = resolve_pair(table, x, y, false)?;
    let (xs, ys) = paired_values(table, &x, &y)?;
    let n = xs.len();
    let r_exact = pearson(&xs, &ys, &x, &y)?;
    let r = round_sig(r_exact, 3);

    let (method, reject_null) = if config.use_value_table {
        if alternative == Alternative::TwoSided {
            return Err(TabularError::InvalidHypothesisTestInput(
                "table mode supports only one-sided (positive or negative) tests".into(),
            ));
        }
        let critical = CriticalValueTable::embedded()?.lookup(n, alpha)?;
        if critical.interpolated {
            tracing::warn!(n, critical = critical.value, "using interpolated critical value");
        }
        (TestMethod::ValueTable { critical }, r.abs() > critical.value)
    } else {
        let p_value = exact_p_value(r_exact, n, alternative)?;
        (TestMethod::Exact { p_value }, p_value <= alpha)
    };

    let report = HypothesisTestReport {
        x_column: x,
        y_column: y,
        n,
        r,
        alternative,
        significance_level: alpha,
        method,
        reject_null,
    };
    tracing::info!(
        x = %report.x_column,
        y = %report.y_column,
        n,
        r,
        reject_null,
        "hypothesis test\n{report}"
    );
    Ok(report)
}

/// P-value of `r` under `ρ = 0` for a sample of `n` pairs.
pub fn exact_p_value(r: f64, n: usize, alternative: Alternative) -> Result<f64, TabularError> {
    if n < 3 {
        return Err(TabularError::InsufficientData {
            min_required: 3,
            actual: n,
        });
    }

    if r.abs() >= 1.0 {
        return Ok(match alternative {
            Alternative::TwoSided => 0.0,
            Alternative::Greater if r > 0.0 => 0.0,
            Alternative::Less if r < 0.0 => 0.0,
            _ => 1.0,
        });
    }

    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| TabularError::InvalidHypothesisTestInput(e.to_string()))?;
    let lower = dist.cdf(t);
    let upper = dist.sf(t);

    Ok(match alternative {
        Alternative::Greater => upper,
        Alternative::Less => lower,
        Alternative::TwoSided => (2.0 * lower.min(upper)).min(1.0),
    })
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

    fn linear(n: usize) -> Table {
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        xy(&xs, &ys)
    }

    fn one_sided() -> HypothesisTestConfig {
        HypothesisTestConfig::default().test_type(TestType::Positive)
    }

    // ── Test type ────────────────────────────────────────────────

    #[test]
    fn test_type_parsing_and_sidedness() {
        assert_eq!("two-tailed".parse::<TestType>().unwrap().alternative(), Alternative::TwoSided);
        assert_eq!("positive".parse::<TestType>().unwrap().alternative(), Alternative::Greater);
        assert_eq!("negative".parse::<TestType>().unwrap().alternative(), Alternative::Less);
        assert!(matches!(
            "sideways".parse::<TestType>(),
            Err(TabularError::InvalidHypothesisTestInput(_))
        ));
    }

    // ── Critical value table ─────────────────────────────────────

    #[test]
    fn embedded_table_shape() {
        let table = CriticalValueTable::embedded().unwrap();
        let sizes: Vec<usize> = table.sample_sizes().collect();
        assert_eq!(sizes.first(), Some(&4));
        assert_eq!(sizes.last(), Some(&100));
        assert!(sizes.contains(&10) && sizes.contains(&50));
        // n = 4 critical values are closed form for df = 2
        assert_eq!(table.lookup(4, 0.05).unwrap().value, 0.9);
    }

    #[test]
    fn exact_row_not_interpolated() {
        let table = CriticalValueTable::embedded().unwrap();
        let c = table.lookup(30, 0.05).unwrap();
        assert_eq!(c, CriticalValue { value: 0.3061, interpolated: false });
    }

    #[test]
    fn interpolates_between_decades() {
        let table = CriticalValueTable::embedded().unwrap();
        let c = table.lookup(25, 0.05).unwrap();
        let expected = round_sig(0.3783 + 5.0 * (0.3061 - 0.3783) / 10.0, 3);
        assert_eq!(c, CriticalValue { value: expected, interpolated: true });
        assert_eq!(c.value, 0.342);

        let c = table.lookup(47, 0.01).unwrap();
        let expected = round_sig(0.3665 + 7.0 * (0.3281 - 0.3665) / 10.0, 3);
        assert_eq!(c.value, expected);
    }

    #[test]
    fn lookup_rejects_bad_inputs() {
        let table = CriticalValueTable::embedded().unwrap();
        assert!(matches!(
            table.lookup(3, 0.05),
            Err(TabularError::InvalidHypothesisTestInput(_))
        ));
        assert!(matches!(
            table.lookup(101, 0.05),
            Err(TabularError::InvalidHypothesisTestInput(_))
        ));
        assert!(matches!(
            table.lookup(30, 0.02),
            Err(TabularError::InvalidHypothesisTestInput(_))
        ));
    }

    #[test]
    fn custom_table_column_order() {
        let csv = "n,0.005,0.01,0.025,0.05,0.1\n10,0.5,0.4,0.3,0.2,0.1\n20,0.25,0.2,0.15,0.1,0.05\n";
        let table = CriticalValueTable::from_csv_str(csv).unwrap();
        assert_eq!(table.lookup(10, 0.1).unwrap().value, 0.1);
        assert_eq!(table.lookup(10, 0.005).unwrap().value, 0.5);
        assert_eq!(table.lookup(15, 0.05).unwrap().value, 0.15);
    }

    #[test]
    fn custom_table_missing_level() {
        let csv = "n,0.1\n10,0.4\n";
        assert!(matches!(
            CriticalValueTable::from_csv_str(csv),
            Err(TabularError::CsvParse { line: 1, .. })
        ));
    }

    // ── Table mode ───────────────────────────────────────────────

    #[test]
    fn table_mode_tabulated_n() {
        let report = hypothesis_test(&linear(30), None, None, &one_sided()).unwrap();
        assert_eq!(report.n, 30);
        assert_eq!(report.r, 1.0);
        assert_eq!(
            report.critical_value(),
            Some(CriticalValue { value: 0.3061, interpolated: false })
        );
        assert!(report.reject_null);
        assert!(report.p_value().is_none());
    }

    #[test]
    fn table_mode_interpolated_n() {
        let report = hypothesis_test(&linear(25), Some("x"), Some("y"), &one_sided()).unwrap();
        let critical = report.critical_value().unwrap();
        assert!(critical.interpolated);
        assert_eq!(critical.value, 0.342);
        assert!(report.to_string().contains("INTERPOLATED Critical value: 0.342"));
    }

    #[test]
    fn table_mode_accepts_weak_correlation() {
        // alternating pattern around a flat line: r = 0
        let xs: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let ys: Vec<f64> = (0..20).map(|i| if i % 4 < 2 { 1.0 } else { -1.0 }).collect();
        let config = HypothesisTestConfig::default().test_type(TestType::Negative);
        let report = hypothesis_test(&xy(&xs, &ys), None, None, &config).unwrap();
        assert!(report.r.abs() < 0.3783);
        assert!(!report.reject_null);
        assert!(report.to_string().contains("Accept H0. No correlation"));
    }

    #[test]
    fn table_mode_rejects_two_tailed() {
        let err = hypothesis_test(&linear(30), None, None, &HypothesisTestConfig::default())
            .unwrap_err();
        assert!(matches!(err, TabularError::InvalidHypothesisTestInput(_)));
    }

    #[test]
    fn table_mode_rejects_out_of_range_n() {
        let err = hypothesis_test(&linear(120), None, None, &one_sided()).unwrap_err();
        assert!(matches!(err, TabularError::InvalidHypothesisTestInput(_)));
        let err = hypothesis_test(&linear(3), None, None, &one_sided()).unwrap_err();
        assert!(matches!(err, TabularError::InvalidHypothesisTestInput(_)));
    }

    #[test]
    fn table_mode_rejects_untabulated_level() {
        let config = one_sided().significance_level(0.2);
        let err = hypothesis_test(&linear(30), None, None, &config).unwrap_err();
        assert!(matches!(err, TabularError::InvalidHypothesisTestInput(_)));
    }

    // ── Exact mode ───────────────────────────────────────────────

    #[test]
    fn exact_mode_known_p_values() {
        // r = 6/sqrt(60), t = 2.1213 on 3 df
        let t = xy(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]);

        let two = HypothesisTestConfig::default().use_value_table(false);
        let report = hypothesis_test(&t, None, None, &two).unwrap();
        let (r, p) = report.r_and_p().unwrap();
        assert_eq!(r, 0.775);
        assert!((p - 0.124_027_062_657_554_6).abs() < 1e-6);
        assert!(!report.reject_null);

        let greater = two.clone().test_type(TestType::Positive);
        let p = hypothesis_test(&t, None, None, &greater).unwrap().p_value().unwrap();
        assert!((p - 0.062_013_531_328_777_3).abs() < 1e-6);

        let less = two.test_type(TestType::Negative);
        let p = hypothesis_test(&t, None, None, &less).unwrap().p_value().unwrap();
        assert!((p - (1.0 - 0.062_013_531_328_777_3)).abs() < 1e-6);
    }

    #[test]
    fn exact_mode_perfect_correlation() {
        let config = HypothesisTestConfig::default()
            .use_value_table(false)
            .test_type(TestType::Positive);
        let report = hypothesis_test(&linear(10), None, None, &config).unwrap();
        assert_eq!(report.p_value(), Some(0.0));
        assert!(report.reject_null);
        assert!(report.to_string().contains("Reject H0"));

        assert_eq!(exact_p_value(1.0, 10, Alternative::Less).unwrap(), 1.0);
        assert_eq!(exact_p_value(-1.0, 10, Alternative::TwoSided).unwrap(), 0.0);
    }

    #[test]
    fn exact_mode_any_level() {
        let config = HypothesisTestConfig::default()
            .use_value_table(false)
            .significance_level(0.2);
        let t = xy(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]);
        assert!(hypothesis_test(&t, None, None, &config).unwrap().reject_null);
    }

    #[test]
    fn invalid_significance_level() {
        let config = HypothesisTestConfig::default()
            .use_value_table(false)
            .significance_level(1.5);
        assert!(matches!(
            hypothesis_test(&linear(10), None, None, &config),
            Err(TabularError::InvalidHypothesisTestInput(_))
        ));
    }

    #[test]
    fn summary_is_logged_and_rendered() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let report = hypothesis_test(&linear(30), None, None, &one_sided()).unwrap();
        let text = report.to_string();
        assert!(text.starts_with(&"*".repeat(27)));
        assert!(text.contains("Hypothesis test of x and y:"));
        assert!(text.contains("N:30"));
        assert!(text.contains("H1: r > 0"));
        assert!(text.contains("Critical value: 0.3061"));
        assert!(!text.contains("INTERPOLATED"));
        assert!(text.contains("Reject H0. There is correlation"));
    }

    #[test]
    fn exact_mode_needs_three_pairs() {
        assert!(matches!(
            exact_p_value(0.5, 2, Alternative::TwoSided),
            Err(TabularError::InsufficientData { min_required: 3, actual: 2 })
        ));
    }
}
