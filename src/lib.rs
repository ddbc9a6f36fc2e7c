//! # u-tabular
//!
//! Small-table statistics engine: a row/column table model with cleaning,
//! filtering, sorting and rounding, plus descriptive statistics, Tukey
//! outlier removal, least-squares regression and a significance test for
//! Pearson correlation.
//!
//! Statistics are free functions over any [`table::TableView`], so they
//! never mutate the data they read. Transformations are methods on
//! [`table::Table`] and record what was done in its [`table::Metadata`].
//!
//! ## Modules
//!
//! - [`table`]: Column-major table model (Table, Cell, DataType, TableView)
//! - [`csv_parser`]: Delimited-text loading with null-marker detection
//! - [`transform`]: Clean, filter, sort, round and column subsets
//! - [`descriptive`]: Mean, standard deviation, exclusive-method quartiles, significant-figure rounding
//! - [`outlier`]: Tukey-fence outlier removal over an (x, y) column pair
//! - [`correlation`]: Least-squares regression line and PMCC
//! - [`hypothesis`]: Correlation significance test (exact t-distribution or critical-value table)
//! - [`error`]: Error types
//!
//! ## Quick Start
//!
//! ```
//! use u_tabular::correlation::pmcc;
//! use u_tabular::csv_parser::CsvParser;
//! use u_tabular::descriptive::mean;
//! use u_tabular::table::TableView;
//!
//! let csv = "location,gdp,life\nChad,1.6,54.2\nPeru,6.7,76.7\nFiji,NA,67.4\nJapan,39.3,84.6\n";
//! let mut table = CsvParser::new().parse_str(csv).unwrap();
//!
//! let removed = table.clean(&["gdp"]).unwrap();
//! assert_eq!(removed, vec![2]);
//! assert_eq!(table.row_count(), 3);
//!
//! let gdp = table.subset(&["gdp", "life"]).unwrap();
//! assert!((mean(&gdp, "gdp").unwrap() - 15.866_666_666_666_667).abs() < 1e-9);
//! assert!(pmcc(&gdp, None, None).unwrap() > 0.0);
//! ```

pub mod correlation;
pub mod csv_parser;
pub mod descriptive;
pub mod error;
pub mod hypothesis;
pub mod outlier;
pub mod table;
pub mod transform;
