//! qvalue: q-value estimation for multiple hypothesis testing
//!
//! This library implements the Storey-Tibshirani (2003) procedure, which
//! converts the p-values of many simultaneous tests into q-values: the
//! minimum false discovery rate at which each test would be called
//! significant.
//!
//! The main components of this library are:
//! - `QValue`: The q-value procedure bound to a set of p-values
//! - `Pi0Estimator`: Estimation of the proportion of true null hypotheses
//! - `QValueConfig`: Options for pi0, the number of tests and the algorithm
//! - `QValueAlgorithm`: Sort-based or low-memory q-value construction
//! - `QValueResults`: Structure to hold the results and feed plots
//!
//! ```
//! let pvalues = vec![0.01, 0.02, 0.03, 0.04, 0.5];
//! let (qvalues, pi0) = qvalue::compute_qvalues(&pvalues, None, None, false, false).unwrap();
//! assert_eq!(pi0, 1.0);
//! assert!((qvalues[4] - 0.5).abs() < 1e-12);
//! ```

mod config;
mod error;
mod math;
mod pi0;
mod qvalue;
mod results;
mod spline;
mod utils;

pub use config::{QValueAlgorithm, QValueConfig};
pub use error::{QValueError, Result};
pub use pi0::{estimate_pi0, lambda_sweep, Pi0Estimator};
pub use qvalue::{compute_qvalues, compute_qvalues_nd, estimate_pi0_nd, QValue};
pub use results::{QValueResults, DEFAULT_NUM_THRESHOLDS};
pub use spline::{NaturalCubicSpline, SplineFit};
