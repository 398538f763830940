use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::{
    config::{QValueAlgorithm, QValueConfig},
    error::{QValueError, Result},
    pi0::Pi0Estimator,
    results::QValueResults,
    utils::{flatten, reshape_like, resolve_m, validate_pvalues},
};

/// Below this many p-values pi0 is not estimated and defaults to 1
pub const MIN_PI0_ESTIMATION_SIZE: usize = 100;

/// An implementation of the Storey-Tibshirani q-value procedure
///
/// Converts p-values into q-values, the minimum false discovery rate at
/// which each test would be called significant.
pub struct QValue<'a> {
    pvalues: &'a [f64],
    config: QValueConfig,
}
impl<'a> QValue<'a> {
    /// Validates the p-values and binds them to a configuration
    pub fn new(pvalues: &'a [f64], config: QValueConfig) -> Result<Self> {
        validate_pvalues(pvalues)?;
        Ok(Self { pvalues, config })
    }

    /// Effective number of tests
    pub fn m(&self) -> f64 {
        resolve_m(self.config.m, self.pvalues.len())
    }

    /// Resolves pi0
    ///
    /// 1. Small inputs without a supplied pi0 use 1
    /// 2. A supplied pi0 is used as given
    /// 3. Otherwise pi0 is estimated from the p-values
    pub fn pi0(&self) -> Result<f64> {
        match self.config.pi0 {
            None if self.pvalues.len() < MIN_PI0_ESTIMATION_SIZE => {
                tracing::debug!(
                    num_pvalues = self.pvalues.len(),
                    "too few p-values to estimate pi0, using 1"
                );
                Ok(1.0)
            }
            Some(pi0) => Ok(pi0),
            None => Pi0Estimator::new(self.config.m, self.config.verbose).estimate(self.pvalues),
        }
    }

    /// Run the q-value procedure
    ///
    /// Resolves pi0 and m, builds the q-values with the configured algorithm
    /// and checks that every q-value lies in [0, 1].
    pub fn run(&self) -> Result<QValueResults> {
        let (qvalues, pi0) = self.qvalues()?;
        Ok(QValueResults::new(self.pvalues.to_vec(), qvalues, pi0))
    }

    /// Like [`QValue::run`] but returns only the q-values and pi0
    ///
    /// The p-values are not copied into the result.
    pub fn qvalues(&self) -> Result<(Vec<f64>, f64)> {
        let m = self.m();
        let pi0 = self.pi0()?;
        self.log_run(pi0, m);
        let qvalues = self.config.algorithm.compute(self.pvalues, pi0, m);
        check_qvalues(&qvalues, pi0, m)?;
        Ok((qvalues, pi0))
    }

    fn log_run(&self, pi0: f64, m: f64) {
        tracing::debug!(
            num_pvalues = self.pvalues.len(),
            m,
            pi0,
            algorithm = ?self.config.algorithm,
            "computing q-values"
        );
    }
}

fn check_qvalues(qvalues: &[f64], pi0: f64, m: f64) -> Result<()> {
    if let Some((index, q)) = qvalues
        .iter()
        .enumerate()
        .find(|(_, q)| !(0.0..=1.0).contains(*q))
    {
        return Err(QValueError::InternalInvariant(format!(
            "q-value at index {index} is not between 0 and 1: {q} (pi0 = {pi0}, m = {m})"
        )));
    }
    Ok(())
}

/// Computes q-values over a buffer the caller hands over
///
/// The buffer is validated first and then serves as the low-memory
/// strategy's scratch space, so no further copy of the p-values is made.
fn compute_in_place(pvalues: &mut [f64], config: &QValueConfig) -> Result<(Vec<f64>, f64)> {
    let (pi0, m) = {
        let qvalue = QValue::new(pvalues, *config)?;
        let pi0 = qvalue.pi0()?;
        let m = qvalue.m();
        qvalue.log_run(pi0, m);
        (pi0, m)
    };
    let qvalues = config.algorithm.compute_in_place(pvalues, pi0, m);
    check_qvalues(&qvalues, pi0, m)?;
    Ok((qvalues, pi0))
}

/// Computes q-values from a slice of p-values
///
/// Returns the q-values in input order together with the pi0 used. With
/// `verbose` the pi0 estimate and any clamping are emitted as `tracing`
/// events at `info` level rather than `debug`; the library installs no
/// subscriber, so they are only visible when the caller has set one up.
pub fn compute_qvalues(
    pvalues: &[f64],
    pi0: Option<f64>,
    m: Option<f64>,
    low_memory: bool,
    verbose: bool,
) -> Result<(Vec<f64>, f64)> {
    let config = QValueConfig::builder()
        .maybe_pi0(pi0)
        .maybe_m(m)
        .algorithm(QValueAlgorithm::from_low_memory(low_memory))
        .verbose(verbose)
        .build();
    QValue::new(pvalues, config)?.qvalues()
}

/// Computes q-values for an array of any dimension
///
/// The array is processed in logical order and the q-values are returned
/// with the same shape. The flattened copy of the array is the only p-value
/// buffer; the low-memory strategy works on it directly.
pub fn compute_qvalues_nd<S, D>(
    pvalues: &ArrayBase<S, D>,
    config: &QValueConfig,
) -> Result<(Array<f64, D>, f64)>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mut flat = flatten(pvalues);
    let (qvalues, pi0) = compute_in_place(&mut flat, config)?;
    drop(flat);
    let qvalues = reshape_like(qvalues, pvalues)?;
    Ok((qvalues, pi0))
}

/// Estimates pi0 for an array of any dimension
pub fn estimate_pi0_nd<S, D>(
    pvalues: &ArrayBase<S, D>,
    m: Option<f64>,
    verbose: bool,
) -> Result<f64>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    Pi0Estimator::new(m, verbose).estimate(&flatten(pvalues))
}
