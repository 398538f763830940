use derive_new::new;

use crate::{
    error::{QValueError, Result},
    spline::{NaturalCubicSpline, SplineFit},
    utils::{resolve_m, validate_pvalues},
};

/// Number of tuning thresholds in the lambda sweep
pub const NUM_LAMBDAS: usize = 90;

/// Spacing between consecutive tuning thresholds
pub const LAMBDA_STEP: f64 = 0.01;

/// The tuning thresholds `0.00, 0.01, ..., 0.89`
pub fn lambda_sweep() -> Vec<f64> {
    (0..NUM_LAMBDAS).map(|i| i as f64 * LAMBDA_STEP).collect()
}

/// Estimates the proportion of truly null hypotheses (pi0)
///
/// For each lambda in the sweep the share of p-values above lambda, scaled
/// by `1 - lambda`, estimates pi0. A cubic spline is fit through these ratios
/// and evaluated at the largest lambda.
#[derive(new, Debug, Clone, Copy, Default)]
pub struct Pi0Estimator {
    /// Effective number of tests, defaults to the number of p-values
    m: Option<f64>,
    /// Report the estimate and any clamping at `info` level
    verbose: bool,
}

impl Pi0Estimator {
    /// Estimates pi0 with a natural cubic spline
    pub fn estimate(&self, pvalues: &[f64]) -> Result<f64> {
        self.estimate_with::<NaturalCubicSpline>(pvalues)
    }

    /// Estimates pi0 with the provided spline backend
    pub fn estimate_with<F: SplineFit>(&self, pvalues: &[f64]) -> Result<f64> {
        validate_pvalues(pvalues)?;
        let lambdas = lambda_sweep();
        let ratios = self.ratios(pvalues, &lambdas);

        let spline = F::fit(&lambdas, &ratios)?;
        let lambda_max = lambdas[lambdas.len() - 1];
        let mut pi0 = spline.evaluate(lambda_max);

        if self.verbose {
            tracing::info!(
                pi0,
                "qvalues pi0={pi0:.3}, estimated proportion of null features"
            );
        } else {
            tracing::debug!(pi0, "estimated proportion of null features");
        }

        if pi0 > 1.0 {
            if self.verbose {
                tracing::info!(
                    pi0,
                    "got pi0 > 1 ({pi0:.3}) while estimating qvalues, setting it to 1"
                );
            } else {
                tracing::debug!(pi0, "clamping pi0 to 1");
            }
            pi0 = 1.0;
        }

        if !(0.0..=1.0).contains(&pi0) {
            return Err(QValueError::InternalInvariant(format!(
                "pi0 is not between 0 and 1: {pi0}"
            )));
        }
        Ok(pi0)
    }

    /// Computes `count(p > lambda) / (m * (1 - lambda))` for each lambda
    pub fn ratios(&self, pvalues: &[f64], lambdas: &[f64]) -> Vec<f64> {
        let m = resolve_m(self.m, pvalues.len());
        lambdas
            .iter()
            .map(|&lambda| {
                let count = pvalues.iter().filter(|&&p| p > lambda).count();
                count as f64 / (m * (1.0 - lambda))
            })
            .collect()
    }
}

/// Estimates pi0 from a slice of p-values
///
/// `m` overrides the number of tests used for scaling. With `verbose` the
/// estimate and any clamping are emitted as `tracing` events at `info` level
/// rather than `debug`; the library installs no subscriber, so they are only
/// visible when the caller has set one up.
pub fn estimate_pi0(pvalues: &[f64], m: Option<f64>, verbose: bool) -> Result<f64> {
    Pi0Estimator::new(m, verbose).estimate(pvalues)
}
