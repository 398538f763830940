use bon::Builder;

use crate::math::{low_memory_qvalues, standard_qvalues};

/// Strategy used to build monotone q-values from sorted p-values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QValueAlgorithm {
    /// Sort the p-values and backfill running minima, O(n log n)
    #[default]
    Standard,
    /// Repeated in-place maximum extraction without a sort permutation, O(n^2)
    LowMemory,
}

impl QValueAlgorithm {
    pub fn from_low_memory(low_memory: bool) -> Self {
        if low_memory {
            QValueAlgorithm::LowMemory
        } else {
            QValueAlgorithm::Standard
        }
    }

    /// Computes q-values in the input order
    ///
    /// The low-memory strategy works on its own copy of `pvalues`. Inputs are
    /// expected to be validated already.
    pub(crate) fn compute(&self, pvalues: &[f64], pi0: f64, m: f64) -> Vec<f64> {
        match self {
            QValueAlgorithm::Standard => standard_qvalues(pvalues, pi0, m),
            QValueAlgorithm::LowMemory => self.compute_in_place(&mut pvalues.to_vec(), pi0, m),
        }
    }

    /// Computes q-values in the input order using `pvalues` as scratch space
    ///
    /// The low-memory strategy consumes the buffer, leaving every slot at
    /// negative infinity. The standard strategy only reads it.
    pub(crate) fn compute_in_place(&self, pvalues: &mut [f64], pi0: f64, m: f64) -> Vec<f64> {
        match self {
            QValueAlgorithm::Standard => standard_qvalues(pvalues, pi0, m),
            QValueAlgorithm::LowMemory => low_memory_qvalues(pvalues, pi0, m),
        }
    }
}

/// Options for computing q-values
///
/// ```
/// use qvalue::{QValueAlgorithm, QValueConfig};
///
/// let config = QValueConfig::builder()
///     .pi0(0.9)
///     .algorithm(QValueAlgorithm::LowMemory)
///     .build();
/// assert_eq!(config.pi0, Some(0.9));
/// assert_eq!(config.m, None);
/// ```
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct QValueConfig {
    /// Proportion of true nulls, estimated from the p-values when unset
    pub pi0: Option<f64>,
    /// Effective number of tests, the number of p-values when unset
    pub m: Option<f64>,
    #[builder(default)]
    pub algorithm: QValueAlgorithm,
    /// Report the pi0 estimate and any clamping at `info` level
    #[builder(default)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_low_memory() {
        assert_eq!(
            QValueAlgorithm::from_low_memory(true),
            QValueAlgorithm::LowMemory
        );
        assert_eq!(
            QValueAlgorithm::from_low_memory(false),
            QValueAlgorithm::Standard
        );
    }

    #[test]
    fn test_builder_defaults() {
        let config = QValueConfig::builder().build();
        assert_eq!(config.pi0, None);
        assert_eq!(config.m, None);
        assert_eq!(config.algorithm, QValueAlgorithm::Standard);
        assert!(!config.verbose);
    }

    #[test]
    fn test_builder_maybe_setters() {
        let config = QValueConfig::builder()
            .maybe_pi0(Some(0.5))
            .maybe_m(None)
            .verbose(true)
            .build();
        assert_eq!(config.pi0, Some(0.5));
        assert_eq!(config.m, None);
        assert!(config.verbose);
    }

    #[test]
    fn test_compute_does_not_mutate_input() {
        let pvalues = vec![0.3, 0.1, 0.2];
        let qvalues = QValueAlgorithm::LowMemory.compute(&pvalues, 1.0, 3.0);
        assert_eq!(pvalues, vec![0.3, 0.1, 0.2]);
        assert_eq!(qvalues.len(), 3);
    }

    #[test]
    fn test_compute_in_place_consumes_buffer() {
        let pvalues = vec![0.3, 0.1, 0.2];
        let expected = QValueAlgorithm::Standard.compute(&pvalues, 1.0, 3.0);

        let mut scratch = pvalues.clone();
        let qvalues = QValueAlgorithm::Standard.compute_in_place(&mut scratch, 1.0, 3.0);
        assert_eq!(qvalues, expected);
        assert_eq!(scratch, pvalues);

        let qvalues = QValueAlgorithm::LowMemory.compute_in_place(&mut scratch, 1.0, 3.0);
        assert_eq!(qvalues, expected);
        assert!(scratch.iter().all(|p| *p == f64::NEG_INFINITY));
    }
}
