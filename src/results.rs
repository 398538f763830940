use derive_new::new;

use crate::{
    math::{count_significant, linspace},
    utils::{argsort, select_indices},
};

/// Number of q-value thresholds used for the significance curve by default
pub const DEFAULT_NUM_THRESHOLDS: usize = 100;

/// P-values with their q-values, in input order, and the pi0 used to build them
#[derive(new, Debug, Clone, PartialEq)]
pub struct QValueResults {
    pub pvalues: Vec<f64>,
    pub qvalues: Vec<f64>,
    pub pi0: f64,
}

impl QValueResults {
    pub fn len(&self) -> usize {
        self.qvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qvalues.is_empty()
    }

    /// Number of tests called significant at q-value threshold `alpha`
    pub fn num_significant(&self, alpha: f64) -> usize {
        count_significant(&self.qvalues, alpha)
    }

    /// `(pvalue, qvalue)` pairs ordered by ascending p-value
    pub fn sorted_pairs(&self) -> Vec<(f64, f64)> {
        let order = argsort(&self.pvalues);
        select_indices(&order, &self.pvalues)
            .into_iter()
            .zip(select_indices(&order, &self.qvalues))
            .collect()
    }

    /// Evenly spaced q-value thresholds over [0, 1] with the number of tests
    /// significant at each one
    pub fn significance_curve(&self, num_thresholds: usize) -> (Vec<f64>, Vec<usize>) {
        let thresholds = linspace(0.0, 1.0, num_thresholds);
        let counts = thresholds
            .iter()
            .map(|&threshold| self.num_significant(threshold))
            .collect();
        (thresholds, counts)
    }

    pub fn pprint(&self) {
        println!("PValue\tQValue");
        for (p, q) in self.pvalues.iter().zip(self.qvalues.iter()) {
            println!("{}\t{}", p, q);
        }
    }
}

impl From<QValueResults> for (Vec<f64>, f64) {
    fn from(results: QValueResults) -> Self {
        (results.qvalues, results.pi0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> QValueResults {
        QValueResults::new(
            vec![0.5, 0.01, 0.03, 0.04, 0.02],
            vec![0.5, 0.05, 0.05, 0.05, 0.05],
            1.0,
        )
    }

    #[test]
    fn test_sorted_pairs() {
        let pairs = example().sorted_pairs();
        assert_eq!(
            pairs,
            vec![
                (0.01, 0.05),
                (0.02, 0.05),
                (0.03, 0.05),
                (0.04, 0.05),
                (0.5, 0.5)
            ]
        );
    }

    #[test]
    fn test_num_significant() {
        let results = example();
        assert_eq!(results.len(), 5);
        assert_eq!(results.num_significant(0.01), 0);
        assert_eq!(results.num_significant(0.05), 4);
        assert_eq!(results.num_significant(0.5), 5);
    }

    #[test]
    fn test_significance_curve() {
        let (thresholds, counts) = example().significance_curve(DEFAULT_NUM_THRESHOLDS);
        assert_eq!(thresholds.len(), 100);
        assert_eq!(counts.len(), 100);
        assert_eq!(thresholds[0], 0.0);
        assert_eq!(thresholds[99], 1.0);
        assert_eq!(counts[0], 0);
        assert_eq!(counts[99], 5);
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_into_tuple() {
        let (qvalues, pi0): (Vec<f64>, f64) = example().into();
        assert_eq!(qvalues.len(), 5);
        assert_eq!(pi0, 1.0);
    }
}
