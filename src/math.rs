use itertools::Itertools;

use crate::utils::{argsort, scatter_indices, select_indices};

/// The q-value a p-value would receive from its own rank alone
///
/// `rank` is 1-based over the ascending order of the p-values.
pub fn local_qvalue(pvalue: f64, rank: usize, pi0: f64, m: f64) -> f64 {
    pi0 * m * pvalue / rank as f64
}

/// Sort-then-backfill construction of q-values
///
/// Sorts the p-values ascending, assigns each its local estimate, caps the
/// largest at 1 and sweeps from the right keeping the running minimum. The
/// result is returned in the input order.
pub fn standard_qvalues(pvalues: &[f64], pi0: f64, m: f64) -> Vec<f64> {
    let n = pvalues.len();
    if n == 0 {
        return Vec::new();
    }

    let order = argsort(pvalues);
    let sorted = select_indices(&order, pvalues);

    let mut qvalues = sorted
        .iter()
        .enumerate()
        .map(|(i, &p)| local_qvalue(p, i + 1, pi0, m))
        .collect::<Vec<_>>();
    qvalues[n - 1] = qvalues[n - 1].min(1.0);
    for i in (0..n - 1).rev() {
        qvalues[i] = qvalues[i].min(qvalues[i + 1]);
    }

    scatter_indices(&order, &qvalues)
}

/// In-place max-extraction construction of q-values
///
/// Repeatedly locates the largest remaining p-value with a linear scan,
/// assigns it the minimum of its local estimate and the previously assigned
/// q-value, then overwrites its slot with negative infinity. Takes O(n^2)
/// time and needs no sort permutation; yields the same values as
/// [`standard_qvalues`].
///
/// `pvalues` is consumed as scratch space.
pub fn low_memory_qvalues(pvalues: &mut [f64], pi0: f64, m: f64) -> Vec<f64> {
    let n = pvalues.len();
    let mut qvalues = vec![0.0; n];
    let mut previous = 1.0;
    for rank in (1..=n).rev() {
        let Some(position) = pvalues.iter().position_max_by(|a, b| a.total_cmp(b)) else {
            break;
        };
        let qvalue = local_qvalue(pvalues[position], rank, pi0, m).min(previous);
        qvalues[position] = qvalue;
        previous = qvalue;
        pvalues[position] = f64::NEG_INFINITY;
    }
    qvalues
}

/// Counts the q-values at or below `threshold`
pub fn count_significant(qvalues: &[f64], threshold: f64) -> usize {
    qvalues.iter().filter(|&&q| q <= threshold).count()
}

/// `n` evenly spaced values covering `[start, stop]` inclusively
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values = (0..n).map(|i| start + step * i as f64).collect::<Vec<_>>();
            values[n - 1] = stop;
            values
        }
    }
}
