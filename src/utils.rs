use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::error::{QValueError, Result};

/// Checks that there is at least one p-value and that every p-value lies in [0, 1]
pub fn validate_pvalues(pvalues: &[f64]) -> Result<()> {
    if pvalues.is_empty() {
        return Err(QValueError::EmptyInput);
    }
    for (index, &value) in pvalues.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            return Err(QValueError::PValueOutOfRange { index, value });
        }
    }
    Ok(())
}

/// Resolves the effective number of tests
///
/// Defaults to the number of p-values when the caller does not provide one.
pub fn resolve_m(m: Option<f64>, n: usize) -> f64 {
    m.unwrap_or(n as f64)
}

/// Returns the permutation that sorts `values` ascending
///
/// The sort is stable so tied values keep their input order.
pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut indices = (0..values.len()).collect::<Vec<_>>();
    indices.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    indices
}

pub fn select_indices<T: Copy>(indices: &[usize], data: &[T]) -> Vec<T> {
    indices.iter().map(|i| data[*i]).collect()
}

/// Places `sorted[i]` at position `indices[i]`, inverting a sort permutation
pub fn scatter_indices<T: Copy + Default>(indices: &[usize], sorted: &[T]) -> Vec<T> {
    let mut unsorted = vec![T::default(); sorted.len()];
    for (&index, &value) in indices.iter().zip(sorted) {
        unsorted[index] = value;
    }
    unsorted
}

/// Flattens an array of any dimension in logical (row-major) order
pub fn flatten<S, D>(array: &ArrayBase<S, D>) -> Vec<f64>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    array.iter().copied().collect()
}

/// Reshapes a flat vector back into the shape of `like`
pub fn reshape_like<S, D>(values: Vec<f64>, like: &ArrayBase<S, D>) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    Array::from_shape_vec(like.raw_dim(), values).map_err(|err| {
        QValueError::InternalInvariant(format!("unable to restore input shape: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_validate_pvalues() {
        assert!(validate_pvalues(&[0.0, 0.5, 1.0]).is_ok());
    }

    #[test]
    fn test_validate_pvalues_empty() {
        assert!(matches!(validate_pvalues(&[]), Err(QValueError::EmptyInput)));
    }

    #[test]
    fn test_validate_pvalues_out_of_range() {
        match validate_pvalues(&[0.2, 1.1]) {
            Err(QValueError::PValueOutOfRange { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, 1.1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(validate_pvalues(&[-0.1]).is_err());
        assert!(validate_pvalues(&[f64::NAN]).is_err());
    }

    #[test]
    fn test_resolve_m() {
        assert_eq!(resolve_m(None, 4), 4.0);
        assert_eq!(resolve_m(Some(10.0), 4), 10.0);
    }

    #[test]
    fn test_argsort_is_stable() {
        let values = vec![0.3, 0.1, 0.3, 0.2];
        assert_eq!(argsort(&values), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_scatter_inverts_select() {
        let values = vec![0.3, 0.1, 0.4, 0.2];
        let order = argsort(&values);
        let sorted = select_indices(&order, &values);
        assert_eq!(sorted, vec![0.1, 0.2, 0.3, 0.4]);
        assert_eq!(scatter_indices(&order, &sorted), values);
    }

    #[test]
    fn test_flatten_and_reshape() {
        let matrix = array![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]];
        let flat = flatten(&matrix);
        assert_eq!(flat, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let restored = reshape_like(flat, &matrix).unwrap();
        assert_eq!(restored, matrix);
    }

    #[test]
    fn test_flatten_transposed_view() {
        let matrix = array![[0.1, 0.2], [0.3, 0.4]];
        let transposed = matrix.t();
        let flat = flatten(&transposed);
        assert_eq!(flat, vec![0.1, 0.3, 0.2, 0.4]);
        let restored = reshape_like(flat, &transposed).unwrap();
        assert_eq!(restored, transposed);
    }
}
