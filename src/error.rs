use thiserror::Error;

/// Errors raised while estimating pi0 or computing q-values
#[derive(Debug, Error)]
pub enum QValueError {
    /// No p-values were provided
    #[error("invalid input: at least one p-value is required")]
    EmptyInput,

    /// A p-value fell outside of [0, 1] (NaN included)
    #[error("invalid input: p-value at index {index} is out of range [0, 1]: {value}")]
    PValueOutOfRange { index: usize, value: f64 },

    /// The spline fit over the lambda sweep could not be constructed
    #[error("spline fit failed: {0}")]
    NumericalFit(String),

    /// A computed quantity violated its [0, 1] bound
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl QValueError {
    /// Returns true for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            QValueError::EmptyInput | QValueError::PValueOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, QValueError>;
