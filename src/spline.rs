//! Cubic spline fitting used by the pi0 estimator.
//!
//! The estimator only needs to fit a curve through a set of points and
//! evaluate it, so that capability lives behind [`SplineFit`].

use crate::error::{QValueError, Result};

/// Minimum number of knots required for a degree-3 fit
pub const MIN_SPLINE_POINTS: usize = 4;

/// A curve fitted through `(x, y)` points that can be evaluated anywhere
pub trait SplineFit: Sized {
    /// Fits the curve through points sorted by strictly increasing `x`
    fn fit(x: &[f64], y: &[f64]) -> Result<Self>;

    /// Evaluates the fitted curve at `x`
    fn evaluate(&self, x: f64) -> f64;
}

/// Natural cubic interpolating spline
///
/// Passes through every knot with continuous first and second derivatives and
/// zero curvature at both ends. Outside of the knot range the boundary
/// polynomial pieces are extrapolated.
#[derive(Debug, Clone)]
pub struct NaturalCubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivative of the spline at each knot
    m: Vec<f64>,
}

impl SplineFit for NaturalCubicSpline {
    fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        check_knots(x, y)?;

        let n = x.len();
        let h = x.windows(2).map(|w| w[1] - w[0]).collect::<Vec<_>>();

        // Tridiagonal system for the interior second derivatives, solved with
        // the Thomas algorithm. Natural boundaries fix m[0] = m[n-1] = 0.
        let interior = n - 2;
        let mut diag = vec![0.0; interior];
        let mut upper = vec![0.0; interior];
        let mut rhs = vec![0.0; interior];
        for i in 0..interior {
            let (h0, h1) = (h[i], h[i + 1]);
            diag[i] = 2.0 * (h0 + h1);
            upper[i] = h1;
            rhs[i] = 6.0 * ((y[i + 2] - y[i + 1]) / h1 - (y[i + 1] - y[i]) / h0);
        }
        for i in 1..interior {
            let lower = h[i];
            let w = lower / diag[i - 1];
            diag[i] -= w * upper[i - 1];
            rhs[i] -= w * rhs[i - 1];
        }

        let mut m = vec![0.0; n];
        for i in (0..interior).rev() {
            let next = if i + 1 < interior { m[i + 2] } else { 0.0 };
            m[i + 1] = (rhs[i] - upper[i] * next) / diag[i];
        }

        if m.iter().any(|v| !v.is_finite()) {
            return Err(QValueError::NumericalFit(
                "spline coefficients are not finite".to_string(),
            ));
        }

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    fn evaluate(&self, x: f64) -> f64 {
        let last = self.x.len() - 1;
        let j = self.x[1..last].partition_point(|&knot| knot <= x);
        let (x0, x1) = (self.x[j], self.x[j + 1]);
        let (y0, y1) = (self.y[j], self.y[j + 1]);
        let (m0, m1) = (self.m[j], self.m[j + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;
        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}

fn check_knots(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(QValueError::NumericalFit(format!(
            "mismatched knot lengths: {} abscissae and {} ordinates",
            x.len(),
            y.len()
        )));
    }
    if x.len() < MIN_SPLINE_POINTS {
        return Err(QValueError::NumericalFit(format!(
            "at least {MIN_SPLINE_POINTS} points are required, got {}",
            x.len()
        )));
    }
    if let Some(pos) = x.iter().chain(y).position(|v| !v.is_finite()) {
        return Err(QValueError::NumericalFit(format!(
            "non-finite value at knot {}",
            pos % x.len()
        )));
    }
    if x.windows(2).any(|w| w[1] <= w[0]) {
        return Err(QValueError::NumericalFit(
            "abscissae must be strictly increasing".to_string(),
        ));
    }
    Ok(())
}
