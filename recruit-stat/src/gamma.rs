//! Gamma density with shape `a` and rate `b`
//!
//! ```text
//! log f(y | a, b) = a * ln(b) + (a - 1) * ln(y) - b * y - lgamma(a)
//! ```

use crate::grid::eval_grid;
use crate::param::check_positive;
use crate::special_fn::ln_gamma;
use log::warn;

/// Density at `y` for already validated `a`, `b`.
///
/// The boundary `y = 0` is `0` for `a > 1`, `b` for `a = 1`, and `+inf` for
/// `a < 1`. Points below zero lie outside the support.
#[inline]
pub(crate) fn gamma_pdf_unchecked(a: f64, b: f64, y: f64) -> f64 {
    if y < 0.0 {
        return 0.0;
    }
    if y == 0.0 {
        return if a > 1.0 {
            0.0
        } else if a == 1.0 {
            b
        } else {
            f64::INFINITY
        };
    }
    (a * b.ln() + (a - 1.0) * y.ln() - b * y - ln_gamma(a)).exp()
}

/// Gamma(shape = `a`, rate = `b`) density at `y`
pub fn gamma_pdf(a: f64, b: f64, y: f64) -> anyhow::Result<f64> {
    let a = check_positive("shape", a)?;
    let b = check_positive("rate", b)?;
    Ok(gamma_pdf_unchecked(a, b, y))
}

/// Gamma(shape = `a`, rate = `b`) density over a grid
pub fn gamma_pdf_grid(a: f64, b: f64, grid: &[f64]) -> anyhow::Result<Vec<f64>> {
    let a = check_positive("shape", a)?;
    let b = check_positive("rate", b)?;
    if a < 1.0 && grid.iter().any(|&y| y == 0.0) {
        warn!("shape {} < 1: density diverges at y = 0", a);
    }
    eval_grid("gamma_pdf", grid, |&y| gamma_pdf_unchecked(a, b, y))
}

/// Mean `a / b` and variance `a / b^2`
pub fn gamma_moments(a: f64, b: f64) -> anyhow::Result<(f64, f64)> {
    let a = check_positive("shape", a)?;
    let b = check_positive("rate", b)?;
    Ok((a / b, a / (b * b)))
}
