//! Poisson mass function
//!
//! ```text
//! log P(X = k | λ) = k * ln(λ) - λ - lgamma(k + 1)
//! ```

use crate::grid::eval_grid;
use crate::param::check_positive;
use crate::special_fn::ln_gamma;

#[inline]
fn ln_pmf_unchecked(lambda: f64, k: usize) -> f64 {
    let k = k as f64;
    k * lambda.ln() - lambda - ln_gamma(k + 1.0)
}

/// log P(X = k) for a Poisson with rate `lambda`
pub fn poisson_ln_pmf(lambda: f64, k: usize) -> anyhow::Result<f64> {
    let lambda = check_positive("lambda", lambda)?;
    Ok(ln_pmf_unchecked(lambda, k))
}

/// P(X = k) for a Poisson with rate `lambda`
pub fn poisson_pmf(lambda: f64, k: usize) -> anyhow::Result<f64> {
    Ok(poisson_ln_pmf(lambda, k)?.exp())
}

/// P(X = k) over a count grid
pub fn poisson_pmf_grid(lambda: f64, grid: &[usize]) -> anyhow::Result<Vec<f64>> {
    let lambda = check_positive("lambda", lambda)?;
    eval_grid("poisson_pmf", grid, |&k| ln_pmf_unchecked(lambda, k).exp())
}
