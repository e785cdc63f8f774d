//! Log-space special functions.
//!
//! ```text
//! ln B(x, y)   = lgamma(x) + lgamma(y) - lgamma(x + y)
//! ln C(n, j)   = lgamma(n + 1) - lgamma(j + 1) - lgamma(n - j + 1)
//! ln (x)_k     = ln Γ(x + k) - ln Γ(x) = k ln(x) + sum_{i < k} ln(1 + i / x)
//! ```
//!
//! Beta ratios whose arguments move by integers are taken as rising
//! factorial sums. `lgamma(x + k) - lgamma(x)` cancels away every digit once
//! `x` is many orders of magnitude above `k`.

use special::Gamma as SpecialGamma;

/// log Γ(x) for x > 0
#[inline]
pub fn ln_gamma(x: f64) -> f64 {
    SpecialGamma::ln_gamma(x).0
}

/// log B(x, y) for x, y > 0
#[inline]
pub fn ln_beta(x: f64, y: f64) -> f64 {
    ln_gamma(x) + ln_gamma(y) - ln_gamma(x + y)
}

/// log of the binomial coefficient C(n, j), 0 <= j <= n
#[inline]
pub fn ln_binomial(n: usize, j: usize) -> f64 {
    debug_assert!(j <= n);
    let n = n as f64;
    let j = j as f64;
    ln_gamma(n + 1.0) - ln_gamma(j + 1.0) - ln_gamma(n - j + 1.0)
}

/// ln((x)_k / x^k) = sum_{i < k} ln(1 + i / x) for x > 0
pub fn ln_rising_scaled(x: f64, k: usize) -> f64 {
    (0..k).map(|i| (i as f64 / x).ln_1p()).sum()
}

/// Prefix sums of [`ln_rising_scaled`]: `out[k]` for `k = 0..=kmax`
pub fn ln_rising_scaled_prefix(x: f64, kmax: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(kmax + 1);
    let mut acc = 0.0;
    out.push(acc);
    for i in 0..kmax {
        acc += (i as f64 / x).ln_1p();
        out.push(acc);
    }
    out
}

/// ln (x)_k = ln Γ(x + k) - ln Γ(x) for x > 0
pub fn ln_rising(x: f64, k: usize) -> f64 {
    k as f64 * x.ln() + ln_rising_scaled(x, k)
}
