//! Time to enroll `n` patients over `N` centers.
//!
//! # Poisson model
//!
//! Every center recruits at the same mean rate `m`, so the pooled process has
//! rate `N * m` and the `n`-th arrival is Gamma(shape = n, rate = N * m).
//!
//! # Poisson-Gamma model
//!
//! Center rates are Gamma(a, a / m). Integrating the pooled rate out gives a
//! scaled Beta-prime density with `s = a / m`:
//!
//! ```text
//! f(t) = t^(n-1) * s^(aN) / (t + s)^(n + aN) / B(n, aN)
//!
//! log f(t) = (n - 1) ln(t) - n ln(t + s) - aN ln(1 + t / s) - ln B(n, aN)
//! ```
//!
//! `B(n, aN)` is a rising factorial in `aN`, which after pulling out
//! `(aN)^n` and using `aN / s = N m` gives
//!
//! ```text
//! log f(t) = (n - 1) ln(t) + n ln(N m) - (n + aN) ln(1 + t / s)
//!          - lgamma(n) + ln((aN)_n / (aN)^n)
//! ```
//!
//! which tends to the Gamma(n, N m) log-density term by term as `a` grows.

use crate::gamma::gamma_pdf_unchecked;
use crate::grid::eval_grid;
use crate::param::{check_count, check_positive, InvalidParameter};
use crate::special_fn::{ln_gamma, ln_rising_scaled};

/// Validated recruitment scenario shared by both time models
#[derive(Debug, Clone, Copy)]
pub struct RecruitmentModel {
    n_patients: usize,
    n_centers: usize,
    mean_rate: f64,
}

impl RecruitmentModel {
    pub fn new(n_patients: usize, n_centers: usize, mean_rate: f64) -> anyhow::Result<Self> {
        Ok(Self {
            n_patients: check_count("n_patients", n_patients, 1)?,
            n_centers: check_count("n_centers", n_centers, 1)?,
            mean_rate: check_positive("mean_rate", mean_rate)?,
        })
    }

    pub fn n_patients(&self) -> usize {
        self.n_patients
    }

    pub fn n_centers(&self) -> usize {
        self.n_centers
    }

    pub fn mean_rate(&self) -> f64 {
        self.mean_rate
    }

    fn pooled_rate(&self) -> f64 {
        self.n_centers as f64 * self.mean_rate
    }

    /// Poisson model density over a time grid
    pub fn poisson_pdf_grid(&self, grid: &[f64]) -> anyhow::Result<Vec<f64>> {
        let shape = self.n_patients as f64;
        let rate = self.pooled_rate();
        eval_grid("poisson_time_pdf", grid, |&t| {
            gamma_pdf_unchecked(shape, rate, t)
        })
    }

    /// Poisson-Gamma model density over a time grid
    pub fn poisson_gamma_pdf_grid(&self, shape: f64, grid: &[f64]) -> anyhow::Result<Vec<f64>> {
        let shape = check_positive("shape", shape)?;
        let n = self.n_patients as f64;
        let an = shape * self.n_centers as f64;
        let scale = shape / self.mean_rate;
        let ln_const = n * self.pooled_rate().ln() - ln_gamma(n)
            + ln_rising_scaled(an, self.n_patients);

        eval_grid("poisson_gamma_time_pdf", grid, |&t| {
            if t < 0.0 {
                0.0
            } else if t == 0.0 {
                if self.n_patients == 1 {
                    an / scale
                } else {
                    0.0
                }
            } else {
                ((n - 1.0) * t.ln() - (n + an) * (t / scale).ln_1p() + ln_const).exp()
            }
        })
    }

    /// Mean `n / (N m)` and variance `n / (N m)^2` under the Poisson model
    pub fn poisson_moments(&self) -> (f64, f64) {
        let n = self.n_patients as f64;
        let rate = self.pooled_rate();
        (n / rate, n / (rate * rate))
    }

    /// Mean `s n / (aN - 1)` under the Poisson-Gamma model; needs `aN > 1`
    pub fn poisson_gamma_mean(&self, shape: f64) -> anyhow::Result<f64> {
        let shape = check_positive("shape", shape)?;
        let an = shape * self.n_centers as f64;
        if an <= 1.0 {
            return Err(
                InvalidParameter::new("shape", shape, "a * N <= 1 has no finite mean").into(),
            );
        }
        let scale = shape / self.mean_rate;
        Ok(scale * self.n_patients as f64 / (an - 1.0))
    }

    /// Variance `s^2 n (n + aN - 1) / ((aN - 2) (aN - 1)^2)`; needs `aN > 2`
    pub fn poisson_gamma_variance(&self, shape: f64) -> anyhow::Result<f64> {
        let shape = check_positive("shape", shape)?;
        let an = shape * self.n_centers as f64;
        if an <= 2.0 {
            return Err(
                InvalidParameter::new("shape", shape, "a * N <= 2 has no finite variance")
                    .into(),
            );
        }
        let scale = shape / self.mean_rate;
        let n = self.n_patients as f64;
        Ok(scale * scale * n * (n + an - 1.0) / ((an - 2.0) * (an - 1.0).powi(2)))
    }
}

/// Poisson model: Gamma(shape = n, rate = N m) density at `t`
pub fn poisson_time_pdf(
    n_patients: usize,
    n_centers: usize,
    mean_rate: f64,
    t: f64,
) -> anyhow::Result<f64> {
    let model = RecruitmentModel::new(n_patients, n_centers, mean_rate)?;
    Ok(model.poisson_pdf_grid(&[t])?[0])
}

/// Poisson-Gamma model density at `t`
pub fn poisson_gamma_time_pdf(
    n_patients: usize,
    n_centers: usize,
    shape: f64,
    mean_rate: f64,
    t: f64,
) -> anyhow::Result<f64> {
    let model = RecruitmentModel::new(n_patients, n_centers, mean_rate)?;
    Ok(model.poisson_gamma_pdf_grid(shape, &[t])?[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamma::gamma_pdf;
    use crate::grid::linear_grid;
    use approx::assert_abs_diff_eq;

    fn trapezoid(y: &[f64], step: f64) -> f64 {
        y.windows(2).map(|w| 0.5 * (w[0] + w[1]) * step).sum()
    }

    #[test]
    fn test_poisson_model_is_gamma() {
        let t = 9.5;
        assert_abs_diff_eq!(
            poisson_time_pdf(200, 20, 1.0, t).unwrap(),
            gamma_pdf(200.0, 20.0, t).unwrap(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_single_patient_boundary() {
        // one patient: exponential waiting time with rate N m in both models
        assert_abs_diff_eq!(
            poisson_gamma_time_pdf(1, 20, 2.0, 1.0, 0.0).unwrap(),
            20.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            poisson_time_pdf(1, 20, 1.0, 0.0).unwrap(),
            20.0,
            epsilon = 1e-12
        );
        assert_eq!(poisson_gamma_time_pdf(5, 20, 2.0, 1.0, 0.0).unwrap(), 0.0);
        assert_eq!(poisson_gamma_time_pdf(5, 20, 2.0, 1.0, -1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_small_case_by_hand() {
        // n = 2, N = 1, a = 1, m = 1: s = 1, f(t) = t / (t + 1)^3 / B(2, 1)
        let t = 0.5_f64;
        let expected = 2.0 * t / (t + 1.0).powi(3);
        assert_abs_diff_eq!(
            poisson_gamma_time_pdf(2, 1, 1.0, 1.0, t).unwrap(),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_normalization_and_mean() {
        let step = 1e-3;
        let grid = linear_grid(0.0, step, 30_001).unwrap();
        let model = RecruitmentModel::new(200, 20, 1.0).unwrap();

        let f = model.poisson_pdf_grid(&grid).unwrap();
        assert_abs_diff_eq!(trapezoid(&f, step), 1.0, epsilon = 1e-6);

        let tf: Vec<f64> = grid.iter().zip(f.iter()).map(|(t, p)| t * p).collect();
        let (mean, _) = model.poisson_moments();
        assert_abs_diff_eq!(trapezoid(&tf, step), mean, epsilon = 1e-5);

        let shape = 2.0;
        let f = model.poisson_gamma_pdf_grid(shape, &grid).unwrap();
        assert_abs_diff_eq!(trapezoid(&f, step), 1.0, epsilon = 1e-5);

        let tf: Vec<f64> = grid.iter().zip(f.iter()).map(|(t, p)| t * p).collect();
        let mean = model.poisson_gamma_mean(shape).unwrap();
        assert_abs_diff_eq!(trapezoid(&tf, step), mean, epsilon = 1e-4);
    }

    #[test]
    fn test_converges_to_poisson() {
        let model = RecruitmentModel::new(200, 20, 1.0).unwrap();
        let grid = linear_grid(6.0, 0.05, 161).unwrap();
        let f0 = model.poisson_pdf_grid(&grid).unwrap();
        let peak = f0.iter().cloned().fold(0.0, f64::max);

        let max_gap = |shape: f64| -> f64 {
            let f1 = model.poisson_gamma_pdf_grid(shape, &grid).unwrap();
            f0.iter()
                .zip(f1.iter())
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max)
        };

        let gaps: Vec<f64> = [10.0, 1e3, 1e6].iter().map(|&a| max_gap(a)).collect();
        assert!(gaps.windows(2).all(|w| w[0] > w[1]));
        assert!(gaps[2] < 1e-2 * peak, "gap {} peak {}", gaps[2], peak);

        let mean = model.poisson_gamma_mean(1e6).unwrap();
        assert_abs_diff_eq!(mean, model.poisson_moments().0, epsilon = 1e-4);
    }

    #[test]
    fn test_huge_shape_matches_poisson() {
        // the normalizer must not lose its digits when aN dwarfs n
        let model = RecruitmentModel::new(200, 20, 1.0).unwrap();
        let t = 10.0;
        let f0 = model.poisson_pdf_grid(&[t]).unwrap()[0];
        assert_abs_diff_eq!(f0, 0.5640, epsilon = 1e-4);
        for shape in [1e8, 1e13, 1e300] {
            let f1 = model.poisson_gamma_pdf_grid(shape, &[t]).unwrap()[0];
            assert_abs_diff_eq!(f1, f0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_matches_beta_normalizer() {
        // moderate aN, where the plain ln B(n, aN) form is still accurate
        let (n, nc, shape, m, t) = (30_usize, 4_usize, 1.7, 0.8, 6.0);
        let (nf, an) = (n as f64, shape * nc as f64);
        let s = shape / m;
        let expected = ((nf - 1.0) * f64::ln(t) - nf * f64::ln(t + s)
            - an * (t / s).ln_1p()
            - crate::special_fn::ln_beta(nf, an))
        .exp();
        assert_abs_diff_eq!(
            poisson_gamma_time_pdf(n, nc, shape, m, t).unwrap(),
            expected,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_moment_domain() {
        let model = RecruitmentModel::new(10, 1, 1.0).unwrap();
        assert!(model.poisson_gamma_mean(1.0).is_err());
        assert!(model.poisson_gamma_mean(1.5).is_ok());
        assert!(model.poisson_gamma_variance(2.0).is_err());
        assert!(model.poisson_gamma_variance(3.0).unwrap() > 0.0);
    }

    #[test]
    fn test_invalid() {
        for err in [
            RecruitmentModel::new(0, 20, 1.0).unwrap_err(),
            RecruitmentModel::new(200, 0, 1.0).unwrap_err(),
            RecruitmentModel::new(200, 20, 0.0).unwrap_err(),
            poisson_gamma_time_pdf(200, 20, 0.0, 1.0, 1.0).unwrap_err(),
        ] {
            assert!(err.downcast_ref::<InvalidParameter>().is_some());
        }
    }
}
