//! Center occupancy under the Poisson-Gamma model.
//!
//! With `n` patients spread over `N` centers whose rates are drawn from
//! Gamma(a, b), the expected number of centers holding exactly `j` patients
//! does not depend on `b`:
//!
//! ```text
//! E[j] = N * C(n, j) * B(a + j, a(N - 1) + n - j) / B(a, a(N - 1))
//! ```
//!
//! Every term is kept in log space, so `C(720, j)` and friends never
//! materialize. `E[0] + E[1] + ... + E[n] = N`.
//!
//! The Beta ratio only shifts its arguments by integers, so it is a ratio of
//! rising factorials. Factoring out the powers of `a`, `r = a(N - 1)` and
//! `aN` leaves the binomial weights plus sums of `ln(1 + i / x)`:
//!
//! ```text
//! B(a + j, r + n - j) / B(a, r) = (a)_j (r)_(n-j) / (aN)_n
//!
//! ln E[j] = ln N + ln C(n, j) + j ln(1/N) + (n - j) ln(1 - 1/N)
//!         + S_a(j) + S_r(n - j) - S_aN(n),    S_x(k) = ln((x)_k / x^k)
//! ```
//!
//! As `a` grows every `S` goes to zero and `E[j]` to `N * Binomial(n, 1/N)`.

use crate::grid::eval_grid;
use crate::param::{check_count, check_positive, InvalidParameter};
use crate::poisson::poisson_pmf_grid;
use crate::special_fn::{ln_binomial, ln_rising_scaled, ln_rising_scaled_prefix};
use log::info;

/// Validated occupancy model
#[derive(Debug, Clone)]
pub struct OccupancyModel {
    n_patients: usize,
    n_centers: usize,
    shape: f64,
    ln_rising_shape: Vec<f64>,
    ln_rising_rest: Vec<f64>,
    ln_rising_total: f64,
}

impl OccupancyModel {
    /// * `n_patients` - total patients `n >= 1`
    /// * `n_centers` - total centers `N >= 2` (`N = 1` makes `B(a, 0)` undefined)
    /// * `shape` - Gamma shape `a > 0`, i.e. `1 / Var[rate]` with unit mean rate
    pub fn new(n_patients: usize, n_centers: usize, shape: f64) -> anyhow::Result<Self> {
        let n_patients = check_count("n_patients", n_patients, 1)?;
        let n_centers = check_count("n_centers", n_centers, 2)?;
        let shape = check_positive("shape", shape)?;

        let nc = n_centers as f64;
        Ok(Self {
            n_patients,
            n_centers,
            shape,
            ln_rising_shape: ln_rising_scaled_prefix(shape, n_patients),
            ln_rising_rest: ln_rising_scaled_prefix(shape * (nc - 1.0), n_patients),
            ln_rising_total: ln_rising_scaled(shape * nc, n_patients),
        })
    }

    pub fn n_patients(&self) -> usize {
        self.n_patients
    }

    pub fn n_centers(&self) -> usize {
        self.n_centers
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// E[j] for any `0 <= j <= n`
    fn expectation_unchecked(&self, j: usize) -> f64 {
        let n = self.n_patients;
        let nc = self.n_centers as f64;
        let ln_e = nc.ln() + ln_binomial(n, j) - j as f64 * nc.ln()
            + (n - j) as f64 * (-1.0 / nc).ln_1p()
            + self.ln_rising_shape[j]
            + self.ln_rising_rest[n - j]
            - self.ln_rising_total;
        ln_e.exp()
    }

    /// Expected number of centers with exactly `j` patients, `1 <= j <= n - 1`
    pub fn expectation(&self, j: usize) -> anyhow::Result<f64> {
        self.check_patient_count(j)?;
        Ok(self.expectation_unchecked(j))
    }

    /// E[j] over a grid of `j` in `[1, n - 1]`
    pub fn expectation_grid(&self, grid: &[usize]) -> anyhow::Result<Vec<f64>> {
        for &j in grid {
            self.check_patient_count(j)?;
        }
        eval_grid("occupancy", grid, |&j| self.expectation_unchecked(j))
    }

    /// The default grid `j = 1, ..., n - 1`
    pub fn patient_grid(&self) -> Vec<usize> {
        (1..self.n_patients).collect()
    }

    /// Expected number of centers that enrolled nobody
    pub fn empty_centers(&self) -> f64 {
        self.expectation_unchecked(0)
    }

    /// Expected number of centers that enrolled all `n` patients
    pub fn full_centers(&self) -> f64 {
        self.expectation_unchecked(self.n_patients)
    }

    fn check_patient_count(&self, j: usize) -> anyhow::Result<()> {
        if j >= 1 && j < self.n_patients {
            Ok(())
        } else {
            Err(InvalidParameter::new("j", j as f64, "must lie in [1, n - 1]").into())
        }
    }
}

/// Expected number of centers with exactly `j` patients (Poisson-Gamma)
pub fn occupancy_expectation(
    n_patients: usize,
    n_centers: usize,
    shape: f64,
    j: usize,
) -> anyhow::Result<f64> {
    OccupancyModel::new(n_patients, n_centers, shape)?.expectation(j)
}

/// Poisson-Gamma occupancy over a grid of `j`
pub fn occupancy_grid(
    n_patients: usize,
    n_centers: usize,
    shape: f64,
    grid: &[usize],
) -> anyhow::Result<Vec<f64>> {
    OccupancyModel::new(n_patients, n_centers, shape)?.expectation_grid(grid)
}

/// Rate `floor(n / N)` used by the Poisson comparator
pub fn poisson_occupancy_rate(n_patients: usize, n_centers: usize) -> anyhow::Result<f64> {
    let n_centers = check_count("n_centers", n_centers, 1)?;
    if n_patients % n_centers != 0 {
        info!(
            "Poisson comparator rate truncated: {} / {} -> {}",
            n_patients,
            n_centers,
            n_patients / n_centers
        );
    }
    let rate = (n_patients / n_centers) as f64;
    if rate > 0.0 {
        Ok(rate)
    } else {
        Err(InvalidParameter::new(
            "n_patients",
            n_patients as f64,
            "fewer patients than centers leaves a zero Poisson rate",
        )
        .into())
    }
}

/// Poisson comparator `N * Poisson_pmf(floor(n / N), j)` over a grid of `j`
pub fn poisson_occupancy_grid(
    n_patients: usize,
    n_centers: usize,
    grid: &[usize],
) -> anyhow::Result<Vec<f64>> {
    let rate = poisson_occupancy_rate(n_patients, n_centers)?;
    let nc = n_centers as f64;
    Ok(poisson_pmf_grid(rate, grid)?
        .into_iter()
        .map(|p| nc * p)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_small_case_by_hand() {
        // n = 2, N = 2, a = 1:
        // P(j = 1 at a center) = C(2,1) B(2, 2) / B(1, 1) = 2 * 1/6 = 1/3
        let model = OccupancyModel::new(2, 2, 1.0).unwrap();
        assert_relative_eq!(model.expectation(1).unwrap(), 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(model.empty_centers(), 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(model.full_centers(), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_total_centers() {
        for (n, nc, a) in [(720, 60, 2.0), (50, 10, 1.3), (200, 20, 4.0), (30, 45, 0.7)] {
            let model = OccupancyModel::new(n, nc, a).unwrap();
            let occupied: f64 = model
                .expectation_grid(&model.patient_grid())
                .unwrap()
                .iter()
                .sum();
            let total = occupied + model.empty_centers() + model.full_centers();
            assert_abs_diff_eq!(total, nc as f64, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_total_centers_huge_shape() {
        // near the Poisson limit the Beta ratio must keep its digits
        for a in [1e8, 1e13, 1e300] {
            let model = OccupancyModel::new(720, 60, a).unwrap();
            let occupied: f64 = model
                .expectation_grid(&model.patient_grid())
                .unwrap()
                .iter()
                .sum();
            let total = occupied + model.empty_centers() + model.full_centers();
            assert_abs_diff_eq!(total, 60.0, epsilon = 1e-6);
        }

        // and it lands on N * Binomial(n, 1/N)
        let model = OccupancyModel::new(720, 60, 1e13).unwrap();
        let p = 1.0_f64 / 60.0;
        let binom = 60.0 * 720.0 * p * (1.0 - p).powi(719);
        assert_relative_eq!(model.expectation(1).unwrap(), binom, max_relative = 1e-8);
    }

    #[test]
    fn test_overdispersion() {
        // smaller shape means more rate variance, so more idle centers
        let idle: Vec<f64> = [1.0, 2.0, 4.0, 100.0]
            .iter()
            .map(|&a| OccupancyModel::new(720, 60, a).unwrap().empty_centers())
            .collect();
        assert!(idle.windows(2).all(|w| w[0] > w[1]));

        let model = OccupancyModel::new(720, 60, 2.0).unwrap();
        let e = model.expectation_grid(&model.patient_grid()).unwrap();
        assert!(e.iter().all(|&x| x >= 0.0 && x.is_finite()));
    }

    #[test]
    fn test_domain() {
        assert!(OccupancyModel::new(0, 60, 2.0).is_err());
        assert!(OccupancyModel::new(720, 1, 2.0).is_err());
        assert!(OccupancyModel::new(720, 60, 0.0).is_err());

        let model = OccupancyModel::new(720, 60, 2.0).unwrap();
        for j in [0, 720, 1000] {
            let err = model.expectation(j).unwrap_err();
            assert!(err.downcast_ref::<InvalidParameter>().is_some());
        }
        assert!(model.expectation_grid(&[1, 2, 720]).is_err());

        // single patient leaves no valid j
        let model = OccupancyModel::new(1, 5, 2.0).unwrap();
        assert!(model.patient_grid().is_empty());
        assert!(model.expectation(1).is_err());
    }

    #[test]
    fn test_poisson_comparator() {
        assert_eq!(poisson_occupancy_rate(720, 60).unwrap(), 12.0);
        assert_eq!(poisson_occupancy_rate(725, 60).unwrap(), 12.0);
        assert!(poisson_occupancy_rate(10, 60).is_err());
        assert!(poisson_occupancy_rate(10, 0).is_err());

        let e = poisson_occupancy_grid(720, 60, &(0..36).collect::<Vec<_>>()).unwrap();
        assert_eq!(e.len(), 36);
        assert_abs_diff_eq!(e.iter().sum::<f64>(), 60.0, epsilon = 1e-3);
    }
}
