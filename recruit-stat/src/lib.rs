//! Poisson, Gamma and Poisson-Gamma formulas for multicenter patient
//! recruitment. Every function is pure; grid companions evaluate a whole
//! grid at once and either return one value per point or fail.

pub mod gamma;
pub mod grid;
pub mod occupancy;
pub mod param;
pub mod poisson;
pub mod recruitment;
pub mod special_fn;

pub use gamma::{gamma_moments, gamma_pdf, gamma_pdf_grid};
pub use grid::{count_grid, linear_grid, Series};
pub use occupancy::{
    occupancy_expectation, occupancy_grid, poisson_occupancy_grid, poisson_occupancy_rate,
    OccupancyModel,
};
pub use param::InvalidParameter;
pub use poisson::{poisson_ln_pmf, poisson_pmf, poisson_pmf_grid};
pub use recruitment::{poisson_gamma_time_pdf, poisson_time_pdf, RecruitmentModel};
