#![allow(unused)]

pub use clap::{Args, Parser, Subcommand, ValueEnum};
pub use log::{info, warn};

pub use recruit_stat::*;

pub use crate::output::{write_report, OutputArgs, OutputFormat};

pub const DEFAULT_POISSON_RATE: f64 = 4.0;
pub const DEFAULT_MAX_COUNT: usize = 20;

pub const DEFAULT_GAMMA_SHAPE: f64 = 2.0;
pub const DEFAULT_GAMMA_RATE: f64 = 1.0;
pub const DEFAULT_GAMMA_STEP: f64 = 0.1;
pub const DEFAULT_GAMMA_POINTS: usize = 100;

pub const DEFAULT_OCCUPANCY_PATIENTS: usize = 720;
pub const DEFAULT_OCCUPANCY_CENTERS: usize = 60;
pub const DEFAULT_OCCUPANCY_SHAPE: f64 = 2.0;

pub const DEFAULT_TIME_PATIENTS: usize = 200;
pub const DEFAULT_TIME_CENTERS: usize = 20;
pub const DEFAULT_MEAN_RATE: f64 = 1.0;
pub const DEFAULT_TIME_SHAPE: f64 = 2.0;
pub const DEFAULT_TIME_STEP: f64 = 0.05;
pub const DEFAULT_TIME_POINTS: usize = 400;

/// What every scenario hands to the writer
pub struct Report {
    pub scenario: &'static str,
    pub parameters: serde_json::Value,
    pub series: Vec<Series>,
}
