use crate::param::{check_finite, check_positive};
use rayon::prelude::*;

/// Integer grid `lb, lb + 1, ..., ub - 1`
pub fn count_grid(lb: usize, ub: usize) -> Vec<usize> {
    (lb..ub).collect()
}

/// Evenly spaced grid `start, start + step, ...` with `npoints` points
pub fn linear_grid(start: f64, step: f64, npoints: usize) -> anyhow::Result<Vec<f64>> {
    let step = check_positive("step", step)?;
    Ok((0..npoints).map(|i| start + step * i as f64).collect())
}

/// Evaluate `func` at every grid point, keeping the grid order.
///
/// Any NaN output fails the whole evaluation.
pub fn eval_grid<X, F>(name: &'static str, grid: &[X], func: F) -> anyhow::Result<Vec<f64>>
where
    X: Sync,
    F: Fn(&X) -> f64 + Sync,
{
    grid.par_iter().map(|x| check_finite(name, func(x))).collect()
}

/// Paired `(x, y)` columns of one evaluated curve
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: Box<str>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// `a` is larger than `b` by more than the relative tolerance
fn beats(a: f64, b: f64, tol: f64) -> bool {
    let slack = tol * a.abs().max(b.abs());
    if slack.is_finite() {
        a > b + slack
    } else {
        a > b
    }
}

impl Series {
    pub fn new(name: &str, x: Vec<f64>, y: Vec<f64>) -> anyhow::Result<Self> {
        if x.len() != y.len() {
            return Err(anyhow::anyhow!(
                "series {}: {} grid points but {} values",
                name,
                x.len(),
                y.len()
            ));
        }
        Ok(Self {
            name: name.into(),
            x,
            y,
        })
    }

    /// Convenience for integer grids
    pub fn from_counts(name: &str, x: &[usize], y: Vec<f64>) -> anyhow::Result<Self> {
        Self::new(name, x.iter().map(|&k| k as f64).collect(), y)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Location of the largest value.
    ///
    /// Values within a relative `1e-12` of each other count as tied, and ties
    /// go to the later grid point. A Poisson pmf with integer rate `λ` peaks
    /// at both `λ - 1` and `λ`, and this reports `λ`.
    pub fn argmax(&self) -> Option<(f64, f64)> {
        const TIE: f64 = 1e-12;
        self.iter()
            .fold(None, |best: Option<(f64, f64)>, (x, y)| match best {
                Some((_, by)) if beats(by, y, TIE) => best,
                _ => Some((x, y)),
            })
    }

    pub fn sum(&self) -> f64 {
        self.y.iter().sum()
    }

    /// One `name<TAB>x<TAB>y` line per grid point
    pub fn to_tsv_lines(&self) -> Vec<Box<str>> {
        self.iter()
            .map(|(x, y)| format!("{}\t{}\t{:e}", self.name, x, y).into_boxed_str())
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name.as_ref(),
            "x": self.x,
            "y": self.y,
        })
    }
}
