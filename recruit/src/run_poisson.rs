use crate::common::*;

#[derive(Args, Debug, Clone)]
pub struct PoissonArgs {
    /// Poisson rate λ (patients per center per unit time)
    #[arg(short = 'l', long, default_value_t = DEFAULT_POISSON_RATE)]
    pub rate: f64,

    /// evaluate P(X = k) for k = 0, ..., max_k - 1
    #[arg(short = 'k', long, default_value_t = DEFAULT_MAX_COUNT)]
    pub max_k: usize,
}

impl Default for PoissonArgs {
    fn default() -> Self {
        Self {
            rate: DEFAULT_POISSON_RATE,
            max_k: DEFAULT_MAX_COUNT,
        }
    }
}

/// Poisson mass function over `0..max_k`
pub fn poisson_report(args: &PoissonArgs) -> anyhow::Result<Report> {
    let grid = count_grid(0, args.max_k);
    let pmf = Series::from_counts("poisson_pmf", &grid, poisson_pmf_grid(args.rate, &grid)?)?;

    if let Some((k, p)) = pmf.argmax() {
        info!("λ = {}: mode at k = {} with P = {:.4}", args.rate, k, p);
    }
    let covered = pmf.sum();
    if covered < 0.99 {
        warn!(
            "grid 0..{} covers only {:.3} of the probability mass",
            args.max_k, covered
        );
    }

    Ok(Report {
        scenario: "poisson",
        parameters: serde_json::json!({
            "rate": args.rate,
            "max_k": args.max_k,
        }),
        series: vec![pmf],
    })
}

pub fn run_poisson(args: &PoissonArgs, out: &OutputArgs) -> anyhow::Result<()> {
    let report = poisson_report(args)?;
    write_report(&report, &out.output, out.format)
}
