use crate::common::*;

#[derive(Args, Debug, Clone)]
pub struct GammaArgs {
    /// shape parameter a
    #[arg(short = 'a', long, default_value_t = DEFAULT_GAMMA_SHAPE)]
    pub shape: f64,

    /// rate parameter b
    #[arg(short = 'b', long, default_value_t = DEFAULT_GAMMA_RATE)]
    pub rate: f64,

    /// grid spacing
    #[arg(long, default_value_t = DEFAULT_GAMMA_STEP)]
    pub step: f64,

    /// number of grid points starting at zero
    #[arg(long, default_value_t = DEFAULT_GAMMA_POINTS)]
    pub points: usize,
}

impl Default for GammaArgs {
    fn default() -> Self {
        Self {
            shape: DEFAULT_GAMMA_SHAPE,
            rate: DEFAULT_GAMMA_RATE,
            step: DEFAULT_GAMMA_STEP,
            points: DEFAULT_GAMMA_POINTS,
        }
    }
}

/// Gamma prior density over `0, step, 2 step, ...`
pub fn gamma_report(args: &GammaArgs) -> anyhow::Result<Report> {
    let grid = linear_grid(0.0, args.step, args.points)?;
    let pdf = gamma_pdf_grid(args.shape, args.rate, &grid)?;
    let (mean, var) = gamma_moments(args.shape, args.rate)?;
    info!(
        "Gamma(a = {}, b = {}): mean {:.4}, variance {:.4}",
        args.shape, args.rate, mean, var
    );

    Ok(Report {
        scenario: "gamma",
        parameters: serde_json::json!({
            "shape": args.shape,
            "rate": args.rate,
            "step": args.step,
            "points": args.points,
        }),
        series: vec![Series::new("gamma_pdf", grid, pdf)?],
    })
}

pub fn run_gamma(args: &GammaArgs, out: &OutputArgs) -> anyhow::Result<()> {
    let report = gamma_report(args)?;
    write_report(&report, &out.output, out.format)
}
