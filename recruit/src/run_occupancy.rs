use crate::common::*;

#[derive(Args, Debug, Clone)]
pub struct OccupancyArgs {
    /// total number of patients n
    #[arg(short = 'n', long, default_value_t = DEFAULT_OCCUPANCY_PATIENTS)]
    pub patients: usize,

    /// total number of centers N
    #[arg(short = 'c', long, default_value_t = DEFAULT_OCCUPANCY_CENTERS)]
    pub centers: usize,

    /// Gamma shape a (= 1 / Var[rate] when the mean rate is 1)
    #[arg(short = 'a', long, default_value_t = DEFAULT_OCCUPANCY_SHAPE)]
    pub shape: f64,

    /// skip the Poisson comparator curve
    #[arg(long, default_value_t = false)]
    pub no_poisson: bool,
}

impl Default for OccupancyArgs {
    fn default() -> Self {
        Self {
            patients: DEFAULT_OCCUPANCY_PATIENTS,
            centers: DEFAULT_OCCUPANCY_CENTERS,
            shape: DEFAULT_OCCUPANCY_SHAPE,
            no_poisson: false,
        }
    }
}

/// Mean number of centers with `j` patients, `j = 1, ..., n - 1`,
/// against the Poisson model over `j = 0, ..., floor(3n / N) - 1`
pub fn occupancy_report(args: &OccupancyArgs) -> anyhow::Result<Report> {
    let model = OccupancyModel::new(args.patients, args.centers, args.shape)?;

    let grid = model.patient_grid();
    if grid.is_empty() {
        return Err(anyhow::anyhow!(
            "need at least two patients to tabulate occupancy"
        ));
    }

    let expected = model.expectation_grid(&grid)?;
    info!(
        "n = {}, N = {}, a = {}: {:.3} centers expected to stay empty",
        args.patients,
        args.centers,
        args.shape,
        model.empty_centers()
    );

    let mut series = vec![Series::from_counts("poisson_gamma", &grid, expected)?];

    if !args.no_poisson {
        let comparator = count_grid(0, 3 * args.patients / args.centers);
        let poisson = poisson_occupancy_grid(args.patients, args.centers, &comparator)?;
        series.push(Series::from_counts("poisson", &comparator, poisson)?);
    }

    Ok(Report {
        scenario: "occupancy",
        parameters: serde_json::json!({
            "patients": args.patients,
            "centers": args.centers,
            "shape": args.shape,
            "empty_centers": model.empty_centers(),
        }),
        series,
    })
}

pub fn run_occupancy(args: &OccupancyArgs, out: &OutputArgs) -> anyhow::Result<()> {
    let report = occupancy_report(args)?;
    write_report(&report, &out.output, out.format)
}
