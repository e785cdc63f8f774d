use crate::common::*;

#[derive(Args, Debug, Clone)]
pub struct RecruitTimeArgs {
    /// number of patients to recruit n
    #[arg(short = 'n', long, default_value_t = DEFAULT_TIME_PATIENTS)]
    pub patients: usize,

    /// number of centers N
    #[arg(short = 'c', long, default_value_t = DEFAULT_TIME_CENTERS)]
    pub centers: usize,

    /// mean recruitment rate per center m
    #[arg(short = 'm', long, default_value_t = DEFAULT_MEAN_RATE)]
    pub mean_rate: f64,

    /// Gamma shape a of the center rates
    #[arg(short = 'a', long, default_value_t = DEFAULT_TIME_SHAPE)]
    pub shape: f64,

    /// time grid spacing
    #[arg(long, default_value_t = DEFAULT_TIME_STEP)]
    pub step: f64,

    /// number of time points starting at zero
    #[arg(long, default_value_t = DEFAULT_TIME_POINTS)]
    pub points: usize,
}

impl Default for RecruitTimeArgs {
    fn default() -> Self {
        Self {
            patients: DEFAULT_TIME_PATIENTS,
            centers: DEFAULT_TIME_CENTERS,
            mean_rate: DEFAULT_MEAN_RATE,
            shape: DEFAULT_TIME_SHAPE,
            step: DEFAULT_TIME_STEP,
            points: DEFAULT_TIME_POINTS,
        }
    }
}

/// Recruitment time densities of the Poisson and Poisson-Gamma models
pub fn recruit_time_report(args: &RecruitTimeArgs) -> anyhow::Result<Report> {
    let model = RecruitmentModel::new(args.patients, args.centers, args.mean_rate)?;
    let grid = linear_grid(0.0, args.step, args.points)?;

    let poisson = model.poisson_pdf_grid(&grid)?;
    let mixture = model.poisson_gamma_pdf_grid(args.shape, &grid)?;

    let (poisson_mean, _) = model.poisson_moments();
    info!("Poisson model: mean recruitment time {:.4}", poisson_mean);

    let mixture_mean = match model.poisson_gamma_mean(args.shape) {
        Ok(mean) => {
            info!("Poisson-Gamma model: mean recruitment time {:.4}", mean);
            Some(mean)
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    let t_max = args.step * args.points.saturating_sub(1) as f64;
    if poisson_mean > t_max {
        warn!(
            "time grid ends at {} before the mean recruitment time {:.4}",
            t_max, poisson_mean
        );
    }

    Ok(Report {
        scenario: "recruit_time",
        parameters: serde_json::json!({
            "patients": args.patients,
            "centers": args.centers,
            "mean_rate": args.mean_rate,
            "shape": args.shape,
            "poisson_mean": poisson_mean,
            "poisson_gamma_mean": mixture_mean,
        }),
        series: vec![
            Series::new("poisson", grid.clone(), poisson)?,
            Series::new("poisson_gamma", grid, mixture)?,
        ],
    })
}

pub fn run_recruit_time(args: &RecruitTimeArgs, out: &OutputArgs) -> anyhow::Result<()> {
    let report = recruit_time_report(args)?;
    write_report(&report, &out.output, out.format)
}
