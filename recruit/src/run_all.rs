use crate::common::*;
use crate::run_gamma::{gamma_report, GammaArgs};
use crate::run_occupancy::{occupancy_report, OccupancyArgs};
use crate::run_poisson::{poisson_report, PoissonArgs};
use crate::run_recruit_time::{recruit_time_report, RecruitTimeArgs};

#[derive(Args, Debug, Clone)]
pub struct AllArgs {
    /// output directory
    #[arg(short = 'd', long, default_value = "recruit_out")]
    pub output_dir: Box<str>,

    /// output format
    #[arg(long, value_enum, default_value = "tsv")]
    pub format: OutputFormat,

    /// gzip every output file
    #[arg(long, default_value_t = false)]
    pub gzip: bool,
}

/// Every scenario with its default parameters, one file per scenario, and a
/// `parameters.json` collecting the inputs of all of them
pub fn run_all(args: &AllArgs) -> anyhow::Result<()> {
    let reports = vec![
        poisson_report(&PoissonArgs::default())?,
        gamma_report(&GammaArgs::default())?,
        occupancy_report(&OccupancyArgs::default())?,
        recruit_time_report(&RecruitTimeArgs::default())?,
    ];

    std::fs::create_dir_all(&*args.output_dir)?;

    let mut parameters = serde_json::Map::new();
    for report in reports.iter() {
        let mut file = format!(
            "{}/{}.{}",
            args.output_dir,
            report.scenario,
            args.format.extension()
        );
        if args.gzip {
            file.push_str(".gz");
        }
        write_report(report, &file, args.format)?;
        parameters.insert(report.scenario.to_string(), report.parameters.clone());
    }

    let param_file = format!("{}/parameters.json", args.output_dir);
    std::fs::write(
        &param_file,
        serde_json::to_string_pretty(&serde_json::Value::Object(parameters))?,
    )?;
    info!("wrote {} scenarios under {}", reports.len(), args.output_dir);
    Ok(())
}
