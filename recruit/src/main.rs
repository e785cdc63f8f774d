mod common;
mod output;
mod run_all;
mod run_gamma;
mod run_occupancy;
mod run_poisson;
mod run_recruit_time;

use crate::common::*;
use crate::run_all::*;
use crate::run_gamma::*;
use crate::run_occupancy::*;
use crate::run_poisson::*;
use crate::run_recruit_time::*;

/// Poisson-Gamma models for multicenter clinical-trial recruitment
#[derive(Parser, Debug)]
#[command(version, about, long_about, term_width = 80)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// verbosity
    #[arg(
        long,
        short,
        global = true,
        help = "verbosity",
        long_help = "Enable verbose output `RUST_LOG=info`"
    )]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poisson mass function of patient arrivals at one center
    Poisson {
        #[command(flatten)]
        args: PoissonArgs,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Gamma prior over center recruitment rates
    Gamma {
        #[command(flatten)]
        args: GammaArgs,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Mean number of centers with exactly j patients
    #[command(alias = "occ")]
    Occupancy {
        #[command(flatten)]
        args: OccupancyArgs,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Density of the time to recruit n patients
    #[command(alias = "time")]
    RecruitTime {
        #[command(flatten)]
        args: RecruitTimeArgs,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Write every scenario with default parameters
    All(AllArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    match &cli.commands {
        Commands::Poisson { args, out } => run_poisson(args, out)?,
        Commands::Gamma { args, out } => run_gamma(args, out)?,
        Commands::Occupancy { args, out } => run_occupancy(args, out)?,
        Commands::RecruitTime { args, out } => run_recruit_time(args, out)?,
        Commands::All(args) => run_all(args)?,
    }

    Ok(())
}
