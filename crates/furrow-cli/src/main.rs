//! furrow - lawnmower coverage planning from the command line
//!
//! Usage:
//!   furrow init --agents 3 -o mission.yaml   Write a starter mission
//!   furrow plan mission.yaml -f svg          Plan every agent in a mission
//!   furrow sweep --points "lat, lng, ..."    Plan a single area

mod cli;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use cli::{InitArgs, PlanArgs, SweepArgs, cmd_init, cmd_plan, cmd_sweep, init_logging};

#[derive(Debug, Parser)]
#[command(name = "furrow", version, about = "Boustrophedon coverage paths for survey areas")]
struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a mission file with default agents
    Init(InitArgs),
    /// Plan every agent in a mission file
    Plan(PlanArgs),
    /// Plan a single area given as lat/lng text
    Sweep(SweepArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Init(args) => cmd_init(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}
