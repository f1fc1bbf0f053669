//! `furrow plan`: plan every agent in a mission file.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Args;
use tracing::info;

use super::common::{OutputFormat, render, write_output};
use super::mission::Mission;

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Mission YAML file
    pub mission: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Plan only this agent (1 = first in the file)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub agent: Option<u32>,

    /// Fail without writing anything if any agent can't be planned
    #[arg(long)]
    pub strict: bool,
}

pub fn cmd_plan(args: &PlanArgs) -> Result<()> {
    info!("Loading mission: {}", args.mission.display());
    let mission = Mission::load(&args.mission)?;

    let start = Instant::now();
    let outcomes = mission.plan(args.agent.map(|a| a as usize - 1))?;
    let planned = outcomes.iter().filter(|o| o.is_ok()).count();
    info!(
        "Planned {}/{} agents in {:.1}ms",
        planned,
        outcomes.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    if args.strict && planned < outcomes.len() {
        let failures: Vec<String> = outcomes
            .iter()
            .filter_map(|o| o.error.as_ref().map(|e| format!("{}: {}", o.name, e)))
            .collect();
        bail!("{} agent(s) could not be planned:\n  {}", failures.len(), failures.join("\n  "));
    }

    let content = render(&mission.name, &outcomes, args.format)?;
    write_output(&content, args.output.as_deref())
}
