//! `furrow init`: write a starter mission.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use tracing::info;

use furrow::LatLng;

use super::common::write_output;
use super::mission::{DEFAULT_START, Mission};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Number of agents
    #[arg(short, long, default_value_t = 1)]
    pub agents: usize,

    /// Latitude of the first agent's area corner
    #[arg(long, default_value_t = DEFAULT_START.lat, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the first agent's area corner
    #[arg(long, default_value_t = DEFAULT_START.lng, allow_negative_numbers = true)]
    pub lng: f64,

    /// Mission name
    #[arg(long)]
    pub name: Option<String>,

    /// Output YAML file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn cmd_init(args: &InitArgs) -> Result<()> {
    if args.agents == 0 {
        bail!("A mission needs at least one agent");
    }
    let start = LatLng::new(args.lat, args.lng);
    if !start.is_finite() {
        bail!("Start point must be finite, got ({}, {})", args.lat, args.lng);
    }

    let mut mission = Mission::with_default_agents(args.agents, start);
    if let Some(name) = &args.name {
        mission.name = name.clone();
    }

    info!(agents = args.agents, "Creating mission: {}", mission.name);
    write_output(&mission.to_yaml()?, args.output.as_deref())
}
