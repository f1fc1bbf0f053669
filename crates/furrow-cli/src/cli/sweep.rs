//! `furrow sweep`: plan one ad-hoc area without a mission file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use tracing::info;

use furrow::{SweepSettings, TurnDirection, parse_points, plan_area};

use super::common::{OutputFormat, render, write_output};
use super::mission::{AgentOutcome, agent_color};

#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Area as `lat, lng, lat, lng, ...`
    #[arg(long, conflicts_with = "points_file", required_unless_present = "points_file", allow_hyphen_values = true)]
    pub points: Option<String>,

    /// File holding the area text
    #[arg(long)]
    pub points_file: Option<PathBuf>,

    /// Sweep angle in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub angle: f64,

    /// Turn direction: 0 = left, 1 = right
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub turn: u8,

    /// Meters between rows
    #[arg(long, default_value_t = 20.0)]
    pub separation: f64,

    /// Meters per second
    #[arg(long, default_value_t = 10.0)]
    pub speed: f64,

    /// Seconds per turn half
    #[arg(long, default_value_t = 5.0)]
    pub turn_time: f64,

    /// Waypoint altitude in meters
    #[arg(long, default_value_t = 130.0)]
    pub altitude: f64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn cmd_sweep(args: &SweepArgs) -> Result<()> {
    let text = match (&args.points, &args.points_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read points file {}", path.display()))?,
        (None, None) => return Err(anyhow!("Either --points or --points-file is required")),
    };

    let turn = TurnDirection::from_index(args.turn).ok_or_else(|| anyhow!("Turn must be 0 or 1, got {}", args.turn))?;
    let settings = SweepSettings {
        angle_degrees: args.angle,
        turn,
        row_separation: args.separation,
        altitude: args.altitude,
        speed: args.speed,
        turn_time: args.turn_time,
    };

    let area = parse_points(&text).context("Failed to parse area")?;
    let plan = plan_area(&area, &settings).context("Failed to plan area")?;
    info!(rows = plan.rows.len(), "Planned sweep");

    let outcome = AgentOutcome {
        index: 0,
        name: "Sweep".to_string(),
        color: agent_color(0).to_string(),
        area,
        plan: Some(plan),
        error: None,
    };
    let content = render("sweep", &[outcome], args.format)?;
    write_output(&content, args.output.as_deref())
}
