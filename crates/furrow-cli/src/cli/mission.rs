//! Mission files: one YAML document describing every agent to plan.
//!
//! A mission lists agents, each with its own area and sweep settings.
//! Speed and turn time are shared by the whole mission.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use furrow::area::default_area;
use furrow::{
    AgentPlan, AreaParseError, LatLng, SweepSettings, TurnDirection, parse_points, plan_area, recenter,
};

/// Colors handed out to agents that don't name one, in order.
pub const AGENT_PALETTE: [&str; 8] = [
    "#FF0000", "#00FF00", "#0000FF", "#00FFFF", "#FF00FF", "#FFFF00", "#FFFFFF", "#000000",
];

/// Center used by `init` when none is given.
pub const DEFAULT_START: LatLng = LatLng { lat: -7.915972873102972, lng: 110.56066997979453 };

/// A complete mission definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Meters per second, shared by all agents.
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Seconds per turn half, shared by all agents.
    #[serde(default = "default_turn_time")]
    pub turn_time: f64,

    pub agents: Vec<AgentConfig>,
}

fn default_name() -> String {
    "Untitled mission".to_string()
}

fn default_speed() -> f64 {
    SweepSettings::default().speed
}

fn default_turn_time() -> f64 {
    SweepSettings::default().turn_time
}

fn default_enabled() -> bool {
    true
}

/// One agent in a mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,

    /// SVG color; falls back to the palette entry for the agent's index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Disabled agents are skipped entirely.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Area corners as structured points.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub area: Vec<LatLng>,

    /// Area corners as `lat, lng, lat, lng, ...` text. Wins over `area`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<String>,

    /// Move the area so its bounding-box center lands here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LatLng>,

    #[serde(default)]
    pub sweep: AgentSweep,
}

/// Per-agent sweep settings; missing fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSweep {
    pub angle_degrees: f64,
    pub turn: TurnDirection,
    pub row_separation: f64,
    pub altitude: f64,
}

impl Default for AgentSweep {
    fn default() -> Self {
        let settings = SweepSettings::default();
        Self {
            angle_degrees: settings.angle_degrees,
            turn: settings.turn,
            row_separation: settings.row_separation,
            altitude: settings.altitude,
        }
    }
}

impl AgentConfig {
    /// Default agent `index` (zero based) stepped away from `start`.
    pub fn with_defaults(index: usize, start: LatLng) -> Self {
        Self {
            name: format!("Agent {}", index + 1),
            color: Some(agent_color(index).to_string()),
            enabled: true,
            area: default_area(start, index),
            points: None,
            center: None,
            sweep: AgentSweep::default(),
        }
    }

    /// The area to plan, after parsing text and recentering.
    pub fn resolve_area(&self) -> std::result::Result<Vec<LatLng>, AreaParseError> {
        let area = match &self.points {
            Some(text) => parse_points(text)?,
            None => self.area.clone(),
        };
        Ok(match self.center {
            Some(center) => recenter(&area, center),
            None => area,
        })
    }

    pub fn color_or(&self, index: usize) -> String {
        self.color.clone().unwrap_or_else(|| agent_color(index).to_string())
    }

    /// Full settings for this agent under `mission`.
    pub fn settings(&self, mission: &Mission) -> SweepSettings {
        SweepSettings {
            angle_degrees: self.sweep.angle_degrees,
            turn: self.sweep.turn,
            row_separation: self.sweep.row_separation,
            altitude: self.sweep.altitude,
            speed: mission.speed,
            turn_time: mission.turn_time,
        }
    }
}

/// Palette color for agent `index`, cycling.
pub fn agent_color(index: usize) -> &'static str {
    AGENT_PALETTE[index % AGENT_PALETTE.len()]
}

/// Result of planning one agent. A failed agent keeps its error message so
/// the rest of the mission can still be reported.
#[derive(Debug, Clone, Serialize)]
pub struct AgentOutcome {
    /// Zero-based position in the mission file.
    pub index: usize,
    pub name: String,
    pub color: String,
    pub area: Vec<LatLng>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<AgentPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentOutcome {
    pub fn is_ok(&self) -> bool {
        self.plan.is_some()
    }
}

impl Mission {
    /// Mission with `count` default agents starting at `start`.
    pub fn with_default_agents(count: usize, start: LatLng) -> Self {
        Self {
            name: default_name(),
            description: None,
            speed: default_speed(),
            turn_time: default_turn_time(),
            agents: (0..count).map(|i| AgentConfig::with_defaults(i, start)).collect(),
        }
    }

    /// Load a mission from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mission file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to load mission {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let mission: Mission = serde_yaml::from_str(text).context("Failed to parse mission YAML")?;
        if mission.agents.is_empty() {
            bail!("Mission has no agents");
        }
        Ok(mission)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize mission")
    }

    /// Plan agents in parallel.
    ///
    /// `only` selects a single agent by zero-based index. Disabled agents
    /// are skipped; the outcomes keep mission order.
    pub fn plan(&self, only: Option<usize>) -> Result<Vec<AgentOutcome>> {
        if let Some(index) = only
            && index >= self.agents.len()
        {
            bail!("Mission has {} agents, no agent {}", self.agents.len(), index + 1);
        }

        let selected: Vec<(usize, &AgentConfig)> = self
            .agents
            .iter()
            .enumerate()
            .filter(|(i, agent)| agent.enabled && only.is_none_or(|o| o == *i))
            .collect();

        info!(mission = %self.name, agents = selected.len(), "planning mission");

        // ## Rust Lesson #31: par_iter keeps order
        //
        // rayon's `collect()` on an indexed parallel iterator puts results
        // back in input order, so no sorting is needed afterwards.
        let outcomes: Vec<AgentOutcome> = selected
            .par_iter()
            .map(|&(index, agent)| self.plan_agent(index, agent))
            .collect();

        for outcome in &outcomes {
            match &outcome.error {
                Some(err) => warn!(agent = %outcome.name, "planning failed: {}", err),
                None => debug!(agent = %outcome.name, "planned"),
            }
        }

        Ok(outcomes)
    }

    fn plan_agent(&self, index: usize, agent: &AgentConfig) -> AgentOutcome {
        let mut outcome = AgentOutcome {
            index,
            name: agent.name.clone(),
            color: agent.color_or(index),
            area: Vec::new(),
            plan: None,
            error: None,
        };

        let area = match agent.resolve_area() {
            Ok(area) => area,
            Err(e) => {
                outcome.error = Some(e.to_string());
                return outcome;
            }
        };

        match plan_area(&area, &agent.settings(self)) {
            Ok(plan) => outcome.plan = Some(plan),
            Err(e) => outcome.error = Some(e.to_string()),
        }
        outcome.area = area;
        outcome
    }
}
