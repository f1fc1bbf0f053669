//! Output formats shared by the `plan` and `sweep` commands.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use furrow::{AxisScale, LatLng};

use super::mission::AgentOutcome;

/// Output format for planned missions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Svg,
    Text,
}

/// Render outcomes in `format`.
pub fn render(title: &str, outcomes: &[AgentOutcome], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(title, outcomes),
        OutputFormat::Svg => Ok(to_svg(title, outcomes)),
        OutputFormat::Text => Ok(to_text(outcomes)),
    }
}

/// Write to `output`, or stdout when none is given.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes()).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct JsonOutput<'a> {
    mission: &'a str,
    agents: &'a [AgentOutcome],
}

fn to_json(title: &str, outcomes: &[AgentOutcome]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&JsonOutput { mission: title, agents: outcomes })
        .context("Failed to serialize plan")?;
    json.push('\n');
    Ok(json)
}

// ============================================================================
// Text
// ============================================================================

fn to_text(outcomes: &[AgentOutcome]) -> String {
    let mut text = String::new();
    for outcome in outcomes {
        text.push_str(&format!("{} ({})\n", outcome.name, outcome.color));
        match (&outcome.plan, &outcome.error) {
            (Some(plan), _) => {
                let est = &plan.estimate;
                text.push_str(&format!("  Rows:           {}\n", est.row_count));
                text.push_str(&format!("  Path length:    {:.0} meters\n", est.total_length));
                text.push_str(&format!("  Efficiency:     {} %\n", est.efficiency_percent()));
                text.push_str(&format!("  Estimated time: {}\n", est.duration_hms()));
                text.push_str(&format!("  Waypoints:      {}\n", est.waypoint_count));
            }
            (None, Some(err)) => text.push_str(&format!("  Error: {}\n", err)),
            (None, None) => text.push_str("  Not planned\n"),
        }
    }
    text
}

// ============================================================================
// SVG
// ============================================================================

const SVG_MARGIN_M: f64 = 20.0;
const AREA_STROKE: &str = "#BB0000";
const AREA_FILL: &str = "#4444BB";

/// Maps lat/lng into SVG user units (meters, north up).
struct Projection {
    origin: LatLng,
    scale: AxisScale,
}

impl Projection {
    fn fit(points: &[LatLng]) -> Option<(Projection, f64, f64)> {
        let first = points.first()?;
        let (mut min_lat, mut max_lat, mut min_lng, mut max_lng) = (first.lat, first.lat, first.lng, first.lng);
        for p in points {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        let scale = AxisScale::at(LatLng::new((min_lat + max_lat) / 2.0, (min_lng + max_lng) / 2.0));
        let projection = Projection { origin: LatLng::new(max_lat, min_lng), scale };
        let width = (max_lng - min_lng) * scale.units_per_x + 2.0 * SVG_MARGIN_M;
        let height = (max_lat - min_lat) * scale.units_per_y + 2.0 * SVG_MARGIN_M;
        Some((projection, width, height))
    }

    fn project(&self, p: LatLng) -> (f64, f64) {
        (
            (p.lng - self.origin.lng) * self.scale.units_per_x + SVG_MARGIN_M,
            (self.origin.lat - p.lat) * self.scale.units_per_y + SVG_MARGIN_M,
        )
    }

    fn points_attr(&self, points: &[LatLng]) -> String {
        points
            .iter()
            .map(|&p| {
                let (x, y) = self.project(p);
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn to_svg(title: &str, outcomes: &[AgentOutcome]) -> String {
    let all_points: Vec<LatLng> = outcomes.iter().flat_map(|o| o.area.iter().copied()).collect();
    let Some((projection, width, height)) = Projection::fit(&all_points) else {
        return format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 1 1\">\n  <title>{}</title>\n</svg>\n",
            escape(title)
        );
    };
    let stroke = (width.max(height) / 500.0).max(0.1);

    let mut svg = format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.2} {:.2}">
  <title>{}</title>
"##,
        width,
        height,
        escape(title)
    );

    svg.push_str(&format!(
        "  <g id=\"areas\" stroke=\"{}\" stroke-width=\"{:.2}\" fill=\"{}\" fill-opacity=\"0.2\">\n",
        AREA_STROKE, stroke, AREA_FILL
    ));
    for outcome in outcomes.iter().filter(|o| o.area.len() >= 3) {
        svg.push_str(&format!(
            "    <polygon id=\"area-{}\" points=\"{}\"/>\n",
            outcome.index,
            projection.points_attr(&outcome.area)
        ));
    }
    svg.push_str("  </g>\n");

    for outcome in outcomes {
        let Some(plan) = &outcome.plan else {
            continue;
        };
        svg.push_str(&format!(
            "  <g id=\"agent-{}\" stroke=\"{}\" stroke-width=\"{:.2}\" fill=\"none\" stroke-linecap=\"round\" stroke-linejoin=\"round\">\n",
            outcome.index,
            escape(&outcome.color),
            stroke * 1.5
        ));
        svg.push_str(&format!("    <title>{}</title>\n", escape(&outcome.name)));

        let path = plan.polyline();
        if path.len() >= 2 {
            svg.push_str(&format!("    <polyline points=\"{}\"/>\n", projection.points_attr(&path)));
        }
        for arrow in &plan.arrows {
            svg.push_str(&format!(
                "    <polyline class=\"arrow\" points=\"{}\"/>\n",
                projection.points_attr(arrow)
            ));
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::mission::{DEFAULT_START, Mission};

    fn outcomes() -> Vec<AgentOutcome> {
        let mut mission = Mission::with_default_agents(2, DEFAULT_START);
        mission.agents[1].points = Some("0, 0, 0, 0.001, 0, 0.002".to_string());
        mission.plan(None).unwrap()
    }

    #[test]
    fn json_lists_every_agent() {
        let json = render("test", &outcomes(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mission"], "test");
        let agents = value["agents"].as_array().unwrap();
        assert_eq!(agents.len(), 2);
        assert!(agents[0]["plan"]["rows"].as_array().unwrap().len() >= 5);
        assert!(agents[0].get("error").is_none());
        assert!(agents[1]["error"].as_str().unwrap().contains("Degenerate"));
    }

    #[test]
    fn text_summarizes_each_agent() {
        let text = render("test", &outcomes(), OutputFormat::Text).unwrap();
        assert!(text.contains("Agent 1 (#FF0000)"));
        assert!(text.contains("meters"));
        assert!(text.contains("Efficiency:"));
        assert!(text.contains("Agent 2 (#00FF00)"));
        assert!(text.contains("Error: Degenerate geometry"));
    }

    #[test]
    fn svg_draws_areas_and_paths() {
        let svg = render("a <b>", &outcomes(), OutputFormat::Svg).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<title>a &lt;b&gt;</title>"));
        assert!(svg.contains("id=\"area-0\""));
        assert!(svg.contains("stroke=\"#FF0000\""));
        assert!(!svg.contains("id=\"agent-1\""));
        // One path polyline plus one arrow per row
        let rows = outcomes()[0].plan.as_ref().unwrap().rows.len();
        assert_eq!(svg.matches("class=\"arrow\"").count(), rows);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn svg_without_areas_is_still_valid() {
        let svg = to_svg("empty", &[]);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn projection_puts_north_up() {
        let pts = [LatLng::new(0.0, 0.0), LatLng::new(0.001, 0.001)];
        let (projection, width, height) = Projection::fit(&pts).unwrap();
        let (x0, y0) = projection.project(pts[0]);
        let (x1, y1) = projection.project(pts[1]);
        assert!(x1 > x0);
        assert!(y1 < y0);
        assert!((width - height).abs() < 1.0);
    }
}
