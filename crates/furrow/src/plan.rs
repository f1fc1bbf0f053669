//! Planning a geographic area end to end.
//!
//! Glue between the lat/lng world and the coverage generator: project the
//! area into the local frame, sweep it, convert the rows back and attach
//! waypoints, estimates and direction glyphs. Each call returns an owned
//! [`AgentPlan`]; nothing is cached between calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::area::normalize_angle;
use crate::coverage::{generate_coverage_path, AxisScale, SweepParameters, TurnDirection};
use crate::error::{CoverageError, Result};
use crate::estimate::{estimate_path, DistanceModel, PathEstimate, TravelProfile};
use crate::geo::{GeoRow, LatLng};
use crate::geometry::{Polygon, Row};

/// Size of the direction glyph drawn on each row, in degrees.
pub const DEFAULT_ARROW_SIZE_DEGREES: f64 = 0.00005;

/// Per-agent sweep settings in real-world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Sweep heading in degrees; any finite value, wrapped into `[0, 360)`.
    pub angle_degrees: f64,
    pub turn: TurnDirection,
    /// Meters between rows.
    pub row_separation: f64,
    /// Meters, copied onto every waypoint.
    pub altitude: f64,
    /// Meters per second.
    pub speed: f64,
    /// Seconds per turn half.
    pub turn_time: f64,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            angle_degrees: 0.0,
            turn: TurnDirection::Right,
            row_separation: 20.0,
            altitude: 130.0,
            speed: 10.0,
            turn_time: 5.0,
        }
    }
}

impl SweepSettings {
    pub fn travel(&self) -> TravelProfile {
        TravelProfile::new(self.speed, self.turn_time)
    }
}

/// A point the vehicle flies through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

impl Waypoint {
    fn at(p: LatLng, altitude: f64) -> Self {
        Self { lat: p.lat, lng: p.lng, altitude }
    }
}

/// Everything planned for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPlan {
    pub settings: SweepSettings,
    pub rows: Vec<GeoRow>,
    /// Row start and end of every row, in traversal order.
    pub waypoints: Vec<Waypoint>,
    pub estimate: PathEstimate,
    /// One `[barb, tip, barb]` glyph per row.
    pub arrows: Vec<[LatLng; 3]>,
}

impl AgentPlan {
    /// The path as a single polyline through every waypoint.
    pub fn polyline(&self) -> Vec<LatLng> {
        self.rows.iter().flat_map(|r| [r.start, r.end]).collect()
    }
}

/// Plan a serpentine sweep over a lat/lng area.
///
/// Meters-per-degree is sampled at the area's first point.
pub fn plan_area(area: &[LatLng], settings: &SweepSettings) -> Result<AgentPlan> {
    let Some(&reference) = area.first() else {
        return Err(CoverageError::InvalidInput("need at least three points, got 0".into()));
    };
    if area.len() < 3 {
        return Err(CoverageError::InvalidInput(format!(
            "need at least three points, got {}",
            area.len()
        )));
    }
    if !reference.is_finite() {
        return Err(CoverageError::InvalidInput(format!(
            "reference point is not finite: ({}, {})",
            reference.lat, reference.lng
        )));
    }

    let scale = AxisScale::at(reference);
    let polygon = Polygon::new(area.iter().map(|p| p.to_local()).collect());
    let params = SweepParameters::new(normalize_angle(settings.angle_degrees), settings.turn, settings.row_separation)
        .with_scale(scale);

    let rows = generate_coverage_path(&polygon, &params)?;
    let estimate = estimate_path(&rows, &DistanceModel::Geographic, &settings.travel())?;

    debug!(
        rows = rows.len(),
        length_m = estimate.total_length,
        seconds = estimate.estimated_seconds,
        "planned area"
    );

    Ok(AgentPlan {
        settings: *settings,
        waypoints: waypoints(&rows, settings.altitude),
        arrows: rows
            .iter()
            .map(|r| r.arrow(DEFAULT_ARROW_SIZE_DEGREES).map(LatLng::from_local))
            .collect(),
        rows: rows.iter().map(GeoRow::from_local).collect(),
        estimate,
    })
}

fn waypoints(rows: &[Row], altitude: f64) -> Vec<Waypoint> {
    rows.iter()
        .flat_map(|r| [r.start, r.end])
        .map(|p| Waypoint::at(LatLng::from_local(p), altitude))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::default_area;

    fn area() -> Vec<LatLng> {
        default_area(LatLng::new(-7.915972873102972, 110.56066997979453), 0)
    }

    #[test]
    fn plans_default_area() {
        let plan = plan_area(&area(), &SweepSettings::default()).unwrap();

        // ~111 m square, 20 m rows
        assert!((5..=6).contains(&plan.rows.len()), "got {} rows", plan.rows.len());
        assert_eq!(plan.waypoints.len(), plan.rows.len() * 2);
        assert_eq!(plan.arrows.len(), plan.rows.len());
        assert_eq!(plan.estimate.waypoint_count, plan.waypoints.len());
        assert!(plan.waypoints.iter().all(|w| w.altitude == 130.0));

        // Each row runs north-south across the whole square
        for row in &plan.rows {
            assert!((row.length() - 111.3).abs() < 1.0, "row length {}", row.length());
        }
        assert!(plan.estimate.efficiency > 0.0 && plan.estimate.efficiency < 1.0);
    }

    #[test]
    fn polyline_follows_waypoints() {
        let plan = plan_area(&area(), &SweepSettings::default()).unwrap();
        let line = plan.polyline();
        assert_eq!(line.len(), plan.waypoints.len());
        assert_eq!(line[1].lat, plan.waypoints[1].lat);
        assert_eq!(line[1].lng, plan.waypoints[1].lng);
    }

    #[test]
    fn wraps_out_of_range_angles() {
        let settings = SweepSettings { angle_degrees: 450.0, ..SweepSettings::default() };
        let wrapped = plan_area(&area(), &settings).unwrap();
        let direct = plan_area(&area(), &SweepSettings { angle_degrees: 90.0, ..SweepSettings::default() }).unwrap();
        assert_eq!(wrapped.rows, direct.rows);
    }

    #[test]
    fn needs_three_points() {
        let pts = area();
        let two = &pts[..2];
        assert!(matches!(plan_area(two, &SweepSettings::default()), Err(CoverageError::InvalidInput(_))));
        assert!(matches!(plan_area(&[], &SweepSettings::default()), Err(CoverageError::InvalidInput(_))));
    }

    #[test]
    fn field_narrower_than_one_row_gets_one_row() {
        // About 5.5 m wide and 111 m long, swept with the default 20 m rows
        let field = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 0.00005),
            LatLng::new(0.001, 0.00005),
            LatLng::new(0.001, 0.0),
        ];
        let plan = plan_area(&field, &SweepSettings::default()).unwrap();
        assert_eq!(plan.rows.len(), 1);
        assert!((plan.rows[0].start.lng - 0.000025).abs() < 1e-9);
        assert!((plan.rows[0].length() - 111.3).abs() < 1.0);
    }

    #[test]
    fn degenerate_area_is_reported() {
        let line = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.001), LatLng::new(0.0, 0.002)];
        assert!(matches!(
            plan_area(&line, &SweepSettings::default()),
            Err(CoverageError::GeometryDegenerate(_))
        ));
    }

    #[test]
    fn settings_fill_missing_fields_from_defaults() {
        let settings: SweepSettings = serde_json::from_str(r#"{"angle_degrees": 30.0, "turn": 0}"#).unwrap();
        assert_eq!(settings.angle_degrees, 30.0);
        assert_eq!(settings.turn, TurnDirection::Left);
        assert_eq!(settings.row_separation, 20.0);
        assert!(serde_json::from_str::<SweepSettings>(r#"{"turn": 3}"#).is_err());
    }
}
