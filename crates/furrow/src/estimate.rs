//! Path length, time and efficiency estimates for a planned row sequence.
//!
//! Pure arithmetic over the rows: the generator never needs any of this,
//! but every consumer of a plan wants to know how long it will take.

use serde::{Deserialize, Serialize};

use crate::coverage::AxisScale;
use crate::error::{CoverageError, Result};
use crate::geo::{haversine_distance, LatLng};
use crate::geometry::{Point, Row};

/// How to measure distances between row endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceModel {
    /// Euclidean in the local frame, with each axis scaled to linear units.
    Planar(AxisScale),
    /// Great-circle distance; points are `(x = lng, y = lat)` degrees.
    Geographic,
}

impl DistanceModel {
    pub fn distance(&self, a: Point, b: Point) -> f64 {
        match self {
            DistanceModel::Planar(scale) => {
                let dx = (b.x - a.x) * scale.units_per_x;
                let dy = (b.y - a.y) * scale.units_per_y;
                (dx * dx + dy * dy).sqrt()
            }
            DistanceModel::Geographic => {
                haversine_distance(LatLng::from_local(a), LatLng::from_local(b))
            }
        }
    }
}

/// Vehicle speed and the time spent on each half of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelProfile {
    /// Linear units per second.
    pub speed: f64,
    /// Seconds per turn half; each row change costs two of these.
    pub turn_time: f64,
}

impl TravelProfile {
    pub fn new(speed: f64, turn_time: f64) -> Self {
        Self { speed, turn_time }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(CoverageError::InvalidInput(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if !self.turn_time.is_finite() || self.turn_time < 0.0 {
            return Err(CoverageError::InvalidInput(format!(
                "turn time must not be negative, got {}",
                self.turn_time
            )));
        }
        Ok(())
    }
}

/// Summary numbers for one planned path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathEstimate {
    pub row_count: usize,
    /// Distance covered while sweeping rows.
    pub useful_length: f64,
    /// Distance covered moving from one row's end to the next row's start.
    pub turning_length: f64,
    pub total_length: f64,
    /// Whole seconds of travel plus turn time.
    pub estimated_seconds: f64,
    /// Whole seconds spent on rows.
    pub useful_seconds: f64,
    /// `useful_seconds / estimated_seconds`, `0.0` for an empty path.
    pub efficiency: f64,
    /// Two per row.
    pub waypoint_count: usize,
}

impl PathEstimate {
    /// Efficiency as a rounded percentage.
    pub fn efficiency_percent(&self) -> u32 {
        (self.efficiency * 100.0).round() as u32
    }

    /// Estimated time as `h:mm:ss`.
    pub fn duration_hms(&self) -> String {
        format_hms(self.estimated_seconds)
    }
}

/// Estimate lengths and times for `rows` in traversal order.
pub fn estimate_path(rows: &[Row], model: &DistanceModel, travel: &TravelProfile) -> Result<PathEstimate> {
    travel.validate()?;

    let useful_length: f64 = rows.iter().map(|r| model.distance(r.start, r.end)).sum();
    let turning_length: f64 = rows
        .windows(2)
        .map(|pair| model.distance(pair[0].end, pair[1].start))
        .sum();
    let total_length = useful_length + turning_length;

    let turns = rows.len().saturating_sub(1) as f64;
    let estimated_seconds = (total_length / travel.speed).round() + turns * travel.turn_time * 2.0;
    let useful_seconds = (useful_length / travel.speed).round();
    let efficiency = if estimated_seconds > 0.0 {
        useful_seconds / estimated_seconds
    } else {
        0.0
    };

    Ok(PathEstimate {
        row_count: rows.len(),
        useful_length,
        turning_length,
        total_length,
        estimated_seconds,
        useful_seconds,
        efficiency,
        waypoint_count: rows.len() * 2,
    })
}

/// Format seconds as `h:mm:ss`, rounding to the nearest second.
pub fn format_hms(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, secs)
}
