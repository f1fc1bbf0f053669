//! Boustrophedon coverage path generation.
//!
//! Lays parallel sweep rows across a polygon, clips each row to the
//! polygon boundary and flips every second row so the rows form one
//! continuous back-and-forth path.
//!
//! ## How it works
//!
//! 1. Build a sweep frame: `parallel` runs along the rows, `perp` is the
//!    direction rows stack in.
//! 2. Find the polygon's extreme vertices along both axes.
//! 3. Turn the real-world row separation into local coordinate units.
//! 4. Intersect rays through the extreme vertices to get the corners of an
//!    oriented bounding box. The first row is inset half a separation.
//! 5. Lay full-width candidate rows across the box.
//! 6. Clip every candidate to its outermost crossings with the polygon.
//! 7. Reverse every odd row.
//!
//! Concave polygons are clipped to the outermost pair of crossings, so a
//! row can span a notch in the boundary.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{CoverageError, Result};
use crate::geometry::{Point, Polygon, Row};
use crate::intersect::{segments_cross, Crossing};

/// Bounding-box rays reach this many diagonals past their anchor vertex.
const RAY_REACH_FACTOR: f64 = 10.0;

/// Outward nudge of the row-end rays, as a fraction of the diagonal.
const EDGE_NUDGE_FACTOR: f64 = 1e-6;

/// Extents or areas below this fraction of the polygon's size count as zero.
const DEGENERATE_TOLERANCE: f64 = 1e-12;

/// Upper bound on candidate rows for a single call.
pub const MAX_ROWS: usize = 1_000_000;

// ============================================================================
// PARAMETERS
// ============================================================================

/// Which side of the first row the following rows stack on.
///
/// Relative to the sweep direction: `Left` stacks rows toward the
/// counter-clockwise perpendicular, `Right` toward the clockwise one.
/// In config files and on the command line these are `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TurnDirection {
    Left,
    #[default]
    Right,
}

impl TurnDirection {
    /// Parse the `0` / `1` wire value.
    pub fn from_index(index: u8) -> Option<TurnDirection> {
        match index {
            0 => Some(TurnDirection::Left),
            1 => Some(TurnDirection::Right),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            TurnDirection::Left => 0,
            TurnDirection::Right => 1,
        }
    }

}

impl TryFrom<u8> for TurnDirection {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        TurnDirection::from_index(value)
            .ok_or_else(|| format!("turn direction must be 0 or 1, got {}", value))
    }
}

impl From<TurnDirection> for u8 {
    fn from(turn: TurnDirection) -> u8 {
        turn.index()
    }
}

/// Linear units (e.g. meters) per coordinate unit along each axis.
///
/// Geographic frames are anisotropic - a degree of longitude is shorter
/// than a degree of latitude away from the equator. See
/// [`AxisScale::at`](crate::geo) for deriving one from a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub units_per_x: f64,
    pub units_per_y: f64,
}

impl AxisScale {
    pub fn new(units_per_x: f64, units_per_y: f64) -> Self {
        Self { units_per_x, units_per_y }
    }

    /// Same scale on both axes.
    pub fn uniform(units: f64) -> Self {
        Self::new(units, units)
    }

    /// Approximate linear units per coordinate unit across the rows.
    ///
    /// Blends linearly between the two axis scales by how far the sweep
    /// angle (folded into 0..=90 degrees) is from the x axis. A true
    /// conversion would scale per direction; this blend is close enough for
    /// the small areas the planner works with.
    pub fn across_rows(&self, angle_degrees: f64) -> f64 {
        let mut quadrant = angle_degrees;
        if quadrant > 180.0 {
            quadrant = 360.0 - quadrant;
        }
        if quadrant > 90.0 {
            quadrant = 180.0 - quadrant;
        }
        let ratio = quadrant / 90.0;
        self.units_per_x + ratio * (self.units_per_y - self.units_per_x)
    }
}

impl Default for AxisScale {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Everything the generator needs besides the polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepParameters {
    /// Sweep heading in degrees, `0..=360`. `0` runs rows along +y.
    pub angle_degrees: f64,
    pub turn: TurnDirection,
    /// Distance between rows in linear units (see [`AxisScale`]).
    pub row_separation: f64,
    #[serde(default)]
    pub scale: AxisScale,
}

impl SweepParameters {
    pub fn new(angle_degrees: f64, turn: TurnDirection, row_separation: f64) -> Self {
        Self {
            angle_degrees,
            turn,
            row_separation,
            scale: AxisScale::default(),
        }
    }

    pub fn with_scale(mut self, scale: AxisScale) -> Self {
        self.scale = scale;
        self
    }

    /// Check preconditions the generator relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.angle_degrees.is_finite() || !(0.0..=360.0).contains(&self.angle_degrees) {
            return Err(CoverageError::InvalidInput(format!(
                "sweep angle must be within 0..=360 degrees, got {}",
                self.angle_degrees
            )));
        }
        if !self.row_separation.is_finite() || self.row_separation <= 0.0 {
            return Err(CoverageError::InvalidInput(format!(
                "row separation must be positive, got {}",
                self.row_separation
            )));
        }
        let AxisScale { units_per_x, units_per_y } = self.scale;
        if !(units_per_x.is_finite() && units_per_x > 0.0 && units_per_y.is_finite() && units_per_y > 0.0) {
            return Err(CoverageError::InvalidInput(format!(
                "axis scale must be positive, got ({}, {})",
                units_per_x, units_per_y
            )));
        }
        Ok(())
    }

    /// Row separation converted to coordinate units.
    pub fn local_separation(&self) -> f64 {
        self.row_separation / self.scale.across_rows(self.angle_degrees)
    }
}

// ============================================================================
// SWEEP FRAME & EXTENT
// ============================================================================

/// Unit axes of the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepFrame {
    /// Along the rows.
    pub parallel: Point,
    /// Direction rows stack in.
    pub perp: Point,
}

impl SweepFrame {
    pub fn new(angle_degrees: f64, turn: TurnDirection) -> Self {
        let rad = angle_degrees.to_radians();
        let parallel = Point::new(rad.sin(), rad.cos());
        let perp = match turn {
            TurnDirection::Left => parallel.perp(),
            TurnDirection::Right => parallel.perp().negate(),
        };
        Self { parallel, perp }
    }
}

/// Extreme projections of a vertex list onto a [`SweepFrame`].
///
/// Indices point at the first vertex reaching each extreme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedExtent {
    pub min_parallel: f64,
    pub max_parallel: f64,
    pub min_perp: f64,
    pub max_perp: f64,
    pub min_parallel_index: usize,
    pub max_parallel_index: usize,
    pub min_perp_index: usize,
    pub max_perp_index: usize,
}

impl OrientedExtent {
    /// Project every vertex; `None` for an empty slice.
    pub fn measure(points: &[Point], frame: &SweepFrame) -> Option<Self> {
        let first = points.first()?;
        let par = first.dot(frame.parallel);
        let perp = first.dot(frame.perp);
        let mut extent = OrientedExtent {
            min_parallel: par,
            max_parallel: par,
            min_perp: perp,
            max_perp: perp,
            min_parallel_index: 0,
            max_parallel_index: 0,
            min_perp_index: 0,
            max_perp_index: 0,
        };

        for (i, pt) in points.iter().enumerate().skip(1) {
            let par = pt.dot(frame.parallel);
            let perp = pt.dot(frame.perp);
            if par < extent.min_parallel {
                extent.min_parallel = par;
                extent.min_parallel_index = i;
            }
            if par > extent.max_parallel {
                extent.max_parallel = par;
                extent.max_parallel_index = i;
            }
            if perp < extent.min_perp {
                extent.min_perp = perp;
                extent.min_perp_index = i;
            }
            if perp > extent.max_perp {
                extent.max_perp = perp;
                extent.max_perp_index = i;
            }
        }

        Some(extent)
    }

    /// Length along the rows.
    pub fn parallel_span(&self) -> f64 {
        self.max_parallel - self.min_parallel
    }

    /// Width rows have to cover.
    pub fn perp_span(&self) -> f64 {
        self.max_perp - self.min_perp
    }
}

/// Corners of the sweep-aligned box the candidate rows are laid across.
///
/// `start_*` corners lie on the row-start side, `*_near` corners on the side
/// where stacking begins (inset by up to half a row separation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub start_near: Point,
    pub start_far: Point,
    pub end_far: Point,
    pub end_near: Point,
}

impl OrientedBox {
    /// Distance the rows have to be stacked across.
    pub fn width(&self) -> f64 {
        self.start_near.distance(self.start_far)
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Plan a serpentine coverage path over `polygon`.
///
/// Rows come back in traversal order: row 0 runs forward, row 1 backward,
/// and so on. Fails with [`CoverageError::InvalidInput`] on bad parameters
/// and [`CoverageError::GeometryDegenerate`] when the polygon has no area
/// to sweep.
pub fn generate_coverage_path(polygon: &Polygon, params: &SweepParameters) -> Result<Vec<Row>> {
    params.validate()?;
    validate_polygon(polygon)?;

    let frame = SweepFrame::new(params.angle_degrees, params.turn);
    let extent = OrientedExtent::measure(&polygon.vertices, &frame)
        .ok_or_else(|| CoverageError::InvalidInput("polygon has no vertices".into()))?;
    let diagonal = check_extent(polygon, &extent)?;

    let separation = params.local_separation();
    let corners = oriented_box(polygon, &frame, &extent, separation, diagonal)?;
    let candidates = candidate_rows(&corners, &frame, separation)?;

    debug!(
        angle = params.angle_degrees,
        turn = params.turn.index(),
        separation,
        width = corners.width(),
        candidates = candidates.len(),
        "laid out candidate rows"
    );

    let clipped: Vec<Row> = candidates
        .iter()
        .filter_map(|row| clip_row(row, polygon))
        .collect();

    if clipped.len() < candidates.len() {
        trace!(dropped = candidates.len() - clipped.len(), "candidate rows missed the polygon");
    }
    if clipped.is_empty() {
        return Err(CoverageError::GeometryDegenerate(
            "no sweep row crosses the polygon boundary".into(),
        ));
    }

    Ok(serpentine(clipped))
}

fn validate_polygon(polygon: &Polygon) -> Result<()> {
    if polygon.len() < 3 {
        return Err(CoverageError::InvalidInput(format!(
            "need at least three points, got {}",
            polygon.len()
        )));
    }
    if let Some(bad) = polygon.vertices.iter().find(|p| !p.is_finite()) {
        return Err(CoverageError::InvalidInput(format!(
            "polygon vertex is not finite: ({}, {})",
            bad.x, bad.y
        )));
    }
    Ok(())
}

/// Reject polygons that collapse along either sweep axis; returns the
/// bounding-box diagonal for sizing rays.
fn check_extent(polygon: &Polygon, extent: &OrientedExtent) -> Result<f64> {
    let diagonal = polygon.diagonal().unwrap_or(0.0);
    if diagonal <= 0.0 {
        return Err(CoverageError::GeometryDegenerate(
            "all polygon vertices coincide".into(),
        ));
    }

    let tolerance = diagonal * DEGENERATE_TOLERANCE;
    if extent.parallel_span() <= tolerance || extent.perp_span() <= tolerance {
        return Err(CoverageError::GeometryDegenerate(format!(
            "polygon has no width across the sweep (spans {} x {})",
            extent.parallel_span(),
            extent.perp_span()
        )));
    }
    if polygon.signed_area().abs() <= diagonal * diagonal * DEGENERATE_TOLERANCE {
        return Err(CoverageError::GeometryDegenerate(
            "polygon vertices are collinear".into(),
        ));
    }

    Ok(diagonal)
}

/// Long segment through `origin` along `axis`, then moved by `shift`.
fn ray(origin: Point, axis: Point, reach: f64, shift: Point) -> (Point, Point) {
    (origin - axis * reach + shift, origin + axis * reach + shift)
}

fn corner(a: (Point, Point), b: (Point, Point), name: &str) -> Result<Point> {
    segments_cross(a.0, a.1, b.0, b.1)
        .map(|hit| hit.point)
        .ok_or_else(|| {
            CoverageError::GeometryDegenerate(format!("bounding box corner {} not found", name))
        })
}

/// Intersect rays through the four extreme vertices.
///
/// The row-start / row-end rays run across the rows and are nudged just
/// outside the polygon so candidate rows never end exactly on a vertex.
/// The near stacking ray is inset by half a separation so the first row
/// sits in the middle of its swath. The inset never passes the middle of
/// the polygon, so an area narrower than one separation still gets a
/// single centered row.
fn oriented_box(
    polygon: &Polygon,
    frame: &SweepFrame,
    extent: &OrientedExtent,
    separation: f64,
    diagonal: f64,
) -> Result<OrientedBox> {
    let reach = diagonal * RAY_REACH_FACTOR + separation;
    let nudge = diagonal * EDGE_NUDGE_FACTOR;
    let inset = (separation * 0.5).min(extent.perp_span() * 0.5);
    let vertex = |i: usize| polygon.vertices[i];

    let row_start = ray(vertex(extent.min_parallel_index), frame.perp, reach, frame.parallel * -nudge);
    let row_end = ray(vertex(extent.max_parallel_index), frame.perp, reach, frame.parallel * nudge);
    let near = ray(vertex(extent.min_perp_index), frame.parallel, reach, frame.perp * inset);
    let far = ray(vertex(extent.max_perp_index), frame.parallel, reach, Point::ZERO);

    Ok(OrientedBox {
        start_near: corner(row_start, near, "start/near")?,
        start_far: corner(row_start, far, "start/far")?,
        end_far: corner(row_end, far, "end/far")?,
        end_near: corner(row_end, near, "end/near")?,
    })
}

/// Full-width rows stacked `separation` apart from the near edge.
fn candidate_rows(corners: &OrientedBox, frame: &SweepFrame, separation: f64) -> Result<Vec<Row>> {
    let needed = (corners.width() / separation).ceil();
    if !needed.is_finite() || needed > MAX_ROWS as f64 {
        return Err(CoverageError::InvalidInput(format!(
            "row separation too small for this area: {} rows needed, limit is {}",
            needed, MAX_ROWS
        )));
    }
    let needed = needed as usize;
    if needed == 0 {
        return Err(CoverageError::GeometryDegenerate("sweep width is zero".into()));
    }

    Ok((0..needed)
        .map(|i| {
            let offset = frame.perp * (i as f64 * separation);
            Row::new(corners.start_near + offset, corners.end_near + offset)
        })
        .collect())
}

/// Clip a candidate row to its outermost crossings with the polygon.
///
/// Returns `None` when the row misses the polygon entirely.
pub fn clip_row(row: &Row, polygon: &Polygon) -> Option<Row> {
    let mut first: Option<Crossing> = None;
    let mut last: Option<Crossing> = None;

    for (a, b) in polygon.edges() {
        let Some(hit) = segments_cross(row.start, row.end, a, b) else {
            continue;
        };
        if first.is_none_or(|f| hit.fraction < f.fraction) {
            first = Some(hit);
        }
        if last.is_none_or(|l| hit.fraction > l.fraction) {
            last = Some(hit);
        }
    }

    Some(Row::new(first?.point, last?.point))
}

/// Reverse every odd row so consecutive rows join end-to-start.
///
/// Parity follows the rows passed in, so when candidates were dropped the
/// alternation continues over the rows actually emitted.
pub fn serpentine(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| if i % 2 == 1 { row.reversed() } else { row })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
