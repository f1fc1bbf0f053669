//! # furrow
//!
//! Lawnmower (boustrophedon) coverage planning for polygonal areas.
//!
//! The heart of the crate is [`generate_coverage_path`]: give it a simple
//! polygon in a local linear frame plus a sweep angle, turn direction and
//! row separation, and it returns clipped rows in serpentine order.
//! Everything else converts to and from latitude/longitude and estimates
//! how long the path takes.
//!
//! ## Rust Lesson #7: Re-exports
//!
//! Types live in the module that owns their logic (`coverage::SweepParameters`),
//! and the common ones are re-exported below so callers can write
//! `furrow::SweepParameters`. Both paths name the same type.

pub mod area;
pub mod coverage;
pub mod error;
pub mod estimate;
pub mod geo;
pub mod geometry;
pub mod intersect;
pub mod plan;

// Re-export common types at crate root for convenience.
pub use area::{default_area, format_points, normalize_angle, parse_points, recenter};
pub use coverage::{generate_coverage_path, AxisScale, SweepParameters, TurnDirection};
pub use error::{AreaParseError, CoverageError};
pub use estimate::{estimate_path, format_hms, DistanceModel, PathEstimate, TravelProfile};
pub use geo::{haversine_distance, GeoRow, LatLng};
pub use geometry::{Point, Polygon, Row};
pub use intersect::{segments_cross, Crossing};
pub use plan::{plan_area, AgentPlan, SweepSettings, Waypoint};
