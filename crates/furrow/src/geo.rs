//! Geographic coordinates and the local linear frame.
//!
//! Areas are drawn in latitude/longitude, but the coverage generator needs
//! Euclidean coordinates. For areas a few kilometers across, treating
//! `(lng, lat)` as plain `(x, y)` and correcting distances with a
//! per-axis meters-per-degree scale is accurate enough.

use serde::{Deserialize, Serialize};

use crate::coverage::AxisScale;
use crate::geometry::{Point, Row};

/// Earth radius used for great-circle distances (WGS84 equatorial), in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Step used when sampling meters-per-degree around a reference point.
const SCALE_PROBE_DEGREES: f64 = 0.001;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Map into the local frame: `x = lng`, `y = lat`.
    #[inline]
    pub fn to_local(self) -> Point {
        Point::new(self.lng, self.lat)
    }

    #[inline]
    pub fn from_local(p: Point) -> Self {
        Self::new(p.y, p.x)
    }

    /// Great-circle distance in meters.
    pub fn distance(self, other: LatLng) -> f64 {
        haversine_distance(self, other)
    }

    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Great-circle distance between two points, in meters.
pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

impl AxisScale {
    /// Meters per degree of longitude (`x`) and latitude (`y`) near
    /// `reference`, measured over a small step from it.
    pub fn at(reference: LatLng) -> AxisScale {
        let per_lat = haversine_distance(
            reference,
            LatLng::new(reference.lat + SCALE_PROBE_DEGREES, reference.lng),
        ) / SCALE_PROBE_DEGREES;
        let per_lng = haversine_distance(
            reference,
            LatLng::new(reference.lat, reference.lng + SCALE_PROBE_DEGREES),
        ) / SCALE_PROBE_DEGREES;
        AxisScale::new(per_lng, per_lat)
    }
}

/// A row expressed in latitude/longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRow {
    pub start: LatLng,
    pub end: LatLng,
}

impl GeoRow {
    pub fn from_local(row: &Row) -> Self {
        Self {
            start: LatLng::from_local(row.start),
            end: LatLng::from_local(row.end),
        }
    }

    pub fn to_local(&self) -> Row {
        Row::new(self.start.to_local(), self.end.to_local())
    }

    /// Great-circle length in meters.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}
