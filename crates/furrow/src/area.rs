//! Coverage areas as text, default starting areas, and related helpers.
//!
//! Areas are exchanged as a flat list of comma separated numbers read in
//! pairs: `lat, lng, lat, lng, ...`. Newlines are just whitespace.

use crate::error::AreaParseError;
use crate::geo::LatLng;
use crate::geometry::Polygon;

/// Side length of a default area, in degrees.
pub const DEFAULT_AREA_SIZE_DEGREES: f64 = 0.001;

/// Parse `lat, lng, lat, lng, ...` text into points.
pub fn parse_points(text: &str) -> Result<Vec<LatLng>, AreaParseError> {
    if text.trim().is_empty() {
        return Err(AreaParseError::Empty);
    }

    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() % 2 != 0 {
        return Err(AreaParseError::OddValueCount(parts.len()));
    }

    // ## Rust Lesson #22: collect() into Result
    //
    // An iterator of `Result<T, E>` can be collected into `Result<Vec<T>, E>`.
    // The first `Err` stops the iteration and becomes the return value.
    let values = parts
        .iter()
        .map(|part| {
            part.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| AreaParseError::NotNumeric(part.to_string()))
        })
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(values
        .chunks_exact(2)
        .map(|pair| LatLng::new(pair[0], pair[1]))
        .collect())
}

/// Format points as one `lat, lng` pair per line, the inverse of
/// [`parse_points`].
pub fn format_points(points: &[LatLng]) -> String {
    points
        .iter()
        .map(|p| format!("{}, {}", p.lat, p.lng))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Starting area for agent `index`: a small square stepped diagonally
/// away from `start` so agents' areas don't overlap.
pub fn default_area(start: LatLng, index: usize) -> Vec<LatLng> {
    let step = DEFAULT_AREA_SIZE_DEGREES;
    let lo = step * index as f64;
    let hi = step * (index + 1) as f64;
    vec![
        LatLng::new(start.lat + lo, start.lng + lo),
        LatLng::new(start.lat + hi, start.lng + lo),
        LatLng::new(start.lat + hi, start.lng + hi),
        LatLng::new(start.lat + lo, start.lng + hi),
    ]
}

/// Center of the lat/lng bounding box, `None` for no points.
pub fn bounds_center(points: &[LatLng]) -> Option<LatLng> {
    local_polygon(points).center().map(LatLng::from_local)
}

/// Move an area so its bounding-box center lands on `center`.
pub fn recenter(points: &[LatLng], center: LatLng) -> Vec<LatLng> {
    let polygon = local_polygon(points);
    let Some(current) = polygon.center() else {
        return Vec::new();
    };
    polygon
        .translated(center.to_local() - current)
        .vertices
        .into_iter()
        .map(LatLng::from_local)
        .collect()
}

fn local_polygon(points: &[LatLng]) -> Polygon {
    points.iter().map(|p| p.to_local()).collect::<Vec<_>>().into()
}

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Non-finite input is returned unchanged for the caller's validation to
/// reject.
pub fn normalize_angle(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return degrees;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_across_lines() {
        let pts = parse_points("-7.91, 110.56,\n-7.92, 110.56,\n -7.92,110.57").unwrap();
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0], LatLng::new(-7.91, 110.56));
        assert_eq!(pts[2], LatLng::new(-7.92, 110.57));
    }

    #[test]
    fn odd_value_count_is_rejected() {
        assert_eq!(parse_points("1, 2, 3"), Err(AreaParseError::OddValueCount(3)));
        assert_eq!(parse_points("1, 2,"), Err(AreaParseError::OddValueCount(3)));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        assert_eq!(
            parse_points("1, 2, three, 4"),
            Err(AreaParseError::NotNumeric("three".to_string()))
        );
        assert!(matches!(parse_points("1, NaN"), Err(AreaParseError::NotNumeric(_))));
    }

    #[test]
    fn empty_text_is_rejected() {
        assert_eq!(parse_points(""), Err(AreaParseError::Empty));
        assert_eq!(parse_points("  \n "), Err(AreaParseError::Empty));
    }

    #[test]
    fn format_then_parse_keeps_points() {
        let pts = vec![LatLng::new(1.5, -2.25), LatLng::new(3.0, 4.0)];
        let text = format_points(&pts);
        assert_eq!(text, "1.5, -2.25,\n3, 4");
        assert_eq!(parse_points(&text).unwrap(), pts);
    }

    #[test]
    fn default_areas_step_diagonally() {
        let start = LatLng::new(10.0, 20.0);
        let first = default_area(start, 0);
        assert_eq!(first[0], start);
        assert!((first[2].lat - 10.001).abs() < 1e-12);
        assert!((first[2].lng - 20.001).abs() < 1e-12);

        let third = default_area(start, 2);
        assert!((third[0].lat - 10.002).abs() < 1e-12);
        assert!((third[0].lng - 20.002).abs() < 1e-12);
        assert!((third[1].lat - 10.003).abs() < 1e-12);
        assert!((third[1].lng - 20.002).abs() < 1e-12);
    }

    #[test]
    fn recenter_moves_bounds_center() {
        let pts = default_area(LatLng::new(0.0, 0.0), 0);
        let moved = recenter(&pts, LatLng::new(50.0, 8.0));
        let center = bounds_center(&moved).unwrap();
        assert!((center.lat - 50.0).abs() < 1e-12);
        assert!((center.lng - 8.0).abs() < 1e-12);
        // Shape is kept
        assert!((moved[2].lat - moved[0].lat - 0.001).abs() < 1e-12);
        assert!((moved[2].lng - moved[0].lng - 0.001).abs() < 1e-12);
        assert!(recenter(&[], LatLng::new(0.0, 0.0)).is_empty());
    }

    #[test]
    fn angles_wrap_into_range() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(725.0), 5.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(-1e-20), 0.0);
        assert!(normalize_angle(f64::NAN).is_nan());
    }
}
