//! Segment crossing primitives.
//!
//! Every candidate row is tested against every polygon edge, so these run
//! more than anything else in the planner and stay small and
//! allocation-free.

use crate::geometry::Point;

/// Where two segments cross.
///
/// `fraction` is the affine parameter along the *first* segment: `0.0` at
/// its start, `1.0` at its end. It is not clamped - callers that extend
/// their segments far past the area of interest read it as a position on
/// an infinite line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub fraction: f64,
    pub point: Point,
}

/// Find where segment A (`a0 -> a1`) crosses segment B (`b0 -> b1`).
///
/// Two half-plane straddle tests: B's endpoints must not lie strictly on
/// the same side of line A, and A's endpoints must not lie strictly on the
/// same side of line B. Touching counts as straddling.
///
/// Returns `None` when:
/// - the segments share an endpoint (exact comparison; polygon vertices
///   would otherwise report spurious hits against their own edges),
/// - either straddle test fails,
/// - the lines are parallel or a segment has zero length.
///
/// ## Rust Lesson #10: Option instead of sentinel values
///
/// Returning a NaN fraction for "no crossing" would poison every comparison
/// downstream. `Option<Crossing>` makes the miss impossible to forget at the
/// call site.
#[inline]
pub fn segments_cross(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Crossing> {
    if a1 == b0 || a0 == b0 || a1 == b1 || a0 == b1 {
        return None;
    }

    // Does B straddle line A?
    let a_normal = (a1 - a0).perp();
    let a_offset = a_normal.dot(a0);
    let b0_side = a_normal.dot(b0);
    let b1_side = a_normal.dot(b1);
    if (b0_side > a_offset && b1_side > a_offset) || (b0_side < a_offset && b1_side < a_offset) {
        return None;
    }

    // Does A straddle line B?
    let b_normal = (b1 - b0).perp();
    let b_offset = b_normal.dot(b0);
    let a0_side = b_normal.dot(a0);
    let a1_side = b_normal.dot(a1);
    if (a0_side > b_offset && a1_side > b_offset) || (a0_side < b_offset && a1_side < b_offset) {
        return None;
    }

    let denom = a1_side - a0_side;
    if denom == 0.0 {
        return None;
    }

    let fraction = (b_offset - a0_side) / denom;
    if !fraction.is_finite() {
        return None;
    }

    Some(Crossing {
        fraction,
        point: a0 + (a1 - a0) * fraction,
    })
}

/// Shortest distance from `p` to the segment `a -> b`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Shortest distance from `p` to any edge of a closed ring.
pub fn distance_to_boundary(p: Point, ring: &[Point]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| point_segment_distance(p, ring[i], ring[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn crossing_diagonals() {
        let hit = segments_cross(p(0.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(10.0, 0.0))
            .expect("diagonals cross");
        assert!((hit.point.x - 5.0).abs() < 1e-10);
        assert!((hit.point.y - 5.0).abs() < 1e-10);
        assert!((hit.fraction - 0.5).abs() < 1e-10);
    }

    #[test]
    fn fraction_is_measured_along_first_segment() {
        let hit = segments_cross(p(0.0, 0.0), p(10.0, 0.0), p(2.0, -1.0), p(2.0, 1.0))
            .expect("should cross");
        assert!((hit.fraction - 0.2).abs() < 1e-12);

        let hit = segments_cross(p(2.0, -1.0), p(2.0, 1.0), p(0.0, 0.0), p(10.0, 0.0))
            .expect("should cross");
        assert!((hit.fraction - 0.5).abs() < 1e-12);
    }

    #[test]
    fn parallel_segments_do_not_cross() {
        assert!(segments_cross(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 5.0), p(10.0, 5.0)).is_none());
    }

    #[test]
    fn collinear_overlap_is_rejected() {
        // Both straddle tests pass trivially, but there is no single point
        assert!(segments_cross(p(0.0, 0.0), p(10.0, 0.0), p(2.0, 0.0), p(5.0, 0.0)).is_none());
    }

    #[test]
    fn shared_endpoint_is_not_a_crossing() {
        assert!(segments_cross(p(0.0, 0.0), p(10.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)).is_none());
        assert!(segments_cross(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 0.0), p(5.0, 5.0)).is_none());
    }

    #[test]
    fn same_side_is_not_a_crossing() {
        // B entirely above line A
        assert!(segments_cross(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 1.0), p(6.0, 3.0)).is_none());
        // B straddles line A, but A stops short of line B
        assert!(segments_cross(p(0.0, 0.0), p(1.0, 0.0), p(5.0, -1.0), p(5.0, 1.0)).is_none());
    }

    #[test]
    fn touching_vertex_counts() {
        // B ends exactly on segment A
        let hit = segments_cross(p(0.0, 0.0), p(10.0, 0.0), p(4.0, 0.0), p(4.0, 3.0))
            .expect("touching counts as a crossing");
        assert!((hit.point.x - 4.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_segment_never_crosses() {
        assert!(segments_cross(p(1.0, 1.0), p(1.0, 1.0), p(0.0, 0.0), p(2.0, 2.0)).is_none());
    }

    #[test]
    fn point_segment_distance_cases() {
        let a = p(0.0, 0.0);
        let b = p(10.0, 0.0);
        assert_eq!(point_segment_distance(p(5.0, 3.0), a, b), 3.0);
        assert_eq!(point_segment_distance(p(-3.0, 4.0), a, b), 5.0);
        assert_eq!(point_segment_distance(p(13.0, 4.0), a, b), 5.0);
        assert_eq!(point_segment_distance(p(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn distance_to_square_boundary() {
        let ring = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        assert_eq!(distance_to_boundary(p(5.0, 5.0), &ring), 5.0);
        assert_eq!(distance_to_boundary(p(0.0, 7.0), &ring), 0.0);
        assert_eq!(distance_to_boundary(p(12.0, 5.0), &ring), 2.0);
    }
}
