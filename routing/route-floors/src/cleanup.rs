//! Waypoint cleanup for assembled routes.
//!
//! Joining legs and rides leaves near-duplicate points behind, for example
//! when a leg ends at a landing that the next leg starts from. Duplicates
//! give a spline zero-length spans, so they are collapsed before a route is
//! returned.

use nalgebra::Point3;
use route_types::WaypointSequence;

/// Drops non-finite waypoints and collapses consecutive near-duplicates.
///
/// A waypoint is kept only if it lies more than `epsilon` from the last kept
/// one. The first finite point is always kept. The last finite point takes
/// the place of the last kept one, so the result still ends exactly where the
/// input ended; interior points within `epsilon` of it are dropped as well.
/// Every pair of consecutive output points is more than `epsilon` apart. If
/// everything collapses into the first point, a single point is returned.
///
/// # Example
///
/// ```
/// use route_floors::clean_waypoints;
/// use nalgebra::Point3;
///
/// let cleaned = clean_waypoints(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(0.05, 0.0, 0.0),
///         Point3::new(f64::NAN, 0.0, 0.0),
///         Point3::new(5.0, 0.0, 0.0),
///         Point3::new(5.02, 0.0, 0.0),
///     ],
///     0.1,
/// );
///
/// assert_eq!(
///     cleaned.points(),
///     &[Point3::new(0.0, 0.0, 0.0), Point3::new(5.02, 0.0, 0.0)]
/// );
/// ```
#[must_use]
pub fn clean_waypoints(
    points: impl IntoIterator<Item = Point3<f64>>,
    epsilon: f64,
) -> WaypointSequence {
    let mut kept: Vec<Point3<f64>> = Vec::new();
    let mut last_input = None;

    for point in points.into_iter().filter(is_finite) {
        last_input = Some(point);
        match kept.last() {
            Some(last) if (point - last).norm() <= epsilon => {}
            _ => kept.push(point),
        }
    }

    if let Some(end) = last_input {
        if kept.len() >= 2 {
            kept.pop();
            while kept.len() >= 2 && kept.last().is_some_and(|p| (end - p).norm() <= epsilon) {
                kept.pop();
            }
            if kept.last().is_some_and(|p| (end - p).norm() > epsilon) {
                kept.push(end);
            }
        }
    }

    WaypointSequence::new(kept)
}

fn is_finite(point: &Point3<f64>) -> bool {
    point.iter().all(|c| c.is_finite())
}
