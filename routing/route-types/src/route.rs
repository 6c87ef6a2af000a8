//! Route results: legs, completion status and the assembled multi-floor route.
//!
//! # Example
//!
//! ```
//! use route_types::{FloorRoute, Leg, LegKind, RouteStatus, WaypointSequence};
//! use nalgebra::Point3;
//!
//! let leg = Leg::new(
//!     1,
//!     WaypointSequence::direct(Point3::origin(), Point3::new(4.0, 0.0, 0.0)),
//!     LegKind::Searched,
//! );
//! let route = FloorRoute::new(leg.waypoints().clone(), vec![leg], RouteStatus::Complete);
//!
//! assert!(route.is_complete());
//! assert!((route.length() - 4.0).abs() < 1e-10);
//! ```

use std::time::Duration;

use crate::path::WaypointSequence;

/// How a leg's waypoints were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegKind {
    /// Grid search found a walkable path.
    Searched,
    /// Search failed; the leg is the straight line from start to end.
    DirectLine,
}

/// One single-floor portion of a route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// Floor the leg was planned on.
    floor: i32,
    /// World-space waypoints, first and last equal to the leg's requested endpoints.
    waypoints: WaypointSequence,
    /// Whether the leg was searched or fell back to a straight line.
    kind: LegKind,
    /// Cells expanded by the search for this leg.
    expanded: usize,
}

impl Leg {
    /// Creates a leg.
    #[must_use]
    pub const fn new(floor: i32, waypoints: WaypointSequence, kind: LegKind) -> Self {
        Self {
            floor,
            waypoints,
            kind,
            expanded: 0,
        }
    }

    /// Sets the expansion count.
    #[must_use]
    pub const fn with_expanded(mut self, expanded: usize) -> Self {
        self.expanded = expanded;
        self
    }

    /// Returns the floor.
    #[must_use]
    pub const fn floor(&self) -> i32 {
        self.floor
    }

    /// Returns the waypoints.
    #[must_use]
    pub const fn waypoints(&self) -> &WaypointSequence {
        &self.waypoints
    }

    /// Returns how the leg was obtained.
    #[must_use]
    pub const fn kind(&self) -> LegKind {
        self.kind
    }

    /// Returns the number of cells expanded by search.
    #[must_use]
    pub const fn expanded(&self) -> usize {
        self.expanded
    }

    /// Returns `true` if the leg is a straight-line fallback.
    #[must_use]
    pub const fn is_direct_line(&self) -> bool {
        matches!(self.kind, LegKind::DirectLine)
    }
}

/// Whether a route reached its destination floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteStatus {
    /// The route ends at the requested destination.
    Complete,
    /// No transition continued the route; it ends at a landing on `reached_floor`.
    Partial {
        /// Last floor the route reached.
        reached_floor: i32,
        /// Floor that was requested.
        target_floor: i32,
    },
}

/// Statistics about one routing request.
///
/// # Example
///
/// ```
/// use route_types::RouteStats;
/// use std::time::Duration;
///
/// let stats = RouteStats::new()
///     .with_cells_expanded(1500)
///     .with_elapsed(Duration::from_millis(5));
/// assert_eq!(stats.cells_expanded(), 1500);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStats {
    /// Floors rasterized for the request (cache hits excluded).
    floors_rasterized: usize,
    /// Total cells expanded across all legs.
    cells_expanded: usize,
    /// Wall time spent on the request.
    time_elapsed: Duration,
}

impl RouteStats {
    /// Creates zeroed statistics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            floors_rasterized: 0,
            cells_expanded: 0,
            time_elapsed: Duration::ZERO,
        }
    }

    /// Sets the number of rasterized floors.
    #[must_use]
    pub const fn with_floors_rasterized(mut self, count: usize) -> Self {
        self.floors_rasterized = count;
        self
    }

    /// Sets the number of expanded cells.
    #[must_use]
    pub const fn with_cells_expanded(mut self, count: usize) -> Self {
        self.cells_expanded = count;
        self
    }

    /// Sets the elapsed time.
    #[must_use]
    pub const fn with_elapsed(mut self, duration: Duration) -> Self {
        self.time_elapsed = duration;
        self
    }

    /// Returns the number of rasterized floors.
    #[must_use]
    pub const fn floors_rasterized(&self) -> usize {
        self.floors_rasterized
    }

    /// Returns the number of expanded cells.
    #[must_use]
    pub const fn cells_expanded(&self) -> usize {
        self.cells_expanded
    }

    /// Returns the elapsed time.
    #[must_use]
    pub const fn time_elapsed(&self) -> Duration {
        self.time_elapsed
    }
}

/// A complete multi-floor routing result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorRoute {
    /// The cleaned, global waypoint sequence.
    waypoints: WaypointSequence,
    /// Per-leg breakdown, in travel order.
    legs: Vec<Leg>,
    /// Whether the destination floor was reached.
    status: RouteStatus,
    /// Request statistics.
    stats: RouteStats,
}

impl FloorRoute {
    /// Creates a route.
    #[must_use]
    pub const fn new(waypoints: WaypointSequence, legs: Vec<Leg>, status: RouteStatus) -> Self {
        Self {
            waypoints,
            legs,
            status,
            stats: RouteStats::new(),
        }
    }

    /// Sets the statistics.
    #[must_use]
    pub const fn with_stats(mut self, stats: RouteStats) -> Self {
        self.stats = stats;
        self
    }

    /// Returns the global waypoints.
    #[must_use]
    pub const fn waypoints(&self) -> &WaypointSequence {
        &self.waypoints
    }

    /// Returns the legs.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> RouteStatus {
        self.status
    }

    /// Returns the statistics.
    #[must_use]
    pub const fn stats(&self) -> &RouteStats {
        &self.stats
    }

    /// Returns `true` if the route reaches the destination.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.status, RouteStatus::Complete)
    }

    /// Returns `true` if any leg fell back to a straight line.
    #[must_use]
    pub fn has_direct_line(&self) -> bool {
        self.legs.iter().any(Leg::is_direct_line)
    }

    /// Returns the polyline length of the global waypoints.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.waypoints.length()
    }

    /// Consumes the route, returning its waypoints.
    #[must_use]
    pub fn into_waypoints(self) -> WaypointSequence {
        self.waypoints
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn leg(floor: i32, kind: LegKind) -> Leg {
        Leg::new(
            floor,
            WaypointSequence::direct(Point3::origin(), Point3::new(1.0, 0.0, 0.0)),
            kind,
        )
    }

    #[test]
    fn test_leg_accessors() {
        let leg = leg(2, LegKind::Searched).with_expanded(42);
        assert_eq!(leg.floor(), 2);
        assert_eq!(leg.expanded(), 42);
        assert!(!leg.is_direct_line());
    }

    #[test]
    fn test_route_direct_line_flag() {
        let route = FloorRoute::new(
            WaypointSequence::direct(Point3::origin(), Point3::new(1.0, 0.0, 0.0)),
            vec![leg(1, LegKind::Searched), leg(2, LegKind::DirectLine)],
            RouteStatus::Complete,
        );
        assert!(route.has_direct_line());
        assert!(route.is_complete());
    }

    #[test]
    fn test_partial_status() {
        let route = FloorRoute::new(
            WaypointSequence::direct(Point3::origin(), Point3::new(1.0, 0.0, 0.0)),
            Vec::new(),
            RouteStatus::Partial {
                reached_floor: 2,
                target_floor: 3,
            },
        )
        .with_stats(RouteStats::new().with_floors_rasterized(2));

        assert!(!route.is_complete());
        assert_eq!(route.stats().floors_rasterized(), 2);
        assert_eq!(route.into_waypoints().len(), 2);
    }
}
