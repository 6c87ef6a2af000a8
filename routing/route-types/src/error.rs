//! Error types for routing operations.
//!
//! This module defines the [`RoutingError`] enum which represents every
//! failure that can surface from rasterization, grid search or floor routing.

use atrium_spatial::{CellCoord, SpatialError};

/// Errors that can occur during routing operations.
///
/// Single-floor search failures ([`NoPathFound`](Self::NoPathFound),
/// [`StartBlocked`](Self::StartBlocked), [`GoalBlocked`](Self::GoalBlocked))
/// are recovered by the floor router with a straight-line leg; only
/// [`NoRoute`](Self::NoRoute) and configuration problems reach the caller of a
/// route request.
///
/// # Example
///
/// ```
/// use route_types::RoutingError;
/// use atrium_spatial::CellCoord;
///
/// let error = RoutingError::NoPathFound {
///     start: CellCoord::new(0, 0),
///     goal: CellCoord::new(10, 10),
/// };
///
/// assert!(error.to_string().contains("no path found"));
/// assert!(error.is_recoverable());
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RoutingError {
    /// No walkable path exists between start and goal on the floor grid.
    #[error("no path found from {start} to {goal}")]
    NoPathFound {
        /// The starting cell.
        start: CellCoord,
        /// The goal cell.
        goal: CellCoord,
    },

    /// The start cell is blocked and no free cell was found nearby.
    #[error("start cell {0} is blocked")]
    StartBlocked(CellCoord),

    /// The goal cell is blocked and no free cell was found nearby.
    #[error("goal cell {0} is blocked")]
    GoalBlocked(CellCoord),

    /// The assembled route has fewer than two distinct waypoints.
    #[error("no route: only {waypoints} distinct waypoint(s) after cleanup")]
    NoRoute {
        /// Waypoints left after cleanup.
        waypoints: usize,
    },

    /// An invalid configuration parameter was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The grid frame could not be built.
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

impl RoutingError {
    /// Creates an invalid configuration error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::RoutingError;
    ///
    /// let error = RoutingError::invalid_config("cell_size must be positive");
    /// assert!(error.to_string().contains("cell_size"));
    /// ```
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Returns `true` if this is a "no path found" error.
    #[must_use]
    pub const fn is_no_path_found(&self) -> bool {
        matches!(self, Self::NoPathFound { .. })
    }

    /// Returns `true` if the start or goal cell is blocked.
    #[must_use]
    pub const fn is_blocked_endpoint(&self) -> bool {
        matches!(self, Self::StartBlocked(_) | Self::GoalBlocked(_))
    }

    /// Returns `true` for failures a router replaces with a straight-line leg.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.is_no_path_found() || self.is_blocked_endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_found_display() {
        let error = RoutingError::NoPathFound {
            start: CellCoord::new(0, 0),
            goal: CellCoord::new(10, 10),
        };
        let msg = error.to_string();
        assert!(msg.contains("no path found"));
        assert!(msg.contains("(0, 0)"));
        assert!(msg.contains("(10, 10)"));
    }

    #[test]
    fn test_blocked_display() {
        let start = RoutingError::StartBlocked(CellCoord::new(5, 5));
        let goal = RoutingError::GoalBlocked(CellCoord::new(5, 6));
        assert!(start.to_string().contains("start cell"));
        assert!(goal.to_string().contains("(5, 6)"));
        assert!(start.is_blocked_endpoint());
        assert!(goal.is_recoverable());
    }

    #[test]
    fn test_no_route_is_terminal() {
        let error = RoutingError::NoRoute { waypoints: 1 };
        assert!(error.to_string().contains("1 distinct"));
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_spatial_conversion() {
        let error: RoutingError = SpatialError::InvalidCellSize(0.0).into();
        assert!(error.to_string().contains("cell size"));
        assert!(!error.is_recoverable());
    }
}
