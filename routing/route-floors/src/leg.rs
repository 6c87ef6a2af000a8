//! Single-floor legs.
//!
//! A leg is one walk on one floor: from the route start or an escalator exit
//! to an escalator entry or the route end. Planning a leg runs grid search,
//! smooths the cell path, and maps it back to world space with the exact
//! requested endpoints.

use atrium_spatial::OccupancyGrid;
use nalgebra::Point3;
use route_pathfind::{GridAStar, PathSmoother};
use route_types::{Leg, LegKind, RoutingError, SearchConfig, WaypointSequence};
use tracing::{debug, warn};

/// Plans legs on one floor grid.
///
/// # Example
///
/// ```
/// use route_floors::LegPlanner;
/// use route_types::{LegKind, SearchConfig};
/// use atrium_spatial::{GridFrame, OccupancyGrid};
/// use nalgebra::Point3;
///
/// let grid = OccupancyGrid::new(GridFrame::centered_square(100.0, 2.0).unwrap());
/// let planner = LegPlanner::new(&grid, SearchConfig::default());
///
/// let start = Point3::new(-20.3, 0.0, -20.7);
/// let end = Point3::new(30.1, 0.0, 5.2);
/// let leg = planner.plan(1, start, end).unwrap();
///
/// assert_eq!(leg.kind(), LegKind::Searched);
/// assert_eq!(leg.waypoints().first(), Some(&start));
/// assert_eq!(leg.waypoints().last(), Some(&end));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LegPlanner<'a> {
    grid: &'a OccupancyGrid,
    search: SearchConfig,
}

impl<'a> LegPlanner<'a> {
    /// Creates a planner over the grid of one floor.
    #[must_use]
    pub const fn new(grid: &'a OccupancyGrid, search: SearchConfig) -> Self {
        Self { grid, search }
    }

    /// Plans a leg from `start` to `end` on `floor`.
    ///
    /// Interior waypoints are smoothed cell centers at the height of `start`;
    /// the first and last waypoints are exactly `start` and `end`. When the
    /// search cannot connect the two (blocked endpoints with no walkable cell
    /// nearby, or no path), the leg is the straight line `[start, end]` and
    /// is marked [`LegKind::DirectLine`].
    ///
    /// # Errors
    ///
    /// Returns search errors that are not recoverable by a straight line.
    pub fn plan(
        &self,
        floor: i32,
        start: Point3<f64>,
        end: Point3<f64>,
    ) -> Result<Leg, RoutingError> {
        let from = self.grid.world_to_cell(&start);
        let to = self.grid.world_to_cell(&end);

        let outcome = match GridAStar::new(self.grid, self.search).search_detailed(from, to) {
            Ok(outcome) => outcome,
            Err(err) if err.is_recoverable() => {
                warn!(floor, %from, %to, error = %err, "Search failed, using direct line");
                return Ok(Leg::new(
                    floor,
                    WaypointSequence::direct(start, end),
                    LegKind::DirectLine,
                ));
            }
            Err(err) => return Err(err),
        };

        let smoother = PathSmoother::new(self.grid);
        let smoothed = smoother.smooth(&outcome.path);
        let mut waypoints = smoother.to_world(&smoothed, start.y);
        if waypoints.len() < 2 {
            waypoints = WaypointSequence::direct(start, end);
        } else {
            waypoints.set_first(start);
            waypoints.set_last(end);
        }

        debug!(
            floor,
            cells = outcome.path.len(),
            waypoints = waypoints.len(),
            expanded = outcome.expanded,
            cost = outcome.cost,
            "Planned leg"
        );

        Ok(Leg::new(floor, waypoints, LegKind::Searched).with_expanded(outcome.expanded))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use atrium_spatial::{CellBounds, CellCoord, CellState, GridFrame};

    fn open_grid() -> OccupancyGrid {
        OccupancyGrid::new(GridFrame::centered_square(100.0, 2.0).unwrap())
    }

    #[test]
    fn test_open_floor_is_straight() {
        let grid = open_grid();
        let start = Point3::new(-30.0, 10.0, -30.0);
        let end = Point3::new(30.0, 10.0, 30.0);
        let leg = LegPlanner::new(&grid, SearchConfig::default())
            .plan(2, start, end)
            .unwrap();

        assert_eq!(leg.floor(), 2);
        assert_eq!(leg.kind(), LegKind::Searched);
        assert_eq!(leg.waypoints().points(), &[start, end]);
        assert!(leg.expanded() > 0);
    }

    #[test]
    fn test_same_cell_keeps_both_endpoints() {
        let grid = open_grid();
        let start = Point3::new(0.2, 0.0, 0.2);
        let end = Point3::new(1.8, 0.0, 1.8);
        let leg = LegPlanner::new(&grid, SearchConfig::default())
            .plan(1, start, end)
            .unwrap();
        assert_eq!(leg.waypoints().points(), &[start, end]);
    }

    #[test]
    fn test_detour_around_wall() {
        let mut grid = open_grid();
        // Wall across x = 0 with a gap at the far end
        grid.fill(
            &CellBounds::new(CellCoord::new(25, 0), CellCoord::new(25, 44)),
            CellState::Blocked,
        );

        let start = Point3::new(-20.0, 0.0, -20.0);
        let end = Point3::new(20.0, 0.0, -20.0);
        let leg = LegPlanner::new(&grid, SearchConfig::default())
            .plan(1, start, end)
            .unwrap();

        assert_eq!(leg.kind(), LegKind::Searched);
        assert!(leg.waypoints().len() > 2);
        assert_eq!(leg.waypoints().first(), Some(&start));
        assert_eq!(leg.waypoints().last(), Some(&end));
        // Interior waypoints sit on the start's height
        assert!(leg.waypoints().iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_unreachable_goal_falls_back() {
        let mut grid = open_grid();
        grid.fill(
            &CellBounds::new(CellCoord::new(30, 30), CellCoord::new(40, 40)),
            CellState::Blocked,
        );
        grid.fill(
            &CellBounds::new(CellCoord::new(34, 34), CellCoord::new(36, 36)),
            CellState::Free,
        );

        let start = Point3::new(-40.0, 0.0, -40.0);
        let end = grid.cell_to_world(CellCoord::new(35, 35), 0.0);
        let leg = LegPlanner::new(&grid, SearchConfig::default())
            .plan(1, start, end)
            .unwrap();

        assert!(leg.is_direct_line());
        assert_eq!(leg.waypoints().points(), &[start, end]);
    }

    #[test]
    fn test_sealed_start_falls_back() {
        let grid = OccupancyGrid::filled(
            GridFrame::centered_square(100.0, 2.0).unwrap(),
            CellState::Blocked,
        );
        let start = Point3::new(0.0, 0.0, 0.0);
        let end = Point3::new(10.0, 0.0, 0.0);
        let leg = LegPlanner::new(&grid, SearchConfig::default())
            .plan(1, start, end)
            .unwrap();
        assert_eq!(leg.kind(), LegKind::DirectLine);
    }
}
