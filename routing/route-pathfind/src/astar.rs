//! A* search on floor grids.
//!
//! This module wraps `pathfinding::prelude::astar` for 8-connected
//! [`OccupancyGrid`]s, adding endpoint recovery and an expansion cap.
//!
//! # Example
//!
//! ```
//! use route_pathfind::GridAStar;
//! use route_types::SearchConfig;
//! use atrium_spatial::{CellCoord, GridFrame, OccupancyGrid};
//!
//! let grid = OccupancyGrid::new(GridFrame::centered_square(20.0, 1.0).unwrap());
//! let search = GridAStar::new(&grid, SearchConfig::default());
//!
//! let path = search.search(CellCoord::new(0, 0), CellCoord::new(5, 5)).unwrap();
//! assert_eq!(path.len(), 6); // pure diagonal
//! ```

use atrium_spatial::{CellCoord, OccupancyGrid};
use pathfinding::prelude::astar;
use route_types::{CellPath, RoutingError, SearchConfig};
use tracing::{debug, warn};

use crate::heuristics::{COST_SCALE, scaled_heuristic};
use crate::nearest::nearest_walkable;
use crate::neighbors::NeighborGenerator;

/// Detailed outcome of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The cell path from the (possibly relocated) start to the goal.
    pub path: CellPath,
    /// Total cost in cell units.
    pub cost: f64,
    /// Number of cells expanded.
    pub expanded: usize,
    /// Start cell actually searched from.
    pub start: CellCoord,
    /// Goal cell actually searched to.
    pub goal: CellCoord,
}

impl SearchOutcome {
    /// Returns `true` if the start or goal was moved off a blocked cell.
    #[must_use]
    pub fn was_relocated(&self, requested_start: CellCoord, requested_goal: CellCoord) -> bool {
        self.start != requested_start || self.goal != requested_goal
    }
}

/// A* pathfinder for a single floor grid.
///
/// # Example
///
/// ```
/// use route_pathfind::GridAStar;
/// use route_types::SearchConfig;
/// use atrium_spatial::{CellBounds, CellCoord, CellState, GridFrame, OccupancyGrid};
///
/// let mut grid = OccupancyGrid::new(GridFrame::centered_square(20.0, 1.0).unwrap());
/// // A wall with one gap at the top
/// grid.fill(&CellBounds::new(CellCoord::new(10, 0), CellCoord::new(10, 18)), CellState::Blocked);
///
/// let search = GridAStar::new(&grid, SearchConfig::default());
/// let path = search.search(CellCoord::new(0, 0), CellCoord::new(19, 0)).unwrap();
/// assert!(path.iter().any(|c| c.x == 10 && c.y == 19));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GridAStar<'a> {
    /// The floor grid.
    grid: &'a OccupancyGrid,
    /// Search configuration.
    config: SearchConfig,
}

impl<'a> GridAStar<'a> {
    /// Creates a pathfinder over `grid`.
    #[must_use]
    pub const fn new(grid: &'a OccupancyGrid, config: SearchConfig) -> Self {
        Self { grid, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Finds a path from `start` to `goal`.
    ///
    /// Blocked endpoints are first moved to the nearest walkable cell within
    /// the configured radius.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::StartBlocked`] / [`RoutingError::GoalBlocked`] if an
    ///   endpoint is blocked and no walkable cell is nearby
    /// - [`RoutingError::NoPathFound`] if the goal is unreachable or the
    ///   expansion cap is hit
    pub fn search(&self, start: CellCoord, goal: CellCoord) -> Result<CellPath, RoutingError> {
        self.search_detailed(start, goal).map(|outcome| outcome.path)
    }

    /// Like [`search`](Self::search), also reporting cost and expansions.
    ///
    /// # Errors
    ///
    /// See [`search`](Self::search).
    pub fn search_detailed(
        &self,
        start: CellCoord,
        goal: CellCoord,
    ) -> Result<SearchOutcome, RoutingError> {
        let radius = self.config.nearest_radius();
        let from = nearest_walkable(self.grid, start, radius)
            .ok_or(RoutingError::StartBlocked(start))?;
        let to = nearest_walkable(self.grid, goal, radius)
            .ok_or(RoutingError::GoalBlocked(goal))?;

        if from != start || to != goal {
            debug!(%start, %from, %goal, %to, "Relocated blocked endpoints");
        }

        if from == to {
            return Ok(SearchOutcome {
                path: CellPath::from_single(from),
                cost: 0.0,
                expanded: 0,
                start: from,
                goal: to,
            });
        }

        let generator = NeighborGenerator::new(self.grid).with_policy(self.config.diagonal());
        let heuristic = self.config.heuristic();
        let limit = self.config.expansion_limit(self.grid.frame().cell_count());
        let mut expanded = 0usize;

        let result = astar(
            &from,
            |cell| {
                if expanded >= limit {
                    return Vec::new();
                }
                expanded += 1;
                generator.successors(*cell).collect::<Vec<_>>()
            },
            |cell| scaled_heuristic(*cell, to, heuristic),
            |cell| *cell == to,
        );

        match result {
            Some((cells, cost)) => {
                #[allow(clippy::cast_precision_loss)]
                let cost = cost as f64 / COST_SCALE as f64;
                debug!(%from, %to, cells = cells.len(), expanded, cost, "Found grid path");
                Ok(SearchOutcome {
                    path: CellPath::new(cells),
                    cost,
                    expanded,
                    start: from,
                    goal: to,
                })
            }
            None => {
                if expanded >= limit {
                    warn!(%from, %to, limit, "Search hit expansion cap");
                } else {
                    debug!(%from, %to, expanded, "Goal unreachable");
                }
                Err(RoutingError::NoPathFound {
                    start: from,
                    goal: to,
                })
            }
        }
    }
}

/// Convenience function: searches `grid` from `start` to `goal`.
///
/// # Errors
///
/// See [`GridAStar::search`].
///
/// # Example
///
/// ```
/// use route_pathfind::find_path;
/// use route_types::SearchConfig;
/// use atrium_spatial::{CellCoord, GridFrame, OccupancyGrid};
///
/// let grid = OccupancyGrid::new(GridFrame::centered_square(10.0, 1.0).unwrap());
/// let config = SearchConfig::default();
/// let path = find_path(&grid, CellCoord::new(0, 0), CellCoord::new(9, 0), &config).unwrap();
/// assert_eq!(path.len(), 10);
/// ```
pub fn find_path(
    grid: &OccupancyGrid,
    start: CellCoord,
    goal: CellCoord,
    config: &SearchConfig,
) -> Result<CellPath, RoutingError> {
    GridAStar::new(grid, *config).search(start, goal)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use atrium_spatial::{CellBounds, CellState, GridFrame};
    use route_types::{DiagonalPolicy, Heuristic};

    fn open_grid(side: f64) -> OccupancyGrid {
        OccupancyGrid::new(GridFrame::centered_square(side, 1.0).unwrap())
    }

    /// Vertical wall at column 10, rows 0..=18, gap at row 19.
    fn walled_grid() -> OccupancyGrid {
        let mut grid = open_grid(20.0);
        grid.fill(
            &CellBounds::new(CellCoord::new(10, 0), CellCoord::new(10, 18)),
            CellState::Blocked,
        );
        grid
    }

    #[test]
    fn test_straight_path() {
        let grid = open_grid(20.0);
        let search = GridAStar::new(&grid, SearchConfig::default());
        let outcome = search
            .search_detailed(CellCoord::new(2, 5), CellCoord::new(12, 5))
            .unwrap();

        assert_eq!(outcome.path.len(), 11);
        assert!(outcome.path.is_contiguous());
        assert_relative_eq!(outcome.cost, 10.0);
    }

    #[test]
    fn test_optimal_cost_matches_octile() {
        let grid = open_grid(20.0);
        let search = GridAStar::new(&grid, SearchConfig::default());
        let outcome = search
            .search_detailed(CellCoord::new(0, 0), CellCoord::new(7, 3))
            .unwrap();
        // 3 diagonals + 4 straights
        assert_relative_eq!(outcome.cost, 3.0 * 1.415 + 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_same_cell() {
        let grid = open_grid(10.0);
        let config = SearchConfig::default();
        let path = find_path(&grid, CellCoord::new(3, 3), CellCoord::new(3, 3), &config).unwrap();
        assert_eq!(path.cells(), &[CellCoord::new(3, 3)]);
    }

    #[test]
    fn test_routes_through_gap() {
        let grid = walled_grid();
        let config = SearchConfig::default();
        let path = find_path(&grid, CellCoord::new(0, 0), CellCoord::new(19, 0), &config).unwrap();

        assert!(path.iter().all(|&c| grid.is_free(c)));
        assert!(path.iter().any(|&c| c == CellCoord::new(10, 19)));
    }

    #[test]
    fn test_no_corner_cutting() {
        // Two blocks touching diagonally at (5,5)/(6,6) leave a pinch at (5,6)/(6,5)
        let mut grid = open_grid(12.0);
        grid.fill(&CellBounds::new(CellCoord::new(0, 0), CellCoord::new(5, 5)), CellState::Blocked);
        grid.fill(
            &CellBounds::new(CellCoord::new(6, 6), CellCoord::new(11, 11)),
            CellState::Blocked,
        );

        let strict = SearchConfig::default();
        assert!(find_path(&grid, CellCoord::new(6, 0), CellCoord::new(0, 6), &strict)
            .unwrap_err()
            .is_no_path_found());

        let loose = strict.with_diagonal(DiagonalPolicy::IfAtMostOneObstacle);
        assert!(find_path(&grid, CellCoord::new(6, 0), CellCoord::new(0, 6), &loose).is_err());

        let always = strict.with_diagonal(DiagonalPolicy::Always);
        let path = find_path(&grid, CellCoord::new(6, 0), CellCoord::new(0, 6), &always).unwrap();
        assert!(path.iter().any(|&c| c == CellCoord::new(6, 5)));
        assert!(path.iter().any(|&c| c == CellCoord::new(5, 6)));
    }

    #[test]
    fn test_single_obstacle_diagonal() {
        let mut grid = open_grid(10.0);
        grid.set(CellCoord::new(5, 4), CellState::Blocked);
        let (from, to) = (CellCoord::new(4, 4), CellCoord::new(5, 5));

        let strict = GridAStar::new(&grid, SearchConfig::default());
        assert_relative_eq!(strict.search_detailed(from, to).unwrap().cost, 2.0);

        let loose = GridAStar::new(
            &grid,
            SearchConfig::default().with_diagonal(DiagonalPolicy::IfAtMostOneObstacle),
        );
        assert_relative_eq!(loose.search_detailed(from, to).unwrap().cost, 1.415);
    }

    #[test]
    fn test_blocked_start_relocated() {
        let grid = walled_grid();
        let search = GridAStar::new(&grid, SearchConfig::default());
        let requested = CellCoord::new(10, 5);
        let outcome = search.search_detailed(requested, CellCoord::new(0, 5)).unwrap();

        assert_eq!(outcome.start, CellCoord::new(9, 4));
        assert!(outcome.was_relocated(requested, CellCoord::new(0, 5)));
        assert_eq!(outcome.path.first(), Some(&CellCoord::new(9, 4)));
    }

    #[test]
    fn test_unrecoverable_endpoints() {
        let mut grid = open_grid(30.0);
        grid.fill(
            &CellBounds::new(CellCoord::new(0, 0), CellCoord::new(29, 29)),
            CellState::Blocked,
        );
        grid.set(CellCoord::new(0, 0), CellState::Free);

        let search = GridAStar::new(&grid, SearchConfig::default());
        let err = search.search(CellCoord::new(15, 15), CellCoord::new(0, 0)).unwrap_err();
        assert!(matches!(err, RoutingError::StartBlocked(c) if c == CellCoord::new(15, 15)));

        let err = search.search(CellCoord::new(0, 0), CellCoord::new(20, 20)).unwrap_err();
        assert!(matches!(err, RoutingError::GoalBlocked(_)));
    }

    #[test]
    fn test_enclosed_goal_unreachable() {
        let mut grid = open_grid(20.0);
        grid.fill(
            &CellBounds::new(CellCoord::new(8, 8), CellCoord::new(12, 12)),
            CellState::Blocked,
        );
        grid.fill(&CellBounds::new(CellCoord::new(9, 9), CellCoord::new(11, 11)), CellState::Free);

        let config = SearchConfig::default();
        let err = find_path(&grid, CellCoord::new(0, 0), CellCoord::new(10, 10), &config)
            .unwrap_err();
        assert!(err.is_no_path_found());
    }

    #[test]
    fn test_expansion_cap() {
        let grid = open_grid(20.0);
        let config = SearchConfig::default().with_max_expansions(3);
        let err =
            find_path(&grid, CellCoord::new(0, 0), CellCoord::new(19, 19), &config).unwrap_err();
        assert!(err.is_no_path_found());
    }

    #[test]
    fn test_heuristics_agree_on_cost() {
        let grid = walled_grid();
        let mut costs = Vec::new();
        for heuristic in [
            Heuristic::Octile,
            Heuristic::Euclidean,
            Heuristic::Chebyshev,
            Heuristic::Zero,
        ] {
            let search = GridAStar::new(&grid, SearchConfig::default().with_heuristic(heuristic));
            let outcome = search
                .search_detailed(CellCoord::new(0, 0), CellCoord::new(19, 0))
                .unwrap();
            costs.push(outcome.cost);
        }
        for cost in &costs[1..] {
            assert_relative_eq!(*cost, costs[0]);
        }
    }
}
