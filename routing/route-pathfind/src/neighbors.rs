//! Neighbor generation for grid search.
//!
//! # Example
//!
//! ```
//! use route_pathfind::neighbors::NeighborGenerator;
//! use route_types::DiagonalPolicy;
//! use atrium_spatial::{CellCoord, GridFrame, OccupancyGrid};
//!
//! let grid = OccupancyGrid::new(GridFrame::centered_square(20.0, 1.0).unwrap());
//! let generator = NeighborGenerator::new(&grid);
//!
//! let neighbors: Vec<_> = generator.neighbors(CellCoord::new(5, 5)).collect();
//! assert_eq!(neighbors.len(), 8);
//! ```

use atrium_spatial::{CellCoord, OccupancyGrid};
use route_types::DiagonalPolicy;

use crate::heuristics::scaled_move_cost;

/// Generates walkable neighbors of a cell on an 8-connected grid.
///
/// Cardinal neighbors are produced first. A diagonal neighbor is produced
/// only if it is free and the [`DiagonalPolicy`] accepts the two orthogonal
/// cells the step passes.
///
/// # Example
///
/// ```
/// use route_pathfind::neighbors::NeighborGenerator;
/// use route_types::DiagonalPolicy;
/// use atrium_spatial::{CellCoord, CellState, GridFrame, OccupancyGrid};
///
/// let mut grid = OccupancyGrid::new(GridFrame::centered_square(20.0, 1.0).unwrap());
/// grid.set(CellCoord::new(6, 5), CellState::Blocked);
///
/// // The blocked east cell also rules out both eastern diagonals
/// let strict = NeighborGenerator::new(&grid);
/// assert_eq!(strict.neighbors(CellCoord::new(5, 5)).count(), 5);
///
/// let loose = NeighborGenerator::new(&grid).with_policy(DiagonalPolicy::IfAtMostOneObstacle);
/// assert_eq!(loose.neighbors(CellCoord::new(5, 5)).count(), 7);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NeighborGenerator<'a> {
    /// The floor grid.
    grid: &'a OccupancyGrid,
    /// When diagonal steps are allowed.
    policy: DiagonalPolicy,
}

impl<'a> NeighborGenerator<'a> {
    /// Creates a generator with the default (no corner cutting) policy.
    #[must_use]
    pub fn new(grid: &'a OccupancyGrid) -> Self {
        Self {
            grid,
            policy: DiagonalPolicy::default(),
        }
    }

    /// Sets the diagonal policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: DiagonalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the diagonal policy.
    #[must_use]
    pub const fn policy(&self) -> DiagonalPolicy {
        self.policy
    }

    /// Returns the maximum number of neighbors a cell can have.
    #[must_use]
    pub const fn neighbor_count(&self) -> usize {
        if self.policy.allows_diagonals() { 8 } else { 4 }
    }

    /// Returns `true` if the step from `from` to the adjacent `to` is allowed.
    #[must_use]
    pub fn can_step(&self, from: CellCoord, to: CellCoord) -> bool {
        if self.grid.is_blocked(to) {
            return false;
        }
        if !from.is_diagonal_to(to) {
            return true;
        }
        let side_a = self.grid.is_blocked(CellCoord::new(to.x, from.y));
        let side_b = self.grid.is_blocked(CellCoord::new(from.x, to.y));
        self.policy.permits(side_a, side_b)
    }

    /// Returns an iterator over the cells reachable in one step.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        let take = self.neighbor_count();
        cell.all_neighbors()
            .into_iter()
            .take(take)
            .filter(move |&n| self.can_step(cell, n))
    }

    /// Returns an iterator over reachable cells with their integer step costs.
    ///
    /// This is the successor function handed to `pathfinding::prelude::astar`.
    pub fn successors(&self, cell: CellCoord) -> impl Iterator<Item = (CellCoord, u64)> + '_ {
        self.neighbors(cell).map(move |n| (n, scaled_move_cost(cell, n)))
    }
}
