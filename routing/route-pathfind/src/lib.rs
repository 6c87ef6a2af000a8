//! Grid search and smoothing for single-floor route legs.
//!
//! This crate finds walkable paths on the floor grids produced by
//! `route-raster`, and turns them into short world-space polylines.
//!
//! # Overview
//!
//! - **A\*** ([`GridAStar`]): shortest 8-connected paths via the `pathfinding`
//!   crate, with a configurable diagonal policy and expansion cap
//! - **Endpoint recovery** ([`nearest_walkable`]): moves a start or goal that
//!   landed inside a wall to the nearest free cell
//! - **Smoothing** ([`PathSmoother`]): drops cells a straight line can skip
//!   and maps the rest to world coordinates
//!
//! # Quick Start
//!
//! ```
//! use route_pathfind::{GridAStar, PathSmoother};
//! use route_types::SearchConfig;
//! use atrium_spatial::{CellBounds, CellCoord, CellState, GridFrame, OccupancyGrid};
//!
//! let mut grid = OccupancyGrid::new(GridFrame::centered_square(20.0, 1.0).unwrap());
//! grid.fill(&CellBounds::new(CellCoord::new(10, 0), CellCoord::new(10, 15)), CellState::Blocked);
//!
//! let path = GridAStar::new(&grid, SearchConfig::default())
//!     .search(CellCoord::new(2, 2), CellCoord::new(18, 2))
//!     .unwrap();
//!
//! let smoother = PathSmoother::new(&grid);
//! let smoothed = smoother.smooth(&path);
//! assert!(smoothed.len() < path.len());
//! assert!(smoother.is_clear(&smoothed));
//!
//! let waypoints = smoother.to_world(&smoothed, 0.0);
//! assert_eq!(waypoints.len(), smoothed.len());
//! ```
//!
//! # Heuristics
//!
//! The [`heuristics`] module provides 2D distance functions. Octile is the
//! default and is exact on an empty 8-connected grid.

#![doc(html_root_url = "https://docs.rs/route-pathfind/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod astar;
pub mod heuristics;
pub mod nearest;
pub mod neighbors;
pub mod smooth;

// Re-export main types for convenience
pub use astar::{GridAStar, SearchOutcome, find_path};
pub use heuristics::compute_heuristic;
pub use nearest::nearest_walkable;
pub use neighbors::NeighborGenerator;
pub use smooth::PathSmoother;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod integration_tests {
    use super::*;
    use atrium_spatial::{CellBounds, CellCoord, CellState, GridFrame, OccupancyGrid};
    use route_types::SearchConfig;

    /// A U-shaped obstacle the path has to leave through its open side.
    fn cup_grid() -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(GridFrame::centered_square(30.0, 1.0).unwrap());
        grid.fill(
            &CellBounds::new(CellCoord::new(8, 8), CellCoord::new(20, 8)),
            CellState::Blocked,
        );
        grid.fill(
            &CellBounds::new(CellCoord::new(8, 8), CellCoord::new(8, 20)),
            CellState::Blocked,
        );
        grid.fill(
            &CellBounds::new(CellCoord::new(20, 8), CellCoord::new(20, 20)),
            CellState::Blocked,
        );
        grid
    }

    #[test]
    fn test_full_workflow() {
        let grid = cup_grid();
        let path = GridAStar::new(&grid, SearchConfig::default())
            .search(CellCoord::new(14, 12), CellCoord::new(14, 2))
            .unwrap();

        assert!(path.is_contiguous());
        assert!(path.iter().all(|&c| grid.is_free(c)));

        let smoother = PathSmoother::new(&grid);
        let smoothed = smoother.smooth(&path);
        assert!(smoothed.len() <= path.len());
        assert!(smoothed.length() <= path.length() + 1e-9);
        assert!(smoother.is_clear(&smoothed));
        assert_eq!(smoothed.first(), path.first());
        assert_eq!(smoothed.last(), path.last());
    }

    #[test]
    fn test_relocated_path_starts_free() {
        let grid = cup_grid();
        let outcome = GridAStar::new(&grid, SearchConfig::default())
            .search_detailed(CellCoord::new(8, 12), CellCoord::new(2, 12))
            .unwrap();
        assert!(grid.is_free(outcome.start));
        assert_eq!(outcome.path.first(), Some(&outcome.start));
    }
}
