//! Path smoothing with grid line-of-sight.
//!
//! Searched paths step cell by cell. Smoothing keeps only the cells where the
//! walker has to turn, so every remaining segment is a clear straight line.
//!
//! # Example
//!
//! ```
//! use route_pathfind::PathSmoother;
//! use route_types::CellPath;
//! use atrium_spatial::{CellCoord, GridFrame, OccupancyGrid};
//!
//! let grid = OccupancyGrid::new(GridFrame::centered_square(20.0, 1.0).unwrap());
//! let smoother = PathSmoother::new(&grid);
//!
//! let path: CellPath = (0..10).map(|x| CellCoord::new(x, 3)).collect();
//! let smoothed = smoother.smooth(&path);
//!
//! assert_eq!(smoothed.cells(), &[CellCoord::new(0, 3), CellCoord::new(9, 3)]);
//! ```

use atrium_spatial::{OccupancyGrid, line_of_sight};
use route_types::{CellPath, WaypointSequence};

/// Simplifies cell paths using Bresenham line-of-sight on a floor grid.
#[derive(Debug, Clone, Copy)]
pub struct PathSmoother<'a> {
    /// The floor grid for line-of-sight checks.
    grid: &'a OccupancyGrid,
}

impl<'a> PathSmoother<'a> {
    /// Creates a smoother over `grid`.
    #[must_use]
    pub const fn new(grid: &'a OccupancyGrid) -> Self {
        Self { grid }
    }

    /// Removes cells that a straight line can skip.
    ///
    /// Walks the path holding an anchor, starting at the first cell. When the
    /// line from the anchor to the next cell is obstructed, the cell just
    /// before it becomes the new anchor and is kept. The first and last cells
    /// are always kept, and paths of two or fewer cells are returned as is.
    ///
    /// The result never has more cells than the input.
    ///
    /// # Example
    ///
    /// ```
    /// use route_pathfind::PathSmoother;
    /// use route_types::CellPath;
    /// use atrium_spatial::{CellBounds, CellCoord, CellState, GridFrame, OccupancyGrid};
    ///
    /// let mut grid = OccupancyGrid::new(GridFrame::centered_square(10.0, 1.0).unwrap());
    /// grid.fill(&CellBounds::new(CellCoord::new(1, 1), CellCoord::new(4, 4)), CellState::Blocked);
    ///
    /// // Around the block's corner: along row 0, then up column 5
    /// let path: CellPath = (0..=5)
    ///     .map(|x| CellCoord::new(x, 0))
    ///     .chain((1..=5).map(|y| CellCoord::new(5, y)))
    ///     .collect();
    ///
    /// let smoothed = PathSmoother::new(&grid).smooth(&path);
    /// assert!(smoothed.len() < path.len());
    /// assert_eq!(smoothed.first(), Some(&CellCoord::new(0, 0)));
    /// assert_eq!(smoothed.last(), Some(&CellCoord::new(5, 5)));
    /// ```
    #[must_use]
    pub fn smooth(&self, path: &CellPath) -> CellPath {
        let cells = path.cells();
        let n = cells.len();
        if n <= 2 {
            return path.clone();
        }

        let mut kept = vec![cells[0]];
        let mut anchor = cells[0];
        for i in 1..n {
            if !line_of_sight(self.grid, anchor, cells[i]) {
                anchor = cells[i - 1];
                kept.push(anchor);
            }
        }
        kept.push(cells[n - 1]);

        CellPath::new(kept)
    }

    /// Returns `true` if every segment of `path` has line-of-sight.
    #[must_use]
    pub fn is_clear(&self, path: &CellPath) -> bool {
        path.segments().all(|(a, b)| line_of_sight(self.grid, a, b))
    }

    /// Maps cells to the world centers of their cells at height `y`.
    ///
    /// # Example
    ///
    /// ```
    /// use route_pathfind::PathSmoother;
    /// use route_types::CellPath;
    /// use atrium_spatial::{CellCoord, GridFrame, OccupancyGrid};
    /// use nalgebra::Point3;
    ///
    /// let grid = OccupancyGrid::new(GridFrame::centered_square(100.0, 2.0).unwrap());
    /// let path = CellPath::from_single(CellCoord::new(25, 25));
    ///
    /// let world = PathSmoother::new(&grid).to_world(&path, 10.0);
    /// assert_eq!(world.first(), Some(&Point3::new(1.0, 10.0, 1.0)));
    /// ```
    #[must_use]
    pub fn to_world(&self, path: &CellPath, y: f64) -> WaypointSequence {
        path.iter().map(|&c| self.grid.cell_to_world(c, y)).collect()
    }
}
