//! Dense planar occupancy grid.

use nalgebra::Point3;

use crate::bounds::CellBounds;
use crate::cell::CellCoord;
use crate::frame::GridFrame;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellState {
    /// Walkable.
    #[default]
    Free,
    /// Not walkable.
    Blocked,
}

impl CellState {
    /// Returns `true` for [`CellState::Blocked`].
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }
}

/// A dense grid of free/blocked cells over one floor.
///
/// Every cell of the [`GridFrame`] is stored. Reads outside the frame report
/// [`CellState::Blocked`]; writes outside the frame are dropped, so no cell
/// beyond the world extent is ever referenced.
///
/// # Example
///
/// ```
/// use atrium_spatial::{CellBounds, CellCoord, CellState, GridFrame, OccupancyGrid};
///
/// let frame = GridFrame::centered_square(20.0, 2.0).unwrap();
/// let mut grid = OccupancyGrid::new(frame);
///
/// grid.fill(
///     &CellBounds::new(CellCoord::new(2, 2), CellCoord::new(4, 4)),
///     CellState::Blocked,
/// );
///
/// assert!(grid.is_blocked(CellCoord::new(3, 3)));
/// assert!(grid.is_free(CellCoord::new(5, 5)));
/// assert!(grid.is_blocked(CellCoord::new(-1, 0))); // outside the frame
/// assert_eq!(grid.blocked_count(), 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    /// World mapping shared by every floor.
    frame: GridFrame,
    /// Row-major cell storage (`index = y * width + x`).
    cells: Vec<CellState>,
}

impl OccupancyGrid {
    /// Creates a grid with every cell free.
    #[must_use]
    pub fn new(frame: GridFrame) -> Self {
        Self::filled(frame, CellState::Free)
    }

    /// Creates a grid with every cell set to `state`.
    #[must_use]
    pub fn filled(frame: GridFrame, state: CellState) -> Self {
        Self {
            cells: vec![state; frame.cell_count()],
            frame,
        }
    }

    /// Returns the world mapping.
    #[must_use]
    pub const fn frame(&self) -> &GridFrame {
        &self.frame
    }

    /// Returns `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    /// Checks whether a cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.frame.contains(cell)
    }

    /// Returns the state of a cell, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Returns `true` if the cell is blocked or outside the grid.
    #[must_use]
    pub fn is_blocked(&self, cell: CellCoord) -> bool {
        self.get(cell).is_none_or(CellState::is_blocked)
    }

    /// Returns `true` if the cell is inside the grid and free.
    #[must_use]
    pub fn is_free(&self, cell: CellCoord) -> bool {
        !self.is_blocked(cell)
    }

    /// Sets a cell, returning its previous state. Out-of-grid writes are ignored.
    pub fn set(&mut self, cell: CellCoord, state: CellState) -> Option<CellState> {
        let index = self.index(cell)?;
        Some(std::mem::replace(&mut self.cells[index], state))
    }

    /// Sets every in-grid cell of `bounds` to `state`, returning how many were written.
    pub fn fill(&mut self, bounds: &CellBounds, state: CellState) -> usize {
        let Some(clipped) = bounds.intersection(&self.frame.full_bounds()) else {
            return 0;
        };
        let mut written = 0;
        for cell in clipped {
            if self.set(cell, state).is_some() {
                written += 1;
            }
        }
        written
    }

    /// Maps a world point to its (clamped) cell.
    #[must_use]
    pub fn world_to_cell(&self, point: &Point3<f64>) -> CellCoord {
        self.frame.world_to_cell(point)
    }

    /// Returns the world center of a cell at height `y`.
    #[must_use]
    pub fn cell_to_world(&self, cell: CellCoord, y: f64) -> Point3<f64> {
        self.frame.cell_to_world(cell, y)
    }

    /// Returns the number of blocked cells.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_blocked()).count()
    }

    /// Returns the number of free cells.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.cells.len() - self.blocked_count()
    }

    /// Iterates `(cell, state)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellState)> + '_ {
        self.frame.full_bounds().into_iter().zip(self.cells.iter().copied())
    }

    /// Renders the grid as text, one row per line: `#` blocked, `.` free.
    ///
    /// Row 0 (lowest world Z) comes first.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let (width, _) = self.dimensions();
        let mut out = String::with_capacity(self.cells.len() + self.cells.len() / width as usize);
        for row in self.cells.chunks(width as usize) {
            out.extend(row.iter().map(|c| if c.is_blocked() { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }

    #[allow(clippy::cast_sign_loss)]
    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.frame.contains(cell) {
            return None;
        }
        let (width, _) = self.frame.dimensions();
        Some(cell.y as usize * width as usize + cell.x as usize)
    }
}
