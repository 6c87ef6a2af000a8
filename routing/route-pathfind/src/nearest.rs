//! Relocating blocked endpoints to nearby walkable cells.

use atrium_spatial::{CellCoord, OccupancyGrid};

/// Finds a walkable cell at or near `cell`.
///
/// A free `cell` is returned as is. Otherwise square rings of Chebyshev
/// radius 1 through `max_radius` are scanned in order, columns (`dx`) in the
/// outer loop and rows (`dy`) in the inner loop, both ascending; the first
/// free in-grid cell wins. Returns `None` if every scanned cell is blocked.
///
/// # Example
///
/// ```
/// use route_pathfind::nearest_walkable;
/// use atrium_spatial::{CellBounds, CellCoord, CellState, GridFrame, OccupancyGrid};
///
/// let mut grid = OccupancyGrid::new(GridFrame::centered_square(20.0, 1.0).unwrap());
/// grid.fill(&CellBounds::around(CellCoord::new(10, 10), 1), CellState::Blocked);
///
/// // The first ring is blocked; the scan starts at the lowest column of ring 2
/// assert_eq!(nearest_walkable(&grid, CellCoord::new(10, 10), 5), Some(CellCoord::new(8, 8)));
/// assert_eq!(nearest_walkable(&grid, CellCoord::new(10, 10), 1), None);
/// ```
#[must_use]
pub fn nearest_walkable(
    grid: &OccupancyGrid,
    cell: CellCoord,
    max_radius: u32,
) -> Option<CellCoord> {
    if grid.is_free(cell) {
        return Some(cell);
    }
    let max_radius = i32::try_from(max_radius).unwrap_or(i32::MAX);
    for r in 1..=max_radius {
        for dx in -r..=r {
            for dy in -r..=r {
                // Interior cells were scanned by smaller rings
                if dx.abs() != r && dy.abs() != r {
                    continue;
                }
                let candidate = cell.offset(dx, dy);
                if grid.is_free(candidate) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use atrium_spatial::{CellBounds, CellState, GridFrame};

    fn blocked_grid() -> OccupancyGrid {
        OccupancyGrid::filled(
            GridFrame::centered_square(30.0, 1.0).unwrap(),
            CellState::Blocked,
        )
    }

    #[test]
    fn test_free_cell_unchanged() {
        let grid = OccupancyGrid::new(GridFrame::centered_square(10.0, 1.0).unwrap());
        assert_eq!(
            nearest_walkable(&grid, CellCoord::new(3, 3), 10),
            Some(CellCoord::new(3, 3))
        );
    }

    #[test]
    fn test_scan_order_prefers_low_dx() {
        let mut grid = blocked_grid();
        let center = CellCoord::new(15, 15);
        grid.set(center.offset(1, 0), CellState::Free);
        grid.set(center.offset(-1, 1), CellState::Free);
        assert_eq!(nearest_walkable(&grid, center, 10), Some(center.offset(-1, 1)));
    }

    #[test]
    fn test_nearer_ring_wins() {
        let mut grid = blocked_grid();
        let center = CellCoord::new(15, 15);
        grid.set(center.offset(-3, -3), CellState::Free);
        grid.set(center.offset(2, 2), CellState::Free);
        assert_eq!(nearest_walkable(&grid, center, 10), Some(center.offset(2, 2)));
    }

    #[test]
    fn test_radius_limit() {
        let mut grid = blocked_grid();
        let center = CellCoord::new(15, 15);
        grid.set(center.offset(0, 11), CellState::Free);
        assert_eq!(nearest_walkable(&grid, center, 10), None);
        assert_eq!(nearest_walkable(&grid, center, 11), Some(center.offset(0, 11)));
    }

    #[test]
    fn test_skips_out_of_grid() {
        let mut grid = blocked_grid();
        grid.fill(
            &CellBounds::new(CellCoord::new(0, 2), CellCoord::new(0, 2)),
            CellState::Free,
        );
        assert_eq!(
            nearest_walkable(&grid, CellCoord::new(0, 0), 3),
            Some(CellCoord::new(0, 2))
        );
    }
}
