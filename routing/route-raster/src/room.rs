//! Stamping a single room onto a floor grid.

use atrium_spatial::{CellState, GridFrame, OccupancyGrid};
use route_types::{RasterConfig, Room};

/// Cell counts written while stamping one room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomStamp {
    /// Cells marked blocked by the padded outline.
    pub blocked: usize,
    /// Cells freed by the carved interior.
    pub interior: usize,
    /// Cells freed by the entrance corridor.
    pub entrance: usize,
}

/// Stamps `room` onto `grid` in three passes.
///
/// 1. The footprint grown by the wall padding is blocked, rounding outward.
/// 2. The footprint shrunk by the interior margin is freed, rounding inward.
/// 3. The entrance corridor, if any, is freed, rounding outward.
///
/// Later passes overwrite earlier ones, and later rooms overwrite earlier rooms.
pub fn stamp_room(grid: &mut OccupancyGrid, room: &Room, config: &RasterConfig) -> RoomStamp {
    let frame: GridFrame = *grid.frame();
    let footprint = room.footprint();
    let mut stamp = RoomStamp::default();

    if let Some(cells) = frame.outer_span(&footprint.expanded(config.wall_padding())) {
        stamp.blocked = grid.fill(&cells, CellState::Blocked);
    }

    let interior = footprint.shrunk(config.interior_margin());
    if !interior.is_empty() {
        if let Some(cells) = frame.inner_span(&interior) {
            stamp.interior = grid.fill(&cells, CellState::Free);
        }
    }

    if let Some(entrance) = &room.entrance {
        let corridor = entrance.corridor(config.entrance_slack(), config.entrance_reach());
        if let Some(cells) = frame.outer_span(&corridor) {
            stamp.entrance = grid.fill(&cells, CellState::Free);
        }
    }

    stamp
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use atrium_spatial::{CellCoord, line_of_sight};
    use nalgebra::{Point3, Vector3};
    use route_types::{Entrance, EntranceOrientation};

    fn grid() -> OccupancyGrid {
        OccupancyGrid::new(GridFrame::centered_square(100.0, 2.0).unwrap())
    }

    fn square_room() -> Room {
        Room::new(1, Point3::new(0.0, 1.5, 0.0), Vector3::new(20.0, 3.0, 20.0))
    }

    #[test]
    fn test_sealed_room_counts() {
        let mut grid = grid();
        let stamp = stamp_room(&mut grid, &square_room(), &RasterConfig::default());

        // Padded outline spans cells 18..=31, interior 21..=28
        assert_eq!(stamp.blocked, 14 * 14);
        assert_eq!(stamp.interior, 8 * 8);
        assert_eq!(stamp.entrance, 0);
        assert_eq!(grid.blocked_count(), 14 * 14 - 8 * 8);

        assert!(grid.is_blocked(CellCoord::new(18, 18)));
        assert!(grid.is_blocked(CellCoord::new(31, 31)));
        assert!(grid.is_free(CellCoord::new(32, 31)));
        assert!(grid.is_free(CellCoord::new(21, 21)));
        assert!(grid.is_blocked(CellCoord::new(20, 21)));
    }

    #[test]
    fn test_entrance_opens_wall() {
        let mut grid = grid();
        let room = square_room().with_entrance(Entrance::new(
            0.0,
            10.0,
            4.0,
            EntranceOrientation::Horizontal,
        ));
        let stamp = stamp_room(&mut grid, &room, &RasterConfig::default());

        // Corridor x in [-3, 3], z in [2, 18] -> columns 23..=26, rows 26..=33
        assert_eq!(stamp.entrance, 4 * 8);
        assert!(line_of_sight(&grid, CellCoord::new(24, 24), CellCoord::new(24, 34)));
        assert!(!line_of_sight(&grid, CellCoord::new(20, 24), CellCoord::new(20, 34)));
    }

    #[test]
    fn test_vertical_entrance() {
        let mut grid = grid();
        let room = square_room().with_entrance(Entrance::new(
            -10.0,
            0.0,
            4.0,
            EntranceOrientation::Vertical,
        ));
        stamp_room(&mut grid, &room, &RasterConfig::default());

        // Walk out through the west wall along row 25
        assert!(line_of_sight(&grid, CellCoord::new(25, 25), CellCoord::new(15, 25)));
        assert!(!line_of_sight(&grid, CellCoord::new(25, 20), CellCoord::new(15, 20)));
    }

    #[test]
    fn test_tiny_room_has_no_interior() {
        let mut grid = grid();
        let room = Room::new(1, Point3::origin(), Vector3::new(3.0, 3.0, 3.0));
        let stamp = stamp_room(&mut grid, &room, &RasterConfig::default());
        assert_eq!(stamp.interior, 0);
        assert!(stamp.blocked > 0);
    }

    #[test]
    fn test_room_outside_world_is_clipped() {
        let mut grid = grid();
        let room = Room::new(1, Point3::new(200.0, 0.0, 0.0), Vector3::new(10.0, 3.0, 10.0));
        let stamp = stamp_room(&mut grid, &room, &RasterConfig::default());
        assert_eq!(stamp, RoomStamp::default());
        assert_eq!(grid.blocked_count(), 0);
    }
}
