//! Floor rasterization for indoor routing.
//!
//! Turns the rooms and transitions of one floor into an
//! [`OccupancyGrid`](atrium_spatial::OccupancyGrid):
//!
//! - every room is walled off by a padded, blocked outline
//! - its interior is carved free again, minus a margin
//! - its entrance punches a free corridor through the wall
//! - every transition landing on the floor gets a free square around it
//!
//! Rooms are stamped in listed order, so overlapping rooms resolve in favor
//! of the later one. Landings are cleared after all rooms. The output depends
//! only on the inputs, so rasterizing twice yields identical grids.
//!
//! # Example
//!
//! ```
//! use route_raster::Rasterizer;
//! use route_types::{Building, Entrance, EntranceOrientation, Room, RoutingConfig};
//! use atrium_spatial::line_of_sight;
//! use nalgebra::{Point3, Vector3};
//!
//! let building = Building::new().with_room(
//!     Room::new(1, Point3::new(0.0, 1.5, 0.0), Vector3::new(20.0, 3.0, 20.0))
//!         .with_entrance(Entrance::new(0.0, 10.0, 4.0, EntranceOrientation::Horizontal)),
//! );
//!
//! let rasterizer = Rasterizer::from_config(&RoutingConfig::default()).unwrap();
//! let grid = rasterizer.rasterize(&building, 1);
//!
//! let inside = grid.world_to_cell(&Point3::new(0.0, 0.0, 0.0));
//! let outside = grid.world_to_cell(&Point3::new(0.0, 0.0, 20.0));
//! assert!(line_of_sight(&grid, inside, outside));
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

mod landing;
mod room;

pub use landing::clear_landings;
pub use room::{RoomStamp, stamp_room};

use atrium_spatial::{GridFrame, OccupancyGrid};
use route_types::{Building, RasterConfig, Room, RoutingConfig, RoutingError, Transition};
use tracing::debug;

/// Rasterizes building floors onto a fixed grid frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rasterizer {
    frame: GridFrame,
    config: RasterConfig,
}

impl Rasterizer {
    /// Creates a rasterizer for `frame` with the given distances.
    #[must_use]
    pub const fn new(frame: GridFrame, config: RasterConfig) -> Self {
        Self { frame, config }
    }

    /// Creates a rasterizer from the grid and raster sections of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid section does not describe a valid frame.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, RoutingError> {
        Ok(Self::new(config.grid().frame()?, *config.raster()))
    }

    /// Returns the grid frame.
    #[must_use]
    pub const fn frame(&self) -> &GridFrame {
        &self.frame
    }

    /// Returns the raster distances.
    #[must_use]
    pub const fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Rasterizes `floor` of `building`.
    #[must_use]
    pub fn rasterize(&self, building: &Building, floor: i32) -> OccupancyGrid {
        rasterize(
            &self.frame,
            &building.rooms,
            &building.transitions,
            floor,
            &self.config,
        )
    }
}

/// Rasterizes `floor` from raw room and transition slices.
///
/// Rooms on other floors are skipped; transitions contribute only their
/// landings on `floor`.
#[must_use]
pub fn rasterize(
    frame: &GridFrame,
    rooms: &[Room],
    transitions: &[Transition],
    floor: i32,
    config: &RasterConfig,
) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(*frame);
    let mut room_count = 0;

    for room in rooms.iter().filter(|r| r.floor == floor) {
        let stamp = stamp_room(&mut grid, room, config);
        room_count += 1;
        debug!(
            floor,
            room = %room.name,
            blocked = stamp.blocked,
            interior = stamp.interior,
            entrance = stamp.entrance,
            "Stamped room"
        );
    }

    let landings = clear_landings(&mut grid, transitions, floor, config.landing_clearance());

    debug!(
        floor,
        rooms = room_count,
        landings,
        blocked = grid.blocked_count(),
        "Rasterized floor"
    );

    grid
}
