//! Planar spatial data structures for floor-plan routing.
//!
//! This crate provides the grid layer that building routes are computed on:
//!
//! - [`CellCoord`] - Integer cell coordinates on a floor
//! - [`CellBounds`] - Inclusive rectangles of cells
//! - [`PlanRect`] - Axis-aligned rectangles on the world floor plane (X/Z)
//! - [`GridFrame`] - The fixed affine world↔cell mapping shared by all floors
//! - [`OccupancyGrid`] - Dense free/blocked grid for one floor
//! - [`BresenhamLine`] and [`line_of_sight`] - Digital lines and visibility
//!
//! # Coordinate Systems
//!
//! Buildings are described in a Y-up world: X and Z span the floor plane and
//! Y is height. Grids only care about the plane, so a cell's `x` indexes
//! world X and its `y` indexes world Z. Height is carried separately by the
//! callers that turn cells back into 3D waypoints.
//!
//! # Example
//!
//! ```
//! use atrium_spatial::{CellState, GridFrame, OccupancyGrid, PlanRect, line_of_sight};
//! use nalgebra::{Point2, Point3};
//!
//! let frame = GridFrame::centered_square(100.0, 2.0).unwrap();
//! let mut grid = OccupancyGrid::new(frame);
//!
//! // Block a wall across the middle of the floor
//! let wall = PlanRect::new(Point2::new(-20.0, -1.0), Point2::new(20.0, 1.0));
//! if let Some(cells) = frame.outer_span(&wall) {
//!     grid.fill(&cells, CellState::Blocked);
//! }
//!
//! let south = grid.world_to_cell(&Point3::new(0.0, 0.0, -10.0));
//! let north = grid.world_to_cell(&Point3::new(0.0, 0.0, 10.0));
//! assert!(!line_of_sight(&grid, south, north));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod bounds;
mod cell;
mod error;
mod frame;
mod grid;
mod line;

pub use bounds::{CellBounds, CellBoundsIter, PlanRect};
pub use cell::CellCoord;
pub use error::SpatialError;
pub use frame::GridFrame;
pub use grid::{CellState, OccupancyGrid};
pub use line::{BresenhamLine, first_obstruction, line_of_sight};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};
