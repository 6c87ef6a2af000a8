//! Error types for spatial operations.

use crate::CellCoord;

/// Errors that can occur while building grids and frames.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// The cell size must be positive and finite.
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f64),

    /// The world extent must be positive and finite on both axes.
    #[error("world extent must be positive, got {width}x{depth}")]
    InvalidExtent {
        /// Extent along world X.
        width: f64,
        /// Extent along world Z.
        depth: f64,
    },

    /// The grid dimensions are invalid.
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Number of columns.
        width: u32,
        /// Number of rows.
        height: u32,
    },

    /// A cell lies outside the grid.
    #[error("cell {cell} is out of bounds")]
    OutOfBounds {
        /// The offending cell.
        cell: CellCoord,
    },
}
