//! The fixed affine mapping between world floor-plane coordinates and cells.

use nalgebra::{Point2, Point3};

use crate::bounds::{CellBounds, PlanRect};
use crate::cell::CellCoord;
use crate::error::SpatialError;

/// Maps world (X, Z) coordinates to grid cells and back.
///
/// The frame covers the world rectangle starting at `origin` and spanning
/// `width * cell_size` along X and `height * cell_size` along Z. Cell `(i, j)`
/// covers `[origin.x + i*cell, origin.x + (i+1)*cell)` and likewise on Z, so
/// the mapping is injective and identical for every floor sharing the frame.
///
/// # Example
///
/// ```
/// use atrium_spatial::{CellCoord, GridFrame};
/// use nalgebra::Point3;
///
/// // 100x100 world centered on the origin, 2-unit cells
/// let frame = GridFrame::centered_square(100.0, 2.0).unwrap();
/// assert_eq!(frame.dimensions(), (50, 50));
///
/// let cell = frame.world_to_cell(&Point3::new(35.0, 0.0, 10.0));
/// assert_eq!(cell, CellCoord::new(42, 30));
///
/// let center = frame.cell_to_world(cell, 0.0);
/// assert_eq!(center, Point3::new(35.0, 0.0, 11.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridFrame {
    /// World (X, Z) position of the minimum corner of cell (0, 0).
    origin: Point2<f64>,
    /// Side length of a cell in world units.
    cell_size: f64,
    /// Number of columns (world X).
    width: u32,
    /// Number of rows (world Z).
    height: u32,
}

impl GridFrame {
    /// Creates a frame with the given origin, cell size and dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidCellSize`] if `cell_size` is not positive
    /// and finite, and [`SpatialError::InvalidDimensions`] if either dimension
    /// is zero or does not fit in `i32`.
    pub fn new(
        origin: Point2<f64>,
        cell_size: f64,
        width: u32,
        height: u32,
    ) -> Result<Self, SpatialError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialError::InvalidCellSize(cell_size));
        }
        if width == 0
            || height == 0
            || i32::try_from(width).is_err()
            || i32::try_from(height).is_err()
        {
            return Err(SpatialError::InvalidDimensions { width, height });
        }
        Ok(Self {
            origin,
            cell_size,
            width,
            height,
        })
    }

    /// Creates a frame covering the world rectangle `[origin, origin + (width, depth))`.
    ///
    /// Dimensions are rounded up so the whole extent is covered.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidExtent`] for non-positive extents, plus the
    /// errors of [`GridFrame::new`].
    pub fn covering(
        origin: Point2<f64>,
        width: f64,
        depth: f64,
        cell_size: f64,
    ) -> Result<Self, SpatialError> {
        if !(width.is_finite() && depth.is_finite() && width > 0.0 && depth > 0.0) {
            return Err(SpatialError::InvalidExtent { width, depth });
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialError::InvalidCellSize(cell_size));
        }
        let columns = cell_count(width, cell_size);
        let rows = cell_count(depth, cell_size);
        Self::new(origin, cell_size, columns, rows)
    }

    /// Creates a frame for a square world of side `side` centered on the origin.
    ///
    /// # Errors
    ///
    /// See [`GridFrame::covering`].
    pub fn centered_square(side: f64, cell_size: f64) -> Result<Self, SpatialError> {
        let half = side / 2.0;
        Self::covering(Point2::new(-half, -half), side, side, cell_size)
    }

    /// Returns the world origin of cell (0, 0).
    #[must_use]
    pub const fn origin(&self) -> &Point2<f64> {
        &self.origin
    }

    /// Returns the cell side length.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the bounds covering every cell of the frame.
    #[must_use]
    pub fn full_bounds(&self) -> CellBounds {
        CellBounds::new(CellCoord::origin(), CellCoord::new(self.max_x(), self.max_y()))
    }

    /// Checks whether a cell lies inside the frame.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x <= self.max_x() && cell.y <= self.max_y()
    }

    /// Clamps a cell into the frame.
    #[must_use]
    pub fn clamp(&self, cell: CellCoord) -> CellCoord {
        CellCoord::new(cell.x.clamp(0, self.max_x()), cell.y.clamp(0, self.max_y()))
    }

    /// Maps a world point to the cell containing it, ignoring height.
    ///
    /// Points outside the frame are clamped to the nearest edge cell.
    #[must_use]
    pub fn world_to_cell(&self, point: &Point3<f64>) -> CellCoord {
        self.clamp(self.world_to_cell_unclamped(point.x, point.z))
    }

    /// Maps world `(x, z)` to a cell index without clamping.
    #[must_use]
    pub fn world_to_cell_unclamped(&self, x: f64, z: f64) -> CellCoord {
        CellCoord::new(
            saturate(self.axis_index(x, self.origin.x).floor()),
            saturate(self.axis_index(z, self.origin.y).floor()),
        )
    }

    /// Returns the world (X, Z) center of a cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Point2<f64> {
        let half = self.cell_size / 2.0;
        Point2::new(
            f64::from(cell.x).mul_add(self.cell_size, self.origin.x) + half,
            f64::from(cell.y).mul_add(self.cell_size, self.origin.y) + half,
        )
    }

    /// Returns the world center of a cell at height `y`.
    #[must_use]
    pub fn cell_to_world(&self, cell: CellCoord, y: f64) -> Point3<f64> {
        let center = self.cell_center(cell);
        Point3::new(center.x, y, center.y)
    }

    /// Returns the cells touched by a world rectangle, rounding outward.
    ///
    /// The span runs from the cell containing `rect.min` up to, but excluding,
    /// the first cell boundary at or beyond `rect.max`. Clamped to the frame;
    /// `None` if nothing of the rectangle lands on the grid.
    #[must_use]
    pub fn outer_span(&self, rect: &PlanRect) -> Option<CellBounds> {
        self.clamped_span(
            self.axis_index(rect.min.x, self.origin.x).floor(),
            self.axis_index(rect.max.x, self.origin.x).ceil(),
            self.axis_index(rect.min.y, self.origin.y).floor(),
            self.axis_index(rect.max.y, self.origin.y).ceil(),
        )
    }

    /// Returns the cells lying within a world rectangle, rounding inward.
    ///
    /// Starts at the first cell boundary at or beyond `rect.min` and stops
    /// before the last boundary at or below `rect.max`.
    #[must_use]
    pub fn inner_span(&self, rect: &PlanRect) -> Option<CellBounds> {
        self.clamped_span(
            self.axis_index(rect.min.x, self.origin.x).ceil(),
            self.axis_index(rect.max.x, self.origin.x).floor(),
            self.axis_index(rect.min.y, self.origin.y).ceil(),
            self.axis_index(rect.max.y, self.origin.y).floor(),
        )
    }

    fn axis_index(&self, value: f64, origin: f64) -> f64 {
        (value - origin) / self.cell_size
    }

    /// Turns half-open index ranges `[x0, x1) x [y0, y1)` into clamped bounds.
    fn clamped_span(&self, x0: f64, x1: f64, y0: f64, y1: f64) -> Option<CellBounds> {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let (x0, x1) = (x0.clamp(0.0, w), x1.clamp(0.0, w));
        let (y0, y1) = (y0.clamp(0.0, h), y1.clamp(0.0, h));

        // NaN edges fail these comparisons and yield an empty span
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some(CellBounds::new(
            CellCoord::new(saturate(x0), saturate(y0)),
            CellCoord::new(saturate(x1) - 1, saturate(y1) - 1),
        ))
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn max_x(&self) -> i32 {
        self.width as i32 - 1
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn max_y(&self) -> i32 {
        self.height as i32 - 1
    }
}

/// Number of cells needed to cover `extent`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cell_count(extent: f64, cell_size: f64) -> u32 {
    (extent / cell_size).ceil().min(f64::from(u32::MAX)) as u32
}

/// Float-to-index conversion; `as` saturates and maps NaN to 0.
#[allow(clippy::cast_possible_truncation)]
fn saturate(value: f64) -> i32 {
    value as i32
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_frame() -> GridFrame {
        GridFrame::centered_square(100.0, 2.0).unwrap()
    }

    #[test]
    fn test_invalid_frames() {
        assert!(matches!(
            GridFrame::centered_square(100.0, 0.0),
            Err(SpatialError::InvalidCellSize(_))
        ));
        assert!(matches!(
            GridFrame::centered_square(-1.0, 2.0),
            Err(SpatialError::InvalidExtent { .. })
        ));
        assert!(matches!(
            GridFrame::new(Point2::origin(), 1.0, 0, 4),
            Err(SpatialError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_covering_rounds_up() {
        let frame = GridFrame::covering(Point2::origin(), 9.0, 4.0, 2.0).unwrap();
        assert_eq!(frame.dimensions(), (5, 2));
        assert_eq!(frame.cell_count(), 10);
    }

    #[test]
    fn test_world_to_cell_clamps() {
        let frame = reference_frame();
        assert_eq!(frame.world_to_cell(&Point3::new(-50.0, 0.0, -50.0)), CellCoord::new(0, 0));
        assert_eq!(frame.world_to_cell(&Point3::new(50.0, 0.0, 50.0)), CellCoord::new(49, 49));
        assert_eq!(frame.world_to_cell(&Point3::new(500.0, 0.0, -500.0)), CellCoord::new(49, 0));
        assert_eq!(
            frame.world_to_cell_unclamped(51.0, -51.0),
            CellCoord::new(50, -1)
        );
    }

    #[test]
    fn test_cell_center_roundtrip() {
        let frame = reference_frame();
        for cell in [CellCoord::new(0, 0), CellCoord::new(17, 33), CellCoord::new(49, 49)] {
            let world = frame.cell_to_world(cell, 10.0);
            assert_relative_eq!(world.y, 10.0);
            assert_eq!(frame.world_to_cell(&world), cell);
        }
    }

    #[test]
    fn test_outer_span_rounds_outward() {
        let frame = reference_frame();
        // x in [1, 39] -> indices [25.5, 44.5] -> cells 25..=44
        let rect = PlanRect::new(Point2::new(1.0, 6.0), Point2::new(39.0, 34.0));
        let span = frame.outer_span(&rect).unwrap();
        assert_eq!(span.min, CellCoord::new(25, 28));
        assert_eq!(span.max, CellCoord::new(44, 41));
    }

    #[test]
    fn test_inner_span_rounds_inward() {
        let frame = reference_frame();
        // x in [7, 33] -> indices [28.5, 41.5] -> cells 29..=40
        let rect = PlanRect::new(Point2::new(7.0, 12.0), Point2::new(33.0, 28.0));
        let span = frame.inner_span(&rect).unwrap();
        assert_eq!(span.min, CellCoord::new(29, 31));
        assert_eq!(span.max, CellCoord::new(40, 38));
    }

    #[test]
    fn test_spans_clamp_and_vanish() {
        let frame = reference_frame();
        let beyond = PlanRect::new(Point2::new(60.0, 60.0), Point2::new(70.0, 70.0));
        assert!(frame.outer_span(&beyond).is_none());

        let straddling = PlanRect::new(Point2::new(40.0, -80.0), Point2::new(80.0, -40.0));
        let span = frame.outer_span(&straddling).unwrap();
        assert_eq!(span.min, CellCoord::new(45, 0));
        assert_eq!(span.max, CellCoord::new(49, 4));

        let sliver = PlanRect::new(Point2::new(0.5, 0.5), Point2::new(1.5, 1.5));
        assert!(frame.inner_span(&sliver).is_none());
    }
}
