//! Rectangular regions in grid space and in the world floor plane.

use nalgebra::{Point2, Point3};

use crate::cell::CellCoord;

/// Axis-aligned bounds in grid (cell) space.
///
/// Both corners are inclusive.
///
/// # Example
///
/// ```
/// use atrium_spatial::{CellBounds, CellCoord};
///
/// let bounds = CellBounds::new(CellCoord::new(0, 0), CellCoord::new(4, 2));
///
/// assert!(bounds.contains(CellCoord::new(4, 2)));
/// assert!(!bounds.contains(CellCoord::new(5, 2)));
/// assert_eq!(bounds.iter().count(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellBounds {
    /// Minimum corner (inclusive).
    pub min: CellCoord,
    /// Maximum corner (inclusive).
    pub max: CellCoord,
}

impl CellBounds {
    /// Creates bounds from two corners, ordering them so `min <= max` per axis.
    #[must_use]
    pub fn new(a: CellCoord, b: CellCoord) -> Self {
        Self {
            min: CellCoord::new(a.x.min(b.x), a.y.min(b.y)),
            max: CellCoord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates bounds covering a single cell.
    #[must_use]
    pub const fn from_cell(cell: CellCoord) -> Self {
        Self {
            min: cell,
            max: cell,
        }
    }

    /// Creates the square of cells within Chebyshev distance `radius` of `center`.
    ///
    /// # Example
    ///
    /// ```
    /// use atrium_spatial::{CellBounds, CellCoord};
    ///
    /// let square = CellBounds::around(CellCoord::new(10, 10), 3);
    /// assert_eq!(square.size(), (7, 7));
    /// ```
    #[must_use]
    pub fn around(center: CellCoord, radius: u32) -> Self {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        Self::new(center.offset(-r, -r), center.offset(r, r))
    }

    /// Returns `(width, height)` in cells; each is at least 1.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (
            self.max.x.abs_diff(self.min.x).saturating_add(1),
            self.max.y.abs_diff(self.min.y).saturating_add(1),
        )
    }

    /// Returns the number of cells covered.
    #[must_use]
    pub fn area(&self) -> u64 {
        let (w, h) = self.size();
        u64::from(w).saturating_mul(u64::from(h))
    }

    /// Checks whether the bounds contain a cell.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// Returns the overlap of two bounds, or `None` if they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = CellCoord::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = CellCoord::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));

        if min.x <= max.x && min.y <= max.y {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Iterates all cells, row by row (X varies fastest).
    #[must_use]
    pub const fn iter(&self) -> CellBoundsIter {
        CellBoundsIter {
            bounds: *self,
            current: Some(self.min),
        }
    }
}

impl IntoIterator for CellBounds {
    type Item = CellCoord;
    type IntoIter = CellBoundsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &CellBounds {
    type Item = CellCoord;
    type IntoIter = CellBoundsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over all cells in a [`CellBounds`].
#[derive(Debug, Clone)]
pub struct CellBoundsIter {
    bounds: CellBounds,
    current: Option<CellCoord>,
}

impl Iterator for CellBoundsIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        let mut next = current;
        if next.x < self.bounds.max.x {
            next.x += 1;
        } else if next.y < self.bounds.max.y {
            next.x = self.bounds.min.x;
            next.y += 1;
        } else {
            self.current = None;
            return Some(current);
        }
        self.current = Some(next);

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.current.map_or(0, |current| {
            let width = u64::from(self.bounds.max.x.abs_diff(self.bounds.min.x)) + 1;
            let rest_of_row = u64::from(self.bounds.max.x.abs_diff(current.x)) + 1;
            let rows_below = u64::from(self.bounds.max.y.abs_diff(current.y));
            rest_of_row.saturating_add(rows_below.saturating_mul(width))
        });

        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellBoundsIter {}

/// An axis-aligned rectangle on the world floor plane (X/Z).
///
/// `min.x`/`max.x` span world X; `min.y`/`max.y` span world Z.
///
/// # Example
///
/// ```
/// use atrium_spatial::PlanRect;
/// use nalgebra::Point2;
///
/// let room = PlanRect::from_center_size(Point2::new(20.0, 20.0), 30.0, 20.0);
/// assert_eq!(room.min, Point2::new(5.0, 10.0));
///
/// let padded = room.expanded(4.0);
/// assert_eq!(padded.max, Point2::new(39.0, 34.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRect {
    /// Minimum corner (world X, world Z).
    pub min: Point2<f64>,
    /// Maximum corner (world X, world Z).
    pub max: Point2<f64>,
}

impl PlanRect {
    /// Creates a rectangle from two corners in any order.
    #[must_use]
    pub fn new(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a rectangle from its center and extents along X and Z.
    #[must_use]
    pub fn from_center_size(center: Point2<f64>, width: f64, depth: f64) -> Self {
        let half_w = width.abs() / 2.0;
        let half_d = depth.abs() / 2.0;
        Self {
            min: Point2::new(center.x - half_w, center.y - half_d),
            max: Point2::new(center.x + half_w, center.y + half_d),
        }
    }

    /// Returns the rectangle grown by `margin` on every side.
    ///
    /// A negative margin shrinks it; the result may then be inverted
    /// (`min > max`), which [`Self::is_empty`] reports.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Point2::new(self.min.x - margin, self.min.y - margin),
            max: Point2::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Returns the rectangle shrunk by `margin` on every side.
    #[must_use]
    pub fn shrunk(&self, margin: f64) -> Self {
        self.expanded(-margin)
    }

    /// Returns `true` if the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point2<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Inclusive containment test for a plan-view point.
    #[must_use]
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Inclusive containment test for a world point, ignoring its height.
    #[must_use]
    pub fn contains_world(&self, point: &Point3<f64>) -> bool {
        self.contains(&Point2::new(point.x, point.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_ordering() {
        let bounds = CellBounds::new(CellCoord::new(5, 1), CellCoord::new(2, 4));
        assert_eq!(bounds.min, CellCoord::new(2, 1));
        assert_eq!(bounds.max, CellCoord::new(5, 4));
        assert_eq!(bounds.size(), (4, 4));
        assert_eq!(bounds.area(), 16);
    }

    #[test]
    fn test_iter_row_major() {
        let bounds = CellBounds::new(CellCoord::new(0, 0), CellCoord::new(1, 1));
        let cells: Vec<_> = bounds.iter().collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_iter_exact_size() {
        let bounds = CellBounds::new(CellCoord::new(-2, 3), CellCoord::new(2, 6));
        let mut iter = bounds.iter();
        assert_eq!(iter.len(), 20);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 18);
        assert_eq!(iter.count(), 18);
    }

    #[test]
    fn test_single_cell_iter() {
        let bounds = CellBounds::from_cell(CellCoord::new(3, 3));
        assert_eq!(bounds.iter().collect::<Vec<_>>(), vec![CellCoord::new(3, 3)]);
    }

    #[test]
    fn test_intersection() {
        let a = CellBounds::new(CellCoord::new(0, 0), CellCoord::new(10, 10));
        let b = CellBounds::new(CellCoord::new(5, 8), CellCoord::new(20, 20));
        let c = CellBounds::new(CellCoord::new(11, 0), CellCoord::new(12, 1));

        let overlap = a.intersection(&b);
        assert_eq!(
            overlap,
            Some(CellBounds::new(CellCoord::new(5, 8), CellCoord::new(10, 10)))
        );
        assert!(a.intersection(&c).is_none());
    }

    #[test]
    fn test_plan_rect_shrink_to_empty() {
        let rect = PlanRect::from_center_size(Point2::new(0.0, 0.0), 3.0, 10.0);
        assert!(!rect.is_empty());
        assert!(rect.shrunk(2.0).is_empty());
    }

    #[test]
    fn test_plan_rect_contains_world() {
        let rect = PlanRect::from_center_size(Point2::new(0.0, 45.0), 20.0, 10.0);
        assert!(rect.contains_world(&Point3::new(10.0, 99.0, 40.0)));
        assert!(!rect.contains_world(&Point3::new(10.1, 0.0, 45.0)));
        assert_eq!(rect.center(), Point2::new(0.0, 45.0));
    }
}
