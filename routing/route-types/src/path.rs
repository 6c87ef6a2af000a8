//! Path representations: grid cells and world-space waypoints.
//!
//! - [`CellPath`]: a sequence of cells on one floor grid, as produced by
//!   search and consumed by smoothing
//! - [`WaypointSequence`]: ordered world-space points, as produced by legs and
//!   assembled into whole routes
//!
//! # Example
//!
//! ```
//! use route_types::{CellPath, WaypointSequence};
//! use atrium_spatial::CellCoord;
//! use nalgebra::Point3;
//!
//! let cells = CellPath::new(vec![CellCoord::new(0, 0), CellCoord::new(1, 1)]);
//! assert!((cells.length() - 2f64.sqrt()).abs() < 1e-10);
//!
//! let mut route = WaypointSequence::new(vec![Point3::origin()]);
//! route.push(Point3::new(3.0, 0.0, 4.0));
//! assert!((route.length() - 5.0).abs() < 1e-10);
//! ```

use atrium_spatial::CellCoord;
use nalgebra::Point3;

/// A path through grid cells on a single floor.
///
/// Consecutive cells are normally 8-adjacent (as produced by search), but
/// smoothed paths keep only turning cells, so segments may be long.
///
/// # Example
///
/// ```
/// use route_types::CellPath;
/// use atrium_spatial::CellCoord;
///
/// let path = CellPath::new(vec![
///     CellCoord::new(0, 0),
///     CellCoord::new(1, 0),
///     CellCoord::new(2, 0),
/// ]);
///
/// assert_eq!(path.len(), 3);
/// assert!((path.length() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPath {
    /// Ordered cells.
    cells: Vec<CellCoord>,
    /// Cached Euclidean length in cell units.
    length: f64,
}

impl CellPath {
    /// Creates a cell path. The length is computed eagerly.
    #[must_use]
    pub fn new(cells: Vec<CellCoord>) -> Self {
        let length = Self::compute_length(&cells);
        Self { cells, length }
    }

    /// Creates an empty path.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: Vec::new(),
            length: 0.0,
        }
    }

    /// Creates a path holding one cell.
    #[must_use]
    pub fn from_single(cell: CellCoord) -> Self {
        Self {
            cells: vec![cell],
            length: 0.0,
        }
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the path has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the Euclidean length in cell units.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Returns the cells as a slice.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Returns the first cell, if any.
    #[must_use]
    pub fn first(&self) -> Option<&CellCoord> {
        self.cells.first()
    }

    /// Returns the last cell, if any.
    #[must_use]
    pub fn last(&self) -> Option<&CellCoord> {
        self.cells.last()
    }

    /// Returns an iterator over the cells.
    pub fn iter(&self) -> impl Iterator<Item = &CellCoord> {
        self.cells.iter()
    }

    /// Returns an iterator over consecutive cell pairs.
    pub fn segments(&self) -> impl Iterator<Item = (CellCoord, CellCoord)> + '_ {
        self.cells.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns `true` if every step moves to one of the 8 neighbors.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::CellPath;
    /// use atrium_spatial::CellCoord;
    ///
    /// let stepped = CellPath::new(vec![CellCoord::new(0, 0), CellCoord::new(1, 1)]);
    /// let jumped = CellPath::new(vec![CellCoord::new(0, 0), CellCoord::new(4, 1)]);
    /// assert!(stepped.is_contiguous());
    /// assert!(!jumped.is_contiguous());
    /// ```
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.segments().all(|(a, b)| a.chebyshev_distance(b) == 1)
    }

    fn compute_length(cells: &[CellCoord]) -> f64 {
        cells.windows(2).fold(0.0, |acc, w| {
            let diff = w[1] - w[0];
            let dx = f64::from(diff.x);
            let dy = f64::from(diff.y);
            acc + dx.hypot(dy)
        })
    }
}

impl Default for CellPath {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<CellCoord> for CellPath {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for CellPath {
    type Item = CellCoord;
    type IntoIter = std::vec::IntoIter<CellCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a CellPath {
    type Item = &'a CellCoord;
    type IntoIter = std::slice::Iter<'a, CellCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Ordered world-space waypoints of a leg or a whole route.
///
/// Unlike [`CellPath`] the length is computed on demand, since sequences are
/// edited while a route is assembled.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WaypointSequence {
    points: Vec<Point3<f64>>,
}

impl WaypointSequence {
    /// Creates a sequence from points.
    #[must_use]
    pub const fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Creates an empty sequence.
    #[must_use]
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Creates the two-point straight line from `start` to `end`.
    #[must_use]
    pub fn direct(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self::new(vec![start, end])
    }

    /// Returns the number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the waypoints as a slice.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Returns the waypoints as a mutable slice.
    pub fn points_mut(&mut self) -> &mut [Point3<f64>] {
        &mut self.points
    }

    /// Consumes the sequence, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }

    /// Returns the first waypoint, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    /// Returns the last waypoint, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }

    /// Returns an iterator over the waypoints.
    pub fn iter(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.points.iter()
    }

    /// Returns an iterator over consecutive waypoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Appends one waypoint.
    pub fn push(&mut self, point: Point3<f64>) {
        self.points.push(point);
    }

    /// Appends every waypoint of `other` except its first.
    ///
    /// Used to join a leg that starts where this sequence currently ends.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::WaypointSequence;
    /// use nalgebra::Point3;
    ///
    /// let mut route = WaypointSequence::direct(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
    /// let leg = WaypointSequence::direct(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0));
    /// route.extend_after_first(&leg);
    /// assert_eq!(route.len(), 3);
    /// ```
    pub fn extend_after_first(&mut self, other: &Self) {
        self.points.extend(other.points.iter().skip(1).copied());
    }

    /// Replaces the first waypoint. Does nothing on an empty sequence.
    pub fn set_first(&mut self, point: Point3<f64>) {
        if let Some(first) = self.points.first_mut() {
            *first = point;
        }
    }

    /// Replaces the last waypoint. Does nothing on an empty sequence.
    pub fn set_last(&mut self, point: Point3<f64>) {
        if let Some(last) = self.points.last_mut() {
            *last = point;
        }
    }

    /// Returns the total polyline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Returns `true` if every coordinate of every waypoint is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.iter().all(|c| c.is_finite()))
    }
}

impl From<Vec<Point3<f64>>> for WaypointSequence {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point3<f64>> for WaypointSequence {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for WaypointSequence {
    type Item = Point3<f64>;
    type IntoIter = std::vec::IntoIter<Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a WaypointSequence {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
