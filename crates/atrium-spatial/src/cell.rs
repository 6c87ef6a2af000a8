//! Cell coordinate types.

use std::ops::{Add, Sub};

/// A discrete 2D coordinate in grid space.
///
/// `x` indexes the world X axis and `y` indexes the world Z axis (the floor
/// plane). Uses `i32` so that neighbour offsets and clamping can step below
/// zero before being checked against the grid.
///
/// # Example
///
/// ```
/// use atrium_spatial::CellCoord;
///
/// let cell = CellCoord::new(3, 4);
/// assert_eq!(cell.x, 3);
/// assert_eq!(cell.y, 4);
///
/// let neg = CellCoord::new(-1, -2);
/// assert_eq!(neg.x, -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// Column (world X axis).
    pub x: i32,
    /// Row (world Z axis).
    pub y: i32,
}

/// The four cardinal offsets, in a fixed order.
const CARDINAL_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// The four diagonal offsets, in a fixed order.
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell at (0, 0).
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Returns the coordinate as a tuple.
    #[must_use]
    pub const fn as_tuple(self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Returns the cell offset by `(dx, dy)`.
    ///
    /// # Example
    ///
    /// ```
    /// use atrium_spatial::CellCoord;
    ///
    /// assert_eq!(CellCoord::new(2, 2).offset(-1, 3), CellCoord::new(1, 5));
    /// ```
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Returns the 4 edge-adjacent neighbours (von Neumann neighbourhood).
    #[must_use]
    pub fn cardinal_neighbors(self) -> [Self; 4] {
        CARDINAL_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }

    /// Returns the 4 corner-adjacent neighbours.
    #[must_use]
    pub fn diagonal_neighbors(self) -> [Self; 4] {
        DIAGONAL_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }

    /// Returns all 8 neighbours (Moore neighbourhood), cardinals first.
    ///
    /// # Example
    ///
    /// ```
    /// use atrium_spatial::CellCoord;
    ///
    /// let neighbors = CellCoord::origin().all_neighbors();
    /// assert_eq!(neighbors.len(), 8);
    /// assert!(!neighbors.contains(&CellCoord::origin()));
    /// ```
    #[must_use]
    pub fn all_neighbors(self) -> [Self; 8] {
        let [a, b, c, d] = self.cardinal_neighbors();
        let [e, f, g, h] = self.diagonal_neighbors();
        [a, b, c, d, e, f, g, h]
    }

    /// Returns `true` if `other` differs from `self` on both axes by exactly one.
    #[must_use]
    pub const fn is_diagonal_to(self, other: Self) -> bool {
        self.x.abs_diff(other.x) == 1 && self.y.abs_diff(other.y) == 1
    }

    /// Manhattan (L1) distance in cells.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Chebyshev (L-infinity) distance in cells.
    ///
    /// # Example
    ///
    /// ```
    /// use atrium_spatial::CellCoord;
    ///
    /// let a = CellCoord::new(0, 0);
    /// assert_eq!(a.chebyshev_distance(CellCoord::new(3, -5)), 5);
    /// ```
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }
}

impl Add for CellCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.offset(rhs.x, rhs.y)
    }
}

impl Sub for CellCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_are_distinct_and_adjacent() {
        let center = CellCoord::new(5, 5);
        let neighbors = center.all_neighbors();

        for (i, a) in neighbors.iter().enumerate() {
            assert_eq!(center.chebyshev_distance(*a), 1);
            for b in &neighbors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_diagonal_detection() {
        let c = CellCoord::new(0, 0);
        assert!(c.is_diagonal_to(CellCoord::new(1, -1)));
        assert!(!c.is_diagonal_to(CellCoord::new(1, 0)));
        assert!(!c.is_diagonal_to(CellCoord::new(2, 2)));
    }

    #[test]
    fn test_distances() {
        let a = CellCoord::new(1, 2);
        let b = CellCoord::new(4, -2);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(a.chebyshev_distance(b), 4);
    }

    #[test]
    fn test_arithmetic() {
        let a = CellCoord::new(1, 2);
        let b = CellCoord::new(3, 5);
        assert_eq!(a + b, CellCoord::new(4, 7));
        assert_eq!(b - a, CellCoord::new(2, 3));
        assert_eq!(CellCoord::from((7, 8)), CellCoord::new(7, 8));
    }

    #[test]
    fn test_display() {
        assert_eq!(CellCoord::new(3, -1).to_string(), "(3, -1)");
    }
}
