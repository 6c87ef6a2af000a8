//! Route requests.

use nalgebra::Point3;

/// Returns the floor index for a world height.
///
/// Floors are `floor_height` apart with floor 1 at height 0. Halfway heights
/// round up, so `y = 5` with height 10 is floor 2.
///
/// # Example
///
/// ```
/// use route_types::floor_for_height;
///
/// assert_eq!(floor_for_height(0.0, 10.0), 1);
/// assert_eq!(floor_for_height(10.0, 10.0), 2);
/// assert_eq!(floor_for_height(21.5, 10.0), 3);
/// assert_eq!(floor_for_height(5.0, 10.0), 2);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn floor_for_height(y: f64, floor_height: f64) -> i32 {
    (y / floor_height + 0.5).floor() as i32 + 1
}

/// A request to route between two points, each on a known floor.
///
/// # Example
///
/// ```
/// use route_types::RouteRequest;
/// use nalgebra::Point3;
///
/// let request = RouteRequest::from_heights(
///     Point3::new(0.0, 0.0, 45.0),
///     Point3::new(35.0, 20.0, 35.0),
///     10.0,
/// );
/// assert_eq!((request.start_floor, request.end_floor), (1, 3));
/// assert!(!request.is_same_floor());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// World-space start.
    pub start: Point3<f64>,
    /// Floor of the start.
    pub start_floor: i32,
    /// World-space destination.
    pub end: Point3<f64>,
    /// Floor of the destination.
    pub end_floor: i32,
}

impl RouteRequest {
    /// Creates a request with explicit floors.
    #[must_use]
    pub const fn new(
        start: Point3<f64>,
        start_floor: i32,
        end: Point3<f64>,
        end_floor: i32,
    ) -> Self {
        Self {
            start,
            start_floor,
            end,
            end_floor,
        }
    }

    /// Creates a same-floor request.
    #[must_use]
    pub const fn on_floor(start: Point3<f64>, end: Point3<f64>, floor: i32) -> Self {
        Self::new(start, floor, end, floor)
    }

    /// Creates a request whose floors are derived from the points' heights.
    #[must_use]
    pub fn from_heights(start: Point3<f64>, end: Point3<f64>, floor_height: f64) -> Self {
        Self::new(
            start,
            floor_for_height(start.y, floor_height),
            end,
            floor_for_height(end.y, floor_height),
        )
    }

    /// Returns `true` if start and destination share a floor.
    #[must_use]
    pub const fn is_same_floor(&self) -> bool {
        self.start_floor == self.end_floor
    }

    /// Returns the number of floors between start and destination.
    #[must_use]
    pub const fn floor_span(&self) -> u32 {
        self.start_floor.abs_diff(self.end_floor)
    }
}
