//! Precomputed floor grids.
//!
//! Rasterizing a floor costs far more than searching it, and a venue rarely
//! changes between requests. [`FloorGrids`] rasterizes every floor once and
//! is then shared read-only, tagged with the [`Building::fingerprint`] it was
//! built from so callers can tell when it has gone stale.

use std::collections::BTreeMap;

use atrium_spatial::{GridFrame, OccupancyGrid};
use route_raster::Rasterizer;
use route_types::Building;
use tracing::debug;

/// Read-only occupancy grids for the floors of one building.
///
/// # Example
///
/// ```
/// use route_floors::FloorGrids;
/// use route_raster::Rasterizer;
/// use route_types::{Building, Room, RoutingConfig};
/// use nalgebra::{Point3, Vector3};
///
/// let mut building = Building::new()
///     .with_room(Room::new(1, Point3::new(0.0, 1.5, 0.0), Vector3::new(10.0, 3.0, 10.0)))
///     .with_room(Room::new(2, Point3::new(0.0, 1.5, 0.0), Vector3::new(10.0, 3.0, 10.0)));
///
/// let rasterizer = Rasterizer::from_config(&RoutingConfig::default()).unwrap();
/// let grids = FloorGrids::build(&building, &rasterizer);
/// assert_eq!(grids.floors().collect::<Vec<_>>(), vec![1, 2]);
/// assert!(grids.is_current(&building));
///
/// building.rooms[0].size.x = 12.0;
/// assert!(!grids.is_current(&building));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FloorGrids {
    fingerprint: u64,
    frame: GridFrame,
    grids: BTreeMap<i32, OccupancyGrid>,
}

impl FloorGrids {
    /// Rasterizes every floor that has a room or a transition landing.
    #[must_use]
    pub fn build(building: &Building, rasterizer: &Rasterizer) -> Self {
        Self::for_floors(building, rasterizer, &building.floors())
    }

    /// Rasterizes only `floors`.
    ///
    /// Floors are rasterized in parallel when the `parallel` feature is
    /// enabled; the result does not depend on it.
    #[must_use]
    pub fn for_floors(building: &Building, rasterizer: &Rasterizer, floors: &[i32]) -> Self {
        #[cfg(feature = "parallel")]
        let grids: BTreeMap<i32, OccupancyGrid> = {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            floors
                .par_iter()
                .map(|&floor| (floor, rasterizer.rasterize(building, floor)))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let grids: BTreeMap<i32, OccupancyGrid> = floors
            .iter()
            .map(|&floor| (floor, rasterizer.rasterize(building, floor)))
            .collect();

        debug!(floors = grids.len(), "Rasterized floor grids");

        Self {
            fingerprint: building.fingerprint(),
            frame: *rasterizer.frame(),
            grids,
        }
    }

    /// Returns `true` if `building` is the one these grids were built from.
    #[must_use]
    pub fn is_current(&self, building: &Building) -> bool {
        self.fingerprint == building.fingerprint()
    }

    /// Returns the fingerprint of the source building.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Returns the frame shared by every grid.
    #[must_use]
    pub const fn frame(&self) -> &GridFrame {
        &self.frame
    }

    /// Returns the grid of `floor`, if it was rasterized.
    #[must_use]
    pub fn get(&self, floor: i32) -> Option<&OccupancyGrid> {
        self.grids.get(&floor)
    }

    /// Returns the cached floors in ascending order.
    pub fn floors(&self) -> impl Iterator<Item = i32> + '_ {
        self.grids.keys().copied()
    }

    /// Returns the number of cached floors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Returns `true` if no floor is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
