//! The multi-floor router.
//!
//! Routing between floors walks one floor at a time towards the target. On
//! each floor it walks to the nearest transition landing that continues in
//! the right direction, rides it, and carries on from the far landing. The
//! legs and rides are joined into one waypoint sequence and cleaned up.

use std::borrow::Cow;
use std::time::Instant;

use atrium_spatial::OccupancyGrid;
use nalgebra::Point3;
use route_raster::Rasterizer;
use route_types::{
    Building, FloorRoute, Leg, RouteRequest, RouteStats, RouteStatus, RoutingConfig, RoutingError,
};
use tracing::{debug, info, warn};

use crate::cache::FloorGrids;
use crate::cleanup::clean_waypoints;
use crate::leg::LegPlanner;

/// Routes requests through one building.
///
/// # Example
///
/// ```
/// use route_floors::FloorRouter;
/// use route_types::{Building, RouteRequest, Transition};
/// use nalgebra::Point3;
///
/// let building = Building::new().with_transition(Transition::new(
///     [1, 2],
///     Point3::new(35.0, 0.0, 10.0),
///     Point3::new(45.0, 10.0, 10.0),
/// ));
/// let router = FloorRouter::with_defaults(building).unwrap();
///
/// let request = RouteRequest::new(
///     Point3::new(-20.0, 0.0, -20.0), 1,
///     Point3::new(0.0, 10.0, 30.0), 2,
/// );
/// let route = router.route(&request).unwrap();
///
/// assert!(route.is_complete());
/// assert!(route.waypoints().iter().any(|p| *p == Point3::new(45.0, 10.0, 10.0)));
/// assert_eq!(route.waypoints().last(), Some(&request.end));
/// ```
#[derive(Debug, Clone)]
pub struct FloorRouter {
    building: Building,
    config: RoutingConfig,
    rasterizer: Rasterizer,
    grids: Option<FloorGrids>,
}

impl FloorRouter {
    /// Creates a router with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidConfig`] listing every issue if the
    /// configuration does not validate.
    pub fn try_new(building: Building, config: RoutingConfig) -> Result<Self, RoutingError> {
        config.ensure_valid()?;
        let rasterizer = Rasterizer::from_config(&config)?;
        Ok(Self {
            building,
            config,
            rasterizer,
            grids: None,
        })
    }

    /// Creates a router with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`try_new`](Self::try_new).
    pub fn with_defaults(building: Building) -> Result<Self, RoutingError> {
        Self::try_new(building, RoutingConfig::default())
    }

    /// Rasterizes every floor up front and reuses the grids for all requests.
    #[must_use]
    pub fn precomputed(mut self) -> Self {
        self.grids = Some(FloorGrids::build(&self.building, &self.rasterizer));
        self
    }

    /// Uses grids rasterized elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidConfig`] if the grids were built from a
    /// different building or on a different grid frame.
    pub fn with_grids(mut self, grids: FloorGrids) -> Result<Self, RoutingError> {
        if !grids.is_current(&self.building) {
            return Err(RoutingError::invalid_config(
                "floor grids were built from a different building",
            ));
        }
        if grids.frame() != self.rasterizer.frame() {
            return Err(RoutingError::invalid_config(
                "floor grids use a different grid frame",
            ));
        }
        self.grids = Some(grids);
        Ok(self)
    }

    /// Returns the building.
    #[must_use]
    pub const fn building(&self) -> &Building {
        &self.building
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Returns the precomputed grids, if any.
    #[must_use]
    pub const fn grids(&self) -> Option<&FloorGrids> {
        self.grids.as_ref()
    }

    /// Computes a route for `request`.
    ///
    /// Legs that grid search cannot connect degrade to straight lines (see
    /// [`LegPlanner::plan`]). If no transition continues the route towards
    /// the target floor, or the floor-hop limit is reached, the route ends at
    /// the last landing reached and its status is [`RouteStatus::Partial`].
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NoRoute`] if fewer than two distinct
    /// waypoints remain after cleanup.
    pub fn route(&self, request: &RouteRequest) -> Result<FloorRoute, RoutingError> {
        let started = Instant::now();
        let router = self.config.router();

        let mut points = vec![request.start];
        let mut legs = Vec::new();
        let mut rasterized = 0;
        let mut position = request.start;
        let mut floor = request.start_floor;
        let mut hops = 0;
        let mut status = RouteStatus::Complete;

        while floor != request.end_floor {
            if hops >= router.max_floor_hops() {
                warn!(floor, target = request.end_floor, hops, "Floor hop limit reached");
                status = partial(floor, request);
                break;
            }

            let next = if request.end_floor > floor { floor + 1 } else { floor - 1 };
            let Some((entry, exit)) = self.nearest_ride(&position, floor, next) else {
                warn!(floor, next, "No transition to next floor, stopping");
                status = partial(floor, request);
                break;
            };

            let leg = self.plan_leg(floor, position, entry, &mut rasterized)?;
            points.extend(leg.waypoints().iter().skip(1).copied());
            points.push(exit);
            legs.push(leg);

            debug!(from = floor, to = next, ?entry, ?exit, "Riding transition");
            position = exit;
            floor = next;
            hops += 1;
        }

        if status == RouteStatus::Complete {
            let leg = self.plan_leg(floor, position, request.end, &mut rasterized)?;
            points.extend(leg.waypoints().iter().skip(1).copied());
            legs.push(leg);
        }

        let raw = points.len();
        let waypoints = clean_waypoints(points, router.dedup_epsilon());
        if waypoints.len() < 2 {
            return Err(RoutingError::NoRoute {
                waypoints: waypoints.len(),
            });
        }

        let expanded = legs.iter().map(Leg::expanded).sum();
        let stats = RouteStats::new()
            .with_floors_rasterized(rasterized)
            .with_cells_expanded(expanded)
            .with_elapsed(started.elapsed());

        info!(
            start_floor = request.start_floor,
            end_floor = request.end_floor,
            legs = legs.len(),
            waypoints = waypoints.len(),
            dropped = raw - waypoints.len(),
            expanded,
            complete = status == RouteStatus::Complete,
            elapsed_us = stats.time_elapsed().as_micros(),
            "Route planned"
        );

        Ok(FloorRoute::new(waypoints, legs, status).with_stats(stats))
    }

    /// Routes independent requests, in parallel with the `parallel` feature.
    ///
    /// Results are in request order.
    #[must_use]
    pub fn route_batch(&self, requests: &[RouteRequest]) -> Vec<Result<FloorRoute, RoutingError>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            requests.par_iter().map(|request| self.route(request)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            requests.iter().map(|request| self.route(request)).collect()
        }
    }

    /// Returns the `(entry, exit)` of the ride from `floor` to `next` whose
    /// entry is nearest `position` in plan view; the first listed wins ties.
    fn nearest_ride(
        &self,
        position: &Point3<f64>,
        floor: i32,
        next: i32,
    ) -> Option<(Point3<f64>, Point3<f64>)> {
        self.building
            .transitions_between(floor, next)
            .filter_map(|t| t.ride(floor, next))
            .min_by(|(a, _), (b, _)| {
                plan_distance(position, a).total_cmp(&plan_distance(position, b))
            })
    }

    fn plan_leg(
        &self,
        floor: i32,
        start: Point3<f64>,
        end: Point3<f64>,
        rasterized: &mut usize,
    ) -> Result<Leg, RoutingError> {
        let grid = self.grid(floor);
        if matches!(grid, Cow::Owned(_)) {
            *rasterized += 1;
        }
        LegPlanner::new(&grid, *self.config.search()).plan(floor, start, end)
    }

    fn grid(&self, floor: i32) -> Cow<'_, OccupancyGrid> {
        match self.grids.as_ref().and_then(|grids| grids.get(floor)) {
            Some(grid) => Cow::Borrowed(grid),
            None => Cow::Owned(self.rasterizer.rasterize(&self.building, floor)),
        }
    }
}

fn partial(reached_floor: i32, request: &RouteRequest) -> RouteStatus {
    RouteStatus::Partial {
        reached_floor,
        target_floor: request.end_floor,
    }
}

/// Distance in the X/Z plane.
fn plan_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a.x - b.x).hypot(a.z - b.z)
}
