//! Multi-floor indoor routing.
//!
//! This crate ties the routing pipeline together. For one request it:
//!
//! 1. rasterizes the floors it needs (`route-raster`), or reads them from a
//!    precomputed [`FloorGrids`]
//! 2. plans a walking leg per floor with grid search and smoothing
//!    (`route-pathfind`), see [`LegPlanner`]
//! 3. joins the legs through escalator rides, see [`FloorRouter`]
//! 4. removes duplicate and invalid waypoints, see [`clean_waypoints`]
//!
//! The resulting [`FloorRoute`](route_types::FloorRoute) can be turned into a
//! smooth, sampled [`RouteCurve`] for drawing.
//!
//! # Quick Start
//!
//! ```
//! use route_floors::{CurveConfig, FloorRouter, RouteCurve};
//! use route_types::{Building, Entrance, EntranceOrientation, Room, RouteRequest, Transition};
//! use nalgebra::{Point3, Vector3};
//!
//! let building = Building::new()
//!     .with_room(
//!         Room::new(1, Point3::new(20.0, 2.0, 20.0), Vector3::new(30.0, 4.0, 20.0))
//!             .with_name("Main Stage")
//!             .with_entrance(Entrance::new(20.0, 10.0, 6.0, EntranceOrientation::Horizontal)),
//!     )
//!     .with_transition(Transition::new(
//!         [1, 2],
//!         Point3::new(35.0, 0.0, 10.0),
//!         Point3::new(45.0, 10.0, 10.0),
//!     ));
//!
//! let router = FloorRouter::with_defaults(building).unwrap();
//! let request = RouteRequest::from_heights(
//!     Point3::new(20.0, 0.0, 20.0),
//!     Point3::new(-25.0, 10.0, 25.0),
//!     10.0,
//! );
//!
//! let route = router.route(&request).unwrap();
//! assert!(route.is_complete());
//!
//! let curve = RouteCurve::build(route.waypoints(), &CurveConfig::default()).unwrap();
//! assert_eq!(curve.samples().len(), 129);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default): rasterize floors and route batches with `rayon`
//! - `serde`: serialization for configuration and route types

#![doc(html_root_url = "https://docs.rs/route-floors/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod cache;
pub mod cleanup;
pub mod curve;
pub mod leg;
pub mod router;

pub use cache::FloorGrids;
pub use cleanup::clean_waypoints;
pub use curve::{CurveConfig, RouteCurve, Sampling};
pub use leg::LegPlanner;
pub use router::FloorRouter;
