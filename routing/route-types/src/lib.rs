//! Core types for indoor multi-floor routing.
//!
//! This crate provides the vocabulary shared by the routing crates:
//!
//! - **Building model**: rooms with optional entrances and the transitions
//!   (escalators, stairs) that link floors ([`Building`], [`Room`],
//!   [`Entrance`], [`Transition`])
//! - **Requests**: start and destination with their floors ([`RouteRequest`])
//! - **Paths**: grid cell paths and world-space waypoints ([`CellPath`],
//!   [`WaypointSequence`])
//! - **Configuration**: every distance and limit the pipeline uses
//!   ([`RoutingConfig`] and its sections)
//! - **Results**: assembled routes with per-leg detail ([`FloorRoute`], [`Leg`])
//!
//! # Example
//!
//! ```
//! use route_types::{Building, Room, RouteRequest, RoutingConfig};
//! use nalgebra::{Point3, Vector3};
//!
//! let building = Building::new()
//!     .with_room(Room::new(1, Point3::new(0.0, 1.5, 0.0), Vector3::new(20.0, 3.0, 20.0)));
//!
//! let request = RouteRequest::on_floor(
//!     Point3::new(-5.0, 0.0, -5.0),
//!     Point3::new(5.0, 0.0, 5.0),
//!     1,
//! );
//!
//! let config = RoutingConfig::default();
//! assert!(config.validate().is_empty());
//! assert!(building.room_at(&request.start, 1).is_some());
//! // Routes are computed by the route-floors crate
//! ```
//!
//! # Coordinates
//!
//! World space is Y-up. Rooms and landings are placed on the X/Z plane; the
//! grid layer from `atrium-spatial` maps X to cell `x` and Z to cell `y`.
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![doc(html_root_url = "https://docs.rs/route-types/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod building;
pub mod config;
pub mod error;
pub mod path;
pub mod request;
pub mod route;

// Re-export main types at crate root for convenience
pub use building::{Building, Entrance, EntranceOrientation, Room, Transition};
pub use config::{
    DiagonalPolicy, GridConfig, Heuristic, RasterConfig, RouterConfig, RoutingConfig, SearchConfig,
};
pub use error::RoutingError;
pub use path::{CellPath, WaypointSequence};
pub use request::{RouteRequest, floor_for_height};
pub use route::{FloorRoute, Leg, LegKind, RouteStats, RouteStatus};
