//! Parametric curves for rendering planned routes.
//!
//! Route planners produce polylines: a handful of waypoints joined by
//! straight segments. This crate turns them into smooth parametric curves
//! that still pass through every waypoint:
//!
//! - [`CatmullRom`] - Interpolating cubic spline with uniform, centripetal,
//!   or chordal knots ([`SplineKind`])
//!
//! # Core Traits
//!
//! Curves implement the [`Curve`] trait, which provides:
//!
//! - **Evaluation**: Position and unit tangent at parameter `t ∈ [0, 1]`
//! - **Derivatives**: First and second derivatives, and curvature
//! - **Arc length**: Total length and arc-length parameterization
//! - **Sampling**: Uniform in parameter or in arc length
//!
//! # Example
//!
//! ```
//! use curve_types::{CatmullRom, Curve, SplineKind};
//! use nalgebra::Point3;
//!
//! let curve = CatmullRom::new(
//!     vec![
//!         Point3::new(-20.0, 0.0, -20.0),
//!         Point3::new(35.0, 0.0, 10.0),
//!         Point3::new(45.0, 10.0, 10.0),
//!     ],
//!     SplineKind::uniform(0.2),
//! )
//! .unwrap();
//!
//! // Dense samples for drawing
//! let samples = curve.sample_uniform(129);
//! assert_eq!(samples.first(), Some(&Point3::new(-20.0, 0.0, -20.0)));
//!
//! // Direction for an arrow head at the destination
//! let heading = curve.tangent_at(1.0);
//! assert!((heading.norm() - 1.0).abs() < 1e-12);
//! ```
//!
//! # Coordinate System
//!
//! Points are in world space with Y up; routes run in the X/Z plane and
//! climb in Y between floors.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![doc(html_root_url = "https://docs.rs/curve-types/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod catmull_rom;
mod error;
mod traits;

pub use catmull_rom::{CatmullRom, SplineKind};
pub use error::CurveError;
pub use traits::Curve;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod integration_tests {
    use super::*;
    use approx::assert_relative_eq;

    /// A ground-floor walk to an escalator, then the ride up.
    fn escalator_route() -> Vec<Point3<f64>> {
        vec![
            Point3::new(-20.0, 0.0, -20.0),
            Point3::new(-5.0, 0.0, -2.0),
            Point3::new(35.0, 0.0, 10.0),
            Point3::new(45.0, 10.0, 10.0),
            Point3::new(30.0, 10.0, 25.0),
        ]
    }

    #[test]
    fn test_every_kind_is_well_behaved() {
        for kind in [
            SplineKind::uniform(0.2),
            SplineKind::Centripetal,
            SplineKind::Chordal,
        ] {
            let curve = CatmullRom::new(escalator_route(), kind).unwrap();
            verify_curve_basics(&curve);
        }
    }

    fn verify_curve_basics<C: Curve>(curve: &C) {
        assert_relative_eq!(curve.start().coords, Vector3::new(-20.0, 0.0, -20.0), epsilon = 1e-12);
        assert_relative_eq!(curve.end().coords, Vector3::new(30.0, 10.0, 25.0), epsilon = 1e-12);

        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_relative_eq!(curve.tangent_at(t).norm(), 1.0, epsilon = 1e-10);
        }

        assert!(curve.arc_length() > 0.0);
        assert_eq!(curve.sample_uniform(129).len(), 129);
    }

    #[test]
    fn test_arc_length_sampling_is_even() {
        let curve = CatmullRom::centripetal(escalator_route()).unwrap();
        let samples = curve.sample_arc_length(41);
        let step = curve.arc_length() / 40.0;

        for pair in samples.windows(2) {
            let gap = (pair[1] - pair[0]).norm();
            // Chords are never longer than the arc they cut
            assert!(gap <= step + 1e-6);
            assert!(gap > 0.5 * step);
        }
    }
}
