//! Renderable route curves.
//!
//! A [`RouteCurve`] is the smooth path a client draws: a Catmull-Rom spline
//! through the cleaned route waypoints, densely sampled, plus the direction
//! the route arrives in for placing an arrow head at the destination.

use curve_types::{CatmullRom, Curve, CurveError, SplineKind};
use nalgebra::{Point3, Vector3};
use route_types::WaypointSequence;

/// How samples are spread along the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Sampling {
    /// Evenly in the spline parameter; denser where waypoints crowd.
    #[default]
    Parameter,
    /// Evenly by distance along the curve.
    ArcLength,
}

/// Configuration for building route curves.
///
/// # Example
///
/// ```
/// use route_floors::{CurveConfig, Sampling};
/// use curve_types::SplineKind;
///
/// let config = CurveConfig::new()
///     .with_kind(SplineKind::Centripetal)
///     .with_samples(64)
///     .with_sampling(Sampling::ArcLength);
///
/// assert_eq!(config.samples(), 64);
/// assert!(config.validate().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurveConfig {
    /// Spline parameterization.
    kind: SplineKind,
    /// Number of intervals; `samples + 1` points are produced.
    samples: usize,
    /// Sample spacing.
    sampling: Sampling,
}

impl CurveConfig {
    /// Default tension of the uniform spline.
    pub const DEFAULT_TENSION: f64 = 0.2;

    /// Default number of sample intervals.
    pub const DEFAULT_SAMPLES: usize = 128;

    /// Creates the default configuration: uniform spline, tension 0.2, 128 intervals.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kind: SplineKind::uniform(Self::DEFAULT_TENSION),
            samples: Self::DEFAULT_SAMPLES,
            sampling: Sampling::Parameter,
        }
    }

    /// Sets the spline parameterization.
    #[must_use]
    pub const fn with_kind(mut self, kind: SplineKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the number of sample intervals.
    #[must_use]
    pub const fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Sets the sample spacing.
    #[must_use]
    pub const fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Returns the spline parameterization.
    #[must_use]
    pub const fn kind(&self) -> SplineKind {
        self.kind
    }

    /// Returns the number of sample intervals.
    #[must_use]
    pub const fn samples(&self) -> usize {
        self.samples
    }

    /// Returns the sample spacing.
    #[must_use]
    pub const fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Validates the configuration, returning a list of issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if let SplineKind::CatmullRom { tension } = self.kind {
            if !tension.is_finite() || tension < 0.0 {
                issues.push(format!("tension must be finite and non-negative, got {tension}"));
            }
        }
        if self.samples == 0 || self.samples == usize::MAX {
            issues.push(format!(
                "samples must be between 1 and {}, got {}",
                usize::MAX - 1,
                self.samples
            ));
        }
        issues
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A smooth curve through a route, ready to draw.
///
/// # Example
///
/// ```
/// use route_floors::{CurveConfig, RouteCurve};
/// use route_types::WaypointSequence;
/// use nalgebra::{Point3, Vector3};
///
/// let waypoints = WaypointSequence::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 10.0),
/// ]);
///
/// let curve = RouteCurve::build(&waypoints, &CurveConfig::default()).unwrap();
/// assert_eq!(curve.samples().len(), 129);
/// assert!((curve.end_direction() - Vector3::z()).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCurve {
    spline: CatmullRom,
    samples: Vec<Point3<f64>>,
    end_direction: Vector3<f64>,
}

impl RouteCurve {
    /// Builds the curve through `waypoints`.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] if there are fewer than two waypoints, a
    /// waypoint is not finite, all waypoints coincide, the configured
    /// tension is invalid, or the sample count is zero or too large.
    pub fn build(waypoints: &WaypointSequence, config: &CurveConfig) -> Result<Self, CurveError> {
        let count = config
            .samples()
            .checked_add(1)
            .filter(|_| config.samples() > 0)
            .ok_or(CurveError::InvalidSampleCount(config.samples()))?;

        let spline = CatmullRom::new(waypoints.points().to_vec(), config.kind())?;
        let samples = match config.sampling() {
            Sampling::Parameter => spline.sample_uniform(count),
            Sampling::ArcLength => spline.sample_arc_length(count),
        };
        let end_direction = spline.tangent_at(1.0);

        Ok(Self {
            spline,
            samples,
            end_direction,
        })
    }

    /// Returns the underlying spline.
    #[must_use]
    pub const fn spline(&self) -> &CatmullRom {
        &self.spline
    }

    /// Returns the sampled points, first and last on the route endpoints.
    #[must_use]
    pub fn samples(&self) -> &[Point3<f64>] {
        &self.samples
    }

    /// Returns the unit direction of travel at the destination.
    #[must_use]
    pub const fn end_direction(&self) -> Vector3<f64> {
        self.end_direction
    }

    /// Returns the length of the curve.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.spline.arc_length()
    }

    /// Consumes the curve, returning its samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<Point3<f64>> {
        self.samples
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ride_up() -> WaypointSequence {
        WaypointSequence::new(vec![
            Point3::new(-20.0, 0.0, -20.0),
            Point3::new(35.0, 0.0, 10.0),
            Point3::new(45.0, 10.0, 10.0),
            Point3::new(30.0, 10.0, 25.0),
        ])
    }

    // ==================== Config Tests ====================

    #[test]
    fn test_config_defaults() {
        let config = CurveConfig::default();
        assert_eq!(config.kind(), SplineKind::uniform(0.2));
        assert_eq!(config.samples(), 128);
        assert_eq!(config.sampling(), Sampling::Parameter);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_config_validation() {
        let config = CurveConfig::new()
            .with_kind(SplineKind::uniform(f64::NAN))
            .with_samples(0);
        assert_eq!(config.validate().len(), 2);
    }

    // ==================== Curve Tests ====================

    #[test]
    fn test_samples_span_route() {
        let waypoints = ride_up();
        let curve = RouteCurve::build(&waypoints, &CurveConfig::default()).unwrap();

        let samples = curve.samples();
        assert_eq!(samples.len(), 129);
        assert_relative_eq!(samples[0].coords, waypoints.points()[0].coords, epsilon = 1e-12);
        assert_relative_eq!(samples[128].coords, waypoints.points()[3].coords, epsilon = 1e-12);
        assert!(curve.length() >= waypoints.length() - 1e-6);
    }

    #[test]
    fn test_end_direction_is_unit() {
        let curve = RouteCurve::build(&ride_up(), &CurveConfig::default()).unwrap();
        let direction = curve.end_direction();
        assert_relative_eq!(direction.norm(), 1.0, epsilon = 1e-12);
        // Arriving from (45, 10, 10) towards (30, 10, 25)
        assert!(direction.x < 0.0 && direction.z > 0.0);
        assert_relative_eq!(direction.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arc_length_sampling() {
        let config = CurveConfig::new()
            .with_kind(SplineKind::Centripetal)
            .with_samples(16)
            .with_sampling(Sampling::ArcLength);
        let curve = RouteCurve::build(&ride_up(), &config).unwrap();
        assert_eq!(curve.samples().len(), 17);
        assert_eq!(curve.clone().into_samples().len(), 17);
        assert_eq!(curve.spline().kind(), SplineKind::Centripetal);
    }

    #[test]
    fn test_rejects_bad_sample_counts() {
        for samples in [0, usize::MAX] {
            let config = CurveConfig::new().with_samples(samples);
            assert_eq!(config.validate().len(), 1);
            assert_eq!(
                RouteCurve::build(&ride_up(), &config).unwrap_err(),
                CurveError::InvalidSampleCount(samples)
            );
        }
    }

    #[test]
    fn test_single_interval_gives_endpoints() {
        let config = CurveConfig::new().with_samples(1);
        let curve = RouteCurve::build(&ride_up(), &config).unwrap();
        assert_eq!(curve.samples().len(), 2);
    }

    #[test]
    fn test_rejects_short_routes() {
        let single = WaypointSequence::new(vec![Point3::origin()]);
        let err = RouteCurve::build(&single, &CurveConfig::default()).unwrap_err();
        assert!(err.is_insufficient_points());
    }
}
