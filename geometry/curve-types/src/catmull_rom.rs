//! Catmull-Rom splines.
//!
//! A Catmull-Rom spline is an interpolating cubic: unlike B-splines it passes
//! through every control point, which makes it the natural choice for
//! rounding off a polyline of route waypoints. Each span between two points
//! is a cubic Hermite segment whose end tangents come from the neighboring
//! points. Open splines extrapolate a phantom point past each end by
//! mirroring the first and last spans.
//!
//! Three parameterizations are supported (see [`SplineKind`]): the classic
//! uniform spline with an explicit tension, and the centripetal and chordal
//! variants, which space the knots by distance and avoid cusps and
//! self-intersections on unevenly spaced points.

use crate::{Curve, CurveError, Result};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Knots closer than this are treated as coincident.
const MIN_KNOT_SPACING: f64 = 1e-4;

/// Knot parameterization of a [`CatmullRom`] spline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SplineKind {
    /// Uniform knots; tangents are `tension * (next - previous)`.
    ///
    /// A tension of 0.5 gives the textbook Catmull-Rom spline; smaller
    /// values pull the curve towards the control polygon.
    CatmullRom {
        /// Tangent scale, finite and non-negative.
        tension: f64,
    },
    /// Knot spacing by the square root of the chord length.
    Centripetal,
    /// Knot spacing by chord length.
    Chordal,
}

impl SplineKind {
    /// Uniform spline with the given tension.
    #[must_use]
    pub const fn uniform(tension: f64) -> Self {
        Self::CatmullRom { tension }
    }
}

impl Default for SplineKind {
    fn default() -> Self {
        Self::Centripetal
    }
}

/// An open Catmull-Rom spline through a sequence of points.
///
/// The parameter `t ∈ [0, 1]` is split evenly across the `n - 1` spans, so
/// `point_at(i / (n - 1))` is exactly the `i`-th control point.
///
/// # Example
///
/// ```
/// use curve_types::{CatmullRom, Curve, SplineKind};
/// use nalgebra::Point3;
///
/// let spline = CatmullRom::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(10.0, 0.0, 0.0),
///         Point3::new(10.0, 0.0, 10.0),
///     ],
///     SplineKind::uniform(0.2),
/// )
/// .unwrap();
///
/// assert_eq!(spline.point_at(0.5), Point3::new(10.0, 0.0, 0.0));
///
/// // The curve leaves the last point heading along the last span
/// let heading = spline.tangent_at(1.0);
/// assert!((heading.z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatmullRom {
    /// Interpolated points.
    points: Vec<Point3<f64>>,
    /// Knot parameterization.
    kind: SplineKind,
}

impl CatmullRom {
    /// Create a spline through `points`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Fewer than 2 points
    /// - Any point has a non-finite coordinate
    /// - A uniform spline's tension is negative or non-finite
    /// - All points coincide
    pub fn new(points: Vec<Point3<f64>>, kind: SplineKind) -> Result<Self> {
        if points.len() < 2 {
            return Err(CurveError::insufficient_points(2, points.len()));
        }

        if let Some(index) = points
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(CurveError::NonFinitePoint { index });
        }

        if let SplineKind::CatmullRom { tension } = kind {
            if !tension.is_finite() || tension < 0.0 {
                return Err(CurveError::InvalidTension(tension));
            }
        }

        let first = points[0];
        if points.iter().all(|p| p == &first) {
            return Err(CurveError::degenerate("all points coincide"));
        }

        Ok(Self { points, kind })
    }

    /// Create a centripetal spline through `points`.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn centripetal(points: Vec<Point3<f64>>) -> Result<Self> {
        Self::new(points, SplineKind::Centripetal)
    }

    /// Get the interpolated points.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Get the knot parameterization.
    #[must_use]
    pub const fn kind(&self) -> SplineKind {
        self.kind
    }

    /// Number of cubic spans (one fewer than the points).
    #[must_use]
    pub fn span_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Map a global parameter to a span index and local weight in [0, 1].
    fn locate(&self, t: f64) -> (usize, f64) {
        let spans = self.span_count();
        let p = spans as f64 * t.clamp(0.0, 1.0);
        let span = p.floor() as usize;
        if span >= spans {
            (spans - 1, 1.0)
        } else {
            (span, p - span as f64)
        }
    }

    /// The four points shaping span `span`, with phantom ends mirrored.
    fn span_points(&self, span: usize) -> [Point3<f64>; 4] {
        let pts = &self.points;
        let n = pts.len();

        let p1 = pts[span];
        let p2 = pts[span + 1];
        let p0 = if span > 0 {
            pts[span - 1]
        } else {
            p1 + (p1 - p2)
        };
        let p3 = if span + 2 < n {
            pts[span + 2]
        } else {
            p2 + (p2 - p1)
        };

        [p0, p1, p2, p3]
    }

    /// Cubic coefficients `[c0, c1, c2, c3]` of span `span` in its local weight.
    fn coefficients(&self, span: usize) -> [Vector3<f64>; 4] {
        let [p0, p1, p2, p3] = self.span_points(span);

        let (m1, m2) = match self.kind {
            SplineKind::CatmullRom { tension } => ((p2 - p0) * tension, (p3 - p1) * tension),
            SplineKind::Centripetal => nonuniform_tangents([p0, p1, p2, p3], 0.25),
            SplineKind::Chordal => nonuniform_tangents([p0, p1, p2, p3], 0.5),
        };

        hermite(p1.coords, p2.coords, m1, m2)
    }

    /// Direction of the nearest span with distinct endpoints.
    fn chord_direction(&self, span: usize) -> Vector3<f64> {
        let chord = |i: usize| (self.points[i + 1] - self.points[i]).try_normalize(1e-12);
        (0..=span)
            .rev()
            .chain(span + 1..self.span_count())
            .find_map(chord)
            .unwrap_or_else(Vector3::zeros)
    }
}

/// Span end tangents for distance-spaced knots, `exponent` applied to
/// squared chord lengths.
fn nonuniform_tangents(
    [p0, p1, p2, p3]: [Point3<f64>; 4],
    exponent: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let mut dt0 = (p1 - p0).norm_squared().powf(exponent);
    let mut dt1 = (p2 - p1).norm_squared().powf(exponent);
    let mut dt2 = (p3 - p2).norm_squared().powf(exponent);

    if dt1 < MIN_KNOT_SPACING {
        dt1 = 1.0;
    }
    if dt0 < MIN_KNOT_SPACING {
        dt0 = dt1;
    }
    if dt2 < MIN_KNOT_SPACING {
        dt2 = dt1;
    }

    let m1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
    let m2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
    (m1 * dt1, m2 * dt1)
}

/// Cubic Hermite coefficients from endpoint values and tangents.
fn hermite(
    x0: Vector3<f64>,
    x1: Vector3<f64>,
    m0: Vector3<f64>,
    m1: Vector3<f64>,
) -> [Vector3<f64>; 4] {
    [
        x0,
        m0,
        x0 * -3.0 + x1 * 3.0 - m0 * 2.0 - m1,
        x0 * 2.0 - x1 * 2.0 + m0 + m1,
    ]
}

impl Curve for CatmullRom {
    fn point_at(&self, t: f64) -> Point3<f64> {
        let (span, w) = self.locate(t);
        let [c0, c1, c2, c3] = self.coefficients(span);
        Point3::from(c0 + (c1 + (c2 + c3 * w) * w) * w)
    }

    /// Unit tangent. Where the spline is stationary (repeated points), falls
    /// back to the direction of the nearest non-degenerate span.
    fn tangent_at(&self, t: f64) -> Vector3<f64> {
        self.derivative_at(t)
            .try_normalize(1e-12)
            .unwrap_or_else(|| self.chord_direction(self.locate(t).0))
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let (span, w) = self.locate(t);
        let [_, c1, c2, c3] = self.coefficients(span);
        (c1 + c2 * (2.0 * w) + c3 * (3.0 * w * w)) * self.span_count() as f64
    }

    fn second_derivative_at(&self, t: f64) -> Vector3<f64> {
        let (span, w) = self.locate(t);
        let [_, _, c2, c3] = self.coefficients(span);
        let scale = self.span_count() as f64;
        (c2 * 2.0 + c3 * (6.0 * w)) * (scale * scale)
    }

    /// Span joins, where the second derivative jumps.
    fn breakpoints(&self) -> Vec<f64> {
        let spans = self.span_count();
        (0..=spans).map(|i| i as f64 / spans as f64).collect()
    }
}
