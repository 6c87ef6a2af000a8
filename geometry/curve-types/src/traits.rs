//! The parametric curve trait.

use nalgebra::{Point3, Vector3};

/// A parametric curve in 3D space.
///
/// Curves are parameterized over `t ∈ [0, 1]`, where `t=0` is the start
/// and `t=1` is the end of the curve. Implementors supply evaluation and
/// the first two derivatives; arc length and sampling come for free.
///
/// # Implementors
///
/// - [`CatmullRom`](crate::CatmullRom) - Interpolating cubic spline
pub trait Curve {
    /// Evaluate the curve position at parameter `t ∈ [0, 1]`.
    fn point_at(&self, t: f64) -> Point3<f64>;

    /// Evaluate the curve position, clamping `t` to [0, 1].
    fn point_at_clamped(&self, t: f64) -> Point3<f64> {
        self.point_at(t.clamp(0.0, 1.0))
    }

    /// Compute the unit tangent vector at parameter `t`.
    ///
    /// The tangent points in the direction of increasing `t`.
    fn tangent_at(&self, t: f64) -> Vector3<f64>;

    /// Compute the first derivative (velocity) at parameter `t`.
    ///
    /// Unlike [`Self::tangent_at`], this is not normalized.
    fn derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Compute the second derivative (acceleration) at parameter `t`.
    fn second_derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Compute the curvature at parameter `t`.
    ///
    /// Returns 0 for straight segments and where the curve is stationary.
    fn curvature_at(&self, t: f64) -> f64 {
        let d1 = self.derivative_at(t);
        let d2 = self.second_derivative_at(t);
        let d1_norm = d1.norm();

        if d1_norm > 1e-10 {
            d1.cross(&d2).norm() / d1_norm.powi(3)
        } else {
            0.0
        }
    }

    /// Parameter values where the curve may lose smoothness, ascending and
    /// including 0 and 1.
    ///
    /// Arc length is integrated piecewise between consecutive breakpoints.
    /// Piecewise curves should report their span joins.
    fn breakpoints(&self) -> Vec<f64> {
        vec![0.0, 1.0]
    }

    /// Compute the total arc length of the curve.
    fn arc_length(&self) -> f64 {
        self.arc_length_between(0.0, 1.0)
    }

    /// Compute the arc length between two parameter values.
    ///
    /// Integrates the speed with Gauss-Legendre quadrature, split at the
    /// curve's breakpoints. Always non-negative.
    fn arc_length_between(&self, t0: f64, t1: f64) -> f64 {
        let (start, end) = if t0 < t1 { (t0, t1) } else { (t1, t0) };

        let mut cuts = vec![start];
        cuts.extend(
            self.breakpoints()
                .into_iter()
                .filter(|&b| b > start && b < end),
        );
        cuts.push(end);

        cuts.windows(2)
            .map(|w| integrate_speed(self, w[0], w[1]))
            .sum()
    }

    /// Convert an arc length to a parameter value.
    ///
    /// Finds `t` such that the arc length from 0 to `t` equals `s`. Clamps
    /// to [0, 1] if `s` is outside [0, total length].
    fn arc_to_t(&self, s: f64) -> f64 {
        ArcLengthTable::new(self).param_at(self, s)
    }

    /// Convert a parameter value to the arc length from the start.
    fn t_to_arc(&self, t: f64) -> f64 {
        self.arc_length_between(0.0, t.clamp(0.0, 1.0))
    }

    /// Sample `n` points at uniform parameter intervals (at least 2).
    fn sample_uniform(&self, n: usize) -> Vec<Point3<f64>> {
        let n = n.max(2);
        (0..n)
            .map(|i| self.point_at(i as f64 / (n - 1) as f64))
            .collect()
    }

    /// Sample `n` points at uniform arc length intervals (at least 2).
    ///
    /// Unlike [`Self::sample_uniform`], consecutive samples are the same
    /// distance apart along the curve even where the parameterization speeds
    /// up. The arc length table is built once and inverted per sample.
    fn sample_arc_length(&self, n: usize) -> Vec<Point3<f64>> {
        let n = n.max(2);
        let table = ArcLengthTable::new(self);
        let total = table.total();

        (0..n)
            .map(|i| {
                let s = i as f64 / (n - 1) as f64 * total;
                self.point_at(table.param_at(self, s))
            })
            .collect()
    }

    /// Get the start point of the curve (`t=0`).
    fn start(&self) -> Point3<f64> {
        self.point_at(0.0)
    }

    /// Get the end point of the curve (`t=1`).
    fn end(&self) -> Point3<f64> {
        self.point_at(1.0)
    }

    /// Approximate axis-aligned bounds as `(min, max)` corners.
    fn bounding_box(&self) -> (Point3<f64>, Point3<f64>) {
        let start = self.start();
        self.sample_uniform(100)
            .into_iter()
            .fold((start, start), |(min, max), p| (min.inf(&p), max.sup(&p)))
    }
}

/// Quadrature pieces per breakpoint interval.
const PIECES_PER_INTERVAL: usize = 8;

/// Five-point Gauss-Legendre nodes on [-1, 1] and their weights.
const GAUSS_NODES: [f64; 5] = [
    0.0,
    -0.538_469_310_105_683_1,
    0.538_469_310_105_683_1,
    -0.906_179_845_938_664_0,
    0.906_179_845_938_664_0,
];
const GAUSS_WEIGHTS: [f64; 5] = [
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
    0.236_926_885_056_189_1,
];

/// Five-point Gauss-Legendre integral of the speed over `[a, b]`.
fn gauss_legendre<C: Curve + ?Sized>(curve: &C, a: f64, b: f64) -> f64 {
    let half = (b - a) / 2.0;
    let mid = (a + b) / 2.0;
    GAUSS_NODES
        .iter()
        .zip(GAUSS_WEIGHTS)
        .map(|(x, w)| w * curve.derivative_at(mid + half * x).norm())
        .sum::<f64>()
        * half
}

/// Integral of the speed over a smooth interval `[a, b]`.
fn integrate_speed<C: Curve + ?Sized>(curve: &C, a: f64, b: f64) -> f64 {
    let step = (b - a) / PIECES_PER_INTERVAL as f64;
    (0..PIECES_PER_INTERVAL)
        .map(|i| {
            let lo = a + step * i as f64;
            gauss_legendre(curve, lo, lo + step)
        })
        .sum()
}

/// Cumulative arc length at the quadrature piece boundaries.
struct ArcLengthTable {
    params: Vec<f64>,
    lengths: Vec<f64>,
}

impl ArcLengthTable {
    fn new<C: Curve + ?Sized>(curve: &C) -> Self {
        let mut params = vec![0.0];
        let mut lengths = vec![0.0];
        let mut total = 0.0;

        for w in curve.breakpoints().windows(2) {
            let (a, b) = (w[0], w[1]);
            if b <= a {
                continue;
            }
            let step = (b - a) / PIECES_PER_INTERVAL as f64;
            for i in 0..PIECES_PER_INTERVAL {
                let lo = a + step * i as f64;
                let hi = if i + 1 == PIECES_PER_INTERVAL { b } else { lo + step };
                total += gauss_legendre(curve, lo, hi);
                params.push(hi);
                lengths.push(total);
            }
        }

        Self { params, lengths }
    }

    fn total(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Parameter at arc length `s`: table lookup, then safeguarded Newton
    /// iteration inside the bracketing piece.
    fn param_at<C: Curve + ?Sized>(&self, curve: &C, s: f64) -> f64 {
        if s <= 0.0 {
            return 0.0;
        }
        if s >= self.total() {
            return 1.0;
        }

        // lengths[0] is 0 < s, so the piece index is at least 1
        let i = self.lengths.partition_point(|&l| l < s).max(1);
        let (t0, t1) = (self.params[i - 1], self.params[i]);
        let (base, piece) = (self.lengths[i - 1], self.lengths[i] - self.lengths[i - 1]);
        if piece <= 0.0 {
            return t0;
        }

        let (mut lo, mut hi) = (t0, t1);
        let mut t = t0 + (t1 - t0) * (s - base) / piece;
        for _ in 0..32 {
            let error = base + gauss_legendre(curve, t0, t) - s;
            if error.abs() < 1e-12 {
                break;
            }
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }

            let speed = curve.derivative_at(t).norm();
            let newton = t - error / speed;
            t = if speed > 1e-12 && newton > lo && newton < hi {
                newton
            } else {
                (lo + hi) / 2.0
            };
        }
        t
    }
}
