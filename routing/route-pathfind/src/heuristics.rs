//! Heuristic functions and move costs for grid search.
//!
//! Costs are measured in cell units: 1 for a cardinal step, √2 for a
//! diagonal one. The `pathfinding` crate needs integer costs, so the scaled
//! variants multiply by [`COST_SCALE`], rounding move costs up and heuristic
//! estimates down. That keeps every admissible heuristic admissible after
//! scaling.
//!
//! # Example
//!
//! ```
//! use route_pathfind::heuristics::compute_heuristic;
//! use route_types::Heuristic;
//! use atrium_spatial::CellCoord;
//!
//! let from = CellCoord::new(0, 0);
//! let to = CellCoord::new(3, 4);
//!
//! let manhattan = compute_heuristic(from, to, Heuristic::Manhattan);
//! assert!((manhattan - 7.0).abs() < 1e-10);
//!
//! let euclidean = compute_heuristic(from, to, Heuristic::Euclidean);
//! assert!((euclidean - 5.0).abs() < 1e-10);
//! ```

use std::f64::consts::SQRT_2;

use atrium_spatial::CellCoord;
use route_types::Heuristic;

/// Factor between cell-unit costs and the integer costs used by search.
pub const COST_SCALE: u64 = 1000;

/// Integer cost of a cardinal step.
pub const CARDINAL_COST: u64 = COST_SCALE;

/// Integer cost of a diagonal step: √2 · [`COST_SCALE`], rounded up.
pub const DIAGONAL_COST: u64 = 1415;

/// Computes the heuristic distance between two cells, in cell units.
///
/// # Example
///
/// ```
/// use route_pathfind::heuristics::compute_heuristic;
/// use route_types::Heuristic;
/// use atrium_spatial::CellCoord;
///
/// let dist = compute_heuristic(CellCoord::new(0, 0), CellCoord::new(10, 0), Heuristic::Octile);
/// assert!((dist - 10.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn compute_heuristic(from: CellCoord, to: CellCoord, heuristic: Heuristic) -> f64 {
    match heuristic {
        Heuristic::Manhattan => manhattan_distance(from, to),
        Heuristic::Chebyshev => chebyshev_distance(from, to),
        Heuristic::Euclidean => euclidean_distance(from, to),
        Heuristic::Octile => octile_distance(from, to),
        Heuristic::Zero => 0.0,
    }
}

/// Computes the heuristic scaled to integer search costs, rounded down.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn scaled_heuristic(from: CellCoord, to: CellCoord, heuristic: Heuristic) -> u64 {
    (compute_heuristic(from, to, heuristic) * COST_SCALE as f64).floor() as u64
}

/// Manhattan distance: |dx| + |dy|.
#[must_use]
pub fn manhattan_distance(from: CellCoord, to: CellCoord) -> f64 {
    f64::from(from.manhattan_distance(to))
}

/// Chebyshev distance: max(|dx|, |dy|).
#[must_use]
pub fn chebyshev_distance(from: CellCoord, to: CellCoord) -> f64 {
    f64::from(from.chebyshev_distance(to))
}

/// Euclidean distance: sqrt(dx² + dy²).
#[must_use]
pub fn euclidean_distance(from: CellCoord, to: CellCoord) -> f64 {
    let d = to - from;
    f64::from(d.x).hypot(f64::from(d.y))
}

/// Octile distance: the cost of the shortest 8-connected path with no obstacles.
///
/// Moves diagonally for the shorter axis, then straight for the remainder:
/// `max + (√2 - 1) · min`.
#[must_use]
pub fn octile_distance(from: CellCoord, to: CellCoord) -> f64 {
    let d = to - from;
    let dx = f64::from(d.x.unsigned_abs());
    let dy = f64::from(d.y.unsigned_abs());
    let (min, max) = if dx < dy { (dx, dy) } else { (dy, dx) };
    (SQRT_2 - 1.0).mul_add(min, max)
}

/// Cost of a single step between adjacent cells, in cell units.
///
/// Returns 1 for cardinal steps and √2 for diagonals.
#[must_use]
pub fn move_cost(from: CellCoord, to: CellCoord) -> f64 {
    if from.is_diagonal_to(to) { SQRT_2 } else { 1.0 }
}

/// Integer cost of a single step between adjacent cells.
#[must_use]
pub const fn scaled_move_cost(from: CellCoord, to: CellCoord) -> u64 {
    if from.is_diagonal_to(to) {
        DIAGONAL_COST
    } else {
        CARDINAL_COST
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_precision_loss)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_heuristics_on_offset() {
        let a = CellCoord::new(1, 2);
        let b = CellCoord::new(4, 8);

        assert_relative_eq!(manhattan_distance(a, b), 9.0);
        assert_relative_eq!(chebyshev_distance(a, b), 6.0);
        assert_relative_eq!(euclidean_distance(a, b), 45f64.sqrt());
        assert_relative_eq!(octile_distance(a, b), 3.0 + 3.0 * SQRT_2);
        assert_relative_eq!(compute_heuristic(a, b, Heuristic::Zero), 0.0);
    }

    #[test]
    fn test_octile_symmetry() {
        let a = CellCoord::new(-3, 7);
        let b = CellCoord::new(5, -2);
        assert_relative_eq!(octile_distance(a, b), octile_distance(b, a));
    }

    #[test]
    fn test_diagonal_cost_rounds_up() {
        assert!(DIAGONAL_COST as f64 >= SQRT_2 * COST_SCALE as f64);
        assert!(((DIAGONAL_COST - 1) as f64) < SQRT_2 * COST_SCALE as f64);
    }

    #[test]
    fn test_scaled_octile_never_exceeds_step_costs() {
        // A pure diagonal run of n steps costs n * DIAGONAL_COST
        for n in 1..50 {
            let h = scaled_heuristic(CellCoord::new(0, 0), CellCoord::new(n, n), Heuristic::Octile);
            assert!(h <= u64::try_from(n).unwrap() * DIAGONAL_COST);
        }
    }

    #[test]
    fn test_move_costs() {
        let c = CellCoord::new(5, 5);
        assert_relative_eq!(move_cost(c, CellCoord::new(6, 5)), 1.0);
        assert_relative_eq!(move_cost(c, CellCoord::new(6, 6)), SQRT_2);
        assert_eq!(scaled_move_cost(c, CellCoord::new(4, 4)), DIAGONAL_COST);
        assert_eq!(scaled_move_cost(c, CellCoord::new(5, 4)), CARDINAL_COST);
    }
}
