//! Configuration types for rasterization, grid search and floor routing.
//!
//! Every geometric constant used by the routing pipeline lives here, with
//! defaults matching the reference venue: a 100×100 world centered on the
//! origin, 2-unit cells, 4-unit wall padding and so on.
//!
//! # Example
//!
//! ```
//! use route_types::{DiagonalPolicy, Heuristic, RoutingConfig, SearchConfig};
//!
//! let config = RoutingConfig::default().with_search(
//!     SearchConfig::default()
//!         .with_heuristic(Heuristic::Euclidean)
//!         .with_diagonal(DiagonalPolicy::IfAtMostOneObstacle),
//! );
//! assert!(config.validate().is_empty());
//! ```

use atrium_spatial::GridFrame;
use nalgebra::Point2;

use crate::error::RoutingError;

/// Heuristic functions for grid A*.
///
/// The heuristic estimates the cost from a cell to the goal. For optimality,
/// it must never overestimate.
///
/// # Example
///
/// ```
/// use route_types::Heuristic;
///
/// // Octile is exact on an empty 8-connected grid
/// assert_eq!(Heuristic::default(), Heuristic::Octile);
/// assert!(!Heuristic::Manhattan.is_admissible_for(true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Manhattan distance: |dx| + |dy|.
    ///
    /// Admissible for 4-connectivity only.
    Manhattan,

    /// Chebyshev distance: max(|dx|, |dy|).
    Chebyshev,

    /// Euclidean distance: sqrt(dx² + dy²).
    Euclidean,

    /// Octile distance: max + (√2 - 1) · min.
    ///
    /// The true cost on an obstacle-free 8-connected grid.
    #[default]
    Octile,

    /// Zero heuristic (Dijkstra's algorithm).
    Zero,
}

impl Heuristic {
    /// Returns `true` if this heuristic is admissible for the given connectivity.
    ///
    /// # Arguments
    ///
    /// * `allow_diagonal` - Whether diagonal moves are allowed
    #[must_use]
    pub const fn is_admissible_for(&self, allow_diagonal: bool) -> bool {
        match self {
            Self::Manhattan => !allow_diagonal,
            Self::Chebyshev | Self::Octile | Self::Euclidean | Self::Zero => true,
        }
    }
}

/// When a diagonal step between two cells is allowed.
///
/// A diagonal step from `(x, y)` to `(x+dx, y+dy)` passes the two orthogonal
/// cells `(x+dx, y)` and `(x, y+dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagonalPolicy {
    /// Allowed only if both orthogonal cells are free (no corner cutting).
    #[default]
    IfNoObstacles,
    /// Allowed unless both orthogonal cells are blocked.
    IfAtMostOneObstacle,
    /// Always allowed when the target cell is free.
    Always,
    /// Never allowed (4-connectivity).
    Never,
}

impl DiagonalPolicy {
    /// Returns `true` if any diagonal step can be taken.
    #[must_use]
    pub const fn allows_diagonals(self) -> bool {
        !matches!(self, Self::Never)
    }

    /// Decides a diagonal step given whether each orthogonal cell is blocked.
    #[must_use]
    pub const fn permits(self, side_a_blocked: bool, side_b_blocked: bool) -> bool {
        match self {
            Self::IfNoObstacles => !side_a_blocked && !side_b_blocked,
            Self::IfAtMostOneObstacle => !(side_a_blocked && side_b_blocked),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// The world rectangle every floor grid covers, and its cell size.
///
/// # Example
///
/// ```
/// use route_types::GridConfig;
///
/// let frame = GridConfig::default().frame().unwrap();
/// assert_eq!(frame.dimensions(), (50, 50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Minimum (X, Z) corner of the world rectangle.
    origin: Point2<f64>,
    /// Extent along world X.
    width: f64,
    /// Extent along world Z.
    depth: f64,
    /// Side length of one cell.
    cell_size: f64,
}

impl GridConfig {
    /// Creates the default grid: 100×100 centered on the origin, 2-unit cells.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Point2::new(-50.0, -50.0),
            width: 100.0,
            depth: 100.0,
            cell_size: 2.0,
        }
    }

    /// Sets the minimum corner of the world rectangle.
    #[must_use]
    pub const fn with_origin(mut self, origin: Point2<f64>) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the world extents.
    #[must_use]
    pub const fn with_extent(mut self, width: f64, depth: f64) -> Self {
        self.width = width;
        self.depth = depth;
        self
    }

    /// Sets the cell size.
    #[must_use]
    pub const fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Returns the minimum corner.
    #[must_use]
    pub const fn origin(&self) -> Point2<f64> {
        self.origin
    }

    /// Returns `(width, depth)`.
    #[must_use]
    pub const fn extent(&self) -> (f64, f64) {
        (self.width, self.depth)
    }

    /// Returns the cell size.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Builds the world↔cell frame.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Spatial`] if the extent or cell size is invalid.
    pub fn frame(&self) -> Result<GridFrame, RoutingError> {
        Ok(GridFrame::covering(
            self.origin,
            self.width,
            self.depth,
            self.cell_size,
        )?)
    }

    /// Validates the configuration and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !(self.origin.x.is_finite() && self.origin.y.is_finite()) {
            issues.push(format!("grid origin must be finite, got {}", self.origin));
        }
        if let Err(e) = self.frame() {
            issues.push(e.to_string());
        }
        issues
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Distances used when turning rooms into blocked and free cells.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RasterConfig {
    /// Margin added around each room before blocking.
    wall_padding: f64,
    /// Margin removed from each room before freeing its interior.
    interior_margin: f64,
    /// Extra opening on each side of an entrance, along the wall.
    entrance_slack: f64,
    /// How far an entrance corridor reaches either side of the wall.
    entrance_reach: f64,
    /// Chebyshev radius, in cells, freed around each transition landing.
    landing_clearance: u32,
}

impl RasterConfig {
    /// Creates the default raster configuration.
    ///
    /// Defaults:
    /// - Wall padding: 4
    /// - Interior margin: 2
    /// - Entrance slack: 1
    /// - Entrance reach: wall padding + 4 = 8
    /// - Landing clearance: 3 cells (a 7×7 square)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wall_padding: 4.0,
            interior_margin: 2.0,
            entrance_slack: 1.0,
            entrance_reach: 8.0,
            landing_clearance: 3,
        }
    }

    /// Sets the wall padding.
    #[must_use]
    pub const fn with_wall_padding(mut self, padding: f64) -> Self {
        self.wall_padding = padding;
        self
    }

    /// Sets the interior margin.
    #[must_use]
    pub const fn with_interior_margin(mut self, margin: f64) -> Self {
        self.interior_margin = margin;
        self
    }

    /// Sets the entrance slack.
    #[must_use]
    pub const fn with_entrance_slack(mut self, slack: f64) -> Self {
        self.entrance_slack = slack;
        self
    }

    /// Sets the entrance reach.
    #[must_use]
    pub const fn with_entrance_reach(mut self, reach: f64) -> Self {
        self.entrance_reach = reach;
        self
    }

    /// Sets the landing clearance radius in cells.
    #[must_use]
    pub const fn with_landing_clearance(mut self, cells: u32) -> Self {
        self.landing_clearance = cells;
        self
    }

    /// Returns the wall padding.
    #[must_use]
    pub const fn wall_padding(&self) -> f64 {
        self.wall_padding
    }

    /// Returns the interior margin.
    #[must_use]
    pub const fn interior_margin(&self) -> f64 {
        self.interior_margin
    }

    /// Returns the entrance slack.
    #[must_use]
    pub const fn entrance_slack(&self) -> f64 {
        self.entrance_slack
    }

    /// Returns the entrance reach.
    #[must_use]
    pub const fn entrance_reach(&self) -> f64 {
        self.entrance_reach
    }

    /// Returns the landing clearance radius in cells.
    #[must_use]
    pub const fn landing_clearance(&self) -> u32 {
        self.landing_clearance
    }

    /// Validates the configuration and returns any issues.
    ///
    /// An entrance that does not reach past the padded wall leaves the room
    /// sealed, so that is reported too.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let distances = [
            ("wall_padding", self.wall_padding),
            ("interior_margin", self.interior_margin),
            ("entrance_slack", self.entrance_slack),
            ("entrance_reach", self.entrance_reach),
        ];
        for (name, value) in distances {
            if !(value.is_finite() && value >= 0.0) {
                issues.push(format!("{name} must be non-negative, got {value}"));
            }
        }
        if self.entrance_reach < self.wall_padding {
            issues.push(format!(
                "entrance_reach ({}) is shorter than wall_padding ({}); \
                 entrances would stay sealed",
                self.entrance_reach, self.wall_padding
            ));
        }
        issues
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for single-floor grid search.
///
/// # Example
///
/// ```
/// use route_types::{DiagonalPolicy, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_diagonal(DiagonalPolicy::Never)
///     .with_max_expansions(5_000);
/// assert_eq!(config.max_expansions(), Some(5_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Heuristic function to use.
    heuristic: Heuristic,
    /// When diagonal steps are allowed.
    diagonal: DiagonalPolicy,
    /// Ring radius, in cells, searched when relocating a blocked endpoint.
    nearest_radius: u32,
    /// Maximum number of cells to expand; `None` means eight per grid cell.
    max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Creates the default search configuration.
    ///
    /// Defaults:
    /// - Heuristic: Octile
    /// - Diagonals: only without corner cutting
    /// - Nearest-walkable radius: 10 cells
    /// - Expansion cap: eight per grid cell
    #[must_use]
    pub const fn new() -> Self {
        Self {
            heuristic: Heuristic::Octile,
            diagonal: DiagonalPolicy::IfNoObstacles,
            nearest_radius: 10,
            max_expansions: None,
        }
    }

    /// Sets the heuristic function.
    #[must_use]
    pub const fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Sets the diagonal policy.
    #[must_use]
    pub const fn with_diagonal(mut self, policy: DiagonalPolicy) -> Self {
        self.diagonal = policy;
        self
    }

    /// Sets the nearest-walkable search radius.
    #[must_use]
    pub const fn with_nearest_radius(mut self, radius: u32) -> Self {
        self.nearest_radius = radius;
        self
    }

    /// Sets the expansion cap.
    #[must_use]
    pub const fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    /// Restores the grid-derived expansion cap.
    #[must_use]
    pub const fn without_max_expansions(mut self) -> Self {
        self.max_expansions = None;
        self
    }

    /// Returns the heuristic function.
    #[must_use]
    pub const fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Returns the diagonal policy.
    #[must_use]
    pub const fn diagonal(&self) -> DiagonalPolicy {
        self.diagonal
    }

    /// Returns the nearest-walkable search radius.
    #[must_use]
    pub const fn nearest_radius(&self) -> u32 {
        self.nearest_radius
    }

    /// Returns the explicit expansion cap, if any.
    #[must_use]
    pub const fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    /// Returns the expansion cap for a grid of `cell_count` cells.
    #[must_use]
    pub const fn expansion_limit(&self, cell_count: usize) -> usize {
        match self.max_expansions {
            Some(max) => max,
            None => cell_count.saturating_mul(8),
        }
    }

    /// Validates the configuration and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.heuristic.is_admissible_for(self.diagonal.allows_diagonals()) {
            issues.push(format!(
                "Heuristic {:?} is not admissible for diagonal policy {:?}",
                self.heuristic, self.diagonal
            ));
        }
        if self.max_expansions == Some(0) {
            issues.push("max_expansions must be positive".to_string());
        }

        issues
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for assembling multi-floor routes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    /// Maximum number of floor changes in one route.
    max_floor_hops: u32,
    /// Consecutive waypoints closer than this collapse into one.
    dedup_epsilon: f64,
    /// Vertical distance between floors, for deriving floors from heights.
    floor_height: f64,
}

impl RouterConfig {
    /// Creates the default router configuration.
    ///
    /// Defaults:
    /// - Max floor hops: 64
    /// - Dedup epsilon: 0.1
    /// - Floor height: 10
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_floor_hops: 64,
            dedup_epsilon: 0.1,
            floor_height: 10.0,
        }
    }

    /// Sets the floor-hop cap.
    #[must_use]
    pub const fn with_max_floor_hops(mut self, hops: u32) -> Self {
        self.max_floor_hops = hops;
        self
    }

    /// Sets the dedup distance.
    #[must_use]
    pub const fn with_dedup_epsilon(mut self, epsilon: f64) -> Self {
        self.dedup_epsilon = epsilon;
        self
    }

    /// Sets the floor height.
    #[must_use]
    pub const fn with_floor_height(mut self, height: f64) -> Self {
        self.floor_height = height;
        self
    }

    /// Returns the floor-hop cap.
    #[must_use]
    pub const fn max_floor_hops(&self) -> u32 {
        self.max_floor_hops
    }

    /// Returns the dedup distance.
    #[must_use]
    pub const fn dedup_epsilon(&self) -> f64 {
        self.dedup_epsilon
    }

    /// Returns the floor height.
    #[must_use]
    pub const fn floor_height(&self) -> f64 {
        self.floor_height
    }

    /// Validates the configuration and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !(self.dedup_epsilon.is_finite() && self.dedup_epsilon >= 0.0) {
            issues.push(format!(
                "dedup_epsilon must be non-negative, got {}",
                self.dedup_epsilon
            ));
        }
        if !(self.floor_height.is_finite() && self.floor_height > 0.0) {
            issues.push(format!(
                "floor_height must be positive, got {}",
                self.floor_height
            ));
        }
        issues
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Every setting the routing pipeline reads, in one place.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingConfig {
    /// World rectangle and cell size.
    grid: GridConfig,
    /// Rasterization distances.
    raster: RasterConfig,
    /// Grid search settings.
    search: SearchConfig,
    /// Multi-floor assembly settings.
    router: RouterConfig,
}

impl RoutingConfig {
    /// Creates a configuration with every default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grid configuration.
    #[must_use]
    pub const fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the raster configuration.
    #[must_use]
    pub const fn with_raster(mut self, raster: RasterConfig) -> Self {
        self.raster = raster;
        self
    }

    /// Sets the search configuration.
    #[must_use]
    pub const fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Sets the router configuration.
    #[must_use]
    pub const fn with_router(mut self, router: RouterConfig) -> Self {
        self.router = router;
        self
    }

    /// Returns the grid configuration.
    #[must_use]
    pub const fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Returns the raster configuration.
    #[must_use]
    pub const fn raster(&self) -> &RasterConfig {
        &self.raster
    }

    /// Returns the search configuration.
    #[must_use]
    pub const fn search(&self) -> &SearchConfig {
        &self.search
    }

    /// Returns the router configuration.
    #[must_use]
    pub const fn router(&self) -> &RouterConfig {
        &self.router
    }

    /// Validates every section and returns the combined issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = self.grid.validate();
        issues.extend(self.raster.validate());
        issues.extend(self.search.validate());
        issues.extend(self.router.validate());
        issues
    }

    /// Validates the configuration, failing on the first batch of issues.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidConfig`] listing every issue found.
    pub fn ensure_valid(&self) -> Result<(), RoutingError> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(RoutingError::invalid_config(issues.join("; ")))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==================== Heuristic Tests ====================

    #[test]
    fn test_heuristic_default() {
        assert_eq!(Heuristic::default(), Heuristic::Octile);
    }

    #[test]
    fn test_heuristic_admissibility() {
        assert!(Heuristic::Manhattan.is_admissible_for(false));
        assert!(!Heuristic::Manhattan.is_admissible_for(true));
        assert!(Heuristic::Octile.is_admissible_for(true));
        assert!(Heuristic::Zero.is_admissible_for(true));
    }

    // ==================== DiagonalPolicy Tests ====================

    #[test]
    fn test_diagonal_policy_permits() {
        use DiagonalPolicy::*;
        assert!(IfNoObstacles.permits(false, false));
        assert!(!IfNoObstacles.permits(true, false));
        assert!(IfAtMostOneObstacle.permits(true, false));
        assert!(!IfAtMostOneObstacle.permits(true, true));
        assert!(Always.permits(true, true));
        assert!(!Never.permits(false, false));
        assert!(!Never.allows_diagonals());
    }

    // ==================== GridConfig Tests ====================

    #[test]
    fn test_grid_default_frame() {
        let frame = GridConfig::default().frame().unwrap();
        assert_eq!(frame.dimensions(), (50, 50));
        assert_relative_eq!(frame.origin().x, -50.0);
    }

    #[test]
    fn test_grid_invalid_cell_size() {
        let config = GridConfig::default().with_cell_size(0.0);
        assert!(config.frame().is_err());
        assert_eq!(config.validate().len(), 1);
    }

    // ==================== RasterConfig Tests ====================

    #[test]
    fn test_raster_defaults() {
        let config = RasterConfig::default();
        assert_eq!(config.wall_padding(), 4.0);
        assert_eq!(config.interior_margin(), 2.0);
        assert_eq!(config.entrance_slack(), 1.0);
        assert_eq!(config.entrance_reach(), 8.0);
        assert_eq!(config.landing_clearance(), 3);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_raster_sealed_entrance_reported() {
        let config = RasterConfig::default().with_entrance_reach(2.0);
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("sealed"));
    }

    // ==================== SearchConfig Tests ====================

    #[test]
    fn test_search_expansion_limit() {
        let config = SearchConfig::default();
        assert_eq!(config.expansion_limit(2500), 20_000);
        assert_eq!(config.with_max_expansions(10).expansion_limit(2500), 10);
    }

    #[test]
    fn test_search_validate_inadmissible() {
        let config = SearchConfig::default().with_heuristic(Heuristic::Manhattan);
        assert!(!config.validate().is_empty());

        let four_way = config.with_diagonal(DiagonalPolicy::Never);
        assert!(four_way.validate().is_empty());
    }

    // ==================== RoutingConfig Tests ====================

    #[test]
    fn test_routing_config_collects_issues() {
        let config = RoutingConfig::new()
            .with_router(RouterConfig::default().with_floor_height(0.0))
            .with_search(SearchConfig::default().with_max_expansions(0));
        assert_eq!(config.validate().len(), 2);

        let err = config.ensure_valid().unwrap_err();
        assert!(err.to_string().contains("floor_height"));
    }

    #[test]
    fn test_routing_config_default_is_valid() {
        assert!(RoutingConfig::default().ensure_valid().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RoutingConfig =
            serde_json::from_str(r#"{ "router": { "dedup_epsilon": 0.5 } }"#).unwrap();
        assert_eq!(config.router().dedup_epsilon(), 0.5);
        assert_eq!(config.router().max_floor_hops(), 64);
        assert_eq!(config.raster().wall_padding(), 4.0);
    }
}
