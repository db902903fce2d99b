//! Archive configuration.
//!
//! [`ArchiveConfig`] fixes everything about an archive at construction
//! time: the objective dimensions, the global bound box, the grid depth,
//! the capacity, and the crowding and tie-break policies.

use super::error::ArchiveError;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// How the archive finds the most crowded grid region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrowdingMode {
    /// Scan every occupied leaf and pick the one with the highest count.
    ///
    /// Exact. Cost grows with the number of occupied leaves.
    #[default]
    Exhaustive,

    /// Descend from the root into the child with the higher count.
    ///
    /// Cost is bounded by the grid depth, but the leaf reached is not
    /// always the globally most crowded one.
    Recursive,
}

/// What to do with an objective value outside `[min_value, max_value]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundsPolicy {
    /// Clamp the value onto the nearest bound before indexing.
    #[default]
    Clamp,

    /// Fail with [`ArchiveError::OutOfBounds`].
    Reject,
}

/// Configuration for a [`ParetoArchive`](super::ParetoArchive).
///
/// # Defaults
///
/// ```
/// use u_paes::paes::{ArchiveConfig, CrowdingMode};
///
/// let config = ArchiveConfig::new(vec!["lines", "branches"]);
/// assert_eq!(config.capacity, 100);
/// assert_eq!(config.max_depth, 10);
/// assert_eq!(config.crowding, CrowdingMode::Exhaustive);
/// assert!(!config.use_best_score);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_paes::paes::{ArchiveConfig, CrowdingMode};
///
/// let config = ArchiveConfig::new(vec![0usize, 1, 2])
///     .with_bounds(0.0, 100.0)
///     .with_capacity(50)
///     .with_max_depth(6)
///     .with_crowding(CrowdingMode::Recursive);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchiveConfig<D> {
    /// Objective dimensions, in the order used for grid splitting.
    pub dimensions: Vec<D>,

    /// Lower bound applied to every dimension.
    pub min_value: f64,

    /// Upper bound applied to every dimension (inclusive).
    pub max_value: f64,

    /// Maximum subdivision depth of the grid.
    ///
    /// A leaf at this depth never splits and simply accumulates members.
    pub max_depth: usize,

    /// Maximum number of archived candidates.
    pub capacity: usize,

    /// Crowding query used for eviction and for [`decide`](super::ParetoArchive::decide).
    pub crowding: CrowdingMode,

    /// Whether [`decide`](super::ParetoArchive::decide) consults the
    /// per-dimension score count before the grid tie-break.
    pub use_best_score: bool,

    /// Handling of objective values outside the bound box.
    pub bounds_policy: BoundsPolicy,
}

impl<D> ArchiveConfig<D> {
    /// Creates a configuration over `dimensions` with default settings:
    /// bounds `[0, 1]`, depth 10, capacity 100, exhaustive crowding,
    /// score count disabled, clamping of out-of-bounds values.
    pub fn new(dimensions: Vec<D>) -> Self {
        Self {
            dimensions,
            min_value: 0.0,
            max_value: 1.0,
            max_depth: 10,
            capacity: 100,
            crowding: CrowdingMode::default(),
            use_best_score: false,
            bounds_policy: BoundsPolicy::default(),
        }
    }

    /// Sets the bound box shared by every dimension.
    pub fn with_bounds(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    /// Sets the maximum grid depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the archive capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the crowding mode.
    pub fn with_crowding(mut self, mode: CrowdingMode) -> Self {
        self.crowding = mode;
        self
    }

    /// Enables or disables the score-count override in `decide`.
    pub fn with_best_score(mut self, enabled: bool) -> Self {
        self.use_best_score = enabled;
        self
    }

    /// Sets the out-of-bounds policy.
    pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.bounds_policy = policy;
        self
    }
}

impl<D: Eq + Hash + Debug> ArchiveConfig<D> {
    /// Validates the configuration.
    ///
    /// Returns the first fault found.
    pub fn validate(&self) -> Result<(), ArchiveError> {
        if self.dimensions.is_empty() {
            return Err(ArchiveError::EmptyDimensions);
        }
        let mut seen = HashSet::with_capacity(self.dimensions.len());
        for dim in &self.dimensions {
            if !seen.insert(dim) {
                return Err(ArchiveError::DuplicateDimension(format!("{dim:?}")));
            }
        }
        if !self.min_value.is_finite()
            || !self.max_value.is_finite()
            || self.min_value >= self.max_value
        {
            return Err(ArchiveError::InvalidBounds {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.capacity == 0 {
            return Err(ArchiveError::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArchiveConfig::new(vec![0usize, 1]);
        assert_eq!(config.dimensions, vec![0, 1]);
        assert!((config.min_value - 0.0).abs() < 1e-15);
        assert!((config.max_value - 1.0).abs() < 1e-15);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.capacity, 100);
        assert_eq!(config.crowding, CrowdingMode::Exhaustive);
        assert!(!config.use_best_score);
        assert_eq!(config.bounds_policy, BoundsPolicy::Clamp);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ArchiveConfig::new(vec!["a", "b", "c"])
            .with_bounds(-5.0, 5.0)
            .with_max_depth(4)
            .with_capacity(20)
            .with_crowding(CrowdingMode::Recursive)
            .with_best_score(true)
            .with_bounds_policy(BoundsPolicy::Reject);

        assert!((config.min_value + 5.0).abs() < 1e-15);
        assert!((config.max_value - 5.0).abs() < 1e-15);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.capacity, 20);
        assert_eq!(config.crowding, CrowdingMode::Recursive);
        assert!(config.use_best_score);
        assert_eq!(config.bounds_policy, BoundsPolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_dimensions() {
        let config = ArchiveConfig::<usize>::new(vec![]);
        assert_eq!(config.validate(), Err(ArchiveError::EmptyDimensions));
    }

    #[test]
    fn test_validate_duplicate_dimension() {
        let config = ArchiveConfig::new(vec!["a", "b", "a"]);
        assert_eq!(
            config.validate(),
            Err(ArchiveError::DuplicateDimension("\"a\"".into()))
        );
    }

    #[test]
    fn test_validate_min_ge_max() {
        let config = ArchiveConfig::new(vec![0usize]).with_bounds(1.0, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ArchiveError::InvalidBounds { .. })
        ));

        let config = ArchiveConfig::new(vec![0usize]).with_bounds(2.0, 1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_finite_bounds() {
        let config = ArchiveConfig::new(vec![0usize]).with_bounds(0.0, f64::INFINITY);
        assert!(config.validate().is_err());

        let config = ArchiveConfig::new(vec![0usize]).with_bounds(f64::NAN, 1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config = ArchiveConfig::new(vec![0usize]).with_capacity(0);
        assert_eq!(config.validate(), Err(ArchiveError::ZeroCapacity));
    }

    #[test]
    fn test_zero_depth_is_valid() {
        // A single unsplittable root cell
        let config = ArchiveConfig::new(vec![0usize]).with_max_depth(0);
        assert!(config.validate().is_ok());
    }
}
