//! Capability trait consumed by the archive.
//!
//! The archive never inspects a candidate's representation. It needs a
//! dominance predicate, a per-dimension objective lookup, and the full
//! objective vector used to place the candidate in the grid.

use super::dominance::{dominates, Direction};
use std::fmt::Debug;
use std::hash::Hash;

/// Objective values keyed by dimension, in the candidate's own order.
pub type ObjectiveVector<D> = Vec<(D, f64)>;

/// A candidate solution that can be stored in a
/// [`ParetoArchive`](super::ParetoArchive).
///
/// # Contract
///
/// - [`dominates`](Candidate::dominates) must be a strict partial order:
///   irreflexive, asymmetric, and transitive. The direction (minimize or
///   maximize) is up to the implementor.
/// - [`objective_vector`](Candidate::objective_vector) must contain every
///   configured dimension exactly once and nothing else.
/// - The values must not change while the candidate is archived.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct TestSuite {
///     goals: Vec<(String, f64)>,
/// }
///
/// impl Candidate for TestSuite {
///     type Dimension = String;
///
///     fn dominates(&self, other: &Self) -> bool {
///         let a: Vec<f64> = self.goals.iter().map(|g| g.1).collect();
///         let b: Vec<f64> = other.goals.iter().map(|g| g.1).collect();
///         u_paes::paes::dominates(&a, &b, Direction::Maximize)
///     }
///
///     fn coverage(&self, goal: &String) -> f64 {
///         self.goals.iter().find(|g| &g.0 == goal).map_or(0.0, |g| g.1)
///     }
///
///     fn objective_vector(&self) -> ObjectiveVector<String> {
///         self.goals.clone()
///     }
/// }
/// ```
pub trait Candidate {
    /// Identifier of one objective dimension.
    type Dimension: Clone + Eq + Hash + Debug;

    /// Returns `true` if `self` strictly dominates `other`.
    fn dominates(&self, other: &Self) -> bool;

    /// Objective value on `dimension`, used for score counting.
    fn coverage(&self, dimension: &Self::Dimension) -> f64;

    /// All objective values of this candidate.
    fn objective_vector(&self) -> ObjectiveVector<Self::Dimension>;
}

/// A plain objective vector with a fixed optimization direction.
///
/// Dimensions are the indices `0..values.len()`.
///
/// # Example
///
/// ```
/// use u_paes::paes::{Candidate, Direction, ObjectivePoint};
///
/// let a = ObjectivePoint::new(vec![0.2, 0.4], Direction::Minimize);
/// let b = ObjectivePoint::new(vec![0.3, 0.4], Direction::Minimize);
/// assert!(a.dominates(&b));
/// assert_eq!(a.coverage(&1), 0.4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectivePoint {
    /// Objective values, one per dimension.
    pub values: Vec<f64>,
    /// Direction used by [`Candidate::dominates`].
    pub direction: Direction,
}

impl ObjectivePoint {
    /// Creates a point from its objective values.
    pub fn new(values: Vec<f64>, direction: Direction) -> Self {
        Self { values, direction }
    }

    /// Number of objectives.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the point has no objectives.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Candidate for ObjectivePoint {
    type Dimension = usize;

    fn dominates(&self, other: &Self) -> bool {
        dominates(&self.values, &other.values, self.direction)
    }

    fn coverage(&self, dimension: &usize) -> f64 {
        self.values.get(*dimension).copied().unwrap_or(f64::NAN)
    }

    fn objective_vector(&self) -> ObjectiveVector<usize> {
        self.values.iter().copied().enumerate().collect()
    }
}
