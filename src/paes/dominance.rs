//! Pareto dominance over plain objective slices.
//!
//! The archive itself never compares objective values; it only calls
//! [`Candidate::dominates`](super::Candidate::dominates). These helpers give
//! candidate types a ready-made strict partial order to delegate to.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

/// Optimization direction shared by every objective of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower values are better.
    #[default]
    Minimize,
    /// Higher values are better.
    Maximize,
}

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other (includes equal vectors).
    Neither,
}

/// Compares two objective vectors for Pareto dominance.
///
/// A vector dominates another if it is no worse in every objective and
/// strictly better in at least one. Equal vectors are [`Dominance::Neither`].
/// Slices of unequal length are compared over their common prefix.
///
/// # Example
///
/// ```
/// use u_paes::paes::{dominance_cmp, Direction, Dominance};
///
/// assert_eq!(dominance_cmp(&[1.0, 2.0], &[2.0, 2.0], Direction::Minimize), Dominance::Left);
/// assert_eq!(dominance_cmp(&[1.0, 2.0], &[2.0, 2.0], Direction::Maximize), Dominance::Right);
/// assert_eq!(dominance_cmp(&[1.0, 3.0], &[3.0, 1.0], Direction::Minimize), Dominance::Neither);
/// ```
pub fn dominance_cmp(a: &[f64], b: &[f64], direction: Direction) -> Dominance {
    debug_assert_eq!(a.len(), b.len(), "objective vectors must have the same length");

    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        let (better, worse) = match direction {
            Direction::Minimize => (va < vb, vb < va),
            Direction::Maximize => (va > vb, vb > va),
        };
        if better {
            a_better_in_some = true;
        } else if worse {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Returns `true` if `a` strictly Pareto-dominates `b`.
pub fn dominates(a: &[f64], b: &[f64], direction: Direction) -> bool {
    dominance_cmp(a, b, direction) == Dominance::Left
}
