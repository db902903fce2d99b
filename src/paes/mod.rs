//! Pareto Archived Evolution Strategy (PAES) archive.
//!
//! A bounded archive of mutually non-dominated candidates for
//! Pareto-based (1+1) evolutionary search. When the archive is full, an
//! adaptive grid over objective space decides which incumbent to evict,
//! keeping the archived front spread out.
//!
//! # Core Trait
//!
//! - [`Candidate`]: dominance predicate and objective lookup; the only
//!   thing the archive knows about a solution
//!
//! # Key Types
//!
//! - [`ArchiveConfig`]: dimensions, bounds, depth, capacity, policies
//! - [`ParetoArchive`]: admission, eviction, and the acceptance test
//! - [`Grid`]: the recursive spatial index behind crowding estimates
//! - [`ObjectivePoint`]: a ready-made candidate over `Vec<f64>`
//!
//! # Search loop usage
//!
//! ```ignore
//! let mut archive = ParetoArchive::new(ArchiveConfig::new(goals))?;
//! archive.add(current.clone())?;
//! loop {
//!     let candidate = mutate(&current);
//!     if current.dominates(&candidate) {
//!         continue;
//!     }
//!     let accepted = archive.add(candidate.clone())?.is_accepted();
//!     if candidate.dominates(&current) || (accepted && archive.decide(&candidate, &current)?) {
//!         current = candidate;
//!     }
//! }
//! ```
//!
//! # References
//!
//! - Knowles & Corne (2000), "Approximating the Nondominated Front Using
//!   the Pareto Archived Evolution Strategy", *Evolutionary Computation* 8(2)

mod archive;
mod config;
mod dominance;
mod error;
mod grid;
mod types;

pub use archive::{AddOutcome, MemberId, ParetoArchive};
pub use config::{ArchiveConfig, BoundsPolicy, CrowdingMode};
pub use dominance::{dominance_cmp, dominates, Direction, Dominance};
pub use error::ArchiveError;
pub use grid::{CellId, Grid, GridCell, GridEntry};
pub use types::{Candidate, ObjectivePoint, ObjectiveVector};
