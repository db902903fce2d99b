//! Bounded, diversity-preserving Pareto archive for multi-objective search.
//!
//! Provides the archive used by the Pareto Archived Evolution Strategy
//! (PAES) and related (1+1) multi-objective searches:
//!
//! - **Archive**: keeps a capped set of mutually non-dominated candidates,
//!   pruning dominated members and rejecting dominated newcomers.
//! - **Adaptive grid**: a lazily subdivided partition of objective space
//!   with incremental counts, used to evict from the most crowded region
//!   once the archive is full.
//! - **Acceptance test**: a crowding-based tie-break for choosing between
//!   two non-comparable candidates, with an optional score-count override.
//!
//! # Architecture
//!
//! Like the other U-Engine algorithm crates, this crate contains no
//! domain-specific concepts. Candidates are consumed through the
//! [`paes::Candidate`] trait; how objective values are produced is up to
//! the caller.

pub mod paes;
