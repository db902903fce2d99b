//! Bounded non-dominated archive.
//!
//! [`ParetoArchive`] keeps at most `capacity` mutually non-dominated
//! candidates. Admission runs a dominance sweep, a rejection check, and,
//! once the archive is full, a crowding-based replacement driven by the
//! adaptive [`Grid`].

use super::config::{ArchiveConfig, BoundsPolicy, CrowdingMode};
use super::error::ArchiveError;
use super::grid::Grid;
use super::types::Candidate;
use std::collections::HashMap;

/// Stable handle of an archived member inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(u64);

/// Grid-side bookkeeping for one member, parallel to the member list.
#[derive(Debug, Clone)]
struct Slot {
    id: MemberId,
    point: Vec<f64>,
}

/// Result of [`ParetoArchive::add`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome<C> {
    /// The candidate was appended. Members it dominated were removed
    /// first and are handed back in insertion order.
    Accepted { pruned: Vec<C> },

    /// The archive was full; the candidate replaced the oldest member of
    /// the most crowded region.
    Replaced { evicted: C },

    /// An archived member dominates the candidate.
    Dominated,

    /// The archive is full and inserting would not relieve crowding.
    Crowded,
}

impl<C> AddOutcome<C> {
    /// Returns `true` if the candidate is now in the archive.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. } | Self::Replaced { .. })
    }
}

/// Capacity-bounded archive of mutually non-dominated candidates.
///
/// Not thread-safe by design: all mutation goes through `&mut self`, so a
/// search evaluating candidates in parallel has to serialize its calls
/// (for example behind a single mutex).
///
/// # Example
///
/// ```
/// use u_paes::paes::{ArchiveConfig, Direction, ObjectivePoint, ParetoArchive};
///
/// let config = ArchiveConfig::new(vec![0usize, 1]).with_capacity(10);
/// let mut archive: ParetoArchive<ObjectivePoint> = ParetoArchive::new(config).unwrap();
///
/// let p = |x: f64, y: f64| ObjectivePoint::new(vec![x, y], Direction::Minimize);
///
/// assert!(archive.add(p(0.2, 0.8)).unwrap().is_accepted());
/// assert!(archive.add(p(0.8, 0.2)).unwrap().is_accepted());
/// // Dominated by (0.2, 0.8)
/// assert!(!archive.add(p(0.3, 0.9)).unwrap().is_accepted());
/// // Dominates both
/// assert!(archive.add(p(0.1, 0.1)).unwrap().is_accepted());
/// assert_eq!(archive.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ParetoArchive<C: Candidate> {
    config: ArchiveConfig<C::Dimension>,
    index: HashMap<C::Dimension, usize>,
    members: Vec<C>,
    slots: Vec<Slot>,
    grid: Grid<MemberId>,
    next_id: u64,
}

impl<C: Candidate> ParetoArchive<C> {
    /// Creates an empty archive.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: ArchiveConfig<C::Dimension>) -> Result<Self, ArchiveError> {
        config.validate()?;

        let index = config
            .dimensions
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, dim)| (dim, i))
            .collect();
        let grid = Grid::new(
            config.dimensions.len(),
            config.min_value,
            config.max_value,
            config.max_depth,
        )?;

        log::debug!(
            "paes archive: {} dimensions in [{}, {}], capacity {}, depth {}, {:?} crowding",
            config.dimensions.len(),
            config.min_value,
            config.max_value,
            config.capacity,
            config.max_depth,
            config.crowding,
        );

        Ok(Self {
            config,
            index,
            members: Vec::new(),
            slots: Vec::new(),
            grid,
            next_id: 0,
        })
    }

    /// Archived candidates in insertion order.
    pub fn members(&self) -> &[C] {
        &self.members
    }

    /// Number of archived candidates.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if nothing is archived.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Maximum number of archived candidates.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// The configuration this archive was built with.
    pub fn config(&self) -> &ArchiveConfig<C::Dimension> {
        &self.config
    }

    /// The spatial index over archived members.
    pub fn grid(&self) -> &Grid<MemberId> {
        &self.grid
    }

    /// Offers `candidate` to the archive.
    ///
    /// 1. Removes every member `candidate` dominates.
    /// 2. Rejects if a remaining member dominates `candidate`.
    /// 3. Below capacity, accepts.
    /// 4. At capacity, replaces the oldest member of the most crowded
    ///    region if `candidate` lies outside it and (in exhaustive mode)
    ///    its own region is strictly less crowded.
    ///
    /// Shape and bounds are checked before any state changes.
    pub fn add(&mut self, candidate: C) -> Result<AddOutcome<C>, ArchiveError> {
        let point = self.project(&candidate)?;

        let pruned = self.remove_dominated(&candidate)?;
        let outcome = self.admit(candidate, point, pruned)?;

        #[cfg(feature = "check-invariants")]
        if let Err(e) = self.validate_invariants() {
            panic!("[invariants] ParetoArchive::add: {e}");
        }

        Ok(outcome)
    }

    fn admit(
        &mut self,
        candidate: C,
        point: Vec<f64>,
        pruned: Vec<C>,
    ) -> Result<AddOutcome<C>, ArchiveError> {
        if self.members.iter().any(|m| m.dominates(&candidate)) {
            log::trace!("paes archive: rejected dominated candidate at {point:?}");
            return Ok(AddOutcome::Dominated);
        }

        if self.members.len() < self.config.capacity {
            self.insert(candidate, point);
            log::trace!(
                "paes archive: accepted candidate, {} pruned, size {}",
                pruned.len(),
                self.members.len()
            );
            return Ok(AddOutcome::Accepted { pruned });
        }

        let mode = self.config.crowding;
        let crowded = self.grid.crowded_region(mode).ok_or_else(|| {
            ArchiveError::InvariantViolation("full archive has no occupied grid region".into())
        })?;

        if self.grid.contains(crowded, &point) {
            log::trace!("paes archive: rejected candidate inside most crowded region");
            return Ok(AddOutcome::Crowded);
        }

        let crowded_count = self.grid.cell(crowded).count();
        if mode == CrowdingMode::Exhaustive {
            if let Some(region) = self.grid.region(&point) {
                if self.grid.cell(region).count() >= crowded_count {
                    log::trace!("paes archive: rejected candidate, own region as crowded");
                    return Ok(AddOutcome::Crowded);
                }
            }
        }

        let victim = self
            .grid
            .cell(crowded)
            .entries()
            .first()
            .map(|entry| entry.key)
            .ok_or_else(|| {
                ArchiveError::InvariantViolation(format!(
                    "crowded region with count {crowded_count} has no members"
                ))
            })?;
        let position = self
            .slots
            .iter()
            .position(|slot| slot.id == victim)
            .ok_or_else(|| {
                ArchiveError::InvariantViolation(format!("grid member {victim:?} not archived"))
            })?;

        let slot = self.slots.remove(position);
        let evicted = self.members.remove(position);
        if !self.grid.delete(slot.id, &slot.point) {
            return Err(ArchiveError::InvariantViolation(format!(
                "member {:?} missing from its grid region",
                slot.id
            )));
        }
        log::debug!(
            "paes archive: evicted {:?} from region of {crowded_count} at {:?}",
            slot.id,
            slot.point
        );

        self.insert(candidate, point);
        Ok(AddOutcome::Replaced { evicted })
    }

    /// Removes every member `reference` dominates and returns them in
    /// insertion order. Calling it twice in a row is a no-op the second time.
    ///
    /// Fails with [`ArchiveError::InvariantViolation`] if a dominated member
    /// is not recorded in the grid where its point says it should be.
    pub fn remove_dominated(&mut self, reference: &C) -> Result<Vec<C>, ArchiveError> {
        let dominated: Vec<bool> = self
            .members
            .iter()
            .map(|member| reference.dominates(member))
            .collect();
        if !dominated.contains(&true) {
            return Ok(Vec::new());
        }

        for (slot, &is_dominated) in self.slots.iter().zip(dominated.iter()) {
            if is_dominated && !self.grid.delete(slot.id, &slot.point) {
                return Err(ArchiveError::InvariantViolation(format!(
                    "dominated member {:?} missing from its grid region",
                    slot.id
                )));
            }
        }

        let members = std::mem::take(&mut self.members);
        let slots = std::mem::take(&mut self.slots);
        let mut removed = Vec::new();
        for ((member, slot), dominated) in members.into_iter().zip(slots).zip(dominated) {
            if dominated {
                removed.push(member);
            } else {
                self.members.push(member);
                self.slots.push(slot);
            }
        }
        Ok(removed)
    }

    /// Acceptance test for a (1+1) step: should `candidate` replace
    /// `current`?
    ///
    /// With the score count enabled, the candidate with more winning
    /// dimensions is preferred outright. Otherwise, or on a tie, the
    /// candidate wins only if it occupies a strictly less crowded region.
    pub fn decide(&self, candidate: &C, current: &C) -> Result<bool, ArchiveError> {
        let a = self.project(candidate)?;
        let b = self.project(current)?;

        if self.config.use_best_score {
            let candidate_score = self.best_score_count(candidate);
            let current_score = self.best_score_count(current);
            if candidate_score > current_score {
                return Ok(true);
            }
            if current_score > candidate_score {
                return Ok(false);
            }
        }

        Ok(self.grid.decide(&a, &b, self.config.crowding) > 0)
    }

    /// Number of dimensions on which `candidate` beats at least one
    /// archived member.
    pub fn best_score_count(&self, candidate: &C) -> usize {
        let dims = &self.config.dimensions;
        let mut defeated = vec![false; dims.len()];
        let mut count = 0;
        for member in &self.members {
            for (i, dim) in dims.iter().enumerate() {
                if !defeated[i] && candidate.coverage(dim) > member.coverage(dim) {
                    defeated[i] = true;
                    count += 1;
                }
            }
        }
        count
    }

    /// Checks capacity, mutual non-domination, grid counts, and that each
    /// member sits in the leaf containing its point.
    pub fn validate_invariants(&self) -> Result<(), ArchiveError> {
        if self.members.len() != self.slots.len() {
            return Err(ArchiveError::InvariantViolation(format!(
                "{} members but {} grid slots",
                self.members.len(),
                self.slots.len()
            )));
        }
        if self.members.len() > self.config.capacity {
            return Err(ArchiveError::InvariantViolation(format!(
                "size {} exceeds capacity {}",
                self.members.len(),
                self.config.capacity
            )));
        }

        let recorded = self.grid.validate_counts()?;
        if recorded != self.members.len() {
            return Err(ArchiveError::InvariantViolation(format!(
                "grid holds {recorded} members, archive holds {}",
                self.members.len()
            )));
        }

        for slot in &self.slots {
            let leaf = self.grid.locate(&slot.point);
            if !self.grid.cell(leaf).entries().iter().any(|e| e.key == slot.id) {
                return Err(ArchiveError::InvariantViolation(format!(
                    "member {:?} not found in its leaf",
                    slot.id
                )));
            }
        }

        for (i, a) in self.members.iter().enumerate() {
            for (j, b) in self.members.iter().enumerate() {
                if i != j && a.dominates(b) {
                    return Err(ArchiveError::InvariantViolation(format!(
                        "member {i} dominates member {j}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn insert(&mut self, candidate: C, point: Vec<f64>) {
        let id = MemberId(self.next_id);
        self.next_id += 1;
        self.grid.add(id, point.clone());
        self.members.push(candidate);
        self.slots.push(Slot { id, point });
    }

    /// Maps a candidate's objective vector onto grid coordinates in
    /// configured dimension order.
    fn project(&self, candidate: &C) -> Result<Vec<f64>, ArchiveError> {
        let n = self.config.dimensions.len();
        let (min, max) = (self.config.min_value, self.config.max_value);
        let mut point = vec![0.0; n];
        let mut seen = vec![false; n];

        for (dim, value) in candidate.objective_vector() {
            let i = *self
                .index
                .get(&dim)
                .ok_or_else(|| ArchiveError::UnexpectedDimension(format!("{dim:?}")))?;
            if seen[i] {
                return Err(ArchiveError::DuplicateDimension(format!("{dim:?}")));
            }
            seen[i] = true;

            if !value.is_finite() {
                return Err(ArchiveError::NonFiniteObjective {
                    dimension: format!("{dim:?}"),
                });
            }
            point[i] = if (min..=max).contains(&value) {
                value
            } else {
                match self.config.bounds_policy {
                    BoundsPolicy::Clamp => {
                        log::trace!("paes archive: clamping {dim:?} = {value} into [{min}, {max}]");
                        value.clamp(min, max)
                    }
                    BoundsPolicy::Reject => {
                        return Err(ArchiveError::OutOfBounds {
                            dimension: format!("{dim:?}"),
                            value,
                            min,
                            max,
                        })
                    }
                }
            };
        }

        if let Some(i) = seen.iter().position(|&s| !s) {
            return Err(ArchiveError::MissingDimension(format!(
                "{:?}",
                self.config.dimensions[i]
            )));
        }
        Ok(point)
    }
}

#[cfg(test)]
impl<C: Candidate> ParetoArchive<C> {
    /// Rewrites the recorded point of member `index` without moving it in
    /// the grid.
    fn corrupt_slot_point(&mut self, index: usize, point: Vec<f64>) {
        self.slots[index].point = point;
    }

    /// Drops member `index` from the member list but leaves it in the grid.
    fn forget_member(&mut self, index: usize) {
        self.members.remove(index);
        self.slots.remove(index);
    }

    /// Removes member `index` from the grid but keeps it archived.
    fn detach_from_grid(&mut self, index: usize) {
        let slot = self.slots[index].clone();
        self.grid.delete(slot.id, &slot.point);
    }
}
