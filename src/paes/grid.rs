//! Adaptive grid over objective space.
//!
//! The grid is a binary space partition stored in a flat arena. The root
//! covers `[min, max]` on every dimension. A leaf at depth `d` splits at
//! the midpoint of dimension `d mod n` when an insertion lands on a member
//! with different coordinates, until `max_depth` is reached.
//!
//! Every cell keeps the number of members in its subtree. Counts are
//! adjusted along the descent path on each insert and delete, never
//! recomputed.
//!
//! Cells are never merged back: a subtree that empties out keeps its
//! shape and is simply reused by later insertions.
//!
//! # Containment
//!
//! Cell intervals are half-open `[low, high)`, except that the global
//! upper bound is closed so that `max` itself is admitted.
//!
//! # References
//!
//! - Knowles & Corne (2000), "Approximating the Nondominated Front Using
//!   the Pareto Archived Evolution Strategy"

use super::config::CrowdingMode;
use super::error::ArchiveError;

/// Handle of a cell in the grid arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
    /// Arena index of this cell.
    pub fn index(self) -> usize {
        self.0
    }
}

const ROOT: CellId = CellId(0);

/// A member recorded in a leaf: its key and its (clamped) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEntry<K> {
    pub key: K,
    pub point: Vec<f64>,
}

#[derive(Debug, Clone)]
enum Node<K> {
    Leaf(Vec<GridEntry<K>>),
    Split { low: CellId, high: CellId },
}

/// One hyper-rectangular cell of the grid.
#[derive(Debug, Clone)]
pub struct GridCell<K> {
    lower: Vec<f64>,
    upper: Vec<f64>,
    depth: usize,
    count: usize,
    node: Node<K>,
}

impl<K> GridCell<K> {
    fn leaf(lower: Vec<f64>, upper: Vec<f64>, depth: usize) -> Self {
        Self {
            lower,
            upper,
            depth,
            count: 0,
            node: Node::Leaf(Vec::new()),
        }
    }

    /// Number of members in this cell's subtree.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Depth of this cell (root = 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Per-dimension lower bounds.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Per-dimension upper bounds.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Returns `true` if this cell has not been split.
    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }

    /// Members of a leaf in insertion order. Empty for internal cells.
    pub fn entries(&self) -> &[GridEntry<K>] {
        match &self.node {
            Node::Leaf(entries) => entries,
            Node::Split { .. } => &[],
        }
    }

    /// Child handles `(low, high)` of an internal cell.
    pub fn children(&self) -> Option<(CellId, CellId)> {
        match self.node {
            Node::Split { low, high } => Some((low, high)),
            Node::Leaf(_) => None,
        }
    }
}

/// Recursive adaptive grid keyed by member handles of type `K`.
///
/// # Example
///
/// ```
/// use u_paes::paes::Grid;
///
/// let mut grid: Grid<u32> = Grid::new(2, 0.0, 1.0, 1).unwrap();
/// grid.add(1, vec![0.1, 0.9]);
/// grid.add(2, vec![0.2, 0.1]);
///
/// // The root split once along dimension 0; both points went low.
/// let crowded = grid.most_crowded_region().unwrap();
/// assert_eq!(grid.cell(crowded).count(), 2);
/// assert_eq!(grid.cell(crowded).upper()[0], 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Grid<K> {
    cells: Vec<GridCell<K>>,
    dimensions: usize,
    min_value: f64,
    max_value: f64,
    max_depth: usize,
}

impl<K: Copy + PartialEq> Grid<K> {
    /// Creates a grid with a single root cell covering `[min, max]` on
    /// each of `dimensions` axes.
    ///
    /// Fails if there are no dimensions or the bounds are not a finite,
    /// non-empty interval.
    pub fn new(
        dimensions: usize,
        min_value: f64,
        max_value: f64,
        max_depth: usize,
    ) -> Result<Self, ArchiveError> {
        if dimensions == 0 {
            return Err(ArchiveError::EmptyDimensions);
        }
        if !min_value.is_finite() || !max_value.is_finite() || min_value >= max_value {
            return Err(ArchiveError::InvalidBounds {
                min: min_value,
                max: max_value,
            });
        }
        let root = GridCell::leaf(
            vec![min_value; dimensions],
            vec![max_value; dimensions],
            0,
        );
        Ok(Self {
            cells: vec![root],
            dimensions,
            min_value,
            max_value,
            max_depth,
        })
    }

    /// Handle of the root cell.
    pub fn root(&self) -> CellId {
        ROOT
    }

    /// Returns the cell behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this grid.
    pub fn cell(&self, id: CellId) -> &GridCell<K> {
        &self.cells[id.0]
    }

    /// Total number of cells ever created (leaves and internal).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of members held by the grid.
    pub fn len(&self) -> usize {
        self.cells[ROOT.0].count
    }

    /// Returns `true` if no member is recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of objective dimensions.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Global `(min, max)` bounds shared by every dimension.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }

    /// Maximum subdivision depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns `true` if `point` lies inside the cell's box.
    ///
    /// Intervals are `[low, high)`; a bound equal to the global maximum is
    /// treated as closed.
    pub fn contains(&self, id: CellId, point: &[f64]) -> bool {
        let cell = &self.cells[id.0];
        point
            .iter()
            .zip(cell.lower.iter().zip(cell.upper.iter()))
            .all(|(&x, (&low, &high))| {
                x >= low && (x < high || (x == high && high >= self.max_value))
            })
    }

    /// Inserts `key` at `point` and returns the leaf it landed in.
    ///
    /// Splits leaves on the way down while they are below `max_depth`
    /// and already hold a member with different coordinates.
    pub fn add(&mut self, key: K, point: Vec<f64>) -> CellId {
        debug_assert_eq!(point.len(), self.dimensions);

        let mut id = ROOT;
        loop {
            self.cells[id.0].count += 1;

            let cell = &self.cells[id.0];
            let must_split = match &cell.node {
                Node::Split { .. } => {
                    id = self.child_for(id, &point);
                    continue;
                }
                Node::Leaf(entries) => {
                    cell.depth < self.max_depth && entries.iter().any(|e| e.point != point)
                }
            };

            if must_split {
                self.split(id);
                // `id` is now internal; its count already includes `point`.
                id = self.child_for(id, &point);
                continue;
            }

            if let Node::Leaf(entries) = &mut self.cells[id.0].node {
                entries.push(GridEntry { key, point });
            }
            return id;
        }
    }

    /// Removes `key` from the leaf containing `point`.
    ///
    /// Returns `false` and leaves the grid untouched if the key is not
    /// recorded there. Double deletion is therefore harmless.
    pub fn delete(&mut self, key: K, point: &[f64]) -> bool {
        let mut path = vec![ROOT];
        let mut id = ROOT;
        while !self.cells[id.0].is_leaf() {
            id = self.child_for(id, point);
            path.push(id);
        }

        let removed = match &mut self.cells[id.0].node {
            Node::Leaf(entries) => match entries.iter().position(|e| e.key == key) {
                Some(pos) => {
                    entries.remove(pos);
                    true
                }
                None => false,
            },
            Node::Split { .. } => false,
        };

        if removed {
            for cell in path {
                self.cells[cell.0].count -= 1;
            }
        }
        removed
    }

    /// Removes every `(key, point)` pair; returns how many were found.
    pub fn delete_all<'a, I>(&mut self, members: I) -> usize
    where
        I: IntoIterator<Item = (K, &'a [f64])>,
    {
        members
            .into_iter()
            .filter(|&(key, point)| self.delete(key, point))
            .count()
    }

    /// Returns the leaf whose box contains `point`, occupied or not.
    pub fn locate(&self, point: &[f64]) -> CellId {
        let mut id = ROOT;
        while !self.cells[id.0].is_leaf() {
            id = self.child_for(id, point);
        }
        id
    }

    /// Returns the leaf containing `point` if it holds at least one member.
    pub fn region(&self, point: &[f64]) -> Option<CellId> {
        let id = self.locate(point);
        (self.cells[id.0].count > 0).then_some(id)
    }

    /// Occupied leaf with the highest count.
    ///
    /// Leaves are visited pre-order, low child first; the first leaf
    /// reaching the maximum wins ties. Returns `None` for an empty grid.
    pub fn most_crowded_region(&self) -> Option<CellId> {
        let mut best: Option<CellId> = None;
        let mut best_count = 0;
        let mut stack = vec![ROOT];

        while let Some(id) = stack.pop() {
            let cell = &self.cells[id.0];
            if cell.count == 0 {
                continue;
            }
            match cell.node {
                Node::Split { low, high } => {
                    stack.push(high);
                    stack.push(low);
                }
                Node::Leaf(_) => {
                    if cell.count > best_count {
                        best_count = cell.count;
                        best = Some(id);
                    }
                }
            }
        }
        best
    }

    /// Leaf reached by always descending into the more populated child.
    ///
    /// Ties go to the low child. This is bounded by the grid depth but
    /// may miss the globally most crowded leaf. Returns `None` for an
    /// empty grid.
    pub fn recursive_most_crowded_region(&self) -> Option<CellId> {
        if self.is_empty() {
            return None;
        }
        let mut id = ROOT;
        while let Some((low, high)) = self.cells[id.0].children() {
            id = if self.cells[low.0].count >= self.cells[high.0].count {
                low
            } else {
                high
            };
        }
        Some(id)
    }

    /// Most crowded region under the given mode.
    pub fn crowded_region(&self, mode: CrowdingMode) -> Option<CellId> {
        match mode {
            CrowdingMode::Exhaustive => self.most_crowded_region(),
            CrowdingMode::Recursive => self.recursive_most_crowded_region(),
        }
    }

    /// Compares the local density around `a` and `b`.
    ///
    /// Positive if `a` sits in a less crowded region than `b`, negative if
    /// more crowded, zero on a tie.
    ///
    /// - [`CrowdingMode::Exhaustive`]: compares the counts of the leaves
    ///   containing each point (an unoccupied leaf counts as zero).
    /// - [`CrowdingMode::Recursive`]: descends both points together and
    ///   compares the counts of the two sibling subtrees where their paths
    ///   part. Points sharing a leaf tie.
    pub fn decide(&self, a: &[f64], b: &[f64], mode: CrowdingMode) -> i64 {
        let (a_count, b_count) = match mode {
            CrowdingMode::Exhaustive => {
                let count = |p: &[f64]| self.region(p).map_or(0, |id| self.cells[id.0].count);
                (count(a), count(b))
            }
            CrowdingMode::Recursive => {
                let mut id = ROOT;
                loop {
                    if self.cells[id.0].is_leaf() {
                        break (0, 0);
                    }
                    let a_child = self.child_for(id, a);
                    let b_child = self.child_for(id, b);
                    if a_child != b_child {
                        break (self.cells[a_child.0].count, self.cells[b_child.0].count);
                    }
                    id = a_child;
                }
            }
        };
        b_count as i64 - a_count as i64
    }

    /// All leaves in pre-order, low child first.
    pub fn leaves(&self) -> Vec<CellId> {
        let mut leaves = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            match self.cells[id.0].children() {
                Some((low, high)) => {
                    stack.push(high);
                    stack.push(low);
                }
                None => leaves.push(id),
            }
        }
        leaves
    }

    /// Checks that every leaf count equals its member list length and
    /// every internal count equals the sum of its children.
    ///
    /// Returns the total member count.
    pub fn validate_counts(&self) -> Result<usize, ArchiveError> {
        for (index, cell) in self.cells.iter().enumerate() {
            let expected = match cell.node {
                Node::Leaf(ref entries) => entries.len(),
                Node::Split { low, high } => self.cells[low.0].count + self.cells[high.0].count,
            };
            if cell.count != expected {
                return Err(ArchiveError::InvariantViolation(format!(
                    "cell {index} records {} members but holds {expected}",
                    cell.count
                )));
            }
        }
        Ok(self.len())
    }

    /// Child of internal cell `id` on `point`'s side of the split plane.
    fn child_for(&self, id: CellId, point: &[f64]) -> CellId {
        let cell = &self.cells[id.0];
        match cell.node {
            Node::Split { low, high } => {
                let dim = cell.depth % self.dimensions;
                let mid = midpoint(cell.lower[dim], cell.upper[dim]);
                if point[dim] < mid {
                    low
                } else {
                    high
                }
            }
            Node::Leaf(_) => id,
        }
    }

    /// Turns leaf `id` into an internal cell with two fresh leaves and
    /// redistributes its members, preserving their relative order.
    fn split(&mut self, id: CellId) {
        let cell = &mut self.cells[id.0];
        let entries = match std::mem::replace(&mut cell.node, Node::Leaf(Vec::new())) {
            Node::Leaf(entries) => entries,
            split => {
                cell.node = split;
                return;
            }
        };

        let depth = cell.depth;
        let dim = depth % self.dimensions;
        let mid = midpoint(cell.lower[dim], cell.upper[dim]);

        let mut low_upper = cell.upper.clone();
        low_upper[dim] = mid;
        let mut high_lower = cell.lower.clone();
        high_lower[dim] = mid;

        let mut low = GridCell::leaf(cell.lower.clone(), low_upper, depth + 1);
        let mut high = GridCell::leaf(high_lower, cell.upper.clone(), depth + 1);

        let (low_entries, high_entries): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|e| e.point[dim] < mid);
        low.count = low_entries.len();
        low.node = Node::Leaf(low_entries);
        high.count = high_entries.len();
        high.node = Node::Leaf(high_entries);

        let low_id = CellId(self.cells.len());
        let high_id = CellId(self.cells.len() + 1);
        self.cells.push(low);
        self.cells.push(high);
        self.cells[id.0].node = Node::Split {
            low: low_id,
            high: high_id,
        };
    }
}

fn midpoint(low: f64, high: f64) -> f64 {
    low + (high - low) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid(depth: usize) -> Grid<u32> {
        Grid::new(2, 0.0, 1.0, depth).unwrap()
    }

    #[test]
    fn test_new_rejects_degenerate_bounds() {
        assert_eq!(
            Grid::<u32>::new(2, 1.0, 0.0, 3).unwrap_err(),
            ArchiveError::InvalidBounds { min: 1.0, max: 0.0 }
        );
        assert!(Grid::<u32>::new(2, 0.5, 0.5, 3).is_err());
        assert!(Grid::<u32>::new(2, f64::NEG_INFINITY, 1.0, 3).is_err());
        assert!(Grid::<u32>::new(2, 0.0, f64::NAN, 3).is_err());
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            Grid::<u32>::new(0, 0.0, 1.0, 3).unwrap_err(),
            ArchiveError::EmptyDimensions
        );
    }

    #[test]
    fn test_bounds_and_depth() {
        let grid = Grid::<u32>::new(3, -2.0, 4.0, 7).unwrap();
        assert_eq!(grid.bounds(), (-2.0, 4.0));
        assert_eq!(grid.max_depth(), 7);
        assert_eq!(grid.dimensions(), 3);
        assert_eq!(grid.cell(grid.root()).lower(), &[-2.0, -2.0, -2.0]);
        assert_eq!(grid.cell(grid.root()).upper(), &[4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_first_insert_stays_in_root() {
        let mut grid = unit_grid(10);
        let leaf = grid.add(1, vec![0.3, 0.3]);
        assert_eq!(leaf, grid.root());
        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_split_alternates_dimensions() {
        let mut grid = unit_grid(2);
        grid.add(1, vec![0.1, 0.1]);
        let leaf = grid.add(2, vec![0.2, 0.9]);

        // depth 0 splits dim 0 at 0.5, depth 1 splits dim 1 at 0.5
        let cell = grid.cell(leaf);
        assert_eq!(cell.depth(), 2);
        assert_eq!(cell.lower(), &[0.0, 0.5]);
        assert_eq!(cell.upper(), &[0.5, 1.0]);
        assert_eq!(cell.count(), 1);

        let other = grid.locate(&[0.1, 0.1]);
        assert_eq!(grid.cell(other).upper(), &[0.5, 0.5]);
        assert!(grid.validate_counts().is_ok());
    }

    #[test]
    fn test_max_depth_caps_subdivision() {
        let mut grid = unit_grid(1);
        grid.add(1, vec![0.1, 0.1]);
        grid.add(2, vec![0.2, 0.2]);
        grid.add(3, vec![0.3, 0.3]);

        // Root + two children, nothing deeper
        assert_eq!(grid.cell_count(), 3);
        let leaf = grid.locate(&[0.1, 0.1]);
        assert_eq!(grid.cell(leaf).count(), 3);
        let keys: Vec<u32> = grid.cell(leaf).entries().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_identical_points_do_not_split() {
        let mut grid = unit_grid(10);
        grid.add(1, vec![0.4, 0.4]);
        grid.add(2, vec![0.4, 0.4]);
        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.cell(grid.root()).entries().len(), 2);
    }

    #[test]
    fn test_upper_bound_is_closed() {
        let mut grid = unit_grid(3);
        grid.add(1, vec![0.0, 0.0]);
        let leaf = grid.add(2, vec![1.0, 1.0]);
        assert!(grid.contains(leaf, &[1.0, 1.0]));
        assert!(grid.contains(grid.root(), &[1.0, 1.0]));

        let low = grid.locate(&[0.0, 0.0]);
        // Interior bound 0.5 is open on the low side
        assert!(!grid.contains(low, &[0.5, 0.0]));
        assert!(grid.contains(low, &[0.49, 0.0]));
    }

    #[test]
    fn test_delete_updates_counts() {
        let mut grid = unit_grid(3);
        grid.add(1, vec![0.1, 0.1]);
        grid.add(2, vec![0.9, 0.9]);
        grid.add(3, vec![0.9, 0.1]);

        assert!(grid.delete(2, &[0.9, 0.9]));
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.validate_counts(), Ok(2));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut grid = unit_grid(3);
        grid.add(1, vec![0.1, 0.1]);
        grid.add(2, vec![0.9, 0.9]);

        assert!(grid.delete(1, &[0.1, 0.1]));
        assert!(!grid.delete(1, &[0.1, 0.1]));
        // Right key, wrong location
        assert!(!grid.delete(2, &[0.1, 0.1]));
        assert_eq!(grid.len(), 1);
        assert!(grid.validate_counts().is_ok());
    }

    #[test]
    fn test_delete_all() {
        let mut grid = unit_grid(4);
        let points = [vec![0.1, 0.2], vec![0.6, 0.7], vec![0.3, 0.9]];
        for (i, p) in points.iter().enumerate() {
            grid.add(i as u32, p.clone());
        }
        let removed = grid.delete_all(vec![
            (0, points[0].as_slice()),
            (2, points[2].as_slice()),
            (2, points[2].as_slice()),
        ]);
        assert_eq!(removed, 2);
        assert_eq!(grid.len(), 1);
        assert!(grid.validate_counts().is_ok());
    }

    #[test]
    fn test_region_requires_occupancy() {
        let mut grid = unit_grid(1);
        grid.add(1, vec![0.1, 0.9]);
        grid.add(2, vec![0.2, 0.1]);

        assert!(grid.region(&[0.3, 0.3]).is_some());
        // Upper half exists but is empty
        assert!(grid.region(&[0.8, 0.1]).is_none());
        assert_eq!(grid.cell(grid.locate(&[0.8, 0.1])).count(), 0);
    }

    #[test]
    fn test_most_crowded_prefers_first_on_tie() {
        let mut grid = unit_grid(1);
        grid.add(1, vec![0.1, 0.1]);
        grid.add(2, vec![0.9, 0.1]);

        let crowded = grid.most_crowded_region().unwrap();
        assert_eq!(grid.cell(crowded).upper()[0], 0.5);
        assert_eq!(grid.recursive_most_crowded_region(), Some(crowded));
    }

    #[test]
    fn test_most_crowded_finds_global_maximum() {
        // Recursive descent picks the denser half, exhaustive the denser leaf.
        let mut grid = unit_grid(2);
        // Low half (x < 0.5): three points spread over two leaves
        grid.add(1, vec![0.1, 0.1]);
        grid.add(2, vec![0.1, 0.9]);
        grid.add(3, vec![0.2, 0.8]);
        // High half: two points in one leaf
        grid.add(4, vec![0.6, 0.1]);
        grid.add(5, vec![0.7, 0.2]);

        let exhaustive = grid.most_crowded_region().unwrap();
        assert_eq!(grid.cell(exhaustive).count(), 2);
        // low/high leaf both hold 2; pre-order reaches the low half first
        assert_eq!(grid.cell(exhaustive).lower(), &[0.0, 0.5]);

        let recursive = grid.recursive_most_crowded_region().unwrap();
        assert_eq!(grid.cell(recursive).lower(), &[0.0, 0.5]);
    }

    #[test]
    fn test_recursive_can_miss_global_maximum() {
        let mut grid = unit_grid(2);
        // Low half: 1 + 1 + 1 spread => leaves of count 2 and 1
        grid.add(1, vec![0.1, 0.1]);
        grid.add(2, vec![0.1, 0.9]);
        grid.add(3, vec![0.2, 0.2]);
        // High half: 3 points, all in one leaf
        grid.add(4, vec![0.6, 0.6]);
        grid.add(5, vec![0.7, 0.7]);
        grid.add(6, vec![0.8, 0.8]);
        // Low half gets a 4th point, making it the denser half
        grid.add(7, vec![0.3, 0.7]);

        let exhaustive = grid.most_crowded_region().unwrap();
        assert_eq!(grid.cell(exhaustive).count(), 3);
        assert_eq!(grid.cell(exhaustive).lower(), &[0.5, 0.5]);

        let recursive = grid.recursive_most_crowded_region().unwrap();
        assert_eq!(grid.cell(recursive).count(), 2);
    }

    #[test]
    fn test_empty_grid_has_no_crowded_region() {
        let grid = unit_grid(3);
        assert!(grid.most_crowded_region().is_none());
        assert!(grid.recursive_most_crowded_region().is_none());
    }

    #[test]
    fn test_decide_exhaustive() {
        let mut grid = unit_grid(1);
        grid.add(1, vec![0.1, 0.9]);
        grid.add(2, vec![0.2, 0.1]);

        let sparse = [0.8, 0.1];
        let dense = [0.3, 0.3];
        assert_eq!(grid.decide(&sparse, &dense, CrowdingMode::Exhaustive), 2);
        assert_eq!(grid.decide(&dense, &sparse, CrowdingMode::Exhaustive), -2);
        assert_eq!(grid.decide(&dense, &dense, CrowdingMode::Exhaustive), 0);
    }

    #[test]
    fn test_decide_recursive_uses_divergence_point() {
        let mut grid = unit_grid(3);
        grid.add(1, vec![0.1, 0.1]);
        grid.add(2, vec![0.2, 0.6]);
        grid.add(3, vec![0.9, 0.9]);

        // Paths part at the root: low half holds 2, high half holds 1
        let a = [0.9, 0.1];
        let b = [0.1, 0.4];
        assert_eq!(grid.decide(&a, &b, CrowdingMode::Recursive), 1);
        assert_eq!(grid.decide(&b, &a, CrowdingMode::Recursive), -1);

        // Same leaf
        assert_eq!(grid.decide(&b, &b, CrowdingMode::Recursive), 0);
    }

    #[test]
    fn test_leaves_cover_all_members() {
        let mut grid = unit_grid(5);
        for i in 0..20u32 {
            let x = (i as f64 * 0.37) % 1.0;
            let y = (i as f64 * 0.61) % 1.0;
            grid.add(i, vec![x, y]);
        }
        let total: usize = grid
            .leaves()
            .into_iter()
            .map(|id| grid.cell(id).entries().len())
            .sum();
        assert_eq!(total, 20);
        assert_eq!(grid.validate_counts(), Ok(20));
    }

    #[test]
    fn test_split_preserves_member_order() {
        let mut grid = unit_grid(1);
        grid.add(1, vec![0.1, 0.5]);
        grid.add(2, vec![0.9, 0.5]);
        grid.add(3, vec![0.2, 0.5]);
        grid.add(4, vec![0.3, 0.5]);

        let leaf = grid.locate(&[0.1, 0.5]);
        let keys: Vec<u32> = grid.cell(leaf).entries().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![1, 3, 4]);
    }
}
