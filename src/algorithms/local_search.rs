//! Pairwise local search over the slots of a grid.
//!
//! Every pair of slots is visited in turn, and the contents of the two slots
//! are exchanged whenever that lowers their combined displacement.  Passes
//! are repeated until one of them no longer lowers the total displacement of
//! the grid.

use crate::grid::Grid;
use crate::slot::Slot;
use crate::Error;

/// What [`minimize`] did to a pair of slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Kept,
    Moved,
    Swapped,
}

/// Exchange the contents of `a` and `b` if that strictly lowers their
/// combined displacement.
fn minimize<'s, T>(mut a: &'s mut Slot<T>, mut b: &'s mut Slot<T>) -> Result<Outcome, Error> {
    if a.is_empty() {
        std::mem::swap(&mut a, &mut b);
    }
    if b.is_empty() {
        if a.is_empty() {
            return Ok(Outcome::Kept);
        }
        let dist = a.displacement();
        let test = b.displacement_to(a.target()?);
        if test < dist {
            b.insert(a.eject()?)?;
            return Ok(Outcome::Moved);
        }
        return Ok(Outcome::Kept);
    }

    let dist = a.displacement() + b.displacement();
    let test = a.displacement_to(b.target()?) + b.displacement_to(a.target()?);
    if test < dist {
        a.swap(b);
        return Ok(Outcome::Swapped);
    }
    Ok(Outcome::Kept)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Counts {
    moves: usize,
    swaps: usize,
}

impl Counts {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Kept => {}
            Outcome::Moved => self.moves += 1,
            Outcome::Swapped => self.swaps += 1,
        }
    }
}

/// Run [`minimize`] on every pair of slots, in flat order.
fn sweep<T>(slots: &mut [Slot<T>], recheck_first_pair: bool) -> Result<Counts, Error> {
    let mut counts = Counts::default();
    if slots.len() < 2 {
        return Ok(counts);
    }
    for i in 0..slots.len() - 1 {
        let (head, tail) = slots.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail {
            counts.record(minimize(a, b)?);
        }
    }
    if recheck_first_pair {
        let (head, tail) = slots.split_at_mut(1);
        counts.record(minimize(&mut head[0], &mut tail[0])?);
    }
    Ok(counts)
}

/// Diagnostic data for a [`LocalSearch`] run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metadata {
    /// Number of full passes over the slot pairs.
    pub sweep_count: usize,
    /// Number of boxes moved into an empty slot.
    pub move_count: usize,
    /// Number of box exchanges between two occupied slots.
    pub swap_count: usize,
    /// Total displacement of the grid once the search stopped.
    pub displacement: f64,
}

/// # Pairwise local search
///
/// Greedy descent on the total displacement of a grid: for each pair of
/// slots, the boxes are exchanged (or a box is moved to the empty slot)
/// whenever that strictly decreases the displacement of the pair.  Full
/// passes over all pairs are repeated until one fails to decrease the total
/// displacement.
///
/// Each pass costs `O(M²)` for a grid of `M` slots.  The result is a local
/// minimum, not an optimal assignment.
///
/// # Example
///
/// ```rust
/// # fn main() -> Result<(), rank2d::Error> {
/// use rank2d::Grid;
/// use rank2d::Improve as _;
/// use rank2d::ItemBox;
/// use rank2d::Point2D;
///
/// let mut grid = Grid::new(1, 2);
/// grid.insert(ItemBox::new('a', Point2D::new(2.0, 0.5)))?;
///
/// let metadata = rank2d::LocalSearch::default().improve(&mut grid)?;
///
/// assert!(grid.slots()[0].is_empty());
/// assert_eq!(metadata.move_count, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalSearch {
    /// Stop after this many passes, even if the last one still lowered the
    /// displacement.  `None` runs until convergence.
    pub max_sweeps: Option<usize>,

    /// Visit the first pair of slots once more at the end of each pass.
    ///
    /// This does not change the fixed points of the search, but keeps the
    /// exact sequence of exchanges of the reference layouts.
    pub recheck_first_pair: bool,
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self {
            max_sweeps: None,
            recheck_first_pair: true,
        }
    }
}

impl<T> crate::Improve<T> for LocalSearch {
    type Metadata = Metadata;
    type Error = Error;

    fn improve(&mut self, grid: &mut Grid<T>) -> Result<Self::Metadata, Self::Error> {
        let span = tracing::info_span!("local_search", slots = grid.len());
        let _enter = span.enter();

        let mut counts = Counts::default();
        let mut sweep_count = 0;
        let mut prev = f64::INFINITY;
        let mut displacement = grid.displacement();
        tracing::debug!(displacement, "initial displacement");

        while displacement < prev {
            if self.max_sweeps.map_or(false, |max| sweep_count >= max) {
                tracing::debug!(sweep_count, "sweep limit reached");
                break;
            }
            prev = displacement;

            let sweep_counts = sweep(grid.slots_mut(), self.recheck_first_pair)?;
            counts.moves += sweep_counts.moves;
            counts.swaps += sweep_counts.swaps;
            sweep_count += 1;

            displacement = grid.displacement();
            tracing::debug!(
                sweep = sweep_count,
                moves = sweep_counts.moves,
                swaps = sweep_counts.swaps,
                displacement,
                "sweep done"
            );
        }

        let metadata = Metadata {
            sweep_count,
            move_count: counts.moves,
            swap_count: counts.swaps,
            displacement,
        };
        tracing::info!(?metadata, "local search converged");
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2D;
    use crate::slot::ItemBox;
    use crate::Improve as _;
    use proptest::prelude::*;

    fn slot_with(column: usize, row: usize, item: char, target: (f64, f64)) -> Slot<char> {
        let mut slot = Slot::new(column, row);
        slot.insert(ItemBox::new(item, Point2D::new(target.0, target.1)))
            .unwrap();
        slot
    }

    /// A grid whose boxes aim at the given targets, inserted in flat order.
    fn grid_of(rowcount: usize, colcount: usize, targets: &[(f64, f64)]) -> Grid<usize> {
        let mut grid = Grid::new(rowcount, colcount);
        for (i, (x, y)) in targets.iter().enumerate() {
            grid.insert(ItemBox::new(i, Point2D::new(*x, *y))).unwrap();
        }
        grid
    }

    fn items(grid: &Grid<usize>) -> Vec<Option<usize>> {
        grid.slots().iter().map(|s| s.get().map(|b| b.item)).collect()
    }

    #[test]
    fn test_minimize_both_empty() {
        let mut a: Slot<char> = Slot::new(0, 0);
        let mut b = Slot::new(1, 0);
        assert_eq!(minimize(&mut a, &mut b), Ok(Outcome::Kept));
        assert!(a.is_empty() && b.is_empty());
    }

    #[test]
    fn test_minimize_move() {
        let mut a = slot_with(0, 0, 'a', (1.5, 0.5));
        let mut b = Slot::new(1, 0);
        assert_eq!(minimize(&mut a, &mut b), Ok(Outcome::Moved));
        assert!(a.is_empty());
        assert_eq!(b.item(), Ok(&'a'));

        // Same thing with the empty slot first.
        let mut a = Slot::new(0, 0);
        let mut b = slot_with(1, 0, 'b', (0.5, 0.5));
        assert_eq!(minimize(&mut a, &mut b), Ok(Outcome::Moved));
        assert_eq!(a.item(), Ok(&'b'));
        assert!(b.is_empty());
    }

    #[test]
    fn test_minimize_swap() {
        let mut a = slot_with(0, 0, 'a', (1.5, 0.5));
        let mut b = slot_with(1, 0, 'b', (0.5, 0.5));
        assert_eq!(minimize(&mut a, &mut b), Ok(Outcome::Swapped));
        assert_eq!(a.item(), Ok(&'b'));
        assert_eq!(b.item(), Ok(&'a'));
    }

    #[test]
    fn test_minimize_ties_are_kept() {
        // Both boxes aim between the two slots: exchanging them is no better.
        let mut a = slot_with(0, 0, 'a', (1.0, 0.5));
        let mut b = slot_with(1, 0, 'b', (1.0, 0.5));
        assert_eq!(minimize(&mut a, &mut b), Ok(Outcome::Kept));
        assert_eq!(a.item(), Ok(&'a'));

        let mut a = slot_with(0, 0, 'a', (1.0, 0.5));
        let mut b = Slot::new(1, 0);
        assert_eq!(minimize(&mut a, &mut b), Ok(Outcome::Kept));
        assert_eq!(a.item(), Ok(&'a'));
    }

    #[test]
    fn test_sweep_small() {
        let mut empty: Vec<Slot<char>> = Vec::new();
        assert_eq!(sweep(&mut empty, true), Ok(Counts::default()));

        let mut single = vec![slot_with(0, 0, 'a', (4.0, 4.0))];
        assert_eq!(sweep(&mut single, true), Ok(Counts::default()));
    }

    #[test]
    fn test_reverse_row() {
        let mut grid = grid_of(1, 4, &[(3.5, 0.5), (2.5, 0.5), (1.5, 0.5), (0.5, 0.5)]);
        let metadata = LocalSearch::default().improve(&mut grid).unwrap();

        assert_eq!(items(&grid), [Some(3), Some(2), Some(1), Some(0)]);
        assert_eq!(metadata.displacement, 0.0);
        assert_eq!(metadata.move_count, 0);
        assert!(metadata.swap_count >= 2);
        // One pass to sort, one to notice nothing changes.
        assert_eq!(metadata.sweep_count, 2);
    }

    #[test]
    fn test_moves_to_empty_slots() {
        let mut grid = grid_of(2, 2, &[(1.5, 1.5)]);
        LocalSearch::default().improve(&mut grid).unwrap();
        assert_eq!(items(&grid), [None, None, None, Some(0)]);
        assert_eq!(grid.displacement(), 0.0);
    }

    #[test]
    fn test_empty_and_single() {
        let mut grid: Grid<usize> = Grid::new(0, 0);
        let metadata = LocalSearch::default().improve(&mut grid).unwrap();
        assert_eq!(metadata.sweep_count, 1);
        assert_eq!(metadata.displacement, 0.0);

        let mut grid = grid_of(1, 1, &[(3.0, 3.0)]);
        let before = grid.displacement();
        let metadata = LocalSearch::default().improve(&mut grid).unwrap();
        assert_eq!(metadata.displacement, before);
        assert_eq!(metadata.sweep_count, 1);
    }

    #[test]
    fn test_max_sweeps() {
        let targets = [(3.5, 0.5), (2.5, 0.5), (1.5, 0.5), (0.5, 0.5)];

        let mut grid = grid_of(1, 4, &targets);
        let before = grid.displacement();
        let metadata = LocalSearch {
            max_sweeps: Some(0),
            ..LocalSearch::default()
        }
        .improve(&mut grid)
        .unwrap();
        assert_eq!(metadata.sweep_count, 0);
        assert_eq!(metadata.displacement, before);
        assert_eq!(items(&grid), [Some(0), Some(1), Some(2), Some(3)]);

        let mut grid = grid_of(1, 4, &targets);
        let metadata = LocalSearch {
            max_sweeps: Some(1),
            ..LocalSearch::default()
        }
        .improve(&mut grid)
        .unwrap();
        assert_eq!(metadata.sweep_count, 1);
        assert_eq!(metadata.displacement, 0.0);
    }

    fn target_sets(max_len: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
        (0..max_len).prop_flat_map(|len| {
            let (rowcount, colcount) = crate::grid::shape(len);
            prop::collection::vec(
                (0.0..colcount.max(1) as f64, 0.0..rowcount.max(1) as f64),
                len,
            )
        })
    }

    proptest!(
        /// Passes never raise the total displacement.
        #[test]
        fn sweeps_are_monotonic(targets in target_sets(40)) {
            let (rowcount, colcount) = crate::grid::shape(targets.len());
            let mut grid = grid_of(rowcount, colcount, &targets);
            let mut prev = grid.displacement();
            loop {
                let counts = sweep(grid.slots_mut(), true).unwrap();
                let next = grid.displacement();
                if counts == Counts::default() {
                    prop_assert_eq!(next, prev);
                    break;
                }
                prop_assert!(next <= prev);
                prev = next;
            }
        }

        /// A converged grid stays put.
        #[test]
        fn improve_is_idempotent(targets in target_sets(40)) {
            let (rowcount, colcount) = crate::grid::shape(targets.len());
            let mut grid = grid_of(rowcount, colcount, &targets);
            let before = grid.displacement();

            let first = LocalSearch::default().improve(&mut grid).unwrap();
            prop_assert!(first.displacement <= before);
            let layout = items(&grid);

            let second = LocalSearch::default().improve(&mut grid).unwrap();
            prop_assert_eq!(second.displacement, first.displacement);
            prop_assert_eq!(second.sweep_count, 1);
            prop_assert_eq!(second.move_count + second.swap_count, 0);
            prop_assert_eq!(items(&grid), layout);
        }

        /// Boxes are moved around, never lost nor duplicated.
        #[test]
        fn improve_keeps_every_box(targets in target_sets(40)) {
            let (rowcount, colcount) = crate::grid::shape(targets.len());
            let mut grid = grid_of(rowcount, colcount, &targets);
            LocalSearch::default().improve(&mut grid).unwrap();

            let mut seen: Vec<usize> = items(&grid).into_iter().flatten().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..targets.len()).collect::<Vec<_>>());
        }
    );
}
