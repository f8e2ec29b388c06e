use crate::algorithms::LocalSearch;
use crate::algorithms::LocalSearchMetadata;
use crate::geometry::Bounds;
use crate::geometry::Point2D;
use crate::grid::Grid;
use crate::slot::ItemBox;
use crate::target::TargetMapper;
use crate::Error;
use crate::Improve;
use num_traits::ToPrimitive;
use rayon::prelude::*;

/// An input record: two coordinates and a payload that is carried along
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Item<T, C = f64> {
    pub x: C,
    pub y: C,
    pub item: T,
}

impl<T, C> Item<T, C> {
    pub fn new(item: T, x: C, y: C) -> Self {
        Self { x, y, item }
    }
}

impl<T, C> Item<T, C>
where
    C: ToPrimitive,
{
    /// The coordinates as a point, if both are finite numbers.
    fn value(&self) -> Option<Point2D> {
        let finite = |v: &C| v.to_f64().filter(|f| f.is_finite());
        Some(Point2D::new(finite(&self.x)?, finite(&self.y)?))
    }
}

/// Rows of optional items, top row first.
pub type Table<'a, T, C = f64> = Vec<Vec<Option<&'a Item<T, C>>>>;

/// Items laid out on a grid by rank.
///
/// On construction, every item gets an ideal position in the grid from its
/// rank among all items on both axes: low `x` values towards the left
/// column, low `y` values towards the bottom row.  Items are then placed in
/// arbitrary cells, and [`RankGrid::optimize`] moves them as close as
/// possible to their ideal positions.
///
/// # Example
///
/// ```rust
/// # fn main() -> Result<(), rank2d::Error> {
/// use rank2d::Item;
/// use rank2d::RankGrid;
///
/// let mut grid = RankGrid::new([
///     Item::new("a", 3, 1),
///     Item::new("b", 1, 3),
///     Item::new("c", 2, 2),
///     Item::new("d", 1, 1),
/// ])?;
/// assert_eq!((grid.rowcount(), grid.colcount()), (2, 2));
///
/// let before = grid.displacement();
/// grid.optimize()?;
/// assert!(grid.displacement() <= before);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RankGrid<T, C = f64> {
    grid: Grid<Item<T, C>>,
    bounds: Bounds,
    mapper: TargetMapper,
}

impl<T, C> RankGrid<T, C>
where
    C: ToPrimitive,
{
    /// Lay out the given items, in input order, on a grid that fits them
    /// all.
    ///
    /// Fails with [`Error::InvalidInput`] if a coordinate is not a finite
    /// number.
    pub fn new(items: impl IntoIterator<Item = Item<T, C>>) -> Result<Self, Error> {
        let items: Vec<_> = items.into_iter().collect();

        let span = tracing::info_span!("rank_grid", items = items.len());
        let _enter = span.enter();

        let values = items
            .iter()
            .enumerate()
            .map(|(index, item)| item.value().ok_or(Error::InvalidInput { index }))
            .collect::<Result<Vec<_>, _>>()?;

        let bounds = Bounds::from_points(&values);
        let mut grid = Grid::with_capacity_for(items.len());
        let mapper = TargetMapper::new(&bounds, grid.colcount(), grid.rowcount());

        let targets: Vec<Point2D> = values.par_iter().map(|v| mapper.target(*v)).collect();
        for (item, target) in items.into_iter().zip(targets) {
            grid.insert(ItemBox::new(item, target))?;
        }

        tracing::info!(
            rowcount = grid.rowcount(),
            colcount = grid.colcount(),
            displacement = grid.displacement(),
            "initial placement"
        );

        Ok(Self {
            grid,
            bounds,
            mapper,
        })
    }
}

impl<T, C> RankGrid<T, C> {
    pub fn rowcount(&self) -> usize {
        self.grid.rowcount()
    }

    pub fn colcount(&self) -> usize {
        self.grid.colcount()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.grid.occupancy()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Range of the input values.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Mapping from input values to ideal grid positions.
    pub fn mapper(&self) -> &TargetMapper {
        &self.mapper
    }

    /// The underlying grid, row `0` being the bottom row.
    pub fn grid(&self) -> &Grid<Item<T, C>> {
        &self.grid
    }

    /// Sum of the distances between each item's cell and its ideal position.
    pub fn displacement(&self) -> f64 {
        self.grid.displacement()
    }

    /// Move items closer to their ideal positions with [`LocalSearch`],
    /// until no pass over the grid improves the layout.
    ///
    /// Calling this again on a converged grid changes nothing.
    pub fn optimize(&mut self) -> Result<LocalSearchMetadata, Error> {
        LocalSearch::default().improve(&mut self.grid)
    }

    /// Rearrange the items with the given algorithm.
    pub fn improve<A>(&mut self, algorithm: &mut A) -> Result<A::Metadata, A::Error>
    where
        A: Improve<Item<T, C>>,
    {
        algorithm.improve(&mut self.grid)
    }

    /// Export the layout, top row (highest `y` values) first.
    pub fn table(&self) -> Table<'_, T, C> {
        self.grid
            .rows()
            .rev()
            .map(|row| row.iter().map(|slot| slot.get().map(|b| &b.item)).collect())
            .collect()
    }

    /// Same as [`RankGrid::table`], but hands the items over.
    pub fn into_table(self) -> Vec<Vec<Option<Item<T, C>>>> {
        let mut rows = self.grid.into_rows();
        rows.reverse();
        rows.into_iter()
            .map(|row| row.into_iter().map(|b| b.map(|b| b.item)).collect())
            .collect()
    }
}
