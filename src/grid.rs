use crate::slot::ItemBox;
use crate::slot::Slot;
use crate::Error;

/// A rectangular arrangement of slots.
///
/// Slots are stored row after row, row `0` first, each row going from
/// column `0` upwards.  This order is called "flat" order.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    rowcount: usize,
    colcount: usize,
    slots: Vec<Slot<T>>,
}

/// Compute `(rowcount, colcount)` of the near-square grid that fits `n`
/// items.
///
/// The grid has at least as many rows as columns, and only its last row may
/// be partially used.
pub fn shape(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let avgsize = f64::sqrt(n as f64);
    let rowcount = f64::ceil(n as f64 / avgsize) as usize;
    let colcount = n.div_ceil(rowcount);
    (rowcount, colcount)
}

impl<T> Grid<T> {
    /// A grid of empty slots.
    pub fn new(rowcount: usize, colcount: usize) -> Self {
        let slots = (0..rowcount)
            .flat_map(|row| (0..colcount).map(move |column| Slot::new(column, row)))
            .collect();
        Self {
            rowcount,
            colcount,
            slots,
        }
    }

    /// A grid of empty slots sized to fit `n` items, see [`shape`].
    pub fn with_capacity_for(n: usize) -> Self {
        let (rowcount, colcount) = shape(n);
        Self::new(rowcount, colcount)
    }

    pub fn rowcount(&self) -> usize {
        self.rowcount
    }

    pub fn colcount(&self) -> usize {
        self.colcount
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots, in flat order.
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    /// All slots, in flat order.
    pub fn slots_mut(&mut self) -> &mut [Slot<T>] {
        &mut self.slots
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Slot<T>> {
        if column >= self.colcount || row >= self.rowcount {
            return None;
        }
        self.slots.get(self.index_of(column, row))
    }

    /// Rows of slots, row `0` first.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Slot<T>]> + ExactSizeIterator {
        // chunks() panics on a zero chunk size.
        self.slots.chunks(self.colcount.max(1))
    }

    /// Put `b` in the first empty slot, in flat order.
    pub fn insert(&mut self, b: ItemBox<T>) -> Result<(), Error> {
        self.slots
            .iter_mut()
            .find(|slot| slot.is_empty())
            .ok_or(Error::GridFull)?
            .insert(b)
    }

    /// Number of non-empty slots.
    pub fn occupancy(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    /// Sum of the displacement of every slot.
    ///
    /// Always summed in flat order, so that equal layouts give equal sums.
    pub fn displacement(&self) -> f64 {
        self.slots
            .iter()
            .map(Slot::displacement)
            .fold(0.0, |sum, d| sum + d)
    }

    /// Consume the grid and return its rows of boxes, row `0` first.
    pub fn into_rows(self) -> Vec<Vec<Option<ItemBox<T>>>> {
        let colcount = self.colcount;
        let mut rows = Vec::with_capacity(self.rowcount);
        let mut slots = self.slots.into_iter().map(Slot::into_content);
        for _ in 0..self.rowcount {
            rows.push(slots.by_ref().take(colcount).collect());
        }
        rows
    }

    fn index_of(&self, column: usize, row: usize) -> usize {
        column + self.colcount * row
    }
}
