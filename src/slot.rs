use crate::geometry::cell_center;
use crate::geometry::Point2D;
use crate::Error;
use std::mem;

/// An item bound to the continuous position it would ideally occupy.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemBox<T> {
    pub item: T,
    pub target: Point2D,
}

impl<T> ItemBox<T> {
    pub fn new(item: T, target: Point2D) -> Self {
        Self { item, target }
    }
}

/// A cell of the grid, holding at most one box.
#[derive(Clone, Debug)]
pub struct Slot<T> {
    column: usize,
    row: usize,
    content: Option<ItemBox<T>>,
}

impl<T> Slot<T> {
    /// An empty slot at the given discrete coordinates.
    pub fn new(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            content: None,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Center of the cell in continuous grid space.
    pub fn center(&self) -> Point2D {
        cell_center(self.column, self.row)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    /// The box held by this slot, if any.
    pub fn get(&self) -> Option<&ItemBox<T>> {
        self.content.as_ref()
    }

    /// Put a box in this slot.
    ///
    /// Fails if the slot already holds one, in which case `b` is dropped.
    pub fn insert(&mut self, b: ItemBox<T>) -> Result<(), Error> {
        if !self.is_empty() {
            return Err(Error::OccupiedSlot {
                column: self.column,
                row: self.row,
            });
        }
        self.content = Some(b);
        Ok(())
    }

    /// Take the box out of this slot.
    pub fn eject(&mut self) -> Result<ItemBox<T>, Error> {
        self.content.take().ok_or(Error::EmptySlot {
            column: self.column,
            row: self.row,
        })
    }

    /// Exchange contents with `other`, empty or not.
    pub fn swap(&mut self, other: &mut Slot<T>) {
        mem::swap(&mut self.content, &mut other.content);
    }

    /// The item held by this slot.
    pub fn item(&self) -> Result<&T, Error> {
        self.held().map(|b| &b.item)
    }

    /// The ideal position of the item held by this slot.
    pub fn target(&self) -> Result<Point2D, Error> {
        self.held().map(|b| b.target)
    }

    /// Distance between the cell center and the target of its box, zero if
    /// the slot is empty.
    pub fn displacement(&self) -> f64 {
        match &self.content {
            Some(b) => self.displacement_to(b.target),
            None => 0.0,
        }
    }

    /// Distance between the cell center and `target`, as if a box aiming at
    /// `target` was held here.
    pub fn displacement_to(&self, target: Point2D) -> f64 {
        (self.center() - target).norm()
    }

    pub(crate) fn into_content(self) -> Option<ItemBox<T>> {
        self.content
    }

    fn held(&self) -> Result<&ItemBox<T>, Error> {
        self.content.as_ref().ok_or(Error::EmptySlot {
            column: self.column,
            row: self.row,
        })
    }
}
