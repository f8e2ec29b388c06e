//! A library that lays out labeled 2D points on a compact grid, so that each
//! point's cell follows its rank among all points on both axes.
//!
//! # Crate Layout
//!
//! [`RankGrid`] is the entry point: it takes a list of [`Item`]s, sizes a
//! near-square [`Grid`] that fits them all, and places each item in a cell.
//! The placement is then refined by an [`Improve`] algorithm, by default
//! [`LocalSearch`], and read back with [`RankGrid::table`].
//!
//! # Example
//!
//! ```rust
//! # fn main() -> Result<(), rank2d::Error> {
//! use rank2d::Item;
//! use rank2d::RankGrid;
//!
//! let items = vec![
//!     Item::new("low", 1.0, 1.0),
//!     Item::new("high", 9.0, 9.0),
//!     Item::new("mixed", 9.0, 1.0),
//! ];
//!
//! let mut grid = RankGrid::new(items)?;
//! grid.optimize()?;
//!
//! // Highest rows come first.
//! let table = grid.table();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table[0][1].map(|item| item.item), Some("high"));
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    rust_2018_idioms
)]

mod algorithms;
mod geometry;
mod grid;
mod rank;
mod slot;
mod target;


pub use crate::algorithms::*;
pub use crate::geometry::{cell_center, Bounds, Point2D};
pub use crate::grid::{shape, Grid};
pub use crate::rank::{Item, RankGrid, Table};
pub use crate::slot::{ItemBox, Slot};
pub use crate::target::TargetMapper;

pub use nalgebra;
pub use num_traits;

use std::fmt;

/// Errors raised while building or rearranging a grid.
///
/// Apart from [`Error::InvalidInput`], these denote a broken internal
/// invariant and are never caused by valid input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A box was inserted in a slot that already holds one.
    OccupiedSlot { column: usize, row: usize },

    /// A box was requested from a slot that holds none.
    EmptySlot { column: usize, row: usize },

    /// No empty slot is left to place an item in.
    GridFull,

    /// The item at the given input index has a coordinate that is not a
    /// finite number.
    InvalidInput { index: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OccupiedSlot { column, row } => {
                write!(f, "inserting box in occupied slot ({column}, {row})")
            }
            Error::EmptySlot { column, row } => {
                write!(f, "removing non-existing box from slot ({column}, {row})")
            }
            Error::GridFull => write!(f, "no empty slot left in grid"),
            Error::InvalidInput { index } => {
                write!(f, "item #{index} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for Error {}
