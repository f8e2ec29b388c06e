use crate::grid::Grid;

mod local_search;

pub use local_search::LocalSearch;
pub use local_search::Metadata as LocalSearchMetadata;

/// The `Improve` trait allows for rearranging the contents of a grid.
///
/// Grid improving algorithms implement this trait.  They may move boxes
/// between slots freely, but must neither drop nor duplicate them.
pub trait Improve<T> {
    /// Diagnostic data returned for a specific run of the algorithm.
    type Metadata;

    /// Error details, should the algorithm fail to run.
    type Error;

    /// Rearrange the boxes of `grid` in place.
    fn improve(&mut self, grid: &mut Grid<T>) -> Result<Self::Metadata, Self::Error>;
}
