use crate::geometry::Bounds;
use crate::geometry::Point2D;

/// Spans are widened by this factor so that the largest value lands just
/// before the far edge of the grid instead of on it.
const SPAN_INFLATION: f64 = 1.001;

/// Maps raw values onto continuous grid space.
///
/// The value range of the whole data set is stretched over the grid, so
/// that the smallest value of each axis maps to `0` and the largest to just
/// below the column (or row) count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetMapper {
    origin: Point2D,
    cell_size: Point2D,
}

impl TargetMapper {
    pub fn new(bounds: &Bounds, colcount: usize, rowcount: usize) -> Self {
        let extent = bounds.extent() * SPAN_INFLATION;
        Self {
            origin: *bounds.p_min(),
            cell_size: Point2D::new(extent.x / colcount as f64, extent.y / rowcount as f64),
        }
    }

    /// Ideal position of a value.
    ///
    /// Axes along which all values are equal map to the center of the
    /// first cell.
    pub fn target(&self, value: Point2D) -> Point2D {
        let map = |v: f64, origin: f64, size: f64| {
            if size == 0.0 {
                0.5
            } else {
                (v - origin) / size
            }
        };
        Point2D::new(
            map(value.x, self.origin.x, self.cell_size.x),
            map(value.y, self.origin.y, self.cell_size.y),
        )
    }
}
