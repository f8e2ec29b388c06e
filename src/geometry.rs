//! A few useful geometric types

use nalgebra::Vector2;
use rayon::prelude::*;

/// A position in continuous grid space, `x` being the column axis and `y`
/// the row axis.
pub type Point2D = Vector2<f64>;

/// The center of the cell at the given discrete coordinates.
pub fn cell_center(column: usize, row: usize) -> Point2D {
    Point2D::new(column as f64 + 0.5, row as f64 + 0.5)
}

/// Axis-aligned range of values covered by a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    p_min: Point2D,
    p_max: Point2D,
}

impl Bounds {
    pub fn p_min(&self) -> &Point2D {
        &self.p_min
    }

    pub fn p_max(&self) -> &Point2D {
        &self.p_max
    }

    /// Size of the range along each axis.
    pub fn extent(&self) -> Point2D {
        self.p_max - self.p_min
    }

    /// Compute the bounds of the given points.
    ///
    /// An empty set has degenerate bounds at the origin.
    pub fn from_points(points: &[Point2D]) -> Self {
        let first = match points.first() {
            Some(first) => *first,
            None => {
                return Self {
                    p_min: Point2D::zeros(),
                    p_max: Point2D::zeros(),
                }
            }
        };

        let (p_min, p_max) = points[1..]
            .par_iter()
            .fold_with((first, first), |(mins, maxs), p| {
                (mins.inf(p), maxs.sup(p))
            })
            .reduce_with(|(mins_left, maxs_left), (mins_right, maxs_right)| {
                (mins_left.inf(&mins_right), maxs_left.sup(&maxs_right))
            })
            .unwrap_or((first, first));

        Self { p_min, p_max }
    }
}
