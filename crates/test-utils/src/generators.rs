//! Test data generators for synthetic capture grids.
//!
//! These generators create predictable, verifiable patterns that can be
//! used across the test suite. Grids are `(rows, cols)` arrays.

use ndarray::Array2;

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row + 1`
///
/// The `+ 1` keeps every value non-zero, so a test grid never looks like
/// fill when checking mosaic gaps.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(5, 10);
/// assert_eq!(grid.dim(), (5, 10));
/// assert_eq!(grid[[0, 0]], 1.0);
/// assert_eq!(grid[[0, 1]], 1001.0);
/// assert_eq!(grid[[1, 0]], 2.0);
/// ```
pub fn create_test_grid(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(row, col)| (col * 1000 + row + 1) as f64)
}

/// Creates a grid with every cell set to `value`.
pub fn create_constant_grid(rows: usize, cols: usize, value: f64) -> Array2<f64> {
    Array2::from_elem((rows, cols), value)
}

/// Creates a grid of radiance-like readings between 500 and 700.
///
/// Values rise from the top-left corner to the bottom-right, similar to the
/// smooth gradients seen in real infrared captures.
pub fn create_radiance_grid(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(row, col)| {
        let y_factor = row as f64 / rows.max(1) as f64;
        let x_factor = col as f64 / cols.max(1) as f64;
        500.0 + x_factor * 100.0 + y_factor * 100.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_grid() {
        let grid = create_test_grid(3, 4);
        assert_eq!(grid.dim(), (3, 4));
        assert_eq!(grid[[2, 3]], 3003.0);
        assert!(grid.iter().all(|v| *v != 0.0));
    }

    #[test]
    fn test_create_radiance_grid_range() {
        let grid = create_radiance_grid(10, 45);
        assert!(grid.iter().all(|v| (500.0..=700.0).contains(v)));
    }

    #[test]
    fn test_create_constant_grid() {
        let grid = create_constant_grid(2, 2, 4.5);
        assert!(grid.iter().all(|v| *v == 4.5));
    }
}
