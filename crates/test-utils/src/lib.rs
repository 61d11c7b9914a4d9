//! Test support for the aigean workspace: float assertions, synthetic grids,
//! raster fixtures and on-disk archive captures.
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixture_raster, footprint};
//!
//! let (x, y, res) = footprint::FAND_191610;
//! let raster = fixture_raster("Fand", "2022-12-05", x, y, res);
//! ```

pub mod archives;
pub mod fixtures;
pub mod generators;
pub mod paths;

pub use archives::*;
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve a capture with [`find_test_file`], or return from the test early
/// when it is not available.
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: capture '{}' not found (set TEST_DATA_DIR to run)",
                    $name
                );
                return;
            }
        }
    }};
}

/// Assert two numbers are within `epsilon` of each other.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        assert!(
            (left - right).abs() <= epsilon,
            "assertion failed: {} ≈ {} (diff {} > {})",
            left,
            right,
            (left - right).abs(),
            epsilon
        );
    }};
}

/// Assert two `(x, y)` pairs are within `epsilon` on both axes.
#[macro_export]
macro_rules! assert_coords_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (lx, ly) = $left;
        let (rx, ry) = $right;
        $crate::assert_approx_eq!(lx, rx, $epsilon);
        $crate::assert_approx_eq!(ly, ry, $epsilon);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(187.5001, 187.5, 0.001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_coords_approx_eq() {
        let centre = (1237.5, 475.0);
        assert_coords_approx_eq!(centre, (1237.5001, 474.9999), 0.001);
    }
}
