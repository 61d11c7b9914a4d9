//! Image rescaling used to bring two captures onto a common resolution.
//!
//! Output pixel centres are mapped back into the source grid
//! (`src = (dst + 0.5) * factor - 0.5`) and sampled bilinearly. Samples that
//! fall beyond the edge are mirrored about the edge pixel. When shrinking,
//! the source is first smoothed with a Gaussian of
//! `sigma = (factor - 1) / 2` per axis so that detail finer than the new
//! grid averages out instead of aliasing.

use ndarray::{Array2, Axis};
use tracing::debug;

use crate::transform::round_index;

/// Gaussian kernels are cut off at this many standard deviations.
const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Output shape for rescaling `shape` by `scale`.
///
/// Each axis is rounded half to even and never drops below one pixel.
pub fn rescaled_shape(shape: (usize, usize), scale: f64) -> (usize, usize) {
    let scale_axis = |n: usize| (round_index(n as f64 * scale) as usize).max(1);
    (scale_axis(shape.0), scale_axis(shape.1))
}

/// Rescale a grid by `scale` (> 1 enlarges, < 1 shrinks).
pub fn rescale(data: &Array2<f64>, scale: f64) -> Array2<f64> {
    let (rows, cols) = data.dim();
    if scale == 1.0 || rows == 0 || cols == 0 {
        return data.clone();
    }

    let (out_rows, out_cols) = rescaled_shape((rows, cols), scale);
    resize(data, out_rows, out_cols)
}

/// Resize a grid to exactly `out_rows` x `out_cols`.
pub fn resize(data: &Array2<f64>, out_rows: usize, out_cols: usize) -> Array2<f64> {
    let (rows, cols) = data.dim();
    if (rows, cols) == (out_rows, out_cols) {
        return data.clone();
    }

    let row_factor = rows as f64 / out_rows as f64;
    let col_factor = cols as f64 / out_cols as f64;

    debug!(
        from = ?(rows, cols),
        to = ?(out_rows, out_cols),
        row_factor,
        col_factor,
        "Resizing grid"
    );

    let source = anti_alias(data, row_factor, col_factor);

    Array2::from_shape_fn((out_rows, out_cols), |(r, c)| {
        let src_r = (r as f64 + 0.5) * row_factor - 0.5;
        let src_c = (c as f64 + 0.5) * col_factor - 0.5;
        bilinear_sample(&source, src_r, src_c)
    })
}

/// Smooth the source ahead of shrinking; enlarging axes are left alone.
fn anti_alias(data: &Array2<f64>, row_factor: f64, col_factor: f64) -> Array2<f64> {
    let row_sigma = ((row_factor - 1.0) / 2.0).max(0.0);
    let col_sigma = ((col_factor - 1.0) / 2.0).max(0.0);

    let mut smoothed = data.clone();
    if row_sigma > 0.0 {
        smoothed = gaussian_filter_axis(&smoothed, Axis(0), row_sigma);
    }
    if col_sigma > 0.0 {
        smoothed = gaussian_filter_axis(&smoothed, Axis(1), col_sigma);
    }
    smoothed
}

/// Normalised 1D Gaussian weights, centre at index `radius`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as i64;
    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x as f64 / sigma).powi(2)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

fn gaussian_filter_axis(data: &Array2<f64>, axis: Axis, sigma: f64) -> Array2<f64> {
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as i64;
    let mut output = data.clone();

    for (src_lane, mut dst_lane) in data.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        let n = src_lane.len();
        for i in 0..n {
            let mut acc = 0.0;
            for (k, w) in kernel.iter().enumerate() {
                let j = mirror_index(i as i64 + k as i64 - radius, n);
                acc += w * src_lane[j];
            }
            dst_lane[i] = acc;
        }
    }

    output
}

/// Whole-sample mirror about the edge pixels: `d c b | a b c d | c b a`.
fn mirror_index(i: i64, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as i64;
    let period = 2 * (n - 1);
    let mut i = i.rem_euclid(period);
    if i >= n {
        i = period - i;
    }
    i as usize
}

fn bilinear_sample(data: &Array2<f64>, row: f64, col: f64) -> f64 {
    let (rows, cols) = data.dim();

    let r0 = row.floor();
    let c0 = col.floor();
    let fr = row - r0;
    let fc = col - c0;

    let r0i = mirror_index(r0 as i64, rows);
    let r1i = mirror_index(r0 as i64 + 1, rows);
    let c0i = mirror_index(c0 as i64, cols);
    let c1i = mirror_index(c0 as i64 + 1, cols);

    let top = data[[r0i, c0i]] * (1.0 - fc) + data[[r0i, c1i]] * fc;
    let bottom = data[[r1i, c0i]] * (1.0 - fc) + data[[r1i, c1i]] * fc;
    top * (1.0 - fr) + bottom * fr
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rescaled_shape() {
        assert_eq!(rescaled_shape((10, 45), 1.0), (10, 45));
        assert_eq!(rescaled_shape((10, 20), 2.0), (20, 40));
        assert_eq!(rescaled_shape((10, 20), 0.5), (5, 10));
        // 2.5 rounds to 2, 7.5 rounds to 8
        assert_eq!(rescaled_shape((5, 15), 0.5), (2, 8));
        assert_eq!(rescaled_shape((1, 1), 0.1), (1, 1));
    }

    #[test]
    fn test_rescale_identity() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(rescale(&data, 1.0), data);
    }

    #[test]
    fn test_rescale_constant_stays_constant() {
        let data = Array2::from_elem((6, 9), 7.5);
        for scale in [0.5, 1.0 / 3.0, 2.0, 3.0] {
            let out = rescale(&data, scale);
            assert!(out.iter().all(|v| (v - 7.5).abs() < 1e-9), "scale {}", scale);
        }
    }

    #[test]
    fn test_upsample_by_two() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let out = rescale(&data, 2.0);
        assert_eq!(out.dim(), (4, 4));

        // Source (-0.25, -0.25) mirrors row/col -1 onto row/col 1.
        assert!((out[[0, 0]] - 1.75).abs() < 1e-12);
        assert!((out[[3, 3]] - 3.25).abs() < 1e-12);
        // Interior pixel at source (0.25, 0.25).
        let expected = 1.0 * 0.75 * 0.75 + 2.0 * 0.75 * 0.25 + 3.0 * 0.25 * 0.75 + 4.0 * 0.25 * 0.25;
        assert!((out[[1, 1]] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_downsample_preserves_mean_of_gradient() {
        let data = Array2::from_shape_fn((8, 8), |(r, c)| (r * 8 + c) as f64);
        let out = rescale(&data, 0.5);
        assert_eq!(out.dim(), (4, 4));
        let mean_in = data.mean().unwrap();
        let mean_out = out.mean().unwrap();
        assert!((mean_in - mean_out).abs() < 1.0);
    }

    #[test]
    fn test_mirror_index() {
        assert_eq!(mirror_index(-1, 4), 1);
        assert_eq!(mirror_index(-2, 4), 2);
        assert_eq!(mirror_index(4, 4), 2);
        assert_eq!(mirror_index(5, 4), 1);
        assert_eq!(mirror_index(3, 1), 0);
    }

    #[test]
    fn test_gaussian_kernel_is_normalised() {
        let kernel = gaussian_kernel(1.5);
        let total: f64 = kernel.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(kernel.len() % 2, 1);
    }
}
