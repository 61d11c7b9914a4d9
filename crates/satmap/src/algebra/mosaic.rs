//! Resolution-normalised stitching, with optional gap-free cropping.

use ndarray::{s, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stitch::stitch_within;
use crate::error::{SatmapError, SatmapResult};
use crate::raster::Raster;
use crate::resample::rescale;

/// Options for [`mosaic_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicOptions {
    /// Target resolution; defaults to the finer of the two operands.
    pub resolution: Option<u32>,
    /// Keep zero-filled gaps. When false, the data is cropped to the largest
    /// gap-free candidate.
    pub padding: bool,
}

impl Default for MosaicOptions {
    fn default() -> Self {
        Self {
            resolution: None,
            padding: true,
        }
    }
}

/// Parse a target resolution: a positive integer.
pub fn parse_resolution(value: &str) -> SatmapResult<u32> {
    let resolution: u32 = value.trim().parse().map_err(|_| {
        SatmapError::InvalidResolution(format!("'{}' is not a positive integer", value))
    })?;
    if resolution == 0 {
        return Err(SatmapError::InvalidResolution(
            "resolution must be greater than 0".to_string(),
        ));
    }
    Ok(resolution)
}

/// Parse a padding flag: `true` or `false`.
pub fn parse_padding(value: &str) -> SatmapResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(SatmapError::InvalidPaddingType(format!(
            "'{}' is not a boolean",
            value
        ))),
    }
}

/// Rescale both rasters to a common resolution and stitch them.
///
/// See [`mosaic_with`].
pub fn mosaic(a: &Raster, b: &Raster, resolution: Option<u32>, padding: bool) -> SatmapResult<Raster> {
    mosaic_with(a, b, MosaicOptions { resolution, padding })
}

/// Rescale both rasters to a common resolution and stitch them.
///
/// Each array is rescaled by `own_resolution / target` and keeps its ground
/// footprint. With padding the stitched result is returned as is. Without
/// padding the data is replaced by the largest of four gap-free candidates:
/// `a` rescaled, `b` rescaled, the mosaic rows holding no zero, and the
/// mosaic columns holding no zero (ties go to the earlier one). The metadata
/// stays that of the padded mosaic, so its footprint then describes the
/// padded extent rather than the cropped data.
pub fn mosaic_with(a: &Raster, b: &Raster, options: MosaicOptions) -> SatmapResult<Raster> {
    let target = match options.resolution {
        Some(0) => {
            return Err(SatmapError::InvalidResolution(
                "resolution must be greater than 0".to_string(),
            ))
        }
        Some(resolution) => resolution as f64,
        None => a.resolution().min(b.resolution()),
    };

    let a = resample_to(a, target)?;
    let b = resample_to(b, target)?;
    let padded = stitch_within(&a, &b, 1)?;

    if options.padding {
        return Ok(padded);
    }

    let cropped = largest_gap_free(&padded, &a, &b);
    debug!(
        padded = ?padded.shape(),
        cropped = ?cropped.dim(),
        "Cropped mosaic to gap-free data"
    );
    Raster::from_parts(padded.metadata().clone(), cropped)
}

/// Mosaic any number of rasters by folding pairwise from the left.
///
/// Intermediate mosaics keep their padding so each one's data still spans its
/// footprint; `options.padding` applies to the last step only.
pub fn fold_mosaic(rasters: &[Raster], options: MosaicOptions) -> SatmapResult<Raster> {
    let (first, rest) = rasters
        .split_first()
        .ok_or_else(|| SatmapError::TypeMismatch("mosaic needs at least one raster".to_string()))?;

    let padded = MosaicOptions {
        padding: true,
        ..options
    };
    let mut result = first.clone();
    for (i, raster) in rest.iter().enumerate() {
        let step = if i + 1 == rest.len() { options } else { padded };
        result = mosaic_with(&result, raster, step)?;
    }

    info!(
        count = rasters.len(),
        shape = ?result.shape(),
        resolution = result.resolution(),
        "Built mosaic"
    );
    Ok(result)
}

/// Rebuild `raster` on a `target` resolution grid over the same footprint.
fn resample_to(raster: &Raster, target: f64) -> SatmapResult<Raster> {
    let scale = raster.resolution() / target;
    let data = rescale(raster.data(), scale);
    let footprint = raster.footprint().with_resolution(target);
    debug!(
        from = raster.resolution(),
        to = target,
        scale,
        shape = ?data.dim(),
        "Resampled raster"
    );
    Raster::from_parts(raster.metadata().with_footprint(&footprint), data)
}

/// Largest-area candidate among `a`, `b`, full rows and full columns.
fn largest_gap_free(mosaic: &Raster, a: &Raster, b: &Raster) -> Array2<f64> {
    let data = mosaic.data();
    let bound = data.dim();

    let full_rows: Vec<usize> = data
        .axis_iter(Axis(0))
        .enumerate()
        .filter(|(_, row)| row.iter().all(|v| *v != 0.0))
        .map(|(i, _)| i)
        .collect();
    let full_cols: Vec<usize> = data
        .axis_iter(Axis(1))
        .enumerate()
        .filter(|(_, col)| col.iter().all(|v| *v != 0.0))
        .map(|(i, _)| i)
        .collect();

    let candidates = [
        crop_to(a.data(), bound),
        crop_to(b.data(), bound),
        select_lines(data, Axis(0), &full_rows),
        select_lines(data, Axis(1), &full_cols),
    ];

    let mut best = 0;
    for (i, candidate) in candidates.iter().enumerate() {
        if candidate.len() > candidates[best].len() {
            best = i;
        }
    }

    let [from_a, from_b, rows, cols] = candidates;
    match best {
        0 => from_a,
        1 => from_b,
        2 => rows,
        _ => cols,
    }
}

/// The rows (or columns) at `indices`, in order.
fn select_lines(data: &Array2<f64>, axis: Axis, indices: &[usize]) -> Array2<f64> {
    if indices.is_empty() {
        let mut shape = data.dim();
        match axis.index() {
            0 => shape.0 = 0,
            _ => shape.1 = 0,
        }
        return Array2::zeros(shape);
    }
    data.select(axis, indices)
}

/// `data` trimmed so it never exceeds `bound` on either axis.
fn crop_to(data: &Array2<f64>, bound: (usize, usize)) -> Array2<f64> {
    let (rows, cols) = data.dim();
    data.slice(s![..rows.min(bound.0), ..cols.min(bound.1)])
        .to_owned()
}
