//! Raster to image conversion and PNG output.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use satmap::{Metadata, Raster};
use tracing::{debug, info};

use crate::colormap::{Color, Colormap};
use crate::error::{RenderError, RenderResult};

/// Smallest and largest finite values, or `None` when there are none.
pub fn value_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |range, &v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Draw a raster with `colormap`, scaled between its own minimum and maximum.
///
/// Row 0 (the northern edge) is the top of the image. Non-finite values are
/// transparent.
pub fn render_raster(raster: &Raster, colormap: Colormap) -> RenderResult<RgbaImage> {
    let (rows, cols) = raster.shape();
    if rows == 0 || cols == 0 {
        return Err(RenderError::EmptyRaster((rows, cols)));
    }

    let data = raster.data();
    let (min_val, max_val) = value_range(data.iter()).unwrap_or((0.0, 0.0));
    let range = max_val - min_val;
    let range = if range.abs() < f64::EPSILON { 1.0 } else { range };

    let mut img = RgbaImage::new(cols as u32, rows as u32);
    for ((row, col), &value) in data.indexed_iter() {
        let color = if value.is_finite() {
            colormap.color((value - min_val) / range)
        } else {
            Color::transparent()
        };
        img.put_pixel(col as u32, row as u32, Rgba(color.to_rgba()));
    }

    debug!(rows, cols, min_val, max_val, %colormap, "Rendered raster");
    Ok(img)
}

/// `<observatory>_<ins>_<YYYYMMDD>_<HHMMSS>_<label>.png`, where `<ins>` is
/// the first three letters of the instrument, lower-cased. The observatory
/// keeps its case.
pub fn output_file_name(metadata: &Metadata, label: &str) -> String {
    let instrument: String = metadata.instrument.to_lowercase().chars().take(3).collect();
    format!(
        "{}_{}_{}_{}_{}.png",
        metadata.observatory,
        instrument,
        metadata.date.replace('-', ""),
        metadata.time.replace(':', ""),
        label
    )
}

/// Render `raster` and write it as a PNG in `dir`, returning the file path.
pub fn save_png(raster: &Raster, dir: &Path, label: &str, colormap: Colormap) -> RenderResult<PathBuf> {
    let img = render_raster(raster, colormap)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(output_file_name(raster.metadata(), label));
    img.save_with_format(&path, ImageFormat::Png)?;
    info!(path = %path.display(), "Saved PNG");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_skips_nan() {
        let values = [f64::NAN, 3.0, -1.0, f64::INFINITY, 2.0];
        assert_eq!(value_range(values.iter()), Some((-1.0, 3.0)));
        assert_eq!(value_range([f64::NAN].iter()), None);
    }
}
