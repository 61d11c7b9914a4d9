//! The raster entity: a footprint-tagged 2D array.

use ndarray::{Array2, ArrayD, Ix2};

use crate::error::{SatmapError, SatmapResult};
use crate::footprint::Footprint;
use crate::metadata::Metadata;

/// A validated capture: metadata plus a 2D array of readings.
///
/// Row 0 is the northern (max Y) edge; column 0 is the western (min X) edge.
/// Construction checks every invariant up front, and nothing here hands out
/// mutable access, so a `Raster` can be shared across threads freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    metadata: Metadata,
    footprint: Footprint,
    data: Array2<f64>,
    shape: (usize, usize),
}

impl Raster {
    /// Build a raster, checking the metadata footprint and that `data`
    /// has exactly `shape`.
    pub fn new(metadata: Metadata, data: Array2<f64>, shape: (usize, usize)) -> SatmapResult<Self> {
        let footprint = metadata.footprint()?;

        if data.dim() != shape {
            return Err(SatmapError::ShapeMismatch {
                expected: shape,
                actual: data.dim(),
            });
        }

        Ok(Self {
            metadata,
            footprint,
            data,
            shape,
        })
    }

    /// Build a raster from an array of unknown dimensionality.
    ///
    /// Loaders hand over whatever the container held; anything other than a
    /// two-dimensional array is a `TypeMismatch`.
    pub fn from_dyn(metadata: Metadata, data: ArrayD<f64>, shape: (usize, usize)) -> SatmapResult<Self> {
        let ndim = data.ndim();
        let data = data.into_dimensionality::<Ix2>().map_err(|_| {
            SatmapError::TypeMismatch(format!("data must be a 2D array, got {} dimensions", ndim))
        })?;
        Self::new(metadata, data, shape)
    }

    /// Build a raster whose shape is taken from the array itself.
    pub fn from_parts(metadata: Metadata, data: Array2<f64>) -> SatmapResult<Self> {
        let shape = data.dim();
        Self::new(metadata, data, shape)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn resolution(&self) -> f64 {
        self.footprint.resolution
    }

    /// Ground extent `(maxX - minX, maxY - minY)`, recomputed from the footprint.
    pub fn field_of_view(&self) -> (f64, f64) {
        self.footprint.field_of_view()
    }

    /// Ground centre, recomputed from the footprint.
    pub fn centre(&self) -> (f64, f64) {
        self.footprint.centre()
    }

    /// Consume the raster, returning its parts.
    pub fn into_parts(self) -> (Metadata, Array2<f64>) {
        (self.metadata, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, IxDyn};

    fn meta() -> Metadata {
        Metadata {
            instrument: "Fand".to_string(),
            observatory: "Aigean".to_string(),
            resolution: 5.0,
            time: "19:16:10".to_string(),
            date: "2022-12-05".to_string(),
            xcoords: (0.0, 10.0),
            ycoords: (0.0, 10.0),
            archive: "ISA".to_string(),
        }
    }

    #[test]
    fn test_new_accepts_matching_shape() {
        let raster = Raster::new(meta(), array![[1.0, 2.0], [3.0, 4.0]], (2, 2)).unwrap();
        assert_eq!(raster.shape(), (2, 2));
        assert_eq!(raster.field_of_view(), (10.0, 10.0));
        assert_eq!(raster.centre(), (5.0, 5.0));
    }

    #[test]
    fn test_new_rejects_overridden_shape() {
        let err = Raster::new(meta(), array![[1.0, 2.0], [3.0, 4.0]], (3, 2)).unwrap_err();
        assert_eq!(
            err,
            SatmapError::ShapeMismatch {
                expected: (3, 2),
                actual: (2, 2)
            }
        );
    }

    #[test]
    fn test_new_rejects_bad_footprint() {
        let mut bad = meta();
        bad.xcoords = (10.0, 0.0);
        let err = Raster::from_parts(bad, Array2::zeros((2, 2))).unwrap_err();
        assert!(matches!(err, SatmapError::InvalidFootprint(_)));
    }

    #[test]
    fn test_from_dyn_rejects_non_2d() {
        let flat = ArrayD::<f64>::zeros(IxDyn(&[4]));
        let err = Raster::from_dyn(meta(), flat, (2, 2)).unwrap_err();
        assert!(matches!(err, SatmapError::TypeMismatch(_)));

        let cube = ArrayD::<f64>::zeros(IxDyn(&[2, 2, 1]));
        assert!(Raster::from_dyn(meta(), cube, (2, 2)).is_err());
    }

    #[test]
    fn test_from_dyn_accepts_2d() {
        let grid = ArrayD::<f64>::zeros(IxDyn(&[2, 2]));
        let raster = Raster::from_dyn(meta(), grid, (2, 2)).unwrap();
        assert_eq!(raster.data().dim(), (2, 2));
    }
}
