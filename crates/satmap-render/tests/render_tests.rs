//! Rendering rasters to PNG files.

use ndarray::array;
use satmap::mosaic;
use satmap_render::{output_file_name, render_raster, save_png, Color, Colormap, RenderError};
use test_utils::{fixture_metadata, fixture_raster, raster_from_data, temp_test_dir};

#[test]
fn test_output_file_name() {
    let mut metadata = fixture_metadata("Manannan", "2022-12-05", (0.0, 1.0), (0.0, 1.0), 1.0);
    metadata.time = "19:45:10".to_string();
    assert_eq!(
        output_file_name(&metadata, "mosaic"),
        "Aigean_man_20221205_194510_mosaic.png"
    );
}

#[test]
fn test_short_instrument_name() {
    let metadata = fixture_metadata("Li", "2022-12-05", (0.0, 1.0), (0.0, 1.0), 1.0);
    assert_eq!(
        output_file_name(&metadata, "stitch"),
        "Aigean_li_20221205_191610_stitch.png"
    );
}

#[test]
fn test_grayscale_pixels() {
    let raster = raster_from_data(
        "Fand",
        "2022-12-05",
        (0.0, 10.0),
        (0.0, 10.0),
        5.0,
        array![[0.0, 10.0], [5.0, f64::NAN]],
    );
    let img = render_raster(&raster, Colormap::Grayscale).unwrap();

    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(0, 1).0, [128, 128, 128, 255]);
    assert_eq!(img.get_pixel(1, 1).0, Color::transparent().to_rgba());
}

#[test]
fn test_constant_raster() {
    let raster = raster_from_data(
        "Fand",
        "2022-12-05",
        (0.0, 10.0),
        (0.0, 10.0),
        5.0,
        array![[4.0, 4.0], [4.0, 4.0]],
    );
    let img = render_raster(&raster, Colormap::Viridis).unwrap();
    assert!(img.pixels().all(|p| p.0 == Colormap::Viridis.color(0.0).to_rgba()));
}

#[test]
fn test_empty_raster() {
    let raster = raster_from_data(
        "Fand",
        "2022-12-05",
        (0.0, 10.0),
        (0.0, 10.0),
        5.0,
        ndarray::Array2::zeros((0, 2)),
    );
    assert!(matches!(
        render_raster(&raster, Colormap::Viridis),
        Err(RenderError::EmptyRaster((0, 2)))
    ));
}

#[test]
fn test_save_mosaic_png() {
    let dir = temp_test_dir();
    let a = fixture_raster("Fand", "2022-12-05", (0.0, 50.0), (0.0, 50.0), 5.0);
    let b = fixture_raster("Lir", "2022-12-05", (50.0, 110.0), (0.0, 60.0), 30.0);
    let result = mosaic(&a, &b, None, true).unwrap();

    let out = dir.path().join("pngs");
    let path = save_png(&result, &out, "mosaic", Colormap::Viridis).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "Aigean_fan_20221205_191610_mosaic.png"
    );
    let decoded = image::open(&path).unwrap();
    assert_eq!(decoded.width() as usize, result.shape().1);
    assert_eq!(decoded.height() as usize, result.shape().0);
}
