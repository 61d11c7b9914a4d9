//! Subcommand implementations.
//!
//! Each command writes its user-facing output to `out` so it can be checked
//! in tests; diagnostics go through `tracing`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use satmap::{difference, fold_mosaic, stitch, MosaicOptions, Raster};
use satmap_loaders::{open_raster, parse_capture_filename, LoaderConfig};
use satmap_render::{save_png, RenderConfig};
use tracing::{debug, info, warn};

use crate::report::{write_failures, write_metadata};

/// Load one archive file, with the path in any error.
pub fn load(path: &Path, config: &LoaderConfig) -> Result<Raster> {
    match path.to_str().map(parse_capture_filename) {
        Some(Ok(name)) => debug!(
            instrument = %name.instrument_code,
            date = %name.date,
            time = %name.time,
            kind = %name.kind,
            "Archive file name"
        ),
        _ => debug!(path = %path.display(), "File name does not follow the archive convention"),
    }

    open_raster(path, config).with_context(|| format!("failed to load {}", path.display()))
}

/// Print metadata for each file.
///
/// A single file is printed bare and a failure is an error. With several
/// files every line is prefixed with `<file>:` and failures are listed at the
/// end instead.
pub fn metadata(out: &mut impl Write, files: &[PathBuf], config: &LoaderConfig) -> Result<()> {
    if let [file] = files {
        let raster = load(file, config)?;
        write_metadata(out, raster.metadata(), "")?;
        return Ok(());
    }

    let mut failed = Vec::new();
    for file in files {
        match load(file, config) {
            Ok(raster) => {
                let prefix = format!("{}:", file.display());
                write_metadata(out, raster.metadata(), &prefix)?;
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Skipping file");
                failed.push(file.display().to_string());
            }
        }
    }
    write_failures(out, &failed)?;
    Ok(())
}

/// Mosaic two or more files and save the result, printing the PNG name.
pub fn mosaic(
    out: &mut impl Write,
    files: &[PathBuf],
    options: MosaicOptions,
    loader: &LoaderConfig,
    render: &RenderConfig,
) -> Result<PathBuf> {
    if files.len() < 2 {
        bail!("mosaic needs at least 2 files, got {}", files.len());
    }

    let rasters = files
        .iter()
        .map(|file| load(file, loader))
        .collect::<Result<Vec<_>>>()?;
    let result = fold_mosaic(&rasters, options)?;
    save(out, &result, "mosaic", render)
}

/// Stitch two same-resolution files and save the result.
pub fn stitch_files(
    out: &mut impl Write,
    a: &Path,
    b: &Path,
    loader: &LoaderConfig,
    render: &RenderConfig,
) -> Result<PathBuf> {
    let result = stitch(&load(a, loader)?, &load(b, loader)?)?;
    save(out, &result, "stitch", render)
}

/// Subtract `b` from `a` over their overlap and save the result.
pub fn difference_files(
    out: &mut impl Write,
    a: &Path,
    b: &Path,
    loader: &LoaderConfig,
    render: &RenderConfig,
) -> Result<PathBuf> {
    let result = difference(&load(a, loader)?, &load(b, loader)?)?;
    save(out, &result, "difference", render)
}

fn save(out: &mut impl Write, raster: &Raster, label: &str, render: &RenderConfig) -> Result<PathBuf> {
    let path = save_png(raster, &render.output_dir, label, render.colormap)
        .with_context(|| format!("failed to save {} image", label))?;
    info!(
        shape = ?raster.shape(),
        xcoords = ?raster.metadata().xcoords,
        ycoords = ?raster.metadata().ycoords,
        "Saved {}",
        label
    );

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    writeln!(out, "{}", name)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use satmap::SatmapError;
    use test_utils::{fixture_raster, temp_test_dir, write_zip_capture};

    struct Workspace {
        dir: tempfile::TempDir,
        render: RenderConfig,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = temp_test_dir();
            let render = RenderConfig {
                output_dir: dir.path().join("out"),
                ..RenderConfig::default()
            };
            Self { dir, render }
        }

        fn capture(&self, name: &str, raster: &Raster) -> PathBuf {
            write_zip_capture(self.dir.path(), name, raster)
        }
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_metadata_single_file() {
        let ws = Workspace::new();
        let file = ws.capture(
            "aigean_fan_20221205_191610.zip",
            &fixture_raster("Fand", "2022-12-05", (75.0, 300.0), (450.0, 500.0), 5.0),
        );

        let mut out = Vec::new();
        metadata(&mut out, &[file], &LoaderConfig::default()).unwrap();
        let text = output(out);
        assert!(text.starts_with("archive: ISA\nobservatory: Aigean\ninstrument: Fand\n"));
        assert!(text.contains("xcoords: (75, 300)\n"));
    }

    #[test]
    fn test_metadata_single_missing_file_fails() {
        let ws = Workspace::new();
        let mut out = Vec::new();
        let err = metadata(&mut out, &[ws.dir.path().join("absent.zip")], &LoaderConfig::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("absent.zip"));
    }

    #[test]
    fn test_metadata_several_files_lists_failures() {
        let ws = Workspace::new();
        let good = ws.capture(
            "aigean_lir_20221205_191610.zip",
            &fixture_raster("Lir", "2022-12-05", (500.0, 1100.0), (200.0, 500.0), 30.0),
        );
        let bad = ws.dir.path().join("notes.txt");
        std::fs::write(&bad, "not a capture").unwrap();

        let mut out = Vec::new();
        metadata(&mut out, &[good.clone(), bad.clone()], &LoaderConfig::default()).unwrap();
        let text = output(out);

        assert!(text.contains(&format!("{}:instrument: Lir\n", good.display())));
        assert!(text.ends_with(&format!(
            "These files failed while being processed\n - {}\n",
            bad.display()
        )));
    }

    #[test]
    fn test_mosaic_needs_two_files() {
        let ws = Workspace::new();
        let only = ws.capture(
            "aigean_fan_20221205_191610.zip",
            &fixture_raster("Fand", "2022-12-05", (0.0, 50.0), (0.0, 50.0), 5.0),
        );
        let mut out = Vec::new();
        let result = mosaic(
            &mut out,
            &[only],
            MosaicOptions::default(),
            &LoaderConfig::default(),
            &ws.render,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_mosaic_three_files() {
        let ws = Workspace::new();
        let files = vec![
            ws.capture(
                "aigean_fan_20221205_191610.zip",
                &fixture_raster("Fand", "2022-12-05", (0.0, 50.0), (0.0, 50.0), 5.0),
            ),
            ws.capture(
                "aigean_fan_20221205_192210.zip",
                &fixture_raster("Fand", "2022-12-05", (50.0, 100.0), (0.0, 50.0), 5.0),
            ),
            ws.capture(
                "aigean_lir_20221205_191610.zip",
                &fixture_raster("Lir", "2022-12-05", (100.0, 160.0), (0.0, 60.0), 30.0),
            ),
        ];

        let mut out = Vec::new();
        let path = mosaic(
            &mut out,
            &files,
            MosaicOptions::default(),
            &LoaderConfig::default(),
            &ws.render,
        )
        .unwrap();

        assert!(path.exists());
        assert_eq!(output(out), "Aigean_fan_20221205_191610_mosaic.png\n");
    }

    #[test]
    fn test_stitch_files() {
        let ws = Workspace::new();
        let a = ws.capture(
            "a.zip",
            &fixture_raster("Fand", "2022-12-05", (0.0, 50.0), (0.0, 50.0), 5.0),
        );
        let b = ws.capture(
            "b.zip",
            &fixture_raster("Fand", "2022-12-05", (25.0, 75.0), (25.0, 75.0), 5.0),
        );

        let mut out = Vec::new();
        let path = stitch_files(&mut out, &a, &b, &LoaderConfig::default(), &ws.render).unwrap();
        assert!(path.ends_with("Aigean_fan_20221205_191610_stitch.png"));
    }

    #[test]
    fn test_difference_same_capture_fails() {
        let ws = Workspace::new();
        let a = ws.capture(
            "a.zip",
            &fixture_raster("Fand", "2022-12-05", (0.0, 50.0), (0.0, 50.0), 5.0),
        );
        let b = ws.capture(
            "b.zip",
            &fixture_raster("Fand", "2022-12-05", (25.0, 75.0), (25.0, 75.0), 5.0),
        );

        let mut out = Vec::new();
        let err = difference_files(&mut out, &a, &b, &LoaderConfig::default(), &ws.render)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SatmapError>(),
            Some(SatmapError::SameCapture { .. })
        ));
    }

    #[test]
    fn test_difference_files() {
        let ws = Workspace::new();
        let a = ws.capture(
            "a.zip",
            &fixture_raster("Fand", "2022-12-05", (0.0, 50.0), (0.0, 50.0), 5.0),
        );
        let b = ws.capture(
            "b.zip",
            &fixture_raster("Fand", "2022-12-06", (25.0, 75.0), (25.0, 75.0), 5.0),
        );

        let mut out = Vec::new();
        let path = difference_files(&mut out, &a, &b, &LoaderConfig::default(), &ws.render).unwrap();
        assert_eq!(output(out), "Aigean_fan_20221205_191610_difference.png\n");
        assert!(path.exists());
    }
}
