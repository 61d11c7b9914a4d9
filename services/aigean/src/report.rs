//! Text output for the `metadata` command.

use std::io::Write;

use satmap::Metadata;

/// The metadata lines printed for one file, each prefixed with `prefix`.
pub fn metadata_lines(metadata: &Metadata, prefix: &str) -> Vec<String> {
    vec![
        format!("{}archive: {}", prefix, metadata.archive),
        format!("{}observatory: {}", prefix, metadata.observatory),
        format!("{}instrument: {}", prefix, metadata.instrument),
        format!("{}obs_date: {} {}", prefix, metadata.date, metadata.time),
        format!("{}resolution: {}", prefix, metadata.resolution),
        format!(
            "{}xcoords: ({}, {})",
            prefix, metadata.xcoords.0, metadata.xcoords.1
        ),
        format!(
            "{}ycoords: ({}, {})",
            prefix, metadata.ycoords.0, metadata.ycoords.1
        ),
    ]
}

pub fn write_metadata(out: &mut impl Write, metadata: &Metadata, prefix: &str) -> std::io::Result<()> {
    for line in metadata_lines(metadata, prefix) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub fn write_failures(out: &mut impl Write, failed: &[String]) -> std::io::Result<()> {
    if failed.is_empty() {
        return Ok(());
    }
    writeln!(out, "These files failed while being processed")?;
    for name in failed {
        writeln!(out, " - {}", name)?;
    }
    Ok(())
}
