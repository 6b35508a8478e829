//! Genome-browser track output.
//!
//! - [`tracks`]: fixed-step WIG tracks, one file per per-base metric
//! - [`bed`]: one BED file of issue intervals
//!
//! Every file is written to a temporary sibling first and renamed into place
//! once complete, so a failed export never leaves a truncated track behind.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::core::config::RunConfiguration;
use crate::core::region::{GenomeRegion, RegionMap};

pub mod bed;
pub mod tracks;

pub use bed::AnnotationExporter;
pub use tracks::{TrackExporter, TrackSpec};

/// File name and display name of the issue annotation track
pub const ANNOTATION_FILE: &str = "Pilon.bed";
pub const ANNOTATION_NAME: &str = "Pilon";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where output files go: `<dir>/<prefix><name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub dir: PathBuf,
    pub prefix: String,
}

impl OutputLocation {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{name}", self.prefix))
    }
}

impl From<&RunConfiguration> for OutputLocation {
    fn from(config: &RunConfiguration) -> Self {
        Self::new(&config.output_dir, &config.output_prefix)
    }
}

/// Write the issue BED file followed by every standard WIG track.
///
/// Stops at the first failure; files already written are kept.
///
/// # Errors
///
/// Returns `ExportError::Write` naming the file that could not be written.
pub fn write_all_tracks<R: GenomeRegion>(
    regions: &RegionMap<R>,
    output: &OutputLocation,
) -> Result<Vec<PathBuf>, ExportError> {
    let bed = AnnotationExporter::new(regions, output)
        .write_annotations(ANNOTATION_FILE, ANNOTATION_NAME)?;

    let mut written = vec![bed];
    written.extend(TrackExporter::new(regions, output).write_standard_tracks()?);
    Ok(written)
}

/// Write `path` through a temporary file in the same directory.
///
/// The temporary file is removed if `body` or the final rename fails.
pub(crate) fn write_atomically<F>(path: &Path, body: F) -> Result<PathBuf, ExportError>
where
    F: FnOnce(&mut BufWriter<NamedTempFile>) -> std::io::Result<()>,
{
    let wrap = |source: std::io::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(wrap)?;

    let temp = tempfile::Builder::new()
        .prefix(".pilon-tracks-")
        .tempfile_in(dir)
        .map_err(wrap)?;
    set_readable(temp.as_file()).map_err(wrap)?;

    let mut writer = BufWriter::new(temp);
    body(&mut writer).map_err(wrap)?;
    let temp = writer.into_inner().map_err(|e| wrap(e.into_error()))?;
    temp.persist(path).map_err(|e| wrap(e.error))?;

    Ok(path.to_path_buf())
}

/// Temporary files are created owner-only; tracks are ordinary output files
#[cfg(unix)]
fn set_readable(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_file: &File) -> std::io::Result<()> {
    Ok(())
}
