//! BED annotation of issue intervals.
//!
//! One line per flagged sub-range, colored by issue kind. Fields two and three
//! repeat the interval's start and stop as given, while the thick-start field
//! is written as `start - 1`:
//!
//! ```text
//! chr1	100	110	?	0	+	99	110	255,0,0
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::core::region::{GenomeRegion, Interval, RegionMap};
use crate::core::types::IssueKind;
use crate::output::{write_atomically, ExportError, OutputLocation};

/// BED name and `itemRgb` color for an issue kind
#[must_use]
pub fn style(kind: IssueKind) -> (&'static str, &'static str) {
    match kind {
        IssueKind::Unconfirmed => ("?", "255,0,0"),
        IssueKind::CollapsedRepeat => ("#", "0,0,255"),
        IssueKind::Changed => ("X", "255,0,0"),
        IssueKind::Insertion => ("I", "255,255,0"),
        IssueKind::Deletion => ("D", "255,0,255"),
        IssueKind::Gap => ("G", "32,32,32"),
        IssueKind::Break => ("B", "0,255,255"),
    }
}

/// Format one BED line (without newline)
#[must_use]
pub fn format_bed_line(chrom: &str, interval: &Interval, kind: IssueKind) -> String {
    let (label, rgb) = style(kind);
    format!(
        "{chrom}\t{}\t{}\t{label}\t0\t+\t{}\t{}\t{rgb}",
        interval.start,
        interval.stop,
        interval.start.saturating_sub(1),
        interval.stop,
    )
}

/// Writes the issue BED file for one region collection
pub struct AnnotationExporter<'a, R> {
    regions: &'a RegionMap<R>,
    output: &'a OutputLocation,
}

impl<'a, R: GenomeRegion> AnnotationExporter<'a, R> {
    pub fn new(regions: &'a RegionMap<R>, output: &'a OutputLocation) -> Self {
        Self { regions, output }
    }

    /// Write the BED file
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Write` if the file cannot be written. No partial
    /// file is left behind.
    pub fn write_annotations(
        &self,
        file_name: &str,
        display_name: &str,
    ) -> Result<PathBuf, ExportError> {
        let path = self.output.path(file_name);
        debug!(path = %path.display(), "Writing {display_name} annotations");
        write_atomically(&path, |w| render_annotations(w, self.regions, display_name))
    }
}

/// Render the BED file to `w`: per chromosome, each issue kind in turn across
/// all of that chromosome's regions
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_annotations<W, R>(
    w: &mut W,
    regions: &RegionMap<R>,
    display_name: &str,
) -> io::Result<()>
where
    W: Write,
    R: GenomeRegion,
{
    writeln!(w, "track name=\"{display_name}\" itemRgb=\"On\"")?;

    for (chrom, chrom_regions) in regions.iter() {
        for kind in IssueKind::ALL {
            for region in chrom_regions {
                for interval in region.issues(kind) {
                    writeln!(w, "{}", format_bed_line(chrom, interval, kind))?;
                }
            }
        }
    }

    Ok(())
}
