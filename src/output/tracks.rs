//! Fixed-step WIG tracks.
//!
//! Each track file has one `track` line, then for every region (chromosomes
//! in insertion order, regions in stored order) a `fixedStep` header and one
//! integer per position:
//!
//! ```text
//! track type=wiggle_0 graphType=line color=0,0,255 altColor=255,0,0 name="Coverage"
//! fixedStep chrom=chr1 start=1 step=1
//! 12
//! 13
//! ```
//!
//! Every `fixedStep` header declares `start=1`, including regions that begin
//! further along the chromosome.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::region::{GenomeRegion, RegionMap};
use crate::output::{write_atomically, ExportError, OutputLocation};

/// Window radius for the delta and dip coverage tracks
pub const DEFAULT_RADIUS: usize = 100;

/// Display range for sigma-unit tracks
pub const SIGMA_VIEW_LIMITS: &str = "viewLimits=-30:30";

/// GC is drawn as a heatmap centred on typical genome GC
pub const GC_DISPLAY: &str = "graphType=heatmap midRange=35:65 midColor=0,255,0";

const TRACK_HEADER: &str =
    "track type=wiggle_0 graphType=line color=0,0,255 altColor=255,0,0";

/// Value of a metric at a zero-based offset within a region
pub type Metric<R> = fn(&R, usize) -> i32;

/// One WIG track: where it goes, what it is called and what it plots
pub struct TrackSpec<R> {
    pub file_name: &'static str,
    pub display_name: &'static str,
    pub metric: Metric<R>,
    pub options: Option<&'static str>,
}

impl<R> TrackSpec<R> {
    pub fn new(file_name: &'static str, display_name: &'static str, metric: Metric<R>) -> Self {
        Self {
            file_name,
            display_name,
            metric,
            options: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: &'static str) -> Self {
        self.options = Some(options);
        self
    }
}

/// Percentage of bad coverage among all coverage at a position
#[must_use]
pub fn pct_bad(good: i32, bad: i32) -> i32 {
    let (good, bad) = (i64::from(good), i64::from(bad));
    let total = good + bad;
    if total <= 0 {
        return 0;
    }
    let pct = (bad * 100 / total).clamp(i64::from(i32::MIN), i64::from(i32::MAX));
    i32::try_from(pct).unwrap_or(0)
}

/// The standard track catalog, in output order
#[must_use]
pub fn standard_tracks<R: GenomeRegion>() -> Vec<TrackSpec<R>> {
    vec![
        TrackSpec::<R>::new("Changes.wig", "Changes", |r, i| i32::from(r.changed(i))),
        TrackSpec::<R>::new("Confirmed.wig", "Unconfirmed", |r, i| {
            i32::from(!r.confirmed(i))
        }),
        TrackSpec::<R>::new("CopyNumber.wig", "Copy Number", |r, i| r.copy_number(i) - 1),
        TrackSpec::<R>::new("Coverage.wig", "Coverage", |r, i| r.coverage(i)),
        TrackSpec::<R>::new("CoverageSD.wig", "Coverage SD", |r, i| {
            r.coverage_dist().to_sigma10x(r.coverage(i))
        })
        .with_options(SIGMA_VIEW_LIMITS),
        TrackSpec::<R>::new("BadCoverage.wig", "Bad Coverage", |r, i| r.bad_coverage(i)),
        TrackSpec::<R>::new("BadCoverageSD.wig", "Bad Coverage SD", |r, i| {
            r.bad_coverage_dist().to_sigma10x(r.bad_coverage(i))
        })
        .with_options(SIGMA_VIEW_LIMITS),
        TrackSpec::<R>::new("DeltaCoverage.wig", "Delta Coverage", |r, i| {
            r.delta_coverage(i, DEFAULT_RADIUS)
        }),
        TrackSpec::<R>::new("DipCoverage.wig", "Dip Coverage", |r, i| {
            r.dip_coverage(i, DEFAULT_RADIUS)
        }),
        TrackSpec::<R>::new("FragCoverage.wig", "Frag Coverage", |r, i| r.frag_coverage(i)),
        TrackSpec::<R>::new("PhysicalCoverage.wig", "Physical Coverage", |r, i| {
            r.phys_coverage(i)
        }),
        TrackSpec::<R>::new("PhysicalCoverageSD.wig", "Physical Coverage SD", |r, i| {
            r.phys_coverage_dist().to_sigma10x(r.phys_coverage(i))
        })
        .with_options(SIGMA_VIEW_LIMITS),
        TrackSpec::<R>::new("GC.wig", "GC", |r, i| r.gc(i)).with_options(GC_DISPLAY),
        TrackSpec::<R>::new("InsertSize.wig", "Insert Size", |r, i| r.insert_size(i)),
        TrackSpec::<R>::new("InsertSizeSD.wig", "Insert Size SD", |r, i| {
            r.insert_size_dist().to_sigma10x(r.insert_size(i))
        })
        .with_options(SIGMA_VIEW_LIMITS),
        TrackSpec::<R>::new("PctBad.wig", "Pct Bad", |r, i| {
            pct_bad(r.coverage(i), r.bad_coverage(i))
        }),
        TrackSpec::<R>::new("WeightedQual.wig", "Weighted Qual", |r, i| r.weighted_qual(i)),
        TrackSpec::<R>::new("WeightedMq.wig", "Weighted Mq", |r, i| r.weighted_mq(i)),
        TrackSpec::<R>::new("ClippedAlignments.wig", "Clipped Alignments", |r, i| r.clips(i)),
    ]
}

/// Writes WIG tracks for one region collection
pub struct TrackExporter<'a, R> {
    regions: &'a RegionMap<R>,
    output: &'a OutputLocation,
}

impl<'a, R: GenomeRegion> TrackExporter<'a, R> {
    pub fn new(regions: &'a RegionMap<R>, output: &'a OutputLocation) -> Self {
        Self { regions, output }
    }

    /// Write one track file plotting `metric` at every position
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Write` if the file cannot be written. No partial
    /// file is left behind.
    pub fn write_track<F>(
        &self,
        file_name: &str,
        display_name: &str,
        metric: F,
        options: Option<&str>,
    ) -> Result<PathBuf, ExportError>
    where
        F: Fn(&R, usize) -> i32,
    {
        let path = self.output.path(file_name);
        debug!(path = %path.display(), "Writing {display_name} track");
        write_atomically(&path, |w| {
            render_track(w, self.regions, display_name, &metric, options)
        })
    }

    /// Write the track a [`TrackSpec`] describes
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Write` if the file cannot be written.
    pub fn write_spec(&self, spec: &TrackSpec<R>) -> Result<PathBuf, ExportError> {
        self.write_track(spec.file_name, spec.display_name, spec.metric, spec.options)
    }

    /// Write every track of the standard catalog, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Write` for the first file that cannot be written.
    pub fn write_standard_tracks(&self) -> Result<Vec<PathBuf>, ExportError> {
        let specs = standard_tracks::<R>();
        info!(
            tracks = specs.len(),
            positions = self.regions.total_size(),
            "Writing tracks to {}",
            self.output.dir.display()
        );
        specs.iter().map(|spec| self.write_spec(spec)).collect()
    }
}

/// Render a full track to `w`
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_track<W, R, F>(
    w: &mut W,
    regions: &RegionMap<R>,
    display_name: &str,
    metric: F,
    options: Option<&str>,
) -> io::Result<()>
where
    W: Write,
    R: GenomeRegion,
    F: Fn(&R, usize) -> i32,
{
    write!(w, "{TRACK_HEADER} name=\"{display_name}\"")?;
    if let Some(options) = options.filter(|o| !o.is_empty()) {
        write!(w, " {options}")?;
    }
    writeln!(w)?;

    for (chrom, chrom_regions) in regions.iter() {
        for region in chrom_regions {
            writeln!(w, "fixedStep chrom={chrom} start=1 step=1")?;
            for i in 0..region.size() {
                writeln!(w, "{}", metric(region, i))?;
            }
        }
    }

    Ok(())
}
