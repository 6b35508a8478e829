use crate::core::distribution::NormalDistribution;
use crate::core::region::{GenomeRegion, Interval};
use crate::core::types::IssueKind;

/// Positions either side of a base counted toward its GC percentage
pub const GC_RADIUS: usize = 50;

/// Per-base values with a fill for positions that were never set.
/// An empty vector means every position holds the fill value.
#[derive(Debug, Clone, Default)]
struct PerBase {
    values: Vec<i32>,
    fill: i32,
}

impl PerBase {
    fn filled(fill: i32) -> Self {
        Self {
            values: Vec::new(),
            fill,
        }
    }

    fn get(&self, i: usize) -> i32 {
        self.values.get(i).copied().unwrap_or(self.fill)
    }
}

/// In-memory region statistics.
///
/// A fresh summary is neutral: zero coverage, nothing confirmed, copy
/// number one and no issues. Statistics are attached with the `with_*`
/// builders.
#[derive(Debug, Clone)]
pub struct RegionSummary {
    contig: String,
    start: u64,
    stop: u64,
    changed: Vec<bool>,
    confirmed: Vec<bool>,
    copy_number: PerBase,
    coverage: PerBase,
    frag_coverage: PerBase,
    bad_coverage: PerBase,
    phys_coverage: PerBase,
    insert_size: PerBase,
    gc: PerBase,
    weighted_qual: PerBase,
    weighted_mq: PerBase,
    clips: PerBase,
    coverage_dist: NormalDistribution,
    bad_coverage_dist: NormalDistribution,
    phys_coverage_dist: NormalDistribution,
    insert_size_dist: NormalDistribution,
    issues: [Vec<Interval>; IssueKind::COUNT],
}

impl RegionSummary {
    /// Neutral region covering `start..=stop` (1-based)
    pub fn new(contig: impl Into<String>, start: u64, stop: u64) -> Self {
        Self {
            contig: contig.into(),
            start,
            stop,
            changed: Vec::new(),
            confirmed: Vec::new(),
            copy_number: PerBase::filled(1),
            coverage: PerBase::default(),
            frag_coverage: PerBase::default(),
            bad_coverage: PerBase::default(),
            phys_coverage: PerBase::default(),
            insert_size: PerBase::default(),
            gc: PerBase::default(),
            weighted_qual: PerBase::default(),
            weighted_mq: PerBase::default(),
            clips: PerBase::default(),
            coverage_dist: NormalDistribution::default(),
            bad_coverage_dist: NormalDistribution::default(),
            phys_coverage_dist: NormalDistribution::default(),
            insert_size_dist: NormalDistribution::default(),
            issues: Default::default(),
        }
    }

    /// Neutral region over `bases`, with GC filled in from the sequence
    pub fn from_sequence(contig: impl Into<String>, start: u64, bases: &[u8]) -> Self {
        let stop = start + bases.len() as u64 - 1;
        let mut summary = Self::new(contig, start, stop);
        summary.gc.values = gc_percent(bases, GC_RADIUS);
        summary
    }

    /// 1-based position of the last base
    #[must_use]
    pub fn stop(&self) -> u64 {
        self.stop
    }

    #[must_use]
    pub fn with_changed(mut self, changed: Vec<bool>) -> Self {
        self.changed = changed;
        self
    }

    #[must_use]
    pub fn with_confirmed(mut self, confirmed: Vec<bool>) -> Self {
        self.confirmed = confirmed;
        self
    }

    #[must_use]
    pub fn with_copy_number(mut self, values: Vec<i32>) -> Self {
        self.copy_number.values = values;
        self
    }

    /// Set raw coverage and derive its reference distribution
    #[must_use]
    pub fn with_coverage(mut self, values: Vec<i32>) -> Self {
        self.coverage_dist = NormalDistribution::from_values(&values);
        self.coverage.values = values;
        self
    }

    #[must_use]
    pub fn with_frag_coverage(mut self, values: Vec<i32>) -> Self {
        self.frag_coverage.values = values;
        self
    }

    #[must_use]
    pub fn with_bad_coverage(mut self, values: Vec<i32>) -> Self {
        self.bad_coverage_dist = NormalDistribution::from_values(&values);
        self.bad_coverage.values = values;
        self
    }

    #[must_use]
    pub fn with_phys_coverage(mut self, values: Vec<i32>) -> Self {
        self.phys_coverage_dist = NormalDistribution::from_values(&values);
        self.phys_coverage.values = values;
        self
    }

    #[must_use]
    pub fn with_insert_size(mut self, values: Vec<i32>) -> Self {
        self.insert_size_dist = NormalDistribution::from_values(&values);
        self.insert_size.values = values;
        self
    }

    #[must_use]
    pub fn with_weighted_qual(mut self, values: Vec<i32>) -> Self {
        self.weighted_qual.values = values;
        self
    }

    #[must_use]
    pub fn with_weighted_mq(mut self, values: Vec<i32>) -> Self {
        self.weighted_mq.values = values;
        self
    }

    #[must_use]
    pub fn with_clips(mut self, values: Vec<i32>) -> Self {
        self.clips.values = values;
        self
    }

    /// Replace the distribution used for the coverage SD track
    #[must_use]
    pub fn with_coverage_dist(mut self, dist: NormalDistribution) -> Self {
        self.coverage_dist = dist;
        self
    }

    #[must_use]
    pub fn with_issues(mut self, kind: IssueKind, intervals: Vec<Interval>) -> Self {
        self.issues[kind.index()] = intervals;
        self
    }
}

impl GenomeRegion for RegionSummary {
    fn contig(&self) -> &str {
        &self.contig
    }

    fn start(&self) -> u64 {
        self.start
    }

    fn size(&self) -> usize {
        usize::try_from(self.stop + 1 - self.start).unwrap_or(usize::MAX)
    }

    fn changed(&self, i: usize) -> bool {
        self.changed.get(i).copied().unwrap_or(false)
    }

    fn confirmed(&self, i: usize) -> bool {
        self.confirmed.get(i).copied().unwrap_or(false)
    }

    fn copy_number(&self, i: usize) -> i32 {
        self.copy_number.get(i)
    }

    fn coverage(&self, i: usize) -> i32 {
        self.coverage.get(i)
    }

    fn frag_coverage(&self, i: usize) -> i32 {
        self.frag_coverage.get(i)
    }

    fn bad_coverage(&self, i: usize) -> i32 {
        self.bad_coverage.get(i)
    }

    fn phys_coverage(&self, i: usize) -> i32 {
        self.phys_coverage.get(i)
    }

    fn insert_size(&self, i: usize) -> i32 {
        self.insert_size.get(i)
    }

    fn gc(&self, i: usize) -> i32 {
        self.gc.get(i)
    }

    fn weighted_qual(&self, i: usize) -> i32 {
        self.weighted_qual.get(i)
    }

    fn weighted_mq(&self, i: usize) -> i32 {
        self.weighted_mq.get(i)
    }

    fn clips(&self, i: usize) -> i32 {
        self.clips.get(i)
    }

    fn coverage_dist(&self) -> &NormalDistribution {
        &self.coverage_dist
    }

    fn bad_coverage_dist(&self) -> &NormalDistribution {
        &self.bad_coverage_dist
    }

    fn phys_coverage_dist(&self) -> &NormalDistribution {
        &self.phys_coverage_dist
    }

    fn insert_size_dist(&self) -> &NormalDistribution {
        &self.insert_size_dist
    }

    fn issues(&self, kind: IssueKind) -> &[Interval] {
        &self.issues[kind.index()]
    }
}

/// Integer GC percentage at each base over a window of `radius` bases either
/// side, clipped to the sequence
fn gc_percent(bases: &[u8], radius: usize) -> Vec<i32> {
    // prefix[i] = number of G/C bases in bases[..i]
    let mut prefix = Vec::with_capacity(bases.len() + 1);
    prefix.push(0usize);
    for &base in bases {
        let is_gc = matches!(base.to_ascii_uppercase(), b'G' | b'C' | b'S');
        prefix.push(prefix[prefix.len() - 1] + usize::from(is_gc));
    }

    (0..bases.len())
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius).min(bases.len() - 1);
            let gc = prefix[hi + 1] - prefix[lo];
            let span = hi - lo + 1;
            i32::try_from(gc * 100 / span).unwrap_or(100)
        })
        .collect()
}
