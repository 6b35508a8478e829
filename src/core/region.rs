use std::collections::HashMap;

use serde::Serialize;

use crate::core::distribution::NormalDistribution;
use crate::core::types::IssueKind;

/// A sub-range of a region, 1-based and inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: u64,
    pub stop: u64,
}

impl Interval {
    #[must_use]
    pub fn new(start: u64, stop: u64) -> Self {
        Self { start, stop }
    }
}

/// Read access to one analyzed span of a chromosome.
///
/// Position arguments are zero-based offsets into the region, `0..size()`.
/// Implementations belong to the engine; exporters only read through this
/// trait.
pub trait GenomeRegion {
    /// Contig this region lies on
    fn contig(&self) -> &str;

    /// 1-based position of the first base
    fn start(&self) -> u64;

    /// Number of positions
    fn size(&self) -> usize;

    fn changed(&self, i: usize) -> bool;
    fn confirmed(&self, i: usize) -> bool;
    fn copy_number(&self, i: usize) -> i32;
    fn coverage(&self, i: usize) -> i32;
    fn frag_coverage(&self, i: usize) -> i32;
    fn bad_coverage(&self, i: usize) -> i32;
    fn phys_coverage(&self, i: usize) -> i32;
    fn insert_size(&self, i: usize) -> i32;
    fn gc(&self, i: usize) -> i32;
    fn weighted_qual(&self, i: usize) -> i32;
    fn weighted_mq(&self, i: usize) -> i32;
    fn clips(&self, i: usize) -> i32;

    fn coverage_dist(&self) -> &NormalDistribution;
    fn bad_coverage_dist(&self) -> &NormalDistribution;
    fn phys_coverage_dist(&self) -> &NormalDistribution;
    fn insert_size_dist(&self) -> &NormalDistribution;

    /// Sub-ranges flagged with one kind of issue
    fn issues(&self, kind: IssueKind) -> &[Interval];

    /// Coverage change across a window of `radius` positions either side
    fn delta_coverage(&self, i: usize, radius: usize) -> i32 {
        let (lo, hi) = window(i, radius, self.size());
        self.coverage(hi) - self.coverage(lo)
    }

    /// How far coverage at `i` falls below the average of the window ends
    fn dip_coverage(&self, i: usize, radius: usize) -> i32 {
        let (lo, hi) = window(i, radius, self.size());
        let ends = (self.coverage(lo) + self.coverage(hi)) / 2;
        (ends - self.coverage(i)).max(0)
    }
}

/// Window ends around `i`, clipped to `0..size`
fn window(i: usize, radius: usize, size: usize) -> (usize, usize) {
    let lo = i.saturating_sub(radius);
    let hi = (i + radius).min(size.saturating_sub(1));
    (lo, hi)
}

/// Regions grouped by chromosome, keeping first-seen chromosome order
#[derive(Debug)]
pub struct RegionMap<R> {
    chromosomes: Vec<(String, Vec<R>)>,

    /// Index: chromosome name -> index in chromosomes vec
    name_to_index: HashMap<String, usize>,
}

impl<R> Default for RegionMap<R> {
    fn default() -> Self {
        Self {
            chromosomes: Vec::new(),
            name_to_index: HashMap::new(),
        }
    }
}

impl<R> RegionMap<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region to a chromosome, registering the chromosome if new
    pub fn push(&mut self, chromosome: &str, region: R) {
        let index = match self.name_to_index.get(chromosome) {
            Some(&index) => index,
            None => {
                let index = self.chromosomes.len();
                self.chromosomes.push((chromosome.to_string(), Vec::new()));
                self.name_to_index.insert(chromosome.to_string(), index);
                index
            }
        };
        self.chromosomes[index].1.push(region);
    }

    /// Chromosomes with their regions, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[R])> {
        self.chromosomes
            .iter()
            .map(|(name, regions)| (name.as_str(), regions.as_slice()))
    }

    #[must_use]
    pub fn get(&self, chromosome: &str) -> Option<&[R]> {
        self.name_to_index
            .get(chromosome)
            .map(|&index| self.chromosomes[index].1.as_slice())
    }

    /// Number of chromosomes
    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    #[must_use]
    pub fn region_count(&self) -> usize {
        self.chromosomes.iter().map(|(_, regions)| regions.len()).sum()
    }
}

impl<R: GenomeRegion> RegionMap<R> {
    /// Add a region under its own contig name
    pub fn insert(&mut self, region: R) {
        let contig = region.contig().to_string();
        self.push(&contig, region);
    }

    /// Total positions across all regions
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.chromosomes
            .iter()
            .flat_map(|(_, regions)| regions.iter())
            .map(GenomeRegion::size)
            .sum()
    }
}

impl<R: GenomeRegion> FromIterator<R> for RegionMap<R> {
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        let mut map = Self::new();
        for region in iter {
            map.insert(region);
        }
        map
    }
}
