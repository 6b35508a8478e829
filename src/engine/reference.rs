//! Sequence-only engine.
//!
//! Loads the genome, checks each alignment input's header against it and lays
//! out the regions to analyze. Pileup statistics are left neutral; only GC,
//! which needs nothing but the sequence, is computed.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::core::config::RunConfiguration;
use crate::core::region::RegionMap;
use crate::core::summary::RegionSummary;
use crate::core::target::Target;
use crate::engine::{Engine, EngineError};
use crate::parsing::fasta::{read_genome, GenomeSequence};
use crate::parsing::sam::read_header_contigs;

#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceEngine;

impl ReferenceEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Engine for ReferenceEngine {
    type Region = RegionSummary;

    fn process(&self, config: &RunConfiguration) -> Result<RegionMap<RegionSummary>, EngineError> {
        let genome = read_genome(&config.genome).map_err(|source| EngineError::Genome {
            path: config.genome.clone(),
            source,
        })?;
        info!(
            contigs = genome.len(),
            "Loaded genome {}",
            config.genome.display()
        );

        check_inputs(config, &genome)?;

        let regions = build_regions(&genome, &config.targets, config.heuristics.chunk_size)?;
        if regions.is_empty() {
            return Err(EngineError::NoRegions);
        }
        info!(
            chromosomes = regions.len(),
            regions = regions.region_count(),
            "Laid out regions"
        );

        Ok(regions)
    }
}

/// Make sure every alignment input is readable and was aligned to this genome
fn check_inputs(config: &RunConfiguration, genome: &[GenomeSequence]) -> Result<(), EngineError> {
    let names: HashSet<&str> = genome.iter().map(|seq| seq.name.as_str()).collect();

    for input in &config.inputs {
        let contigs =
            read_header_contigs(&input.path).map_err(|source| EngineError::Alignment {
                path: input.path.clone(),
                source,
            })?;

        let shared = contigs
            .iter()
            .filter(|contig| names.contains(contig.name.as_str()))
            .count();

        if shared == 0 {
            warn!(
                input = %input.path.display(),
                role = %input.role,
                "Alignment header shares no contigs with the genome"
            );
        } else {
            debug!(
                input = %input.path.display(),
                role = %input.role,
                shared,
                total = contigs.len(),
                "Checked alignment header"
            );
        }
    }

    Ok(())
}

/// Split contigs, or the targeted parts of them, into regions of at most
/// `chunk_size` bases.
///
/// Without targets every non-empty contig is used, in genome order. With
/// targets, regions follow target order and ranges past a contig's end are
/// clipped.
///
/// # Errors
///
/// Returns `EngineError::UnknownTarget` if a target names a contig that is
/// not in the genome.
pub fn build_regions(
    genome: &[GenomeSequence],
    targets: &[Target],
    chunk_size: u64,
) -> Result<RegionMap<RegionSummary>, EngineError> {
    let chunk_size = chunk_size.max(1);
    let mut regions = RegionMap::new();

    if targets.is_empty() {
        for seq in genome.iter().filter(|seq| !seq.is_empty()) {
            push_chunks(&mut regions, seq, 1, seq.len(), chunk_size);
        }
        return Ok(regions);
    }

    let by_name: HashMap<&str, &GenomeSequence> =
        genome.iter().map(|seq| (seq.name.as_str(), seq)).collect();

    for target in targets {
        let seq = by_name
            .get(target.contig.as_str())
            .ok_or_else(|| EngineError::UnknownTarget(target.contig.clone()))?;

        let (start, mut stop) = target.range.unwrap_or((1, seq.len()));
        if stop > seq.len() {
            warn!(target = %target, length = seq.len(), "Target extends past contig end, clipping");
            stop = seq.len();
        }
        if start > stop {
            warn!(target = %target, "Target lies outside its contig, skipping");
            continue;
        }

        push_chunks(&mut regions, seq, start, stop, chunk_size);
    }

    Ok(regions)
}

/// Add regions tiling `start..=stop` of `seq`
#[allow(clippy::cast_possible_truncation)]
fn push_chunks(
    regions: &mut RegionMap<RegionSummary>,
    seq: &GenomeSequence,
    start: u64,
    stop: u64,
    chunk_size: u64,
) {
    let mut chunk_start = start;
    while chunk_start <= stop {
        let chunk_stop = chunk_start.saturating_add(chunk_size - 1).min(stop);
        let bases = &seq.bases[(chunk_start - 1) as usize..chunk_stop as usize];
        regions.push(
            &seq.name,
            RegionSummary::from_sequence(&seq.name, chunk_start, bases),
        );
        chunk_start = chunk_stop + 1;
    }
}
