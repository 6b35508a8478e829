//! Run orchestration: engine first, then track export when requested.

use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info};

use crate::core::config::RunConfiguration;
use crate::core::region::{GenomeRegion, RegionMap};
use crate::engine::Engine;
use crate::output::{write_all_tracks, OutputLocation};

/// What a run produced
#[derive(Debug, Default)]
pub struct RunSummary {
    pub chromosomes: usize,
    pub regions: usize,
    /// Files written, in write order. Empty unless tracks were requested.
    pub written: Vec<PathBuf>,
}

/// Process the genome with `engine` and write tracks if the configuration
/// asks for them
///
/// # Errors
///
/// Returns an error if the engine fails or any output file cannot be
/// written. Export stops at the first file that fails.
pub fn run<E: Engine>(config: &RunConfiguration, engine: &E) -> anyhow::Result<RunSummary> {
    info!(
        inputs = config.inputs.len(),
        fix = %config.fix_list,
        "Processing {}",
        config.genome.display()
    );
    for input in &config.inputs {
        debug!(role = %input.role, "Input {}", input.path.display());
    }

    let regions = engine
        .process(config)
        .with_context(|| format!("Failed to process {}", config.genome.display()))?;

    let written = if config.tracks {
        export(&regions, config)?
    } else {
        Vec::new()
    };

    Ok(RunSummary {
        chromosomes: regions.len(),
        regions: regions.region_count(),
        written,
    })
}

fn export<R: GenomeRegion>(
    regions: &RegionMap<R>,
    config: &RunConfiguration,
) -> anyhow::Result<Vec<PathBuf>> {
    let output = OutputLocation::from(config);
    info!(
        dir = %output.dir.display(),
        prefix = %output.prefix,
        "Writing tracks"
    );

    let written = write_all_tracks(regions, &output)?;
    info!(files = written.len(), "Tracks written");
    Ok(written)
}
