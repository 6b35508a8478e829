//! The genome-processing engine seam.
//!
//! The orchestrator hands the resolved [`RunConfiguration`] to an [`Engine`]
//! and gets back the analyzed regions. Pileups, variant calling and local
//! reassembly happen behind this trait; exporters only read the result.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::RunConfiguration;
use crate::core::region::{GenomeRegion, RegionMap};
use crate::parsing::sam::ParseError;

pub mod reference;

pub use reference::ReferenceEngine;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to load genome {path}: {source}")]
    Genome {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to read alignment header from {path}: {source}")]
    Alignment {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Target contig '{0}' is not in the genome")]
    UnknownTarget(String),

    #[error("No regions to process")]
    NoRegions,
}

/// Produces analyzed regions for a run
pub trait Engine {
    type Region: GenomeRegion;

    /// Process the genome and inputs described by `config`
    ///
    /// # Errors
    ///
    /// Returns an `EngineError` if inputs cannot be read or describe nothing
    /// to process.
    fn process(&self, config: &RunConfiguration) -> Result<RegionMap<Self::Region>, EngineError>;
}
