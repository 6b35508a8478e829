//! # pilon-tracks
//!
//! Run configuration and genome-browser track export for a genome-improvement
//! pipeline.
//!
//! A run takes an assembly, one or more read-alignment files in different
//! library roles, and a set of fix categories. After the genome is processed,
//! each analyzed region exposes per-base metrics (coverage, quality, GC and
//! more) and lists of flagged sub-ranges. This crate turns those into:
//!
//! - one fixed-step WIG file per metric
//! - one BED file of flagged intervals, colored by issue kind
//!
//! ## Example
//!
//! ```rust,no_run
//! use pilon_tracks::cli::parse_arguments;
//! use pilon_tracks::engine::ReferenceEngine;
//!
//! let config = parse_arguments(["--genome", "asm.fa", "--frags", "frags.bam", "--tracks"])
//!     .unwrap();
//! let summary = pilon_tracks::run(&config, &ReferenceEngine::new()).unwrap();
//! println!("wrote {} files", summary.written.len());
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: argument parsing and run configuration
//! - [`core`]: configuration, region and distribution types
//! - [`engine`]: the genome-processing seam
//! - [`output`]: WIG and BED writers
//! - [`parsing`]: FASTA and SAM/BAM header readers

pub mod cli;
pub mod core;
pub mod engine;
pub mod output;
pub mod parsing;
pub mod run;

// Re-export commonly used types for convenience
pub use cli::{parse_arguments, ConfigError};
pub use core::config::RunConfiguration;
pub use core::region::{GenomeRegion, RegionMap};
pub use core::types::*;
pub use engine::{Engine, ReferenceEngine};
pub use run::{run, RunSummary};
