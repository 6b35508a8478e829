//! Readers for the files the engine consumes.
//!
//! - **FASTA**: the genome being improved, plain or gzip/bgzip compressed
//! - **SAM/BAM headers**: `@SQ` reference sequences of each alignment input,
//!   used to check inputs were aligned against the genome

pub mod fasta;
pub mod sam;
