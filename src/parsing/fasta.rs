//! Genome loading from FASTA files using noodles.
//!
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;

use crate::parsing::sam::ParseError;

/// One contig of the genome being improved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomeSequence {
    pub name: String,
    pub bases: Vec<u8>,
}

impl GenomeSequence {
    #[must_use]
    pub fn len(&self) -> u64 {
        self.bases.len() as u64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Load every sequence of a FASTA file, in file order.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::InvalidFormat` if no sequences are found.
pub fn read_genome(path: &Path) -> Result<Vec<GenomeSequence>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        // bgzip is a series of gzip members
        let reader = BufReader::new(MultiGzDecoder::new(file));
        read_genome_from(&mut fasta::io::Reader::new(reader))
    } else {
        read_genome_from(&mut fasta::io::Reader::new(BufReader::new(file)))
    }
}

/// Load sequences from a noodles FASTA reader
fn read_genome_from<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<GenomeSequence>, ParseError> {
    let mut sequences = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        sequences.push(GenomeSequence {
            name: String::from_utf8_lossy(record.name()).to_string(),
            bases: record.sequence().as_ref().to_vec(),
        });
    }

    if sequences.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(sequences)
}
