use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// A reference sequence declared in an alignment header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderContig {
    pub name: String,
    pub length: u64,
}

/// Read the `@SQ` reference sequences from a SAM or BAM header.
///
/// Files ending in `.sam` are read as text; anything else is read as BAM.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, or
/// `ParseError::Noodles` if the header cannot be decoded.
pub fn read_header_contigs(path: &Path) -> Result<Vec<HeaderContig>, ParseError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("sam") => read_sam_header(path),
        _ => read_bam_header(path),
    }
}

/// Read the header of a SAM file (text format)
fn read_sam_header(path: &Path) -> Result<Vec<HeaderContig>, ParseError> {
    use noodles::sam;

    let mut reader = std::fs::File::open(path)
        .map(BufReader::new)
        .map(sam::io::Reader::new)?;

    let header = reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    Ok(header_contigs(&header))
}

/// Read the header of a BAM file (binary format)
fn read_bam_header(path: &Path) -> Result<Vec<HeaderContig>, ParseError> {
    use noodles::bam;

    let mut reader = std::fs::File::open(path).map(bam::io::Reader::new)?;

    let header = reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    Ok(header_contigs(&header))
}

fn header_contigs(header: &noodles::sam::Header) -> Vec<HeaderContig> {
    header
        .reference_sequences()
        .iter()
        .map(|(name, map)| HeaderContig {
            name: name.to_string(),
            length: map.length().get() as u64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_sam_header_contigs() {
        let mut file = NamedTempFile::with_suffix(".sam").unwrap();
        writeln!(file, "@HD\tVN:1.6\tSO:coordinate").unwrap();
        writeln!(file, "@SQ\tSN:chr1\tLN:1000").unwrap();
        writeln!(file, "@SQ\tSN:chrM\tLN:16569").unwrap();
        file.flush().unwrap();

        let contigs = read_header_contigs(file.path()).unwrap();
        assert_eq!(
            contigs,
            vec![
                HeaderContig {
                    name: "chr1".to_string(),
                    length: 1000
                },
                HeaderContig {
                    name: "chrM".to_string(),
                    length: 16569
                },
            ]
        );
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_header_contigs(Path::new("/nonexistent/sample.bam"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_read_garbage_bam() {
        let mut file = NamedTempFile::with_suffix(".bam").unwrap();
        file.write_all(b"this is not a bam file").unwrap();
        file.flush().unwrap();

        assert!(read_header_contigs(file.path()).is_err());
    }
}
