//! Command-line interface for pilon-tracks.
//!
//! Turns the raw argument list into a [`RunConfiguration`]. Parsing happens
//! in two steps so logging can be set up from `--verbose`/`--debug` before
//! anything worth logging is resolved:
//!
//! 1. [`ParsedArgs::from_tokens`]: clap syntax, numeric values, `--fix`,
//!    input order
//! 2. [`ParsedArgs::resolve`]: required inputs, `--targets`, strays
//!
//! ## Usage
//!
//! ```text
//! # Improve a genome with one paired-end library and write browser tracks
//! pilon-tracks --genome asm.fasta --frags frags.bam --tracks
//!
//! # Several libraries, only fix bases, named outputs in another directory
//! pilon-tracks --genome asm.fasta --frags a.bam --jumps b.bam \
//!     --fix bases --output asm1 --outdir results
//!
//! # Restrict the run to parts of the genome
//! pilon-tracks --genome asm.fasta --unpaired reads.bam --targets chr1:1-50000,chr2
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use thiserror::Error;
use tracing::debug;

use crate::core::config::{compute_strays, BamInputSpec, FixList, Heuristics, RunConfiguration};
use crate::core::target::{parse_targets, TargetError};
use crate::core::types::{FixCategory, InputRole};

pub mod fix;

pub use fix::resolve_fix_list;

#[derive(Parser, Debug)]
#[command(name = "pilon-tracks")]
#[command(version)]
#[command(about = "Resolve a genome-improvement run and export genome-browser tracks")]
#[command(
    long_about = "pilon-tracks resolves a genome-improvement run from an assembly and its read alignments.\n\nWith --tracks it writes one WIG file per per-base metric and a BED file of flagged regions, ready to load into a genome browser next to the assembly."
)]
pub struct Cli {
    /// Genome FASTA to improve (plain, .gz or .bgz)
    #[arg(long, value_name = "FASTA")]
    pub genome: Option<PathBuf>,

    /// Paired-end fragment library alignments (repeatable)
    #[arg(long, value_name = "BAM")]
    pub frags: Vec<PathBuf>,

    /// Mate-pair (jumping) library alignments (repeatable)
    #[arg(long, value_name = "BAM")]
    pub jumps: Vec<PathBuf>,

    /// Unpaired read alignments (repeatable)
    #[arg(long, value_name = "BAM")]
    pub unpaired: Vec<PathBuf>,

    /// Prefix for every output file
    #[arg(long, value_name = "PREFIX", default_value = "pilon")]
    pub output: String,

    /// Directory for output files
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub outdir: PathBuf,

    /// Write a VCF of every base
    #[arg(long)]
    pub vcf: bool,

    /// Write genome-browser tracks
    #[arg(long)]
    pub tracks: bool,

    /// Treat the sample as diploid
    #[arg(long)]
    pub diploid: bool,

    /// Fix categories: all, none, or a comma-separated list of bases, gaps,
    /// local (novel and breaks are experimental)
    #[arg(long, value_name = "LIST", default_value = "all")]
    pub fix: String,

    /// Only use reads that passed the sequencer's filter
    #[arg(long = "pf")]
    pub pass_filter: bool,

    /// Regions to process: contig[:start-stop] list, or a file of them
    #[arg(long, value_name = "TARGETS")]
    pub targets: Option<String>,

    /// More detailed progress messages
    #[arg(long)]
    pub verbose: bool,

    /// Debugging output
    #[arg(long)]
    pub debug: bool,

    /// Skip stray-alignment detection
    #[arg(long)]
    pub nostrays: bool,

    // === Heuristics ===
    /// Bases at each read end to ignore
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub flank: u32,

    /// Ignore evidence this close to a gap
    #[arg(long = "gapmargin", value_name = "N", default_value_t = 1000)]
    pub gap_margin: u32,

    /// Minimum depth to call a base; below 1, a fraction of mean coverage
    #[arg(long = "mindepth", value_name = "DEPTH", default_value_t = 0.1, allow_negative_numbers = true)]
    pub min_depth: f64,

    /// Smallest gap worth closing
    #[arg(long = "mingap", value_name = "N", default_value_t = 10)]
    pub min_gap: u32,

    /// Minimum base quality
    #[arg(long = "minqual", value_name = "N", default_value_t = 0)]
    pub min_quality: u32,

    /// Minimum mapping quality
    #[arg(long = "minmq", value_name = "N", default_value_t = 0)]
    pub min_mapping_quality: u32,

    /// Size of the genome chunks processed at once
    #[arg(
        long = "chunksize",
        value_name = "N",
        default_value_t = 10_000_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub chunk_size: u64,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    /// `--help` or `--version`; carries the text to print
    #[error("{0}")]
    UsageRequested(String),

    /// No alignment inputs; carries the usage text to print
    #[error("No alignment inputs: give at least one of --frags, --jumps or --unpaired")]
    MissingInput(String),

    #[error("--genome is required")]
    MissingGenome,

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unknown --fix option: {0}")]
    UnknownFixCategory(String),

    #[error("Invalid number '{value}' for {flag}")]
    InvalidNumber { flag: String, value: String },

    #[error("{0}")]
    InvalidValue(String),

    #[error("Invalid --targets: {0}")]
    InvalidTargets(#[from] TargetError),
}

impl ConfigError {
    /// Process exit status for this error
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UsageRequested(_) | Self::MissingInput(_) => 0,
            _ => 1,
        }
    }

    fn from_clap(err: &clap::Error) -> Self {
        let context = |kind| match err.get(kind) {
            Some(ContextValue::String(s)) => Some(s.clone()),
            _ => None,
        };

        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Self::UsageRequested(err.to_string())
            }
            ErrorKind::UnknownArgument => Self::UnknownOption(
                context(ContextKind::InvalidArg).unwrap_or_else(|| first_line(err)),
            ),
            ErrorKind::ValueValidation => {
                match (context(ContextKind::InvalidArg), context(ContextKind::InvalidValue)) {
                    (Some(flag), Some(value)) => Self::InvalidNumber { flag, value },
                    _ => Self::InvalidValue(first_line(err)),
                }
            }
            _ => Self::InvalidValue(first_line(err)),
        }
    }
}

/// The first line of a clap error, without its `error: ` prefix
fn first_line(err: &clap::Error) -> String {
    let text = err.to_string();
    let line = text.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

/// Command line after the syntax pass, before the run is resolved
#[derive(Debug)]
pub struct ParsedArgs {
    cli: Cli,
    inputs: Vec<BamInputSpec>,
    fix_list: FixList,
    experimental: Vec<FixCategory>,
    usage: String,
}

impl ParsedArgs {
    /// Parse the arguments that follow the program name
    ///
    /// # Errors
    ///
    /// Returns `UsageRequested` for `--help`/`--version`, `UnknownOption` for
    /// unrecognized flags, `InvalidNumber` for malformed numeric values and
    /// `UnknownFixCategory` for a bad `--fix` token.
    pub fn from_tokens<I, T>(tokens: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Cli::command();
        let argv = std::iter::once(OsString::from("pilon-tracks"))
            .chain(tokens.into_iter().map(Into::into));

        let matches = command
            .try_get_matches_from_mut(argv)
            .map_err(|e| ConfigError::from_clap(&e))?;
        let cli = Cli::from_arg_matches(&matches).map_err(|e| ConfigError::from_clap(&e))?;
        let (fix_list, experimental) = fix::read_fix_list(&cli.fix)?;
        let inputs = collect_inputs(&cli, &matches);
        let usage = command.render_help().to_string();

        Ok(Self {
            cli,
            inputs,
            fix_list,
            experimental,
            usage,
        })
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.cli.debug
    }

    /// Check the parsed arguments and build the run configuration
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` when no alignments were given (checked first),
    /// then `MissingGenome`, `InvalidNumber` or `InvalidTargets` for the
    /// first problem found.
    pub fn resolve(self) -> Result<RunConfiguration, ConfigError> {
        let Self {
            cli,
            inputs,
            fix_list,
            experimental,
            usage,
        } = self;

        fix::warn_experimental(&experimental);

        if inputs.is_empty() {
            return Err(ConfigError::MissingInput(usage));
        }

        let genome = cli
            .genome
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(ConfigError::MissingGenome)?;

        if !cli.min_depth.is_finite() || cli.min_depth < 0.0 {
            return Err(ConfigError::InvalidNumber {
                flag: "--mindepth".to_string(),
                value: cli.min_depth.to_string(),
            });
        }

        let targets = match &cli.targets {
            Some(spec) => parse_targets(spec)?,
            None => Vec::new(),
        };

        let strays = compute_strays(!cli.nostrays, &fix_list);
        if !cli.nostrays && !strays {
            debug!("Stray detection off: fix list includes neither gaps nor local");
        }

        let config = RunConfiguration {
            inputs,
            genome,
            output_prefix: cli.output,
            output_dir: cli.outdir,
            tracks: cli.tracks,
            verbose: cli.verbose,
            debug: cli.debug,
            vcf: cli.vcf,
            diploid: cli.diploid,
            pass_filter_only: cli.pass_filter,
            strays,
            fix_list,
            heuristics: Heuristics {
                flank: cli.flank,
                gap_margin: cli.gap_margin,
                min_gap: cli.min_gap,
                min_depth: cli.min_depth,
                min_quality: cli.min_quality,
                min_mapping_quality: cli.min_mapping_quality,
                chunk_size: cli.chunk_size,
            },
            targets,
        };

        match serde_json::to_string(&config) {
            Ok(json) => debug!(config = %json, "Resolved configuration"),
            Err(e) => debug!("Resolved configuration (not serializable: {e})"),
        }

        Ok(config)
    }
}

/// Parse the arguments that follow the program name into a run configuration
///
/// # Errors
///
/// See [`ParsedArgs::from_tokens`] and [`ParsedArgs::resolve`].
pub fn parse_arguments<I, T>(tokens: I) -> Result<RunConfiguration, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    ParsedArgs::from_tokens(tokens)?.resolve()
}

/// All alignment inputs in command-line order, whatever their role
fn collect_inputs(cli: &Cli, matches: &ArgMatches) -> Vec<BamInputSpec> {
    let mut positioned = Vec::new();

    for role in InputRole::ALL {
        let paths = match role {
            InputRole::Fragments => &cli.frags,
            InputRole::Jumps => &cli.jumps,
            InputRole::Unpaired => &cli.unpaired,
        };
        let indices = matches.indices_of(role.flag()).into_iter().flatten();
        for (index, path) in indices.zip(paths) {
            positioned.push((index, BamInputSpec::new(path.clone(), role)));
        }
    }

    positioned.sort_by_key(|(index, _)| *index);
    positioned.into_iter().map(|(_, spec)| spec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FixList;
    use crate::core::target::Target;
    use crate::core::types::FixCategory;
    use std::path::Path;

    fn parse(args: &[&str]) -> Result<RunConfiguration, ConfigError> {
        parse_arguments(args.iter().copied())
    }

    #[test]
    fn test_minimal_run_defaults() {
        let config = parse(&["--genome", "g.fa", "--frags", "a.bam"]).unwrap();

        assert_eq!(config.genome, PathBuf::from("g.fa"));
        assert_eq!(
            config.inputs,
            vec![BamInputSpec::new("a.bam", InputRole::Fragments)]
        );
        assert_eq!(config.output_prefix, "pilon");
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.fix_list, FixList::standard());
        assert!(config.strays);
        assert!(!config.tracks);
        assert!(!config.vcf);
        assert!(!config.diploid);
        assert!(!config.pass_filter_only);
        assert_eq!(config.heuristics, Heuristics::default());
        assert!(config.targets.is_empty());
    }

    #[test]
    fn test_inputs_keep_command_line_order() {
        let config = parse(&[
            "--unpaired", "u1.bam",
            "--genome", "g.fa",
            "--frags", "f1.bam",
            "--jumps", "j1.bam",
            "--frags", "f2.bam",
        ])
        .unwrap();

        let inputs: Vec<(&Path, InputRole)> = config
            .inputs
            .iter()
            .map(|spec| (spec.path.as_path(), spec.role))
            .collect();
        assert_eq!(
            inputs,
            vec![
                (Path::new("u1.bam"), InputRole::Unpaired),
                (Path::new("f1.bam"), InputRole::Fragments),
                (Path::new("j1.bam"), InputRole::Jumps),
                (Path::new("f2.bam"), InputRole::Fragments),
            ]
        );

        let frags: Vec<&Path> = config.inputs_with_role(InputRole::Fragments).collect();
        assert_eq!(frags, vec![Path::new("f1.bam"), Path::new("f2.bam")]);
    }

    #[test]
    fn test_no_inputs_requests_usage() {
        let err = parse(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingInput(ref usage) if usage.contains("--genome")));
        assert_eq!(err.exit_code(), 0);

        // Checked before the genome
        let err = parse(&["--tracks"]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingInput(_)));
    }

    #[test]
    fn test_missing_genome() {
        let err = parse(&["--frags", "a.bam"]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingGenome));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_unknown_option() {
        let err = parse(&["--genome", "g.fa", "--frags", "a.bam", "--bogus"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption(ref flag) if flag.contains("--bogus")));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_help_and_version() {
        let err = parse(&["--help"]).unwrap_err();
        assert!(matches!(err, ConfigError::UsageRequested(ref text) if text.contains("--frags")));
        assert_eq!(err.exit_code(), 0);

        let err = parse(&["--version"]).unwrap_err();
        assert!(matches!(err, ConfigError::UsageRequested(_)));
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_unknown_fix_category() {
        let err = parse(&["--genome", "g.fa", "--frags", "a.bam", "--fix", "bogus"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFixCategory(ref t) if t == "bogus"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_unknown_fix_category_without_inputs() {
        let err = parse(&["--genome", "g.fa", "--fix", "bogus"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFixCategory(ref t) if t == "bogus"));
        assert_eq!(err.exit_code(), 1);

        let err = ParsedArgs::from_tokens(["--fix", ",bases"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFixCategory(_)));
    }

    #[test]
    fn test_fix_list_and_strays() {
        let config = parse(&["--genome", "g.fa", "--frags", "a.bam", "--fix", "bases"]).unwrap();
        assert_eq!(config.fix_list.as_slice(), &[FixCategory::Bases]);
        assert!(!config.strays);

        let config = parse(&["--genome", "g.fa", "--frags", "a.bam", "--fix", "bases,gaps"]).unwrap();
        assert_eq!(config.fix_list.as_slice(), &[FixCategory::Gaps, FixCategory::Bases]);
        assert!(config.strays);

        let config = parse(&["--genome", "g.fa", "--frags", "a.bam", "--nostrays"]).unwrap();
        assert!(!config.strays);

        let config = parse(&["--genome", "g.fa", "--frags", "a.bam", "--fix", "none"]).unwrap();
        assert!(config.fix_list.is_empty());
        assert!(!config.strays);
    }

    #[test]
    fn test_flags_and_heuristics() {
        let config = parse(&[
            "--genome", "g.fa",
            "--jumps", "j.bam",
            "--output", "asm1",
            "--outdir", "out",
            "--tracks", "--vcf", "--diploid", "--pf", "--verbose", "--debug",
            "--flank", "5",
            "--gapmargin", "500",
            "--mindepth", "2.5",
            "--mingap", "3",
            "--minqual", "20",
            "--minmq", "30",
            "--chunksize", "5000",
        ])
        .unwrap();

        assert_eq!(config.output_prefix, "asm1");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(config.tracks && config.vcf && config.diploid && config.pass_filter_only);
        assert!(config.verbose && config.debug);
        assert_eq!(
            config.heuristics,
            Heuristics {
                flank: 5,
                gap_margin: 500,
                min_gap: 3,
                min_depth: 2.5,
                min_quality: 20,
                min_mapping_quality: 30,
                chunk_size: 5000,
            }
        );
    }

    #[test]
    fn test_invalid_numbers() {
        let err = parse(&["--genome", "g.fa", "--frags", "a.bam", "--flank", "ten"]).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidNumber { ref flag, ref value } if flag.contains("--flank") && value == "ten")
        );
        assert_eq!(err.exit_code(), 1);

        let err = parse(&["--genome", "g.fa", "--frags", "a.bam", "--chunksize", "0"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));

        let err = parse(&["--genome", "g.fa", "--frags", "a.bam", "--mindepth", "-1"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { ref flag, .. } if flag == "--mindepth"));
    }

    #[test]
    fn test_targets() {
        let config = parse(&[
            "--genome", "g.fa",
            "--frags", "a.bam",
            "--targets", "chr1:100-200,chr2",
        ])
        .unwrap();
        assert_eq!(
            config.targets,
            vec![Target::span("chr1", 100, 200), Target::whole("chr2")]
        );

        let err = parse(&["--genome", "g.fa", "--frags", "a.bam", "--targets", "chr1:9-1"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTargets(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_parsed_args_expose_logging_flags() {
        let parsed = ParsedArgs::from_tokens(["--frags", "a.bam", "--verbose"]).unwrap();
        assert!(parsed.verbose());
        assert!(!parsed.debug());
    }
}
