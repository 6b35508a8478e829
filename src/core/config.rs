use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::target::Target;
use crate::core::types::{FixCategory, InputRole};

/// An alignment file and the library role it was given with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BamInputSpec {
    pub path: PathBuf,
    pub role: InputRole,
}

impl BamInputSpec {
    pub fn new(path: impl Into<PathBuf>, role: InputRole) -> Self {
        Self {
            path: path.into(),
            role,
        }
    }
}

/// Ordered set of fix categories.
///
/// Categories are added at the front, so a list built from `bases,gaps`
/// reads `[gaps, bases]`. A category is never stored twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FixList(Vec<FixCategory>);

impl FixList {
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The standard categories in declaration order
    #[must_use]
    pub fn standard() -> Self {
        Self(FixCategory::STANDARD.to_vec())
    }

    /// Add a category at the front unless it is already present
    pub fn prepend(&mut self, category: FixCategory) {
        if !self.contains(category) {
            self.0.insert(0, category);
        }
    }

    #[must_use]
    pub fn contains(&self, category: FixCategory) -> bool {
        self.0.contains(&category)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[FixCategory] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = FixCategory> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FixList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|c| c.as_str()).collect();
        write!(f, "{}", names.join(","))
    }
}

/// Stray-alignment detection is only worth its cost when gaps or local
/// misassemblies may be fixed.
#[must_use]
pub fn compute_strays(requested: bool, fix_list: &FixList) -> bool {
    requested && (fix_list.contains(FixCategory::Gaps) || fix_list.contains(FixCategory::Local))
}

/// Numeric thresholds handed to the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heuristics {
    /// Bases at read ends to ignore when calling
    pub flank: u32,
    /// Closer than this to a gap, evidence is not trusted
    pub gap_margin: u32,
    /// Smallest gap worth filling
    pub min_gap: u32,
    /// Minimum depth to call a base; below 1 it is a fraction of mean coverage
    pub min_depth: f64,
    /// Minimum base quality counted in pileups
    pub min_quality: u32,
    /// Minimum mapping quality counted in pileups
    pub min_mapping_quality: u32,
    /// Largest region the engine processes at once
    pub chunk_size: u64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            flank: 10,
            gap_margin: 1000,
            min_gap: 10,
            min_depth: 0.1,
            min_quality: 0,
            min_mapping_quality: 0,
            chunk_size: 10_000_000,
        }
    }
}

/// Fully resolved run settings.
///
/// Built once by [`crate::cli::parse_arguments`], which guarantees at least
/// one input and a genome path, then passed around by reference.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfiguration {
    pub inputs: Vec<BamInputSpec>,
    pub genome: PathBuf,
    pub output_prefix: String,
    pub output_dir: PathBuf,
    pub tracks: bool,
    pub verbose: bool,
    pub debug: bool,
    pub vcf: bool,
    pub diploid: bool,
    pub pass_filter_only: bool,
    pub strays: bool,
    pub fix_list: FixList,
    pub heuristics: Heuristics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,
}

impl RunConfiguration {
    /// Inputs given with one particular role, in command-line order
    pub fn inputs_with_role(&self, role: InputRole) -> impl Iterator<Item = &Path> + '_ {
        self.inputs
            .iter()
            .filter(move |spec| spec.role == role)
            .map(|spec| spec.path.as_path())
    }

    #[must_use]
    pub fn fixes(&self, category: FixCategory) -> bool {
        self.fix_list.contains(category)
    }
}
