//! Core data types shared by configuration, engine and exporters.
//!
//! - [`RunConfiguration`]: immutable run settings, with [`BamInputSpec`] inputs
//!   and an ordered [`FixList`]
//! - [`GenomeRegion`]: read-only accessors onto one analyzed span
//! - [`RegionMap`]: regions grouped by chromosome in insertion order
//! - [`RegionSummary`]: in-memory `GenomeRegion` implementation
//! - [`NormalDistribution`]: reference distribution for sigma-unit tracks
//! - [`Target`]: `--targets` entries
//!
//! ## Coordinates
//!
//! | Value | Convention |
//! |-------|------------|
//! | Region start/stop | 1-based, inclusive |
//! | [`Interval`] start/stop | 1-based, inclusive |
//! | Metric position argument | 0-based offset into the region |

pub mod config;
pub mod distribution;
pub mod region;
pub mod summary;
pub mod target;
pub mod types;

pub use config::{BamInputSpec, FixList, Heuristics, RunConfiguration};
pub use distribution::NormalDistribution;
pub use region::{GenomeRegion, Interval, RegionMap};
pub use summary::RegionSummary;
pub use target::Target;
pub use types::{FixCategory, InputRole, IssueKind};
