//! Run configuration

use std::path::PathBuf;

use crate::source::SourceKind;

/// Configuration for one extract-clean-load run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which source's pipeline to run
    pub source: SourceKind,
    /// Path to the raw source file
    pub input: PathBuf,
    /// Directory destination tables are written to
    pub out_dir: PathBuf,
    /// Clean and report, but do not persist
    pub stats_only: bool,
}

impl Config {
    /// Create a new Config for a source and input file
    pub fn new(source: SourceKind, input: PathBuf) -> Self {
        Self {
            source,
            input,
            out_dir: PathBuf::from("cleaned"),
            stats_only: false,
        }
    }

    /// Set the output directory
    pub fn with_out_dir(mut self, out_dir: PathBuf) -> Self {
        self.out_dir = out_dir;
        self
    }

    /// Enable stats-only mode
    pub fn with_stats_only(mut self, stats_only: bool) -> Self {
        self.stats_only = stats_only;
        self
    }
}
