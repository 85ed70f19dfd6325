//! Configuration management for the mule link analyzer

/// Settings for linkage graph construction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildConfig {
    /// Largest attribute bucket that still generates pairwise links.
    /// `None` means every bucket is linked regardless of size.
    pub max_bucket_size: Option<usize>,
}

/// Settings for cluster analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Clusters smaller than this are left out of the reports
    pub min_cluster_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { min_cluster_size: 1 }
    }
}

/// Top-level configuration for a full run
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub build: BuildConfig,
    pub analysis: AnalyzerConfig,
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(max_bucket_size: Option<usize>, min_cluster_size: usize) -> Self {
        Self {
            build: BuildConfig { max_bucket_size },
            analysis: AnalyzerConfig {
                // A zero minimum would mean the same thing as one
                min_cluster_size: min_cluster_size.max(1),
            },
        }
    }
}
