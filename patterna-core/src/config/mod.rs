//! Configuration types for Patterna

use crate::PatternaError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub distance: DistanceConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceConfig {
    /// Registry key of the distance (`TED` or `ABS`)
    #[serde(default = "default_distance_kind")]
    pub kind: String,
    /// Disable the Alpha/Digit vs Alphanum generalization rule
    #[serde(default = "default_strict")]
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Registry key of the collector (`group`, `cluster` or `neighbor`)
    #[serde(default = "default_collector_kind")]
    pub kind: String,
    /// Neighborhood radius for density clustering
    #[serde(default = "default_eps")]
    pub eps: f64,
    /// Rows (the point itself included) needed inside `eps` for a core point
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Registry key of the aligner (`pro` or `pad`)
    #[serde(default = "default_aligner")]
    pub aligner: String,
    #[serde(default = "default_keep_gaps_together")]
    pub keep_gaps_together: bool,
    /// Cost of one inserted gap column in profile merges
    #[serde(default = "default_gap_penalty")]
    pub gap_penalty: u32,
    #[serde(default = "default_use_guide_tree")]
    pub use_guide_tree: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Minimum number of rows before work is spread over the rayon pool
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

// Default value functions
fn default_distance_kind() -> String { "TED".to_string() }
fn default_strict() -> bool { false }
fn default_collector_kind() -> String { "group".to_string() }
fn default_eps() -> f64 { 0.1 }
fn default_min_samples() -> usize { 5 }
fn default_aligner() -> String { "pro".to_string() }
fn default_keep_gaps_together() -> bool { false }
fn default_gap_penalty() -> u32 { 1 }
fn default_use_guide_tree() -> bool { true }
fn default_parallel() -> bool { true }
fn default_parallel_threshold() -> usize { 64 }

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            kind: default_distance_kind(),
            strict: default_strict(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            kind: default_collector_kind(),
            eps: default_eps(),
            min_samples: default_min_samples(),
        }
    }
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            aligner: default_aligner(),
            keep_gaps_together: default_keep_gaps_together(),
            gap_penalty: default_gap_penalty(),
            use_guide_tree: default_use_guide_tree(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl PerformanceConfig {
    /// Never leave the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            parallel_threshold: usize::MAX,
        }
    }

    /// Go parallel once a job reaches `threshold` inputs
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            parallel: true,
            parallel_threshold: threshold,
        }
    }

    /// Whether a job over `items` inputs should run on the rayon pool
    pub fn use_parallel(&self, items: usize) -> bool {
        self.parallel && items >= self.parallel_threshold
    }
}

impl Config {
    /// Check numeric settings. Registry keys are checked when the
    /// components are built.
    pub fn validate(&self) -> Result<(), PatternaError> {
        if !self.collector.eps.is_finite() || self.collector.eps < 0.0 {
            return Err(PatternaError::Configuration(format!(
                "collector.eps must be a non-negative number, got {}",
                self.collector.eps
            )));
        }
        if self.collector.min_samples == 0 {
            return Err(PatternaError::Configuration(
                "collector.min_samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, PatternaError> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| PatternaError::Configuration(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), PatternaError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| PatternaError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path.as_ref(), contents)?;
    debug!("Saved configuration to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.distance.kind, "TED");
        assert!(!config.distance.strict);

        assert_eq!(config.collector.kind, "group");
        assert_eq!(config.collector.eps, 0.1);
        assert_eq!(config.collector.min_samples, 5);

        assert_eq!(config.alignment.aligner, "pro");
        assert!(!config.alignment.keep_gaps_together);
        assert_eq!(config.alignment.gap_penalty, 1);
        assert!(config.alignment.use_guide_tree);

        assert!(config.performance.parallel);
        assert_eq!(config.performance.parallel_threshold, 64);
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[collector]
kind = "cluster"
eps = 0.25

[alignment]
use_guide_tree = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.collector.kind, "cluster");
        assert_eq!(config.collector.eps, 0.25);
        assert!(!config.alignment.use_guide_tree);

        // Defaults for everything else
        assert_eq!(config.collector.min_samples, 5);
        assert_eq!(config.alignment.gap_penalty, 1);
        assert_eq!(config.distance.kind, "TED");
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "this is not valid TOML {{").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            PatternaError::Configuration(msg) => assert!(msg.contains("Failed to parse config")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[collector]\nmin_samples = 0\n").unwrap();

        assert!(matches!(
            load_config(temp_file.path()),
            Err(PatternaError::Configuration(_))
        ));
    }

    #[test]
    fn test_load_nonexistent_file() {
        match load_config("/nonexistent/path/to/patterna.toml").unwrap_err() {
            PatternaError::Io(_) => {}
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.collector.kind = "neighbor".to_string();
        config.alignment.keep_gaps_together = true;
        config.alignment.gap_penalty = 4;
        config.performance.parallel = false;

        let temp_file = NamedTempFile::new().unwrap();
        save_config(temp_file.path(), &config).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded.collector.kind, "neighbor");
        assert!(loaded.alignment.keep_gaps_together);
        assert_eq!(loaded.alignment.gap_penalty, 4);
        assert!(!loaded.performance.parallel);
    }

    #[test]
    fn test_validate_negative_eps() {
        let mut config = Config::default();
        config.collector.eps = -0.5;
        assert!(config.validate().is_err());

        config.collector.eps = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_use_parallel_threshold() {
        let mut perf = PerformanceConfig::default();
        assert!(!perf.use_parallel(10));
        assert!(perf.use_parallel(64));

        perf.parallel = false;
        assert!(!perf.use_parallel(1000));

        assert!(!PerformanceConfig::sequential().use_parallel(usize::MAX - 1));
        assert!(PerformanceConfig::with_threshold(2).use_parallel(2));
    }
}
