//! Tunable parameters for raster clustering.
//!
//! Configuration can be built programmatically or loaded from JSON:
//!
//! ```no_run
//! use logo_colors_wasm::ClusterConfig;
//! use std::path::Path;
//!
//! let config = ClusterConfig::from_json_file(Path::new("cluster.json"))?;
//! # Ok::<(), logo_colors_wasm::DetectError>(())
//! ```
//!
//! Missing fields fall back to the reference configuration
//! (5 colors, 10 restarts x 20 iterations, epsilon 1.0).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};

/// Default number of representative colors for raster input.
pub const DEFAULT_MAX_COLORS: usize = 5;

/// k-means cluster indices are stored as `u8`, so 256 clusters is the most
/// that can be addressed.
pub const MAX_CLUSTERS: usize = u8::MAX as usize + 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Upper bound on the number of clusters (K)
    pub max_colors: usize,

    /// Independent k-means restarts; the lowest-variance run wins
    pub runs: usize,

    /// Iteration cap for a single restart
    pub max_iterations: usize,

    /// Centroid movement, in 8-bit channel units, below which a restart stops
    pub epsilon: f32,

    /// Fixed seed for reproducible clustering. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_colors: DEFAULT_MAX_COLORS,
            runs: 10,
            max_iterations: 20,
            epsilon: 1.0,
            seed: None,
        }
    }
}

impl ClusterConfig {
    pub fn with_max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| DetectError::io(path, e))?;
        let config: ClusterConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_colors == 0 {
            return Err(DetectError::InvalidInput("max_colors must be at least 1".into()));
        }
        if self.max_colors > MAX_CLUSTERS {
            return Err(DetectError::InvalidInput(format!(
                "max_colors must be at most {MAX_CLUSTERS}, got {}",
                self.max_colors
            )));
        }
        if self.runs == 0 || self.max_iterations == 0 {
            return Err(DetectError::InvalidInput(
                "runs and max_iterations must be at least 1".into(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(DetectError::InvalidInput(format!(
                "epsilon must be a non-negative number, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// Convergence threshold as `kmeans_colors` measures it: the summed
    /// squared centroid movement in unit-range sRGB.
    pub(crate) fn kmeans_converge(&self) -> f32 {
        let unit = self.epsilon / 255.0;
        unit * unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_configuration() {
        let config = ClusterConfig::default();
        assert_eq!(config.max_colors, 5);
        assert_eq!(config.runs, 10);
        assert_eq!(config.max_iterations, 20);
        assert_eq!(config.epsilon, 1.0);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClusterConfig = serde_json::from_str(r#"{"max_colors": 8, "seed": 42}"#).unwrap();
        assert_eq!(config.max_colors, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.runs, 10);
    }

    #[test]
    fn test_validate_rejects_zero_colors() {
        let config = ClusterConfig::default().with_max_colors(0);
        assert!(matches!(config.validate(), Err(DetectError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_too_many_clusters() {
        let config = ClusterConfig::default().with_max_colors(300);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cluster_cap_is_full_u8_index_range() {
        assert!(ClusterConfig::default().with_max_colors(256).validate().is_ok());
        assert!(ClusterConfig::default().with_max_colors(257).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_epsilon() {
        let config = ClusterConfig {
            epsilon: -1.0,
            ..ClusterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let err = ClusterConfig::from_json_file(Path::new("/nonexistent/cluster.json")).unwrap_err();
        assert!(matches!(err, DetectError::Io { .. }));
    }
}
