use crate::error::{PlacementError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for ranking placements across a directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Files at or below this confidence are discarded
    pub threshold: f64,

    /// Maximum number of placements returned
    pub max_results: usize,

    /// Descend into subdirectories
    pub recursive: bool,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            max_results: 2,
            recursive: false,
        }
    }
}

impl RankerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PlacementError::invalid_input(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }

        if self.max_results == 0 {
            return Err(PlacementError::invalid_input("max_results must be > 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = RankerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_results, 2);
    }

    #[test]
    fn test_config_validation() {
        let mut config = RankerConfig {
            threshold: 1.5,
            ..RankerConfig::default()
        };
        assert!(config.validate().is_err());

        config.threshold = 0.5;
        config.max_results = 0;
        assert!(config.validate().is_err());

        config.max_results = 5;
        assert!(config.validate().is_ok());
    }
}
