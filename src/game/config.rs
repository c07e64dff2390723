use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Chance that a newly placed food reverses the snake when eaten
    pub reversal_probability: f64,
    /// Milliseconds between movement ticks
    pub tick_interval_ms: u64,
    /// Fixed RNG seed for reproducible games
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            reversal_probability: 0.3,
            tick_interval_ms: 150,
            seed: None,
        }
    }
}

impl GameConfig {
    pub const MAX_SIDE: usize = 100;
    pub const MIN_TICK_INTERVAL_MS: u64 = 10;

    /// Create a new configuration with custom grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_reversal_probability(mut self, probability: f64) -> Self {
        self.reversal_probability = probability;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Load a JSON config file. Missing fields fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=Self::MAX_SIDE).contains(&self.rows) {
            bail!("rows must be between 1 and {}, got {}", Self::MAX_SIDE, self.rows);
        }
        if !(1..=Self::MAX_SIDE).contains(&self.cols) {
            bail!("cols must be between 1 and {}, got {}", Self::MAX_SIDE, self.cols);
        }
        if self.rows * self.cols < 2 {
            bail!("the board needs at least two cells");
        }
        if !(0.0..=1.0).contains(&self.reversal_probability) {
            bail!(
                "reversal probability must be between 0.0 and 1.0, got {}",
                self.reversal_probability
            );
        }
        if self.tick_interval_ms < Self::MIN_TICK_INTERVAL_MS {
            bail!(
                "tick interval must be at least {}ms, got {}ms",
                Self::MIN_TICK_INTERVAL_MS,
                self.tick_interval_ms
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.rows, 10);
        assert_eq!(config.cols, 10);
        assert_eq!(config.reversal_probability, 0.3);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12).with_seed(7);
        assert_eq!(config.rows, 15);
        assert_eq!(config.cols, 12);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(GameConfig::new(0, 10).validate().is_err());
        assert!(GameConfig::new(10, 101).validate().is_err());
        assert!(GameConfig::new(1, 1).validate().is_err());
        assert!(GameConfig::new(1, 2).validate().is_ok());
        assert!(GameConfig::default()
            .with_reversal_probability(1.5)
            .validate()
            .is_err());
        assert!(GameConfig::default()
            .with_reversal_probability(-0.1)
            .validate()
            .is_err());

        let config = GameConfig {
            tick_interval_ms: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "rows": 12, "seed": 99 }"#).unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 10);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.tick_interval_ms, 150);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!(
            "reverse_snake_config_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "rows": 8, "cols": 9, "reversal_probability": 0.5 }"#)
            .unwrap();
        let config = GameConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, 9);
        assert_eq!(config.reversal_probability, 0.5);
    }

    #[test]
    fn test_from_missing_file() {
        let err = GameConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
