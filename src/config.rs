//! Index configuration.
//!
//! The configuration is serializable so it can be loaded from JSON (or TOML
//! with the `toml` feature) while keeping every field optional.

use crate::error::{QuadTreeError, Result};
use crate::quadtree::DEFAULT_CAPACITY;
use crate::rectangle::Rectangle;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Quadtree index configuration
///
/// # Example
///
/// ```rust
/// use spatio_quadtree::{Config, Rectangle};
///
/// // Create default config
/// let config = Config::default();
/// assert_eq!(config.capacity, 4);
/// assert_eq!(config.domain, Rectangle::WORLD);
///
/// // Load from JSON
/// let json = r#"{
///     "capacity": 16,
///     "nearby_half_extent": 5.0
/// }"#;
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.capacity, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Point ids a node holds directly before it splits (>= 1, default: 4)
    #[serde(default = "Config::default_capacity")]
    pub capacity: usize,

    /// Root boundary. Defaults to the full longitude/latitude range.
    #[serde(default)]
    pub domain: Rectangle,

    /// Half width/height of the window used by "nearby" queries (default: 20.0)
    #[serde(default = "Config::default_nearby_half_extent")]
    pub nearby_half_extent: f64,

    /// Reject locations outside valid longitude/latitude ranges before they
    /// reach the store (default: true)
    #[serde(default = "Config::default_validate_coordinates")]
    pub validate_coordinates: bool,
}

impl Config {
    const fn default_capacity() -> usize {
        DEFAULT_CAPACITY
    }

    const fn default_nearby_half_extent() -> f64 {
        20.0
    }

    const fn default_validate_coordinates() -> bool {
        true
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        self.capacity = capacity;
        self
    }

    pub fn with_domain(mut self, domain: Rectangle) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_nearby_half_extent(mut self, half_extent: f64) -> Self {
        assert!(
            half_extent.is_finite() && half_extent > 0.0,
            "Nearby half extent must be positive and finite"
        );
        self.nearby_half_extent = half_extent;
        self
    }

    pub fn with_coordinate_validation(mut self, enabled: bool) -> Self {
        self.validate_coordinates = enabled;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(QuadTreeError::InvalidInput(
                "Capacity must be greater than zero".to_string(),
            ));
        }

        if !self.nearby_half_extent.is_finite() || self.nearby_half_extent <= 0.0 {
            return Err(QuadTreeError::InvalidInput(format!(
                "Nearby half extent must be positive and finite, got: {}",
                self.nearby_half_extent
            )));
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a TOML configuration.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
            domain: Rectangle::WORLD,
            nearby_half_extent: Self::default_nearby_half_extent(),
            validate_coordinates: Self::default_validate_coordinates(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.capacity, 4);
        assert_eq!(config.domain, Rectangle::WORLD);
        assert_eq!(config.nearby_half_extent, 20.0);
        assert!(config.validate_coordinates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_json_domain() {
        let json = r#"{"domain": {"x": 0.0, "y": 0.0, "w": 100.0, "h": 50.0}, "capacity": 2}"#;
        let config = Config::from_json_str(json).unwrap();
        assert_eq!(config.domain, Rectangle::new(0.0, 0.0, 100.0, 50.0).unwrap());
        assert_eq!(config.capacity, 2);

        let bad = r#"{"domain": {"x": 0.0, "y": 0.0, "w": -1.0, "h": 50.0}}"#;
        assert!(Config::from_json_str(bad).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::from_json_str(r#"{"capacity": 0}"#).is_err());
        assert!(Config::from_json_str(r#"{"nearby_half_extent": -2.0}"#).is_err());
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than zero")]
    fn test_with_capacity_zero_panics() {
        let _ = Config::default().with_capacity(0);
    }

    #[test]
    fn test_json_file_round_trip() {
        let config = Config::default()
            .with_capacity(10)
            .with_nearby_half_extent(2.5)
            .with_coordinate_validation(false);

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(config.to_json().unwrap().as_bytes()).unwrap();

        let loaded = Config::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_json_file("/nonexistent/quadtree.json").unwrap_err();
        assert!(matches!(err, QuadTreeError::Io(_)));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml() {
        let config = Config::from_toml_str(
            r#"
            capacity = 6
            nearby_half_extent = 1.5

            [domain]
            x = -10.0
            y = -10.0
            w = 20.0
            h = 20.0
            "#,
        )
        .unwrap();
        assert_eq!(config.capacity, 6);
        assert_eq!(config.domain.w(), 20.0);
    }
}
