#![forbid(unsafe_code)]

//! Configuration for one resizable region.
//!
//! [`ResizeConfig`] groups everything a host supplies at construction: the
//! initial size, the spring preset plus per-field overrides, size
//! constraints and snap behavior. With the `config-file` feature it can be
//! loaded from TOML or JSON.
//!
//! ```toml
//! initial_width = 480
//! initial_height = 270
//! preset = "snappy"
//!
//! [spring]
//! friction = 34
//!
//! [constraints]
//! aspect_ratio = 1.7777777777777777
//! min = { width = 160 }
//!
//! [snap]
//! increment = 8
//! ```
//!
//! # Defaults
//!
//! `ResizeConfig::default()` is a 320×200 region with the `professional`
//! preset, no constraints and no snapping.

#[cfg(feature = "config-file")]
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constraint::Constraints;
use crate::snap::SnapConfig;
use crate::spring::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SpringConfig, SpringOverride, SpringPreset};

/// Everything needed to construct a resize engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub initial_width: f64,
    pub initial_height: f64,
    /// Named parameter triple used as the base.
    pub preset: SpringPreset,
    /// Per-field overrides layered over `preset`.
    pub spring: SpringOverride,
    pub constraints: Constraints,
    pub snap: SnapConfig,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            initial_width: DEFAULT_WIDTH,
            initial_height: DEFAULT_HEIGHT,
            preset: SpringPreset::default(),
            spring: SpringOverride::default(),
            constraints: Constraints::default(),
            snap: SnapConfig::default(),
        }
    }
}

impl ResizeConfig {
    #[must_use]
    pub fn with_initial_size(mut self, width: f64, height: f64) -> Self {
        self.initial_width = width;
        self.initial_height = height;
        self
    }

    #[must_use]
    pub fn with_preset(mut self, preset: SpringPreset) -> Self {
        self.preset = preset;
        self
    }

    #[must_use]
    pub fn with_spring(mut self, spring: SpringOverride) -> Self {
        self.spring = spring;
        self
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    #[must_use]
    pub fn with_snap(mut self, snap: SnapConfig) -> Self {
        self.snap = snap;
        self
    }

    /// Preset merged with overrides.
    #[must_use]
    pub fn resolved_spring(&self) -> SpringConfig {
        self.preset.resolve(&self.spring)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of violations; empty means valid. Spring parameters are
    /// not range-checked.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("initial_width", self.initial_width),
            ("initial_height", self.initial_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be finite and >= 0, got {value}"));
            }
        }

        errors.extend(self.constraints.validate());
        errors.extend(self.snap.validate());
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::parse("TOML", e))?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(|e| ConfigError::parse("JSON", e))?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config-file")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Serialize {
            format: "TOML",
            source: e.into(),
        })
    }

    #[cfg(feature = "config-file")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Boxed cause of a parse or serialize failure.
pub type FormatError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a configuration could not be loaded or written.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read resize config: {0}")]
    Io(#[source] std::io::Error),
    /// `format` is `"TOML"` or `"JSON"`.
    #[error("malformed {format} resize config: {source}")]
    Parse {
        format: &'static str,
        #[source]
        source: FormatError,
    },
    #[error("cannot write resize config as {format}: {source}")]
    Serialize {
        format: &'static str,
        #[source]
        source: FormatError,
    },
    /// Parsed fine but failed [`ResizeConfig::validate`].
    #[error("invalid resize config: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(feature = "config-file")]
impl ConfigError {
    fn parse(format: &'static str, source: impl Into<FormatError>) -> Self {
        Self::Parse {
            format,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::SizeBound;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = ResizeConfig::default();
        assert_eq!(cfg.initial_width, 320.0);
        assert_eq!(cfg.initial_height, 200.0);
        assert_eq!(cfg.preset, SpringPreset::Professional);
        assert_eq!(cfg.resolved_spring(), SpringPreset::Professional.config());
        assert!(cfg.constraints.is_unconstrained());
        assert!(!cfg.snap.is_active());
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn resolved_spring_applies_override() {
        let cfg = ResizeConfig::default()
            .with_preset(SpringPreset::Gentle)
            .with_spring(SpringOverride::none().with_tension(300.0));
        assert_eq!(cfg.resolved_spring(), SpringConfig::new(300.0, 30.0, 1.0));
    }

    #[test]
    fn validate_collects_all_sections() {
        let cfg = ResizeConfig::default()
            .with_initial_size(f64::NAN, -1.0)
            .with_constraints(
                Constraints::none()
                    .with_min(SizeBound::width(50.0))
                    .with_max(SizeBound::width(10.0)),
            )
            .with_snap(SnapConfig::increment(10.0).with_threshold(-2.0));
        let errors = cfg.validate();
        assert_eq!(errors.len(), 4, "{errors:?}");
    }

    #[test]
    fn json_partial_document_uses_defaults() {
        let cfg: ResizeConfig =
            serde_json::from_str(r#"{"preset":"snappy","snap":{"increment":10}}"#).unwrap();
        assert_eq!(cfg.initial_width, 320.0);
        assert_eq!(cfg.preset, SpringPreset::Snappy);
        assert_eq!(cfg.snap.increment, Some(10.0));
        assert_eq!(cfg.snap.threshold, 5.0);
    }

    #[test]
    fn validation_error_display_joins_messages() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid resize config: a; b");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn io_error_is_kept_as_source() {
        let err = ConfigError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "cannot read resize config: gone");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("gone"));
    }
}
