#![forbid(unsafe_code)]

use springsize_core::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResizeError>;

/// Errors surfaced by the resize engine.
///
/// Everything here is a programmer or configuration error. Host-side capture
/// failures never reach this type.
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("invalid resize configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("configuration load failed: {0}")]
    Config(#[from] ConfigError),
}

impl ResizeError {
    /// Violations carried by an `InvalidConfig`, or by a `Config` error that
    /// failed validation.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        match self {
            Self::InvalidConfig(errors) | Self::Config(ConfigError::Validation(errors)) => errors,
            Self::Config(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_display_lists_violations() {
        let err = ResizeError::InvalidConfig(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid resize configuration: a; b");
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn config_error_converts() {
        let err: ResizeError = ConfigError::Validation(vec!["x".into()]).into();
        assert!(matches!(err, ResizeError::Config(_)));
        assert_eq!(err.violations(), ["x".to_owned()]);
    }
}
