//! Error types for lattice rendering and correction diagnostics.

use thiserror::Error;

/// Validation and input errors raised by the visualization layer.
///
/// Filesystem failures are reported through `anyhow` with path context;
/// this enum covers everything that is wrong with the *data* handed in.
#[derive(Error, Debug)]
pub enum VizError {
    /// Render configuration rejected by `RenderConfig::validate`
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Requested round does not exist in the lattice
    #[error("Round {requested} out of range (lattice has {available} rounds)")]
    RoundOutOfRange { requested: usize, available: usize },

    /// Lattice or snapshot document that failed to parse
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// TOML configuration that failed to parse
    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

impl VizError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        VizError::ConfigError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_out_of_range_message() {
        let err = VizError::RoundOutOfRange {
            requested: 7,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "Round 7 out of range (lattice has 5 rounds)"
        );
    }

    #[test]
    fn test_config_helper() {
        let err = VizError::config("unit_scale must be positive");
        assert!(matches!(err, VizError::ConfigError(_)));
        assert!(err.to_string().contains("unit_scale"));
    }
}
