use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
    #[error("burst_probability must be within [0, 1], got {0}")]
    BurstProbability(f64),
    #[error("expected {expected} weights (one per port), got {actual}")]
    WeightCount { expected: usize, actual: usize },
}

/// The discipline choice read at startup was not one of 1..=4.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid scheduling algorithm selection: {0:?}")]
    Invalid(String),
}
