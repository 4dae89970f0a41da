use thiserror::Error;

/// Reasons a race configuration can be rejected
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Grid too small: {rows}x{cols} (need at least {min}x{min})")]
    GridTooSmall { rows: usize, cols: usize, min: usize },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
}
