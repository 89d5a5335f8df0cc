use thiserror::Error;

/// Errors raised by the dashboard library
/// Domain errors (bad chart input, bad colors) plus the I/O layers underneath loaders
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("chart has no positive total ({segments} segments)")]
    EmptyChart { segments: usize },

    #[error("invalid segment '{label}': value {value} must be finite and >= 0")]
    InvalidSegment { label: String, value: f64 },

    #[error("invalid hex color: {0}")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
