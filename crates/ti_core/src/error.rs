use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntelError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot too large: {size} samples (limit {limit})")]
    SnapshotTooLarge { size: usize, limit: usize },

    #[error("Request #{0} is already in flight")]
    DuplicateRequest(u64),

    #[error("Analysis worker unavailable")]
    WorkerUnavailable,

    #[error("Analysis panicked: {0}")]
    ComputationPanicked(String),
}

impl IntelError {
    /// Whether the caller may resubmit (possibly a different) snapshot and expect success.
    pub fn is_recoverable(&self) -> bool {
        match self {
            IntelError::SnapshotTooLarge { .. } => true,
            IntelError::ComputationPanicked(_) => true,
            IntelError::Serialization(_) => true,
            IntelError::Io(_) => true,
            IntelError::DuplicateRequest(_) => true,
            IntelError::WorkerUnavailable => false,
            IntelError::InvalidConfig(_) => false,
            IntelError::ConfigParse(_) => false,
        }
    }
}

impl From<validator::ValidationErrors> for IntelError {
    fn from(err: validator::ValidationErrors) -> Self {
        IntelError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IntelError>;
