use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("FRED API key is not set; pass --api-key or set FRED_API_KEY")]
    MissingApiKey,

    #[error(transparent)]
    Validation(#[from] fredrate_core::ValidationError),

    #[error(transparent)]
    Source(#[from] fredrate_core::SourceError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingApiKey => 2,
            Self::Validation(_) => 2,
            Self::Source(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
