use thiserror::Error;

use powerlaw_core::AnalysisError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] powerlaw_core::ValidationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Analysis(AnalysisError::Validation(_)) => 2,
            Self::Analysis(AnalysisError::SourceUnavailable(_)) => 3,
            Self::Analysis(_) => 4,
            Self::Render(_) => 5,
            Self::Logging(_) => 10,
            Self::Serialization(_) => 10,
            Self::Io(_) => 10,
        }
    }
}
