use thiserror::Error;

#[derive(Debug, Error)]
pub enum RehabRiskError {
    #[error("{source_name} is missing columns: {missing:?}")]
    SchemaValidation {
        source_name: String,
        missing: Vec<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RehabRiskError>;
