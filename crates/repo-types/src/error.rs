use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Parameter {parameter} out of range ({value}): {message}")]
    Range {
        parameter: &'static str,
        value: f64,
        message: String,
    },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Insufficient mass: requested {requested} kg, available {available} kg")]
    InsufficientMass { requested: f64, available: f64 },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing model: {0}")]
    NullModel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
