use kiroku_api::MalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("missing credentials: {0}")]
    Credentials(&'static str),

    #[error(transparent)]
    Api(#[from] MalError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
