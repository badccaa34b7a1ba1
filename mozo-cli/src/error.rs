use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("mozo error: {0}")]
    Mozo(#[from] mozo::MozoError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing access token: pass --token or set MOZO_ACCESS_TOKEN")]
    MissingToken,

    #[error("interrupted")]
    Interrupted,
}
