use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid report interval: {0}")]
    InvalidInterval(String),

    #[error("Report sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::IoError(err.to_string())
    }
}
