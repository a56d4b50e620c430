use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowreelError {
    #[error("config error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
