use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrollError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ScrollError {
    fn from(err: reqwest::Error) -> Self {
        ScrollError::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScrollError>;
