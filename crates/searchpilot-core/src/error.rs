use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("Invalid strategy: {0} (expected 'mobile' or 'desktop')")]
    InvalidStrategy(String),

    #[error("Failed to parse PageSpeed response: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
