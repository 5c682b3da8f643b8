use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    /// The request was understood but rejected (blank page name, deleting the
    /// last page, ...). The document is left untouched.
    #[error("{0}")]
    Validation(String),

    /// An imported design could not be read. The document is left untouched.
    #[error("Import failed: {0}")]
    Import(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<confique::Error> for SiteError {
    fn from(e: confique::Error) -> Self {
        SiteError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
