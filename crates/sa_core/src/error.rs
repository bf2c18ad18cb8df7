use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Unsupported platform. {0}")]
    UnsupportedPlatform(String),

    #[error("{reason}")]
    Fetch { status: u16, reason: String },

    #[error("{0}")]
    InsufficientContent(String),

    #[error("{0} API key not configured")]
    MissingCredential(String),

    #[error("{0}")]
    Analysis(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// HTTP-style status for this failure class.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidRequest(_) | Error::UnsupportedPlatform(_) => 400,
            Error::InsufficientContent(_) => 422,
            Error::Fetch { .. } | Error::Http(_) => 502,
            Error::MissingCredential(_)
            | Error::Analysis(_)
            | Error::Serialization(_)
            | Error::Internal(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
