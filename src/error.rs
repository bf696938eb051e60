use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Connection, timeout or non-success status while talking to SABnzbd.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode `{mode}` response: {source}")]
    Decode {
        mode: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to convert `{field}` value {value:?}: {reason}")]
    Conversion {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid base uri: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
