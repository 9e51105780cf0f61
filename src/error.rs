/// Errors produced inside the grounding pipeline.
///
/// Most layers never let these escape: the fetcher turns `Transport` into an absent
/// page and the generation client turns `Backend` into a fixed apology. Only config
/// loading and client construction hand them back to the caller.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("transport failed: {0}")]
    Transport(String),
    #[error("generation backend failed: {0}")]
    Backend(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
