use thiserror::Error;

/// Failures talking to the knowledge base. An empty result set is not an
/// error.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("knowledge base unreachable: {0}")]
    Transport(String),
    #[error("knowledge base answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed knowledge base response: {0}")]
    Decode(String),
    #[error("invalid query input: {0}")]
    InvalidInput(String),
}

impl RetrievalError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        RetrievalError::InvalidInput(msg.into())
    }
}

impl From<reqwest::Error> for RetrievalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RetrievalError::Decode(err.to_string())
        } else if err.is_timeout() {
            RetrievalError::Transport(format!("request timed out: {err}"))
        } else {
            RetrievalError::Transport(err.to_string())
        }
    }
}
