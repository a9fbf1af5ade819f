use thiserror::Error;

/// Errors from the MyAnimeList XML API client.
#[derive(Debug, Error)]
pub enum MalError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("auth error (status {status}): {status_text}")]
    Auth { status: u16, status_text: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("unexpected acknowledgement: expected {expected:?}, got {body:?}")]
    UnexpectedAcknowledgement { expected: &'static str, body: String },
}

impl MalError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}

impl From<quick_xml::DeError> for MalError {
    fn from(err: quick_xml::DeError) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
