use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not logged in")]
    NotLoggedIn,

    #[error("network error: {0}")]
    Network(String),

    #[error("server rejected request: http {0}")]
    Rejected(u16),

    #[error("unexpected payload: {0}")]
    Payload(String),

    #[error("config error: {0}")]
    Config(String),
}

/// Coarse classification surfaced alongside the error text so the
/// presentation layer can pick wording without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Network,
    Server,
    Payload,
    Config,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::InvalidCredentials | ClientError::NotLoggedIn => ErrorKind::Auth,
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Rejected(_) => ErrorKind::Server,
            ClientError::Payload(_) => ErrorKind::Payload,
            ClientError::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Payload(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Value held in the observable last-error slot. Last write wins; only one
/// error is retained at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ClientError> for LastError {
    fn from(err: &ClientError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
