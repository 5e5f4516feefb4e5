use thiserror::Error;

/// Failure of a single storefront action. None of these are fatal to the page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorefrontError {
    /// Input was missing or malformed; no request was issued.
    #[error("{0}")]
    Validation(String),
    /// The backend answered 401.
    #[error("authentication required")]
    Unauthorized,
    /// The backend rejected the request and said why.
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;

impl StorefrontError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Text to surface to the user. Transport and parse failures never leak
    /// their internals and are replaced by `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(message) | Self::Server { message, .. } => message.clone(),
            Self::Unauthorized | Self::Transport(_) | Self::Parse(_) => fallback.to_owned(),
        }
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
