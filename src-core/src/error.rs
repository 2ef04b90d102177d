use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Session is not authorized")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Request rejected{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Rejected { message: Option<String> },
}

/// How a failure is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Drop the local session and return to the logged-out view.
    Session,
    /// Request never completed; prior state stays displayed.
    Network,
    /// Backend answered but refused; notify and keep going.
    Application,
}

impl ApiError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Unauthorized => ErrorClass::Session,
            // An unreadable body is reported like a dropped connection
            ApiError::Transport(_) | ApiError::Decode(_) => ErrorClass::Network,
            ApiError::Forbidden | ApiError::Status(_) | ApiError::Rejected { .. } => {
                ErrorClass::Application
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<ApiError> for String {
    fn from(err: ApiError) -> Self {
        err.to_string()
    }
}

/// Client-side validation failure of a form draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: String,
        max: String,
    },
}

/// Failure of the login or registration pages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    /// Text for the page: the backend's own message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Api(ApiError::Rejected { message: Some(m) }) => m.clone(),
            other => other.to_string(),
        }
    }
}
