use thiserror::Error;

#[derive(Error, Debug)]
pub enum MozoError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("no internet connection")]
    NoInternetConnection,

    #[error("the request timed out")]
    RequestTimedOut,

    #[error("404 not found: {0}")]
    NotFound(String),

    #[error("authentication required")]
    AuthenticationRequired,

    #[error("internal server error {status}: {message}")]
    InternalServer { status: u16, message: String },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("unknown error: {0}")]
    Unknown(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("incorrect URL: {0}")]
    IncorrectUrl(String),

    #[error("user is an anonymous user")]
    NotAuthenticated,

    #[error("user profile unavailable: {0}")]
    ProfileUnavailable(Box<MozoError>),

    #[error("overflow: {0}")]
    Overflow(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("session store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MozoError {
    /// Map a non-success HTTP status onto the connection error taxonomy.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => MozoError::BadRequest(message),
            401 | 403 => MozoError::AuthenticationRequired,
            404 => MozoError::NotFound(message),
            500..=599 => MozoError::InternalServer { status, message },
            400..=499 => MozoError::Http { status, message },
            // 1xx, or a 3xx the client did not follow
            _ => MozoError::Unknown(format!("unexpected status {status}: {message}")),
        }
    }

    /// True for failures raised by the transport or the backend, as opposed
    /// to local conditions such as a missing session.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            MozoError::Network(_)
                | MozoError::NoInternetConnection
                | MozoError::RequestTimedOut
                | MozoError::NotFound(_)
                | MozoError::AuthenticationRequired
                | MozoError::InternalServer { .. }
                | MozoError::BadRequest(_)
                | MozoError::Http { .. }
                | MozoError::Unknown(_)
        )
    }
}

impl From<reqwest::Error> for MozoError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            MozoError::RequestTimedOut
        } else if e.is_connect() {
            MozoError::NoInternetConnection
        } else if let Some(status) = e.status() {
            MozoError::from_status(status.as_u16(), e.to_string())
        } else {
            MozoError::Network(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, MozoError>;
