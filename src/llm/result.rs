use thiserror::Error;

const MISSING_CREDENTIALS_MESSAGE: &str = "Gemini API Key is missing.";
const INVALID_CREDENTIALS_MESSAGE: &str =
    "The provided API Key is not valid. Please check it and try again.";
const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate change notes. Please check your API key and network connection.";
const CANCELLED_MESSAGE: &str = "Generation was cancelled.";
const UNKNOWN_MESSAGE: &str = "An unknown error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationError,
    MissingCredentials,
    InvalidCredentials,
    GenerationFailed,
    Cancelled,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::MissingCredentials => "missing_credentials",
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::GenerationFailed => "generation_failed",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Unknown => "unknown",
        }
    }
}

/// A classified failure whose message is safe to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_credentials() -> Self {
        Self::new(ErrorKind::MissingCredentials, MISSING_CREDENTIALS_MESSAGE)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, INVALID_CREDENTIALS_MESSAGE)
    }

    pub fn generation_failed() -> Self {
        Self::new(ErrorKind::GenerationFailed, GENERATION_FAILED_MESSAGE)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, CANCELLED_MESSAGE)
    }

    pub fn unknown() -> Self {
        Self::new(ErrorKind::Unknown, UNKNOWN_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success { text: String },
    Failure(Failure),
}

impl From<Failure> for GenerationResult {
    fn from(failure: Failure) -> Self {
        GenerationResult::Failure(failure)
    }
}
