use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetestErrorKind {
    ResolutionFailed,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetestError {
    pub kind: RetestErrorKind,
    pub message: String,
}

impl RetestError {
    pub fn new(kind: RetestErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for RetestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RetestError {}

pub fn resolution_failed(message: impl Into<String>) -> RetestError {
    RetestError::new(RetestErrorKind::ResolutionFailed, message)
}

pub fn internal_error(message: impl Into<String>) -> RetestError {
    RetestError::new(RetestErrorKind::Internal, message)
}
