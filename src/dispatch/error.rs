use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchErrorKind {
    RegistrationInvalid,
    HandlerConflict,
    HandlerFailed,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    pub kind: DispatchErrorKind,
    pub message: String,
}

impl DispatchError {
    pub fn new(kind: DispatchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DispatchError {}

pub fn registration_invalid(message: impl Into<String>) -> DispatchError {
    DispatchError::new(DispatchErrorKind::RegistrationInvalid, message)
}

pub fn handler_conflict(message: impl Into<String>) -> DispatchError {
    DispatchError::new(DispatchErrorKind::HandlerConflict, message)
}

pub fn handler_failed(message: impl Into<String>) -> DispatchError {
    DispatchError::new(DispatchErrorKind::HandlerFailed, message)
}

pub fn internal_error(message: impl Into<String>) -> DispatchError {
    DispatchError::new(DispatchErrorKind::Internal, message)
}
