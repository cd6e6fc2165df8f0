use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckErrorKind {
    InvalidConfig,
    UnconfiguredRepo,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckError {
    pub kind: CheckErrorKind,
    pub message: String,
}

impl CheckError {
    pub fn new(kind: CheckErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CheckError {}

pub fn invalid_config(message: impl Into<String>) -> CheckError {
    CheckError::new(CheckErrorKind::InvalidConfig, message)
}

pub fn unconfigured_repo(message: impl Into<String>) -> CheckError {
    CheckError::new(CheckErrorKind::UnconfiguredRepo, message)
}

pub fn internal_error(message: impl Into<String>) -> CheckError {
    CheckError::new(CheckErrorKind::Internal, message)
}
