use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgeErrorKind {
    RequestFailed,
    RemoteStatus,
    Decode,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeError {
    pub kind: ForgeErrorKind,
    pub message: String,
}

impl ForgeError {
    pub fn new(kind: ForgeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ForgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ForgeError {}

pub fn request_failed(message: impl Into<String>) -> ForgeError {
    ForgeError::new(ForgeErrorKind::RequestFailed, message)
}

pub fn remote_status(message: impl Into<String>) -> ForgeError {
    ForgeError::new(ForgeErrorKind::RemoteStatus, message)
}

pub fn decode_error(message: impl Into<String>) -> ForgeError {
    ForgeError::new(ForgeErrorKind::Decode, message)
}

pub fn internal_error(message: impl Into<String>) -> ForgeError {
    ForgeError::new(ForgeErrorKind::Internal, message)
}
