pub mod error;
pub mod registry;

pub use error::{DispatchError, DispatchErrorKind};
pub use registry::{CommentHandlerPort, InMemoryHandlerRegistry};
