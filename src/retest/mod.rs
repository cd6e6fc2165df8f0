pub mod error;
pub mod filter;
pub mod ports;
pub mod types;

pub use error::{RetestError, RetestErrorKind};
pub use filter::{CommandOverlapResolver, RetestFilter};
pub use ports::OverlapResolverPort;
pub use types::TriggerOverlapSet;
