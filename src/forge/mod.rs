pub mod error;
pub mod noop;
pub mod ports;
pub mod respond;
pub mod rest;
pub mod types;

pub use error::{ForgeError, ForgeErrorKind};
pub use noop::NoopForge;
pub use ports::ForgeClientPort;
pub use respond::format_reply;
pub use rest::RestForgeClient;
pub use types::{
    BranchRef, CombinedStatus, CommentAction, CommentEvent, IssueState, PullRequest, Repo, Status,
    StatusState,
};
