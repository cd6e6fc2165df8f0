use async_trait::async_trait;

use crate::{
    checks::types::CheckDefinition,
    forge::types::{CommentEvent, PullRequest},
    retest::{error::RetestError, types::TriggerOverlapSet},
};

/// Resolves which configured checks a sibling retest directive in the same
/// comment will handle, so the skip engine defers to it.
#[async_trait]
pub trait OverlapResolverPort: Send + Sync {
    async fn resolve(
        &self,
        event: &CommentEvent,
        pull: &PullRequest,
        checks: &[CheckDefinition],
    ) -> Result<TriggerOverlapSet, RetestError>;
}
