use async_trait::async_trait;

use crate::{
    checks::{error::CheckError, types::CheckDefinition},
    forge::types::{BranchRef, Repo},
};

/// Resolves the configured check sequence for a repository at a base/head
/// pair. The refs parameterize ref-aware resolvers; the static resolver
/// ignores them.
#[async_trait]
pub trait CheckResolverPort: Send + Sync {
    async fn resolve(
        &self,
        repo: &Repo,
        base: &BranchRef,
        head: &BranchRef,
    ) -> Result<Vec<CheckDefinition>, CheckError>;
}
