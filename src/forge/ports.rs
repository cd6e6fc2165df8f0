use async_trait::async_trait;

use crate::forge::{
    error::ForgeError,
    types::{CombinedStatus, PullRequest, Repo, Status},
};

#[async_trait]
pub trait ForgeClientPort: Send + Sync {
    async fn pull_request(&self, repo: &Repo, number: u64) -> Result<PullRequest, ForgeError>;

    async fn combined_status(&self, repo: &Repo, sha: &str) -> Result<CombinedStatus, ForgeError>;

    async fn create_status(
        &self,
        repo: &Repo,
        sha: &str,
        status: Status,
    ) -> Result<(), ForgeError>;

    async fn create_comment(
        &self,
        repo: &Repo,
        number: u64,
        body: &str,
    ) -> Result<(), ForgeError>;
}
