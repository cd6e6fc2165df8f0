use async_trait::async_trait;

use crate::forge::{
    error::{ForgeError, internal_error},
    ports::ForgeClientPort,
    types::{CombinedStatus, PullRequest, Repo, Status},
};

/// Placeholder forge client: writes are swallowed, reads fail. Useful for
/// wiring paths that must never reach the forge.
#[derive(Debug, Clone, Default)]
pub struct NoopForge;

#[async_trait]
impl ForgeClientPort for NoopForge {
    async fn pull_request(&self, repo: &Repo, number: u64) -> Result<PullRequest, ForgeError> {
        Err(internal_error(format!(
            "noop forge client cannot serve pull request {repo}#{number}"
        )))
    }

    async fn combined_status(&self, repo: &Repo, _sha: &str) -> Result<CombinedStatus, ForgeError> {
        Err(internal_error(format!(
            "noop forge client cannot serve combined status for {repo}"
        )))
    }

    async fn create_status(
        &self,
        _repo: &Repo,
        _sha: &str,
        _status: Status,
    ) -> Result<(), ForgeError> {
        Ok(())
    }

    async fn create_comment(
        &self,
        _repo: &Repo,
        _number: u64,
        _body: &str,
    ) -> Result<(), ForgeError> {
        Ok(())
    }
}
