use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
    checks::ports::CheckResolverPort,
    dispatch::{
        error::{DispatchError, handler_failed},
        registry::CommentHandlerPort,
    },
    forge::{
        ports::ForgeClientPort,
        respond::format_reply,
        types::{CommentEvent, StatusState},
    },
    retest::ports::OverlapResolverPort,
    skip::{engine::compute_skip_actions, gate},
};

pub const HANDLER_NAME: &str = "skip";

/// Orchestrates one `/skip` invocation: gate, collaborator fetches, the
/// decision engine, and fail-fast status writes. Boundary failures are
/// reported back to the comment author except for check resolution, which is
/// an operational fault.
pub struct SkipHandler {
    forge: Arc<dyn ForgeClientPort>,
    checks: Arc<dyn CheckResolverPort>,
    overlap: Arc<dyn OverlapResolverPort>,
}

impl SkipHandler {
    pub fn new(
        forge: Arc<dyn ForgeClientPort>,
        checks: Arc<dyn CheckResolverPort>,
        overlap: Arc<dyn OverlapResolverPort>,
    ) -> Self {
        Self {
            forge,
            checks,
            overlap,
        }
    }

    /// Best-effort user-visible failure report; the invocation is already
    /// failing, so an unpostable reply is only logged.
    async fn reply(&self, event: &CommentEvent, message: &str) {
        let body = format_reply(event, message);
        if let Err(err) = self
            .forge
            .create_comment(&event.repo, event.number, &body)
            .await
        {
            warn!(
                target: "skip",
                repo = %event.repo,
                number = event.number,
                error = %err,
                "failure_reply_not_posted"
            );
        }
    }

    async fn reply_and_fail(
        &self,
        event: &CommentEvent,
        message: String,
    ) -> Result<(), DispatchError> {
        warn!(
            target: "skip",
            repo = %event.repo,
            number = event.number,
            message = %message,
            "skip_invocation_failed"
        );
        self.reply(event, &message).await;
        Err(handler_failed(message))
    }
}

#[async_trait]
impl CommentHandlerPort for SkipHandler {
    fn name(&self) -> &'static str {
        HANDLER_NAME
    }

    async fn handle(&self, event: &CommentEvent) -> Result<(), DispatchError> {
        if !gate::admits(event) {
            return Ok(());
        }

        let repo = &event.repo;

        let pull = match self.forge.pull_request(repo, event.number).await {
            Ok(pull) => pull,
            Err(err) => {
                return self
                    .reply_and_fail(
                        event,
                        format!("Cannot get pull request #{} in {repo}: {err}", event.number),
                    )
                    .await;
            }
        };

        // Operational fault: aborts without a user-facing comment.
        let checks = self
            .checks
            .resolve(repo, &pull.base, &pull.head)
            .await
            .map_err(|err| {
                handler_failed(format!("failed to resolve configured checks for {repo}: {err}"))
            })?;

        let combined = match self.forge.combined_status(repo, &pull.head.sha).await {
            Ok(combined) => combined,
            Err(err) => {
                return self
                    .reply_and_fail(
                        event,
                        format!(
                            "Cannot get combined status for pull request #{} in {repo}: {err}",
                            event.number
                        ),
                    )
                    .await;
            }
        };
        if combined.state == StatusState::Success {
            return Ok(());
        }

        let overlap = match self.overlap.resolve(event, &pull, &checks).await {
            Ok(overlap) => overlap,
            Err(err) => {
                return self
                    .reply_and_fail(
                        event,
                        format!(
                            "Cannot resolve retest overlap for pull request #{} in {repo}: {err}",
                            event.number
                        ),
                    )
                    .await;
            }
        };

        let actions = compute_skip_actions(&checks, &combined, &overlap);
        info!(
            target: "skip",
            repo = %repo,
            number = event.number,
            head = %pull.head.sha,
            actions = actions.len(),
            "skip_actions_computed"
        );

        for action in actions {
            let context = action.context.clone();
            if let Err(err) = self
                .forge
                .create_status(repo, &pull.head.sha, action.into_status())
                .await
            {
                // Fail fast: already-applied skips are idempotent and stay.
                return self
                    .reply_and_fail(event, format!("Cannot update status for context {context}: {err}"))
                    .await;
            }
        }

        Ok(())
    }
}
