use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use skipper::{
    checks::{resolver::ConfiguredCheckResolver, types::CheckDefinition},
    dispatch::registry::CommentHandlerPort,
    forge::{
        error::{ForgeError, remote_status},
        ports::ForgeClientPort,
        types::{
            BranchRef, CombinedStatus, CommentAction, CommentEvent, IssueState, PullRequest, Repo,
            Status, StatusState,
        },
    },
    retest::filter::CommandOverlapResolver,
    skip::{handler::SkipHandler, types::SKIPPED_DESCRIPTION},
};

struct RecordingForge {
    pull: Option<PullRequest>,
    combined: Option<CombinedStatus>,
    failing_status_contexts: BTreeSet<String>,
    pull_fetches: Mutex<usize>,
    status_writes: Mutex<Vec<Status>>,
    comments: Mutex<Vec<String>>,
}

impl RecordingForge {
    fn new(pull: Option<PullRequest>, combined: Option<CombinedStatus>) -> Self {
        Self {
            pull,
            combined,
            failing_status_contexts: BTreeSet::new(),
            pull_fetches: Mutex::new(0),
            status_writes: Mutex::new(Vec::new()),
            comments: Mutex::new(Vec::new()),
        }
    }

    fn failing_status_context(mut self, context: &str) -> Self {
        self.failing_status_contexts.insert(context.to_string());
        self
    }

    fn pull_fetch_count(&self) -> usize {
        *self.pull_fetches.lock().expect("lock")
    }

    fn written_statuses(&self) -> Vec<Status> {
        self.status_writes.lock().expect("lock").clone()
    }

    fn posted_comments(&self) -> Vec<String> {
        self.comments.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ForgeClientPort for RecordingForge {
    async fn pull_request(&self, repo: &Repo, number: u64) -> Result<PullRequest, ForgeError> {
        *self.pull_fetches.lock().expect("lock") += 1;
        self.pull
            .clone()
            .ok_or_else(|| remote_status(format!("get pull request {repo}#{number}: forge answered 404")))
    }

    async fn combined_status(&self, repo: &Repo, _sha: &str) -> Result<CombinedStatus, ForgeError> {
        self.combined
            .clone()
            .ok_or_else(|| remote_status(format!("get combined status for {repo}: forge answered 502")))
    }

    async fn create_status(
        &self,
        _repo: &Repo,
        _sha: &str,
        status: Status,
    ) -> Result<(), ForgeError> {
        self.status_writes.lock().expect("lock").push(status.clone());
        if self.failing_status_contexts.contains(&status.context) {
            return Err(remote_status(format!(
                "create status {}: forge answered 500",
                status.context
            )));
        }
        Ok(())
    }

    async fn create_comment(
        &self,
        _repo: &Repo,
        _number: u64,
        body: &str,
    ) -> Result<(), ForgeError> {
        self.comments.lock().expect("lock").push(body.to_string());
        Ok(())
    }
}

fn open_pull() -> PullRequest {
    PullRequest {
        number: 42,
        state: IssueState::Open,
        base: BranchRef {
            name: "main".to_string(),
            sha: "base000".to_string(),
        },
        head: BranchRef {
            name: "feature".to_string(),
            sha: "head111".to_string(),
        },
    }
}

fn skip_event(body: &str) -> CommentEvent {
    CommentEvent {
        repo: Repo::new("acme", "widget"),
        number: 42,
        is_pull_request: true,
        issue_state: IssueState::Open,
        action: CommentAction::Created,
        body: body.to_string(),
        html_url: "https://forge.example/acme/widget/pull/42#comment-1".to_string(),
        author: "alice".to_string(),
    }
}

fn status(context: &str, state: StatusState) -> Status {
    Status {
        context: context.to_string(),
        state,
        description: None,
    }
}

fn failing_combined() -> CombinedStatus {
    CombinedStatus {
        state: StatusState::Failure,
        statuses: vec![
            status("ci/unit", StatusState::Failure),
            status("ci/lint", StatusState::Failure),
        ],
    }
}

fn configured_resolver() -> ConfiguredCheckResolver {
    let mut by_repo = BTreeMap::new();
    by_repo.insert(
        "acme/widget".to_string(),
        vec![
            CheckDefinition::new("unit", "ci/unit", true),
            CheckDefinition::new("lint", "ci/lint", false),
        ],
    );
    ConfiguredCheckResolver::new(by_repo).expect("checks config should be valid")
}

fn handler_with(forge: Arc<RecordingForge>) -> SkipHandler {
    SkipHandler::new(
        forge,
        Arc::new(configured_resolver()),
        Arc::new(CommandOverlapResolver),
    )
}

#[tokio::test]
async fn skips_only_the_non_required_failing_check() {
    let forge = Arc::new(RecordingForge::new(Some(open_pull()), Some(failing_combined())));
    let handler = handler_with(Arc::clone(&forge));

    handler
        .handle(&skip_event("/skip"))
        .await
        .expect("invocation should succeed");

    let written = forge.written_statuses();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].context, "ci/lint");
    assert_eq!(written[0].state, StatusState::Success);
    assert_eq!(written[0].description.as_deref(), Some(SKIPPED_DESCRIPTION));
    assert!(forge.posted_comments().is_empty());
}

#[tokio::test]
async fn retest_directive_in_the_same_comment_wins() {
    let forge = Arc::new(RecordingForge::new(Some(open_pull()), Some(failing_combined())));
    let handler = handler_with(Arc::clone(&forge));

    handler
        .handle(&skip_event("/skip\n/test lint"))
        .await
        .expect("invocation should succeed");

    assert!(forge.written_statuses().is_empty());
    assert!(forge.posted_comments().is_empty());
}

#[tokio::test]
async fn gate_rejection_makes_no_forge_calls() {
    let forge = Arc::new(RecordingForge::new(Some(open_pull()), Some(failing_combined())));
    let handler = handler_with(Arc::clone(&forge));

    let mut edited = skip_event("/skip");
    edited.action = CommentAction::Edited;
    handler
        .handle(&edited)
        .await
        .expect("ineligible event should be a silent no-op");

    assert_eq!(forge.pull_fetch_count(), 0);
    assert!(forge.written_statuses().is_empty());
    assert!(forge.posted_comments().is_empty());
}

#[tokio::test]
async fn pull_request_fetch_failure_is_reported_to_the_author() {
    let forge = Arc::new(RecordingForge::new(None, Some(failing_combined())));
    let handler = handler_with(Arc::clone(&forge));

    handler
        .handle(&skip_event("/skip"))
        .await
        .expect_err("fetch failure should propagate");

    let comments = forge.posted_comments();
    assert_eq!(comments.len(), 1);
    assert!(comments[0].starts_with("@alice: "));
    assert!(comments[0].contains("Cannot get pull request #42"));
    assert!(comments[0].contains("https://forge.example/acme/widget/pull/42#comment-1"));
    assert!(forge.written_statuses().is_empty());
}

#[tokio::test]
async fn combined_status_fetch_failure_is_reported_to_the_author() {
    let forge = Arc::new(RecordingForge::new(Some(open_pull()), None));
    let handler = handler_with(Arc::clone(&forge));

    handler
        .handle(&skip_event("/skip"))
        .await
        .expect_err("fetch failure should propagate");

    let comments = forge.posted_comments();
    assert_eq!(comments.len(), 1);
    assert!(comments[0].contains("Cannot get combined status"));
    assert!(forge.written_statuses().is_empty());
}

#[tokio::test]
async fn unconfigured_repository_fails_without_a_user_facing_comment() {
    let forge = Arc::new(RecordingForge::new(Some(open_pull()), Some(failing_combined())));
    let handler = SkipHandler::new(
        Arc::clone(&forge) as Arc<dyn ForgeClientPort>,
        Arc::new(ConfiguredCheckResolver::new(BTreeMap::new()).expect("empty config is valid")),
        Arc::new(CommandOverlapResolver),
    );

    handler
        .handle(&skip_event("/skip"))
        .await
        .expect_err("resolution failure should propagate");

    assert!(forge.posted_comments().is_empty());
    assert!(forge.written_statuses().is_empty());
}

#[tokio::test]
async fn green_combined_status_writes_nothing() {
    let combined = CombinedStatus {
        state: StatusState::Success,
        statuses: vec![
            status("ci/unit", StatusState::Success),
            status("ci/lint", StatusState::Success),
        ],
    };
    let forge = Arc::new(RecordingForge::new(Some(open_pull()), Some(combined)));
    let handler = handler_with(Arc::clone(&forge));

    handler
        .handle(&skip_event("/skip"))
        .await
        .expect("green status should be a no-op");

    assert!(forge.written_statuses().is_empty());
    assert!(forge.posted_comments().is_empty());
}

#[tokio::test]
async fn first_status_write_failure_halts_remaining_writes() {
    let mut by_repo = BTreeMap::new();
    by_repo.insert(
        "acme/widget".to_string(),
        vec![
            CheckDefinition::new("lint", "ci/lint", false),
            CheckDefinition::new("docs", "ci/docs", false),
        ],
    );
    let combined = CombinedStatus {
        state: StatusState::Failure,
        statuses: vec![
            status("ci/lint", StatusState::Failure),
            status("ci/docs", StatusState::Failure),
        ],
    };
    let forge = Arc::new(
        RecordingForge::new(Some(open_pull()), Some(combined)).failing_status_context("ci/lint"),
    );
    let handler = SkipHandler::new(
        Arc::clone(&forge) as Arc<dyn ForgeClientPort>,
        Arc::new(ConfiguredCheckResolver::new(by_repo).expect("checks config should be valid")),
        Arc::new(CommandOverlapResolver),
    );

    handler
        .handle(&skip_event("/skip"))
        .await
        .expect_err("write failure should propagate");

    // The failed write is the only attempt; ci/docs is never reached.
    let written = forge.written_statuses();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].context, "ci/lint");

    let comments = forge.posted_comments();
    assert_eq!(comments.len(), 1);
    assert!(comments[0].contains("Cannot update status for context ci/lint"));
}
