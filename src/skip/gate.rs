use std::sync::OnceLock;

use regex::Regex;

use crate::forge::types::{CommentAction, CommentEvent, IssueState};

fn skip_command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?mi)^/skip\s*$").expect("skip pattern is valid"))
}

/// Admits an event only when it is a newly created comment on an open pull
/// request whose body carries the `/skip` command on a line of its own.
/// Rejection is a silent no-op, not a failure.
pub fn admits(event: &CommentEvent) -> bool {
    event.is_pull_request
        && event.issue_state == IssueState::Open
        && event.action == CommentAction::Created
        && skip_command_pattern().is_match(&event.body)
}
