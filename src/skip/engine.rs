use std::collections::BTreeMap;

use crate::{
    checks::types::CheckDefinition,
    forge::types::{CombinedStatus, Status, StatusState},
    retest::types::TriggerOverlapSet,
    skip::types::SkipAction,
};

/// Decides which configured checks to force-mark as passed. Pure and
/// deterministic: configuration order is preserved in the output, and every
/// emitted action is independently idempotent.
///
/// A check produces no action when it never posted a status, is already
/// successful, is claimed by a retest directive in the same comment, or is
/// required.
pub fn compute_skip_actions(
    checks: &[CheckDefinition],
    combined: &CombinedStatus,
    overlap: &TriggerOverlapSet,
) -> Vec<SkipAction> {
    if combined.state == StatusState::Success {
        return Vec::new();
    }

    let index = status_index(combined);

    let mut actions = Vec::new();
    for check in checks {
        let Some(status) = index.get(check.context.as_str()) else {
            continue;
        };
        if status.state == StatusState::Success {
            continue;
        }
        if overlap.contains(&check.name, &check.context) {
            continue;
        }
        if check.required {
            continue;
        }
        actions.push(SkipAction::new(check.context.clone()));
    }
    actions
}

/// Contexts are unique per combined-status report; a duplicate would simply
/// keep the later entry.
fn status_index(combined: &CombinedStatus) -> BTreeMap<&str, &Status> {
    combined
        .statuses
        .iter()
        .map(|status| (status.context.as_str(), status))
        .collect()
}
