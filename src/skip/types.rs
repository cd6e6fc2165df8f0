use serde::{Deserialize, Serialize};

use crate::forge::types::{Status, StatusState};

/// Description stamped on every force-passed status.
pub const SKIPPED_DESCRIPTION: &str = "Skipped";

/// Instruction to overwrite one check's reported state with a synthetic
/// passed result. Consumed once by the status-writing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipAction {
    pub context: String,
}

impl SkipAction {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }

    pub fn into_status(self) -> Status {
        Status {
            context: self.context,
            state: StatusState::Success,
            description: Some(SKIPPED_DESCRIPTION.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SKIPPED_DESCRIPTION, SkipAction};
    use crate::forge::types::StatusState;

    #[test]
    fn action_renders_to_a_skipped_success_status() {
        let status = SkipAction::new("ci/lint").into_status();
        assert_eq!(status.context, "ci/lint");
        assert_eq!(status.state, StatusState::Success);
        assert_eq!(status.description.as_deref(), Some(SKIPPED_DESCRIPTION));
    }
}
