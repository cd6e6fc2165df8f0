use serde::{Deserialize, Serialize};

/// One configured CI check for a repository. `context` is the unique
/// reporting key; `required` checks block merge and are exempt from
/// force-skipping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDefinition {
    pub name: String,
    pub context: String,
    #[serde(default)]
    pub required: bool,
}

impl CheckDefinition {
    pub fn new(name: impl Into<String>, context: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            context: context.into(),
            required,
        }
    }
}
