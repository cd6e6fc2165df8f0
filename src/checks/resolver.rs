use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use crate::{
    checks::{
        error::{CheckError, invalid_config, unconfigured_repo},
        ports::CheckResolverPort,
        types::CheckDefinition,
    },
    config::ChecksConfig,
    forge::types::{BranchRef, Repo},
};

/// Check resolver backed by the service config file, keyed by `org/repo`.
#[derive(Debug)]
pub struct ConfiguredCheckResolver {
    by_repo: BTreeMap<String, Vec<CheckDefinition>>,
}

impl ConfiguredCheckResolver {
    pub fn new(by_repo: BTreeMap<String, Vec<CheckDefinition>>) -> Result<Self, CheckError> {
        for (repo, checks) in &by_repo {
            let mut contexts = BTreeSet::new();
            for check in checks {
                if check.name.trim().is_empty() || check.context.trim().is_empty() {
                    return Err(invalid_config(format!(
                        "check name/context cannot be empty for repository '{repo}'"
                    )));
                }
                if !contexts.insert(check.context.as_str()) {
                    return Err(invalid_config(format!(
                        "duplicate check context '{}' for repository '{repo}'",
                        check.context
                    )));
                }
            }
        }
        Ok(Self { by_repo })
    }

    pub fn from_config(config: &ChecksConfig) -> Result<Self, CheckError> {
        Self::new(config.repositories.clone())
    }

    pub fn repository_count(&self) -> usize {
        self.by_repo.len()
    }
}

#[async_trait]
impl CheckResolverPort for ConfiguredCheckResolver {
    async fn resolve(
        &self,
        repo: &Repo,
        _base: &BranchRef,
        _head: &BranchRef,
    ) -> Result<Vec<CheckDefinition>, CheckError> {
        self.by_repo
            .get(&repo.full_name())
            .cloned()
            .ok_or_else(|| {
                unconfigured_repo(format!("no checks configured for repository {repo}"))
            })
    }
}
