use std::{collections::BTreeSet, sync::OnceLock};

use async_trait::async_trait;
use regex::Regex;

use crate::{
    checks::types::CheckDefinition,
    forge::types::{CommentEvent, PullRequest},
    retest::{error::RetestError, ports::OverlapResolverPort, types::TriggerOverlapSet},
};

fn retest_all_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?mi)^/(?:retest|test\s+all)\s*$").expect("retest pattern is valid")
    })
}

fn test_one_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?mi)^/test\s+(\S+)\s*$").expect("test pattern is valid"))
}

/// The retest directive's own filtering logic. `/retest` and `/test all`
/// select every configured check; `/test <name>` selects checks by exact
/// name. Unknown names select nothing.
pub struct RetestFilter;

impl RetestFilter {
    pub fn overlap(body: &str, checks: &[CheckDefinition]) -> TriggerOverlapSet {
        if retest_all_pattern().is_match(body) {
            return checks
                .iter()
                .map(|check| (check.name.clone(), check.context.clone()))
                .collect();
        }

        let requested: BTreeSet<&str> = test_one_pattern()
            .captures_iter(body)
            .filter_map(|captures| captures.get(1))
            .map(|name| name.as_str())
            .collect();
        if requested.is_empty() {
            return TriggerOverlapSet::new();
        }

        checks
            .iter()
            .filter(|check| requested.contains(check.name.as_str()))
            .map(|check| (check.name.clone(), check.context.clone()))
            .collect()
    }
}

/// Port adapter over [`RetestFilter`]. The scan itself cannot fail; the port
/// keeps the fallible contract for resolvers that consult remote state.
pub struct CommandOverlapResolver;

#[async_trait]
impl OverlapResolverPort for CommandOverlapResolver {
    async fn resolve(
        &self,
        event: &CommentEvent,
        _pull: &PullRequest,
        checks: &[CheckDefinition],
    ) -> Result<TriggerOverlapSet, RetestError> {
        Ok(RetestFilter::overlap(&event.body, checks))
    }
}
