//! Request path predicate.

use super::{first_match, put_uri_template_variables, Exchange, MatchResult, RoutePredicate};
use crate::config::PathConfig;
use crate::error::PatternError;
use crate::pattern::{AntPathMatcher, CompiledPattern, MatcherOptions};
use std::sync::Arc;

/// Matches the request path against slash-delimited patterns, first match
/// wins. Uses the same pattern syntax as [`super::HostRoutePredicate`].
#[derive(Debug, Clone)]
pub struct PathRoutePredicate {
    patterns: Vec<Arc<CompiledPattern>>,
}

impl PathRoutePredicate {
    pub const NAME: &'static str = "Path";

    pub fn new(config: &PathConfig) -> Result<Self, PatternError> {
        let matcher =
            AntPathMatcher::new(MatcherOptions::path().with_case_sensitive(config.case_sensitive));
        let patterns = config
            .patterns
            .iter()
            .map(|p| matcher.compile(p))
            .collect::<Result<Vec<_>, _>>()?;

        if patterns.is_empty() {
            tracing::warn!("path predicate has no patterns and will never match");
        }

        Ok(Self { patterns })
    }

    pub fn evaluate(&self, path: &str) -> MatchResult {
        first_match("path", &self.patterns, Some(path))
    }
}

impl RoutePredicate for PathRoutePredicate {
    fn test(&self, exchange: &mut Exchange<'_>) -> bool {
        let result = self.evaluate(exchange.path());
        if result.matched {
            put_uri_template_variables(exchange.attributes(), result.variables);
        }
        result.matched
    }
}
