//! Host header predicate.

use super::{first_match, put_uri_template_variables, Exchange, MatchResult, RoutePredicate};
use crate::config::HostConfig;
use crate::error::PatternError;
use crate::pattern::{AntPathMatcher, CompiledPattern, MatcherOptions};
use std::sync::Arc;

/// Matches the `Host` header against an ordered list of dot-delimited
/// patterns. The first matching pattern wins and its variables are published
/// to the request.
#[derive(Debug, Clone)]
pub struct HostRoutePredicate {
    patterns: Vec<Arc<CompiledPattern>>,
}

impl HostRoutePredicate {
    pub const NAME: &'static str = "Host";

    /// Compile every configured pattern up front.
    pub fn new(config: &HostConfig) -> Result<Self, PatternError> {
        let options = MatcherOptions::host().with_case_sensitive(config.case_sensitive);
        Self::with_matcher(config.patterns(), &AntPathMatcher::new(options))
    }

    /// Compile through a shared matcher, reusing its cache and options.
    pub fn with_matcher<S: AsRef<str>>(
        patterns: &[S],
        matcher: &AntPathMatcher,
    ) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| matcher.compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if patterns.is_empty() {
            tracing::warn!("host predicate has no patterns and will never match");
        }

        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.as_str())
    }

    /// Evaluate the patterns in order against a host value.
    pub fn evaluate(&self, host: Option<&str>) -> MatchResult {
        first_match("host", &self.patterns, host)
    }
}

impl RoutePredicate for HostRoutePredicate {
    fn test(&self, exchange: &mut Exchange<'_>) -> bool {
        let result = self.evaluate(exchange.host());
        if !result.matched {
            return false;
        }
        put_uri_template_variables(exchange.attributes(), result.variables);
        true
    }
}
