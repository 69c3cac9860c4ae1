//! String-level matcher with a shared compiled-pattern cache.

use super::compiled::CompiledPattern;
use super::options::MatcherOptions;
use super::parser;
use super::UriVariables;
use crate::error::PatternError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Distinct patterns cached before the cache is switched off for good.
///
/// Past this point patterns are most likely built from request data, and
/// caching them would only grow memory.
pub const CACHE_TURNOFF_THRESHOLD: usize = 65_536;

/// Ant-style matcher over delimiter-separated segments.
///
/// Takes raw pattern strings and compiles them on demand. Compiled patterns
/// are memoized, so the matcher can be shared behind an `Arc` and called
/// concurrently.
///
/// # Example
/// ```
/// use route_predicates::pattern::AntPathMatcher;
///
/// let matcher = AntPathMatcher::host();
/// assert!(matcher.matches("**.example.com", "a.b.example.com").unwrap());
///
/// let vars = matcher
///     .extract_variables("{sub}.example.com", "foo.example.com")
///     .unwrap();
/// assert_eq!(vars["sub"], "foo");
/// ```
#[derive(Debug)]
pub struct AntPathMatcher {
    options: MatcherOptions,
    cache: RwLock<HashMap<String, Arc<CompiledPattern>>>,
    cache_enabled: AtomicBool,
    cache_limit: usize,
}

impl AntPathMatcher {
    pub fn new(options: MatcherOptions) -> Self {
        Self::with_cache_limit(options, CACHE_TURNOFF_THRESHOLD)
    }

    /// Matcher whose cache switches off once `limit` patterns are held.
    pub fn with_cache_limit(options: MatcherOptions, limit: usize) -> Self {
        Self {
            options,
            cache: RwLock::new(HashMap::new()),
            cache_enabled: AtomicBool::new(true),
            cache_limit: limit,
        }
    }

    /// Matcher for host names (`.` delimiter, case-sensitive).
    pub fn host() -> Self {
        Self::new(MatcherOptions::host())
    }

    /// Matcher for request paths (`/` delimiter, case-sensitive).
    pub fn path() -> Self {
        Self::new(MatcherOptions::path())
    }

    pub fn options(&self) -> MatcherOptions {
        self.options
    }

    /// Whether `text` uses any wildcard or placeholder syntax.
    pub fn is_pattern(&self, text: &str) -> bool {
        parser::has_wildcards(text)
    }

    /// Compile `pattern`, reusing a cached compilation when available.
    pub fn compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>, PatternError> {
        let caching = self.cache_enabled.load(Ordering::Relaxed);
        if caching {
            if let Some(compiled) = self.cache.read().get(pattern) {
                return Ok(Arc::clone(compiled));
            }
        }

        let compiled = Arc::new(CompiledPattern::compile(pattern, self.options)?);
        if !caching {
            return Ok(compiled);
        }

        let mut cache = self.cache.write();
        if cache.len() >= self.cache_limit {
            tracing::warn!(
                threshold = self.cache_limit,
                "pattern cache limit reached, caching disabled"
            );
            self.cache_enabled.store(false, Ordering::Relaxed);
            cache.clear();
            return Ok(compiled);
        }

        // A concurrent caller may have compiled the same pattern first.
        Ok(Arc::clone(
            cache.entry(pattern.to_string()).or_insert(compiled),
        ))
    }

    /// Check if `candidate` matches `pattern`.
    pub fn matches(&self, pattern: &str, candidate: &str) -> Result<bool, PatternError> {
        Ok(self.compile(pattern)?.matches(candidate))
    }

    /// Variables `pattern` binds in `candidate`; empty when it does not match.
    pub fn extract_variables(
        &self,
        pattern: &str,
        candidate: &str,
    ) -> Result<UriVariables, PatternError> {
        Ok(self.compile(pattern)?.extract_variables(candidate))
    }

    /// Match and extract in one pass.
    pub fn match_and_extract(
        &self,
        pattern: &str,
        candidate: &str,
    ) -> Result<Option<UriVariables>, PatternError> {
        Ok(self.compile(pattern)?.match_and_extract(candidate))
    }

    pub fn cached_patterns(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_caching(&self) -> bool {
        self.cache_enabled.load(Ordering::Relaxed)
    }
}

impl Default for AntPathMatcher {
    fn default() -> Self {
        Self::host()
    }
}
