//! Route predicates: tests over one request that may capture variables.
//!
//! Every predicate implements [`RoutePredicate`]. Captured variables are
//! published into the request's [`AttributeStore`] under
//! [`URI_TEMPLATE_VARIABLES_ATTRIBUTE`]. Predicates hold only compiled,
//! immutable state, so one instance serves any number of concurrent requests.
//!
//! # Module Structure
//!
//! - `attributes` - Request-scoped attribute store
//! - `host` - Host header patterns (`.` delimited)
//! - `path` - Request path patterns (`/` delimited)
//! - `logical` - AND, OR and NOT combinators

mod attributes;
mod host;
mod logical;
mod path;

use crate::pattern::{CompiledPattern, UriVariables};
use hyper::header::HOST;
use hyper::{HeaderMap, Method, Request, Uri};
use serde::Serialize;
use std::sync::Arc;

pub use attributes::{
    put_uri_template_variables, uri_template_variables, AttributeStore, AttributeValue,
    RequestAttributes, URI_TEMPLATE_VARIABLES_ATTRIBUTE,
};
pub use host::HostRoutePredicate;
pub use logical::{AndPredicate, NotPredicate, OrPredicate, RoutePredicateExt};
pub use path::PathRoutePredicate;

/// A test over one request.
pub trait RoutePredicate: Send + Sync + std::fmt::Debug {
    /// Returns true if the request satisfies this predicate, publishing any
    /// captured variables into the exchange's attributes.
    fn test(&self, exchange: &mut Exchange<'_>) -> bool;
}

/// Borrowed view of one request together with its attribute store.
pub struct Exchange<'a> {
    method: &'a Method,
    uri: &'a Uri,
    headers: &'a HeaderMap,
    attributes: &'a mut dyn AttributeStore,
}

impl<'a> Exchange<'a> {
    pub fn new<B>(request: &'a Request<B>, attributes: &'a mut dyn AttributeStore) -> Self {
        Self {
            method: request.method(),
            uri: request.uri(),
            headers: request.headers(),
            attributes,
        }
    }

    pub fn method(&self) -> &'a Method {
        self.method
    }

    pub fn uri(&self) -> &'a Uri {
        self.uri
    }

    pub fn headers(&self) -> &'a HeaderMap {
        self.headers
    }

    /// First `Host` header value; `None` when absent or not valid text.
    pub fn host(&self) -> Option<&'a str> {
        self.headers.get(HOST).and_then(|h| h.to_str().ok())
    }

    pub fn path(&self) -> &'a str {
        self.uri.path()
    }

    pub fn attributes(&mut self) -> &mut dyn AttributeStore {
        &mut *self.attributes
    }
}

impl std::fmt::Debug for Exchange<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exchange")
            .field("method", self.method)
            .field("uri", self.uri)
            .finish_non_exhaustive()
    }
}

/// Outcome of evaluating an ordered pattern list against one candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matched: bool,
    /// The pattern that matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub variables: UriVariables,
}

impl MatchResult {
    pub fn no_match() -> Self {
        Self::default()
    }

    pub fn matched(pattern: impl Into<String>, variables: UriVariables) -> Self {
        Self {
            matched: true,
            pattern: Some(pattern.into()),
            variables,
        }
    }
}

/// First-match-wins evaluation shared by the pattern-based predicates.
///
/// An absent candidate short-circuits without touching any pattern.
pub(crate) fn first_match(
    kind: &'static str,
    patterns: &[Arc<CompiledPattern>],
    candidate: Option<&str>,
) -> MatchResult {
    let Some(candidate) = candidate else {
        tracing::trace!(kind, "no candidate on request");
        return MatchResult::no_match();
    };

    for (index, pattern) in patterns.iter().enumerate() {
        if let Some(variables) = pattern.match_and_extract(candidate) {
            tracing::debug!(
                kind,
                candidate,
                pattern = pattern.as_str(),
                index,
                "pattern matched"
            );
            return MatchResult::matched(pattern.as_str(), variables);
        }
    }

    tracing::trace!(kind, candidate, patterns = patterns.len(), "no pattern matched");
    MatchResult::no_match()
}
