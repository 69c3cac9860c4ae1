//! Logical operators for combining predicates.
//!
//! Supports AND, OR and NOT over any [`RoutePredicate`]. All combinators
//! short-circuit in declaration order.

use super::{Exchange, RoutePredicate};

/// Matches if ALL of the inner predicates match.
///
/// An empty conjunction matches every request.
#[derive(Debug, Default)]
pub struct AndPredicate {
    predicates: Vec<Box<dyn RoutePredicate>>,
}

impl AndPredicate {
    pub fn new(predicates: Vec<Box<dyn RoutePredicate>>) -> Self {
        Self { predicates }
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl RoutePredicate for AndPredicate {
    fn test(&self, exchange: &mut Exchange<'_>) -> bool {
        self.predicates.iter().all(|p| p.test(exchange))
    }
}

/// Matches if ANY of the inner predicates match.
#[derive(Debug, Default)]
pub struct OrPredicate {
    predicates: Vec<Box<dyn RoutePredicate>>,
}

impl OrPredicate {
    pub fn new(predicates: Vec<Box<dyn RoutePredicate>>) -> Self {
        Self { predicates }
    }
}

impl RoutePredicate for OrPredicate {
    fn test(&self, exchange: &mut Exchange<'_>) -> bool {
        self.predicates.iter().any(|p| p.test(exchange))
    }
}

/// Negates the inner predicate.
#[derive(Debug)]
pub struct NotPredicate {
    inner: Box<dyn RoutePredicate>,
}

impl NotPredicate {
    pub fn new(inner: Box<dyn RoutePredicate>) -> Self {
        Self { inner }
    }
}

impl RoutePredicate for NotPredicate {
    fn test(&self, exchange: &mut Exchange<'_>) -> bool {
        !self.inner.test(exchange)
    }
}

/// Builder-style combinators for any concrete predicate.
pub trait RoutePredicateExt: RoutePredicate + Sized + 'static {
    fn and<P: RoutePredicate + 'static>(self, other: P) -> AndPredicate {
        AndPredicate::new(vec![Box::new(self), Box::new(other)])
    }

    fn or<P: RoutePredicate + 'static>(self, other: P) -> OrPredicate {
        OrPredicate::new(vec![Box::new(self), Box::new(other)])
    }

    fn negate(self) -> NotPredicate {
        NotPredicate::new(Box::new(self))
    }
}

impl<T: RoutePredicate + 'static> RoutePredicateExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HostConfig, PathConfig};
    use crate::predicate::{
        uri_template_variables, HostRoutePredicate, PathRoutePredicate, RequestAttributes,
    };
    use hyper::Request;

    fn host(pattern: &str) -> HostRoutePredicate {
        let mut config = HostConfig::default();
        #[allow(deprecated)]
        config.set_pattern(pattern);
        HostRoutePredicate::new(&config).unwrap()
    }

    fn path(pattern: &str) -> PathRoutePredicate {
        PathRoutePredicate::new(&PathConfig {
            patterns: vec![pattern.to_string()],
            ..Default::default()
        })
        .unwrap()
    }

    fn test_request(
        predicate: &dyn RoutePredicate,
        host: &str,
        uri: &str,
    ) -> (bool, RequestAttributes) {
        let request = Request::builder()
            .uri(uri)
            .header("Host", host)
            .body(())
            .unwrap();
        let mut attributes = RequestAttributes::new();
        let matched = predicate.test(&mut Exchange::new(&request, &mut attributes));
        (matched, attributes)
    }

    #[test]
    fn test_logical_and_merges_variables() {
        let predicate = host("{tenant}.example.com").and(path("/api/{version}/**"));

        let (matched, attributes) = test_request(&predicate, "acme.example.com", "/api/v2/users");
        assert!(matched);
        let vars = uri_template_variables(&attributes).unwrap();
        assert_eq!(vars["tenant"], "acme");
        assert_eq!(vars["version"], "v2");

        let (matched, _) = test_request(&predicate, "acme.example.com", "/health");
        assert!(!matched);
    }

    #[test]
    fn test_logical_and_short_circuits() {
        let predicate = host("*.example.org").and(path("/{anything}"));

        let (matched, attributes) = test_request(&predicate, "acme.example.com", "/x");
        assert!(!matched);
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_logical_or() {
        let predicate = host("**.example.com").or(host("**.example.org"));

        assert!(test_request(&predicate, "a.example.com", "/").0);
        assert!(test_request(&predicate, "example.org", "/").0);
        assert!(!test_request(&predicate, "example.net", "/").0);
    }

    #[test]
    fn test_logical_not() {
        let predicate = host("admin.**").negate();

        assert!(!test_request(&predicate, "admin.example.com", "/").0);
        assert!(test_request(&predicate, "www.example.com", "/").0);
    }

    #[test]
    fn test_empty_and_matches_everything() {
        let predicate = AndPredicate::default();
        assert!(predicate.is_empty());
        assert!(test_request(&predicate, "anything", "/").0);
    }
}
