//! Route selection over compiled route definitions.
//!
//! Routes are tried in `order`, then file order. A route matches when all of
//! its predicates match, and the first matching route wins.

use crate::config::{GatewayConfig, RouteDefinition};
use crate::error::ConfigError;
use crate::pattern::UriVariables;
use crate::predicate::{
    put_uri_template_variables, uri_template_variables, AndPredicate, AttributeStore, Exchange,
    RequestAttributes, RoutePredicate,
};
use hyper::Request;
use serde::Serialize;

/// Router matches incoming requests to routes
#[derive(Debug)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

#[derive(Debug)]
struct CompiledRoute {
    id: String,
    uri: String,
    order: i32,
    predicate: AndPredicate,
}

/// The route selected for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch<'a> {
    pub id: &'a str,
    pub uri: &'a str,
    pub variables: UriVariables,
}

impl Router {
    /// Compile every route, then order them by `order` (stable).
    pub fn new(definitions: Vec<RouteDefinition>) -> Result<Self, ConfigError> {
        let mut routes = definitions
            .into_iter()
            .map(compile_route)
            .collect::<Result<Vec<_>, _>>()?;
        routes.sort_by_key(|route| route.order);

        tracing::info!(routes = routes.len(), "router compiled");
        Ok(Router { routes })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        Self::new(config.routes.clone())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route ids in evaluation order.
    pub fn route_ids(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.id.as_str())
    }

    /// First-match-wins over the routes. Only the winning route's variables
    /// reach `attributes`.
    pub fn match_request<B>(
        &self,
        req: &Request<B>,
        attributes: &mut dyn AttributeStore,
    ) -> Option<RouteMatch<'_>> {
        for route in &self.routes {
            let mut scratch = RequestAttributes::new();
            if !route.predicate.test(&mut Exchange::new(req, &mut scratch)) {
                continue;
            }

            let variables = uri_template_variables(&scratch)
                .cloned()
                .unwrap_or_default();
            tracing::debug!(route = %route.id, uri = %route.uri, "route matched");
            put_uri_template_variables(attributes, variables.clone());
            return Some(RouteMatch {
                id: &route.id,
                uri: &route.uri,
                variables,
            });
        }

        tracing::trace!(routes = self.routes.len(), "no route matched");
        None
    }
}

fn compile_route(definition: RouteDefinition) -> Result<CompiledRoute, ConfigError> {
    let predicates = definition
        .predicates
        .iter()
        .map(|predicate| predicate.build())
        .collect::<Result<Vec<Box<dyn RoutePredicate>>, _>>()
        .map_err(|e| match e {
            ConfigError::InvalidPattern(source) => ConfigError::Pattern {
                route: definition.id.clone(),
                source,
            },
            other => other,
        })?;

    Ok(CompiledRoute {
        id: definition.id,
        uri: definition.uri,
        order: definition.order,
        predicate: AndPredicate::new(predicates),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PredicateDefinition;

    fn route(id: &str, order: i32, predicates: &[&str]) -> RouteDefinition {
        RouteDefinition {
            id: id.to_string(),
            uri: format!("http://{id}.internal"),
            order,
            predicates: predicates
                .iter()
                .map(|p| PredicateDefinition::parse(p).unwrap())
                .collect(),
        }
    }

    fn request(host: &str, path: &str) -> Request<()> {
        Request::builder()
            .uri(path)
            .header("Host", host)
            .body(())
            .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let router = Router::new(vec![
            route("tenant", 0, &["Host={tenant}.example.com"]),
            route("catch-all", 0, &["Host=**"]),
        ])
        .unwrap();

        let mut attributes = RequestAttributes::new();
        let matched = router
            .match_request(&request("acme.example.com", "/"), &mut attributes)
            .unwrap();
        assert_eq!(matched.id, "tenant");
        assert_eq!(matched.uri, "http://tenant.internal");
        assert_eq!(matched.variables["tenant"], "acme");
        assert_eq!(uri_template_variables(&attributes).unwrap()["tenant"], "acme");

        let matched = router
            .match_request(&request("example.org", "/"), &mut RequestAttributes::new())
            .unwrap();
        assert_eq!(matched.id, "catch-all");
    }

    #[test]
    fn test_order_sorts_routes() {
        let router = Router::new(vec![
            route("late", 5, &["Host=**"]),
            route("early", -1, &["Host=**.example.com"]),
            route("also-late", 5, &["Host=**"]),
        ])
        .unwrap();

        assert_eq!(
            router.route_ids().collect::<Vec<_>>(),
            vec!["early", "late", "also-late"]
        );
    }

    #[test]
    fn test_failed_route_variables_discarded() {
        let router = Router::new(vec![
            route("api", 0, &["Host={tenant}.example.com", "Path=/api/**"]),
            route("web", 0, &["Host=**.example.com"]),
        ])
        .unwrap();

        let mut attributes = RequestAttributes::new();
        let matched = router
            .match_request(&request("acme.example.com", "/index.html"), &mut attributes)
            .unwrap();
        assert_eq!(matched.id, "web");
        assert!(matched.variables.is_empty());
        assert!(uri_template_variables(&attributes).unwrap().is_empty());
    }

    #[test]
    fn test_no_route_matches() {
        let router = Router::new(vec![route("api", 0, &["Host=api.example.com"])]).unwrap();
        let mut attributes = RequestAttributes::new();

        assert!(router
            .match_request(&request("www.example.com", "/"), &mut attributes)
            .is_none());
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_route_without_predicates_matches_all() {
        let router = Router::new(vec![route("default", 0, &[])]).unwrap();
        assert_eq!(router.len(), 1);
        assert!(router
            .match_request(&request("anything", "/"), &mut RequestAttributes::new())
            .is_some());
    }

    #[test]
    fn test_invalid_pattern_names_route() {
        let err = Router::new(vec![route("broken", 0, &["Host={id:(}.example.com"])]).unwrap_err();
        assert!(matches!(&err, ConfigError::Pattern { route, .. } if route == "broken"));
        assert!(err.to_string().starts_with("route 'broken'"));
    }
}
