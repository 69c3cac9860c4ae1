//! Route predicates with Ant-style host and path patterns.
//!
//! A [`HostRoutePredicate`] matches the `Host` header against an ordered list
//! of dot-delimited patterns (`{tenant}.example.com`, `**.example.org`,
//! `{ip:[0-9]{1,3}}.*.net`). The first pattern that matches wins, and its
//! named placeholders are published to the request's attribute store.
//!
//! # Example
//!
//! ```
//! use route_predicates::{
//!     uri_template_variables, Exchange, HostConfig, HostRoutePredicate, RequestAttributes,
//!     RoutePredicate,
//! };
//!
//! let config = HostConfig::new(vec!["{sub}.example.com".to_string()]);
//! let predicate = HostRoutePredicate::new(&config).unwrap();
//!
//! let request = hyper::Request::builder()
//!     .uri("/")
//!     .header("Host", "shop.example.com")
//!     .body(())
//!     .unwrap();
//! let mut attributes = RequestAttributes::new();
//!
//! assert!(predicate.test(&mut Exchange::new(&request, &mut attributes)));
//! assert_eq!(uri_template_variables(&attributes).unwrap()["sub"], "shop");
//! ```

pub mod config;
pub mod error;
pub mod pattern;
pub mod predicate;
pub mod router;

pub use config::{GatewayConfig, HostConfig, PathConfig, PredicateDefinition, RouteDefinition};
pub use error::{ConfigError, PatternError};
pub use pattern::{AntPathMatcher, CompiledPattern, MatcherOptions, UriVariables};
pub use predicate::{
    put_uri_template_variables, uri_template_variables, AttributeStore, AttributeValue, Exchange,
    HostRoutePredicate, MatchResult, PathRoutePredicate, RequestAttributes, RoutePredicate,
    RoutePredicateExt, URI_TEMPLATE_VARIABLES_ATTRIBUTE,
};
pub use router::{RouteMatch, Router};
